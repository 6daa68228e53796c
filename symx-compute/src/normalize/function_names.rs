use crate::funcs;
use symx_tree::Expr;

/// Collapses function-name synonyms and rewrites the applications that have a canonical
/// operator form.
///
/// - `asin`, `acosh`, ... become their `arc` spellings; `ln` becomes `log`; `nCr` becomes
///   `binom`.
/// - `exp(x)` becomes `e^x`.
/// - `log(x, b)` with a literal base becomes `log(x) / log(b)`.
pub fn normalize_function_names(expr: &Expr) -> Expr {
    expr.map_bottom_up(&|node| {
        let (head, args) = match node {
            Expr::Apply(head, args) => (head, args),
            other => return other,
        };
        let head = match *head {
            Expr::Symbol(name) => Expr::Symbol(funcs::canonical_name(&name).to_string()),
            other => other,
        };

        if head.as_symbol() == Some("exp") && args.len() == 1 {
            let mut args = args;
            return Expr::pow(Expr::sym("e"), args.remove(0));
        }
        if head.as_symbol() == Some("log") && args.len() == 2 && args[1].as_number().is_some() {
            let [x, base]: [Expr; 2] = match args.try_into() {
                Ok(pair) => pair,
                Err(args) => return Expr::Apply(Box::new(head), args),
            };
            return Expr::div(Expr::call("log", vec![x]), Expr::call("log", vec![base]));
        }
        Expr::Apply(Box::new(head), args)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn synonyms_are_rewritten_everywhere() {
        let expr = Expr::call("asin", vec![Expr::call("ln", vec![Expr::sym("x")])]);
        assert_eq!(
            normalize_function_names(&expr),
            Expr::call("arcsin", vec![Expr::call("log", vec![Expr::sym("x")])]),
        );
    }

    #[test]
    fn exp_becomes_power_of_e() {
        let expr = Expr::call("exp", vec![Expr::mul(vec![Expr::int(2), Expr::sym("x")])]);
        assert_eq!(
            normalize_function_names(&expr),
            Expr::pow(
                Expr::sym("e"),
                Expr::mul(vec![Expr::int(2), Expr::sym("x")]),
            ),
        );
    }

    #[test]
    fn explicit_base_log_becomes_quotient() {
        let expr = Expr::call("log", vec![Expr::sym("x"), Expr::int(10)]);
        assert_eq!(
            normalize_function_names(&expr),
            Expr::div(
                Expr::call("log", vec![Expr::sym("x")]),
                Expr::call("log", vec![Expr::int(10)]),
            ),
        );
    }

    #[test]
    fn symbolic_base_log_is_left_alone() {
        let expr = Expr::call("log", vec![Expr::sym("x"), Expr::sym("b")]);
        assert_eq!(normalize_function_names(&expr), expr);
    }
}
