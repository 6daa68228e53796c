use crate::funcs;
use symx_tree::{Expr, Op};

/// Rewrites powered and primed function heads into their canonical application form.
///
/// `sin^2(x)` becomes `sin(x)^2`, `cos^(-1)(x)` becomes `arccos(x)`, and a derivative tick on a
/// whole application moves onto the head: `f(x)'` becomes `f'(x)`. Only *known* function names
/// are touched; for a user symbol, `f^2(x)` may well mean `f(f(x))` or `(f(x))^2` depending on
/// the author, so it is left exactly as written.
pub fn normalize_applied_functions(expr: &Expr) -> Expr {
    expr.map_bottom_up(&|node| match node {
        Expr::Apply(head, args) => rewrite_powered_head(*head, args),
        Expr::Op(Op::Prime, mut children) if children.len() == 1 => match children.pop() {
            Some(Expr::Apply(f, args)) => {
                Expr::Apply(Box::new(Expr::Op(Op::Prime, vec![*f])), args)
            }
            Some(other) => Expr::Op(Op::Prime, vec![other]),
            None => Expr::Op(Op::Prime, children),
        },
        other => other,
    })
}

fn rewrite_powered_head(head: Expr, args: Vec<Expr>) -> Expr {
    let pow_children = match head {
        Expr::Op(Op::Pow, children) if children.len() == 2 => children,
        other => return Expr::Apply(Box::new(other), args),
    };
    let [f, exponent]: [Expr; 2] = match pow_children.try_into() {
        Ok(pair) => pair,
        Err(children) => return Expr::Apply(Box::new(Expr::Op(Op::Pow, children)), args),
    };
    let name = match &f {
        Expr::Symbol(name) if funcs::is_known(name) => name.clone(),
        _ => return Expr::Apply(Box::new(Expr::pow(f, exponent)), args),
    };

    if is_negative_one(&exponent) {
        if let Some(inverse) = funcs::inverse_of(&name) {
            return Expr::call(inverse, args);
        }
    }
    Expr::pow(Expr::call(&name, args), exponent)
}

fn is_negative_one(expr: &Expr) -> bool {
    match expr {
        Expr::Number(n) => n.as_f64() == -1.0,
        Expr::Op(Op::Neg, children) if children.len() == 1 => {
            matches!(children[0].as_number(), Some(n) if n.as_f64() == 1.0)
        }
        _ => false,
    }
}
