//! The canonical expression tree.
//!
//! An expression is a tagged node: either a *leaf* (a numeric literal, a symbol, or the blank
//! placeholder used in partially-specified input) or an *interior* node (a function application,
//! or an operator from a fixed vocabulary together with its ordered children).
//!
//! The n-ary operators `+`, `*`, `and`, `or`, `union` and `intersect` are stored **flattened**:
//! the expression `x + (y + z)` is a single [`Op::Add`] node with three children, `x`, `y` and
//! `z`. The only exception is the window between a deliberate [`deassociate`] and the matching
//! [`associate`], used by algorithms that only understand binary operators.
//!
//! [`associate`]: crate::assoc::associate
//! [`deassociate`]: crate::assoc::deassociate
//!
//! # Structural equality
//!
//! The derived [`PartialEq`] implements **positional structural equality**: same tags, same
//! children, in the same order. `1 + 2x` and `x*2 + 1` are *not* structurally equal even though
//! they are mathematically equal; deciding the latter is the job of the equivalence engine built
//! on top of this crate. Positional equality can never report a false positive, which is what
//! makes it a safe building block.

mod iter;

use iter::ExprIter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A numeric literal: an exact machine integer or a binary float.
///
/// The two kinds are kept distinct so that printers can reproduce what the parser saw, but they
/// compare *numerically*: `Number::Integer(2)` equals `Number::Float(2.0)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Number {
    /// An integer, such as `2` or `144`.
    Integer(i64),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(f64),
}

impl Number {
    /// The numeric value of this literal.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => *n as f64,
            Self::Float(f) => *f,
        }
    }

    /// Returns true if the literal is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Integer(n) => *n > 0,
            Self::Float(f) => *f > 0.0,
        }
    }

    /// The literal with its sign flipped, preserving the kind.
    pub fn neg(&self) -> Self {
        match self {
            Self::Integer(n) => Self::Integer(-n),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.as_f64() == other.as_f64()
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

/// The fixed operator vocabulary of interior nodes.
///
/// Operator arity is either fixed (`Neg`, `Div`, `Pow`, ...) or variable (`Add`, `Mul`, `And`,
/// `Or`, `Union`, `Intersect`); the variable-arity tags are exactly the
/// [commutative/associative set](Op::is_commutative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Op {
    /// n-ary sum.
    Add,
    /// n-ary product.
    Mul,
    /// Unary negation.
    Neg,
    /// Unary plus. Mathematically redundant, but parsers produce it and normalization removes it.
    Plus,
    /// Binary division.
    Div,
    /// Binary exponentiation.
    Pow,
    /// Unary factorial.
    Factorial,

    /// `=`
    Eq,
    /// `≠`
    Ne,
    /// `<`
    Lt,
    /// `≤`
    Le,
    /// `>`
    Gt,
    /// `≥`
    Ge,

    /// `∈`
    In,
    /// `∉`
    NotIn,
    /// `∋`
    Ni,
    /// `∌`
    NotNi,
    /// `⊂`
    Subset,
    /// `⊄`
    NotSubset,
    /// `⊆`
    SubsetEq,
    /// `⊈`
    NotSubsetEq,
    /// `⊃`
    Superset,
    /// `⊅`
    NotSuperset,
    /// `⊇`
    SupersetEq,
    /// `⊉`
    NotSupersetEq,

    /// n-ary logical conjunction.
    And,
    /// n-ary logical disjunction.
    Or,
    /// Unary logical negation.
    Not,

    /// n-ary set union.
    Union,
    /// n-ary set intersection.
    Intersect,

    /// Ordered tuple `(a, b, ...)`.
    Tuple,
    /// Vector `(a, b, ...)` produced by an explicit coercion or a vector-aware parser.
    Vector,
    /// Angle-bracket vector `⟨a, b, ...⟩`.
    AltVector,
    /// Array `[a, b, ...]`.
    Array,
    /// Interval with independently open/closed endpoints; always binary.
    Interval {
        left_closed: bool,
        right_closed: bool,
    },

    /// Geometric angle `∠ABC`; always ternary.
    Angle,
    /// Geometric line segment; always binary.
    LineSegment,

    /// Derivative tick on a function symbol, as in `f'`.
    Prime,
}

impl Op {
    /// Returns true if this tag is in the commutative/associative set `{+, *, and, or, union,
    /// intersect}`. These are the n-ary tags that [`associate`](crate::assoc::associate) flattens.
    pub fn is_commutative(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Mul | Self::And | Self::Or | Self::Union | Self::Intersect
        )
    }

    /// Returns true if this tag constructs a collection (tuple / vector / array / interval),
    /// which the equality options may treat as interchangeable.
    pub fn is_constructor(&self) -> bool {
        matches!(
            self,
            Self::Tuple | Self::Vector | Self::AltVector | Self::Array | Self::Interval { .. }
        )
    }
}

/// A node of the canonical expression tree.
///
/// Children are owned exclusively by their parent; no back-references are representable, so
/// every traversal is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A numeric literal.
    Number(Number),

    /// A symbol: a variable or named constant such as `x`, `pi` or `e`.
    Symbol(String),

    /// The blank placeholder standing for a missing piece of input.
    Blank,

    /// Function application. The head is usually a [`Expr::Symbol`], but powered heads
    /// (`sin^2`) and primed heads (`f'`) are also trees.
    Apply(Box<Expr>, Vec<Expr>),

    /// An operator with its ordered children.
    Op(Op, Vec<Expr>),
}

impl Expr {
    /// An integer literal.
    pub fn int(n: i64) -> Self {
        Self::Number(Number::Integer(n))
    }

    /// A float literal.
    pub fn float(f: f64) -> Self {
        Self::Number(Number::Float(f))
    }

    /// A symbol.
    pub fn sym(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }

    /// A call of a named function.
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::Apply(Box::new(Self::sym(name)), args)
    }

    /// An n-ary sum.
    pub fn add(terms: Vec<Expr>) -> Self {
        Self::Op(Op::Add, terms)
    }

    /// An n-ary product.
    pub fn mul(factors: Vec<Expr>) -> Self {
        Self::Op(Op::Mul, factors)
    }

    /// Unary negation.
    pub fn neg(expr: Expr) -> Self {
        Self::Op(Op::Neg, vec![expr])
    }

    /// Binary division.
    pub fn div(num: Expr, den: Expr) -> Self {
        Self::Op(Op::Div, vec![num, den])
    }

    /// Binary exponentiation.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Op(Op::Pow, vec![base, exp])
    }

    /// If the expression is a numeric literal, returns it.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e.
    /// depth-first), using an explicit work stack rather than native recursion.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// The set of free symbol names appearing in the tree.
    ///
    /// Heads of function applications are *not* free variables (`f` in `f(x)` names a function,
    /// not a value), and the blank placeholder is reported by [`Expr::contains_blank`] instead.
    pub fn variables(&self) -> HashSet<String> {
        let mut vars = HashSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut HashSet<String>) {
        match self {
            Self::Number(_) | Self::Blank => {}
            Self::Symbol(name) => {
                vars.insert(name.clone());
            }
            Self::Apply(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
            Self::Op(_, children) => {
                for child in children {
                    child.collect_variables(vars);
                }
            }
        }
    }

    /// Returns true if the blank placeholder occurs anywhere in the tree.
    pub fn contains_blank(&self) -> bool {
        self.post_order_iter().any(|node| matches!(node, Self::Blank))
    }

    /// Returns a new tree with every occurrence of a symbol replaced by the corresponding
    /// expression from `map`. Function heads are substituted too, so a caller can rename
    /// functions with the same primitive.
    pub fn substitute(&self, map: &HashMap<String, Expr>) -> Expr {
        match self {
            Self::Symbol(name) => match map.get(name) {
                Some(replacement) => replacement.clone(),
                None => self.clone(),
            },
            Self::Number(_) | Self::Blank => self.clone(),
            Self::Apply(head, args) => Self::Apply(
                Box::new(head.substitute(map)),
                args.iter().map(|arg| arg.substitute(map)).collect(),
            ),
            Self::Op(op, children) => Self::Op(
                *op,
                children.iter().map(|child| child.substitute(map)).collect(),
            ),
        }
    }

    /// Applies a rewrite bottom-up: children are rebuilt first, then `f` is applied to the
    /// resulting node. Every normalization pass is built on this primitive.
    pub fn map_bottom_up(&self, f: &impl Fn(Expr) -> Expr) -> Expr {
        let rebuilt = match self {
            Self::Number(_) | Self::Symbol(_) | Self::Blank => self.clone(),
            Self::Apply(head, args) => Self::Apply(
                Box::new(head.map_bottom_up(f)),
                args.iter().map(|arg| arg.map_bottom_up(f)).collect(),
            ),
            Self::Op(op, children) => Self::Op(
                *op,
                children.iter().map(|child| child.map_bottom_up(f)).collect(),
            ),
        };
        f(rebuilt)
    }

    /// A total structural order on trees, used to canonicalize argument order where an operator
    /// is commutative-under-reversal (angles, line segments). Floats are ordered by
    /// [`f64::total_cmp`], so the order really is total.
    pub fn cmp_structural(&self, other: &Self) -> Ordering {
        fn rank(expr: &Expr) -> u8 {
            match expr {
                Expr::Number(_) => 0,
                Expr::Symbol(_) => 1,
                Expr::Blank => 2,
                Expr::Apply(_, _) => 3,
                Expr::Op(_, _) => 4,
            }
        }

        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.as_f64().total_cmp(&b.as_f64()),
            (Self::Symbol(a), Self::Symbol(b)) => a.cmp(b),
            (Self::Blank, Self::Blank) => Ordering::Equal,
            (Self::Apply(ah, aa), Self::Apply(bh, ba)) => ah
                .cmp_structural(bh)
                .then_with(|| cmp_children(aa, ba)),
            (Self::Op(ao, ac), Self::Op(bo, bc)) => {
                ao.cmp(bo).then_with(|| cmp_children(ac, bc))
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

fn cmp_children(a: &[Expr], b: &[Expr]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        for (x, y) in a.iter().zip(b) {
            match x.cmp_structural(y) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        Ordering::Equal
    })
}

impl Op {
    /// Precedence used only for parenthesization when printing.
    fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Not => 3,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => 4,
            Self::In
            | Self::NotIn
            | Self::Ni
            | Self::NotNi
            | Self::Subset
            | Self::NotSubset
            | Self::SubsetEq
            | Self::NotSubsetEq
            | Self::Superset
            | Self::NotSuperset
            | Self::SupersetEq
            | Self::NotSupersetEq => 4,
            Self::Union | Self::Intersect => 5,
            Self::Add => 6,
            Self::Mul | Self::Div => 7,
            Self::Neg | Self::Plus => 8,
            Self::Pow => 9,
            Self::Factorial | Self::Prime => 10,
            // constructors bracket themselves
            _ => 11,
        }
    }

    fn infix_str(&self) -> Option<&'static str> {
        Some(match self {
            Self::Add => " + ",
            Self::Mul => " * ",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Eq => " = ",
            Self::Ne => " != ",
            Self::Lt => " < ",
            Self::Le => " <= ",
            Self::Gt => " > ",
            Self::Ge => " >= ",
            Self::In => " elementof ",
            Self::NotIn => " notelementof ",
            Self::Ni => " containselement ",
            Self::NotNi => " notcontainselement ",
            Self::Subset => " subset ",
            Self::NotSubset => " notsubset ",
            Self::SubsetEq => " subseteq ",
            Self::NotSubsetEq => " notsubseteq ",
            Self::Superset => " superset ",
            Self::NotSuperset => " notsuperset ",
            Self::SupersetEq => " superseteq ",
            Self::NotSupersetEq => " notsuperseteq ",
            Self::And => " and ",
            Self::Or => " or ",
            Self::Union => " union ",
            Self::Intersect => " intersect ",
            _ => return None,
        })
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn prec(expr: &Expr) -> u8 {
            match expr {
                Expr::Op(op, _) => op.precedence(),
                // leaves and calls never need parentheses
                _ => u8::MAX,
            }
        }

        fn write_child(
            f: &mut std::fmt::Formatter<'_>,
            child: &Expr,
            parent: u8,
        ) -> std::fmt::Result {
            if prec(child) < parent {
                write!(f, "({})", child)
            } else {
                write!(f, "{}", child)
            }
        }

        fn write_list(
            f: &mut std::fmt::Formatter<'_>,
            children: &[Expr],
            open: &str,
            close: &str,
        ) -> std::fmt::Result {
            write!(f, "{}", open)?;
            let mut iter = children.iter();
            if let Some(first) = iter.next() {
                write!(f, "{}", first)?;
                for child in iter {
                    write!(f, ", {}", child)?;
                }
            }
            write!(f, "{}", close)
        }

        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Blank => write!(f, "_"),
            Self::Apply(head, args) => {
                write_child(f, head, Op::Prime.precedence())?;
                write_list(f, args, "(", ")")
            }
            Self::Op(op, children) => {
                if let Some(infix) = op.infix_str() {
                    let p = op.precedence();
                    let mut iter = children.iter();
                    if let Some(first) = iter.next() {
                        write_child(f, first, p)?;
                        for child in iter {
                            write!(f, "{}", infix)?;
                            // right operands of / and ^ need parens at equal precedence
                            write_child(
                                f,
                                child,
                                if matches!(op, Op::Div | Op::Pow) { p + 1 } else { p },
                            )?;
                        }
                    }
                    Ok(())
                } else {
                    match op {
                        Op::Neg => {
                            write!(f, "-")?;
                            write_child(f, &children[0], op.precedence() + 1)
                        }
                        Op::Plus => {
                            write!(f, "+")?;
                            write_child(f, &children[0], op.precedence() + 1)
                        }
                        Op::Not => {
                            write!(f, "not ")?;
                            write_child(f, &children[0], op.precedence() + 1)
                        }
                        Op::Factorial => {
                            write_child(f, &children[0], op.precedence() + 1)?;
                            write!(f, "!")
                        }
                        Op::Prime => {
                            write_child(f, &children[0], op.precedence() + 1)?;
                            write!(f, "'")
                        }
                        Op::Tuple => write_list(f, children, "(", ")"),
                        Op::Vector => write_list(f, children, "vector(", ")"),
                        Op::AltVector => write_list(f, children, "altvector(", ")"),
                        Op::Array => write_list(f, children, "[", "]"),
                        Op::Interval {
                            left_closed,
                            right_closed,
                        } => write_list(
                            f,
                            children,
                            if *left_closed { "interval[" } else { "interval(" },
                            if *right_closed { "]" } else { ")" },
                        ),
                        Op::Angle => write_list(f, children, "angle(", ")"),
                        Op::LineSegment => write_list(f, children, "linesegment(", ")"),
                        _ => write_list(f, children, "(", ")"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn variables_skip_heads_and_blanks() {
        // sin(x) + f(y) * _
        let expr = Expr::add(vec![
            Expr::call("sin", vec![Expr::sym("x")]),
            Expr::mul(vec![Expr::call("f", vec![Expr::sym("y")]), Expr::Blank]),
        ]);

        let vars = expr.variables();
        assert_eq!(
            vars,
            ["x", "y"].iter().map(|s| s.to_string()).collect()
        );
        assert!(expr.contains_blank());
    }

    #[test]
    fn substitute_rebuilds() {
        let expr = Expr::pow(Expr::sym("x"), Expr::int(2));
        let map = HashMap::from([("x".to_string(), Expr::add(vec![Expr::sym("y"), Expr::int(1)]))]);
        assert_eq!(
            expr.substitute(&map),
            Expr::pow(Expr::add(vec![Expr::sym("y"), Expr::int(1)]), Expr::int(2)),
        );
        // the original is untouched
        assert_eq!(expr, Expr::pow(Expr::sym("x"), Expr::int(2)));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(Expr::int(2), Expr::float(2.0));
        assert_ne!(Expr::int(2), Expr::float(2.5));
    }

    #[test]
    fn structural_equality_is_positional() {
        let a = Expr::add(vec![Expr::int(1), Expr::sym("x")]);
        let b = Expr::add(vec![Expr::sym("x"), Expr::int(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn fmt_expr() {
        let expr = Expr::mul(vec![
            Expr::int(2),
            Expr::add(vec![Expr::sym("x"), Expr::int(1)]),
            Expr::pow(Expr::sym("y"), Expr::int(3)),
        ]);
        assert_eq!(expr.to_string(), "2 * (x + 1) * y^3");

        let call = Expr::Apply(
            Box::new(Expr::pow(Expr::sym("sin"), Expr::int(2))),
            vec![Expr::sym("x")],
        );
        assert_eq!(call.to_string(), "(sin^2)(x)");
    }

    #[test]
    fn structural_order_is_total() {
        let a = Expr::sym("A");
        let c = Expr::sym("C");
        assert_eq!(a.cmp_structural(&c), Ordering::Less);
        assert_eq!(c.cmp_structural(&a), Ordering::Greater);
        assert_eq!(a.cmp_structural(&a), Ordering::Equal);
        assert_eq!(
            Expr::int(1).cmp_structural(&Expr::sym("A")),
            Ordering::Less
        );
    }
}
