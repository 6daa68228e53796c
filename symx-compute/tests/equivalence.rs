//! End-to-end equivalence checks, exercising normalization, sampling, assumptions, relations,
//! containers and matching together.

use pretty_assertions::assert_eq;
use symx_compute::{equals_via_syntax, match_tree, Context, EqualityOptions, Inconclusive, MatchParams};
use symx_tree::{encode, Expr, Op};

fn x() -> Expr {
    Expr::sym("x")
}

fn opts() -> EqualityOptions {
    EqualityOptions::default()
}

fn ctxt() -> Context {
    Context::with_seed(42)
}

#[test]
fn equals_is_reflexive_and_symmetric() {
    let exprs = [
        Expr::add(vec![x(), Expr::int(1)]),
        Expr::call("sin", vec![x()]),
        Expr::pow(x(), Expr::sym("y")),
        Expr::Op(Op::Tuple, vec![Expr::int(1), x()]),
    ];
    let mut ctxt = ctxt();
    for a in &exprs {
        assert!(ctxt.equals(a, a, &opts()), "{a} should equal itself");
        for b in &exprs {
            assert_eq!(ctxt.equals(a, b, &opts()), ctxt.equals(b, a, &opts()));
        }
    }
}

#[test]
fn pythagorean_identity_is_semantic_not_syntactic() {
    let lhs = Expr::add(vec![
        Expr::pow(Expr::call("sin", vec![x()]), Expr::int(2)),
        Expr::pow(Expr::call("cos", vec![x()]), Expr::int(2)),
    ]);
    let one = Expr::int(1);

    assert!(ctxt().equals(&lhs, &one, &opts()));
    assert!(!equals_via_syntax(&lhs, &one, &opts()));
}

#[test]
fn parity_power_depends_on_integer_assumption() {
    // (-1)^n * (-1)^n vs 1
    let pow = || Expr::pow(Expr::int(-1), Expr::sym("n"));
    let lhs = Expr::mul(vec![pow(), pow()]);
    let one = Expr::int(1);
    let n_in_z = Expr::Op(Op::In, vec![Expr::sym("n"), Expr::sym("Z")]);
    let x_positive = Expr::Op(Op::Gt, vec![x(), Expr::int(0)]);

    let mut ctxt = ctxt();
    assert!(!ctxt.equals(&lhs, &one, &opts()), "unrestricted n is complex");

    ctxt.assume(n_in_z.clone());
    assert!(ctxt.equals(&lhs, &one, &opts()), "n ∈ Z makes the product 1");

    ctxt.clear_assumptions();
    assert!(!ctxt.equals(&lhs, &one, &opts()), "clearing forgets the domain");

    ctxt.assume(Expr::Op(Op::In, vec![x(), Expr::sym("Z")]));
    assert!(!ctxt.equals(&lhs, &one, &opts()), "constraining x says nothing about n");

    ctxt.clear_assumptions();
    ctxt.assume(Expr::Op(Op::In, vec![Expr::sym("n"), Expr::sym("R")]));
    assert!(!ctxt.equals(&lhs, &one, &opts()), "real n is not enough");

    ctxt.clear_assumptions();
    ctxt.assume(Expr::Op(Op::And, vec![n_in_z.clone(), x_positive.clone()]));
    assert!(ctxt.equals(&lhs, &one, &opts()), "a conjunct constrains");

    ctxt.clear_assumptions();
    ctxt.assume(Expr::Op(Op::Or, vec![n_in_z, x_positive]));
    assert!(!ctxt.equals(&lhs, &one, &opts()), "a disjunct does not");
}

#[test]
fn tolerance_absorbs_tiny_absolute_error_only() {
    // e^(10x) vs e^(10x) + 1e-9 vs e^(10x) + 1
    let base = || Expr::pow(Expr::sym("e"), Expr::mul(vec![Expr::int(10), x()]));
    let nudged = Expr::add(vec![base(), Expr::float(1e-9)]);
    let shifted = Expr::add(vec![base(), Expr::int(1)]);

    let mut ctxt = ctxt();
    assert!(ctxt.equals(&base(), &nudged, &opts()));
    assert!(!ctxt.equals(&base(), &shifted, &opts()));
}

#[test]
fn free_additive_constant_is_not_ignored() {
    let with_c = Expr::add(vec![x(), Expr::sym("C")]);
    assert!(!ctxt().equals(&with_c, &x(), &opts()));
}

#[test]
fn antiderivative_pattern_matches_up_to_a_constant() {
    let pattern = Expr::add(vec![Expr::call("sin", vec![x()]), Expr::sym("c")]);
    let params = MatchParams::new().numeric_wildcard("c");

    let tree = Expr::add(vec![Expr::int(7), Expr::call("sin", vec![x()])]);
    let result = match_tree(&tree, &pattern, &params).unwrap();
    assert_eq!(result.get("c"), Some(&Expr::int(7)));

    let tree = Expr::add(vec![
        Expr::call("sin", vec![x()]),
        Expr::call("cos", vec![x()]),
    ]);
    assert!(match_tree(&tree, &pattern, &params).is_none());
}

#[test]
fn function_name_synonyms_collapse() {
    assert!(equals_via_syntax(
        &Expr::call("asin", vec![x()]),
        &Expr::call("arcsin", vec![x()]),
        &opts(),
    ));
    assert!(equals_via_syntax(
        &Expr::call("ln", vec![x()]),
        &Expr::call("log", vec![x()]),
        &opts(),
    ));
}

#[test]
fn powered_and_inverse_function_heads() {
    // sin^2(x) means sin(x)^2
    let powered_head = Expr::Apply(
        Box::new(Expr::pow(Expr::sym("sin"), Expr::int(2))),
        vec![x()],
    );
    let squared = Expr::pow(Expr::call("sin", vec![x()]), Expr::int(2));
    assert!(equals_via_syntax(&powered_head, &squared, &opts()));

    // cos^(-1)(x) means arccos(x)
    let inverse_head = Expr::Apply(
        Box::new(Expr::pow(Expr::sym("cos"), Expr::int(-1))),
        vec![x()],
    );
    let arccos = Expr::call("acos", vec![x()]);
    assert!(equals_via_syntax(&inverse_head, &arccos, &opts()));

    // f^2(x) stays ambiguous: not the same as f(x)^2
    let unknown_powered = Expr::Apply(
        Box::new(Expr::pow(Expr::sym("f"), Expr::int(2))),
        vec![x()],
    );
    let f_squared = Expr::pow(Expr::call("f", vec![x()]), Expr::int(2));
    assert!(!ctxt().equals(&unknown_powered, &f_squared, &opts()));
}

#[test]
fn derivative_tick_moves_onto_the_head() {
    // f(x)' and f'(x)
    let tick_outside = Expr::Op(Op::Prime, vec![Expr::call("f", vec![x()])]);
    let tick_on_head = Expr::Apply(
        Box::new(Expr::Op(Op::Prime, vec![Expr::sym("f")])),
        vec![x()],
    );
    assert!(equals_via_syntax(&tick_outside, &tick_on_head, &opts()));
    assert!(ctxt().equals(&tick_outside, &tick_on_head, &opts()));

    // but f' is not f
    let f_of_x = Expr::call("f", vec![x()]);
    assert!(!ctxt().equals(&tick_on_head, &f_of_x, &opts()));
}

#[test]
fn geometry_is_direction_insensitive() {
    let abc = Expr::Op(
        Op::Angle,
        vec![Expr::sym("A"), Expr::sym("B"), Expr::sym("C")],
    );
    let cba = Expr::Op(
        Op::Angle,
        vec![Expr::sym("C"), Expr::sym("B"), Expr::sym("A")],
    );
    let acb = Expr::Op(
        Op::Angle,
        vec![Expr::sym("A"), Expr::sym("C"), Expr::sym("B")],
    );
    assert!(equals_via_syntax(&abc, &cba, &opts()));
    assert!(ctxt().equals(&abc, &cba, &opts()));
    // a different vertex is a different angle
    assert!(!ctxt().equals(&abc, &acb, &opts()));

    let ab = Expr::Op(Op::LineSegment, vec![Expr::sym("A"), Expr::sym("B")]);
    let ba = Expr::Op(Op::LineSegment, vec![Expr::sym("B"), Expr::sym("A")]);
    assert!(equals_via_syntax(&ab, &ba, &opts()));
}

#[test]
fn container_coercions() {
    let pair = |op: Op| Expr::Op(op, vec![Expr::int(1), Expr::int(2)]);
    let open = Op::Interval {
        left_closed: false,
        right_closed: false,
    };
    let closed = Op::Interval {
        left_closed: true,
        right_closed: true,
    };

    let mut ctxt = ctxt();
    assert!(ctxt.equals(&pair(Op::Tuple), &pair(Op::Vector), &opts()));
    assert!(ctxt.equals(&pair(Op::Tuple), &pair(open), &opts()));
    assert!(ctxt.equals(&pair(Op::Array), &pair(closed), &opts()));
    assert!(ctxt.equals(&pair(Op::Vector), &pair(Op::AltVector), &opts()));

    // vectors never coerce to intervals, and the interval flags matter
    assert!(!ctxt.equals(&pair(Op::Vector), &pair(open), &opts()));
    assert!(!ctxt.equals(&pair(open), &pair(closed), &opts()));

    // element mismatch fails regardless of coercion
    let other = Expr::Op(Op::Vector, vec![Expr::int(1), Expr::int(3)]);
    assert!(!ctxt.equals(&pair(Op::Tuple), &other, &opts()));
}

#[test]
fn unions_compare_as_sets() {
    let seg = |a: i64, b: i64| {
        Expr::Op(
            Op::Interval {
                left_closed: true,
                right_closed: true,
            },
            vec![Expr::int(a), Expr::int(b)],
        )
    };
    let ab = Expr::Op(Op::Union, vec![seg(1, 2), seg(3, 4)]);
    let ba = Expr::Op(Op::Union, vec![seg(3, 4), seg(1, 2)]);
    let other = Expr::Op(Op::Union, vec![seg(1, 2), seg(3, 5)]);

    let mut ctxt = ctxt();
    assert!(ctxt.equals(&ab, &ba, &opts()));
    assert!(!ctxt.equals(&ab, &other, &opts()));
}

#[test]
fn relations_are_equivalent_up_to_scaling() {
    let eq = |l: Expr, r: Expr| Expr::Op(Op::Eq, vec![l, r]);
    let lt = |l: Expr, r: Expr| Expr::Op(Op::Lt, vec![l, r]);
    let y = Expr::sym("y");

    let mut ctxt = ctxt();
    // x = y vs 2x = 2y
    assert!(ctxt.equals(
        &eq(x(), y.clone()),
        &eq(
            Expr::mul(vec![Expr::int(2), x()]),
            Expr::mul(vec![Expr::int(2), y.clone()]),
        ),
        &opts(),
    ));
    // x = y vs x = 2y
    assert!(!ctxt.equals(
        &eq(x(), y.clone()),
        &eq(x(), Expr::mul(vec![Expr::int(2), y.clone()])),
        &opts(),
    ));
    // x < y vs y > x
    assert!(ctxt.equals(
        &lt(x(), y.clone()),
        &Expr::Op(Op::Gt, vec![y.clone(), x()]),
        &opts(),
    ));
    // x < y vs 2x < 2y, but not vs 2y < 2x: the flip needs a negative multiplier
    let double = |e: Expr| Expr::mul(vec![Expr::int(2), e]);
    assert!(ctxt.equals(
        &lt(x(), y.clone()),
        &lt(double(x()), double(y.clone())),
        &opts(),
    ));
    assert!(!ctxt.equals(
        &lt(x(), y.clone()),
        &lt(double(y.clone()), double(x())),
        &opts(),
    ));
}

#[test]
fn membership_reads_in_either_direction() {
    let elem = Expr::Op(Op::In, vec![x(), Expr::sym("S")]);
    let owns = Expr::Op(Op::Ni, vec![Expr::sym("S"), x()]);
    assert!(ctxt().equals(&elem, &owns, &opts()));
}

#[test]
fn blanks_block_equality_unless_allowed() {
    let with_blank = Expr::add(vec![x(), Expr::Blank]);
    let mut ctxt = ctxt();
    assert!(!ctxt.equals(&with_blank, &with_blank, &opts()));

    let allow = EqualityOptions {
        allow_blanks: true,
        ..Default::default()
    };
    assert!(ctxt.equals(&with_blank, &with_blank, &allow));
    // even with blanks allowed, the rest must still agree
    let different = Expr::add(vec![Expr::sym("y"), Expr::Blank]);
    assert!(!ctxt.equals(&with_blank, &different, &allow));
}

#[test]
fn allowed_blanks_sample_as_a_shared_variable() {
    // the blank takes one value per draw, so `x + _` and `_ + x` agree commutatively
    let a = Expr::add(vec![x(), Expr::Blank]);
    let b = Expr::add(vec![Expr::Blank, x()]);
    let allow = EqualityOptions {
        allow_blanks: true,
        ..Default::default()
    };
    let mut ctxt = ctxt();
    assert!(ctxt.equals(&a, &b, &allow));
    // but it is a value, not a wildcard: `x + _` is not `x + 2_`
    let doubled = Expr::add(vec![x(), Expr::mul(vec![Expr::int(2), Expr::Blank])]);
    assert!(!ctxt.equals(&a, &doubled, &allow));
}

#[test]
fn impossible_evaluation_is_inconclusive_not_equal() {
    let bad = Expr::div(Expr::int(1), Expr::int(0));
    let mut ctxt = ctxt();
    assert_eq!(ctxt.try_equals(&bad, &bad, &opts()), Err(Inconclusive));
    assert!(!ctxt.equals(&bad, &bad, &opts()));
}

#[test]
fn serialized_trees_survive_transport() {
    let expr = Expr::Op(
        Op::Eq,
        vec![
            Expr::add(vec![
                Expr::pow(Expr::call("sin", vec![x()]), Expr::int(2)),
                Expr::pow(Expr::call("cos", vec![x()]), Expr::int(2)),
            ]),
            Expr::int(1),
        ],
    );
    let text = encode::to_json(&expr).unwrap();
    let revived = encode::from_json(&text).unwrap();
    assert!(equals_via_syntax(&expr, &revived, &opts()));

    assert!(encode::from_json("{\"definitely\": \"not a tree\"}").is_err());
}
