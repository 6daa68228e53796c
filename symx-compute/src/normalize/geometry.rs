use std::cmp::Ordering;
use symx_tree::{Expr, Op};

/// Orients geometric objects that are insensitive to traversal direction.
///
/// The angle `ABC` and the angle `CBA` name the same angle, and a segment has no direction, so
/// their operands are put in structural order: an angle whose last point sorts before its first
/// is reversed, and segment endpoints are sorted.
pub fn normalize_geometry_arg_order(expr: &Expr) -> Expr {
    expr.map_bottom_up(&|node| match node {
        Expr::Op(Op::Angle, mut points) if points.len() == 3 => {
            if points[2].cmp_structural(&points[0]) == Ordering::Less {
                points.reverse();
            }
            Expr::Op(Op::Angle, points)
        }
        Expr::Op(Op::LineSegment, mut endpoints) if endpoints.len() == 2 => {
            if endpoints[1].cmp_structural(&endpoints[0]) == Ordering::Less {
                endpoints.swap(0, 1);
            }
            Expr::Op(Op::LineSegment, endpoints)
        }
        other => other,
    })
}
