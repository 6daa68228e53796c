use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// The traversal keeps its own work stack, so deeply nested input cannot exhaust the native call
/// stack. This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    pub(super) fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Pushes the children in reverse so the leftmost child is visited first. Returns true if
    /// the children are exhausted and the node itself should be visited.
    fn descend(&mut self, head: Option<&'a Expr>, children: &'a [Expr]) -> bool {
        let last = children.last().or(head);
        match last {
            Some(last) if !self.is_last_visited(last) => {
                for child in children.iter().rev() {
                    self.stack.push(child);
                }
                if let Some(head) = head {
                    self.stack.push(head);
                }
                false
            }
            // childless interior node, or all children already visited
            _ => true,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = self.stack.last()?;
            match expr {
                Expr::Number(_) | Expr::Symbol(_) | Expr::Blank => return self.visit(),
                Expr::Apply(head, args) => {
                    if self.descend(Some(head), args) {
                        return self.visit();
                    }
                }
                Expr::Op(_, children) => {
                    if self.descend(None, children) {
                        return self.visit();
                    }
                }
            }
        }
    }
}
