//! Fusion rules applied when combinators build nodes.
//!
//! Rewrites happen at the moment an add or subtract is built, by looking at
//! whether an operand is itself a multiply node. The multiply's operands are
//! moved into the fused node unevaluated, so the intermediate product never
//! exists.
//!
//! | Written | Built |
//! |---------|-------|
//! | `(a*b) + (c*d)` | [`Node::MulAddMul`] |
//! | `(a*b) + c` | [`Node::MulAdd`] |
//! | `(a*b) - (c*d)` | [`Node::MulSubMul`] |
//! | `(a*b) - c` | [`Node::MulSub`] |
//! | `c - (a*b)` | [`Node::NegMulAdd`] |
//! | `-(-x)` | `x` |
//!
//! Nothing else is rewritten. In particular `c + (a*b)` stays a plain add,
//! and no rule looks across statements: each combinator call sees only its
//! own two operands.

use super::node::Node;
use crate::register::Register;

/// `lhs + rhs`, fusing a multiply on the left.
pub fn fuse_add<R: Register>(lhs: Node<R>, rhs: Node<R>) -> Node<R> {
    match (lhs, rhs) {
        (Node::Mul(a, b), Node::Mul(c, d)) => {
            tracing::trace!(rule = "mul_add_mul", "fused add of two products");
            Node::MulAddMul(a, b, c, d)
        }
        (Node::Mul(a, b), c) => {
            tracing::trace!(rule = "mul_add", "fused add of product");
            Node::MulAdd(a, b, Box::new(c))
        }
        (lhs, rhs) => Node::Add(Box::new(lhs), Box::new(rhs)),
    }
}

/// `lhs - rhs`, fusing a multiply on either side.
pub fn fuse_sub<R: Register>(lhs: Node<R>, rhs: Node<R>) -> Node<R> {
    match (lhs, rhs) {
        (Node::Mul(a, b), Node::Mul(c, d)) => {
            tracing::trace!(rule = "mul_sub_mul", "fused difference of two products");
            Node::MulSubMul(a, b, c, d)
        }
        (Node::Mul(a, b), c) => {
            tracing::trace!(rule = "mul_sub", "fused product minus term");
            Node::MulSub(a, b, Box::new(c))
        }
        (c, Node::Mul(a, b)) => {
            tracing::trace!(rule = "neg_mul_add", "fused term minus product");
            Node::NegMulAdd(a, b, Box::new(c))
        }
        (lhs, rhs) => Node::Sub(Box::new(lhs), Box::new(rhs)),
    }
}

pub fn fuse_mul<R: Register>(lhs: Node<R>, rhs: Node<R>) -> Node<R> {
    Node::Mul(Box::new(lhs), Box::new(rhs))
}

pub fn fuse_div<R: Register>(lhs: Node<R>, rhs: Node<R>) -> Node<R> {
    Node::Div(Box::new(lhs), Box::new(rhs))
}

/// `-x`, cancelling a double negation.
pub fn fuse_neg<R: Register>(operand: Node<R>) -> Node<R> {
    match operand {
        Node::Neg(inner) => {
            tracing::trace!(rule = "neg_neg", "cancelled double negation");
            *inner
        }
        other => Node::Neg(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::NodeKind;

    fn ld(v: f64) -> Node<f64> {
        Node::Load(v)
    }

    fn prod(a: f64, b: f64) -> Node<f64> {
        fuse_mul(ld(a), ld(b))
    }

    #[test]
    fn test_add_rules() {
        assert_eq!(fuse_add(prod(2.0, 3.0), ld(4.0)).kind(), NodeKind::MulAdd);
        assert_eq!(
            fuse_add(prod(2.0, 3.0), prod(4.0, 5.0)).kind(),
            NodeKind::MulAddMul
        );
        assert_eq!(fuse_add(ld(4.0), prod(2.0, 3.0)).kind(), NodeKind::Add);
        assert_eq!(fuse_add(ld(1.0), ld(2.0)).kind(), NodeKind::Add);
    }

    #[test]
    fn test_sub_rules() {
        assert_eq!(fuse_sub(prod(2.0, 3.0), ld(4.0)).kind(), NodeKind::MulSub);
        assert_eq!(fuse_sub(ld(4.0), prod(2.0, 3.0)).kind(), NodeKind::NegMulAdd);
        assert_eq!(
            fuse_sub(prod(2.0, 3.0), prod(4.0, 5.0)).kind(),
            NodeKind::MulSubMul
        );
        assert_eq!(fuse_sub(ld(1.0), ld(2.0)).kind(), NodeKind::Sub);
    }

    #[test]
    fn test_fused_values() {
        assert_eq!(fuse_add(prod(2.0, 3.0), ld(4.0)).eval(), 10.0);
        assert_eq!(fuse_sub(prod(2.0, 3.0), ld(4.0)).eval(), 2.0);
        assert_eq!(fuse_sub(ld(4.0), prod(2.0, 3.0)).eval(), -2.0);
        assert_eq!(fuse_add(prod(2.0, 3.0), prod(4.0, 5.0)).eval(), 26.0);
        assert_eq!(fuse_sub(prod(2.0, 3.0), prod(4.0, 5.0)).eval(), -14.0);
    }

    #[test]
    fn test_operand_order_preserved() {
        let n = fuse_sub(ld(9.0), prod(2.0, 3.0));
        assert_eq!(n.leaves(), vec![2.0, 3.0, 9.0]);

        let n = fuse_add(prod(1.0, 2.0), prod(3.0, 4.0));
        assert_eq!(n.leaves(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_double_negation_cancels() {
        let n = fuse_neg(fuse_neg(ld(5.0)));
        assert_eq!(n.kind(), NodeKind::Load);
        assert_eq!(n.eval(), 5.0);

        let n = fuse_neg(fuse_neg(fuse_neg(ld(5.0))));
        assert_eq!(n.kind(), NodeKind::Neg);
        assert_eq!(n.eval(), -5.0);
    }

    #[test]
    fn test_nested_fusion_inside_operands() {
        // (a*b + c) * d - e  ->  mul_sub(mul_add(a, b, c), d, e)
        let inner = fuse_add(prod(1.0, 2.0), ld(3.0));
        let n = fuse_sub(fuse_mul(inner, ld(4.0)), ld(5.0));
        assert_eq!(n.kind(), NodeKind::MulSub);
        assert_eq!(n.children()[0].kind(), NodeKind::MulAdd);
        assert_eq!(n.eval(), 15.0);
    }
}
