//! Named combinators over read-views.
//!
//! These are the functions the operator overloads on [`ReadView`] delegate
//! to. Each consumes its inputs and returns a new view wrapping a larger
//! tree; nothing is evaluated.
//!
//! ```
//! use fusekit::{add, exp, mul, NodeKind, ReadView};
//!
//! let a = ReadView::<f64>::leaf(2.0);
//! let b = ReadView::leaf(3.0);
//! let c = ReadView::leaf(4.0);
//!
//! let e = add(mul(a, b), exp(c));
//! assert_eq!(e.kind(), NodeKind::MulAdd);
//! assert!((e.evaluate() - (6.0 + 4.0_f64.exp())).abs() < 1e-12);
//! ```

use super::fusion::{fuse_add, fuse_div, fuse_mul, fuse_neg, fuse_sub};
use super::node::Node;
use super::view::ReadView;
use crate::register::Register;

pub fn add<R: Register>(lhs: ReadView<R>, rhs: ReadView<R>) -> ReadView<R> {
    fuse_add(lhs.into_node(), rhs.into_node()).into()
}

pub fn sub<R: Register>(lhs: ReadView<R>, rhs: ReadView<R>) -> ReadView<R> {
    fuse_sub(lhs.into_node(), rhs.into_node()).into()
}

pub fn mul<R: Register>(lhs: ReadView<R>, rhs: ReadView<R>) -> ReadView<R> {
    fuse_mul(lhs.into_node(), rhs.into_node()).into()
}

pub fn div<R: Register>(lhs: ReadView<R>, rhs: ReadView<R>) -> ReadView<R> {
    fuse_div(lhs.into_node(), rhs.into_node()).into()
}

pub fn neg<R: Register>(x: ReadView<R>) -> ReadView<R> {
    fuse_neg(x.into_node()).into()
}

pub fn sqrt<R: Register>(x: ReadView<R>) -> ReadView<R> {
    Node::Sqrt(Box::new(x.into_node())).into()
}

pub fn exp<R: Register>(x: ReadView<R>) -> ReadView<R> {
    Node::Exp(Box::new(x.into_node())).into()
}

/// Natural logarithm.
pub fn log<R: Register>(x: ReadView<R>) -> ReadView<R> {
    Node::Log(Box::new(x.into_node())).into()
}

/// Runtime-exponent variant of [`ReadView::pow`]: `x` to the integer power
/// `n`, evaluated by repeated multiplication.
///
/// The const-generic [`ReadView::pow`] and [`ipow`](super::ipow) are the
/// primary entry points. Use this one only when `n` is not known at
/// compile time.
pub fn powi<R: Register>(x: ReadView<R>, n: u32) -> ReadView<R> {
    Node::Pow(Box::new(x.into_node()), n).into()
}
