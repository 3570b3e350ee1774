use super::builder;
use super::node::{Node, NodeKind};
use crate::register::Register;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Read-only handle on an expression tree.
///
/// A read-view always holds a complete expression. Combinators consume the
/// view and return a new one wrapping a larger tree; the original is never
/// mutated. Evaluation happens only through [`ReadView::evaluate`] or when a
/// [`WriteView`](super::WriteView) consumes the view.
#[derive(Debug, Clone)]
pub struct ReadView<R: Register> {
    node: Node<R>,
}

impl<R: Register> ReadView<R> {
    /// Memory leaf holding an already-loaded register.
    pub fn leaf(value: R) -> Self {
        Self {
            node: Node::Load(value),
        }
    }

    /// Scalar leaf, broadcast to every lane.
    pub fn scalar(value: R::Elem) -> Self {
        Self {
            node: Node::Scalar(R::splat(value)),
        }
    }

    /// Root of the tree, after fusion.
    pub fn node(&self) -> &Node<R> {
        &self.node
    }

    /// Take the tree out of the view.
    pub fn into_node(self) -> Node<R> {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Run the tree. Repeated calls return identical registers.
    pub fn evaluate(&self) -> R {
        self.node.eval()
    }

    #[must_use]
    pub fn sqrt(self) -> Self {
        builder::sqrt(self)
    }

    #[must_use]
    pub fn exp(self) -> Self {
        builder::exp(self)
    }

    /// Natural logarithm.
    #[must_use]
    pub fn log(self) -> Self {
        builder::log(self)
    }

    /// Integer power with a compile-time exponent.
    #[must_use]
    pub fn pow<const N: u32>(self) -> Self {
        builder::powi(self, N)
    }
}

impl<R: Register> From<Node<R>> for ReadView<R> {
    fn from(node: Node<R>) -> Self {
        Self { node }
    }
}

impl<R: Register> From<ReadView<R>> for Node<R> {
    fn from(view: ReadView<R>) -> Self {
        view.node
    }
}

impl<R: Register> fmt::Display for ReadView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

macro_rules! impl_view_binop {
    ($($trait:ident :: $method:ident),* $(,)?) => {$(
        impl<R: Register> $trait for ReadView<R> {
            type Output = ReadView<R>;

            #[inline]
            fn $method(self, rhs: ReadView<R>) -> ReadView<R> {
                builder::$method(self, rhs)
            }
        }
    )*};
}

impl_view_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl<R: Register> Neg for ReadView<R> {
    type Output = ReadView<R>;

    #[inline]
    fn neg(self) -> ReadView<R> {
        builder::neg(self)
    }
}

// Mixed scalar operands: `view * 0.5`, `1.0 - view`.
macro_rules! impl_view_scalar_ops {
    (@op $t:ty, $($trait:ident :: $method:ident),*) => {$(
        impl<R: Register<Elem = $t>> $trait<$t> for ReadView<R> {
            type Output = ReadView<R>;

            #[inline]
            fn $method(self, rhs: $t) -> ReadView<R> {
                builder::$method(self, ReadView::scalar(rhs))
            }
        }

        impl<R: Register<Elem = $t>> $trait<ReadView<R>> for $t {
            type Output = ReadView<R>;

            #[inline]
            fn $method(self, rhs: ReadView<R>) -> ReadView<R> {
                builder::$method(ReadView::scalar(self), rhs)
            }
        }
    )*};
    ($($t:ty),* $(,)?) => {$(
        impl_view_scalar_ops!(@op $t, Add::add, Sub::sub, Mul::mul, Div::div);
    )*};
}

impl_view_scalar_ops!(f32, f64);
