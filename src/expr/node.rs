//! Operation-node catalog.

use super::pow::pow_n;
use crate::register::Register;

/// One node of a statement's expression tree.
///
/// Leaves hold their register by value; every other node owns its
/// sub-trees. Building a node computes nothing, and [`Node::eval`] is pure:
/// calling it twice returns bit-identical registers.
///
/// Fused variants are produced by the combinators in
/// [`fusion`](super::fusion). Their operands are stored factors first,
/// then the addend, and evaluated in that stored order. For `c - a * b`
/// that means `c` is evaluated last even though it was written first.
#[derive(Debug, Clone)]
pub enum Node<R: Register> {
    /// Broadcast constant
    Scalar(R),
    /// Value read from a storage slot
    Load(R),

    Sqrt(Box<Node<R>>),
    Exp(Box<Node<R>>),
    /// Natural logarithm
    Log(Box<Node<R>>),
    Neg(Box<Node<R>>),
    /// Integer power by repeated multiplication
    Pow(Box<Node<R>>, u32),

    Add(Box<Node<R>>, Box<Node<R>>),
    Sub(Box<Node<R>>, Box<Node<R>>),
    Mul(Box<Node<R>>, Box<Node<R>>),
    Div(Box<Node<R>>, Box<Node<R>>),

    /// `a * b + c`
    MulAdd(Box<Node<R>>, Box<Node<R>>, Box<Node<R>>),
    /// `a * b - c`
    MulSub(Box<Node<R>>, Box<Node<R>>, Box<Node<R>>),
    /// `c - a * b`
    NegMulAdd(Box<Node<R>>, Box<Node<R>>, Box<Node<R>>),
    /// `a * b + c * d`
    MulAddMul(Box<Node<R>>, Box<Node<R>>, Box<Node<R>>, Box<Node<R>>),
    /// `a * b - c * d`
    MulSubMul(Box<Node<R>>, Box<Node<R>>, Box<Node<R>>, Box<Node<R>>),
}

/// Discriminant of a [`Node`], without its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Load,
    Sqrt,
    Exp,
    Log,
    Neg,
    Pow,
    Add,
    Sub,
    Mul,
    Div,
    MulAdd,
    MulSub,
    NegMulAdd,
    MulAddMul,
    MulSubMul,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Scalar => "const",
            NodeKind::Load => "load",
            NodeKind::Sqrt => "sqrt",
            NodeKind::Exp => "exp",
            NodeKind::Log => "log",
            NodeKind::Neg => "neg",
            NodeKind::Pow => "pow",
            NodeKind::Add => "add",
            NodeKind::Sub => "sub",
            NodeKind::Mul => "mul",
            NodeKind::Div => "div",
            NodeKind::MulAdd => "mul_add",
            NodeKind::MulSub => "mul_sub",
            NodeKind::NegMulAdd => "neg_mul_add",
            NodeKind::MulAddMul => "mul_add_mul",
            NodeKind::MulSubMul => "mul_sub_mul",
        }
    }

    /// True for the nodes the fusion rules produce.
    pub fn is_fused(self) -> bool {
        matches!(
            self,
            NodeKind::MulAdd
                | NodeKind::MulSub
                | NodeKind::NegMulAdd
                | NodeKind::MulAddMul
                | NodeKind::MulSubMul
        )
    }
}

impl<R: Register> Node<R> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Load(_) => NodeKind::Load,
            Node::Sqrt(_) => NodeKind::Sqrt,
            Node::Exp(_) => NodeKind::Exp,
            Node::Log(_) => NodeKind::Log,
            Node::Neg(_) => NodeKind::Neg,
            Node::Pow(..) => NodeKind::Pow,
            Node::Add(..) => NodeKind::Add,
            Node::Sub(..) => NodeKind::Sub,
            Node::Mul(..) => NodeKind::Mul,
            Node::Div(..) => NodeKind::Div,
            Node::MulAdd(..) => NodeKind::MulAdd,
            Node::MulSub(..) => NodeKind::MulSub,
            Node::NegMulAdd(..) => NodeKind::NegMulAdd,
            Node::MulAddMul(..) => NodeKind::MulAddMul,
            Node::MulSubMul(..) => NodeKind::MulSubMul,
        }
    }

    /// Evaluate the tree bottom-up into one register.
    ///
    /// Operands are evaluated left to right and completely before the
    /// combining primitive runs.
    pub fn eval(&self) -> R {
        match self {
            Node::Scalar(v) | Node::Load(v) => *v,

            Node::Sqrt(a) => a.eval().sqrt(),
            Node::Exp(a) => a.eval().exp(),
            Node::Log(a) => a.eval().ln(),
            Node::Neg(a) => -a.eval(),
            Node::Pow(a, n) => pow_n(a.eval(), *n),

            Node::Add(a, b) => {
                let (a, b) = (a.eval(), b.eval());
                a + b
            }
            Node::Sub(a, b) => {
                let (a, b) = (a.eval(), b.eval());
                a - b
            }
            Node::Mul(a, b) => {
                let (a, b) = (a.eval(), b.eval());
                a * b
            }
            Node::Div(a, b) => {
                let (a, b) = (a.eval(), b.eval());
                a / b
            }

            Node::MulAdd(a, b, c) => {
                let (a, b, c) = (a.eval(), b.eval(), c.eval());
                a.mul_add(b, c)
            }
            Node::MulSub(a, b, c) => {
                let (a, b, c) = (a.eval(), b.eval(), c.eval());
                a.mul_sub(b, c)
            }
            Node::NegMulAdd(a, b, c) => {
                let (a, b, c) = (a.eval(), b.eval(), c.eval());
                a.neg_mul_add(b, c)
            }
            Node::MulAddMul(a, b, c, d) => {
                let (a, b, c, d) = (a.eval(), b.eval(), c.eval(), d.eval());
                mul_add_mul(a, b, c, d)
            }
            Node::MulSubMul(a, b, c, d) => {
                let (a, b, c, d) = (a.eval(), b.eval(), c.eval(), d.eval());
                mul_sub_mul(a, b, c, d)
            }
        }
    }

    /// Leaf registers in left-to-right operand order.
    pub fn leaves(&self) -> Vec<R> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<R>) {
        match self {
            Node::Scalar(v) | Node::Load(v) => out.push(*v),
            _ => {
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Direct operands in evaluation order.
    pub fn children(&self) -> Vec<&Node<R>> {
        match self {
            Node::Scalar(_) | Node::Load(_) => Vec::new(),
            Node::Sqrt(a) | Node::Exp(a) | Node::Log(a) | Node::Neg(a) | Node::Pow(a, _) => {
                vec![a.as_ref()]
            }
            Node::Add(a, b) | Node::Sub(a, b) | Node::Mul(a, b) | Node::Div(a, b) => {
                vec![a.as_ref(), b.as_ref()]
            }
            Node::MulAdd(a, b, c) | Node::MulSub(a, b, c) | Node::NegMulAdd(a, b, c) => {
                vec![a.as_ref(), b.as_ref(), c.as_ref()]
            }
            Node::MulAddMul(a, b, c, d) | Node::MulSubMul(a, b, c, d) => {
                vec![a.as_ref(), b.as_ref(), c.as_ref(), d.as_ref()]
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        1 + self.children().into_iter().map(Node::len).sum::<usize>()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Scalar(_) | Node::Load(_))
    }
}

// Two independent products, then one add. `chained-fma` folds the first
// product into a fused op instead.
#[cfg(not(feature = "chained-fma"))]
#[inline]
fn mul_add_mul<R: Register>(a: R, b: R, c: R, d: R) -> R {
    let ab = a * b;
    let cd = c * d;
    ab + cd
}

#[cfg(feature = "chained-fma")]
#[inline]
fn mul_add_mul<R: Register>(a: R, b: R, c: R, d: R) -> R {
    a.mul_add(b, c * d)
}

#[cfg(not(feature = "chained-fma"))]
#[inline]
fn mul_sub_mul<R: Register>(a: R, b: R, c: R, d: R) -> R {
    let ab = a * b;
    let cd = c * d;
    ab - cd
}

#[cfg(feature = "chained-fma")]
#[inline]
fn mul_sub_mul<R: Register>(a: R, b: R, c: R, d: R) -> R {
    a.mul_sub(b, c * d)
}
