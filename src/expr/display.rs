// Display formatting for expression trees
use super::node::Node;
use crate::register::Register;
use std::fmt;

/// Renders the tree shape: leaves print as `load` or `const`, every other
/// node as its kind name applied to its operands.
impl<R: Register> fmt::Display for Node<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.kind().name());
        }
        write!(f, "{}(", self.kind().name())?;
        for (i, child) in self.children().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        if let Node::Pow(_, n) = self {
            write!(f, ", {n}")?;
        }
        write!(f, ")")
    }
}
