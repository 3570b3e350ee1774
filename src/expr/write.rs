//! Scoped write-back guard.
//!
//! A [`WriteView`] owns one storage slot for the duration of a statement.
//! It starts out holding a load of the slot's current value, so
//! `m += x` builds `add(load(m), x)` and fusion sees the whole statement.
//! The held tree is evaluated and stored exactly once: by
//! [`commit`](WriteView::commit), by [`set`](WriteView::set), or when the
//! guard drops.
//!
//! ```text
//!   s.write(M)          m += dt * x            end of scope
//!   ┌──────────┐      ┌──────────────────┐     ┌─────────────┐
//!   │ load(m)  │ ───▶ │ add(load, mul..) │ ──▶ │ eval, store │
//!   │ Built    │      │ Built            │     │ Evaluated   │
//!   └──────────┘      └──────────────────┘     └─────────────┘
//! ```

use super::fusion::{fuse_add, fuse_div, fuse_mul, fuse_sub};
use super::node::Node;
use super::view::ReadView;
use crate::register::Register;
use std::cell::Cell;
use std::fmt;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Lifecycle of a [`WriteView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Holding an expression that has not been stored yet.
    Built,
    /// The slot has been written; the view is inert.
    Evaluated,
}

/// Write handle over one storage slot.
///
/// Dropping a view that is still [`ViewState::Built`] evaluates the held
/// expression and stores it, including during unwinding.
pub struct WriteView<'a, R: Register> {
    target: &'a [Cell<R::Elem>],
    held: Node<R>,
    state: ViewState,
}

impl<'a, R: Register> WriteView<'a, R> {
    /// Guard over `target`, holding the identity expression.
    ///
    /// # Panics
    /// If `target` is shorter than `R::LANES`.
    pub fn new(target: &'a [Cell<R::Elem>]) -> Self {
        let current = R::gather(|lane| target[lane].get());
        Self {
            target,
            held: Node::Load(current),
            state: ViewState::Built,
        }
    }

    pub fn held(&self) -> &Node<R> {
        &self.held
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Replace the held expression outright.
    pub fn assign(&mut self, rhs: ReadView<R>) {
        self.update(|_| rhs.into_node());
    }

    /// Write `value` into every lane of the slot immediately.
    ///
    /// No expression is evaluated and the view becomes
    /// [`ViewState::Evaluated`].
    pub fn set(&mut self, value: R::Elem) {
        debug_assert_eq!(self.state, ViewState::Built, "write-view already evaluated");
        if self.state == ViewState::Evaluated {
            return;
        }
        for cell in &self.target[..R::LANES] {
            cell.set(value);
        }
        self.held = Node::Scalar(R::splat(value));
        self.state = ViewState::Evaluated;
    }

    /// Evaluate and store now, returning the stored register.
    ///
    /// If the view was already evaluated by [`set`](Self::set), returns the
    /// value it wrote without storing again.
    pub fn commit(mut self) -> R {
        match self.state {
            ViewState::Built => self.flush(),
            ViewState::Evaluated => self.held.eval(),
        }
    }

    fn flush(&mut self) -> R {
        let value = self.held.eval();
        let target = self.target;
        value.scatter(|lane, v| target[lane].set(v));
        self.state = ViewState::Evaluated;
        value
    }

    fn update(&mut self, f: impl FnOnce(Node<R>) -> Node<R>) {
        debug_assert_eq!(self.state, ViewState::Built, "write-view already evaluated");
        if self.state == ViewState::Evaluated {
            return;
        }
        let held = std::mem::replace(&mut self.held, Node::Scalar(R::ones()));
        self.held = f(held);
    }
}

impl<R: Register> Drop for WriteView<'_, R> {
    fn drop(&mut self) {
        if self.state == ViewState::Built {
            self.flush();
        }
    }
}

impl<R: Register> fmt::Debug for WriteView<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteView")
            .field("lanes", &self.target.len())
            .field("held", &self.held)
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_write_assign {
    ($($trait:ident :: $method:ident => $fuse:ident),* $(,)?) => {$(
        impl<R: Register> $trait<ReadView<R>> for WriteView<'_, R> {
            #[inline]
            fn $method(&mut self, rhs: ReadView<R>) {
                self.update(|held| $fuse(held, rhs.into_node()));
            }
        }
    )*};
}

impl_write_assign!(
    AddAssign::add_assign => fuse_add,
    SubAssign::sub_assign => fuse_sub,
    MulAssign::mul_assign => fuse_mul,
    DivAssign::div_assign => fuse_div,
);

macro_rules! impl_write_assign_scalar {
    (@op $t:ty, $($trait:ident :: $method:ident => $fuse:ident),*) => {$(
        impl<R: Register<Elem = $t>> $trait<$t> for WriteView<'_, R> {
            #[inline]
            fn $method(&mut self, rhs: $t) {
                self.update(|held| $fuse(held, Node::Scalar(R::splat(rhs))));
            }
        }
    )*};
    ($($t:ty),* $(,)?) => {$(
        impl_write_assign_scalar!(@op $t,
            AddAssign::add_assign => fuse_add,
            SubAssign::sub_assign => fuse_sub,
            MulAssign::mul_assign => fuse_mul,
            DivAssign::div_assign => fuse_div
        );
    )*};
}

impl_write_assign_scalar!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::NodeKind;
    use wide::f64x2;

    fn cells<T: Copy>(v: &mut [T]) -> &[Cell<T>] {
        Cell::from_mut(v).as_slice_of_cells()
    }

    #[test]
    fn test_drop_stores_held_expression() {
        let mut data = [3.0_f64];
        {
            let mut w = WriteView::<f64>::new(cells(&mut data));
            assert_eq!(w.state(), ViewState::Built);
            w += ReadView::<f64>::leaf(2.0) * ReadView::leaf(5.0);
            assert_eq!(w.held().kind(), NodeKind::Add);
        }
        assert_eq!(data, [13.0]);
    }

    #[test]
    fn test_untouched_view_writes_back_identity() {
        let mut data = [1.5_f64, 2.5];
        drop(WriteView::<f64x2>::new(cells(&mut data)));
        assert_eq!(data, [1.5, 2.5]);
    }

    #[test]
    fn test_assign_replaces_expression() {
        let mut data = [7.0_f64];
        let slot = cells(&mut data);
        let x = ReadView::<f64>::leaf(slot[0].get());
        WriteView::new(slot).assign(x * 2.0 - 1.0);
        assert_eq!(data, [13.0]);
    }

    #[test]
    fn test_commit_returns_stored_value() {
        let mut data = [1.0_f64, 2.0];
        let mut w = WriteView::<f64x2>::new(cells(&mut data));
        w *= 3.0;
        w -= 0.5;
        assert_eq!(w.held().kind(), NodeKind::MulSub);
        let stored = w.commit();
        assert_eq!(stored.to_array(), [2.5, 5.5]);
        assert_eq!(data, [2.5, 5.5]);
    }

    #[test]
    fn test_set_writes_every_lane() {
        let mut data = [0.0_f64, 0.0];
        let mut w = WriteView::<f64x2>::new(cells(&mut data));
        w.set(4.0);
        assert_eq!(w.state(), ViewState::Evaluated);
        assert_eq!(w.commit().to_array(), [4.0, 4.0]);
        assert_eq!(data, [4.0, 4.0]);
    }

    #[test]
    fn test_compound_scalar_ops_fold_left() {
        let mut data = [10.0_f32];
        {
            let mut w = WriteView::<f32>::new(cells(&mut data));
            w /= 4.0;
            w += 1.0;
        }
        assert_eq!(data, [3.5]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "already evaluated")]
    fn test_compound_after_set_asserts() {
        let mut data = [0.0_f64];
        let mut w = WriteView::<f64>::new(cells(&mut data));
        w.set(1.0);
        w += 1.0;
    }
}
