//! Vector register interface consumed by the expression engine.
//!
//! The engine never touches hardware intrinsics directly. Everything it
//! needs from a register is captured by [`Register`]:
//!
//! | Concern | Methods |
//! |---------|---------|
//! | Construction | [`splat`](Register::splat), [`ones`](Register::ones), [`gather`](Register::gather) |
//! | Write-back | [`scatter`](Register::scatter) |
//! | Arithmetic | `+ - * /`, unary `-` (via `std::ops`) |
//! | Transcendentals | [`sqrt`](Register::sqrt), [`exp`](Register::exp), [`ln`](Register::ln) |
//! | Fused | [`mul_add`](Register::mul_add), [`mul_sub`](Register::mul_sub), [`neg_mul_add`](Register::neg_mul_add) |
//!
//! Two families of registers ship with the crate:
//!
//! - `f32` / `f64` themselves, one lane wide. The flat layout evaluates
//!   record by record through these.
//! - `wide::{f32x4, f64x2, f32x8, f64x4}`, bound to a [`Target`] through
//!   [`Lanes`]. The interleaved layout evaluates one batch per register.
//!
//! Storage windows are slices of `Cell`, so the engine moves lanes in and
//! out through `gather`/`scatter`. [`load`](Register::load) and
//! [`store`](Register::store) are conveniences for plain slices and are
//! not called by the engine.
//!
//! An element type with no [`Lanes`] impl for a target simply cannot be
//! used with the interleaved layout on that target; the mismatch is a
//! compile error, never a runtime check.
//!
//! [`Target`]: crate::config::Target

mod scalar;
mod vector;

use crate::config::Target;
use num_traits::Float;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A fixed-width group of lanes with value semantics.
pub trait Register:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Scalar type held in each lane
    type Elem: Copy + Debug + Send + Sync + 'static;

    /// Number of lanes
    const LANES: usize;

    /// Broadcast a scalar into every lane.
    fn splat(value: Self::Elem) -> Self;

    /// Multiplicative identity in every lane.
    fn ones() -> Self;

    /// Build a register lane by lane, calling `f(lane)` for `lane` in `0..LANES`.
    fn gather<F: FnMut(usize) -> Self::Elem>(f: F) -> Self;

    /// Hand each lane to `f(lane, value)`, in lane order.
    fn scatter<F: FnMut(usize, Self::Elem)>(self, f: F);

    /// Read one lane.
    ///
    /// # Panics
    /// If `lane >= LANES`.
    fn extract(self, lane: usize) -> Self::Elem;

    /// Load `LANES` contiguous elements from the front of `src`.
    ///
    /// # Panics
    /// If `src` is shorter than `LANES`.
    #[inline]
    fn load(src: &[Self::Elem]) -> Self {
        Self::gather(|i| src[i])
    }

    /// Store all lanes into the front of `dst`.
    ///
    /// # Panics
    /// If `dst` is shorter than `LANES`.
    #[inline]
    fn store(self, dst: &mut [Self::Elem]) {
        self.scatter(|i, v| dst[i] = v);
    }

    fn sqrt(self) -> Self;

    fn exp(self) -> Self;

    /// Natural logarithm
    fn ln(self) -> Self;

    /// `self * b + c`, fused into a single rounding where the target supports it.
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// `self * b - c`, fused into a single rounding where the target supports it.
    fn mul_sub(self, b: Self, c: Self) -> Self;

    /// `c - self * b`, fused into a single rounding where the target supports it.
    fn neg_mul_add(self, b: Self, c: Self) -> Self;
}

/// Scalar element types a storage block can hold.
///
/// Every element is also its own one-lane [`Register`], which is what the
/// flat layout evaluates with.
pub trait Element: Register<Elem = Self> + Float + Default + Display {}

/// Binds an element type to the vector register that fills a target's width.
///
/// Implemented for `f32` and `f64` on [`Sse`](crate::config::Sse) and
/// [`Avx`](crate::config::Avx).
pub trait Lanes<W: Target>: Element {
    type Vector: Register<Elem = Self>;
}
