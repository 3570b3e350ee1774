//! One-lane registers: the element types themselves.

use super::{Element, Register};
use num_traits::Float;

macro_rules! impl_scalar_register {
    ($($t:ty),* $(,)?) => {$(
        impl Register for $t {
            type Elem = $t;
            const LANES: usize = 1;

            #[inline]
            fn splat(value: $t) -> Self {
                value
            }

            #[inline]
            fn ones() -> Self {
                1.0
            }

            #[inline]
            fn gather<F: FnMut(usize) -> $t>(mut f: F) -> Self {
                f(0)
            }

            #[inline]
            fn scatter<F: FnMut(usize, $t)>(self, mut f: F) {
                f(0, self);
            }

            #[inline]
            fn extract(self, lane: usize) -> $t {
                assert!(lane == 0, "lane {lane} out of range for a one-lane register");
                self
            }

            #[inline]
            fn sqrt(self) -> Self {
                Float::sqrt(self)
            }

            #[inline]
            fn exp(self) -> Self {
                Float::exp(self)
            }

            #[inline]
            fn ln(self) -> Self {
                Float::ln(self)
            }

            #[inline]
            fn mul_add(self, b: Self, c: Self) -> Self {
                Float::mul_add(self, b, c)
            }

            // Negating the addend is exact, so this rounds once like a native fms.
            #[inline]
            fn mul_sub(self, b: Self, c: Self) -> Self {
                Float::mul_add(self, b, -c)
            }

            #[inline]
            fn neg_mul_add(self, b: Self, c: Self) -> Self {
                Float::mul_add(-self, b, c)
            }
        }

        impl Element for $t {}
    )*};
}

impl_scalar_register!(f32, f64);
