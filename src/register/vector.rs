//! `wide` vector registers and their binding to targets.

use super::{Lanes, Register};
use crate::config::{Avx, Sse};
use wide::{f32x4, f32x8, f64x2, f64x4};

macro_rules! impl_wide_register {
    ($($v:ty => $e:ty, $n:literal);* $(;)?) => {$(
        impl Register for $v {
            type Elem = $e;
            const LANES: usize = $n;

            #[inline]
            fn splat(value: $e) -> Self {
                <$v>::splat(value)
            }

            #[inline]
            fn ones() -> Self {
                <$v>::splat(1.0)
            }

            #[inline]
            fn gather<F: FnMut(usize) -> $e>(f: F) -> Self {
                <$v>::new(std::array::from_fn::<$e, $n, F>(f))
            }

            #[inline]
            fn scatter<F: FnMut(usize, $e)>(self, mut f: F) {
                for (lane, value) in self.to_array().into_iter().enumerate() {
                    f(lane, value);
                }
            }

            #[inline]
            fn extract(self, lane: usize) -> $e {
                self.to_array()[lane]
            }

            #[inline]
            fn load(src: &[$e]) -> Self {
                let mut lanes = [0.0; $n];
                lanes.copy_from_slice(&src[..$n]);
                <$v>::new(lanes)
            }

            #[inline]
            fn store(self, dst: &mut [$e]) {
                dst[..$n].copy_from_slice(&self.to_array());
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$v>::sqrt(self)
            }

            #[inline]
            fn exp(self) -> Self {
                <$v>::exp(self)
            }

            #[inline]
            fn ln(self) -> Self {
                <$v>::ln(self)
            }

            #[inline]
            fn mul_add(self, b: Self, c: Self) -> Self {
                <$v>::mul_add(self, b, c)
            }

            #[inline]
            fn mul_sub(self, b: Self, c: Self) -> Self {
                <$v>::mul_sub(self, b, c)
            }

            #[inline]
            fn neg_mul_add(self, b: Self, c: Self) -> Self {
                <$v>::mul_neg_add(self, b, c)
            }
        }
    )*};
}

impl_wide_register! {
    f32x4 => f32, 4;
    f64x2 => f64, 2;
    f32x8 => f32, 8;
    f64x4 => f64, 4;
}

impl Lanes<Sse> for f32 {
    type Vector = f32x4;
}

impl Lanes<Sse> for f64 {
    type Vector = f64x2;
}

impl Lanes<Avx> for f32 {
    type Vector = f32x8;
}

impl Lanes<Avx> for f64 {
    type Vector = f64x4;
}
