//! Vector width and memory layout configuration.
//!
//! Everything here is resolved at build time. A [`Target`] fixes the register
//! width in bytes, a [`Layout`] fixes how record fields sit in memory, and the
//! pair determines both the element stride and the register type the engine
//! evaluates with.
//!
//! # Layouts
//!
//! | Layout | Memory order | Stride | Register |
//! |--------|--------------|--------|----------|
//! | [`Flat`] | `r0.f0 r0.f1 … r1.f0 r1.f1 …` | `1` | the element itself |
//! | [`Interleaved`] | `r0.f0 r1.f0 r2.f0 r3.f0 r0.f1 …` | `width / size_of::<T>()` | `<T as Lanes<W>>::Vector` |
//!
//! With `f64` on [`Sse`] the interleaved stride is `16 / 8 = 2`, so each
//! storage window holds two records and every field read is one `f64x2`.
//!
//! # Example
//!
//! ```
//! use fusekit::config::{stride, Avx, Flat, Interleaved, Layout, LayoutKind, Sse};
//!
//! assert_eq!(<Flat as Layout<f64, Sse>>::STRIDE, 1);
//! assert_eq!(<Interleaved as Layout<f32, Avx>>::STRIDE, 8);
//! assert_eq!(stride(LayoutKind::Interleaved, 16, 4), 4);
//! ```

mod block;
mod layout;
mod target;

pub use block::BlockConfig;
pub use layout::{Flat, Interleaved, Layout, LayoutKind, stride};
pub use target::{Avx, DefaultTarget, Sse, Target};
