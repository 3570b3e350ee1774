//! Fused SIMD expression kernels over record storage
//!
//! Kernels are written as ordinary arithmetic on record fields. Each
//! statement builds an expression tree, fuses multiply/add patterns while
//! the tree is built, and evaluates once into a vector register when the
//! write-view it is assigned to goes out of scope.
//!
//! # Features
//! - **Two layouts**: [`Flat`](config::Flat) (one record per window) and
//!   [`Interleaved`](config::Interleaved) (one batch of records per window,
//!   one register per field)
//! - **Fusion at build time**: `a*b + c`, `a*b - c`, `c - a*b`,
//!   `a*b + c*d`, `a*b - c*d`
//! - **Width selected by type**: [`Sse`](config::Sse) or
//!   [`Avx`](config::Avx); unsupported element/width pairs do not compile
//! - **Block container** with optional rayon iteration (`parallel` feature)
//!
//! # Usage
//!
//! ```
//! use fusekit::config::{Interleaved, Sse};
//! use fusekit::storage::Block;
//!
//! const M: usize = 0;
//! const M_INF: usize = 1;
//! const M_TAU: usize = 2;
//!
//! let mut block = Block::<f64, Interleaved, Sse>::new(4, 3)?;
//! for r in 0..4 {
//!     block.set(r, M, 0.05)?;
//!     block.set(r, M_INF, 0.6)?;
//!     block.set(r, M_TAU, 2.0)?;
//! }
//!
//! block.for_each(|s| {
//!     let mut m = s.write(M);
//!     m += (1.0 - (-0.1 / s.read(M_TAU)).exp()) * (s.read(M_INF) - s.read(M));
//! });
//!
//! assert!((block.get(3, M)? - 0.076_823_816_5).abs() < 1e-9);
//! # Ok::<(), fusekit::KernelError>(())
//! ```
//!
//! # Cargo features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `parallel` | `Block::par_for_each` on the rayon pool |
//! | `avx` | [`DefaultTarget`](config::DefaultTarget) becomes 32 bytes |
//! | `chained-fma` | `a*b ± c*d` evaluates as one fused op over `c*d` |

pub mod config;
mod error;
pub mod expr;
pub mod register;
pub mod storage;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use config::{BlockConfig, Flat, Interleaved, Layout, LayoutKind};
pub use error::{KernelError, Result};
pub use expr::{
    Node, NodeKind, ReadView, ViewState, WriteView, add, div, exp, ipow, log, mul, neg, powi,
    sqrt, sub,
};
pub use register::{Element, Lanes, Register};
pub use storage::{Block, Storage};
