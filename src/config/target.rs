use std::fmt::Debug;

/// A hardware vector width.
pub trait Target: Copy + Default + Debug + Send + Sync + 'static {
    /// Short name used in logs
    const NAME: &'static str;
    /// Register width in bytes
    const WIDTH_BYTES: usize;
}

/// 128-bit registers (SSE, NEON).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sse;

/// 256-bit registers (AVX).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Avx;

impl Target for Sse {
    const NAME: &'static str = "sse";
    const WIDTH_BYTES: usize = 16;
}

impl Target for Avx {
    const NAME: &'static str = "avx";
    const WIDTH_BYTES: usize = 32;
}

/// Target used when a block or storage type does not name one.
#[cfg(feature = "avx")]
pub type DefaultTarget = Avx;

/// Target used when a block or storage type does not name one.
#[cfg(not(feature = "avx"))]
pub type DefaultTarget = Sse;
