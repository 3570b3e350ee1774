use super::Target;
use crate::error::KernelError;
use crate::register::{Element, Lanes, Register};
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Runtime name of a layout, for logs and configuration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Array of structures: each record's fields are contiguous
    Flat,
    /// Array of structures of arrays: one field across a batch is contiguous
    Interleaved,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Flat => write!(f, "flat"),
            LayoutKind::Interleaved => write!(f, "interleaved"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "aos" => Ok(LayoutKind::Flat),
            "interleaved" | "aosoa" => Ok(LayoutKind::Interleaved),
            _ => Err(KernelError::UnknownLayout(s.to_owned())),
        }
    }
}

/// Element stride of a layout for a register width and element size.
///
/// `1` for [`LayoutKind::Flat`], `width_bytes / element_size` for
/// [`LayoutKind::Interleaved`].
#[must_use]
pub const fn stride(kind: LayoutKind, width_bytes: usize, element_size: usize) -> usize {
    match kind {
        LayoutKind::Flat => 1,
        LayoutKind::Interleaved => width_bytes / element_size,
    }
}

/// How fields of element type `T` are addressed for target `W`.
///
/// `Interleaved` is only implemented where `T: Lanes<W>`, so asking for an
/// unsupported element/width pair fails to compile.
pub trait Layout<T: Element, W: Target>: Copy + Default + Debug + Send + Sync + 'static {
    const KIND: LayoutKind;

    /// Elements per field slot
    const STRIDE: usize;

    /// Register one field slot loads into
    type Reg: Register<Elem = T>;

    /// The cells backing field `index`.
    ///
    /// # Panics
    /// If the slot extends past `cells`.
    #[inline]
    fn slot(cells: &[Cell<T>], index: usize) -> &[Cell<T>] {
        &cells[index * Self::STRIDE..(index + 1) * Self::STRIDE]
    }
}

/// Per-record layout; one scalar per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flat;

/// Width-interleaved batch layout; one register per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interleaved;

impl<T: Element, W: Target> Layout<T, W> for Flat {
    const KIND: LayoutKind = LayoutKind::Flat;
    const STRIDE: usize = stride(LayoutKind::Flat, W::WIDTH_BYTES, size_of::<T>());
    type Reg = T;

    #[inline]
    fn slot(cells: &[Cell<T>], index: usize) -> &[Cell<T>] {
        std::slice::from_ref(&cells[index])
    }
}

impl<T: Lanes<W>, W: Target> Layout<T, W> for Interleaved {
    const KIND: LayoutKind = LayoutKind::Interleaved;
    const STRIDE: usize = stride(LayoutKind::Interleaved, W::WIDTH_BYTES, size_of::<T>());
    type Reg = T::Vector;
}
