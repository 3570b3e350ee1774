//! Storage windows and the block container that owns them.
//!
//! A [`Storage`] is the unit kernels run over: one record under [`Flat`],
//! one batch of `STRIDE` records under [`Interleaved`]. Indexing a window by
//! field yields a [`ReadView`] leaf or a [`WriteView`] guard whose register
//! type is fixed by the layout.
//!
//! ```
//! use fusekit::config::{Flat, Sse};
//! use fusekit::storage::Storage;
//!
//! const X: usize = 0;
//! const Y: usize = 1;
//!
//! let mut record = [3.0_f64, 0.0];
//! let s = Storage::<f64, Flat, Sse>::new(&mut record);
//! s.write(Y).assign(s.read(X) * 2.0 + 1.0);
//! assert_eq!(record, [3.0, 7.0]);
//! ```
//!
//! [`Flat`]: crate::config::Flat
//! [`Interleaved`]: crate::config::Interleaved

mod block;

pub use block::Block;

use crate::config::{DefaultTarget, Layout, Target};
use crate::expr::{ReadView, WriteView};
use crate::register::{Element, Register};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

/// A window of `fields × STRIDE` elements laid out by `L` for target `W`.
///
/// Reads and a live write-view may overlap within a statement; the window
/// is built over [`Cell`]s so this needs no `unsafe`. A window is not
/// `Send`, so each worker builds its own from a disjoint `&mut` chunk.
pub struct Storage<'a, T, L, W = DefaultTarget>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    cells: &'a [Cell<T>],
    _layout: PhantomData<(L, W)>,
}

impl<'a, T, L, W> Storage<'a, T, L, W>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    /// Window over `data`, whose length should be a multiple of the stride.
    pub fn new(data: &'a mut [T]) -> Self {
        Self::from_cells(Cell::from_mut(data).as_slice_of_cells())
    }

    pub fn from_cells(cells: &'a [Cell<T>]) -> Self {
        debug_assert_eq!(
            cells.len() % L::STRIDE,
            0,
            "window length {} is not a multiple of stride {}",
            cells.len(),
            L::STRIDE
        );
        Self {
            cells,
            _layout: PhantomData,
        }
    }

    /// Number of field slots in the window.
    pub fn fields(&self) -> usize {
        self.cells.len() / L::STRIDE
    }

    pub fn stride(&self) -> usize {
        L::STRIDE
    }

    /// Memory leaf holding field `index`.
    ///
    /// # Panics
    /// If `index >= self.fields()`.
    pub fn read(&self, index: usize) -> ReadView<L::Reg> {
        ReadView::leaf(self.get(index))
    }

    /// Write guard over field `index`; stores when dropped or committed.
    ///
    /// # Panics
    /// If `index >= self.fields()`.
    pub fn write(&self, index: usize) -> WriteView<'a, L::Reg> {
        WriteView::new(self.slot(index))
    }

    /// Current contents of field `index`, bypassing the expression engine.
    ///
    /// # Panics
    /// If `index >= self.fields()`.
    pub fn get(&self, index: usize) -> L::Reg {
        let slot = self.slot(index);
        <L::Reg as Register>::gather(|lane| slot[lane].get())
    }

    /// Overwrite field `index` directly.
    ///
    /// # Panics
    /// If `index >= self.fields()`.
    pub fn set(&self, index: usize, value: L::Reg) {
        let slot = self.slot(index);
        value.scatter(|lane, v| slot[lane].set(v));
    }

    /// The cells backing field `index`.
    pub fn slot(&self, index: usize) -> &'a [Cell<T>] {
        L::slot(self.cells, index)
    }
}

impl<T, L, W> fmt::Debug for Storage<'_, T, L, W>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("layout", &L::KIND)
            .field("target", &W::NAME)
            .field("fields", &self.fields())
            .field("stride", &L::STRIDE)
            .finish()
    }
}
