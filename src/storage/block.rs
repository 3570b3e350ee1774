use super::Storage;
use crate::config::{BlockConfig, DefaultTarget, Layout, LayoutKind, Target};
use crate::error::{KernelError, Result};
use crate::register::Element;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owned array of `records` records with `fields` fields each.
///
/// The backing `Vec` is cut into windows of `fields × STRIDE` elements:
///
/// ```text
/// Flat, 3 fields:            | r0.f0 r0.f1 r0.f2 | r1.f0 r1.f1 r1.f2 | ...
/// Interleaved, stride 2:     | r0.f0 r1.f0 r0.f1 r1.f1 r0.f2 r1.f2 | r2.f0 ...
/// ```
///
/// Under the interleaved layout the last window is padded up to a full
/// batch; padding lanes hold the fill value and are evaluated like any
/// other lane, but [`get`](Self::get) and [`set`](Self::set) never expose
/// them.
pub struct Block<T, L, W = DefaultTarget>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    data: Vec<T>,
    records: usize,
    fields: usize,
    _layout: PhantomData<(L, W)>,
}

impl<T, L, W> Block<T, L, W>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    /// Zero-filled block.
    ///
    /// # Errors
    /// See [`BlockConfig::validate`].
    pub fn new(records: usize, fields: usize) -> Result<Self> {
        Self::from_config(&BlockConfig::new(records, fields))
    }

    /// # Errors
    /// `InvalidConfig` if the configuration is rejected or the padded
    /// element count overflows.
    pub fn from_config(config: &BlockConfig<T>) -> Result<Self> {
        config.validate()?;
        let records = config.records();
        let fields = config.fields();
        let overflow = || {
            KernelError::InvalidConfig(format!(
                "{records} records x {fields} fields overflows with stride {}",
                L::STRIDE
            ))
        };
        let window = fields.checked_mul(L::STRIDE).ok_or_else(overflow)?;
        let len = records
            .div_ceil(L::STRIDE)
            .checked_mul(window)
            .filter(|&len| {
                len.checked_mul(size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX.unsigned_abs())
            })
            .ok_or_else(overflow)?;

        tracing::debug!(
            records,
            fields,
            layout = %L::KIND,
            width = W::NAME,
            stride = L::STRIDE,
            len,
            "allocated block"
        );

        Ok(Self {
            data: vec![config.fill_value(); len],
            records,
            fields,
            _layout: PhantomData,
        })
    }

    /// Logical record count, excluding padding lanes.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Fields per record.
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Layout this block was allocated with.
    pub fn layout(&self) -> LayoutKind {
        L::KIND
    }

    /// Number of storage windows, including a padded final batch.
    pub fn storage_count(&self) -> usize {
        self.data.len() / self.window_len()
    }

    /// Window `index`.
    ///
    /// # Errors
    /// `StorageOutOfRange` if `index >= self.storage_count()`.
    pub fn storage_mut(&mut self, index: usize) -> Result<Storage<'_, T, L, W>> {
        let count = self.storage_count();
        if index >= count {
            return Err(KernelError::StorageOutOfRange { index, count });
        }
        let window = self.window_len();
        Ok(Storage::new(
            &mut self.data[index * window..(index + 1) * window],
        ))
    }

    /// Run `f` over every window in order.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Storage<'_, T, L, W>),
    {
        let window = self.window_len();
        for chunk in self.data.chunks_exact_mut(window) {
            f(Storage::new(chunk));
        }
    }

    /// Run `f` over every window on the rayon pool.
    ///
    /// Windows are disjoint, so no two workers ever alias a slot.
    #[cfg(feature = "parallel")]
    pub fn par_for_each<F>(&mut self, f: F)
    where
        F: Fn(Storage<'_, T, L, W>) + Send + Sync,
    {
        let window = self.window_len();
        tracing::debug!(
            windows = self.storage_count(),
            threads = rayon::current_num_threads(),
            "parallel dispatch"
        );
        self.data
            .par_chunks_exact_mut(window)
            .for_each(|chunk| f(Storage::new(chunk)));
    }

    /// Value of `field` in `record`.
    ///
    /// # Errors
    /// `RecordOutOfRange` or `FieldOutOfRange` for indices past the block.
    pub fn get(&self, record: usize, field: usize) -> Result<T> {
        let offset = self.offset(record, field)?;
        Ok(self.data[offset])
    }

    /// Overwrite `field` in `record`.
    ///
    /// # Errors
    /// `RecordOutOfRange` or `FieldOutOfRange` for indices past the block.
    pub fn set(&mut self, record: usize, field: usize, value: T) -> Result<()> {
        let offset = self.offset(record, field)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Backing array in layout order, padding included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn window_len(&self) -> usize {
        self.fields * L::STRIDE
    }

    fn offset(&self, record: usize, field: usize) -> Result<usize> {
        if record >= self.records {
            return Err(KernelError::RecordOutOfRange {
                record,
                records: self.records,
            });
        }
        if field >= self.fields {
            return Err(KernelError::FieldOutOfRange {
                field,
                fields: self.fields,
            });
        }
        let s = L::STRIDE;
        Ok((record / s) * self.window_len() + field * s + record % s)
    }
}

impl<T, L, W> fmt::Debug for Block<T, L, W>
where
    T: Element,
    L: Layout<T, W>,
    W: Target,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("layout", &L::KIND)
            .field("target", &W::NAME)
            .field("records", &self.records)
            .field("fields", &self.fields)
            .field("windows", &self.storage_count())
            .finish()
    }
}
