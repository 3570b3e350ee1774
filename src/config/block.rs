use crate::error::{KernelError, Result};
use crate::register::Element;

/// Shape and initial contents of a [`Block`](crate::storage::Block).
///
/// # Example
/// ```
/// use fusekit::config::{BlockConfig, Flat, Sse};
/// use fusekit::storage::Block;
///
/// let config = BlockConfig::new(100, 6).fill(0.5_f64);
/// let block = Block::<f64, Flat, Sse>::from_config(&config).expect("valid config");
/// assert_eq!(block.records(), 100);
/// assert_eq!(block.get(99, 5), Ok(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlockConfig<T: Element> {
    records: usize,
    fields: usize,
    fill: T,
}

impl<T: Element> BlockConfig<T> {
    /// `records` records of `fields` fields each, zero-filled.
    pub fn new(records: usize, fields: usize) -> Self {
        Self {
            records,
            fields,
            fill: T::zero(),
        }
    }

    /// Initial value for every field, including interleaved padding lanes.
    #[must_use]
    pub fn fill(mut self, value: T) -> Self {
        self.fill = value;
        self
    }

    /// Logical record count.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Fields per record.
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Value set by [`fill`](Self::fill), zero by default.
    pub fn fill_value(&self) -> T {
        self.fill
    }

    /// Check the configuration can be allocated.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the record has no fields or the element count
    /// overflows `usize`.
    pub fn validate(&self) -> Result<()> {
        if self.fields == 0 {
            return Err(KernelError::InvalidConfig(
                "a record needs at least one field".to_owned(),
            ));
        }
        if self.records.checked_mul(self.fields).is_none() {
            return Err(KernelError::InvalidConfig(format!(
                "{} records x {} fields overflows the address space",
                self.records, self.fields
            )));
        }
        Ok(())
    }
}
