// Write-once behaviour of the write-view guard
use super::mock::{Traced, count, take_calls};
use crate::config::{Flat, Interleaved, Sse};
use crate::expr::{ReadView, ViewState, WriteView};
use crate::storage::Storage;
use std::cell::Cell;

#[test]
fn test_drop_stores_exactly_once() {
    let mut data = [1.0];
    let slot = Cell::from_mut(&mut data[..]).as_slice_of_cells();
    take_calls();
    {
        let mut w = WriteView::<Traced>::new(slot);
        w += ReadView::leaf(Traced(2.0));
        w -= 0.5;
    }
    let calls = take_calls();
    assert_eq!(count(&calls, "scatter"), 1);
    assert_eq!(data, [2.5]);
}

#[test]
fn test_commit_then_drop_stores_once() {
    let mut data = [1.0];
    let slot = Cell::from_mut(&mut data[..]).as_slice_of_cells();
    take_calls();
    let mut w = WriteView::<Traced>::new(slot);
    w *= 4.0;
    assert_eq!(w.commit(), Traced(4.0));
    let calls = take_calls();
    assert_eq!(count(&calls, "scatter"), 1);
    assert_eq!(data, [4.0]);
}

#[test]
fn test_set_bypasses_evaluation() {
    let mut data = [1.0];
    let slot = Cell::from_mut(&mut data[..]).as_slice_of_cells();
    take_calls();
    {
        let mut w = WriteView::<Traced>::new(slot);
        w.set(9.0);
        assert_eq!(w.state(), ViewState::Evaluated);
    }
    let calls = take_calls();
    assert_eq!(count(&calls, "scatter"), 0);
    assert_eq!(data, [9.0]);
}

#[test]
fn test_store_on_unwind() {
    let mut data = [1.0_f64];
    let slot = Cell::from_mut(&mut data[..]).as_slice_of_cells();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut w = WriteView::<f64>::new(slot);
        w += 2.0;
        panic!("kernel aborted");
    }));
    assert!(result.is_err());
    assert_eq!(data, [3.0]);
}

#[test]
fn test_statements_apply_in_order() {
    const A: usize = 0;
    const B: usize = 1;

    let mut record = [2.0_f64, 0.0];
    let s = Storage::<f64, Flat, Sse>::new(&mut record);
    s.write(B).assign(s.read(A) * 3.0);
    s.write(A).assign(s.read(B) + 1.0);
    assert_eq!(record, [7.0, 6.0]);
}

#[test]
fn test_interleaved_write_covers_whole_batch() {
    let mut batch = [1.0_f64, 2.0, 0.0, 0.0];
    let s = Storage::<f64, Interleaved, Sse>::new(&mut batch);
    {
        let mut w = s.write(1);
        w += s.read(0) * s.read(0);
    }
    assert_eq!(batch, [1.0, 2.0, 1.0, 4.0]);

    fill_field(&mut batch, 5.0);
    assert_eq!(batch, [1.0, 2.0, 5.0, 5.0]);
}

fn fill_field(batch: &mut [f64], value: f64) {
    let s = Storage::<f64, Interleaved, Sse>::new(batch);
    s.write(1).set(value);
}
