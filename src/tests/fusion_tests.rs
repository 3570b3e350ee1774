// Fusion shape tests against a register that logs its primitives
use super::mock::{Traced, count, take_calls};
use crate::expr::{Node, NodeKind, ReadView, WriteView};
use std::cell::Cell;

fn v(x: f64) -> ReadView<Traced> {
    ReadView::leaf(Traced(x))
}

#[test]
fn test_independent_fused_pair() {
    let e = v(2.0) * v(3.0) + v(4.0) * v(5.0);
    assert_eq!(e.kind(), NodeKind::MulAddMul);

    take_calls();
    assert_eq!(e.evaluate(), Traced(26.0));
    let calls = take_calls();

    #[cfg(not(feature = "chained-fma"))]
    assert_eq!(calls, vec!["mul", "mul", "add"]);

    #[cfg(feature = "chained-fma")]
    assert_eq!(calls, vec!["mul", "mul_add"]);
}

#[test]
fn test_product_plus_term_is_single_fused_op() {
    let e = v(2.0) * v(3.0) + v(4.0);
    take_calls();
    assert_eq!(e.evaluate(), Traced(10.0));
    assert_eq!(take_calls(), vec!["mul_add"]);

    let e = v(2.0) * v(3.0) - v(4.0);
    take_calls();
    assert_eq!(e.evaluate(), Traced(2.0));
    assert_eq!(take_calls(), vec!["mul_sub"]);

    let e = v(4.0) - v(2.0) * v(3.0);
    take_calls();
    assert_eq!(e.evaluate(), Traced(-2.0));
    assert_eq!(take_calls(), vec!["neg_mul_add"]);
}

#[test]
fn test_neg_mul_add_evaluates_factors_before_addend() {
    let e = v(4.0).sqrt() - v(0.0).exp() * v(1.0).log();
    assert_eq!(e.kind(), NodeKind::NegMulAdd);
    take_calls();
    assert_eq!(e.evaluate(), Traced(2.0));
    assert_eq!(take_calls(), vec!["exp", "ln", "sqrt", "neg_mul_add"]);
}

#[test]
fn test_term_plus_product_is_not_fused() {
    let e = v(4.0) + v(2.0) * v(3.0);
    assert_eq!(e.kind(), NodeKind::Add);
    take_calls();
    assert_eq!(e.evaluate(), Traced(10.0));
    assert_eq!(take_calls(), vec!["mul", "add"]);
}

#[test]
fn test_children_evaluated_before_parent() {
    let e = (v(1.0) + v(2.0)) * v(3.0) - v(4.0).sqrt();
    assert_eq!(e.kind(), NodeKind::MulSub);
    take_calls();
    assert_eq!(e.evaluate(), Traced(7.0));
    assert_eq!(take_calls(), vec!["add", "sqrt", "mul_sub"]);
}

#[test]
fn test_fusion_reads_same_leaves() {
    let fused = (v(2.0) * v(3.0) - v(4.0) * v(5.0)).into_node();
    let plain: Node<Traced> = Node::Sub(
        Box::new(Node::Mul(
            Box::new(Node::Load(Traced(2.0))),
            Box::new(Node::Load(Traced(3.0))),
        )),
        Box::new(Node::Mul(
            Box::new(Node::Load(Traced(4.0))),
            Box::new(Node::Load(Traced(5.0))),
        )),
    );
    assert_eq!(fused.kind(), NodeKind::MulSubMul);
    assert_eq!(fused.leaves(), plain.leaves());
    assert_eq!(fused.eval(), plain.eval());
    assert!(fused.len() < plain.len());
}

#[test]
fn test_compound_assignment_sees_whole_statement() {
    let mut data = [2.0];
    let slot = Cell::from_mut(&mut data[..]).as_slice_of_cells();
    {
        let mut w = WriteView::<Traced>::new(slot);
        w *= v(3.0);
        w += 1.0;
        assert_eq!(w.held().kind(), NodeKind::MulAdd);
        assert_eq!(w.held().to_string(), "mul_add(load, load, const)");
        take_calls();
    }
    let calls = take_calls();
    assert_eq!(calls, vec!["mul_add", "scatter"]);
    assert_eq!(data, [7.0]);
}

#[test]
fn test_no_fusion_across_statements() {
    let mut data = [0.0, 0.0];
    let cells = Cell::from_mut(&mut data[..]).as_slice_of_cells();

    WriteView::<Traced>::new(&cells[0..1]).assign(v(2.0) * v(3.0));
    let product = ReadView::<Traced>::leaf(Traced(cells[0].get()));

    take_calls();
    WriteView::<Traced>::new(&cells[1..2]).assign(product + v(1.0));
    let calls = take_calls();
    assert_eq!(count(&calls, "add"), 1);
    assert_eq!(count(&calls, "mul_add"), 0);
    assert_eq!(data, [6.0, 7.0]);
}
