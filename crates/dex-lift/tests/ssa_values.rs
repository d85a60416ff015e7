//! SSA value store behavior: the read/write/seal protocol, block parameter
//! placement at merges, loop back-edges and trivial-parameter elimination.

use dex_lift::ir::Op;
use dex_lift::ssa;
use dex_lift::test_harness::{MethodBuilder, seed};
use dex_lift::{BinaryKind, Error, IrBuilder, LiftOptions, Type};

fn param_count(builder: &IrBuilder) -> usize {
    builder
        .ops()
        .filter(|(_, op)| matches!(op, Op::BlockParam { .. }))
        .count()
}

/// A sealed block with exactly one predecessor never needs a parameter:
/// reads pass straight through to the predecessor and are cached locally.
#[test]
fn sealed_single_predecessor_chain_reads_through() {
    let mut mb = MethodBuilder::new("chain", 4);
    let entry = mb.entry();
    let b1 = mb.block();
    let b2 = mb.block();
    mb.edge(entry, b1);
    mb.edge(b1, b2);
    let mut method = mb.build();

    let mut builder = IrBuilder::new();
    let options = LiftOptions::default();
    let value = seed(&mut method, &mut builder, entry, 0, Type::Int, 5);
    for block in [entry, b1, b2] {
        ssa::seal_block(&mut method, &mut builder, options, block).expect("seal");
    }

    let read = ssa::read_register(&mut method, &mut builder, options, b2, 0).expect("read");
    assert_eq!(read, value);
    assert_eq!(param_count(&builder), 0, "single-pred chain must not create parameters");
    // The intermediate block caches the resolved value, one entry per register.
    assert_eq!(method.local(b1, 0), Some(value));
    assert_eq!(method.block(b1).defined_registers().count(), 1);
}

/// Reading through an unsealed block parks an incomplete parameter; sealing
/// completes it, and with one predecessor it collapses to the predecessor's
/// value.
#[test]
fn unsealed_read_parks_parameter_until_seal() {
    let mut mb = MethodBuilder::new("two_block", 2);
    let entry = mb.entry();
    let b1 = mb.block();
    mb.edge(entry, b1);
    let mut method = mb.build();

    let mut builder = IrBuilder::new();
    let options = LiftOptions::default();
    let five = seed(&mut method, &mut builder, entry, 1, Type::Int, 5);
    ssa::seal_block(&mut method, &mut builder, options, entry).expect("seal entry");

    // b1 not sealed yet: the read cannot know its full predecessor set.
    let param = ssa::read_register(&mut method, &mut builder, options, b1, 1).expect("read");
    assert!(matches!(
        builder.op(param),
        Op::BlockParam { incomplete: true, .. }
    ));

    ssa::seal_block(&mut method, &mut builder, options, b1).expect("seal b1");

    let read = ssa::read_register(&mut method, &mut builder, options, b1, 1).expect("read");
    assert_eq!(read, five, "parameter must collapse to the single incoming value");
    assert_eq!(builder.resolve(param), five);
}

/// Loop back-edge: reading the loop-carried register terminates and yields a
/// header parameter fed by the initial value and the redefinition from the
/// loop body.
#[test]
fn loop_back_edge_terminates_and_merges() {
    let mut mb = MethodBuilder::new("loop", 2);
    let entry = mb.entry();
    let header = mb.block();
    let body = mb.block();
    mb.edge(entry, header);
    mb.edge(header, body);
    mb.edge(body, header);
    let mut method = mb.build();
    assert_eq!(method.block(header).preds(), &[entry, body]);
    assert_eq!(method.block(header).succs(), &[body]);

    let mut builder = IrBuilder::new();
    let options = LiftOptions::default();
    let initial = seed(&mut method, &mut builder, entry, 0, Type::Int, 0);
    let step = seed(&mut method, &mut builder, entry, 1, Type::Int, 1);
    ssa::seal_block(&mut method, &mut builder, options, entry).expect("seal entry");

    // Header visited before the back-edge source: read while unsealed.
    let param = ssa::read_register(&mut method, &mut builder, options, header, 0).expect("read");

    // Body accumulates into the register, creating the loop-carried value.
    ssa::seal_block(&mut method, &mut builder, options, body).expect("seal body");
    let carried = ssa::read_register(&mut method, &mut builder, options, body, 0).expect("read");
    assert_eq!(carried, param, "body sees the header placeholder");
    let increment = ssa::read_register(&mut method, &mut builder, options, body, 1).expect("read");
    assert_eq!(increment, step);
    let next = builder.binary(BinaryKind::Add, Type::Int, carried, increment, 0x10);
    ssa::write_register(&mut method, body, 0, next);

    ssa::seal_block(&mut method, &mut builder, options, header).expect("seal header");

    let Op::BlockParam {
        operands,
        incomplete,
        ..
    } = builder.op(param)
    else {
        panic!("loop-carried register must stay a parameter");
    };
    assert!(!incomplete);
    assert_eq!(operands.len(), 2, "one operand per predecessor edge");
    assert!(operands.contains(&(entry, initial)));
    assert!(operands.contains(&(body, next)));
    assert_eq!(builder.ty(param), Some(Type::Int));
}

/// A merge whose incoming values are all the same definition is eliminated,
/// and the elimination propagates to parameters that used it.
#[test]
fn trivial_parameters_are_eliminated_transitively() {
    let mut mb = MethodBuilder::new("diamond_loop", 1);
    let entry = mb.entry();
    let header = mb.block();
    let left = mb.block();
    let right = mb.block();
    let merge = mb.block();
    mb.edge(entry, header);
    mb.edge(header, left);
    mb.edge(header, right);
    mb.edge(left, merge);
    mb.edge(right, merge);
    mb.edge(merge, header);
    let mut method = mb.build();

    let mut builder = IrBuilder::new();
    let options = LiftOptions::default();
    let constant = seed(&mut method, &mut builder, entry, 0, Type::Int, 42);
    ssa::seal_block(&mut method, &mut builder, options, entry).expect("seal entry");
    ssa::seal_block(&mut method, &mut builder, options, left).expect("seal left");
    ssa::seal_block(&mut method, &mut builder, options, right).expect("seal right");
    ssa::seal_block(&mut method, &mut builder, options, merge).expect("seal merge");

    // Neither arm redefines the register, so the merge parameter is trivial
    // (both operands are the header placeholder) and the header parameter in
    // turn only merges the constant with itself around the loop.
    let at_merge = ssa::read_register(&mut method, &mut builder, options, merge, 0).expect("read");
    ssa::seal_block(&mut method, &mut builder, options, header).expect("seal header");

    assert_eq!(builder.resolve(at_merge), constant);
    let read = ssa::read_register(&mut method, &mut builder, options, merge, 0).expect("read");
    assert_eq!(read, constant);
    let read = ssa::read_register(&mut method, &mut builder, options, header, 0).expect("read");
    assert_eq!(read, constant);
}

/// A sealed entry block with no definition for the register is a hard error.
#[test]
fn undefined_register_read_is_an_error() {
    let mut mb = MethodBuilder::new("empty", 4);
    let entry = mb.entry();
    let mut method = mb.build();
    assert_eq!(method.register_count(), 4);
    assert_eq!(method.name(), "empty");

    let mut builder = IrBuilder::new();
    let options = LiftOptions::default();
    ssa::seal_block(&mut method, &mut builder, options, entry).expect("seal entry");

    let err = ssa::read_register(&mut method, &mut builder, options, entry, 3)
        .expect_err("unwritten register");
    assert_eq!(err, Error::UndefinedRegister { register: 3 });
}

/// With elimination disabled, even a single-operand parameter survives — the
/// debugging view of raw parameter placement.
#[test]
fn elimination_can_be_disabled() {
    let mut mb = MethodBuilder::new("raw_params", 2);
    let entry = mb.entry();
    let b1 = mb.block();
    mb.edge(entry, b1);
    let mut method = mb.build();

    let mut builder = IrBuilder::new();
    let options = LiftOptions {
        eliminate_trivial_params: false,
    };
    let five = seed(&mut method, &mut builder, entry, 1, Type::Int, 5);
    ssa::seal_block(&mut method, &mut builder, options, entry).expect("seal entry");

    let param = ssa::read_register(&mut method, &mut builder, options, b1, 1).expect("read");
    ssa::seal_block(&mut method, &mut builder, options, b1).expect("seal b1");

    let read = ssa::read_register(&mut method, &mut builder, options, b1, 1).expect("read");
    assert_eq!(read, param, "parameter must survive when elimination is off");
    assert_eq!(builder.param_operands(param), &[(entry, five)]);
}
