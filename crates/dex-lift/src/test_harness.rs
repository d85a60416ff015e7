//! Helpers for writing unit and integration tests: quick CFG construction
//! and register seeding.

use crate::dex::Reg;
use crate::ir::{IrBuilder, Type, Value};
use crate::ssa::{self, BlockId, LiftOptions, Method};

/// Builds a [`Method`] CFG edge by edge. Block 0 (the entry) is created up
/// front; sealing stays with the test, since seal order is usually the point.
pub struct MethodBuilder {
    method: Method,
}

impl MethodBuilder {
    #[must_use]
    pub fn new(name: &str, register_count: u16) -> Self {
        let mut method = Method::new(name, register_count);
        method.add_block();
        Self { method }
    }

    #[must_use]
    pub fn entry(&self) -> BlockId {
        self.method.entry()
    }

    pub fn block(&mut self) -> BlockId {
        self.method.add_block()
    }

    pub fn edge(&mut self, from: BlockId, to: BlockId) -> &mut Self {
        self.method.add_edge(from, to);
        self
    }

    #[must_use]
    pub fn build(self) -> Method {
        self.method
    }
}

/// Seed `reg` in `block` with a typed constant, the way a driver would
/// materialize argument registers or prior definitions.
pub fn seed(
    method: &mut Method,
    builder: &mut IrBuilder,
    block: BlockId,
    reg: Reg,
    ty: Type,
    literal: i64,
) -> Value {
    let value = builder.iconst(ty, literal, 0);
    ssa::write_register(method, block, reg, value);
    value
}

/// Seal every block of `method`, entry first. Only valid once the whole CFG
/// is known.
pub fn seal_all(method: &mut Method, builder: &mut IrBuilder, options: LiftOptions) {
    for index in 0..method.block_count() {
        let block = BlockId(u32::try_from(index).expect("block count exceeds u32"));
        ssa::seal_block(method, builder, options, block).expect("seal_all on a known CFG");
    }
}
