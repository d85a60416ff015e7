//! The typed IR this lifter emits: a flat arena of operations addressed by
//! opaque [`Value`] handles. Construction requests come from the translator;
//! the arena also tracks uses so block parameters can be rewritten away.

mod builder;
mod display;
mod op;

pub use builder::IrBuilder;
pub use op::{BinaryKind, Op, Type, Value};
