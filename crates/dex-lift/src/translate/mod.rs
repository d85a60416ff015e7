//! Instruction translation: one routine per operand-layout family, each
//! reading operands through the SSA store and issuing exactly one IR
//! construction request.

mod lifter;

pub use lifter::Lifter;
