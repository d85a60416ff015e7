use crate::dex::Reg;
use crate::ir::{IrBuilder, Value};
use crate::{Error, Result};

use super::{BlockId, Method};

/// Lifting knobs. Defaults preserve the documented semantics; the
/// elimination flag exists to make raw parameter placement visible when
/// debugging SSA construction.
#[derive(Debug, Clone, Copy)]
pub struct LiftOptions {
    pub eliminate_trivial_params: bool,
}

impl Default for LiftOptions {
    fn default() -> Self {
        Self {
            eliminate_trivial_params: true,
        }
    }
}

/// Record `value` as the current definition of `reg` in `block`.
pub fn write_register(method: &mut Method, block: BlockId, reg: Reg, value: Value) {
    method.block_mut(block).set_local(reg, value);
}

/// Resolve `reg` to its current SSA value at `block`, inserting block
/// parameters where control-flow merges require them.
///
/// Reads recurse across predecessor edges; a placeholder is written into the
/// local table *before* any recursion, so cyclic graphs terminate by finding
/// the placeholder instead of recursing again.
pub fn read_register(
    method: &mut Method,
    builder: &mut IrBuilder,
    options: LiftOptions,
    block: BlockId,
    reg: Reg,
) -> Result<Value> {
    if let Some(value) = method.block(block).local(reg) {
        return Ok(builder.resolve(value));
    }
    read_register_recursive(method, builder, options, block, reg)
}

fn read_register_recursive(
    method: &mut Method,
    builder: &mut IrBuilder,
    options: LiftOptions,
    block: BlockId,
    reg: Reg,
) -> Result<Value> {
    let value = if !method.block(block).is_sealed() {
        // Predecessors may still appear; park an incomplete parameter and
        // complete it on seal.
        let param = builder.block_param(block, true);
        tracing::debug!(block = block.0, reg, param = %param, "incomplete block parameter");
        method.block_mut(block).add_incomplete_param(reg, param);
        param
    } else {
        let preds = method.block(block).preds().to_vec();
        match preds.as_slice() {
            [] => return Err(Error::UndefinedRegister { register: reg }),
            [pred] => read_register(method, builder, options, *pred, reg)?,
            _ => {
                let param = builder.block_param(block, false);
                // Cycle break: visible before the operands are resolved.
                method.block_mut(block).set_local(reg, param);
                add_param_operands(method, builder, options, block, reg, param)?
            }
        }
    };
    method.block_mut(block).set_local(reg, value);
    Ok(value)
}

/// Mark `block`'s predecessor set final and complete its parked parameters.
/// Sealing an already-sealed block is a no-op.
pub fn seal_block(
    method: &mut Method,
    builder: &mut IrBuilder,
    options: LiftOptions,
    block: BlockId,
) -> Result<()> {
    if method.block(block).is_sealed() {
        return Ok(());
    }
    let parked = method.block_mut(block).take_incomplete_params();
    for (reg, param) in parked {
        let value = add_param_operands(method, builder, options, block, reg, param)?;
        method.block_mut(block).set_local(reg, value);
    }
    method.block_mut(block).set_sealed();
    tracing::debug!(block = block.0, "sealed");
    Ok(())
}

fn add_param_operands(
    method: &mut Method,
    builder: &mut IrBuilder,
    options: LiftOptions,
    block: BlockId,
    reg: Reg,
    param: Value,
) -> Result<Value> {
    let preds = method.block(block).preds().to_vec();
    for pred in preds {
        let operand = read_register(method, builder, options, pred, reg)?;
        builder.append_param_operand(param, pred, operand);
    }
    builder.mark_param_complete(param);
    Ok(try_remove_trivial_param(builder, options, param))
}

/// If every operand of `param` is the same value (or `param` itself, via a
/// loop back-edge), replace all uses of `param` with that value and retry
/// elimination on any parameter that used it.
fn try_remove_trivial_param(builder: &mut IrBuilder, options: LiftOptions, param: Value) -> Value {
    if !options.eliminate_trivial_params {
        return param;
    }
    let mut same: Option<Value> = None;
    for &(_, operand) in builder.param_operands(param) {
        let operand = builder.resolve(operand);
        if operand == param || Some(operand) == same {
            continue;
        }
        if same.is_some() {
            // Two distinct operands: the merge is real.
            return param;
        }
        same = Some(operand);
    }
    let Some(replacement) = same else {
        // Only self-references; unreachable in valid bytecode, keep it.
        return param;
    };
    tracing::debug!(param = %param, replacement = %replacement, "trivial parameter eliminated");
    let dependent_params = builder.replace_uses(param, replacement);
    for dependent in dependent_params {
        if dependent != param && builder.resolve(dependent) == dependent {
            try_remove_trivial_param(builder, options, dependent);
        }
    }
    replacement
}
