use crate::classify::{self, Format, OpClass};
use crate::dex::{FieldRef, Instruction, Operands, Reg};
use crate::ir::IrBuilder;
use crate::ssa::{self, BlockId, LiftOptions, Method};
use crate::{Error, Result};

/// Translates decoded instructions of one method into IR.
///
/// The driver owns the visit order: it feeds instructions block by block and
/// seals blocks once their predecessor sets are final (see
/// [`ssa::seal_block`]). The target block is explicit on every call; there is
/// no current-block state.
pub struct Lifter<'a> {
    method: &'a mut Method,
    builder: &'a mut IrBuilder,
    options: LiftOptions,
}

impl<'a> Lifter<'a> {
    pub fn new(method: &'a mut Method, builder: &'a mut IrBuilder, options: LiftOptions) -> Self {
        Self {
            method,
            builder,
            options,
        }
    }

    /// Translate every instruction of `block` in order.
    pub fn lift_block(&mut self, block: BlockId, instructions: &[Instruction]) -> Result<()> {
        for instruction in instructions {
            self.lift_instruction(block, instruction)?;
        }
        Ok(())
    }

    /// Translate a single instruction in the context of `block`.
    ///
    /// On error, nothing has been written to the instruction's destination
    /// register; operations already committed to the builder stay (the
    /// method is being discarded).
    pub fn lift_instruction(&mut self, block: BlockId, instruction: &Instruction) -> Result<()> {
        match &instruction.operands {
            Operands::ThreeRegs { dest, src1, src2 } => {
                self.lift_three_regs(block, instruction, *dest, *src1, *src2)
            }
            Operands::TwoRegs { dest, src } => self.lift_two_regs(block, instruction, *dest, *src),
            Operands::OneReg { reg } => self.lift_one_reg(block, instruction, *reg),
            Operands::RegField { reg, field } => {
                self.lift_reg_field(block, instruction, *reg, field.as_ref())
            }
            Operands::Other => {
                tracing::debug!(
                    opcode = instruction.opcode,
                    address = instruction.address,
                    "no translation routine for operand layout"
                );
                Err(Error::UnsupportedFormat {
                    opcode: instruction.opcode,
                    address: instruction.address,
                })
            }
        }
    }

    /// Table lookup plus the family cross-check: an opcode classified for a
    /// different layout than the one decoded is as unsupported as an absent
    /// one.
    fn classify_for(&self, instruction: &Instruction, format: Format) -> Result<OpClass> {
        match classify::lookup(instruction.opcode) {
            Some(info) if info.format == format => Ok(info.class),
            _ => Err(Error::UnsupportedOpcode {
                opcode: instruction.opcode,
                address: instruction.address,
            }),
        }
    }

    fn lift_three_regs(
        &mut self,
        block: BlockId,
        instruction: &Instruction,
        dest: Reg,
        src1: Reg,
        src2: Reg,
    ) -> Result<()> {
        let OpClass::Binary { kind, ty } = self.classify_for(instruction, Format::ThreeRegs)? else {
            return Err(Error::UnsupportedOpcode {
                opcode: instruction.opcode,
                address: instruction.address,
            });
        };
        let lhs = ssa::read_register(self.method, self.builder, self.options, block, src1)?;
        let rhs = ssa::read_register(self.method, self.builder, self.options, block, src2)?;
        let value = self.builder.binary(kind, ty, lhs, rhs, instruction.address);
        ssa::write_register(self.method, block, dest, value);
        Ok(())
    }

    fn lift_two_regs(
        &mut self,
        block: BlockId,
        instruction: &Instruction,
        dest: Reg,
        src: Reg,
    ) -> Result<()> {
        match self.classify_for(instruction, Format::TwoRegs)? {
            OpClass::Binary { kind, ty } => {
                // dest doubles as the first source; read it before the
                // result overwrites it.
                let lhs = ssa::read_register(self.method, self.builder, self.options, block, dest)?;
                let rhs = ssa::read_register(self.method, self.builder, self.options, block, src)?;
                let value = self.builder.binary(kind, ty, lhs, rhs, instruction.address);
                ssa::write_register(self.method, block, dest, value);
                Ok(())
            }
            OpClass::Move => {
                // A register copy is pure bookkeeping under SSA: no
                // operation is emitted.
                let value = ssa::read_register(self.method, self.builder, self.options, block, src)?;
                ssa::write_register(self.method, block, dest, value);
                Ok(())
            }
            _ => Err(Error::UnsupportedOpcode {
                opcode: instruction.opcode,
                address: instruction.address,
            }),
        }
    }

    fn lift_one_reg(&mut self, block: BlockId, instruction: &Instruction, reg: Reg) -> Result<()> {
        let OpClass::Return = self.classify_for(instruction, Format::OneReg)? else {
            return Err(Error::UnsupportedOpcode {
                opcode: instruction.opcode,
                address: instruction.address,
            });
        };
        let value = ssa::read_register(self.method, self.builder, self.options, block, reg)?;
        self.builder.ret(value, instruction.address);
        Ok(())
    }

    fn lift_reg_field(
        &mut self,
        block: BlockId,
        instruction: &Instruction,
        reg: Reg,
        field: Option<&FieldRef>,
    ) -> Result<()> {
        let class = self.classify_for(instruction, Format::RegField)?;
        let Some(field) = field else {
            return Err(Error::UnresolvedField {
                opcode: instruction.opcode,
                address: instruction.address,
            });
        };
        match class {
            OpClass::FieldLoad { ty } => {
                let value =
                    self.builder
                        .load_field(ty, &field.name, field.index, instruction.address);
                ssa::write_register(self.method, block, reg, value);
                Ok(())
            }
            OpClass::FieldStore => {
                let value = ssa::read_register(self.method, self.builder, self.options, block, reg)?;
                self.builder
                    .store_field(value, &field.name, field.index, instruction.address);
                Ok(())
            }
            _ => Err(Error::UnsupportedOpcode {
                opcode: instruction.opcode,
                address: instruction.address,
            }),
        }
    }
}
