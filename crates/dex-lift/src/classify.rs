//! Opcode classification: one explicit entry per supported opcode mapping it
//! to (operation kind, result type, operand layout). The match below is
//! exhaustive over [`Opcode`], so adding an opcode without classifying it is
//! a compile error, and every sibling's type is independently testable.

use crate::dex::Opcode;
use crate::ir::{BinaryKind, Type};

/// Operand layout a classified opcode expects. Cross-checked against the
/// decoded instruction's actual operands by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    ThreeRegs,
    TwoRegs,
    OneReg,
    RegField,
}

/// What a supported opcode does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Binary { kind: BinaryKind, ty: Type },
    Move,
    Return,
    FieldLoad { ty: Type },
    FieldStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub class: OpClass,
    pub format: Format,
}

/// Classify a raw opcode value. `None` means the opcode is unsupported.
#[must_use]
pub fn lookup(raw: u16) -> Option<OpInfo> {
    Opcode::from_repr(raw).map(classify)
}

/// Classification of a known-supported opcode.
#[must_use]
pub const fn classify(opcode: Opcode) -> OpInfo {
    use BinaryKind::{Add, And, Div, Mul, Or, Rem, Shl, Shr, Sub, Ushr, Xor};
    use Opcode as Op;

    match opcode {
        Op::Move | Op::MoveWide | Op::MoveObject => OpInfo {
            class: OpClass::Move,
            format: Format::TwoRegs,
        },
        Op::Return | Op::ReturnWide | Op::ReturnObject => OpInfo {
            class: OpClass::Return,
            format: Format::OneReg,
        },

        Op::IgetBoolean => field_load(Type::Boolean),
        Op::IgetByte => field_load(Type::Byte),
        Op::IgetChar => field_load(Type::Char),
        Op::IgetShort => field_load(Type::Short),
        Op::IputBoolean | Op::IputByte | Op::IputChar | Op::IputShort => OpInfo {
            class: OpClass::FieldStore,
            format: Format::RegField,
        },

        Op::AddInt => binary(Add, Type::Int),
        Op::SubInt => binary(Sub, Type::Int),
        Op::MulInt => binary(Mul, Type::Int),
        Op::DivInt => binary(Div, Type::Int),
        Op::RemInt => binary(Rem, Type::Int),
        Op::AndInt => binary(And, Type::Int),
        Op::OrInt => binary(Or, Type::Int),
        Op::XorInt => binary(Xor, Type::Int),
        Op::ShlInt => binary(Shl, Type::Int),
        Op::ShrInt => binary(Shr, Type::Int),
        Op::UshrInt => binary(Ushr, Type::Int),

        Op::AddLong => binary(Add, Type::Long),
        Op::SubLong => binary(Sub, Type::Long),
        Op::MulLong => binary(Mul, Type::Long),
        Op::DivLong => binary(Div, Type::Long),
        Op::RemLong => binary(Rem, Type::Long),
        Op::AndLong => binary(And, Type::Long),
        Op::OrLong => binary(Or, Type::Long),
        Op::XorLong => binary(Xor, Type::Long),
        Op::ShlLong => binary(Shl, Type::Long),
        Op::ShrLong => binary(Shr, Type::Long),
        Op::UshrLong => binary(Ushr, Type::Long),

        Op::AddFloat => binary(Add, Type::Float),
        Op::SubFloat => binary(Sub, Type::Float),
        Op::MulFloat => binary(Mul, Type::Float),
        Op::DivFloat => binary(Div, Type::Float),
        Op::RemFloat => binary(Rem, Type::Float),

        Op::AddDouble => binary(Add, Type::Double),
        Op::SubDouble => binary(Sub, Type::Double),
        Op::MulDouble => binary(Mul, Type::Double),
        Op::DivDouble => binary(Div, Type::Double),
        Op::RemDouble => binary(Rem, Type::Double),

        Op::AddInt2addr => accumulate(Add, Type::Int),
        Op::SubInt2addr => accumulate(Sub, Type::Int),
        Op::MulInt2addr => accumulate(Mul, Type::Int),
        Op::DivInt2addr => accumulate(Div, Type::Int),
        Op::RemInt2addr => accumulate(Rem, Type::Int),
        Op::AndInt2addr => accumulate(And, Type::Int),
        Op::OrInt2addr => accumulate(Or, Type::Int),
        Op::XorInt2addr => accumulate(Xor, Type::Int),
        Op::ShlInt2addr => accumulate(Shl, Type::Int),
        Op::ShrInt2addr => accumulate(Shr, Type::Int),
        Op::UshrInt2addr => accumulate(Ushr, Type::Int),

        Op::AddLong2addr => accumulate(Add, Type::Long),
        Op::SubLong2addr => accumulate(Sub, Type::Long),
        Op::MulLong2addr => accumulate(Mul, Type::Long),
        Op::DivLong2addr => accumulate(Div, Type::Long),
        Op::RemLong2addr => accumulate(Rem, Type::Long),
        Op::AndLong2addr => accumulate(And, Type::Long),
        Op::OrLong2addr => accumulate(Or, Type::Long),
        Op::XorLong2addr => accumulate(Xor, Type::Long),
        Op::ShlLong2addr => accumulate(Shl, Type::Long),
        Op::ShrLong2addr => accumulate(Shr, Type::Long),
        Op::UshrLong2addr => accumulate(Ushr, Type::Long),

        Op::AddFloat2addr => accumulate(Add, Type::Float),
        Op::SubFloat2addr => accumulate(Sub, Type::Float),
        Op::MulFloat2addr => accumulate(Mul, Type::Float),
        Op::DivFloat2addr => accumulate(Div, Type::Float),
        Op::RemFloat2addr => accumulate(Rem, Type::Float),

        Op::AddDouble2addr => accumulate(Add, Type::Double),
        Op::SubDouble2addr => accumulate(Sub, Type::Double),
        Op::MulDouble2addr => accumulate(Mul, Type::Double),
        Op::DivDouble2addr => accumulate(Div, Type::Double),
        Op::RemDouble2addr => accumulate(Rem, Type::Double),
    }
}

const fn binary(kind: BinaryKind, ty: Type) -> OpInfo {
    OpInfo {
        class: OpClass::Binary { kind, ty },
        format: Format::ThreeRegs,
    }
}

const fn accumulate(kind: BinaryKind, ty: Type) -> OpInfo {
    OpInfo {
        class: OpClass::Binary { kind, ty },
        format: Format::TwoRegs,
    }
}

const fn field_load(ty: Type) -> OpInfo {
    OpInfo {
        class: OpClass::FieldLoad { ty },
        format: Format::RegField,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_opcode_is_absent() {
        assert_eq!(lookup(0x00), None); // nop
        assert_eq!(lookup(0x6e), None); // invoke-virtual
        assert_eq!(lookup(0xffff), None);
    }

    #[test]
    fn add_family_types_follow_the_sibling_order() {
        for (raw, ty) in [
            (0x90, Type::Int),
            (0x9b, Type::Long),
            (0xa6, Type::Float),
            (0xab, Type::Double),
        ] {
            let info = lookup(raw).expect("add sibling classified");
            assert_eq!(
                info.class,
                OpClass::Binary {
                    kind: BinaryKind::Add,
                    ty
                },
                "add sibling {raw:#04x}"
            );
            assert_eq!(info.format, Format::ThreeRegs);
        }
    }

    #[test]
    fn bitwise_and_shift_families_are_int_and_long_only() {
        let mut bitwise_types = Vec::new();
        for raw in 0..=0xffu16 {
            if let Some(OpInfo {
                class: OpClass::Binary { kind, ty },
                ..
            }) = lookup(raw)
            {
                if matches!(
                    kind,
                    BinaryKind::And
                        | BinaryKind::Or
                        | BinaryKind::Xor
                        | BinaryKind::Shl
                        | BinaryKind::Shr
                        | BinaryKind::Ushr
                ) {
                    bitwise_types.push(ty);
                }
            }
        }
        assert!(!bitwise_types.is_empty());
        assert!(
            bitwise_types
                .iter()
                .all(|ty| matches!(ty, Type::Int | Type::Long)),
            "bitwise/shift ops must never get float/double variants"
        );
    }

    #[test]
    fn accumulate_forms_expect_two_registers() {
        let info = lookup(0xb0).expect("add-int/2addr");
        assert_eq!(info.format, Format::TwoRegs);
        assert_eq!(
            info.class,
            OpClass::Binary {
                kind: BinaryKind::Add,
                ty: Type::Int
            }
        );
    }

    #[test]
    fn field_access_types_follow_the_sibling_order() {
        for (raw, ty) in [
            (0x55, Type::Boolean),
            (0x56, Type::Byte),
            (0x57, Type::Char),
            (0x58, Type::Short),
        ] {
            let info = lookup(raw).expect("iget sibling classified");
            assert_eq!(info.class, OpClass::FieldLoad { ty }, "iget sibling {raw:#04x}");
            assert_eq!(info.format, Format::RegField);
        }
        for raw in 0x5c..=0x5fu16 {
            let info = lookup(raw).expect("iput sibling classified");
            assert_eq!(info.class, OpClass::FieldStore);
        }
    }

    #[test]
    fn returns_take_one_register() {
        for raw in [0x0f, 0x10, 0x11] {
            let info = lookup(raw).expect("return sibling classified");
            assert_eq!(info.class, OpClass::Return);
            assert_eq!(info.format, Format::OneReg);
        }
    }
}
