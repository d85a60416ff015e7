use std::fmt;

use super::{BinaryKind, Op, Type, Value};

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Long => "long",
            Type::Float => "float",
            Type::Double => "double",
            Type::Boolean => "boolean",
            Type::Byte => "byte",
            Type::Char => "char",
            Type::Short => "short",
            Type::Object => "object",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryKind::Add => "add",
            BinaryKind::Sub => "sub",
            BinaryKind::Mul => "mul",
            BinaryKind::Div => "div",
            BinaryKind::Rem => "rem",
            BinaryKind::And => "and",
            BinaryKind::Or => "or",
            BinaryKind::Xor => "xor",
            BinaryKind::Shl => "shl",
            BinaryKind::Shr => "shr",
            BinaryKind::Ushr => "ushr",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Const { literal } => write!(f, "const {literal}"),
            Op::BlockParam {
                block,
                operands,
                incomplete,
            } => {
                write!(f, "param bb{}", block.0)?;
                for (pred, value) in operands {
                    write!(f, " [bb{}: {value}]", pred.0)?;
                }
                if *incomplete {
                    write!(f, " (incomplete)")?;
                }
                Ok(())
            }
            Op::Binary { kind, lhs, rhs } => write!(f, "{kind} {lhs}, {rhs}"),
            Op::LoadField {
                field_name,
                field_index,
            } => write!(f, "load-field {field_name} @{field_index}"),
            Op::StoreField {
                value,
                field_name,
                field_index,
            } => write!(f, "store-field {value}, {field_name} @{field_index}"),
            Op::Return { value } => write!(f, "return {value}"),
        }
    }
}
