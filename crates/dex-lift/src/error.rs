#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no translation routine for operand layout of opcode {opcode:#04x} at {address:#06x}")]
    UnsupportedFormat { opcode: u16, address: u64 },

    #[error("unsupported opcode {opcode:#04x} at {address:#06x}")]
    UnsupportedOpcode { opcode: u16, address: u64 },

    #[error("unresolved field reference for opcode {opcode:#04x} at {address:#06x}")]
    UnresolvedField { opcode: u16, address: u64 },

    #[error("read of undefined register v{register}")]
    UndefinedRegister { register: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
