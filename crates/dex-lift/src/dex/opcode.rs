use strum::FromRepr;

/// Supported Dalvik opcodes, with their raw encoding values.
///
/// The decoder hands over raw `u16` opcodes; `Opcode::from_repr` is the gate
/// between "any number the bytecode contains" and "an opcode this lifter
/// understands". Anything that fails the gate is rejected by the caller with
/// the raw value preserved for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u16)]
pub enum Opcode {
    Move = 0x01,
    MoveWide = 0x04,
    MoveObject = 0x07,
    Return = 0x0f,
    ReturnWide = 0x10,
    ReturnObject = 0x11,
    // Instance field access, narrow primitive variants (format 22c)
    IgetBoolean = 0x55,
    IgetByte = 0x56,
    IgetChar = 0x57,
    IgetShort = 0x58,
    IputBoolean = 0x5c,
    IputByte = 0x5d,
    IputChar = 0x5e,
    IputShort = 0x5f,
    // Three-register binary arithmetic (format 23x), int siblings
    AddInt = 0x90,
    SubInt = 0x91,
    MulInt = 0x92,
    DivInt = 0x93,
    RemInt = 0x94,
    AndInt = 0x95,
    OrInt = 0x96,
    XorInt = 0x97,
    ShlInt = 0x98,
    ShrInt = 0x99,
    UshrInt = 0x9a,
    // long siblings
    AddLong = 0x9b,
    SubLong = 0x9c,
    MulLong = 0x9d,
    DivLong = 0x9e,
    RemLong = 0x9f,
    AndLong = 0xa0,
    OrLong = 0xa1,
    XorLong = 0xa2,
    ShlLong = 0xa3,
    ShrLong = 0xa4,
    UshrLong = 0xa5,
    // float/double siblings (bitwise ops have none; undefined over floats)
    AddFloat = 0xa6,
    SubFloat = 0xa7,
    MulFloat = 0xa8,
    DivFloat = 0xa9,
    RemFloat = 0xaa,
    AddDouble = 0xab,
    SubDouble = 0xac,
    MulDouble = 0xad,
    DivDouble = 0xae,
    RemDouble = 0xaf,
    // Two-register accumulate forms (format 12x): dest = dest op src
    AddInt2addr = 0xb0,
    SubInt2addr = 0xb1,
    MulInt2addr = 0xb2,
    DivInt2addr = 0xb3,
    RemInt2addr = 0xb4,
    AndInt2addr = 0xb5,
    OrInt2addr = 0xb6,
    XorInt2addr = 0xb7,
    ShlInt2addr = 0xb8,
    ShrInt2addr = 0xb9,
    UshrInt2addr = 0xba,
    AddLong2addr = 0xbb,
    SubLong2addr = 0xbc,
    MulLong2addr = 0xbd,
    DivLong2addr = 0xbe,
    RemLong2addr = 0xbf,
    AndLong2addr = 0xc0,
    OrLong2addr = 0xc1,
    XorLong2addr = 0xc2,
    ShlLong2addr = 0xc3,
    ShrLong2addr = 0xc4,
    UshrLong2addr = 0xc5,
    AddFloat2addr = 0xc6,
    SubFloat2addr = 0xc7,
    MulFloat2addr = 0xc8,
    DivFloat2addr = 0xc9,
    RemFloat2addr = 0xca,
    AddDouble2addr = 0xcb,
    SubDouble2addr = 0xcc,
    MulDouble2addr = 0xcd,
    DivDouble2addr = 0xce,
    RemDouble2addr = 0xcf,
}

impl Opcode {
    /// Whether this opcode ends its basic block.
    #[must_use]
    pub const fn is_terminator(self) -> bool {
        matches!(self, Self::Return | Self::ReturnWide | Self::ReturnObject)
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> Self {
        opcode as Self
    }
}
