// SPDX-License-Identifier: MPL-2.0

use super::{a, none, opx::Kind, x, xk, xy, xyn, Instr};

bitfield::bitfield! {
    /// A raw 16-bit opcode, split into its nibble and byte fields.
    ///
    /// Opcodes are assembled big-endian: the first byte of an instruction word lands in bits 15-8.
    #[derive(Clone, Copy, Eq, PartialEq)]
    pub struct Opcode(u16);
    impl Debug;
    pub u8, class, _: 15, 12;
    pub u8, x, _: 11, 8;
    pub u8, y, _: 7, 4;
    pub u8, n, _: 3, 0;
    pub u8, kk, _: 7, 0;
    pub u16, nnn, _: 11, 0;
}

impl From<u16> for Opcode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> Self {
        op.0
    }
}

impl Instr {
    pub const CLS: u16 = 0x00e0;
    pub const RET: u16 = 0x00ee;

    /// Classifies `code` without extracting its operands.
    pub fn try_decode_op_kind(code: u16) -> Option<Kind> {
        // These two would otherwise decode as `SYS`.
        match code {
            Self::CLS => return Some(Kind::Cls),
            Self::RET => return Some(Kind::Ret),
            _ => {}
        }

        let op = Opcode(code);

        match op.class() {
            0x0 => Some(Kind::Sys),
            0x1 => Some(Kind::Jp),
            0x2 => Some(Kind::Call),
            0x3 => Some(Kind::SeByte),
            0x4 => Some(Kind::SneByte),
            0x5 => Kind::try_decode_reg_pair(op.n(), Kind::SeReg),
            0x6 => Some(Kind::LdByte),
            0x7 => Some(Kind::AddByte),
            0x8 => Kind::try_decode_alu(op.n()),
            0x9 => Kind::try_decode_reg_pair(op.n(), Kind::SneReg),
            0xa => Some(Kind::LdI),
            0xb => Some(Kind::JpV0),
            0xc => Some(Kind::Rnd),
            0xd => Some(Kind::Drw),
            0xe => Kind::try_decode_key(op.kk()),
            0xf => Kind::try_decode_misc(op.kk()),
            0x10.. => None,
        }
    }
}

impl Kind {
    /// `5xy0` and `9xy0` are only defined with a zero low nibble.
    pub fn try_decode_reg_pair(n: u8, kind: Self) -> Option<Self> {
        match n {
            0x0 => Some(kind),
            0x1.. => None,
        }
    }

    pub fn try_decode_alu(n: u8) -> Option<Self> {
        match n {
            0x0 => Some(Self::LdReg),
            0x1 => Some(Self::Or),
            0x2 => Some(Self::And),
            0x3 => Some(Self::Xor),
            0x4 => Some(Self::AddReg),
            0x5 => Some(Self::Sub),
            0x6 => Some(Self::Shr),
            0x7 => Some(Self::Subn),
            0x8..=0xd => None,
            0xe => Some(Self::Shl),
            0xf.. => None,
        }
    }

    pub fn try_decode_key(kk: u8) -> Option<Self> {
        match kk {
            0x9e => Some(Self::Skp),
            0xa1 => Some(Self::Sknp),
            _ => None,
        }
    }

    pub fn try_decode_misc(kk: u8) -> Option<Self> {
        match kk {
            0x07 => Some(Self::LdFromDt),
            0x0a => Some(Self::LdKey),
            0x15 => Some(Self::LdToDt),
            0x18 => Some(Self::LdToSt),
            0x1e => Some(Self::AddI),
            0x29 => Some(Self::LdSprite),
            0x33 => Some(Self::LdBcd),
            0x55 => Some(Self::Store),
            0x65 => Some(Self::Load),
            _ => None,
        }
    }
}

impl none::Instr {
    pub fn decode(_: Opcode) -> Self {
        Self
    }

    pub fn encode(self, base: u16) -> u16 {
        base
    }
}

impl a::Instr {
    pub fn decode(op: Opcode) -> Self {
        Self { nnn: op.nnn() }
    }

    pub fn encode(self, base: u16) -> u16 {
        base | self.nnn
    }
}

impl xk::Instr {
    pub fn decode(op: Opcode) -> Self {
        Self {
            x: op.x(),
            kk: op.kk(),
        }
    }

    pub fn encode(self, base: u16) -> u16 {
        base | (u16::from(self.x) << 8) | u16::from(self.kk)
    }
}

impl xy::Instr {
    pub fn decode(op: Opcode) -> Self {
        Self {
            x: op.x(),
            y: op.y(),
        }
    }

    pub fn encode(self, base: u16) -> u16 {
        base | (u16::from(self.x) << 8) | (u16::from(self.y) << 4)
    }
}

impl xyn::Instr {
    pub fn decode(op: Opcode) -> Self {
        Self {
            x: op.x(),
            y: op.y(),
            n: op.n(),
        }
    }

    pub fn encode(self, base: u16) -> u16 {
        base | (u16::from(self.x) << 8) | (u16::from(self.y) << 4) | u16::from(self.n)
    }
}

impl x::Instr {
    pub fn decode(op: Opcode) -> Self {
        Self { x: op.x() }
    }

    pub fn encode(self, base: u16) -> u16 {
        base | (u16::from(self.x) << 8)
    }
}
