// SPDX-License-Identifier: MPL-2.0

pub mod asm;
pub mod decode;

use std::fmt;

pub use asm::Asm;
pub use decode::Opcode;

pub mod none {
    /// An instruction without operands.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr;
}

pub mod a {
    /// An instruction whose only operand is a 12-bit address.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr {
        /// The *nnn* operand.
        pub nnn: u16,
    }
}

pub mod xk {
    /// An instruction taking a register and an 8-bit immediate.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr {
        /// The *x* register index.
        pub x: u8,
        /// The *kk* operand.
        pub kk: u8,
    }
}

pub mod xy {
    /// An instruction taking two registers.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr {
        /// The *x* register index.
        ///
        /// This is commonly used as a destination register.
        pub x: u8,
        /// The *y* register index.
        pub y: u8,
    }
}

pub mod xyn {
    /// An instruction taking two registers and a 4-bit constant.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr {
        /// The *x* register index.
        pub x: u8,
        /// The *y* register index.
        pub y: u8,
        /// The *n* operand.
        pub n: u8,
    }
}

pub mod x {
    /// An instruction taking a single register.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Instr {
        /// The *x* register index.
        pub x: u8,
    }
}

/// Decodes `code` and renders it as assembly.
pub fn disassemble(code: u16) -> Result<Asm, Illegal> {
    match Instr::decode(code) {
        Some(instr) => Ok(instr.asm()),
        None => {
            tracing::trace!("No instruction form matches {:04X}", code);

            Err(Illegal(code))
        }
    }
}

/// An opcode that matches no instruction form.
///
/// This is not exceptional: program images routinely interleave sprite data and other non-code
/// bytes with instructions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Illegal(pub u16);

impl fmt::Display for Illegal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal opcode: {:04X}", self.0)
    }
}

impl std::error::Error for Illegal {}

macro_rules! parse_operand {
    ($src:expr, %($field:tt)) => {
        asm::Operand::Reg($src.$field)
    };
    ($src:expr, #($field:tt)) => {
        asm::Operand::Byte($src.$field)
    };
    ($src:expr, *($field:tt)) => {
        asm::Operand::Addr($src.$field)
    };
    ($src:expr, ^($field:tt)) => {
        asm::Operand::Nibble($src.$field)
    };
    ($src:expr, @($text:literal)) => {
        asm::Operand::Text($text)
    };
}

macro_rules! def_instr_and_op_kind {
    (
        $(
            {
                name: $variant_name:tt,
                type: $ty:tt,
                base: $base:literal,
                asm: [
                    $display_name:literal
                    $(
                        $kind:tt($($arg:tt)?)
                    ),* $(,)?
                ] $(,)?
            } $(,)?
        ),*
    ) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub enum Instr {
            $(
                $variant_name($ty::Instr),
            )*
        }

        impl Instr {
            pub fn decode(code: u16) -> Option<Self> {
                let op = Opcode::from(code);

                match Self::try_decode_op_kind(code)? {
                    $(
                        opx::Kind::$variant_name => {
                            Some(Self::$variant_name($ty::Instr::decode(op)))
                        }
                    )*
                }
            }

            /// Packs this instruction back into its 16-bit opcode.
            pub fn encode(self) -> u16 {
                match self {
                    $(
                        Self::$variant_name(inner) => inner.encode($base),
                    )*
                }
            }

            pub fn kind(&self) -> opx::Kind {
                match self {
                    $(
                        Self::$variant_name(_) => opx::Kind::$variant_name,
                    )*
                }
            }

            pub fn asm(&self) -> Asm {
                match *self {
                    $(
                        #[allow(unused_variables)]
                        Self::$variant_name(inner) => {
                            Asm {
                                op_name: $display_name,
                                operands: vec![
                                    $(
                                        parse_operand!(inner, $kind($($arg)?))
                                    ),*
                                ],
                            }
                        }
                    )*
                }
            }
        }

        pub mod opx {
            //! Operations.

            use std::fmt;

            #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
            pub enum Kind {
                $(
                    $variant_name,
                )*
            }

            impl Kind {
                /// Every operation, in table order.
                pub const ALL: &'static [Kind] = &[
                    $(
                        Kind::$variant_name,
                    )*
                ];

                /// The assembly mnemonic of this operation.
                pub fn mnemonic(self) -> &'static str {
                    match self {
                        $(
                            Self::$variant_name => $display_name,
                        )*
                    }
                }
            }

            impl fmt::Display for Kind {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    match self {
                        $(
                            Self::$variant_name => {
                                f.write_str(stringify!($variant_name))
                            }
                        )*
                    }
                }
            }
        }
    };
}

// Variants are named after the conventional mnemonic, suffixed by operand shape where one mnemonic
// covers several encodings (e.g. `SeByte` is `3xkk`, `SeReg` is `5xy0`).
def_instr_and_op_kind!(
    {
        name: Cls,
        type: none,
        base: 0x00e0,
        asm: ["CLS"],
    },
    {
        name: Ret,
        type: none,
        base: 0x00ee,
        asm: ["RET"],
    },
    {
        name: Sys,
        type: a,
        base: 0x0000,
        asm: ["SYS" *(nnn)],
    },
    {
        name: Jp,
        type: a,
        base: 0x1000,
        asm: ["JP" *(nnn)],
    },
    {
        name: Call,
        type: a,
        base: 0x2000,
        asm: ["CALL" *(nnn)],
    },
    {
        name: SeByte,
        type: xk,
        base: 0x3000,
        asm: ["SE" %(x), #(kk)],
    },
    {
        name: SneByte,
        type: xk,
        base: 0x4000,
        asm: ["SNE" %(x), #(kk)],
    },
    {
        name: SeReg,
        type: xy,
        base: 0x5000,
        asm: ["SE" %(x), %(y)],
    },
    {
        name: LdByte,
        type: xk,
        base: 0x6000,
        asm: ["LD" %(x), #(kk)],
    },
    {
        name: AddByte,
        type: xk,
        base: 0x7000,
        asm: ["ADD" %(x), #(kk)],
    },
    {
        name: LdReg,
        type: xy,
        base: 0x8000,
        asm: ["LD" %(x), %(y)],
    },
    {
        name: Or,
        type: xy,
        base: 0x8001,
        asm: ["OR" %(x), %(y)],
    },
    {
        name: And,
        type: xy,
        base: 0x8002,
        asm: ["AND" %(x), %(y)],
    },
    {
        name: Xor,
        type: xy,
        base: 0x8003,
        asm: ["XOR" %(x), %(y)],
    },
    {
        name: AddReg,
        type: xy,
        base: 0x8004,
        asm: ["ADD" %(x), %(y)],
    },
    {
        name: Sub,
        type: xy,
        base: 0x8005,
        asm: ["SUB" %(x), %(y)],
    },
    {
        name: Shr,
        type: xy,
        base: 0x8006,
        asm: ["SHR" %(x), %(y)],
    },
    {
        name: Subn,
        type: xy,
        base: 0x8007,
        asm: ["SUBN" %(x), %(y)],
    },
    {
        name: Shl,
        type: xy,
        base: 0x800e,
        asm: ["SHL" %(x), %(y)],
    },
    {
        name: SneReg,
        type: xy,
        base: 0x9000,
        asm: ["SNE" %(x), %(y)],
    },
    {
        name: LdI,
        type: a,
        base: 0xa000,
        asm: ["LD" @("I"), *(nnn)],
    },
    {
        name: JpV0,
        type: a,
        base: 0xb000,
        asm: ["JP" @("V0"), *(nnn)],
    },
    {
        name: Rnd,
        type: xk,
        base: 0xc000,
        asm: ["RND" %(x), #(kk)],
    },
    {
        name: Drw,
        type: xyn,
        base: 0xd000,
        asm: ["DRW" %(x), %(y), ^(n)],
    },
    {
        name: Skp,
        type: x,
        base: 0xe09e,
        asm: ["SKP" %(x)],
    },
    {
        name: Sknp,
        type: x,
        base: 0xe0a1,
        asm: ["SKNP" %(x)],
    },
    {
        name: LdFromDt,
        type: x,
        base: 0xf007,
        asm: ["LD" %(x), @("DT")],
    },
    {
        name: LdKey,
        type: x,
        base: 0xf00a,
        asm: ["LD" %(x), @("K")],
    },
    {
        name: LdToDt,
        type: x,
        base: 0xf015,
        asm: ["LD" @("DT"), %(x)],
    },
    {
        name: LdToSt,
        type: x,
        base: 0xf018,
        asm: ["LD" @("ST"), %(x)],
    },
    {
        name: AddI,
        type: x,
        base: 0xf01e,
        asm: ["ADD" @("I"), %(x)],
    },
    {
        name: LdSprite,
        type: x,
        base: 0xf029,
        asm: ["LD" @("F"), %(x)],
    },
    {
        name: LdBcd,
        type: x,
        base: 0xf033,
        asm: ["LD" @("B"), %(x)],
    },
    {
        name: Store,
        type: x,
        base: 0xf055,
        asm: ["LD" @("[I]"), %(x)],
    },
    {
        name: Load,
        type: x,
        base: 0xf065,
        asm: ["LD" %(x), @("[I]")],
    },
);

#[cfg(test)]
mod tests {
    use super::*;

    fn text(code: u16) -> Option<String> {
        disassemble(code).ok().map(|asm| asm.to_string())
    }

    #[test]
    fn literals_take_precedence() {
        assert_eq!(Instr::decode(0x00e0), Some(Instr::Cls(none::Instr)));
        assert_eq!(Instr::decode(0x00ee), Some(Instr::Ret(none::Instr)));
        assert_eq!(text(0x00e0).as_deref(), Some("CLS"));
        assert_eq!(text(0x00ee).as_deref(), Some("RET"));

        // Neighbours of the literals fall back to `SYS`.
        assert_eq!(text(0x00e1).as_deref(), Some("SYS  0E1"));
        assert_eq!(text(0x00ef).as_deref(), Some("SYS  0EF"));
        assert_eq!(text(0x0000).as_deref(), Some("SYS  000"));
    }

    #[test]
    fn extracts_fields() {
        assert_eq!(
            Instr::decode(0x3a45),
            Some(Instr::SeByte(xk::Instr { x: 0xa, kk: 0x45 })),
        );
        assert_eq!(
            Instr::decode(0x8ab7),
            Some(Instr::Subn(xy::Instr { x: 0xa, y: 0xb })),
        );
        assert_eq!(
            Instr::decode(0xdab2),
            Some(Instr::Drw(xyn::Instr { x: 0xa, y: 0xb, n: 0x2 })),
        );
        assert_eq!(
            Instr::decode(0xb123),
            Some(Instr::JpV0(a::Instr { nnn: 0x123 })),
        );
        assert_eq!(Instr::decode(0xf565), Some(Instr::Load(x::Instr { x: 5 })));
    }

    #[test]
    fn renders_text() {
        let cases: &[(u16, &str)] = &[
            (0x1234, "JP   234"),
            (0x2fff, "CALL FFF"),
            (0x3a45, "SE   VA, 45"),
            (0x4b0c, "SNE  VB, 0C"),
            (0x5120, "SE   V1, V2"),
            (0x6e01, "LD   VE, 01"),
            (0x7fff, "ADD  VF, FF"),
            (0x8010, "LD   V0, V1"),
            (0x8231, "OR   V2, V3"),
            (0x8232, "AND  V2, V3"),
            (0x8233, "XOR  V2, V3"),
            (0x8234, "ADD  V2, V3"),
            (0x8235, "SUB  V2, V3"),
            (0x8236, "SHR  V2, V3"),
            (0x8ab7, "SUBN VA, VB"),
            (0x823e, "SHL  V2, V3"),
            (0x9ab0, "SNE  VA, VB"),
            (0xa00f, "LD   I, 00F"),
            (0xb300, "JP   V0, 300"),
            (0xc7aa, "RND  V7, AA"),
            (0xdab2, "DRW  VA, VB, 2"),
            (0xe19e, "SKP  V1"),
            (0xe2a1, "SKNP V2"),
            (0xf307, "LD   V3, DT"),
            (0xf40a, "LD   V4, K"),
            (0xf515, "LD   DT, V5"),
            (0xf618, "LD   ST, V6"),
            (0xf71e, "ADD  I, V7"),
            (0xf829, "LD   F, V8"),
            (0xf933, "LD   B, V9"),
            (0xfa55, "LD   [I], VA"),
            (0xfb65, "LD   VB, [I]"),
        ];

        for (code, expected) in cases {
            assert_eq!(text(*code).as_deref(), Some(*expected), "opcode {:04X}", code);
        }
    }

    #[test]
    fn rejects_gaps() {
        for code in [0x8ab8, 0x8ab9, 0x8abd, 0x8abf, 0x5121, 0x912f, 0xe000, 0xe19f, 0xf000, 0xf0ff] {
            assert_eq!(disassemble(code), Err(Illegal(code)), "opcode {:04X}", code);
        }
    }

    #[test]
    fn illegal_displays_opcode() {
        assert_eq!(Illegal(0xffff).to_string(), "illegal opcode: FFFF");
        assert_eq!(Illegal(0x0a).to_string(), "illegal opcode: 000A");
    }

    #[test]
    fn decode_is_total() {
        let legal = (0..=u16::MAX)
            .filter(|code| Instr::decode(*code).is_some())
            .count();

        // 11 families of 4096 opcodes, 5xy0 and 9xy0 at 256 each, nine 8xy_ forms, the two Ex__
        // forms and the nine Fx__ forms.
        assert_eq!(legal, 11 * 4096 + 2 * 256 + 9 * 256 + 2 * 16 + 9 * 16);
    }

    #[test]
    fn encode_inverts_decode() {
        for code in 0..=u16::MAX {
            if let Some(instr) = Instr::decode(code) {
                assert_eq!(instr.encode(), code, "{:?}", instr);
                assert_eq!(Instr::decode(instr.encode()), Some(instr));
            }
        }
    }

    #[test]
    fn every_kind_is_reachable() {
        let mut seen = std::collections::HashSet::new();
        for code in 0..=u16::MAX {
            if let Some(instr) = Instr::decode(code) {
                seen.insert(instr.kind());
            }
        }

        assert_eq!(seen.len(), opx::Kind::ALL.len());
    }

    #[test]
    fn decode_is_pure() {
        for _ in 0..4096 {
            let code: u16 = rand::random();
            assert_eq!(disassemble(code), disassemble(code));
            assert_eq!(Instr::decode(code), Instr::decode(code));
        }
    }

    #[test]
    fn hex_fields_round_trip() {
        for code in 0..=u16::MAX {
            let Some(instr) = Instr::decode(code) else {
                continue;
            };

            let asm = instr.asm();
            let rendered = asm.to_string();
            let fields = rendered
                .get(asm.op_name.len()..)
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|it| !it.is_empty());

            for (field, operand) in fields.zip(asm.operands.iter()) {
                let parsed = |digits: &str| u16::from_str_radix(digits, 16).unwrap();
                match operand {
                    asm::Operand::Reg(it) => {
                        assert_eq!(parsed(field.trim_start_matches('V')), u16::from(*it));
                    }
                    asm::Operand::Byte(it) => assert_eq!(parsed(field), u16::from(*it)),
                    asm::Operand::Addr(it) => assert_eq!(parsed(field), *it),
                    asm::Operand::Nibble(it) => assert_eq!(parsed(field), u16::from(*it)),
                    asm::Operand::Text(it) => assert_eq!(field, *it),
                }
            }
        }
    }
}
