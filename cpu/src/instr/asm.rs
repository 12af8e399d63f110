// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Width of the mnemonic column.
const OP_NAME_WIDTH: usize = 4;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Asm {
    pub op_name: &'static str,
    pub operands: Vec<Operand>,
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            return f.write_str(self.op_name);
        }

        write!(
            f,
            "{:<width$} {}",
            self.op_name,
            self
                .operands
                .iter()
                .map(|operand| format!("{}", operand))
                .collect::<Vec<String>>()
                .join(", "),
            width = OP_NAME_WIDTH,
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operand {
    /// A register index, 0 through 15.
    Reg(u8),
    /// An 8-bit immediate.
    Byte(u8),
    /// A 12-bit address.
    Addr(u16),
    /// A 4-bit constant.
    Nibble(u8),
    /// A fixed operand such as `I` or `DT`.
    Text(&'static str),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(it) => {
                write!(f, "{}", it)
            }
            Self::Reg(it) => {
                write!(f, "V{:X}", it)
            }
            Self::Byte(it) => {
                write!(f, "{:02X}", it)
            }
            Self::Addr(it) => {
                write!(f, "{:03X}", it)
            }
            Self::Nibble(it) => {
                write!(f, "{:X}", it)
            }
        }
    }
}
