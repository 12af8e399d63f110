// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opcode decoding for a 16-bit fixed-width instruction set with sixteen 8-bit registers
//! (`V0`-`VF`), an index register `I`, and delay/sound timers.
//!
//! Decoding is a pure function of the opcode: [`Instr::decode`] either yields exactly one
//! instruction form or nothing at all.

pub mod instr;

pub use instr::{disassemble, Asm, Illegal, Instr, Opcode};
