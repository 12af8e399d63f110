// SPDX-License-Identifier: MPL-2.0

//! Turning an [`Image`] into a textual listing.

use std::io;

use chipdis_cpu::{disassemble, Asm, Illegal};

use crate::{Config, Error, Format, IllegalPolicy, Image};

/// Marks an opcode that matched no instruction form.
pub const ILLEGAL_MARKER: &str = "???";

/// One decoded instruction word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    /// The address of the first byte of this word.
    pub addr: u16,
    pub code: u16,
    pub asm: Result<Asm, Illegal>,
}

/// Counts of the words written by [`Listing::write`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub decoded: usize,
    pub illegal: usize,
}

impl<'c> Listing<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }
}

pub struct Listing<'c> {
    config: &'c Config,
}

impl Listing<'_> {
    /// Decodes every word of `image`, in program order.
    pub fn lines<'i>(&self, image: &'i Image) -> impl 'i + Iterator<Item = Line> {
        image.opcodes().map(|(addr, code)| Line {
            addr,
            code,
            asm: disassemble(code),
        })
    }

    /// Writes a header followed by one line per instruction word of `image`.
    ///
    /// Under [`IllegalPolicy::Abort`], lines preceding the first illegal opcode have already been
    /// written when the error is returned.
    pub fn write(&self, image: &Image, mut w: impl io::Write) -> Result<Summary, Error> {
        let mut summary = Summary::default();

        writeln!(w, "Read: {} bytes", image.len())?;

        for (line, (_, bytes)) in self.lines(image).zip(image.words()) {
            let text = match &line.asm {
                Ok(asm) => {
                    summary.decoded += 1;
                    tracing::trace!("{:04X}: {}", line.addr, asm);

                    asm.to_string()
                }
                Err(e) => match self.config.on_illegal {
                    IllegalPolicy::Abort => {
                        return Err(Error::IllegalOpcode {
                            addr: line.addr,
                            code: e.0,
                        });
                    }
                    IllegalPolicy::Continue => {
                        summary.illegal += 1;
                        tracing::warn!("{} (at {:04X})", e, line.addr);

                        String::from(ILLEGAL_MARKER)
                    }
                },
            };

            match self.config.format {
                Format::Plain => {
                    writeln!(w, "{:04X}\t{}", line.code, text)?;
                }
                Format::Dump => {
                    chipdis_util::dump_hex(&mut w, line.addr, bytes)?;
                    writeln!(w, "   {}", text)?;
                }
            }
        }

        tracing::debug!(
            "Listed {} words ({} decoded, {} illegal)",
            summary.decoded + summary.illegal,
            summary.decoded,
            summary.illegal,
        );

        Ok(summary)
    }
}
