// SPDX-License-Identifier: MPL-2.0

//! Disassembler settings.

/// What to do when an opcode matches no instruction form.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IllegalPolicy {
    /// Stop at the first illegal opcode and report it as an error.
    #[default]
    Abort,
    /// Mark the opcode in the listing, log a warning and keep going.
    Continue,
}

/// The layout of each listing line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// The opcode followed by a tab and the assembly text.
    #[default]
    Plain,
    /// Address, raw bytes and their ASCII rendering, followed by the assembly text.
    Dump,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The largest image, in bytes, that will be accepted.
    pub max_image_size: usize,
    /// The address at which the first byte of the image is loaded.
    pub origin: u16,
    pub on_illegal: IllegalPolicy,
    pub format: Format,
}

impl Config {
    /// The size limit historically imposed on program images.
    pub const DEFAULT_MAX_IMAGE_SIZE: usize = 4096;
    /// Programs are conventionally loaded past the interpreter's reserved area.
    pub const DEFAULT_ORIGIN: u16 = 0x200;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_image_size: Self::DEFAULT_MAX_IMAGE_SIZE,
            origin: Self::DEFAULT_ORIGIN,
            on_illegal: IllegalPolicy::default(),
            format: Format::default(),
        }
    }
}
