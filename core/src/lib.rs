// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod config;
pub mod image;
pub mod listing;
pub mod log;

use std::{fmt, io};

pub use chipdis_cpu as cpu;
pub use config::{Config, Format, IllegalPolicy};
pub use image::Image;
pub use listing::{Line, Listing, Summary};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// The image does not hold a whole number of instruction words.
    OddLength(usize),
    /// The image does not fit below the configured size limit or the 16-bit address space.
    ImageTooLarge { max: usize },
    /// An opcode matched no instruction form while [`IllegalPolicy::Abort`] was in effect.
    IllegalOpcode { addr: u16, code: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read: {}", e),
            Self::OddLength(len) => write!(f, "corrupt file: odd length of {} bytes", len),
            Self::ImageTooLarge { max } => write!(f, "image exceeds {} bytes", max),
            Self::IllegalOpcode { addr, code } => {
                write!(f, "illegal opcode: {:04X} (at {:04X})", code, addr)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
