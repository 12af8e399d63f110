// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use chipdis::{Config, Format, IllegalPolicy, Image, Listing};
use clap::Parser;

/// Disassembles a program image of 16-bit big-endian opcodes.
#[derive(Parser)]
#[command(name = "chipdis")]
struct Cli {
    /// The program image to disassemble.
    file: PathBuf,
    /// Mark illegal opcodes with `???` instead of stopping at the first one.
    #[arg(short, long)]
    keep_going: bool,
    /// Show addresses, raw bytes and ASCII next to each instruction.
    #[arg(short, long)]
    dump: bool,
    /// The load address of the image, in hex.
    #[arg(long, default_value = "200", value_parser = parse_hex_u16)]
    origin: u16,
    /// The largest accepted image, in bytes.
    #[arg(long, default_value_t = Config::DEFAULT_MAX_IMAGE_SIZE)]
    max_size: usize,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            max_image_size: self.max_size,
            origin: self.origin,
            on_illegal: if self.keep_going {
                IllegalPolicy::Continue
            } else {
                IllegalPolicy::Abort
            },
            format: if self.dump { Format::Dump } else { Format::Plain },
        }
    }

    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            3.. => tracing::Level::TRACE,
        }
    }
}

fn parse_hex_u16(s: &str) -> Result<u16, std::num::ParseIntError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    u16::from_str_radix(digits, 16)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    chipdis::log::init(cli.log_level());

    let config = cli.config();
    tracing::debug!("{:?}", config);

    let image = Image::open(&cli.file, &config)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = Listing::new(&config)
        .write(&image, &mut out)
        .with_context(|| format!("Failed to disassemble {}", cli.file.display()))?;
    out.flush().context("Failed to flush stdout")?;

    if summary.illegal > 0 {
        tracing::info!("Skipped {} illegal opcodes", summary.illegal);
    }

    Ok(())
}
