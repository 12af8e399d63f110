// SPDX-License-Identifier: MPL-2.0

use std::{fs, io::Read, path::Path};

use crate::{Config, Error};

impl Image {
    /// Reads an entire image from `reader`.
    ///
    /// The image must hold a whole number of 2-byte instruction words and must fit both below
    /// [`Config::max_image_size`] and, starting at [`Config::origin`], within the 16-bit address
    /// space.
    pub fn from_reader(reader: impl Read, config: &Config) -> Result<Self, Error> {
        let max = config
            .max_image_size
            .min(0x1_0000 - usize::from(config.origin));

        // Read one byte past the limit so that oversized images can be told apart from images
        // which are exactly at the limit.
        let mut data = Vec::with_capacity(max.min(Config::DEFAULT_MAX_IMAGE_SIZE) + 1);
        let len = reader.take(max as u64 + 1).read_to_end(&mut data)?;
        tracing::debug!("Read {} bytes (limit={})", len, max);

        if len > max {
            return Err(Error::ImageTooLarge { max });
        }
        if len % 2 == 1 {
            return Err(Error::OddLength(len));
        }

        Ok(Self { origin: config.origin, data })
    }

    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Opening image {}", path.display());

        Self::from_reader(fs::File::open(path)?, config)
    }
}

/// A program image, as loaded into memory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    origin: u16,
    data: Vec<u8>,
}

impl Image {
    pub fn origin(&self) -> u16 {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// The instruction words of this image in program order, with their addresses.
    pub fn words(&self) -> impl '_ + Iterator<Item = (u16, [u8; 2])> {
        self.data
            .chunks_exact(2)
            .enumerate()
            .map(move |(i, word)| {
                // `from_reader` guarantees that every address fits in 16 bits.
                let addr = self.origin.wrapping_add((i * 2) as u16);

                (addr, [word[0], word[1]])
            })
    }

    /// The opcodes of this image in program order, with their addresses.
    pub fn opcodes(&self) -> impl '_ + Iterator<Item = (u16, u16)> {
        self.words().map(|(addr, word)| (addr, u16::from_be_bytes(word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(bytes: &[u8], config: &Config) -> Result<Image, Error> {
        Image::from_reader(bytes, config)
    }

    #[test]
    fn assembles_big_endian_opcodes() {
        let image = load(&[0x00, 0xe0, 0x12, 0x34, 0xff, 0xff], &Config::default()).unwrap();

        assert_eq!(image.len(), 6);
        assert_eq!(
            image.opcodes().collect::<Vec<_>>(),
            [(0x200, 0x00e0), (0x202, 0x1234), (0x204, 0xffff)],
        );
    }

    #[test]
    fn honors_origin() {
        let config = Config { origin: 0x600, ..Config::default() };
        let image = load(&[0xa2, 0x2a, 0x60, 0x0c], &config).unwrap();

        assert_eq!(
            image.opcodes().collect::<Vec<_>>(),
            [(0x600, 0xa22a), (0x602, 0x600c)],
        );
    }

    #[test]
    fn accepts_empty_image() {
        let image = load(&[], &Config::default()).unwrap();

        assert!(image.is_empty());
        assert_eq!(image.opcodes().count(), 0);
    }

    #[test]
    fn rejects_odd_length() {
        assert!(matches!(
            load(&[0x00, 0xe0, 0x12], &Config::default()),
            Err(Error::OddLength(3)),
        ));
    }

    #[test]
    fn enforces_size_limit() {
        let config = Config { max_image_size: 4, ..Config::default() };

        assert!(load(&[0; 4], &config).is_ok());
        assert!(matches!(
            load(&[0; 6], &config),
            Err(Error::ImageTooLarge { max: 4 }),
        ));
    }

    #[test]
    fn keeps_addresses_in_range() {
        let config = Config {
            max_image_size: usize::MAX,
            origin: 0xfffc,
            ..Config::default()
        };

        assert!(load(&[0; 4], &config).is_ok());
        assert!(matches!(
            load(&[0; 6], &config),
            Err(Error::ImageTooLarge { max: 4 }),
        ));
    }
}
