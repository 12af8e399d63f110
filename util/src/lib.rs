// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io;

/// Writes `addr`, the raw `bytes` of one instruction word and their printable ASCII rendering.
///
/// Non-graphic bytes are shown as `.`.
pub fn dump_hex(w: &mut impl io::Write, addr: u16, bytes: [u8; 2]) -> io::Result<()> {
    write!(
        w,
        "{:04X}   {}   {}",
        addr,
        bytes
            .iter()
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<String>>()
            .join(" "),
        bytes
            .iter()
            .map(|byte| {
                if byte.is_ascii_graphic() {
                    char::from(*byte)
                } else {
                    '.'
                }
            })
            .collect::<String>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(addr: u16, bytes: [u8; 2]) -> String {
        let mut buf = Vec::new();
        dump_hex(&mut buf, addr, bytes).unwrap();

        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn dumps_printable_bytes() {
        assert_eq!(dump(0x200, [b'O', b'K']), "0200   4F 4B   OK");
    }

    #[test]
    fn masks_control_bytes() {
        assert_eq!(dump(0xffe, [0x00, 0xe0]), "0FFE   00 E0   ..");
        assert_eq!(dump(0x202, [b' ', 0x7f]), "0202   20 7F   ..");
    }
}
