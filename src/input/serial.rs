//! Serial console command decoding.
//!
//! With `use_serial_control` enabled, single bytes arriving on the
//! console act as remote input: `w`/`s` scroll, `e` confirms, `q`
//! cancels. Everything else is discarded.

use crate::input::Command;

/// Decode one received byte into a remote command.
pub fn decode_command(byte: u8) -> Option<Command> {
    match byte {
        b'w' => Some(Command::ScrollUp),
        b's' => Some(Command::ScrollDown),
        b'e' => Some(Command::Confirm),
        b'q' => Some(Command::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bytes_map_to_commands() {
        assert_eq!(decode_command(b'w'), Some(Command::ScrollUp));
        assert_eq!(decode_command(b's'), Some(Command::ScrollDown));
        assert_eq!(decode_command(b'e'), Some(Command::Confirm));
        assert_eq!(decode_command(b'q'), Some(Command::Cancel));
    }

    #[test]
    fn other_bytes_are_discarded() {
        assert_eq!(decode_command(b'x'), None);
        assert_eq!(decode_command(0), None);
        assert_eq!(decode_command(b'\n'), None);
    }
}
