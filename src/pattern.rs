//! Pattern notation parsing and the `Pattern` record.
//!
//! Patterns are written as printable ASCII with optional hex-escape
//! regions: `GET|20|`, `|16 03 00|`, `|ff|SMB`. A `|` opens a hex-escape
//! region; inside it, pairs of hex digits separated by whitespace encode
//! raw bytes; a second `|` closes the region. Outside hex regions,
//! characters contribute their ASCII byte.

use crate::error::DetectError;
use std::fmt;

/// Which endpoint is sending: `to_server` (initiator → responder) or
/// `to_client` (responder → initiator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the connection initiator to the responder.
    ToServer,
    /// From the responder to the connection initiator.
    ToClient,
}

impl Direction {
    /// Both directions, for callers registering a pattern against either side.
    pub const BOTH: [Direction; 2] = [Direction::ToServer, Direction::ToClient];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToServer => write!(f, "to_server"),
            Direction::ToClient => write!(f, "to_client"),
        }
    }
}

/// Transport-layer protocol a signature is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpProto {
    /// TCP
    Tcp,
    /// UDP
    Udp,
}

impl fmt::Display for IpProto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpProto::Tcp => write!(f, "tcp"),
            IpProto::Udp => write!(f, "udp"),
        }
    }
}

/// Case sensitivity for a registered pattern. Case-insensitive patterns
/// are a distinct class from case-sensitive ones for interning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFlags {
    /// Exact byte match (default).
    CaseSensitive,
    /// ASCII case-insensitive match.
    NoCase,
}

/// A fixed byte string with a position window `[offset, depth)` in which
/// it must occur, interned to a dense pattern-id.
///
/// Maximum content length is 64 bytes; offset and depth fit in `u16`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Raw content bytes (after hex-escape parsing).
    pub content: Vec<u8>,
    /// Offset into the buffer the content must occur at or after.
    pub offset: u16,
    /// Upper bound (exclusive-from-start) on where the content may end.
    pub depth: u16,
    /// Case sensitivity.
    pub flags: PatternFlags,
    /// Dense interned identifier, stable for the context's lifetime.
    pub id: u32,
}

/// Maximum content length accepted for a single pattern.
pub const MAX_PATTERN_LEN: usize = 64;

/// Parses pattern notation (printable ASCII plus `|HH HH|` hex escapes)
/// into raw content bytes.
///
/// # Errors
///
/// Returns [`DetectError::InvalidPattern`] for an empty pattern, an
/// unclosed hex-escape region, a non-hex-digit inside one, or content
/// longer than [`MAX_PATTERN_LEN`].
pub fn parse_pattern_notation(notation: &str) -> Result<Vec<u8>, DetectError> {
    let mut content = Vec::new();
    let mut chars = notation.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '|' {
            loop {
                // Skip whitespace between hex pairs.
                while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                    chars.next();
                }
                match chars.peek() {
                    Some('|') => {
                        chars.next();
                        break;
                    }
                    None => {
                        return Err(DetectError::InvalidPattern(format!(
                            "unclosed hex-escape region in pattern {:?}",
                            notation
                        )));
                    }
                    _ => {
                        let hi = chars.next().unwrap();
                        let lo = chars.next().ok_or_else(|| {
                            DetectError::InvalidPattern(format!(
                                "odd number of hex digits in pattern {:?}",
                                notation
                            ))
                        })?;
                        let byte = u8::from_str_radix(&format!("{hi}{lo}"), 16).map_err(|_| {
                            DetectError::InvalidPattern(format!(
                                "invalid hex digits {:?}{:?} in pattern {:?}",
                                hi, lo, notation
                            ))
                        })?;
                        content.push(byte);
                    }
                }
            }
        } else {
            let mut buf = [0u8; 4];
            content.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
    }

    if content.is_empty() {
        return Err(DetectError::InvalidPattern(format!(
            "empty pattern {:?}",
            notation
        )));
    }
    if content.len() > MAX_PATTERN_LEN {
        return Err(DetectError::InvalidPattern(format!(
            "pattern {:?} content is {} bytes, exceeds max {}",
            notation,
            content.len(),
            MAX_PATTERN_LEN
        )));
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii() {
        assert_eq!(parse_pattern_notation("GET").unwrap(), b"GET".to_vec());
    }

    #[test]
    fn trailing_hex_escape() {
        assert_eq!(parse_pattern_notation("GET|20|").unwrap(), b"GET ".to_vec());
    }

    #[test]
    fn pure_hex() {
        assert_eq!(
            parse_pattern_notation("|16 03 00|").unwrap(),
            vec![0x16, 0x03, 0x00]
        );
    }

    #[test]
    fn leading_hex_with_ascii_suffix() {
        assert_eq!(
            parse_pattern_notation("|ff|SMB").unwrap(),
            vec![0xff, b'S', b'M', b'B']
        );
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            parse_pattern_notation(""),
            Err(DetectError::InvalidPattern(_))
        ));
    }

    #[test]
    fn unclosed_hex_rejected() {
        assert!(matches!(
            parse_pattern_notation("|20"),
            Err(DetectError::InvalidPattern(_))
        ));
    }

    #[test]
    fn odd_hex_digits_rejected() {
        assert!(matches!(
            parse_pattern_notation("|2|"),
            Err(DetectError::InvalidPattern(_))
        ));
    }

    #[test]
    fn too_long_rejected() {
        let notation = "A".repeat(MAX_PATTERN_LEN + 1);
        assert!(matches!(
            parse_pattern_notation(&notation),
            Err(DetectError::InvalidPattern(_))
        ));
    }
}
