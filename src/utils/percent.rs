/// Percent-decoding and the "is this already encoded" heuristic

/// Error types for percent-decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentDecodeError {
    /// A `%` is followed by characters that are not two hex digits
    InvalidEscape { position: usize },
    /// A `%` appears too close to the end to hold two hex digits
    TruncatedEscape { position: usize },
    /// The decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl std::fmt::Display for PercentDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentDecodeError::InvalidEscape { position } => {
                write!(f, "Invalid percent escape at byte {}", position)
            }
            PercentDecodeError::TruncatedEscape { position } => {
                write!(f, "Truncated percent escape at byte {}", position)
            }
            PercentDecodeError::InvalidUtf8 => write!(f, "Decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for PercentDecodeError {}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes into bytes and interpret the result as UTF-8
///
/// Strict: every `%` must start a valid escape. `+` is left alone.
pub fn percent_decode(text: &str) -> Result<String, PercentDecodeError> {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        if i + 2 >= bytes.len() {
            return Err(PercentDecodeError::TruncatedEscape { position: i });
        }

        match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
            (Some(high), Some(low)) => decoded.push((high << 4) | low),
            _ => return Err(PercentDecodeError::InvalidEscape { position: i }),
        }
        i += 3;
    }

    String::from_utf8(decoded).map_err(|_| PercentDecodeError::InvalidUtf8)
}

/// Heuristic check for percent-encoded text
///
/// True only when decoding succeeds and changes the string. Text without any
/// `%` is reported as not encoded, and text containing a stray `%` (such as
/// `"100% done"`) fails to decode and is also reported as not encoded.
pub fn is_percent_encoded(text: &str) -> bool {
    match percent_decode(text) {
        Ok(decoded) => decoded != text,
        Err(_) => false,
    }
}
