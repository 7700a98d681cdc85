//! Text encoding for Chinese thermal printers
//!
//! Most Chinese thermal printers expect GB2312/GBK bytes for text. Callers may
//! pick another charset per call by its WHATWG label ("utf-8", "big5", ...).

use crate::error::{PrintError, PrintResult};
use encoding_rs::{EncoderResult, Encoding, UTF_16BE, UTF_16LE};
use tracing::{instrument, warn};

/// Charset used when none is given
pub const DEFAULT_CHARSET: &str = "gb2312";

/// Resolve a charset label to an encoder
pub fn lookup(label: &str) -> PrintResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PrintError::UnsupportedEncoding(label.to_string()))
}

/// Encode `s` with the charset named by `label`
///
/// Each character the charset cannot represent becomes a single `?`, so the
/// output keeps the column count the layout measured. This is logged but
/// not treated as an error.
///
/// UTF-16 labels are written as UTF-16 code units. Labels whose encoder
/// would silently fall back to UTF-8 (the "replacement" encoding) are
/// rejected.
#[instrument(skip(s), fields(len = s.len()))]
pub fn encode(s: &str, label: &str) -> PrintResult<Vec<u8>> {
    let encoding = lookup(label)?;

    if encoding == UTF_16LE {
        return Ok(s.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Ok(s.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }
    if encoding.output_encoding() != encoding {
        return Err(PrintError::UnsupportedEncoding(label.to_string()));
    }

    let mut encoder = encoding.new_encoder();
    let capacity = encoder
        .max_buffer_length_from_utf8_without_replacement(s.len())
        .unwrap_or(s.len() * 4)
        .max(16);
    let mut out = vec![0u8; capacity];
    let mut read = 0;
    let mut written = 0;
    let mut replaced = 0usize;

    loop {
        let (result, n_read, n_written) =
            encoder.encode_from_utf8_without_replacement(&s[read..], &mut out[written..], true);
        read += n_read;
        written += n_written;
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.resize(out.len() * 2, 0),
            EncoderResult::Unmappable(_) => {
                if written == out.len() {
                    out.resize(out.len() * 2, 0);
                }
                out[written] = b'?';
                written += 1;
                replaced += 1;
            }
        }
    }
    out.truncate(written);

    if replaced > 0 {
        warn!(charset = encoding.name(), replaced, "unmappable characters replaced");
    }
    Ok(out)
}
