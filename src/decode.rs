//! Loader that turns a selected path into text.

use std::fs;
use std::path::Path;

use encoding_rs::{DecoderResult, Encoding, UTF_8};

use crate::config::{DecodeOptions, ErrorPolicy};
use crate::errors::SelectionError;

const UTF8_SIG_LABEL: &str = "utf-8-sig";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read `path` and decode it with `options`.
///
/// A byte-order mark is decoded like any other character (U+FEFF) unless the
/// label is `utf-8-sig`, which drops one leading UTF-8 BOM. Malformed input
/// fails only under `ErrorPolicy::Strict`.
pub fn decode(path: &Path, options: &DecodeOptions) -> Result<String, SelectionError> {
    let encoding = resolve_encoding(&options.encoding)?;
    let bytes = fs::read(path).map_err(|source| SelectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let body = if is_utf8_sig(&options.encoding) {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..])
    } else {
        &bytes[..]
    };
    decode_bytes(body, encoding, options.error_policy).ok_or_else(|| {
        SelectionError::DecodeFailure {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
        }
    })
}

/// Look up a WHATWG encoding label such as `utf-8` or `latin1`.
///
/// `utf-8-sig` resolves to UTF-8.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, SelectionError> {
    if is_utf8_sig(label) {
        return Ok(UTF_8);
    }
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        SelectionError::InvalidConfig(format!("unknown text encoding '{}'", label.trim()))
    })
}

fn is_utf8_sig(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(UTF8_SIG_LABEL)
}

/// Decode raw bytes without BOM sniffing. Returns `None` when `Strict` meets
/// malformed input.
pub fn decode_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    policy: ErrorPolicy,
) -> Option<String> {
    match policy {
        ErrorPolicy::Replace => Some(encoding.decode_without_bom_handling(bytes).0.into_owned()),
        ErrorPolicy::Strict => {
            let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
            if had_errors {
                None
            } else {
                Some(text.into_owned())
            }
        }
        ErrorPolicy::Ignore => Some(decode_dropping_malformed(bytes, encoding)),
    }
}

fn decode_dropping_malformed(bytes: &[u8], encoding: &'static Encoding) -> String {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let initial = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len());
    let mut text = String::with_capacity(initial);
    let mut remaining = bytes;
    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(remaining, &mut text, true);
        remaining = &remaining[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => {}
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(remaining.len())
                    .unwrap_or(remaining.len());
                text.reserve(needed.max(16));
            }
        }
    }
    text
}
