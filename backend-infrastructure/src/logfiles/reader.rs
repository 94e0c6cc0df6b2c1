use anyhow::Result;
use encoding_rs::Encoding;

use backend_domain::DecodeFailure;

/// Decodes raw log bytes. A BOM wins outright; otherwise the configured
/// encodings are tried in order and the first clean decode is returned.
/// Content is not validated beyond the decode itself.
pub fn decode_log_bytes(file_name: &str, bytes: &[u8], encodings: &[String]) -> Result<String> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }
    }
    for label in encodings {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            tracing::warn!("unknown encoding label '{}', skipping", label);
            continue;
        };
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }
    }
    Err(DecodeFailure {
        file_name: file_name.to_string(),
        tried: encodings.to_vec(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encodings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
    }

    #[test]
    fn decodes_bom_prefixed_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(utf16le("2026.08.20-18.11.43: hello"));
        let text = decode_log_bytes("login.log", &bytes, &encodings(&["windows-1252"]))
            .expect("decodes");
        assert_eq!(text, "2026.08.20-18.11.43: hello");
    }

    #[test]
    fn decodes_bomless_utf16le_via_the_fallback_order() {
        let bytes = utf16le("admin line");
        let text = decode_log_bytes(
            "admin.log",
            &bytes,
            &encodings(&["utf-16le", "windows-1252"]),
        )
        .expect("decodes");
        assert_eq!(text, "admin line");
    }

    #[test]
    fn eight_bit_fallback_accepts_plain_ascii() {
        let text = decode_log_bytes(
            "admin.log",
            b"plain ascii line",
            &encodings(&["windows-1252"]),
        )
        .expect("decodes");
        assert_eq!(text, "plain ascii line");
    }

    #[test]
    fn odd_length_bytes_fail_utf16_and_report_the_tried_list() {
        // utf-16le cannot decode an odd byte count cleanly and no fallback exists
        let err = decode_log_bytes("login.log", &[0x41, 0x00, 0x42], &encodings(&["utf-16le"]))
            .expect_err("all encodings fail");
        let failure = err.downcast::<DecodeFailure>().expect("typed failure");
        assert_eq!(failure.file_name, "login.log");
        assert_eq!(failure.tried, vec!["utf-16le".to_string()]);
    }
}
