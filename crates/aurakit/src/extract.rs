//! Parsing of aura's text output.
//!
//! aura colours its output even when stdout is not a terminal, so every
//! parser here strips ANSI CSI sequences before looking at the text.

use crate::types::PackageMetadata;
use regex::Regex;
use std::sync::LazyLock;

/// CSI introducer (`ESC [` or the C1 byte 0x9B), parameter bytes,
/// intermediate bytes, then one final byte.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\x9B|\x1B\[)[0-?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
});

/// Marker aura prints in front of its own status lines.
const AURA_STATUS_MARKER: &str = "aura >>=";

/// Remove every ANSI CSI sequence from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Decode raw process output into text.
///
/// Invalid UTF-8 becomes U+FFFD, except a lone `0x9B` byte: that is the
/// 8-bit CSI introducer, so it maps to U+009B where [`strip_ansi`] can find
/// it. Stripping on the raw bytes instead would also eat the `0x9B`
/// continuation bytes inside ordinary UTF-8 text.
pub fn decode_output(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        match chunk.invalid() {
            [] => {}
            [0x9B] => text.push('\u{9b}'),
            _ => text.push(char::REPLACEMENT_CHARACTER),
        }
    }

    text
}

/// Extract `Key : Value` fields from `aura --query --info` or
/// `aura --aursync --info` output.
///
/// Lines are split on the first colon and both halves trimmed. Empty lines
/// and lines without a colon are skipped, and a repeated key keeps the last
/// value. Malformed input never fails; it just yields fewer fields.
pub fn extract(raw: &str) -> PackageMetadata {
    let cleaned = strip_ansi(raw);
    let mut metadata = PackageMetadata::new();

    for line in cleaned.split('\n') {
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim(), value.trim());
        }
    }

    metadata
}

/// Parse the package list from `aura -A --sysupgrade --dryrun`.
///
/// aura prints a few `aura >>=` status lines, then one package per line,
/// then a blank line before any trailing chatter.
pub fn parse_upgrade_preview(stdout: &str) -> Vec<String> {
    let cleaned = strip_ansi(stdout);
    cleaned
        .split('\n')
        .skip_while(|line| line.contains(AURA_STATUS_MARKER))
        .take_while(|line| !line.is_empty())
        .map(|line| line.trim().to_string())
        .collect()
}
