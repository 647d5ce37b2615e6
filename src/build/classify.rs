//! # Entry Classifier
//!
//! Decides whether a file's content belongs in the artifact by sniffing the
//! first [`SNIFF_LEN`] bytes with the standard MIME sniffing table and
//! accepting anything whose type starts with `text/`.

use std::io::{self, Read};
use std::path::Path;

use crate::fs::FileSystem;

pub const SNIFF_LEN: usize = 512;

pub fn is_text_file(fs: &dyn FileSystem, path: &Path) -> io::Result<bool> {
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    fs.open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)?;
    Ok(sniff_content_type(&prefix).starts_with("text/"))
}

enum Signature {
    /// Bytes at offset 0.
    Exact(&'static [u8], &'static str),
    /// `data & mask == pattern` at offset 0.
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        content_type: &'static str,
    },
    /// ASCII-case-insensitive tag after leading whitespace, followed by a
    /// space or `>`.
    Html(&'static [u8]),
    /// Literal after leading whitespace.
    AfterWhitespace(&'static [u8], &'static str),
}

const HTML: &str = "text/html; charset=utf-8";

const SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::AfterWhitespace(b"<?xml", "text/xml; charset=utf-8"),
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    Signature::Exact(b"\xFE\xFF", "text/plain; charset=utf-16be"),
    Signature::Exact(b"\xFF\xFE", "text/plain; charset=utf-16le"),
    Signature::Exact(b"\xEF\xBB\xBF", "text/plain; charset=utf-8"),
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        content_type: "image/webp",
    },
    Signature::Exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        content_type: "audio/aiff",
    },
    Signature::Exact(b"ID3", "audio/mpeg"),
    Signature::Exact(b"OggS\x00", "application/ogg"),
    Signature::Exact(b"MThd\x00\x00\x00\x06", "audio/midi"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        content_type: "video/avi",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        content_type: "audio/wave",
    },
    Signature::Exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    Signature::Exact(b"wOFF", "font/woff"),
    Signature::Exact(b"wOF2", "font/woff2"),
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Exact(b"\x00\x61\x73\x6D", "application/wasm"),
];

/// MIME type of `data` per the standard sniffing table. Anything that
/// matches no signature is `text/plain` unless it contains binary control
/// bytes. Empty input is text.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    let trimmed = skip_whitespace(data);

    for signature in SIGNATURES {
        let matched = match signature {
            Signature::Exact(magic, _) => data.starts_with(magic),
            Signature::Masked { mask, pattern, .. } => {
                data.len() >= mask.len()
                    && data
                        .iter()
                        .zip(mask.iter())
                        .zip(pattern.iter())
                        .all(|((byte, mask), expected)| byte & mask == *expected)
            }
            Signature::Html(tag) => matches_html_tag(trimmed, tag),
            Signature::AfterWhitespace(literal, _) => trimmed.starts_with(literal),
        };
        if matched {
            return match signature {
                Signature::Exact(_, content_type)
                | Signature::AfterWhitespace(_, content_type)
                | Signature::Masked { content_type, .. } => *content_type,
                Signature::Html(_) => HTML,
            };
        }
    }

    if data.iter().any(|&byte| is_binary_byte(byte)) {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    }
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|byte| !matches!(byte, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

fn matches_html_tag(data: &[u8], tag: &[u8]) -> bool {
    if data.len() < tag.len() + 1 {
        return false;
    }
    let head_matches = tag.iter().zip(data).all(|(expected, actual)| {
        if expected.is_ascii_uppercase() {
            actual.to_ascii_uppercase() == *expected
        } else {
            actual == expected
        }
    });
    head_matches && matches!(data[tag.len()], b' ' | b'>')
}

fn is_binary_byte(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
