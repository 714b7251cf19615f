use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::api::Blob;
use crate::error::CommunityResult;

pub const DEFAULT_REPORT_NAME: &str = "reporte.xlsx";

fn extended_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)filename\*\s*=\s*(?:[\w-]+'[\w-]*')?"?([^";]+)"?"#).unwrap()
    })
}

fn plain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).unwrap())
}

/// Filename from a `Content-Disposition` header, `filename*=` form first.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let capture = |pattern: &Regex| {
        pattern
            .captures(header)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    capture(extended_pattern())
        .map(|encoded| percent_decode(&encoded))
        .or_else(|| capture(plain_pattern()))
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty())
}

/// Writes a downloaded blob into `dir` and returns the full path.
pub fn save_blob(blob: &Blob, dir: &Path, default_name: &str) -> CommunityResult<PathBuf> {
    let name = blob
        .content_disposition
        .as_deref()
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| default_name.to_string());

    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, &blob.bytes)?;
    log::info!("Saved {} bytes to {}", blob.bytes.len(), path.display());
    Ok(path)
}

// Only the file name survives; directories in the header are dropped.
fn sanitize(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="personas.xlsx""#),
            Some("personas.xlsx".to_string())
        );
    }

    #[test]
    fn reads_unquoted_filename() {
        assert_eq!(
            filename_from_disposition("attachment; filename=familias.xlsx"),
            Some("familias.xlsx".to_string())
        );
    }

    #[test]
    fn prefers_extended_filename() {
        assert_eq!(
            filename_from_disposition(
                r#"attachment; filename="fallback.xlsx"; filename*=UTF-8''asistencia%20reuni%C3%B3n.xlsx"#
            ),
            Some("asistencia reunión.xlsx".to_string())
        );
    }

    #[test]
    fn strips_directories() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
    }

    #[test]
    fn missing_filename_is_none() {
        assert_eq!(filename_from_disposition("inline"), None);
    }

    #[test]
    fn save_blob_uses_default_name_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let blob = Blob {
            bytes: vec![1, 2, 3],
            content_type: None,
            content_disposition: None,
        };
        let path = save_blob(&blob, dir.path(), DEFAULT_REPORT_NAME).unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_REPORT_NAME);
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }
}
