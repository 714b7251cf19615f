use std::path::Path;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::CommunityResult;

#[derive(Debug, Clone, PartialEq)]
struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// A `multipart/form-data` body: text fields and file uploads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part {
            name: name.to_string(),
            filename: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        });
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: Vec<u8>) -> Self {
        self.parts.push(Part {
            name: name.to_string(),
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
            data,
        });
        self
    }

    /// Reads a file from disk; the content type is guessed from its extension.
    pub fn file_from_path(self, name: &str, path: &Path) -> CommunityResult<Self> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archivo".into());
        let content_type = guess_content_type(path);
        Ok(self.file(name, &filename, content_type, data))
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match &part.filename {
                Some(filename) => out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        escape_quotes(&part.name),
                        escape_quotes(filename)
                    )
                    .as_bytes(),
                ),
                None => out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n",
                        escape_quotes(&part.name)
                    )
                    .as_bytes(),
                ),
            }
            if let Some(content_type) = &part.content_type {
                out.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
            }
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(&part.data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        out
    }
}

pub fn generate_boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("----comunidad{}", suffix)
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "%22")
}

fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_file_parts() {
        let form = MultipartForm::new()
            .text("titulo", "Feria")
            .file("fotos", "a.png", "image/png", vec![1, 2, 3]);
        let body = form.encode("XYZ");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--XYZ\r\nContent-Disposition: form-data; name=\"titulo\"\r\n\r\nFeria\r\n"));
        assert!(text.contains("name=\"fotos\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n"));
        assert!(text.ends_with("--XYZ--\r\n"));
    }

    #[test]
    fn boundaries_differ() {
        assert_ne!(generate_boundary(), generate_boundary());
    }

    #[test]
    fn guesses_image_types() {
        assert_eq!(guess_content_type(Path::new("x.JPG")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("x")), "application/octet-stream");
    }
}
