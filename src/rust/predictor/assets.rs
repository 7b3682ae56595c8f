use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use log::debug;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read asset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An image embedded directly into rendered output as a base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime: &'static str,
    pub data: String,
    pub alt: String,
}

impl InlineImage {
    /// Reads and encodes the file at `path`. A missing file is an error.
    pub fn load(path: &Path, alt: impl Into<String>) -> Result<Self, AssetError> {
        let bytes = fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes of asset {:?}", bytes.len(), path);
        Ok(Self::from_bytes(&bytes, mime_for(path), alt))
    }

    pub fn from_bytes(bytes: &[u8], mime: &'static str, alt: impl Into<String>) -> Self {
        Self {
            mime,
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            alt: alt.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }

    pub fn to_html(&self) -> String {
        format!(r#"<img src="{}" alt="{}">"#, self.data_url(), self.alt)
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("gif") => "image/gif",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
