use std::path::PathBuf;

use crate::foundation::error::{TitleError, TitleResult};

/// Where the font bytes come from.
///
/// Serialized as a plain string: `http://` and `https://` prefixes select [`FontSource::Url`],
/// anything else is a filesystem path.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontSource {
    /// Local font file.
    Path(PathBuf),
    /// Remote font fetched over HTTP(S).
    Url(String),
}

impl FontSource {
    /// Classify a locator string.
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl From<String> for FontSource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FontSource> for String {
    fn from(value: FontSource) -> Self {
        match value {
            FontSource::Path(p) => p.display().to_string(),
            FontSource::Url(u) => u,
        }
    }
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Raw font bytes that parsed successfully as a TrueType/OpenType face.
#[derive(Clone)]
pub struct FontData {
    bytes: Vec<u8>,
    face_index: u32,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("len", &self.bytes.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Validate `bytes` as the first face of a font file.
    pub fn from_bytes(bytes: Vec<u8>) -> TitleResult<Self> {
        let font = Self {
            bytes,
            face_index: 0,
        };
        font.face()?;
        Ok(font)
    }

    /// Parsed face borrowing the font bytes.
    pub fn face(&self) -> TitleResult<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.bytes, self.face_index)
            .map_err(|e| TitleError::font_load(format!("failed to parse font: {e}")))
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Read or fetch the font and validate it.
///
/// No retry and no fallback: any failure is returned as [`TitleError::FontLoad`].
#[tracing::instrument]
pub fn load_font(source: &FontSource) -> TitleResult<FontData> {
    let bytes = match source {
        FontSource::Path(path) => std::fs::read(path).map_err(|e| {
            TitleError::font_load(format!("failed to read font '{}': {e}", path.display()))
        })?,
        FontSource::Url(url) => fetch(url)?,
    };
    tracing::debug!(len = bytes.len(), "font bytes loaded");
    FontData::from_bytes(bytes)
}

#[cfg(feature = "fetch")]
fn fetch(url: &str) -> TitleResult<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| TitleError::font_load(format!("failed to fetch font '{url}': {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| TitleError::font_load(format!("failed to read font body '{url}': {e}")))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "fetch"))]
fn fetch(url: &str) -> TitleResult<Vec<u8>> {
    Err(TitleError::font_load(format!(
        "cannot fetch '{url}': built without the `fetch` feature"
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/font/load.rs"]
mod tests;
