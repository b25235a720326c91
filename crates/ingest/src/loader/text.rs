//! Plain text loader.

use super::{DocumentLoader, LoaderError};
use crate::types::PageText;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads `.txt` files as strict UTF-8 into a single page-less text.
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".txt"]
    }

    fn load(&self, path: &Path) -> Result<Vec<PageText>, LoaderError> {
        let bytes = std::fs::read(path)?;
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes).to_vec();
        let text = String::from_utf8(body)?;

        tracing::debug!("Loaded {} chars of text from {:?}", text.chars().count(), path);

        Ok(vec![PageText::whole(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_text_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuzuk.txt");
        let content = "Genel Başkan seçimi için başvuru süreci: ı İ ş Ş ğ Ğ ü Ü ö Ö ç Ç";
        std::fs::write(&path, content).unwrap();

        let pages = TextLoader.load(&path).unwrap();
        assert_eq!(pages, vec![PageText::whole(content)]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Madde 1".as_bytes());
        std::fs::write(&path, bytes).unwrap();

        let pages = TextLoader.load(&path).unwrap();
        assert_eq!(pages[0].text, "Madde 1");
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin5.txt");
        // "ş" in ISO-8859-9 is a lone 0xFE byte
        std::fs::write(&path, [b'b', 0xFE, b'k']).unwrap();

        let result = TextLoader.load(&path);
        assert!(matches!(result, Err(LoaderError::Encoding(_))));
    }
}
