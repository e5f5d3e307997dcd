//! File reading utilities

use anyhow::{Context, Result};
use encoding_rs::GB18030;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads text files that may not be UTF-8
pub struct FileReader;

impl FileReader {
    /// Read a file as text: UTF-8 (BOM stripped), else GB18030
    pub fn read_text(path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::decode(&bytes, path))
    }

    fn decode(bytes: &[u8], path: &Path) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                let (text, had_errors) = GB18030.decode_without_bom_handling(bytes);
                if had_errors {
                    log::warn!(
                        "{} is neither UTF-8 nor GB18030; some characters were replaced",
                        path.display()
                    );
                } else {
                    log::debug!("{} decoded as GB18030", path.display());
                }
                text.into_owned()
            }
        }
    }
}
