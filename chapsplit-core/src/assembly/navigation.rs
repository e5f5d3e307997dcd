//! Extracted document model: navigation entries and per-unit content

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One navigation (table of contents) entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub title: String,
    /// Opaque reference to a content unit, e.g. `text/ch01.xhtml#start`
    pub locator: String,
    /// Nested entries, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    pub fn new(title: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            locator: locator.into(),
            children: Vec::new(),
        }
    }
}

/// A container-internal unit of text: non-blank, trimmed lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUnit {
    pub id: String,
    pub lines: Vec<String>,
}

impl ContentUnit {
    pub fn new(id: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }
}

/// A document as handed over by the container extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub navigation: Vec<NavEntry>,
    #[serde(default)]
    pub units: Vec<ContentUnit>,
}

/// Trim lines and drop blank ones
pub fn normalize_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect()
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Reduce a locator to a unit path: no fragment, no scheme, forward slashes
fn locator_path(locator: &str) -> String {
    let path = locator.split('#').next().unwrap_or_default();
    let path = match path.rfind("://") {
        Some(pos) => &path[pos + 3..],
        None => path,
    };
    path.replace('\\', "/")
}

impl Document {
    /// Parse an extraction from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut document: Document = serde_json::from_str(content)
            .map_err(|e| Error::InvalidInput(format!("Malformed document JSON: {e}")))?;
        for unit in &mut document.units {
            unit.lines = normalize_lines(&unit.lines);
        }
        Ok(document)
    }

    /// A document with no navigation and a single unit of plain text
    pub fn from_text(text: &str) -> Self {
        Self {
            navigation: Vec::new(),
            units: vec![ContentUnit::new("text", normalize_lines(text.lines()))],
        }
    }

    /// Navigation entries flattened depth-first, parents before children
    pub fn navigation_entries(&self) -> Vec<&NavEntry> {
        fn walk<'a>(entries: &'a [NavEntry], out: &mut Vec<&'a NavEntry>) {
            for entry in entries {
                out.push(entry);
                walk(&entry.children, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.navigation, &mut out);
        out
    }

    /// All lines of all units, in unit order
    pub fn lines(&self) -> Vec<&str> {
        self.units
            .iter()
            .flat_map(|unit| unit.lines.iter().map(String::as_str))
            .collect()
    }

    /// Index of the unit a locator refers to.
    ///
    /// Exact base-name or full-id matches win over partial matches.
    pub fn resolve(&self, locator: &str) -> Option<usize> {
        let path = locator_path(locator);
        let name = base_name(&path);
        if name.is_empty() {
            return None;
        }

        self.units
            .iter()
            .position(|unit| {
                let id = unit.id.replace('\\', "/");
                base_name(&id) == name || id == path
            })
            .or_else(|| {
                self.units
                    .iter()
                    .position(|unit| unit.id.contains(name) || unit.id.contains(path.as_str()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document {
            navigation: vec![],
            units: vec![
                ContentUnit::new("OEBPS/cover.xhtml", vec!["Cover".into()]),
                ContentUnit::new("OEBPS/text/chapter1.xhtml", vec!["one".into()]),
                ContentUnit::new("OEBPS/text/chapter10.xhtml", vec!["ten".into()]),
            ],
        }
    }

    #[test]
    fn test_resolve_strips_fragment_and_directories() {
        let doc = document();
        assert_eq!(doc.resolve("text/chapter1.xhtml#p3"), Some(1));
        assert_eq!(doc.resolve("chapter10.xhtml"), Some(2));
        assert_eq!(doc.resolve("..\\text\\chapter1.xhtml"), Some(1));
        assert_eq!(doc.resolve("epub://OEBPS/cover.xhtml"), Some(0));
    }

    #[test]
    fn test_resolve_partial_match() {
        let doc = document();
        assert_eq!(doc.resolve("chapter1"), Some(1));
    }

    #[test]
    fn test_resolve_unknown() {
        let doc = document();
        assert_eq!(doc.resolve("missing.xhtml"), None);
        assert_eq!(doc.resolve("#only-fragment"), None);
    }

    #[test]
    fn test_navigation_flattened_in_order() {
        let mut part = NavEntry::new("第一卷", "v1.xhtml");
        part.children = vec![
            NavEntry::new("第一章", "c1.xhtml"),
            NavEntry::new("第二章", "c2.xhtml"),
        ];
        let doc = Document {
            navigation: vec![part, NavEntry::new("后记", "end.xhtml")],
            units: vec![],
        };

        let titles: Vec<_> = doc
            .navigation_entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["第一卷", "第一章", "第二章", "后记"]);
    }

    #[test]
    fn test_from_json_normalizes_lines() {
        let doc = Document::from_json_str(
            r#"{
                "navigation": [{"title": "Chapter 1", "locator": "c1.xhtml"}],
                "units": [{"id": "c1.xhtml", "lines": ["  Hello  ", "", "World"]}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.units[0].lines, vec!["Hello", "World"]);
        assert_eq!(doc.navigation[0].locator, "c1.xhtml");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Document::from_json_str("{not json"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("第一章\n\n  内容  \n");
        assert!(doc.navigation.is_empty());
        assert_eq!(doc.lines(), vec!["第一章", "内容"]);
    }
}
