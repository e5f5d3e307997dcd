//! Input resolution: files, directories and glob patterns

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Extensions picked up when searching a directory
pub const DOCUMENT_EXTENSIONS: &[&str] = &["json", "txt"];

/// Resolve inputs to document paths, sorted and de-duplicated.
///
/// Existing files are taken as is, directories are searched recursively for
/// documents, anything else is treated as a glob pattern.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let base = Pattern::escape(&path.to_string_lossy());
            for extension in DOCUMENT_EXTENSIONS {
                expand(&format!("{base}/**/*.{extension}"), &mut files)?;
            }
        } else {
            expand(input, &mut files)?;
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInput(inputs.join(", ")).into());
    }

    files.sort();
    files.dedup();

    Ok(files)
}

fn expand(pattern: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.to_string()))?;

    for path_result in paths {
        let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

        if path.is_file() {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "x").unwrap();
        path
    }

    #[test]
    fn test_directory_searched_recursively() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.txt");
        let b = touch(dir.path(), "nested/b.json");
        touch(dir.path(), "nested/cover.jpg");

        let files = resolve_inputs(&[dir.path().to_string_lossy().into_owned()]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_glob_and_file_deduplicated() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.txt");
        let b = touch(dir.path(), "b.txt");

        let pattern = format!("{}/*.txt", dir.path().display());
        let files =
            resolve_inputs(&[a.to_string_lossy().into_owned(), pattern]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_nothing_found() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let error = resolve_inputs(&[pattern]).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::NoInput(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let error = resolve_inputs(&["[unclosed".to_string()]).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::InvalidPattern(_))
        ));
    }
}
