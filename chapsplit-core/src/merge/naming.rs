//! Names of merged files
//!
//! Parts are named `{base}_part{NN}.txt`. A merged file keeps the base and
//! spans the part numbers of its members: `_part02-04`, or `_part03` when a
//! single number is involved, or `_merged` when none can be recovered.

use std::path::{Path, PathBuf};

const PART_MARKER: &str = "_part";

/// First and last part number encoded in a file stem
pub fn part_range(stem: &str) -> Option<(u32, u32)> {
    let (_, suffix) = stem.rsplit_once(PART_MARKER)?;
    let (first, last) = match suffix.split_once('-') {
        Some((first, last)) => (first, last),
        None => (suffix, suffix),
    };

    let parse = |digits: &str| -> Option<u32> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    };

    Some((parse(first)?, parse(last)?))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Stem without its `_partNN` suffix
pub fn base_name(stem: &str) -> &str {
    match stem.rsplit_once(PART_MARKER) {
        Some((base, _)) if part_range(stem).is_some() => base,
        _ => stem,
    }
}

/// Path of the file that `members` merge into; lives beside the first member
pub fn merged_path(members: &[PathBuf]) -> PathBuf {
    let Some(first) = members.first() else {
        return PathBuf::from("merged.txt");
    };

    let first_stem = stem(first);
    let base = base_name(&first_stem);
    let ranges: Vec<(u32, u32)> = members.iter().filter_map(|p| part_range(&stem(p))).collect();

    let file_name = match (ranges.first(), ranges.last()) {
        (Some(&(start, _)), Some(&(_, end))) if start == end => {
            format!("{base}{PART_MARKER}{start:02}.txt")
        }
        (Some(&(start, _)), Some(&(_, end))) => {
            format!("{base}{PART_MARKER}{start:02}-{end:02}.txt")
        }
        _ => format!("{base}_merged.txt"),
    };

    first.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("out").join(n)).collect()
    }

    #[test]
    fn test_part_range() {
        assert_eq!(part_range("book_part03"), Some((3, 3)));
        assert_eq!(part_range("book_part02-04"), Some((2, 4)));
        assert_eq!(part_range("my_party_part11"), Some((11, 11)));
        assert_eq!(part_range("book"), None);
        assert_eq!(part_range("book_partial"), None);
        assert_eq!(part_range("book_part02-"), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("book_part03"), "book");
        assert_eq!(base_name("book_part02-04"), "book");
        assert_eq!(base_name("book_partial"), "book_partial");
    }

    #[test]
    fn test_merged_range() {
        let merged = merged_path(&paths(&["book_part02.txt", "book_part03.txt", "book_part04.txt"]));
        assert_eq!(merged, Path::new("out").join("book_part02-04.txt"));
    }

    #[test]
    fn test_merged_extends_existing_range() {
        let merged = merged_path(&paths(&["book_part02-03.txt", "book_part04.txt"]));
        assert_eq!(merged, Path::new("out").join("book_part02-04.txt"));
    }

    #[test]
    fn test_single_number_kept() {
        let merged = merged_path(&paths(&["book_part05.txt", "notes.txt"]));
        assert_eq!(merged, Path::new("out").join("book_part05.txt"));
    }

    #[test]
    fn test_untagged_inputs() {
        let merged = merged_path(&paths(&["alpha.txt", "beta.txt"]));
        assert_eq!(merged, Path::new("out").join("alpha_merged.txt"));
    }
}
