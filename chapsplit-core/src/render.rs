//! Text output format for chapters
//!
//! Every chapter becomes one block:
//!
//! ```text
//!
//! Chapter title
//! ==================================================
//!
//! content line
//! content line
//!
//! ```

use crate::types::{text_length, Chapter};
use std::io::{self, Write};

/// Width of the separator line under each title
pub const SEPARATOR_WIDTH: usize = 50;

/// Shortest run of `=` recognised as a separator when measuring
const MIN_SEPARATOR_WIDTH: usize = 20;

/// Write `chapters` in block format
pub fn write_chapters<W: Write>(writer: &mut W, chapters: &[Chapter]) -> io::Result<()> {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    for chapter in chapters {
        writeln!(writer)?;
        writeln!(writer, "{}", chapter.title)?;
        writeln!(writer, "{separator}")?;
        writeln!(writer)?;
        for line in &chapter.content {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Render `chapters` in block format
pub fn render_chapters(chapters: &[Chapter]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_chapters(&mut buffer, chapters);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn is_separator(line: &str) -> bool {
    line.len() >= MIN_SEPARATOR_WIDTH && line.bytes().all(|b| b == b'=')
}

/// Content length of a rendered file: separators and the title line each
/// one belongs to are not counted
pub fn framed_length(text: &str) -> usize {
    let mut total = 0;
    let mut pending: Option<&str> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if is_separator(line) {
            // The line before a separator is its title
            pending = None;
            continue;
        }
        if let Some(previous) = pending.replace(line) {
            total += text_length(previous);
        }
    }

    total + pending.map_or(0, text_length)
}

/// File name of the `index`-th (1-based) part of `base`
pub fn part_file_name(base: &str, index: usize) -> String {
    format!("{base}_part{index:02}.txt")
}

/// File name of an unsplit document
pub fn single_file_name(base: &str) -> String {
    format!("{base}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Chapter> {
        vec![
            Chapter::new("第一章 开始", vec!["甲乙丙".into(), "丁 戊".into()]),
            Chapter::new("第二章 继续", vec!["己".into()]),
        ]
    }

    #[test]
    fn test_block_format() {
        let rendered = render_chapters(&sample()[1..]);
        let separator = "=".repeat(50);
        assert_eq!(rendered, format!("\n第二章 继续\n{separator}\n\n己\n\n"));
    }

    #[test]
    fn test_framed_length_matches_content() {
        let chapters = sample();
        let rendered = render_chapters(&chapters);
        assert_eq!(framed_length(&rendered), 6);
        assert_eq!(
            framed_length(&rendered),
            chapters.iter().map(Chapter::length).sum::<usize>()
        );
    }

    #[test]
    fn test_framed_length_of_joined_files() {
        let chapters = sample();
        let joined = format!(
            "{}\n{}",
            render_chapters(&chapters[..1]),
            render_chapters(&chapters[1..])
        );
        assert_eq!(framed_length(&joined), 6);
    }

    #[test]
    fn test_short_equals_run_is_content() {
        assert_eq!(framed_length("a\n=====\nb"), 7);
    }

    #[test]
    fn test_plain_text_counts_everything() {
        assert_eq!(framed_length("abc\n\n de \n"), 5);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(part_file_name("book", 1), "book_part01.txt");
        assert_eq!(part_file_name("book", 12), "book_part12.txt");
        assert_eq!(part_file_name("book", 123), "book_part123.txt");
        assert_eq!(single_file_name("book"), "book.txt");
    }
}
