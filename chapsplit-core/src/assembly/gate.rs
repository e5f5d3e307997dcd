//! Quality gate for navigation-derived chapters

use crate::config::SplitConfig;
use crate::types::Chapter;
use std::fmt;

/// Why navigation-derived chapters were rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackReason {
    /// Navigation produced no chapters
    NoChapters,
    /// More than the allowed share of chapters is short
    MostlyShort { short: usize, total: usize },
    /// Mean chapter length is too low
    LowMeanLength { mean: f64 },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoChapters => write!(f, "no chapters found in navigation"),
            FallbackReason::MostlyShort { short, total } => {
                write!(f, "{short} of {total} chapters are too short")
            }
            FallbackReason::LowMeanLength { mean } => {
                write!(f, "mean chapter length is only {mean:.0} characters")
            }
        }
    }
}

/// Outcome of the gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    Accept,
    Fallback(FallbackReason),
}

/// Decide whether chapter boundaries are trustworthy enough to keep
pub fn evaluate(chapters: &[Chapter], config: &SplitConfig) -> GateDecision {
    if chapters.is_empty() {
        return GateDecision::Fallback(FallbackReason::NoChapters);
    }

    let lengths: Vec<usize> = chapters.iter().map(Chapter::length).collect();
    let total = chapters.len();
    let short = lengths
        .iter()
        .filter(|&&length| length < config.min_content_chars)
        .count();

    if short as f64 / total as f64 > config.max_short_ratio {
        return GateDecision::Fallback(FallbackReason::MostlyShort { short, total });
    }

    let mean = lengths.iter().sum::<usize>() as f64 / total as f64;
    if mean < config.min_mean_chars as f64 {
        return GateDecision::Fallback(FallbackReason::LowMeanLength { mean });
    }

    GateDecision::Accept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(length: usize) -> Chapter {
        Chapter::new("t", vec!["字".repeat(length)])
    }

    #[test]
    fn test_accepts_healthy_chapters() {
        let chapters = vec![chapter(5_000), chapter(4_000), chapter(50)];
        assert_eq!(
            evaluate(&chapters, &SplitConfig::default()),
            GateDecision::Accept
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            evaluate(&[], &SplitConfig::default()),
            GateDecision::Fallback(FallbackReason::NoChapters)
        );
    }

    #[test]
    fn test_rejects_mostly_short() {
        let chapters = vec![chapter(50), chapter(60), chapter(90_000)];
        assert_eq!(
            evaluate(&chapters, &SplitConfig::default()),
            GateDecision::Fallback(FallbackReason::MostlyShort { short: 2, total: 3 })
        );
    }

    #[test]
    fn test_exactly_half_short_is_accepted() {
        let chapters = vec![chapter(50), chapter(5_000)];
        assert_eq!(
            evaluate(&chapters, &SplitConfig::default()),
            GateDecision::Accept
        );
    }

    #[test]
    fn test_rejects_low_mean() {
        let chapters = vec![chapter(150), chapter(150), chapter(180)];
        assert!(matches!(
            evaluate(&chapters, &SplitConfig::default()),
            GateDecision::Fallback(FallbackReason::LowMeanLength { .. })
        ));
    }
}
