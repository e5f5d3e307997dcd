//! False-positive suppression for lines that matched a heading rule
//!
//! Headings are short and rarely read as sentences. These filters reject
//! matched lines by length and by the density of common prose words. The
//! thresholds bias toward precision and are fixed.

use super::config::SuppressionConfig;
use std::fmt;

/// Lines ending in a sentence mark are only rejected above this length
pub const SENTENCE_MIN_CHARS: usize = 15;
/// Density checks apply above this length
pub const DENSE_MIN_CHARS: usize = 20;
/// Density rejections additionally require this length
pub const DENSE_REJECT_CHARS: usize = 25;
/// The verb/modifier check applies above this length (up to `DENSE_MIN_CHARS`)
pub const SHORT_SENTENCE_MIN_CHARS: usize = 12;
/// Distinct function words that make a long line read as prose
pub const FUNCTION_WORD_LIMIT: usize = 3;
/// Distinct structural particles that make a long line read as prose
pub const PARTICLE_LIMIT: usize = 4;

/// Why a matched line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Ends in a comma or full stop
    SentenceEnding,
    /// Too many function words or pronouns
    FunctionWords(usize),
    /// Action verb together with an intensity modifier
    VerbWithModifier,
    /// Too many structural particles
    StructuralParticles(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SentenceEnding => write!(f, "ends like a sentence"),
            Rejection::FunctionWords(n) => write!(f, "{n} function words"),
            Rejection::VerbWithModifier => write!(f, "action verb with modifier"),
            Rejection::StructuralParticles(n) => write!(f, "{n} structural particles"),
        }
    }
}

/// Word-list filters applied after a rule matched
#[derive(Debug, Clone, Default)]
pub struct ProseFilter {
    terminal_marks: Vec<char>,
    function_words: Vec<String>,
    action_verbs: Vec<String>,
    intensity_modifiers: Vec<String>,
    structural_particles: Vec<String>,
}

/// Number of list entries occurring anywhere in `text`
fn count_present(text: &str, words: &[String]) -> usize {
    words.iter().filter(|word| text.contains(word.as_str())).count()
}

fn any_present(text: &str, words: &[String]) -> bool {
    words.iter().any(|word| text.contains(word.as_str()))
}

impl ProseFilter {
    pub fn from_config(config: &SuppressionConfig) -> Self {
        Self {
            terminal_marks: config.terminal_marks.clone(),
            function_words: config.function_words.clone(),
            action_verbs: config.action_verbs.clone(),
            intensity_modifiers: config.intensity_modifiers.clone(),
            structural_particles: config.structural_particles.clone(),
        }
    }

    /// Check a trimmed line of `length` characters
    pub fn check(&self, text: &str, length: usize) -> Option<Rejection> {
        if length > SENTENCE_MIN_CHARS {
            if let Some(last) = text.chars().last() {
                if self.terminal_marks.contains(&last) {
                    return Some(Rejection::SentenceEnding);
                }
            }
        }

        if length > DENSE_MIN_CHARS {
            let count = count_present(text, &self.function_words);
            if count >= FUNCTION_WORD_LIMIT && length > DENSE_REJECT_CHARS {
                return Some(Rejection::FunctionWords(count));
            }
        } else if length > SHORT_SENTENCE_MIN_CHARS
            && any_present(text, &self.action_verbs)
            && any_present(text, &self.intensity_modifiers)
        {
            return Some(Rejection::VerbWithModifier);
        }

        if length > DENSE_MIN_CHARS {
            let count = count_present(text, &self.structural_particles);
            if count >= PARTICLE_LIMIT && length > DENSE_REJECT_CHARS {
                return Some(Rejection::StructuralParticles(count));
            }
        }

        None
    }
}
