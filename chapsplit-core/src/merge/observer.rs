//! Progress reporting for merge sessions

use std::fmt;
use std::path::{Path, PathBuf};

/// Which neighbour absorbed a small file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Previous,
    Next,
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Neighbor::Previous => write!(f, "previous"),
            Neighbor::Next => write!(f, "next"),
        }
    }
}

/// Why a particular neighbour was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceReason {
    /// Only one neighbour exists
    OnlyNeighbor,
    /// The chosen neighbour is strictly smaller
    Smaller,
    /// Both neighbours have equal length
    Tie,
}

impl fmt::Display for ChoiceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceReason::OnlyNeighbor => write!(f, "only neighbour"),
            ChoiceReason::Smaller => write!(f, "smaller neighbour"),
            ChoiceReason::Tie => write!(f, "equal neighbours"),
        }
    }
}

/// Something that happened during a merge session
#[derive(Debug, Clone, PartialEq)]
pub enum MergeEvent<'a> {
    RoundStarted {
        round: usize,
        files: usize,
    },
    Measured {
        path: &'a Path,
        length: usize,
    },
    Rescued {
        small: &'a Path,
        small_length: usize,
        neighbor: Neighbor,
        neighbor_length: usize,
        reason: ChoiceReason,
        merged: &'a Path,
    },
    Consolidated {
        members: &'a [PathBuf],
        merged: &'a Path,
        length: usize,
    },
    KeptStandalone {
        path: &'a Path,
        length: usize,
    },
    SkippedMissing {
        path: &'a Path,
    },
    RoundLimitReached {
        rounds: usize,
    },
    Finished {
        rounds: usize,
        files: usize,
    },
}

impl fmt::Display for MergeEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::RoundStarted { round, files } => {
                write!(f, "merge round {round}: {files} files")
            }
            MergeEvent::Measured { path, length } => {
                write!(f, "{}: {length} chars", path.display())
            }
            MergeEvent::Rescued {
                small,
                small_length,
                neighbor,
                neighbor_length,
                reason,
                merged,
            } => write!(
                f,
                "{} ({small_length} chars) merged with {neighbor} file ({neighbor_length} chars, {reason}) into {}",
                small.display(),
                merged.display()
            ),
            MergeEvent::Consolidated {
                members,
                merged,
                length,
            } => write!(
                f,
                "consolidated {} files into {} ({length} chars)",
                members.len(),
                merged.display()
            ),
            MergeEvent::KeptStandalone { path, length } => {
                write!(f, "{} kept standalone ({length} chars)", path.display())
            }
            MergeEvent::SkippedMissing { path } => {
                write!(f, "{} no longer exists, skipped", path.display())
            }
            MergeEvent::RoundLimitReached { rounds } => {
                write!(f, "merge stopped after {rounds} rounds without settling")
            }
            MergeEvent::Finished { rounds, files } => {
                write!(f, "merge finished after {rounds} rounds with {files} files")
            }
        }
    }
}

/// Receives merge events.
///
/// Closures taking `&MergeEvent` are observers; `()` ignores everything.
pub trait MergeObserver {
    fn on_event(&mut self, event: &MergeEvent<'_>);
}

impl MergeObserver for () {
    fn on_event(&mut self, _event: &MergeEvent<'_>) {}
}

impl<F> MergeObserver for F
where
    F: FnMut(&MergeEvent<'_>),
{
    fn on_event(&mut self, event: &MergeEvent<'_>) {
        self(event)
    }
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl MergeObserver for LogObserver {
    fn on_event(&mut self, event: &MergeEvent<'_>) {
        match event {
            MergeEvent::Measured { .. } => log::trace!("{event}"),
            MergeEvent::RoundStarted { .. } | MergeEvent::KeptStandalone { .. } => {
                log::debug!("{event}")
            }
            MergeEvent::SkippedMissing { .. } | MergeEvent::RoundLimitReached { .. } => {
                log::warn!("{event}")
            }
            _ => log::info!("{event}"),
        }
    }
}
