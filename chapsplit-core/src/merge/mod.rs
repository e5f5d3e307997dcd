//! Post-write merging of undersized output files
//!
//! The merger works on files that already exist, re-measuring them from
//! disk every round, and repeats two passes until nothing changes:
//!
//! - **Rescue**: a file below `small_threshold` joins its smaller neighbour
//!   (ties go to the previous file). A round that rescues anything skips
//!   consolidation.
//! - **Consolidation**: consecutive files are joined greedily while their
//!   combined length stays below `min_combined`.
//!
//! Rounds are capped by `max_merge_rounds`. Files that vanish underneath a
//! session are skipped, never treated as fatal.

mod naming;
mod observer;
mod store;

pub use naming::{base_name, merged_path, part_range};
pub use observer::{ChoiceReason, LogObserver, MergeEvent, MergeObserver, Neighbor};
pub use store::{FileStore, FsStore, MemoryStore};

use std::path::{Path, PathBuf};

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::render::framed_length;

/// Result of a merge session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Surviving files in sequence order, all of which exist
    pub files: Vec<PathBuf>,
    /// Rounds executed
    pub rounds: usize,
    /// Physical merges performed
    pub merges: usize,
    /// False when the round cap stopped the session
    pub converged: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    path: PathBuf,
    length: usize,
}

/// Merges adjacent output files through a [`FileStore`]
pub struct Merger<S: FileStore> {
    store: S,
    small_threshold: usize,
    min_combined: usize,
    max_rounds: usize,
}

impl<S: FileStore> Merger<S> {
    pub fn new(store: S, config: &SplitConfig) -> Self {
        Self {
            store,
            small_threshold: config.small_threshold,
            min_combined: config.min_combined,
            max_rounds: config.max_merge_rounds,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Merge `paths` (in sequence order) until the set stops changing
    pub fn merge(
        &mut self,
        paths: &[PathBuf],
        observer: &mut dyn MergeObserver,
    ) -> Result<MergeOutcome> {
        let mut current: Vec<PathBuf> = paths.to_vec();
        let mut rounds = 0;
        let mut merges = 0;
        let mut converged = false;

        while rounds < self.max_rounds {
            rounds += 1;
            observer.on_event(&MergeEvent::RoundStarted {
                round: rounds,
                files: current.len(),
            });

            let entries = self.measure(&current, observer)?;

            let (rescued, rescue_count) = self.rescue_pass(entries, observer)?;
            let (next, round_merges) = if rescue_count > 0 {
                (rescued, rescue_count)
            } else {
                self.consolidate_pass(rescued, observer)?
            };

            current = next.into_iter().map(|entry| entry.path).collect();
            merges += round_merges;

            if round_merges == 0 {
                converged = true;
                break;
            }
        }

        if !converged {
            observer.on_event(&MergeEvent::RoundLimitReached { rounds });
        }

        let mut files = Vec::with_capacity(current.len());
        for path in current {
            if self.store.exists(&path) {
                files.push(path);
            } else {
                observer.on_event(&MergeEvent::SkippedMissing { path: &path });
            }
        }

        observer.on_event(&MergeEvent::Finished {
            rounds,
            files: files.len(),
        });

        Ok(MergeOutcome {
            files,
            rounds,
            merges,
            converged,
        })
    }

    fn measure(
        &self,
        paths: &[PathBuf],
        observer: &mut dyn MergeObserver,
    ) -> Result<Vec<Entry>> {
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            if !self.store.exists(path) {
                observer.on_event(&MergeEvent::SkippedMissing { path });
                continue;
            }
            let length = self.length_of(path)?;
            observer.on_event(&MergeEvent::Measured { path, length });
            entries.push(Entry {
                path: path.clone(),
                length,
            });
        }
        Ok(entries)
    }

    fn length_of(&self, path: &Path) -> Result<usize> {
        let text = self.store.read(path).map_err(|e| Error::io(path, e))?;
        Ok(framed_length(&text))
    }

    fn rescue_pass(
        &mut self,
        entries: Vec<Entry>,
        observer: &mut dyn MergeObserver,
    ) -> Result<(Vec<Entry>, usize)> {
        let mut out: Vec<Entry> = Vec::with_capacity(entries.len());
        let mut merges = 0;
        let mut i = 0;

        while i < entries.len() {
            let entry = &entries[i];
            if entry.length >= self.small_threshold {
                out.push(entry.clone());
                i += 1;
                continue;
            }

            let choice = match (out.last(), entries.get(i + 1)) {
                (Some(prev), Some(next)) if prev.length < next.length => {
                    Some((Neighbor::Previous, prev, ChoiceReason::Smaller))
                }
                (Some(prev), Some(next)) if prev.length == next.length => {
                    Some((Neighbor::Previous, prev, ChoiceReason::Tie))
                }
                (Some(_), Some(next)) => Some((Neighbor::Next, next, ChoiceReason::Smaller)),
                (Some(prev), None) => Some((Neighbor::Previous, prev, ChoiceReason::OnlyNeighbor)),
                (None, Some(next)) => Some((Neighbor::Next, next, ChoiceReason::OnlyNeighbor)),
                (None, None) => None,
            };

            let Some((neighbor, other, reason)) = choice else {
                out.push(entry.clone());
                i += 1;
                continue;
            };

            let neighbor_length = other.length;
            let members = match neighbor {
                Neighbor::Previous => vec![other.path.clone(), entry.path.clone()],
                Neighbor::Next => vec![entry.path.clone(), other.path.clone()],
            };
            if neighbor == Neighbor::Previous {
                // the previous neighbour is replaced by the merged file
                out.pop();
            }

            if let Some(merged) = self.combine(&members, observer)? {
                if merged.physical {
                    merges += 1;
                    observer.on_event(&MergeEvent::Rescued {
                        small: &entry.path,
                        small_length: entry.length,
                        neighbor,
                        neighbor_length,
                        reason,
                        merged: &merged.entry.path,
                    });
                }
                out.push(merged.entry);
            }

            i += match neighbor {
                Neighbor::Previous => 1,
                Neighbor::Next => 2,
            };
        }

        Ok((out, merges))
    }

    fn consolidate_pass(
        &mut self,
        entries: Vec<Entry>,
        observer: &mut dyn MergeObserver,
    ) -> Result<(Vec<Entry>, usize)> {
        let mut out = Vec::with_capacity(entries.len());
        let mut merges = 0;
        let mut start = 0;

        while start < entries.len() {
            let mut run_length = entries[start].length;
            let mut end = start + 1;
            while end < entries.len() && run_length + entries[end].length < self.min_combined {
                run_length += entries[end].length;
                end += 1;
            }

            if end - start == 1 {
                let entry = entries[start].clone();
                observer.on_event(&MergeEvent::KeptStandalone {
                    path: &entry.path,
                    length: entry.length,
                });
                out.push(entry);
            } else {
                let members: Vec<PathBuf> =
                    entries[start..end].iter().map(|e| e.path.clone()).collect();
                if let Some(merged) = self.combine(&members, observer)? {
                    if merged.physical {
                        merges += 1;
                        observer.on_event(&MergeEvent::Consolidated {
                            members: &members,
                            merged: &merged.entry.path,
                            length: merged.entry.length,
                        });
                    }
                    out.push(merged.entry);
                }
            }

            start = end;
        }

        Ok((out, merges))
    }

    /// Physically join `members` into one file and delete the rest.
    ///
    /// Returns `None` when none of them exist any more; a lone survivor is
    /// returned untouched.
    fn combine(
        &mut self,
        members: &[PathBuf],
        observer: &mut dyn MergeObserver,
    ) -> Result<Option<Combined>> {
        let mut existing = Vec::with_capacity(members.len());
        for path in members {
            if self.store.exists(path) {
                existing.push(path.clone());
            } else {
                observer.on_event(&MergeEvent::SkippedMissing { path });
            }
        }

        match existing.len() {
            0 => return Ok(None),
            1 => {
                let path = existing.remove(0);
                let length = self.length_of(&path)?;
                return Ok(Some(Combined {
                    entry: Entry { path, length },
                    physical: false,
                }));
            }
            _ => {}
        }

        let mut parts = Vec::with_capacity(existing.len());
        for path in &existing {
            parts.push(self.store.read(path).map_err(|e| Error::io(path, e))?);
        }
        let contents = parts.join("\n");

        let target = merged_path(&existing);
        self.store
            .write(&target, &contents)
            .map_err(|e| Error::io(&target, e))?;

        for path in existing.iter().filter(|p| **p != target) {
            if let Err(e) = self.store.remove(path) {
                log::warn!("Could not remove merged file {}: {}", path.display(), e);
            }
        }

        Ok(Some(Combined {
            entry: Entry {
                path: target,
                length: framed_length(&contents),
            },
            physical: true,
        }))
    }
}

struct Combined {
    entry: Entry,
    physical: bool,
}
