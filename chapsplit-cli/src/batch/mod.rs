//! Batch processing over many documents
//!
//! Every document gets its own output names, so documents can run in
//! parallel. The cancel flag is only consulted before a document starts; a
//! document that has begun always runs to the end of its merge.

use anyhow::{Context, Result};
use chapsplit_core::{
    DocumentSplitter, FsStore, HeadingClassifier, LogObserver, OutputTarget, SplitConfig,
    SplitOptions, SplitReport,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::CliError;
use crate::input::load_document;
use crate::progress::ProgressReporter;

/// How a batch is run
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Shared output directory; defaults to each input's directory
    pub output_dir: Option<PathBuf>,
    pub parallel: bool,
    /// Worker threads when parallel (0 = one per CPU)
    pub threads: usize,
    /// Stop starting new documents after the first failure
    pub fail_fast: bool,
    pub split: SplitOptions,
}

/// What happened to one document
#[derive(Debug)]
pub enum DocumentStatus {
    Done(SplitReport),
    Failed(String),
    /// Not started because the batch was cancelled
    Skipped,
}

#[derive(Debug)]
pub struct DocumentResult {
    pub input: PathBuf,
    pub status: DocumentStatus,
}

/// Outcome of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: Vec<DocumentResult>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Done(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Skipped))
    }

    /// Files written across all successful documents
    pub fn files_written(&self) -> usize {
        self.results
            .iter()
            .map(|r| match &r.status {
                DocumentStatus::Done(report) => report.files.len(),
                _ => 0,
            })
            .sum()
    }

    fn count(&self, predicate: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(&r.status)).count()
    }
}

struct Job {
    input: PathBuf,
    output_dir: PathBuf,
    base_name: String,
    /// Set when the job must not run
    blocked: Option<CliError>,
}

/// Runs the document pipeline over a list of inputs
pub struct BatchRunner<'a> {
    classifier: &'a HeadingClassifier,
    config: &'a SplitConfig,
    options: BatchOptions,
    cancel: Arc<AtomicBool>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        classifier: &'a HeadingClassifier,
        config: &'a SplitConfig,
        options: BatchOptions,
    ) -> Self {
        Self {
            classifier,
            config,
            options,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the batch before its next document
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run(&self, inputs: &[PathBuf], progress: &ProgressReporter) -> Result<BatchSummary> {
        let jobs = self.plan(inputs);

        let results: Vec<DocumentResult> = if self.options.parallel {
            let threads = match self.options.threads {
                0 => num_cpus::get(),
                n => n,
            };
            log::info!("Processing {} documents on {threads} threads", jobs.len());
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build thread pool")?;
            pool.install(|| {
                jobs.par_iter()
                    .map(|job| self.run_job(job, progress))
                    .collect()
            })
        } else {
            jobs.iter().map(|job| self.run_job(job, progress)).collect()
        };

        Ok(BatchSummary { results })
    }

    fn plan(&self, inputs: &[PathBuf]) -> Vec<Job> {
        let mut claimed: HashMap<(PathBuf, String), PathBuf> = HashMap::new();

        inputs
            .iter()
            .map(|input| {
                let output_dir = match &self.options.output_dir {
                    Some(dir) => dir.clone(),
                    None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
                };
                let base_name = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string());

                let single = output_dir.join(format!("{base_name}.txt"));
                let blocked = if same_file(&single, input) {
                    Some(CliError::OverwritesInput(input.clone()))
                } else if let Some(other) =
                    claimed.get(&(output_dir.clone(), base_name.clone()))
                {
                    Some(CliError::OutputCollision {
                        input: input.clone(),
                        other: other.clone(),
                    })
                } else {
                    claimed.insert((output_dir.clone(), base_name.clone()), input.clone());
                    None
                };

                Job {
                    input: input.clone(),
                    output_dir,
                    base_name,
                    blocked,
                }
            })
            .collect()
    }

    fn run_job(&self, job: &Job, progress: &ProgressReporter) -> DocumentResult {
        let status = if self.cancel.load(Ordering::SeqCst) {
            DocumentStatus::Skipped
        } else if let Some(reason) = &job.blocked {
            DocumentStatus::Failed(reason.to_string())
        } else {
            match self.process(job) {
                Ok(report) => DocumentStatus::Done(report),
                Err(e) => DocumentStatus::Failed(format!("{e:#}")),
            }
        };

        match &status {
            DocumentStatus::Done(report) => log::info!(
                "{}: {} chars, {} chapters, {} files",
                job.input.display(),
                report.total_length,
                report.chapters,
                report.files.len()
            ),
            DocumentStatus::Failed(message) => {
                progress.println(&format!("✗ {}: {message}", job.input.display()));
                if self.options.fail_fast {
                    self.cancel.store(true, Ordering::SeqCst);
                }
            }
            DocumentStatus::Skipped => log::debug!("{} skipped", job.input.display()),
        }

        progress.document_completed(&job.base_name);

        DocumentResult {
            input: job.input.clone(),
            status,
        }
    }

    fn process(&self, job: &Job) -> Result<SplitReport> {
        fs::create_dir_all(&job.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                job.output_dir.display()
            )
        })?;

        let document = load_document(&job.input)?;
        let splitter =
            DocumentSplitter::new(self.classifier, self.config).with_options(self.options.split);

        splitter
            .split(
                &document,
                OutputTarget::new(&job.output_dir, &job.base_name),
                &mut FsStore,
                &mut LogObserver,
            )
            .with_context(|| format!("Failed to split {}", job.input.display()))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
