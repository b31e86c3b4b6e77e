// 進捗報告の具象実装

use super::traits::ProgressReporter;
use crate::core::{BatchSummary, ProcessingResult};
use std::path::Path;
use tracing::{debug, info, warn};

fn worker_label(worker_id: Option<usize>) -> String {
    match worker_id {
        Some(id) => id.to_string(),
        None => "main".to_string(),
    }
}

/// tracing へ出力する進捗報告実装
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル単位のログを出さず、開始・失敗・完了のみ報告する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report_started(&self, total_files: usize, workers: usize) {
        if workers == 0 {
            info!("Applying CLAHE to {total_files} files sequentially...");
        } else {
            info!("Applying CLAHE to {total_files} files with {workers} workers...");
        }
    }

    fn report_worker_started(&self, worker_id: usize, batch_len: usize, total_batches: usize) {
        info!(
            "Starting worker-{worker_id} on chunk no. {} of {total_batches} ({batch_len} files)...",
            worker_id + 1
        );
    }

    fn report_file_started(&self, worker_id: Option<usize>, path: &Path) {
        if !self.quiet {
            info!(
                "{}:Applying CLAHE on \"{}\"",
                worker_label(worker_id),
                path.display()
            );
        }
    }

    fn report_file_saved(&self, worker_id: Option<usize>, input: &Path, output: &Path) {
        if self.quiet {
            return;
        }
        let name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            "{}:\"{name}\" saved on \"{}\".",
            worker_label(worker_id),
            output.display()
        );
        debug!(input = %input.display(), output = %output.display(), "file enhanced");
    }

    fn report_error(&self, worker_id: Option<usize>, path: &Path, error: &str) {
        warn!(
            "{}:Failed to process \"{}\": {error}",
            worker_label(worker_id),
            path.display()
        );
    }

    fn report_worker_aborted(&self, worker_id: Option<usize>, skipped: usize) {
        warn!(
            "{}:Stopped after a decode failure, {skipped} files left unprocessed",
            worker_label(worker_id)
        );
    }

    fn report_completed(&self, summary: &BatchSummary) {
        info!(
            "CLAHE successfully applied to {} images.",
            summary.output_count
        );
        if !summary.is_complete_success() {
            warn!(
                "{} of {} files succeeded ({} failed, {} skipped)",
                summary.succeeded, summary.total_files, summary.failed, summary.skipped
            );
            for failure in summary.failures() {
                if let ProcessingResult::Failure { input, kind, message } = failure {
                    warn!("  [{}] {}: {message}", kind.as_str(), input.display());
                }
            }
        }
        debug!(elapsed_ms = summary.elapsed_ms, "batch finished");
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoOpProgressReporter {
    fn report_started(&self, _total_files: usize, _workers: usize) {}

    fn report_worker_started(&self, _worker_id: usize, _batch_len: usize, _total_batches: usize) {}

    fn report_file_started(&self, _worker_id: Option<usize>, _path: &Path) {}

    fn report_file_saved(&self, _worker_id: Option<usize>, _input: &Path, _output: &Path) {}

    fn report_error(&self, _worker_id: Option<usize>, _path: &Path, _error: &str) {}

    fn report_worker_aborted(&self, _worker_id: Option<usize>, _skipped: usize) {}

    fn report_completed(&self, _summary: &BatchSummary) {}
}
