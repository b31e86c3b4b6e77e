// テスト用の進捗報告モック実装

use super::traits::ProgressReporter;
use crate::core::BatchSummary;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockProgressReporter {
    pub started: Arc<Mutex<Option<(usize, usize)>>>,
    pub workers_started: Arc<Mutex<Vec<(usize, usize, usize)>>>,
    pub files_started: Arc<Mutex<Vec<(Option<usize>, PathBuf)>>>,
    pub files_saved: Arc<Mutex<Vec<(Option<usize>, PathBuf)>>>,
    pub errors: Arc<Mutex<Vec<(Option<usize>, PathBuf, String)>>>,
    pub aborted: Arc<Mutex<Vec<(Option<usize>, usize)>>>,
    pub completed: Arc<Mutex<Option<BatchSummary>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report_started(&self, total_files: usize, workers: usize) {
        *self.started.lock().unwrap() = Some((total_files, workers));
    }

    fn report_worker_started(&self, worker_id: usize, batch_len: usize, total_batches: usize) {
        self.workers_started
            .lock()
            .unwrap()
            .push((worker_id, batch_len, total_batches));
    }

    fn report_file_started(&self, worker_id: Option<usize>, path: &Path) {
        self.files_started
            .lock()
            .unwrap()
            .push((worker_id, path.to_path_buf()));
    }

    fn report_file_saved(&self, worker_id: Option<usize>, _input: &Path, output: &Path) {
        self.files_saved
            .lock()
            .unwrap()
            .push((worker_id, output.to_path_buf()));
    }

    fn report_error(&self, worker_id: Option<usize>, path: &Path, error: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((worker_id, path.to_path_buf(), error.to_string()));
    }

    fn report_worker_aborted(&self, worker_id: Option<usize>, skipped: usize) {
        self.aborted.lock().unwrap().push((worker_id, skipped));
    }

    fn report_completed(&self, summary: &BatchSummary) {
        *self.completed.lock().unwrap() = Some(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_across_clones() {
        let reporter = MockProgressReporter::new();
        let shared = reporter.clone();

        shared.report_started(10, 2);
        shared.report_worker_started(1, 5, 2);
        shared.report_error(Some(1), Path::new("bad.png"), "Failed to load");

        assert_eq!(*reporter.started.lock().unwrap(), Some((10, 2)));
        assert_eq!(reporter.workers_started.lock().unwrap()[0], (1, 5, 2));
        let errors = reporter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].2, "Failed to load");
    }
}
