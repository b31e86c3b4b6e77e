// 統合テスト用のヘルパー
#![allow(dead_code)]

use clahe_batch::core::BatchSummary;
use clahe_batch::processing::ProgressReporter;
use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// 入力・出力ディレクトリを持つ一時ワークスペース
pub struct Workspace {
    temp_dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        fs::create_dir_all(&input).unwrap();
        Self {
            temp_dir,
            input,
            output,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// 低コントラストのグラデーション画像を書き出す
    pub fn write_png(&self, relative: &str, width: u32, height: u32) -> PathBuf {
        let path = self.input.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        GrayImage::from_fn(width, height, |x, y| Luma([(100 + (x + y) % 40) as u8]))
            .save(&path)
            .unwrap();
        path
    }

    pub fn write_corrupt(&self, relative: &str) -> PathBuf {
        let path = self.input.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"NOT_A_PNG").unwrap();
        path
    }

    pub fn write_text(&self, relative: &str) -> PathBuf {
        let path = self.input.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "This is a text file").unwrap();
        path
    }

    pub fn output_file(&self, relative: &str) -> PathBuf {
        self.output.join(relative)
    }
}

/// 呼び出しを記録する進捗報告実装
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub workers: Arc<Mutex<Vec<(usize, usize)>>>,
    pub saved: Arc<Mutex<Vec<PathBuf>>>,
    pub errors: Arc<Mutex<Vec<PathBuf>>>,
    pub completed: Arc<Mutex<Option<usize>>>,
}

impl ProgressReporter for RecordingReporter {
    fn report_started(&self, _total_files: usize, _workers: usize) {}

    fn report_worker_started(&self, worker_id: usize, batch_len: usize, _total_batches: usize) {
        self.workers.lock().unwrap().push((worker_id, batch_len));
    }

    fn report_file_started(&self, _worker_id: Option<usize>, _path: &Path) {}

    fn report_file_saved(&self, _worker_id: Option<usize>, _input: &Path, output: &Path) {
        self.saved.lock().unwrap().push(output.to_path_buf());
    }

    fn report_error(&self, _worker_id: Option<usize>, path: &Path, _error: &str) {
        self.errors.lock().unwrap().push(path.to_path_buf());
    }

    fn report_worker_aborted(&self, _worker_id: Option<usize>, _skipped: usize) {}

    fn report_completed(&self, summary: &BatchSummary) {
        *self.completed.lock().unwrap() = Some(summary.output_count);
    }
}
