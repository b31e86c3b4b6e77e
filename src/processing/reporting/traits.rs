// 進捗報告のトレイト定義

use crate::core::BatchSummary;
use std::path::Path;

/// 進捗報告を抽象化するトレイト
///
/// ワーカースレッドから同時に呼ばれる。`worker_id` が `None` の場合は逐次処理。
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告（`workers` が 0 なら逐次処理）
    fn report_started(&self, total_files: usize, workers: usize);

    /// ワーカーがバッチの処理を開始した
    fn report_worker_started(&self, worker_id: usize, batch_len: usize, total_batches: usize);

    /// ファイルの処理を開始した
    fn report_file_started(&self, worker_id: Option<usize>, path: &Path);

    /// ファイルを書き出した
    fn report_file_saved(&self, worker_id: Option<usize>, input: &Path, output: &Path);

    /// ファイルの処理に失敗した
    fn report_error(&self, worker_id: Option<usize>, path: &Path, error: &str);

    /// fail-fast によりワーカーが残りを処理せず終了した
    fn report_worker_aborted(&self, worker_id: Option<usize>, skipped: usize);

    /// 処理完了時の報告
    fn report_completed(&self, summary: &BatchSummary);
}
