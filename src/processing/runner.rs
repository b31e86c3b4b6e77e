// BatchRunner - スキャン・分割・並列実行・集計のオーケストレーション

use super::config::BatchConfig;
use super::enhancer::ImageEnhancer;
use super::partition::partition;
use super::reporting::ProgressReporter;
use super::worker::{process_batch, WorkerExit};
use crate::clahe::ImageTransform;
use crate::core::{BatchOutcome, BatchSummary, ImagePath, ProcessingError};
use crate::file_scanner::FileScanner;
use std::sync::Arc;
use std::time::Instant;

/// 依存性注入によるバッチ実行エンジン
///
/// ワーカーは tokio のブロッキングプール上の OS スレッドで動き、
/// 事前に分割された自分のバッチだけを処理する。
pub struct BatchRunner<T, R> {
    enhancer: Arc<ImageEnhancer<T>>,
    reporter: Arc<R>,
    config: BatchConfig,
}

impl<T, R> BatchRunner<T, R>
where
    T: ImageTransform + 'static,
    R: ProgressReporter + 'static,
{
    /// コンストラクタインジェクション
    pub fn new(transform: T, reporter: R, config: BatchConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Self {
            enhancer: Arc::new(ImageEnhancer::from_config(transform, &config)),
            reporter: Arc::new(reporter),
            config,
        })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 適用する変換の名前（レポートに記録する）
    pub fn transform_name(&self) -> &'static str {
        self.enhancer.transform().name()
    }

    /// 入力ディレクトリ全体を処理してサマリーを返す
    pub async fn run(&self) -> Result<BatchSummary, ProcessingError> {
        let start_time = Instant::now();

        let paths = self.scan_inputs().await?;
        let total_files = paths.len();
        let workers = self.config.threads().unwrap_or(0);
        self.reporter.report_started(total_files, workers);

        let outcomes = match self.config.threads() {
            None => vec![self.run_sequential(paths).await?],
            Some(k) => self.run_parallel(paths, k).await?,
        };

        let output_count = self.count_outputs().await?;
        let summary = BatchSummary::from_outcomes(
            total_files,
            workers,
            outcomes,
            output_count,
            start_time.elapsed().as_millis() as u64,
        );

        self.reporter.report_completed(&summary);
        Ok(summary)
    }

    async fn scan_inputs(&self) -> Result<Vec<ImagePath>, ProcessingError> {
        let root = self.config.input_dir().to_path_buf();
        let suffix = self.config.extension().to_string();

        tokio::task::spawn_blocking(move || FileScanner::scan_directory(&root, &suffix)).await?
    }

    /// 1つのブロッキングタスクでスキャン順に処理する
    ///
    /// fail-fast でデコードに失敗した場合は実行全体をエラーにする。
    async fn run_sequential(&self, paths: Vec<ImagePath>) -> Result<BatchOutcome, ProcessingError> {
        let enhancer = Arc::clone(&self.enhancer);
        let reporter = Arc::clone(&self.reporter);
        let policy = self.config.failure_policy();

        let exit = tokio::task::spawn_blocking(move || {
            process_batch(enhancer.as_ref(), reporter.as_ref(), None, paths, policy)
        })
        .await??;

        match exit {
            WorkerExit::Completed(outcome) => Ok(outcome),
            WorkerExit::Aborted { error, .. } => Err(error),
        }
    }

    /// `k` 個のバッチに分割し、バッチごとにワーカーを起動して全員の終了を待つ
    async fn run_parallel(
        &self,
        paths: Vec<ImagePath>,
        k: usize,
    ) -> Result<Vec<BatchOutcome>, ProcessingError> {
        let batches = partition(paths, k)?;
        let total_batches = batches.len();
        let policy = self.config.failure_policy();

        let handles: Vec<_> = batches
            .into_iter()
            .enumerate()
            .map(|(worker_id, batch)| {
                let enhancer = Arc::clone(&self.enhancer);
                let reporter = Arc::clone(&self.reporter);
                reporter.report_worker_started(worker_id, batch.len(), total_batches);

                tokio::task::spawn_blocking(move || {
                    process_batch(
                        enhancer.as_ref(),
                        reporter.as_ref(),
                        Some(worker_id),
                        batch,
                        policy,
                    )
                })
            })
            .collect();

        // エラーを返す前に全ワーカーの終了を待つ
        let mut joined = Vec::with_capacity(handles.len());
        for handle in handles {
            joined.push(handle.await);
        }

        let mut outcomes = Vec::with_capacity(joined.len());
        for result in joined {
            // 打ち切られたワーカーの結果もそのまま集計に含める
            outcomes.push(result??.into_outcome());
        }
        Ok(outcomes)
    }

    /// 出力ディレクトリを再スキャンして出力ファイル数を数える
    async fn count_outputs(&self) -> Result<usize, ProcessingError> {
        let root = self.config.output_dir().to_path_buf();
        if !root.exists() {
            return Ok(0);
        }
        let suffix = self.config.output_suffix();

        let outputs =
            tokio::task::spawn_blocking(move || FileScanner::scan_directory(&root, &suffix))
                .await??;
        Ok(outputs.len())
    }
}
