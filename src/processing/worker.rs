// Worker - 1バッチ分の逐次処理

use super::config::FailurePolicy;
use super::enhancer::ImageEnhancer;
use super::reporting::ProgressReporter;
use crate::clahe::ImageTransform;
use crate::core::{BatchOutcome, FailureKind, ProcessingError, ProcessingResult, WorkBatch};
use std::time::Instant;

/// ワーカーの終了状態
#[derive(Debug)]
pub enum WorkerExit {
    /// バッチを最後まで処理した（失敗を含んでもよい）
    Completed(BatchOutcome),
    /// fail-fast によりデコード失敗で打ち切った
    Aborted {
        outcome: BatchOutcome,
        error: ProcessingError,
    },
}

impl WorkerExit {
    pub fn outcome(&self) -> &BatchOutcome {
        match self {
            Self::Completed(outcome) | Self::Aborted { outcome, .. } => outcome,
        }
    }

    pub fn into_outcome(self) -> BatchOutcome {
        match self {
            Self::Completed(outcome) | Self::Aborted { outcome, .. } => outcome,
        }
    }
}

/// バッチ内のファイルを順番に処理する
///
/// 他のワーカーとは何も共有しない。`worker_id` が `None` なら逐次処理として報告する。
/// ファイル単位で記録できないエラーが起きた場合のみ `Err` を返す。
pub fn process_batch<T, R>(
    enhancer: &ImageEnhancer<T>,
    reporter: &R,
    worker_id: Option<usize>,
    batch: WorkBatch,
    policy: FailurePolicy,
) -> Result<WorkerExit, ProcessingError>
where
    T: ImageTransform,
    R: ProgressReporter + ?Sized,
{
    let total = batch.len();
    let mut results = Vec::with_capacity(total);

    for (index, path) in batch.into_iter().enumerate() {
        reporter.report_file_started(worker_id, &path);
        let start_time = Instant::now();

        match enhancer.enhance(&path) {
            Ok(enhanced) => {
                reporter.report_file_saved(worker_id, &path, &enhanced.output);
                results.push(ProcessingResult::Success {
                    input: path,
                    output: enhanced.output,
                    dimensions: enhanced.dimensions,
                    elapsed_ms: start_time.elapsed().as_millis() as u64,
                });
            }
            Err(error) => {
                let Some(kind) = error.failure_kind() else {
                    return Err(error);
                };
                let message = error.to_string();
                reporter.report_error(worker_id, &path, &message);
                results.push(ProcessingResult::Failure {
                    input: path,
                    kind,
                    message,
                });

                if policy == FailurePolicy::FailFast && kind == FailureKind::Decode {
                    let skipped = total - index - 1;
                    reporter.report_worker_aborted(worker_id, skipped);
                    return Ok(WorkerExit::Aborted {
                        outcome: BatchOutcome {
                            worker_id: worker_id.unwrap_or(0),
                            results,
                            skipped,
                        },
                        error,
                    });
                }
            }
        }
    }

    Ok(WorkerExit::Completed(BatchOutcome {
        worker_id: worker_id.unwrap_or(0),
        results,
        skipped: 0,
    }))
}
