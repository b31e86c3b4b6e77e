// 処理に関連するデータ型定義

use super::error::FailureKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// スキャンで列挙された入力画像のパス
pub type ImagePath = PathBuf;

/// 1つのワーカーに割り当てられる入力パスの連続区間
pub type WorkBatch = Vec<ImagePath>;

/// 個別ファイルの処理結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    Success {
        input: PathBuf,
        output: PathBuf,
        dimensions: (u32, u32),
        elapsed_ms: u64,
    },
    Failure {
        input: PathBuf,
        kind: FailureKind,
        message: String,
    },
}

impl ProcessingResult {
    pub fn input(&self) -> &Path {
        match self {
            Self::Success { input, .. } | Self::Failure { input, .. } => input,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// ワーカー1つ分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub worker_id: usize,
    /// 処理順に並んだ結果
    pub results: Vec<ProcessingResult>,
    /// fail-fast で打ち切られたため未処理のまま残った件数
    pub skipped: usize,
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// 実行後の出力ディレクトリ再スキャンで見つかったファイル数（目安）
    pub output_count: usize,
    /// 0 は逐次処理
    pub workers: usize,
    pub elapsed_ms: u64,
    pub results: Vec<ProcessingResult>,
}

impl BatchSummary {
    /// ワーカーごとの結果をバッチ順に連結して集計する
    pub fn from_outcomes(
        total_files: usize,
        workers: usize,
        outcomes: Vec<BatchOutcome>,
        output_count: usize,
        elapsed_ms: u64,
    ) -> Self {
        let skipped = outcomes.iter().map(|o| o.skipped).sum();
        let results: Vec<ProcessingResult> =
            outcomes.into_iter().flat_map(|o| o.results).collect();
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let failed = results.len() - succeeded;

        Self {
            total_files,
            succeeded,
            failed,
            skipped,
            output_count,
            workers,
            elapsed_ms,
            results,
        }
    }

    /// 全ファイルが成功したかどうか
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0 && self.skipped == 0 && self.succeeded == self.total_files
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProcessingResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}
