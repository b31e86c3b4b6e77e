// 実行レポートの JSON 出力

use super::config::BatchConfig;
use crate::core::{BatchSummary, ProcessingResult};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `--report` で書き出す実行結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub started_at: String,
    pub finished_at: String,
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    pub extension: String,
    /// 適用した変換（`clahe` など）
    pub transform: String,
    /// 0 は逐次処理
    pub workers: usize,
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub output_count: usize,
    pub elapsed_ms: u64,
    pub results: Vec<ProcessingResult>,
}

impl RunReport {
    pub fn from_summary(
        config: &BatchConfig,
        summary: &BatchSummary,
        transform: &str,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            started_at: started_at.to_rfc3339(),
            finished_at: finished_at.to_rfc3339(),
            input_directory: config.input_dir().to_path_buf(),
            output_directory: config.output_dir().to_path_buf(),
            extension: config.extension().to_string(),
            transform: transform.to_string(),
            workers: summary.workers,
            total_files: summary.total_files,
            succeeded: summary.succeeded,
            failed: summary.failed,
            skipped: summary.skipped,
            output_count: summary.output_count,
            elapsed_ms: summary.elapsed_ms,
            results: summary.results.clone(),
        }
    }

    /// 整形済み JSON として書き出す（親ディレクトリは作成する）
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("ディレクトリ作成エラー: {e}"))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("JSON変換エラー: {e}"))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| anyhow::anyhow!("ファイル書き込みエラー: {}: {e}", path.display()))?;

        Ok(())
    }
}
