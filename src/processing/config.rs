// バッチ処理の設定

use crate::clahe::ClaheParams;
use crate::core::ProcessingError;
use crate::file_scanner::FileScanner;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 出力ファイル名で拡張子の前に挿入するタグ
pub const DEFAULT_TAG: &str = "__CLAHE";

/// ファイル単位の失敗をどう扱うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 失敗を記録して同じバッチの処理を続ける
    #[default]
    Continue,
    /// デコード失敗でそのワーカーの残りを打ち切る（逐次処理では実行全体が失敗）
    FailFast,
}

/// バッチ実行の設定
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
    threads: Option<usize>,
    failure_policy: FailurePolicy,
    params: ClaheParams,
    tag: String,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extension: ".png".to_string(),
            threads: None,
            failure_policy: FailurePolicy::default(),
            params: ClaheParams::default(),
            tag: DEFAULT_TAG.to_string(),
        }
    }

    /// 拡張子を設定（大文字小文字・先頭のドットは問わない）
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = FileScanner::normalize_extension(extension);
        self
    }

    /// ワーカー数を設定（`None` で逐次処理）
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_params(mut self, params: ClaheParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 正規化済みの拡張子（`.png` 形式）
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn params(&self) -> &ClaheParams {
        &self.params
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 出力ファイルの末尾（`__CLAHE.png` など）
    pub fn output_suffix(&self) -> String {
        format!("{}{}", self.tag, self.extension)
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.threads == Some(0) {
            return Err(ProcessingError::configuration(
                "並列数は1以上である必要があります",
            ));
        }

        let bare = self.extension.trim_start_matches('.');
        if bare.is_empty() {
            return Err(ProcessingError::validation("extension", "拡張子が空です"));
        }
        if bare.contains(['/', '\\', '.']) {
            return Err(ProcessingError::validation(
                "extension",
                format!("不正な拡張子です: {}", self.extension),
            ));
        }

        if self.tag.is_empty() || self.tag.contains(['/', '\\']) {
            return Err(ProcessingError::validation(
                "tag",
                format!("不正なタグです: {:?}", self.tag),
            ));
        }

        self.params.validate()
    }
}
