// バッチ処理のカスタムエラー型定義

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// バッチ処理固有のエラー型
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("スキャンエラー: {path} - {source}")]
    ScanError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("デコードエラー: {path} - {source}")]
    DecodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("ディレクトリ作成エラー: {path} - {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("書き込みエラー: {path} - {source}")]
    WriteError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ProcessingError {
    /// スキャンエラーの作成
    pub fn scan(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ScanError {
            path: path.into(),
            source,
        }
    }

    /// デコードエラーの作成
    pub fn decode(path: impl Into<String>, source: image::ImageError) -> Self {
        Self::DecodeError {
            path: path.into(),
            source,
        }
    }

    /// ディレクトリ作成エラーの作成
    pub fn directory(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::DirectoryError {
            path: path.into(),
            source,
        }
    }

    /// 書き込みエラーの作成
    pub fn write(path: impl Into<String>, source: image::ImageError) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// ファイル単位の失敗として記録できるエラーならその種別を返す
    ///
    /// スキャン・設定・タスクのエラーは実行全体に関わるため `None`。
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::DecodeError { .. } => Some(FailureKind::Decode),
            Self::DirectoryError { .. } | Self::WriteError { .. } => Some(FailureKind::Write),
            Self::ScanError { .. }
            | Self::ConfigurationError { .. }
            | Self::ValidationError { .. }
            | Self::TaskError { .. } => None,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::ScanError { path, .. } => ErrorContext::new("scan")
                .with_resource(path.clone())
                .with_suggestion("入力ディレクトリの存在とアクセス権限を確認してください"),
            Self::DecodeError { path, .. } => ErrorContext::new("decode")
                .with_resource(path.clone())
                .with_suggestion("画像ファイルの形式と整合性を確認してください"),
            Self::DirectoryError { path, .. } => ErrorContext::new("create_directory")
                .with_resource(path.clone())
                .with_suggestion("出力ディレクトリの書き込み権限を確認してください"),
            Self::WriteError { path, .. } => ErrorContext::new("write")
                .with_resource(path.clone())
                .with_suggestion("拡張子が書き出し可能な画像形式か確認してください"),
            Self::ConfigurationError { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("設定を確認してください: {message}")),
            Self::ValidationError { field, .. } => ErrorContext::new("validation")
                .with_resource(field.clone())
                .with_suggestion("コマンドライン引数の値を確認してください"),
            Self::TaskError { .. } => ErrorContext::new("join_worker"),
        }
    }
}

/// ファイル単位の失敗の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 読み込み・デコードの失敗
    Decode,
    /// ディレクトリ作成・エンコード・書き込みの失敗
    Write,
}

impl FailureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Write => "write",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（ファイルパス等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    /// 新しいエラーコンテキストを作成
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    /// リソース情報を追加
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// 提案を追加
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<tokio::task::JoinError> for ProcessingError {
    fn from(error: tokio::task::JoinError) -> Self {
        ProcessingError::TaskError { source: error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn io_error(message: &str) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, message.to_string())
    }

    #[test]
    fn test_processing_error_creation() {
        let scan_error = ProcessingError::scan("/test/path", io_error("見つかりません"));
        assert!(scan_error.to_string().contains("/test/path"));
        assert!(scan_error.to_string().contains("スキャンエラー"));

        let config_error = ProcessingError::configuration("無効な設定です");
        assert!(config_error.to_string().contains("設定エラー"));

        let validation_error = ProcessingError::validation("threads", "1以上である必要があります");
        assert!(validation_error.to_string().contains("threads"));
    }

    #[test]
    fn test_error_source_chain() {
        let error = ProcessingError::directory("/out/sub", io_error("permission denied"));
        assert!(error.source().is_some());

        let decode = ProcessingError::decode(
            "/in/a.png",
            image::ImageError::IoError(io_error("missing")),
        );
        assert!(decode.source().is_some());
    }

    #[test]
    fn test_failure_kind_mapping() {
        let decode = ProcessingError::decode(
            "/in/a.png",
            image::ImageError::IoError(io_error("missing")),
        );
        assert_eq!(decode.failure_kind(), Some(FailureKind::Decode));

        let directory = ProcessingError::directory("/out", io_error("denied"));
        assert_eq!(directory.failure_kind(), Some(FailureKind::Write));

        let write = ProcessingError::write(
            "/out/a__CLAHE.png",
            image::ImageError::IoError(io_error("disk full")),
        );
        assert_eq!(write.failure_kind(), Some(FailureKind::Write));

        let scan = ProcessingError::scan("/in", io_error("missing"));
        assert_eq!(scan.failure_kind(), None);
        assert_eq!(ProcessingError::configuration("x").failure_kind(), None);
    }

    #[test]
    fn test_error_context() {
        let scan = ProcessingError::scan("/test/path", io_error("Not found"));
        let context = scan.context();

        assert_eq!(context.operation, "scan");
        assert_eq!(context.resource, Some("/test/path".to_string()));
        assert!(context.suggestion.is_some());

        let config = ProcessingError::configuration("threads = 0");
        let context = config.context();
        assert_eq!(context.operation, "configuration");
        assert!(context.suggestion.unwrap().contains("threads = 0"));
    }

    #[tokio::test]
    async fn test_task_error() {
        let task = tokio::spawn(async {
            std::future::pending::<()>().await;
        });
        task.abort();

        let join_error = task.await.expect_err("タスクエラーが期待されます");
        let processing_error = ProcessingError::from(join_error);

        assert!(processing_error.to_string().contains("タスクエラー"));
        assert_eq!(processing_error.failure_kind(), None);
    }

    #[test]
    fn test_failure_kind_serialization() {
        assert_eq!(serde_json::to_string(&FailureKind::Decode).unwrap(), "\"decode\"");
        assert_eq!(FailureKind::Write.as_str(), "write");
    }
}
