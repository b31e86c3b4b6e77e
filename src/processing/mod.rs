// バッチ処理システムのモジュール
// スキャン結果を分割し、ワーカーごとに CLAHE を適用する

pub mod config;      // 実行設定
pub mod enhancer;    // 1ファイルの読み込み・変換・書き出し
pub mod partition;   // 静的なワーク分割
pub mod report;      // JSON 実行レポート
pub mod reporting;   // 進捗報告・ログ
pub mod runner;      // オーケストレーション
pub mod worker;      // 1バッチ分の処理

// 公開API
pub use config::{BatchConfig, FailurePolicy, DEFAULT_TAG};
pub use enhancer::{EnhancedImage, ImageEnhancer};
pub use partition::partition;
pub use report::RunReport;
pub use reporting::{ConsoleProgressReporter, NoOpProgressReporter, ProgressReporter};
pub use runner::BatchRunner;
pub use worker::{process_batch, WorkerExit};
