// 進捗報告とログ出力
//
// ライブラリ側はこのトレイト経由でのみログを出す。
// 実際の出力先（tracing subscriber）はバイナリの起動時に一度だけ設定する。

pub mod implementations;
pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use implementations::*;
pub use traits::*;

// テストモック（テスト時のみ）
#[cfg(test)]
pub use test_mocks::*;
