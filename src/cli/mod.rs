// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとアプリケーションロジックの橋渡し

pub mod args;
pub mod logging;
pub mod run;

// 公開API
pub use args::*;
pub use logging::init_logging;
pub use run::{execute, fatal_error_lines};
