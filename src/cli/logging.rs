use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// プロセス全体の tracing subscriber を設定する（起動時に一度だけ）
///
/// `RUST_LOG` が設定されていればそちらを優先する。
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // 二重初期化（テスト等）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%H:%M:%S".to_string()))
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "clahe_batch=debug,warn"
    } else {
        "clahe_batch=info,warn"
    }
}
