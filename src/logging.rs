//! ログ初期化
//!
//! `RUST_LOG` が設定されていればそちらを優先する。

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `--verbose` ならdebug、通常はwarn以上を標準エラーへ出す
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let default_filter = format!("passport_wall={level},passport_common={level}");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .without_time(),
    );

    // 二重初期化（テストなど）は無視
    let _ = subscriber.try_init();
}
