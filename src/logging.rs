use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログ対象のクレート（バイナリ・CLIライブラリ・エンジン）
const LOG_TARGETS: [&str; 3] = ["cotacao", "cotacao_rust", "cotacao_common"];

/// ログを初期化する（stderr出力、RUST_LOG で上書き可）
///
/// 検索結果は stdout に出すため、ログは stderr に分ける。
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // テストなどで二重に初期化された場合は無視
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

/// RUST_LOG 未設定時のフィルタ（例: "cotacao=warn,cotacao_rust=warn,cotacao_common=warn"）
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_binary() {
        assert_eq!(
            default_directives(false),
            "cotacao=warn,cotacao_rust=warn,cotacao_common=warn"
        );
        assert!(default_directives(true).split(',').all(|d| d.ends_with("=debug")));
    }
}
