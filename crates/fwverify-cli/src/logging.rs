use tracing_subscriber::EnvFilter;

/// 初始化日志，`RUST_LOG` 优先于配置文件中的级别
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
