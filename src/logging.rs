//! ログ初期化
//!
//! 進捗表示と対話プロンプトは stdout を使うため、ログは stderr に出す。

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// RUST_LOG があればそれを使い、なければ `-v` で debug、既定は warn
pub fn default_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::new(directives)
}

pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .compact()
        .finish()
}

pub fn init(verbose: bool) {
    let subscriber = subscriber(default_filter(verbose), std::io::stderr);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("ログ初期化に失敗: {}", e);
    }
}
