use color_eyre::Result;
use monster_quest::GameConfig;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load .env (optional). QUEST_SEED / QUEST_LOG_DIR / RUST_LOG may come from there.
    // If the file doesn't exist, ignore the error.
    let _ = dotenvy::dotenv();
    let config = GameConfig::from_env();

    // ログ: 標準出力はゲーム画面なので、ファイルへのみ出力する
    let file_appender = rolling::daily(&config.log_dir, "game.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // ファイルにANSIカラー不要
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    monster_quest::run(config)?;
    Ok(())
}
