use anyhow::{Context, Result};
use saral_tui::config::AppConfig;
use saral_tui::internal::ui::app::App;
use saral_tui::tui;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get logging settings
    let config = AppConfig::load();

    // Logs must not reach stdout/stderr while the TUI owns the terminal.
    match tui::init() {
        Ok(terminal) => {
            let file_appender =
                tracing_appender::rolling::daily(config.log_directory(), "saral-tui.log");
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

            // RUST_LOG takes precedence over the config
            let env_filter = match std::env::var("RUST_LOG") {
                Ok(_) => tracing_subscriber::EnvFilter::from_default_env(),
                Err(_) => tracing_subscriber::EnvFilter::new(config.logging.filter_directive()),
            };

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact()
                .init();

            let mut app = App::with_config(config);
            let res = app.run(terminal).await;

            tui::restore().context("failed to restore terminal")?;

            if let Err(err) = res {
                tracing::error!(error = ?err, "app exited with error");
                eprintln!("{err:?}");
            }

            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();

            eprintln!("Failed to initialize TUI: {e:?}");
            Err(anyhow::Error::new(e).context("failed to initialize terminal"))
        }
    }
}
