#[cfg(feature = "wry")]
mod app;
mod cli;

use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("nimbus=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "nimbus=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Nimbus v{} starting...", env!("CARGO_PKG_VERSION"));

    #[cfg(feature = "wry")]
    {
        if let Err(e) = app::run(args) {
            tracing::error!("Fatal: {e}");
            std::process::exit(1);
        }
        tracing::info!("Shutdown complete");
    }

    #[cfg(not(feature = "wry"))]
    {
        let _ = args;
        tracing::error!("This build has no webview backend; rebuild with `--features wry`.");
        std::process::exit(2);
    }
}
