use anyhow::Result;
use clap::Parser;
use playlist_downloader_lib::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "playlist_downloader_lib=debug,playlist_downloader=debug,tower_http=debug".to_string()
        } else {
            "playlist_downloader_lib=info,playlist_downloader=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    tracing::info!("Starting playlist-downloader v{}", env!("CARGO_PKG_VERSION"));

    playlist_downloader_lib::run(cli).await
}
