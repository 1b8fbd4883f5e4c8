mod cli;
mod config;
mod engine;
mod handlers;
mod http;
mod init;
mod manager;
mod models;
mod store;

use std::sync::Arc;

use clap::Parser;

use cli::Commands;
use handlers::Ctx;

// Use mimalloc for musl builds (musl's default malloc is very slow).
#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match config::generate_sample(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // One-off query against the persisted state.
            Commands::Suggest { prefix, scores } => {
                let config = config::load_all(&cli.config);
                let mgr = init::init_manager(&config);
                for item in mgr.suggest_scored(&prefix).await {
                    if scores {
                        println!("{}\t{:.4}", item.word, item.score);
                    } else {
                        println!("{}", item.word);
                    }
                }
                return;
            }
        }
    }

    // Load config.
    let config = config::load_all(&cli.config);

    if let Some(site) = &cli.site {
        if !site.is_dir() {
            log::error!("site directory '{}' not found", site.display());
            std::process::exit(1);
        }
        log::info!("serving site from {}", site.display());
    }

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        mgr: Arc::new(init::init_manager(&config)),
        site_path: cli.site.clone(),
    });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address().to_string();

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}
