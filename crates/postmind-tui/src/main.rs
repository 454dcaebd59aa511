mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use postmind_core::{init_tracing, ApiClient, ClientConfig, ConfigOverrides};
use tracing::info;

use crate::runtime::run_app;
use ui::App;

#[derive(Parser, Debug)]
#[command(name = "postmind")]
#[command(about = "Terminal chat client for the Postmind Gmail assistant")]
struct Args {
    /// Backend base URL (overrides POSTMIND_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Session cookie from the web login (prefer POSTMIND_SESSION env var)
    #[arg(long)]
    session: Option<String>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            session_cookie: self.session.clone(),
            request_timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ui::terminal::restore_after_panic();
        original_hook(panic_info);
    }));

    let config = ClientConfig::resolve(
        args.config.as_deref(),
        &[ConfigOverrides::from_env(), args.overrides()],
    )?;
    init_tracing(config.log_file.as_deref())?;
    info!("Starting postmind against {}", config.api_url);

    let client = ApiClient::new(&config)?;
    let mut app = App::new(client);
    // A configured session skips the landing and login views
    if config.session_cookie.is_some() {
        app.show_chat();
    }

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app).await;
    ui::restore_terminal()?;

    result
}
