use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use userdir::api::HttpUserApi;
use userdir::core::config::{load_config, load_config_from, resolve};
use userdir::core::{UserDirectory, UserStore};

#[derive(Parser)]
#[command(name = "userdir", about = "Terminal client for a user directory service")]
struct Args {
    /// API base URL (overrides config file and USERDIR_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Config file to read instead of ~/.userdir/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let config = resolve(&file_config, args.api_url.as_deref());

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!(
        "userdir starting up against {} (timeout {}ms)",
        config.api_base_url,
        config.timeout_ms
    );

    let api = HttpUserApi::new(&config.api_base_url, Duration::from_millis(config.timeout_ms))?;
    let directory = UserDirectory::new(UserStore::new(), Arc::new(api));

    userdir::tui::run(&config, directory)?;
    Ok(())
}
