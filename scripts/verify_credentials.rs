//! Twitter Credential Verification Script
//!
//! This script loads the zazu configuration file and asks Twitter which
//! account the configured credentials belong to, without posting anything.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use zazu::config::{Config, DEFAULT_CONFIG_FILE};
use zazu::{TweetPoster, TwitterClient};

#[derive(Parser, Debug)]
#[command(name = "verify_credentials")]
#[command(about = "Check the Twitter credentials in a zazu configuration file", long_about = None)]
struct Cli {
    /// Path to the zazu configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("🔑 Zazu Credential Check");
    println!("========================");

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("📄 Loaded {}", cli.config.display());

    let client = TwitterClient::new(config.api);
    println!("📤 Calling {}account/verify_credentials.json", client.base_url());

    match client.verify_credentials().await {
        Ok(identity) => {
            println!(
                "✅ Credentials are valid for {} (@{})",
                identity.name, identity.screen_name
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("💥 {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
