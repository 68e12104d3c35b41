//! # Zazu
//!
//! Command line entry point of the bot. One invocation posts at most one tweet;
//! schedule it (e.g. with cron) to work through the queue.
//!
//! ```bash
//! # Post the next tweet from tweets.txt using ./config.ini
//! zazu tweets.txt
//!
//! # Use another config file, log to a file, with debug output
//! zazu --config ~/.zazu.ini --logfile zazu.log -v tweets.txt
//! ```
//!
//! Exit codes: 0 when a tweet was posted or the queue had nothing postable,
//! 2 on authentication failure, 3 on submission failure, 1 otherwise.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use zazu::config::{Config, DEFAULT_CONFIG_FILE};
use zazu::logging::{init_logging, level_from_verbosity};
use zazu::{QueueConsumer, RunOutcome, TweetQueue, TwitterClient, ZazuError};

#[derive(Parser, Debug)]
#[command(name = "zazu")]
#[command(about = "Personal Twitter bot: posts the next line of a queue file", long_about = None)]
struct Cli {
    /// Path to the zazu configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write the logs to this file (defaults to standard error)
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// File containing the tweets, one per line
    #[arg(value_parser = existing_file)]
    tweetsfile: PathBuf,

    /// Be (more) verbose
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

fn existing_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("'{}' is not a file", path.display()))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(
        cli.logfile.as_deref(),
        level_from_verbosity(cli.verbose, cli.quiet),
    ) {
        eprintln!("Error: {}", e);
        return ExitCode::from(e.exit_code());
    }

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome, ZazuError> {
    let config = Config::from_file(&cli.config)?;

    let client = TwitterClient::new(config.api);
    let queue = TweetQueue::new(cli.tweetsfile);
    let outcome = QueueConsumer::new(&client, config.general)
        .run(&queue)
        .await?;

    match &outcome {
        RunOutcome::Posted { post, discarded } => {
            info!("Posted tweet {} after dropping {} invalid lines", post.id, discarded)
        }
        RunOutcome::QueueExhausted { discarded } => {
            info!("No valid tweet found, dropped {} invalid lines", discarded)
        }
        RunOutcome::Aborted(e) => info!("Run aborted: {}", e),
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use tempfile::{NamedTempFile, TempDir};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_missing_tweetsfile_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");

        let err = parse(&["zazu", missing.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("is not a file"));
    }

    #[test]
    fn test_directory_tweetsfile_is_rejected() {
        let dir = TempDir::new().unwrap();

        let err = parse(&["zazu", dir.path().to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_tweetsfile_is_required() {
        let err = parse(&["zazu"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["zazu", path]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(cli.logfile, None);
        assert_eq!(cli.tweetsfile, file.path());
        assert_eq!((cli.verbose, cli.quiet), (0, 0));
    }

    #[test]
    fn test_repeated_verbosity_flags_are_counted() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["zazu", "-vv", "-q", path]).unwrap();
        assert_eq!((cli.verbose, cli.quiet), (2, 1));

        let cli = parse(&["zazu", "--verbose", "--quiet", "--quiet", path]).unwrap();
        assert_eq!((cli.verbose, cli.quiet), (1, 2));
    }

    #[test]
    fn test_config_and_logfile_options() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&[
            "zazu",
            "--config",
            "other.ini",
            "--logfile",
            "zazu.log",
            path,
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.ini"));
        assert_eq!(cli.logfile, Some(PathBuf::from("zazu.log")));
    }
}
