//! Tweet Queue Checking Script
//!
//! This script reads a queue file and reports, for every line, its relative
//! length and whether zazu would post it or drop it. Nothing is posted and the
//! file is not modified.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use zazu::queue::split_head;
use zazu::tweet::{relative_length, MAX_TWEET_LENGTH};
use zazu::is_valid_tweet;

#[derive(Parser, Debug)]
#[command(name = "check_tweets")]
#[command(about = "Check every line of a zazu queue file without posting", long_about = None)]
struct Cli {
    /// File containing the tweets, one per line
    tweetsfile: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("🐦 Zazu Queue Check");
    println!("===================");

    let contents = match fs::read_to_string(&cli.tweetsfile) {
        Ok(contents) => contents,
        Err(e) => {
            println!("❌ Cannot read {}: {}", cli.tweetsfile.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut invalid = 0;
    let mut total = 0;
    // Walk the file line by line exactly as the bot pops it
    let mut remaining = contents;
    while !remaining.is_empty() {
        let head = split_head(&remaining);
        total += 1;
        let length = relative_length(&head.line);
        if is_valid_tweet(&head.line) {
            println!("✅ {:>4} [{:>3}/{}] {}", total, length, MAX_TWEET_LENGTH, head.line);
        } else {
            invalid += 1;
            println!("❌ {:>4} [{:>3}/{}] {}", total, length, MAX_TWEET_LENGTH, head.line);
        }
        remaining = head.tail;
    }

    println!();
    println!("📋 {} lines, {} valid, {} invalid", total, total - invalid, invalid);

    if invalid > 0 {
        println!("⚠️  Invalid lines will be dropped when zazu reaches them");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
