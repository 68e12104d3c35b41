//! The queue consumer: one run of the bot.
//!
//! A run pops lines off the queue until it finds one that is a valid tweet,
//! posts that line, and stops. Invalid lines are logged and dropped. When
//! authentication or submission fails the run stops *without* rewriting the
//! queue, so the valid line is tried again on the next run.

use log::{debug, error, info};
use rand::Rng;
use std::time::Duration;

use crate::config::GeneralConfig;
use crate::error::{PostError, Result};
use crate::queue::TweetQueue;
use crate::tweet::is_valid_tweet;
use crate::twitter::{PostOptions, PostResult, TweetPoster};

/// Time to wait between authenticating and posting.
///
/// The random delay drawn from `random_time` is only reported in the log; the
/// actual wait is always this constant.
pub const POST_DELAY: Duration = Duration::from_secs(300);

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A line was posted and removed from the queue.
    Posted {
        post: PostResult,
        /// Invalid lines dropped before the posted one.
        discarded: usize,
    },
    /// The queue ran out without a valid line (possibly it was empty to begin with).
    QueueExhausted { discarded: usize },
    /// Posting failed; the current head line is still in the queue.
    Aborted(PostError),
}

impl RunOutcome {
    /// Returns the process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Posted { .. } | RunOutcome::QueueExhausted { .. } => 0,
            RunOutcome::Aborted(e) => e.exit_code(),
        }
    }
}

/// Consumes the tweet queue, posting at most once per run.
pub struct QueueConsumer<'a> {
    poster: &'a dyn TweetPoster,
    general: GeneralConfig,
    post_delay: Duration,
}

impl<'a> QueueConsumer<'a> {
    pub fn new(poster: &'a dyn TweetPoster, general: GeneralConfig) -> Self {
        Self {
            poster,
            general,
            post_delay: POST_DELAY,
        }
    }

    /// Overrides the wait before posting.
    pub fn with_post_delay(mut self, post_delay: Duration) -> Self {
        self.post_delay = post_delay;
        self
    }

    /// Runs the consumer once against `queue`.
    ///
    /// # Errors
    ///
    /// Only queue I/O errors are returned as `Err`. Posting failures end the
    /// run with [`RunOutcome::Aborted`].
    pub async fn run(&self, queue: &TweetQueue) -> Result<RunOutcome> {
        let mut discarded = 0;

        while !queue.is_empty()? {
            let head = queue.read_head()?;

            if !is_valid_tweet(&head.line) {
                error!("\"{}\" is not a valid tweet", head.line);
                queue.rewrite(&head.tail)?;
                discarded += 1;
                continue;
            }

            info!("Valid tweet text: \"{}\"", head.line);
            let post = match self.post(&head.line).await {
                Ok(post) => post,
                Err(e) => {
                    error!("{}: {}", e.kind(), e);
                    info!("Leaving queue file {} untouched", queue.path().display());
                    return Ok(RunOutcome::Aborted(e));
                }
            };

            queue.rewrite(&head.tail)?;
            return Ok(RunOutcome::Posted { post, discarded });
        }

        info!(
            "Queue file {} is empty, nothing to post ({} invalid lines dropped)",
            queue.path().display(),
            discarded
        );
        Ok(RunOutcome::QueueExhausted { discarded })
    }

    /// Authenticates, waits, and posts a single text.
    async fn post(&self, text: &str) -> std::result::Result<PostResult, PostError> {
        let identity = self.poster.verify_credentials().await?;
        info!(
            "Running with valid API credentials for user {} (@{})",
            identity.name, identity.screen_name
        );

        let random_delay = random_delay(self.general.random_time);
        info!(
            "Sleeping for {} seconds ({:.2} minutes) before posting tweet",
            random_delay,
            random_delay as f64 / 60.0
        );
        tokio::time::sleep(self.post_delay).await;

        let post = self
            .poster
            .post_update(text, PostOptions::default())
            .await?;
        info!("Tweeted \"{}\" at {}", post.text, post.created_at);
        debug!("Full post info: {:?}", post);
        Ok(post)
    }
}

/// Draws a delay in `[0, random_time)` seconds.
fn random_delay(random_time: u64) -> u64 {
    rand::thread_rng().gen_range(0..random_time.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_delay_stays_below_random_time() {
        for _ in 0..1000 {
            assert!(random_delay(5) < 5);
        }
        assert_eq!(random_delay(1), 0);
    }

    #[test]
    fn test_random_delay_with_zero_range() {
        assert_eq!(random_delay(0), 0);
    }
}
