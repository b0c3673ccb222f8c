//! Configuration for the line editor and its terminal actors.

use std::time::Duration;

/// Configuration for a [`LineEditor`](crate::editor::LineEditor).
#[derive(Debug, Clone)]
pub struct ReadlineConfig {
    /// Transcript size limit in characters.
    ///
    /// When exceeded, the overflow plus a tenth of the limit is cut from the
    /// front so trimming does not happen on every append.
    pub max_transcript_chars: usize,
    /// Output lines starting with this prefix are shown as results.
    pub result_prefix: String,
    /// Message shown once at the top of the transcript.
    pub banner: Option<String>,
    /// Maximum rows shown in the completion list.
    pub max_completion_rows: usize,
    /// Input poll timeout for the terminal input actor.
    pub input_poll_timeout: Duration,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            max_transcript_chars: 100_000,
            result_prefix: String::from("=>"),
            banner: None,
            max_completion_rows: 10,
            input_poll_timeout: Duration::from_millis(10),
        }
    }
}

impl ReadlineConfig {
    /// Set the banner message.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Set the transcript size limit.
    #[must_use]
    pub fn with_max_transcript_chars(mut self, max: usize) -> Self {
        self.max_transcript_chars = max;
        self
    }
}
