//! Front-end configuration.

use clap::ValueEnum;

/// Default interactive prompt.
pub const DEFAULT_PROMPT: &str = ">>";

/// Output format for the session statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration for driving a session from lines of input.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Prompt written before each line is read. `None` disables it.
    pub prompt: Option<String>,

    /// Whether to write each statement to the output before running it.
    pub echo: bool,

    /// Whether to stop at the first failing statement.
    pub fail_fast: bool,

    /// Whether lines starting with `#` are skipped.
    pub comments: bool,

    /// Whether to print session statistics when the loop finishes.
    pub show_stats: bool,

    /// Format of the statistics report.
    pub stats_format: StatsFormat,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: Some(DEFAULT_PROMPT.to_string()),
            echo: false,
            fail_fast: false,
            comments: false,
            show_stats: false,
            stats_format: StatsFormat::Text,
        }
    }
}

impl ShellConfig {
    /// Creates a configuration for an interactive shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for running a script: no prompt, comments
    /// allowed.
    #[must_use]
    pub fn script() -> Self {
        Self {
            prompt: None,
            comments: true,
            ..Self::default()
        }
    }

    /// Sets the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Disables the prompt.
    #[must_use]
    pub fn no_prompt(mut self) -> Self {
        self.prompt = None;
        self
    }

    /// Sets whether statements are echoed.
    #[must_use]
    pub fn echo(mut self, value: bool) -> Self {
        self.echo = value;
        self
    }

    /// Sets whether to stop at the first failure.
    #[must_use]
    pub fn fail_fast(mut self, value: bool) -> Self {
        self.fail_fast = value;
        self
    }

    /// Sets whether statistics are printed at the end.
    #[must_use]
    pub fn show_stats(mut self, value: bool) -> Self {
        self.show_stats = value;
        self
    }

    /// Sets the statistics format.
    #[must_use]
    pub fn stats_format(mut self, format: StatsFormat) -> Self {
        self.stats_format = format;
        self
    }
}
