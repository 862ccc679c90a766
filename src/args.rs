//! Command line interpretation
//!
//! Turns the process arguments into either a banner request or a request
//! for help. Tokens are scanned left to right and the first rule that
//! matches a token decides the outcome.

use thiserror::Error;

/// Text shown when no message is given
pub const DEFAULT_TEXT: &str = "Run EldenBanner.exe --help";

const HELP_FLAGS: [&str; 3] = ["--help", "-h", "/?"];
const MUTE_FLAGS: [&str; 3] = ["--nosound", "--quiet", "--silent"];

/// What the banner should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerRequest {
    text: String,
    muted: bool,
}

impl BannerRequest {
    pub fn new(text: impl Into<String>, muted: bool) -> Self {
        Self {
            text: text.into(),
            muted,
        }
    }

    /// Text exactly as supplied
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as rendered on screen
    pub fn display_text(&self) -> String {
        self.text.to_uppercase()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }
}

impl Default for BannerRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT, false)
    }
}

/// Outcome of a successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Show(BannerRequest),
    Help,
}

/// Arguments that cannot be turned into a banner
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Unrecognized option '{0}'")]
    UnrecognizedOption(String),
    #[error("Too many arguments.\nDid you forget to wrap your message in quotes?")]
    TooManyArguments,
}

/// Parse arguments (without the program name)
pub fn parse<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text: Option<String> = None;
    let mut muted = false;

    for arg in args {
        let arg = arg.as_ref();

        if HELP_FLAGS.contains(&arg) {
            return Ok(Invocation::Help);
        }
        if MUTE_FLAGS.contains(&arg) {
            muted = true;
            continue;
        }
        if arg.starts_with('-') || arg.starts_with('/') {
            return Err(UsageError::UnrecognizedOption(arg.to_string()));
        }
        if text.is_some() {
            return Err(UsageError::TooManyArguments);
        }
        text = Some(arg.to_string());
    }

    let text = text.unwrap_or_else(|| DEFAULT_TEXT.to_string());
    Ok(Invocation::Show(BannerRequest::new(text, muted)))
}
