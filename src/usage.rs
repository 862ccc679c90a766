//! Usage text and the blocking usage dialog
use crate::args::UsageError;

const DIALOG_TITLE: &str = "Elden Banner Usage";

const HELP_BODY: &str = "\
Displays a transparent, click-through overlay message.

Usage:
  EldenBanner.exe [\"Your Custom Message\"]

Examples:
  EldenBanner.exe
      -> Displays --help banner message

  EldenBanner.exe \"YOU DIED\"
      -> Displays: \"YOU DIED\"

Options:
  --help, -h, /?              Show this help message.
  --nosound, --quiet, --silent  Disable sound playback.

Note: Always wrap multi-word messages in quotes.";

/// Build the usage text, prefixed by the error when there is one
pub fn usage_text(error: Option<&UsageError>) -> String {
    let mut text = String::new();

    if let Some(error) = error {
        text.push_str(&format!("Error: {}\n\n", error));
    }

    let header = format!(
        "Elden Banner v{} - github.com/Gargantubrain/EldenBanner",
        env!("CARGO_PKG_VERSION")
    );
    text.push_str(&header);
    text.push('\n');
    text.push_str(&"-".repeat(48));
    text.push('\n');
    text.push_str(HELP_BODY);

    text
}

/// Show the usage dialog and wait for it to be dismissed
pub fn show_usage(error: Option<&UsageError>) {
    use rfd::{MessageButtons, MessageDialog, MessageLevel};

    let level = match error {
        Some(_) => MessageLevel::Warning,
        None => MessageLevel::Info,
    };

    tracing::debug!("Showing usage dialog (error: {:?})", error);

    let _ = MessageDialog::new()
        .set_title(DIALOG_TITLE)
        .set_description(&usage_text(error))
        .set_level(level)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_has_no_error_prefix() {
        let text = usage_text(None);
        assert!(text.starts_with("Elden Banner v"));
        assert!(text.contains("--nosound, --quiet, --silent"));
        assert!(text.ends_with("Note: Always wrap multi-word messages in quotes."));
    }

    #[test]
    fn test_error_is_prefixed() {
        let error = UsageError::UnrecognizedOption("--loud".to_string());
        let text = usage_text(Some(&error));
        assert!(text.starts_with("Error: Unrecognized option '--loud'\n\nElden Banner v"));
    }

    #[test]
    fn test_too_many_arguments_hint() {
        let text = usage_text(Some(&UsageError::TooManyArguments));
        assert!(text.starts_with(
            "Error: Too many arguments.\nDid you forget to wrap your message in quotes?\n\n"
        ));
    }
}
