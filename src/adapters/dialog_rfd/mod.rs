// Dialog adapter - Native yes/no prompts via rfd

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::debug;

use crate::ports::PromptPort;

/// Native message box prompt
#[derive(Debug, Default)]
pub struct RfdPromptAdapter;

impl RfdPromptAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl PromptPort for RfdPromptAdapter {
    fn confirm(&self, title: &str, message: &str) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        debug!("Dialog '{}' answered {:?}", title, answer);
        matches!(answer, MessageDialogResult::Yes)
    }
}
