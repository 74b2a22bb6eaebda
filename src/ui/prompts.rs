//! Interactive prompts.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use crate::error::{PioneerError, Result};

use super::Prompt;

/// Convert dialoguer errors to PioneerError.
fn map_dialoguer_err(e: dialoguer::Error) -> PioneerError {
    PioneerError::Io(e.into())
}

/// Ask the user to pick one of the prompt's options.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    if prompt.options.is_empty() {
        return Err(PioneerError::ConfigValidationError {
            message: format!("Nothing to choose from for '{}'", prompt.key),
        });
    }

    let labels: Vec<_> = prompt.options.iter().map(|o| o.label.as_str()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(prompt.default_index())
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(prompt.options[selection].value.clone())
}
