use anyhow::{Context, Result};
use chat_view_model::{dispatch_quick_action, Localizer, ModerationCommand, QuickActionButton};
use serde::Serialize;

use super::locale;
use crate::output::Output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickActionResult {
    button: QuickActionButton,
    participant_id: String,
    label: String,
    accessibility_label: String,
    test_id: String,
    commands: Vec<ModerationCommand>,
}

/// Show what a quick-action button dispatches for a participant
pub fn show(button: &str, participant_id: &str, name: Option<&str>, output: &Output) -> Result<()> {
    let button = button.parse::<QuickActionButton>().with_context(|| {
        let known: Vec<&str> = QuickActionButton::ALL.iter().map(|b| b.name()).collect();
        format!("Expected one of: {}", known.join(", "))
    })?;

    let localizer = locale::english();
    let mut dispatched: Vec<(String, ModerationCommand)> = Vec::new();
    dispatch_quick_action(button, participant_id, &mut dispatched);

    let result = QuickActionResult {
        button,
        participant_id: participant_id.to_string(),
        label: localizer.translate(button.label_key(), &[]),
        accessibility_label: button.accessibility_label(name.unwrap_or(participant_id), &localizer),
        test_id: button.test_id(participant_id),
        commands: dispatched.into_iter().map(|(_, command)| command).collect(),
    };

    output.success("quick-action", result);
    Ok(())
}
