use anyhow::{Context, Result};
use chat_view_model::{
    classify, parse_events, parse_messages, summarize_with, ChatMessage, Classification,
    ClockTimestampFormatter, Collaborators, DefaultPrivacyNotice, HoverDisclosure,
    IdentityResolver, MessageView, OverflowPolicy, ReactionSummary, ViewContext,
};
use serde::Serialize;
use std::collections::HashMap;

use super::locale;
use crate::config::Config;
use crate::output::Output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResult {
    message_id: String,
    #[serde(flatten)]
    classification: Classification,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    message_id: String,
    summary: ReactionSummary,
}

/// Options shared by the message commands; unset values fall back to config
#[derive(Debug, Default)]
pub struct Overrides {
    pub local: Option<String>,
    pub knocking: bool,
    pub policy: Option<OverflowPolicy>,
}

/// Read messages from a file, or stdin when `input` is `-`
pub fn read_messages(input: &str) -> Result<Vec<ChatMessage>> {
    let content = if input == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input))?
    };
    let messages = parse_messages(&content).context("Failed to parse chat messages")?;
    tracing::debug!(count = messages.len(), "loaded messages");
    Ok(messages)
}

/// Display names of every sender seen in the input
fn sender_directory(messages: &[ChatMessage]) -> HashMap<String, String> {
    messages
        .iter()
        .filter(|m| !m.display_name.is_empty())
        .map(|m| (m.participant_id.clone(), m.display_name.clone()))
        .collect()
}

/// Classify each message
pub fn classify_messages(
    input: &str,
    overrides: &Overrides,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let local_id = config.resolve_local_id(overrides.local.as_deref())?;
    let knocking = overrides.knocking || config.knocking;

    let results: Vec<ClassifyResult> = read_messages(input)?
        .iter()
        .map(|message| ClassifyResult {
            message_id: message.message_id.clone(),
            classification: classify(message, &local_id, knocking),
        })
        .collect();

    output.success("classify", results);
    Ok(())
}

/// Summarize the reactions of each message
pub fn summarize_messages(
    input: &str,
    overrides: &Overrides,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let policy = overrides.policy.unwrap_or(config.overflow_policy);

    let results: Vec<SummaryResult> = read_messages(input)?
        .iter()
        .map(|message| SummaryResult {
            message_id: message.message_id.clone(),
            summary: summarize_with(Some(&message.reactions), policy),
        })
        .collect();

    output.success("summarize", results);
    Ok(())
}

/// Build the full view of each message after replaying disclosure events
pub fn view_messages(
    input: &str,
    events: &str,
    overrides: &Overrides,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let events = parse_events(events).context("Invalid --events list")?;
    let messages = read_messages(input)?;

    let context = ViewContext {
        local_participant_id: config.resolve_local_id(overrides.local.as_deref())?,
        knocking: overrides.knocking || config.knocking,
        show_display_name: config.show_display_name,
        private_chat_allowed: config.private_chat_allowed,
        overflow_policy: overrides.policy.unwrap_or(config.overflow_policy),
    };

    let localizer = locale::english();
    let notice = DefaultPrivacyNotice::new(locale::english());
    let clock = ClockTimestampFormatter::with_offset_minutes(config.utc_offset_minutes);
    let directory = sender_directory(&messages);
    let identity: &dyn IdentityResolver = &directory;
    let collaborators = Collaborators {
        localizer: &localizer,
        privacy_notice: &notice,
        timestamp: &clock,
        identity: Some(identity),
    };

    let views: Vec<MessageView> = messages
        .iter()
        .map(|message| {
            // each rendered message owns its own disclosure state
            let mut disclosure = HoverDisclosure::new();
            let state = disclosure.apply_all(events.iter().copied());
            MessageView::build(message, &context, state, &collaborators)
        })
        .collect();

    output.success("view", views);
    Ok(())
}
