//! Derived display model for conference chat messages.
//!
//! A [`ChatMessage`] is classified into a [`MessageVariant`], its reactions
//! are ranked into a bounded [`ReactionSummary`], and a per-message
//! [`HoverDisclosure`] decides when the action menu and the reaction detail
//! panel are shown. Everything here is synchronous and side-effect free;
//! identity lookup, text formatting and moderation transport are supplied by
//! the caller through the traits in [`collaborators`].

pub mod classifier;
pub mod collaborators;
pub mod disclosure;
mod error;
pub mod quick_actions;
pub mod reactions;
mod types;
pub mod view;

pub use classifier::{
    accessible_title, classify, private_chat_enabled, sender_label, Classification, MenuSide,
    MessageVariant,
};
pub use collaborators::{
    ClockTimestampFormatter, DefaultPrivacyNotice, IdentityResolver, KeyLocalizer, Localizer,
    ModerationDispatch, PrivacyNoticeFormatter, TimestampFormatter,
};
pub use disclosure::{parse_events, DisclosureEvent, DisclosureState, HoverDisclosure};
pub use error::{Error, Result};
pub use quick_actions::{
    dispatch_quick_action, quick_action_commands, MediaKind, ModerationCommand, QuickActionButton,
};
pub use reactions::{
    participant_labels, summarize, summarize_with, OverflowPolicy, ParticipantLabel,
    ReactionDetail, ReactionEntry, ReactionSummary,
};
pub use types::*;
pub use view::{Collaborators, MessageView, ViewContext};
