use crate::collaborators::{Localizer, ModerationDispatch};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Desktop,
}

/// Opaque moderation command handed to the dispatch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "command", content = "media")]
pub enum ModerationCommand {
    MuteRemote(MediaKind),
    ApproveMedia(MediaKind),
    RejectMedia(MediaKind),
}

/// One-click moderation buttons shown next to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickActionButton {
    Mute,
    AskToUnmute,
    AllowDesktop,
    AllowVideo,
    StopDesktop,
    StopVideo,
}

impl QuickActionButton {
    pub const ALL: [QuickActionButton; 6] = [
        QuickActionButton::Mute,
        QuickActionButton::AskToUnmute,
        QuickActionButton::AllowDesktop,
        QuickActionButton::AllowVideo,
        QuickActionButton::StopDesktop,
        QuickActionButton::StopVideo,
    ];

    pub fn label_key(self) -> &'static str {
        match self {
            QuickActionButton::Mute => "participantsPane.actions.mute",
            QuickActionButton::AskToUnmute => "participantsPane.actions.askUnmute",
            QuickActionButton::AllowDesktop => "participantsPane.actions.allowDesktop",
            QuickActionButton::AllowVideo => "participantsPane.actions.allowVideo",
            QuickActionButton::StopDesktop => "participantsPane.actions.stopDesktop",
            QuickActionButton::StopVideo => "participantsPane.actions.stopVideo",
        }
    }

    /// Key of the spoken action. It differs from the visible label for some buttons.
    fn accessibility_key(self) -> &'static str {
        match self {
            QuickActionButton::Mute | QuickActionButton::StopVideo => {
                "participantsPane.actions.mute"
            }
            QuickActionButton::AskToUnmute | QuickActionButton::AllowVideo => {
                "participantsPane.actions.askUnmute"
            }
            QuickActionButton::AllowDesktop => "participantsPane.actions.askDesktop",
            QuickActionButton::StopDesktop => "participantsPane.actions.stopDesktop",
        }
    }

    pub fn accessibility_label(self, participant_name: &str, localizer: &dyn Localizer) -> String {
        format!(
            "{} {}",
            localizer.translate(self.accessibility_key(), &[]),
            participant_name
        )
    }

    pub fn test_id(self, participant_id: &str) -> String {
        let prefix = match self {
            QuickActionButton::Mute => "mute-audio",
            QuickActionButton::AskToUnmute => "unmute-audio",
            QuickActionButton::AllowDesktop => "unmute-desktop",
            QuickActionButton::AllowVideo => "unmute-video",
            QuickActionButton::StopDesktop => "mute-desktop",
            QuickActionButton::StopVideo => "mute-video",
        };
        format!("{}-{}", prefix, participant_id)
    }

    /// Commands the button dispatches, in dispatch order.
    pub fn commands(self) -> &'static [ModerationCommand] {
        use MediaKind::*;
        use ModerationCommand::*;
        match self {
            QuickActionButton::Mute => &[MuteRemote(Audio), RejectMedia(Audio)],
            QuickActionButton::AskToUnmute => &[ApproveMedia(Audio)],
            QuickActionButton::AllowDesktop => &[ApproveMedia(Desktop)],
            QuickActionButton::AllowVideo => &[ApproveMedia(Video)],
            QuickActionButton::StopDesktop => &[MuteRemote(Desktop), RejectMedia(Desktop)],
            QuickActionButton::StopVideo => &[MuteRemote(Video), RejectMedia(Video)],
        }
    }
}

impl FromStr for QuickActionButton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        QuickActionButton::ALL
            .into_iter()
            .find(|button| button.name() == s)
            .ok_or_else(|| Error::UnknownQuickAction(s.to_string()))
    }
}

impl QuickActionButton {
    pub fn name(self) -> &'static str {
        match self {
            QuickActionButton::Mute => "mute",
            QuickActionButton::AskToUnmute => "ask-to-unmute",
            QuickActionButton::AllowDesktop => "allow-desktop",
            QuickActionButton::AllowVideo => "allow-video",
            QuickActionButton::StopDesktop => "stop-desktop",
            QuickActionButton::StopVideo => "stop-video",
        }
    }
}

/// Commands `button` dispatches, in dispatch order.
pub fn quick_action_commands(button: QuickActionButton) -> &'static [ModerationCommand] {
    button.commands()
}

/// Send every command of `button` for `participant_id`.
pub fn dispatch_quick_action(
    button: QuickActionButton,
    participant_id: &str,
    dispatch: &mut dyn ModerationDispatch,
) {
    for command in quick_action_commands(button) {
        tracing::debug!(participant_id, ?command, "dispatching moderation command");
        dispatch.dispatch(participant_id, *command);
    }
}
