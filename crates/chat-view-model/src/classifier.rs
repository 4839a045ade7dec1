use crate::collaborators::Localizer;
use crate::types::{
    ChatMessage, MessageType, ACCESSIBLE_TITLE_KEY, ACCESSIBLE_TITLE_ME_KEY, VISITOR_INDICATOR_KEY,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageVariant {
    Local,
    RemotePrivate,
    RemoteLobby,
    RemoteError,
    RemotePlain,
}

/// Which side of the bubble the action menu goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub variant: MessageVariant,
    pub show_privacy_notice: bool,
    pub menu_side: MenuSide,
    /// Quick-react is offered on public remote messages only.
    pub show_react_button: bool,
}

/// Derive the display variant and flags of a message.
///
/// `local_participant_id` and `knocking` come from session state owned by the
/// caller; nothing here reads ambient state.
pub fn classify(message: &ChatMessage, local_participant_id: &str, knocking: bool) -> Classification {
    let from_local = message.participant_id == local_participant_id;
    let lobby_notice = message.lobby_chat && !knocking;

    let variant = if message.message_type == MessageType::Error {
        MessageVariant::RemoteError
    } else if message.private_message {
        if from_local {
            MessageVariant::Local
        } else {
            MessageVariant::RemotePrivate
        }
    } else if lobby_notice {
        MessageVariant::RemoteLobby
    } else if from_local {
        MessageVariant::Local
    } else {
        MessageVariant::RemotePlain
    };

    let menu_side = if message.message_type != MessageType::Local {
        MenuSide::Left
    } else {
        MenuSide::Right
    };

    Classification {
        variant,
        show_privacy_notice: message.private_message || lobby_notice,
        menu_side,
        show_react_button: message.message_type != MessageType::Local
            && !message.private_message
            && !message.lobby_chat,
    }
}

/// Whether "reply privately" may be offered for this message. Visitors can
/// only be answered privately when they wrote privately in the first place.
pub fn private_chat_enabled(message: &ChatMessage, policy_allows: bool) -> bool {
    (!message.is_from_visitor || message.private_message) && policy_allows
}

/// Sender name, suffixed with the visitor indicator for visitors.
pub fn sender_label(message: &ChatMessage, localizer: &dyn Localizer) -> String {
    if message.is_from_visitor {
        format!(
            "{} {}",
            message.display_name,
            localizer.translate(VISITOR_INDICATOR_KEY, &[])
        )
    } else {
        message.display_name.clone()
    }
}

/// Screen reader title for the message body.
pub fn accessible_title(message: &ChatMessage, localizer: &dyn Localizer) -> String {
    if message.recipient.as_deref() == Some(message.display_name.as_str()) {
        localizer.translate(ACCESSIBLE_TITLE_ME_KEY, &[])
    } else {
        localizer.translate(ACCESSIBLE_TITLE_KEY, &[("user", message.display_name.as_str())])
    }
}
