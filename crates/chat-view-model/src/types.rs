use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Number of reaction symbols shown inline next to a message.
pub const DISPLAYED_REACTIONS: usize = 3;

/// Localisation keys consumed by the view layer.
pub const VISITOR_INDICATOR_KEY: &str = "visitors.chatIndicator";
pub const ACCESSIBLE_TITLE_KEY: &str = "chat.messageAccessibleTitle";
pub const ACCESSIBLE_TITLE_ME_KEY: &str = "chat.messageAccessibleTitleMe";
pub const PRIVATE_NOTICE_TO_KEY: &str = "chat.privateNotice";
pub const PRIVATE_NOTICE_FROM_KEY: &str = "chat.privateNoticeFrom";
pub const LOBBY_NOTICE_KEY: &str = "chat.lobbyChatMessageTo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Local,
    Remote,
    Error,
}

/// Reaction symbol -> participants who applied it.
///
/// Iteration order is insertion order, for the symbols and for each
/// participant set. JSON objects are read in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionMap(IndexMap<String, IndexSet<String>>);

impl ReactionMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Record `participant_id` reacting with `reaction`. Returns false if it was already recorded.
    pub fn add(&mut self, reaction: impl Into<String>, participant_id: impl Into<String>) -> bool {
        self.0
            .entry(reaction.into())
            .or_default()
            .insert(participant_id.into())
    }

    /// Remove one participant's reaction. A symbol nobody uses any more is dropped,
    /// keeping the relative order of the remaining symbols.
    pub fn remove(&mut self, reaction: &str, participant_id: &str) -> bool {
        let Some(participants) = self.0.get_mut(reaction) else {
            return false;
        };
        let removed = participants.shift_remove(participant_id);
        if participants.is_empty() {
            self.0.shift_remove(reaction);
        }
        removed
    }

    /// Insert a whole participant set, replacing any previous one in place.
    pub fn insert_set<I, S>(&mut self, reaction: impl Into<String>, participants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            reaction.into(),
            participants.into_iter().map(Into::into).collect(),
        );
    }

    pub fn get(&self, reaction: &str) -> Option<&IndexSet<String>> {
        self.0.get(reaction)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexSet<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for ReactionMap
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut map = ReactionMap::new();
        for (reaction, participants) in iter {
            map.insert_set(reaction, participants);
        }
        map
    }
}

/// A chat message as delivered by the message store. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: String,
    pub participant_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_from_visitor: bool,
    pub message_type: MessageType,
    #[serde(default)]
    pub private_message: bool,
    #[serde(default)]
    pub lobby_chat: bool,
    #[serde(default, skip_serializing_if = "ReactionMap::is_empty")]
    pub reactions: ReactionMap,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl ChatMessage {
    pub fn new(
        message_id: impl Into<String>,
        participant_id: impl Into<String>,
        message_type: MessageType,
        timestamp: u64,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            participant_id: participant_id.into(),
            display_name: String::new(),
            is_from_visitor: false,
            message_type,
            private_message: false,
            lobby_chat: false,
            reactions: ReactionMap::new(),
            timestamp,
            message: String::new(),
            recipient: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let message: ChatMessage = serde_json::from_str(json)?;
        message.validate()?;
        Ok(message)
    }

    fn validate(&self) -> Result<()> {
        if self.message_id.is_empty() {
            return Err(Error::InvalidMessage("messageId must not be empty".to_string()));
        }
        if self.participant_id.is_empty() {
            return Err(Error::InvalidMessage(format!(
                "participantId must not be empty (message {})",
                self.message_id
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(ChatMessage),
    Many(Vec<ChatMessage>),
}

/// Parse either a single message object or an array of messages.
pub fn parse_messages(json: &str) -> Result<Vec<ChatMessage>> {
    let messages = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::One(message) => vec![message],
        OneOrMany::Many(messages) => messages,
    };
    for message in &messages {
        message.validate()?;
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_map_keeps_insertion_order() {
        let mut map = ReactionMap::new();
        map.add("😂", "p3");
        map.add("👍", "p1");
        map.add("👍", "p2");
        map.add("🎉", "p1");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["😂", "👍", "🎉"]);
        assert!(!map.add("👍", "p1"));
        assert_eq!(map.get("👍").unwrap().len(), 2);
    }

    #[test]
    fn remove_last_participant_drops_symbol() {
        let mut map: ReactionMap = vec![("👍", vec!["p1"]), ("😂", vec!["p2", "p3"])]
            .into_iter()
            .collect();

        assert!(map.remove("👍", "p1"));
        assert!(map.get("👍").is_none());
        assert!(!map.remove("👍", "p1"));
        assert!(map.remove("😂", "p2"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn message_json_defaults_optional_fields() {
        let message = ChatMessage::from_json(
            r#"{"messageId":"m1","participantId":"p1","messageType":"remote","timestamp":1000}"#,
        )
        .unwrap();

        assert_eq!(message.message_type, MessageType::Remote);
        assert!(!message.private_message);
        assert!(!message.lobby_chat);
        assert!(message.reactions.is_empty());
        assert!(message.recipient.is_none());
        assert_eq!(message.display_name, "");
    }

    #[test]
    fn message_json_preserves_reaction_document_order() {
        let message = ChatMessage::from_json(
            r#"{
                "messageId": "m1",
                "participantId": "p1",
                "messageType": "local",
                "timestamp": 0,
                "reactions": { "🔥": ["p2"], "👍": ["p3", "p1"], "❤️": ["p4"] }
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = message.reactions.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["🔥", "👍", "❤️"]);
        let participants: Vec<&str> = message
            .reactions
            .get("👍")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(participants, vec!["p3", "p1"]);
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let err = ChatMessage::from_json(
            r#"{"messageId":"m1","participantId":"p1","messageType":"system","timestamp":0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn empty_message_id_is_rejected() {
        let err = ChatMessage::from_json(
            r#"{"messageId":"","participantId":"p1","messageType":"local","timestamp":0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("messageId"));
    }

    #[test]
    fn parse_messages_accepts_object_or_array() {
        let one = parse_messages(
            r#"{"messageId":"m1","participantId":"p1","messageType":"local","timestamp":0}"#,
        )
        .unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_messages(
            r#"[
                {"messageId":"m1","participantId":"p1","messageType":"local","timestamp":0},
                {"messageId":"m2","participantId":"p2","messageType":"error","timestamp":5}
            ]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].message_type, MessageType::Error);
    }
}
