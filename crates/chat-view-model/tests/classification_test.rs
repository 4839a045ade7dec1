use chat_view_model::{classify, ChatMessage, MenuSide, MessageType, MessageVariant};

const LOCAL_ID: &str = "me";

fn expected_variant(
    message_type: MessageType,
    private_message: bool,
    lobby_chat: bool,
    knocking: bool,
    from_local: bool,
) -> MessageVariant {
    if message_type == MessageType::Error {
        return MessageVariant::RemoteError;
    }
    if private_message {
        return if from_local {
            MessageVariant::Local
        } else {
            MessageVariant::RemotePrivate
        };
    }
    if lobby_chat && !knocking {
        return MessageVariant::RemoteLobby;
    }
    if from_local {
        MessageVariant::Local
    } else {
        MessageVariant::RemotePlain
    }
}

#[test]
fn every_combination_has_a_variant() {
    let bools = [false, true];
    let mut seen = std::collections::HashSet::new();

    for message_type in [MessageType::Local, MessageType::Remote, MessageType::Error] {
        for private_message in bools {
            for lobby_chat in bools {
                for knocking in bools {
                    for from_local in bools {
                        let sender = if from_local { LOCAL_ID } else { "someone-else" };
                        let mut message = ChatMessage::new("m", sender, message_type, 0);
                        message.private_message = private_message;
                        message.lobby_chat = lobby_chat;

                        let c = classify(&message, LOCAL_ID, knocking);
                        assert_eq!(
                            c.variant,
                            expected_variant(message_type, private_message, lobby_chat, knocking, from_local),
                            "{message_type:?} private={private_message} lobby={lobby_chat} knocking={knocking} local={from_local}"
                        );
                        assert_eq!(
                            c.show_privacy_notice,
                            private_message || (lobby_chat && !knocking)
                        );
                        let side = if message_type == MessageType::Local {
                            MenuSide::Right
                        } else {
                            MenuSide::Left
                        };
                        assert_eq!(c.menu_side, side);
                        seen.insert(c.variant);
                    }
                }
            }
        }
    }

    assert_eq!(seen.len(), 5, "all variants reachable");
}

#[test]
fn error_takes_precedence_over_private() {
    let mut message = ChatMessage::new("m", "other", MessageType::Error, 0);
    message.private_message = true;
    assert_eq!(
        classify(&message, LOCAL_ID, false).variant,
        MessageVariant::RemoteError
    );
}

#[test]
fn classification_reads_only_explicit_parameters() {
    let message = ChatMessage::new("m", "alice", MessageType::Remote, 0);
    assert_eq!(classify(&message, "alice", false).variant, MessageVariant::Local);
    assert_eq!(classify(&message, "bob", false).variant, MessageVariant::RemotePlain);
}
