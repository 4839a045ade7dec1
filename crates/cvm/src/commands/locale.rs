use chat_view_model::{
    KeyLocalizer, ACCESSIBLE_TITLE_KEY, ACCESSIBLE_TITLE_ME_KEY, LOBBY_NOTICE_KEY,
    PRIVATE_NOTICE_FROM_KEY, PRIVATE_NOTICE_TO_KEY, VISITOR_INDICATOR_KEY,
};

/// Built-in English strings for the keys the view model asks for.
pub fn english() -> KeyLocalizer {
    KeyLocalizer::new()
        .with_template(VISITOR_INDICATOR_KEY, "(visitor)")
        .with_template(ACCESSIBLE_TITLE_KEY, "{{user}} says:")
        .with_template(ACCESSIBLE_TITLE_ME_KEY, "you say:")
        .with_template(PRIVATE_NOTICE_TO_KEY, "This is a private message to {{recipient}}")
        .with_template(PRIVATE_NOTICE_FROM_KEY, "This is a private message from {{sender}}")
        .with_template(LOBBY_NOTICE_KEY, "This is a lobby message to {{recipient}}")
        .with_template("participantsPane.actions.mute", "Mute")
        .with_template("participantsPane.actions.askUnmute", "Ask to unmute")
        .with_template("participantsPane.actions.askDesktop", "Ask to share screen")
        .with_template("participantsPane.actions.allowDesktop", "Allow desktop")
        .with_template("participantsPane.actions.allowVideo", "Allow video")
        .with_template("participantsPane.actions.stopDesktop", "Stop desktop")
        .with_template("participantsPane.actions.stopVideo", "Stop video")
}
