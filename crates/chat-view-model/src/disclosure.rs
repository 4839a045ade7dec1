//! Hover/detail visibility for one rendered message.
//!
//! Hovering reveals the action menu; the reaction detail panel is opened and
//! closed explicitly and stays open when the pointer leaves.

use crate::{Error, Result};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisclosureState {
    #[default]
    Idle,
    Hovered,
    DetailOpen,
    HoveredAndDetailOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisclosureEvent {
    PointerEnter,
    PointerLeave,
    OpenDetail,
    CloseDetail,
}

impl FromStr for DisclosureEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "enter" | "pointer-enter" => Ok(DisclosureEvent::PointerEnter),
            "leave" | "pointer-leave" => Ok(DisclosureEvent::PointerLeave),
            "open" | "open-detail" => Ok(DisclosureEvent::OpenDetail),
            "close" | "close-detail" => Ok(DisclosureEvent::CloseDetail),
            other => Err(Error::UnknownDisclosureEvent(other.to_string())),
        }
    }
}

impl DisclosureState {
    fn from_flags(hovered: bool, detail_open: bool) -> Self {
        match (hovered, detail_open) {
            (false, false) => DisclosureState::Idle,
            (true, false) => DisclosureState::Hovered,
            (false, true) => DisclosureState::DetailOpen,
            (true, true) => DisclosureState::HoveredAndDetailOpen,
        }
    }

    /// Next state. Events that do not apply leave the state unchanged.
    pub fn next(self, event: DisclosureEvent) -> Self {
        let (hovered, detail_open) = (self.is_hovered(), self.is_detail_open());
        match event {
            DisclosureEvent::PointerEnter => Self::from_flags(true, detail_open),
            DisclosureEvent::PointerLeave => Self::from_flags(false, detail_open),
            DisclosureEvent::OpenDetail => Self::from_flags(hovered, true),
            DisclosureEvent::CloseDetail => Self::from_flags(hovered, false),
        }
    }

    pub fn is_hovered(self) -> bool {
        matches!(
            self,
            DisclosureState::Hovered | DisclosureState::HoveredAndDetailOpen
        )
    }

    pub fn is_detail_open(self) -> bool {
        matches!(
            self,
            DisclosureState::DetailOpen | DisclosureState::HoveredAndDetailOpen
        )
    }
}

/// Owns the disclosure state of a single message instance.
#[derive(Debug, Clone, Default)]
pub struct HoverDisclosure {
    state: DisclosureState,
}

impl HoverDisclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DisclosureState {
        self.state
    }

    pub fn apply(&mut self, event: DisclosureEvent) -> DisclosureState {
        let next = self.state.next(event);
        tracing::trace!(from = ?self.state, to = ?next, ?event, "disclosure transition");
        self.state = next;
        next
    }

    pub fn apply_all<I>(&mut self, events: I) -> DisclosureState
    where
        I: IntoIterator<Item = DisclosureEvent>,
    {
        for event in events {
            self.apply(event);
        }
        self.state
    }

    pub fn pointer_enter(&mut self) -> DisclosureState {
        self.apply(DisclosureEvent::PointerEnter)
    }

    pub fn pointer_leave(&mut self) -> DisclosureState {
        self.apply(DisclosureEvent::PointerLeave)
    }

    pub fn open_detail(&mut self) -> DisclosureState {
        self.apply(DisclosureEvent::OpenDetail)
    }

    pub fn close_detail(&mut self) -> DisclosureState {
        self.apply(DisclosureEvent::CloseDetail)
    }

    pub fn is_hovered(&self) -> bool {
        self.state.is_hovered()
    }

    pub fn is_detail_open(&self) -> bool {
        self.state.is_detail_open()
    }
}

/// Parse a comma separated event list such as `enter,open,leave`.
pub fn parse_events(list: &str) -> Result<Vec<DisclosureEvent>> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<DisclosureEvent>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use DisclosureEvent::*;
    use DisclosureState::*;

    #[test]
    fn transition_table() {
        let cases = [
            (Idle, PointerEnter, Hovered),
            (DetailOpen, PointerEnter, HoveredAndDetailOpen),
            (Hovered, PointerLeave, Idle),
            (HoveredAndDetailOpen, PointerLeave, DetailOpen),
            (Hovered, OpenDetail, HoveredAndDetailOpen),
            (Idle, OpenDetail, DetailOpen),
            (HoveredAndDetailOpen, CloseDetail, Hovered),
            (DetailOpen, CloseDetail, Idle),
        ];
        for (from, event, to) in cases {
            assert_eq!(from.next(event), to, "{from:?} --{event:?}-->");
        }
    }

    #[test]
    fn inapplicable_events_are_no_ops() {
        assert_eq!(Idle.next(PointerLeave), Idle);
        assert_eq!(Idle.next(CloseDetail), Idle);
        assert_eq!(Hovered.next(PointerEnter), Hovered);
        assert_eq!(DetailOpen.next(OpenDetail), DetailOpen);
    }

    #[test]
    fn starts_idle() {
        let disclosure = HoverDisclosure::new();
        assert_eq!(disclosure.state(), Idle);
        assert!(!disclosure.is_hovered());
        assert!(!disclosure.is_detail_open());
    }

    #[test]
    fn parse_event_list() {
        assert_eq!(
            parse_events("enter, open,leave,,close-detail").unwrap(),
            vec![PointerEnter, OpenDetail, PointerLeave, CloseDetail]
        );
        assert!(parse_events("").unwrap().is_empty());
        assert!(parse_events("enter,click").is_err());
    }
}
