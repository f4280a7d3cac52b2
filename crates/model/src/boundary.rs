//! Wire-shape conversion for records delivered by the browser-side engine.
//!
//! The generated transport encodes the entry-event union as a struct with
//! one optional field per variant. The types here mirror that shape and
//! enforce the exactly-one-variant invariant while converting into the
//! domain model, so nothing past this module has to revalidate it.

use crate::event::{
    CompletionEvent, ContentReceiptEvent, ConversationEntryEvent, ConversationTitleEvent,
    SearchQueriesEvent, SearchStatusEvent, SelectedLanguageEvent, WebSourcesEvent,
};
use crate::tool::ToolUseEvent;
use crate::turn::{ActionType, CharacterType, ConversationTurn};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BoundaryError {
    #[error("event carries no populated variant")]
    EmptyEvent,
    #[error("event populates more than one variant: {}", .populated.join(", "))]
    AmbiguousEvent { populated: Vec<&'static str> },
    #[error("invalid event at index {index}: {source}")]
    InvalidEvent {
        index: usize,
        source: Box<BoundaryError>,
    },
    #[error("invalid edit at index {index}: {source}")]
    InvalidEdit {
        index: usize,
        source: Box<BoundaryError>,
    },
    #[error("invalid turn at index {index}: {source}")]
    InvalidTurn {
        index: usize,
        source: Box<BoundaryError>,
    },
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// An entry event as the transport delivers it: every variant optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntryEvent {
    pub completion_event: Option<CompletionEvent>,
    pub tool_use_event: Option<ToolUseEvent>,
    pub search_queries_event: Option<SearchQueriesEvent>,
    pub search_status_event: Option<SearchStatusEvent>,
    pub sources_event: Option<WebSourcesEvent>,
    pub content_receipt_event: Option<ContentReceiptEvent>,
    pub conversation_title_event: Option<ConversationTitleEvent>,
    pub selected_language_event: Option<SelectedLanguageEvent>,
}

impl RawEntryEvent {
    /// Convert into the domain sum type, rejecting events with zero or more
    /// than one populated variant.
    pub fn into_event(self) -> Result<ConversationEntryEvent, BoundaryError> {
        let mut found: Option<ConversationEntryEvent> = None;
        let mut populated: Vec<&'static str> = Vec::new();
        {
            let mut put = |name: &'static str, event: ConversationEntryEvent| {
                populated.push(name);
                found = Some(event);
            };
            if let Some(inner) = self.completion_event {
                put("completionEvent", ConversationEntryEvent::Completion(inner));
            }
            if let Some(inner) = self.tool_use_event {
                put("toolUseEvent", ConversationEntryEvent::ToolUse(inner));
            }
            if let Some(inner) = self.search_queries_event {
                put(
                    "searchQueriesEvent",
                    ConversationEntryEvent::SearchQueries(inner),
                );
            }
            if let Some(inner) = self.search_status_event {
                put(
                    "searchStatusEvent",
                    ConversationEntryEvent::SearchStatus(inner),
                );
            }
            if let Some(inner) = self.sources_event {
                put("sourcesEvent", ConversationEntryEvent::Sources(inner));
            }
            if let Some(inner) = self.content_receipt_event {
                put(
                    "contentReceiptEvent",
                    ConversationEntryEvent::ContentReceipt(inner),
                );
            }
            if let Some(inner) = self.conversation_title_event {
                put(
                    "conversationTitleEvent",
                    ConversationEntryEvent::ConversationTitle(inner),
                );
            }
            if let Some(inner) = self.selected_language_event {
                put(
                    "selectedLanguageEvent",
                    ConversationEntryEvent::SelectedLanguage(inner),
                );
            }
        }

        match (found, populated.len()) {
            (None, _) => Err(BoundaryError::EmptyEvent),
            (Some(event), 1) => Ok(event),
            (Some(_), _) => Err(BoundaryError::AmbiguousEvent { populated }),
        }
    }
}

/// A conversation turn as the transport delivers it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConversationTurn {
    pub uuid: String,
    pub character_type: CharacterType,
    #[serde(default)]
    pub action_type: Option<ActionType>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub selected_text: Option<String>,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub events: Option<Vec<RawEntryEvent>>,
    #[serde(default)]
    pub edits: Option<Vec<RawConversationTurn>>,
    #[serde(default)]
    pub model_key: Option<String>,
}

impl RawConversationTurn {
    pub fn into_turn(self) -> Result<ConversationTurn, BoundaryError> {
        let events = match self.events {
            Some(raw_events) => {
                let mut events = Vec::with_capacity(raw_events.len());
                for (index, raw) in raw_events.into_iter().enumerate() {
                    let event = raw.into_event().map_err(|source| BoundaryError::InvalidEvent {
                        index,
                        source: Box::new(source),
                    })?;
                    events.push(event);
                }
                Some(events)
            }
            None => None,
        };

        let edits = match self.edits {
            Some(raw_edits) => {
                let mut edits = Vec::with_capacity(raw_edits.len());
                for (index, raw) in raw_edits.into_iter().enumerate() {
                    let edit = raw.into_turn().map_err(|source| BoundaryError::InvalidEdit {
                        index,
                        source: Box::new(source),
                    })?;
                    edits.push(edit);
                }
                Some(edits)
            }
            None => None,
        };

        Ok(ConversationTurn {
            uuid: self.uuid,
            character_type: self.character_type,
            action_type: self.action_type,
            text: self.text,
            prompt: self.prompt,
            selected_text: self.selected_text,
            created_time: self.created_time,
            events,
            edits,
            model_key: self.model_key,
        })
    }
}

/// Parse a full-state refresh payload: the engine's "here is the whole
/// history" notification.
pub fn parse_snapshot(json: &str) -> Result<Vec<ConversationTurn>, BoundaryError> {
    let raw_turns: Vec<RawConversationTurn> = serde_json::from_str(json)?;
    let mut turns = Vec::with_capacity(raw_turns.len());
    for (index, raw) in raw_turns.into_iter().enumerate() {
        let turn = raw.into_turn().map_err(|source| BoundaryError::InvalidTurn {
            index,
            source: Box::new(source),
        })?;
        turns.push(turn);
    }
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion_raw(text: &str) -> RawEntryEvent {
        RawEntryEvent {
            completion_event: Some(CompletionEvent {
                completion: text.to_string(),
            }),
            ..RawEntryEvent::default()
        }
    }

    #[test]
    fn single_variant_converts() {
        let event = completion_raw("hello").into_event().unwrap();
        assert_eq!(event.as_completion().map(|c| c.completion.as_str()), Some("hello"));
    }

    #[test]
    fn empty_event_rejected() {
        assert!(matches!(
            RawEntryEvent::default().into_event(),
            Err(BoundaryError::EmptyEvent)
        ));
    }

    #[test]
    fn doubled_event_rejected() {
        let raw = RawEntryEvent {
            search_status_event: Some(SearchStatusEvent { is_searching: true }),
            ..completion_raw("hello")
        };
        match raw.into_event() {
            Err(BoundaryError::AmbiguousEvent { populated }) => {
                assert_eq!(populated, vec!["completionEvent", "searchStatusEvent"]);
            }
            other => panic!("expected AmbiguousEvent, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_parses_wire_json() {
        let json = r#"[
            {
                "uuid": "turn-1",
                "characterType": "Human",
                "actionType": "Query",
                "text": "What changed on this page?",
                "createdTime": "2026-01-10T12:00:00Z"
            },
            {
                "uuid": "turn-2",
                "characterType": "Assistant",
                "text": "",
                "createdTime": "2026-01-10T12:00:01Z",
                "events": [
                    {
                        "toolUseEvent": {
                            "id": "call-1",
                            "toolName": "web_page_navigation",
                            "argumentsJson": "{\"url\":\"https://example.com\"}"
                        }
                    },
                    { "completionEvent": { "completion": "The header is new." } }
                ]
            }
        ]"#;

        let turns = parse_snapshot(json).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].character_type, CharacterType::Human);
        assert_eq!(turns[1].events().len(), 2);
        let tool_use = turns[1].events()[0].as_tool_use().unwrap();
        assert_eq!(tool_use.tool_name, "web_page_navigation");
        assert!(!tool_use.is_complete());
    }

    #[test]
    fn snapshot_reports_bad_event_position() {
        let json = r#"[
            {
                "uuid": "turn-1",
                "characterType": "Assistant",
                "text": "",
                "createdTime": "2026-01-10T12:00:00Z",
                "events": [
                    { "completionEvent": { "completion": "ok" } },
                    {}
                ]
            }
        ]"#;

        match parse_snapshot(json) {
            Err(BoundaryError::InvalidTurn { index: 0, source }) => match *source {
                BoundaryError::InvalidEvent { index: 1, source } => {
                    assert!(matches!(*source, BoundaryError::EmptyEvent));
                }
                other => panic!("expected InvalidEvent, got {other:?}"),
            },
            other => panic!("expected InvalidTurn, got {other:?}"),
        }
    }

    #[test]
    fn edits_convert_recursively() {
        let json = r#"{
            "uuid": "turn-1",
            "characterType": "Human",
            "text": "first wording",
            "createdTime": "2026-01-10T12:00:00Z",
            "edits": [
                {
                    "uuid": "turn-1-edit-1",
                    "characterType": "Human",
                    "text": "better wording",
                    "createdTime": "2026-01-10T12:01:00Z"
                }
            ]
        }"#;

        let raw: RawConversationTurn = serde_json::from_str(json).unwrap();
        let turn = raw.into_turn().unwrap();
        assert_eq!(turn.display_text(), "better wording");
    }
}
