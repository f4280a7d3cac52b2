use crate::tool::ToolUseEvent;
use serde::{Deserialize, Serialize};

/// One typed sub-unit of a turn's output.
///
/// Exactly one variant per value. The transport's looser all-optional
/// representation is converted and checked in [`crate::boundary`], so code
/// past that module never sees an empty or doubled-up event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ConversationEntryEvent {
    Completion(CompletionEvent),
    ToolUse(ToolUseEvent),
    SearchQueries(SearchQueriesEvent),
    SearchStatus(SearchStatusEvent),
    Sources(WebSourcesEvent),
    ContentReceipt(ContentReceiptEvent),
    ConversationTitle(ConversationTitleEvent),
    SelectedLanguage(SelectedLanguageEvent),
}

impl ConversationEntryEvent {
    pub fn as_completion(&self) -> Option<&CompletionEvent> {
        match self {
            Self::Completion(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUseEvent> {
        match self {
            Self::ToolUse(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_sources(&self) -> Option<&WebSourcesEvent> {
        match self {
            Self::Sources(event) => Some(event),
            _ => None,
        }
    }
}

/// A chunk of assistant response text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub completion: String,
}

/// Search queries the engine issued while answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueriesEvent {
    pub search_queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatusEvent {
    pub is_searching: bool,
}

/// A page the engine consulted while answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSource {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSourcesEvent {
    pub sources: Vec<WebSource>,
}

/// Token accounting for the content sent with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReceiptEvent {
    pub total_tokens: u64,
    pub trimmed_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTitleEvent {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLanguageEvent {
    pub selected_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{completion_event, sources_event, tool_use_event};

    #[test]
    fn completion_roundtrip() {
        let event = completion_event("Here is the answer.");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Completion"));

        let parsed: ConversationEntryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn accessors_match_variant() {
        let completion = completion_event("text");
        let tool_use = tool_use_event("web_page_navigation", "call-1");
        let sources = sources_event(&["https://example.com"]);

        assert!(completion.as_completion().is_some());
        assert!(completion.as_tool_use().is_none());
        assert!(tool_use.as_tool_use().is_some());
        assert!(tool_use.as_sources().is_none());
        assert_eq!(
            sources.as_sources().map(|s| s.sources.len()),
            Some(1)
        );
    }

    #[test]
    fn sources_event_camel_case_payload() {
        let event = sources_event(&["https://example.com/a"]);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"url\":\"https://example.com/a\""));
        // Absent favicon is omitted entirely.
        assert!(!json.contains("faviconUrl"));
    }
}
