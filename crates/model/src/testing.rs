use crate::event::{
    CompletionEvent, ConversationEntryEvent, SearchQueriesEvent, WebSource, WebSourcesEvent,
};
use crate::tool::{ContentBlock, ToolUseEvent};
use crate::turn::{ActionType, CharacterType, ConversationTurn};

/// Human turn with the given text and no events.
pub fn human_turn(text: &str) -> ConversationTurn {
    ConversationTurn {
        uuid: uuid::Uuid::new_v4().to_string(),
        character_type: CharacterType::Human,
        action_type: Some(ActionType::Query),
        text: text.to_string(),
        prompt: None,
        selected_text: None,
        created_time: chrono::Utc::now(),
        events: None,
        edits: None,
        model_key: None,
    }
}

/// Assistant turn carrying the given events.
pub fn assistant_turn(events: Vec<ConversationEntryEvent>) -> ConversationTurn {
    ConversationTurn {
        uuid: uuid::Uuid::new_v4().to_string(),
        character_type: CharacterType::Assistant,
        action_type: None,
        text: String::new(),
        prompt: None,
        selected_text: None,
        created_time: chrono::Utc::now(),
        events: Some(events),
        edits: None,
        model_key: None,
    }
}

pub fn completion_event(text: &str) -> ConversationEntryEvent {
    ConversationEntryEvent::Completion(CompletionEvent {
        completion: text.to_string(),
    })
}

pub fn search_queries_event(queries: &[&str]) -> ConversationEntryEvent {
    ConversationEntryEvent::SearchQueries(SearchQueriesEvent {
        search_queries: queries.iter().map(|q| q.to_string()).collect(),
    })
}

/// Sources event with one [`WebSource`] per url, titled after the url.
pub fn sources_event(urls: &[&str]) -> ConversationEntryEvent {
    ConversationEntryEvent::Sources(WebSourcesEvent {
        sources: urls
            .iter()
            .map(|url| WebSource {
                title: url.to_string(),
                url: url.to_string(),
                favicon_url: None,
            })
            .collect(),
    })
}

/// In-flight tool use: empty-object arguments, no output yet.
pub fn tool_use(tool_name: &str, id: &str) -> ToolUseEvent {
    ToolUseEvent {
        id: id.to_string(),
        tool_name: tool_name.to_string(),
        arguments_json: "{}".to_string(),
        output: None,
        permission_challenge: None,
        requires_user_interaction: false,
    }
}

/// Completed tool use with a single text output block.
pub fn completed_tool_use(tool_name: &str, id: &str, output: &str) -> ToolUseEvent {
    ToolUseEvent {
        output: Some(vec![ContentBlock::Text {
            text: output.to_string(),
        }]),
        ..tool_use(tool_name, id)
    }
}

/// [`tool_use`] wrapped as an entry event.
pub fn tool_use_event(tool_name: &str, id: &str) -> ConversationEntryEvent {
    ConversationEntryEvent::ToolUse(tool_use(tool_name, id))
}
