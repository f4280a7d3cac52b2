use crate::event::ConversationEntryEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterType {
    Human,
    Assistant,
}

/// How a human turn was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActionType {
    Unspecified,
    Query,
    Summarize,
    Explain,
}

/// One message in a conversation.
///
/// Turns are owned by the conversation history and never mutated in place:
/// the engine replaces a turn wholesale or the view layer patches it
/// copy-on-write, and corrections are appended to `edits` rather than
/// overwriting the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub uuid: String,
    pub character_type: CharacterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    /// Fallback text, rendered when the turn carries no events.
    pub text: String,
    /// The prompt actually sent to the model, when it differs from `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Page text the turn was asked about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    pub created_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<ConversationEntryEvent>>,
    /// Later versions of this turn, oldest first. Append-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edits: Option<Vec<ConversationTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_key: Option<String>,
}

impl ConversationTurn {
    /// Events of this turn, empty when the engine sent none.
    pub fn events(&self) -> &[ConversationEntryEvent] {
        self.events.as_deref().unwrap_or_default()
    }

    /// The most recent edit, if the turn has been edited.
    pub fn latest_edit(&self) -> Option<&ConversationTurn> {
        self.edits.as_ref().and_then(|edits| edits.last())
    }

    /// Text to render: the latest edit's text when edits exist, the turn's
    /// own text otherwise.
    pub fn display_text(&self) -> &str {
        self.latest_edit()
            .map_or(self.text.as_str(), |edit| edit.text.as_str())
    }
}
