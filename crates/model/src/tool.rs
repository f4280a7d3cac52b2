use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tool that asks the user to pick one of several choices.
pub const USER_CHOICE_TOOL_NAME: &str = "user_choice_tool";
/// Tool that records a user memory. Bookkeeping, not task work.
pub const MEMORY_STORAGE_TOOL_NAME: &str = "memory_storage_tool";
/// Tool that navigates the associated page. Surfaced in task summaries.
pub const PAGE_NAVIGATION_TOOL_NAME: &str = "web_page_navigation";

/// A single tool invocation and, once the engine finishes, its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseEvent {
    /// Call id. Expected unique within one turn's event list, not globally.
    pub id: String,
    pub tool_name: String,
    /// Raw JSON arguments. May be a malformed prefix while streaming.
    pub arguments_json: String,
    /// `None` until the tool has produced output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_challenge: Option<PermissionChallenge>,
    #[serde(default)]
    pub requires_user_interaction: bool,
}

/// Why a tool's arguments could not be parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgumentsError {
    #[error("no arguments received yet")]
    Empty,
    #[error("malformed arguments: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolUseEvent {
    /// Whether the tool has finished and produced output.
    pub fn is_complete(&self) -> bool {
        self.output.is_some()
    }

    /// Parse `arguments_json`. Arguments stream in incrementally, so a
    /// prefix of a JSON document is an expected failure, not a bug.
    pub fn parse_arguments(&self) -> Result<serde_json::Value, ArgumentsError> {
        if self.arguments_json.trim().is_empty() {
            return Err(ArgumentsError::Empty);
        }
        Ok(serde_json::from_str(&self.arguments_json)?)
    }

    /// [`Self::parse_arguments`] for callers that render an in-progress
    /// placeholder (active event) or nothing (historical event) on failure.
    pub fn arguments(&self) -> Option<serde_json::Value> {
        self.parse_arguments().ok()
    }
}

/// Payload of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    Text { text: String },
    Image { url: String },
}

/// Permission the user has to settle before the tool can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionChallenge {
    pub kind: String,
    /// `None` while the user has not answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted: Option<bool>,
}
