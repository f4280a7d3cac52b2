pub mod config;
pub mod group;
pub mod history;
pub mod sanitize;
pub mod task;

pub use config::TaskConfig;
pub use group::{group_conversation_turns, is_assistant_group_task};
pub use history::{HistoryUpdate, apply_history_update, update_tool_use_event_in_history};
pub use sanitize::{get_reasoning_text, remove_citations_with_missing_links, remove_reasoning};
pub use task::{TaskData, extract_task_data};
