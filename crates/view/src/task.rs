use crate::config::TaskConfig;
use chatpane_model::{ConversationEntryEvent, ConversationTurn, ToolUseEvent};
use std::sync::Arc;

/// Derived display data for one task group. Borrowed from the turn list and
/// recomputed on every render pass, never stored.
#[derive(Debug)]
pub struct TaskData<'a> {
    /// Events split into steps: a new step starts at each completion event,
    /// so a completion always heads its step except for a possible leading
    /// step of pre-completion events. Steps are never empty.
    pub task_items: Vec<Vec<&'a ConversationEntryEvent>>,
    /// Every source url seen in a sources event, in encounter order. Not
    /// deduplicated; citation numbering indexes into this list.
    pub allowed_links: Vec<String>,
    /// Latest tool use per important tool name, in first-seen name order.
    pub important_tool_use_events: Vec<&'a ToolUseEvent>,
}

/// One forward pass over the group's flattened events, producing the step
/// split, the allowed-link list, and the latest important tool uses.
pub fn extract_task_data<'a>(
    turns: &'a [Arc<ConversationTurn>],
    config: &TaskConfig,
) -> TaskData<'a> {
    let mut task_items: Vec<Vec<&'a ConversationEntryEvent>> = Vec::new();
    let mut current_item: Vec<&'a ConversationEntryEvent> = Vec::new();
    let mut allowed_links: Vec<String> = Vec::new();
    let mut important: Vec<(&'a str, &'a ToolUseEvent)> = Vec::new();

    for event in turns.iter().flat_map(|turn| turn.events()) {
        match event {
            ConversationEntryEvent::Completion(_) => {
                if !current_item.is_empty() {
                    task_items.push(std::mem::take(&mut current_item));
                }
                current_item.push(event);
            }
            ConversationEntryEvent::Sources(sources) => {
                allowed_links.extend(sources.sources.iter().map(|source| source.url.clone()));
                current_item.push(event);
            }
            ConversationEntryEvent::ToolUse(tool_use) => {
                if config.is_important_tool(&tool_use.tool_name) {
                    match important
                        .iter_mut()
                        .find(|(name, _)| *name == tool_use.tool_name)
                    {
                        Some(slot) => slot.1 = tool_use,
                        None => important.push((tool_use.tool_name.as_str(), tool_use)),
                    }
                }
                current_item.push(event);
            }
            _ => current_item.push(event),
        }
    }
    if !current_item.is_empty() {
        task_items.push(current_item);
    }

    TaskData {
        task_items,
        allowed_links,
        important_tool_use_events: important.into_iter().map(|(_, event)| event).collect(),
    }
}
