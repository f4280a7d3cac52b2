use chatpane_model::{ConversationEntryEvent, ConversationTurn, ToolUseEvent};
use std::sync::Arc;
use tracing::debug;

/// Incremental notification from the engine.
#[derive(Debug, Clone)]
pub enum HistoryUpdate {
    /// Full-state refresh; replaces the history wholesale.
    Snapshot(Vec<ConversationTurn>),
    /// A turn appended to the end of the conversation.
    EntryAdded(ConversationTurn),
    /// A turn replaced in place, matched by uuid. Unknown uuids append.
    EntryUpdated(ConversationTurn),
    /// A tool-use event inside one turn got new state, typically output.
    ToolUseUpdated {
        entry_uuid: String,
        tool_use: ToolUseEvent,
    },
}

/// Replace the tool-use event whose id matches `tool_use.id` inside the
/// turn identified by `entry_uuid`.
///
/// Returns `None` when the turn is missing, has no events, or has no
/// tool-use event with that id; callers treat that as not-found, never as
/// an error. On success only the patched turn is newly allocated; every
/// other turn is the same `Arc`, so unchanged turns keep their pointer
/// identity for the renderer's dirty checks. Only the first turn matching
/// `entry_uuid` is considered: call ids are unique within a turn's event
/// list, not across the conversation.
pub fn update_tool_use_event_in_history(
    history: &[Arc<ConversationTurn>],
    entry_uuid: &str,
    tool_use: ToolUseEvent,
) -> Option<Vec<Arc<ConversationTurn>>> {
    let Some(turn_index) = history.iter().position(|turn| turn.uuid == entry_uuid) else {
        debug!(entry_uuid, "tool use update for unknown turn");
        return None;
    };

    let turn = &history[turn_index];
    let Some(events) = turn.events.as_ref() else {
        debug!(entry_uuid, "tool use update for turn without events");
        return None;
    };

    let Some(event_index) = events.iter().position(|event| {
        matches!(event, ConversationEntryEvent::ToolUse(existing) if existing.id == tool_use.id)
    }) else {
        debug!(entry_uuid, tool_use_id = %tool_use.id, "tool use update for unknown call id");
        return None;
    };

    let mut events = events.clone();
    events[event_index] = ConversationEntryEvent::ToolUse(tool_use);

    let mut patched = ConversationTurn::clone(turn);
    patched.events = Some(events);

    let mut next = history.to_vec();
    next[turn_index] = Arc::new(patched);
    Some(next)
}

/// Apply one engine notification to the history, returning the next history.
/// Untouched turns stay `Arc`-shared with the input.
pub fn apply_history_update(
    history: &[Arc<ConversationTurn>],
    update: HistoryUpdate,
) -> Vec<Arc<ConversationTurn>> {
    match update {
        HistoryUpdate::Snapshot(turns) => turns.into_iter().map(Arc::new).collect(),
        HistoryUpdate::EntryAdded(turn) => {
            let mut next = history.to_vec();
            next.push(Arc::new(turn));
            next
        }
        HistoryUpdate::EntryUpdated(turn) => {
            let mut next = history.to_vec();
            match next.iter().position(|existing| existing.uuid == turn.uuid) {
                Some(index) => next[index] = Arc::new(turn),
                None => next.push(Arc::new(turn)),
            }
            next
        }
        HistoryUpdate::ToolUseUpdated {
            entry_uuid,
            tool_use,
        } => update_tool_use_event_in_history(history, &entry_uuid, tool_use)
            .unwrap_or_else(|| history.to_vec()),
    }
}
