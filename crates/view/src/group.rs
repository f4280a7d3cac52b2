use crate::config::TaskConfig;
use chatpane_model::{CharacterType, ConversationEntryEvent, ConversationTurn};
use std::sync::Arc;
use tracing::warn;

/// Group an ordered turn list for display: consecutive assistant turns merge
/// into one group, every human turn stands alone. No turn is dropped or
/// reordered, so concatenating the groups reproduces the input.
pub fn group_conversation_turns(
    turns: &[Arc<ConversationTurn>],
) -> Vec<Vec<Arc<ConversationTurn>>> {
    let mut groups: Vec<Vec<Arc<ConversationTurn>>> = Vec::new();
    for turn in turns {
        match groups.last_mut() {
            Some(group)
                if turn.character_type == CharacterType::Assistant
                    && group
                        .last()
                        .is_some_and(|last| last.character_type == CharacterType::Assistant) =>
            {
                group.push(Arc::clone(turn));
            }
            _ => groups.push(vec![Arc::clone(turn)]),
        }
    }
    groups
}

/// Whether a group of assistant turns renders as a multi-step task: more
/// than one turn, at least `task_tool_use_threshold` tool uses outside the
/// excluded set, and at least one completion. Stops scanning as soon as the
/// answer is known.
pub fn is_assistant_group_task(group: &[Arc<ConversationTurn>], config: &TaskConfig) -> bool {
    if group.len() <= 1 {
        return false;
    }

    let mut tool_use_count = 0usize;
    let mut has_completion = false;
    for turn in group {
        if turn.character_type != CharacterType::Assistant {
            // Grouping guarantees assistant-only groups; a mixed group is a
            // caller bug, not a task.
            warn!(uuid = %turn.uuid, "non-assistant turn in assistant group");
            return false;
        }
        for event in turn.events() {
            match event {
                ConversationEntryEvent::ToolUse(tool_use)
                    if !config.is_non_task_tool(&tool_use.tool_name) =>
                {
                    tool_use_count += 1;
                }
                ConversationEntryEvent::Completion(_) => has_completion = true,
                _ => {}
            }
            if tool_use_count >= config.task_tool_use_threshold && has_completion {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatpane_model::testing::{
        assistant_turn, completion_event, human_turn, search_queries_event, tool_use_event,
    };
    use chatpane_model::tool::{
        MEMORY_STORAGE_TOOL_NAME, PAGE_NAVIGATION_TOOL_NAME, USER_CHOICE_TOOL_NAME,
    };

    fn arcs(turns: Vec<ConversationTurn>) -> Vec<Arc<ConversationTurn>> {
        turns.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(group_conversation_turns(&[]).is_empty());
    }

    #[test]
    fn single_turn_single_group() {
        let turns = arcs(vec![human_turn("hi")]);
        let groups = group_conversation_turns(&turns);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn consecutive_assistant_turns_merge() {
        let turns = arcs(vec![
            human_turn("question"),
            assistant_turn(vec![completion_event("step one")]),
            assistant_turn(vec![completion_event("step two")]),
            human_turn("follow-up"),
            assistant_turn(vec![completion_event("answer")]),
        ]);

        let groups = group_conversation_turns(&turns);
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 1, 1]);
    }

    #[test]
    fn consecutive_human_turns_stay_singletons() {
        let turns = arcs(vec![human_turn("first"), human_turn("second")]);
        let groups = group_conversation_turns(&turns);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn concatenated_groups_reproduce_input() {
        let turns = arcs(vec![
            assistant_turn(vec![]),
            assistant_turn(vec![]),
            human_turn("a"),
            human_turn("b"),
            assistant_turn(vec![]),
            human_turn("c"),
        ]);

        let groups = group_conversation_turns(&turns);
        let flattened: Vec<&str> = groups
            .iter()
            .flatten()
            .map(|turn| turn.uuid.as_str())
            .collect();
        let expected: Vec<&str> = turns.iter().map(|turn| turn.uuid.as_str()).collect();
        assert_eq!(flattened, expected);
    }

    fn task_group() -> Vec<Arc<ConversationTurn>> {
        arcs(vec![
            assistant_turn(vec![
                tool_use_event(PAGE_NAVIGATION_TOOL_NAME, "call-1"),
                tool_use_event("web_page_reader", "call-2"),
            ]),
            assistant_turn(vec![completion_event("done")]),
        ])
    }

    #[test]
    fn task_requires_multiple_turns() {
        let config = TaskConfig::default();
        let group = arcs(vec![assistant_turn(vec![
            tool_use_event(PAGE_NAVIGATION_TOOL_NAME, "call-1"),
            tool_use_event("web_page_reader", "call-2"),
            completion_event("done"),
        ])]);
        assert!(!is_assistant_group_task(&group, &config));
    }

    #[test]
    fn task_with_tool_uses_and_completion() {
        assert!(is_assistant_group_task(&task_group(), &TaskConfig::default()));
    }

    #[test]
    fn excluded_tools_do_not_count() {
        let config = TaskConfig::default();
        let group = arcs(vec![
            assistant_turn(vec![
                tool_use_event(USER_CHOICE_TOOL_NAME, "call-1"),
                tool_use_event(MEMORY_STORAGE_TOOL_NAME, "call-2"),
            ]),
            assistant_turn(vec![completion_event("done")]),
        ]);
        assert!(!is_assistant_group_task(&group, &config));
    }

    #[test]
    fn task_requires_completion() {
        let config = TaskConfig::default();
        let group = arcs(vec![
            assistant_turn(vec![
                tool_use_event(PAGE_NAVIGATION_TOOL_NAME, "call-1"),
                tool_use_event("web_page_reader", "call-2"),
            ]),
            assistant_turn(vec![search_queries_event(&["news"])]),
        ]);
        assert!(!is_assistant_group_task(&group, &config));
    }

    #[test]
    fn threshold_is_configurable() {
        let config = TaskConfig {
            task_tool_use_threshold: 3,
            ..TaskConfig::default()
        };
        assert!(!is_assistant_group_task(&task_group(), &config));
    }

    #[test]
    fn mixed_group_is_not_a_task() {
        let config = TaskConfig::default();
        let group = arcs(vec![
            human_turn("should not be here"),
            assistant_turn(vec![
                tool_use_event(PAGE_NAVIGATION_TOOL_NAME, "call-1"),
                tool_use_event("web_page_reader", "call-2"),
                completion_event("done"),
            ]),
        ]);
        assert!(!is_assistant_group_task(&group, &config));
    }
}
