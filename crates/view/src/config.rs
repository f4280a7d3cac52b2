use chatpane_model::tool::{
    MEMORY_STORAGE_TOOL_NAME, PAGE_NAVIGATION_TOOL_NAME, USER_CHOICE_TOOL_NAME,
};

/// Tool-name policy for task grouping and extraction.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Tools that don't count toward the task threshold: user prompts and
    /// memory bookkeeping happen inside ordinary responses too.
    pub non_task_tools: Vec<String>,
    /// Tools whose latest invocation is surfaced in the task summary.
    pub important_tools: Vec<String>,
    /// Non-excluded tool uses required before a group counts as a task.
    pub task_tool_use_threshold: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            non_task_tools: vec![
                USER_CHOICE_TOOL_NAME.to_string(),
                MEMORY_STORAGE_TOOL_NAME.to_string(),
            ],
            important_tools: vec![PAGE_NAVIGATION_TOOL_NAME.to_string()],
            task_tool_use_threshold: 2,
        }
    }
}

impl TaskConfig {
    pub fn is_non_task_tool(&self, tool_name: &str) -> bool {
        self.non_task_tools.iter().any(|name| name == tool_name)
    }

    pub fn is_important_tool(&self, tool_name: &str) -> bool {
        self.important_tools.iter().any(|name| name == tool_name)
    }
}
