use super::augment_prompt::AugmentPromptTool;
use super::file_exists::FileExistsTool;
use super::file_read::FileReadTool;
use super::file_write::FileWriteTool;
use super::list_dir::ListDirTool;
use super::registry::ToolRegistry;
use super::run_tests::RunTestsTool;
use super::shell::ShellTool;

/// Build the full workspace tool set.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(FileReadTool::new()));
    registry.register(Box::new(FileWriteTool::new()));
    registry.register(Box::new(FileExistsTool::new()));
    registry.register(Box::new(ListDirTool::new()));
    registry.register(Box::new(ShellTool::new()));
    registry.register(Box::new(RunTestsTool::new()));
    registry.register(Box::new(AugmentPromptTool::new()));
    registry
}
