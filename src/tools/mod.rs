pub mod augment_prompt;
pub(crate) mod common;
pub mod exec;
pub mod factory;
pub mod file_exists;
pub mod file_read;
pub mod file_write;
pub mod list_dir;
pub mod registry;
pub mod shell;
pub mod traits;

pub use augment_prompt::AugmentPromptTool;
pub use factory::default_registry;
pub use file_exists::FileExistsTool;
pub use file_read::FileReadTool;
pub use file_write::FileWriteTool;
pub use list_dir::ListDirTool;
pub use registry::ToolRegistry;
pub use run_tests::RunTestsTool;
pub use shell::ShellTool;
pub use traits::{Tool, ToolContext, ToolResult, ToolSpec};
