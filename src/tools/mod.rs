pub mod catalog;

pub use catalog::{crisis_tools, find_tool, CopingTool, CrisisLevel, ToolCategory, CATALOG};
