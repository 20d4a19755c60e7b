pub mod food_log;
pub mod tool_usage;
pub mod trigger_log;

pub use food_log::{FoodLogEntry, MealType};
pub use tool_usage::ToolUsageEntry;
pub use trigger_log::TriggerLogEntry;
