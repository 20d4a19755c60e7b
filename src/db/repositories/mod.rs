mod food_logs;
mod tool_usage;
mod trigger_logs;
