/// Configuration for pattern analysis with tunable thresholds.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// How many ranked triggers to report
    pub max_common_triggers: usize,

    /// Entries per window for the week-over-week trend comparison
    pub trend_window: usize,

    /// Emotional-eating frequency (percent) above which the high-priority
    /// recommendation fires
    pub high_frequency_threshold_pct: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_common_triggers: 5,
            trend_window: 7,
            high_frequency_threshold_pct: 50.0,
        }
    }
}
