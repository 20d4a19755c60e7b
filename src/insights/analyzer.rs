use std::collections::HashMap;

use chrono::Timelike;

use crate::insights::config::AnalyzerConfig;
use crate::insights::types::{
    DerivedInsights, MoodFoodConnection, PeakTime, Priority, ProgressIndicator, Recommendation,
    TimeSlot, TrendKind, TriggerCount,
};
use crate::models::{FoodLogEntry, TriggerLogEntry};

/// Main analysis function: transforms raw logs into derived insights.
///
/// Pure and infallible: empty or signal-free input degrades to zero counts
/// and empty lists. All rankings break ties by first-seen order so identical
/// input always produces identical output.
pub fn analyze(
    food_logs: &[FoodLogEntry],
    trigger_logs: &[TriggerLogEntry],
    config: &AnalyzerConfig,
) -> DerivedInsights {
    // Edge case: nothing logged yet
    if food_logs.is_empty() && trigger_logs.is_empty() {
        return DerivedInsights::empty();
    }

    // Step 1: emotional eating frequency
    let emotional_count = food_logs.iter().filter(|log| log.is_emotional()).count();
    let emotional_eating_frequency =
        100.0 * emotional_count as f64 / food_logs.len().max(1) as f64;

    // Step 2: trigger ranking
    let common_triggers = rank_triggers(trigger_logs, config.max_common_triggers);

    // Step 3: time-of-day peaks
    let peak_times = rank_peak_times(food_logs);

    // Step 4: mood-food associations
    let mood_food_connections = connect_moods_to_foods(food_logs);

    // Step 5: week-over-week trend
    let progress_indicators = trend_indicator(food_logs, config.trend_window)
        .into_iter()
        .collect();

    // Step 6: threshold-rule recommendations
    let recommendations = build_recommendations(
        emotional_eating_frequency,
        &common_triggers,
        &peak_times,
        config,
    );

    DerivedInsights {
        emotional_eating_frequency,
        common_triggers,
        peak_times,
        mood_food_connections,
        progress_indicators,
        recommendations,
    }
}

/// Flatten all triggers across entries, count occurrences, and rank
/// descending. The stable sort keeps first-seen order on equal counts.
fn rank_triggers(trigger_logs: &[TriggerLogEntry], max: usize) -> Vec<TriggerCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for log in trigger_logs {
        for trigger in &log.triggers {
            let entry = counts.entry(trigger.as_str()).or_insert(0);
            if *entry == 0 {
                first_seen.push(trigger.as_str());
            }
            *entry += 1;
        }
    }

    let mut ranked: Vec<TriggerCount> = first_seen
        .into_iter()
        .map(|trigger| TriggerCount {
            trigger: trigger.to_string(),
            count: counts[trigger],
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(max);
    ranked
}

/// Bucket each entry's eating hour and rank the buckets descending.
/// Zero-count buckets are omitted; ties keep Morning/Afternoon/Evening order.
fn rank_peak_times(food_logs: &[FoodLogEntry]) -> Vec<PeakTime> {
    const SLOTS: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    let mut counts = [0u32; 3];
    for log in food_logs {
        let slot = TimeSlot::from_hour(log.eating_time.hour());
        let idx = SLOTS.iter().position(|s| *s == slot).unwrap_or(2);
        counts[idx] += 1;
    }

    let mut ranked: Vec<PeakTime> = SLOTS
        .iter()
        .zip(counts.iter())
        .filter(|(_, count)| **count > 0)
        .map(|(slot, count)| PeakTime {
            time_slot: *slot,
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// For each mood seen (in first-seen order), find the single most frequent
/// food token among entries tagged with that mood.
fn connect_moods_to_foods(food_logs: &[FoodLogEntry]) -> Vec<MoodFoodConnection> {
    let mut tokens_by_mood: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut mood_order: Vec<&str> = Vec::new();

    for log in food_logs {
        let mood = match log.emotion.as_deref() {
            Some(mood) if !mood.is_empty() => mood,
            _ => continue,
        };
        let tokens = tokens_by_mood.entry(mood).or_default();
        if tokens.is_empty() && !mood_order.contains(&mood) {
            mood_order.push(mood);
        }
        tokens.extend(log.food_items.iter().map(|item| item.as_str()));
    }

    mood_order
        .into_iter()
        .filter_map(|mood| {
            let tokens = &tokens_by_mood[mood];
            top_token(tokens).map(|(food, frequency)| MoodFoodConnection {
                mood: mood.to_string(),
                food: food.to_string(),
                frequency,
            })
        })
        .collect()
}

/// Most frequent token in a slice, ties broken by first-seen order.
fn top_token<'a>(tokens: &[&'a str]) -> Option<(&'a str, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for &token in tokens {
        let entry = counts.entry(token).or_insert(0);
        if *entry == 0 {
            first_seen.push(token);
        }
        *entry += 1;
    }

    // max_by_key would keep the last maximal element; the first-seen token
    // must win ties, so scan with a strictly-greater comparison.
    let mut best: Option<(&str, u32)> = None;
    for token in first_seen {
        let count = counts[token];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((token, count));
        }
    }
    best
}

/// Compare the most recent `window` entries against the `window` before them
/// by emotional-eating proportion. At most one indicator is produced; equal
/// proportions produce none.
fn trend_indicator(food_logs: &[FoodLogEntry], window: usize) -> Option<ProgressIndicator> {
    let mut by_time: Vec<&FoodLogEntry> = food_logs.iter().collect();
    by_time.sort_by_key(|log| log.eating_time);

    let n = by_time.len();
    let recent_start = n.saturating_sub(window);
    let older_start = n.saturating_sub(window * 2);
    let recent = &by_time[recent_start..];
    let older = &by_time[older_start..recent_start];

    if recent.is_empty() || older.is_empty() {
        return None;
    }

    let change_pct = (emotional_proportion(recent) - emotional_proportion(older)) * 100.0;

    if change_pct < 0.0 {
        Some(ProgressIndicator {
            kind: TrendKind::Improvement,
            message: format!(
                "You've reduced emotional eating by {:.1}% this week!",
                change_pct.abs()
            ),
            change_pct,
        })
    } else if change_pct > 0.0 {
        Some(ProgressIndicator {
            kind: TrendKind::Warning,
            message: format!("Emotional eating increased by {change_pct:.1}% this week."),
            change_pct,
        })
    } else {
        None
    }
}

fn emotional_proportion(logs: &[&FoodLogEntry]) -> f64 {
    let emotional = logs.iter().filter(|log| log.is_emotional()).count();
    emotional as f64 / logs.len() as f64
}

/// Recommendations are appended in a fixed order so the highest-leverage one
/// always comes first.
fn build_recommendations(
    frequency: f64,
    common_triggers: &[TriggerCount],
    peak_times: &[PeakTime],
    config: &AnalyzerConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if frequency > config.high_frequency_threshold_pct {
        recommendations.push(Recommendation {
            priority: Priority::High,
            message: "Consider using coping strategies before reaching for food".to_string(),
            action: "Try the 5-minute pause technique".to_string(),
        });
    }

    if let Some(top) = common_triggers.first() {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            message: format!("\"{}\" is your most common trigger", top.trigger),
            action: "Develop a plan for when this trigger occurs".to_string(),
        });
    }

    if peak_times
        .first()
        .is_some_and(|peak| peak.time_slot == TimeSlot::Evening)
    {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            message: "Evening is your peak emotional eating time".to_string(),
            action: "Plan engaging evening activities".to_string(),
        });
    }

    recommendations
}
