//! Built-in coping tool catalog.
//!
//! Each tool is a guided activity the timer can run: a fixed duration and an
//! ordered step list. The timer maps elapsed time proportionally onto the
//! steps, so step texts are written to read well at even pacing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ToolCategory {
    Breathing,
    Mindfulness,
    Grounding,
    Physical,
    Movement,
    Audio,
    Creative,
    Cognitive,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CopingTool {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ToolCategory,
    pub duration_secs: u64,
    pub description: &'static str,
    pub instruction: &'static str,
    pub steps: &'static [&'static str],
}

pub const CATALOG: &[CopingTool] = &[
    CopingTool {
        id: "deep-breathing",
        name: "Deep Breathing Exercise",
        category: ToolCategory::Breathing,
        duration_secs: 300,
        description: "Guided breathing to calm your nervous system",
        instruction: "Inhale for 4 counts, hold for 4, exhale for 6. Repeat.",
        steps: &[
            "Find a comfortable position",
            "Close your eyes gently",
            "Inhale slowly through your nose for 4 counts",
            "Hold your breath for 4 counts",
            "Exhale slowly through your mouth for 6 counts",
            "Repeat this cycle until the timer ends",
        ],
    },
    CopingTool {
        id: "mindful-eating",
        name: "Mindful Eating Session",
        category: ToolCategory::Mindfulness,
        duration_secs: 300,
        description: "Slow down and eat with full attention",
        instruction: "Move through each step as the timer progresses.",
        steps: &[
            "Take 3 deep breaths and notice how you're feeling",
            "Look at your food: colors, textures, shapes",
            "Bring your food close and take in the aroma",
            "Take a small bite and let it rest in your mouth",
            "Chew slowly, noticing taste and sensation",
            "Continue eating with awareness, pausing between bites",
        ],
    },
    CopingTool {
        id: "emergency-breathing",
        name: "Emergency Breathing",
        category: ToolCategory::Breathing,
        duration_secs: 60,
        description: "4-7-8 breathing technique to calm your nervous system",
        instruction: "Inhale for 4, hold for 7, exhale for 8. Repeat 5 times.",
        steps: &[
            "Inhale through your nose for 4 counts",
            "Hold for 7 counts",
            "Exhale through your mouth for 8 counts",
        ],
    },
    CopingTool {
        id: "grounding",
        name: "5-4-3-2-1 Grounding",
        category: ToolCategory::Grounding,
        duration_secs: 120,
        description: "Sensory grounding to bring you back to the present moment",
        instruction: "Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste.",
        steps: &[
            "Name 5 things you can see",
            "Name 4 things you can touch",
            "Name 3 things you can hear",
            "Name 2 things you can smell",
            "Name 1 thing you can taste",
        ],
    },
    CopingTool {
        id: "ice-cube",
        name: "Ice Cube Technique",
        category: ToolCategory::Physical,
        duration_secs: 30,
        description: "Hold an ice cube to interrupt the emotional eating urge",
        instruction: "Hold an ice cube in your hand. Focus on the sensation.",
        steps: &["Hold the ice cube and focus on the cold sensation"],
    },
    CopingTool {
        id: "quick-walk",
        name: "Quick Walk",
        category: ToolCategory::Movement,
        duration_secs: 300,
        description: "5-minute walk to release endorphins and clear your mind",
        instruction: "Walk around your space or outside. Focus on your steps and breathing.",
        steps: &[
            "Start walking at a comfortable pace",
            "Notice the rhythm of your steps",
            "Match your breathing to your stride",
            "Let your thoughts pass without holding on to them",
        ],
    },
    CopingTool {
        id: "calming-music",
        name: "Calming Music",
        category: ToolCategory::Audio,
        duration_secs: 180,
        description: "Listen to calming music to shift your emotional state",
        instruction: "Play a calming song. Focus on the melody and rhythm.",
        steps: &[
            "Pick a song that settles you",
            "Close your eyes and follow the melody",
            "Notice how your body responds",
        ],
    },
    CopingTool {
        id: "quick-drawing",
        name: "Quick Drawing",
        category: ToolCategory::Creative,
        duration_secs: 240,
        description: "Express your emotions through simple drawing",
        instruction: "Draw whatever comes to mind. Skill doesn't matter, expression does.",
        steps: &[
            "Grab any pen and paper",
            "Draw the first shape that comes to mind",
            "Keep your hand moving without judging the result",
        ],
    },
    CopingTool {
        id: "uplifting-reading",
        name: "Read Something Uplifting",
        category: ToolCategory::Cognitive,
        duration_secs: 300,
        description: "Read a positive quote or short story",
        instruction: "Read something that makes you smile or feel hopeful.",
        steps: &[
            "Choose a short uplifting text",
            "Read it slowly, twice",
            "Sit with the feeling it leaves behind",
        ],
    },
    CopingTool {
        id: "gratitude",
        name: "Gratitude Practice",
        category: ToolCategory::Cognitive,
        duration_secs: 120,
        description: "List 3 things you're grateful for right now",
        instruction: "Write down or think of 3 things you appreciate in this moment.",
        steps: &[
            "Think of one small thing from today you appreciate",
            "Think of one person you're grateful for",
            "Think of one thing about yourself you value",
        ],
    },
];

/// Crisis tiers for the intervention flow. Each tier maps to the subset of
/// the catalog suitable for that intensity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CrisisLevel {
    Severe,
    Moderate,
    Mild,
}

pub fn find_tool(id: &str) -> Option<&'static CopingTool> {
    CATALOG.iter().find(|tool| tool.id == id)
}

pub fn crisis_tools(level: CrisisLevel) -> Vec<&'static CopingTool> {
    let ids: &[&str] = match level {
        CrisisLevel::Severe => &["emergency-breathing", "grounding", "ice-cube"],
        CrisisLevel::Moderate => &["quick-walk", "calming-music", "quick-drawing"],
        CrisisLevel::Mild => &["uplifting-reading", "gratitude"],
    };
    ids.iter().filter_map(|id| find_tool(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, tool) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG.iter().skip(i + 1).all(|other| other.id != tool.id),
                "duplicate tool id {}",
                tool.id
            );
        }
    }

    #[test]
    fn every_tool_has_a_positive_duration_and_steps() {
        for tool in CATALOG {
            assert!(tool.duration_secs > 0, "{} has no duration", tool.id);
            assert!(!tool.steps.is_empty(), "{} has no steps", tool.id);
        }
    }

    #[test]
    fn crisis_tiers_resolve_to_known_tools() {
        assert_eq!(crisis_tools(CrisisLevel::Severe).len(), 3);
        assert_eq!(crisis_tools(CrisisLevel::Moderate).len(), 3);
        assert_eq!(crisis_tools(CrisisLevel::Mild).len(), 2);
    }
}
