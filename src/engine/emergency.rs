//! Emergency phrase detection with typo tolerance.
//!
//! Runs before any other classification. A match short-circuits the turn into
//! the emergency response. Patterns are matched against normalized text: lower
//! case ASCII letters separated by single spaces, so "Can't  BREATHE!!" is seen
//! as "cant breathe".

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CustomEmergencyPattern};

/// Medical emergency the user's message appears to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyCategory {
    VomitingBlood,
    BreathingDifficulty,
    SevereChestPain,
    LossOfConsciousness,
    SuicidalIdeation,
    Stroke,
    SevereAllergicReaction,
    Overdose,
    SuddenSevereHeadache,
}

impl EmergencyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VomitingBlood => "vomiting_blood",
            Self::BreathingDifficulty => "breathing_difficulty",
            Self::SevereChestPain => "severe_chest_pain",
            Self::LossOfConsciousness => "loss_of_consciousness",
            Self::SuicidalIdeation => "suicidal_ideation",
            Self::Stroke => "stroke",
            Self::SevereAllergicReaction => "severe_allergic_reaction",
            Self::Overdose => "overdose",
            Self::SuddenSevereHeadache => "sudden_severe_headache",
        }
    }
}

/// A compiled pattern with the category it signals.
#[derive(Debug, Clone)]
struct EmergencyPattern {
    regex: Regex,
    category: EmergencyCategory,
}

// Fragments shared by several patterns. `severe!` accepts "sever", "sevre",
// "severe"; `cant!` accepts "cant", "cnt", "cannot", "can not".
macro_rules! severe {
    () => {
        r"sev+e?re?"
    };
}
macro_rules! cant {
    () => {
        r"ca?n\s*(?:no)?t"
    };
}
macro_rules! breath {
    () => {
        r"bre?a?th"
    };
}

/// Built-in patterns, one per category, in evaluation order.
const BUILTIN_PATTERNS: &[(EmergencyCategory, &str)] = &[
    (
        EmergencyCategory::VomitingBlood,
        r"vom+i*t*(?:ed|ing|s)?\s*(?:up\s*)?blood|blood\s*in\s*(?:my\s*)?vom|(?:cough|spit|throw|threw)[a-z]*\s*(?:up\s*)?(?:some\s*)?blood",
    ),
    (
        EmergencyCategory::BreathingDifficulty,
        concat!(
            cant!(), r"\s*(?:catch\s*my\s*)?", breath!(),
            r"|(?:dif+icult[a-z]*|trouble|struggl[a-z]*|hard\s*time)\s*(?:with\s*|in\s*)?(?:my\s*)?", breath!(),
            r"|(?:hard|unable|not\s*able)\s*to\s*", breath!(),
            r"|short(?:ness)?\s*of\s*", breath!(),
            r"|gasping\s*for\s*air",
        ),
    ),
    (
        EmergencyCategory::SevereChestPain,
        concat!(
            severe!(), r"\s*chest\s*pa?i?n",
            r"|chest\s*pa?i?n\s*(?:is\s*)?(?:very\s*|really\s*)?", severe!(),
            r"|h(?:ea|e|a)rt\s*at+ack",
            r"|chest\s*hurts?\s*(?:so\s*|really\s*|very\s*)?bad",
        ),
    ),
    (
        EmergencyCategory::LossOfConsciousness,
        r"pas+(?:ed|t|ing)?\s*out|faint|(?:lost|losing|lose)\s*cons?c?iou?s*(?:ness)?|uncons?c?ious|black(?:ed|ing)?\s*out",
    ),
    (
        EmergencyCategory::SuicidalIdeation,
        r"sui?c+id(?:al|e)|wan(?:t|na)\s*(?:to\s*)?die|kil+\s*my\s*self|end\s*my\s*life|end\s*it\s*all|(?:hurt|harm)\s*my\s*self|self\s*harm",
    ),
    (
        EmergencyCategory::Stroke,
        concat!(
            r"stroke|", cant!(), r"\s*move?",
            r"|paraly[sz]|face\s*(?:is\s*)?droop|drooping\s*face",
            r"|slur+(?:ed|ing)?\s*(?:my\s*)?speech|speech\s*(?:is\s*)?slur+ed",
        ),
    ),
    (
        EmergencyCategory::SevereAllergicReaction,
        concat!(
            r"al+er?g(?:ic|y|ik)?\s*reaction\s*(?:is\s*)?(?:very\s*|really\s*)?", severe!(),
            "|", severe!(), r"\s*al+er?g(?:ic|y|ik)?\s*reaction",
            r"|anaphyla|throat\s*(?:is\s*)?(?:clos|swel)",
            "|", cant!(), r"\s*swal+ow",
            r"|tongue\s*(?:is\s*)?swel",
        ),
    ),
    (
        EmergencyCategory::Overdose,
        r"over\s*dos|took\s*(?:too|to)\s*many?\s*(?:pill|tablet|meds)|poison|ac+ident[a-z]*\s*(?:ingest|swal+ow)",
    ),
    (
        EmergencyCategory::SuddenSevereHeadache,
        concat!(
            severe!(), r"\s*head\s*ache?s?\s*(?:came\s*on\s*)?sudden",
            r"|sudden(?:ly)?\s*(?:and\s*)?(?:a\s*)?", severe!(), r"\s*head\s*(?:ache?|pain)",
            r"|worst\s*head\s*ache?\s*(?:of\s*my\s*life|ever)",
            r"|thunderclap\s*head",
        ),
    ),
];

static BUILTIN: LazyLock<Vec<EmergencyPattern>> = LazyLock::new(|| {
    BUILTIN_PATTERNS
        .iter()
        .map(|(category, re)| EmergencyPattern {
            regex: Regex::new(re).expect("Invalid built-in emergency pattern"),
            category: *category,
        })
        .collect()
});

/// Normalize free text for emergency matching: lower-case, drop everything
/// that is not an ASCII letter or whitespace, collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered set of emergency patterns. Cheap to clone; the built-in regexes
/// are compiled once per process.
#[derive(Debug, Clone)]
pub struct EmergencyMatcher {
    patterns: Vec<EmergencyPattern>,
}

impl Default for EmergencyMatcher {
    fn default() -> Self {
        Self {
            patterns: BUILTIN.clone(),
        }
    }
}

impl EmergencyMatcher {
    /// Built-in patterns followed by `extra`, in the given order.
    pub fn with_extra_patterns(extra: &[CustomEmergencyPattern]) -> Result<Self, ConfigError> {
        let mut matcher = Self::default();
        for custom in extra {
            let regex = Regex::new(&custom.pattern).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: custom.pattern.clone(),
                    source,
                }
            })?;
            matcher.patterns.push(EmergencyPattern {
                regex,
                category: custom.category,
            });
        }
        Ok(matcher)
    }

    /// First matching category, if any.
    pub fn detect(&self, text: &str) -> Option<EmergencyCategory> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(&normalized))
            .map(|p| p.category)
    }

    pub fn is_emergency(&self, text: &str) -> bool {
        self.detect(text).is_some()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
