use serde::{Deserialize, Serialize};

use super::emergency::EmergencyCategory;
use Keyword::{Exact, Phrase, Word};

/// Topic bucket selected for a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Emergency(EmergencyCategory),
    Thanks,
    Help,
    Cramps,
    Dizziness,
    Headache,
    Fatigue,
    Nausea,
    Fever,
    Cough,
    Anxiety,
    Sleep,
    BloodPressure,
    HeartRate,
    Pain,
    Medication,
    Greeting,
    /// Too short or a single word: ask for more detail.
    Vague,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency(_) => "emergency",
            Self::Thanks => "thanks",
            Self::Help => "help",
            Self::Cramps => "cramps",
            Self::Dizziness => "dizziness",
            Self::Headache => "headache",
            Self::Fatigue => "fatigue",
            Self::Nausea => "nausea",
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Anxiety => "anxiety",
            Self::Sleep => "sleep",
            Self::BloodPressure => "blood_pressure",
            Self::HeartRate => "heart_rate",
            Self::Pain => "pain",
            Self::Medication => "medication",
            Self::Greeting => "greeting",
            Self::Vague => "vague",
            Self::Fallback => "fallback",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::Emergency(_))
    }
}

/// How a keyword is found in lower-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Substring anywhere in the text.
    Phrase(&'static str),
    /// A whole alphabetic token. Used for short keywords that would
    /// otherwise fire inside longer words ("ty" in "anxiety").
    Word(&'static str),
    /// The entire message, ignoring surrounding punctuation.
    Exact(&'static str),
}

impl Keyword {
    fn matches(&self, text: &TextView<'_>) -> bool {
        match self {
            Keyword::Phrase(p) => text.lower.contains(p),
            Keyword::Word(w) => text.words.iter().any(|t| t == w),
            Keyword::Exact(e) => text.bare == *e,
        }
    }
}

/// One row of the intent table. The rule fires if any keyword matches.
#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [Keyword],
}

/// Content rules in evaluation order. The first rule with a matching keyword
/// decides the intent, so gratitude and help are checked before symptoms and
/// greetings come last.
pub static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Thanks,
        keywords: &[Phrase("thank you"), Phrase("thanks"), Word("thnx"), Word("ty")],
    },
    IntentRule {
        intent: Intent::Help,
        keywords: &[
            Phrase("help"),
            Phrase("menu"),
            Exact("what can you do"),
            Exact("options"),
        ],
    },
    IntentRule {
        intent: Intent::Cramps,
        keywords: &[Phrase("cramp")],
    },
    IntentRule {
        intent: Intent::Dizziness,
        keywords: &[
            Phrase("dizzy"),
            Phrase("dizziness"),
            Phrase("lightheaded"),
            Phrase("light headed"),
        ],
    },
    IntentRule {
        intent: Intent::Headache,
        keywords: &[Phrase("headache"), Phrase("head pain"), Phrase("migraine")],
    },
    IntentRule {
        intent: Intent::Fatigue,
        keywords: &[
            Phrase("fatigue"),
            Phrase("tired"),
            Phrase("exhausted"),
            Phrase("energy"),
        ],
    },
    IntentRule {
        intent: Intent::Nausea,
        keywords: &[
            Phrase("nausea"),
            Phrase("nauseous"),
            Phrase("sick to stomach"),
            Phrase("sick to my stomach"),
            Phrase("queasy"),
        ],
    },
    IntentRule {
        intent: Intent::Fever,
        keywords: &[
            Phrase("fever"),
            Phrase("temperature"),
            Word("hot"),
            Phrase("chills"),
        ],
    },
    IntentRule {
        intent: Intent::Cough,
        keywords: &[Phrase("cough")],
    },
    IntentRule {
        intent: Intent::Anxiety,
        keywords: &[
            Phrase("stress"),
            Phrase("anxiety"),
            Phrase("worried"),
            Phrase("anxious"),
            Phrase("panic"),
        ],
    },
    IntentRule {
        intent: Intent::Sleep,
        keywords: &[Phrase("sleep"), Phrase("insomnia")],
    },
    IntentRule {
        intent: Intent::BloodPressure,
        keywords: &[Phrase("blood pressure"), Word("bp"), Phrase("hypertension")],
    },
    IntentRule {
        intent: Intent::HeartRate,
        keywords: &[Phrase("heart rate"), Phrase("pulse"), Phrase("heartbeat")],
    },
    IntentRule {
        intent: Intent::Pain,
        keywords: &[Phrase("pain"), Phrase("hurt"), Phrase("ache"), Phrase("sore")],
    },
    IntentRule {
        intent: Intent::Medication,
        keywords: &[
            Phrase("medication"),
            Phrase("medicine"),
            Phrase("pill"),
            Phrase("drug"),
        ],
    },
    IntentRule {
        intent: Intent::Greeting,
        keywords: &[
            Word("hi"),
            Phrase("hello"),
            Word("hey"),
            Phrase("hiya"),
            Phrase("heyy"),
        ],
    },
];

/// Messages shorter than this (trimmed, in characters) are treated as vague.
pub const VAGUE_MIN_CHARS: usize = 10;

/// Views of the same lower-cased message used by the different keyword kinds.
struct TextView<'a> {
    lower: &'a str,
    bare: &'a str,
    words: Vec<&'a str>,
}

impl<'a> TextView<'a> {
    fn new(lower: &'a str) -> Self {
        Self {
            lower,
            bare: lower.trim_matches(|c: char| !c.is_alphanumeric()),
            words: lower
                .split(|c: char| !c.is_alphabetic())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

/// Pick exactly one non-emergency intent for `text`.
///
/// Does its own lower-casing and does not reuse the emergency normalization.
/// Total: anything no content rule claims becomes `Vague` or `Fallback`.
pub fn classify_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();
    let view = TextView::new(&lower);

    if let Some(rule) = INTENT_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| k.matches(&view)))
    {
        return rule.intent;
    }

    if is_vague(&lower) {
        Intent::Vague
    } else {
        Intent::Fallback
    }
}

fn is_vague(lower: &str) -> bool {
    let trimmed = lower.trim();
    trimmed.chars().count() < VAGUE_MIN_CHARS || !trimmed.contains(char::is_whitespace)
}
