//! End-to-end engine behavior: raw text in, rendered reply out.

use super::*;
use crate::models::{HealthContext, MessageCategory, RecentVitals};

fn engine() -> ResponseEngine {
    ResponseEngine::default()
}

fn personal_context() -> HealthContext {
    HealthContext::default()
        .with_vitals(RecentVitals {
            heart_rate: Some(72),
            blood_pressure: Some("120/80".into()),
            temperature: Some(98.6),
            blood_oxygen: Some(98),
        })
        .with_symptom("headache")
        .with_symptom("fatigue")
        .with_medication("Lisinopril")
        .with_medication("Atorvastatin")
        .with_last_activity("Walking for 30 minutes")
}

#[test]
fn emergency_variants_render_warning() {
    for text in [
        "I vomitted blood this morning",
        "blood in vomit",
        "I can't breathe!!",
        "severe chest pain",
        "my friend passed out",
        "I'm having suicidal thoughts",
        "I think he's having a stroke",
        "anaphylaxis",
        "I think I overdosed",
        "worst headache of my life",
    ] {
        let reply = engine().respond(text, &personal_context());
        assert_eq!(reply.category, MessageCategory::Warning, "{text}");
        assert!(reply.text.contains("call emergency services"), "{text}");
        assert!(reply.intent.is_emergency());
    }
}

#[test]
fn emergency_beats_gratitude() {
    let reply = engine().respond("thanks, I'm vomiting blood", &HealthContext::default());
    assert_eq!(reply.category, MessageCategory::Warning);
    assert!(!reply.text.contains("You're welcome"));
}

#[test]
fn headache_before_fatigue() {
    let reply = engine().respond("I have a headache and feel tired", &HealthContext::default());
    assert_eq!(reply.intent, Intent::Headache);
}

#[test]
fn headache_with_empty_context() {
    let reply = engine().respond("I have a headache", &HealthContext::default());
    assert_eq!(reply.category, MessageCategory::Normal);
    assert!(reply.text.contains("**Immediate comfort measures:**"));
    assert!(reply.text.contains("**Gentle prevention strategies:**"));
    assert!(reply.text.contains("**Please seek medical attention if:**"));
    assert!(reply.text.ends_with("on a scale of 1-10?"));
    assert!(!reply.text.contains("I see this has been bothering you"));
}

#[test]
fn suicidal_thoughts_ignore_context() {
    let with = engine().respond("suicidal thoughts", &personal_context());
    let without = engine().respond("suicidal thoughts", &HealthContext::default());
    assert_eq!(with.category, MessageCategory::Warning);
    assert_eq!(with.text, without.text);
    assert!(with.text.contains("emergency services"));
}

#[test]
fn thanks_is_context_independent() {
    let with = engine().respond("thanks", &personal_context());
    let without = engine().respond("thanks", &HealthContext::default());
    assert_eq!(with.category, MessageCategory::Normal);
    assert_eq!(with.text, without.text);
    assert!(with.text.starts_with("You're welcome!"));
}

#[test]
fn heart_rate_context_interpolation() {
    let reply = engine().respond("what's my heart rate like", &personal_context());
    assert!(reply.text.contains("72"));

    let reply = engine().respond("what's my heart rate like", &HealthContext::default());
    assert!(!reply.text.contains("Your recent heart rate reading"));
    assert!(!reply.text.is_empty());
}

#[test]
fn vague_boundary_end_to_end() {
    let reply = engine().respond("feelingok", &HealthContext::default());
    assert_eq!(reply.intent, Intent::Vague);
    assert_eq!(reply.category, MessageCategory::Suggestion);

    let reply = engine().respond("I feel kind of off", &HealthContext::default());
    assert_eq!(reply.intent, Intent::Fallback);
    assert!(reply.text.contains("I'm not a doctor"));
}

#[test]
fn responses_are_deterministic() {
    let ctx = personal_context();
    for text in ["my blood pressure", "I need my medicine", "hello", "cramps"] {
        assert_eq!(engine().respond(text, &ctx), engine().respond(text, &ctx));
    }
}

#[test]
fn every_input_gets_a_reply() {
    for text in ["", " ", "?", "🙂🙂🙂", "asdf qwer zxcv uiop", "1234567890 12345"] {
        let reply = engine().respond(text, &HealthContext::default());
        assert!(!reply.text.is_empty(), "{text:?}");
    }
}
