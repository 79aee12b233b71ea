//! Response templates for every intent.
//!
//! Fixed prose with a small number of optional, context-derived clauses. A
//! clause whose data is missing is left out entirely; no template ever renders
//! a placeholder. Emergency text is never personalized.

use serde::{Deserialize, Serialize};

use super::classify::Intent;
use crate::models::{
    BloodPressure, BloodPressureBand, HealthContext, HeartRateBand, MessageCategory,
};

/// Rendered bot reply for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReply {
    pub intent: Intent,
    pub text: String,
    pub category: MessageCategory,
}

pub const WELCOME: &str = "Hi there! I'm ChatMate, your calm and caring health companion. \
I'm here to support you with any wellness concerns, symptoms, or health questions you have.\n\n\
💙 I understand that health concerns can be stressful, and I'm here to provide gentle guidance \
and support. Just tell me what's on your mind, and I'll do my best to help.\n\n\
Type 'help' or 'menu' if you'd like to see what I can assist with.";

pub const EMERGENCY: &str = "⚠️ I'm really sorry you're going through this. This could be a medical \
emergency. Please seek immediate help from a doctor or emergency services near you.\n\n\
🚨 **Please call emergency services right away** or go to the nearest emergency room. \
Your safety is the most important thing right now.\n\n\
I'm here for you, but please get professional medical help immediately.";

const THANKS: &str = "You're welcome! I'm always here if you need me. Hope you feel better soon 💙";

const HELP: &str = "I'm here to support you with your health and wellness concerns. Here's how I can help:\n\n\
🩺 **Symptom guidance** - Support for headaches, nausea, fatigue, and more\n\
💊 **Medication questions** - General information about medications\n\
🏃 **Fitness & nutrition** - Exercise and diet guidance\n\
😌 **Mental wellness** - Stress, anxiety, and sleep support\n\
📊 **Health tracking** - Understanding your vital signs\n\
🚨 **Emergency guidance** - When to seek immediate care\n\n\
Just tell me what's concerning you, like 'I have a headache' or 'feeling anxious'. \
I'm here to listen and help.\n\n\
💙 Remember, I'm not a doctor, but I care about your wellbeing and want to support you. \
What would you like to talk about first?";

const CRAMPS: &str = "I'm sorry you're dealing with cramps - they can be really uncomfortable. \
Let me help you understand what might help:\n\n\
**For muscle cramps:**\n\
• Gentle stretching and massage of the affected area\n\
• Stay hydrated and consider electrolyte balance\n\
• Apply heat or cold - whatever feels better to you\n\
• Rest the affected muscle\n\n\
**For menstrual cramps:**\n\
• Heat therapy (heating pad, warm bath) often provides relief\n\
• Gentle movement like walking can help\n\
• Over-the-counter pain relievers as directed\n\
• Try our breathing exercises in the Wellness section\n\n\
**For stomach cramps:**\n\
• Sip clear fluids slowly\n\
• Try gentle abdominal massage\n\
• Consider what you've eaten recently\n\
• Rest in a comfortable position\n\n\
**Please seek medical attention if:**\n\
• Cramps are severe or getting worse\n\
• You have fever, nausea, or other concerning symptoms\n\
• The pain is interfering with your daily activities\n\n\
You can track your symptoms in the Health Tracker. How are you feeling right now?";

const DIZZINESS: &str = "I'm sorry you're feeling dizzy - that can be really unsettling. \
Let me help you with some gentle guidance:\n\n\
**Immediate steps:**\n\
• Sit or lie down safely right now\n\
• Take slow, deep breaths\n\
• Sip water slowly if you can\n\
• Avoid sudden movements\n\n\
**Common causes and gentle remedies:**\n\
• Dehydration - sip water throughout the day\n\
• Low blood sugar - try a small snack\n\
• Standing up too quickly - move slowly when changing positions\n\
• Stress or anxiety - try our breathing exercises\n\n\
**When to seek medical care:**\n\
• Dizziness with chest pain or trouble breathing\n\
• Severe headache with dizziness\n\
• Dizziness that doesn't improve with rest\n\
• If you're concerned about the severity\n\n\
You can track this in the Health Tracker. Are you feeling a bit better now that you're resting?";

const HEADACHE_BODY: &str = "Headaches can be so draining. \
Let me share some gentle approaches that might help:\n\n\
**Immediate comfort measures:**\n\
• Find a quiet, dark space to rest\n\
• Apply a cold or warm compress to your head or neck\n\
• Try gentle neck and shoulder stretches\n\
• Stay hydrated with small sips of water\n\
• Consider our breathing exercises in the Wellness section\n\n\
**Gentle prevention strategies:**\n\
• Regular sleep schedule (7-9 hours)\n\
• Stay hydrated throughout the day\n\
• Manage stress with relaxation techniques\n\
• Notice any food or environmental triggers\n\n\
**Please seek medical attention if:**\n\
• Sudden, severe headache unlike any you've had\n\
• Headache with fever, stiff neck, or vision changes\n\
• Headaches that are getting worse or more frequent\n\
• Any headache that worries you\n\n\
You can track this in the Health Tracker to help identify patterns. \
How severe is your pain right now on a scale of 1-10?";

const FATIGUE_BODY: &str = "Fatigue can affect everything in your day. \
Let me offer some gentle support:\n\n\
**Immediate self-care:**\n\
• Allow yourself to rest - your body is telling you something\n\
• Stay hydrated with water throughout the day\n\
• Try light, nourishing foods\n\
• Step outside for fresh air if possible\n\n\
**Gentle energy-supporting strategies:**\n\
• Consistent sleep schedule, even if sleep is difficult\n\
• Light movement like a short walk when you feel able\n\
• Stress management - try our meditation features\n\
• Consider if anything has changed in your routine lately\n\n\
**When to reach out for medical support:**\n\
• Fatigue lasting more than 2 weeks\n\
• Fatigue with other symptoms like fever or pain\n\
• If it's significantly impacting your daily life\n\
• Any concerns about underlying causes\n\n";

const FATIGUE_CLOSING: &str =
    "You can track your energy levels in the Health Tracker. Have you been able to get adequate rest lately?";

const NAUSEA: &str = "I'm sorry you're feeling nauseous - that's such an uncomfortable feeling. \
Let me help you with some gentle remedies:\n\n\
**Immediate comfort measures:**\n\
• Sit quietly and breathe slowly through your nose\n\
• Sip small amounts of clear fluids (water, ginger tea)\n\
• Try ginger - ginger tea, ginger ale, or ginger candies\n\
• Get some fresh air if possible\n\
• Avoid strong smells\n\n\
**Gentle foods when you feel ready:**\n\
• Plain crackers or toast\n\
• Rice or bananas\n\
• Clear broths\n\
• Small, frequent sips rather than large amounts\n\n\
**Please seek medical attention if:**\n\
• Persistent vomiting for more than 24 hours\n\
• Signs of dehydration (dizziness, dry mouth, little urination)\n\
• Severe abdominal pain with nausea\n\
• Blood in vomit\n\
• High fever with nausea\n\n\
You can track this symptom in the Health Tracker. Are you able to keep small sips of water down?";

const FEVER_OPENING: &str = "I'm sorry you're not feeling well with a fever. \
Fevers can make you feel really miserable.";

const FEVER_BODY: &str = "Let me help you understand what's happening and how to care for yourself:\n\n\
**Understanding fever:**\n\
• Normal: 97.8-99.1°F (36.5-37.3°C)\n\
• Low-grade fever: 99.1-100.4°F (37.3-38°C)\n\
• Fever: Above 100.4°F (38°C)\n\n\
**Gentle self-care:**\n\
• Rest as much as possible\n\
• Stay hydrated with water, clear broths, or electrolyte solutions\n\
• Dress lightly and keep your room cool\n\
• Take your temperature regularly\n\
• Use a cool, damp cloth on your forehead if it feels good\n\n\
**Seek immediate medical attention if:**\n\
• Temperature above 103°F (39.4°C)\n\
• Fever with severe headache, stiff neck, or rash\n\
• Difficulty breathing or chest pain\n\
• Persistent vomiting or signs of dehydration\n\
• Fever lasting more than 3 days\n\n\
How high is your temperature, and how long have you been feeling this way?";

const COUGH: &str = "I'm sorry you're dealing with a cough - they can be so persistent and tiring. \
Let me share some gentle ways to help soothe your throat and manage the cough:\n\n\
**Soothing remedies:**\n\
• Warm liquids like tea with honey (honey is naturally soothing)\n\
• Use a humidifier or breathe steam from a hot shower\n\
• Throat lozenges or hard candies to keep your throat moist\n\
• Elevate your head while sleeping\n\
• Stay hydrated throughout the day\n\n\
**Types of coughs:**\n\
• Dry cough: Often from irritation, try moisture and soothing remedies\n\
• Productive cough: Brings up mucus, stay hydrated to help thin secretions\n\n\
**Please see a healthcare provider if:**\n\
• Cough persists more than 3 weeks\n\
• Coughing up blood\n\
• High fever with cough\n\
• Difficulty breathing or chest pain\n\
• Thick, colored mucus that concerns you\n\n\
Avoid smoke and other irritants if possible. \
How long have you had this cough, and is it keeping you awake at night?";

const ANXIETY: &str = "I hear that you're feeling stressed or anxious, and I want you to know \
that these feelings are completely valid. It takes courage to reach out, and I'm here to support you:\n\n\
**Immediate calming techniques:**\n\
• Take slow, deep breaths - in for 4, hold for 4, out for 6\n\
• Try the 5-4-3-2-1 grounding technique: name 5 things you see, 4 you can touch, \
3 you hear, 2 you smell, 1 you taste\n\
• Place your hand on your heart and feel it beating\n\
• Try our breathing exercises in the Wellness section\n\n\
**Gentle ongoing support:**\n\
• Regular gentle movement like walking\n\
• Adequate sleep (even if it's difficult right now)\n\
• Connect with people who care about you\n\
• Limit caffeine if it makes you feel more anxious\n\
• Practice self-compassion - be kind to yourself\n\n\
**Please reach out for professional support if:**\n\
• Anxiety is significantly impacting your daily life\n\
• You're having panic attacks\n\
• You feel overwhelmed and can't cope\n\
• You're having thoughts of self-harm\n\n\
You deserve support and care. What's been weighing on your mind lately?";

const SLEEP: &str = "I understand how frustrating sleep problems can be - when you can't sleep well, \
everything else feels harder. Let me share some gentle approaches that might help:\n\n\
**Creating a peaceful sleep environment:**\n\
• Keep your bedroom cool, dark, and quiet\n\
• Use your bed only for sleep\n\
• Try a consistent bedtime routine that relaxes you\n\
• Avoid screens 1 hour before bed if possible\n\n\
**Gentle sleep preparation:**\n\
• No caffeine after 2 PM\n\
• Light exercise during the day, but not close to bedtime\n\
• Try our meditation and breathing exercises\n\
• Consider chamomile tea or other calming rituals\n\
• Write down worries in a journal to clear your mind\n\n\
**If sleep continues to be difficult:**\n\
• Keep a sleep diary to identify patterns\n\
• Consider if stress, medications, or health issues might be involved\n\
• Talk to a healthcare provider if problems persist more than 2 weeks\n\n\
Sleep is so important for your overall wellbeing. What's been making it hard for you to sleep lately?";

const BLOOD_PRESSURE_BODY: &str = "Let me share some helpful information about blood pressure:\n\n\
**Understanding blood pressure:**\n\
• Normal: Less than 120/80 mmHg\n\
• Elevated: 120-129 systolic, less than 80 diastolic\n\
• High: 130/80 mmHg or higher\n\n\
**Heart-healthy lifestyle approaches:**\n\
• Reduce sodium in your diet when possible\n\
• Regular gentle physical activity\n\
• Maintain a healthy weight\n\
• Limit alcohol\n\
• Manage stress with relaxation techniques\n\
• Get adequate, quality sleep\n\n\
Always follow your doctor's recommendations for monitoring and any medications. \
Regular check-ups are important for heart health.\n\n\
Are you concerned about a recent reading, or would you like tips for maintaining healthy blood pressure?";

const HEART_RATE_BODY: &str = "Here's what you should know about heart rate:\n\n\
**Normal heart rate ranges:**\n\
• Normal adult range: 60-100 bpm at rest\n\
• Athletes often have: 40-60 bpm\n\
• Factors that affect heart rate: fitness level, age, medications, stress, caffeine, emotions\n\n\
**When to be gently concerned:**\n\
• Consistently above 100 bpm at rest\n\
• Below 60 bpm with symptoms (dizziness, fatigue)\n\
• Irregular rhythm that feels concerning\n\
• Sudden changes that worry you\n\n\
**Supporting heart health:**\n\
• Regular gentle exercise\n\
• Stress management\n\
• Adequate sleep\n\
• Staying hydrated\n\
• Limiting caffeine if it affects you\n\n\
Regular monitoring helps you understand your personal patterns. Are you noticing any changes that concern you?";

const PAIN: &str = "I'm really sorry you're experiencing pain. Pain can be so draining and affect \
everything you do. Let me offer some gentle approaches that might help:\n\n\
**Gentle pain management strategies:**\n\
• Heat or cold therapy - use whatever feels better to you\n\
• Gentle stretching or movement if it doesn't worsen pain\n\
• Relaxation techniques and deep breathing\n\
• Proper rest and positioning\n\
• Distraction with activities you enjoy\n\
• Stay hydrated and nourished\n\n\
**When to seek medical attention:**\n\
• Severe or rapidly worsening pain\n\
• Pain after an injury\n\
• Pain with fever or other concerning symptoms\n\
• Pain that's significantly affecting your daily life\n\
• New or unusual pain patterns\n\
• Any pain that worries you\n\n\
Chronic pain can be especially challenging, and you deserve support and effective treatment. \
Don't suffer in silence - there are many approaches that can help.\n\n\
Can you tell me more about where the pain is and how long you've been experiencing it?";

const MEDICATION_BODY: &str = "Medication management is really important for your health and safety:\n\n\
**Safe medication practices:**\n\
• Take medications exactly as prescribed\n\
• Set reminders to help with consistent timing\n\
• Don't skip doses without talking to your doctor\n\
• Store medications properly (cool, dry place)\n\
• Keep an updated list for emergencies\n\
• Ask questions if you're unsure about anything\n\n\
**Important reminders:**\n\
• Never stop medications suddenly without consulting your healthcare provider\n\
• Report any side effects or concerns to your doctor or pharmacist\n\
• Be honest about all medications and supplements you take\n\
• Keep medications in original containers with labels\n\n\
**If you're experiencing side effects or have concerns,** please reach out to your \
healthcare provider or pharmacist. They're there to help you.\n\n\
Is there something specific about your medications that's concerning you?";

const GREETING: &str = "Hello! I'm so glad you reached out. I'm here to support you with any health \
concerns or questions you might have. Whether you're dealing with symptoms, feeling stressed, \
or just want to learn about wellness, I'm here to listen and help.\n\n\
What's on your mind today? I'm here for you. 💙";

const VAGUE: &str = "I want to help and support you. Could you tell me a bit more about what \
you're feeling or what's concerning you?\n\n\
For example:\n\
• \"I have a headache\" - I can suggest gentle relief strategies\n\
• \"Feeling anxious\" - I can share calming techniques\n\
• \"About my medication\" - I can provide general guidance\n\n\
I'm here to listen and provide caring support. What would you like to talk about? 💙";

const FALLBACK: &str = "I want to provide you with the most helpful and caring support. \
Based on what you've shared, I'd love to help you more specifically.\n\n\
Could you tell me a bit more about what's concerning you? For example:\n\
• Describe any symptoms you're experiencing\n\
• Share what's been worrying you about your health\n\
• Ask about specific health topics\n\n\
I'm here to listen without judgment and provide gentle guidance. Your wellbeing matters, \
and I want to support you in the best way I can. 💙\n\n\
Remember, while I care deeply about helping you, I'm not a doctor. For serious concerns, \
please don't hesitate to reach out to a healthcare provider.";

/// Render the reply for `intent`. Deterministic in (intent, context).
pub fn render_response(intent: Intent, ctx: &HealthContext) -> EngineReply {
    let (text, category) = match intent {
        Intent::Emergency(_) => (EMERGENCY.to_string(), MessageCategory::Warning),
        Intent::Thanks => (THANKS.to_string(), MessageCategory::Normal),
        Intent::Help => (HELP.to_string(), MessageCategory::Suggestion),
        Intent::Cramps => (CRAMPS.to_string(), MessageCategory::Normal),
        Intent::Dizziness => (DIZZINESS.to_string(), MessageCategory::Normal),
        Intent::Headache => (headache(ctx), MessageCategory::Normal),
        Intent::Fatigue => (fatigue(ctx), MessageCategory::Normal),
        Intent::Nausea => (NAUSEA.to_string(), MessageCategory::Normal),
        Intent::Fever => (fever(ctx), MessageCategory::Normal),
        Intent::Cough => (COUGH.to_string(), MessageCategory::Normal),
        Intent::Anxiety => (ANXIETY.to_string(), MessageCategory::Suggestion),
        Intent::Sleep => (SLEEP.to_string(), MessageCategory::Suggestion),
        Intent::BloodPressure => (blood_pressure(ctx), MessageCategory::Normal),
        Intent::HeartRate => (heart_rate(ctx), MessageCategory::Normal),
        Intent::Pain => (PAIN.to_string(), MessageCategory::Normal),
        Intent::Medication => (medication(ctx), MessageCategory::Suggestion),
        Intent::Greeting => (GREETING.to_string(), MessageCategory::Normal),
        Intent::Vague => (VAGUE.to_string(), MessageCategory::Suggestion),
        Intent::Fallback => (FALLBACK.to_string(), MessageCategory::Suggestion),
    };

    EngineReply {
        intent,
        text,
        category,
    }
}

/// Join an optional opening sentence and the template body with one space.
fn with_opening(opening: Option<String>, body: &str) -> String {
    match opening {
        Some(opening) => format!("{opening} {body}"),
        None => body.to_string(),
    }
}

fn headache(ctx: &HealthContext) -> String {
    let ack = if ctx.has_symptom("headache") {
        " - I see this has been bothering you"
    } else {
        ""
    };
    format!("I'm really sorry you're dealing with a headache{ack}. {HEADACHE_BODY}")
}

fn fatigue(ctx: &HealthContext) -> String {
    let ack = if ctx.has_symptom("fatigue") {
        " - I see fatigue is already in your log"
    } else {
        ""
    };
    let activity = ctx
        .last_activity()
        .map(|a| format!("Your last logged activity was \"{a}\", so be gentle with yourself today.\n\n"))
        .unwrap_or_default();
    format!(
        "I hear that you're feeling really tired{ack}, and I understand how exhausting that can be. \
         {FATIGUE_BODY}{activity}{FATIGUE_CLOSING}"
    )
}

fn fever(ctx: &HealthContext) -> String {
    let opening = match ctx.temperature() {
        Some(t) => format!("{FEVER_OPENING} Your last recorded temperature was {t:.1}°F."),
        None => FEVER_OPENING.to_string(),
    };
    format!("{opening} {FEVER_BODY}")
}

fn blood_pressure(ctx: &HealthContext) -> String {
    let opening = ctx.blood_pressure().map(|raw| match BloodPressure::parse(raw) {
        Some(bp) => {
            let assessment = match bp.band() {
                BloodPressureBand::Normal => "which is in the normal range. That's good news!",
                BloodPressureBand::Elevated => {
                    "which falls in the elevated range. It's worth keeping an eye on."
                }
                BloodPressureBand::High => {
                    "which is in the high range. Please share it with your doctor if it stays there."
                }
            };
            format!("I see your recent blood pressure reading was {bp}, {assessment}")
        }
        None => format!("I see your recent blood pressure reading was {raw}."),
    });
    with_opening(opening, BLOOD_PRESSURE_BODY)
}

fn heart_rate(ctx: &HealthContext) -> String {
    let opening = ctx.heart_rate().map(|bpm| {
        let assessment = match HeartRateBand::of(bpm) {
            HeartRateBand::Normal => "is within normal range, which is reassuring.",
            HeartRateBand::Low => {
                "is below the typical resting range, which can be normal for very active people."
            }
            HeartRateBand::High => "is above the typical resting range.",
        };
        format!("Your recent heart rate reading of {bpm} bpm {assessment}")
    });
    with_opening(opening, HEART_RATE_BODY)
}

fn medication(ctx: &HealthContext) -> String {
    let opening = (!ctx.medications.is_empty())
        .then(|| format!("I see you're currently taking {}.", ctx.medications.join(", ")));
    with_opening(opening, MEDICATION_BODY)
}
