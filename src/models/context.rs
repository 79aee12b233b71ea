use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Last recorded value per vital sign. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentVitals {
    /// Beats per minute.
    pub heart_rate: Option<u32>,
    /// "systolic/diastolic", kept as recorded.
    pub blood_pressure: Option<String>,
    /// Degrees Fahrenheit.
    pub temperature: Option<f64>,
    /// SpO2 percentage.
    pub blood_oxygen: Option<u32>,
}

impl RecentVitals {
    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_none()
            && self.blood_pressure.is_none()
            && self.temperature.is_none()
            && self.blood_oxygen.is_none()
    }
}

/// Point-in-time snapshot of the user's recent health data.
///
/// Consumed read-only by the response engine to personalize replies. Missing
/// data never fails a turn; the affected clause is simply left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthContext {
    pub recent_vitals: Option<RecentVitals>,
    /// Currently logged symptom names, stored lower-case.
    pub symptoms: BTreeSet<String>,
    pub medications: Vec<String>,
    pub last_activity: Option<String>,
}

impl HealthContext {
    pub fn with_vitals(mut self, vitals: RecentVitals) -> Self {
        self.recent_vitals = Some(vitals);
        self
    }

    pub fn with_symptom(mut self, name: &str) -> Self {
        self.symptoms.insert(name.trim().to_lowercase());
        self
    }

    pub fn with_medication(mut self, name: &str) -> Self {
        self.medications.push(name.trim().to_string());
        self
    }

    pub fn with_last_activity(mut self, activity: &str) -> Self {
        self.last_activity = Some(activity.trim().to_string());
        self
    }

    /// Case-insensitive symptom membership.
    pub fn has_symptom(&self, name: &str) -> bool {
        self.symptoms.contains(&name.trim().to_lowercase())
    }

    /// Heart rate in bpm, ignoring a zero reading.
    pub fn heart_rate(&self) -> Option<u32> {
        self.recent_vitals
            .as_ref()
            .and_then(|v| v.heart_rate)
            .filter(|bpm| *bpm > 0)
    }

    /// Blood pressure reading, ignoring blank strings.
    pub fn blood_pressure(&self) -> Option<&str> {
        self.recent_vitals
            .as_ref()
            .and_then(|v| v.blood_pressure.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn temperature(&self) -> Option<f64> {
        self.recent_vitals
            .as_ref()
            .and_then(|v| v.temperature)
            .filter(|t| t.is_finite())
    }

    /// Last activity, ignoring blank strings.
    pub fn last_activity(&self) -> Option<&str> {
        self.last_activity
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_empty() {
        let ctx = HealthContext::default();
        assert!(ctx.recent_vitals.is_none());
        assert!(ctx.symptoms.is_empty());
        assert!(ctx.heart_rate().is_none());
        assert!(ctx.blood_pressure().is_none());
        assert!(ctx.last_activity().is_none());
    }

    #[test]
    fn symptom_lookup_ignores_case() {
        let ctx = HealthContext::default().with_symptom("Headache");
        assert!(ctx.has_symptom("headache"));
        assert!(ctx.has_symptom("HEADACHE "));
        assert!(!ctx.has_symptom("fatigue"));
    }

    #[test]
    fn blank_fields_are_treated_as_absent() {
        let ctx = HealthContext {
            recent_vitals: Some(RecentVitals {
                blood_pressure: Some("   ".into()),
                temperature: Some(f64::NAN),
                heart_rate: Some(0),
                ..Default::default()
            }),
            last_activity: Some(String::new()),
            ..Default::default()
        };
        assert!(ctx.heart_rate().is_none());
        assert!(ctx.blood_pressure().is_none());
        assert!(ctx.temperature().is_none());
        assert!(ctx.last_activity().is_none());
    }

    #[test]
    fn recent_vitals_empty_check() {
        assert!(RecentVitals::default().is_empty());
        let vitals = RecentVitals {
            heart_rate: Some(72),
            ..Default::default()
        };
        assert!(!vitals.is_empty());
    }
}
