//! In-memory health tracker: vitals, symptoms, medications and activity.
//!
//! Acts as the live `ContextProvider` for a conversation. Entries are only
//! held for the lifetime of the process.

use std::sync::RwLock;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use super::ContextProvider;
use crate::models::{BloodPressure, HealthContext, RecentVitals, VitalType};

#[derive(Error, Debug, PartialEq)]
pub enum HealthLogError {
    #[error("Invalid {vital} reading: {value:?}")]
    InvalidReading { vital: &'static str, value: String },

    #[error("Health log lock poisoned")]
    LockPoisoned,
}

/// One validated vital sign entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalEntry {
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VitalValue {
    Whole(u32),
    Decimal(f64),
    Pressure(BloodPressure),
}

#[derive(Debug, Clone)]
struct SymptomEntry {
    name: String,
    resolved: bool,
}

#[derive(Debug, Default)]
struct LogData {
    vitals: Vec<VitalEntry>,
    symptoms: Vec<SymptomEntry>,
    medications: Vec<String>,
    last_activity: Option<String>,
}

#[derive(Debug, Default)]
pub struct HealthLog {
    data: RwLock<LogData>,
}

impl HealthLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a vital sign reading as entered by the user.
    pub fn record_vital(&self, vital_type: VitalType, raw: &str) -> Result<(), HealthLogError> {
        let value = parse_vital(vital_type, raw)?;
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        data.vitals.push(VitalEntry {
            vital_type,
            value,
            recorded_at: Local::now().naive_local(),
        });
        tracing::debug!(vital = vital_type.as_str(), "Recorded vital reading");
        Ok(())
    }

    /// Log a symptom. Re-logging a resolved symptom makes it active again.
    pub fn log_symptom(&self, name: &str) -> Result<(), HealthLogError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Ok(());
        }
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        match data.symptoms.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.resolved = false,
            None => data.symptoms.push(SymptomEntry {
                name,
                resolved: false,
            }),
        }
        Ok(())
    }

    /// Mark a symptom as resolved. Returns false if it was not active.
    pub fn resolve_symptom(&self, name: &str) -> Result<bool, HealthLogError> {
        let name = name.trim().to_lowercase();
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        match data
            .symptoms
            .iter_mut()
            .find(|s| s.name == name && !s.resolved)
        {
            Some(entry) => {
                entry.resolved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_medication(&self, name: &str) -> Result<(), HealthLogError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        if !data.medications.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            data.medications.push(name.to_string());
        }
        Ok(())
    }

    /// Remove a medication by name (case-insensitive).
    pub fn remove_medication(&self, name: &str) -> Result<bool, HealthLogError> {
        let name = name.trim();
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        let before = data.medications.len();
        data.medications.retain(|m| !m.eq_ignore_ascii_case(name));
        Ok(data.medications.len() != before)
    }

    pub fn record_activity(&self, description: &str) -> Result<(), HealthLogError> {
        let description = description.trim();
        let mut data = self.data.write().map_err(|_| HealthLogError::LockPoisoned)?;
        data.last_activity = (!description.is_empty()).then(|| description.to_string());
        Ok(())
    }

    /// Latest entry for a given vital type.
    pub fn latest(&self, vital_type: VitalType) -> Option<VitalEntry> {
        let data = self.data.read().ok()?;
        data.vitals
            .iter()
            .rev()
            .find(|v| v.vital_type == vital_type)
            .cloned()
    }

    fn snapshot(&self) -> Result<HealthContext, HealthLogError> {
        let data = self.data.read().map_err(|_| HealthLogError::LockPoisoned)?;

        let mut vitals = RecentVitals::default();
        // Later entries overwrite earlier ones.
        for entry in &data.vitals {
            match (entry.vital_type, &entry.value) {
                (VitalType::HeartRate, VitalValue::Whole(bpm)) => vitals.heart_rate = Some(*bpm),
                (VitalType::BloodOxygen, VitalValue::Whole(pct)) => {
                    vitals.blood_oxygen = Some(*pct)
                }
                (VitalType::Temperature, VitalValue::Decimal(t)) => vitals.temperature = Some(*t),
                (VitalType::BloodPressure, VitalValue::Pressure(bp)) => {
                    vitals.blood_pressure = Some(bp.to_string())
                }
                _ => {}
            }
        }

        Ok(HealthContext {
            recent_vitals: (!vitals.is_empty()).then_some(vitals),
            symptoms: data
                .symptoms
                .iter()
                .filter(|s| !s.resolved)
                .map(|s| s.name.clone())
                .collect(),
            medications: data.medications.clone(),
            last_activity: data.last_activity.clone(),
        })
    }
}

impl ContextProvider for HealthLog {
    fn health_context(&self) -> HealthContext {
        self.snapshot().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Health log unavailable, using empty context");
            HealthContext::default()
        })
    }
}

fn parse_vital(vital_type: VitalType, raw: &str) -> Result<VitalValue, HealthLogError> {
    let trimmed = raw.trim();
    let invalid = || HealthLogError::InvalidReading {
        vital: vital_type.as_str(),
        value: raw.to_string(),
    };

    match vital_type {
        VitalType::HeartRate => trimmed
            .parse::<u32>()
            .ok()
            .filter(|bpm| (20..=300).contains(bpm))
            .map(VitalValue::Whole)
            .ok_or_else(invalid),
        VitalType::BloodOxygen => trimmed
            .parse::<u32>()
            .ok()
            .filter(|pct| (1..=100).contains(pct))
            .map(VitalValue::Whole)
            .ok_or_else(invalid),
        VitalType::Temperature => trimmed
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && (80.0..=115.0).contains(t))
            .map(VitalValue::Decimal)
            .ok_or_else(invalid),
        VitalType::BloodPressure => BloodPressure::parse(trimmed)
            .map(VitalValue::Pressure)
            .ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_gives_empty_context() {
        let log = HealthLog::new();
        assert_eq!(log.health_context(), HealthContext::default());
    }

    #[test]
    fn latest_reading_wins() {
        let log = HealthLog::new();
        log.record_vital(VitalType::HeartRate, "80").unwrap();
        log.record_vital(VitalType::HeartRate, "72").unwrap();
        log.record_vital(VitalType::BloodPressure, "118/76").unwrap();

        let ctx = log.health_context();
        assert_eq!(ctx.heart_rate(), Some(72));
        assert_eq!(ctx.blood_pressure(), Some("118/76"));
        assert!(ctx.temperature().is_none());
        assert_eq!(
            log.latest(VitalType::HeartRate).map(|e| e.value),
            Some(VitalValue::Whole(72))
        );
    }

    #[test]
    fn invalid_readings_are_rejected() {
        let log = HealthLog::new();
        assert_eq!(
            log.record_vital(VitalType::HeartRate, "fast"),
            Err(HealthLogError::InvalidReading {
                vital: "heart_rate",
                value: "fast".into(),
            })
        );
        assert!(log.record_vital(VitalType::BloodPressure, "120").is_err());
        assert!(log.record_vital(VitalType::BloodOxygen, "140").is_err());
        assert!(log.record_vital(VitalType::Temperature, "NaN").is_err());
        assert!(log.health_context().recent_vitals.is_none());
    }

    #[test]
    fn resolved_symptoms_leave_the_snapshot() {
        let log = HealthLog::new();
        log.log_symptom("Headache").unwrap();
        log.log_symptom("fatigue").unwrap();
        assert!(log.resolve_symptom("headache").unwrap());
        assert!(!log.resolve_symptom("headache").unwrap());

        let ctx = log.health_context();
        assert!(!ctx.has_symptom("headache"));
        assert!(ctx.has_symptom("fatigue"));

        log.log_symptom("headache").unwrap();
        assert!(log.health_context().has_symptom("headache"));
    }

    #[test]
    fn medications_keep_insertion_order_without_duplicates() {
        let log = HealthLog::new();
        log.add_medication("Lisinopril").unwrap();
        log.add_medication("Atorvastatin").unwrap();
        log.add_medication("lisinopril").unwrap();
        assert_eq!(
            log.health_context().medications,
            vec!["Lisinopril".to_string(), "Atorvastatin".to_string()]
        );

        assert!(log.remove_medication("LISINOPRIL").unwrap());
        assert!(!log.remove_medication("Metformin").unwrap());
        assert_eq!(log.health_context().medications, vec!["Atorvastatin".to_string()]);
    }

    #[test]
    fn activity_is_replaced_and_blank_clears() {
        let log = HealthLog::new();
        log.record_activity("Walking for 30 minutes").unwrap();
        assert_eq!(
            log.health_context().last_activity.as_deref(),
            Some("Walking for 30 minutes")
        );
        log.record_activity("  ").unwrap();
        assert!(log.health_context().last_activity.is_none());
    }
}
