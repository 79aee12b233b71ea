use serde::{Deserialize, Serialize};

/// Type of vital sign the health tracker records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    HeartRate,
    BloodPressure,
    Temperature,
    BloodOxygen,
}

impl VitalType {
    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::HeartRate => "heart_rate",
            VitalType::BloodPressure => "blood_pressure",
            VitalType::Temperature => "temperature",
            VitalType::BloodOxygen => "blood_oxygen",
        }
    }
}

/// A parsed "systolic/diastolic" reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl BloodPressure {
    /// Parse "120/80" (surrounding whitespace allowed). Returns `None` for
    /// anything else, including zero values.
    pub fn parse(raw: &str) -> Option<Self> {
        let (sys, dia) = raw.trim().split_once('/')?;
        let systolic: u32 = sys.trim().parse().ok()?;
        let diastolic: u32 = dia.trim().parse().ok()?;
        if systolic == 0 || diastolic == 0 {
            return None;
        }
        Some(Self { systolic, diastolic })
    }

    pub fn band(&self) -> BloodPressureBand {
        if self.systolic >= 130 || self.diastolic >= 80 {
            BloodPressureBand::High
        } else if self.systolic >= 120 {
            BloodPressureBand::Elevated
        } else {
            BloodPressureBand::Normal
        }
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Blood pressure ranges as quoted in the blood pressure guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodPressureBand {
    /// Less than 120/80 mmHg.
    Normal,
    /// 120-129 systolic, less than 80 diastolic.
    Elevated,
    /// 130/80 mmHg or higher.
    High,
}

/// Resting heart rate ranges for adults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRateBand {
    Low,
    Normal,
    High,
}

impl HeartRateBand {
    pub fn of(bpm: u32) -> Self {
        match bpm {
            0..=59 => HeartRateBand::Low,
            60..=100 => HeartRateBand::Normal,
            _ => HeartRateBand::High,
        }
    }
}
