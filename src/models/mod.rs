pub mod context;
pub mod enums;
pub mod message;
pub mod vital_sign;

pub use context::{HealthContext, RecentVitals};
pub use enums::{MessageCategory, Sender};
pub use message::Message;
pub use vital_sign::{BloodPressure, BloodPressureBand, HeartRateBand, VitalType};
