use serde::Serialize;
use utoipa::ToSchema;

/// Rationale name for planned maintenance events.
pub const RATIONALE_SCHEDULE_SERVICE: &str = "Schedule Service";
/// Rationale name for plain turbine faults.
pub const RATIONALE_FAULT: &str = "Fault";
/// Rationale name for faults handled under the IDF remote-reset scheme.
pub const RATIONALE_IDF_FAULT: &str = "IDF Fault";

/// The three stoppage classes every dashboard figure is bucketed by.
///
/// Single canonical mapping from rationale names; every endpoint classifies
/// through it. Matches are exact, including case and punctuation: the
/// rationale table is reference data the sites do not edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum StoppageClass {
    Scheduled,
    NonScheduled,
    Fault,
}

impl StoppageClass {
    pub fn from_rationale(name: &str) -> Self {
        match name {
            RATIONALE_SCHEDULE_SERVICE => Self::Scheduled,
            RATIONALE_FAULT | RATIONALE_IDF_FAULT => Self::Fault,
            _ => Self::NonScheduled,
        }
    }

    /// Display label used in response payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::NonScheduled => "Non-scheduled",
            Self::Fault => "Fault",
        }
    }
}
