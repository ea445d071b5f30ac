//! Outputs of a deliberation: the verdict and what it carries.

pub mod citation;
pub mod finding;
pub mod prognosis;
pub mod report;

pub use citation::Citation;
pub use finding::{CriticalFinding, UrgencyTier};
pub use prognosis::PrognosisSnapshot;
pub use report::{FinalVerdict, MedicationSuggestion, RecommendedTest, RejectedHypothesis};
