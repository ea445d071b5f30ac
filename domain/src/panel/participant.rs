//! Participant value object representing a seat on the panel

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-identity author of transcript entries (Value Object)
///
/// The chair moderates and never votes; `Human` is the external actor
/// answering checkpoints. Every other variant is a specialist seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Participant {
    Chair,
    Human,
    InternalMedicine,
    Cardiology,
    Pulmonology,
    Neurology,
    InfectiousDisease,
    Nephrology,
    Gastroenterology,
    Endocrinology,
    Oncology,
    EmergencyMedicine,
    ClinicalPharmacology,
    Radiology,
    Pathology,
    Custom(String),
}

impl Participant {
    /// Get the string identifier for this participant
    pub fn as_str(&self) -> &str {
        match self {
            Participant::Chair => "chair",
            Participant::Human => "human",
            Participant::InternalMedicine => "internal-medicine",
            Participant::Cardiology => "cardiology",
            Participant::Pulmonology => "pulmonology",
            Participant::Neurology => "neurology",
            Participant::InfectiousDisease => "infectious-disease",
            Participant::Nephrology => "nephrology",
            Participant::Gastroenterology => "gastroenterology",
            Participant::Endocrinology => "endocrinology",
            Participant::Oncology => "oncology",
            Participant::EmergencyMedicine => "emergency-medicine",
            Participant::ClinicalPharmacology => "clinical-pharmacology",
            Participant::Radiology => "radiology",
            Participant::Pathology => "pathology",
            Participant::Custom(s) => s,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Participant::Chair => "Chair".to_string(),
            Participant::Human => "Attending Clinician".to_string(),
            Participant::InternalMedicine => "Internist".to_string(),
            Participant::Cardiology => "Cardiologist".to_string(),
            Participant::Pulmonology => "Pulmonologist".to_string(),
            Participant::Neurology => "Neurologist".to_string(),
            Participant::InfectiousDisease => "Infectious Disease Specialist".to_string(),
            Participant::Nephrology => "Nephrologist".to_string(),
            Participant::Gastroenterology => "Gastroenterologist".to_string(),
            Participant::Endocrinology => "Endocrinologist".to_string(),
            Participant::Oncology => "Oncologist".to_string(),
            Participant::EmergencyMedicine => "Emergency Physician".to_string(),
            Participant::ClinicalPharmacology => "Clinical Pharmacologist".to_string(),
            Participant::Radiology => "Radiologist".to_string(),
            Participant::Pathology => "Pathologist".to_string(),
            Participant::Custom(s) => format!("{} Specialist", s),
        }
    }

    /// What this seat pays attention to; fed into its prompts.
    pub fn focus(&self) -> &str {
        match self {
            Participant::Chair => "moderating the discussion and keeping it on the open questions",
            Participant::Human => "the bedside perspective",
            Participant::InternalMedicine => "the whole patient, comorbidities and common causes",
            Participant::Cardiology => "cardiac and vascular causes, ECG and biomarker interpretation",
            Participant::Pulmonology => "respiratory causes, gas exchange and chest imaging",
            Participant::Neurology => "neurological localisation and central causes",
            Participant::InfectiousDisease => "infectious causes, exposures and antimicrobial choice",
            Participant::Nephrology => "renal function, electrolytes and acid-base status",
            Participant::Gastroenterology => "gastrointestinal and hepatic causes",
            Participant::Endocrinology => "endocrine and metabolic causes",
            Participant::Oncology => "malignancy and paraneoplastic processes",
            Participant::EmergencyMedicine => "immediate threats to life and stabilisation",
            Participant::ClinicalPharmacology => "drug effects, interactions and dosing",
            Participant::Radiology => "which imaging answers the question and how to read it",
            Participant::Pathology => "laboratory and tissue evidence",
            Participant::Custom(_) => "the perspective of their specialty",
        }
    }

    /// `true` for seats that speak in specialist turns
    pub fn is_specialist(&self) -> bool {
        !matches!(self, Participant::Chair | Participant::Human)
    }

    /// Default panel when the caller selects nobody
    pub fn default_panel() -> Vec<Participant> {
        vec![
            Participant::InternalMedicine,
            Participant::Cardiology,
            Participant::InfectiousDisease,
        ]
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Participant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "chair" => Participant::Chair,
            "human" => Participant::Human,
            "internal-medicine" | "internist" => Participant::InternalMedicine,
            "cardiology" => Participant::Cardiology,
            "pulmonology" => Participant::Pulmonology,
            "neurology" => Participant::Neurology,
            "infectious-disease" | "id" => Participant::InfectiousDisease,
            "nephrology" => Participant::Nephrology,
            "gastroenterology" => Participant::Gastroenterology,
            "endocrinology" => Participant::Endocrinology,
            "oncology" => Participant::Oncology,
            "emergency-medicine" => Participant::EmergencyMedicine,
            "clinical-pharmacology" | "pharmacology" => Participant::ClinicalPharmacology,
            "radiology" => Participant::Radiology,
            "pathology" => Participant::Pathology,
            _ => Participant::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for Participant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Participant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(participant) = s.parse::<Participant>();
        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_roundtrip() {
        for participant in Participant::default_panel() {
            let parsed: Participant = participant.to_string().parse().unwrap();
            assert_eq!(participant, parsed);
        }
    }

    #[test]
    fn test_aliases_and_normalisation() {
        assert_eq!(
            "Infectious_Disease".parse::<Participant>().unwrap(),
            Participant::InfectiousDisease
        );
        assert_eq!(
            "pharmacology".parse::<Participant>().unwrap(),
            Participant::ClinicalPharmacology
        );
    }

    #[test]
    fn test_custom_participant() {
        let p: Participant = "Toxicology".parse().unwrap();
        assert_eq!(p, Participant::Custom("Toxicology".to_string()));
        assert_eq!(p.display_name(), "Toxicology Specialist");
        assert!(p.is_specialist());
    }

    #[test]
    fn test_chair_and_human_are_not_specialists() {
        assert!(!Participant::Chair.is_specialist());
        assert!(!Participant::Human.is_specialist());
        assert!(Participant::Cardiology.is_specialist());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Participant::Cardiology).unwrap();
        assert_eq!(json, "\"cardiology\"");
        let back: Participant = serde_json::from_str("\"radiology\"").unwrap();
        assert_eq!(back, Participant::Radiology);
    }
}
