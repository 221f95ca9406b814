//! Reader personalization — profile types and the instruction-context builder.
//!
//! The profile arrives in full on every request; nothing here is persisted.
//! Every profile enum is closed: unrecognized wire values land on a
//! `#[serde(other)]` fallback arm, so the builder can never see an
//! out-of-vocabulary value and never fails.

pub mod fragments;

use serde::{Deserialize, Serialize};

pub use fragments::build_personalization_context;

/// Output register for generated content.
///
/// Casual fragments forbid citations and favor plain prose; academic
/// fragments request citation-style content and scholarly apparatus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    #[default]
    Casual,
    Academic,
}

/// Reader age band. Unrecognized or missing values resolve to the
/// general-audience fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeRange {
    Child,
    Teen,
    Youth,
    Adult,
    Senior,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// Reader gender. Only male/female produce a fragment; everything else is
/// omitted from the context entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// Islamic sub-tradition steering terminology and cited authorities.
/// Unknown values collapse to `General`, the documented default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Sunni,
    Shia,
    Sufi,
    #[default]
    #[serde(other)]
    General,
}

/// The full reader profile, supplied by the caller on every request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderProfile {
    #[serde(default)]
    pub age_range: AgeRange,
    #[serde(default)]
    pub gender: Gender,
    /// Free-form label from the fixed situation option set.
    /// `"Nothing special"` (or anything unrecognized) produces no fragment.
    #[serde(default)]
    pub stage_situation: String,
    #[serde(default)]
    pub content_mode: ContentMode,
    #[serde(default)]
    pub tradition: Tradition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_mode_deserializes_lowercase() {
        let mode: ContentMode = serde_json::from_str(r#""academic""#).unwrap();
        assert_eq!(mode, ContentMode::Academic);
    }

    #[test]
    fn test_unknown_age_range_falls_back_to_unspecified() {
        let age: AgeRange = serde_json::from_str(r#""boomer""#).unwrap();
        assert_eq!(age, AgeRange::Unspecified);
    }

    #[test]
    fn test_empty_string_age_range_falls_back_to_unspecified() {
        let age: AgeRange = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(age, AgeRange::Unspecified);
    }

    #[test]
    fn test_unknown_tradition_falls_back_to_general() {
        let t: Tradition = serde_json::from_str(r#""klingon""#).unwrap();
        assert_eq!(t, Tradition::General);
        // A tradition value from a different tradition set behaves the same
        let t: Tradition = serde_json::from_str(r#""secular""#).unwrap();
        assert_eq!(t, Tradition::General);
    }

    #[test]
    fn test_gender_other_is_a_recognized_value() {
        let g: Gender = serde_json::from_str(r#""other""#).unwrap();
        assert_eq!(g, Gender::Other);
        let g: Gender = serde_json::from_str(r#""nonbinary""#).unwrap();
        assert_eq!(g, Gender::Unspecified);
    }

    #[test]
    fn test_profile_deserializes_with_all_fields_missing() {
        let profile: ReaderProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.age_range, AgeRange::Unspecified);
        assert_eq!(profile.gender, Gender::Unspecified);
        assert_eq!(profile.content_mode, ContentMode::Casual);
        assert_eq!(profile.tradition, Tradition::General);
        assert!(profile.stage_situation.is_empty());
    }

    #[test]
    fn test_profile_deserializes_from_full_json() {
        let profile: ReaderProfile = serde_json::from_str(
            r#"{
                "age_range": "teen",
                "gender": "female",
                "stage_situation": "Preparing for Hajj",
                "content_mode": "academic",
                "tradition": "sufi"
            }"#,
        )
        .unwrap();
        assert_eq!(profile.age_range, AgeRange::Teen);
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.stage_situation, "Preparing for Hajj");
        assert_eq!(profile.content_mode, ContentMode::Academic);
        assert_eq!(profile.tradition, Tradition::Sufi);
    }
}
