use serde::{Deserialize, Serialize};

use super::enums::Urgency;
use super::request::SurgeryRequest;

/// Client-side filter over the fetched request collection.
///
/// Each field unset (or blank) means "no constraint". Text fields match
/// as case-insensitive substrings; urgency matches exactly. The filter is
/// held transiently by the view layer and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestFilter {
    #[serde(default)]
    pub surgery_type: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
}

impl RequestFilter {
    /// Whether a single request passes every constraint.
    pub fn matches(&self, request: &SurgeryRequest) -> bool {
        contains_ci(&request.surgery_type, self.surgery_type.as_deref())
            && contains_ci(
                &request.required_specialization,
                self.specialization.as_deref(),
            )
            && self.urgency.map_or(true, |u| u == request.urgency)
    }

    /// Narrow a collection, preserving its order. Pure: the input is
    /// untouched and applying the same filter twice yields the same set.
    pub fn apply(&self, requests: &[SurgeryRequest]) -> Vec<SurgeryRequest> {
        requests
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        is_blank(self.surgery_type.as_deref())
            && is_blank(self.specialization.as_deref())
            && self.urgency.is_none()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Case-insensitive substring test; a blank needle always passes.
fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) if n.trim().is_empty() => true,
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    fn request(surgery_type: &str, specialization: &str, urgency: Urgency) -> SurgeryRequest {
        SurgeryRequest {
            id: Uuid::new_v4(),
            hospital_id: Uuid::new_v4(),
            surgery_type: surgery_type.to_string(),
            required_specialization: specialization.to_string(),
            urgency,
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            location: "Springfield, IL".to_string(),
            hospital_name: "City General Hospital".to_string(),
            condition_description: None,
            created_at: NaiveDateTime::parse_from_str(
                "2025-03-01T09:30:00",
                "%Y-%m-%dT%H:%M:%S",
            )
            .unwrap(),
            interested_doctors: Vec::new(),
        }
    }

    fn sample() -> Vec<SurgeryRequest> {
        vec![
            request("Hip Replacement", "Orthopedic Surgeon", Urgency::High),
            request("Knee Replacement", "Orthopedic Surgeon", Urgency::Medium),
            request("Cardiac Bypass", "Cardiologist", Urgency::Low),
        ]
    }

    #[test]
    fn empty_filter_returns_all_in_order() {
        let requests = sample();
        let filtered = RequestFilter::default().apply(&requests);
        assert_eq!(filtered, requests);
    }

    #[test]
    fn blank_strings_are_no_constraint() {
        let filter = RequestFilter {
            surgery_type: Some("".into()),
            specialization: Some("   ".into()),
            urgency: None,
        };
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn surgery_type_is_case_insensitive_substring() {
        let filter = RequestFilter {
            surgery_type: Some("hip".into()),
            ..Default::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].surgery_type, "Hip Replacement");

        // "replacement" hits both orthopedic requests.
        let filter = RequestFilter {
            surgery_type: Some("REPLACEMENT".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 2);
    }

    #[test]
    fn specialization_matches_required_specialization() {
        let filter = RequestFilter {
            specialization: Some("cardio".into()),
            ..Default::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].required_specialization, "Cardiologist");
    }

    #[test]
    fn urgency_is_exact_match() {
        let filter = RequestFilter {
            urgency: Some(Urgency::High),
            ..Default::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].urgency, Urgency::High);
    }

    #[test]
    fn constraints_combine_conjunctively() {
        let filter = RequestFilter {
            surgery_type: Some("replacement".into()),
            specialization: Some("orthopedic".into()),
            urgency: Some(Urgency::Medium),
        };
        let filtered = filter.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].surgery_type, "Knee Replacement");
    }

    #[test]
    fn apply_is_idempotent() {
        let filter = RequestFilter {
            specialization: Some("orthopedic".into()),
            ..Default::default()
        };
        let once = filter.apply(&sample());
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_yields_empty() {
        let filter = RequestFilter {
            surgery_type: Some("transplant".into()),
            ..Default::default()
        };
        assert!(filter.apply(&sample()).is_empty());
    }
}
