use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Urgency;

/// A surgery request as returned by the backend.
///
/// `interested_doctors` is a derived, read-only projection of the interest
/// relation; the backend includes it only on the owning hospital's view,
/// so it defaults to empty everywhere else. The client never writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryRequest {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub surgery_type: String,
    pub required_specialization: String,
    pub urgency: Urgency,
    pub date: NaiveDate,
    pub location: String,
    pub hospital_name: String,
    #[serde(default)]
    pub condition_description: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub interested_doctors: Vec<DoctorSummary>,
}

/// Read-only doctor projection embedded in a request's interest list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub email: String,
}

/// Create/update payload: everything the hospital fills in on the form.
/// The backend assigns id, hospital_id and created_at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestForm {
    pub surgery_type: String,
    pub required_specialization: String,
    pub urgency: Urgency,
    pub date: NaiveDate,
    pub location: String,
    pub hospital_name: String,
    #[serde(default)]
    pub condition_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCTOR_VIEW: &str = r#"{
        "id": "71e8e5ff-f1cb-49dd-9cb4-857ef5ba1fe0",
        "hospital_id": "7a4c6a8e-96a7-4eb9-9e9c-3a0db8e7c901",
        "surgery_type": "Hip Replacement",
        "required_specialization": "Orthopedic Surgeon",
        "urgency": "High",
        "date": "2025-03-20",
        "location": "Springfield, IL",
        "hospital_name": "City General Hospital",
        "condition_description": "Elderly patient with severe hip arthritis",
        "created_at": "2025-03-01T09:30:00.123456"
    }"#;

    #[test]
    fn doctor_view_defaults_interested_doctors_to_empty() {
        let request: SurgeryRequest = serde_json::from_str(DOCTOR_VIEW).unwrap();
        assert_eq!(request.surgery_type, "Hip Replacement");
        assert_eq!(request.urgency, Urgency::High);
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert!(request.interested_doctors.is_empty());
    }

    #[test]
    fn hospital_view_carries_interested_doctors() {
        let json = r#"{
            "id": "71e8e5ff-f1cb-49dd-9cb4-857ef5ba1fe0",
            "hospital_id": "7a4c6a8e-96a7-4eb9-9e9c-3a0db8e7c901",
            "surgery_type": "Cardiac Bypass",
            "required_specialization": "Cardiologist",
            "urgency": "Medium",
            "date": "2025-03-25",
            "location": "Madison, WI",
            "hospital_name": "Valley Medical Center",
            "condition_description": null,
            "created_at": "2025-03-02T11:00:00",
            "interested_doctors": [{
                "id": "1d2f4f58-0c25-4c43-b470-55c34dcea4a7",
                "name": "Dr. Lisa Anderson",
                "specialization": "Cardiologist",
                "bio": "",
                "email": "lisa.anderson@medexus.com"
            }]
        }"#;
        let request: SurgeryRequest = serde_json::from_str(json).unwrap();
        assert!(request.condition_description.is_none());
        assert_eq!(request.interested_doctors.len(), 1);
        assert_eq!(request.interested_doctors[0].name, "Dr. Lisa Anderson");
    }

    #[test]
    fn form_serializes_without_server_fields() {
        let form = RequestForm {
            surgery_type: "Appendectomy".into(),
            required_specialization: "General Surgeon".into(),
            urgency: Urgency::High,
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            location: "Cedar Falls, IA".into(),
            hospital_name: "Regional Health Hospital".into(),
            condition_description: Some("Acute appendicitis".into()),
        };
        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("\"urgency\":\"High\""));
        assert!(json.contains("\"date\":\"2025-03-15\""));
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("interested_doctors"));
    }
}
