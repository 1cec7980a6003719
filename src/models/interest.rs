use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::SurgeryRequest;

/// A doctor's expressed interest in a surgery request.
///
/// The backend enforces at most one active interest per (doctor, request)
/// pair; the client only ever derives "has interest" by membership test
/// on the fetched collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    pub id: Uuid,
    pub request_id: Uuid,
    pub doctor_id: Uuid,
    pub timestamp: NaiveDateTime,
}

/// One row of GET /api/interests/me: the interest joined with its request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub interest: Interest,
    pub request: SurgeryRequest,
}
