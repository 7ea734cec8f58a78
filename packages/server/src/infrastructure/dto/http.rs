//! HTTP API response bodies.

use serde::Serialize;

use crate::domain::Participant;
use tallyroom_shared::time::millis_to_rfc3339;

/// Entry of `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    pub connected_at: String,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id.to_string(),
            name: participant.name.into_string(),
            connected_at: millis_to_rfc3339(participant.connected_at.value()),
        }
    }
}
