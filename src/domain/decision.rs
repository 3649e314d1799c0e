use super::candidate::CandidateId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved like/dislike for one candidate.
///
/// Serializes to the recorder wire shape: `user_id`, `trip_id`, `place_id`, `liked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub user_id: UserId,
    pub trip_id: TripId,
    #[serde(rename = "place_id")]
    pub candidate_id: CandidateId,
    pub liked: bool,
}

impl Decision {
    pub fn new(user_id: UserId, trip_id: TripId, candidate_id: CandidateId, liked: bool) -> Self {
        Self {
            user_id,
            trip_id,
            candidate_id,
            liked,
        }
    }
}
