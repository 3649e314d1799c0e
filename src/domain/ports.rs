use super::candidate::Candidate;
use super::decision::{Decision, TripId, UserId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the identity of the signed-in user.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> UserId;
}

#[async_trait]
pub trait TripDirectory: Send + Sync {
    /// Destination city of a trip.
    async fn resolve_trip_destination(&self, trip_id: TripId) -> Result<String>;
    /// Every candidate for a city, in server order.
    async fn list_candidates(&self, city: &str) -> Result<Vec<Candidate>>;
}

#[async_trait]
pub trait DecisionRecorder: Send + Sync {
    async fn record(&self, decision: Decision) -> Result<()>;
    async fn decisions(&self, trip_id: TripId) -> Result<Vec<Decision>>;
}

pub trait Router: Send + Sync {
    fn navigate_to_route_view(&self, trip_id: TripId);
}

/// Document-level pointer listeners, held only while a drag is in progress.
pub trait PointerCapture: Send + Sync {
    fn attach(&self);
    fn detach(&self);
}

pub type IdentityRef = Arc<dyn IdentityProvider>;
pub type TripDirectoryRef = Arc<dyn TripDirectory>;
pub type DecisionRecorderRef = Arc<dyn DecisionRecorder>;
pub type RouterRef = Arc<dyn Router>;
pub type PointerCaptureRef = Arc<dyn PointerCapture>;
