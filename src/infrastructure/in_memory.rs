use crate::domain::candidate::Candidate;
use crate::domain::decision::{Decision, TripId, UserId};
use crate::domain::ports::{
    DecisionRecorder, IdentityProvider, PointerCapture, Router, TripDirectory,
};
use crate::error::{Result, SwipeError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;

/// Identity fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct StaticIdentity {
    user_id: UserId,
}

impl StaticIdentity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> UserId {
        self.user_id
    }
}

/// A thread-safe in-memory directory of trips and places.
///
/// Places are kept in insertion order; city lookups ignore ASCII case.
#[derive(Default, Clone)]
pub struct InMemoryTripDirectory {
    trips: Arc<RwLock<HashMap<TripId, String>>>,
    places: Arc<RwLock<Vec<(String, Candidate)>>>,
}

impl InMemoryTripDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_trip(&self, trip_id: TripId, city: impl Into<String>) {
        let mut trips = self.trips.write().await;
        trips.insert(trip_id, city.into());
    }

    pub async fn insert_place(&self, city: impl Into<String>, candidate: Candidate) {
        let mut places = self.places.write().await;
        places.push((city.into(), candidate));
    }
}

#[async_trait]
impl TripDirectory for InMemoryTripDirectory {
    async fn resolve_trip_destination(&self, trip_id: TripId) -> Result<String> {
        let trips = self.trips.read().await;
        trips
            .get(&trip_id)
            .cloned()
            .ok_or(SwipeError::TripNotFound(trip_id))
    }

    async fn list_candidates(&self, city: &str) -> Result<Vec<Candidate>> {
        let places = self.places.read().await;
        Ok(places
            .iter()
            .filter(|(place_city, _)| place_city.eq_ignore_ascii_case(city))
            .map(|(_, candidate)| candidate.clone())
            .collect())
    }
}

/// A thread-safe in-memory decision log.
///
/// `with_latency` delays every call and `set_failing` makes calls fail without
/// storing anything, which stands in for a slow or unreachable backend.
#[derive(Default, Clone)]
pub struct InMemoryDecisionRecorder {
    decisions: Arc<RwLock<Vec<Decision>>>,
    failing: Arc<AtomicBool>,
    latency: Option<Duration>,
}

impl InMemoryDecisionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every recorded decision, in arrival order.
    pub async fn all(&self) -> Vec<Decision> {
        self.decisions.read().await.clone()
    }
}

#[async_trait]
impl DecisionRecorder for InMemoryDecisionRecorder {
    async fn record(&self, decision: Decision) -> Result<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(SwipeError::DecisionRecordFailure(format!(
                "recorder unavailable for place {}",
                decision.candidate_id
            )));
        }
        let mut decisions = self.decisions.write().await;
        decisions.push(decision);
        Ok(())
    }

    async fn decisions(&self, trip_id: TripId) -> Result<Vec<Decision>> {
        let decisions = self.decisions.read().await;
        Ok(decisions
            .iter()
            .filter(|d| d.trip_id == trip_id)
            .copied()
            .collect())
    }
}

/// Remembers every route-view navigation it is asked for.
#[derive(Default, Clone)]
pub struct RecordingRouter {
    navigations: Arc<Mutex<Vec<TripId>>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<TripId> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Router for RecordingRouter {
    fn navigate_to_route_view(&self, trip_id: TripId) {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(trip_id);
    }
}

/// Counts pointer-capture attachments.
#[derive(Debug, Default)]
pub struct CountingPointerCapture {
    active: AtomicUsize,
    attached: AtomicUsize,
}

impl CountingPointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attachments not yet detached.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn total_attached(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }
}

impl PointerCapture for CountingPointerCapture {
    fn attach(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.attached.fetch_add(1, Ordering::SeqCst);
    }

    fn detach(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::CandidateId;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_directory_resolves_trip_and_city() {
        let directory = InMemoryTripDirectory::new();
        directory.insert_trip(TripId(1), "Lima").await;

        let mut museo = Candidate::new(1, "Museo Larco");
        museo.rating = Some(dec!(4.5));
        directory.insert_place("Lima", museo.clone()).await;
        directory.insert_place("Cusco", Candidate::new(2, "Sacsayhuaman")).await;
        directory.insert_place("LIMA", Candidate::new(3, "Barranco")).await;

        let city = directory.resolve_trip_destination(TripId(1)).await.unwrap();
        assert_eq!(city, "Lima");

        let candidates = directory.list_candidates("lima").await.unwrap();
        let ids: Vec<CandidateId> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CandidateId(1), CandidateId(3)]);
        assert_eq!(candidates[0], museo);
    }

    #[tokio::test]
    async fn test_directory_unknown_trip() {
        let directory = InMemoryTripDirectory::new();
        let result = directory.resolve_trip_destination(TripId(4)).await;
        assert!(matches!(result, Err(SwipeError::TripNotFound(TripId(4)))));
    }

    #[tokio::test]
    async fn test_recorder_filters_by_trip() {
        let recorder = InMemoryDecisionRecorder::new();
        let a = Decision::new(UserId(1), TripId(1), CandidateId(1), true);
        let b = Decision::new(UserId(1), TripId(2), CandidateId(1), false);

        recorder.record(a).await.unwrap();
        recorder.record(b).await.unwrap();

        assert_eq!(recorder.decisions(TripId(1)).await.unwrap(), vec![a]);
        assert_eq!(recorder.all().await, vec![a, b]);
    }

    #[tokio::test]
    async fn test_failing_recorder_stores_nothing() {
        let recorder = InMemoryDecisionRecorder::new();
        recorder.set_failing(true);

        let decision = Decision::new(UserId(1), TripId(1), CandidateId(1), true);
        let result = recorder.record(decision).await;

        assert!(matches!(result, Err(SwipeError::DecisionRecordFailure(_))));
        assert!(recorder.all().await.is_empty());
    }

    #[test]
    fn test_router_records_navigation() {
        let router = RecordingRouter::new();
        router.navigate_to_route_view(TripId(8));
        assert_eq!(router.navigations(), vec![TripId(8)]);
    }
}
