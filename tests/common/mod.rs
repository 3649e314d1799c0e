#![allow(dead_code)]

use std::io::{Error, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tripswipe::application::engine::{SwipeContext, SwipeEngine};
use tripswipe::config::SwipeConfig;
use tripswipe::domain::candidate::Candidate;
use tripswipe::domain::decision::{TripId, UserId};
use tripswipe::infrastructure::in_memory::{
    CountingPointerCapture, InMemoryDecisionRecorder, InMemoryTripDirectory, RecordingRouter,
    StaticIdentity,
};

pub const CATALOG: &str = r#"{
    "trips": [
        {"id": 1, "user_id": 3, "city": "Cusco", "country": "Peru"},
        {"id": 2, "user_id": 3, "city": "Puno", "country": "Peru"}
    ],
    "places": [
        {"id": 10, "name": "Sacsayhuaman", "city": "Cusco", "country": "Peru",
         "latitude": -13.509, "longitude": -71.981, "rating": 4.5, "category": "Historia"},
        {"id": 11, "name": "San Blas", "city": "cusco", "country": "Peru",
         "latitude": -13.514, "longitude": -71.975, "estimated_time": "2h"},
        {"id": 12, "name": "Miraflores", "city": "Lima", "country": "Peru",
         "latitude": -12.119, "longitude": -77.029}
    ]
}"#;

pub fn catalog_file() -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CATALOG.as_bytes())?;
    Ok(file)
}

/// Writes a gesture script with the `event, x, y` header.
pub fn gesture_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "event, x, y")?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    Ok(file)
}

pub struct Session {
    pub engine: SwipeEngine,
    pub recorder: InMemoryDecisionRecorder,
    pub router: RecordingRouter,
    pub capture: Arc<CountingPointerCapture>,
}

/// An activated engine over `count` candidates for trip 1.
pub async fn session(count: u32, recorder: InMemoryDecisionRecorder) -> Session {
    let directory = InMemoryTripDirectory::new();
    directory.insert_trip(TripId(1), "Cusco").await;
    for id in 1..=count {
        directory
            .insert_place("Cusco", Candidate::new(id, format!("place {id}")))
            .await;
    }

    let router = RecordingRouter::new();
    let capture = Arc::new(CountingPointerCapture::new());
    let ctx = SwipeContext {
        trip_id: TripId(1),
        identity: Arc::new(StaticIdentity::new(UserId(3))),
        directory: Arc::new(directory),
        recorder: Arc::new(recorder.clone()),
        router: Arc::new(router.clone()),
        capture: capture.clone(),
    };

    let mut engine = SwipeEngine::new(ctx, SwipeConfig::default());
    engine.activate().await.expect("activation should succeed");

    Session {
        engine,
        recorder,
        router,
        capture,
    }
}
