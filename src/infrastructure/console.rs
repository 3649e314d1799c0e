use crate::domain::decision::TripId;
use crate::domain::ports::Router;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Reports the route-view hand-off on stderr.
#[derive(Debug, Default)]
pub struct ConsoleRouter {
    navigated: AtomicBool,
}

impl ConsoleRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigated(&self) -> bool {
        self.navigated.load(Ordering::SeqCst)
    }
}

pub fn route_path(trip_id: TripId) -> String {
    format!("/route/{}", trip_id)
}

impl Router for ConsoleRouter {
    fn navigate_to_route_view(&self, trip_id: TripId) {
        self.navigated.store(true, Ordering::SeqCst);
        info!(trip = %trip_id, "Navigating to route view");
        eprintln!("route: {}", route_path(trip_id));
    }
}
