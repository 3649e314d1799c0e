use crate::domain::candidate::Candidate;
use crate::domain::decision::{TripId, UserId};
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryTripDirectory;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TripRecord {
    pub id: TripId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub city: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PlaceRecord {
    pub city: String,
    #[serde(flatten)]
    pub candidate: Candidate,
}

/// Trips and places exported from the backend.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub places: Vec<PlaceRecord>,
}

impl Catalog {
    /// Loads the catalog into an in-memory directory, keeping place order.
    pub async fn into_directory(self) -> InMemoryTripDirectory {
        let directory = InMemoryTripDirectory::new();
        for trip in self.trips {
            directory.insert_trip(trip.id, trip.city).await;
        }
        for place in self.places {
            directory.insert_place(place.city, place.candidate).await;
        }
        directory
    }
}

/// Reads a [`Catalog`] from a JSON source.
pub struct CatalogReader<R: Read> {
    source: R,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Catalog> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
