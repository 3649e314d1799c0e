use crate::domain::decision::{Decision, TripId};
use crate::domain::ports::DecisionRecorder;
use crate::error::{Result, SwipeError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for recorded decisions.
pub const CF_DECISIONS: &str = "decisions";

/// A persistent decision recorder backed by RocksDB.
///
/// Keys are `trip_id ++ user_id ++ place_id` in big-endian, so the decisions of
/// one trip are contiguous and a repeated decision for the same place replaces
/// the earlier one.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBDecisionRecorder {
    db: Arc<DB>,
}

impl RocksDBDecisionRecorder {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_decisions = ColumnFamilyDescriptor::new(CF_DECISIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_decisions])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn key(decision: &Decision) -> [u8; 12] {
        let mut key = [0u8; 12];
        key[..4].copy_from_slice(&decision.trip_id.0.to_be_bytes());
        key[4..8].copy_from_slice(&decision.user_id.0.to_be_bytes());
        key[8..].copy_from_slice(&decision.candidate_id.0.to_be_bytes());
        key
    }
}

fn missing_cf() -> SwipeError {
    SwipeError::InternalError(Box::new(std::io::Error::other(
        "Decisions column family not found",
    )))
}

#[async_trait]
impl DecisionRecorder for RocksDBDecisionRecorder {
    async fn record(&self, decision: Decision) -> Result<()> {
        let cf = self.db.cf_handle(CF_DECISIONS).ok_or_else(missing_cf)?;

        let value = serde_json::to_vec(&decision).map_err(|e| {
            SwipeError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(&cf, Self::key(&decision), value)?;
        Ok(())
    }

    async fn decisions(&self, trip_id: TripId) -> Result<Vec<Decision>> {
        let cf = self.db.cf_handle(CF_DECISIONS).ok_or_else(missing_cf)?;
        let prefix = trip_id.0.to_be_bytes();

        let mut decisions = Vec::new();
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            let decision: Decision = serde_json::from_slice(&value).map_err(|e| {
                SwipeError::InternalError(Box::new(std::io::Error::other(format!(
                    "Failed to deserialize decision: {}",
                    e
                ))))
            })?;
            decisions.push(decision);
        }

        Ok(decisions)
    }
}
