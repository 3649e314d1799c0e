use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown when a candidate carries no image reference of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x250?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u32);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A place offered to the user for a like/dislike decision.
///
/// Deserializes from the directory's place records; fields the engine does not
/// use (city, coordinates, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub estimated_time: Option<String>,
}

impl Candidate {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId(id),
            name: name.into(),
            description: String::new(),
            image: None,
            category: None,
            rating: None,
            estimated_time: None,
        }
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Candidates in server order plus a cursor to the current one.
///
/// The cursor starts at 0, only moves forward by one, and stops at `len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateQueue {
    candidates: Vec<Candidate>,
    cursor: usize,
}

impl CandidateQueue {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor)
    }

    /// The candidate shown underneath the current card.
    pub fn upcoming(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor + 1)
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.candidates.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    /// Moves to the next candidate. Returns `false` once the queue is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Fraction of the queue already decided, `cursor / len`.
    pub fn progress(&self) -> f64 {
        if self.candidates.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.candidates.len() as f64
        }
    }

    /// 1-based position of the current candidate and the total, as shown in the header.
    pub fn position(&self) -> (usize, usize) {
        let total = self.candidates.len();
        ((self.cursor + 1).min(total), total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn queue(n: u32) -> CandidateQueue {
        CandidateQueue::new((1..=n).map(|i| Candidate::new(i, format!("place {i}"))).collect())
    }

    #[test]
    fn test_candidate_deserialization_ignores_place_fields() {
        let json = r#"{
            "id": 5,
            "name": "Plaza Mayor",
            "description": "Historic square",
            "city": "Lima",
            "country": "Peru",
            "latitude": -12.04,
            "longitude": -77.03,
            "image_url": null,
            "is_active": true,
            "category": "Historia",
            "rating": 4.5,
            "estimated_time": "1h"
        }"#;

        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, CandidateId(5));
        assert_eq!(candidate.category.as_deref(), Some("Historia"));
        assert_eq!(candidate.rating, Some(dec!(4.5)));
        assert_eq!(candidate.image, None);
        assert_eq!(candidate.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_candidate_minimal_record() {
        let candidate: Candidate = serde_json::from_str(r#"{"id": 1, "name": "Museo"}"#).unwrap();
        assert_eq!(candidate, Candidate::new(1, "Museo"));
    }

    #[test]
    fn test_queue_advance_stops_at_len() {
        let mut q = queue(2);
        assert_eq!(q.current().unwrap().id, CandidateId(1));
        assert_eq!(q.upcoming().unwrap().id, CandidateId(2));
        assert!(!q.is_last());

        assert!(q.advance());
        assert!(q.is_last());
        assert!(q.upcoming().is_none());

        assert!(q.advance());
        assert!(q.is_exhausted());
        assert!(q.current().is_none());

        assert!(!q.advance());
        assert_eq!(q.cursor(), 2);
    }

    #[test]
    fn test_queue_progress_and_position() {
        let mut q = queue(4);
        assert_eq!(q.progress(), 0.0);
        assert_eq!(q.position(), (1, 4));

        q.advance();
        assert_eq!(q.progress(), 0.25);
        assert_eq!(q.position(), (2, 4));

        while q.advance() {}
        assert_eq!(q.progress(), 1.0);
        assert_eq!(q.position(), (4, 4));
    }

    #[test]
    fn test_empty_queue() {
        let q = CandidateQueue::default();
        assert!(q.is_empty());
        assert!(q.is_exhausted());
        assert!(q.current().is_none());
        assert_eq!(q.progress(), 0.0);
        assert_eq!(q.position(), (0, 0));
    }
}
