use crate::domain::decision::Decision;
use crate::domain::ports::DecisionRecorderRef;
use crate::error::Result;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// How the recorder call for a decision ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    Failed(String),
}

/// A transition whose interval has elapsed and whose recorder call has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub decision: Decision,
    pub outcome: RecordOutcome,
}

/// The exit interval of one decision and its in-flight recorder call.
///
/// The two run independently and are joined once, in [`Transition::settle`].
pub struct Transition {
    decision: Decision,
    deadline: Instant,
    record: JoinHandle<Result<()>>,
}

impl Transition {
    pub(crate) fn start(
        decision: Decision,
        recorder: DecisionRecorderRef,
        interval: Duration,
    ) -> Self {
        let deadline = Instant::now() + interval;
        let record = tokio::spawn(async move { recorder.record(decision).await });
        Self {
            decision,
            deadline,
            record,
        }
    }

    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Waits out the interval, then waits for the recorder call.
    ///
    /// A failed or panicked call still settles the transition.
    pub async fn settle(self) -> Settled {
        sleep_until(self.deadline).await;

        let outcome = match self.record.await {
            Ok(Ok(())) => RecordOutcome::Recorded,
            Ok(Err(e)) => RecordOutcome::Failed(e.to_string()),
            Err(e) => RecordOutcome::Failed(e.to_string()),
        };

        Settled {
            decision: self.decision,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::CandidateId;
    use crate::domain::decision::{TripId, UserId};
    use crate::infrastructure::in_memory::InMemoryDecisionRecorder;
    use std::sync::Arc;

    fn decision() -> Decision {
        Decision::new(UserId(1), TripId(1), CandidateId(9), true)
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_interval() {
        let recorder = InMemoryDecisionRecorder::new();
        let started = Instant::now();

        let transition = Transition::start(
            decision(),
            Arc::new(recorder.clone()),
            Duration::from_millis(300),
        );
        let settled = transition.settle().await;

        assert!(started.elapsed() >= Duration::from_millis(300));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(settled.outcome, RecordOutcome::Recorded);
        assert_eq!(recorder.all().await, vec![decision()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_slow_recorder() {
        let recorder = InMemoryDecisionRecorder::new().with_latency(Duration::from_secs(2));
        let started = Instant::now();

        let transition = Transition::start(
            decision(),
            Arc::new(recorder.clone()),
            Duration::from_millis(300),
        );
        let settled = transition.settle().await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(settled.outcome, RecordOutcome::Recorded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_record_still_settles() {
        let recorder = InMemoryDecisionRecorder::new();
        recorder.set_failing(true);

        let transition = Transition::start(
            decision(),
            Arc::new(recorder.clone()),
            Duration::from_millis(300),
        );
        let settled = transition.settle().await;

        assert!(matches!(settled.outcome, RecordOutcome::Failed(_)));
        assert!(recorder.all().await.is_empty());
    }
}
