use super::session::GestureSession;
use super::transition::{RecordOutcome, Settled, Transition};
use crate::config::SwipeConfig;
use crate::domain::candidate::{Candidate, CandidateQueue};
use crate::domain::decision::{Decision, TripId};
use crate::domain::gesture::{CardStyle, GestureState, Offset, Point, PointerInput};
use crate::domain::ports::{
    DecisionRecorderRef, IdentityRef, PointerCaptureRef, RouterRef, TripDirectoryRef,
};
use crate::error::{Result, SwipeError};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Candidates have not been loaded yet (or loading failed).
    Loading,
    Ready,
    Dragging,
    /// A decision is animating out and its recorder call is in flight.
    Transitioning,
    /// Every candidate has been decided; the route view was requested.
    Exhausted,
    /// The destination has no candidates at all.
    NoCandidates,
}

/// Collaborators for one trip session.
#[derive(Clone)]
pub struct SwipeContext {
    pub trip_id: TripId,
    pub identity: IdentityRef,
    pub directory: TripDirectoryRef,
    pub recorder: DecisionRecorderRef,
    pub router: RouterRef,
    pub capture: PointerCaptureRef,
}

/// What the view layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub cursor: usize,
    pub total: usize,
    /// 1-based header counter, `(n, total)`.
    pub position: (usize, usize),
    pub current: Option<Candidate>,
    pub upcoming: Option<Candidate>,
    pub style: CardStyle,
    pub progress: f64,
}

/// Presents one candidate at a time and turns pointer gestures into decisions.
///
/// Input methods never block. A resolved decision hands back a [`Transition`];
/// the caller settles it and passes the result to [`SwipeEngine::finish`]
/// (or uses [`SwipeEngine::complete`], which does both).
pub struct SwipeEngine {
    ctx: SwipeContext,
    config: SwipeConfig,
    queue: CandidateQueue,
    gesture: GestureState,
    session: Option<GestureSession>,
    phase: Phase,
    in_flight: Option<Decision>,
    unrecorded: Vec<Decision>,
}

impl SwipeEngine {
    pub fn new(ctx: SwipeContext, config: SwipeConfig) -> Self {
        Self {
            ctx,
            config,
            queue: CandidateQueue::default(),
            gesture: GestureState::default(),
            session: None,
            phase: Phase::Loading,
            in_flight: None,
            unrecorded: Vec::new(),
        }
    }

    /// Loads the candidates for the trip's destination.
    ///
    /// On failure the engine stays in `Loading` and the error is returned; the
    /// engine never retries on its own. Calling this outside `Loading` is a no-op.
    pub async fn activate(&mut self) -> Result<()> {
        if self.phase != Phase::Loading {
            return Ok(());
        }

        let candidates = self.load().await.map_err(|e| {
            error!(trip = %self.ctx.trip_id, "Failed to load candidates: {}", e);
            match e {
                SwipeError::CandidateListUnavailable(_) => e,
                other => SwipeError::CandidateListUnavailable(other.to_string()),
            }
        })?;

        if candidates.is_empty() {
            info!(trip = %self.ctx.trip_id, "No candidates for trip");
            self.phase = Phase::NoCandidates;
        } else {
            info!(trip = %self.ctx.trip_id, count = candidates.len(), "Candidates loaded");
            self.queue = CandidateQueue::new(candidates);
            self.phase = Phase::Ready;
        }
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Candidate>> {
        let city = self
            .ctx
            .directory
            .resolve_trip_destination(self.ctx.trip_id)
            .await?;
        self.ctx.directory.list_candidates(&city).await
    }

    /// Pointer pressed on the card. A press during a drag restarts it from the
    /// new origin and keeps the pointer capture already held.
    pub fn begin(&mut self, at: Point) -> bool {
        match self.phase {
            Phase::Ready => {
                self.session = Some(GestureSession::acquire(self.ctx.capture.clone()));
            }
            Phase::Dragging => debug!("Drag restarted"),
            phase => {
                debug!(?phase, "Drag start refused");
                return false;
            }
        }
        self.gesture.start(at);
        self.phase = Phase::Dragging;
        true
    }

    /// Pointer moved while pressed.
    pub fn drag_to(&mut self, to: Point) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        self.gesture.track(to);
        true
    }

    /// Pointer released. Resolves a decision if the drag went past the threshold,
    /// otherwise puts the card back.
    pub fn end(&mut self) -> Option<Transition> {
        if self.phase != Phase::Dragging {
            return None;
        }
        self.release_gesture();

        match self.gesture.verdict(self.config.threshold) {
            Some(liked) => self.resolve(liked),
            None => {
                debug!(dx = self.gesture.offset.x, "Drag below threshold");
                self.gesture.reset();
                None
            }
        }
    }

    /// One of the explicit like/dislike buttons.
    pub fn decide(&mut self, liked: bool) -> Option<Transition> {
        match self.phase {
            Phase::Ready => self.resolve(liked),
            Phase::Dragging => {
                self.release_gesture();
                self.resolve(liked)
            }
            phase => {
                debug!(?phase, liked, "Decision refused");
                None
            }
        }
    }

    pub fn handle(&mut self, input: PointerInput) -> Option<Transition> {
        match input {
            PointerInput::Down(at) => {
                self.begin(at);
                None
            }
            PointerInput::Move(to) => {
                self.drag_to(to);
                None
            }
            PointerInput::Up => self.end(),
            PointerInput::Button { liked } => self.decide(liked),
        }
    }

    fn release_gesture(&mut self) {
        self.session = None;
        self.gesture.release();
        self.phase = Phase::Ready;
    }

    fn resolve(&mut self, liked: bool) -> Option<Transition> {
        let candidate = self.queue.current()?;
        let decision = Decision::new(
            self.ctx.identity.current_user(),
            self.ctx.trip_id,
            candidate.id,
            liked,
        );
        debug!(candidate = %candidate.id, liked, "Decision resolved");

        let exit = self.config.exit_offset;
        let direction = if liked { 1.0 } else { -1.0 };
        self.gesture.offset = Offset::new(exit.x.abs() * direction, exit.y);
        self.phase = Phase::Transitioning;
        self.in_flight = Some(decision);

        Some(Transition::start(
            decision,
            self.ctx.recorder.clone(),
            self.config.transition,
        ))
    }

    /// Applies a settled transition: advances to the next candidate, or hands
    /// off to the route view after the last one.
    pub fn finish(&mut self, settled: Settled) {
        if self.phase != Phase::Transitioning || self.in_flight != Some(settled.decision) {
            warn!(candidate = %settled.decision.candidate_id, "Ignoring stale transition");
            return;
        }
        self.in_flight = None;

        if let RecordOutcome::Failed(reason) = settled.outcome {
            warn!(
                candidate = %settled.decision.candidate_id,
                "Decision was not recorded: {}", reason
            );
            self.unrecorded.push(settled.decision);
        }

        if self.queue.is_last() {
            self.queue.advance();
            self.phase = Phase::Exhausted;
            info!(trip = %self.ctx.trip_id, "All candidates decided");
            self.ctx.router.navigate_to_route_view(self.ctx.trip_id);
        } else {
            self.queue.advance();
            self.gesture.reset();
            self.phase = Phase::Ready;
        }
    }

    /// Settles a transition and applies it.
    pub async fn complete(&mut self, transition: Transition) {
        let settled = transition.settle().await;
        self.finish(settled);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trip_id(&self) -> TripId {
        self.ctx.trip_id
    }

    pub fn queue(&self) -> &CandidateQueue {
        &self.queue
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.queue.current()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    pub fn style(&self) -> CardStyle {
        CardStyle::from_gesture(&self.gesture, &self.config)
    }

    pub fn progress(&self) -> f64 {
        self.queue.progress()
    }

    /// Decisions whose recorder call failed. They are not retried.
    pub fn unrecorded(&self) -> &[Decision] {
        &self.unrecorded
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase,
            cursor: self.queue.cursor(),
            total: self.queue.len(),
            position: self.queue.position(),
            current: self.queue.current().cloned(),
            upcoming: self.queue.upcoming().cloned(),
            style: self.style(),
            progress: self.progress(),
        }
    }
}
