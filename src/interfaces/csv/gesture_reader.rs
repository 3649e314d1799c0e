use crate::domain::gesture::{Point, PointerInput};
use crate::error::{Result, SwipeError};
use serde::Deserialize;
use std::io::Read;

/// Raw event names accepted in a gesture script.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Like,
    Dislike,
    Settle,
}

#[derive(Debug, Deserialize)]
struct GestureRow {
    event: GestureEvent,
    x: Option<f64>,
    y: Option<f64>,
}

/// One step of a replayed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Input(PointerInput),
    /// Wait for the in-flight transition, if any, to finish.
    Settle,
}

impl GestureRow {
    fn into_step(self) -> Result<ScriptStep> {
        let point = || match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(SwipeError::InvalidGesture(format!(
                "{:?} needs both x and y",
                self.event
            ))),
        };

        // Mouse and touch collapse onto the same pointer input.
        let step = match self.event {
            GestureEvent::MouseDown | GestureEvent::TouchStart => {
                ScriptStep::Input(PointerInput::Down(point()?))
            }
            GestureEvent::MouseMove | GestureEvent::TouchMove => {
                ScriptStep::Input(PointerInput::Move(point()?))
            }
            GestureEvent::MouseUp | GestureEvent::TouchEnd => ScriptStep::Input(PointerInput::Up),
            GestureEvent::Like => ScriptStep::Input(PointerInput::Button { liked: true }),
            GestureEvent::Dislike => ScriptStep::Input(PointerInput::Button { liked: false }),
            GestureEvent::Settle => ScriptStep::Settle,
        };
        Ok(step)
    }
}

/// Reads a gesture script (`event, x, y`) from a CSV source.
pub struct GestureReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> GestureReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses each row; a bad row yields an error and the rest continue.
    pub fn steps(self) -> impl Iterator<Item = Result<ScriptStep>> {
        self.reader
            .into_deserialize::<GestureRow>()
            .map(|row| row.map_err(SwipeError::from).and_then(GestureRow::into_step))
    }
}
