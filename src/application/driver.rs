use super::engine::{EngineSnapshot, SwipeEngine};
use super::transition::Settled;
use crate::domain::gesture::PointerInput;
use crate::error::{Result, SwipeError};
use std::future::{Future, pending};
use std::pin::Pin;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

const INPUT_BUFFER: usize = 64;

type SettleFuture = Pin<Box<dyn Future<Output = Settled> + Send>>;

enum Command {
    Input(PointerInput),
    Settle(oneshot::Sender<EngineSnapshot>),
}

/// Handle to a [`SwipeEngine`] running in its own task.
///
/// Input is applied in the order it is sent. While a transition is in flight
/// the engine keeps receiving input and refuses it, rather than holding it
/// until the transition ends.
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<EngineSnapshot>,
    task: JoinHandle<SwipeEngine>,
}

impl EngineHandle {
    pub fn spawn(engine: SwipeEngine) -> Self {
        let (commands, inbox) = mpsc::channel(INPUT_BUFFER);
        let (publisher, snapshots) = watch::channel(engine.snapshot());
        let task = tokio::spawn(run(engine, inbox, publisher));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    pub async fn send(&self, input: PointerInput) -> Result<()> {
        self.commands
            .send(Command::Input(input))
            .await
            .map_err(|_| closed())
    }

    /// Waits until every input sent so far has been applied and no transition
    /// is in flight, then returns the resulting snapshot.
    pub async fn settled(&self) -> Result<EngineSnapshot> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Settle(reply))
            .await
            .map_err(|_| closed())?;
        response.await.map_err(|_| closed())
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the engine task and returns the engine.
    ///
    /// A transition still in flight is dropped; its recorder call keeps running.
    pub async fn shutdown(self) -> Result<SwipeEngine> {
        let Self { commands, task, .. } = self;
        drop(commands);
        task.await
            .map_err(|e| SwipeError::InternalError(Box::new(e)))
    }
}

fn closed() -> SwipeError {
    SwipeError::InternalError("engine task has stopped".into())
}

async fn run(
    mut engine: SwipeEngine,
    mut inbox: mpsc::Receiver<Command>,
    publisher: watch::Sender<EngineSnapshot>,
) -> SwipeEngine {
    let mut in_flight: Option<SettleFuture> = None;
    let mut waiters: Vec<oneshot::Sender<EngineSnapshot>> = Vec::new();

    loop {
        let transition = async {
            match in_flight.as_mut() {
                Some(settle) => settle.await,
                None => pending().await,
            }
        };

        tokio::select! {
            settled = transition => {
                in_flight = None;
                engine.finish(settled);
                publisher.send_replace(engine.snapshot());
                for waiter in waiters.drain(..) {
                    let _ = waiter.send(engine.snapshot());
                }
            }
            command = inbox.recv() => match command {
                Some(Command::Input(input)) => {
                    if let Some(transition) = engine.handle(input) {
                        in_flight = Some(Box::pin(transition.settle()));
                    }
                    publisher.send_replace(engine.snapshot());
                }
                Some(Command::Settle(reply)) => {
                    if in_flight.is_some() {
                        waiters.push(reply);
                    } else {
                        let _ = reply.send(engine.snapshot());
                    }
                }
                None => {
                    debug!("Input channel closed, stopping engine task");
                    break;
                }
            },
        }
    }

    engine
}
