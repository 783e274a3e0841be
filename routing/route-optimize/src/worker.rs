//! Running an optimization off the calling thread.
//!
//! [`spawn_optimizer`] validates a problem and configuration on the calling
//! thread, then moves them onto a background thread and hands back an
//! [`OptimizerHandle`]. Exactly one result is delivered over a channel; a
//! panic in the run is caught and delivered as [`RoutingError::WorkerPanicked`]
//! instead of unwinding into the caller.
//!
//! # Example
//!
//! ```
//! use route_optimize::spawn_optimizer;
//! use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem, SwarmConfig};
//! use cf_planar::Bounds;
//! use nalgebra::Point2;
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(400.0, 400.0),
//! ))
//! .with_anchors([Anchor::at(20.0, 20.0), Anchor::at(380.0, 380.0)])
//! .with_demand(Demand::new(0, 1, 1.0));
//!
//! let config = HighwayConfig::default()
//!     .with_waypoint_count(2)
//!     .with_swarm(SwarmConfig::default().with_particles(5).with_iterations(2).with_seed(9));
//!
//! let handle = spawn_optimizer(problem, config).unwrap();
//! let result = handle.wait().unwrap();
//! assert_eq!(result.waypoints.len(), 2);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use route_types::{HighwayConfig, HighwayProblem, OptimizationResult, RoutingError};
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::highways::optimize_highways_with_cancel;

type RunResult = Result<OptimizationResult, RoutingError>;

/// A handle to a background optimization.
#[derive(Debug)]
pub struct OptimizerHandle {
    receiver: Receiver<RunResult>,
    token: CancelToken,
    thread: Option<JoinHandle<()>>,
    delivered: bool,
}

impl OptimizerHandle {
    /// Returns the result if it is ready, without blocking.
    ///
    /// Returns `None` while the run is in progress and after the result has
    /// been taken once.
    pub fn try_result(&mut self) -> Option<RunResult> {
        if self.delivered {
            return None;
        }
        let received = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(RoutingError::WorkerDisconnected),
        };
        self.delivered = true;
        self.join();
        Some(received)
    }

    /// Blocks until the result is available.
    ///
    /// # Errors
    ///
    /// Returns the run's error, [`RoutingError::WorkerPanicked`] if it
    /// panicked, or [`RoutingError::WorkerDisconnected`] if the result was
    /// already taken with [`OptimizerHandle::try_result`].
    pub fn wait(mut self) -> RunResult {
        if self.delivered {
            return Err(RoutingError::WorkerDisconnected);
        }
        let received = self
            .receiver
            .recv()
            .unwrap_or(Err(RoutingError::WorkerDisconnected));
        self.delivered = true;
        self.join();
        received
    }

    /// Requests cancellation. The run stops at its next iteration boundary.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the cancellation token shared with the run.
    #[must_use]
    pub const fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Returns `true` once the background thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            // Panics are caught inside the task, so join only fails if the
            // send itself panicked.
            if thread.join().is_err() {
                warn!("optimizer thread exited abnormally");
            }
        }
    }
}

/// Runs [`optimize_highways_with_cancel`] on a background thread.
///
/// # Errors
///
/// Invalid input is reported here, before any thread is started, with the
/// same errors [`optimize_highways`](crate::optimize_highways) returns.
/// Failures during the run arrive through the handle.
pub fn spawn_optimizer(
    problem: HighwayProblem,
    config: HighwayConfig,
) -> Result<OptimizerHandle, RoutingError> {
    spawn_optimizer_with_token(problem, config, CancelToken::new())
}

/// Like [`spawn_optimizer`], sharing a caller-provided cancellation token.
///
/// If the token is already cancelled, no thread is started and the handle
/// yields [`RoutingError::Cancelled`].
///
/// # Errors
///
/// Same as [`spawn_optimizer`].
pub fn spawn_optimizer_with_token(
    problem: HighwayProblem,
    config: HighwayConfig,
    token: CancelToken,
) -> Result<OptimizerHandle, RoutingError> {
    config.validate()?;
    problem.validate()?;
    debug!(
        anchors = problem.anchor_count(),
        waypoints = config.waypoint_count(),
        "spawning optimizer"
    );

    Ok(spawn_task(token, move |token| {
        optimize_highways_with_cancel(&problem, &config, Some(token))
    }))
}

/// Runs `task` on a named thread and delivers its result once.
pub(crate) fn spawn_task<F>(token: CancelToken, task: F) -> OptimizerHandle
where
    F: FnOnce(&CancelToken) -> RunResult + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    if token.is_cancelled() {
        if sender.send(Err(RoutingError::Cancelled)).is_err() {
            debug!("optimizer handle dropped before cancellation was delivered");
        }
        return OptimizerHandle {
            receiver,
            token,
            thread: None,
            delivered: false,
        };
    }

    let worker_token = token.clone();
    let spawned = thread::Builder::new()
        .name("highway-optimizer".into())
        .spawn(move || {
            let result = match panic::catch_unwind(AssertUnwindSafe(|| task(&worker_token))) {
                Ok(result) => result,
                Err(payload) => Err(RoutingError::WorkerPanicked(panic_message(&*payload))),
            };
            if sender.send(result).is_err() {
                debug!("optimizer handle dropped before the result arrived");
            }
        });

    let thread = match spawned {
        Ok(handle) => Some(handle),
        Err(error) => {
            warn!(%error, "failed to spawn optimizer thread");
            None
        }
    };

    OptimizerHandle {
        receiver,
        token,
        thread,
        delivered: false,
    }
}

/// Extracts the message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
