//! Background compile worker
//!
//! Moves compilation off the caller's thread. One `std::thread` owns the pipeline and serves
//! requests from an `mpsc` channel in arrival order; responses come back on a second channel,
//! correlated by the caller-supplied `id`.
//!
//! The worker also keeps a rolling window of compile latencies and answers `Metrics` requests
//! with a [`LatencySnapshot`]. There is no cancellation, timeout, or backpressure: a request
//! waits behind every request sent before it.
//!
//! Dropping the [`CompileWorker`] closes the request channel and joins the thread.

use crate::compiler::Direction;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Default number of latency samples kept by the worker.
pub const DEFAULT_LATENCY_WINDOW: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Compile {
        id: u64,
        direction: Direction,
        input: String,
    },
    Metrics {
        id: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Compiled {
        id: u64,
        direction: Direction,
        output: String,
        elapsed_ms: f64,
    },
    Metrics {
        id: u64,
        snapshot: LatencySnapshot,
    },
}

impl Response {
    pub fn id(&self) -> u64 {
        match self {
            Response::Compiled { id, .. } | Response::Metrics { id, .. } => *id,
        }
    }
}

/// Latency statistics over the current window, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencySnapshot {
    pub samples: usize,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub avg_ms: f64,
}

/// Rolling window of the most recent latency samples.
#[derive(Debug, Clone)]
pub struct LatencyWindow {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl LatencyWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record one sample, evicting the oldest when full.
    pub fn record(&mut self, elapsed_ms: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed_ms);
    }

    pub fn snapshot(&self) -> LatencySnapshot {
        if self.samples.is_empty() {
            return LatencySnapshot::default();
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        LatencySnapshot {
            samples: sorted.len(),
            p50_ms: nearest_rank(&sorted, 50.0),
            p95_ms: nearest_rank(&sorted, 95.0),
            avg_ms: sorted.iter().sum::<f64>() / sorted.len() as f64,
        }
    }
}

impl Default for LatencyWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_WINDOW)
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let rank = (percentile / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Errors talking to the background worker
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerError {
    /// The OS refused to start the thread
    Spawn(String),
    /// The worker thread is gone
    Disconnected,
    /// A response arrived for a different request
    UnexpectedResponse { expected: u64, got: u64 },
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::Spawn(msg) => write!(f, "Failed to start compile worker: {msg}"),
            WorkerError::Disconnected => write!(f, "Compile worker disconnected"),
            WorkerError::UnexpectedResponse { expected, got } => {
                write!(f, "Expected response {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for WorkerError {}

/// Handle to the background compile thread.
pub struct CompileWorker {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
}

impl CompileWorker {
    /// Start the worker with a latency window of `window` samples.
    pub fn spawn(window: usize) -> Result<Self, WorkerError> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();

        let handle = thread::Builder::new()
            .name("folio-compile".to_string())
            .spawn(move || serve(request_rx, response_tx, LatencyWindow::new(window)))
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    /// Queue a request without waiting for its response.
    pub fn send(&self, request: Request) -> Result<(), WorkerError> {
        self.requests
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Block until the next response arrives.
    pub fn recv(&self) -> Result<Response, WorkerError> {
        self.responses.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Compile and wait for the result. Returns the output and the elapsed milliseconds.
    ///
    /// Must not be interleaved with un-received [`CompileWorker::send`] calls.
    pub fn compile(
        &self,
        id: u64,
        direction: Direction,
        input: impl Into<String>,
    ) -> Result<(String, f64), WorkerError> {
        self.send(Request::Compile {
            id,
            direction,
            input: input.into(),
        })?;
        match self.recv()? {
            Response::Compiled {
                id: got,
                output,
                elapsed_ms,
                ..
            } if got == id => Ok((output, elapsed_ms)),
            other => Err(WorkerError::UnexpectedResponse {
                expected: id,
                got: other.id(),
            }),
        }
    }

    /// Ask for the current latency snapshot and wait for it.
    pub fn metrics(&self, id: u64) -> Result<LatencySnapshot, WorkerError> {
        self.send(Request::Metrics { id })?;
        match self.recv()? {
            Response::Metrics { id: got, snapshot } if got == id => Ok(snapshot),
            other => Err(WorkerError::UnexpectedResponse {
                expected: id,
                got: other.id(),
            }),
        }
    }
}

impl Drop for CompileWorker {
    fn drop(&mut self) {
        // Closing the sender ends the serve loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("compile worker thread panicked");
            }
        }
    }
}

fn serve(requests: Receiver<Request>, responses: Sender<Response>, mut window: LatencyWindow) {
    tracing::debug!(window = window.capacity(), "compile worker started");

    for request in requests {
        let response = match request {
            Request::Compile {
                id,
                direction,
                input,
            } => {
                let started = Instant::now();
                let output = direction.compile(&input);
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                window.record(elapsed_ms);
                tracing::debug!(id, %direction, elapsed_ms, "compiled");
                Response::Compiled {
                    id,
                    direction,
                    output,
                    elapsed_ms,
                }
            }
            Request::Metrics { id } => Response::Metrics {
                id,
                snapshot: window.snapshot(),
            },
        };

        if responses.send(response).is_err() {
            break;
        }
    }

    tracing::debug!("compile worker stopped");
}
