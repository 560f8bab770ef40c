use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{info, warn};

use crate::core::{Simulator, SimulatorConfig};
use crate::error::PhysicsError;
use crate::protocol::{Request, Response};
use crate::Result;

/// Owner-side handle of a simulator running on its own thread.
///
/// The simulator is only reachable through the request channel; requests are
/// executed one at a time in the order they were sent. Dropping the handle
/// stops the worker and waits for it.
pub struct SimulatorHandle {
    requests: Sender<Request>,
    responses: Receiver<Response>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    /// Starts a worker thread owning a new simulator
    pub fn spawn(config: SimulatorConfig) -> Result<Self> {
        let (request_tx, request_rx) = if config.channel_capacity == 0 {
            unbounded()
        } else {
            bounded(config.channel_capacity)
        };
        let (response_tx, response_rx) = unbounded();

        let thread = thread::Builder::new()
            .name("phys-worker".into())
            .spawn(move || {
                let simulator = Simulator::new(config);
                run(simulator, request_rx, response_tx);
            })
            .map_err(|err| PhysicsError::InternalError(format!("failed to spawn worker: {}", err)))?;

        Ok(Self {
            requests: request_tx,
            responses: response_rx,
            thread: Some(thread),
        })
    }

    /// Queues a request for the worker
    pub fn send(&self, request: Request) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| PhysicsError::WorkerDisconnected)
    }

    /// Blocks until the worker sends a response
    pub fn recv(&self) -> Result<Response> {
        self.responses
            .recv()
            .map_err(|_| PhysicsError::WorkerDisconnected)
    }

    /// Waits up to `timeout` for a response
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Response>> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(PhysicsError::WorkerDisconnected),
        }
    }

    /// Returns a pending response without blocking
    pub fn try_recv(&self) -> Result<Option<Response>> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(PhysicsError::WorkerDisconnected),
        }
    }

    /// Stops the worker after the requests already queued and waits for it
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // The worker may already be gone; joining reports why
        let _ = self.requests.send(Request::Shutdown);
        thread.join().map_err(|_| PhysicsError::WorkerPanicked)
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("Simulation worker did not stop cleanly: {}", err);
        }
    }
}

fn run(mut simulator: Simulator, requests: Receiver<Request>, responses: Sender<Response>) {
    info!("Simulation worker started");

    for request in requests.iter() {
        if matches!(request, Request::Shutdown) {
            break;
        }

        let op = request.op();
        let response = match simulator.handle(request) {
            Ok(response) => response,
            Err(err) => {
                warn!("Request {} failed: {}", op, err);
                Some(Response::error(op, &err))
            }
        };

        if let Some(response) = response {
            if responses.send(response).is_err() {
                break;
            }
        }
    }

    info!("Simulation worker stopped");
}
