//! The single ingress channel between the user thread and the GUI thread.
//!
//! Blocking and queued requests share one FIFO, so the GUI thread sees them
//! in exactly the order they were submitted. Blocking calls additionally
//! carry a one-shot result slot the caller waits on.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::controllers::invocation::request::{InvocationRequest, Operation, Outcome};
use crate::controllers::ports::waker::GuiWaker;
use crate::core::errors::BridgeError;

#[must_use]
pub fn invocation_channel(waker: Arc<dyn GuiWaker>) -> (Invoker, InvocationInbox) {
    let (sender, receiver) = mpsc::channel();

    let invoker = Invoker {
        sender,
        next_seq: Arc::new(AtomicU64::new(0)),
        waker,
    };

    (invoker, InvocationInbox { receiver })
}

/// User-thread side. Cheap to clone.
#[derive(Clone)]
pub struct Invoker {
    sender: Sender<InvocationRequest>,
    next_seq: Arc<AtomicU64>,
    waker: Arc<dyn GuiWaker>,
}

impl Invoker {
    /// Runs `operation` on the GUI thread and waits for its result.
    ///
    /// Everything this thread submitted earlier, queued or blocking, has
    /// been executed by the time this returns.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Disconnected`] if the GUI thread has stopped,
    /// or whatever error the operation itself produced.
    pub fn call(&self, operation: Operation) -> Result<Outcome, BridgeError> {
        let (reply, slot) = mpsc::sync_channel(1);
        let seq = self.next_seq();

        self.sender
            .send(InvocationRequest::Blocking {
                seq,
                operation,
                reply,
            })
            .map_err(|_| BridgeError::Disconnected)?;
        self.waker.wake();

        slot.recv().map_err(|_| BridgeError::Disconnected)?
    }

    /// Enqueues `operation` without waiting for it to run.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Disconnected`] if the GUI thread has stopped.
    pub fn post(&self, operation: Operation) -> Result<(), BridgeError> {
        let seq = self.next_seq();

        self.sender
            .send(InvocationRequest::Queued { seq, operation })
            .map_err(|_| BridgeError::Disconnected)?;
        self.waker.wake();

        Ok(())
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// GUI-thread side.
pub struct InvocationInbox {
    receiver: Receiver<InvocationRequest>,
}

/// Result of polling the inbox.
#[derive(Debug)]
pub enum Inbound {
    Request(InvocationRequest),
    Empty,
    /// Every `Invoker` has been dropped.
    Closed,
}

impl InvocationInbox {
    pub fn try_next(&self) -> Inbound {
        match self.receiver.try_recv() {
            Ok(request) => Inbound::Request(request),
            Err(TryRecvError::Empty) => Inbound::Empty,
            Err(TryRecvError::Disconnected) => Inbound::Closed,
        }
    }

    /// Blocks until a request arrives.
    pub fn next(&self) -> Inbound {
        match self.receiver.recv() {
            Ok(request) => Inbound::Request(request),
            Err(_) => Inbound::Closed,
        }
    }
}
