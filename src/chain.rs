use super::error::{Error, Result};
use tracing::{debug, trace};

/// Fluent sequence of operations over a [`Reader`](crate::Reader) or
/// [`Writer`](crate::Writer).
///
/// The chain carries the outcome so far. The first failure is latched and every
/// later step is skipped without touching the stream, so the error reported at
/// the end is always the first one.
#[derive(Debug)]
#[must_use = "a chain reports its outcome through `finish` or `error`"]
pub struct Chain<'a, S> {
    stream: &'a mut S,
    state: Result<()>,
}

impl<'a, S> Chain<'a, S> {
    pub fn new(stream: &'a mut S) -> Self {
        Self {
            stream,
            state: Ok(()),
        }
    }

    /// Runs `op` unless an earlier step already failed.
    pub fn and_then<F>(mut self, op: F) -> Self
    where
        F: FnOnce(&mut S) -> Result<()>,
    {
        if self.state.is_ok() {
            if let Err(e) = op(&mut *self.stream) {
                debug!(error = %e, "stream chain failed, skipping remaining operations");
                self.state = Err(e);
            }
        } else {
            trace!("stream chain skipped operation");
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.state.is_ok()
    }

    /// The latched error, if any. Stable across calls.
    pub fn error(&self) -> Option<&Error> {
        self.state.as_ref().err()
    }

    pub fn result(&self) -> Result<(), &Error> {
        self.state.as_ref().map(|_| ())
    }

    /// Access to the underlying stream, e.g. to inspect the source or sink
    /// between steps.
    pub fn stream(&mut self) -> &mut S {
        &mut *self.stream
    }

    pub fn finish(self) -> Result<()> {
        self.state
    }
}
