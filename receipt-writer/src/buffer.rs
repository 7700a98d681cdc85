//! In-memory byte stream for ESC/POS print data
//!
//! The stream is either open (holding bytes) or closed. Appending to a closed
//! stream reopens it with an empty buffer instead of failing.

use crate::error::{PrintError, PrintResult};
use std::io;

/// Initial capacity for a freshly opened stream
const INITIAL_CAPACITY: usize = 4096;

#[derive(Debug)]
enum StreamState {
    Open(Vec<u8>),
    Closed,
}

/// Append-only byte accumulator with reset/close lifecycle
#[derive(Debug)]
pub struct ByteStream {
    state: StreamState,
}

impl ByteStream {
    /// Open a fresh, empty stream
    pub fn open() -> PrintResult<Self> {
        Ok(Self {
            state: StreamState::Open(allocate()?),
        })
    }

    /// Whether the stream has been closed by [`drain_and_close`](Self::drain_and_close)
    pub fn is_closed(&self) -> bool {
        matches!(self.state, StreamState::Closed)
    }

    /// Number of buffered bytes (0 when closed)
    pub fn len(&self) -> usize {
        match &self.state {
            StreamState::Open(buf) => buf.len(),
            StreamState::Closed => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append bytes, reopening the stream first if it is closed
    pub fn append(&mut self, bytes: &[u8]) -> PrintResult<()> {
        match &mut self.state {
            StreamState::Open(buf) => buf.extend_from_slice(bytes),
            StreamState::Closed => {
                let mut buf = allocate()?;
                buf.extend_from_slice(bytes);
                self.state = StreamState::Open(buf);
            }
        }
        Ok(())
    }

    /// Take everything written so far and leave an empty open stream
    pub fn drain_and_reset(&mut self) -> PrintResult<Vec<u8>> {
        match &mut self.state {
            StreamState::Open(buf) => Ok(std::mem::take(buf)),
            StreamState::Closed => {
                self.state = StreamState::Open(allocate()?);
                Ok(Vec::new())
            }
        }
    }

    /// Take everything written so far and close the stream
    pub fn drain_and_close(&mut self) -> PrintResult<Vec<u8>> {
        match std::mem::replace(&mut self.state, StreamState::Closed) {
            StreamState::Open(buf) => Ok(buf),
            StreamState::Closed => Ok(Vec::new()),
        }
    }
}

fn allocate() -> PrintResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve(INITIAL_CAPACITY).map_err(|e| {
        PrintError::Io(io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!("Buffer allocation failed: {}", e),
        ))
    })?;
    Ok(buf)
}
