//! Stream draining: read a child's output line by line into the logger.
//!
//! Each invocation runs one drainer per output stream. A drainer reads
//! until end-of-stream, emitting every complete line through its
//! [`StreamTag`], and races every read against the invocation's
//! [`ExecContext`] so a hung child holding an open pipe cannot block a
//! read past the deadline.

use super::context::{CancelCause, ExecContext};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{Level, debug, error, info, trace, warn};

/// Log-line prefix and severity for one output stream.
#[derive(Debug, Clone)]
pub struct StreamTag {
    prefix: String,
    level: Level,
}

impl StreamTag {
    /// The conventional stdout tag: `"stdout> "` at INFO.
    pub fn stdout() -> Self {
        Self::new("stdout> ", Level::INFO)
    }

    /// The conventional stderr tag: `"stderr> "` at WARN.
    pub fn stderr() -> Self {
        Self::new("stderr> ", Level::WARN)
    }

    /// A tag with a custom prefix and severity.
    pub fn new(prefix: impl Into<String>, level: Level) -> Self {
        Self {
            prefix: prefix.into(),
            level,
        }
    }

    /// The prefix prepended to every emitted line.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn emit(&self, line: &str) {
        if self.level == Level::ERROR {
            error!("{}{}", self.prefix, line);
        } else if self.level == Level::WARN {
            warn!("{}{}", self.prefix, line);
        } else if self.level == Level::DEBUG {
            debug!("{}{}", self.prefix, line);
        } else if self.level == Level::TRACE {
            trace!("{}{}", self.prefix, line);
        } else {
            info!("{}{}", self.prefix, line);
        }
    }
}

/// Why a drainer stopped before end-of-stream.
#[derive(Debug, Error)]
pub enum DrainError {
    /// A read was still pending when the context expired.
    #[error("read timed out: {cause}")]
    TimedOut { cause: CancelCause },

    /// Any other read error, returned as-is.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read `reader` to end-of-stream, logging each complete line under `tag`.
///
/// Lines are emitted exactly once, in order, with the terminator (and any
/// `\r` before it) stripped. Partial trailing data with no terminator at
/// end-of-stream is discarded. Every read races the context: expiry or
/// cancellation unblocks a pending read and yields
/// [`DrainError::TimedOut`] carrying the context's cause.
pub async fn drain<R>(reader: R, tag: &StreamTag, ctx: &ExecContext) -> Result<(), DrainError>
where
    R: AsyncRead + Unpin,
{
    read_lines(reader, ctx, |line| tag.emit(line)).await
}

async fn read_lines<R, F>(reader: R, ctx: &ExecContext, mut on_line: F) -> Result<(), DrainError>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = tokio::select! {
            n = reader.read_until(b'\n', &mut buf) => n?,
            _ = ctx.expired() => {
                return Err(DrainError::TimedOut {
                    cause: ctx.cause().unwrap_or(CancelCause::DeadlineExceeded),
                });
            }
        };
        if n == 0 {
            return Ok(()); // end of stream
        }
        if buf.last() != Some(&b'\n') {
            return Ok(()); // stream ended mid-line; the partial line is dropped
        }
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        on_line(&String::from_utf8_lossy(&buf));
    }
}
