//! Frame sink that streams snapshots to the renderer as JSON lines.
//!
//! Each [`FrameSnapshot`] becomes one line of JSON followed by `\n`, and the
//! writer is flushed after every frame so a renderer reading a pipe sees
//! frames as they happen.

use std::io::Write;

use crossing_core::runner::{FrameSink, SinkError};
use crossing_types::FrameSnapshot;
use tracing::trace;

/// Writes one JSON object per frame.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    /// Frames written so far.
    written: u64,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Create a sink writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of frames written.
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Return the underlying writer.
    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for JsonLinesSink<W> {
    fn on_frame(&mut self, frame: &FrameSnapshot) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written = self.written.saturating_add(1);
        trace!(frame = frame.frame, "Frame written");
        Ok(())
    }
}
