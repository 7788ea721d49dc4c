//! Message sinks

use super::types::Message;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use std::io::Write;

/// Destination for emitted messages
pub trait MessageSink {
    /// Write one message
    fn emit(&mut self, message: &Message) -> Result<()>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn emit(&mut self, message: &Message) -> Result<()> {
        (**self).emit(message)
    }
}

/// Writes one JSON document per line, flushing after each message
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of messages written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<std::io::Stdout> {
    /// Sink on standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Vec<Message>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in emission order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Records emitted for a stream
    pub fn records(&self, stream: &str) -> Vec<&JsonObject> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Schema message sent for a stream, if any
    pub fn schema(&self, stream: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.is_schema() && m.stream() == Some(stream))
    }

    /// State documents in emission order
    pub fn states(&self) -> Vec<&JsonValue> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::State { value } => Some(value),
                Message::Schema { .. } | Message::Record { .. } => None,
            })
            .collect()
    }

    /// Last emitted state document
    pub fn last_state(&self) -> Option<&JsonValue> {
        self.states().pop()
    }
}

impl MessageSink for MemorySink {
    fn emit(&mut self, message: &Message) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
