//! Domain events: immutable facts plus the stream metadata that carries them.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
