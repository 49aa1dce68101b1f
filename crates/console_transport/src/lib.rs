//! Console transport: backend client and the two log-delivery adapters.
//!
//! Progress output reaches the monitor either by pull (HTTP polling with a
//! cursor) or by push (a WebSocket channel). Both adapters implement the
//! same [`Transport`] capability and converge on the same observable event
//! sequence for equivalent backend runs; only their behavior on transport
//! failure differs, and that difference is carried in explicit policy
//! structs rather than buried in the variants.
mod client;
mod manager;
mod polling;
mod streaming;
mod transport;
mod types;

pub use client::BackendClient;
pub use manager::{TransportManager, TransportMode};
pub use polling::{PollPolicy, PollingTransport};
pub use streaming::{DropBehavior, StreamPolicy, StreamingTransport};
pub use transport::{ChannelEventSink, EventSink, Transport};
pub use types::{
    Job, PollResponse, RunCounts, SheetsResponse, StartAck, StartRequest, StatsResponse,
    TransportError, TransportEvent, WireConfig, WireFrame, WireLog, WireOutcome, WireResult,
    WireTabStats,
};
