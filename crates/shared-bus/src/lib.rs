//! # Shared Bus - Observable Transition Log
//!
//! Every accepted state transition in the bridge and settlement subsystems
//! is published here as a structured event. The cores only produce; they
//! never consume or store events. Downstream observability tooling
//! (dashboards, log shippers, audit) subscribes out-of-process.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ ac-02-bridge │                    │  subscriber  │
//! │              │    publish()       │ (dashboard,  │
//! │              │ ──────┐            │  audit, ...) │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{BridgeEvent, EventFilter, EventTopic, Transition};
pub use publisher::{EventPublisher, InMemoryEventBus, RecordingSink};
pub use subscriber::Subscription;

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
