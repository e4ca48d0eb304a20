//! # Shared Types Crate
//!
//! Cross-subsystem primitives for the Arcade-Chain bridge and settlement
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: types used by more than one subsystem are
//!   defined here, never duplicated per crate.
//! - **Capabilities over roles**: authorization is an explicit capability
//!   set resolved through the [`IdentityProvider`] port, not inheritance.
//! - **Injected time**: subsystems never read the wall clock directly; they
//!   go through the [`Clock`] port so deadline logic is deterministic under
//!   test.

pub mod clock;
pub mod entities;
pub mod security;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::*;
pub use security::{Capability, IdentityProvider, StaticIdentityProvider};
