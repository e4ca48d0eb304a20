//! Domain layer for the bridge.

pub mod chains;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod relayers;
pub mod value_objects;

pub use chains::ChainRegistry;
pub use entities::{BridgeRequest, ChainConfig, CreateRequestParams, RelayerInfo};
pub use errors::BridgeError;
pub use invariants::content_hash;
pub use relayers::RelayerRegistry;
pub use value_objects::BridgeStatus;
