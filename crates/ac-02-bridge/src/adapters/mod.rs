//! Adapters for the bridge.

pub mod fee_oracle;

pub use fee_oracle::FixedFeeOracle;
