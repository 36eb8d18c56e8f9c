//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod packetframe;

pub use packetframe::{PacketframeProvider, PacketframeProviderBuilder};
