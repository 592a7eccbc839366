//! I/O side of the statuswatch aggregator: the retrying fetcher over an
//! abstract transport, the typed status API client, and the phased load
//! orchestrator that commits merged snapshots to the shared view state.

pub mod api;
pub mod fetch;
pub mod load;
