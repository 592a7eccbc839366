//! Core data pipeline for the statuswatch status-page aggregator:
//! status vocabulary normalization, payload-to-view-model mapping,
//! announcement reconciliation, region linking, and the shared view snapshot
//! consumed by render collaborators.

pub mod link;
pub mod mapper;
pub mod models;
pub mod payload;
pub mod reconcile;
pub mod state;
pub mod status;
