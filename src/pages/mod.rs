//! Pages
//!
//! Top-level page components for each route.

pub mod executive;
pub mod clients;

pub use executive::Executive;
pub use clients::Clients;
