//! State Management
//!
//! Session state, card slots, filters and date periods.

pub mod cards;
pub mod filters;
pub mod period;
pub mod session;

pub use cards::{Accent, CardPatch};
pub use filters::FilterState;
pub use period::Period;
pub use session::{provide_dashboard_state, use_dashboard_state, DashboardState, Debouncer};
