//! Modular dashboard implementation
//!
//! State transitions, the view model derived from them, and the
//! components that draw it.

pub mod components;
pub mod renderer;
pub mod state;
pub mod utils;
pub mod view;

pub use renderer::render_dashboard;
pub use state::DashboardState;
pub use view::DashboardView;
