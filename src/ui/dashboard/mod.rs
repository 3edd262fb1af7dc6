//! Modular dashboard implementation
//!
//! Shared components, one renderer per section, and the frame that ties them together

pub mod components;
pub mod renderer;
pub mod sections;
pub mod utils;

pub use renderer::render_dashboard;
