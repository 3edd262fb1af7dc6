//! Dashboard component modules
//!
//! Pieces shared by every section

pub mod footer;
pub mod header;
pub mod modal;
pub mod notifications;
pub mod selector;
