//! Unified messaging system for session operations

use crate::cli_messages::{Tag, print_tagged};
use crate::environment::Environment;
use crate::navigation::Section;

/// Session-specific message types
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn print(&self) {
        match self {
            Self::Info(msg) => print_tagged(Tag::Info, msg, ""),
            Self::Success(msg) => print_tagged(Tag::Success, msg, ""),
        }
    }
}

/// Print session startup message
pub fn print_session_starting(section: Section, environment: &Environment) {
    SessionMessage::info(format!(
        "Starting console on {} ({})",
        section.title(),
        environment.server_url()
    ))
    .print();
}

/// Print session exit message
pub fn print_session_exit_success() {
    SessionMessage::success("HotelSat admin exited successfully").print();
}
