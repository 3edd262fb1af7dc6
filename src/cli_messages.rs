//! CLI command messaging system
//!
//! One-shot commands report through tagged lines on stdout so that scripts can
//! grep for `[ERROR]`. Every outcome produces exactly one tagged line; details
//! follow on the same line, tab separated.

use crate::notifications::Severity;

/// Tag printed in front of a command message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn label(&self) -> &'static str {
        match self {
            Tag::Info => "INFO",
            Tag::Warn => "WARN",
            Tag::Error => "ERROR",
            Tag::Success => "SUCCESS",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Tag::Info => "\x1b[1;36m",
            Tag::Warn => "\x1b[1;33m",
            Tag::Error => "\x1b[1;31m",
            Tag::Success => "\x1b[1;32m",
        }
    }
}

impl From<Severity> for Tag {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Success => Tag::Success,
            Severity::Danger => Tag::Error,
            Severity::Warning => Tag::Warn,
            Severity::Info => Tag::Info,
        }
    }
}

/// Render a tagged line without printing it.
pub fn format_line(tag: Tag, title: &str, details: &str) -> String {
    let mut line = format!("{}[{}]\x1b[0m {}", tag.color(), tag.label(), title);
    if !details.is_empty() {
        line.push_str("\t ");
        line.push_str(details);
    }
    line
}

pub fn print_tagged(tag: Tag, title: &str, details: &str) {
    println!("{}", format_line(tag, title, details));
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(Tag::Info, title, details);
}

pub fn print_error(title: &str, details: Option<&str>) {
    print_tagged(Tag::Error, title, details.unwrap_or_default());
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(Tag::Success, title, details);
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_details_are_optional() {
        assert_eq!(
            format_line(Tag::Error, "Erreur lors de l'export Excel", ""),
            "\x1b[1;31m[ERROR]\x1b[0m Erreur lors de l'export Excel"
        );
        assert!(format_line(Tag::Info, "Hôtels", "3 trouvés").ends_with("Hôtels\t 3 trouvés"));
    }

    #[test]
    fn test_danger_notifications_print_as_errors() {
        assert_eq!(Tag::from(Severity::Danger), Tag::Error);
        assert_eq!(Tag::from(Severity::Warning), Tag::Warn);
    }
}
