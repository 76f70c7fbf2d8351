//! Status lines for the one-shot commands and session start/stop.
//!
//! Use the `print_cmd_*` macros; they take a title plus `format!` arguments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[1;36m[INFO]\x1b[0m",
            Tone::Warn => "\x1b[1;33m[WARN]\x1b[0m",
            Tone::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Tone::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

fn render(tone: Tone, title: &str, details: &str) -> String {
    match details {
        "" => format!("{} {}", tone.tag(), title),
        details if details.contains('\n') => format!("{} {}\n{}", tone.tag(), title, details),
        details => format!("{} {}: {}", tone.tag(), title, details),
    }
}

pub fn print_line(tone: Tone, title: &str, details: &str) {
    println!("{}", render(tone, title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Info, $title, "")
    };
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Info, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Warn, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Error, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Success, $title, "")
    };
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Success, $title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_follow_the_title() {
        let line = render(Tone::Success, "Saved", "campaign c1");
        assert!(line.ends_with("Saved: campaign c1"));
        assert!(line.contains("[SUCCESS]"));
    }

    #[test]
    fn multiline_details_start_on_their_own_line() {
        let line = render(Tone::Info, "Configuration", "{\n}");
        assert!(line.ends_with("Configuration\n{\n}"));
    }

    #[test]
    fn empty_details_print_the_title_alone() {
        assert!(render(Tone::Warn, "Careful", "").ends_with("Careful"));
    }
}
