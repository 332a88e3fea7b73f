/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Wrap `text` in `color`, resetting afterwards.
pub fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, RESET)
}

/// Inactive rows are greyed out.
pub fn color_for_active(active: bool) -> &'static str {
    if active { RESET } else { GREY }
}

/// Past-due services are highlighted in yellow.
pub fn color_for_past_due(past_due: bool) -> &'static str {
    if past_due { YELLOW } else { RESET }
}
