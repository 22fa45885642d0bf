//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions plus color detection for the text formatter.
//! JSON output never goes through this module.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green for the source badge.
    pub const TAG_SOURCE: &str = "\x1b[1;7;32m";
    /// Bold reverse yellow for waypoint badges.
    pub const TAG_WAYPOINT: &str = "\x1b[1;7;33m";
    /// Bold reverse magenta for the destination badge.
    pub const TAG_DESTINATION: &str = "\x1b[1;7;35m";

    /// Bright bold white for node ids.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for tree lines and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for costs.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow for warnings such as truncation.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for unreachable destinations.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either actual ANSI sequences or empty strings when
/// color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_source: &'static str,
    pub tag_waypoint: &'static str,
    pub tag_destination: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_source: colors::TAG_SOURCE,
            tag_waypoint: colors::TAG_WAYPOINT,
            tag_destination: colors::TAG_DESTINATION,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_source: "",
            tag_waypoint: "",
            tag_destination: "",
            white_bold: "",
            gray: "",
            cyan: "",
            yellow: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a path cost, dropping the fraction for whole numbers.
///
/// ```
/// # use netroute_cli::terminal::format_cost;
/// assert_eq!(format_cost(3.0), "3");
/// assert_eq!(format_cost(2.5), "2.5");
/// ```
#[must_use]
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.abs() < 1e15 {
        format!("{:.0}", cost)
    } else {
        format!("{}", cost)
    }
}
