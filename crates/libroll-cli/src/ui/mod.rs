//! Terminal output for build results.
//!
//! Status lines go to stderr so stdout stays clean. Colour follows `NO_COLOR`,
//! `FORCE_COLOR`, `--no-color` and whether stderr is a terminal.
//!
//! ```no_run
//! use libroll_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("dist/widget-box.es.js (1.20 KB)");
//! ui::error("Can't resolve entry point for packages/empty");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

mod format;
mod messages;

pub use format::{format_duration, format_size, print_run_summary};
pub use messages::{error, info, success, warning};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// NO_COLOR wins over FORCE_COLOR; without either, stderr must be attended.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status lines are coloured.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors_enabled());
    }
}
