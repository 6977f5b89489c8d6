//! Display formatting for terminal output
//!
//! Tables are rendered with `tabled`. Colour comes from `crossterm` and is
//! applied through a [`Palette`] so callers and tests can switch it off.

pub mod analytics;
pub mod budget;

pub use analytics::{
    format_alerts, format_audit_entries, format_categories, format_simulation, format_stats,
    format_suggestions,
};
pub use budget::{format_budget_details, format_budget_list};

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

use crate::analytics::{BudgetStatus, Tone};
use crate::models::BudgetCategory;

/// Width of progress bars, in cells
pub const PROGRESS_WIDTH: usize = 20;

/// Whether output is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            enabled: !no_color && std::io::stdout().is_tty(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Paint `text` in the colour of a tone
    pub fn tone(&self, text: &str, tone: Tone) -> String {
        self.color(text, tone_color(tone))
    }

    /// Status label with its icon, coloured by its badge tone
    pub fn status(&self, status: BudgetStatus) -> String {
        let style = status.style();
        self.tone(&format!("{} {}", style.icon, style.label), style.badge)
    }

    /// Category name in the category's colour
    pub fn category(&self, category: BudgetCategory) -> String {
        let (r, g, b) = category.rgb();
        self.color(category.display_name(), Color::Rgb { r, g, b })
    }

    pub fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.color(text, Color::DarkGrey)
    }

    fn color(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::detect()
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Caution => Color::Yellow,
        Tone::Severe => Color::DarkYellow,
        Tone::Danger => Color::Red,
    }
}

/// Text progress bar, e.g. `[#########-----------]`
///
/// Percentages past 100 fill the bar.
pub fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = ((percentage.min(100) as usize) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Progress bar coloured by the status' progress tone
pub fn status_bar(palette: &Palette, status: BudgetStatus, percentage: u32) -> String {
    palette.tone(
        &progress_bar(percentage, PROGRESS_WIDTH),
        status.style().progress,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(50, 10), "[#####-----]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 10), "[##########]");
        assert_eq!(progress_bar(96, 20).matches('#').count(), 19);
    }

    #[test]
    fn test_plain_palette_adds_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.status(BudgetStatus::Exceeded), "✗ Exceeded");
        assert_eq!(palette.category(BudgetCategory::Sante), "Santé");
        assert!(!palette.heading("Lajan").contains('\u{1b}'));
    }

    #[test]
    fn test_enabled_palette_colours() {
        let palette = Palette { enabled: true };
        assert!(palette.tone("x", Tone::Danger).contains('\u{1b}'));
    }
}
