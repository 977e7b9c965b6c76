//! Color constants for the TUI.

use ratatui::style::Color;

use crate::impact::ImpactStatus;

/// Baseline bar color.
pub const BASELINE_BAR: Color = Color::Gray;
/// Load-shed bar color when the shift relieves the grid.
pub const RELIEF_BAR: Color = Color::Green;
/// Load-shed bar color when the fleet is saturated.
pub const SATURATION_BAR: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Diagnostic text color.
pub const ERROR_FG: Color = Color::LightRed;

/// Load-shed bar color: green for a negative flex shift, red otherwise.
pub fn load_shed_color(flex_down_pct: f64) -> Color {
    if flex_down_pct < 0.0 {
        RELIEF_BAR
    } else {
        SATURATION_BAR
    }
}

/// Table color for a status cell.
pub fn status_color(status: ImpactStatus) -> Color {
    match status {
        ImpactStatus::Baseline => Color::Gray,
        ImpactStatus::Reduced => Color::Green,
        ImpactStatus::Increased => Color::Red,
        ImpactStatus::Stable => Color::Yellow,
    }
}
