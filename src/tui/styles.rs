//! Clinical color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskClass;

/// Clinical theme color palette.
pub struct ClinicTheme;

impl ClinicTheme {
    // === Primary Colors ===

    /// Clinical blue - Primary color
    pub const PRIMARY: Color = Color::Rgb(0, 102, 204); // #0066CC

    /// Lighter blue for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(77, 148, 255); // #4D94FF

    // === Semantic Colors ===

    /// Green - low risk / success
    pub const SUCCESS: Color = Color::Rgb(40, 167, 69); // #28A745

    /// Amber - warnings
    pub const WARNING: Color = Color::Rgb(255, 193, 7); // #FFC107

    /// Red - high risk / errors
    pub const DANGER: Color = Color::Rgb(220, 53, 69); // #DC3545

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for success messages
    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Style for danger/error messages
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Get risk class style
    #[must_use]
    pub fn risk(class: RiskClass) -> Style {
        let (r, g, b) = class.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }
}
