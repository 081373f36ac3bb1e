//! Color theme and glyphs for the Vitrine terminal host.
//!
//! Uses the Kanagawa Wave palette.

use ratatui::style::{Color, Modifier, Style};

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray
    pub const TEXT_DISABLED: Color = Color::Rgb(113, 124, 124); // katanaGray

    // === Accents ===
    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub peach: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            primary: colors::PRIMARY,
            accent: colors::CYAN,
            success: colors::GREEN,
            peach: colors::ORANGE,
            error: colors::RED,
        }
    }
}

/// Blend `fg` toward `bg` as opacity falls. Non-RGB colors snap: visible at
/// half opacity or more, background below.
#[must_use]
pub fn fade(fg: Color, bg: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |f: u8, b: u8| {
                (f32::from(b) + (f32::from(f) - f32::from(b)) * opacity).round() as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub indicator_active: &'static str,
    pub indicator: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub playing: &'static str,
    pub paused: &'static str,
}

pub const GLYPHS: Glyphs = Glyphs {
    indicator_active: "●",
    indicator: "○",
    previous: "◀",
    next: "▶",
    playing: "▶",
    paused: "⏸",
};

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn button(palette: &Palette, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(palette.text_disabled)
        } else {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        }
    }

    #[must_use]
    pub fn focused(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_blends_rgb() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(fade(fg, bg, 1.0), fg);
        assert_eq!(fade(fg, bg, 0.0), bg);
        assert_eq!(fade(fg, bg, 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn fade_snaps_named_colors() {
        assert_eq!(fade(Color::White, Color::Black, 0.6), Color::White);
        assert_eq!(fade(Color::White, Color::Black, 0.2), Color::Black);
    }

    #[test]
    fn fade_clamps_overshoot() {
        let fg = Color::Rgb(10, 10, 10);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(fade(fg, bg, 1.3), fg);
    }
}
