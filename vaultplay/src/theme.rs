//! Color theme system for vaultplay.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! vaultplay renders. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, safe on any terminal including plain SSH sessions.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across vaultplay's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Borders
    /// Border color for the focused input and the player modal.
    pub border_active: Color,
    /// Border color for everything else.
    pub border_inactive: Color,

    // Form
    /// Title and icon accents.
    pub accent: Color,
    /// Text typed into an editable field.
    pub input_text: Color,
    /// Text of a read-only field (stream loaded or loading).
    pub input_disabled: Color,
    /// Placeholder text in an empty field.
    pub placeholder: Color,
    /// Identifier values echoed in the ready card and modal header.
    pub identifier: Color,

    // Banners
    /// Validation / playback error banner.
    pub error: Color,
    /// "Video loaded successfully!" banner.
    pub success: Color,
    /// Loading spinner and hints.
    pub muted: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Phase indicator while a stream is playing.
    pub status_phase_playing: Color,
    /// Phase indicator for every other phase.
    pub status_phase_other: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Magenta,
            border_inactive: Color::DarkGray,

            accent: Color::Magenta,
            input_text: Color::White,
            input_disabled: Color::DarkGray,
            placeholder: Color::DarkGray,
            identifier: Color::LightMagenta,

            error: Color::Red,
            success: Color::Green,
            muted: Color::Gray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_phase_playing: Color::Green,
            status_phase_other: Color::Cyan,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let pink = Color::Rgb(245, 194, 231); // #f5c2e7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: mauve,
            border_inactive: overlay1,

            accent: mauve,
            input_text: text,
            input_disabled: overlay0,
            placeholder: overlay0,
            identifier: pink,

            error: red,
            success: green,
            muted: subtext0,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_phase_playing: green,
            status_phase_other: lavender,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup; the fallback is logged.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
