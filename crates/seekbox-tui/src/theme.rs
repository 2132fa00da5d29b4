//! Colour theme for the seekbox TUI.
//!
//! Themes are TOML documents. The default theme is embedded with
//! [`include_str!`] so the binary works without any files on disk; a user
//! theme only needs the keys it changes, the rest fall back to the default.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    text: RawStyle,
    placeholder: RawStyle,
    spinner: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawDropdown {
    item: RawStyle,
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawChips {
    chip: RawStyle,
    remove: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    success: RawStyle,
    hint: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    input: RawInput,
    dropdown: RawDropdown,
    chips: RawChips,
    status: RawStatus,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Pre-resolved styles; nothing is parsed at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,

    pub input_text: Style,
    pub input_placeholder: Style,
    /// Loading indicator shown while a debounced filter is pending.
    pub input_spinner: Style,

    pub dropdown_item: Style,
    pub dropdown_highlight: Style,

    pub chip: Style,
    /// The `×` marker on each chip.
    pub chip_remove: Style,

    /// Summary line shown after a single-mode selection.
    pub status_success: Style,
    pub status_hint: Style,
}

impl Theme {
    /// Load the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which is a build mistake.
    pub fn load_default() -> Self {
        Self::from_toml_str("").expect("embedded default theme must be valid TOML")
    }

    /// Layer `src` over the default theme.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_THEME_SRC, FileFormat::Toml))
                .add_source(File::from_str(src, FileFormat::Toml)),
        )
    }

    /// Layer the theme file at `path` over the default theme.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!(path = %path.display(), "loading theme");
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_THEME_SRC, FileFormat::Toml))
                .add_source(File::from(path).format(FileFormat::Toml)),
        )
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> anyhow::Result<Self> {
        let raw: RawTheme = builder.build()?.try_deserialize()?;
        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            input_text: raw.input.text.into_style(),
            input_placeholder: raw.input.placeholder.into_style(),
            input_spinner: raw.input.spinner.into_style(),
            dropdown_item: raw.dropdown.item.into_style(),
            dropdown_highlight: raw.dropdown.highlight.into_style(),
            chip: raw.chips.chip.into_style(),
            chip_remove: raw.chips.remove.into_style(),
            status_success: raw.status.success.into_style(),
            status_hint: raw.status.hint.into_style(),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, ...), hex `#rrggbb`
/// and `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => s["indexed:".len()..].parse().ok().map(Color::Indexed),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.dropdown_highlight, Style::default());
        assert_ne!(theme.chip, Style::default());
        assert_eq!(theme.status_success.fg, Some(Color::Green));
    }

    #[test]
    fn override_replaces_only_given_keys() {
        let theme = Theme::from_toml_str("[dropdown]\nhighlight = { fg = \"#ff0080\" }").unwrap();
        assert_eq!(theme.dropdown_highlight.fg, Some(Color::Rgb(255, 0, 128)));
        assert_eq!(theme.status_success.fg, Some(Color::Green));
    }

    #[test]
    fn malformed_theme_is_an_error() {
        assert!(Theme::from_toml_str("[borders\nfocused = ").is_err());
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
