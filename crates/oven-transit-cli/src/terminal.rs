//! Terminal styling and capability detection.
//!
//! Colors and glyphs are resolved once into a [`ColorPalette`] / [`BarGlyphs`]
//! so renderers never query the environment themselves.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for headings and totals.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for labels and secondary figures.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for filled progress.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for timestamps.
    pub const CYAN: &str = "\x1b[36m";
    /// Orange (256-color) for feed-stop holes.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for warnings.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            cyan: "",
            orange: "",
            red: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Palette honoring an explicit `--no-color` switch before detection.
    #[must_use]
    pub fn resolve(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::detect()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Characters used to draw progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGlyphs {
    pub filled: char,
    pub empty: char,
    pub gap: char,
}

impl BarGlyphs {
    pub const UNICODE: Self = Self {
        filled: '█',
        empty: '░',
        gap: '▚',
    };

    pub const ASCII: Self = Self {
        filled: '#',
        empty: '.',
        gap: '~',
    };

    #[must_use]
    pub fn detect() -> Self {
        if supports_unicode() {
            Self::UNICODE
        } else {
            Self::ASCII
        }
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
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

/// Check for explicit Unicode support hints in `LANG` / `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    for key in ["LC_ALL", "LANG"] {
        if let Ok(value) = std::env::var(key) {
            if value.to_uppercase().contains("UTF") {
                return true;
            }
        }
    }
    #[cfg(windows)]
    {
        if let Ok(term) = std::env::var("TERM") {
            return !term.eq_ignore_ascii_case("dumb");
        }
        return true;
    }
    #[cfg(not(windows))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    /// Serializes tests that modify process-global environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        result
    }

    #[test]
    fn plain_palette_is_empty() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.green.is_empty());
        assert!(!ColorPalette::colored().orange.is_empty());
    }

    #[test]
    fn no_color_flag_wins_over_detection() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm"))], || {
            assert_eq!(ColorPalette::resolve(true), ColorPalette::plain());
            assert_eq!(ColorPalette::resolve(false), ColorPalette::colored());
        });
    }

    #[test]
    fn no_color_env_disables_colors() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn dumb_terminal_disables_colors() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn utf8_locale_enables_unicode_glyphs() {
        with_env_vars(&[("LANG", Some("fr_FR.UTF-8")), ("LC_ALL", None)], || {
            assert_eq!(BarGlyphs::detect(), BarGlyphs::UNICODE);
        });
    }

    #[test]
    #[cfg(not(windows))]
    fn plain_locale_falls_back_to_ascii() {
        with_env_vars(&[("LANG", Some("C")), ("LC_ALL", None)], || {
            assert_eq!(BarGlyphs::detect(), BarGlyphs::ASCII);
        });
    }
}
