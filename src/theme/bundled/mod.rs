//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/lifecontext/themes/ on first run.
//! Users can then modify them freely.

mod daylight;
mod nebula;
mod nord;

pub use daylight::THEME as DAYLIGHT;
pub use nebula::THEME as NEBULA;
pub use nord::THEME as NORD;

/// Bundled theme metadata
pub struct BundledTheme {
    /// Filename for extraction (e.g., "Nebula.toml")
    pub filename: &'static str,
    /// TOML content
    pub content: &'static str,
}

/// All bundled themes, default first
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        filename: "Nebula.toml",
        content: NEBULA,
    },
    BundledTheme {
        filename: "Daylight.toml",
        content: DAYLIGHT,
    },
    BundledTheme {
        filename: "Nord.toml",
        content: NORD,
    },
];

/// Display names of the bundled themes
pub fn list_bundled_themes() -> Vec<&'static str> {
    BUNDLED_THEMES
        .iter()
        .map(|t| t.filename.trim_end_matches(".toml"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TomlTheme;

    #[test]
    fn every_bundled_theme_parses() {
        for theme in BUNDLED_THEMES {
            let parsed = TomlTheme::from_str(theme.content)
                .unwrap_or_else(|e| panic!("{} failed to parse: {}", theme.filename, e));
            assert_eq!(
                format!("{}.toml", parsed.meta.name.replace(' ', "_")),
                theme.filename
            );
        }
    }
}
