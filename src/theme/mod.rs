// Theme system for the TUI
//
// - TomlTheme: on-disk format with explicit colour definitions
// - Theme: final resolved theme with all colours ready for use
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/lifecontext/themes/*.toml
// 2. Bundled themes (compiled in, extracted on first run)
// 3. Fallback to hardcoded default

mod bundled;
mod toml_format;

pub use toml_format::TomlTheme;

use crate::data::InsightKind;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use std::path::{Path, PathBuf};

/// Theme configuration options
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── UI Element Colors ───────────────────────────────────
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub accent: Color,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub muted: Color,

    // ─── Insight Badge Colors ────────────────────────────────
    pub analysis: Color,
    pub suggestion: Color,
    pub warning: Color,
    pub critical: Color,
    pub action: Color,

    // ─── Border Style ────────────────────────────────────────
    pub border_type: BorderType,

    // ─── Code Highlighting Colors ────────────────────────────
    pub code_inline: Color,
    pub code_block: Color,
}

impl Theme {
    /// Load theme by name with default configuration
    pub fn by_name(name: &str) -> Self {
        Self::by_name_with_config(name, &ThemeConfig::default())
    }

    /// Load theme by name with custom configuration
    pub fn by_name_with_config(name: &str, config: &ThemeConfig) -> Self {
        if let Some(theme) = Self::themes_dir().and_then(|dir| Self::load_external(&dir, name, config)) {
            return theme;
        }
        if let Some(theme) = Self::load_bundled(name, config) {
            return theme;
        }
        tracing::warn!(theme = name, "Unknown theme, using built-in default");
        Self::hardcoded_default(config)
    }

    /// Look for `<name>.toml` (or with underscores for spaces) in `dir`
    fn load_external(dir: &Path, name: &str, config: &ThemeConfig) -> Option<Self> {
        let normalized = name.replace(' ', "_");
        for candidate in [name, normalized.as_str()] {
            let path = dir.join(format!("{}.toml", candidate));
            let Ok(contents) = std::fs::read_to_string(&path) else {
                continue;
            };
            match TomlTheme::from_str(&contents) {
                Ok(toml_theme) => return Some(Self::from_toml(toml_theme, config)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring malformed theme: {}", e);
                }
            }
        }
        None
    }

    fn load_bundled(name: &str, config: &ThemeConfig) -> Option<Self> {
        let filename = format!("{}.toml", name.replace(' ', "_"));
        bundled::BUNDLED_THEMES
            .iter()
            .find(|t| t.filename.eq_ignore_ascii_case(&filename))
            .and_then(|t| TomlTheme::from_str(t.content).ok())
            .map(|toml_theme| Self::from_toml(toml_theme, config))
    }

    /// Get themes directory path
    pub fn themes_dir() -> Option<PathBuf> {
        crate::config::Config::app_dir().map(|d| d.join("themes"))
    }

    /// Parse border type string to BorderType enum
    fn parse_border_type(value: Option<&String>) -> BorderType {
        match value.map(|s| s.as_str()) {
            Some("plain") => BorderType::Plain,
            Some("double") => BorderType::Double,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Rounded,
        }
    }

    /// Create theme from native TOML format
    fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;

        let background = if config.use_theme_background {
            parse(&toml.ui.background)
        } else {
            Color::Reset
        };
        let foreground = parse(&toml.ui.foreground);
        let border = parse(&toml.ui.border);

        Self {
            name: toml.meta.name.clone(),

            status_bar: parse(&toml.ui.status_bar),
            title: parse(&toml.ui.title),
            border,
            highlight: parse(&toml.ui.border_focused),
            accent: parse(&toml.ui.accent),

            background,
            foreground,
            selection: parse(&toml.ui.selection_bg),
            selection_fg: parse(&toml.ui.selection_fg),
            muted: toml.ui.muted.as_deref().map(parse).unwrap_or(border),

            analysis: parse(&toml.insights.analysis),
            suggestion: parse(&toml.insights.suggestion),
            warning: parse(&toml.insights.warning),
            critical: parse(&toml.insights.critical),
            action: parse(&toml.insights.action),

            border_type: Self::parse_border_type(toml.ui.border_type.as_ref()),

            code_inline: toml
                .code
                .as_ref()
                .map(|c| parse(&c.inline))
                .unwrap_or(foreground),
            code_block: toml
                .code
                .as_ref()
                .map(|c| parse(&c.block))
                .unwrap_or(foreground),
        }
    }

    /// Hardcoded fallback when no themes can be loaded
    fn hardcoded_default(config: &ThemeConfig) -> Self {
        let background = if config.use_theme_background {
            Color::Rgb(15, 12, 41)
        } else {
            Color::Reset
        };

        Self {
            name: "Nebula (Fallback)".to_string(),

            status_bar: Color::Rgb(148, 163, 184),
            title: Color::Rgb(191, 219, 254),
            border: Color::Rgb(51, 65, 85),
            highlight: Color::Rgb(96, 165, 250),
            accent: Color::Rgb(96, 165, 250),

            background,
            foreground: Color::Rgb(226, 232, 240),
            selection: Color::Rgb(30, 58, 138),
            selection_fg: Color::White,
            muted: Color::Rgb(100, 116, 139),

            analysis: Color::Rgb(96, 165, 250),
            suggestion: Color::Rgb(96, 165, 250),
            warning: Color::Rgb(251, 191, 36),
            critical: Color::Rgb(248, 113, 113),
            action: Color::Rgb(52, 211, 153),

            border_type: BorderType::Rounded,
            code_inline: Color::Rgb(147, 197, 253),
            code_block: Color::Rgb(203, 213, 225),
        }
    }

    /// Badge colour for an insight kind
    pub fn insight_color(&self, kind: InsightKind) -> Color {
        match kind {
            InsightKind::Analysis => self.analysis,
            InsightKind::Suggestion => self.suggestion,
            InsightKind::Warning => self.warning,
            InsightKind::Critical => self.critical,
            InsightKind::Action => self.action,
        }
    }

    /// Border colour for a panel based on focus state
    pub fn panel_border(&self, focused: bool) -> Color {
        if focused {
            self.highlight
        } else {
            self.border
        }
    }

    /// List all available themes (bundled + external)
    pub fn list_available() -> Vec<String> {
        let mut themes: Vec<String> = bundled::list_bundled_themes()
            .into_iter()
            .map(str::to_string)
            .collect();

        let Some(themes_dir) = Self::themes_dir() else {
            return themes;
        };
        let Ok(entries) = std::fs::read_dir(themes_dir) else {
            return themes;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.extension().is_some_and(|ext| ext == "toml") {
                if let Some(stem) = path.file_stem() {
                    let display_name = stem.to_string_lossy().replace('_', " ");
                    if !themes.iter().any(|t| t.eq_ignore_ascii_case(&display_name)) {
                        themes.push(display_name);
                    }
                }
            }
        }
        themes
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::by_name(crate::config::DEFAULT_THEME)
    }
}

/// Ensure themes directory exists and extract bundled themes on first run
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = Theme::themes_dir() else {
        return;
    };
    if let Err(e) = extract_bundled(&themes_dir) {
        tracing::debug!("Theme extraction skipped: {}", e);
    }
}

fn extract_bundled(themes_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(themes_dir)?;

    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return Ok(());
    }

    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Never overwrite user edits
        if !path.exists() {
            std::fs::write(&path, theme.content)?;
        }
    }
    std::fs::write(&marker, "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_theme_loads_by_name() {
        let theme = Theme::load_bundled("nebula", &ThemeConfig::default()).expect("bundled");
        assert_eq!(theme.name, "Nebula");
        assert_eq!(theme.insight_color(InsightKind::Critical), Color::Rgb(248, 113, 113));
    }

    #[test]
    fn terminal_background_when_disabled() {
        let config = ThemeConfig {
            use_theme_background: false,
        };
        let theme = Theme::load_bundled("Nord", &config).expect("bundled");
        assert_eq!(theme.background, Color::Reset);
    }

    #[test]
    fn missing_sections_fall_back() {
        // Nord has no [code] section and no border_type
        let theme = Theme::load_bundled("Nord", &ThemeConfig::default()).expect("bundled");
        assert_eq!(theme.code_block, theme.foreground);
        assert_eq!(theme.border_type, BorderType::Rounded);
    }

    #[test]
    fn external_theme_overrides_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let custom = bundled::NEBULA.replace("name = \"Nebula\"", "name = \"My Nebula\"");
        std::fs::write(dir.path().join("Nebula.toml"), custom).unwrap();

        let theme = Theme::load_external(dir.path(), "Nebula", &ThemeConfig::default())
            .expect("external theme");
        assert_eq!(theme.name, "My Nebula");
    }

    #[test]
    fn malformed_external_theme_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.toml"), "not = [valid").unwrap();
        assert!(Theme::load_external(dir.path(), "Broken", &ThemeConfig::default()).is_none());
    }

    #[test]
    fn extraction_keeps_user_edits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Nord.toml"), "edited").unwrap();
        extract_bundled(dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("Nord.toml")).unwrap(), "edited");
        assert!(dir.path().join("Nebula.toml").exists());
        assert!(dir.path().join(".extracted_v1").exists());
    }
}
