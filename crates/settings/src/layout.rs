//! Declarative window layout.
//!
//! The built-in layout is compiled in; `~/.config/mailshell/layout.toml`
//! replaces it wholesale when present. Widget ids are resolved by the view
//! layer, which skips ids it does not know.

use crate::constants::settings::MAX_FILE_SIZE;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_LAYOUT: &str = include_str!("../assets/layout.toml");

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Layout {
    #[serde(default)]
    pub window: WindowLayout,
    #[serde(default)]
    pub sidebar: SidebarLayout,
    /// No search bar at all when absent.
    pub search: Option<SearchLayout>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct WindowLayout {
    pub title: String,
    pub maximized: bool,
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self {
            title: "mailshell".to_string(),
            maximized: true,
        }
    }
}

/// Sidebar sections, each an ordered list of widgets.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SidebarLayout {
    pub folders: Vec<WidgetEntry>,
    pub actions: Vec<WidgetEntry>,
    pub controls: Vec<WidgetEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WidgetEntry {
    pub id: String,
    /// Overrides the widget's built-in label.
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchLayout {
    /// Show the date-range selector.
    pub date_filter: bool,
    pub placeholder: String,
}

impl Default for SearchLayout {
    fn default() -> Self {
        Self {
            date_filter: true,
            placeholder: "Search mail".to_string(),
        }
    }
}

impl Layout {
    /// The compiled-in layout.
    pub fn builtin() -> Result<Layout> {
        parse_layout(DEFAULT_LAYOUT).context("Built-in layout is invalid")
    }
}

/// Parse a layout document.
pub fn parse_layout(source: &str) -> Result<Layout> {
    let layout: Layout = toml::from_str(source).context("Failed to parse layout")?;
    Ok(layout)
}

/// Load the user's layout override if it exists, else the built-in one.
///
/// An override that exists but cannot be read or parsed is an error; the
/// caller treats it as fatal.
pub fn load_layout() -> Result<Layout> {
    load_layout_from(&mailshell_paths::layout_file())
}

pub(crate) fn load_layout_from(path: &Path) -> Result<Layout> {
    if !path.exists() {
        tracing::debug!("No layout override at {:?}, using built-in layout", path);
        return Layout::builtin();
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat layout {}", path.display()))?
        .len();
    if size > MAX_FILE_SIZE {
        bail!(
            "Layout file {} too large ({} bytes, limit {})",
            path.display(),
            size,
            MAX_FILE_SIZE
        );
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    let layout =
        parse_layout(&source).with_context(|| format!("Invalid layout {}", path.display()))?;
    tracing::info!("Loaded layout override from {:?}", path);
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use test_case::test_case;

    #[test]
    fn builtin_layout_parses() {
        let layout = Layout::builtin().unwrap();
        assert_eq!(layout.window.title, "mailshell");
        assert!(layout.window.maximized);
        assert_eq!(layout.sidebar.folders.len(), 7);
        assert_eq!(layout.sidebar.folders[0].id, "btn_inbox");
        assert!(layout.search.as_ref().is_some_and(|s| s.date_filter));
    }

    #[test]
    fn builtin_label_override_is_kept() {
        let layout = Layout::builtin().unwrap();
        let enter = layout
            .sidebar
            .actions
            .iter()
            .find(|w| w.id == "btn_enter")
            .unwrap();
        assert_eq!(enter.label.as_deref(), Some("Open"));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let layout = parse_layout("").unwrap();
        assert_eq!(layout.window, WindowLayout::default());
        assert!(layout.sidebar.folders.is_empty());
        assert!(layout.search.is_none());
    }

    #[test_case("[search]\n", true ; "empty section keeps date filter")]
    #[test_case("[search]\ndate-filter = false\n", false ; "date filter disabled")]
    fn search_section(source: &str, date_filter: bool) {
        let search = parse_layout(source).unwrap().search.unwrap();
        assert_eq!(search.date_filter, date_filter);
    }

    #[test]
    fn malformed_layout_is_an_error() {
        let err = parse_layout("[sidebar]\nfolders = 3\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse layout"));
    }

    #[test]
    fn absent_override_falls_back_to_builtin() {
        let dir = tempdir().unwrap();
        let layout = load_layout_from(&dir.path().join("layout.toml")).unwrap();
        assert_eq!(layout, Layout::builtin().unwrap());
    }

    #[test]
    fn override_replaces_builtin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(
            &path,
            r#"
[window]
title = "Mail"
maximized = false

[sidebar]
folders = [{ id = "btn_sent" }, { id = "btn_inbox", label = "In" }]
"#,
        )
        .unwrap();

        let layout = load_layout_from(&path).unwrap();
        assert_eq!(layout.window.title, "Mail");
        assert!(!layout.window.maximized);
        assert_eq!(
            layout.sidebar.folders,
            vec![
                WidgetEntry {
                    id: "btn_sent".into(),
                    label: None
                },
                WidgetEntry {
                    id: "btn_inbox".into(),
                    label: Some("In".into())
                },
            ]
        );
        assert!(layout.search.is_none());
    }

    #[test]
    fn broken_override_is_an_error_naming_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "[window\n").unwrap();

        let err = load_layout_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("layout.toml"));
    }
}
