//! Cross-file lookups: the markup view paired with a style document, the i18n strings
//! file, and the assets directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves files related to a style document.
///
/// Only [`ProjectLookup::companion_markup`] is required; the other lookups default to
/// "not available", which makes the corresponding sub-rules decline.
pub trait ProjectLookup: Send + Sync {
    fn companion_markup(&self, style_path: &Path) -> Option<PathBuf>;

    fn i18n_strings(&self, _style_path: &Path) -> Option<PathBuf> {
        None
    }

    fn assets_dir(&self, _style_path: &Path) -> Option<PathBuf> {
        None
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl<F> ProjectLookup for F
where
    F: Fn(&Path) -> Option<PathBuf> + Send + Sync,
{
    fn companion_markup(&self, style_path: &Path) -> Option<PathBuf> {
        self(style_path)
    }
}

pub const DEFAULT_LOCALE: &str = "en";

/// Standard Alloy project layout rooted at the directory holding `app/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlloyProject {
    root: PathBuf,
    locale: String,
}

impl AlloyProject {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectLookup for AlloyProject {
    /// `styles/` maps to `views/` in the same component (app or widget); theme styles map
    /// to the app views. Sub-directories below `styles/` are kept.
    fn companion_markup(&self, style_path: &Path) -> Option<PathBuf> {
        let components: Vec<Component<'_>> = style_path.components().collect();
        let styles_idx = components
            .iter()
            .rposition(|c| c.as_os_str() == "styles")?;
        let rest = &components[styles_idx + 1..];
        if rest.is_empty() {
            return None;
        }

        let mut base = &components[..styles_idx];
        if base.len() >= 2 && base[base.len() - 2].as_os_str() == "themes" {
            base = &base[..base.len() - 2];
        }

        let mut view: PathBuf = base.iter().collect();
        view.push("views");
        view.extend(rest);
        view.set_extension("xml");
        Some(view)
    }

    fn i18n_strings(&self, _style_path: &Path) -> Option<PathBuf> {
        [self.root.join("app"), self.root.clone()]
            .into_iter()
            .map(|base| base.join("i18n").join(&self.locale).join("strings.xml"))
            .find(|path| path.is_file())
    }

    fn assets_dir(&self, _style_path: &Path) -> Option<PathBuf> {
        let assets = self.root.join("app").join("assets");
        assets.is_dir().then_some(assets)
    }
}
