//! Specialized value completions consulted before the generic context patterns.
//!
//! A [`RuleSet`] is an ordered list. The first rule whose pattern accepts the line prefix
//! answers; later matches are reported as ambiguous and ignored.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use schema::Schema;
use walkdir::WalkDir;

use crate::completion::{Candidate, CandidateKind, CompletionConfig, accepts, matches};
use crate::project::ProjectLookup;

/// Inputs available to a rule for one request.
pub struct RuleContext<'a> {
    pub line_prefix: &'a str,
    pub word_prefix: Option<&'a str>,
    pub style_path: &'a Path,
    pub project: &'a dyn ProjectLookup,
    pub schema: &'a Schema,
    pub config: &'a CompletionConfig,
}

/// A named pattern plus the generator that runs when it matches.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, line_prefix: &str) -> bool;

    /// `None` declines the request and lets the generic patterns run.
    fn complete(&self, cx: &RuleContext<'_>) -> Option<Vec<Candidate>>;
}

pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends `rule` after every rule registered so far.
    pub fn register(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// First rule accepting `line_prefix`, in registration order.
    pub fn find(&self, line_prefix: &str) -> Option<&dyn Rule> {
        let mut matching = self.rules.iter().filter(|rule| rule.matches(line_prefix));
        let first = matching.next()?;
        for other in matching {
            tracing::warn!(
                chosen = first.name(),
                ignored = other.name(),
                line_prefix,
                "more than one completion rule matches"
            );
        }
        Some(&**first)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty().register(I18nRule).register(ImageRule)
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

static I18N_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:textid|titleid|messageid|hintid|hinttextid|promptid|i18n)\s*:\s*['"][\w.-]*$"#,
    )
    .expect("valid regex")
});
static STRING_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<string\s+name="([^"]+)"[^>]*?(?:/>|>(.*?)</string>)"#)
        .expect("valid regex")
});

/// Keys from the project's i18n `strings.xml` for `textid`-style properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct I18nRule;

impl Rule for I18nRule {
    fn name(&self) -> &'static str {
        "i18n"
    }

    fn matches(&self, line_prefix: &str) -> bool {
        I18N_VALUE.is_match(line_prefix)
    }

    fn complete(&self, cx: &RuleContext<'_>) -> Option<Vec<Candidate>> {
        let path = cx.project.i18n_strings(cx.style_path)?;
        let text = match cx.project.read_text(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "i18n strings unreadable");
                return None;
            }
        };

        let mut seen = HashSet::new();
        let items = STRING_ENTRY
            .captures_iter(&text)
            .filter_map(|caps| {
                // Self-closing entries have no text.
                let value = caps.get(2).map_or("", |m| m.as_str().trim());
                Some((caps.get(1)?.as_str(), value))
            })
            .filter(|(key, _)| seen.insert(*key))
            .filter(|(key, _)| accepts(key, cx.word_prefix))
            .map(|(key, value)| {
                let item = Candidate::new(key, CandidateKind::Text);
                if value.is_empty() {
                    item
                } else {
                    item.with_detail(value)
                }
            })
            .collect();
        Some(items)
    }
}

static IMAGE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b\w*[iI]mage\s*:\s*['"]([\w./@-]*)$"#).expect("valid regex")
});

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Image paths under the project's assets directory for `*image` properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRule;

impl Rule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn matches(&self, line_prefix: &str) -> bool {
        IMAGE_VALUE.is_match(line_prefix)
    }

    /// Filters on the whole path typed inside the quotes, so `/icons/lo` does not offer
    /// `/images/logo.png`.
    fn complete(&self, cx: &RuleContext<'_>) -> Option<Vec<Candidate>> {
        let assets = cx.project.assets_dir(cx.style_path)?;
        let typed = IMAGE_VALUE
            .captures(cx.line_prefix)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for entry in WalkDir::new(&assets).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(%err, "skipping unreadable asset entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&assets) else {
                continue;
            };
            let Some(label) = image_label(relative) else {
                continue;
            };
            if matches(&label, typed) && seen.insert(label.clone()) {
                items.push(Candidate::new(label, CandidateKind::File));
            }
        }
        Some(items)
    }
}

/// `/dir/name.png` for an image path relative to the assets root, with `@2x`-style
/// density suffixes removed. `None` for non-images.
fn image_label(relative: &Path) -> Option<String> {
    let ext = relative.extension()?.to_str()?.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = relative.file_stem()?.to_str()?;
    let stem = match stem.rsplit_once('@') {
        Some((base, density)) if is_density(density) => base,
        _ => stem,
    };

    let mut label = String::new();
    if let Some(parent) = relative.parent() {
        for part in parent.components() {
            label.push('/');
            label.push_str(&part.as_os_str().to_string_lossy());
        }
    }
    label.push('/');
    label.push_str(stem);
    label.push('.');
    label.push_str(relative.extension()?.to_str()?);
    Some(label)
}

fn is_density(suffix: &str) -> bool {
    suffix
        .strip_suffix('x')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}
