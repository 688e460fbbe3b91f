use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Icon-theme name (e.g. `x-office-calendar`) or an absolute path.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

impl IconName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Single character drawn when no themed icon can be found.
    pub fn fallback_glyph(&self) -> Option<char> {
        Path::new(&self.0)
            .file_stem()?
            .to_str()?
            .rsplit('-')
            .find(|part| !part.is_empty())
            .and_then(|part| part.chars().next())
            .map(|c| c.to_ascii_uppercase())
    }
}

type Cache = RwLock<HashMap<(IconName, u16), Option<PathBuf>>>;

static PATHS: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    PATHS.get_or_init(|| RwLock::new(HashMap::new()))
}

pub fn find_icon_path(icon_name: &IconName, size: u16) -> Option<PathBuf> {
    let key = (icon_name.clone(), size);
    if let Some(hit) = cache().read().get(&key) {
        return hit.clone();
    }

    let found = lookup_uncached(icon_name, size);
    if found.is_none() {
        log::debug!("no icon found for '{}'", icon_name);
    }
    cache().write().insert(key, found.clone());
    found
}

pub fn clear_cache() {
    cache().write().clear();
}

fn lookup_uncached(icon_name: &IconName, size: u16) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(size)
        .with_scale(1)
        .find()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_glyph() {
        let cases = [
            ("x-office-calendar", Some('C')),
            ("car", Some('C')),
            ("/usr/share/icons/tent.svg", Some('T')),
            ("music-note-", Some('N')),
            ("", None),
        ];

        for (name, expected) in cases {
            assert_eq!(IconName::new(name).fallback_glyph(), expected, "{name}");
        }
    }

    #[test]
    fn test_missing_absolute_path_is_cached_as_none() {
        let name = IconName::new("/definitely/not/here/icon.png");
        assert_eq!(find_icon_path(&name, 32), None);
        assert_eq!(find_icon_path(&name, 32), None);
        assert_eq!(find_icon_path(&IconName::new(""), 32), None);
    }
}
