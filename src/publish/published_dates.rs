use crate::constants::PUBLISHED_DATES_FILE_NAME;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Editorial publication dates keyed by slug.
///
/// Posts are often edited long after they first went out; this mapping
/// pins the date readers should see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedDates(HashMap<String, String>);

impl PublishedDates {
    /// Loads `<data_dir>/published-dates.json`. Missing or malformed files
    /// yield an empty mapping.
    pub fn load_from_dir(data_dir: &Path) -> Self {
        Self::load(&data_dir.join(PUBLISHED_DATES_FILE_NAME))
    }

    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(dates) => Self(dates),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The pinned date for `slug`. Empty entries count as absent.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.0
            .get(slug)
            .map(String::as_str)
            .filter(|date| !date.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for PublishedDates {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
