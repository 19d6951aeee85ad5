//! Configured news sources.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Error;
use crate::interest::Outcome;
use crate::storage::{self, KeyValueStore, SOURCES_KEY};

/// A feed the aggregator pulls articles from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Sources used when none have been stored yet.
pub fn default_sources() -> Vec<Source> {
    [
        ("1", "FutureTechChronicle", "https://example.com/futuretech/rss"),
        ("2", "Global South Press", "https://example.com/globalsouth/rss"),
        ("3", "UrbanAgri Digest", "https://example.com/urbanagri/rss"),
        ("4", "Cosmos Today", "https://example.com/cosmos/rss"),
    ]
    .into_iter()
    .map(|(id, name, url)| Source {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

/// Persisted, ordered list of sources.
pub struct SourceList {
    sources: Vec<Source>,
    storage: Rc<dyn KeyValueStore>,
}

impl SourceList {
    /// Load stored sources, falling back to [`default_sources`].
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let sources = storage::load_or_default(storage.as_ref(), SOURCES_KEY, default_sources);
        Self { sources, storage }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Add a source with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the name or URL is blank.
    pub fn add(&mut self, name: &str, url: &str) -> Result<Source, Error> {
        let (name, url) = validate(name, url)?;
        let source = Source {
            id: Uuid::new_v4().to_string(),
            name,
            url,
        };
        self.sources.push(source.clone());
        self.save();
        Ok(source)
    }

    /// Delete a source. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Outcome {
        let before = self.sources.len();
        self.sources.retain(|s| s.id != id);
        if self.sources.len() == before {
            return Outcome::Unchanged;
        }
        self.save();
        Outcome::Applied
    }

    /// Rename or re-point a source.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the name or URL is blank.
    pub fn update(&mut self, id: &str, name: &str, url: &str) -> Result<Outcome, Error> {
        let (name, url) = validate(name, url)?;
        let Some(source) = self.sources.iter_mut().find(|s| s.id == id) else {
            return Ok(Outcome::Unchanged);
        };
        source.name = name;
        source.url = url;
        self.save();
        Ok(Outcome::Applied)
    }

    fn save(&self) -> bool {
        storage::save_logged(self.storage.as_ref(), SOURCES_KEY, &self.sources)
    }
}

fn validate(name: &str, url: &str) -> Result<(String, String), Error> {
    let name = name.trim();
    let url = url.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("source name cannot be empty".to_string()));
    }
    if url.is_empty() {
        return Err(Error::InvalidInput("source URL cannot be empty".to_string()));
    }
    Ok((name.to_string(), url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let list = SourceList::load(Rc::new(MemoryStorage::new()));
        assert_eq!(list.sources().len(), 4);
        assert_eq!(list.sources()[0].name, "FutureTechChronicle");
    }

    #[test]
    fn test_add_persists() {
        let storage = Rc::new(MemoryStorage::new());
        let mut list = SourceList::load(storage.clone());
        let added = list.add(" Harbor Wire ", "https://example.com/harbor/rss").unwrap();
        assert_eq!(added.name, "Harbor Wire");

        let reloaded = SourceList::load(storage);
        assert_eq!(reloaded.sources().len(), 5);
        assert_eq!(reloaded.get(&added.id), Some(&added));
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = SourceList::load(Rc::new(MemoryStorage::new()));
        assert!(matches!(list.add("", "https://x"), Err(Error::InvalidInput(_))));
        assert!(matches!(list.add("X", "  "), Err(Error::InvalidInput(_))));
        assert_eq!(list.sources().len(), 4);
    }

    #[test]
    fn test_remove() {
        let storage = Rc::new(MemoryStorage::new());
        let mut list = SourceList::load(storage.clone());
        assert_eq!(list.remove("2"), Outcome::Applied);
        assert_eq!(list.remove("2"), Outcome::Unchanged);
        assert_eq!(SourceList::load(storage).sources().len(), 3);
    }

    #[test]
    fn test_update() {
        let mut list = SourceList::load(Rc::new(MemoryStorage::new()));
        let outcome = list
            .update("4", "Cosmos Weekly", "https://example.com/cosmos/weekly")
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(list.get("4").unwrap().name, "Cosmos Weekly");

        assert_eq!(
            list.update("missing", "n", "u").unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn test_stored_empty_list_is_respected() {
        let storage = Rc::new(MemoryStorage::new());
        storage.put(SOURCES_KEY, "[]").unwrap();
        assert!(SourceList::load(storage).sources().is_empty());
    }
}
