//! Per-run state that must not leak across runs.

use std::collections::HashMap;

use clipcast_models::CarouselFolder;

use crate::source::CarouselSource;

/// Folder display-name lookup, cached for the lifetime of one run.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: HashMap<String, String>,
}

impl NameCache {
    /// Resolve a folder's display name through the source, caching by folder
    /// id. Lookup failures fall back to the name the folder was listed with.
    pub async fn resolve(&mut self, source: &dyn CarouselSource, folder: &CarouselFolder) -> String {
        if let Some(name) = self.entries.get(&folder.id) {
            return name.clone();
        }
        let name = source
            .folder_name(folder)
            .await
            .unwrap_or_else(|_| folder.name.clone());
        self.entries.insert(folder.id.clone(), name.clone());
        name
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// State owned by exactly one schedule run.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Folder-name cache used to enrich carousel captions
    pub names: NameCache,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }
}
