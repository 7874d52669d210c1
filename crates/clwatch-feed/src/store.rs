//! Persistent dedup store: listing id → last-seen listing, one JSON blob on
//! disk, rewritten in full after every refresh.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::FeedError;
use crate::listing::Listing;

/// The feed double-escapes the dollar sign in titles and summaries; it reaches
/// us as this literal text. Only this artifact is rewritten, nothing else.
const PRICE_ENTITY: &str = "&#x0024;";

#[derive(Debug)]
pub struct FeedStore {
    path: PathBuf,
    entries: BTreeMap<String, Listing>,
}

impl FeedStore {
    /// Loads the persisted state, or starts empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::StateCorrupt`] if the file exists but cannot be
    /// decoded — the dedup guarantee cannot be honored with corrupt state, so
    /// there is no partial recovery. Other read failures surface as
    /// [`FeedError::StateIo`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, FeedError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| FeedError::StateCorrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(FeedError::StateIo {
                    path,
                    source,
                })
            }
        };
        Ok(Self { path, entries })
    }

    /// Diffs the raw feed entries against the seen state.
    ///
    /// Entries whose id is not yet in the state are new: their title and
    /// summary have the dollar-sign artifact rewritten, they are inserted into
    /// the state, and they are returned in feed order. The full state is then
    /// persisted unconditionally, even when nothing was new.
    ///
    /// Returns `Some(new)` if any entry was new, `None` otherwise. Calling
    /// again with the same raw entries yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::StateIo`] if the state cannot be persisted.
    pub fn refresh(&mut self, raw: Vec<Listing>) -> Result<Option<Vec<Listing>>, FeedError> {
        let mut new_items = Vec::new();
        for mut listing in raw {
            if self.entries.contains_key(&listing.id) {
                continue;
            }
            decode_price_entity(&mut listing);
            self.entries.insert(listing.id.clone(), listing.clone());
            new_items.push(listing);
        }
        self.persist()?;
        if new_items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(new_items))
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole-file overwrite via a temp file in the same directory plus rename,
    /// so a crashed run never leaves a torn state file behind.
    fn persist(&self) -> Result<(), FeedError> {
        let state_io = |source: std::io::Error| FeedError::StateIo {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec(&self.entries).map_err(|source| {
            FeedError::StateCorrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(state_io)?;
        fs::rename(&tmp, &self.path).map_err(state_io)?;
        Ok(())
    }
}

fn decode_price_entity(listing: &mut Listing) {
    if listing.title.contains(PRICE_ENTITY) {
        listing.title = listing.title.replace(PRICE_ENTITY, "$");
    }
    if listing.summary.contains(PRICE_ENTITY) {
        listing.summary = listing.summary.replace(PRICE_ENTITY, "$");
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
