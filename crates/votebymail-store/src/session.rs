//! Voter session cache.
//!
//! The only state kept between signups is the voter's random id and the
//! campaign tags seen with it. Stores are passed explicitly to whoever needs
//! them; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use votebymail_core::{Utm, Voter};

use crate::StoreError;

/// Where a session's [`Voter`] lives between runs.
pub trait SessionStore {
    /// The cached voter, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Voter>, StoreError>;

    fn save(&mut self, voter: &Voter) -> Result<(), StoreError>;
}

/// Session cached as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Use the session file at `path`. Nothing is read or created until the
    /// first load or save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Voter>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let voter: Voter = serde_json::from_str(&raw)?;
        if voter.uid.trim().is_empty() {
            return Err(StoreError::Other(format!(
                "{} has an empty voter id",
                self.path.display()
            )));
        }
        Ok(Some(voter))
    }

    fn save(&mut self, voter: &Voter) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(voter)?)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

/// Session held in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    voter: Option<Voter>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Voter>, StoreError> {
        Ok(self.voter.clone())
    }

    fn save(&mut self, voter: &Voter) -> Result<(), StoreError> {
        self.voter = Some(voter.clone());
        Ok(())
    }
}

fn fresh_uid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Load the cached voter, or generate and cache a new one.
///
/// An unreadable cache is replaced rather than failing the signup; a failed
/// save only means the next session gets a new id.
pub fn voter(store: &mut impl SessionStore) -> Voter {
    match store.load() {
        Ok(Some(voter)) => return voter,
        Ok(None) => {}
        Err(e) => warn!(error = %e, "discarding unreadable session"),
    }
    let voter = Voter {
        uid: fresh_uid(),
        utm: Utm::default(),
    };
    info!(uid = %voter.uid, "new voter session");
    if let Err(e) = store.save(&voter) {
        warn!(error = %e, "could not cache voter session");
    }
    voter
}

/// Record campaign tags for the session without overwriting ones already seen.
pub fn remember_utm(store: &mut impl SessionStore, utm: &Utm) -> Result<Voter, StoreError> {
    let mut current = voter(store);
    if utm.is_empty() {
        return Ok(current);
    }
    current.utm.merge_missing(utm);
    store.save(&current)?;
    Ok(current)
}
