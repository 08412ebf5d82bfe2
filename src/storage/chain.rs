use crate::bootstrap::{BootstrapTarget, RecoveryRecord};
use crate::colored::Colorize;
use crate::zfx_id::Id;
use crate::Result;

use tracing::{error, info};

use std::collections::HashSet;
use std::path::Path;

const CONTAINERS: &str = "containers";
const ACCEPTED: &str = "accepted";
const FRONTIER: &str = "frontier";
const LOG: &str = "log";

const EMPTY: &[u8] = &[];

/// Accepted containers of a chain.
///
/// * `containers` maps a container id to the raw container
/// * `accepted` holds the ids of every accepted container
/// * `frontier` holds the ids of the accepted frontier
/// * `log` maps a sequence number to the id of each persisted container, in
///   acceptance order
pub struct ChainStore {
    db: sled::Db,
    containers: sled::Tree,
    accepted: sled::Tree,
    frontier: sled::Tree,
    log: sled::Tree,
}

impl ChainStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_db(sled::open(path)?)
    }

    /// A store which is deleted when dropped.
    pub fn temporary() -> Result<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self> {
        Ok(ChainStore {
            containers: db.open_tree(CONTAINERS)?,
            accepted: db.open_tree(ACCEPTED)?,
            frontier: db.open_tree(FRONTIER)?,
            log: db.open_tree(LOG)?,
            db,
        })
    }

    /// Fetches a raw container.
    pub fn get_container(&self, id: &Id) -> Result<Option<Vec<u8>>> {
        Ok(self.containers.get(id.as_bytes())?.map(|v| v.to_vec()))
    }

    pub fn is_accepted(&self, id: &Id) -> Result<bool> {
        Ok(self.accepted.contains_key(id.as_bytes())?)
    }

    /// The number of accepted containers.
    pub fn accepted_len(&self) -> usize {
        self.accepted.len()
    }

    pub fn frontier(&self) -> Result<HashSet<Id>> {
        let mut frontier = HashSet::new();
        for key in self.frontier.iter().keys() {
            if let Some(id) = Id::from_slice(&key?) {
                let _ = frontier.insert(id);
            }
        }
        Ok(frontier)
    }

    /// The persisted containers in acceptance order, `None` if nothing was persisted.
    pub fn recovery_record(&self) -> Result<Option<RecoveryRecord>> {
        let mut containers = vec![];
        for entry in self.log.iter().values() {
            let id = match Id::from_slice(&entry?) {
                Some(id) => id,
                None => continue,
            };
            if let Some(container) = self.get_container(&id)? {
                containers.push(container);
            }
        }
        if containers.is_empty() {
            Ok(None)
        } else {
            RecoveryRecord::new(containers).map(Some)
        }
    }

    fn replace_frontier(&self, ids: &HashSet<Id>) -> Result<()> {
        self.frontier.clear()?;
        for id in ids.iter() {
            let _ = self.accepted.insert(id.as_bytes(), EMPTY)?;
            let _ = self.frontier.insert(id.as_bytes(), EMPTY)?;
        }
        Ok(())
    }

    // The id of the newest persisted container.
    fn tip(&self) -> Result<Option<Id>> {
        Ok(self.log.last()?.and_then(|(_, id)| Id::from_slice(&id)))
    }

    // Persisted containers other than the tip have an accepted child.
    fn has_accepted_child(&self, id: &Id, tip: Option<&Id>) -> Result<bool> {
        Ok(tip != Some(id) && self.containers.contains_key(id.as_bytes())?)
    }

    fn next_sequence(&self) -> Result<u64> {
        match self.log.last()? {
            Some((key, _)) => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&key[..8]);
                Ok(u64::from_be_bytes(bytes) + 1)
            }
            None => Ok(0),
        }
    }
}

impl BootstrapTarget for ChainStore {
    fn current_accepted_frontier(&self) -> HashSet<Id> {
        match self.frontier() {
            Ok(frontier) => frontier,
            Err(err) => {
                error!("[{}] failed to read the accepted frontier: {:?}", "chain".yellow(), err);
                HashSet::new()
            }
        }
    }

    fn filter_accepted(&self, container_ids: &HashSet<Id>) -> HashSet<Id> {
        let mut accepted = HashSet::new();
        for id in container_ids.iter() {
            match self.is_accepted(id) {
                Ok(true) => {
                    let _ = accepted.insert(*id);
                }
                Ok(false) => (),
                Err(err) => {
                    error!("[{}] failed to read accepted {}: {:?}", "chain".yellow(), id, err)
                }
            }
        }
        accepted
    }

    /// Marks `container_ids` as accepted. Forced containers join the frontier unless a
    /// persisted descendant is already accepted, the existing tips are kept.
    fn force_accepted(&mut self, container_ids: HashSet<Id>) -> Result<()> {
        if container_ids.is_empty() {
            return Ok(());
        }
        info!("[{}] forcing {} containers as accepted", "chain".yellow(), container_ids.len());
        let tip = self.tip()?;
        for id in container_ids.iter() {
            let _ = self.accepted.insert(id.as_bytes(), EMPTY)?;
            if !self.has_accepted_child(id, tip.as_ref())? {
                let _ = self.frontier.insert(id.as_bytes(), EMPTY)?;
            }
        }
        let _ = self.db.flush()?;
        Ok(())
    }

    fn persist_events(&mut self, containers: Vec<Vec<u8>>) -> Result<()> {
        let mut sequence = self.next_sequence()?;
        let mut last = None;
        for container in containers.iter() {
            let id = Id::new(container);
            let _ = self.containers.insert(id.as_bytes(), container.as_slice())?;
            let _ = self.accepted.insert(id.as_bytes(), EMPTY)?;
            let _ = self.log.insert(sequence.to_be_bytes(), id.as_bytes())?;
            sequence += 1;
            last = Some(id);
        }
        if let Some(id) = last {
            let mut tip = HashSet::new();
            let _ = tip.insert(id);
            self.replace_frontier(&tip)?;
        }
        let _ = self.db.flush()?;
        Ok(())
    }
}
