use crate::bootstrap::{Bootstrapper, RecoveryRecord, Status};
use crate::colored::Colorize;
use crate::network::{LocalSender, Peer, Register, Router};
use crate::server::Settings;
use crate::storage::ChainStore;
use crate::zfx_id::Id;
use crate::{Error, Result};

use actix::{Actor, Addr};
use tracing::{info, warn};

use std::path::{Path, PathBuf};

/// Validates the settings without touching the chain store.
pub fn check(settings: &Settings) -> Result<()> {
    let config = settings.bootstrap_config()?;
    let beacons = config.beacons.beacons();
    let stake = beacons.iter().fold(0u64, |acc, id| acc.saturating_add(config.beacons.weight(id)));
    info!(
        "[{}] chain {}: {} beacons with a total weight of {}, alpha = {}",
        "node".green(),
        config.chain_id,
        beacons.len(),
        stake,
        config.parameters.alpha
    );
    if stake < config.parameters.alpha_weight() {
        warn!("[{}] the beacons can never reach the quorum threshold", "node".green());
    }
    Ok(())
}

/// A node restored from its recovery record, registered with `router` under `id`.
pub struct ReplayedNode {
    pub id: Id,
    pub status: Status,
    pub router: Addr<Router>,
    pub bootstrapper: Addr<Bootstrapper<ChainStore, LocalSender>>,
}

/// Restores the chain from its recovery record and registers the node with a fresh
/// router. The node answers peers for as long as the returned addresses are kept and
/// the actix system runs. Returns `None` when there is no record, the chain then has
/// to be bootstrapped from its beacons.
///
/// Must be called from within a running actix system.
pub async fn replay(settings: &Settings) -> Result<Option<ReplayedNode>> {
    let config = settings.bootstrap_config()?;
    let record = match settings.recovery_dir() {
        Some(dir) => RecoveryRecord::load(&dir, &config.chain_id)?,
        None => None,
    };
    let record = match record {
        Some(record) => record,
        None => {
            info!(
                "[{}] no recovery record for {}, bootstrapping from the beacons",
                "node".green(),
                config.chain_id
            );
            return Ok(None);
        }
    };

    let id = config.chain_id;
    let store = ChainStore::open(Path::new(&settings.db_path))?;
    let router = Router::new().start();
    let sender = LocalSender::new(id, router.clone());
    let bootstrapper = Bootstrapper::replay(config, store, sender, record)?;
    let status = bootstrapper.status();
    let bootstrapper = bootstrapper.start();
    router.send(Register { id, peer: Peer::new(bootstrapper.clone()) }).await?;
    Ok(Some(ReplayedNode { id, status, router, bootstrapper }))
}

/// Writes the persisted containers of the chain store as `<recovery_dir>/<chain_id>.txt`.
pub fn export(settings: &Settings) -> Result<PathBuf> {
    let chain_id = settings.chain_id()?;
    let dir = settings
        .recovery_dir()
        .ok_or_else(|| Error::Fatal("`recovery_dir` is not set".to_string()))?;
    let store = ChainStore::open(Path::new(&settings.db_path))?;
    let record = store.recovery_record()?.ok_or(Error::EmptyRecovery)?;

    std::fs::create_dir_all(&dir)?;
    let path = RecoveryRecord::path(&dir, &chain_id);
    std::fs::write(&path, record.encode())?;
    info!("[{}] exported {} containers to {:?}", "node".green(), record.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bootstrap::{BootstrapTarget, GetStatus};
    use crate::snowball::Parameters;

    use std::collections::HashSet;

    fn settings(dir: &Path) -> Settings {
        Settings {
            chain_id: Id::zero().to_string(),
            parameters: Parameters::default(),
            beacons: vec![],
            recovery_dir: Some(dir.join("recovery").to_string_lossy().into_owned()),
            db_path: dir.join("chain.sled").to_string_lossy().into_owned(),
        }
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("node-{}", Id::generate()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[actix_rt::test]
    async fn test_replay_without_record() {
        let dir = temp_dir();
        assert!(replay(&settings(&dir)).await.unwrap().is_none());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_rt::test]
    async fn test_export_then_replay() {
        let dir = temp_dir();
        let settings = settings(&dir);
        {
            let mut store = ChainStore::open(Path::new(&settings.db_path)).unwrap();
            store.persist_events(vec![b"c0".to_vec(), b"c1".to_vec()]).unwrap();
        }
        let path = export(&settings).unwrap();
        assert!(path.ends_with(format!("{}.txt", Id::zero())));

        // a fresh node restores the chain from the exported record
        let mut fresh = settings.clone();
        fresh.db_path = dir.join("fresh.sled").to_string_lossy().into_owned();
        let node = replay(&fresh).await.unwrap().unwrap();
        assert_eq!(node.status, Status::Replayed);
        // the replayed node is still running once `replay` returns
        let status = node.bootstrapper.send(GetStatus).await.unwrap();
        assert_eq!(status.status, Status::Replayed);
        let tip: HashSet<Id> = vec![Id::new(b"c1")].into_iter().collect();
        assert_eq!(status.accepted, tip);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_check_rejects_invalid_parameters() {
        let dir = temp_dir();
        let mut settings = settings(&dir);
        settings.parameters.alpha = settings.parameters.k + 1;
        match check(&settings) {
            Err(Error::InvalidParameters(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        std::fs::remove_dir_all(dir).unwrap();
    }
}
