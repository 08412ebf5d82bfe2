//! Bootstraps a fresh node from a set of in-process beacons.

use crate::bootstrap::{
    BootstrapConfig, Bootstrapped, BootstrapTarget, Bootstrapper, Startup, Subscribe,
};
use crate::colored::Colorize;
use crate::network::{LocalSender, Peer, Register, Router};
use crate::snowball::Parameters;
use crate::storage::ChainStore;
use crate::validators::ValidatorSet;
use crate::zfx_id::Id;
use crate::{Error, Result};

use actix::{Actor, ActorContext, Addr, Context, Handler};
use tokio::sync::oneshot;
use tracing::{debug, info};

use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct Simulation {
    /// Number of beacons known to the joining node.
    pub beacons: usize,
    /// The first `unreachable` beacons are never registered with the router.
    pub unreachable: usize,
    /// The last `lagging` beacons miss the newest container.
    pub lagging: usize,
    /// Length of the chain.
    pub containers: usize,
    pub alpha: usize,
}

impl Simulation {
    pub fn container(n: usize) -> Vec<u8> {
        format!("container {}", n).into_bytes()
    }

    pub fn beacon_id(n: usize) -> Id {
        Id::new(format!("beacon {}", n).as_bytes())
    }

    fn parameters(&self) -> Parameters {
        Parameters { k: self.beacons.max(self.alpha), alpha: self.alpha, ..Parameters::default() }
    }

    fn chain_of(&self, beacon: usize) -> Vec<Vec<u8>> {
        let len = if beacon + self.lagging >= self.beacons {
            self.containers.saturating_sub(1)
        } else {
            self.containers
        };
        (0..len).map(Simulation::container).collect()
    }

    fn config(&self, beacons: ValidatorSet) -> BootstrapConfig {
        BootstrapConfig {
            chain_id: Id::zero(),
            parameters: self.parameters(),
            beacons: Arc::new(beacons),
        }
    }

    async fn start_beacon(&self, n: usize, router: &Addr<Router>) -> Result<()> {
        let id = Simulation::beacon_id(n);
        let mut store = ChainStore::temporary()?;
        let chain = self.chain_of(n);
        if !chain.is_empty() {
            store.persist_events(chain)?;
        }
        // Beacons only answer, they have no beacons of their own.
        let config = self.config(ValidatorSet::new());
        let sender = LocalSender::new(id, router.clone());
        let addr = Bootstrapper::new(config, store, sender)?.start();
        router.send(Register { id, peer: Peer::new(addr) }).await?;
        debug!("simulation> started beacon {}", id);
        Ok(())
    }

    /// Runs the simulation and returns the outcome of the joining node's bootstrap.
    pub async fn run(&self) -> Result<Bootstrapped> {
        let router = Router::new().start();
        for n in self.unreachable..self.beacons {
            self.start_beacon(n, &router).await?;
        }

        let node_id = Id::new(b"joining node");
        let beacons: ValidatorSet = (0..self.beacons).map(|n| (Simulation::beacon_id(n), 1)).collect();
        let sender = LocalSender::new(node_id, router.clone());
        let node = Bootstrapper::new(self.config(beacons), ChainStore::temporary()?, sender)?.start();
        router.send(Register { id: node_id, peer: Peer::new(node.clone()) }).await?;

        let (tx, rx) = oneshot::channel();
        let waiter = Waiter { tx: Some(tx) }.start();
        node.send(Subscribe { recipient: waiter.recipient() }).await?;
        info!(
            "[{}] bootstrapping from {} beacons ({} unreachable, {} lagging)",
            "simulation".magenta(),
            self.beacons,
            self.unreachable,
            self.lagging
        );
        node.send(Startup).await??;

        match tokio::time::timeout(TIMEOUT, rx).await {
            Ok(Ok(bootstrapped)) => Ok(bootstrapped),
            Ok(Err(_)) => Err(Error::Fatal("the bootstrapper stopped before finishing".to_string())),
            Err(_) => Err(Error::Fatal(format!("bootstrap did not finish within {:?}", TIMEOUT))),
        }
    }
}

// Forwards the first `Bootstrapped` notification to a oneshot channel.
struct Waiter {
    tx: Option<oneshot::Sender<Bootstrapped>>,
}

impl Actor for Waiter {
    type Context = Context<Self>;
}

impl Handler<Bootstrapped> for Waiter {
    type Result = ();

    fn handle(&mut self, msg: Bootstrapped, ctx: &mut Context<Self>) -> Self::Result {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(msg);
        }
        ctx.stop();
    }
}
