use crate::colored::Colorize;
use crate::snowball::Parameters;
use crate::validators::{ValidatorWeights, Weight};
use crate::zfx_id::Id;
use crate::{Error, Result};

use super::handlers::Bootstrapped;
use super::recovery::RecoveryRecord;
use super::sender::Sender;
use super::target::BootstrapTarget;

use actix::Recipient;
use tracing::{debug, error, info};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Progress of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Ready for `startup`.
    Idle,
    /// Round 1: waiting for the beacons' accepted frontiers.
    AwaitingFrontier,
    /// Round 2: waiting for the beacons to filter the collected frontier.
    AwaitingAccepted,
    /// The accepted frontier was handed to the target.
    Done,
    /// The chain was replayed from a recovery record.
    Replayed,
    /// A fatal error stopped the bootstrap.
    Halted,
}

impl Status {
    /// Whether the bootstrap reached a terminal state.
    pub fn is_finished(&self) -> bool {
        match self {
            Status::Done | Status::Replayed | Status::Halted => true,
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct BootstrapConfig {
    /// The chain being bootstrapped (used to locate recovery records and in logs).
    pub chain_id: Id,
    pub parameters: Parameters,
    pub beacons: Arc<dyn ValidatorWeights>,
}

/// Two round weighted quorum over the beacon set.
///
/// The bootstrapper is a plain state machine: every inbound event is a method call and
/// every side effect goes through the [Sender] or the [BootstrapTarget]. Events must be
/// delivered one at a time, which the actor implementation in `handlers` guarantees.
pub struct Bootstrapper<T: BootstrapTarget, S: Sender> {
    chain_id: Id,
    /// The weight a container needs in order to be accepted.
    alpha: Weight,
    beacons: Arc<dyn ValidatorWeights>,
    beacon_ids: Vec<Id>,
    target: T,
    sender: S,
    status: Status,
    /// The id of the outstanding request round.
    request_id: u32,
    /// Beacons asked for their accepted frontier which have not answered yet.
    pending_frontier: HashSet<Id>,
    /// Union of the accepted frontiers reported so far.
    accepted_frontier: HashSet<Id>,
    /// Beacons asked to filter the accepted frontier which have not answered yet.
    pending_accepted: HashSet<Id>,
    /// Accumulated stake behind each container of the accepted frontier.
    accepted_votes: HashMap<Id, Weight>,
    /// The containers handed to the target once finished.
    accepted: HashSet<Id>,
    /// Told about the outcome once the bootstrap is finished.
    pub(super) subscriber: Option<Recipient<Bootstrapped>>,
}

impl<T: BootstrapTarget, S: Sender> Bootstrapper<T, S> {
    /// Creates a bootstrapper which polls the beacons once `startup` is called.
    pub fn new(config: BootstrapConfig, target: T, sender: S) -> Result<Self> {
        config.parameters.valid()?;
        let beacon_ids = config.beacons.beacons();
        let pending_frontier = beacon_ids.iter().cloned().collect::<HashSet<Id>>();
        let pending_accepted = pending_frontier.clone();
        Ok(Bootstrapper {
            chain_id: config.chain_id,
            alpha: config.parameters.alpha_weight(),
            beacons: config.beacons,
            beacon_ids,
            target,
            sender,
            status: Status::Idle,
            request_id: 0,
            pending_frontier,
            accepted_frontier: HashSet::new(),
            pending_accepted,
            accepted_votes: HashMap::new(),
            accepted: HashSet::new(),
            subscriber: None,
        })
    }

    /// Creates a bootstrapper which trusts a locally persisted history instead of the
    /// network: the containers are replayed into the target and the last one is forced
    /// as the accepted frontier. Any failure is fatal, there is no fallback to polling
    /// the beacons.
    pub fn replay(
        config: BootstrapConfig,
        target: T,
        sender: S,
        record: RecoveryRecord,
    ) -> Result<Self> {
        let mut bootstrapper = Self::new(config, target, sender)?;
        // Nothing is requested from the beacons on this path.
        bootstrapper.pending_frontier.clear();
        bootstrapper.pending_accepted.clear();

        info!(
            "[{}] replaying {} containers of {}",
            "bootstrap".cyan(),
            record.len(),
            bootstrapper.chain_id
        );
        let tip = record.tip();
        if let Err(err) = bootstrapper.target.persist_events(record.into_containers()) {
            error!("[{}] failed to persist consensus events: {:?}", "bootstrap".cyan(), err);
            return Err(err);
        }
        let mut tip_set = HashSet::new();
        let _ = tip_set.insert(tip);
        if let Err(err) = bootstrapper.target.force_accepted(tip_set.clone()) {
            error!("[{}] failed to force accept the recovered tip: {:?}", "bootstrap".cyan(), err);
            return Err(err);
        }
        bootstrapper.accepted = tip_set;
        info!("[{}] replayed up to {}", "bootstrap".cyan(), tip);
        bootstrapper.status = Status::Replayed;
        Ok(bootstrapper)
    }

    pub fn chain_id(&self) -> Id {
        self.chain_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn pending_frontier(&self) -> &HashSet<Id> {
        &self.pending_frontier
    }

    pub fn pending_accepted(&self) -> &HashSet<Id> {
        &self.pending_accepted
    }

    /// The union of all accepted frontiers reported in round 1.
    pub fn frontier_union(&self) -> &HashSet<Id> {
        &self.accepted_frontier
    }

    pub fn accepted_votes(&self) -> &HashMap<Id, Weight> {
        &self.accepted_votes
    }

    /// The containers forced as accepted, empty until finished.
    pub fn accepted_set(&self) -> &HashSet<Id> {
        &self.accepted
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Starts round 1 by asking every beacon for its accepted frontier. Without any
    /// beacons there is nothing to trust and the empty set is accepted right away.
    pub fn startup(&mut self) -> Result<()> {
        if self.status != Status::Idle {
            return Err(Error::InvalidStatus(self.status));
        }
        if self.pending_frontier.is_empty() {
            info!("[{}] bootstrapping skipped due to no provided beacons", "bootstrap".cyan());
            return self.finish(HashSet::new());
        }
        self.request_id = self.request_id.wrapping_add(1);
        self.status = Status::AwaitingFrontier;
        info!(
            "[{}] requesting the accepted frontier from {} beacons",
            "bootstrap".cyan(),
            self.beacon_ids.len()
        );
        self.sender.get_accepted_frontier(&self.beacon_ids, self.request_id);
        Ok(())
    }

    /// Answers a peer which is bootstrapping from us.
    pub fn get_accepted_frontier(&mut self, validator_id: Id, request_id: u32) -> Result<()> {
        let frontier = self.target.current_accepted_frontier();
        self.sender.accepted_frontier(validator_id, request_id, frontier);
        Ok(())
    }

    /// A beacon which cannot be reached counts as reporting an empty frontier.
    pub fn get_accepted_frontier_failed(&mut self, validator_id: Id, request_id: u32) -> Result<()> {
        self.accepted_frontier(validator_id, request_id, HashSet::new())
    }

    /// Records the accepted frontier reported by `validator_id`. Once every beacon has
    /// answered (or failed), round 2 asks each beacon to filter the collected frontier.
    pub fn accepted_frontier(
        &mut self,
        validator_id: Id,
        request_id: u32,
        container_ids: HashSet<Id>,
    ) -> Result<()> {
        if self.status != Status::AwaitingFrontier
            || request_id != self.request_id
            || !self.pending_frontier.remove(&validator_id)
        {
            debug!(
                "[{}] received an unexpected accepted frontier from {} (request {})",
                "bootstrap".cyan(),
                validator_id,
                request_id
            );
            return Ok(());
        }
        self.accepted_frontier.extend(container_ids);

        if !self.pending_frontier.is_empty() {
            return Ok(());
        }

        self.request_id = self.request_id.wrapping_add(1);
        self.pending_accepted = self.beacon_ids.iter().cloned().collect();
        self.status = Status::AwaitingAccepted;
        info!(
            "[{}] collected {} containers in the accepted frontier",
            "bootstrap".cyan(),
            self.accepted_frontier.len()
        );
        self.sender.get_accepted(&self.beacon_ids, self.request_id, &self.accepted_frontier);
        Ok(())
    }

    /// Answers a peer which asks which of `container_ids` we have accepted.
    pub fn get_accepted(
        &mut self,
        validator_id: Id,
        request_id: u32,
        container_ids: HashSet<Id>,
    ) -> Result<()> {
        let accepted = self.target.filter_accepted(&container_ids);
        self.sender.accepted(validator_id, request_id, accepted);
        Ok(())
    }

    /// A beacon which cannot be reached counts as having accepted none of the containers.
    pub fn get_accepted_failed(&mut self, validator_id: Id, request_id: u32) -> Result<()> {
        self.accepted(validator_id, request_id, HashSet::new())
    }

    /// Adds the weight of `validator_id` to every container it reports as accepted. Once
    /// every beacon has answered (or failed), the containers with at least `alpha`
    /// weight are forced as accepted.
    pub fn accepted(
        &mut self,
        validator_id: Id,
        request_id: u32,
        container_ids: HashSet<Id>,
    ) -> Result<()> {
        if self.status != Status::AwaitingAccepted
            || request_id != self.request_id
            || !self.pending_accepted.remove(&validator_id)
        {
            debug!(
                "[{}] received an unexpected accepted set from {} (request {})",
                "bootstrap".cyan(),
                validator_id,
                request_id
            );
            return Ok(());
        }

        let weight = self.beacons.weight(&validator_id);
        for container_id in container_ids.iter() {
            // Only containers of the collected frontier can be accepted.
            if !self.accepted_frontier.contains(container_id) {
                continue;
            }
            let votes = self.accepted_votes.entry(*container_id).or_insert(0);
            *votes = votes.saturating_add(weight);
        }

        if !self.pending_accepted.is_empty() {
            return Ok(());
        }

        let alpha = self.alpha;
        let accepted = self
            .accepted_frontier
            .iter()
            .filter(|id| self.accepted_votes.get(*id).map_or(false, |w| *w >= alpha))
            .cloned()
            .collect::<HashSet<Id>>();

        if accepted.is_empty() && !self.beacon_ids.is_empty() {
            info!(
                "[{}] bootstrapping finished with no accepted frontier. This is likely a result of failing to connect to the beacons, or no containers have been issued on this chain yet",
                "bootstrap".cyan()
            );
        } else {
            info!(
                "[{}] bootstrapping started syncing with {} containers in the accepted frontier",
                "bootstrap".cyan(),
                accepted.len()
            );
        }
        self.finish(accepted)
    }

    fn finish(&mut self, accepted: HashSet<Id>) -> Result<()> {
        match self.target.force_accepted(accepted.clone()) {
            Ok(()) => {
                self.accepted = accepted;
                self.status = Status::Done;
                Ok(())
            }
            Err(err) => {
                error!("[{}] failed to force accept: {:?}", "bootstrap".cyan(), err);
                self.status = Status::Halted;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bootstrap::test_utils::{SenderTest, Sent, TargetTest};
    use crate::validators::ValidatorSet;

    fn params(alpha: usize) -> Parameters {
        Parameters { k: alpha, alpha, beta_virtuous: 1, beta_rogue: 1, concurrent_repolls: 1 }
    }

    fn config(beacons: Vec<(Id, Weight)>, alpha: usize) -> BootstrapConfig {
        let beacons: ValidatorSet = beacons.into_iter().collect();
        BootstrapConfig { chain_id: Id::zero(), parameters: params(alpha), beacons: Arc::new(beacons) }
    }

    fn set(ids: &[Id]) -> HashSet<Id> {
        ids.iter().cloned().collect()
    }

    fn container(name: &str) -> Id {
        Id::new(name.as_bytes())
    }

    fn validators(n: u8) -> Vec<Id> {
        (1..=n).map(|i| Id::from([i; 32])).collect()
    }

    fn start(beacons: Vec<(Id, Weight)>, alpha: usize) -> Bootstrapper<TargetTest, SenderTest> {
        let mut b = Bootstrapper::new(config(beacons, alpha), TargetTest::new(), SenderTest::new())
            .unwrap();
        b.startup().unwrap();
        b
    }

    #[test]
    fn test_invalid_parameters_are_refused() {
        let mut config = config(vec![(Id::one(), 1)], 1);
        config.parameters.concurrent_repolls = 0;
        match Bootstrapper::new(config, TargetTest::new(), SenderTest::new()) {
            Err(Error::InvalidParameters(_)) => (),
            Err(e) => panic!("unexpected error: {:?}", e),
            Ok(_) => panic!("invalid parameters were accepted"),
        }
    }

    #[test]
    fn test_startup_without_beacons() {
        let b = start(vec![], 1);
        assert_eq!(b.status(), Status::Done);
        assert_eq!(b.target().force_accepted_calls(), vec![HashSet::new()]);
        assert!(b.sender().sent().is_empty());
    }

    #[test]
    fn test_startup_twice_is_refused() {
        let mut b = start(vec![(Id::one(), 1)], 1);
        match b.startup() {
            Err(Error::InvalidStatus(Status::AwaitingFrontier)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_startup_requests_frontier_from_every_beacon() {
        let vdrs = validators(3);
        let b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 2);
        assert_eq!(b.status(), Status::AwaitingFrontier);
        assert_eq!(b.sender().sent(), vec![Sent::GetAcceptedFrontier(vdrs.clone(), 1)]);
    }

    #[test]
    fn test_weighted_quorum() {
        let vdrs = validators(3);
        let (a, c) = (container("A"), container("B"));
        let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 2);

        b.accepted_frontier(vdrs[0], 1, set(&[a])).unwrap();
        b.accepted_frontier(vdrs[1], 1, set(&[a, c])).unwrap();
        b.get_accepted_frontier_failed(vdrs[2], 1).unwrap();
        assert_eq!(b.status(), Status::AwaitingAccepted);
        assert_eq!(b.frontier_union(), &set(&[a, c]));
        assert_eq!(b.sender().sent()[1], Sent::GetAccepted(vdrs.clone(), 2, set(&[a, c])));

        b.accepted(vdrs[0], 2, set(&[a])).unwrap();
        b.accepted(vdrs[1], 2, set(&[a, c])).unwrap();
        assert!(b.target().force_accepted_calls().is_empty());
        b.get_accepted_failed(vdrs[2], 2).unwrap();

        assert_eq!(b.accepted_votes().get(&a), Some(&2));
        assert_eq!(b.accepted_votes().get(&c), Some(&1));
        assert_eq!(b.status(), Status::Done);
        assert_eq!(b.target().force_accepted_calls(), vec![set(&[a])]);
    }

    #[test]
    fn test_stake_weights_decide() {
        let vdrs = validators(3);
        let (a, c) = (container("A"), container("B"));
        let mut b = start(vec![(vdrs[0], 10), (vdrs[1], 1), (vdrs[2], 1)], 5);
        for vdr in vdrs.iter() {
            b.accepted_frontier(*vdr, 1, set(&[a, c])).unwrap();
        }
        b.accepted(vdrs[0], 2, set(&[a])).unwrap();
        b.accepted(vdrs[1], 2, set(&[c])).unwrap();
        b.accepted(vdrs[2], 2, set(&[c])).unwrap();
        assert_eq!(b.target().force_accepted_calls(), vec![set(&[a])]);
    }

    #[test]
    fn test_union_is_order_independent() {
        let vdrs = validators(3);
        let frontiers = vec![
            set(&[container("A")]),
            set(&[container("B"), container("C")]),
            set(&[container("A"), container("D")]),
        ];
        let mut unions = vec![];
        for order in vec![[0, 1, 2], [2, 1, 0], [1, 2, 0]].iter() {
            let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 1);
            for i in order.iter() {
                b.accepted_frontier(vdrs[*i], 1, frontiers[*i].clone()).unwrap();
            }
            unions.push(b.frontier_union().clone());
        }
        let expected =
            set(&[container("A"), container("B"), container("C"), container("D")]);
        for union in unions {
            assert_eq!(union, expected);
        }
    }

    #[test]
    fn test_duplicate_frontier_is_ignored() {
        let vdrs = validators(2);
        let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 1);
        b.accepted_frontier(vdrs[0], 1, set(&[container("A")])).unwrap();
        b.accepted_frontier(vdrs[0], 1, set(&[container("A"), container("X")])).unwrap();
        assert_eq!(b.frontier_union(), &set(&[container("A")]));
        assert_eq!(b.pending_frontier(), &set(&[vdrs[1]]));
        assert_eq!(b.status(), Status::AwaitingFrontier);
    }

    #[test]
    fn test_unsolicited_responses_are_ignored() {
        let vdrs = validators(1);
        let stranger = Id::generate();
        let mut b = start(vec![(vdrs[0], 1)], 1);
        b.accepted_frontier(stranger, 1, set(&[container("A")])).unwrap();
        // an accepted set is not expected during round 1
        b.accepted(vdrs[0], 1, set(&[container("A")])).unwrap();
        assert!(b.frontier_union().is_empty());
        assert!(b.accepted_votes().is_empty());
        assert_eq!(b.status(), Status::AwaitingFrontier);
    }

    #[test]
    fn test_stale_request_id_is_ignored() {
        let vdrs = validators(2);
        let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 1);
        b.accepted_frontier(vdrs[0], 0, set(&[container("old")])).unwrap();
        assert!(b.frontier_union().is_empty());
        assert_eq!(b.pending_frontier().len(), 2);

        b.accepted_frontier(vdrs[0], 1, set(&[container("A")])).unwrap();
        b.accepted_frontier(vdrs[1], 1, HashSet::new()).unwrap();
        // round 1 answers arriving late are not votes
        b.accepted(vdrs[0], 1, set(&[container("A")])).unwrap();
        assert_eq!(b.pending_accepted().len(), 2);
        assert!(b.accepted_votes().is_empty());
    }

    #[test]
    fn test_containers_outside_the_frontier_get_no_votes() {
        let vdrs = validators(1);
        let mut b = start(vec![(vdrs[0], 1)], 1);
        b.accepted_frontier(vdrs[0], 1, set(&[container("A")])).unwrap();
        b.accepted(vdrs[0], 2, set(&[container("A"), container("Z")])).unwrap();
        assert_eq!(b.accepted_votes().get(&container("Z")), None);
        assert_eq!(b.target().force_accepted_calls(), vec![set(&[container("A")])]);
    }

    #[test]
    fn test_votes_saturate() {
        let vdrs = validators(2);
        let a = container("A");
        let mut b = start(vec![(vdrs[0], u64::MAX - 1), (vdrs[1], 5)], 1);
        b.accepted_frontier(vdrs[0], 1, set(&[a])).unwrap();
        b.accepted_frontier(vdrs[1], 1, set(&[a])).unwrap();
        b.accepted(vdrs[0], 2, set(&[a])).unwrap();
        b.accepted(vdrs[1], 2, set(&[a])).unwrap();
        assert_eq!(b.accepted_votes().get(&a), Some(&u64::MAX));
        assert_eq!(b.target().force_accepted_calls(), vec![set(&[a])]);
    }

    #[test]
    fn test_failure_is_an_empty_answer() {
        let vdrs = validators(2);
        let a = container("A");
        let run = |fail: bool| {
            let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 1);
            b.accepted_frontier(vdrs[0], 1, set(&[a])).unwrap();
            b.accepted_frontier(vdrs[1], 1, set(&[a])).unwrap();
            b.accepted(vdrs[0], 2, set(&[a])).unwrap();
            if fail {
                b.get_accepted_failed(vdrs[1], 2).unwrap();
            } else {
                b.accepted(vdrs[1], 2, HashSet::new()).unwrap();
            }
            (b.accepted_votes().clone(), b.target().force_accepted_calls())
        };
        assert_eq!(run(true), run(false));
    }

    #[test]
    fn test_unreachable_beacons_finish_empty() {
        let vdrs = validators(2);
        let mut b = start(vdrs.iter().map(|id| (*id, 1)).collect(), 1);
        for vdr in vdrs.iter() {
            b.get_accepted_frontier_failed(*vdr, 1).unwrap();
        }
        for vdr in vdrs.iter() {
            b.get_accepted_failed(*vdr, 2).unwrap();
        }
        assert_eq!(b.status(), Status::Done);
        assert_eq!(b.target().force_accepted_calls(), vec![HashSet::new()]);
    }

    #[test]
    fn test_force_accepted_failure_halts() {
        let vdrs = validators(1);
        let mut target = TargetTest::new();
        target.fail_force_accepted = true;
        let mut b =
            Bootstrapper::new(config(vec![(vdrs[0], 1)], 1), target, SenderTest::new()).unwrap();
        b.startup().unwrap();
        b.accepted_frontier(vdrs[0], 1, HashSet::new()).unwrap();
        assert!(b.accepted(vdrs[0], 2, HashSet::new()).is_err());
        assert_eq!(b.status(), Status::Halted);
    }

    #[test]
    fn test_halted_bootstrap_reports_nothing_accepted() {
        let vdrs = validators(1);
        let a = container("A");
        let mut target = TargetTest::new();
        target.fail_force_accepted = true;
        let mut b =
            Bootstrapper::new(config(vec![(vdrs[0], 1)], 1), target, SenderTest::new()).unwrap();
        b.startup().unwrap();
        b.accepted_frontier(vdrs[0], 1, set(&[a])).unwrap();
        assert!(b.accepted(vdrs[0], 2, set(&[a])).is_err());
        assert_eq!(b.status(), Status::Halted);
        // the target never took `A`
        assert!(b.accepted_set().is_empty());
    }

    #[test]
    fn test_duplicate_accepted_is_counted_once() {
        let vdrs = validators(2);
        let a = container("A");
        let mut b = start(vec![(vdrs[0], 3), (vdrs[1], 1)], 4);
        b.accepted_frontier(vdrs[0], 1, set(&[a])).unwrap();
        b.accepted_frontier(vdrs[1], 1, set(&[a])).unwrap();

        b.accepted(vdrs[0], 2, set(&[a])).unwrap();
        b.accepted(vdrs[0], 2, set(&[a])).unwrap();
        assert_eq!(b.accepted_votes().get(&a), Some(&3));
        assert_eq!(b.pending_accepted(), &set(&[vdrs[1]]));
        assert_eq!(b.status(), Status::AwaitingAccepted);

        b.accepted(vdrs[1], 2, HashSet::new()).unwrap();
        // 3 < alpha, a second count of vdrs[0] would have reached it
        assert_eq!(b.accepted_votes().get(&a), Some(&3));
        assert_eq!(b.status(), Status::Done);
        assert_eq!(b.target().force_accepted_calls(), vec![HashSet::new()]);
    }

    #[test]
    fn test_answers_peers() {
        let mut target = TargetTest::new();
        target.frontier = set(&[container("A")]);
        target.accepted = set(&[container("A"), container("B")]);
        let mut b = Bootstrapper::new(config(vec![], 1), target, SenderTest::new()).unwrap();

        b.get_accepted_frontier(Id::one(), 7).unwrap();
        b.get_accepted(Id::two(), 8, set(&[container("B"), container("C")])).unwrap();
        assert_eq!(
            b.sender().sent(),
            vec![
                Sent::AcceptedFrontier(Id::one(), 7, set(&[container("A")])),
                Sent::Accepted(Id::two(), 8, set(&[container("B")])),
            ]
        );
    }

    #[test]
    fn test_replay() {
        let record = RecoveryRecord::new(vec![b"genesis".to_vec(), b"tip".to_vec()]).unwrap();
        let b = Bootstrapper::replay(
            config(validators(2).into_iter().map(|id| (id, 1)).collect(), 1),
            TargetTest::new(),
            SenderTest::new(),
            record,
        )
        .unwrap();
        assert_eq!(b.status(), Status::Replayed);
        assert_eq!(b.target().persisted, vec![b"genesis".to_vec(), b"tip".to_vec()]);
        assert_eq!(b.target().force_accepted_calls(), vec![set(&[Id::new(b"tip")])]);
        assert!(b.sender().sent().is_empty());
    }

    #[test]
    fn test_replay_failures_are_fatal() {
        let record = RecoveryRecord::new(vec![b"genesis".to_vec()]).unwrap();

        let mut target = TargetTest::new();
        target.fail_persist_events = true;
        let result =
            Bootstrapper::replay(config(vec![], 1), target, SenderTest::new(), record.clone());
        assert!(matches!(result, Err(Error::Fatal(_))));

        let mut target = TargetTest::new();
        target.fail_force_accepted = true;
        let result = Bootstrapper::replay(config(vec![], 1), target, SenderTest::new(), record);
        assert!(matches!(result, Err(Error::Fatal(_))));
    }
}
