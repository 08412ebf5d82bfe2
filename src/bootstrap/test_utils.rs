//! Recording doubles for the bootstrapper's collaborators.

use crate::zfx_id::Id;
use crate::{Error, Result};

use super::sender::Sender;
use super::target::BootstrapTarget;

use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    GetAcceptedFrontier(Vec<Id>, u32),
    AcceptedFrontier(Id, u32, HashSet<Id>),
    GetAccepted(Vec<Id>, u32, HashSet<Id>),
    Accepted(Id, u32, HashSet<Id>),
}

/// Records every outbound message.
#[derive(Default)]
pub struct SenderTest {
    sent: RefCell<Vec<Sent>>,
}

impl SenderTest {
    pub fn new() -> Self {
        SenderTest::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }
}

impl Sender for SenderTest {
    fn get_accepted_frontier(&self, validator_ids: &[Id], request_id: u32) {
        self.sent.borrow_mut().push(Sent::GetAcceptedFrontier(validator_ids.to_vec(), request_id));
    }

    fn accepted_frontier(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>) {
        self.sent.borrow_mut().push(Sent::AcceptedFrontier(validator_id, request_id, container_ids));
    }

    fn get_accepted(&self, validator_ids: &[Id], request_id: u32, container_ids: &HashSet<Id>) {
        self.sent.borrow_mut().push(Sent::GetAccepted(
            validator_ids.to_vec(),
            request_id,
            container_ids.clone(),
        ));
    }

    fn accepted(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>) {
        self.sent.borrow_mut().push(Sent::Accepted(validator_id, request_id, container_ids));
    }
}

/// A target with a fixed local state which records what it is told.
#[derive(Default)]
pub struct TargetTest {
    pub frontier: HashSet<Id>,
    pub accepted: HashSet<Id>,
    pub persisted: Vec<Vec<u8>>,
    pub forced: Vec<HashSet<Id>>,
    pub fail_force_accepted: bool,
    pub fail_persist_events: bool,
}

impl TargetTest {
    pub fn new() -> Self {
        TargetTest::default()
    }

    pub fn force_accepted_calls(&self) -> Vec<HashSet<Id>> {
        self.forced.clone()
    }
}

impl BootstrapTarget for TargetTest {
    fn current_accepted_frontier(&self) -> HashSet<Id> {
        self.frontier.clone()
    }

    fn filter_accepted(&self, container_ids: &HashSet<Id>) -> HashSet<Id> {
        container_ids.intersection(&self.accepted).cloned().collect()
    }

    fn force_accepted(&mut self, container_ids: HashSet<Id>) -> Result<()> {
        if self.fail_force_accepted {
            return Err(Error::Fatal("force accepted failed".to_owned()));
        }
        self.forced.push(container_ids);
        Ok(())
    }

    fn persist_events(&mut self, containers: Vec<Vec<u8>>) -> Result<()> {
        if self.fail_persist_events {
            return Err(Error::Fatal("persist events failed".to_owned()));
        }
        self.persisted.extend(containers);
        Ok(())
    }
}
