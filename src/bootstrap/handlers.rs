//! The bootstrapper as an actor.
//!
//! The actor's mailbox is the only way events reach a running bootstrapper, so responses
//! and failures arriving concurrently from many peers are applied one at a time.

use crate::protocol::{Request, Response};
use crate::zfx_id::Id;
use crate::Result;

use super::bootstrapper::{Bootstrapper, Status};
use super::sender::Sender;
use super::target::BootstrapTarget;

use actix::{Actor, Context, Handler, Recipient};
use tracing::debug;

use std::collections::HashSet;

impl<T, S> Actor for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Context<Self>) {
        debug!("started bootstrapper for {}", self.chain_id());
    }
}

impl<T, S> Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    fn bootstrapped(&self) -> Bootstrapped {
        Bootstrapped {
            chain_id: self.chain_id(),
            status: self.status(),
            accepted: self.accepted_set().clone(),
        }
    }

    // Applies `f` and tells the subscriber if it finished the bootstrap.
    fn apply<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let was_finished = self.status().is_finished();
        let result = f(self);
        if !was_finished && self.status().is_finished() {
            if let Some(subscriber) = self.subscriber.take() {
                let _ = subscriber.do_send(self.bootstrapped());
            }
        }
        result
    }
}

/// Sent to the subscriber once the bootstrap is finished.
#[derive(Debug, Clone, Message)]
#[rtype(result = "()")]
pub struct Bootstrapped {
    pub chain_id: Id,
    pub status: Status,
    /// The containers forced as accepted.
    pub accepted: HashSet<Id>,
}

#[derive(Clone, Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub recipient: Recipient<Bootstrapped>,
}

impl<T, S> Handler<Subscribe> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _ctx: &mut Context<Self>) -> Self::Result {
        if self.status().is_finished() {
            let _ = msg.recipient.do_send(self.bootstrapped());
        } else {
            self.subscriber = Some(msg.recipient);
        }
    }
}

#[derive(Debug, Clone, Message)]
#[rtype(result = "Result<()>")]
pub struct Startup;

impl<T, S> Handler<Startup> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = Result<()>;

    fn handle(&mut self, _msg: Startup, _ctx: &mut Context<Self>) -> Self::Result {
        self.apply(|b| b.startup())
    }
}

/// A request from `validator_id`.
#[derive(Debug, Clone, Message)]
#[rtype(result = "Result<()>")]
pub struct ReceiveRequest {
    pub validator_id: Id,
    pub request: Request,
}

impl<T, S> Handler<ReceiveRequest> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = Result<()>;

    fn handle(&mut self, msg: ReceiveRequest, _ctx: &mut Context<Self>) -> Self::Result {
        match msg.request {
            Request::GetAcceptedFrontier { request_id } => {
                self.get_accepted_frontier(msg.validator_id, request_id)
            }
            Request::GetAccepted { request_id, container_ids } => {
                self.get_accepted(msg.validator_id, request_id, container_ids)
            }
        }
    }
}

/// A response from `validator_id`.
#[derive(Debug, Clone, Message)]
#[rtype(result = "Result<()>")]
pub struct ReceiveResponse {
    pub validator_id: Id,
    pub response: Response,
}

impl<T, S> Handler<ReceiveResponse> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = Result<()>;

    fn handle(&mut self, msg: ReceiveResponse, _ctx: &mut Context<Self>) -> Self::Result {
        let validator_id = msg.validator_id;
        self.apply(move |b| match msg.response {
            Response::AcceptedFrontier { request_id, container_ids } => {
                b.accepted_frontier(validator_id, request_id, container_ids)
            }
            Response::Accepted { request_id, container_ids } => {
                b.accepted(validator_id, request_id, container_ids)
            }
        })
    }
}

/// The transport gave up on `request` sent to `validator_id`.
#[derive(Debug, Clone, Message)]
#[rtype(result = "Result<()>")]
pub struct RequestFailed {
    pub validator_id: Id,
    pub request: Request,
}

impl<T, S> Handler<RequestFailed> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = Result<()>;

    fn handle(&mut self, msg: RequestFailed, _ctx: &mut Context<Self>) -> Self::Result {
        let validator_id = msg.validator_id;
        self.apply(move |b| match msg.request {
            Request::GetAcceptedFrontier { request_id } => {
                b.get_accepted_frontier_failed(validator_id, request_id)
            }
            Request::GetAccepted { request_id, .. } => {
                b.get_accepted_failed(validator_id, request_id)
            }
        })
    }
}

#[derive(Debug, Clone, Message)]
#[rtype(result = "BootstrapStatus")]
pub struct GetStatus;

#[derive(Debug, Clone, MessageResponse)]
pub struct BootstrapStatus {
    pub status: Status,
    pub request_id: u32,
    pub pending_frontier: usize,
    pub pending_accepted: usize,
    pub accepted_frontier: HashSet<Id>,
    pub accepted: HashSet<Id>,
}

impl<T, S> Handler<GetStatus> for Bootstrapper<T, S>
where
    T: BootstrapTarget + Unpin + 'static,
    S: Sender + Unpin + 'static,
{
    type Result = BootstrapStatus;

    fn handle(&mut self, _msg: GetStatus, _ctx: &mut Context<Self>) -> Self::Result {
        BootstrapStatus {
            status: self.status(),
            request_id: self.request_id(),
            pending_frontier: self.pending_frontier().len(),
            pending_accepted: self.pending_accepted().len(),
            accepted_frontier: self.frontier_union().clone(),
            accepted: self.accepted_set().clone(),
        }
    }
}
