use crate::bootstrap::{BootstrapTarget, Bootstrapper, ReceiveRequest, ReceiveResponse, RequestFailed};
use crate::bootstrap::Sender as BootstrapSender;
use crate::colored::Colorize;
use crate::protocol::{Request, Response};
use crate::zfx_id::Id;

use actix::{Actor, Addr, Context, Handler, Recipient};
use tracing::{debug, info};

use std::collections::HashMap;

/// The mailboxes of a bootstrapper as seen by the router.
#[derive(Clone)]
pub struct Peer {
    requests: Recipient<ReceiveRequest>,
    responses: Recipient<ReceiveResponse>,
    failures: Recipient<RequestFailed>,
}

impl Peer {
    pub fn new<T, S>(addr: Addr<Bootstrapper<T, S>>) -> Self
    where
        T: BootstrapTarget + Unpin + 'static,
        S: BootstrapSender + Unpin + 'static,
    {
        Peer {
            requests: addr.clone().recipient(),
            responses: addr.clone().recipient(),
            failures: addr.recipient(),
        }
    }
}

pub struct Router {
    peers: HashMap<Id, Peer>,
}

impl Router {
    pub fn new() -> Self {
        Router { peers: HashMap::default() }
    }

    fn fail(&self, from: &Id, to: Id, request: Request) {
        match self.peers.get(from) {
            Some(peer) => {
                let _ = peer.failures.do_send(RequestFailed { validator_id: to, request });
            }
            None => debug!("router> dropping failure for unknown peer {}", from),
        }
    }
}

impl Actor for Router {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Context<Self>) {
        debug!("router> started");
    }
}

#[derive(Clone, Message)]
#[rtype(result = "()")]
pub struct Register {
    pub id: Id,
    pub peer: Peer,
}

impl Handler<Register> for Router {
    type Result = ();

    fn handle(&mut self, msg: Register, _ctx: &mut Context<Self>) -> Self::Result {
        info!("[{}] registered {}", "router".yellow(), msg.id);
        let _ = self.peers.insert(msg.id, msg.peer);
    }
}

#[derive(Debug, Clone, Message)]
#[rtype(result = "()")]
pub struct RouteRequest {
    pub from: Id,
    pub to: Vec<Id>,
    pub request: Request,
}

impl Handler<RouteRequest> for Router {
    type Result = ();

    fn handle(&mut self, msg: RouteRequest, _ctx: &mut Context<Self>) -> Self::Result {
        for to in msg.to.iter().cloned() {
            let request = msg.request.clone();
            let delivered = match self.peers.get(&to) {
                Some(peer) => peer
                    .requests
                    .do_send(ReceiveRequest { validator_id: msg.from, request: request.clone() })
                    .is_ok(),
                None => false,
            };
            if !delivered {
                debug!("router> {} is unreachable", to);
                self.fail(&msg.from, to, request);
            }
        }
    }
}

#[derive(Debug, Clone, Message)]
#[rtype(result = "()")]
pub struct RouteResponse {
    pub from: Id,
    pub to: Id,
    pub response: Response,
}

impl Handler<RouteResponse> for Router {
    type Result = ();

    fn handle(&mut self, msg: RouteResponse, _ctx: &mut Context<Self>) -> Self::Result {
        match self.peers.get(&msg.to) {
            Some(peer) => {
                let response = ReceiveResponse { validator_id: msg.from, response: msg.response };
                let _ = peer.responses.do_send(response);
            }
            None => debug!("router> dropping response for unknown peer {}", msg.to),
        }
    }
}
