use crate::bootstrap::Sender;
use crate::protocol::{Request, Response};
use crate::zfx_id::Id;

use super::router::{RouteRequest, RouteResponse, Router};

use actix::Addr;

use std::collections::HashSet;

/// Sends the messages of the bootstrapper identified by `id` through a [Router].
#[derive(Clone)]
pub struct LocalSender {
    id: Id,
    router: Addr<Router>,
}

impl LocalSender {
    pub fn new(id: Id, router: Addr<Router>) -> Self {
        LocalSender { id, router }
    }

    fn request(&self, validator_ids: &[Id], request: Request) {
        self.router.do_send(RouteRequest { from: self.id, to: validator_ids.to_vec(), request });
    }

    fn respond(&self, validator_id: Id, response: Response) {
        self.router.do_send(RouteResponse { from: self.id, to: validator_id, response });
    }
}

impl Sender for LocalSender {
    fn get_accepted_frontier(&self, validator_ids: &[Id], request_id: u32) {
        self.request(validator_ids, Request::GetAcceptedFrontier { request_id });
    }

    fn accepted_frontier(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>) {
        self.respond(validator_id, Response::AcceptedFrontier { request_id, container_ids });
    }

    fn get_accepted(&self, validator_ids: &[Id], request_id: u32, container_ids: &HashSet<Id>) {
        let request = Request::GetAccepted { request_id, container_ids: container_ids.clone() };
        self.request(validator_ids, request);
    }

    fn accepted(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>) {
        self.respond(validator_id, Response::Accepted { request_id, container_ids });
    }
}
