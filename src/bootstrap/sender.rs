use crate::zfx_id::Id;

use std::collections::HashSet;

/// Outbound side of the bootstrap protocol.
///
/// Sending never blocks and never fails: responses arrive later as separate events, and
/// a request which cannot be answered is reported back by the transport as a failure
/// for that validator and request id.
pub trait Sender {
    /// Asks each of `validator_ids` for its accepted frontier.
    fn get_accepted_frontier(&self, validator_ids: &[Id], request_id: u32);

    /// Answers a `get_accepted_frontier` request.
    fn accepted_frontier(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>);

    /// Asks each of `validator_ids` which of `container_ids` it has accepted.
    fn get_accepted(&self, validator_ids: &[Id], request_id: u32, container_ids: &HashSet<Id>);

    /// Answers a `get_accepted` request.
    fn accepted(&self, validator_id: Id, request_id: u32, container_ids: HashSet<Id>);
}
