//! Messages exchanged between bootstrapping peers.
use crate::zfx_id::Id;
use crate::Result;

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Asks for the accepted containers which have no accepted children.
    GetAcceptedFrontier { request_id: u32 },
    /// Asks which of `container_ids` the peer has accepted.
    GetAccepted { request_id: u32, container_ids: HashSet<Id> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    AcceptedFrontier { request_id: u32, container_ids: HashSet<Id> },
    Accepted { request_id: u32, container_ids: HashSet<Id> },
}

impl Request {
    pub fn request_id(&self) -> u32 {
        match self {
            Request::GetAcceptedFrontier { request_id } => *request_id,
            Request::GetAccepted { request_id, .. } => *request_id,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Response {
    pub fn request_id(&self) -> u32 {
        match self {
            Response::AcceptedFrontier { request_id, .. } => *request_id,
            Response::Accepted { request_id, .. } => *request_id,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
