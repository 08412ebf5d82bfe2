#[macro_use]
extern crate serde_derive;
#[macro_use(Message, MessageResponse)]
extern crate actix_derive;
extern crate colored;

pub mod bootstrap;
pub mod network;
pub mod protocol;
pub mod server;
pub mod snowball;
pub mod storage;
pub mod validators;
pub mod zfx_id;

use bootstrap::Status;

#[derive(Debug)]
pub enum Error {
    IO(std::io::Error),
    Sled(sled::Error),
    Actix(actix::MailboxError),
    Bincode(String),

    // configuration errors
    InvalidParameters(snowball::ConfigError),
    Settings(config::ConfigError),

    // bootstrap errors
    /// The operation is not allowed in the bootstrapper's current status
    InvalidStatus(Status),
    /// The recovery record contains no containers
    EmptyRecovery,
    /// A line of the recovery record is not valid hex
    RecoveryDecode { line: usize, error: hex::FromHexError },
    /// A fatal error reported by the bootstrap target
    Fatal(String),

    /// Error caused by converting from a `String` to an `Id`
    TryFromStringError,
}

impl std::error::Error for Error {}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}

impl std::convert::From<sled::Error> for Error {
    fn from(error: sled::Error) -> Self {
        Error::Sled(error)
    }
}

impl std::convert::From<actix::MailboxError> for Error {
    fn from(error: actix::MailboxError) -> Self {
        Error::Actix(error)
    }
}

impl std::convert::From<Box<bincode::ErrorKind>> for Error {
    fn from(error: Box<bincode::ErrorKind>) -> Self {
        Error::Bincode(format!("{:?}", error))
    }
}

impl std::convert::From<snowball::ConfigError> for Error {
    fn from(error: snowball::ConfigError) -> Self {
        Error::InvalidParameters(error)
    }
}

impl std::convert::From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Error::Settings(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            // keep the multi-line report readable
            Error::InvalidParameters(err) => write!(f, "{}", err),
            err => write!(f, "{:?}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
