//! Ports to the outside world: the REST API and the token store.

pub mod api;
pub mod dto;
pub mod token;

pub use api::{AdminApi, TransportError, TransportResult};
pub use token::{MemoryTokenStore, TokenStore};
