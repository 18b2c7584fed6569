//! Request lifecycle tracking and failure normalization.

pub mod channel;
pub mod normalize;

pub use channel::{RequestChannel, RequestStatus, Sequence};
pub use normalize::{normalize, BLOCKED_ACCOUNT_MESSAGE};
