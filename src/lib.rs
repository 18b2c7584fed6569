//! Courseboard: the headless request/state synchronization engine behind an
//! e-learning admin console.
//!
//! The crate owns the part of an admin dashboard that is genuinely hard to
//! get right: tracking in-flight network operations, reconciling
//! out-of-order responses, applying optimistic merges to cached listings,
//! and driving a debounced type-ahead search. Rendering, routing, form
//! validation and the concrete HTTP client are external collaborators
//! reached through trait ports.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Embedding app (UI, routing, HTTP client)            │
//! └──────────────────────────────────────────────────────┘
//!            │ events                       │ reads
//! ┌──────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                    │
//! │  - per-domain stores: users, categories, courses,    │
//! │    enrollment, session                               │
//! │  - debounced suggestion search                       │
//! └──────────────────────────────────────────────────────┘
//!      │                 │                     │
//! ┌───────────┐   ┌──────────────┐   ┌─────────────────┐
//! │ request/  │   │ timing/      │   │ transport/      │
//! │ channels, │   │ debounce,    │   │ AdminApi port,  │
//! │ normalize │   │ flags        │   │ TokenStore port │
//! └───────────┘   └──────────────┘   └─────────────────┘
//!      │                 │
//! ┌──────────────────────────────────────────────────────┐
//! │ domain/: entities, paged collections, ApiError       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Ordering discipline
//!
//! Every operation slot is a [`request::RequestChannel`] with a monotonic
//! sequence counter. A response is applied only when it carries the
//! channel's current sequence; anything older is discarded as stale. The
//! same generation-counter rule governs the debounce window and the
//! ephemeral success flags in [`timing`]. No other ordering is guaranteed or
//! needed.
//!
//! # Runtime
//!
//! Single-threaded cooperative: build the [`Engine`] on a tokio
//! current-thread runtime and drive it inside a `tokio::task::LocalSet`
//! (timer countdowns are spawned locally). State lives in `RefCell`s behind
//! an `Rc<Engine>`; no operation holds a borrow across an await.

pub mod domain;
pub mod engine;
pub mod observability;
pub mod request;
pub mod timing;
pub mod transport;

pub use domain::{ApiError, Category, CategoryDraft, Course, ErrorKind, PagedCollection, User};
pub use engine::{Engine, EngineConfig};
pub use request::{RequestChannel, RequestStatus};
pub use transport::{AdminApi, MemoryTokenStore, TokenStore, TransportError};
