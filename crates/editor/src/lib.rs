//! Genscape Scape editing session.
//!
//! Wires the pure widget model from `genscape-core` to the per-session
//! channel coordinator from `genscape-events`, and talks to the external
//! collaborators the core never owns:
//!
//! - [`ScapeStore`] — persistence of whole Scapes.
//! - [`MediaResolver`] — media lookup, with [`SignedUrlCache`] for TTL
//!   caching of signed URLs.
//!
//! Configuration comes from the environment ([`EditorConfig`]) and logging
//! goes through `tracing` ([`telemetry`]).

pub mod config;
pub mod error;
pub mod media;
pub mod session;
pub mod store;
pub mod telemetry;

pub use config::EditorConfig;
pub use error::EditorError;
pub use media::{CachingResolver, MediaDescriptor, MediaError, MediaKind, MediaResolver, SignedUrlCache};
pub use session::{EditorSession, SaveOutcome};
pub use store::{InMemoryScapeStore, ScapeStore, StoreError};
