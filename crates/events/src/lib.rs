//! Genscape channel coordination.
//!
//! - [`ChannelCoordinator`] — per-session driving-media state for the red,
//!   green and blue channels, with last-write-wins semantics.
//! - [`ChannelChange`] — change notification pushed to subscribers over
//!   `tokio::sync::broadcast`.
//! - [`ChannelView`] — what a single widget renders from.

pub mod coordinator;

pub use coordinator::{ChannelChange, ChannelCoordinator, ChannelState, ChannelView};
