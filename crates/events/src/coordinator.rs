//! Per-session channel coordinator.
//!
//! [`ChannelCoordinator`] is the single source of truth for which widget and
//! media currently drive each color channel. Writes are last-writer-wins:
//! hierarchy rank is never consulted here (see
//! `genscape_core::hierarchy::driving_widget` for the read-side ranking).
//!
//! Every effective mutation is pushed to subscribers as a [`ChannelChange`]
//! over a `tokio::sync::broadcast` channel. Operations on the neutral channel
//! are no-ops and publish nothing.

use chrono::{DateTime, Utc};
use genscape_core::types::{MediaId, WidgetId};
use genscape_core::Channel;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ChannelState
// ---------------------------------------------------------------------------

/// Driving widget and media for one color channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelState {
    pub driving_widget_id: Option<WidgetId>,
    pub driving_media_id: Option<MediaId>,
}

impl ChannelState {
    pub fn is_driven(&self) -> bool {
        self.driving_widget_id.is_some()
    }
}

/// What a widget subscribed to a channel gets to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelView {
    /// True iff the asking widget is the channel's driving widget.
    pub is_active: bool,
    pub active_driving_media: Option<MediaId>,
}

// ---------------------------------------------------------------------------
// ChannelChange
// ---------------------------------------------------------------------------

/// Notification pushed after a channel's state changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelChange {
    pub channel: Channel,
    /// State of the channel after the change.
    pub state: ChannelState,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// ChannelCoordinator
// ---------------------------------------------------------------------------

/// Default buffer capacity for the change broadcast.
pub const DEFAULT_CAPACITY: usize = 64;

/// Channel state for one editing or viewing session.
///
/// Created empty when the session starts and dropped with it; only the
/// widgets' channel assignments are ever persisted.
#[derive(Debug)]
pub struct ChannelCoordinator {
    slots: [ChannelState; 3],
    sender: broadcast::Sender<ChannelChange>,
}

impl ChannelCoordinator {
    /// Create a coordinator whose broadcast buffers `capacity` changes.
    ///
    /// Slow subscribers that fall further behind observe
    /// `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            slots: Default::default(),
            sender,
        }
    }

    /// Subscribe to every subsequent channel change.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelChange> {
        self.sender.subscribe()
    }

    /// Record that `widget_id` now drives `channel` with `media_id`.
    ///
    /// Unconditionally overwrites the previous driver. No-op for neutral.
    pub fn set_driving_media(
        &mut self,
        channel: Channel,
        widget_id: impl Into<WidgetId>,
        media_id: impl Into<MediaId>,
    ) {
        let Some(index) = channel.color_index() else {
            return;
        };
        let state = ChannelState {
            driving_widget_id: Some(widget_id.into()),
            driving_media_id: Some(media_id.into()),
        };
        tracing::debug!(
            %channel,
            widget_id = state.driving_widget_id.as_deref(),
            media_id = state.driving_media_id.as_deref(),
            "Channel driving media set"
        );
        self.slots[index] = state;
        self.notify(channel, index);
    }

    /// Reset a channel to undriven. No-op for neutral.
    pub fn clear_channel(&mut self, channel: Channel) {
        let Some(index) = channel.color_index() else {
            return;
        };
        tracing::debug!(%channel, "Channel cleared");
        self.slots[index] = ChannelState::default();
        self.notify(channel, index);
    }

    /// Clear every channel currently driven by `widget_id`.
    ///
    /// Returns the channels that were cleared.
    pub fn release_widget(&mut self, widget_id: &str) -> Vec<Channel> {
        let driven: Vec<Channel> = Channel::COLORS
            .into_iter()
            .filter(|c| self.state(*c).driving_widget_id.as_deref() == Some(widget_id))
            .collect();
        for channel in &driven {
            self.clear_channel(*channel);
        }
        driven
    }

    /// First driven channel in red, green, blue order.
    pub fn active_channel(&self) -> Option<Channel> {
        Channel::COLORS
            .into_iter()
            .find(|c| self.state(*c).is_driven())
    }

    /// Current state of `channel`. Neutral is always undriven.
    pub fn state(&self, channel: Channel) -> &ChannelState {
        static UNTRACKED: ChannelState = ChannelState {
            driving_widget_id: None,
            driving_media_id: None,
        };
        match channel.color_index() {
            Some(index) => &self.slots[index],
            None => &UNTRACKED,
        }
    }

    /// Media currently authoritative for `channel`.
    pub fn driving_media(&self, channel: Channel) -> Option<&str> {
        self.state(channel).driving_media_id.as_deref()
    }

    /// Widget currently driving `channel`.
    pub fn driving_widget(&self, channel: Channel) -> Option<&str> {
        self.state(channel).driving_widget_id.as_deref()
    }

    /// The view a widget in `channel` renders from.
    pub fn view(&self, widget_id: &str, channel: Channel) -> ChannelView {
        let state = self.state(channel);
        ChannelView {
            is_active: state.driving_widget_id.as_deref() == Some(widget_id),
            active_driving_media: state.driving_media_id.clone(),
        }
    }

    fn notify(&self, channel: Channel, index: usize) {
        // A SendError only means nobody is listening.
        let _ = self.sender.send(ChannelChange {
            channel,
            state: self.slots[index].clone(),
            timestamp: Utc::now(),
        });
    }
}

impl Default for ChannelCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn starts_with_every_channel_undriven() {
        let coordinator = ChannelCoordinator::default();
        for channel in Channel::COLORS {
            assert_eq!(coordinator.state(channel), &ChannelState::default());
        }
        assert!(coordinator.active_channel().is_none());
    }

    #[test]
    fn last_write_wins_regardless_of_rank() {
        let mut coordinator = ChannelCoordinator::default();
        // A button outranks a text widget, but the later write still wins.
        coordinator.set_driving_media(Channel::Red, "button", "m1");
        coordinator.set_driving_media(Channel::Red, "text", "m2");

        assert_eq!(coordinator.driving_widget(Channel::Red), Some("text"));
        assert_eq!(coordinator.driving_media(Channel::Red), Some("m2"));
    }

    #[test]
    fn neutral_operations_are_noops() {
        let mut coordinator = ChannelCoordinator::default();
        let mut rx = coordinator.subscribe();
        coordinator.set_driving_media(Channel::Blue, "w1", "m1");
        let _ = rx.try_recv();

        coordinator.set_driving_media(Channel::Neutral, "w2", "m2");
        coordinator.clear_channel(Channel::Neutral);

        assert_no_change(&mut rx);
        assert_eq!(coordinator.driving_media(Channel::Neutral), None);
        assert_eq!(coordinator.driving_widget(Channel::Blue), Some("w1"));
        assert_eq!(coordinator.driving_media(Channel::Blue), Some("m1"));
        assert_eq!(coordinator.active_channel(), Some(Channel::Blue));
    }

    #[test]
    fn clear_resets_both_fields() {
        let mut coordinator = ChannelCoordinator::default();
        coordinator.set_driving_media(Channel::Green, "w1", "m1");
        coordinator.clear_channel(Channel::Green);
        assert_eq!(coordinator.state(Channel::Green), &ChannelState::default());
    }

    #[test]
    fn active_channel_scans_red_green_blue() {
        let mut coordinator = ChannelCoordinator::default();
        coordinator.set_driving_media(Channel::Blue, "b", "mb");
        coordinator.set_driving_media(Channel::Green, "g", "mg");
        assert_eq!(coordinator.active_channel(), Some(Channel::Green));

        coordinator.set_driving_media(Channel::Red, "r", "mr");
        assert_eq!(coordinator.active_channel(), Some(Channel::Red));

        coordinator.clear_channel(Channel::Red);
        coordinator.clear_channel(Channel::Green);
        assert_eq!(coordinator.active_channel(), Some(Channel::Blue));
    }

    #[test]
    fn view_marks_only_the_driver_active() {
        let mut coordinator = ChannelCoordinator::default();
        coordinator.set_driving_media(Channel::Red, "driver", "m1");

        let driver = coordinator.view("driver", Channel::Red);
        assert!(driver.is_active);
        assert_eq!(driver.active_driving_media.as_deref(), Some("m1"));

        let follower = coordinator.view("follower", Channel::Red);
        assert!(!follower.is_active);
        assert_eq!(follower.active_driving_media.as_deref(), Some("m1"));

        let neutral = coordinator.view("driver", Channel::Neutral);
        assert_eq!(neutral, ChannelView::default());
    }

    #[test]
    fn release_widget_clears_only_its_channels() {
        let mut coordinator = ChannelCoordinator::default();
        coordinator.set_driving_media(Channel::Red, "w1", "m1");
        coordinator.set_driving_media(Channel::Green, "w2", "m2");
        coordinator.set_driving_media(Channel::Blue, "w1", "m3");

        let cleared = coordinator.release_widget("w1");

        assert_eq!(cleared, vec![Channel::Red, Channel::Blue]);
        assert!(!coordinator.state(Channel::Red).is_driven());
        assert_eq!(coordinator.driving_widget(Channel::Green), Some("w2"));
        assert!(!coordinator.state(Channel::Blue).is_driven());
    }

    #[tokio::test]
    async fn subscribers_receive_each_change() {
        let mut coordinator = ChannelCoordinator::default();
        let mut rx1 = coordinator.subscribe();
        let mut rx2 = coordinator.subscribe();

        coordinator.set_driving_media(Channel::Red, "w1", "m1");
        coordinator.clear_channel(Channel::Red);

        for rx in [&mut rx1, &mut rx2] {
            let set = rx.recv().await.expect("should receive set");
            assert_eq!(set.channel, Channel::Red);
            assert_eq!(set.state.driving_media_id.as_deref(), Some("m1"));

            let cleared = rx.recv().await.expect("should receive clear");
            assert_eq!(cleared.state, ChannelState::default());
        }
    }

    #[test]
    fn mutation_without_subscribers_does_not_panic() {
        let mut coordinator = ChannelCoordinator::new(1);
        coordinator.set_driving_media(Channel::Red, "w1", "m1");
        coordinator.set_driving_media(Channel::Red, "w2", "m2");
        assert_eq!(coordinator.driving_widget(Channel::Red), Some("w2"));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut coordinator = ChannelCoordinator::new(0);
        let mut rx = coordinator.subscribe();
        coordinator.set_driving_media(Channel::Green, "w1", "m1");
        assert!(rx.try_recv().is_ok());
    }

    fn assert_no_change(rx: &mut broadcast::Receiver<ChannelChange>) {
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
