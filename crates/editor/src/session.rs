//! One Scape editing session.
//!
//! [`EditorSession`] owns the Scape being edited and the channel coordinator
//! for the session. Widget mutations go through the session so that state
//! spread across the two stays consistent:
//!
//! - a widget that leaves the collection or changes channel stops driving
//!   any channel;
//! - the featured flag and the Scape's `feature_widget_id` always agree.

use genscape_core::hierarchy;
use genscape_core::layout::{compute_grid, GridPlacement};
use genscape_core::types::{MediaId, ScapeId, WidgetId};
use genscape_core::validation::ScapeValidation;
use genscape_core::{
    Channel, CoreError, Scape, Visibility, Widget, WidgetCollection, WidgetPatch,
};
use genscape_events::{ChannelChange, ChannelCoordinator, ChannelView};
use tokio::sync::broadcast;

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::media::{MediaDescriptor, MediaError, MediaResolver};
use crate::store::ScapeStore;

/// Result of a save or publish attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The Scape was persisted under this id.
    Saved(ScapeId),
    /// Validation blocked the save; nothing was persisted.
    Blocked(ScapeValidation),
}

/// Editing state for one Scape.
#[derive(Debug)]
pub struct EditorSession {
    scape: Scape,
    channels: ChannelCoordinator,
}

impl EditorSession {
    /// Start editing a new, empty draft.
    pub fn new(title: impl Into<String>, config: &EditorConfig) -> Self {
        Self::open(Scape::new(title), config)
    }

    /// Start editing an existing Scape.
    ///
    /// Channel state starts empty. If the Scape names a feature widget that
    /// exists, that widget becomes the featured one. Otherwise a dangling
    /// reference is dropped and an already featured widget, if any, is
    /// adopted as the feature widget.
    pub fn open(mut scape: Scape, config: &EditorConfig) -> Self {
        if let Some(id) = scape.feature_widget_id.take() {
            if scape.widgets.set_featured(&id, None).is_ok() {
                scape.feature_widget_id = Some(id);
            } else {
                tracing::warn!(widget_id = %id, "Dropping missing feature widget reference");
            }
        }
        if scape.feature_widget_id.is_none() {
            scape.feature_widget_id = scape.widgets.featured().map(|w| w.id.clone());
        }
        tracing::debug!(
            scape_id = ?scape.id,
            widgets = scape.widgets.len(),
            "Editor session opened"
        );
        Self {
            scape,
            channels: ChannelCoordinator::new(config.channel_capacity),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn scape(&self) -> &Scape {
        &self.scape
    }

    /// End the session, keeping only the Scape. Channel state is dropped.
    pub fn into_scape(self) -> Scape {
        self.scape
    }

    pub fn widgets(&self) -> &WidgetCollection {
        &self.scape.widgets
    }

    pub fn channels(&self) -> &ChannelCoordinator {
        &self.channels
    }

    /// Subscribe to channel changes for this session.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelChange> {
        self.channels.subscribe()
    }

    // -----------------------------------------------------------------------
    // Widget operations
    // -----------------------------------------------------------------------

    /// Append a widget, returning its id.
    pub fn add_widget(&mut self, widget: Widget) -> EditorResult<WidgetId> {
        let added = self.scape.widgets.add(widget)?;
        let id = added.id.clone();
        if added.is_featured {
            self.scape.feature_widget_id = Some(id.clone());
        }
        tracing::debug!(widget_id = %id, kind = %added.kind, "Widget added");
        self.scape.touch();
        Ok(id)
    }

    pub fn remove_widget(&mut self, id: &str) -> EditorResult<Widget> {
        let removed = self.scape.widgets.remove(id)?;
        self.forget(&removed);
        tracing::debug!(widget_id = %id, "Widget removed");
        self.scape.touch();
        Ok(removed)
    }

    /// Shallow-merge `patch` into a widget.
    ///
    /// A channel change releases any channel the widget was driving.
    pub fn update_widget(&mut self, id: &str, patch: WidgetPatch) -> EditorResult<()> {
        let previous = self.channel_of(id)?;
        let updated = self.scape.widgets.update(id, patch)?;
        if updated.channel != previous {
            self.channels.release_widget(id);
        }
        self.scape.touch();
        Ok(())
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        let moved = self.scape.widgets.move_up(index);
        if moved {
            self.scape.touch();
        }
        moved
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        let moved = self.scape.widgets.move_down(index);
        if moved {
            self.scape.touch();
        }
        moved
    }

    /// Reorder widgets; any widget not named in `ids` is removed.
    ///
    /// Returns the removed widgets.
    pub fn reorder<I, S>(&mut self, ids: I) -> Vec<Widget>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dropped = self.scape.widgets.reorder(ids);
        for widget in &dropped {
            self.forget(widget);
        }
        if !dropped.is_empty() {
            tracing::warn!(dropped = dropped.len(), "Reorder dropped widgets");
        }
        self.scape.touch();
        dropped
    }

    /// Make `id` the Scape's featured widget.
    pub fn set_featured(&mut self, id: &str, caption: Option<String>) -> EditorResult<()> {
        self.scape.widgets.set_featured(id, caption)?;
        self.scape.feature_widget_id = Some(id.to_owned());
        self.scape.touch();
        Ok(())
    }

    pub fn clear_featured(&mut self) {
        self.scape.widgets.clear_featured();
        self.scape.feature_widget_id = None;
        self.scape.touch();
    }

    /// Move a widget to another channel, releasing what it drove before.
    pub fn set_channel(&mut self, id: &str, channel: Channel) -> EditorResult<()> {
        let previous = self.channel_of(id)?;
        self.scape.widgets.set_channel(id, channel)?;
        if previous != channel {
            self.channels.release_widget(id);
        }
        self.scape.touch();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Channels
    // -----------------------------------------------------------------------

    /// The user picked `media_id` on a widget: drive the widget's channel.
    ///
    /// Neutral widgets don't drive anything. The media must be one the widget
    /// displays.
    pub fn select_media(&mut self, widget_id: &str, media_id: &str) -> EditorResult<()> {
        let widget = self.require(widget_id)?;
        if !widget.displays(media_id) {
            return Err(CoreError::Validation(format!(
                "widget {widget_id} does not display media {media_id}"
            ))
            .into());
        }
        let channel = widget.channel;
        self.channels.set_driving_media(channel, widget_id, media_id);
        Ok(())
    }

    /// Channel state as seen by one widget.
    pub fn channel_view(&self, widget_id: &str) -> EditorResult<ChannelView> {
        let widget = self.require(widget_id)?;
        Ok(self.channels.view(&widget.id, widget.channel))
    }

    /// The widget that would drive `channel` by hierarchy rank.
    ///
    /// This is advisory: the coordinator itself is last-write-wins.
    pub fn ranked_driver(&self, channel: Channel) -> Option<&Widget> {
        hierarchy::driving_widget(&self.scape.widgets, channel)
    }

    /// Resolve the media currently driving `channel`.
    pub async fn resolve_driving_media(
        &self,
        channel: Channel,
        resolver: &dyn MediaResolver,
    ) -> Result<Option<MediaDescriptor>, MediaError> {
        match self.channels.driving_media(channel) {
            Some(media_id) => resolver.resolve(media_id).await,
            None => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Scape metadata
    // -----------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.scape.title = title.into();
        self.scape.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.scape.description = description.into();
        self.scape.touch();
    }

    pub fn set_tagline(&mut self, tagline: impl Into<String>) {
        self.scape.tagline = tagline.into();
        self.scape.touch();
    }

    pub fn set_banner(&mut self, banner: Option<MediaId>) {
        self.scape.banner = banner;
        self.scape.touch();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.scape.visibility = visibility;
        self.scape.touch();
    }

    // -----------------------------------------------------------------------
    // Layout, validation and persistence
    // -----------------------------------------------------------------------

    pub fn layout(&self) -> Vec<GridPlacement> {
        compute_grid(&self.scape.widgets)
    }

    pub fn validate(&self) -> ScapeValidation {
        self.scape.validate()
    }

    /// Save the Scape as a draft if its title allows it.
    pub async fn save_draft(&mut self, store: &dyn ScapeStore) -> EditorResult<SaveOutcome> {
        let validation = self.validate();
        if !validation.can_save_draft {
            tracing::info!(errors = validation.errors.len(), "Draft save blocked");
            return Ok(SaveOutcome::Blocked(validation));
        }
        self.persist(store, true).await
    }

    /// Publish the Scape if every publish rule passes.
    pub async fn publish(&mut self, store: &dyn ScapeStore) -> EditorResult<SaveOutcome> {
        let validation = self.validate();
        if !validation.can_publish {
            tracing::info!(errors = validation.errors.len(), "Publish blocked");
            return Ok(SaveOutcome::Blocked(validation));
        }
        self.persist(store, false).await
    }

    async fn persist(&mut self, store: &dyn ScapeStore, is_draft: bool) -> EditorResult<SaveOutcome> {
        let mut snapshot = self.scape.clone();
        snapshot.is_draft = is_draft;
        snapshot.touch();

        let id = store.save(&snapshot).await?;
        snapshot.id = Some(id);
        self.scape = snapshot;

        tracing::info!(scape_id = %id, is_draft, "Scape saved");
        Ok(SaveOutcome::Saved(id))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn require(&self, id: &str) -> Result<&Widget, CoreError> {
        self.scape
            .widgets
            .get_by_id(id)
            .ok_or_else(|| CoreError::widget_not_found(id))
    }

    fn channel_of(&self, id: &str) -> Result<Channel, CoreError> {
        self.require(id).map(|w| w.channel)
    }

    /// Drop every cross-reference to a widget that left the collection.
    fn forget(&mut self, widget: &Widget) {
        self.channels.release_widget(&widget.id);
        if self.scape.feature_widget_id.as_deref() == Some(widget.id.as_str()) {
            self.scape.feature_widget_id = None;
        }
    }
}
