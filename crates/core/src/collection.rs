//! Ordered widget collection for one Scape.
//!
//! All structural mutation goes through [`WidgetCollection`] so that, after
//! every operation, positions form the dense sequence `0..len` in vector
//! order and at most one widget is featured.
//!
//! Widget ids are unique within a collection. Unknown widget ids are reported
//! as [`CoreError::NotFound`] and leave the collection untouched. Out-of-range
//! moves are silent no-ops.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::widget::{Channel, Widget, WidgetPatch};

/// Widgets of one Scape, kept sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Widget>", into = "Vec<Widget>")]
pub struct WidgetCollection {
    widgets: Vec<Widget>,
}

impl WidgetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from widgets in any order.
    ///
    /// Widgets are stably sorted by their stored position and renumbered.
    /// If several arrive featured, only the first (by position) stays
    /// featured. A repeated id keeps only its first widget by position.
    pub fn from_widgets(mut widgets: Vec<Widget>) -> Self {
        widgets.sort_by_key(|w| w.position);
        let mut seen_ids = HashSet::new();
        widgets.retain(|w| seen_ids.insert(w.id.clone()));
        let mut seen_featured = false;
        for widget in &mut widgets {
            if widget.is_featured {
                widget.is_featured = !seen_featured;
                seen_featured = true;
            }
        }
        let mut collection = Self { widgets };
        collection.renumber();
        collection
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Widget> {
        self.widgets.iter()
    }

    pub fn as_slice(&self) -> &[Widget] {
        &self.widgets
    }

    /// Widget ids in position order.
    pub fn ids(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.id.as_str()).collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// The featured widget, if any.
    pub fn featured(&self) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.is_featured)
    }

    /// Widgets assigned to `channel`, in position order.
    pub fn in_channel(&self, channel: Channel) -> impl Iterator<Item = &Widget> + '_ {
        self.widgets.iter().filter(move |w| w.channel == channel)
    }

    // -----------------------------------------------------------------------
    // Structural operations
    // -----------------------------------------------------------------------

    /// Append a widget at the end of the collection.
    ///
    /// The widget's position is always set to the current length. A widget
    /// that arrives featured becomes the only featured widget.
    ///
    /// An id already in the collection is a [`CoreError::Conflict`] and
    /// nothing changes.
    pub fn add(&mut self, mut widget: Widget) -> Result<&Widget, CoreError> {
        if self.contains(&widget.id) {
            return Err(CoreError::duplicate_widget(&widget.id));
        }
        if widget.is_featured {
            for other in &mut self.widgets {
                other.is_featured = false;
            }
        }
        widget.position = self.widgets.len() as u32;
        self.widgets.push(widget);
        Ok(&self.widgets[self.widgets.len() - 1])
    }

    /// Remove a widget and close the gap it leaves.
    pub fn remove(&mut self, id: &str) -> Result<Widget, CoreError> {
        let index = self.require(id)?;
        let removed = self.widgets.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Shallow-merge `patch` into the widget with `id`.
    pub fn update(&mut self, id: &str, patch: WidgetPatch) -> Result<&Widget, CoreError> {
        let index = self.require(id)?;
        let widget = &mut self.widgets[index];
        widget.apply(patch);
        Ok(widget)
    }

    /// Swap the widget at `index` with the one above it.
    ///
    /// Returns `false` without changing anything when `index` is 0 or out of
    /// range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.widgets.len() {
            return false;
        }
        self.widgets.swap(index - 1, index);
        self.renumber();
        true
    }

    /// Swap the widget at `index` with the one below it.
    ///
    /// Returns `false` without changing anything when `index` is the last
    /// slot or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.widgets.len() {
            return false;
        }
        self.widgets.swap(index, index + 1);
        self.renumber();
        true
    }

    /// Rebuild the collection in the order given by `ids`.
    ///
    /// Unknown ids and repeats are skipped. Widgets whose id is not listed
    /// are removed and returned in their previous order, so callers that
    /// want to keep every widget must pass a full permutation.
    pub fn reorder<I, S>(&mut self, ids: I) -> Vec<Widget>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index: HashMap<String, usize> = self
            .widgets
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.clone(), i))
            .collect();
        let mut slots: Vec<Option<Widget>> =
            std::mem::take(&mut self.widgets).into_iter().map(Some).collect();

        for id in ids {
            if let Some(&i) = index.get(id.as_ref()) {
                if let Some(widget) = slots[i].take() {
                    self.widgets.push(widget);
                }
            }
        }
        self.renumber();

        slots.into_iter().flatten().collect()
    }

    /// Make `id` the only featured widget.
    ///
    /// With `Some(caption)` the target's caption is replaced; with `None` it
    /// is left as it was. Other widgets' captions are never touched.
    pub fn set_featured(&mut self, id: &str, caption: Option<String>) -> Result<(), CoreError> {
        let target = self.require(id)?;
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            widget.is_featured = i == target;
        }
        if let Some(caption) = caption {
            self.widgets[target].featured_caption = Some(caption);
        }
        Ok(())
    }

    /// Unfeature every widget. Captions are kept.
    pub fn clear_featured(&mut self) {
        for widget in &mut self.widgets {
            widget.is_featured = false;
        }
    }

    /// Assign a widget to a channel. Channel coordinator state is untouched.
    pub fn set_channel(&mut self, id: &str, channel: Channel) -> Result<(), CoreError> {
        let index = self.require(id)?;
        self.widgets[index].channel = channel;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn require(&self, id: &str) -> Result<usize, CoreError> {
        self.index_of(id)
            .ok_or_else(|| CoreError::widget_not_found(id))
    }

    fn renumber(&mut self) {
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            widget.position = i as u32;
        }
    }
}

impl From<Vec<Widget>> for WidgetCollection {
    fn from(widgets: Vec<Widget>) -> Self {
        Self::from_widgets(widgets)
    }
}

impl From<WidgetCollection> for Vec<Widget> {
    fn from(collection: WidgetCollection) -> Self {
        collection.widgets
    }
}

impl<'a> IntoIterator for &'a WidgetCollection {
    type Item = &'a Widget;
    type IntoIter = std::slice::Iter<'a, Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
