//! Widget entity, kinds, size classes and channels.
//!
//! A widget is a positioned content block inside a Scape. Its `position` and
//! `is_featured` fields are owned by [`WidgetCollection`](crate::WidgetCollection);
//! everything else can be changed through a [`WidgetPatch`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{MediaId, WidgetId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Every widget occupies the same number of grid rows.
pub const WIDGET_HEIGHT: u8 = 3;

/// Maximum length of a featured caption, in characters.
pub const MAX_FEATURED_CAPTION_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// The closed set of widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Text,
    #[serde(alias = "image")]
    Media,
    Audio,
    Gallery,
    Live,
    Shop,
    Llm,
    Button,
    Header,
}

impl WidgetKind {
    /// All widget kinds, in declaration order.
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::Text,
        WidgetKind::Media,
        WidgetKind::Audio,
        WidgetKind::Gallery,
        WidgetKind::Live,
        WidgetKind::Shop,
        WidgetKind::Llm,
        WidgetKind::Button,
        WidgetKind::Header,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Media => "media",
            WidgetKind::Audio => "audio",
            WidgetKind::Gallery => "gallery",
            WidgetKind::Live => "live",
            WidgetKind::Shop => "shop",
            WidgetKind::Llm => "llm",
            WidgetKind::Button => "button",
            WidgetKind::Header => "header",
        }
    }

    /// Priority of this kind when several widgets could drive one channel.
    ///
    /// Lower numbers win. Headers are unranked and never drive a channel.
    pub fn rank(self) -> Option<u8> {
        match self {
            WidgetKind::Button | WidgetKind::Live => Some(1),
            WidgetKind::Gallery => Some(2),
            WidgetKind::Media | WidgetKind::Audio => Some(3),
            WidgetKind::Text => Some(4),
            WidgetKind::Shop => Some(5),
            WidgetKind::Llm => Some(6),
            WidgetKind::Header => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(WidgetKind::Text),
            "media" | "image" => Ok(WidgetKind::Media),
            "audio" => Ok(WidgetKind::Audio),
            "gallery" => Ok(WidgetKind::Gallery),
            "live" => Ok(WidgetKind::Live),
            "shop" => Ok(WidgetKind::Shop),
            "llm" => Ok(WidgetKind::Llm),
            "button" => Ok(WidgetKind::Button),
            "header" => Ok(WidgetKind::Header),
            other => Err(CoreError::Validation(format!(
                "Unknown widget type '{other}'. Must be one of: {}",
                WidgetKind::ALL.map(WidgetKind::as_str).join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetSize
// ---------------------------------------------------------------------------

/// Column span class of a widget on the three-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WidgetSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl WidgetSize {
    /// Number of grid columns this size occupies.
    pub fn span(self) -> u8 {
        self as u8
    }

    /// Build a size from a column span.
    ///
    /// # Panics
    ///
    /// Panics when `span` is not 1, 2 or 3. An out-of-range size would break
    /// the grid layout, so callers holding untrusted input should use
    /// `WidgetSize::try_from` instead.
    pub fn from_span(span: u8) -> Self {
        match Self::try_from(span) {
            Ok(size) => size,
            Err(err) => panic!("{err}"),
        }
    }
}

impl TryFrom<u8> for WidgetSize {
    type Error = CoreError;

    fn try_from(span: u8) -> Result<Self, Self::Error> {
        match span {
            1 => Ok(WidgetSize::Small),
            2 => Ok(WidgetSize::Medium),
            3 => Ok(WidgetSize::Large),
            other => Err(CoreError::Validation(format!(
                "widget size must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

impl From<WidgetSize> for u8 {
    fn from(size: WidgetSize) -> Self {
        size.span()
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Color channel linking widgets together. Neutral widgets are unlinked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    #[default]
    Neutral,
}

impl Channel {
    /// The tracked color channels in their fixed scan order.
    pub const COLORS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn is_neutral(self) -> bool {
        self == Channel::Neutral
    }

    /// Slot index of a color channel; `None` for neutral.
    pub fn color_index(self) -> Option<usize> {
        match self {
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Neutral => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `null` and a missing field both mean neutral.
fn channel_or_neutral<'de, D>(deserializer: D) -> Result<Channel, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Channel>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A positioned, typed content block within a Scape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub size: WidgetSize,
    #[serde(default)]
    pub position: u32,
    #[serde(default, deserialize_with = "channel_or_neutral")]
    pub channel: Channel,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_caption: Option<String>,
    /// Type-specific payload, opaque to the collection.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub media_ids: Vec<MediaId>,
}

impl Widget {
    /// Create a widget with a fresh UUID and the kind's default size.
    pub fn new(kind: WidgetKind) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), kind)
    }

    /// Create a widget with a caller-chosen id.
    pub fn with_id(id: impl Into<WidgetId>, kind: WidgetKind) -> Self {
        Self {
            id: id.into(),
            kind,
            size: kind.descriptor().default_size,
            position: 0,
            channel: Channel::Neutral,
            is_featured: false,
            featured_caption: None,
            data: serde_json::Map::new(),
            media_ids: Vec::new(),
        }
    }

    pub fn sized(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    pub fn in_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_media<I, M>(mut self, media_ids: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MediaId>,
    {
        self.media_ids = media_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data(mut self, data: serde_json::Map<String, serde_json::Value>) -> Self {
        self.data = data;
        self
    }

    /// Whether `media_id` is one of the media this widget displays.
    pub fn displays(&self, media_id: &str) -> bool {
        self.media_ids.iter().any(|m| m == media_id)
    }

    /// Shallow-merge the supplied patch fields into this widget.
    pub(crate) fn apply(&mut self, patch: WidgetPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(channel) = patch.channel {
            self.channel = channel;
        }
        if let Some(caption) = patch.featured_caption {
            self.featured_caption = caption;
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
        if let Some(media_ids) = patch.media_ids {
            self.media_ids = media_ids;
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetPatch
// ---------------------------------------------------------------------------

/// Partial update for a widget. `None` leaves the field untouched.
///
/// `id`, `position` and `is_featured` are deliberately absent: they are
/// maintained by the collection's structural operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<WidgetKind>,
    #[serde(default)]
    pub size: Option<WidgetSize>,
    #[serde(default)]
    pub channel: Option<Channel>,
    /// Absent leaves the caption alone; an explicit `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub featured_caption: Option<Option<String>>,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub media_ids: Option<Vec<MediaId>>,
}

/// Only called when the field is present, so `null` becomes `Some(None)`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
