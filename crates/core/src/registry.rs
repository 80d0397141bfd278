//! Static per-kind widget metadata.
//!
//! Rendering components are looked up by an exhaustive `match` on
//! [`WidgetKind`], so adding a kind is a compile error until every table here
//! handles it.

use crate::widget::{WidgetKind, WidgetSize};

/// Editor-facing description of one widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub kind: WidgetKind,
    /// Human-readable name shown in the widget picker.
    pub label: &'static str,
    /// Size given to a freshly created widget.
    pub default_size: WidgetSize,
    /// Maximum number of media references the kind displays. Zero means the
    /// kind does not display media at all.
    pub max_media: usize,
}

impl WidgetDescriptor {
    pub fn accepts_media(&self) -> bool {
        self.max_media > 0
    }
}

impl WidgetKind {
    pub fn descriptor(self) -> WidgetDescriptor {
        let (label, default_size, max_media) = match self {
            WidgetKind::Text => ("Text", WidgetSize::Medium, 0),
            WidgetKind::Media => ("Image", WidgetSize::Medium, 10),
            WidgetKind::Audio => ("Audio", WidgetSize::Small, 1),
            WidgetKind::Gallery => ("Gallery", WidgetSize::Large, 50),
            WidgetKind::Live => ("Live", WidgetSize::Large, 1),
            WidgetKind::Shop => ("Shop", WidgetSize::Medium, 20),
            WidgetKind::Llm => ("AI Chat", WidgetSize::Medium, 0),
            WidgetKind::Button => ("Button", WidgetSize::Small, 0),
            WidgetKind::Header => ("Header", WidgetSize::Large, 0),
        };
        WidgetDescriptor {
            kind: self,
            label,
            default_size,
            max_media,
        }
    }
}
