//! The Scape aggregate: the unit exchanged with the persistence service.

use serde::{Deserialize, Serialize};

use crate::collection::WidgetCollection;
use crate::types::{MediaId, ScapeId, Timestamp, WidgetId};
use crate::validation::{validate_scape, ScapeValidation};
use crate::widget::Widget;

/// Who can see a published Scape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
}

/// A user-authored content page composed of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scape {
    /// Assigned by the persistence service on first save.
    pub id: Option<ScapeId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner: Option<MediaId>,
    #[serde(default)]
    pub widgets: WidgetCollection,
    #[serde(default)]
    pub feature_widget_id: Option<WidgetId>,
    #[serde(default)]
    pub tagline: String,
    pub is_draft: bool,
    #[serde(default)]
    pub visibility: Visibility,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Scape {
    /// A new, unsaved draft with no widgets.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            banner: None,
            widgets: WidgetCollection::new(),
            feature_widget_id: None,
            tagline: String::new(),
            is_draft: true,
            visibility: Visibility::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The widget referenced by `feature_widget_id`, if it exists.
    pub fn feature_widget(&self) -> Option<&Widget> {
        self.feature_widget_id
            .as_deref()
            .and_then(|id| self.widgets.get_by_id(id))
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn validate(&self) -> ScapeValidation {
        validate_scape(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn new_scape_is_an_empty_draft() {
        let scape = Scape::new("My Scape");
        assert!(scape.id.is_none());
        assert!(scape.is_draft);
        assert!(scape.widgets.is_empty());
        assert_eq!(scape.visibility, Visibility::Public);
        assert_eq!(scape.created_at, scape.updated_at);
    }

    #[test]
    fn feature_widget_resolves_only_existing_ids() {
        let mut scape = Scape::new("My Scape");
        scape.widgets.add(Widget::with_id("w1", WidgetKind::Text)).unwrap();

        scape.feature_widget_id = Some("w1".into());
        assert_eq!(scape.feature_widget().unwrap().id, "w1");

        scape.feature_widget_id = Some("gone".into());
        assert!(scape.feature_widget().is_none());
    }

    #[test]
    fn serializes_with_app_field_names() {
        let mut scape = Scape::new("My Scape");
        scape.widgets.add(Widget::with_id("w1", WidgetKind::Text)).unwrap();
        scape.feature_widget_id = Some("w1".into());

        let value = serde_json::to_value(&scape).unwrap();
        assert_eq!(value["featureWidgetId"], "w1");
        assert_eq!(value["isDraft"], true);
        assert_eq!(value["visibility"], "public");
        assert_eq!(value["widgets"][0]["id"], "w1");

        let back: Scape = serde_json::from_value(value).unwrap();
        assert_eq!(back, scape);
    }
}
