//! Read-side hierarchy queries.
//!
//! These rank widgets by [`WidgetKind::rank`] to decide display order and
//! which widget *should* drive a channel. They are independent of the
//! write-side channel coordinator, which is last-write-wins.

use std::cmp::Ordering;

use crate::widget::{Channel, Widget};

fn rank_key(widget: &Widget) -> u8 {
    widget.kind.rank().unwrap_or(u8::MAX)
}

/// Order two widgets by rank, then by position. Unranked kinds sort last.
pub fn compare_hierarchy(a: &Widget, b: &Widget) -> Ordering {
    rank_key(a)
        .cmp(&rank_key(b))
        .then_with(|| a.position.cmp(&b.position))
}

/// Widgets sorted from highest to lowest priority.
pub fn sort_by_hierarchy<'a, I>(widgets: I) -> Vec<&'a Widget>
where
    I: IntoIterator<Item = &'a Widget>,
{
    let mut sorted: Vec<&Widget> = widgets.into_iter().collect();
    sorted.sort_by(|a, b| compare_hierarchy(a, b));
    sorted
}

/// The widget that ranks highest within `channel`.
///
/// Returns `None` for the neutral channel, for an empty channel, and when
/// only unranked widgets are present.
pub fn driving_widget<'a, I>(widgets: I, channel: Channel) -> Option<&'a Widget>
where
    I: IntoIterator<Item = &'a Widget>,
{
    if channel.is_neutral() {
        return None;
    }
    widgets
        .into_iter()
        .filter(|w| w.channel == channel && w.kind.rank().is_some())
        .min_by(|a, b| compare_hierarchy(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    fn at(id: &str, kind: WidgetKind, position: u32, channel: Channel) -> Widget {
        let mut w = Widget::with_id(id, kind).in_channel(channel);
        w.position = position;
        w
    }

    #[test]
    fn sorts_by_rank_then_position() {
        let widgets = vec![
            at("text", WidgetKind::Text, 0, Channel::Neutral),
            at("header", WidgetKind::Header, 1, Channel::Neutral),
            at("gallery", WidgetKind::Gallery, 2, Channel::Neutral),
            at("live", WidgetKind::Live, 3, Channel::Neutral),
            at("button", WidgetKind::Button, 4, Channel::Neutral),
        ];

        let ids: Vec<&str> = sort_by_hierarchy(&widgets)
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();

        assert_eq!(ids, vec!["live", "button", "gallery", "text", "header"]);
    }

    #[test]
    fn driving_widget_prefers_lower_rank() {
        let widgets = vec![
            at("img", WidgetKind::Media, 0, Channel::Red),
            at("gal", WidgetKind::Gallery, 1, Channel::Red),
            at("btn", WidgetKind::Button, 2, Channel::Blue),
        ];

        let driver = driving_widget(&widgets, Channel::Red).unwrap();
        assert_eq!(driver.id, "gal");
    }

    #[test]
    fn driving_widget_breaks_ties_by_position() {
        let widgets = vec![
            at("second", WidgetKind::Audio, 5, Channel::Green),
            at("first", WidgetKind::Media, 2, Channel::Green),
        ];
        assert_eq!(driving_widget(&widgets, Channel::Green).unwrap().id, "first");
    }

    #[test]
    fn neutral_and_header_never_drive() {
        let widgets = vec![
            at("n", WidgetKind::Button, 0, Channel::Neutral),
            at("h", WidgetKind::Header, 1, Channel::Red),
        ];
        assert!(driving_widget(&widgets, Channel::Neutral).is_none());
        assert!(driving_widget(&widgets, Channel::Red).is_none());
    }
}
