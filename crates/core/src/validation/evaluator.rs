//! Scape rule evaluator — pure logic, every rule runs independently.

use super::rules::{
    ScapeValidation, Severity, Violation, FORBIDDEN_TITLE_CHARS, MAX_TAGLINE_CHARS,
    MAX_TITLE_CHARS, MIN_TITLE_CHARS,
};
use crate::collection::WidgetCollection;
use crate::scape::Scape;
use crate::widget::{Widget, MAX_FEATURED_CAPTION_CHARS};

/// Validate a Scape's current editor state.
pub fn validate_scape(scape: &Scape) -> ScapeValidation {
    evaluate(
        &scape.title,
        &scape.widgets,
        scape.feature_widget_id.as_deref(),
        &scape.tagline,
    )
}

/// Evaluate all rules and collect every violation.
pub fn evaluate(
    title: &str,
    widgets: &WidgetCollection,
    feature_widget_id: Option<&str>,
    tagline: &str,
) -> ScapeValidation {
    let title_errors = check_title(title);
    let publish_errors = check_publish_fields(widgets, feature_widget_id, tagline);
    let can_save_draft = title_errors.is_empty();
    let publish_ready = publish_errors.is_empty();

    let mut errors = title_errors;
    if widgets.is_empty() {
        errors.push(Violation::new(
            "widgets",
            "min_count",
            "Add at least one widget",
        ));
    }
    errors.extend(publish_errors);

    let mut warnings = Vec::new();
    for (severity, violation) in widgets.iter().flat_map(check_widget) {
        match severity {
            Severity::Error => errors.push(violation),
            Severity::Warning => warnings.push(violation),
        }
    }

    let is_valid = errors.is_empty();
    ScapeValidation {
        is_valid,
        errors,
        warnings,
        can_save_draft,
        can_publish: can_save_draft && publish_ready && is_valid,
    }
}

fn check_title(title: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let trimmed = title.trim();

    if trimmed.is_empty() {
        violations.push(Violation::new("title", "required", "Title is required"));
        return violations;
    }

    let length = trimmed.chars().count();
    if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&length) {
        violations.push(Violation::new(
            "title",
            "length",
            format!("Title must be between {MIN_TITLE_CHARS} and {MAX_TITLE_CHARS} characters"),
        ));
    }

    if trimmed.contains(FORBIDDEN_TITLE_CHARS) {
        let listed: Vec<String> = FORBIDDEN_TITLE_CHARS.iter().map(char::to_string).collect();
        violations.push(Violation::new(
            "title",
            "invalid_characters",
            format!("Title cannot contain any of: {}", listed.join(" ")),
        ));
    }

    violations
}

fn check_publish_fields(
    widgets: &WidgetCollection,
    feature_widget_id: Option<&str>,
    tagline: &str,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    match feature_widget_id {
        None => violations.push(Violation::new(
            "featureWidgetId",
            "required",
            "Select a feature widget to publish",
        )),
        Some(id) if !widgets.contains(id) => violations.push(Violation::new(
            "featureWidgetId",
            "exists",
            "Feature widget must be one of this Scape's widgets",
        )),
        Some(_) => {}
    }

    let tagline = tagline.trim();
    if tagline.is_empty() {
        violations.push(Violation::new(
            "tagline",
            "required",
            "Add a tagline to publish",
        ));
    } else if tagline.chars().count() > MAX_TAGLINE_CHARS {
        violations.push(Violation::new(
            "tagline",
            "max_length",
            format!("Tagline must be {MAX_TAGLINE_CHARS} characters or fewer"),
        ));
    }

    violations
}

fn check_widget(widget: &Widget) -> Vec<(Severity, Violation)> {
    let mut found = Vec::new();
    let field = format!("widgets.{}", widget.id);
    let descriptor = widget.kind.descriptor();

    if widget.is_featured {
        let too_long = widget
            .featured_caption
            .as_deref()
            .is_some_and(|c| c.chars().count() > MAX_FEATURED_CAPTION_CHARS);
        if too_long {
            found.push((
                Severity::Error,
                Violation::new(
                    format!("{field}.featuredCaption"),
                    "max_length",
                    format!(
                        "Featured caption must be {MAX_FEATURED_CAPTION_CHARS} characters or fewer"
                    ),
                ),
            ));
        }
    }

    let media_count = widget.media_ids.len();
    if descriptor.accepts_media() && media_count == 0 {
        found.push((
            Severity::Warning,
            Violation::new(
                format!("{field}.mediaIds"),
                "required",
                format!("{} widget has no media yet", descriptor.label),
            ),
        ));
    } else if media_count > descriptor.max_media {
        let message = if descriptor.accepts_media() {
            format!(
                "{} widget shows at most {} media items",
                descriptor.label, descriptor.max_media
            )
        } else {
            format!("{} widget does not display media", descriptor.label)
        };
        found.push((
            Severity::Warning,
            Violation::new(format!("{field}.mediaIds"), "max_count", message),
        ));
    }

    found
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
