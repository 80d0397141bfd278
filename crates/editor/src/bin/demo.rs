//! Builds a small Scape end to end against the in-memory store.

use genscape_core::layout::row_count;
use genscape_core::{Channel, Widget, WidgetKind, WidgetSize};
use genscape_editor::config::EditorConfig;
use genscape_editor::{telemetry, EditorSession, InMemoryScapeStore, SaveOutcome, ScapeStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = EditorConfig::from_env()?;

    // --- Tracing ---
    telemetry::init(&config)?;
    tracing::info!(
        channel_capacity = config.channel_capacity,
        media_url_ttl_secs = config.media_url_ttl.as_secs(),
        "Loaded editor configuration"
    );

    let store = InMemoryScapeStore::new();
    let mut session = EditorSession::new("Golden Hour", &config);
    let mut changes = session.subscribe();

    // --- Compose ---
    session.add_widget(Widget::new(WidgetKind::Header))?;
    let gallery = session.add_widget(
        Widget::new(WidgetKind::Gallery)
            .in_channel(Channel::Red)
            .with_media(["sunset-1", "sunset-2", "sunset-3"]),
    )?;
    let caption = session.add_widget(
        Widget::new(WidgetKind::Text)
            .sized(WidgetSize::Small)
            .in_channel(Channel::Red),
    )?;
    session.add_widget(Widget::new(WidgetKind::Audio).with_media(["ambient-loop"]))?;

    session.select_media(&gallery, "sunset-2")?;
    while let Ok(change) = changes.try_recv() {
        tracing::info!(
            channel = %change.channel,
            media_id = change.state.driving_media_id.as_deref(),
            "Channel changed"
        );
    }
    let view = session.channel_view(&caption)?;
    tracing::info!(
        is_active = view.is_active,
        media_id = view.active_driving_media.as_deref(),
        "Caption widget follows the red channel"
    );

    // --- Draft ---
    report("Draft", session.save_draft(&store).await?);

    // --- Publish ---
    session.set_featured(&gallery, Some("Last light over the bay".into()))?;
    session.set_tagline("Five minutes of gold");
    let outcome = session.publish(&store).await?;
    if let SaveOutcome::Saved(id) = &outcome {
        let is_draft = store.fetch(*id).await?.map(|s| s.is_draft);
        tracing::info!(is_draft, "Fetched published Scape");
    }
    report("Publish", outcome);

    // --- Layout ---
    let placements = session.layout();
    for placement in &placements {
        tracing::info!(
            widget_id = %placement.widget_id,
            row = placement.row,
            column = placement.column,
            span = placement.span,
            "Placed widget"
        );
    }
    tracing::info!(rows = row_count(&placements), "Layout computed");

    Ok(())
}

fn report(action: &str, outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved(id) => tracing::info!(action, scape_id = %id, "Saved"),
        SaveOutcome::Blocked(validation) => {
            for message in validation.messages() {
                tracing::warn!(action, detail = %message, "Blocked");
            }
        }
    }
}
