/// Widget identifiers are client-generated strings (UUID v4 text by default).
pub type WidgetId = String;

/// Opaque reference to a media item owned by the media service.
pub type MediaId = String;

/// Scape identifiers are assigned by the persistence service.
pub type ScapeId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
