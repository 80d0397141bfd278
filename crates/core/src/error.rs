#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl CoreError {
    /// Shorthand for a missing widget.
    pub fn widget_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "widget",
            id: id.into(),
        }
    }

    /// A widget id that is already taken in the collection.
    pub fn duplicate_widget(id: &str) -> Self {
        CoreError::Conflict(format!("widget id {id} is already in use"))
    }
}
