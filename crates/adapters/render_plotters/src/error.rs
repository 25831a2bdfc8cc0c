//! Render adapter error types.

/// Errors raised while turning recorded primitives into an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The surface has no drawable area.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The plotters backend failed to draw or flush.
    #[error("failed to draw chart")]
    Draw(#[source] Box<dyn std::error::Error + Send + Sync>),
}
