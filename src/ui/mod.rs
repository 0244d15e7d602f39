/// Preview widgets
///
/// - `canvas.rs` - drag / wheel gestures over the live preview

pub mod canvas;
