use egui::{Pos2, Rect, Vec2};

// Common constants for all element types
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_OPACITY: f32 = 1.0;
pub const DEFAULT_POINTER_SIZE: f32 = 10.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Offset applied to duplicated objects so the clone does not sit exactly on
/// top of its source.
pub const CLONE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

// Rough glyph metrics for text bounds; the renderer owns real layout.
pub(crate) const TEXT_WIDTH_FACTOR: f32 = 0.6;
pub(crate) const TEXT_LINE_HEIGHT: f32 = 1.2;

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::from_min_size(Pos2::ZERO, Vec2::ZERO);
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}
