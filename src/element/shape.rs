use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::common;
use super::patch::ObjectPatch;

/// The fieldless discriminant of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Star,
    Polygon,
    Text,
    Image,
    Group,
}

impl ShapeKind {
    /// Lower-case name used in action log entries ("Added rectangle").
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Star => "star",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Text => "text",
            ShapeKind::Image => "image",
            ShapeKind::Group => "group",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "bold italic")]
    BoldItalic,
}

/// Kind-specific geometry of a drawable object.
///
/// Coordinates are local to the owning object's position: rectangles, text
/// and images grow right/down from it, ellipses and stars are centered on it,
/// point lists are offsets from it. A `Group` has no geometry of its own and
/// is drawn entirely through the owning object's children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Shape {
    Rectangle {
        width: f32,
        height: f32,
        #[serde(default)]
        corner_radius: f32,
    },
    Ellipse {
        radius_x: f32,
        radius_y: f32,
    },
    Line {
        points: Vec<Pos2>,
    },
    Arrow {
        points: Vec<Pos2>,
        #[serde(default = "default_pointer_size")]
        pointer_length: f32,
        #[serde(default = "default_pointer_size")]
        pointer_width: f32,
    },
    Star {
        num_points: u32,
        inner_radius: f32,
        outer_radius: f32,
    },
    Polygon {
        points: Vec<Pos2>,
    },
    Text {
        text: String,
        font_size: f32,
        #[serde(default = "default_font_family")]
        font_family: String,
        #[serde(default)]
        font_style: FontStyle,
    },
    Image {
        src: String,
        width: f32,
        height: f32,
    },
    Group,
}

fn default_pointer_size() -> f32 {
    common::DEFAULT_POINTER_SIZE
}

fn default_font_family() -> String {
    common::DEFAULT_FONT_FAMILY.to_owned()
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Ellipse { .. } => ShapeKind::Ellipse,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Arrow { .. } => ShapeKind::Arrow,
            Shape::Star { .. } => ShapeKind::Star,
            Shape::Polygon { .. } => ShapeKind::Polygon,
            Shape::Text { .. } => ShapeKind::Text,
            Shape::Image { .. } => ShapeKind::Image,
            Shape::Group => ShapeKind::Group,
        }
    }

    /// Merge the kind-specific fields of `patch`. Fields that do not exist on
    /// this variant are ignored.
    pub fn apply_patch(&mut self, patch: &ObjectPatch) {
        match self {
            Shape::Rectangle {
                width,
                height,
                corner_radius,
            } => {
                merge(width, patch.width);
                merge(height, patch.height);
                merge(corner_radius, patch.corner_radius);
            }
            Shape::Ellipse { radius_x, radius_y } => {
                merge(radius_x, patch.radius_x);
                merge(radius_y, patch.radius_y);
            }
            Shape::Line { points } | Shape::Polygon { points } => {
                if let Some(new_points) = &patch.points {
                    points.clone_from(new_points);
                }
            }
            Shape::Arrow {
                points,
                pointer_length,
                pointer_width,
            } => {
                if let Some(new_points) = &patch.points {
                    points.clone_from(new_points);
                }
                merge(pointer_length, patch.pointer_length);
                merge(pointer_width, patch.pointer_width);
            }
            Shape::Star {
                num_points,
                inner_radius,
                outer_radius,
            } => {
                merge(num_points, patch.num_points);
                merge(inner_radius, patch.inner_radius);
                merge(outer_radius, patch.outer_radius);
            }
            Shape::Text {
                text,
                font_size,
                font_family,
                font_style,
            } => {
                if let Some(new_text) = &patch.text {
                    text.clone_from(new_text);
                }
                if let Some(new_family) = &patch.font_family {
                    font_family.clone_from(new_family);
                }
                merge(font_size, patch.font_size);
                merge(font_style, patch.font_style);
            }
            Shape::Image { src, width, height } => {
                if let Some(new_src) = &patch.src {
                    src.clone_from(new_src);
                }
                merge(width, patch.width);
                merge(height, patch.height);
            }
            Shape::Group => {}
        }
    }

    /// Axis-aligned bounds in local coordinates (rotation ignored).
    /// `None` for groups, whose extent comes from their children.
    pub fn local_bounds(&self) -> Option<Rect> {
        let rect = match self {
            Shape::Rectangle { width, height, .. } | Shape::Image { width, height, .. } => {
                Rect::from_two_pos(Pos2::ZERO, Pos2::new(*width, *height))
            }
            Shape::Ellipse { radius_x, radius_y } => {
                Rect::from_center_size(Pos2::ZERO, Vec2::new(*radius_x, *radius_y) * 2.0)
            }
            Shape::Line { points } | Shape::Polygon { points } => {
                common::calculate_bounds(points, 0.0)
            }
            Shape::Arrow {
                points,
                pointer_width,
                ..
            } => common::calculate_bounds(points, pointer_width / 2.0),
            Shape::Star { outer_radius, .. } => {
                Rect::from_center_size(Pos2::ZERO, Vec2::splat(outer_radius * 2.0))
            }
            Shape::Text {
                text, font_size, ..
            } => {
                let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let lines = text.lines().count().max(1);
                Rect::from_min_size(
                    Pos2::ZERO,
                    Vec2::new(
                        longest as f32 * font_size * common::TEXT_WIDTH_FACTOR,
                        lines as f32 * font_size * common::TEXT_LINE_HEIGHT,
                    ),
                )
            }
            Shape::Group => return None,
        };
        Some(rect)
    }
}

fn merge<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_ignores_foreign_fields() {
        let mut shape = Shape::Ellipse {
            radius_x: 10.0,
            radius_y: 5.0,
        };
        let patch = ObjectPatch {
            width: Some(99.0),
            radius_y: Some(7.0),
            ..Default::default()
        };
        shape.apply_patch(&patch);
        assert_eq!(
            shape,
            Shape::Ellipse {
                radius_x: 10.0,
                radius_y: 7.0
            }
        );
    }

    #[test]
    fn test_shape_json_uses_type_tag() {
        let shape = Shape::Rectangle {
            width: 4.0,
            height: 2.0,
            corner_radius: 0.0,
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["cornerRadius"], 0.0);
    }
}
