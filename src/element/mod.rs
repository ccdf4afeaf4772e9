use std::collections::HashSet;
use std::fmt;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;
mod patch;
mod shape;

pub use common::{CLONE_OFFSET, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
pub use patch::ObjectPatch;
pub use shape::{FontStyle, Shape, ShapeKind};

use crate::color::{Color, ColorPair};
use crate::id_generator;

/// Identifier of a drawable object. Unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

fn default_stroke() -> Color {
    ColorPair::default().stroke
}

fn default_fill() -> Color {
    ColorPair::default().fill
}

fn default_stroke_width() -> f32 {
    common::DEFAULT_STROKE_WIDTH
}

fn default_opacity() -> f32 {
    common::DEFAULT_OPACITY
}

fn default_true() -> bool {
    true
}

/// A single drawable object in the document.
///
/// The identifier is fixed at construction; everything else is plain data
/// mutated through [`DrawableObject::apply_patch`] and
/// [`DrawableObject::translate`]. Children are positioned relative to their
/// parent and move with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawableObject {
    id: ObjectId,
    pub position: Pos2,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_stroke")]
    pub stroke: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_fill")]
    pub fill: Color,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DrawableObject>,
    pub shape: Shape,
}

impl DrawableObject {
    /// Create an object with a freshly generated id and default styling.
    pub fn new(shape: Shape) -> Self {
        let id = id_generator::generate_id(shape.kind());
        Self::with_id(id, shape)
    }

    /// Create an object with a caller-chosen id and default styling.
    pub fn with_id(id: impl Into<ObjectId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            position: Pos2::ZERO,
            rotation: 0.0,
            stroke: default_stroke(),
            stroke_width: common::DEFAULT_STROKE_WIDTH,
            fill: default_fill(),
            opacity: common::DEFAULT_OPACITY,
            draggable: true,
            children: Vec::new(),
            shape,
        }
    }

    pub fn at(mut self, position: Pos2) -> Self {
        self.position = position;
        self
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.set_colors(colors);
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_children(mut self, children: Vec<DrawableObject>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn colors(&self) -> ColorPair {
        ColorPair::new(self.stroke, self.fill)
    }

    pub fn set_colors(&mut self, colors: ColorPair) {
        self.stroke = colors.stroke;
        self.fill = colors.fill;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Merge a partial attribute set into this object.
    pub fn apply_patch(&mut self, patch: &ObjectPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(stroke) = patch.stroke {
            self.stroke = stroke;
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
        if let Some(fill) = patch.fill {
            self.fill = fill;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(draggable) = patch.draggable {
            self.draggable = draggable;
        }
        self.shape.apply_patch(patch);
    }

    /// Axis-aligned bounds in document coordinates, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        let own = self.shape.local_bounds();
        let children = self
            .children
            .iter()
            .map(DrawableObject::bounds)
            .reduce(|a, b| a.union(b));
        let local = match (own, children) {
            (Some(own), Some(children)) => own.union(children),
            (Some(rect), None) | (None, Some(rect)) => rect,
            (None, None) => Rect::from_min_size(Pos2::ZERO, Vec2::ZERO),
        };
        local.translate(self.position.to_vec2())
    }

    /// Insert this object's id and the ids of all nested children into `out`.
    pub fn collect_ids(&self, out: &mut HashSet<ObjectId>) {
        out.insert(self.id.clone());
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// A deep copy with new ids for this object and every child. New ids are
    /// drawn so they are not in `taken`, and are added to it.
    pub fn duplicate(&self, taken: &mut HashSet<ObjectId>) -> Self {
        let mut copy = self.clone();
        copy.renew_ids(taken);
        copy
    }

    pub(crate) fn renew_ids(&mut self, taken: &mut HashSet<ObjectId>) {
        self.id = id_generator::generate_unique_id(self.kind(), taken);
        for child in &mut self.children {
            child.renew_ids(taken);
        }
    }

    /// Whether the document point `pos` lies inside this object's bounds.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.bounds().expand(self.stroke_width / 2.0).contains(pos)
    }
}

/// Convenience constructors for the common shapes.
pub mod factory {
    use super::*;

    pub fn rectangle(position: Pos2, size: Vec2) -> DrawableObject {
        DrawableObject::new(Shape::Rectangle {
            width: size.x,
            height: size.y,
            corner_radius: 0.0,
        })
        .at(position)
    }

    pub fn ellipse(center: Pos2, radii: Vec2) -> DrawableObject {
        DrawableObject::new(Shape::Ellipse {
            radius_x: radii.x,
            radius_y: radii.y,
        })
        .at(center)
    }

    pub fn line(start: Pos2, end: Pos2) -> DrawableObject {
        DrawableObject::new(Shape::Line {
            points: vec![Pos2::ZERO, Pos2::ZERO + (end - start)],
        })
        .at(start)
    }

    pub fn arrow(start: Pos2, end: Pos2) -> DrawableObject {
        DrawableObject::new(Shape::Arrow {
            points: vec![Pos2::ZERO, Pos2::ZERO + (end - start)],
            pointer_length: common::DEFAULT_POINTER_SIZE,
            pointer_width: common::DEFAULT_POINTER_SIZE,
        })
        .at(start)
    }

    pub fn star(center: Pos2, num_points: u32, outer_radius: f32) -> DrawableObject {
        DrawableObject::new(Shape::Star {
            num_points,
            inner_radius: outer_radius / 2.0,
            outer_radius,
        })
        .at(center)
    }

    pub fn polygon(position: Pos2, points: Vec<Pos2>) -> DrawableObject {
        DrawableObject::new(Shape::Polygon { points }).at(position)
    }

    pub fn text(position: Pos2, text: impl Into<String>, font_size: f32) -> DrawableObject {
        DrawableObject::new(Shape::Text {
            text: text.into(),
            font_size,
            font_family: common::DEFAULT_FONT_FAMILY.to_owned(),
            font_style: FontStyle::Normal,
        })
        .at(position)
    }

    pub fn image(position: Pos2, src: impl Into<String>, size: Vec2) -> DrawableObject {
        DrawableObject::new(Shape::Image {
            src: src.into(),
            width: size.x,
            height: size.y,
        })
        .at(position)
    }

    /// A text box with an arrow pointing from it to `target`, both nested
    /// under one group object so they move, clone and delete together.
    pub fn callout(position: Pos2, text: impl Into<String>, target: Pos2) -> DrawableObject {
        let label = self::text(Pos2::ZERO, text, common::DEFAULT_FONT_SIZE);
        let label_bounds = label.bounds();
        let frame = rectangle(Pos2::ZERO, label_bounds.size() + Vec2::splat(8.0));
        let pointer = arrow(frame.bounds().center(), Pos2::ZERO + (target - position));
        DrawableObject::new(Shape::Group)
            .at(position)
            .with_children(vec![frame, label, pointer])
    }
}
