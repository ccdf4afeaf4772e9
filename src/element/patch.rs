use egui::Pos2;

use super::shape::FontStyle;
use crate::color::{Color, ColorPair};

/// A partial set of object attributes, merged by the update operations.
///
/// Common attributes apply to every object. Kind-specific attributes only
/// touch variants that carry them (see [`super::Shape::apply_patch`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub position: Option<Pos2>,
    pub rotation: Option<f32>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f32>,
    pub fill: Option<Color>,
    pub opacity: Option<f32>,
    pub draggable: Option<bool>,

    pub width: Option<f32>,
    pub height: Option<f32>,
    pub corner_radius: Option<f32>,
    pub radius_x: Option<f32>,
    pub radius_y: Option<f32>,
    pub points: Option<Vec<Pos2>>,
    pub pointer_length: Option<f32>,
    pub pointer_width: Option<f32>,
    pub num_points: Option<u32>,
    pub inner_radius: Option<f32>,
    pub outer_radius: Option<f32>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub font_style: Option<FontStyle>,
    pub src: Option<String>,
}

impl ObjectPatch {
    /// A patch that sets both stroke and fill.
    pub fn colors(pair: ColorPair) -> Self {
        Self {
            stroke: Some(pair.stroke),
            fill: Some(pair.fill),
            ..Default::default()
        }
    }

    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
