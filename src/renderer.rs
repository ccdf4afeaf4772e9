// src/renderer.rs
use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Shape as PaintShape, Stroke, Vec2};
use egui::emath::Rot2;

use crate::element::{DrawableObject, Shape};
use crate::project::{CompassMode, CompassState, Floorplan};
use crate::state::EditorContext;

const ELLIPSE_SEGMENTS: usize = 48;
const SELECTION_PADDING: f32 = 4.0;
const COMPASS_TICKS: usize = 24;
const CARDINALS: [(&str, f32); 4] = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)];

/// Placement of an object's local coordinates on screen.
#[derive(Debug, Clone, Copy)]
struct Transform {
    origin: Pos2,
    rotation: Rot2,
}

impl Transform {
    fn new(origin: Pos2) -> Self {
        Self {
            origin,
            rotation: Rot2::IDENTITY,
        }
    }

    fn apply(&self, local: Pos2) -> Pos2 {
        self.origin + self.rotation * local.to_vec2()
    }

    /// Transform for an object placed at `position` inside this one.
    fn child(&self, object: &DrawableObject) -> Self {
        Self {
            origin: self.apply(object.position),
            rotation: self.rotation * Rot2::from_angle(object.rotation.to_radians()),
        }
    }
}

/// Paints the canvas: floorplan frame, objects, selection and compass.
#[derive(Debug)]
pub struct Renderer {
    selection_stroke: Stroke,
    canvas_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            selection_stroke: Stroke::new(1.5, Color32::from_rgb(33, 150, 243)),
            canvas_color: Color32::WHITE,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_stroke(&self) -> Stroke {
        self.selection_stroke
    }

    /// Renders the current frame
    ///
    /// Document coordinates are offset so that the document origin sits at
    /// the top-left corner of `rect`.
    pub fn render(&self, painter: &Painter, rect: Rect, editor: &EditorContext) {
        painter.rect_filled(rect, 0.0, self.canvas_color);
        let origin = rect.min;

        self.paint_floorplan(painter, origin, editor.floorplan());
        for object in editor.objects() {
            paint_object(painter, Transform::new(origin), object, 1.0);
        }
        for id in editor.selected_ids() {
            if let Some(object) = editor.document().get(id) {
                let bounds = object
                    .bounds()
                    .translate(origin.to_vec2())
                    .expand(SELECTION_PADDING);
                painter.rect_stroke(bounds, 2.0, self.selection_stroke);
            }
        }
        paint_compass(painter, origin, editor.compass());
    }

    /// Outline preview of the object being drawn.
    pub fn render_draft(&self, painter: &Painter, start: Pos2, end: Pos2) {
        painter.rect_stroke(Rect::from_two_pos(start, end), 0.0, self.selection_stroke);
    }

    fn paint_floorplan(&self, painter: &Painter, origin: Pos2, floorplan: &Floorplan) {
        let Some(src) = &floorplan.image_src else {
            return;
        };
        let anchor = origin + egui::vec2(floorplan.x, floorplan.y);
        let color = Color32::GRAY.gamma_multiply(floorplan.opacity);
        painter.text(anchor, Align2::LEFT_TOP, src, FontId::monospace(12.0), color);
    }
}

fn paint_object(painter: &Painter, parent: Transform, object: &DrawableObject, opacity: f32) {
    let opacity = opacity * object.opacity;
    let transform = parent.child(object);
    let stroke = Stroke::new(object.stroke_width, Color32::from(object.stroke).gamma_multiply(opacity));
    let fill = Color32::from(object.fill).gamma_multiply(opacity);

    match &object.shape {
        Shape::Rectangle { width, height, .. } => {
            let corners = [
                Pos2::ZERO,
                egui::pos2(*width, 0.0),
                egui::pos2(*width, *height),
                egui::pos2(0.0, *height),
            ];
            let points = corners.iter().map(|p| transform.apply(*p)).collect();
            painter.add(PaintShape::convex_polygon(points, fill, stroke));
        }
        Shape::Ellipse { radius_x, radius_y } => {
            let points = ellipse_points(*radius_x, *radius_y)
                .into_iter()
                .map(|p| transform.apply(p))
                .collect();
            painter.add(PaintShape::convex_polygon(points, fill, stroke));
        }
        Shape::Line { points } => {
            let points = points.iter().map(|p| transform.apply(*p)).collect();
            painter.add(PaintShape::line(points, stroke));
        }
        Shape::Arrow {
            points,
            pointer_length,
            pointer_width,
        } => {
            let screen: Vec<Pos2> = points.iter().map(|p| transform.apply(*p)).collect();
            if let [.., from, to] = screen.as_slice() {
                let head = arrow_head(*from, *to, *pointer_length, *pointer_width);
                painter.add(PaintShape::line(screen.clone(), stroke));
                painter.add(PaintShape::convex_polygon(head.to_vec(), stroke.color, Stroke::NONE));
            }
        }
        Shape::Star {
            num_points,
            inner_radius,
            outer_radius,
        } => {
            let points: Vec<Pos2> = star_points(*num_points, *inner_radius, *outer_radius)
                .into_iter()
                .map(|p| transform.apply(p))
                .collect();
            // Fill as a fan of triangles around the center since the outline is concave.
            let center = transform.origin;
            for (i, point) in points.iter().enumerate() {
                let next = points[(i + 1) % points.len()];
                painter.add(PaintShape::convex_polygon(vec![center, *point, next], fill, Stroke::NONE));
            }
            painter.add(PaintShape::closed_line(points, stroke));
        }
        Shape::Polygon { points } => {
            let points = points.iter().map(|p| transform.apply(*p)).collect();
            painter.add(PaintShape::convex_polygon(points, fill, stroke));
        }
        Shape::Text {
            text, font_size, ..
        } => {
            painter.text(
                transform.origin,
                Align2::LEFT_TOP,
                text,
                FontId::proportional(*font_size),
                fill,
            );
        }
        Shape::Image { src, width, height } => {
            let frame = Rect::from_min_size(transform.origin, egui::vec2(*width, *height));
            painter.rect_stroke(frame, 0.0, Stroke::new(1.0, Color32::GRAY));
            painter.text(frame.center(), Align2::CENTER_CENTER, src, FontId::monospace(10.0), Color32::GRAY);
        }
        Shape::Group => {}
    }

    for child in &object.children {
        paint_object(painter, transform, child, opacity);
    }
}

fn paint_compass(painter: &Painter, origin: Pos2, compass: &CompassState) {
    if !compass.visible {
        return;
    }
    let center = origin + egui::vec2(compass.x, compass.y);
    let color = Color32::DARK_RED.gamma_multiply(compass.opacity);
    let stroke = Stroke::new(2.0, color);
    let rotation = Rot2::from_angle(compass.rotation.to_radians());
    // Bearing 0 points up the screen.
    let bearing = |degrees: f32, distance: f32| {
        let direction = rotation * Rot2::from_angle(degrees.to_radians()) * egui::vec2(0.0, -1.0);
        center + direction * distance
    };

    painter.circle_stroke(center, compass.radius, stroke);
    painter.line_segment([center, bearing(0.0, compass.radius)], stroke);

    if compass.mode == CompassMode::Full {
        painter.circle_stroke(center, compass.radius * 0.6, Stroke::new(1.0, color));
        for tick in 0..COMPASS_TICKS {
            let degrees = tick as f32 * 360.0 / COMPASS_TICKS as f32;
            painter.line_segment(
                [bearing(degrees, compass.radius * 0.9), bearing(degrees, compass.radius)],
                Stroke::new(1.0, color),
            );
        }
    }
    for (label, degrees) in CARDINALS {
        painter.text(
            bearing(degrees, compass.radius + 12.0),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(14.0),
            color,
        );
    }
}

fn ellipse_points(radius_x: f32, radius_y: f32) -> Vec<Pos2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 * TAU / ELLIPSE_SEGMENTS as f32;
            egui::pos2(radius_x * angle.cos(), radius_y * angle.sin())
        })
        .collect()
}

/// Outline of a star centered on the local origin, first tip pointing up.
fn star_points(num_points: u32, inner_radius: f32, outer_radius: f32) -> Vec<Pos2> {
    let count = num_points.max(2) as usize * 2;
    (0..count)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = i as f32 * TAU / count as f32 - TAU / 4.0;
            egui::pos2(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Triangle of an arrow head whose tip is at `to`.
fn arrow_head(from: Pos2, to: Pos2, length: f32, width: f32) -> [Pos2; 3] {
    let direction = (to - from).normalized();
    let base = to - direction * length;
    let side: Vec2 = direction.rot90() * (width / 2.0);
    [to, base + side, base - side]
}
