//! The seam between the sky engine and whatever graphics API the host uses.

use crate::coordinates::Vector3;
use crate::parse_stars::star::Color;
use nalgebra::{Matrix4, Perspective3, Rotation3};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    LineStrip,
    LineLoop,
    TriangleFan,
}

/// A drawing target for one frame. Color and point size are sticky state, like in a fixed
/// function pipeline: they apply to every draw call that follows.
pub trait Surface {
    fn set_projection(&mut self, projection: &Perspective3<f64>);
    fn set_color(&mut self, color: Color);
    fn set_point_size(&mut self, size: f64);
    fn draw(&mut self, primitive: Primitive, transform: &Rotation3<f64>, vertices: &[Vector3]);
    fn draw_label(&mut self, text: &str, transform: &Rotation3<f64>, position: Vector3);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// the homogeneous projection matrix
    Projection(Matrix4<f64>),
    Color(Color),
    PointSize(f64),
    Draw {
        primitive: Primitive,
        transform: Rotation3<f64>,
        vertices: Vec<Vector3>,
    },
    Label {
        text: String,
        transform: Rotation3<f64>,
        position: Vector3,
    },
}

/// keeps every call it receives, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn draws(&self, primitive: Primitive) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Draw { primitive: p, .. } if *p == primitive))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_projection(&mut self, projection: &Perspective3<f64>) {
        self.commands.push(DrawCommand::Projection(projection.to_homogeneous()));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn set_point_size(&mut self, size: f64) {
        self.commands.push(DrawCommand::PointSize(size));
    }

    fn draw(&mut self, primitive: Primitive, transform: &Rotation3<f64>, vertices: &[Vector3]) {
        self.commands.push(DrawCommand::Draw {
            primitive,
            transform: *transform,
            vertices: vertices.to_vec(),
        });
    }

    fn draw_label(&mut self, text: &str, transform: &Rotation3<f64>, position: Vector3) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
            transform: *transform,
            position,
        });
    }
}
