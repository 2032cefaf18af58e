//! Skill labels spread over a sphere that spins toward the pointer.

use crate::math::{multiply_matrices, multiply_matrix_vector, rotation_x, rotation_y, Rect};
use std::collections::HashSet;
use thiserror::Error;

/// Sphere radius in virtual pixels
pub const RADIUS: f64 = 150.0;
/// Pointer offset (normalised to [-1, 1]) times this gives radians per frame
pub const SENSITIVITY: f64 = 0.02;
/// Increments used before the pointer has ever moved over the sphere
pub const IDLE_ROTATION: Rotation = Rotation {
    pitch: 0.005,
    yaw: 0.005,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SphereError {
    #[error("duplicate sphere label: {0}")]
    DuplicateLabel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpherePoint {
    pub label: String,
    pub position: [f64; 3],
}

/// Per-frame angular increments in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Around the X-axis
    pub pitch: f64,
    /// Around the Y-axis
    pub yaw: f64,
}

/// Where and how to draw one label this frame
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub label: String,
    /// Offset from the sphere centre in virtual pixels
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub color_alpha: f64,
    pub z_index: i64,
}

impl LabelStyle {
    fn from_point(point: &SpherePoint) -> Self {
        let [x, y, z] = point.position;
        let depth = (z + 150.0) / 300.0;
        LabelStyle {
            label: point.label.clone(),
            offset_x: x,
            offset_y: y,
            scale: (z + 200.0) / 350.0,
            opacity: depth.max(0.1),
            color_alpha: depth.max(0.3),
            z_index: (z + 200.0).round() as i64,
        }
    }
}

/// Evenly spread position of point `index` out of `count` on a sphere of `radius`
pub fn spiral_position(index: usize, count: usize, radius: f64) -> [f64; 3] {
    let n = count as f64;
    let phi = (-1.0 + (2.0 * index as f64) / n).acos();
    let theta = (n * std::f64::consts::PI).sqrt() * phi;
    [
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    ]
}

#[derive(Debug, Clone)]
pub struct LabelSphere {
    points: Vec<SpherePoint>,
    rotation: Rotation,
}

impl LabelSphere {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self, SphereError> {
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label.as_ref()) {
                return Err(SphereError::DuplicateLabel(label.as_ref().to_string()));
            }
        }

        let count = labels.len();
        let points = labels
            .iter()
            .enumerate()
            .map(|(i, label)| SpherePoint {
                label: label.as_ref().to_string(),
                position: spiral_position(i, count, RADIUS),
            })
            .collect();

        Ok(LabelSphere {
            points,
            rotation: IDLE_ROTATION,
        })
    }

    pub fn points(&self) -> &[SpherePoint] {
        &self.points
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Updates the increments from a pointer position inside `container`.
    /// Positions outside the container are ignored.
    pub fn on_pointer_move(&mut self, pointer: [f64; 2], container: &Rect) -> bool {
        if !container.contains(pointer) || container.width <= 0.0 || container.height <= 0.0 {
            return false;
        }
        let [cx, cy] = container.center();
        let nx = (pointer[0] - cx) / (container.width / 2.0);
        let ny = (pointer[1] - cy) / (container.height / 2.0);
        self.rotation = Rotation {
            pitch: -ny * SENSITIVITY,
            yaw: nx * SENSITIVITY,
        };
        true
    }

    /// Applies one rotation increment to every point
    pub fn rotate(&mut self) {
        let matrix = multiply_matrices(
            &rotation_y(self.rotation.yaw),
            &rotation_x(self.rotation.pitch),
        );
        for point in self.points.iter_mut() {
            point.position = multiply_matrix_vector(&matrix, &point.position);
        }
    }

    /// Label styles ordered back to front
    pub fn project(&self) -> Vec<LabelStyle> {
        let mut styles: Vec<LabelStyle> = self.points.iter().map(LabelStyle::from_point).collect();
        styles.sort_by_key(|s| s.z_index);
        styles
    }

    pub fn frame(&mut self) -> Vec<LabelStyle> {
        self.rotate();
        self.project()
    }
}
