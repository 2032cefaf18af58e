/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation around the X-axis (pitch)
pub fn rotation_x(angle: f64) -> [[f64; 3]; 3] {
    let (sin_x, cos_x) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos_x, -sin_x], [0.0, sin_x, cos_x]]
}

/// Rotation around the Y-axis (yaw)
pub fn rotation_y(angle: f64) -> [[f64; 3]; 3] {
    let (sin_y, cos_y) = angle.sin_cos();
    [[cos_y, 0.0, sin_y], [0.0, 1.0, 0.0], [-sin_y, 0.0, cos_y]]
}

/// Length of a 3-dimensional vector
pub fn vector_length(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Euclidean distance between two screen positions
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Linear opacity falloff for a connecting line.
///
/// Returns `None` when the endpoints are `threshold` or more apart, otherwise
/// `base * (1 - distance / threshold)` clamped to be non-negative.
pub fn link_opacity(distance: f64, threshold: f64, base: f64) -> Option<f64> {
    if !(distance < threshold) {
        return None;
    }
    Some((base * (1.0 - distance / threshold)).max(0.0))
}

/// Axis-aligned rectangle in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Half-open containment test
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.x
            && p[0] < self.x + self.width
            && p[1] >= self.y
            && p[1] < self.y + self.height
    }
}
