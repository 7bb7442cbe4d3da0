pub type Scalar = f64;

pub type Vec3 = [Scalar; 3];

/// Row-major 3x3 matrix.
pub type Mat3 = [Scalar; 9];
