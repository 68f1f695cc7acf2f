//! Row-major 4x4 matrix and 3-vector math for transform composition.
//!
//! Matrices are stored row-major on the CPU. WGSL matrices are column-major,
//! so the renderer uploads them through [`Mat4::to_cols_array_2d`], which
//! transposes at that single boundary. Everything here is a plain value with
//! no aliasing concerns.

use std::ops::Mul;

pub const PI: f32 = std::f32::consts::PI;

/// Degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// A 4x4 matrix of f32, row-major.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Diagonal scaling matrix.
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.0[0][0] = sx;
        m.0[1][1] = sy;
        m.0[2][2] = sz;
        m
    }

    /// Translation, stored in the last column.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.0[0][3] = dx;
        m.0[1][3] = dy;
        m.0[2][3] = dz;
        m
    }

    /// Right-handed rotation about the X axis.
    pub fn rotation_x(radians: f32) -> Mat4 {
        let (s, c) = radians.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.0[1][1] = c;
        m.0[1][2] = -s;
        m.0[2][1] = s;
        m.0[2][2] = c;
        m
    }

    /// Right-handed rotation about the Y axis.
    pub fn rotation_y(radians: f32) -> Mat4 {
        let (s, c) = radians.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.0[0][0] = c;
        m.0[0][2] = -s;
        m.0[2][0] = s;
        m.0[2][2] = c;
        m
    }

    /// Right-handed rotation about the Z axis.
    pub fn rotation_z(radians: f32) -> Mat4 {
        let (s, c) = radians.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.0[0][0] = c;
        m.0[0][1] = -s;
        m.0[1][0] = s;
        m.0[1][1] = c;
        m
    }

    /// Conventional OpenGL-style perspective projection.
    ///
    /// For an eye-space point at z = -near the clip-space w is `near`, and at
    /// z = -far it is `far`. Inputs with `far == near` produce infinities;
    /// that is the caller's responsibility.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let inverse_range = 1.0 / (deg_to_rad(fov_y_degrees) / 2.0).tan();
        let sx = inverse_range / aspect;
        let sy = inverse_range;
        let sz = -(far + near) / (far - near);
        let pz = -(2.0 * far * near) / (far - near);
        let mut m = Mat4::IDENTITY;
        m.0[0][0] = sx;
        m.0[1][1] = sy;
        m.0[2][2] = sz;
        m.0[2][3] = pz;
        m.0[3][2] = -1.0;
        m.0[3][3] = 0.0;
        m
    }

    /// Transposes into the column-major layout WGSL expects.
    ///
    /// This is the row-major / column-major upload boundary; uniform buffers
    /// are the only intended caller.
    pub fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        let mut cols = [[0.0; 4]; 4];
        for (i, row) in self.0.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                cols[j][i] = *v;
            }
        }
        cols
    }

    /// Transforms a point (w = 1), returning the full homogeneous result.
    pub fn transform_point(self, p: [f32; 3]) -> [f32; 4] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (i, row) in self.0.iter().enumerate() {
            out[i] = row.iter().zip(v).map(|(a, b)| a * b).sum();
        }
        out
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.0[i][k] * rhs.0[k][j];
                }
                out[i][j] = sum;
            }
        }
        Mat4(out)
    }
}

/// Right-hand cross product.
pub fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Unit vector in the direction of `v`; the zero vector maps to zero.
pub fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (a.0[i][j] - b.0[i][j]).abs() < EPS,
                    "mismatch at [{i}][{j}]: {} vs {}",
                    a.0[i][j],
                    b.0[i][j]
                );
            }
        }
    }

    fn arbitrary() -> Mat4 {
        Mat4([
            [0.3, -1.2, 4.5, 0.1],
            [2.0, 0.7, -0.3, 5.5],
            [-3.1, 1.1, 0.0, 2.2],
            [0.9, -0.4, 1.3, 1.0],
        ])
    }

    #[test]
    fn identity_is_neutral() {
        let a = arbitrary();
        assert_mat_eq(Mat4::IDENTITY * a, a);
        assert_mat_eq(a * Mat4::IDENTITY, a);
    }

    #[test]
    fn unit_scale_is_identity() {
        assert_mat_eq(Mat4::scaling(1.0, 1.0, 1.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotations_invert() {
        for theta in [0.0, 0.37, 1.0, deg_to_rad(90.0), 2.9] {
            assert_mat_eq(
                Mat4::rotation_x(theta) * Mat4::rotation_x(-theta),
                Mat4::IDENTITY,
            );
            assert_mat_eq(
                Mat4::rotation_y(theta) * Mat4::rotation_y(-theta),
                Mat4::IDENTITY,
            );
            assert_mat_eq(
                Mat4::rotation_z(theta) * Mat4::rotation_z(-theta),
                Mat4::IDENTITY,
            );
        }
    }

    #[test]
    fn translations_compose_by_addition() {
        let lhs = Mat4::translation(1.0, -2.0, 3.5) * Mat4::translation(0.5, 4.0, -1.5);
        assert_mat_eq(lhs, Mat4::translation(1.5, 2.0, 2.0));
    }

    #[test]
    fn perspective_shape() {
        let fov = 24.0f32;
        let aspect = 0.75;
        let m = Mat4::perspective(fov, aspect, 1.0, 100.0);
        let cot = 1.0 / (deg_to_rad(fov) / 2.0).tan();
        assert!((m.0[0][0] - cot / aspect).abs() < EPS);
        assert!((m.0[1][1] - cot).abs() < EPS);
        assert!((m.0[3][2] - -1.0).abs() < EPS);
        assert_eq!(m.0[3][3], 0.0);
    }

    #[test]
    fn perspective_w_equals_depth_at_planes() {
        let (near, far) = (1.0, 100.0);
        let m = Mat4::perspective(24.0, 1.0, near, far);
        let on_near = m.transform_point([0.4, -0.2, -near]);
        assert!((on_near[3] - near).abs() < EPS);
        let on_far = m.transform_point([-3.0, 7.0, -far]);
        assert!((on_far[3] - far).abs() < 1e-3);
    }

    #[test]
    fn projection_aspect_ratio() {
        // -w 400 -h 600 gives m[0][0]/m[1][1] = height/width = 1.5
        let m = Mat4::perspective(24.0, 400.0 / 600.0, 1.0, 100.0);
        assert!((m.0[0][0] / m.0[1][1] - 1.5).abs() < EPS);
    }

    #[test]
    fn cross_product_basis() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn normalize_is_unit_length() {
        let n = normalize([3.0, -4.0, 0.0]);
        assert!((n[0] - 0.6).abs() < EPS);
        assert!((n[1] - -0.8).abs() < EPS);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < EPS);
    }

    #[test]
    fn normalize_zero_vector() {
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }
}
