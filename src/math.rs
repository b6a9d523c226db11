//! 2D linear algebra kernel.
//!
//! Plain vector and angle math shared by the layout pass, the constraint
//! engine and the move orchestrator. Everything here is pure; angles cross
//! the API in degrees, the trigonometric internals work in radians.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D vector in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// The zero vector normalizes to the zero vector rather than producing
    /// NaNs or an error.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            self / len
        }
    }

    /// Dot product.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (determinant of the 2x2 matrix `[self, other]`).
    pub fn det(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Converts degrees to radians.
pub fn to_radian(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
pub fn to_degree(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Signed angle from `v1` to `v2` in radians, in the range `(-PI, PI]`.
pub fn angle_between(v1: Vec2, v2: Vec2) -> f64 {
    v1.det(v2).atan2(v1.dot(v2))
}

/// Rotates `v` counterclockwise by `radians`.
pub fn rotate(v: Vec2, radians: f64) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Wrap-around distance between two angles in degrees, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Signed wrap-around difference `a - b` in degrees, in `(-180, 180]`.
pub fn signed_angular_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_angle(a - b);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Clamps an angle into `[min, max]` by circular closeness.
///
/// An angle outside the window resolves to whichever bound is nearer by
/// wrap-around distance, not by linear distance. Near the 0/360 seam the two
/// disagree: an angle of 350 with a window of `[0, 10]` is 10 degrees away
/// from 0 but 20 away from 10, so it clamps to 0 where a linear clamp would
/// have returned 10.
pub fn clamp_angle(angle: f64, min: f64, max: f64) -> f64 {
    if angle >= min && angle <= max {
        return angle;
    }
    if angular_distance(angle, min) <= angular_distance(angle, max) {
        min
    } else {
        max
    }
}

/// Converts a polar position (angle in degrees, radial distance) into a
/// vector relative to the parent center.
pub fn polar_to_vector(angle: f64, distance: f64) -> Vec2 {
    rotate(Vec2::new(0.0, distance), to_radian(angle))
}

/// Converts a vector relative to the parent center back into a polar
/// `(angle, distance)` pair, with the angle normalized into `[0, 360)`.
pub fn vector_to_polar(v: Vec2) -> (f64, f64) {
    let angle = normalize_angle(to_degree(angle_between(Vec2::new(0.0, 1.0), v)));
    (angle, v.length())
}

/// Intersection points of two circles given by center and radius.
///
/// Returns `None` for concentric circles and whenever the circles do not
/// properly intersect (separate, contained, or merely tangent). Otherwise
/// both intersection points are returned, computed in a frame where the
/// second center lies on the local x-axis and rotated back.
pub fn circle_intersections(c0: Vec2, r0: f64, c1: Vec2, r1: f64) -> Option<(Vec2, Vec2)> {
    let delta = c1 - c0;
    let d = delta.length();
    if d == 0.0 {
        return None;
    }
    let x = (d * d - r1 * r1 + r0 * r0) / (2.0 * d);
    let det = r0 * r0 - x * x;
    if det <= 0.0 {
        return None;
    }
    let y = det.sqrt();
    let theta = angle_between(Vec2::new(1.0, 0.0), delta);
    let p1 = c0 + rotate(Vec2::new(x, y), theta);
    let p2 = c0 + rotate(Vec2::new(x, -y), theta);
    Some((p1, p2))
}
