//! Axis-aligned bounding volume in `(xmin, xmax, ymin, ymax, zmin, zmax)` order.

use crate::constants::BOUNDS_EPSILON;
use crate::error::FrameError;
use serde::{Deserialize, Serialize};

/// Bounding box, also usable as an accumulator.
///
/// A freshly created accumulator is inverted (min = +MAX, max = MIN) and
/// reports `is_valid() == false` until the first point is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    /// Unit cube centred on the origin.
    fn default() -> Self {
        Self::from_array([-1.0, 1.0, -1.0, 1.0, -1.0, 1.0])
    }
}

impl Bounds {
    /// An empty accumulator.
    pub fn empty() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    /// Build from a 6-tuple without checking the min <= max invariant.
    pub fn from_array(b: [f64; 6]) -> Self {
        Self {
            min_x: b[0],
            max_x: b[1],
            min_y: b[2],
            max_y: b[3],
            min_z: b[4],
            max_z: b[5],
        }
    }

    /// Build from a 6-tuple, rejecting NaNs and inverted axes.
    pub fn try_from_array(b: [f64; 6]) -> Result<Self, FrameError> {
        let bounds = Self::from_array(b);
        bounds.check()?;
        Ok(bounds)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z,
        ]
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> Result<(), FrameError> {
        let axes = [
            ('x', self.min_x, self.max_x),
            ('y', self.min_y, self.max_y),
            ('z', self.min_z, self.max_z),
        ];
        for (axis, min, max) in axes {
            if !min.is_finite() || !max.is_finite() {
                return Err(FrameError::NonFinite {
                    property: format!("bounds.{axis}"),
                });
            }
            if min > max {
                return Err(FrameError::InvalidBounds { axis, min, max });
            }
        }
        Ok(())
    }

    pub fn x_length(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn y_length(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn z_length(&self) -> f64 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> [f64; 3] {
        [
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
            0.5 * (self.min_z + self.max_z),
        ]
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        (self.x_length().powi(2) + self.y_length().powi(2) + self.z_length().powi(2)).sqrt()
    }

    /// Copy with every zero-width axis widened to `BOUNDS_EPSILON`.
    pub fn with_min_extent(&self) -> Self {
        let widen = |min: f64, max: f64| {
            if max - min < BOUNDS_EPSILON {
                let mid = 0.5 * (min + max);
                (mid - 0.5 * BOUNDS_EPSILON, mid + 0.5 * BOUNDS_EPSILON)
            } else {
                (min, max)
            }
        };
        let (min_x, max_x) = widen(self.min_x, self.max_x);
        let (min_y, max_y) = widen(self.min_y, self.max_y);
        let (min_z, max_z) = widen(self.min_z, self.max_z);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// The eight corners, x varying fastest, then y, then z.
    pub fn corners(&self) -> [[f64; 3]; 8] {
        let mut corners = [[0.0; 3]; 8];
        let mut idx = 0;
        for z in [self.min_z, self.max_z] {
            for y in [self.min_y, self.max_y] {
                for x in [self.min_x, self.max_x] {
                    corners[idx] = [x, y, z];
                    idx += 1;
                }
            }
        }
        corners
    }

    /// True when the two boxes overlap on every axis (touching counts).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
            && self.min_z <= other.max_z
            && other.min_z <= self.max_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_starts_invalid() {
        let mut bounds = Bounds::empty();
        assert!(!bounds.is_valid());

        bounds.update(1.0, 2.0, 3.0);
        assert!(bounds.is_valid());
        bounds.update(-1.0, 4.0, 3.0);
        assert_eq!(bounds.to_array(), [-1.0, 1.0, 2.0, 4.0, 3.0, 3.0]);
    }

    #[test]
    fn test_try_from_array_rejects_inverted_axis() {
        let err = Bounds::try_from_array([0.0, 1.0, 5.0, 2.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidBounds {
                axis: 'y',
                min: 5.0,
                max: 2.0
            }
        );

        let err = Bounds::try_from_array([0.0, f64::NAN, 0.0, 1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, FrameError::NonFinite { .. }));
    }

    #[test]
    fn test_lengths_and_center() {
        let bounds = Bounds::from_array([0.0, 4.0, -3.0, 3.0, 1.0, 1.0]);
        assert_eq!(bounds.x_length(), 4.0);
        assert_eq!(bounds.y_length(), 6.0);
        assert_eq!(bounds.z_length(), 0.0);
        assert_eq!(bounds.center(), [2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_with_min_extent_widens_flat_axes() {
        let bounds = Bounds::from_array([0.0, 4.0, 1.0, 1.0, 2.0, 2.0]).with_min_extent();
        assert_eq!(bounds.x_length(), 4.0);
        assert!(bounds.y_length() > 0.0);
        assert!(bounds.z_length() > 0.0);
        assert_eq!(bounds.center()[1], 1.0);
    }

    #[test]
    fn test_corners_cover_all_extrema() {
        let bounds = Bounds::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let corners = bounds.corners();
        assert_eq!(corners[0], [0.0, 2.0, 4.0]);
        assert_eq!(corners[7], [1.0, 3.0, 5.0]);
        assert_eq!(corners[1], [1.0, 2.0, 4.0]);
        assert_eq!(corners[2], [0.0, 3.0, 4.0]);
    }

    #[test]
    fn test_intersects() {
        let a = Bounds::from_array([0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let b = Bounds::from_array([1.0, 2.0, 0.5, 0.7, 0.0, 0.0]);
        let c = Bounds::from_array([1.5, 2.0, 0.0, 1.0, 0.0, 1.0]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_serde_round_trip() {
        let bounds = Bounds::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let json = serde_json::to_string(&bounds).unwrap();
        let back: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(bounds, back);
    }
}
