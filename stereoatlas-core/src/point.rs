//! Point types and the two coordinate spaces
//!
//! Coordinates are ordered (anterior-posterior, superior-inferior, left-right)
//! and expressed in micrometres in both spaces.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A position relative to Bregma, as used during stereotaxic surgery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereotaxicCoord(pub Point3d);

/// A position in the atlas' common coordinate framework (CCF).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasCoord(pub Point3d);

macro_rules! impl_coord {
    ($name:ident) => {
        impl $name {
            /// Create a coordinate from its anterior-posterior, superior-inferior
            /// and left-right components in micrometres.
            pub fn new(ap: f64, dv: f64, lr: f64) -> Self {
                Self(Point3d::new(ap, dv, lr))
            }

            /// Anterior-posterior component
            pub fn ap(&self) -> f64 {
                self.0.x
            }

            /// Superior-inferior component
            pub fn dv(&self) -> f64 {
                self.0.y
            }

            /// Left-right component
            pub fn lr(&self) -> f64 {
                self.0.z
            }

            /// Components as an array
            pub fn to_array(&self) -> [f64; 3] {
                [self.0.x, self.0.y, self.0.z]
            }
        }

        impl From<[f64; 3]> for $name {
            fn from(v: [f64; 3]) -> Self {
                Self::new(v[0], v[1], v[2])
            }
        }

        impl From<Point3d> for $name {
            fn from(p: Point3d) -> Self {
                Self(p)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({:.1}, {:.1}, {:.1}) um", self.0.x, self.0.y, self.0.z)
            }
        }
    };
}

impl_coord!(StereotaxicCoord);
impl_coord!(AtlasCoord);

impl Default for StereotaxicCoord {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl AtlasCoord {
    /// Atlas origin (the CCF corner, not Bregma)
    pub fn origin() -> Self {
        Self(Point3d::origin())
    }

    /// Single precision point for mesh construction
    pub fn to_point3f(&self) -> Point3f {
        Point3f::new(self.0.x as f32, self.0.y as f32, self.0.z as f32)
    }
}
