//! # Profile Curves
//!
//! The 2D cross-section that is revolved around the Z axis. Each point
//! carries a radius (signed distance from the axis) and a height along it.
//!
//! Profiles usually come from one of three places:
//! - explicit `(radius, height)` pairs (files, CLI flags, tests)
//! - pixel coordinates clicked on a drawing canvas ([`Profile::from_canvas`])
//! - 3D points already laid on the XZ or YZ plane ([`Profile::from_plane`])

use crate::error::{MeshError, MeshResult};
use config::constants::MIN_PROFILE_POINTS;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};


/// One sample of the profile curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the revolution axis. Negative values place the point on
    /// the opposite side of the axis.
    pub radius: f64,
    /// Position along the revolution axis.
    pub height: f64,
}

impl ProfilePoint {
    /// Creates a profile point.
    pub const fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }

    /// Returns true if both components are finite.
    pub fn is_finite(&self) -> bool {
        self.radius.is_finite() && self.height.is_finite()
    }
}

impl From<DVec2> for ProfilePoint {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for ProfilePoint {
    fn from((radius, height): (f64, f64)) -> Self {
        Self::new(radius, height)
    }
}

/// Plane a 3D profile was laid on before revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfilePlane {
    /// `P(x, 0, z)`: radius is `x`.
    XZ,
    /// `P(0, y, z)`: radius is `y`.
    YZ,
}

/// An ordered profile curve, bottom (first) to top (last).
///
/// # Example
///
/// ```rust
/// use sor_mesh::profile::{Profile, ProfilePoint};
///
/// let profile = Profile::new(vec![
///     ProfilePoint::new(1.0, 0.0),
///     ProfilePoint::new(1.0, 1.0),
/// ]);
/// assert_eq!(profile.len(), 2);
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    /// Creates a profile from ordered points.
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        Self { points }
    }

    /// Converts canvas pixel coordinates into a profile.
    ///
    /// Pixel `(px, py)` on a `width x height` canvas maps onto `[-1, 1]`:
    /// `radius = px / width * 2 - 1` and `height = (h - py) / h * 2 - 1`, so
    /// the canvas's downward y axis becomes an upward height.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sor_mesh::profile::Profile;
    /// use glam::DVec2;
    ///
    /// let profile = Profile::from_canvas(&[DVec2::new(500.0, 0.0)], 500.0, 500.0).unwrap();
    /// assert_eq!(profile.points()[0].radius, 1.0);
    /// assert_eq!(profile.points()[0].height, 1.0);
    /// ```
    pub fn from_canvas(pixels: &[DVec2], width: f64, height: f64) -> MeshResult<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(MeshError::invalid_parameter(format!(
                "canvas size must be positive and finite: {width}x{height}"
            )));
        }

        let points = pixels
            .iter()
            .map(|p| ProfilePoint::new(p.x / width * 2.0 - 1.0, (height - p.y) / height * 2.0 - 1.0))
            .collect();
        Ok(Self::new(points))
    }

    /// Reads a profile from 3D points lying on the given plane. The
    /// out-of-plane component is ignored.
    pub fn from_plane(points: &[DVec3], plane: ProfilePlane) -> Self {
        let points = points
            .iter()
            .map(|p| match plane {
                ProfilePlane::XZ => ProfilePoint::new(p.x, p.z),
                ProfilePlane::YZ => ProfilePoint::new(p.y, p.z),
            })
            .collect();
        Self::new(points)
    }

    /// Places the profile on a plane as 3D points.
    pub fn to_plane(&self, plane: ProfilePlane) -> Vec<DVec3> {
        self.points
            .iter()
            .map(|p| match plane {
                ProfilePlane::XZ => DVec3::new(p.radius, 0.0, p.height),
                ProfilePlane::YZ => DVec3::new(0.0, p.radius, p.height),
            })
            .collect()
    }

    /// Returns the points in order.
    #[inline]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the profile has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first (bottom) point.
    pub fn first(&self) -> Option<&ProfilePoint> {
        self.points.first()
    }

    /// Returns the last (top) point.
    pub fn last(&self) -> Option<&ProfilePoint> {
        self.points.last()
    }

    /// Appends a point.
    pub fn push(&mut self, point: ProfilePoint) {
        self.points.push(point);
    }

    /// Checks the profile can be revolved: at least two points, all finite.
    pub fn validate(&self) -> MeshResult<()> {
        if self.points.len() < MIN_PROFILE_POINTS {
            return Err(MeshError::invalid_parameter(format!(
                "profile needs at least {MIN_PROFILE_POINTS} points, got {}",
                self.points.len()
            )));
        }

        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(MeshError::invalid_parameter(format!(
                "profile point {index} is not finite"
            )));
        }

        Ok(())
    }
}

impl FromIterator<ProfilePoint> for Profile {
    fn from_iter<I: IntoIterator<Item = ProfilePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
