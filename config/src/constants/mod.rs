//! # Configuration Constants
//!
//! Centralized constants for the surface-of-revolution pipeline. Geometry
//! tolerances, tessellation limits and export formatting live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Side-count defaults and bounds
//! - **Limits**: Maximum values for safety bounds
//! - **Export**: Output precision and default file names
//! - **View**: Defaults for the interactive consumer (model transform)

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Degenerate-triangle tolerance, relative to the triangle's own size.
///
/// A triangle is degenerate when `|e1 x e2| <= tolerance * |e1| * |e2|`
/// (the sine of its corner angle is at most this). Degenerate triangles
/// receive the zero vector as normal and are reported as warnings.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_NORMAL_EPSILON;
///
/// // Collinear edges: the cross product vanishes
/// let (e1, e2) = (1.0_f64, 2.0_f64);
/// let cross_length = 0.0;
/// assert!(cross_length <= DEGENERATE_NORMAL_EPSILON * e1 * e2);
/// ```
pub const DEGENERATE_NORMAL_EPSILON: f64 = 1e-12;

/// Allowed deviation from 1.0 for a vector to count as unit length.
///
/// Used by mesh validation: every normal must be unit length within this
/// tolerance, or exactly zero.
pub const UNIT_NORMAL_TOLERANCE: f64 = 1e-5;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Minimum number of sides for a surface of revolution.
///
/// Fewer than three rotational steps cannot enclose the axis.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SIDES;
///
/// let requested = 2;
/// assert!(requested < MIN_SIDES);
/// ```
pub const MIN_SIDES: u32 = 3;

/// Default number of sides when the caller does not pick one.
pub const DEFAULT_SIDES: u32 = 12;

/// Minimum number of profile points needed to sweep a surface.
pub const MIN_PROFILE_POINTS: usize = 2;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single mesh.
///
/// Safety limit to prevent memory exhaustion from an absurd side count.
/// Triangle indices are `u32`, so this must stay well below `u32::MAX`.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = (64 + 1) * 100;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum size of a profile file read by the CLI (in bytes).
pub const MAX_PROFILE_FILE_SIZE: u64 = 16 * 1024 * 1024;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Decimal places written for each coordinate in the legacy export.
///
/// # Example
///
/// ```rust
/// use config::constants::COORDINATE_DECIMALS;
///
/// let text = format!("{:.*}", COORDINATE_DECIMALS, 0.5_f64);
/// assert_eq!(text, "0.50");
/// ```
pub const COORDINATE_DECIMALS: usize = 2;

/// File name of the legacy coordinates listing.
pub const LEGACY_COORDINATES_FILE: &str = "sor_coordinates.obj";

/// File name of the legacy polygon listing.
pub const LEGACY_POLYGONS_FILE: &str = "sor_polygons.obj";

/// File name of the standard Wavefront OBJ export.
pub const WAVEFRONT_FILE: &str = "sor.obj";

// =============================================================================
// VIEW CONSTANTS
// =============================================================================

/// Default model translation: the surface sits five units in front of the
/// camera.
pub const DEFAULT_TRANSLATION: [f64; 3] = [0.0, 0.0, -5.0];

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of settings shared between the library and the CLI.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Tolerance below which a triangle counts as degenerate.
    pub tolerance: f64,
    /// Side count used when none is requested.
    pub default_sides: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and default side count.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-9, 24).expect("valid config");
    /// assert_eq!(cfg.default_sides, 24);
    /// ```
    pub fn new(tolerance: f64, default_sides: u32) -> Result<Self, ConfigError> {
        if tolerance <= 0.0 || !tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if default_sides < MIN_SIDES {
            return Err(ConfigError::InvalidSides(default_sides));
        }
        Ok(Self {
            tolerance,
            default_sides,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: DEGENERATE_NORMAL_EPSILON,
            default_sides: DEFAULT_SIDES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the default side count cannot form a closed ring.
    InvalidSides(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidSides(value) => {
                write!(f, "default_sides must be >= {MIN_SIDES}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a radius lies on the revolution axis.
///
/// `extent` is the size of the profile (its largest absolute coordinate), so
/// the test holds at any scale: a radius counts as zero when it is at most
/// `tolerance` times the extent.
///
/// # Example
///
/// ```rust
/// use config::constants::on_axis;
///
/// assert!(on_axis(0.0, 1.0, 1e-12));
/// assert!(on_axis(-1e-15, 1.0, 1e-12));
/// assert!(!on_axis(1e-9, 1e-6, 1e-12));
/// assert!(!on_axis(0.25, 1.0, 1e-12));
/// ```
#[inline]
pub fn on_axis(radius: f64, extent: f64, tolerance: f64) -> bool {
    radius.abs() <= tolerance * extent
}

/// Checks if a vector length counts as unit within UNIT_NORMAL_TOLERANCE.
///
/// # Example
///
/// ```rust
/// use config::constants::is_unit_length;
///
/// assert!(is_unit_length(1.0 + 1e-7));
/// assert!(!is_unit_length(0.5));
/// ```
#[inline]
pub fn is_unit_length(length: f64) -> bool {
    (length - 1.0).abs() <= UNIT_NORMAL_TOLERANCE
}
