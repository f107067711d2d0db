use serde::{Deserialize, Serialize};

use super::Vec3;

/// A point on the globe in degrees. Latitude from the equator, longitude eastward.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_in_range(self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn clamped(self) -> Self {
        Self::new(
            self.latitude.clamp(-90.0, 90.0),
            self.longitude.clamp(-180.0, 180.0),
        )
    }
}

/// Scene-space position produced by [`project`].
pub type CartesianPoint = Vec3;

/// Project latitude/longitude (degrees) onto a sphere of `radius` centred at the origin.
///
/// The pole is +Y; longitude 0 lies on +X and increases toward +Z.
/// Inputs are not range-checked, see [`project_with_policy`].
pub fn project(radius: f64, latitude: f64, longitude: f64) -> CartesianPoint {
    let phi = (90.0 - latitude).to_radians();
    let theta = longitude.to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// How out-of-range coordinates are handled before projection.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Project whatever is given.
    #[default]
    Unchecked,
    /// Clamp latitude to [-90, 90] and longitude to [-180, 180].
    Clamp,
    /// Fail on out-of-range or non-finite input.
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    NonFinite,
    InvalidRadius(f64),
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::LatitudeOutOfRange(v) => {
                write!(f, "latitude {v} outside [-90, 90]")
            }
            ProjectionError::LongitudeOutOfRange(v) => {
                write!(f, "longitude {v} outside [-180, 180]")
            }
            ProjectionError::NonFinite => write!(f, "coordinate is not finite"),
            ProjectionError::InvalidRadius(r) => write!(f, "radius {r} must be positive"),
        }
    }
}

impl std::error::Error for ProjectionError {}

pub fn project_with_policy(
    policy: CoordinatePolicy,
    radius: f64,
    point: GeoPoint,
) -> Result<CartesianPoint, ProjectionError> {
    let point = match policy {
        CoordinatePolicy::Unchecked => point,
        CoordinatePolicy::Clamp => point.clamped(),
        CoordinatePolicy::Reject => {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ProjectionError::InvalidRadius(radius));
            }
            if !point.latitude.is_finite() || !point.longitude.is_finite() {
                return Err(ProjectionError::NonFinite);
            }
            if !point.is_in_range() {
                return Err(if (-90.0..=90.0).contains(&point.latitude) {
                    ProjectionError::LongitudeOutOfRange(point.longitude)
                } else {
                    ProjectionError::LatitudeOutOfRange(point.latitude)
                });
            }
            point
        }
    };
    Ok(project(radius, point.latitude, point.longitude))
}

/// Spherical coordinates in radians: `phi` is the polar angle from +Y,
/// `theta` the azimuth measured from +Z toward +X.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    pub radius: f64,
    pub phi: f64,
    pub theta: f64,
}

impl Spherical {
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    pub fn to_cartesian(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CoordinatePolicy, GeoPoint, ProjectionError, Spherical, project, project_with_policy,
    };
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert_close(a.x, b.x, 1e-9);
        assert_close(a.y, b.y, 1e-9);
        assert_close(a.z, b.z, 1e-9);
    }

    #[test]
    fn equator_prime_meridian_is_plus_x() {
        assert_vec_close(project(2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn poles_lie_on_y_axis() {
        assert_vec_close(project(2.0, 90.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_vec_close(project(2.0, -90.0, 0.0), Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn longitude_ninety_east_is_plus_z() {
        assert_vec_close(project(1.0, 0.0, 90.0), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn points_lie_on_sphere() {
        let radius = 2.05;
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let p = project(radius, lat, lon);
                assert_close(p.length_squared(), radius * radius, 1e-9);
                lon += 15.0;
            }
            lat += 7.5;
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let a = project(2.05, 25.7, -80.2);
        let b = project(2.05, 25.7, -80.2);
        assert_eq!(a, b);
    }

    #[test]
    fn unchecked_policy_matches_project() {
        let p = GeoPoint::new(120.0, 200.0);
        let projected = project_with_policy(CoordinatePolicy::Unchecked, 1.0, p).unwrap();
        assert_eq!(projected, project(1.0, 120.0, 200.0));
    }

    #[test]
    fn clamp_policy_pins_to_range() {
        let projected =
            project_with_policy(CoordinatePolicy::Clamp, 1.0, GeoPoint::new(135.0, 10.0)).unwrap();
        assert_vec_close(projected, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn reject_policy_reports_the_offending_value() {
        let reject = |p| project_with_policy(CoordinatePolicy::Reject, 1.0, p);
        assert_eq!(
            reject(GeoPoint::new(91.0, 0.0)),
            Err(ProjectionError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            reject(GeoPoint::new(0.0, -181.0)),
            Err(ProjectionError::LongitudeOutOfRange(-181.0))
        );
        assert_eq!(
            reject(GeoPoint::new(-95.0, 200.0)),
            Err(ProjectionError::LatitudeOutOfRange(-95.0))
        );
        assert!(reject(GeoPoint::new(-90.0, 180.0)).is_ok());
        assert_eq!(
            reject(GeoPoint::new(f64::NAN, 0.0)),
            Err(ProjectionError::NonFinite)
        );
        assert_eq!(
            project_with_policy(CoordinatePolicy::Reject, 0.0, GeoPoint::new(0.0, 0.0)),
            Err(ProjectionError::InvalidRadius(0.0))
        );
        assert!(reject(GeoPoint::new(-90.0, 180.0)).is_ok());
    }

    #[test]
    fn spherical_equator_azimuth_zero_is_plus_z() {
        let v = Spherical::new(1.0, std::f64::consts::FRAC_PI_2, 0.0).to_cartesian();
        assert_vec_close(v, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn spherical_is_unit_for_unit_radius() {
        let v = Spherical::new(1.0, 0.7, 0.5).to_cartesian();
        assert_close(v.length(), 1.0, 1e-12);
    }
}
