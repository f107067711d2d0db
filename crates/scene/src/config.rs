//! Scene configuration.
//!
//! Every field has a default matching the landing page, so an empty JSON
//! object (or no file at all) yields the stock scene.

use std::path::Path;

use foundation::Rgb;
use foundation::math::{CoordinatePolicy, GeoPoint};
use serde::{Deserialize, Serialize};

use crate::camera::ViewState;
use crate::transition::Easing;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read scene config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse scene config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid scene config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub globe: GlobeConfig,
    pub clouds: CloudConfig,
    pub grid: GridConfig,
    pub markers: MarkerConfig,
    pub sun: SunConfig,
    pub atmosphere: AtmosphereConfig,
    pub textures: TextureConfig,
    pub splash: SplashConfig,
    pub clear_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial: ViewState,
    pub normal: ViewState,
    pub transition_s: f64,
    pub easing: Easing,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f64,
    pub segments: u32,
    /// Earth spin about +Y, radians per second.
    pub spin_rad_s: f64,
    pub atmosphere_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub enabled: bool,
    pub scale: f64,
    pub opacity: f64,
    pub spin_rad_s: f64,
    pub texture: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub scale: f64,
    pub opacity: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Radius markers are projected onto, slightly above the surface.
    pub radius: f64,
    pub size: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Seconds per full turn about the marker's own Z axis.
    pub spin_period_s: f64,
    pub texture: String,
    pub policy: CoordinatePolicy,
    pub storms: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub phi: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub day_color: Rgb,
    pub twilight_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub day: String,
    pub night: String,
    pub specular_clouds: String,
    pub anisotropy: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// How long the splash stays up before the scene goes normal.
    pub hold_s: f64,
    /// Length of the fade-out animation.
    pub fade_s: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            globe: GlobeConfig::default(),
            clouds: CloudConfig::default(),
            grid: GridConfig::default(),
            markers: MarkerConfig::default(),
            sun: SunConfig::default(),
            atmosphere: AtmosphereConfig::default(),
            textures: TextureConfig::default(),
            splash: SplashConfig::default(),
            clear_color: Rgb::new(0.0, 0.0, 17.0 / 255.0),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial: ViewState::onboarding(),
            normal: ViewState::normal(),
            transition_s: 2.0,
            easing: Easing::default(),
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            segments: 64,
            spin_rad_s: 0.1,
            atmosphere_scale: 1.04,
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1.03,
            opacity: 0.7,
            spin_rad_s: 0.02,
            texture: "images/static/earth/clouds.jpg".to_string(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 1.05,
            opacity: 0.5,
            color: Rgb::WHITE,
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: 2.05,
            size: 0.5,
            scale: 0.3,
            opacity: 0.8,
            spin_period_s: 5.0,
            texture: "images/static/earth/hurricane.png".to_string(),
            policy: CoordinatePolicy::default(),
            storms: Vec::new(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            phi: std::f64::consts::FRAC_PI_2,
            theta: 0.5,
        }
    }
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            day_color: Rgb::new(0.0, 170.0 / 255.0, 1.0),
            twilight_color: Rgb::new(1.0, 102.0 / 255.0, 0.0),
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            day: "images/static/earth/day.jpg".to_string(),
            night: "images/static/earth/night.jpg".to_string(),
            specular_clouds: "images/static/earth/specularClouds.jpg".to_string(),
            anisotropy: 8,
        }
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            hold_s: 5.0,
            fade_s: 6.0,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, v: f64) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")))
            }
        }

        fn finite(name: &str, v: f64) -> Result<(), ConfigError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be finite, got {v}")))
            }
        }

        fn unit(name: &str, v: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {v}")))
            }
        }

        for (name, view) in [
            ("camera.initial", self.camera.initial),
            ("camera.normal", self.camera.normal),
        ] {
            if !(view.fov > 0.0 && view.fov < 180.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name}.fov must be in (0, 180), got {}",
                    view.fov
                )));
            }
            if !view.position.is_finite() {
                return Err(ConfigError::Invalid(format!("{name}.position must be finite")));
            }
        }
        if !(self.camera.transition_s.is_finite() && self.camera.transition_s >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.transition_s must be non-negative, got {}",
                self.camera.transition_s
            )));
        }
        positive("camera.near", self.camera.near)?;
        if !self.camera.far.is_finite() || self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid(
                "camera.far must exceed camera.near".to_string(),
            ));
        }

        positive("globe.radius", self.globe.radius)?;
        if self.globe.segments < 3 {
            return Err(ConfigError::Invalid(format!(
                "globe.segments must be at least 3, got {}",
                self.globe.segments
            )));
        }
        positive("globe.atmosphere_scale", self.globe.atmosphere_scale)?;
        finite("globe.spin_rad_s", self.globe.spin_rad_s)?;
        positive("clouds.scale", self.clouds.scale)?;
        finite("clouds.spin_rad_s", self.clouds.spin_rad_s)?;
        unit("clouds.opacity", self.clouds.opacity)?;
        positive("grid.scale", self.grid.scale)?;
        unit("grid.opacity", self.grid.opacity)?;

        positive("markers.radius", self.markers.radius)?;
        positive("markers.size", self.markers.size)?;
        positive("markers.scale", self.markers.scale)?;
        positive("markers.spin_period_s", self.markers.spin_period_s)?;
        unit("markers.opacity", self.markers.opacity)?;

        finite("sun.phi", self.sun.phi)?;
        finite("sun.theta", self.sun.theta)?;

        if !(self.splash.hold_s.is_finite() && self.splash.hold_s >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "splash.hold_s must be non-negative, got {}",
                self.splash.hold_s
            )));
        }
        positive("splash.fade_s", self.splash.fade_s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SceneConfig};
    use crate::camera::ViewState;
    use crate::transition::Easing;
    use foundation::Rgb;
    use foundation::math::{CoordinatePolicy, GeoPoint};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_the_stock_scene() {
        let config = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.camera.initial, ViewState::onboarding());
        assert_eq!(config.camera.normal, ViewState::normal());
        assert_eq!(config.camera.transition_s, 2.0);
        assert_eq!(config.camera.easing, Easing::QuadOut);
        assert_eq!(config.globe.radius, 2.0);
        assert_eq!(config.clear_color.to_hex(), "#000011");
        assert_eq!(config.atmosphere.day_color.to_hex(), "#00aaff");
        assert_eq!(config.atmosphere.twilight_color.to_hex(), "#ff6600");
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = SceneConfig::from_json_str(
            r##"{
                "camera": { "transition_s": 3.5, "easing": "linear" },
                "atmosphere": { "day_color": "#112233" },
                "markers": {
                    "policy": "reject",
                    "storms": [{ "latitude": 25.7, "longitude": -80.2 }]
                }
            }"##,
        )
        .unwrap();
        assert_eq!(config.camera.transition_s, 3.5);
        assert_eq!(config.camera.easing, Easing::Linear);
        assert_eq!(config.camera.normal, ViewState::normal());
        assert_eq!(config.atmosphere.day_color, Rgb::from_hex("#112233").unwrap());
        assert_eq!(config.atmosphere.twilight_color.to_hex(), "#ff6600");
        assert_eq!(config.markers.policy, CoordinatePolicy::Reject);
        assert_eq!(config.markers.storms, vec![GeoPoint::new(25.7, -80.2)]);
        assert_eq!(config.markers.radius, 2.05);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = SceneConfig::from_json_str(r#"{ "clear_color": "blue" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            r#"{ "globe": { "radius": 0.0 } }"#,
            r#"{ "camera": { "normal": { "fov": 0.0, "position": { "x": 0.0, "y": 0.0, "z": 1.0 } } } }"#,
            r#"{ "camera": { "transition_s": -1.0 } }"#,
            r#"{ "camera": { "near": 10.0, "far": 5.0 } }"#,
            r#"{ "clouds": { "opacity": 1.5 } }"#,
            r#"{ "markers": { "spin_period_s": 0.0 } }"#,
            r#"{ "splash": { "fade_s": 0.0 } }"#,
        ];
        for json in cases {
            let err = SceneConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}: {err}");
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let edits: [(&str, fn(&mut SceneConfig)); 6] = [
            ("camera.far", |c| c.camera.far = f64::NAN),
            ("sun.phi", |c| c.sun.phi = f64::NAN),
            ("sun.theta", |c| c.sun.theta = f64::INFINITY),
            ("globe.spin_rad_s", |c| c.globe.spin_rad_s = f64::INFINITY),
            ("clouds.spin_rad_s", |c| c.clouds.spin_rad_s = f64::NAN),
            ("markers.spin_period_s", |c| c.markers.spin_period_s = f64::INFINITY),
        ];
        for (field, edit) in edits {
            let mut config = SceneConfig::default();
            edit(&mut config);
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{field}: {err}");
        }
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SceneConfig::load("/nonexistent/earthview.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SceneConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SceneConfig::from_json_str(&json).unwrap(), config);
    }
}
