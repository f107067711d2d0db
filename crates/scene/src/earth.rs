use foundation::math::{ProjectionError, Spherical, Vec3};
use foundation::time::Time;
use runtime::{EventBus, EventKind, Frame};
use tracing::{debug, info};

use crate::camera::{SceneCamera, ViewState};
use crate::config::{ConfigError, SceneConfig};
use crate::materials::LightingUniforms;
use crate::mode::{Mode, ModeTracker};
use crate::prefabs::{GlobeLayer, spawn_globe_layers};
use crate::transition::{TransitionStart, TransitionStatus, ViewTransitionSequencer};

#[derive(Debug)]
pub enum SceneError {
    Config(ConfigError),
    Projection(ProjectionError),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Config(e) => write!(f, "{e}"),
            SceneError::Projection(e) => write!(f, "cannot place marker: {e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Config(e) => Some(e),
            SceneError::Projection(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SceneError {
    fn from(e: ConfigError) -> Self {
        SceneError::Config(e)
    }
}

impl From<ProjectionError> for SceneError {
    fn from(e: ProjectionError) -> Self {
        SceneError::Projection(e)
    }
}

/// The animated globe scene.
///
/// Acts as the rendering host: it owns the camera and lends it to the
/// transition sequencer once per frame.
#[derive(Debug)]
pub struct EarthScene {
    config: SceneConfig,
    camera: SceneCamera,
    sequencer: ViewTransitionSequencer,
    mode: ModeTracker,
    sun: Spherical,
    layers: Vec<GlobeLayer>,
    time: Time,
}

impl EarthScene {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let sun = Spherical::new(1.0, config.sun.phi, config.sun.theta);
        let lighting = LightingUniforms::new(sun.to_cartesian(), &config.atmosphere);
        let layers = spawn_globe_layers(&config, lighting)?;

        let mut camera = SceneCamera::new(config.camera.initial);
        camera.near = config.camera.near;
        camera.far = config.camera.far;

        debug!(layers = layers.len(), "earth scene built");
        Ok(Self {
            sequencer: ViewTransitionSequencer::new(config.camera.easing),
            config,
            camera,
            mode: ModeTracker::new(),
            sun,
            layers,
            time: Time::ZERO,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn view_state(&self) -> ViewState {
        self.camera.view
    }

    pub fn mode(&self) -> Mode {
        self.mode.current()
    }

    pub fn layers(&self) -> &[GlobeLayer] {
        &self.layers
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn is_transitioning(&self) -> bool {
        self.sequencer.is_running()
    }

    pub fn sun_direction(&self) -> Vec3 {
        self.sun.to_cartesian()
    }

    /// Move the sun; materials pick it up on the next [`EarthScene::update`].
    pub fn set_sun(&mut self, phi: f64, theta: f64) {
        self.sun = Spherical::new(1.0, phi, theta);
    }

    /// Feed the mode coming from the page. The `Onboarding -> Normal` edge
    /// starts the camera transition; everything else is ignored.
    pub fn set_mode(
        &mut self,
        mode: Mode,
        frame: Frame,
        bus: &mut EventBus,
    ) -> Option<TransitionStart> {
        let change = self.mode.observe(mode)?;
        bus.emit(
            frame,
            EventKind::Mode,
            format!("{:?} -> {:?}", change.from, change.to),
        );

        let start = self.sequencer.begin(
            &self.camera,
            self.config.camera.normal,
            self.config.camera.transition_s,
        );
        if start != TransitionStart::AlreadyRunning {
            bus.emit(frame, EventKind::Transition, format!("{start:?}"));
        }
        Some(start)
    }

    /// Advance the scene by one frame.
    pub fn update(&mut self, frame: Frame, bus: &mut EventBus) -> TransitionStatus {
        self.time = frame.end_time();

        let lighting = LightingUniforms::new(self.sun.to_cartesian(), &self.config.atmosphere);
        for layer in &mut self.layers {
            layer.animate(self.time);
            layer.material.sync_lighting(lighting);
        }

        let status = self.sequencer.advance(frame.dt_s, &mut self.camera);
        if status == TransitionStatus::Completed {
            info!(
                fov = self.camera.view.fov,
                position = ?self.camera.view.position,
                "camera settled"
            );
            bus.emit(frame, EventKind::Transition, "Completed");
        }
        status
    }
}
