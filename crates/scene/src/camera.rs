use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Camera projection state that the transition sequencer animates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub position: Vec3,
}

impl ViewState {
    pub fn new(fov: f64, position: Vec3) -> Self {
        Self { fov, position }
    }

    /// Pose of the camera while the splash is showing.
    pub fn onboarding() -> Self {
        Self::new(15.0, Vec3::new(12.0, 5.0, 4.0))
    }

    /// Pose the camera settles into once the scene is interactive.
    pub fn normal() -> Self {
        Self::new(40.0, Vec3::new(10.0, 5.0, 3.0))
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            fov: self.fov + (other.fov - self.fov) * t,
            position: self.position.lerp(other.position, t),
        }
    }
}

/// Access to a camera owned by the rendering host.
///
/// The sequencer only ever borrows a camera through this trait for the
/// duration of a call; it never keeps one.
pub trait CameraHandle {
    fn view_state(&self) -> ViewState;
    fn set_view_state(&mut self, state: ViewState);
}

/// Perspective camera looking at `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneCamera {
    pub view: ViewState,
    pub target: Vec3,
    pub near: f64,
    pub far: f64,
}

impl SceneCamera {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            target: Vec3::ZERO,
            near: 0.1,
            far: 2000.0,
        }
    }

    pub fn fov_y_rad(&self) -> f64 {
        self.view.fov.to_radians()
    }

    pub fn forward_direction(&self) -> Vec3 {
        (self.target - self.view.position).normalize()
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(ViewState::onboarding())
    }
}

impl CameraHandle for SceneCamera {
    fn view_state(&self) -> ViewState {
        self.view
    }

    fn set_view_state(&mut self, state: ViewState) {
        self.view = state;
    }
}
