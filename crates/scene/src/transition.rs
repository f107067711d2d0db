//! Time-driven camera transitions.
//!
//! A [`ViewTransitionSequencer`] tweens a host-owned camera from wherever it
//! currently is to a target [`ViewState`] over a fixed duration. The host
//! calls [`ViewTransitionSequencer::advance`] once per frame; the sequencer
//! writes the interpolated state through [`CameraHandle`] and lands exactly
//! on the target when the duration has elapsed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{CameraHandle, ViewState};

/// Progress slack so accumulated frame deltas still finish on the last frame.
pub(crate) const COMPLETION_EPSILON_S: f64 = 1e-9;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^2`: fast start, gentle landing.
    #[default]
    QuadOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// A single in-flight tween between two view states.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransition {
    pub from: ViewState,
    pub to: ViewState,
    pub duration_s: f64,
    pub elapsed_s: f64,
    pub easing: Easing,
}

impl ViewTransition {
    pub fn new(from: ViewState, to: ViewState, duration_s: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_s,
            elapsed_s: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`. Degenerate durations count as finished.
    pub fn progress(&self) -> f64 {
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return 1.0;
        }
        if self.elapsed_s + COMPLETION_EPSILON_S >= self.duration_s {
            return 1.0;
        }
        (self.elapsed_s / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn sample(&self) -> ViewState {
        let p = self.progress();
        if p >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, self.easing.apply(p))
        }
    }

    fn step(&mut self, dt_s: f64) {
        if dt_s.is_finite() && dt_s > 0.0 {
            self.elapsed_s += dt_s;
        }
    }
}

/// Outcome of [`ViewTransitionSequencer::begin`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitionStart {
    Started,
    /// A transition to a different target was cancelled; the new one starts
    /// from the camera's current interpolated state.
    Restarted,
    /// A transition to the same target is already in flight; nothing changed.
    AlreadyRunning,
}

/// Outcome of a single [`ViewTransitionSequencer::advance`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransitionStatus {
    Idle,
    Running { progress: f64 },
    /// Reported once, on the frame the camera reached the target.
    Completed,
}

#[derive(Debug, Default)]
pub struct ViewTransitionSequencer {
    easing: Easing,
    active: Option<ViewTransition>,
}

impl ViewTransitionSequencer {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            active: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn active(&self) -> Option<&ViewTransition> {
        self.active.as_ref()
    }

    /// Start tweening `camera` toward `target`.
    ///
    /// Idempotent per target: re-requesting the target already in flight is a
    /// no-op, while a different target restarts from the camera's current state.
    pub fn begin<C>(&mut self, camera: &C, target: ViewState, duration_s: f64) -> TransitionStart
    where
        C: CameraHandle + ?Sized,
    {
        let outcome = match self.active {
            Some(active) if active.to == target => {
                debug!(to = ?target, "transition to same target already running");
                return TransitionStart::AlreadyRunning;
            }
            Some(active) => {
                debug!(from = ?active.to, to = ?target, "transition retargeted");
                TransitionStart::Restarted
            }
            None => TransitionStart::Started,
        };

        let from = camera.view_state();
        debug!(?from, to = ?target, duration_s, easing = ?self.easing, "transition started");
        self.active = Some(ViewTransition::new(from, target, duration_s, self.easing));
        outcome
    }

    /// Drop the in-flight transition, leaving the camera where it is.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Advance by `dt_s` seconds and write the interpolated state to `camera`.
    pub fn advance<C>(&mut self, dt_s: f64, camera: &mut C) -> TransitionStatus
    where
        C: CameraHandle + ?Sized,
    {
        let Some(transition) = self.active.as_mut() else {
            return TransitionStatus::Idle;
        };

        transition.step(dt_s);
        camera.set_view_state(transition.sample());

        if transition.is_complete() {
            debug!(to = ?transition.to, "transition completed");
            self.active = None;
            TransitionStatus::Completed
        } else {
            TransitionStatus::Running {
                progress: transition.progress(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Easing, TransitionStart, TransitionStatus, ViewTransitionSequencer};
    use crate::camera::{CameraHandle, SceneCamera, ViewState};
    use foundation::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn easing_is_monotonic_and_pinned() {
        for easing in [Easing::Linear, Easing::QuadOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            let mut last = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v >= last);
                last = v;
            }
        }
        assert_eq!(Easing::QuadOut.apply(2.0), 1.0);
        assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
    }

    #[test]
    fn idle_sequencer_leaves_camera_alone() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::default();
        assert_eq!(seq.advance(0.5, &mut camera), TransitionStatus::Idle);
        assert_eq!(camera.view_state(), ViewState::onboarding());
    }

    #[test]
    fn reaches_target_in_exactly_two_seconds_monotonically() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::new(Easing::QuadOut);
        assert_eq!(
            seq.begin(&camera, ViewState::normal(), 2.0),
            TransitionStart::Started
        );

        let dt = 1.0 / 60.0;
        let mut prev = camera.view_state();
        for frame in 1..=120 {
            let status = seq.advance(dt, &mut camera);
            let view = camera.view_state();
            assert!(view.fov >= prev.fov, "fov regressed on frame {frame}");
            assert!(view.position.x <= prev.position.x);
            assert!(view.position.z <= prev.position.z);
            assert_eq!(view.position.y, 5.0);
            if frame < 120 {
                assert!(matches!(status, TransitionStatus::Running { .. }));
            } else {
                assert_eq!(status, TransitionStatus::Completed);
            }
            prev = view;
        }

        assert_eq!(camera.view_state(), ViewState::normal());

        // Holds once finished.
        for _ in 0..30 {
            assert_eq!(seq.advance(dt, &mut camera), TransitionStatus::Idle);
        }
        assert_eq!(camera.view_state(), ViewState::normal());
    }

    #[test]
    fn linear_midpoint_is_halfway() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::new(Easing::Linear);
        seq.begin(&camera, ViewState::normal(), 2.0);
        seq.advance(1.0, &mut camera);
        assert_close(camera.view.fov, 27.5, 1e-12);
        assert_close(camera.view.position.x, 11.0, 1e-12);
        assert_close(camera.view.position.z, 3.5, 1e-12);
    }

    #[test]
    fn same_target_is_a_no_op() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::default();
        seq.begin(&camera, ViewState::normal(), 2.0);
        seq.advance(0.5, &mut camera);
        let elapsed_before = seq.active().map(|t| t.elapsed_s);

        assert_eq!(
            seq.begin(&camera, ViewState::normal(), 2.0),
            TransitionStart::AlreadyRunning
        );
        assert_eq!(seq.active().map(|t| t.elapsed_s), elapsed_before);
        assert_eq!(seq.active().map(|t| t.from), Some(ViewState::onboarding()));
    }

    #[test]
    fn new_target_restarts_from_current_state() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::new(Easing::Linear);
        seq.begin(&camera, ViewState::normal(), 2.0);
        seq.advance(1.0, &mut camera);
        let midway = camera.view_state();

        let other = ViewState::new(60.0, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(seq.begin(&camera, other, 1.0), TransitionStart::Restarted);
        let active = seq.active().copied().unwrap();
        assert_eq!(active.from, midway);
        assert_eq!(active.elapsed_s, 0.0);

        assert_eq!(seq.advance(1.0, &mut camera), TransitionStatus::Completed);
        assert_eq!(camera.view_state(), other);
    }

    #[test]
    fn zero_duration_snaps_to_target() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::default();
        seq.begin(&camera, ViewState::normal(), 0.0);
        assert_eq!(seq.advance(0.0, &mut camera), TransitionStatus::Completed);
        assert_eq!(camera.view_state(), ViewState::normal());
    }

    #[test]
    fn cancel_leaves_camera_in_place() {
        let mut camera = SceneCamera::default();
        let mut seq = ViewTransitionSequencer::default();
        seq.begin(&camera, ViewState::normal(), 2.0);
        seq.advance(0.5, &mut camera);
        let here = camera.view_state();
        assert!(seq.cancel());
        assert!(!seq.cancel());
        assert_eq!(seq.advance(0.5, &mut camera), TransitionStatus::Idle);
        assert_eq!(camera.view_state(), here);
    }
}
