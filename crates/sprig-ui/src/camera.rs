//! World ↔ screen projection.
//!
//! World space is +Y up, screen space +Y down; offsets are relative to the
//! center of whatever area the camera renders into.

use sprig_engine::coords::{ScreenVector, WorldPoint};

/// Tuning of [`Camera::follow_step`].
///
/// Each step moves `(drag_force * d² + extra_drag) * delta` towards the
/// target, `d` being the remaining distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FollowConfig {
    pub drag_force: f32,
    pub extra_drag: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self { drag_force: 10.0, extra_drag: 1.0 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    position: WorldPoint,
    unit_pixel_size: f32,
    zoom: f32,
    follow: FollowConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(WorldPoint::origin(), 1.0, 1.0)
    }
}

impl Camera {
    /// Camera centered on `position`, one world unit spanning
    /// `unit_pixel_size * zoom` screen pixels.
    pub fn new(position: WorldPoint, unit_pixel_size: f32, zoom: f32) -> Self {
        Self { position, unit_pixel_size, zoom, follow: FollowConfig::default() }
    }

    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    #[inline]
    pub fn unit_pixel_size(&self) -> f32 {
        self.unit_pixel_size
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    #[inline]
    pub fn follow_config(&self) -> FollowConfig {
        self.follow
    }

    pub fn set_follow_config(&mut self, config: FollowConfig) {
        self.follow = config;
    }

    /// Screen pixels per world unit.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.unit_pixel_size * self.zoom
    }

    pub fn world_to_screen_offset(&self, p: WorldPoint) -> ScreenVector {
        let k = self.scale();
        ScreenVector::new((p.x - self.position.x) * k, (self.position.y - p.y) * k)
    }

    pub fn screen_offset_to_world(&self, v: ScreenVector) -> WorldPoint {
        let k = self.scale();
        WorldPoint::new(self.position.x + v.x / k, self.position.y - v.y / k)
    }

    /// Moves towards `target`, faster the further away it is. Never overshoots.
    pub fn follow_step(&mut self, target: WorldPoint, delta: f32) {
        let offset = target - self.position;
        let d = offset.length();
        if d == 0.0 {
            return;
        }
        let step = (self.follow.drag_force * d * d + self.follow.extra_drag) * delta;
        if step >= d {
            self.position = target;
        } else {
            self.position += offset.resized(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn close(a: WorldPoint, b: WorldPoint) -> bool {
        a.distance(b) < 1e-4
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn projection_flips_y_and_scales() {
        let cam = Camera::new(w(1.0, 2.0), 16.0, 4.0);
        assert_eq!(cam.world_to_screen_offset(w(2.0, 3.0)), ScreenVector::new(64.0, -64.0));
        assert_eq!(cam.world_to_screen_offset(w(1.0, 2.0)), ScreenVector::zero());
    }

    #[test]
    fn projection_round_trips() {
        let cam = Camera::new(w(-3.5, 7.25), 16.0, 4.0);
        for p in [w(0.0, 0.0), w(5.0, -5.0), w(-3.5, 7.25), w(123.4, -0.01)] {
            assert!(close(cam.screen_offset_to_world(cam.world_to_screen_offset(p)), p));
        }
    }

    // ── follow ────────────────────────────────────────────────────────────

    #[test]
    fn follow_at_target_is_noop() {
        let mut cam = Camera::new(w(2.0, 2.0), 16.0, 1.0);
        cam.follow_step(w(2.0, 2.0), 1.0);
        assert_eq!(cam.position(), w(2.0, 2.0));
    }

    #[test]
    fn follow_moves_partially_without_overshoot() {
        let mut cam = Camera::new(w(0.0, 0.0), 16.0, 1.0);
        // (10 * 1 + 1) * 0.05 = 0.55 along +x
        cam.follow_step(w(1.0, 0.0), 0.05);
        assert!(close(cam.position(), w(0.55, 0.0)));

        let mut far = Camera::new(w(0.0, 0.0), 16.0, 1.0);
        for _ in 0..100 {
            far.follow_step(w(0.0, 10.0), 1.0 / 60.0);
            assert!(far.position().y <= 10.0);
        }
        assert!(close(far.position(), w(0.0, 10.0)));
    }

    #[test]
    fn follow_snaps_when_step_exceeds_distance() {
        let mut cam = Camera::new(w(0.0, 0.0), 16.0, 1.0);
        cam.follow_step(w(0.0, 0.5), 1.0);
        assert_eq!(cam.position(), w(0.0, 0.5));
    }

    #[test]
    fn follow_config_is_respected() {
        let mut cam = Camera::new(w(0.0, 0.0), 16.0, 1.0);
        cam.set_follow_config(FollowConfig { drag_force: 0.0, extra_drag: 2.0 });
        cam.follow_step(w(10.0, 0.0), 0.5);
        assert!(close(cam.position(), w(1.0, 0.0)));
    }
}
