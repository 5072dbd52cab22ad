/*
 * Camera Module
 *
 * A perspective orbit camera. It sits on the +z axis at `distance` from the
 * origin, looks at the origin, and can be orbited (yaw/pitch) by dragging and
 * dollied by scrolling. It projects world points to screen space for the
 * renderer and can describe its visible region as a bounds provider.
 */

use nannou::prelude::*;

use glam::Vec3;

use crate::bounds::FrustumBounds;

const NEAR_PLANE: f32 = 0.1;

pub struct Camera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            distance: 10.0,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 75f32.to_radians(),
            min_distance: 2.0,
            max_distance: 500.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // World space to camera space; the camera looks down -z
    pub fn to_view(&self, point: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = (-self.yaw).sin_cos();
        let x = cos_yaw * point.x + sin_yaw * point.z;
        let z = -sin_yaw * point.x + cos_yaw * point.z;

        let (sin_pitch, cos_pitch) = (-self.pitch).sin_cos();
        let y = cos_pitch * point.y - sin_pitch * z;
        let z = sin_pitch * point.y + cos_pitch * z;

        Vec3::new(x, y, z - self.distance)
    }

    // Pixels per world unit at depth 1
    pub fn focal_length(&self, window_rect: Rect) -> f32 {
        (window_rect.h() / 2.0) / (self.fov_y / 2.0).tan()
    }

    // Screen position and depth of a world point, None when behind the near plane
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<(Point2, f32)> {
        let view = self.to_view(point);
        let depth = -view.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = self.focal_length(window_rect);
        let screen = pt2(view.x / depth * focal, view.y / depth * focal) + window_rect.xy();
        Some((screen, depth))
    }

    // Region visible from the un-orbited camera; orbiting does not move it
    pub fn frustum_bounds(&self, window_rect: Rect, z_half_extent: f32) -> FrustumBounds {
        FrustumBounds {
            fov_y: self.fov_y,
            aspect: window_rect.w() / window_rect.h(),
            camera_distance: self.distance,
            z_half_extent,
        }
    }

    // Handle mouse wheel events for dollying
    pub fn zoom(&mut self, scroll: f32) {
        let zoom_factor = 1.0 - scroll * 0.1;
        self.distance = (self.distance * zoom_factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit by the cursor delta since the last event
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            self.yaw += delta.x * 0.01;
            self.pitch = (self.pitch + delta.y * 0.01).clamp(-1.4, 1.4);
            self.last_cursor_pos = position;
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
