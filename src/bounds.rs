/*
 * Bounds Module
 *
 * Boundary containment asks a provider for the half-extents of the box an
 * agent must stay in. The default is a fixed box from the parameters; a host
 * with a perspective camera can instead fit the box to what the camera sees
 * at the agent's depth.
 */

use glam::Vec3;

pub trait BoundsProvider: Sync {
    // Half-extents of the containment box that applies at this position
    fn half_extents_at(&self, position: Vec3) -> Vec3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBounds(pub Vec3);

impl BoundsProvider for FixedBounds {
    fn half_extents_at(&self, _position: Vec3) -> Vec3 {
        self.0
    }
}

// Visible region of a camera on the +z axis looking towards -z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub fov_y: f32,
    pub aspect: f32,
    pub camera_distance: f32,
    pub z_half_extent: f32,
}

impl FrustumBounds {
    pub fn visible_half_height(&self, depth: f32) -> f32 {
        (self.fov_y / 2.0).tan() * (self.camera_distance - depth).abs()
    }

    pub fn visible_half_width(&self, depth: f32) -> f32 {
        self.visible_half_height(depth) * self.aspect
    }
}

impl BoundsProvider for FrustumBounds {
    fn half_extents_at(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            self.visible_half_width(position.z),
            self.visible_half_height(position.z),
            self.z_half_extent,
        )
    }
}
