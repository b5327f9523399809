//! First-person camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles; the forward direction and the
//! look-at target are derived from them on demand.
//!
//! - **Yaw**: Rotation around Y-axis (horizontal look, positive = look right)
//! - **Pitch**: Rotation around X-axis (vertical look, positive = look up)

use std::f32::consts::TAU;

use crate::math::{Mat4, Vec3};

/// Largest pitch magnitude, just short of straight up or down.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// A single step of interactive camera control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
}

/// First-person camera with position and yaw/pitch orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // radians
    pitch: f32, // radians
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a new camera at the given position, looking along +Z axis.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.look_at(target);
        camera
    }

    /// Rotates the camera by yaw (horizontal) and pitch (vertical) deltas.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rotate_yaw(yaw_delta);
        self.rotate_pitch(pitch_delta);
    }

    /// Applies one control step: translations move `step` world units,
    /// rotations turn `turn` radians.
    pub fn apply(&mut self, movement: CameraMove, step: f32, turn: f32) {
        match movement {
            CameraMove::Forward => self.move_forward(step),
            CameraMove::Backward => self.move_forward(-step),
            CameraMove::StrafeLeft => self.move_right(-step),
            CameraMove::StrafeRight => self.move_right(step),
            CameraMove::Up => self.move_up(step),
            CameraMove::Down => self.move_up(-step),
            CameraMove::TurnLeft => self.rotate(-turn, 0.0),
            CameraMove::TurnRight => self.rotate(turn, 0.0),
            CameraMove::LookUp => self.rotate(0.0, turn),
            CameraMove::LookDown => self.rotate(0.0, -turn),
        }
    }

    /// Positive values rotate right, negative values rotate left.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(TAU);
    }

    /// Positive values look up. Clamped to the pitch limits.
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Points the camera at a world position.
    ///
    /// Targets straight above or below keep the current yaw; a target equal to
    /// the position leaves the orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.yaw = direction.x.atan2(direction.z).rem_euclid(TAU);
        }

        if direction.length() > f32::EPSILON {
            self.pitch = direction
                .y
                .atan2(horizontal_len)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Moves the camera along its forward direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.forward() * distance;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    /// Moves the camera along the world up direction.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the camera's forward direction (unit length).
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Returns the camera's right direction, parallel to the ground.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// The point one unit ahead of the camera.
    pub fn target(&self) -> Vec3 {
        self.position + self.forward()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Computes the view matrix, placing the camera at the origin looking +z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target(), Vec3::UP)
    }
}
