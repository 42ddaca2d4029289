// Deterministic collaborators for controller tests

use glam::Vec2;

use super::animation::Animator;
use super::body::{CharacterBody, SensorError};

/// Body whose contacts are set by the test instead of sensed
#[derive(Debug, Default)]
pub struct ScriptedBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub wall_right: bool,
    pub wall_left: bool,
    /// Every contact query fails with `BodyNotFound`
    pub fail_sensors: bool,
}

impl ScriptedBody {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

impl CharacterBody for ScriptedBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn ground_contact(&self, _anchor: Vec2, _max_distance: f32) -> Result<bool, SensorError> {
        if self.fail_sensors {
            return Err(SensorError::BodyNotFound);
        }
        Ok(self.grounded)
    }

    fn wall_contact(
        &self,
        _anchor: Vec2,
        direction: f32,
        _max_distance: f32,
    ) -> Result<bool, SensorError> {
        if self.fail_sensors {
            return Err(SensorError::BodyNotFound);
        }
        Ok(if direction > 0.0 {
            self.wall_right
        } else {
            self.wall_left
        })
    }
}

/// Animator that records every command it receives
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub clips: Vec<String>,
    pub parameters: Vec<(String, i32)>,
    pub flips: Vec<bool>,
    /// Report a finished clip on the next `advance`
    pub finish_next: bool,
}

impl RecordingAnimator {
    pub fn last_clip(&self) -> Option<&str> {
        self.clips.last().map(String::as_str)
    }

    pub fn last_parameter(&self, name: &str) -> Option<i32> {
        self.parameters
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }
}

impl Animator for RecordingAnimator {
    fn play_clip(&mut self, tag: &str) {
        self.clips.push(tag.to_string());
    }

    fn set_parameter(&mut self, name: &str, value: i32) {
        self.parameters.push((name.to_string(), value));
    }

    fn set_flip_horizontal(&mut self, flip: bool) {
        self.flips.push(flip);
    }

    fn advance(&mut self, _dt: f32) -> bool {
        std::mem::take(&mut self.finish_next)
    }
}
