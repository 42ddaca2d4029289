// Character animation playback

use std::collections::HashMap;

/// Commands the state machine issues to whatever plays character animation
///
/// The inbound half of the contract is `advance`: it reports when a
/// non-looping clip has just completed so the controller can queue the
/// animation-finished signal for its next step.
pub trait Animator {
    /// Start the clip identified by `tag`
    fn play_clip(&mut self, tag: &str);

    /// Set an integer parameter (e.g. the combo variant to show)
    fn set_parameter(&mut self, name: &str, value: i32);

    /// Mirror the sprite to match the facing direction
    fn set_flip_horizontal(&mut self, flip: bool);

    /// Advance playback by `dt`; true exactly once when a one-shot clip ends
    fn advance(&mut self, dt: f32) -> bool;
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "move", "attack")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Frame-based clip player implementing [`Animator`]
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Integer parameters set by states
    parameters: HashMap<String, i32>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Playback speed multiplier (1.0 = normal)
    playback_speed: f32,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            parameters: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: false,
            playback_speed: 1.0,
            flip_horizontal: false,
        }
    }

    /// Clip set used by the player character
    pub fn with_player_animations() -> Self {
        let mut player = Self::new();
        player.add_animation(AnimationClip::looping("idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("move", 8, 12.0));
        player.add_animation(AnimationClip::looping("jump", 4, 10.0));
        player.add_animation(AnimationClip::looping("dash", 4, 20.0));
        player.add_animation(AnimationClip::looping("wall_slide", 4, 10.0));
        // Attack finishing is what ends the attack state
        player.add_animation(AnimationClip::one_shot("attack", 6, 15.0));
        player
    }

    /// Clip set used by the skeleton enemy
    pub fn with_skeleton_animations() -> Self {
        let mut player = Self::new();
        player.add_animation(AnimationClip::looping("idle", 4, 8.0));
        player.add_animation(AnimationClip::looping("move", 6, 10.0));
        player.add_animation(AnimationClip::looping("stunned", 4, 12.0));
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Play an animation from the beginning
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set playback speed (1.0 = normal, 2.0 = double speed)
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed.max(0.0);
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Get an integer parameter
    pub fn parameter(&self, name: &str) -> Option<i32> {
        self.parameters.get(name).copied()
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Animator for AnimationPlayer {
    fn play_clip(&mut self, tag: &str) {
        let restart = self.current_animation != tag
            || !self.playing
            || self
                .animations
                .get(tag)
                .map(|clip| !clip.looping)
                .unwrap_or(false);

        if !self.animations.contains_key(tag) {
            log::warn!("No animation clip named '{}'", tag);
        }
        if restart {
            self.play_from_start(tag);
        }
    }

    fn set_parameter(&mut self, name: &str, value: i32) {
        self.parameters.insert(name.to_string(), value);
    }

    fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    fn advance(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return false;
        };

        self.frame_timer += dt * self.playback_speed;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Hold the last frame and report completion once
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    return true;
                }
            }
        }

        false
    }
}
