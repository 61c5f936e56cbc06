//! Animation state machine with cross-fade transitions
//!
//! Tracks which clip an actor is playing and blends state changes over a
//! fixed window. Clip playback position lives here and is advanced once
//! per tick; an attached renderer samples it.

use std::collections::HashMap;

/// Cross-fade window in seconds
pub const CROSS_FADE: f32 = 0.3;

/// Clip names the simulation requests
pub mod clip_names {
    pub const IDLE: &str = "Idle";
    pub const WALK: &str = "Walk";
    pub const RUN: &str = "Run";
    pub const RUN_BACK: &str = "Run_Back";
    pub const RUN_LEFT: &str = "Run_Left";
    pub const RUN_RIGHT: &str = "Run_Right";
    pub const SWORD_SLASH: &str = "Sword_Slash";
}

/// An animation clip as delivered by the rig loader
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Clip length in seconds
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Clip lookup table for a character rig. Empty until the rig finishes
/// loading; state changes against an empty library no-op.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<String, AnimationClip>,
}

impl ClipLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from loader output
    pub fn from_clips(clips: Vec<AnimationClip>) -> Self {
        Self {
            clips: clips
                .into_iter()
                .map(|clip| (clip.name.clone(), clip))
                .collect(),
        }
    }

    /// Whether a clip with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Look up a clip by name
    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the library holds no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// An in-flight cross-fade from a previous clip
#[derive(Debug, Clone)]
struct CrossFade {
    /// The outgoing clip, still fading out
    from: String,
    /// Seconds left in the fade window
    remaining: f32,
}

/// Per-actor animation playback state
#[derive(Debug, Clone)]
pub struct AnimationState {
    current_clip: Option<String>,
    playback_speed: f32,
    playback_time: f32,
    fade: Option<CrossFade>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current_clip: None,
            playback_speed: 1.0,
            playback_time: 0.0,
            fade: None,
        }
    }
}

impl AnimationState {
    /// Create a fresh state with no clip playing
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active clip, if any
    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Playback speed of the active clip
    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    /// Playback position of the active clip in clip-seconds
    pub fn playback_time(&self) -> f32 {
        self.playback_time
    }

    /// Whether a cross-fade is in flight
    pub fn is_transitioning(&self) -> bool {
        self.fade.is_some()
    }

    /// Name of the outgoing clip while a cross-fade is in flight
    pub fn outgoing_clip(&self) -> Option<&str> {
        self.fade.as_ref().map(|fade| fade.from.as_str())
    }

    /// Blend weight of the incoming clip, 0 at fade start up to 1
    pub fn fade_in_weight(&self) -> f32 {
        match &self.fade {
            Some(fade) => 1.0 - (fade.remaining / CROSS_FADE).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Blend weight of the outgoing clip
    pub fn fade_out_weight(&self) -> f32 {
        1.0 - self.fade_in_weight()
    }

    /// Switch to a named clip at the given playback speed.
    ///
    /// No-op when `name` is already active or the library lacks it.
    /// Otherwise the previous clip starts fading out while the new clip
    /// fades in and plays; the active name and speed change immediately.
    pub fn set_state(&mut self, clips: &ClipLibrary, name: &str, speed: f32) {
        if self.current_clip.as_deref() == Some(name) || !clips.contains(name) {
            return;
        }

        self.fade = self.current_clip.take().map(|from| CrossFade {
            from,
            remaining: CROSS_FADE,
        });
        self.current_clip = Some(name.to_string());
        self.playback_speed = speed;
        self.playback_time = 0.0;
    }

    /// Advance playback and burn down any cross-fade window.
    pub fn advance(&mut self, delta: f32) {
        self.playback_time += delta * self.playback_speed;
        if let Some(fade) = &mut self.fade {
            fade.remaining -= delta;
            if fade.remaining <= 0.0 {
                self.fade = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ClipLibrary {
        ClipLibrary::from_clips(vec![
            AnimationClip::new(clip_names::IDLE, 2.0),
            AnimationClip::new(clip_names::WALK, 1.0),
        ])
    }

    #[test]
    fn test_set_state_is_idempotent() {
        let clips = library();
        let mut state = AnimationState::new();

        state.set_state(&clips, clip_names::IDLE, 1.0);
        state.advance(0.1);
        let time_before = state.playback_time();
        let transitioning_before = state.is_transitioning();

        state.set_state(&clips, clip_names::IDLE, 1.0);
        assert_eq!(state.playback_time(), time_before);
        assert_eq!(state.is_transitioning(), transitioning_before);
        assert_eq!(state.current_clip(), Some(clip_names::IDLE));
    }

    #[test]
    fn test_missing_clip_is_a_noop() {
        let clips = library();
        let mut state = AnimationState::new();
        state.set_state(&clips, clip_names::IDLE, 1.0);

        state.set_state(&clips, "Backflip", 2.0);
        assert_eq!(state.current_clip(), Some(clip_names::IDLE));
        assert_eq!(state.playback_speed(), 1.0);
    }

    #[test]
    fn test_empty_library_is_a_noop() {
        let clips = ClipLibrary::new();
        let mut state = AnimationState::new();
        state.set_state(&clips, clip_names::IDLE, 1.0);
        assert_eq!(state.current_clip(), None);
    }

    #[test]
    fn test_cross_fade_window() {
        let clips = library();
        let mut state = AnimationState::new();

        // First clip starts without a fade.
        state.set_state(&clips, clip_names::IDLE, 1.0);
        assert!(!state.is_transitioning());

        state.set_state(&clips, clip_names::WALK, 1.5);
        assert!(state.is_transitioning());
        assert_eq!(state.outgoing_clip(), Some(clip_names::IDLE));
        assert_eq!(state.current_clip(), Some(clip_names::WALK));
        assert_eq!(state.playback_speed(), 1.5);
        assert_eq!(state.fade_in_weight(), 0.0);

        state.advance(0.15);
        assert!((state.fade_in_weight() - 0.5).abs() < 1e-5);
        assert!((state.fade_out_weight() - 0.5).abs() < 1e-5);

        state.advance(0.2);
        assert!(!state.is_transitioning());
        assert_eq!(state.fade_in_weight(), 1.0);
    }

    #[test]
    fn test_advance_scales_with_playback_speed() {
        let clips = library();
        let mut state = AnimationState::new();
        state.set_state(&clips, clip_names::WALK, 2.0);
        state.advance(0.25);
        assert!((state.playback_time() - 0.5).abs() < 1e-6);
    }
}
