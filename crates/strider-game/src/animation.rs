//! Intent-driven animation selection
//!
//! The state machine owns no clip data; it maps locomotion intents to clip
//! names and talks to the host's animation system through
//! [`AnimationPlayback`]. One-shot clips hand back a [`ClipToken`] so the
//! host can report completion without racing a retrigger.

use tracing::debug;

use crate::locomotion::LocomotionIntent;

/// Fade duration applied to both sides of every clip transition
pub const CROSSFADE_SECONDS: f32 = 0.2;

/// Host-side animation surface.
///
/// Implementations wrap whatever mixer the host renders with. Clip names
/// come from the [`AnimationSet`]; unknown names should be ignored.
pub trait AnimationPlayback {
    /// Start a clip, fading it in over `fade_in` seconds
    fn play(&mut self, clip: &str, fade_in: f32);
    /// Fade a clip out over `fade_out` seconds
    fn stop(&mut self, clip: &str, fade_out: f32);
    /// Mark a clip to play once instead of looping
    fn set_loop_once(&mut self, clip: &str);
    /// Mark a clip to hold its final frame after finishing
    fn set_clamp_when_finished(&mut self, clip: &str);
}

/// Clip names available on the loaded model.
///
/// Every entry is optional; an intent whose clip is absent plays nothing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSet {
    pub idle: Option<String>,
    pub walk: Option<String>,
    pub run: Option<String>,
    pub jump: Option<String>,
    pub jump_idle: Option<String>,
    pub jump_land: Option<String>,
    pub fall: Option<String>,
    pub action1: Option<String>,
    pub action2: Option<String>,
    pub action3: Option<String>,
    pub action4: Option<String>,
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self {
            idle: Some("idle".into()),
            walk: Some("walk".into()),
            run: Some("run".into()),
            jump: Some("jump".into()),
            jump_idle: Some("jumpIdle".into()),
            jump_land: Some("jumpLand".into()),
            fall: Some("fall".into()),
            action1: Some("action1".into()),
            action2: Some("action2".into()),
            action3: Some("action3".into()),
            action4: Some("action4".into()),
        }
    }
}

impl AnimationSet {
    /// Clip that plays for an intent, if the model has one.
    ///
    /// The roll maps to `action3`, the attacks to `action1`/`action2`;
    /// `jump_idle`, `jump_land` and `action4` are host-driven extras with
    /// no intent of their own.
    pub fn clip_for(&self, intent: LocomotionIntent) -> Option<&str> {
        let clip = match intent {
            LocomotionIntent::Idle => &self.idle,
            LocomotionIntent::Walk => &self.walk,
            LocomotionIntent::Run => &self.run,
            LocomotionIntent::Jump => &self.jump,
            LocomotionIntent::Fall => &self.fall,
            LocomotionIntent::Roll => &self.action3,
            LocomotionIntent::Attack1 => &self.action1,
            LocomotionIntent::Attack2 => &self.action2,
        };
        clip.as_deref()
    }
}

/// Handle for one activation of a one-shot clip.
///
/// Minted from a generation counter, so a token from a superseded
/// activation compares unequal to the live one and its completion is
/// dropped instead of double-firing the reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipToken(u64);

/// Maps the frame's locomotion intent to playback calls
#[derive(Debug)]
pub struct AnimationStateMachine {
    set: AnimationSet,
    current: Option<LocomotionIntent>,
    generation: u64,
    live_token: Option<ClipToken>,
}

impl AnimationStateMachine {
    pub fn new(set: AnimationSet) -> Self {
        Self {
            set,
            current: None,
            generation: 0,
            live_token: None,
        }
    }

    /// Name of the clip the current intent plays, if any
    pub fn current_clip(&self) -> Option<&str> {
        self.current.and_then(|intent| self.set.clip_for(intent))
    }

    /// Drive playback for this frame's intent.
    ///
    /// An unchanged intent is a no-op. A change crossfades the previous
    /// clip out and the next one in over [`CROSSFADE_SECONDS`]; `Jump` and
    /// the one-shot intents play once and clamp on their final frame.
    /// Starting a one-shot clip returns the token the host must pass to
    /// [`clip_finished`](Self::clip_finished) when it completes.
    pub fn update<P: AnimationPlayback>(
        &mut self,
        intent: LocomotionIntent,
        playback: &mut P,
    ) -> Option<ClipToken> {
        if self.current == Some(intent) {
            return None;
        }

        if let Some(previous) = self.current_clip() {
            playback.stop(previous, CROSSFADE_SECONDS);
        }

        let clip = self.set.clip_for(intent);
        if let Some(clip) = clip {
            if intent.is_one_shot() || intent == LocomotionIntent::Jump {
                playback.set_loop_once(clip);
                playback.set_clamp_when_finished(clip);
            }
            playback.play(clip, CROSSFADE_SECONDS);
        } else {
            debug!(?intent, "no clip bound for intent");
        }

        self.current = Some(intent);
        if intent.is_one_shot() && clip.is_some() {
            self.generation += 1;
            let token = ClipToken(self.generation);
            self.live_token = Some(token);
            Some(token)
        } else {
            self.live_token = None;
            None
        }
    }

    /// Report that a one-shot clip finished playing.
    ///
    /// Returns whether the token is still live; a `true` result means the
    /// caller should expire the one-shot intent (via
    /// `LocomotionResolver::finish_one_shot`). Stale tokens from a
    /// superseded activation return `false` and change nothing.
    pub fn clip_finished(&mut self, token: ClipToken) -> bool {
        if self.live_token == Some(token) {
            self.live_token = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlaybackEvent {
    Play(String, f32),
    Stop(String, f32),
    LoopOnce(String),
    Clamp(String),
}

/// Test double that records every playback call in order
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPlayback {
    pub events: Vec<PlaybackEvent>,
}

#[cfg(test)]
impl AnimationPlayback for RecordingPlayback {
    fn play(&mut self, clip: &str, fade_in: f32) {
        self.events.push(PlaybackEvent::Play(clip.into(), fade_in));
    }

    fn stop(&mut self, clip: &str, fade_out: f32) {
        self.events.push(PlaybackEvent::Stop(clip.into(), fade_out));
    }

    fn set_loop_once(&mut self, clip: &str) {
        self.events.push(PlaybackEvent::LoopOnce(clip.into()));
    }

    fn set_clamp_when_finished(&mut self, clip: &str) {
        self.events.push(PlaybackEvent::Clamp(clip.into()));
    }
}
