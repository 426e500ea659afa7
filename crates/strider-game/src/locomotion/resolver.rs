//! Per-frame movement decision core
//!
//! Owns the character state and mutates it exactly once per frame in a
//! fixed step order. Later steps may overwrite vertical velocity or
//! position written by earlier ones in the same frame (a jump edge
//! overrides the ground reset, for instance); that ordering is part of the
//! contract, so hosts must not reorder or parallelize pieces of a step.

use glam::Vec3;
use strider_physics::{
    admissible, penetration_correction, platform_ride_position, CharacterDimensions, ObjectId,
    ObjectTag, ProbeHit, WorldQuery,
};
use tracing::{error, warn};

use crate::input::{InputAction, InputState};

use super::config::{ConfigError, LocomotionConfig, UngatedPolicy};
use super::state::{AirState, CharacterState, LocomotionIntent};

/// Extra reach on the downward ground probe past resting clearance.
///
/// Must exceed a sinking platform's per-frame drop so riders keep contact,
/// while staying below a jump's first-frame ascent so the probe releases
/// the character.
const GROUND_PROBE_SLACK: f32 = 0.05;

/// The per-frame decision core: consumes an input snapshot and probe
/// results, mutates the character transform and vertical velocity, and
/// emits the active locomotion intent.
pub struct LocomotionResolver {
    config: LocomotionConfig,
    state: CharacterState,
    dimensions: Option<CharacterDimensions>,
    self_object: Option<ObjectId>,
    one_shot_active: bool,
    warned_missing_dimensions: bool,
}

impl LocomotionResolver {
    /// Create a resolver, validating the configuration once
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            error!("invalid locomotion config: {e}");
            return Err(e);
        }
        Ok(Self {
            config,
            state: CharacterState::default(),
            dimensions: None,
            self_object: None,
            one_shot_active: false,
            warned_missing_dimensions: false,
        })
    }

    /// Full character state
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Character world transform
    pub fn transform(&self) -> &strider_core::Transform {
        &self.state.transform
    }

    /// Active locomotion intent
    pub fn intent(&self) -> LocomotionIntent {
        self.state.intent
    }

    /// Provide the bounding dimensions once model geometry is known
    pub fn set_dimensions(&mut self, dimensions: CharacterDimensions) {
        self.dimensions = Some(dimensions);
    }

    pub fn dimensions(&self) -> Option<CharacterDimensions> {
        self.dimensions
    }

    /// Register the character's own world geometry so probes skip it
    pub fn set_self_object(&mut self, id: ObjectId) {
        self.self_object = Some(id);
    }

    /// Place the character and reset motion state
    pub fn spawn(&mut self, position: Vec3) {
        self.state = CharacterState {
            transform: strider_core::Transform::from_position(position),
            ..Default::default()
        };
        self.one_shot_active = false;
    }

    /// Called when the active one-shot clip has completed; expires the
    /// one-shot intent back to idle. Safe to call spuriously.
    pub fn finish_one_shot(&mut self) {
        if self.one_shot_active {
            self.one_shot_active = false;
            self.state.intent = LocomotionIntent::Idle;
        }
    }

    /// Advance one frame.
    ///
    /// Step order: overhead obstruction, ground check (+ platform riding),
    /// gravity, jump, turning, roll, attacks, gated translation, airborne
    /// resolution, intent fallback.
    pub fn step<W: WorldQuery>(&mut self, world: &W, input: &InputState, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let Some(dims) = self.dimensions else {
            self.step_ungated(input, dt);
            return;
        };

        let own = self.self_object;
        let exclude: &[ObjectId] = own.as_ref().map_or(&[], std::slice::from_ref);

        let forward_held = input.is_held(InputAction::MoveForward);
        let position = self.state.transform.position;

        // An obstruction overhead stops any ascent
        if self.state.vertical_velocity > 0.0
            && world
                .cast_ray(position, Vec3::Y, self.config.overhead_probe_range, exclude)
                .is_some()
        {
            self.state.vertical_velocity = 0.0;
        }

        // Ground check from the transform position, which rests exactly
        // `height` above the contact point
        let ground = world.cast_ray(
            position,
            Vec3::NEG_Y,
            dims.height + GROUND_PROBE_SLACK,
            exclude,
        );
        if let Some(hit) = &ground {
            let ascending =
                self.state.air == AirState::Jumping && self.state.vertical_velocity > 0.0;
            if !ascending {
                self.state.vertical_velocity = 0.0;
                if self.state.air == AirState::Falling {
                    // Landing from a fall settles onto the contact point
                    self.state.transform.position.y += penetration_correction(hit, dims.height);
                }
                if self.state.air != AirState::Jumping {
                    self.state.air = AirState::Grounded;
                }
            }
            // Ride a platform when not walking off it under own power
            if hit.tag == ObjectTag::MovingPlatform && !forward_held {
                self.state.transform.position = platform_ride_position(hit, dims.height);
            }
        } else if !forward_held && self.state.air != AirState::Jumping {
            // Forward movement resolves its own vertical placement; jumps
            // integrate in the airborne-resolution step below
            self.state.air = AirState::Falling;
            self.apply_gravity(dt);
        }

        // Jump edge; overwrites the ground reset from the check above
        let mut jumped = false;
        if input.is_just_pressed(InputAction::Jump) && self.state.air != AirState::Jumping {
            self.state.vertical_velocity = self.config.jump_impulse;
            self.state.air = AirState::Jumping;
            jumped = true;
        }

        // Turning is never gated
        if input.is_held(InputAction::TurnLeft) {
            self.state.transform.rotate_y(self.config.turn_speed * dt);
        }
        if input.is_held(InputAction::TurnRight) {
            self.state.transform.rotate_y(-self.config.turn_speed * dt);
        }

        // One-shot actions; the roll dash skips the admissibility gate
        let mut one_shot_triggered = None;
        if input.is_just_pressed(InputAction::Roll) {
            let forward = self.state.transform.forward();
            self.state.transform.position += forward * self.config.roll_speed * dt;
            one_shot_triggered = Some(LocomotionIntent::Roll);
        }
        if input.is_just_pressed(InputAction::Attack1) {
            one_shot_triggered = Some(LocomotionIntent::Attack1);
        }
        if input.is_just_pressed(InputAction::Attack2) {
            one_shot_triggered = Some(LocomotionIntent::Attack2);
        }

        // Gated translation along the facing axis
        let forward = self.state.transform.forward();
        let mut moved_back = false;
        let mut moved_forward = false;
        if input.is_held(InputAction::MoveBackward) {
            moved_back =
                self.try_move(world, &ground, -forward, self.config.walk_speed, dims, input, dt, exclude);
        }
        if forward_held {
            moved_forward =
                self.try_move(world, &ground, forward, self.config.run_speed, dims, input, dt, exclude);
        }

        // Airborne resolution: land on descent, otherwise keep integrating
        if self.state.air == AirState::Jumping {
            match ground.as_ref() {
                Some(hit) if self.state.vertical_velocity <= 0.0 => {
                    self.state.transform.position.y += penetration_correction(hit, dims.height);
                    self.state.vertical_velocity = 0.0;
                    self.state.air = AirState::Grounded;
                }
                _ => self.apply_gravity(dt),
            }
        }

        self.resolve_intent(input, one_shot_triggered, jumped, moved_forward, moved_back);
    }

    /// Gate a translation step and resolve vertical placement before it.
    /// Returns whether the step happened.
    #[allow(clippy::too_many_arguments)]
    fn try_move<W: WorldQuery>(
        &mut self,
        world: &W,
        ground: &Option<ProbeHit>,
        direction: Vec3,
        speed: f32,
        dims: CharacterDimensions,
        input: &InputState,
        dt: f32,
        exclude: &[ObjectId],
    ) -> bool {
        let position = self.state.transform.position;
        if !admissible(world, position, direction, &dims, &self.config.gate, exclude) {
            return false;
        }

        if let Some(hit) = ground {
            self.state.transform.position.y += penetration_correction(hit, dims.height);
        } else {
            // Clearance probe from the feet: hug the ground when close,
            // otherwise keep falling
            let feet = position - Vec3::Y * dims.height;
            let near_ground =
                world.cast_ray(feet, Vec3::NEG_Y, self.config.ground_snap_range, exclude);
            match near_ground {
                Some(hit) if !input.is_held(InputAction::Jump) => {
                    self.state.transform.position.y = hit.point.y + dims.height;
                }
                _ => {
                    if self.state.air != AirState::Jumping {
                        self.state.air = AirState::Falling;
                        self.apply_gravity(dt);
                    }
                }
            }
        }

        self.state.transform.position += direction * speed * dt;
        true
    }

    fn apply_gravity(&mut self, dt: f32) {
        self.state.vertical_velocity -= self.config.gravity * dt;
        self.state.transform.position.y += self.state.vertical_velocity * dt;
    }

    /// Assign the frame's single intent. One-shots hold until their clip
    /// completion expires them; pure turning keeps the previous intent.
    fn resolve_intent(
        &mut self,
        input: &InputState,
        one_shot_triggered: Option<LocomotionIntent>,
        jumped: bool,
        moved_forward: bool,
        moved_back: bool,
    ) {
        if let Some(one_shot) = one_shot_triggered {
            self.state.intent = one_shot;
            self.one_shot_active = true;
            return;
        }
        if self.one_shot_active {
            return;
        }

        let turning =
            input.is_held(InputAction::TurnLeft) || input.is_held(InputAction::TurnRight);
        self.state.intent = if jumped || self.state.air == AirState::Jumping {
            LocomotionIntent::Jump
        } else if moved_forward {
            LocomotionIntent::Run
        } else if moved_back {
            LocomotionIntent::Walk
        } else if self.state.air == AirState::Falling {
            LocomotionIntent::Fall
        } else if turning {
            // Rotation in place keeps whatever was playing
            self.state.intent
        } else {
            LocomotionIntent::Idle
        };
    }

    /// Frame step used while dimensions are unknown: no probes can be
    /// sized, so collision gating is skipped entirely
    fn step_ungated(&mut self, input: &InputState, dt: f32) {
        if !self.warned_missing_dimensions {
            warn!("character dimensions unavailable; collision gating disabled");
            self.warned_missing_dimensions = true;
        }
        if self.config.ungated_policy == UngatedPolicy::Hold {
            return;
        }

        if input.is_held(InputAction::TurnLeft) {
            self.state.transform.rotate_y(self.config.turn_speed * dt);
        }
        if input.is_held(InputAction::TurnRight) {
            self.state.transform.rotate_y(-self.config.turn_speed * dt);
        }

        let mut one_shot_triggered = None;
        if input.is_just_pressed(InputAction::Roll) {
            let forward = self.state.transform.forward();
            self.state.transform.position += forward * self.config.roll_speed * dt;
            one_shot_triggered = Some(LocomotionIntent::Roll);
        }
        if input.is_just_pressed(InputAction::Attack1) {
            one_shot_triggered = Some(LocomotionIntent::Attack1);
        }
        if input.is_just_pressed(InputAction::Attack2) {
            one_shot_triggered = Some(LocomotionIntent::Attack2);
        }

        let forward = self.state.transform.forward();
        let mut moved_back = false;
        let mut moved_forward = false;
        if input.is_held(InputAction::MoveBackward) {
            self.state.transform.position += -forward * self.config.walk_speed * dt;
            moved_back = true;
        }
        if input.is_held(InputAction::MoveForward) {
            self.state.transform.position += forward * self.config.run_speed * dt;
            moved_forward = true;
        }

        self.resolve_intent(input, one_shot_triggered, false, moved_forward, moved_back);
    }
}
