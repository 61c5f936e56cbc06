//! Frame orchestrator
//!
//! Owns the actors, the static collision set, the clip library, the
//! intent snapshot, and the per-tick impulse accumulator, and runs the
//! fixed tick sequence: advance animations and cooldowns, resolve
//! locomotion, smooth orientation, integrate gravity, move horizontally,
//! resolve the ground, move vertically, clear the accumulator.

use std::collections::VecDeque;

use glam::{Quat, Vec3};
use tracing::{debug, info};

use emberblade_collision::{StaticCollisionSet, Triangle, TriangleMesh};
use emberblade_core::{ActorId, FrameClock};

use crate::actor::{Actor, ActorRegistry};
use crate::animation::{clip_names, AnimationClip, ClipLibrary};
use crate::combat::{self, AttackOutcome, TargetSurface};
use crate::config::WorldConfig;
use crate::input::{InputAction, InputHandler};
use crate::locomotion;

/// Playback speed for the melee swing clip
const SWORD_SLASH_SPEED: f32 = 1.8;

/// Starting health for the player actor
const PLAYER_HEALTH: f32 = 100.0;

/// One-shot load-completion events from external collaborators.
///
/// Loading happens asynchronously outside the simulation; completions are
/// queued here and applied atomically before the next tick reads the
/// affected state. The collision set is swapped in fully built, never
/// appended to while queries run.
#[derive(Debug, Clone)]
pub enum WorldEvent {
    /// Environment geometry finished loading; replaces the collision set
    EnvironmentLoaded(Vec<TriangleMesh>),
    /// The character rig's animation clips finished loading
    RigLoaded(Vec<AnimationClip>),
}

/// The frame orchestrator
pub struct World {
    /// Simulation tuning
    pub config: WorldConfig,
    /// Input handler; the host feeds it window events, the tick reads
    /// its state as the intent snapshot
    pub input: InputHandler,
    registry: ActorRegistry,
    player: ActorId,
    collision: StaticCollisionSet,
    clips: ClipLibrary,
    events: VecDeque<WorldEvent>,
    /// Accumulated displacement for the current tick
    impulse: Vec3,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a world with default tuning and a player at the origin
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Create a world with custom tuning
    pub fn with_config(config: WorldConfig) -> Self {
        let mut registry = ActorRegistry::new();
        let player = registry.spawn(Vec3::ZERO, PLAYER_HEALTH, Vec::new());
        Self {
            config,
            input: InputHandler::new(),
            registry,
            player,
            collision: StaticCollisionSet::default(),
            clips: ClipLibrary::new(),
            events: VecDeque::new(),
            impulse: Vec3::ZERO,
        }
    }

    /// Id of the player actor
    pub fn player_id(&self) -> ActorId {
        self.player
    }

    /// The player actor
    pub fn player(&self) -> &Actor {
        // The registry never drops the player; despawn_npc refuses its id.
        self.registry
            .get(self.player)
            .unwrap_or_else(|| unreachable!("player actor is never despawned"))
    }

    /// The player actor, mutably
    pub fn player_mut(&mut self) -> &mut Actor {
        self.registry
            .get_mut(self.player)
            .unwrap_or_else(|| unreachable!("player actor is never despawned"))
    }

    /// Look up any actor
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.registry.get(id)
    }

    /// Look up any actor mutably
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.registry.get_mut(id)
    }

    /// Spawn a targetable NPC with a local-space hitbox
    pub fn spawn_npc(&mut self, position: Vec3, health: f32, hitbox: Vec<Triangle>) -> ActorId {
        self.registry.spawn(position, health, hitbox)
    }

    /// Despawn an NPC. Refuses the player id.
    pub fn despawn_npc(&mut self, id: ActorId) -> Option<Actor> {
        if id == self.player {
            return None;
        }
        self.registry.despawn(id)
    }

    /// The static collision geometry currently registered
    pub fn collision(&self) -> &StaticCollisionSet {
        &self.collision
    }

    /// The clip library currently registered
    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    /// Queue a load-completion event; applied before the next tick
    pub fn push_event(&mut self, event: WorldEvent) {
        self.events.push_back(event);
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            match event {
                WorldEvent::EnvironmentLoaded(meshes) => {
                    let set = StaticCollisionSet::build(&meshes);
                    info!("environment registered: {} triangles", set.triangle_count());
                    self.collision = set;
                }
                WorldEvent::RigLoaded(clips) => {
                    info!("rig registered: {} clips", clips.len());
                    self.clips = ClipLibrary::from_clips(clips);
                    // Start idling once the rig is available.
                    let clips = &self.clips;
                    if let Some(player) = self.registry.get_mut(self.player) {
                        player.animation.set_state(clips, clip_names::IDLE, 1.0);
                    }
                }
            }
        }
    }

    /// Run one simulation tick.
    ///
    /// `camera_forward` is the camera's world-forward unit vector read
    /// once per tick; `delta` is the tick length in seconds. The step
    /// order is load-bearing: gravity is integrated before the
    /// horizontal move, the ground check runs against the horizontally
    /// moved position, and the vertical impulse lands last.
    pub fn tick(&mut self, camera_forward: Vec3, delta: f32) {
        self.drain_events();

        // 1. Advance animation states and resolve attack cooldowns.
        let cooldown = self.config.combat.cooldown;
        let clips = &self.clips;
        for actor in self.registry.iter_mut() {
            actor.animation.advance(delta);
            if actor.attack.update(cooldown, delta) {
                actor.animation.set_state(clips, clip_names::IDLE, 1.0);
            }
        }

        if self.input.state.is_just_pressed(InputAction::Attack) {
            self.attack(camera_forward);
        }

        // 2. Select the locomotion branch and accumulate its impulse.
        let out = locomotion::resolve(
            &self.input.state,
            camera_forward,
            &self.config.movement,
            delta,
        );
        self.impulse += out.displacement;

        let clips = &self.clips;
        let movement = &self.config.movement;
        let ground = &self.config.ground;
        let Some(player) = self.registry.get_mut(self.player) else {
            return;
        };
        player.animation.set_state(clips, out.clip, out.clip_speed);

        // 3. Smooth the orientation toward the camera-derived facing.
        if let Some(target) = out.target_facing {
            player.orientation =
                locomotion::turn_toward(player.orientation, target, movement.turn_rate, delta);
        }

        // 4. Integrate gravity; the impulse applies after ground checks.
        let vertical_impulse = player.vertical.integrate(ground, delta);

        // 5. Horizontal move (X/Z only).
        player.position += Vec3::new(self.impulse.x, 0.0, self.impulse.z);

        // 6. Ground check and snap/fall resolution.
        player
            .vertical
            .resolve_ground(&mut player.position, &self.collision, ground);

        // 7. Vertical move.
        player.position.y += vertical_impulse;

        // 8. Clear the accumulator and tick-local input edges.
        self.impulse = Vec3::ZERO;
        self.input.end_frame();
    }

    /// Advance the simulation by a raw frame delta, running as many
    /// fixed-length ticks as the clock yields.
    pub fn advance(&mut self, clock: &mut FrameClock, camera_forward: Vec3, raw_delta: f32) {
        clock.update(raw_delta);
        let step = clock.config.fixed_timestep;
        for _ in 0..clock.fixed_steps() {
            self.tick(camera_forward, step);
        }
    }

    /// Swing at whatever target hitboxes lie along `direction`.
    ///
    /// Silently ignored while a previous attack is in flight. A swing
    /// that finds no target within reach is a valid no-op outcome.
    pub fn attack(&mut self, direction: Vec3) -> AttackOutcome {
        let combat_config = self.config.combat.clone();
        let clips = &self.clips;
        let Some(player) = self.registry.get_mut(self.player) else {
            return AttackOutcome::Missed;
        };

        if !player.attack.try_begin() {
            return AttackOutcome::Locked;
        }
        player
            .animation
            .set_state(clips, clip_names::SWORD_SLASH, SWORD_SLASH_SPEED);

        let origin = player.position + Vec3::Y * combat_config.origin_lift;
        let attacker = player.id;

        let targets: Vec<TargetSurface> = self
            .registry
            .iter()
            .filter(|actor| actor.id != attacker && actor.is_alive())
            .flat_map(|actor| {
                let owner = actor.id;
                actor
                    .world_hitbox()
                    .map(move |triangle| TargetSurface { owner, triangle })
            })
            .collect();

        match combat::resolve_swing(origin, direction, &targets, &combat_config) {
            Some((target, distance)) => {
                debug!("melee hit {:?} at distance {:.2}", target, distance);
                self.registry.damage(target, combat_config.damage);
                AttackOutcome::Hit { target, distance }
            }
            None => {
                debug!("melee swing hit nothing");
                AttackOutcome::Missed
            }
        }
    }

    /// Orientation of the player, for hosts positioning a camera
    pub fn player_facing(&self) -> Quat {
        self.player().orientation
    }
}
