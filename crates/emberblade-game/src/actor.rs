//! Actors and the id-keyed registry

use std::collections::HashMap;

use glam::{Quat, Vec3};
use tracing::info;

use emberblade_collision::Triangle;
use emberblade_core::ActorId;

use crate::animation::AnimationState;
use crate::combat::AttackSession;
use crate::vertical::VerticalMotion;

/// A positioned, oriented entity in the simulation
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub position: Vec3,
    pub orientation: Quat,
    pub vertical: VerticalMotion,
    pub animation: AnimationState,
    pub attack: AttackSession,
    /// Remaining hit points; zero means dead
    pub health: f32,
    /// Melee hitbox triangles in actor-local space
    pub hitbox: Vec<Triangle>,
}

impl Actor {
    fn new(id: ActorId, position: Vec3, health: f32, hitbox: Vec<Triangle>) -> Self {
        Self {
            id,
            position,
            orientation: Quat::IDENTITY,
            vertical: VerticalMotion::default(),
            animation: AnimationState::new(),
            attack: AttackSession::default(),
            health,
            hitbox,
        }
    }

    /// Whether this actor is still alive
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Hitbox triangles translated to world space. Hitboxes follow the
    /// owning actor's position.
    pub fn world_hitbox(&self) -> impl Iterator<Item = Triangle> + '_ {
        let offset = self.position;
        self.hitbox.iter().map(move |tri| tri.translated(offset))
    }

    /// Reduce health, clamping at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}

/// Result of routing damage to an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageResult {
    /// The actor survived with this much health left
    Damaged { remaining: f32 },
    /// The hit dropped the actor to zero health
    Killed,
}

/// Id-keyed actor storage with spawn/despawn and damage routing
#[derive(Debug, Default)]
pub struct ActorRegistry {
    actors: HashMap<ActorId, Actor>,
    next_id: u64,
}

impl ActorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor and return its id
    pub fn spawn(&mut self, position: Vec3, health: f32, hitbox: Vec<Triangle>) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        info!("spawned actor {:?} at {}", id, position);
        self.actors.insert(id, Actor::new(id, position, health, hitbox));
        id
    }

    /// Remove an actor, returning it if it existed
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(&id);
        if actor.is_some() {
            info!("despawned actor {:?}", id);
        }
        actor
    }

    /// Look up an actor
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Look up an actor mutably
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Iterate over all actors
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Iterate over all actors mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.values_mut()
    }

    /// Number of live entries (including dead-but-undespawned actors)
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Route damage to an actor. Returns `None` for an unknown id.
    pub fn damage(&mut self, id: ActorId, amount: f32) -> Option<DamageResult> {
        let actor = self.actors.get_mut(&id)?;
        actor.take_damage(amount);
        if actor.is_alive() {
            Some(DamageResult::Damaged {
                remaining: actor.health,
            })
        } else {
            info!("actor {:?} died", id);
            Some(DamageResult::Killed)
        }
    }
}
