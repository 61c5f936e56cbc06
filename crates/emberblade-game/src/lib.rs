//! Emberblade Game - third-person character simulation
//!
//! Provides the per-tick movement, ground-collision, and melee-targeting
//! core: input mapping, the animation state machine, locomotion and
//! vertical-motion resolution, combat, and the frame orchestrator.

pub mod actor;
pub mod animation;
pub mod combat;
pub mod config;
pub mod input;
pub mod locomotion;
pub mod vertical;
pub mod world;

pub use actor::{Actor, ActorRegistry, DamageResult};
pub use animation::{AnimationClip, AnimationState, ClipLibrary};
pub use combat::{AttackOutcome, AttackSession};
pub use config::{CombatConfig, GroundConfig, MovementConfig, WorldConfig};
pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use locomotion::{BranchKind, LocomotionOutput};
pub use vertical::VerticalMotion;
pub use world::{World, WorldEvent};
