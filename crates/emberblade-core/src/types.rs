//! Id types shared across the simulation

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor in the simulation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ActorId(pub u64);
