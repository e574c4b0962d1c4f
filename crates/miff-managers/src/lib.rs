//! Domain managers wrapped by the engine bridges
//!
//! Each manager keeps its own in-memory map of entities, created fresh at
//! bridge construction and mutated in place by bridge calls. Everything is
//! synchronous; there is no persistence and no shared state between bridges.
//! The bridges treat these as black boxes and flatten their errors into
//! issue lists.

pub mod combat;
pub mod crafting;
pub mod economy;
pub mod loot;
pub mod npc;
pub mod quest;
pub mod stats;

pub use combat::{CombatManager, CombatResult, Combatant};
pub use crafting::{CraftOutcome, CraftingManager, Recipe};
pub use economy::{EconomyManager, PriceQuote};
pub use loot::{LootEntry, LootManager, LootRoll, LootTable};
pub use npc::{
    BehaviorKind, MovementKind, MovementPattern, Npc, NpcBehavior, NpcFilter, NpcLocation,
    NpcManager, NpcSimulation, NpcUpdate, ScheduledActivity,
};
pub use quest::{Quest, QuestManager, QuestStatus, QuestUpdate};
pub use stats::{Stat, StatsManager};
