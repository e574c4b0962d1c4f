//! NPC catalog and behavior simulation
//!
//! Seeded with the two stock NPCs every render fixture expects (Elder Oak the
//! quest giver and Merchant Sarah). Simulation is deterministic: events come
//! from the NPC's behavior type, movement pattern, and the schedule entries
//! reachable within the simulated duration.

use crate::stats::Stat;
use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Passive,
    Aggressive,
    Friendly,
    Merchant,
    QuestGiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Idle,
    Patrol,
    Follow,
    Wander,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcBehavior {
    #[serde(rename = "type")]
    pub kind: BehaviorKind,
    pub aggression: u8,
    pub curiosity: u8,
    pub loyalty: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduledActivity>,
}

/// One entry of a daily schedule; `time` is "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub time: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcLocation {
    #[serde(rename = "zoneId")]
    pub zone_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementPattern {
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    #[serde(rename = "targetId", skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    pub stats: Vec<Stat>,
    pub behavior: NpcBehavior,
    pub location: NpcLocation,
    #[serde(rename = "questIds", default)]
    pub quest_ids: Vec<String>,
    #[serde(rename = "movementPattern")]
    pub movement_pattern: MovementPattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i32>,
}

impl Npc {
    pub fn has_quests(&self) -> bool {
        !self.quest_ids.is_empty()
    }
}

/// Partial update applied by `interop` calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpcUpdate {
    pub name: Option<String>,
    pub faction: Option<String>,
    pub reputation: Option<i32>,
    pub location: Option<NpcLocation>,
}

/// List filter; every set field must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpcFilter {
    #[serde(rename = "zoneId")]
    pub zone_id: Option<String>,
    #[serde(rename = "behaviorType")]
    pub behavior_type: Option<BehaviorKind>,
    pub faction: Option<String>,
    #[serde(rename = "hasQuest")]
    pub has_quest: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSimulation {
    pub duration: u64,
    pub events: Vec<String>,
}

#[derive(Debug)]
pub struct NpcManager {
    npcs: BTreeMap<String, Npc>,
}

impl NpcManager {
    pub fn new() -> Self {
        let mut manager = Self {
            npcs: BTreeMap::new(),
        };
        for npc in default_npcs() {
            manager.npcs.insert(npc.id.clone(), npc);
        }
        manager
    }

    pub fn create(&mut self, npc: Npc) -> BridgeResult<()> {
        if self.npcs.contains_key(&npc.id) {
            return Err(BridgeError::manager(format!(
                "NPC with ID {} already exists",
                npc.id
            )));
        }
        self.npcs.insert(npc.id.clone(), npc);
        Ok(())
    }

    pub fn get(&self, id: &str) -> BridgeResult<&Npc> {
        self.npcs
            .get(id)
            .ok_or_else(|| BridgeError::not_found("NPC", id))
    }

    pub fn update(&mut self, id: &str, update: NpcUpdate) -> BridgeResult<Npc> {
        let npc = self
            .npcs
            .get_mut(id)
            .ok_or_else(|| BridgeError::not_found("NPC", id))?;
        if let Some(name) = update.name {
            npc.name = name;
        }
        if let Some(faction) = update.faction {
            npc.faction = Some(faction);
        }
        if let Some(reputation) = update.reputation {
            npc.reputation = Some(reputation);
        }
        if let Some(location) = update.location {
            npc.location = location;
        }
        Ok(npc.clone())
    }

    /// Deleting an absent NPC is a no-op.
    pub fn delete(&mut self, id: &str) {
        self.npcs.remove(id);
    }

    pub fn list(&self, filter: Option<&NpcFilter>) -> Vec<&Npc> {
        self.npcs
            .values()
            .filter(|npc| match filter {
                Some(filter) => {
                    filter
                        .zone_id
                        .as_ref()
                        .map_or(true, |zone| npc.location.zone_id == *zone)
                        && filter
                            .behavior_type
                            .map_or(true, |kind| npc.behavior.kind == kind)
                        && filter
                            .faction
                            .as_ref()
                            .map_or(true, |faction| npc.faction.as_ref() == Some(faction))
                        && filter
                            .has_quest
                            .map_or(true, |wanted| npc.has_quests() == wanted)
                }
                None => true,
            })
            .collect()
    }

    /// Simulate `duration` seconds of an NPC's day.
    pub fn simulate(&self, id: &str, duration: u64) -> BridgeResult<NpcSimulation> {
        let npc = self.get(id)?;
        let mut events = Vec::new();

        // Schedule entries whose hour falls inside the simulated window.
        let hours = duration / 3600;
        for activity in &npc.behavior.schedule {
            if let Some(hour) = activity
                .time
                .split(':')
                .next()
                .and_then(|h| h.parse::<u64>().ok())
            {
                if hour <= hours {
                    events.push(format!("{} is {}", npc.name, activity.activity));
                }
            }
        }

        events.push(match npc.behavior.kind {
            BehaviorKind::QuestGiver => format!("{} is available for quests", npc.name),
            BehaviorKind::Merchant => format!("{} is open for business", npc.name),
            BehaviorKind::Aggressive => format!("{} is patrolling aggressively", npc.name),
            _ => format!("{} is going about their day", npc.name),
        });

        events.push(match npc.movement_pattern.kind {
            MovementKind::Patrol => format!("{} is patrolling their area", npc.name),
            MovementKind::Wander => format!("{} is wandering around", npc.name),
            MovementKind::Follow => format!("{} is following their target", npc.name),
            MovementKind::Idle => format!("{} is staying in place", npc.name),
        });

        Ok(NpcSimulation { duration, events })
    }
}

impl Default for NpcManager {
    fn default() -> Self {
        Self::new()
    }
}

fn default_npcs() -> Vec<Npc> {
    vec![
        Npc {
            id: "npc_001".to_string(),
            name: "Elder Oak".to_string(),
            stats: vec![
                Stat::new("health", 100.0),
                Stat::new("mana", 50.0),
                Stat::new("strength", 15.0),
                Stat::new("wisdom", 20.0),
            ],
            behavior: NpcBehavior {
                kind: BehaviorKind::QuestGiver,
                aggression: 0,
                curiosity: 80,
                loyalty: 90,
                schedule: vec![
                    ScheduledActivity {
                        time: "06:00".to_string(),
                        activity: "meditation".to_string(),
                    },
                    ScheduledActivity {
                        time: "12:00".to_string(),
                        activity: "counseling".to_string(),
                    },
                    ScheduledActivity {
                        time: "18:00".to_string(),
                        activity: "evening_walk".to_string(),
                    },
                ],
            },
            location: NpcLocation {
                zone_id: "zone_village".to_string(),
                x: 10.0,
                y: 15.0,
                z: None,
            },
            quest_ids: vec!["quest_tutorial".to_string()],
            movement_pattern: MovementPattern {
                kind: MovementKind::Idle,
                speed: 1.0,
                range: None,
                target_id: None,
            },
            faction: Some("village_elders".to_string()),
            reputation: Some(100),
        },
        Npc {
            id: "npc_002".to_string(),
            name: "Merchant Sarah".to_string(),
            stats: vec![
                Stat::new("health", 80.0),
                Stat::new("mana", 30.0),
                Stat::new("strength", 8.0),
                Stat::new("wisdom", 15.0),
            ],
            behavior: NpcBehavior {
                kind: BehaviorKind::Merchant,
                aggression: 10,
                curiosity: 60,
                loyalty: 70,
                schedule: Vec::new(),
            },
            location: NpcLocation {
                zone_id: "zone_market".to_string(),
                x: 25.0,
                y: 12.0,
                z: None,
            },
            quest_ids: Vec::new(),
            movement_pattern: MovementPattern {
                kind: MovementKind::Patrol,
                speed: 2.0,
                range: Some(5.0),
                target_id: None,
            },
            faction: Some("merchants".to_string()),
            reputation: Some(75),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_seeded() {
        let manager = NpcManager::new();
        let npcs = manager.list(None);
        assert_eq!(npcs.len(), 2);
        assert_eq!(npcs[0].id, "npc_001");
        assert!(npcs[0].has_quests());
        assert!(!npcs[1].has_quests());
    }

    #[test]
    fn simulate_reports_behavior_and_movement() {
        let manager = NpcManager::new();
        let sim = manager.simulate("npc_002", 60).unwrap();
        assert_eq!(sim.duration, 60);
        assert_eq!(
            sim.events,
            vec![
                "Merchant Sarah is open for business".to_string(),
                "Merchant Sarah is patrolling their area".to_string(),
            ]
        );
    }

    #[test]
    fn simulate_includes_reachable_schedule_entries() {
        let manager = NpcManager::new();
        // Twelve hours covers meditation and counseling but not the walk.
        let sim = manager.simulate("npc_001", 12 * 3600).unwrap();
        assert!(sim.events.contains(&"Elder Oak is meditation".to_string()));
        assert!(sim.events.contains(&"Elder Oak is counseling".to_string()));
        assert!(!sim.events.iter().any(|e| e.contains("evening_walk")));
    }

    #[test]
    fn missing_npc_is_reported_with_id() {
        let manager = NpcManager::new();
        let err = manager.simulate("npc_404", 10).unwrap_err();
        assert_eq!(err.to_string(), "NPC with ID npc_404 not found");
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut manager = NpcManager::new();
        let mut npc = manager.get("npc_001").unwrap().clone();
        npc.id = "npc_003".to_string();
        npc.name = "Wandering Bard".to_string();
        manager.create(npc).unwrap();
        assert_eq!(manager.get("npc_003").unwrap().name, "Wandering Bard");

        let duplicate = manager.get("npc_001").unwrap().clone();
        let err = manager.create(duplicate).unwrap_err();
        assert_eq!(err.to_string(), "NPC with ID npc_001 already exists");
    }

    #[test]
    fn delete_removes_and_tolerates_absent_ids() {
        let mut manager = NpcManager::new();
        manager.delete("npc_002");
        assert!(manager.get("npc_002").is_err());
        // Absent ID is a no-op.
        manager.delete("npc_404");
        assert_eq!(manager.list(None).len(), 1);
    }

    #[test]
    fn update_is_partial() {
        let mut manager = NpcManager::new();
        let updated = manager
            .update(
                "npc_001",
                NpcUpdate {
                    reputation: Some(42),
                    ..NpcUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.reputation, Some(42));
        assert_eq!(updated.name, "Elder Oak");
    }

    #[test]
    fn filter_by_behavior() {
        let manager = NpcManager::new();
        let merchants = manager.list(Some(&NpcFilter {
            behavior_type: Some(BehaviorKind::Merchant),
            ..NpcFilter::default()
        }));
        assert_eq!(merchants.len(), 1);
        assert_eq!(merchants[0].name, "Merchant Sarah");
    }
}
