//! Quest registry.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Available,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub status: QuestStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestUpdate {
    pub name: Option<String>,
    pub status: Option<QuestStatus>,
}

#[derive(Debug)]
pub struct QuestManager {
    quests: BTreeMap<String, Quest>,
}

impl QuestManager {
    pub fn new() -> Self {
        let mut quests = BTreeMap::new();
        quests.insert(
            "quest_tutorial".to_string(),
            Quest {
                id: "quest_tutorial".to_string(),
                name: "A Village Welcome".to_string(),
                status: QuestStatus::Available,
                steps: vec![
                    "Speak with Elder Oak".to_string(),
                    "Visit the market".to_string(),
                ],
            },
        );
        Self { quests }
    }

    pub fn get(&self, id: &str) -> BridgeResult<&Quest> {
        self.quests
            .get(id)
            .ok_or_else(|| BridgeError::not_found("Quest", id))
    }

    pub fn update(&mut self, id: &str, update: QuestUpdate) -> BridgeResult<Quest> {
        let quest = self
            .quests
            .get_mut(id)
            .ok_or_else(|| BridgeError::not_found("Quest", id))?;
        if let Some(name) = update.name {
            quest.name = name;
        }
        if let Some(status) = update.status {
            quest.status = status;
        }
        Ok(quest.clone())
    }
}

impl Default for QuestManager {
    fn default() -> Self {
        Self::new()
    }
}
