//! Recipe book and craft simulation.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub produces: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftOutcome {
    #[serde(rename = "recipeId")]
    pub recipe_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct CraftingManager {
    recipes: BTreeMap<String, Recipe>,
}

impl CraftingManager {
    pub fn new() -> Self {
        let mut recipes = BTreeMap::new();
        for recipe in [
            Recipe {
                id: "recipe_health_potion".to_string(),
                produces: "health_potion".to_string(),
                ingredients: vec!["herb".to_string(), "water_flask".to_string()],
            },
            Recipe {
                id: "recipe_iron_sword".to_string(),
                produces: "iron_sword".to_string(),
                ingredients: vec![
                    "iron_ingot".to_string(),
                    "iron_ingot".to_string(),
                    "wood".to_string(),
                ],
            },
        ] {
            recipes.insert(recipe.id.clone(), recipe);
        }
        Self { recipes }
    }

    /// Dry-run a craft: succeeds iff every required ingredient is supplied
    /// (counting duplicates).
    pub fn simulate_craft(
        &self,
        recipe_id: &str,
        ingredients: &[String],
    ) -> BridgeResult<CraftOutcome> {
        let recipe = self
            .recipes
            .get(recipe_id)
            .ok_or_else(|| BridgeError::not_found("Recipe", recipe_id))?;

        let mut pool: Vec<&str> = ingredients.iter().map(String::as_str).collect();
        let mut missing = Vec::new();
        for needed in &recipe.ingredients {
            match pool.iter().position(|have| have == needed) {
                Some(index) => {
                    pool.swap_remove(index);
                }
                None => missing.push(needed.clone()),
            }
        }

        let success = missing.is_empty();
        Ok(CraftOutcome {
            recipe_id: recipe.id.clone(),
            success,
            produced: success.then(|| recipe.produces.clone()),
            missing,
        })
    }
}

impl Default for CraftingManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn craft_succeeds_with_exact_ingredients() {
        let manager = CraftingManager::new();
        let outcome = manager
            .simulate_craft(
                "recipe_health_potion",
                &["herb".to_string(), "water_flask".to_string()],
            )
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.produced.as_deref(), Some("health_potion"));
    }

    #[test]
    fn duplicates_are_counted() {
        let manager = CraftingManager::new();
        let outcome = manager
            .simulate_craft(
                "recipe_iron_sword",
                &["iron_ingot".to_string(), "wood".to_string()],
            )
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.missing, vec!["iron_ingot".to_string()]);
    }

    #[test]
    fn unknown_recipe_is_an_error() {
        let manager = CraftingManager::new();
        let err = manager.simulate_craft("recipe_unknown", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Recipe with ID recipe_unknown not found");
    }
}
