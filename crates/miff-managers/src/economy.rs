//! Price book.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub quantity: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug)]
pub struct EconomyManager {
    prices: BTreeMap<String, f64>,
}

/// Orders of ten or more get a tenth off.
const BULK_THRESHOLD: u32 = 10;
const BULK_DISCOUNT: f64 = 0.9;

impl EconomyManager {
    pub fn new() -> Self {
        let mut prices = BTreeMap::new();
        prices.insert("health_potion".to_string(), 25.0);
        prices.insert("iron_sword".to_string(), 150.0);
        prices.insert("herb".to_string(), 4.0);
        prices.insert("wood".to_string(), 2.0);
        Self { prices }
    }

    pub fn calculate_price(&self, item_id: &str, quantity: u32) -> BridgeResult<PriceQuote> {
        let unit_price = *self
            .prices
            .get(item_id)
            .ok_or_else(|| BridgeError::not_found("Item", item_id))?;
        let mut total = unit_price * f64::from(quantity);
        if quantity >= BULK_THRESHOLD {
            total *= BULK_DISCOUNT;
        }
        Ok(PriceQuote {
            item_id: item_id.to_string(),
            quantity,
            unit_price,
            total,
        })
    }
}

impl Default for EconomyManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_orders_cost_list_price() {
        let manager = EconomyManager::new();
        let quote = manager.calculate_price("health_potion", 3).unwrap();
        assert_eq!(quote.total, 75.0);
    }

    #[test]
    fn bulk_orders_are_discounted() {
        let manager = EconomyManager::new();
        let quote = manager.calculate_price("herb", 10).unwrap();
        assert_eq!(quote.total, 36.0);
    }

    #[test]
    fn unknown_items_are_an_error() {
        let manager = EconomyManager::new();
        let err = manager.calculate_price("moon_rock", 1).unwrap_err();
        assert_eq!(err.to_string(), "Item with ID moon_rock not found");
    }
}
