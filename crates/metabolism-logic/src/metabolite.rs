//! Per-item nutrition records.
//!
//! A `Metabolite` describes what eating an item does: food and hydration are
//! added immediately, positive warmth is delivered gradually through a
//! metabolism boost, negative warmth cools instantly.
//!
//! An item with no nutrition has no record at all: lookups return `None`
//! for it, so a record whose fields are all zero is still edible.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metabolite {
    #[serde(default)]
    pub food: f32,
    #[serde(default)]
    pub hydration: f32,
    #[serde(default)]
    pub warmth: f32,
    /// Boost amplifier applied while the warmth is delivered.
    #[serde(default)]
    pub amplifier: u8,
    /// Explicit boost duration; 0 means derive it from `warmth`.
    #[serde(default)]
    pub effect_ticks: u32,
}

impl Metabolite {
    pub fn new(food: f32, hydration: f32, warmth: f32) -> Self {
        Self {
            food,
            hydration,
            warmth,
            ..Self::default()
        }
    }

    /// Fallback for host foods without an explicit record, built from the
    /// host's own nutrition and saturation values.
    pub fn from_host_food(nutrition: u32, saturation: f32) -> Self {
        let food = nutrition as f32;
        Self::new(food, food * saturation.max(0.0), 0.0)
    }

    /// Whether eating this warms gradually (boost) rather than instantly.
    pub fn is_warming(&self) -> bool {
        self.warmth > 0.0
    }

    pub fn is_cooling(&self) -> bool {
        self.warmth < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_decodes_to_zeros() {
        let m: Metabolite = serde_json::from_str("{}").unwrap();
        assert_eq!(m, Metabolite::default());
        assert!(!m.is_warming() && !m.is_cooling());
    }

    #[test]
    fn test_host_food_fallback() {
        let m = Metabolite::from_host_food(6, 0.6);
        assert!((m.food - 6.0).abs() < f32::EPSILON);
        assert!((m.hydration - 3.6).abs() < 1e-5);
        assert_eq!(m.warmth, 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let m: Metabolite = serde_json::from_str(r#"{ "food": 2.0, "warmth": 1.5 }"#).unwrap();
        assert!((m.food - 2.0).abs() < f32::EPSILON);
        assert_eq!(m.hydration, 0.0);
        assert_eq!(m.amplifier, 0);
        assert!(m.is_warming());
    }

    #[test]
    fn test_warming_and_cooling() {
        assert!(Metabolite::new(0.0, 1.0, -2.0).is_cooling());
        assert!(!Metabolite::new(0.0, 1.0, -2.0).is_warming());
    }
}
