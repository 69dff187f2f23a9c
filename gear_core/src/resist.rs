//! Status resistance tables
//!
//! Lookups resolve the most specific entry first:
//! per-status -> per-category -> "all" -> 0.

use crate::types::{StatusCategory, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Percentage resistances against status effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResistanceTable {
    #[serde(default)]
    pub by_status: HashMap<StatusType, f64>,
    #[serde(default)]
    pub by_category: HashMap<StatusCategory, f64>,
    #[serde(default)]
    pub all: Option<f64>,
}

impl StatusResistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the resistance that applies to `status` of `category`
    pub fn lookup(&self, status: StatusType, category: StatusCategory) -> f64 {
        self.by_status
            .get(&status)
            .or_else(|| self.by_category.get(&category))
            .copied()
            .or(self.all)
            .unwrap_or(0.0)
    }

    pub fn has_category(&self, category: StatusCategory) -> bool {
        self.by_category.contains_key(&category)
    }

    pub fn set_status(&mut self, status: StatusType, value: f64) {
        self.by_status.insert(status, value);
    }

    pub fn set_category(&mut self, category: StatusCategory, value: f64) {
        self.by_category.insert(category, value);
    }

    pub fn set_all(&mut self, value: f64) {
        self.all = Some(value);
    }

    /// Add another table's values into this one, entry by entry
    pub fn accumulate(&mut self, other: &StatusResistanceTable) {
        for (status, value) in &other.by_status {
            *self.by_status.entry(*status).or_insert(0.0) += value;
        }
        for (category, value) in &other.by_category {
            *self.by_category.entry(*category).or_insert(0.0) += value;
        }
        if let Some(all) = other.all {
            self.all = Some(self.all.unwrap_or(0.0) + all);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_status.is_empty() && self.by_category.is_empty() && self.all.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_specific_wins() {
        let mut table = StatusResistanceTable::new();
        table.set_all(10.0);
        table.set_category(StatusCategory::Control, 40.0);
        table.set_status(StatusType::Stun, 75.0);

        assert!((table.lookup(StatusType::Stun, StatusCategory::Control) - 75.0).abs() < f64::EPSILON);
        assert!((table.lookup(StatusType::Sleep, StatusCategory::Control) - 40.0).abs() < f64::EPSILON);
        assert!((table.lookup(StatusType::Poison, StatusCategory::Damage) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_table_is_zero() {
        let table = StatusResistanceTable::new();
        assert_eq!(table.lookup(StatusType::Burn, StatusCategory::Damage), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_entry_still_overrides_broader_entries() {
        let mut table = StatusResistanceTable::new();
        table.set_all(50.0);
        table.set_status(StatusType::Slow, 0.0);
        assert_eq!(table.lookup(StatusType::Slow, StatusCategory::Modifier), 0.0);
    }

    #[test]
    fn test_accumulate() {
        let mut a = StatusResistanceTable::new();
        a.set_category(StatusCategory::Control, 20.0);
        let mut b = StatusResistanceTable::new();
        b.set_category(StatusCategory::Control, 15.0);
        b.set_all(5.0);

        a.accumulate(&b);
        assert!((a.lookup(StatusType::Stun, StatusCategory::Control) - 35.0).abs() < f64::EPSILON);
        assert_eq!(a.all, Some(5.0));
    }
}
