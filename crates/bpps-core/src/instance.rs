use serde::{Deserialize, Serialize};

/// A group of items sharing one setup weight and setup cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemClass {
    /// Setup cost, zero or negative.
    pub setup_cost: i64,
    /// Capacity consumed once per bin in which the class appears.
    pub setup_weight: u64,
    /// Item weights in generation order.
    pub item_weights: Vec<u64>,
}

impl ItemClass {
    pub fn item_count(&self) -> usize {
        self.item_weights.len()
    }
}

/// One BPPS benchmark instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkInstance {
    pub item_count: u32,
    pub class_count: u32,
    pub capacity: u64,
    pub bin_cost: u64,
    pub classes: Vec<ItemClass>,
}

impl BenchmarkInstance {
    /// Item weights concatenated across classes in class order.
    pub fn item_weights(&self) -> impl Iterator<Item = u64> + '_ {
        self.classes
            .iter()
            .flat_map(|class| class.item_weights.iter().copied())
    }

    /// Sum of the item weights of every class.
    pub fn total_item_weight(&self) -> u64 {
        self.item_weights().sum()
    }

    /// Checks the structural invariants of the instance.
    ///
    /// Returns a description of the first violation found.
    pub fn check_structure(&self) -> Result<(), String> {
        if self.classes.len() != self.class_count as usize {
            return Err(format!(
                "class_count is {} but {} classes are present",
                self.class_count,
                self.classes.len()
            ));
        }

        let items: usize = self.classes.iter().map(ItemClass::item_count).sum();
        if items != self.item_count as usize {
            return Err(format!(
                "item_count is {} but classes hold {} items",
                self.item_count, items
            ));
        }

        for (idx, class) in self.classes.iter().enumerate() {
            if class.setup_cost > 0 {
                return Err(format!("class {idx} has a positive setup cost"));
            }
            if class.setup_weight == 0 || class.setup_weight > self.capacity {
                return Err(format!(
                    "class {idx} setup weight {} is outside 1..={}",
                    class.setup_weight, self.capacity
                ));
            }
            if class.item_weights.iter().any(|weight| *weight == 0) {
                return Err(format!("class {idx} has a zero item weight"));
            }
        }

        Ok(())
    }
}
