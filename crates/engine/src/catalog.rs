use std::collections::HashMap;

use crate::model::ProductRecord;

/// In-memory product index, built once per run. Load order is
/// preserved; the fuzzy matcher relies on it for deterministic
/// tie-breaking.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Index a sequence of product records. Ids are trimmed before
    /// indexing; on duplicate ids the first occurrence wins and later
    /// ones are shadowed (documented policy). Records with a blank id
    /// and blank name carry no usable key and are dropped.
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let mut products = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            let id = record.id.trim();
            if id.is_empty() && record.name.trim().is_empty() {
                continue;
            }
            let index = products.len();
            if !id.is_empty() {
                by_id.entry(id.to_string()).or_insert(index);
            }
            products.push(record);
        }

        Self { products, by_id }
    }

    /// Exact-id lookup over the trimmed identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&ProductRecord> {
        self.by_id.get(id.trim()).map(|&i| &self.products[i])
    }

    /// Products in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, supplier: &str) -> ProductRecord {
        ProductRecord {
            id: id.into(),
            name: name.into(),
            supplier: supplier.into(),
            category: String::new(),
            unit_price: "0.0".into(),
        }
    }

    #[test]
    fn lookup_trims_both_sides() {
        let catalog = Catalog::from_records(vec![product(" P1 ", "Tomato Sauce", "Acme")]);
        assert_eq!(catalog.get_by_id("P1").unwrap().name, "Tomato Sauce");
        assert_eq!(catalog.get_by_id("  P1\t").unwrap().name, "Tomato Sauce");
        assert!(catalog.get_by_id("P2").is_none());
    }

    #[test]
    fn numeric_looking_ids_stay_strings() {
        let catalog = Catalog::from_records(vec![product("001", "Flour", "Moulin")]);
        assert!(catalog.get_by_id("001").is_some());
        assert!(catalog.get_by_id("1").is_none());
    }

    #[test]
    fn duplicate_id_first_wins() {
        let catalog = Catalog::from_records(vec![
            product("P1", "First", "Acme"),
            product("P1", "Shadowed", "Acme"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_by_id("P1").unwrap().name, "First");
    }

    #[test]
    fn blank_rows_dropped_load_order_kept() {
        let catalog = Catalog::from_records(vec![
            product("P1", "Alpha", "Acme"),
            product("  ", "", "Acme"),
            product("", "Nameless But Named", "Acme"),
            product("P3", "Gamma", "Acme"),
        ]);
        let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Nameless But Named", "Gamma"]);
    }
}
