use serde::Deserialize;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration, loaded from TOML. Every field has a default that
/// reproduces the historical fixed column tables, so an empty config
/// file is a valid one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Client label written into artifact header blocks.
    pub client: String,
    pub mode: MatchMode,
    /// Minimum fuzzy-name acceptance score, 0–100.
    pub threshold: u8,
    pub catalog: CatalogConfig,
    pub order: OrderConfig,
    pub output: OutputConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            client: "Froggy Gourmet".into(),
            mode: MatchMode::FuzzyName,
            threshold: 70,
            catalog: CatalogConfig::default(),
            order: OrderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Trimmed string equality against the catalog id index.
    ExactId,
    /// Token-set similarity over normalized names, threshold-gated.
    FuzzyName,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactId => write!(f, "exact_id"),
            Self::FuzzyName => write!(f, "fuzzy_name"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mappings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub columns: CatalogColumns,
}

/// Catalog-source column labels, remapped to canonical attributes.
/// Defaults are the supplier export this tool grew up on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogColumns {
    pub id: String,
    pub name: String,
    pub supplier: String,
    pub category: String,
    pub unit_price: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            id: "ID".into(),
            name: "Nom".into(),
            supplier: "Fournisseurs".into(),
            category: "Catégorie de produits/Nom".into(),
            unit_price: "Prix de vente".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub columns: OrderColumns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrderColumns {
    /// Key column in `exact_id` mode.
    pub id: String,
    /// Key column in `fuzzy_name` mode.
    pub name: String,
    pub quantity: String,
    pub comment: String,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            id: "ProductID".into(),
            name: "Name".into(),
            quantity: "Quantity".into(),
            comment: "Comments".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "purchase_orders".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.threshold > 100 {
            return Err(EngineError::ConfigValidation(format!(
                "threshold must be 0–100, got {}",
                self.threshold
            )));
        }

        if self.client.trim().is_empty() {
            return Err(EngineError::ConfigValidation("client must not be empty".into()));
        }

        let catalog_cols = [
            ("catalog.columns.id", &self.catalog.columns.id),
            ("catalog.columns.name", &self.catalog.columns.name),
            ("catalog.columns.supplier", &self.catalog.columns.supplier),
        ];
        let order_cols = [
            ("order.columns.id", &self.order.columns.id),
            ("order.columns.name", &self.order.columns.name),
            ("order.columns.quantity", &self.order.columns.quantity),
        ];
        for (label, value) in catalog_cols.into_iter().chain(order_cols) {
            if value.trim().is_empty() {
                return Err(EngineError::ConfigValidation(format!(
                    "{label} must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// The order column the matcher keys on for the configured mode.
    pub fn key_column(&self) -> &str {
        match self.mode {
            MatchMode::ExactId => &self.order.columns.id,
            MatchMode::FuzzyName => &self.order.columns.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_historical_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config.client, "Froggy Gourmet");
        assert_eq!(config.mode, MatchMode::FuzzyName);
        assert_eq!(config.threshold, 70);
        assert_eq!(config.catalog.columns.id, "ID");
        assert_eq!(config.catalog.columns.name, "Nom");
        assert_eq!(config.catalog.columns.supplier, "Fournisseurs");
        assert_eq!(config.catalog.columns.category, "Catégorie de produits/Nom");
        assert_eq!(config.catalog.columns.unit_price, "Prix de vente");
        assert_eq!(config.order.columns.quantity, "Quantity");
        assert_eq!(config.output.dir, "purchase_orders");
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
client = "Bistro Nord"
mode = "exact_id"
threshold = 85

[catalog.columns]
id = "sku"
name = "label"
supplier = "vendor"
category = "family"
unit_price = "price_eur"

[order.columns]
id = "sku"
name = "item"
quantity = "qty"
comment = "note"

[output]
dir = "out"
"#;
        let config = RunConfig::from_toml(input).unwrap();
        assert_eq!(config.client, "Bistro Nord");
        assert_eq!(config.mode, MatchMode::ExactId);
        assert_eq!(config.threshold, 85);
        assert_eq!(config.catalog.columns.supplier, "vendor");
        assert_eq!(config.order.columns.quantity, "qty");
        assert_eq!(config.output.dir, "out");
    }

    #[test]
    fn key_column_follows_mode() {
        let mut config = RunConfig::default();
        assert_eq!(config.key_column(), "Name");
        config.mode = MatchMode::ExactId;
        assert_eq!(config.key_column(), "ProductID");
    }

    #[test]
    fn reject_threshold_above_100() {
        let err = RunConfig::from_toml("threshold = 101").unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn reject_unknown_mode() {
        let err = RunConfig::from_toml(r#"mode = "psychic""#);
        assert!(err.is_err(), "unknown mode should fail deserialization");
    }

    #[test]
    fn reject_blank_column_name() {
        let input = r#"
[catalog.columns]
supplier = "  "
"#;
        let err = RunConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("catalog.columns.supplier"));
    }
}
