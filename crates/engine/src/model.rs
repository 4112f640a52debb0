use serde::Serialize;

// ---------------------------------------------------------------------------
// Catalog side
// ---------------------------------------------------------------------------

/// One sellable product from the supplier catalog.
///
/// `unit_price` stays raw text until quote time; the original value is
/// carried through so a bad price only affects that line's total.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub supplier: String,
    pub category: String,
    pub unit_price: String,
}

// ---------------------------------------------------------------------------
// Order side
// ---------------------------------------------------------------------------

/// One requested item. `key` is a product id or a free-text name
/// depending on the configured match mode.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub key: String,
    pub quantity: String,
    pub comment: String,
}

/// Parsed order file: header-block values plus body lines in file order.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_number: String,
    pub delivery_date: String,
    pub lines: Vec<OrderLine>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Transient result of resolving one order line against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub product: &'a ProductRecord,
    /// 0–100 similarity; always 100.0 for exact-id hits.
    pub score: f64,
    pub accepted: bool,
}

/// An accepted match: order-line quantity/comment joined with the
/// matched product's attributes. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedRow {
    pub product_id: String,
    pub product_name: String,
    pub quantity: String,
    pub supplier: String,
    pub category: String,
    pub unit_price: String,
    pub comment: String,
}

/// An order line that resolved to nothing. `best_score` is the highest
/// rejected fuzzy score, advisory only.
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedLine {
    pub index: usize,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
}

/// Per-line audit record of what the matcher attempted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchTrace {
    pub index: usize,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRow {
    pub product_id: String,
    pub product_name: String,
    pub quantity: String,
    pub comment: String,
}

/// Per-supplier purchase order. Row order follows the order in which
/// matched rows were produced, never re-sorted.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrder {
    pub supplier: String,
    pub order_number: String,
    pub delivery_date: String,
    pub created_date: String,
    pub rows: Vec<PurchaseRow>,
}

impl PurchaseOrder {
    /// Supplier identifier safe for artifact naming: spaces and path
    /// separators replaced with underscores. Data content is untouched.
    pub fn file_stem(&self) -> String {
        self.supplier
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect()
    }
}

/// One priced quote line. `None` means the source value failed numeric
/// coercion; the line is still emitted, with a blank total.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteLine {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
}

/// Consolidated priced summary across all suppliers.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub order_number: String,
    pub delivery_date: String,
    pub created_date: String,
    pub line_items: Vec<QuoteLine>,
    /// Sum of the rounded per-line totals, rounded to 2 decimals.
    /// Lines with an undefined total are excluded from the sum.
    pub grand_total: f64,
}

/// Quantity or unit price that could not be parsed as a number.
#[derive(Debug, Clone, Serialize)]
pub struct CoercionWarning {
    pub product_id: String,
    pub field: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Run result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Every order line matched.
    Full,
    /// Some lines matched, some did not.
    Partial,
    /// No line matched; artifacts would be empty.
    AllUnmatched,
    /// The order had no data lines at all.
    Empty,
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Partial => write!(f, "partial"),
            Self::AllUnmatched => write!(f, "all_unmatched"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub outcome: MatchOutcome,
    pub lines_total: usize,
    pub matched: usize,
    pub suppliers: usize,
    pub unmatched: Vec<UnmatchedLine>,
    pub coercion_warnings: Vec<CoercionWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub order_number: String,
    pub mode: String,
    pub threshold: u8,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub meta: RunMeta,
    pub summary: RunSummary,
    pub purchase_orders: Vec<PurchaseOrder>,
    /// Absent when nothing matched.
    pub quote: Option<Quote>,
    pub traces: Vec<MatchTrace>,
}
