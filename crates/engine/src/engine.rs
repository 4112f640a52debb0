use crate::aggregate::{build_purchase_orders, build_quote};
use crate::catalog::Catalog;
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::model::{Order, OrderLine, ProductRecord, RunMeta, RunResult, RunSummary};
use crate::reconcile::reconcile;

/// Number of leading lines before the order body's header row:
/// order number, delivery date, and two separator lines.
const ORDER_PREAMBLE_LINES: usize = 4;

/// Run one reconciliation pass: match every order line, then group
/// the accepted rows into per-supplier purchase orders and one
/// consolidated quote.
///
/// Unmatched lines are reported in the summary, never raised. When
/// nothing matched at all the result carries no purchase orders and
/// no quote; the caller decides whether that is an error (the CLI
/// refuses to write artifacts for it).
pub fn run(config: &RunConfig, order: &Order, catalog: &Catalog) -> Result<RunResult, EngineError> {
    config.validate()?;

    let outcome = reconcile(order, catalog, config);

    let created_date = chrono::Local::now().format("%d/%m/%Y").to_string();

    let (purchase_orders, quote, coercion_warnings) = if outcome.matched.is_empty() {
        (Vec::new(), None, Vec::new())
    } else {
        let purchase_orders = build_purchase_orders(
            &outcome.matched,
            &order.order_number,
            &order.delivery_date,
            &created_date,
        );
        let (quote, warnings) = build_quote(
            &outcome.matched,
            &order.order_number,
            &order.delivery_date,
            &created_date,
        );
        (purchase_orders, Some(quote), warnings)
    };

    Ok(RunResult {
        meta: RunMeta {
            order_number: order.order_number.clone(),
            mode: config.mode.to_string(),
            threshold: config.threshold,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary: RunSummary {
            outcome: outcome.outcome,
            lines_total: order.lines.len(),
            matched: outcome.matched.len(),
            suppliers: purchase_orders.len(),
            unmatched: outcome.unmatched,
            coercion_warnings,
        },
        purchase_orders,
        quote,
        traces: outcome.traces,
    })
}

/// Load catalog CSV content into an indexed [`Catalog`], applying the
/// configured column remap. Id, name, and supplier columns are
/// required; category and unit price fall back to ""/"0.0" when the
/// column (or cell) is absent.
pub fn load_catalog(content: &str, config: &RunConfig) -> Result<Catalog, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col = &config.catalog.columns;

    let idx = |name: &str| -> Result<usize, EngineError> {
        headers
            .iter()
            .position(|h| h == name.trim())
            .ok_or_else(|| EngineError::MissingColumn {
                source: "catalog".into(),
                column: name.into(),
            })
    };

    let id_idx = idx(&col.id)?;
    let name_idx = idx(&col.name)?;
    let supplier_idx = idx(&col.supplier)?;
    let category_idx = idx(&col.category).ok();
    let unit_price_idx = idx(&col.unit_price).ok();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        records.push(ProductRecord {
            id: field(id_idx),
            name: field(name_idx),
            supplier: field(supplier_idx),
            category: category_idx.map(field).unwrap_or_default(),
            unit_price: unit_price_idx
                .map(field)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "0.0".into()),
        });
    }

    Ok(Catalog::from_records(records))
}

/// Parse order CSV content: a key/value preamble (order number on
/// line 1, delivery date on line 2, two separator lines), then the
/// body table with its own header row.
pub fn load_order(content: &str, config: &RunConfig) -> Result<Order, EngineError> {
    let order_number = preamble_value(content, 0)?;
    let delivery_date = preamble_value(content, 1)?;

    let body_start = line_offset(content, ORDER_PREAMBLE_LINES);
    let body = &content[body_start..];

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col = &config.order.columns;

    let idx = |name: &str| -> Result<usize, EngineError> {
        headers
            .iter()
            .position(|h| h == name.trim())
            .ok_or_else(|| EngineError::MissingColumn {
                source: "order".into(),
                column: name.into(),
            })
    };

    let key_idx = idx(config.key_column())?;
    let quantity_idx = idx(&col.quantity)?;
    // Comment column is optional; absent means every comment is empty.
    let comment_idx = idx(&col.comment).ok();

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Io(e.to_string()))?;
        lines.push(OrderLine {
            key: record.get(key_idx).unwrap_or("").to_string(),
            quantity: record.get(quantity_idx).unwrap_or("").to_string(),
            comment: comment_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string(),
        });
    }

    Ok(Order {
        order_number,
        delivery_date,
        lines,
    })
}

/// Second field of one preamble line ("Order Number:,ORD-7" → "ORD-7").
fn preamble_value(content: &str, line_index: usize) -> Result<String, EngineError> {
    let line = content.lines().nth(line_index).ok_or(EngineError::HeaderBlock {
        line: line_index + 1,
        detail: "missing preamble line".into(),
    })?;
    line.split(',')
        .nth(1)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EngineError::HeaderBlock {
            line: line_index + 1,
            detail: format!("expected 'Label,Value', got '{}'", line.trim_end()),
        })
}

/// Byte offset of the start of line `n` (0-based), or content end.
fn line_offset(content: &str, n: usize) -> usize {
    let mut offset = 0;
    for _ in 0..n {
        match content[offset..].find('\n') {
            Some(pos) => offset += pos + 1,
            None => return content.len(),
        }
    }
    offset
}
