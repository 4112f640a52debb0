use std::collections::HashMap;

use crate::model::{
    CoercionWarning, MatchedRow, PurchaseOrder, PurchaseRow, Quote, QuoteLine,
};

/// Group matched rows into one purchase order per supplier.
///
/// The grouping key is the exact supplier string, case-sensitive.
/// Suppliers appear in first-appearance order and each group keeps
/// its rows in original matched order. A supplier with zero matched
/// rows never yields a purchase order.
pub fn build_purchase_orders(
    matched: &[MatchedRow],
    order_number: &str,
    delivery_date: &str,
    created_date: &str,
) -> Vec<PurchaseOrder> {
    let mut orders: Vec<PurchaseOrder> = Vec::new();
    let mut index_by_supplier: HashMap<&str, usize> = HashMap::new();

    for row in matched {
        let index = match index_by_supplier.get(row.supplier.as_str()) {
            Some(&i) => i,
            None => {
                index_by_supplier.insert(row.supplier.as_str(), orders.len());
                orders.push(PurchaseOrder {
                    supplier: row.supplier.clone(),
                    order_number: order_number.to_string(),
                    delivery_date: delivery_date.to_string(),
                    created_date: created_date.to_string(),
                    rows: Vec::new(),
                });
                orders.len() - 1
            }
        };
        orders[index].rows.push(PurchaseRow {
            product_id: row.product_id.clone(),
            product_name: row.product_name.clone(),
            quantity: row.quantity.clone(),
            comment: row.comment.clone(),
        });
    }

    orders
}

/// Build the consolidated quote from the full matched set.
///
/// Quantity and unit price are coerced to numbers per line; a value
/// that fails coercion leaves that line's total undefined (and
/// recorded as a warning) instead of aborting the run. The grand
/// total sums the rounded per-line totals, skipping undefined ones,
/// and is itself rounded to 2 decimals — so it always agrees with the
/// displayed line totals.
pub fn build_quote(
    matched: &[MatchedRow],
    order_number: &str,
    delivery_date: &str,
    created_date: &str,
) -> (Quote, Vec<CoercionWarning>) {
    let mut line_items = Vec::with_capacity(matched.len());
    let mut warnings = Vec::new();
    let mut grand_total = 0.0f64;

    for row in matched {
        let quantity = coerce(&row.quantity, row, "quantity", &mut warnings);
        let raw_price = coerce(&row.unit_price, row, "unit_price", &mut warnings);
        // The displayed unit price is rounded; the total multiplies
        // the raw price first so a sub-cent price does not drift.
        let unit_price = raw_price.map(round2);

        let total_price = match (quantity, raw_price) {
            (Some(q), Some(p)) => {
                let total = round2(q * p);
                grand_total += total;
                Some(total)
            }
            _ => None,
        };

        line_items.push(QuoteLine {
            product_id: row.product_id.clone(),
            product_name: row.product_name.clone(),
            category: row.category.clone(),
            quantity,
            unit_price,
            total_price,
        });
    }

    let quote = Quote {
        order_number: order_number.to_string(),
        delivery_date: delivery_date.to_string(),
        created_date: created_date.to_string(),
        line_items,
        grand_total: round2(grand_total),
    };

    (quote, warnings)
}

fn coerce(
    value: &str,
    row: &MatchedRow,
    field: &str,
    warnings: &mut Vec<CoercionWarning>,
) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            warnings.push(CoercionWarning {
                product_id: row.product_id.clone(),
                field: field.to_string(),
                value: value.to_string(),
            });
            None
        }
    }
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
