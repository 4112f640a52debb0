//! Artifact writer: one delimited file per supplier plus one quote
//! file, each prefixed with a key/value header block. Byte layout
//! follows the files the downstream suppliers already ingest:
//! UTF-8 BOM, header rows, two blank rows, then the table.

use std::path::{Path, PathBuf};

use cheflist_engine::model::{PurchaseOrder, Quote};

const BOM: &[u8] = b"\xef\xbb\xbf";

/// Write all purchase orders and the quote into `dir`, creating it if
/// needed. Returns the written paths. Each supplier's file is
/// independent; a failure aborts before touching later files but
/// never corrupts already-written ones.
pub fn write_artifacts(
    dir: &Path,
    client: &str,
    purchase_orders: &[PurchaseOrder],
    quote: Option<&Quote>,
) -> Result<Vec<PathBuf>, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("cannot create {}: {e}", dir.display()))?;

    let mut written = Vec::new();

    for po in purchase_orders {
        let path = dir.join(format!("PO_{}_{}.csv", po.order_number, po.file_stem()));
        let bytes = purchase_order_bytes(po, client)?;
        std::fs::write(&path, bytes)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        written.push(path);
    }

    if let Some(quote) = quote {
        let path = dir.join(format!("Quote_{}.csv", quote.order_number));
        let bytes = quote_bytes(quote, client)?;
        std::fs::write(&path, bytes)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn purchase_order_bytes(po: &PurchaseOrder, client: &str) -> Result<Vec<u8>, String> {
    let mut head = csv::Writer::from_writer(BOM.to_vec());
    let header_rows: &[[&str; 2]] = &[
        ["Client:", client],
        ["Order Number:", &po.order_number],
        ["Date Created:", &po.created_date],
        ["Delivery Date:", &po.delivery_date],
        ["Supplier:", &po.supplier],
    ];
    for row in header_rows {
        head.write_record(row).map_err(|e| e.to_string())?;
    }
    let mut buf = head.into_inner().map_err(|e| e.to_string())?;

    // The csv writer serializes a lone empty field as `""` to keep it
    // distinct from a record terminator, so the separator rows go in
    // as plain newlines.
    buf.extend_from_slice(b"\n\n");

    let mut body = csv::Writer::from_writer(buf);
    body.write_record(["ProductID", "ProductName", "Quantity", "Comments"])
        .map_err(|e| e.to_string())?;
    for row in &po.rows {
        body.write_record([&row.product_id, &row.product_name, &row.quantity, &row.comment])
            .map_err(|e| e.to_string())?;
    }
    body.into_inner().map_err(|e| e.to_string())
}

fn quote_bytes(quote: &Quote, client: &str) -> Result<Vec<u8>, String> {
    let mut head = csv::Writer::from_writer(BOM.to_vec());
    let header_rows = [
        format!("Quote from {client}"),
        format!("Order Number: {}", quote.order_number),
        format!("Date Created: {}", quote.created_date),
        format!("Delivery Date: {}", quote.delivery_date),
    ];
    for row in &header_rows {
        head.write_record([row.as_str()]).map_err(|e| e.to_string())?;
    }
    let mut buf = head.into_inner().map_err(|e| e.to_string())?;

    // Separator rows bypass the csv writer, same as the purchase
    // order header block.
    buf.extend_from_slice(b"\n\n");

    let mut writer = csv::Writer::from_writer(buf);
    writer
        .write_record(["ProductID", "ProductName", "Category", "Quantity", "Unit Price", "Total Price"])
        .map_err(|e| e.to_string())?;

    for line in &quote.line_items {
        writer
            .write_record([
                line.product_id.as_str(),
                line.product_name.as_str(),
                line.category.as_str(),
                &fmt_number(line.quantity),
                &fmt_money(line.unit_price),
                &fmt_money(line.total_price),
            ])
            .map_err(|e| e.to_string())?;
    }

    // Synthetic total row: grand total only, all other fields blank.
    writer
        .write_record(["", "TOTAL (€)", "", "", "", &fmt_money(Some(quote.grand_total))])
        .map_err(|e| e.to_string())?;

    writer.into_inner().map_err(|e| e.to_string())
}

fn fmt_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_money(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}
