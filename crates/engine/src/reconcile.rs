use crate::catalog::Catalog;
use crate::config::RunConfig;
use crate::matcher;
use crate::model::{MatchOutcome, MatchTrace, MatchedRow, Order, UnmatchedLine};

/// Everything one reconciliation pass produces before aggregation.
#[derive(Debug)]
pub struct ReconcileOutput {
    pub matched: Vec<MatchedRow>,
    pub unmatched: Vec<UnmatchedLine>,
    /// Per-line audit of every attempted match; advisory only.
    pub traces: Vec<MatchTrace>,
    pub outcome: MatchOutcome,
}

/// Drive the matcher over all order lines in file order.
///
/// A line with no accepted match is recorded and skipped, never
/// raised; the run proceeds with whatever did match. The outcome
/// distinguishes an all-unmatched pass from a partial one so callers
/// can refuse to emit empty artifacts.
pub fn reconcile(order: &Order, catalog: &Catalog, config: &RunConfig) -> ReconcileOutput {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    let mut traces = Vec::with_capacity(order.lines.len());

    for (index, line) in order.lines.iter().enumerate() {
        let candidate = matcher::best_candidate(&line.key, catalog, config);

        traces.push(MatchTrace {
            index,
            query: line.key.clone(),
            candidate: candidate.map(|c| c.product.name.clone()),
            score: candidate.map(|c| c.score),
            accepted: candidate.map_or(false, |c| c.accepted),
        });

        match candidate.filter(|c| c.accepted) {
            Some(candidate) => {
                let product = candidate.product;
                matched.push(MatchedRow {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    quantity: line.quantity.clone(),
                    supplier: product.supplier.clone(),
                    category: product.category.clone(),
                    unit_price: product.unit_price.clone(),
                    comment: line.comment.clone(),
                });
            }
            None => unmatched.push(UnmatchedLine {
                index,
                key: line.key.clone(),
                best_score: candidate.map(|c| c.score),
            }),
        }
    }

    let outcome = match (matched.is_empty(), unmatched.is_empty()) {
        (true, true) => MatchOutcome::Empty,
        (true, false) => MatchOutcome::AllUnmatched,
        (false, true) => MatchOutcome::Full,
        (false, false) => MatchOutcome::Partial,
    };

    ReconcileOutput {
        matched,
        unmatched,
        traces,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchMode;
    use crate::model::{OrderLine, ProductRecord};

    fn product(id: &str, name: &str, supplier: &str) -> ProductRecord {
        ProductRecord {
            id: id.into(),
            name: name.into(),
            supplier: supplier.into(),
            category: "Épicerie".into(),
            unit_price: "2.00".into(),
        }
    }

    fn line(key: &str, quantity: &str) -> OrderLine {
        OrderLine {
            key: key.into(),
            quantity: quantity.into(),
            comment: String::new(),
        }
    }

    fn order(lines: Vec<OrderLine>) -> Order {
        Order {
            order_number: "ORD-7".into(),
            delivery_date: "12/09/2026".into(),
            lines,
        }
    }

    fn fuzzy_config() -> RunConfig {
        RunConfig {
            mode: MatchMode::FuzzyName,
            threshold: 70,
            ..RunConfig::default()
        }
    }

    #[test]
    fn matched_rows_carry_line_and_product_fields() {
        let catalog = Catalog::from_records(vec![product("P1", "Tomato Sauce", "Acme")]);
        let mut order = order(vec![line("tomatoe sauce", "3")]);
        order.lines[0].comment = "no plastic".into();

        let out = reconcile(&order, &catalog, &fuzzy_config());
        assert_eq!(out.outcome, MatchOutcome::Full);
        assert_eq!(out.matched.len(), 1);
        let row = &out.matched[0];
        assert_eq!(row.product_id, "P1");
        assert_eq!(row.supplier, "Acme");
        assert_eq!(row.quantity, "3");
        assert_eq!(row.unit_price, "2.00");
        assert_eq!(row.comment, "no plastic");
    }

    #[test]
    fn unmatched_is_soft_and_run_continues() {
        let catalog = Catalog::from_records(vec![product("P1", "Tomato Sauce", "Acme")]);
        let order = order(vec![
            line("completely unrelated item", "1"),
            line("tomato sauce", "2"),
        ]);

        let out = reconcile(&order, &catalog, &fuzzy_config());
        assert_eq!(out.outcome, MatchOutcome::Partial);
        assert_eq!(out.matched.len(), 1);
        assert_eq!(out.unmatched.len(), 1);
        assert_eq!(out.unmatched[0].index, 0);
        assert!(out.unmatched[0].best_score.unwrap() < 70.0);
    }

    #[test]
    fn all_unmatched_is_distinct_from_partial() {
        let catalog = Catalog::from_records(vec![product("P1", "Tomato Sauce", "Acme")]);
        let out = reconcile(
            &order(vec![line("garden rake", "1"), line("motor oil", "4")]),
            &catalog,
            &fuzzy_config(),
        );
        assert_eq!(out.outcome, MatchOutcome::AllUnmatched);
        assert_eq!(out.unmatched.len(), 2);
    }

    #[test]
    fn empty_order_is_its_own_outcome() {
        let catalog = Catalog::from_records(vec![product("P1", "Tomato Sauce", "Acme")]);
        let out = reconcile(&order(vec![]), &catalog, &fuzzy_config());
        assert_eq!(out.outcome, MatchOutcome::Empty);
    }

    #[test]
    fn traces_cover_every_line_without_affecting_outcome() {
        let catalog = Catalog::from_records(vec![product("P1", "Tomato Sauce", "Acme")]);
        let out = reconcile(
            &order(vec![line("tomato sauce", "1"), line("garden rake", "1")]),
            &catalog,
            &fuzzy_config(),
        );
        assert_eq!(out.traces.len(), 2);
        assert!(out.traces[0].accepted);
        assert_eq!(out.traces[0].candidate.as_deref(), Some("Tomato Sauce"));
        assert!(!out.traces[1].accepted);
        // Rejected lines still record the closest candidate and score.
        assert!(out.traces[1].score.is_some());
    }

    #[test]
    fn exact_mode_keys_on_ids() {
        let catalog = Catalog::from_records(vec![
            product("P1", "Tomato Sauce", "Acme"),
            product("P2", "Olive Oil", "Mediterra"),
        ]);
        let config = RunConfig {
            mode: MatchMode::ExactId,
            ..RunConfig::default()
        };
        let out = reconcile(
            &order(vec![line(" P2 ", "1"), line("P9", "5")]),
            &catalog,
            &config,
        );
        assert_eq!(out.matched.len(), 1);
        assert_eq!(out.matched[0].product_name, "Olive Oil");
        assert_eq!(out.unmatched[0].key, "P9");
        assert!(out.unmatched[0].best_score.is_none());
    }
}
