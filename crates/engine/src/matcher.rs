use crate::catalog::Catalog;
use crate::config::{MatchMode, RunConfig};
use crate::model::MatchCandidate;
use crate::normalize::normalize;
use crate::similarity::token_set_ratio;

/// Best candidate for an order-line key, acceptance decided against
/// the configured threshold. Returns None when there is nothing to
/// score: empty catalog, blank key, or an exact-id miss.
///
/// A returned candidate with `accepted: false` exists only for
/// diagnostics; callers must not treat it as a match.
pub fn best_candidate<'a>(
    key: &str,
    catalog: &'a Catalog,
    config: &RunConfig,
) -> Option<MatchCandidate<'a>> {
    let key = key.trim();
    if key.is_empty() || catalog.is_empty() {
        return None;
    }

    match config.mode {
        MatchMode::ExactId => catalog.get_by_id(key).map(|product| MatchCandidate {
            product,
            score: 100.0,
            accepted: true,
        }),
        MatchMode::FuzzyName => {
            let query = normalize(key);
            let mut best: Option<(&'a crate::model::ProductRecord, f64)> = None;
            for product in catalog.iter() {
                let score = token_set_ratio(&query, &normalize(&product.name));
                // Strict greater-than keeps the first-encountered
                // candidate on ties; catalog load order is stable.
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((product, score));
                }
            }
            best.map(|(product, score)| MatchCandidate {
                product,
                score,
                accepted: score >= f64::from(config.threshold),
            })
        }
    }
}

/// Resolve one order-line key to an accepted catalog product, or
/// nothing. Never returns a below-threshold guess.
pub fn resolve<'a>(
    key: &str,
    catalog: &'a Catalog,
    config: &RunConfig,
) -> Option<MatchCandidate<'a>> {
    best_candidate(key, catalog, config).filter(|c| c.accepted)
}
