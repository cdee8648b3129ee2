//! Matching chart-library country codes against the names used in the GDP data.

use crate::metrics::ReconcileMetrics;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Outcome of reconciling codes against GDP country names.
///
/// Every input code lands in exactly one of `matched` or `unmatched`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// code -> GDP country name
    pub matched: BTreeMap<String, String>,
    /// codes whose name does not appear in the GDP data
    pub unmatched: BTreeSet<String>,
}

/// Match each code's display name against the keys of `gdp_countries`.
///
/// Names must match exactly; the GDP-side values are never inspected.
pub fn reconcile_countries_by_name<V>(
    plot_countries: &BTreeMap<String, String>,
    gdp_countries: &HashMap<String, V>,
) -> Reconciliation {
    let mut result = Reconciliation::default();

    for (code, name) in plot_countries {
        if gdp_countries.contains_key(name) {
            result.matched.insert(code.clone(), name.clone());
        } else {
            result.unmatched.insert(code.clone());
        }
    }

    ReconcileMetrics::record_reconciliation(result.matched.len(), result.unmatched.len());
    result
}
