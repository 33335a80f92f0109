//! Client Filtering
//!
//! In-memory filter/sort/paginate pipeline over the immutable client
//! snapshot. Filtering is a conjunction of predicates; empty selections
//! impose no constraint.

use std::collections::HashSet;

use crate::api::ClientRecord;
use crate::format::parse_decimal_flexible;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Current filter and pagination state for the clients page.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub levels: HashSet<String>,
    pub risks: HashSet<String>,
    pub statuses: HashSet<String>,
    /// Raw min/max revenue inputs; parsed leniently, unparseable = unbounded.
    pub min_revenue: String,
    pub max_revenue: String,
    pub page_size: usize,
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            levels: HashSet::new(),
            risks: HashSet::new(),
            statuses: HashSet::new(),
            min_revenue: String::new(),
            max_revenue: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl FilterState {
    fn min_bound(&self) -> Option<f64> {
        parse_decimal_flexible(&self.min_revenue)
    }

    fn max_bound(&self) -> Option<f64> {
        parse_decimal_flexible(&self.max_revenue)
    }

    /// True when the record satisfies every active predicate.
    pub fn matches(&self, record: &ClientRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let name_hit = record
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            let email_hit = record
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle));
            if !name_hit && !email_hit {
                return false;
            }
        }

        if !self.levels.is_empty()
            && !record.level.as_deref().is_some_and(|l| self.levels.contains(l))
        {
            return false;
        }
        if !self.risks.is_empty()
            && !record
                .risk_tier
                .as_deref()
                .is_some_and(|r| self.risks.contains(r))
        {
            return false;
        }
        if !self.statuses.is_empty()
            && !record
                .churn_status
                .as_deref()
                .is_some_and(|s| self.statuses.contains(s))
        {
            return false;
        }

        let revenue = record.revenue_value();
        if let Some(min) = self.min_bound() {
            if revenue < min {
                return false;
            }
        }
        if let Some(max) = self.max_bound() {
            if revenue > max {
                return false;
            }
        }

        true
    }
}

/// Apply one filter mutation to the current state. The mutation sees
/// the state as it is at commit time, so a deferred (debounced) change
/// never clobbers edits that landed while it was pending; any change
/// invalidates the page index.
pub fn commit_change(filters: &mut FilterState, change: impl FnOnce(&mut FilterState)) {
    change(filters);
    filters.page = 1;
}

/// Recompute the filtered view: conjunction of predicates, then a fixed
/// sort by priority score descending (ties by name). Never mutates the
/// source collection.
pub fn apply_filters(all: &[ClientRecord], filters: &FilterState) -> Vec<ClientRecord> {
    let mut filtered: Vec<ClientRecord> = all
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let pa = a.priority_score.unwrap_or(0.0);
        let pb = b.priority_score.unwrap_or(0.0);
        pb.partial_cmp(&pa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    filtered
}

/// Number of pages for a result count; at least 1 so an empty result
/// still has a valid current page.
pub fn page_count(result_len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    result_len.div_ceil(page_size).max(1)
}

/// Clamp a page index into `[1, page_count]`.
pub fn clamp_page(page: usize, result_len: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(result_len, page_size))
}

/// The slice of the filtered view shown on one page:
/// `[(page-1)*size, page*size)`.
pub fn page_slice<'a, T>(filtered: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    let page = clamp_page(page, filtered.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(filtered.len());
    if start >= filtered.len() {
        &[]
    } else {
        &filtered[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(
        name: &str,
        email: &str,
        level: &str,
        risk: &str,
        status: &str,
        revenue: &str,
        priority: f64,
    ) -> ClientRecord {
        ClientRecord {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            level: Some(level.to_string()),
            risk_tier: Some(risk.to_string()),
            churn_status: Some(status.to_string()),
            revenue: Some(revenue.to_string()),
            priority_score: Some(priority),
            ..Default::default()
        }
    }

    fn base() -> Vec<ClientRecord> {
        vec![
            client("Papelaria Central", "central@pap.com", "Premium", "Alto Risco", "Ativo", "5.000,00", 220.0),
            client("Gráfica Sul", "vendas@sul.com", "Gold", "Médio Risco", "Inativo", "1.200,50", 150.0),
            client("Bazar Norte", "norte@bazar.com", "Bronze", "Baixo Risco", "Dormant_Bronze", "80,00", 45.0),
            client("Livraria Leste", "leste@livros.com", "Silver", "Baixo Risco", "Ativo", "640,00", 90.0),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything_sorted_by_priority() {
        let all = base();
        let filtered = apply_filters(&all, &FilterState::default());
        assert_eq!(filtered.len(), all.len());
        let priorities: Vec<f64> = filtered
            .iter()
            .map(|c| c.priority_score.unwrap())
            .collect();
        assert_eq!(priorities, vec![220.0, 150.0, 90.0, 45.0]);
    }

    #[test]
    fn test_search_matches_name_or_email_case_insensitive() {
        let all = base();
        let mut filters = FilterState {
            search: "CENTRAL".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&all, &filters).len(), 1);

        filters.search = "vendas@sul".to_string();
        let filtered = apply_filters(&all, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_deref(), Some("Gráfica Sul"));
    }

    #[test]
    fn test_conjunction_of_predicates() {
        let all = base();
        let mut filters = FilterState::default();
        filters.statuses.insert("Ativo".to_string());
        filters.levels.insert("Silver".to_string());

        let filtered = apply_filters(&all, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_deref(), Some("Livraria Leste"));
    }

    #[test]
    fn test_empty_selection_is_vacuously_true() {
        let all = base();
        let filters = FilterState::default();
        assert!(all.iter().all(|c| filters.matches(c)));
    }

    #[test]
    fn test_revenue_bounds_lenient_parse() {
        let all = base();
        let mut filters = FilterState {
            min_revenue: "1.000,00".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&all, &filters).len(), 2);

        filters.max_revenue = "2000".to_string();
        let filtered = apply_filters(&all, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_deref(), Some("Gráfica Sul"));

        // Unparseable bound is unbounded
        filters.min_revenue = "n/a".to_string();
        filters.max_revenue = String::new();
        assert_eq!(apply_filters(&all, &filters).len(), 4);
    }

    #[test]
    fn test_filtered_is_subset_satisfying_predicates() {
        let all = base();
        let mut filters = FilterState {
            search: "a".to_string(),
            ..Default::default()
        };
        filters.statuses.insert("Ativo".to_string());

        let filtered = apply_filters(&all, &filters);
        assert!(filtered.len() <= all.len());
        assert!(filtered.iter().all(|c| filters.matches(c)));
    }

    #[test]
    fn test_commit_change_resets_page() {
        let mut filters = FilterState {
            page: 4,
            ..Default::default()
        };
        commit_change(&mut filters, |f| f.search = "papel".to_string());
        assert_eq!(filters.search, "papel");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_deferred_commit_keeps_interleaved_edits() {
        let mut filters = FilterState::default();

        // A deferred search edit is captured as a delta...
        let pending = |f: &mut FilterState| f.search = "papel".to_string();

        // ...and other edits land before it fires
        commit_change(&mut filters, |f| {
            f.levels.insert("Premium".to_string());
        });
        commit_change(&mut filters, |f| f.page_size = 24);

        commit_change(&mut filters, pending);

        assert_eq!(filters.search, "papel");
        assert!(filters.levels.contains("Premium"));
        assert_eq!(filters.page_size, 24);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_page_count_and_clamp() {
        assert_eq!(page_count(0, 12), 1);
        assert_eq!(page_count(12, 12), 1);
        assert_eq!(page_count(13, 12), 2);
        assert_eq!(clamp_page(0, 30, 12), 1);
        assert_eq!(clamp_page(9, 30, 12), 3);
        assert_eq!(clamp_page(2, 0, 12), 1);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items: Vec<u32> = (0..30).collect();
        assert_eq!(page_slice(&items, 1, 12), &items[0..12]);
        assert_eq!(page_slice(&items, 3, 12), &items[24..30]);
        assert!(page_slice(&items, 3, 12).len() <= 12);
        // Out-of-range page is clamped, not empty
        assert_eq!(page_slice(&items, 99, 12), &items[24..30]);
        assert!(page_slice::<u32>(&[], 1, 12).is_empty());
    }
}
