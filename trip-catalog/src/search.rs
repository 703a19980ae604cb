use std::cmp::Ordering;

use trip_core::{Offer, Package, PackageSearchResult, PackageWithOffers, SearchFilters};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Composable package filter.
///
/// A package is evaluated once per attached offer (or once with no offer when
/// it has none) and kept when any of those rows satisfies every supplied
/// clause. Results are ordered by start date, newest first.
pub struct PackageSearch {
    page_size: usize,
}

impl PackageSearch {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn run(&self, filters: &SearchFilters, candidates: Vec<PackageWithOffers>) -> Vec<PackageSearchResult> {
        let mut results: Vec<PackageSearchResult> = candidates
            .into_iter()
            .filter_map(|candidate| evaluate(filters, candidate))
            .collect();

        results.sort_by(|a, b| newest_first(&a.package, &b.package));
        results.truncate(self.page_size);
        results
    }
}

impl Default for PackageSearch {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

fn newest_first(a: &Package, b: &Package) -> Ordering {
    b.start_date.cmp(&a.start_date).then_with(|| b.id.cmp(&a.id))
}

fn evaluate(filters: &SearchFilters, candidate: PackageWithOffers) -> Option<PackageSearchResult> {
    if !package_matches(filters, &candidate.package) {
        return None;
    }

    let matching: Vec<&Offer> = if candidate.offers.is_empty() {
        if !offer_matches(filters, None) {
            return None;
        }
        Vec::new()
    } else {
        let rows: Vec<&Offer> = candidate
            .offers
            .iter()
            .filter(|o| offer_matches(filters, Some(*o)))
            .collect();
        if rows.is_empty() {
            return None;
        }
        rows
    };

    Some(PackageSearchResult {
        discount_type: matching.iter().map(|o| o.discount_type.as_str()).max().map(str::to_string),
        discount_percentage: matching
            .iter()
            .map(|o| o.discount_percentage)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p)))),
        min_duration: matching.iter().filter_map(|o| o.min_duration).max(),
        max_duration: matching.iter().filter_map(|o| o.max_duration).max(),
        min_group_size: matching.iter().filter_map(|o| o.min_group_size).max(),
        max_group_size: matching.iter().filter_map(|o| o.max_group_size).max(),
        package: candidate.package,
    })
}

/// Clauses on package columns.
pub fn package_matches(filters: &SearchFilters, package: &Package) -> bool {
    if filters.start_date.is_some_and(|d| package.start_date < d) {
        return false;
    }
    if filters.end_date.is_some_and(|d| package.end_date > d) {
        return false;
    }
    if filters.min_price.is_some_and(|p| package.price < p) {
        return false;
    }
    if filters.max_price.is_some_and(|p| package.price > p) {
        return false;
    }
    if let Some(hotel_type) = &filters.hotel_type {
        if &package.hotel_type != hotel_type {
            return false;
        }
    }
    true
}

/// Clauses on the joined offer row; `None` is a package without offers.
/// A missing bound on the offer counts as 0, so an offer-level clause never
/// matches a package without offers.
pub fn offer_matches(filters: &SearchFilters, offer: Option<&Offer>) -> bool {
    if let Some(group_size) = filters.group_size {
        let min = offer.and_then(|o| o.min_group_size).unwrap_or(0);
        let max = offer.and_then(|o| o.max_group_size).unwrap_or(0);
        if !(min <= group_size && max >= group_size) {
            return false;
        }
    }
    if let Some(duration) = filters.duration {
        let min = offer.and_then(|o| o.min_duration).unwrap_or(0);
        let max = offer.and_then(|o| o.max_duration).unwrap_or(0);
        if !(min <= duration && max >= duration) {
            return false;
        }
    }
    if let Some(discount_type) = &filters.discount_type {
        match offer {
            Some(o) if o.discount_type.as_str() == discount_type => {}
            _ => return false,
        }
    }
    true
}
