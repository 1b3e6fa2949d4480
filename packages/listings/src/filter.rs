//! Pure derivation of filtered, ordered listing views.
//!
//! [`evaluate`] is referentially transparent: the same snapshot and
//! criteria always produce the same sequence, and the snapshot is never
//! mutated. It never suspends and never fails; an empty result is an
//! ordinary value ("store not yet loaded" is the caller's bookkeeping).

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::types::{FilterCriteria, Listing, SortKey};

/// Evaluate criteria against a snapshot, producing the derived view.
///
/// Stages: retain records matching every active predicate, stable-sort by
/// the sort key (ties keep snapshot order), then truncate to the limit.
pub fn evaluate(snapshot: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let mut results: Vec<Listing> = snapshot
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect();

    sort_by_key(&mut results, criteria.sort_key);

    if let Some(limit) = criteria.limit {
        results.truncate(limit);
    }
    results
}

fn sort_by_key(listings: &mut [Listing], key: SortKey) {
    // Vec::sort_by* is stable, which is what makes ties deterministic.
    match key {
        SortKey::Newest => listings.sort_by_key(|l| Reverse(created_or_epoch(l))),
        SortKey::Oldest => listings.sort_by_key(created_or_epoch),
        SortKey::MostInterest => listings.sort_by_key(|l| Reverse(l.interest_count)),
        SortKey::LeastInterest => listings.sort_by_key(|l| l.interest_count),
        SortKey::PriceLow => listings.sort_by(|a, b| rent_or_zero(a).total_cmp(&rent_or_zero(b))),
        SortKey::PriceHigh => listings.sort_by(|a, b| rent_or_zero(b).total_cmp(&rent_or_zero(a))),
    }
}

fn created_or_epoch(listing: &Listing) -> DateTime<Utc> {
    listing.created_at.unwrap_or(DateTime::UNIX_EPOCH)
}

fn rent_or_zero(listing: &Listing) -> f64 {
    listing.rent_amount.unwrap_or(0.0)
}
