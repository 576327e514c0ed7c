// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headline placement: a primary measure and the one it is compared with.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use plugviz_buckets::{
    get_all_measures, has_global_date_filter, limit_number_of_measures_in_buckets,
    remove_all_arithmetic_measures_from_derived, remove_all_derived_measures,
};
use plugviz_model::{Bucket, BucketItem, BucketName, ExtendedReferencePoint};

/// Buckets that are already headline-shaped: no attributes, at most one item in each of the
/// first two buckets and nothing after them.
fn try_to_map_foreign_buckets(buckets: &[Bucket]) -> Option<[Vec<BucketItem>; 2]> {
    let items = || buckets.iter().flat_map(|b| &b.items);
    if items().any(|i| i.attribute_item().is_some())
        || buckets.iter().any(|b| b.items.len() > 1)
        || buckets.iter().skip(2).any(|b| !b.items.is_empty())
    {
        return None;
    }
    let bucket = |index: usize| buckets.get(index).map(|b| b.items.clone()).unwrap_or_default();
    Some([bucket(0), bucket(1)])
}

/// The measure a headline shows next to `primary`: its derived or master counterpart, else
/// the next master measure.
fn secondary_measure<'a>(
    primary: &BucketItem,
    measures: &[&'a BucketItem],
) -> Option<&'a BucketItem> {
    let complementary = measures.iter().copied().find(|m| match primary.master_local_identifier() {
        Some(master) => m.local_identifier == master,
        None => m.master_local_identifier() == Some(primary.local_identifier.as_str()),
    });
    complementary.or_else(|| {
        measures
            .iter()
            .copied()
            .filter(|m| !m.is_derived())
            .find(|m| m.local_identifier != primary.local_identifier)
    })
}

/// Places a primary and an optional secondary measure.
///
/// Derived measures only survive under a global date filter. Buckets that already hold one
/// measure each map over directly; anything else is reduced to two measures that favor a
/// master together with its derived counterpart.
pub(crate) fn configure_headline(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = if has_global_date_filter(&reference_point.filters) {
        reference_point.buckets.clone()
    } else {
        remove_all_derived_measures(&remove_all_arithmetic_measures_from_derived(
            &reference_point.buckets,
        ))
    };

    let [primary, secondary] = try_to_map_foreign_buckets(&buckets).unwrap_or_else(|| {
        let limited = limit_number_of_measures_in_buckets(&buckets, 2, true);
        let measures = get_all_measures(&limited);
        match measures.first() {
            Some(primary) => [
                vec![(*primary).clone()],
                secondary_measure(primary, &measures).into_iter().cloned().collect(),
            ],
            None => [Vec::new(), Vec::new()],
        }
    });

    ExtendedReferencePoint {
        buckets: vec![
            Bucket::new(BucketName::MEASURES, primary),
            Bucket::new(BucketName::SECONDARY_MEASURES, secondary),
        ],
        ..reference_point.clone()
    }
}
