// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket housekeeping: deduplication, per-bucket limits, measure re-allocation and date
//! alignment.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use plugviz_model::{Bucket, BucketItem, BucketName, ItemType};

use crate::query::{get_all_measures, get_preferred_bucket_items};

/// Truncates `bucket` to `items_limit` items when it holds more masters than that.
///
/// Derived measures do not count towards the limit, but once the limit is exceeded the
/// truncation is positional.
pub fn apply_items_limit(bucket: &Bucket, items_limit: usize) -> Bucket {
    let masters = bucket.items.iter().filter(|i| !i.is_derived()).count();
    if masters <= items_limit {
        return bucket.clone();
    }
    Bucket {
        items: bucket.items.iter().take(items_limit).cloned().collect(),
        ..bucket.clone()
    }
}

/// Drops every item whose local identifier already appeared earlier, across all buckets.
pub fn remove_duplicate_bucket_items(buckets: &[Bucket]) -> Vec<Bucket> {
    let mut used = HashSet::new();
    buckets
        .iter()
        .map(|bucket| Bucket {
            items: bucket
                .items
                .iter()
                .filter(|item| used.insert(item.local_identifier.as_str()))
                .cloned()
                .collect(),
            ..bucket.clone()
        })
        .collect()
}

/// Copies of `items` with the secondary-axis flag of every measure set to `value`.
pub fn set_measures_show_on_secondary_axis(
    items: &[BucketItem],
    value: Option<bool>,
) -> Vec<BucketItem> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            if let Some(measure) = item.measure_mut() {
                measure.show_on_secondary_axis = value;
            }
            item
        })
        .collect()
}

/// Copies of `items` with the secondary-axis flag cleared.
pub fn remove_show_on_secondary_axis(items: &[BucketItem]) -> Vec<BucketItem> {
    set_measures_show_on_secondary_axis(items, None)
}

/// Every measure placed on the secondary axis.
pub fn get_all_measures_show_on_secondary_axis(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_all_measures(buckets)
        .into_iter()
        .filter(|m| m.show_on_secondary_axis() == Some(true))
        .collect()
}

/// Local identifiers of `items`, in order.
pub fn get_items_local_identifiers(items: &[BucketItem]) -> Vec<&str> {
    items.iter().map(|i| i.local_identifier.as_str()).collect()
}

/// Target measure bucket of [`transform_measure_buckets`] with its capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasureBucketLimit {
    /// Name of the output bucket.
    pub name: BucketName,
    /// Maximum number of measures placed into it.
    pub items_limit: usize,
}

impl MeasureBucketLimit {
    /// A target bucket.
    pub fn new(name: BucketName, items_limit: usize) -> Self {
        Self { name, items_limit }
    }
}

fn source_buckets(name: &BucketName) -> Vec<BucketName> {
    if *name == BucketName::MEASURES {
        alloc::vec![BucketName::MEASURES, BucketName::SIZE]
    } else if *name == BucketName::SECONDARY_MEASURES {
        alloc::vec![BucketName::SECONDARY_MEASURES, BucketName::COLOR]
    } else {
        alloc::vec![name.clone()]
    }
}

/// Distributes measures over `limits`, borrowing measures a bucket cannot hold.
///
/// Each target first takes up to its limit from its own source bucket (`measures` also reads
/// `size`, `secondary_measures` also reads `color`). Measures that overflow are pooled; a
/// target whose source is empty is filled from the pool right away, and in a final pass every
/// target with free slots is topped up from the pool in target order.
pub fn transform_measure_buckets(limits: &[MeasureBucketLimit], buckets: &[Bucket]) -> Vec<Bucket> {
    let mut unused: Vec<BucketItem> = Vec::new();
    let mut placed: Vec<Bucket> = Vec::with_capacity(limits.len());

    for limit in limits {
        let mut preferred: Vec<BucketItem> =
            get_preferred_bucket_items(buckets, &source_buckets(&limit.name), ItemType::METRICS)
                .into_iter()
                .cloned()
                .collect();
        let split = preferred.len().min(limit.items_limit);
        let overflow = preferred.split_off(split);
        if preferred.is_empty() {
            let take = unused.len().min(limit.items_limit);
            placed.push(Bucket::new(limit.name.clone(), unused.drain(..take).collect()));
            continue;
        }
        unused.extend(overflow);
        placed.push(Bucket::new(limit.name.clone(), preferred));
    }

    for (bucket, limit) in placed.iter_mut().zip(limits) {
        let free = limit.items_limit.saturating_sub(bucket.items.len());
        let take = unused.len().min(free);
        bucket.items.extend(unused.drain(..take));
    }
    placed
}

/// Returns `true` if both items are dates of the same dataset.
pub fn has_same_date_dimension(item: &BucketItem, reference: &BucketItem) -> bool {
    item.is_date() && reference.is_date() && item.date_dataset_ref() == reference.date_dataset_ref()
}

/// Keeps non-date items and the dates sharing the dataset of `main_date`.
pub fn remove_divergent_date_items(items: &[BucketItem], main_date: &BucketItem) -> Vec<BucketItem> {
    items
        .iter()
        .filter(|item| !item.is_date() || has_same_date_dimension(item, main_date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::test_mocks::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn items_limit_counts_masters_only() {
        let bucket = Bucket::new(BucketName::MEASURES, vec![m1(), m1_pop(), m2()]);
        assert_eq!(apply_items_limit(&bucket, 2), bucket);
        assert_eq!(ids(&apply_items_limit(&bucket, 1).items), ["m1"]);
    }

    #[test]
    fn duplicates_are_removed_across_buckets() {
        let buckets = vec![
            Bucket::new(BucketName::MEASURES, vec![m1(), m2(), m1()]),
            Bucket::new(BucketName::SECONDARY_MEASURES, vec![m2(), m3()]),
        ];
        let deduped = remove_duplicate_bucket_items(&buckets);
        assert_eq!(ids(&deduped[0].items), ["m1", "m2"]);
        assert_eq!(ids(&deduped[1].items), ["m3"]);
    }

    #[test]
    fn secondary_axis_flags() {
        let buckets = vec![Bucket::new(BucketName::MEASURES, vec![m1(), m3(), attribute("a1")])];
        let on_secondary = get_all_measures_show_on_secondary_axis(&buckets);
        assert_eq!(on_secondary.len(), 1);
        assert_eq!(on_secondary[0].local_identifier, "m3");

        let cleared = remove_show_on_secondary_axis(&buckets[0].items);
        assert!(cleared.iter().all(|i| i.show_on_secondary_axis().is_none()));
        let set = set_measures_show_on_secondary_axis(&buckets[0].items, Some(true));
        assert_eq!(set[0].show_on_secondary_axis(), Some(true));
        assert_eq!(set[2], buckets[0].items[2]);
        assert_eq!(get_items_local_identifiers(&set), ["m1", "m3", "a1"]);
    }

    #[test]
    fn measures_are_borrowed_into_empty_buckets() {
        let buckets = vec![
            Bucket::new(BucketName::MEASURES, vec![m1(), m2(), m3()]),
            Bucket::new(BucketName::SECONDARY_MEASURES, vec![]),
            Bucket::new(BucketName::TERTIARY_MEASURES, vec![]),
        ];
        let limits = [
            MeasureBucketLimit::new(BucketName::MEASURES, 1),
            MeasureBucketLimit::new(BucketName::SECONDARY_MEASURES, 1),
            MeasureBucketLimit::new(BucketName::TERTIARY_MEASURES, 1),
        ];
        let placed = transform_measure_buckets(&limits, &buckets);
        assert_eq!(ids(&placed[0].items), ["m1"]);
        assert_eq!(ids(&placed[1].items), ["m2"]);
        assert_eq!(ids(&placed[2].items), ["m3"]);
    }

    #[test]
    fn leftover_measures_top_up_free_slots() {
        let buckets = vec![
            Bucket::new(BucketName::SIZE, vec![m1()]),
            Bucket::new(BucketName::COLOR, vec![m2(), m3(), m4()]),
        ];
        let limits = [
            MeasureBucketLimit::new(BucketName::MEASURES, 2),
            MeasureBucketLimit::new(BucketName::SECONDARY_MEASURES, 1),
        ];
        let placed = transform_measure_buckets(&limits, &buckets);
        assert_eq!(placed[0].local_identifier, BucketName::MEASURES);
        assert_eq!(ids(&placed[0].items), ["m1", "m3"]);
        assert_eq!(ids(&placed[1].items), ["m2"]);
    }

    #[test]
    fn divergent_dates_are_removed() {
        let main = date("d1", "/ds/1");
        let items = vec![attribute("a1"), date("d2", "/ds/2"), date("d3", "/ds/1")];
        assert_eq!(
            ids(&remove_divergent_date_items(&items, &main)),
            ["a1", "d3"]
        );
        assert!(!has_same_date_dimension(&attribute("a1"), &main));
    }
}
