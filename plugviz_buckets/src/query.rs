// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Total query functions over buckets.
//!
//! A missing bucket reads as an empty one; no query fails.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use plugviz_model::{
    Bucket, BucketItem, BucketName, FilterBucket, ItemType, OverTimeComparisonType, Total,
};

/// Preference order used to pick the canonical "first" attribute of a chart.
pub const ATTRIBUTE_BUCKET_PREFERENCE: &[BucketName] =
    &[BucketName::LOCATION, BucketName::VIEW, BucketName::TREND];

const MEASURE_BUCKET_PREFERENCE: &[BucketName] = &[
    BucketName::MEASURES,
    BucketName::SECONDARY_MEASURES,
    BucketName::TERTIARY_MEASURES,
];

fn has_type(item: &BucketItem, types: &[ItemType]) -> bool {
    types.contains(&item.item_type)
}

/// Returns `true` if a bucket with this name exists.
pub fn has_bucket(buckets: &[Bucket], name: &BucketName) -> bool {
    buckets.iter().any(|b| b.local_identifier == *name)
}

/// Returns the first bucket with this name.
pub fn find_bucket<'a>(buckets: &'a [Bucket], name: &BucketName) -> Option<&'a Bucket> {
    buckets.iter().find(|b| b.local_identifier == *name)
}

/// Returns the buckets whose name is in `names`, in bucket order.
pub fn get_buckets_by_names<'a>(buckets: &'a [Bucket], names: &[BucketName]) -> Vec<&'a Bucket> {
    buckets
        .iter()
        .filter(|b| names.contains(&b.local_identifier))
        .collect()
}

/// Items of the named bucket; empty when the bucket is absent.
pub fn get_bucket_items<'a>(buckets: &'a [Bucket], name: &BucketName) -> &'a [BucketItem] {
    find_bucket(buckets, name).map_or(&[], |b| &b.items)
}

/// Items of the named bucket restricted to `types`.
pub fn get_bucket_items_by_type<'a>(
    buckets: &'a [Bucket],
    name: &BucketName,
    types: &[ItemType],
) -> Vec<&'a BucketItem> {
    get_bucket_items(buckets, name)
        .iter()
        .filter(|item| has_type(item, types))
        .collect()
}

/// Items of the named buckets, concatenated in `names` order.
///
/// With `types`, only items of those types are returned.
pub fn get_items_from_buckets<'a>(
    buckets: &'a [Bucket],
    names: &[BucketName],
    types: Option<&[ItemType]>,
) -> Vec<&'a BucketItem> {
    names
        .iter()
        .flat_map(|name| {
            get_bucket_items(buckets, name)
                .iter()
                .filter(move |item| types.is_none_or(|t| has_type(item, t)))
        })
        .collect()
}

/// The first bucket, in `preference` order, whose name matches and whose every item is of
/// one of `types`.
pub fn get_preferred_bucket<'a>(
    buckets: &'a [Bucket],
    preference: &[BucketName],
    types: &[ItemType],
) -> Option<&'a Bucket> {
    preference.iter().find_map(|name| {
        buckets.iter().find(|b| {
            b.local_identifier == *name && b.items.iter().all(|item| has_type(item, types))
        })
    })
}

/// Items of [`get_preferred_bucket`]; empty when no bucket matches.
pub fn get_preferred_bucket_items<'a>(
    buckets: &'a [Bucket],
    preference: &[BucketName],
    types: &[ItemType],
) -> Vec<&'a BucketItem> {
    get_preferred_bucket(buckets, preference, types)
        .map(|b| b.items.iter().collect())
        .unwrap_or_default()
}

/// Every item of one of `types`, in bucket-then-item order.
pub fn get_all_items_by_type<'a>(buckets: &'a [Bucket], types: &[ItemType]) -> Vec<&'a BucketItem> {
    buckets
        .iter()
        .flat_map(|b| b.items.iter())
        .filter(|item| has_type(item, types))
        .collect()
}

/// Items of buckets not named in `excluded`, restricted to `types`.
pub fn get_bucket_items_with_exclude_by_type<'a>(
    buckets: &'a [Bucket],
    excluded: &[BucketName],
    types: &[ItemType],
) -> Vec<&'a BucketItem> {
    buckets
        .iter()
        .filter(|b| !excluded.contains(&b.local_identifier))
        .flat_map(|b| b.items.iter())
        .filter(|item| has_type(item, types))
        .collect()
}

/// Totals of the named bucket.
pub fn get_totals_from_bucket<'a>(buckets: &'a [Bucket], name: &BucketName) -> &'a [Total] {
    find_bucket(buckets, name)
        .and_then(|b| b.totals.as_deref())
        .unwrap_or(&[])
}

/// Attribute and date items, deduplicated by the attribute they display.
pub fn get_unique_attributes(buckets: &[Bucket]) -> Vec<&BucketItem> {
    let mut seen = HashSet::new();
    get_all_attribute_items(buckets)
        .into_iter()
        .filter(|item| seen.insert(item.attribute_ref()))
        .collect()
}

/// Every metric, in bucket-then-item order.
pub fn get_all_measures(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_all_items_by_type(buckets, ItemType::METRICS)
}

/// Alias of [`get_all_measures`] kept for symmetry with [`get_all_attribute_items`].
pub fn get_all_measure_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_all_measures(buckets)
}

/// Every attribute and date item, in bucket-then-item order.
pub fn get_all_attribute_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_all_items_by_type(buckets, ItemType::ATTRIBUTES)
}

/// The first measure that is not an arithmetic measure with an unfilled operand.
pub fn get_first_valid_measure(buckets: &[Bucket]) -> Option<&BucketItem> {
    get_all_measures(buckets)
        .into_iter()
        .find(|m| m.operands().iter().all(Option::is_some))
}

/// The first unique attribute.
pub fn get_first_attribute(buckets: &[Bucket]) -> Option<&BucketItem> {
    get_unique_attributes(buckets).into_iter().next()
}

/// Metrics of the measure buckets in primary, secondary, tertiary order.
///
/// Falls back to every metric when none of those buckets holds metrics only.
pub fn get_measure_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    let preferred: Vec<_> = MEASURE_BUCKET_PREFERENCE
        .iter()
        .flat_map(|name| {
            get_preferred_bucket_items(buckets, core::slice::from_ref(name), ItemType::METRICS)
        })
        .collect();
    if preferred.is_empty() {
        get_all_measures(buckets)
    } else {
        preferred
    }
}

/// Items of the stack bucket (or segment bucket) when all of them are of `types`.
pub fn get_stack_items<'a>(buckets: &'a [Bucket], types: &[ItemType]) -> Vec<&'a BucketItem> {
    get_preferred_bucket_items(buckets, &[BucketName::STACK, BucketName::SEGMENT], types)
}

/// Items of the `attribute_to` bucket.
pub fn get_attribute_to_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_preferred_bucket_items(buckets, &[BucketName::ATTRIBUTE_TO], ItemType::ATTRIBUTES)
}

/// Items of the `attribute_from` bucket.
pub fn get_attribute_from_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_preferred_bucket_items(buckets, &[BucketName::ATTRIBUTE_FROM], ItemType::ATTRIBUTES)
}

/// Items of the view bucket when all of them are of `types`.
pub fn get_view_items<'a>(buckets: &'a [Bucket], types: &[ItemType]) -> Vec<&'a BucketItem> {
    get_preferred_bucket_items(buckets, &[BucketName::VIEW], types)
}

/// Attribute and date items with location, view and trend items first.
pub fn get_attribute_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_all_attribute_items_with_preference(buckets, ATTRIBUTE_BUCKET_PREFERENCE)
}

/// [`get_attribute_items`] minus the stack items of `stack_types`.
pub fn get_attribute_items_without_stacks<'a>(
    buckets: &'a [Bucket],
    stack_types: &[ItemType],
) -> Vec<&'a BucketItem> {
    let stacks = get_stack_items(buckets, stack_types);
    get_attribute_items(buckets)
        .into_iter()
        .filter(|a| !stacks.contains(a))
        .collect()
}

/// [`get_attribute_items`] minus stack items, dates included.
pub fn get_all_categories_attribute_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_attribute_items_without_stacks(buckets, ItemType::ATTRIBUTES)
}

/// Attribute and date items of the `preference` buckets first (in preference order), then
/// those of every other bucket in bucket order.
pub fn get_all_attribute_items_with_preference<'a>(
    buckets: &'a [Bucket],
    preference: &[BucketName],
) -> Vec<&'a BucketItem> {
    let preferred = preference.iter().flat_map(|name| {
        get_preferred_bucket_items(buckets, core::slice::from_ref(name), ItemType::ATTRIBUTES)
    });
    let others = buckets
        .iter()
        .filter(|b| !preference.contains(&b.local_identifier))
        .flat_map(|b| get_bucket_items_by_type(buckets, &b.local_identifier, ItemType::ATTRIBUTES));
    preferred.chain(others).collect()
}

/// Date items among the category attributes.
pub fn get_date_items(buckets: &[Bucket]) -> Vec<&BucketItem> {
    get_attribute_items_without_stacks(buckets, &[ItemType::Attribute])
        .into_iter()
        .filter(|item| item.is_date())
        .collect()
}

/// The first date item among the category attributes.
pub fn get_first_date_item(buckets: &[Bucket]) -> Option<&BucketItem> {
    get_date_items(buckets).into_iter().next()
}

/// The date item that drives the date dimension of a chart.
pub fn get_main_date_item<'a>(date_items: &[&'a BucketItem]) -> Option<&'a BucketItem> {
    date_items.first().copied()
}

/// Exactly one measure and an empty view bucket.
pub fn no_rows_and_has_one_measure(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::MEASURES).len() == 1
        && get_bucket_items(buckets, &BucketName::VIEW).is_empty()
}

/// Exactly one measure and an empty stack bucket.
pub fn no_columns_and_has_one_measure(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::MEASURES).len() == 1
        && get_bucket_items(buckets, &BucketName::STACK).is_empty()
}

/// Comparison kind of the first date filter; [`OverTimeComparisonType::Nothing`] if none.
pub fn get_comparison_type_from_filters(filters: &FilterBucket) -> OverTimeComparisonType {
    filters
        .date_filter()
        .and_then(|f| f.over_time_comparison_type)
        .unwrap_or(OverTimeComparisonType::Nothing)
}

/// Returns `true` unless the buckets hold date items and none of them shares the dataset of
/// the global date filter entry.
pub fn is_comparison_available(buckets: &[Bucket], filters: &FilterBucket) -> bool {
    let filter_dataset = filters
        .date_filter_item()
        .and_then(|item| item.date_dataset_ref.as_ref());
    let mut dates = buckets
        .iter()
        .flat_map(|b| b.items.iter())
        .filter(|item| item.is_date())
        .peekable();
    if dates.peek().is_none() {
        return true;
    }
    dates.any(|item| item.date_dataset_ref() == filter_dataset)
}
