// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relationships between master, derived and arithmetic measures.
//!
//! Relationships are resolved by local identifier on every call; nothing is cached.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use plugviz_model::{Bucket, BucketItem, OverTimeComparisonType};
use smallvec::SmallVec;

/// Distinct comparison kinds found below an arithmetic measure, in discovery order.
pub type DerivedTypes = SmallVec<[OverTimeComparisonType; 2]>;

fn find_by_id<'a>(id: &str, items: &[&'a BucketItem]) -> Option<&'a BucketItem> {
    items.iter().copied().find(|item| item.local_identifier == id)
}

fn collect_derived_types<'a>(
    measure: &'a BucketItem,
    all_items: &[&'a BucketItem],
    visited: &mut HashSet<&'a str>,
    types: &mut DerivedTypes,
) {
    for operand in measure.operands().iter().flatten() {
        if visited.contains(operand.as_str()) {
            continue;
        }
        let Some(operand) = find_by_id(operand, all_items) else {
            continue;
        };
        if operand.is_arithmetic() {
            visited.insert(&operand.local_identifier);
            collect_derived_types(operand, all_items, visited, types);
        } else if operand.is_derived() {
            let kind = operand
                .over_time_comparison_type()
                .unwrap_or(OverTimeComparisonType::Nothing);
            if !types.contains(&kind) {
                types.push(kind);
            }
        }
    }
}

/// Comparison kinds of the derived measures an arithmetic measure is built from, directly or
/// through other arithmetic measures.
///
/// Operand cycles are cut by a visited set, so a self-referencing measure yields no types.
/// Non-arithmetic measures yield no types.
pub fn get_derived_types_from_arithmetic_measure(
    measure: &BucketItem,
    buckets: &[Bucket],
) -> DerivedTypes {
    let mut types = DerivedTypes::new();
    if !measure.is_arithmetic() {
        return types;
    }
    let all_items: Vec<&BucketItem> = buckets.iter().flat_map(|b| b.items.iter()).collect();
    let mut visited = HashSet::new();
    collect_derived_types(measure, &all_items, &mut visited, &mut types);
    types
}

fn is_arithmetic_from_derived(measure: &BucketItem, buckets: &[Bucket]) -> bool {
    !get_derived_types_from_arithmetic_measure(measure, buckets).is_empty()
}

/// Drops derived measures.
pub fn filter_out_derived_measures(items: &[BucketItem]) -> Vec<BucketItem> {
    items.iter().filter(|m| !m.is_derived()).cloned().collect()
}

/// Drops arithmetic measures built on top of any derived measure found in `buckets`.
pub fn filter_out_arithmetic_measures_from_derived(
    items: &[BucketItem],
    buckets: &[Bucket],
) -> Vec<BucketItem> {
    items
        .iter()
        .filter(|m| !is_arithmetic_from_derived(m, buckets))
        .cloned()
        .collect()
}

/// Keeps masters and the derived measures of `kind`.
pub fn keep_only_master_and_derived_measures_of_type(
    items: &[BucketItem],
    kind: OverTimeComparisonType,
) -> Vec<BucketItem> {
    items
        .iter()
        .filter(|m| !m.is_derived() || m.over_time_comparison_type() == Some(kind))
        .cloned()
        .collect()
}

/// Drops arithmetic measures whose derived ancestors are not all of `kind`.
pub fn filter_out_incompatible_arithmetic_measures(
    items: &[BucketItem],
    buckets: &[Bucket],
    kind: OverTimeComparisonType,
) -> Vec<BucketItem> {
    items
        .iter()
        .filter(|m| {
            if !m.is_arithmetic() {
                return true;
            }
            let types = get_derived_types_from_arithmetic_measure(m, buckets);
            types.is_empty() || types.as_slice() == [kind]
        })
        .cloned()
        .collect()
}

/// The master measure of `derived` among `items`.
pub fn find_master_bucket_item<'a>(
    derived: &BucketItem,
    items: &'a [BucketItem],
) -> Option<&'a BucketItem> {
    let master = derived.master_local_identifier()?;
    items.iter().find(|item| item.local_identifier == master)
}

/// Every non-derived item.
pub fn find_master_bucket_items(items: &[BucketItem]) -> Vec<&BucketItem> {
    items.iter().filter(|m| !m.is_derived()).collect()
}

/// Derived measures of `master` among `items`.
pub fn find_derived_bucket_items<'a>(
    master: &BucketItem,
    items: &'a [BucketItem],
) -> Vec<&'a BucketItem> {
    items
        .iter()
        .filter(|m| m.master_local_identifier() == Some(master.local_identifier.as_str()))
        .collect()
}

/// The first derived measure of `master` among `items`.
pub fn find_derived_bucket_item<'a>(
    master: &BucketItem,
    items: &'a [BucketItem],
) -> Option<&'a BucketItem> {
    items
        .iter()
        .find(|m| m.master_local_identifier() == Some(master.local_identifier.as_str()))
}

/// Returns `true` if any bucket holds a derived measure of `master`.
pub fn has_derived_bucket_items(master: &BucketItem, buckets: &[Bucket]) -> bool {
    buckets
        .iter()
        .any(|b| find_derived_bucket_item(master, &b.items).is_some())
}

/// The first master of `items` followed, in item order, by its derived measures.
pub fn get_first_master_with_derived(items: &[BucketItem]) -> Vec<BucketItem> {
    let Some(master) = items.iter().position(|m| !m.is_derived()) else {
        return Vec::new();
    };
    let master_id = items[master].local_identifier.as_str();
    items
        .iter()
        .enumerate()
        .filter(|(i, m)| *i == master || m.master_local_identifier() == Some(master_id))
        .map(|(_, m)| m.clone())
        .collect()
}

/// Copy of `buckets` without arithmetic measures built on derived measures.
pub fn remove_all_arithmetic_measures_from_derived(buckets: &[Bucket]) -> Vec<Bucket> {
    buckets
        .iter()
        .map(|b| Bucket {
            items: filter_out_arithmetic_measures_from_derived(&b.items, buckets),
            ..b.clone()
        })
        .collect()
}

/// Copy of `buckets` without derived measures.
pub fn remove_all_derived_measures(buckets: &[Bucket]) -> Vec<Bucket> {
    buckets
        .iter()
        .map(|b| Bucket {
            items: filter_out_derived_measures(&b.items),
            ..b.clone()
        })
        .collect()
}

fn has_dependencies(item: &BucketItem, present: &HashSet<&str>) -> bool {
    item.master_local_identifier()
        .is_none_or(|master| present.contains(master))
        && item
            .operands()
            .iter()
            .flatten()
            .all(|operand| present.contains(operand.as_str()))
}

/// Copy of `buckets` without measures whose master or operands are not in `buckets`.
///
/// Removal repeats until nothing else depends on a removed measure.
pub fn remove_measures_with_missing_dependencies(buckets: &[Bucket]) -> Vec<Bucket> {
    let mut kept = buckets.to_vec();
    loop {
        let before = kept.iter().map(|b| b.items.len()).sum::<usize>();
        let next: Vec<Bucket> = {
            let present: HashSet<&str> = kept
                .iter()
                .flat_map(|b| &b.items)
                .map(|i| i.local_identifier.as_str())
                .collect();
            kept.iter()
                .map(|b| Bucket {
                    local_identifier: b.local_identifier.clone(),
                    items: b
                        .items
                        .iter()
                        .filter(|i| has_dependencies(i, &present))
                        .cloned()
                        .collect(),
                    totals: b.totals.clone(),
                })
                .collect()
        };
        kept = next;
        if kept.iter().map(|b| b.items.len()).sum::<usize>() == before {
            return kept;
        }
    }
}

/// Places the derived measures in `new_derived` next to their masters.
///
/// In the first bucket a derived measure follows its master; in every other bucket it
/// precedes it. Derived measures whose master is not placed are dropped.
pub fn add_new_derived_bucket_items(buckets: &[Bucket], new_derived: &[BucketItem]) -> Vec<Bucket> {
    buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| {
            let mut items = Vec::with_capacity(bucket.items.len());
            for item in &bucket.items {
                let derived = new_derived.iter().filter(|d| {
                    d.master_local_identifier() == Some(item.local_identifier.as_str())
                });
                if index == 0 {
                    items.push(item.clone());
                    items.extend(derived.cloned());
                } else {
                    items.extend(derived.cloned());
                    items.push(item.clone());
                }
            }
            Bucket {
                items,
                ..bucket.clone()
            }
        })
        .collect()
}
