// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency-aware limiting of measures.
//!
//! Only master identifiers count against the limit; derived measures never consume budget.
//! Slot-based charts use a variant where every selected identifier counts.
//! A measure is only ever selected together with its whole dependency closure:
//! - the master of a derived measure, and
//! - the operands of an arithmetic measure,
//!
//! transitively. A closure that does not fit in the remaining budget is skipped as a whole.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use plugviz_model::{Bucket, BucketItem, ItemType};
use tracing::debug;

use crate::query::{get_all_measures, get_measure_items, get_stack_items};

fn find_by_id<'a>(id: &str, measures: &[&'a BucketItem]) -> Option<&'a BucketItem> {
    measures.iter().copied().find(|m| m.local_identifier == id)
}

fn push_unique<'a>(ids: &mut Vec<&'a str>, id: &'a str) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Dependency closure of `measure`, direct dependencies first.
///
/// The master of a derived measure is a dependency even when it cannot be found. Operands
/// that cannot be found are ignored. `visiting` guards against cyclic definitions.
fn collect_dependencies<'a>(
    measure: &'a BucketItem,
    all: &[&'a BucketItem],
    visiting: &mut HashSet<&'a str>,
) -> Vec<&'a str> {
    let mut direct = Vec::new();
    if let Some(master) = measure.master_local_identifier() {
        direct.push(master);
    }
    for operand in measure.operands().iter().flatten() {
        if find_by_id(operand, all).is_some() {
            direct.push(operand.as_str());
        }
    }

    visiting.insert(&measure.local_identifier);
    let mut dependencies = Vec::new();
    for &id in &direct {
        push_unique(&mut dependencies, id);
    }
    for &id in &direct {
        if visiting.contains(id) {
            continue;
        }
        if let Some(dependency) = find_by_id(id, all) {
            for indirect in collect_dependencies(dependency, all, visiting) {
                push_unique(&mut dependencies, indirect);
            }
        }
    }
    visiting.remove(measure.local_identifier.as_str());
    dependencies
}

fn dependencies<'a>(measure: &'a BucketItem, all: &[&'a BucketItem]) -> Vec<&'a str> {
    collect_dependencies(measure, all, &mut HashSet::new())
}

fn is_derived_id(id: &str, all: &[&BucketItem]) -> bool {
    find_by_id(id, all).is_some_and(|m| m.is_derived())
}

/// Number of identifiers that consume budget: everything except derived measures.
fn master_count(ids: &[&str], all: &[&BucketItem]) -> usize {
    ids.iter().filter(|id| !is_derived_id(id, all)).count()
}

/// What a selected identifier costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Budget {
    /// Only master (non-derived) measures count.
    Masters,
    /// Every measure counts, derived ones included.
    Items,
}

/// Selection state shared by both passes.
struct Selection<'a> {
    ids: Vec<&'a str>,
    used: usize,
    budget: Budget,
}

impl<'a> Selection<'a> {
    fn new(budget: Budget) -> Self {
        Self {
            ids: Vec::new(),
            used: 0,
            budget,
        }
    }

    /// Not yet selected identifiers of `candidates`, deduplicated.
    fn missing(&self, candidates: &[&'a str]) -> Vec<&'a str> {
        let mut to_place: Vec<&'a str> = Vec::new();
        for &id in candidates {
            if !self.ids.contains(&id) && !to_place.contains(&id) {
                to_place.push(id);
            }
        }
        to_place
    }

    fn cost(&self, ids: &[&str], all: &[&BucketItem]) -> usize {
        match self.budget {
            Budget::Masters => master_count(ids, all),
            Budget::Items => ids.len(),
        }
    }

    /// Appends the missing `candidates` if their cost fits under `limit`.
    fn try_select(&mut self, candidates: &[&'a str], all: &[&BucketItem], limit: usize) {
        let to_place = self.missing(candidates);
        let cost = self.cost(&to_place, all);
        if self.used + cost <= limit {
            self.used += cost;
            self.ids.extend(to_place);
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.contains(&id)
    }
}

fn select_limited<'a>(
    candidates: &[&'a BucketItem],
    count: usize,
    all: &[&'a BucketItem],
    limit: usize,
    prefer_master_derived_pairs: bool,
    selection: &mut Selection<'a>,
) {
    let already = selection.used;
    for &measure in candidates {
        let mut with_dependencies = alloc::vec![measure.local_identifier.as_str()];
        with_dependencies.extend(dependencies(measure, all));
        // Once the quota is used up only closures that cost nothing are still taken.
        let quota_reached = selection.used - already >= count;
        if quota_reached && selection.cost(&selection.missing(&with_dependencies), all) > 0 {
            continue;
        }

        if prefer_master_derived_pairs {
            let mut with_derived = with_dependencies.clone();
            with_derived.extend(
                all.iter()
                    .copied()
                    .filter(|m| {
                        m.master_local_identifier() == Some(measure.local_identifier.as_str())
                    })
                    .map(|m| m.local_identifier.as_str()),
            );
            selection.try_select(&with_derived, all, limit);
        }
        selection.try_select(&with_dependencies, all, limit);
    }
}

fn limit_measures(
    buckets: &[Bucket],
    limit: usize,
    prefer_master_derived_pairs: bool,
    budget: Budget,
) -> Vec<Bucket> {
    let all = get_all_measures(buckets);
    let mut selection = Selection::new(budget);

    for bucket in buckets {
        let bucket_measures: Vec<&BucketItem> =
            bucket.items.iter().filter(|i| i.is_metric()).collect();
        if bucket_measures.is_empty() {
            continue;
        }
        select_limited(
            &bucket_measures,
            1,
            &all,
            limit,
            prefer_master_derived_pairs,
            &mut selection,
        );
    }

    select_limited(
        &all,
        limit,
        &all,
        limit,
        prefer_master_derived_pairs,
        &mut selection,
    );
    debug!(
        limit,
        ?budget,
        available = all.len(),
        selected = selection.ids.len(),
        used = selection.used,
        "limited measures"
    );

    buckets
        .iter()
        .map(|bucket| Bucket {
            local_identifier: bucket.local_identifier.clone(),
            items: bucket
                .items
                .iter()
                .filter(|item| {
                    !item.is_metric() || selection.contains(&item.local_identifier)
                })
                .cloned()
                .collect(),
            totals: bucket.totals.clone(),
        })
        .collect()
}

/// Limits the number of measures across `buckets` to `limit`.
///
/// Measures are first picked one per bucket, in bucket order; when that leaves budget
/// unused, the remaining measures are picked globally in bucket-then-item order. A measure is
/// picked only together with its whole dependency closure, and with
/// `prefer_master_derived_pairs` the limiter first tries to also pick the measure's derived
/// measures. Non-metric items are kept untouched.
pub fn limit_number_of_measures_in_buckets(
    buckets: &[Bucket],
    limit: usize,
    prefer_master_derived_pairs: bool,
) -> Vec<Bucket> {
    limit_measures(buckets, limit, prefer_master_derived_pairs, Budget::Masters)
}

/// Limits the number of measure items across `buckets` to `limit`, derived measures included.
///
/// Selection works like [`limit_number_of_measures_in_buckets`], except that every selected
/// measure consumes budget. Charts whose measure buckets hold a single item each use this to
/// pick measures that fit their slots without leaving a dependency behind.
pub fn limit_number_of_measure_items_in_buckets(
    buckets: &[Bucket],
    limit: usize,
    prefer_master_derived_pairs: bool,
) -> Vec<Bucket> {
    limit_measures(buckets, limit, prefer_master_derived_pairs, Budget::Items)
}

/// Measure items of a chart that may stack; with stack items present only the first
/// measure (with its dependencies) is kept.
pub fn get_filtered_measures_for_stacked_charts(buckets: &[Bucket]) -> Vec<BucketItem> {
    if get_stack_items(buckets, ItemType::ATTRIBUTES).is_empty() {
        return get_measure_items(buckets).into_iter().cloned().collect();
    }
    let limited = limit_number_of_measures_in_buckets(buckets, 1, false);
    get_measure_items(&limited).into_iter().cloned().collect()
}
