// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default sort generation and sort item housekeeping.

extern crate alloc;

use alloc::vec::Vec;

use plugviz_model::{
    AttributeSortItem, Bucket, BucketItem, BucketName, ExtendedReferencePoint, ItemType,
    SortAggregation, SortDirection, SortItem, VisualizationType,
};

use crate::query::{
    get_all_measures, get_bucket_items_by_type, get_first_attribute, get_first_valid_measure,
};

/// An attribute sort, aggregated by sum when `aggregation` is set.
pub fn get_attribute_sort_item(
    attribute_identifier: &str,
    direction: SortDirection,
    aggregation: bool,
) -> SortItem {
    SortItem::AttributeSortItem(AttributeSortItem {
        attribute_identifier: attribute_identifier.into(),
        direction,
        aggregation: aggregation.then_some(SortAggregation::Sum),
    })
}

fn attributes<'a>(buckets: &'a [Bucket], name: &BucketName) -> Vec<&'a BucketItem> {
    get_bucket_items_by_type(buckets, name, ItemType::ATTRIBUTES)
}

fn by_sum(item: &BucketItem) -> SortItem {
    get_attribute_sort_item(&item.local_identifier, SortDirection::Desc, true)
}

fn default_bar_sort(buckets: &[Bucket], can_sort_stack_total: bool) -> Vec<SortItem> {
    let measures = get_all_measures(buckets);
    let view = attributes(buckets, &BucketName::VIEW);
    let stack = attributes(buckets, &BucketName::STACK);

    match view.as_slice() {
        [first, second] => match measures.first() {
            Some(measure) if measures.len() >= 2 && !can_sort_stack_total => alloc::vec![
                by_sum(first),
                SortItem::measure(&measure.local_identifier, SortDirection::Desc),
            ],
            _ => alloc::vec![by_sum(first), by_sum(second)],
        },
        [first, ..] if !stack.is_empty() || can_sort_stack_total => alloc::vec![by_sum(first)],
        [_, ..] => measures
            .first()
            .map(|m| alloc::vec![SortItem::measure(&m.local_identifier, SortDirection::Desc)])
            .unwrap_or_default(),
        [] => Vec::new(),
    }
}

fn default_treemap_sort(buckets: &[Bucket]) -> Vec<SortItem> {
    let view = attributes(buckets, &BucketName::VIEW);
    let segment = attributes(buckets, &BucketName::SEGMENT);
    let Some(first) = view.first() else {
        return Vec::new();
    };
    if segment.is_empty() {
        return Vec::new();
    }
    let mut sorts = alloc::vec![SortItem::attribute(&first.local_identifier, SortDirection::Asc)];
    sorts.extend(
        get_all_measures(buckets)
            .into_iter()
            .map(|m| SortItem::measure(&m.local_identifier, SortDirection::Desc)),
    );
    sorts
}

/// Default sorts of a freshly built chart.
///
/// Bar charts sort by measure or by aggregated attribute depending on their view and stack
/// shape; treemaps sort by view attribute and measures when segmented. Other charts have no
/// default sort.
pub fn create_sorts(
    chart_type: VisualizationType,
    buckets: &[Bucket],
    can_sort_stack_total: bool,
) -> Vec<SortItem> {
    match chart_type {
        VisualizationType::Bar => default_bar_sort(buckets, can_sort_stack_total),
        VisualizationType::Treemap => default_treemap_sort(buckets),
        _ => Vec::new(),
    }
}

/// Local identifiers of every bucket item, in bucket-then-item order.
pub fn get_bucket_item_identifiers(reference_point: &ExtendedReferencePoint) -> Vec<&str> {
    reference_point
        .buckets
        .iter()
        .flat_map(|b| b.items.iter())
        .map(|i| i.local_identifier.as_str())
        .collect()
}

/// Drops sort items that reference an identifier not placed in any bucket.
pub fn remove_invalid_sort(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let mut sanitized = reference_point.clone();
    let identifiers = get_bucket_item_identifiers(reference_point);
    if let Some(properties) = sanitized.properties.as_mut() {
        let sort_items = properties.sort_items.take().unwrap_or_default();
        properties.sort_items = Some(
            sort_items
                .into_iter()
                .filter(|sort| sort.identifiers().iter().all(|id| identifiers.contains(id)))
                .collect(),
        );
    }
    sanitized
}

/// Adds a default sort when the reference point has none.
///
/// Measures without attributes sort by the first valid measure, descending; attributes
/// without measures sort by the first attribute, ascending. Anything else is left unsorted.
pub fn set_sort_items(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let has_sort = reference_point
        .properties
        .as_ref()
        .and_then(|p| p.sort_items.as_ref())
        .is_some_and(|s| !s.is_empty());
    if has_sort {
        return reference_point.clone();
    }

    let buckets = &reference_point.buckets;
    let sort = match (get_first_valid_measure(buckets), get_first_attribute(buckets)) {
        (Some(measure), None) => SortItem::measure(&measure.local_identifier, SortDirection::Desc),
        (None, Some(attribute)) => {
            get_attribute_sort_item(&attribute.local_identifier, SortDirection::Asc, false)
        }
        _ => return reference_point.clone(),
    };
    let mut sorted = reference_point.clone();
    sorted.properties.get_or_insert_with(Default::default).sort_items = Some(alloc::vec![sort]);
    sorted
}

/// Drops the sort items of the reference point.
pub fn remove_sort(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let mut unsorted = reference_point.clone();
    if let Some(properties) = unsorted.properties.as_mut() {
        properties.sort_items = None;
    }
    unsorted
}
