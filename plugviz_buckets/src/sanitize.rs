// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removal of filters that reference items no longer placed in any bucket.

use plugviz_model::{BucketFilter, BucketItem, ExtendedReferencePoint, FiltersBucketItem};
use tracing::debug;

use crate::query::{get_all_attribute_items, get_all_measure_items};

fn is_used(entry: &FiltersBucketItem, attributes: &[&BucketItem], measures: &[&BucketItem]) -> bool {
    let has_measure = |id: &str| measures.iter().any(|m| m.local_identifier == id);
    match entry.filter() {
        Some(BucketFilter::Attribute(filter)) => {
            entry.auto_created == Some(false)
                || attributes
                    .iter()
                    .any(|a| a.attribute_ref() == Some(filter.attribute.as_str()))
        }
        Some(BucketFilter::Date(filter)) => {
            entry.auto_created == Some(false)
                || attributes
                    .iter()
                    .any(|a| a.attribute_ref() == Some(filter.attribute.as_str()))
        }
        Some(BucketFilter::MeasureValue(filter)) => {
            !attributes.is_empty() && has_measure(&filter.measure_local_identifier)
        }
        Some(BucketFilter::Ranking(filter)) => {
            !attributes.is_empty()
                && has_measure(&filter.measure)
                && filter.attributes.iter().flatten().all(|id| {
                    attributes.iter().any(|a| a.local_identifier == *id)
                })
        }
        Some(BucketFilter::Unrecognized(_)) | None => false,
    }
}

/// Copy of `reference_point` without filters that have lost their subject.
///
/// - Attribute and date filters survive when the user added them explicitly
///   (`auto_created == Some(false)`) or when an attribute item shows their attribute.
/// - Measure value and ranking filters need at least one attribute item and their measure;
///   ranking filters also need every attribute they rank by.
/// - Filters of unknown shape are dropped.
pub fn sanitize_filters(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let attributes = get_all_attribute_items(&reference_point.buckets);
    let measures = get_all_measure_items(&reference_point.buckets);

    let mut sanitized = reference_point.clone();
    sanitized
        .filters
        .items
        .retain(|entry| is_used(entry, &attributes, &measures));
    let dropped = reference_point.filters.items.len() - sanitized.filters.items.len();
    if dropped > 0 {
        debug!(dropped, kept = sanitized.filters.items.len(), "sanitized filters");
    }
    sanitized
}
