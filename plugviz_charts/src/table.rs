// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pivot table placement and sort adaptation.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use plugviz_buckets::{
    get_all_attribute_items_with_preference, get_all_measures, get_attribute_sort_item,
    get_items_from_buckets, get_totals_from_bucket, remove_duplicate_bucket_items,
    remove_invalid_sort, set_sort_items,
};
use plugviz_model::{
    Bucket, BucketName, ExtendedReferencePoint, ItemType, SortDirection, Total,
};

use crate::layout::owned;

const ROW_PREFERENCE: &[BucketName] = &[
    BucketName::ATTRIBUTE,
    BucketName::ATTRIBUTES,
    BucketName::VIEW,
    BucketName::TREND,
    BucketName::LOCATION,
];

const COLUMN_BUCKETS: &[BucketName] = &[BucketName::COLUMNS, BucketName::STACK, BucketName::SEGMENT];

/// Places every measure, splits attributes into rows and columns, and keeps the row totals
/// that still refer to placed items.
pub(crate) fn configure_table(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let measures = owned(get_all_measures(buckets));
    let columns = owned(get_items_from_buckets(
        buckets,
        COLUMN_BUCKETS,
        Some(ItemType::ATTRIBUTES),
    ));
    let rows = owned(
        get_all_attribute_items_with_preference(buckets, ROW_PREFERENCE)
            .into_iter()
            .filter(|row| !columns.contains(row)),
    );

    let totals: Vec<Total> = get_totals_from_bucket(buckets, &BucketName::ATTRIBUTE)
        .iter()
        .filter(|t| {
            measures.iter().any(|m| m.local_identifier == t.measure_identifier)
                && rows.iter().any(|r| r.local_identifier == t.attribute_identifier)
        })
        .cloned()
        .collect();
    let mut row_bucket = Bucket::new(BucketName::ATTRIBUTE, rows);
    if !totals.is_empty() {
        row_bucket = row_bucket.with_totals(totals);
    }

    let configured = ExtendedReferencePoint {
        buckets: remove_duplicate_bucket_items(&[
            Bucket::new(BucketName::MEASURES, measures),
            row_bucket,
            Bucket::new(BucketName::COLUMNS, columns),
        ]),
        ..reference_point.clone()
    };
    adapt_sort(&configured)
}

/// Drops sorts on items the table no longer shows, then falls back to sorting by the first
/// row ascending.
pub(crate) fn adapt_sort(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let mut sanitized = remove_invalid_sort(reference_point);
    let has_sort = sanitized
        .properties
        .as_ref()
        .and_then(|p| p.sort_items.as_ref())
        .is_some_and(|s| !s.is_empty());
    if has_sort {
        return sanitized;
    }
    let first_row = sanitized
        .bucket(&BucketName::ATTRIBUTE)
        .and_then(|b| b.items.first())
        .map(|row| row.local_identifier.clone());
    match first_row {
        Some(row) => {
            sanitized
                .properties
                .get_or_insert_with(Default::default)
                .sort_items = Some(vec![get_attribute_sort_item(&row, SortDirection::Asc, false)]);
            sanitized
        }
        None => set_sort_items(&sanitized),
    }
}
