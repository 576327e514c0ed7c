// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Predicates over buckets and filters.
//!
//! The configurators use them to decide which measure options stay available; UI config uses
//! the `*_recommendation` combinations to suggest features.

use plugviz_model::{Bucket, BucketFilter, BucketName, FilterBucket};

use crate::query::{get_all_attribute_items, get_all_measures, get_bucket_items};

/// Granularity of week-based date attributes.
pub const WEEK_GRANULARITY: &str = "GDC.time.week_us";

/// Exactly one item in the `measures` bucket.
pub fn has_one_measure(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::MEASURES).len() == 1
}

/// Number of master measures in the named bucket.
pub fn get_master_measures_count(buckets: &[Bucket], name: &BucketName) -> usize {
    get_bucket_items(buckets, name)
        .iter()
        .filter(|i| i.is_metric() && !i.is_derived())
        .count()
}

/// Exactly one master measure in the named bucket; its derived measures do not matter.
pub fn has_one_master_measure_in_bucket(buckets: &[Bucket], name: &BucketName) -> bool {
    get_master_measures_count(buckets, name) == 1
}

/// No derived measure anywhere.
pub fn no_derived_measure_present(buckets: &[Bucket]) -> bool {
    !get_all_measures(buckets).iter().any(|m| m.is_derived())
}

/// The `segment` bucket holds at least one item.
pub fn has_some_segment_by_items(buckets: &[Bucket]) -> bool {
    !get_bucket_items(buckets, &BucketName::SEGMENT).is_empty()
}

/// The `stack` bucket is empty or absent.
pub fn has_no_stacks(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::STACK).is_empty()
}

/// The `view` bucket is empty or absent.
pub fn has_no_categories(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::VIEW).is_empty()
}

/// Exactly one item in the `view` bucket.
pub fn has_one_category(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::VIEW).len() == 1
}

/// The first item of the `view` bucket is a date.
pub fn has_first_date(buckets: &[Bucket]) -> bool {
    get_bucket_items(buckets, &BucketName::VIEW)
        .first()
        .is_some_and(|item| item.is_date())
}

/// No date item is sliced by week.
pub fn has_no_week_granularity(buckets: &[Bucket]) -> bool {
    !get_all_attribute_items(buckets)
        .iter()
        .any(|item| item.is_date() && item.granularity() == Some(WEEK_GRANULARITY))
}

/// A global date filter is present, all-time included.
pub fn has_global_date_filter(filters: &FilterBucket) -> bool {
    filters.date_filter().is_some()
}

/// The global date filter is present and restricts the date range.
pub fn has_global_date_filter_ignore_all_time(filters: &FilterBucket) -> bool {
    filters.date_filter().is_some_and(|f| !f.is_all_time())
}

/// A date is in play, either as a global date filter or as a date item.
pub fn has_used_date(buckets: &[Bucket], filters: &FilterBucket) -> bool {
    has_global_date_filter(filters) || get_all_attribute_items(buckets).iter().any(|i| i.is_date())
}

/// A ranking filter is present.
pub fn has_ranking_filter(filters: &FilterBucket) -> bool {
    filters
        .filters()
        .any(|f| matches!(f, BucketFilter::Ranking(_)))
}

/// A measure value filter targets a derived measure.
pub fn has_measure_value_filter_on_derived(buckets: &[Bucket], filters: &FilterBucket) -> bool {
    let measures = get_all_measures(buckets);
    filters.filters().any(|f| match f {
        BucketFilter::MeasureValue(filter) => measures
            .iter()
            .any(|m| m.local_identifier == filter.measure_local_identifier && m.is_derived()),
        _ => false,
    })
}

/// Percent-of-total can be shown for the measures of the named bucket.
pub fn is_show_in_percent_allowed(
    buckets: &[Bucket],
    filters: &FilterBucket,
    name: &BucketName,
) -> bool {
    !has_ranking_filter(filters)
        && !has_measure_value_filter_on_derived(buckets, filters)
        && has_one_master_measure_in_bucket(buckets, name)
}

/// Over-time comparison can be applied at all.
///
/// Requires a global date filter and no stacking; week-sliced dates are only accepted with
/// `week_filters_enabled`.
pub fn is_comparison_over_time_allowed(
    buckets: &[Bucket],
    filters: &FilterBucket,
    week_filters_enabled: bool,
) -> bool {
    has_global_date_filter(filters)
        && has_no_stacks(buckets)
        && (week_filters_enabled || has_no_week_granularity(buckets))
}

/// One measure and nothing to slice it by: suggest comparing or trending.
pub fn comparison_and_trending_recommendation(buckets: &[Bucket]) -> bool {
    has_one_measure(buckets) && has_no_categories(buckets) && no_derived_measure_present(buckets)
}

/// One measure sliced by one category without stacking: suggest percent of total.
pub fn percent_recommendation(buckets: &[Bucket], filters: &FilterBucket) -> bool {
    has_one_measure(buckets)
        && has_one_category(buckets)
        && has_no_stacks(buckets)
        && !has_ranking_filter(filters)
}

/// One plain measure: suggest a previous-period comparison.
pub fn previous_period_recommendation(buckets: &[Bucket]) -> bool {
    has_one_measure(buckets) && no_derived_measure_present(buckets)
}

/// One plain measure trended by date under a restricting date filter: suggest an
/// over-time comparison.
pub fn over_time_comparison_recommendation(
    buckets: &[Bucket],
    filters: &FilterBucket,
    week_filters_enabled: bool,
) -> bool {
    has_one_measure(buckets)
        && no_derived_measure_present(buckets)
        && has_first_date(buckets)
        && has_global_date_filter_ignore_all_time(filters)
        && (week_filters_enabled || has_no_week_granularity(buckets))
}
