// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure bucket-normalization functions for pluggable visualizations.
//!
//! This crate provides:
//! - total query functions over buckets (missing buckets read as empty),
//! - master/derived/arithmetic relationship queries and filters,
//! - the dependency-aware measure limiter,
//! - the over-time comparison and percent configurators with the rules they consult,
//! - the filter sanitizer, and
//! - sort, supported-property and UI-config helpers.
//!
//! Every function takes its input by reference and returns new values; callers can keep
//! using their original reference point afterwards.

#![no_std]

extern crate alloc;

mod configure;
mod derived;
mod limit;
mod properties;
mod query;
mod rules;
mod sanitize;
mod sort;
mod transform;
mod ui_config;

#[cfg(test)]
mod configure_tests;
#[cfg(test)]
mod test_mocks;

pub use configure::{configure_over_time_comparison, configure_percent};
pub use derived::{
    add_new_derived_bucket_items, filter_out_arithmetic_measures_from_derived,
    filter_out_derived_measures, filter_out_incompatible_arithmetic_measures,
    find_derived_bucket_item, find_derived_bucket_items, find_master_bucket_item,
    find_master_bucket_items, get_derived_types_from_arithmetic_measure,
    get_first_master_with_derived, has_derived_bucket_items,
    keep_only_master_and_derived_measures_of_type, remove_all_arithmetic_measures_from_derived,
    remove_all_derived_measures, remove_measures_with_missing_dependencies, DerivedTypes,
};
pub use limit::{
    get_filtered_measures_for_stacked_charts, limit_number_of_measure_items_in_buckets,
    limit_number_of_measures_in_buckets,
};
pub use properties::{get_supported_properties, get_supported_property_controls};
pub use query::{
    find_bucket, get_all_attribute_items, get_all_attribute_items_with_preference,
    get_all_categories_attribute_items, get_all_items_by_type, get_all_measure_items,
    get_all_measures, get_attribute_from_items, get_attribute_items,
    get_attribute_items_without_stacks, get_attribute_to_items, get_bucket_items,
    get_bucket_items_by_type, get_bucket_items_with_exclude_by_type, get_buckets_by_names,
    get_date_items, get_first_attribute, get_first_date_item, get_first_valid_measure,
    get_items_from_buckets, get_main_date_item, get_measure_items, get_preferred_bucket,
    get_preferred_bucket_items, get_stack_items, get_totals_from_bucket, get_unique_attributes,
    get_view_items, has_bucket, is_comparison_available, get_comparison_type_from_filters,
    no_columns_and_has_one_measure, no_rows_and_has_one_measure, ATTRIBUTE_BUCKET_PREFERENCE,
};
pub use rules::{
    comparison_and_trending_recommendation, get_master_measures_count, has_first_date,
    has_global_date_filter, has_global_date_filter_ignore_all_time,
    has_measure_value_filter_on_derived, has_no_categories, has_no_stacks,
    has_no_week_granularity, has_one_category, has_one_master_measure_in_bucket,
    has_one_measure, has_ranking_filter, has_some_segment_by_items, has_used_date,
    is_comparison_over_time_allowed, is_show_in_percent_allowed, no_derived_measure_present,
    over_time_comparison_recommendation, percent_recommendation, previous_period_recommendation,
    WEEK_GRANULARITY,
};
pub use sanitize::sanitize_filters;
pub use sort::{
    create_sorts, get_attribute_sort_item, get_bucket_item_identifiers, remove_invalid_sort,
    remove_sort, set_sort_items,
};
pub use transform::{
    apply_items_limit, get_all_measures_show_on_secondary_axis, get_items_local_identifiers,
    has_same_date_dimension, remove_divergent_date_items, remove_duplicate_bucket_items,
    remove_show_on_secondary_axis, set_measures_show_on_secondary_axis,
    transform_measure_buckets, MeasureBucketLimit,
};
pub use ui_config::{
    apply_ui_config, bucket_supports_subtitle, generate_bucket_title_id, get_items_count,
    set_bucket_icons, set_bucket_titles,
};
