// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configurators that strip measure options the current arrangement cannot show.

use plugviz_model::{ExtendedReferencePoint, ItemType, OverTimeComparisonType};
use tracing::debug;

use crate::derived::{
    filter_out_arithmetic_measures_from_derived, filter_out_derived_measures,
    filter_out_incompatible_arithmetic_measures, keep_only_master_and_derived_measures_of_type,
    remove_all_derived_measures,
};
use crate::query::{get_comparison_type_from_filters, is_comparison_available};
use crate::rules::{is_comparison_over_time_allowed, is_show_in_percent_allowed};

/// Enables or clears percent-of-total per bucket.
///
/// A bucket that fails the percent rules, or every bucket when `percent_disabled` is set,
/// loses the `show_in_percent` flag of its measures. The bucket's
/// `is_show_in_percent_enabled` toggle is only touched when the bucket accepts measures.
pub fn configure_percent(
    reference_point: &ExtendedReferencePoint,
    percent_disabled: bool,
) -> ExtendedReferencePoint {
    let mut configured = reference_point.clone();
    for bucket in &mut configured.buckets {
        let enabled = !percent_disabled
            && is_show_in_percent_allowed(
                &reference_point.buckets,
                &reference_point.filters,
                &bucket.local_identifier,
            );
        if !enabled {
            for measure in bucket.items.iter_mut().filter_map(|i| i.measure_mut()) {
                measure.show_in_percent = None;
            }
        }
        if let Some(ui) = configured.ui_config.buckets.get_mut(&bucket.local_identifier)
            && ui.accepts.contains(&ItemType::Metric)
        {
            ui.is_show_in_percent_enabled = enabled;
        }
    }
    configured
}

/// Removes derived and arithmetic measures that do not fit the applied over-time comparison.
///
/// The applied comparison comes from the global date filter. When comparison is not allowed
/// at all, derived measures and the arithmetic measures built from them are removed. When the
/// visualization does not support the applied comparison, only derived measures of the kind
/// it can still show survive. Derived measures are also removed when no date item shares the
/// dataset of the date filter.
pub fn configure_over_time_comparison(
    reference_point: &ExtendedReferencePoint,
    week_filters_enabled: bool,
) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let filters = &reference_point.filters;
    let supported = &reference_point.ui_config.supported_over_time_comparison_types;

    let applied = get_comparison_type_from_filters(filters);
    let applied_supported = supported.contains(&applied);
    let derived_of_type_to_keep = if supported.is_empty()
        || supported.as_slice() == [OverTimeComparisonType::Nothing]
    {
        OverTimeComparisonType::Nothing
    } else {
        applied
    };
    let allowed = is_comparison_over_time_allowed(buckets, filters, week_filters_enabled);

    let mut configured = reference_point.clone();
    for bucket in &mut configured.buckets {
        let mut items = bucket.items.clone();
        if !allowed {
            items = filter_out_arithmetic_measures_from_derived(&items, buckets);
            items = filter_out_derived_measures(&items);
        }
        if !applied_supported {
            items = filter_out_incompatible_arithmetic_measures(
                &items,
                buckets,
                derived_of_type_to_keep,
            );
            items = keep_only_master_and_derived_measures_of_type(&items, derived_of_type_to_keep);
        }
        bucket.items = items;
    }

    if !is_comparison_available(&configured.buckets, filters) {
        configured.buckets = remove_all_derived_measures(&configured.buckets);
    }
    debug!(
        ?applied,
        allowed,
        applied_supported,
        "configured over-time comparison"
    );
    configured
}
