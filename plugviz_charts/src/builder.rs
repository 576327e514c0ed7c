// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The generic reference point builder and execution shaping.
//!
//! Every chart type runs the same recipe, parameterized by its [`ChartDescriptor`]:
//! 1. attach the chart's default UI config,
//! 2. drop derived measures if the chart never compares over time,
//! 3. place items into the chart's buckets,
//! 4. configure show-in-percent and over-time comparison,
//! 5. add recommendations and keep only supported property controls,
//! 6. set bucket titles, subtitles, icons and item limits,
//! 7. drop measures whose master or operands did not survive,
//! 8. drop or adapt sorts, and finally sanitize filters.
//!
//! The input reference point is never modified.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use plugviz_buckets::{
    apply_ui_config, comparison_and_trending_recommendation, configure_over_time_comparison,
    configure_percent, create_sorts, get_bucket_items, get_supported_properties,
    over_time_comparison_recommendation, percent_recommendation,
    remove_all_arithmetic_measures_from_derived, remove_all_derived_measures,
    remove_invalid_sort, remove_measures_with_missing_dependencies, remove_sort,
    sanitize_filters, set_bucket_icons, set_bucket_titles,
};
use plugviz_model::{Bucket, ExtendedReferencePoint, Recommendations, ReferencePoint, SortItem};
use serde_json::{Map, Value};
use tracing::debug;

use crate::descriptor::{BucketLayout, ChartDescriptor};
use crate::dimensions::generate_dimensions;
use crate::error::VisualizationError;
use crate::execution::{ExecutionDefinition, ExecutionFactory};
use crate::headline::configure_headline;
use crate::layout;
use crate::settings::Settings;
use crate::table::configure_table;
use crate::ui_defaults::default_ui_config;

fn configure_buckets(
    descriptor: &ChartDescriptor,
    reference_point: &ExtendedReferencePoint,
) -> ExtendedReferencePoint {
    match &descriptor.layout {
        BucketLayout::Stacked {
            view,
            stack,
            stack_types,
        } => layout::stacked(reference_point, view, stack, stack_types),
        BucketLayout::Round => layout::round(reference_point, descriptor.chart_type),
        BucketLayout::MeasureSlots { slots, categories } => {
            layout::measure_slots(reference_point, slots, categories)
        }
        BucketLayout::Combo => layout::combo(reference_point),
        BucketLayout::Table => configure_table(reference_point),
        BucketLayout::Headline => configure_headline(reference_point),
        BucketLayout::Xirr => layout::xirr(reference_point),
        BucketLayout::Pushpin => layout::pushpin(reference_point),
        BucketLayout::GeoArea => layout::geo_area(reference_point),
        BucketLayout::Flow => layout::flow(reference_point),
        BucketLayout::Repeater => layout::repeater(reference_point),
    }
}

fn set_recommendations(
    reference_point: &ExtendedReferencePoint,
    settings: &Settings,
) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let filters = &reference_point.filters;
    let comparison = comparison_and_trending_recommendation(buckets);
    let mut recommended = reference_point.clone();
    recommended.ui_config.recommendations = Recommendations {
        comparison: Some(comparison),
        trending: Some(comparison),
        percent: Some(percent_recommendation(buckets, filters)),
        previous_period: Some(over_time_comparison_recommendation(
            buckets,
            filters,
            settings.enable_week_filters,
        )),
    };
    recommended
}

/// Normalizes `reference_point` into the extended reference point of the described chart.
pub fn build_extended_reference_point(
    descriptor: &ChartDescriptor,
    settings: &Settings,
    reference_point: &ReferencePoint,
) -> ExtendedReferencePoint {
    let chart_type = descriptor.chart_type;
    let mut extended = ExtendedReferencePoint::from_reference_point(
        reference_point,
        default_ui_config(chart_type, settings),
    );
    if !descriptor.over_time_comparison {
        extended.buckets = remove_all_derived_measures(
            &remove_all_arithmetic_measures_from_derived(&extended.buckets),
        );
    }

    let mut extended = configure_buckets(descriptor, &extended);
    debug!(
        %chart_type,
        buckets = extended.buckets.len(),
        items = extended.buckets.iter().map(|b| b.items.len()).sum::<usize>(),
        "configured buckets"
    );

    extended = configure_percent(&extended, descriptor.percent_disabled);
    extended = configure_over_time_comparison(&extended, settings.enable_week_filters);
    if descriptor.recommendations {
        extended = set_recommendations(&extended, settings);
    }
    extended.properties = extended
        .properties
        .as_ref()
        .map(|p| get_supported_properties(Some(p), descriptor.supported_properties));

    extended.ui_config = set_bucket_titles(&extended, chart_type);
    set_bucket_icons(&mut extended.ui_config, chart_type);
    extended = apply_ui_config(&extended);
    extended.buckets = remove_measures_with_missing_dependencies(&extended.buckets);

    extended = if descriptor.keeps_sort {
        remove_invalid_sort(&extended)
    } else {
        remove_sort(&extended)
    };
    sanitize_filters(&extended)
}

/// Rejects insights the described chart cannot render.
pub fn check_before_render(
    descriptor: &ChartDescriptor,
    buckets: &[Bucket],
) -> Result<(), VisualizationError> {
    let has_measures = buckets
        .iter()
        .flat_map(|b| &b.items)
        .any(|i| i.measure_item().is_some());
    if descriptor.requires_measures && !has_measures {
        return Err(VisualizationError::NoMeasures {
            visualization: descriptor.chart_type,
        });
    }
    if let Some(bucket) = &descriptor.required_bucket
        && get_bucket_items(buckets, bucket).is_empty()
    {
        return Err(VisualizationError::EmptyBucket {
            visualization: descriptor.chart_type,
            bucket: bucket.clone(),
        });
    }
    Ok(())
}

/// Whether stacked totals can be sorted: measures are stacked, but not to percent.
pub fn can_sort_stack_total(controls: Option<&Map<String, Value>>) -> bool {
    let flag = |key: &str| controls.and_then(|c| c.get(key)).and_then(Value::as_bool);
    flag("stackMeasures") == Some(true) && flag("stackMeasuresToPercent") != Some(true)
}

/// Describes the execution of `insight` as the described chart renders it.
///
/// Tables keep the insight's own sorts; other charts get their default sorts.
pub fn build_execution(
    descriptor: &ChartDescriptor,
    insight: &ReferencePoint,
    factory: &dyn ExecutionFactory,
) -> Result<ExecutionDefinition, VisualizationError> {
    check_before_render(descriptor, &insight.buckets)?;

    let chart_type = descriptor.chart_type;
    let properties = insight.properties.as_ref();
    let sorts: Vec<SortItem> = if descriptor.keeps_sort {
        properties
            .and_then(|p| p.sort_items.clone())
            .unwrap_or_default()
    } else {
        let controls = properties.and_then(|p| p.controls.as_ref());
        create_sorts(chart_type, &insight.buckets, can_sort_stack_total(controls))
    };
    let dimensions = generate_dimensions(&insight.buckets, chart_type);
    debug!(
        %chart_type,
        dimensions = dimensions.len(),
        sorts = sorts.len(),
        "built execution"
    );

    let filters = insight.filters.clone().unwrap_or_default();
    Ok(factory
        .for_buckets(&insight.buckets, &filters)
        .with_dimensions(dimensions)
        .with_sorting(sorts))
}
