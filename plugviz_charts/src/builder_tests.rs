// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of the catalog visualizations.

extern crate alloc;
extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use plugviz_model::{
    Bucket, BucketItem, BucketName, DATE_DATASET_ATTRIBUTE, DateFilter, ExtendedReferencePoint,
    FilterBucket, FiltersBucketItem, ObjRef, OverTimeComparisonType, ReferencePoint, SortDirection,
    SortItem, Total, VisualizationProperties, VisualizationType,
};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

use crate::{
    DefaultExecutionFactory, Dimension, MEASURE_GROUP, PluggableVisualization, Settings,
    VisualizationCatalog, VisualizationError, can_sort_stack_total,
};

const SPPY: OverTimeComparisonType = OverTimeComparisonType::SamePeriodPreviousYear;

fn metric(id: &str) -> BucketItem {
    BucketItem::metric(id)
}

fn pop(id: &str, master: &str) -> BucketItem {
    BucketItem::derived(id, master, SPPY)
}

fn arithmetic(id: &str, operands: &[&str]) -> BucketItem {
    let operands: Vec<Option<&str>> = operands.iter().map(|o| Some(*o)).collect();
    BucketItem::arithmetic(id, &operands, "sum")
}

fn attribute(id: &str) -> BucketItem {
    BucketItem::attribute(id, &alloc::format!("attr.{id}"))
}

fn date(id: &str, dataset: &str) -> BucketItem {
    BucketItem::date(id, "attr.date", ObjRef::uri(dataset))
}

fn date_filter(dataset: &str) -> FilterBucket {
    let item = FiltersBucketItem::new(
        "date_filter",
        DateFilter {
            attribute: DATE_DATASET_ATTRIBUTE.into(),
            over_time_comparison_type: Some(SPPY),
            interval: None,
        },
    )
    .with_date_dataset(ObjRef::uri(dataset))
    .with_auto_created(false);
    FilterBucket::new(vec![item])
}

fn bucket(name: BucketName, items: Vec<BucketItem>) -> Bucket {
    Bucket::new(name, items)
}

fn visualization(name: &str) -> alloc::boxed::Box<dyn PluggableVisualization> {
    VisualizationCatalog::default().get(name).unwrap()
}

fn extended(name: &str, reference_point: &ReferencePoint) -> ExtendedReferencePoint {
    visualization(name)
        .get_extended_reference_point(reference_point)
        .unwrap()
}

fn layout(extended: &ExtendedReferencePoint) -> Vec<(&str, Vec<&str>)> {
    extended
        .buckets
        .iter()
        .map(|b| {
            (
                b.local_identifier.as_str(),
                b.items.iter().map(|i| i.local_identifier.as_str()).collect(),
            )
        })
        .collect()
}

fn controls(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[test]
fn bubble_places_only_available_measures() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(BucketName::SECONDARY_MEASURES, vec![]),
            bucket(BucketName::TERTIARY_MEASURES, vec![]),
            bucket(BucketName::VIEW, vec![attribute("a1")]),
        ],
        FilterBucket::default(),
    );
    let extended = extended("bubble", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("measures", vec!["m1"]),
            ("secondary_measures", vec![]),
            ("tertiary_measures", vec![]),
            ("view", vec!["a1"]),
        ]
    );
    let can_add = |name: &BucketName| extended.ui_config.bucket(name).map(|b| b.can_add_items);
    assert_eq!(can_add(&BucketName::MEASURES), Some(false));
    assert_eq!(can_add(&BucketName::SECONDARY_MEASURES), Some(true));
}

#[test]
fn bubble_never_keeps_derived_measures() {
    let reference_point = ReferencePoint::new(
        vec![bucket(
            BucketName::MEASURES,
            vec![metric("m1"), pop("m1_pop", "m1"), metric("m2")],
        )],
        date_filter("ds.sales"),
    );
    let extended = extended("bubble", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("measures", vec!["m1"]),
            ("secondary_measures", vec!["m2"]),
            ("tertiary_measures", vec![]),
            ("view", vec![]),
        ]
    );
}

#[test]
fn comparison_is_stripped_when_date_dataset_differs() {
    let buckets = vec![
        bucket(BucketName::MEASURES, vec![metric("m1"), pop("m1_pop", "m1")]),
        bucket(BucketName::VIEW, vec![date("d1", "ds.sales")]),
    ];

    let other_dataset = ReferencePoint::new(buckets.clone(), date_filter("ds.orders"));
    let stripped = extended("column", &other_dataset);
    assert_eq!(
        layout(&stripped),
        [
            ("measures", vec!["m1"]),
            ("view", vec!["d1"]),
            ("stack", vec![]),
        ]
    );
    assert_eq!(stripped.filters.items.len(), 1, "explicit date filter is kept");

    let same_dataset = ReferencePoint::new(buckets, date_filter("ds.sales"));
    let kept = extended("column", &same_dataset);
    assert_eq!(layout(&kept)[0], ("measures", vec!["m1", "m1_pop"]));
}

#[test]
fn input_reference_point_is_not_modified() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(
                BucketName::MEASURES,
                vec![metric("m1"), pop("m1_pop", "m1"), metric("m2"), metric("m3")],
            ),
            bucket(
                BucketName::VIEW,
                vec![attribute("a1"), attribute("a2"), attribute("a3")],
            ),
        ],
        date_filter("ds.sales"),
    )
    .with_properties(VisualizationProperties {
        sort_items: Some(vec![SortItem::measure("m2", SortDirection::Desc)]),
        controls: Some(controls(json!({ "legend": { "enabled": true }, "unknown": 1 }))),
    });
    let snapshot = reference_point.clone();

    let catalog = VisualizationCatalog::default();
    for name in catalog.names() {
        let visualization = catalog.get(name).unwrap();
        visualization
            .get_extended_reference_point(&reference_point)
            .unwrap();
        assert_eq!(reference_point, snapshot, "{name} modified its input");
    }
}

#[test]
fn headline_picks_the_next_master_without_date_filter() {
    let reference_point = ReferencePoint::new(
        vec![bucket(
            BucketName::MEASURES,
            vec![metric("m1"), metric("m2"), pop("m1_pop", "m1")],
        )],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("headline", &reference_point)),
        [("measures", vec!["m1"]), ("secondary_measures", vec!["m2"])]
    );
}

#[test]
fn headline_maps_buckets_that_already_fit() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(BucketName::SECONDARY_MEASURES, vec![pop("m1_pop", "m1")]),
        ],
        date_filter("ds.sales"),
    );
    let extended = extended("headline", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("measures", vec!["m1"]),
            ("secondary_measures", vec!["m1_pop"]),
        ]
    );
    assert!(!extended.ui_config.export_config.supported);
}

#[test]
fn table_keeps_placed_totals_and_sorts_by_first_row() {
    let total = |measure: &str, attribute: &str| Total {
        measure_identifier: measure.into(),
        total_type: "sum".into(),
        attribute_identifier: attribute.into(),
    };
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1"), metric("m2")]),
            bucket(BucketName::ATTRIBUTE, vec![attribute("a1"), attribute("a2")])
                .with_totals(vec![total("m1", "a1"), total("m9", "a1")]),
            bucket(BucketName::COLUMNS, vec![attribute("a3")]),
        ],
        FilterBucket::default(),
    );
    let extended = extended("table", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("measures", vec!["m1", "m2"]),
            ("attribute", vec!["a1", "a2"]),
            ("columns", vec!["a3"]),
        ]
    );
    assert_eq!(
        extended.buckets[1].totals,
        Some(vec![total("m1", "a1")])
    );
    assert_eq!(
        extended.properties.and_then(|p| p.sort_items),
        Some(vec![SortItem::attribute("a1", SortDirection::Asc)])
    );
}

#[test]
fn table_moves_view_and_stack_into_rows_and_columns() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(BucketName::VIEW, vec![attribute("a1")]),
            bucket(BucketName::STACK, vec![attribute("a2")]),
        ],
        FilterBucket::default(),
    )
    .with_properties(VisualizationProperties {
        sort_items: Some(vec![SortItem::measure("m1", SortDirection::Desc)]),
        controls: None,
    });
    let extended = extended("table", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("measures", vec!["m1"]),
            ("attribute", vec!["a1"]),
            ("columns", vec!["a2"]),
        ]
    );
    assert_eq!(
        extended.properties.and_then(|p| p.sort_items),
        Some(vec![SortItem::measure("m1", SortDirection::Desc)]),
        "valid sorts survive"
    );
}

#[test]
fn single_measure_promotes_overflowing_attribute_to_stack() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(
                BucketName::VIEW,
                vec![attribute("a1"), attribute("a2"), attribute("a3")],
            ),
        ],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("column", &reference_point)),
        [
            ("measures", vec!["m1"]),
            ("view", vec!["a1", "a2"]),
            ("stack", vec!["a3"]),
        ]
    );
}

#[test]
fn stack_limits_measures_to_one() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1"), metric("m2")]),
            bucket(BucketName::VIEW, vec![attribute("a1")]),
            bucket(BucketName::STACK, vec![attribute("a2")]),
        ],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("bar", &reference_point)),
        [
            ("measures", vec!["m1"]),
            ("view", vec!["a1"]),
            ("stack", vec!["a2"]),
        ]
    );
}

#[test]
fn pie_without_categories_shows_many_measures() {
    let reference_point = ReferencePoint::new(
        vec![bucket(
            BucketName::MEASURES,
            vec![metric("m1"), metric("m2"), metric("m3")],
        )],
        FilterBucket::default(),
    );
    let extended = extended("pie", &reference_point);
    assert_eq!(
        layout(&extended),
        [("measures", vec!["m1", "m2", "m3"]), ("view", vec![])]
    );
    assert_eq!(extended.ui_config.items_limit(&BucketName::VIEW), Some(0));
    assert_eq!(extended.ui_config.items_limit(&BucketName::MEASURES), Some(20));
}

#[test]
fn pie_with_category_keeps_one_measure() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1"), metric("m2")]),
            bucket(BucketName::VIEW, vec![attribute("a1"), attribute("a2")]),
        ],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("donut", &reference_point)),
        [("measures", vec!["m1"]), ("view", vec!["a1"])]
    );
}

#[test]
fn column_recommends_comparison_for_a_lone_measure() {
    let reference_point = ReferencePoint::new(
        vec![bucket(BucketName::MEASURES, vec![metric("m1")])],
        FilterBucket::default(),
    );
    let recommendations = extended("column", &reference_point).ui_config.recommendations;
    assert_eq!(recommendations.comparison, Some(true));
    assert_eq!(recommendations.trending, Some(true));
    assert_eq!(recommendations.percent, Some(false));
}

#[test]
fn unsupported_controls_are_dropped() {
    let reference_point = ReferencePoint::new(
        vec![bucket(BucketName::MEASURES, vec![metric("m1")])],
        FilterBucket::default(),
    )
    .with_properties(VisualizationProperties {
        sort_items: None,
        controls: Some(controls(json!({
            "legend": { "enabled": false },
            "stackMeasures": true,
        }))),
    });
    let properties = extended("pie", &reference_point).properties;
    assert_eq!(
        properties.and_then(|p| p.controls),
        Some(controls(json!({ "legend": { "enabled": false } })))
    );
}

#[test]
fn rendering_without_measures_is_rejected() {
    let insight = ReferencePoint::new(
        vec![bucket(BucketName::VIEW, vec![attribute("a1")])],
        FilterBucket::default(),
    );
    assert_eq!(
        visualization("column").build_execution(&insight, &DefaultExecutionFactory),
        Err(VisualizationError::NoMeasures {
            visualization: VisualizationType::Column,
        })
    );
    assert!(
        visualization("repeater")
            .build_execution(&insight, &DefaultExecutionFactory)
            .is_ok()
    );
}

#[test]
fn scatter_execution_has_point_dimensions() {
    let insight = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(BucketName::ATTRIBUTE, vec![attribute("a1")]),
        ],
        FilterBucket::default(),
    );
    let execution = visualization("scatter")
        .build_execution(&insight, &DefaultExecutionFactory)
        .unwrap();
    assert_eq!(
        execution.dimensions,
        [
            Dimension::new(vec!["a1".into()]),
            Dimension::new(vec![MEASURE_GROUP.into()]),
        ]
    );
    assert_eq!(execution.buckets, insight.buckets);
    assert!(execution.sort_by.is_empty());
}

#[test]
fn table_execution_keeps_insight_sorts() {
    let sorts = vec![SortItem::attribute("a1", SortDirection::Desc)];
    let insight = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1")]),
            bucket(BucketName::ATTRIBUTE, vec![attribute("a1")]),
        ],
        FilterBucket::default(),
    )
    .with_properties(VisualizationProperties {
        sort_items: Some(sorts.clone()),
        controls: None,
    });
    let execution = visualization("table")
        .build_execution(&insight, &DefaultExecutionFactory)
        .unwrap();
    assert_eq!(execution.sort_by, sorts);
}

#[test]
fn unmounted_visualizations_refuse_work() {
    let mut visualization = visualization("line");
    let reference_point = ReferencePoint::default();
    assert!(visualization.get_extended_reference_point(&reference_point).is_ok());

    visualization.unmount();
    assert_eq!(
        visualization.get_extended_reference_point(&reference_point),
        Err(VisualizationError::Unmounted)
    );
    assert_eq!(
        visualization.build_execution(&reference_point, &DefaultExecutionFactory),
        Err(VisualizationError::Unmounted)
    );
}

#[test]
fn week_filters_setting_reaches_visualizations() {
    let settings = Settings {
        enable_week_filters: true,
        ..Settings::default()
    };
    let catalog = VisualizationCatalog::new(settings);
    assert_eq!(catalog.settings(), &settings);
    let week = date("d1", "ds.sales").with_granularity("GDC.time.week_us");
    let reference_point = ReferencePoint::new(
        vec![
            bucket(BucketName::MEASURES, vec![metric("m1"), pop("m1_pop", "m1")]),
            bucket(BucketName::VIEW, vec![week]),
        ],
        date_filter("ds.sales"),
    );
    let with_weeks = catalog
        .get("column")
        .unwrap()
        .get_extended_reference_point(&reference_point)
        .unwrap();
    assert_eq!(layout(&with_weeks)[0], ("measures", vec!["m1", "m1_pop"]));

    let without_weeks = extended("column", &reference_point);
    assert_eq!(layout(&without_weeks)[0], ("measures", vec!["m1"]));
}

#[test]
fn stack_totals_sort_only_when_stacked_in_absolute_values() {
    assert!(!can_sort_stack_total(None));
    let stacked = controls(json!({ "stackMeasures": true }));
    assert!(can_sort_stack_total(Some(&stacked)));
    let to_percent = controls(json!({ "stackMeasures": true, "stackMeasuresToPercent": true }));
    assert!(!can_sort_stack_total(Some(&to_percent)));
}

fn bullet(measures: Vec<BucketItem>) -> ExtendedReferencePoint {
    let reference_point = ReferencePoint::new(
        vec![bucket(BucketName::MEASURES, measures)],
        date_filter("ds.sales"),
    );
    extended("bullet", &reference_point)
}

#[test]
fn bullet_adds_an_arithmetic_measure_that_fits() {
    let measures = vec![
        arithmetic("am3", &["m1", "m1"]),
        pop("m1_pop", "m1"),
        metric("m2"),
        metric("m1"),
    ];
    assert_eq!(
        layout(&bullet(measures)),
        [
            ("measures", vec!["am3"]),
            ("secondary_measures", vec!["m1_pop"]),
            ("tertiary_measures", vec!["m1"]),
            ("view", vec![]),
        ]
    );
}

#[test]
fn bullet_skips_an_arithmetic_measure_that_does_not_fit() {
    let measures = vec![
        metric("m1"),
        arithmetic("am7", &["m1", "m3"]),
        metric("m2"),
        pop("m1_pop", "m1"),
        metric("m3"),
    ];
    assert_eq!(
        layout(&bullet(measures)),
        [
            ("measures", vec!["m1"]),
            ("secondary_measures", vec!["m2"]),
            ("tertiary_measures", vec!["m1_pop"]),
            ("view", vec![]),
        ]
    );
}

#[test]
fn bullet_accepts_an_arithmetic_measure_over_one_operand_twice() {
    let measures = vec![arithmetic("am3", &["m1", "m1"]), metric("m1"), metric("m2")];
    assert_eq!(
        layout(&bullet(measures)),
        [
            ("measures", vec!["am3"]),
            ("secondary_measures", vec!["m1"]),
            ("tertiary_measures", vec!["m2"]),
            ("view", vec![]),
        ]
    );
}

#[test]
fn scatter_drops_an_arithmetic_measure_without_room_for_its_operands() {
    let reference_point = ReferencePoint::new(
        vec![bucket(
            BucketName::MEASURES,
            vec![arithmetic("am1", &["m1", "m2"]), metric("m1"), metric("m2")],
        )],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("scatter", &reference_point)),
        [
            ("measures", vec!["m1"]),
            ("secondary_measures", vec!["m2"]),
            ("attribute", vec![]),
        ]
    );
}

#[test]
fn xirr_picks_a_measure_that_needs_no_other() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(
                BucketName::MEASURES,
                vec![arithmetic("am1", &["m1", "m2"]), metric("m1"), metric("m2")],
            ),
            bucket(BucketName::VIEW, vec![date("d1", "ds.sales")]),
        ],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("xirr", &reference_point)),
        [("measures", vec!["m1"]), ("attribute", vec!["d1"])]
    );
}

#[test]
fn geo_area_takes_its_area_from_a_pushpin() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(
                BucketName::LOCATION,
                vec![BucketItem::geo_attribute("g1", "attr.region")],
            ),
            bucket(BucketName::SIZE, vec![metric("m1")]),
            bucket(BucketName::COLOR, vec![metric("m2"), metric("m3")]),
            bucket(BucketName::SEGMENT, vec![attribute("a1")]),
        ],
        FilterBucket::default(),
    );
    let extended = extended("choropleth", &reference_point);
    assert_eq!(
        layout(&extended),
        [
            ("area", vec!["g1"]),
            ("color", vec!["m2"]),
            ("segment", vec!["a1"]),
        ]
    );
    assert!(extended.properties.is_none());
    assert_eq!(
        extended
            .ui_config
            .bucket(&BucketName::COLOR)
            .map(|b| b.is_show_in_percent_enabled),
        Some(false)
    );
}

#[test]
fn geo_area_keeps_a_single_plain_measure() {
    let reference_point = ReferencePoint::new(
        vec![
            bucket(
                BucketName::MEASURES,
                vec![arithmetic("am1", &["m1", "m2"]), metric("m1"), metric("m2")],
            ),
            bucket(BucketName::VIEW, vec![attribute("a1")]),
        ],
        FilterBucket::default(),
    );
    assert_eq!(
        layout(&extended("choropleth", &reference_point)),
        [("area", vec![]), ("color", vec!["m1"]), ("segment", vec!["a1"])]
    );
}

#[test]
fn geo_area_needs_an_area_to_render() {
    let without_area = ReferencePoint::new(
        vec![bucket(BucketName::COLOR, vec![metric("m1")])],
        FilterBucket::default(),
    );
    assert_eq!(
        visualization("choropleth").build_execution(&without_area, &DefaultExecutionFactory),
        Err(VisualizationError::EmptyBucket {
            visualization: VisualizationType::GeoArea,
            bucket: BucketName::AREA,
        })
    );

    let with_area = ReferencePoint::new(
        vec![bucket(
            BucketName::AREA,
            vec![BucketItem::geo_attribute("g1", "attr.region")],
        )],
        FilterBucket::default(),
    );
    let execution = visualization("choropleth")
        .build_execution(&with_area, &DefaultExecutionFactory)
        .unwrap();
    assert_eq!(
        execution.dimensions,
        [
            Dimension::new(vec!["g1".into()]),
            Dimension::new(vec![MEASURE_GROUP.into()]),
        ]
    );
}
