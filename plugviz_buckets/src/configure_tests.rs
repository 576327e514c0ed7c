// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use plugviz_model::{
    Bucket, BucketItem, BucketName, BucketUiConfig, ExtendedReferencePoint, FilterBucket, ItemType,
    OverTimeComparisonType, UiConfig,
};
use pretty_assertions::assert_eq;

use crate::rules::WEEK_GRANULARITY;
use crate::test_mocks::*;
use crate::{configure_over_time_comparison, configure_percent};

fn bucket_config(accepts: &[ItemType]) -> BucketUiConfig {
    BucketUiConfig {
        accepts: accepts.to_vec(),
        items_limit: 20,
        enabled: true,
        can_add_items: true,
        ..BucketUiConfig::default()
    }
}

fn ui_config(supported: &[OverTimeComparisonType]) -> UiConfig {
    let mut ui_config = UiConfig {
        supported_over_time_comparison_types: supported.to_vec(),
        ..UiConfig::default()
    };
    for name in [BucketName::MEASURES, BucketName::SECONDARY_MEASURES] {
        ui_config
            .buckets
            .insert(name, bucket_config(&[ItemType::Metric]));
    }
    for name in [BucketName::ATTRIBUTE, BucketName::VIEW, BucketName::STACK] {
        ui_config
            .buckets
            .insert(name, bucket_config(&[ItemType::Attribute, ItemType::Date]));
    }
    ui_config
}

fn over_time_reference_point(filters: FilterBucket) -> ExtendedReferencePoint {
    ExtendedReferencePoint {
        buckets: vec![
            Bucket::new(
                BucketName::MEASURES,
                vec![
                    m1(),
                    m2(),
                    m1_pop(),
                    m2_pop(),
                    am("am1", &["m1", "m2"]),
                    am("am2", &["m2", "m1"]),
                    am("am3", &["m1_pop", "m1"]),
                ],
            ),
            Bucket::new(
                BucketName::SECONDARY_MEASURES,
                vec![m3(), m4(), m3_pop(), m4_pop(), am("am4", &["m3_pop", "m4_pop"])],
            ),
            Bucket::new(BucketName::ATTRIBUTE, vec![date("d1", "/ds/1")]),
        ],
        filters,
        properties: None,
        ui_config: ui_config(&[SPPY, PP]),
    }
}

fn bucket_ids(reference_point: &ExtendedReferencePoint) -> Vec<Vec<&str>> {
    reference_point
        .buckets
        .iter()
        .map(|b| ids(&b.items))
        .collect()
}

const ALL_KEPT: [&[&str]; 3] = [
    &["m1", "m2", "m1_pop", "m2_pop", "am1", "am2", "am3"],
    &["m3", "m4", "m3_pop", "m4_pop", "am4"],
    &["d1"],
];

const MASTERS_ONLY: [&[&str]; 3] = [&["m1", "m2", "am1", "am2"], &["m3", "m4"], &["d1"]];

#[test]
fn applied_and_supported_comparison_keeps_everything() {
    let rp = over_time_reference_point(date_filter(Some(SPPY), Some("/ds/1")));
    assert_eq!(bucket_ids(&configure_over_time_comparison(&rp, false)), ALL_KEPT);

    let mut only_sppy = rp.clone();
    only_sppy.ui_config.supported_over_time_comparison_types = vec![SPPY];
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&only_sppy, false)),
        ALL_KEPT
    );
}

#[test]
fn filter_without_comparison_removes_derived_measures() {
    let rp = over_time_reference_point(date_filter(
        Some(OverTimeComparisonType::Nothing),
        Some("/ds/1"),
    ));
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&rp, false)),
        MASTERS_ONLY
    );

    let rp = over_time_reference_point(date_filter(None, Some("/ds/1")));
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&rp, false)),
        MASTERS_ONLY
    );
}

#[test]
fn visualization_without_comparison_support_removes_derived_measures() {
    let mut rp = over_time_reference_point(date_filter(Some(SPPY), Some("/ds/1")));
    rp.ui_config.supported_over_time_comparison_types = vec![];
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&rp, false)),
        MASTERS_ONLY
    );

    rp.ui_config.supported_over_time_comparison_types = vec![OverTimeComparisonType::Nothing];
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&rp, false)),
        MASTERS_ONLY
    );
}

#[test]
fn missing_date_filter_removes_derived_measures() {
    let rp = over_time_reference_point(FilterBucket::default());
    assert_eq!(
        bucket_ids(&configure_over_time_comparison(&rp, false)),
        MASTERS_ONLY
    );
}

#[test]
fn date_filter_on_another_dataset_removes_only_derived_measures() {
    let rp = over_time_reference_point(date_filter(Some(SPPY), Some("/ds/other")));
    let before = rp.clone();
    let configured = configure_over_time_comparison(&rp, false);
    assert_eq!(rp, before);
    assert_eq!(
        bucket_ids(&configured),
        [
            vec!["m1", "m2", "am1", "am2", "am3"],
            vec!["m3", "m4", "am4"],
            vec!["d1"]
        ]
    );
}

#[test]
fn stacking_disallows_comparison() {
    let mut rp = over_time_reference_point(date_filter(Some(SPPY), Some("/ds/1")));
    rp.buckets[2] = Bucket::new(BucketName::STACK, vec![attribute("a1")]);
    let configured = configure_over_time_comparison(&rp, false);
    assert_eq!(
        bucket_ids(&configured),
        [vec!["m1", "m2", "am1", "am2"], vec!["m3", "m4"], vec!["a1"]]
    );
}

#[test]
fn week_granularity_needs_week_filters() {
    let mut rp = over_time_reference_point(date_filter(Some(SPPY), Some("/ds/1")));
    rp.buckets[2] = Bucket::new(
        BucketName::VIEW,
        vec![date("w1", "/ds/1").with_granularity(WEEK_GRANULARITY)],
    );
    let disabled = configure_over_time_comparison(&rp, false);
    assert_eq!(
        bucket_ids(&disabled),
        [vec!["m1", "m2", "am1", "am2"], vec!["m3", "m4"], vec!["w1"]]
    );

    let enabled = configure_over_time_comparison(&rp, true);
    assert_eq!(enabled.buckets, rp.buckets);
}

fn percent_reference_point(measures: Vec<BucketItem>) -> ExtendedReferencePoint {
    ExtendedReferencePoint {
        buckets: vec![
            Bucket::new(BucketName::MEASURES, measures),
            Bucket::new(BucketName::ATTRIBUTE, vec![date("d1", "/ds/1")]),
        ],
        filters: FilterBucket::default(),
        properties: None,
        ui_config: ui_config(&[]),
    }
}

#[test]
fn percent_is_cleared_when_rules_fail() {
    let rp = percent_reference_point(vec![
        m1().with_show_in_percent(Some(true)),
        m2().with_show_in_percent(Some(true)),
    ]);
    let configured = configure_percent(&rp, false);
    assert!(configured.buckets[0]
        .items
        .iter()
        .all(|i| i.show_in_percent().is_none()));
    assert_eq!(configured.ui_config, rp.ui_config);
    assert_eq!(rp.buckets[0].items[0].show_in_percent(), Some(true));
}

#[test]
fn percent_is_enabled_for_a_single_master() {
    let rp = percent_reference_point(vec![m1().with_show_in_percent(Some(true)), m1_pop()]);
    let configured = configure_percent(&rp, false);

    let mut expected = rp.ui_config.clone();
    if let Some(measures) = expected.buckets.get_mut(&BucketName::MEASURES) {
        measures.is_show_in_percent_enabled = true;
    }
    assert_eq!(configured.ui_config, expected);
    assert_eq!(configured.buckets[0].items[0].show_in_percent(), Some(true));
}

#[test]
fn percent_can_be_disabled_outright() {
    let mut rp = percent_reference_point(vec![m1().with_show_in_percent(Some(true))]);
    if let Some(measures) = rp.ui_config.buckets.get_mut(&BucketName::MEASURES) {
        measures.is_show_in_percent_enabled = true;
    }
    let configured = configure_percent(&rp, true);
    assert_eq!(configured.buckets[0].items[0].show_in_percent(), None);
    assert_eq!(
        configured
            .ui_config
            .bucket(&BucketName::MEASURES)
            .map(|b| b.is_show_in_percent_enabled),
        Some(false)
    );
}
