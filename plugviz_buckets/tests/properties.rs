// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests of the measure limiter and the filter sanitizer.

use plugviz_buckets::{limit_number_of_measures_in_buckets, sanitize_filters};
use plugviz_model::{
    AttributeFilter, Bucket, BucketFilter, BucketItem, BucketName, ExtendedReferencePoint,
    FilterBucket, FiltersBucketItem, MeasureValueFilter, OverTimeComparisonType, RankingFilter,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Shape {
    Master,
    Derived(usize),
    Arithmetic(Vec<Option<usize>>),
    Attribute,
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        3 => Just(Shape::Master),
        2 => (0..10_usize).prop_map(Shape::Derived),
        2 => prop::collection::vec(prop::option::of(0..10_usize), 1..3).prop_map(Shape::Arithmetic),
        1 => Just(Shape::Attribute),
    ]
}

fn item(index: usize, shape: Shape) -> BucketItem {
    let id = format!("m{index}");
    match shape {
        Shape::Master => BucketItem::metric(&id),
        Shape::Derived(master) => BucketItem::derived(
            &id,
            &format!("m{master}"),
            OverTimeComparisonType::PreviousPeriod,
        ),
        Shape::Arithmetic(operands) => {
            let operands: Vec<Option<String>> =
                operands.iter().map(|o| o.map(|i| format!("m{i}"))).collect();
            let operands: Vec<Option<&str>> = operands.iter().map(Option::as_deref).collect();
            BucketItem::arithmetic(&id, &operands, "sum")
        }
        Shape::Attribute => BucketItem::attribute(&format!("a{index}"), &format!("attr.{index}")),
    }
}

fn bucket_layouts() -> impl Strategy<Value = Vec<Bucket>> {
    prop::collection::vec((shape(), 0..3_usize), 0..10).prop_map(|placed| {
        let mut buckets: Vec<Bucket> = [
            BucketName::MEASURES,
            BucketName::SECONDARY_MEASURES,
            BucketName::VIEW,
        ]
        .into_iter()
        .map(|name| Bucket::new(name, Vec::new()))
        .collect();
        for (index, (shape, bucket)) in placed.into_iter().enumerate() {
            buckets[bucket].items.push(item(index, shape));
        }
        buckets
    })
}

fn dependencies(item: &BucketItem) -> Vec<&str> {
    item.master_local_identifier()
        .into_iter()
        .chain(item.operands().iter().flatten().map(String::as_str))
        .collect()
}

fn contains(buckets: &[Bucket], id: &str) -> bool {
    buckets
        .iter()
        .flat_map(|b| &b.items)
        .any(|i| i.local_identifier == id)
}

fn filter_entry(index: usize, kind: u8, target: usize, auto_created: Option<bool>) -> FiltersBucketItem {
    let id = format!("f{index}");
    let mut entry = match kind {
        0 => FiltersBucketItem::new(
            &id,
            AttributeFilter {
                attribute: format!("attr.{target}"),
                is_inverted: true,
                selected_elements: Vec::new(),
                total_elements_count: None,
            },
        ),
        1 => FiltersBucketItem::new(
            &id,
            MeasureValueFilter {
                measure_local_identifier: format!("m{target}"),
                condition: None,
            },
        ),
        2 => FiltersBucketItem::new(
            &id,
            RankingFilter {
                measure: format!("m{target}"),
                operator: "TOP".into(),
                value: 3.0,
                attributes: Some(vec![format!("a{target}")]),
            },
        ),
        _ => FiltersBucketItem::new(&id, BucketFilter::Unrecognized(serde_json::Value::Null)),
    };
    entry.auto_created = auto_created;
    entry
}

fn reference_points() -> impl Strategy<Value = ExtendedReferencePoint> {
    let filters = prop::collection::vec(
        (0..4_u8, 0..10_usize, prop::option::of(any::<bool>())),
        0..6,
    );
    (bucket_layouts(), filters).prop_map(|(buckets, filters)| ExtendedReferencePoint {
        buckets,
        filters: FilterBucket::new(
            filters
                .into_iter()
                .enumerate()
                .map(|(index, (kind, target, auto_created))| {
                    filter_entry(index, kind, target, auto_created)
                })
                .collect(),
        ),
        ..ExtendedReferencePoint::default()
    })
}

proptest! {
    #[test]
    fn limited_measures_keep_their_dependencies(buckets in bucket_layouts(), limit in 0..6_usize) {
        let limited = limit_number_of_measures_in_buckets(&buckets, limit, false);
        for item in limited.iter().flat_map(|b| &b.items) {
            for dependency in dependencies(item) {
                prop_assert!(
                    !contains(&buckets, dependency) || contains(&limited, dependency),
                    "{} kept without {}",
                    item.local_identifier,
                    dependency
                );
            }
        }
    }

    #[test]
    fn limited_measures_respect_the_master_budget(
        buckets in bucket_layouts(),
        limit in 0..6_usize,
        pairs in any::<bool>(),
    ) {
        let limited = limit_number_of_measures_in_buckets(&buckets, limit, pairs);
        let masters = limited
            .iter()
            .flat_map(|b| &b.items)
            .filter(|i| i.is_metric() && !i.is_derived())
            .count();
        prop_assert!(masters <= limit, "{masters} masters over limit {limit}");

        let attributes = |buckets: &[Bucket]| -> Vec<BucketItem> {
            buckets.iter().flat_map(|b| &b.items).filter(|i| !i.is_metric()).cloned().collect()
        };
        prop_assert_eq!(attributes(&limited), attributes(&buckets));
    }

    #[test]
    fn sanitizing_filters_is_idempotent(reference_point in reference_points()) {
        let once = sanitize_filters(&reference_point);
        let twice = sanitize_filters(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once.buckets, &reference_point.buckets);
    }
}
