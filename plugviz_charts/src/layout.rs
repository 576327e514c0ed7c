// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket placement for the descriptor-driven layouts.
//!
//! Every function here reads the incoming buckets, whatever chart they were arranged for,
//! and returns the buckets of the target chart. Item limits come from the UI config the
//! builder already attached.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use plugviz_buckets::{
    get_all_attribute_items_with_preference, get_all_items_by_type,
    get_all_measures_show_on_secondary_axis, get_attribute_from_items, get_attribute_items,
    get_attribute_to_items, get_bucket_items_by_type, get_filtered_measures_for_stacked_charts,
    get_measure_items, get_stack_items, has_bucket,
    limit_number_of_measure_items_in_buckets, limit_number_of_measures_in_buckets,
    remove_measures_with_missing_dependencies, remove_show_on_secondary_axis,
    transform_measure_buckets, MeasureBucketLimit,
};
use plugviz_model::{
    Bucket, BucketItem, BucketName, ExtendedReferencePoint, ItemType, UiConfig, VisualizationType,
};

use crate::ui_defaults::PIE_ONLY_MAX_METRICS_COUNT;

const STACK_PREFERENCE: &[BucketName] = &[
    BucketName::LOCATION,
    BucketName::VIEW,
    BucketName::TREND,
    BucketName::STACK,
    BucketName::SEGMENT,
];

const SEGMENT_PREFERENCE: &[BucketName] = &[
    BucketName::SEGMENT,
    BucketName::STACK,
    BucketName::VIEW,
    BucketName::TREND,
];

const AREA_PREFERENCE: &[BucketName] = &[BucketName::AREA, BucketName::LOCATION];

const AREA_COLOR_PREFERENCE: &[BucketName] =
    &[BucketName::COLOR, BucketName::SIZE, BucketName::MEASURES];

/// Geo area charts color their areas by a single measure.
const AREA_MEASURES_LIMIT: usize = 1;

pub(crate) fn owned<'a>(items: impl IntoIterator<Item = &'a BucketItem>) -> Vec<BucketItem> {
    items.into_iter().cloned().collect()
}

pub(crate) fn masters_count(items: &[BucketItem]) -> usize {
    items.iter().filter(|i| !i.is_derived()).count()
}

/// A master measure that depends on no other measure.
fn is_plain_master(item: &BucketItem) -> bool {
    !item.is_derived() && !item.is_arithmetic()
}

pub(crate) fn items_limit(reference_point: &ExtendedReferencePoint, name: &BucketName) -> usize {
    reference_point.ui_config.items_limit(name).unwrap_or(1)
}

fn set_items_limit(ui_config: &mut UiConfig, name: &BucketName, items_limit: usize) {
    if let Some(bucket) = ui_config.buckets.get_mut(name) {
        bucket.items_limit = items_limit;
    }
}

/// Keeps at most `limit` master measures, together with whatever they depend on.
pub(crate) fn cap_measures(items: Vec<BucketItem>, limit: usize) -> Vec<BucketItem> {
    if masters_count(&items) <= limit {
        return items;
    }
    limit_number_of_measures_in_buckets(&[Bucket::new(BucketName::MEASURES, items)], limit, true)
        .into_iter()
        .next()
        .map(|b| b.items)
        .unwrap_or_default()
}

fn with_buckets(reference_point: &ExtendedReferencePoint, buckets: Vec<Bucket>) -> ExtendedReferencePoint {
    ExtendedReferencePoint {
        buckets,
        ..reference_point.clone()
    }
}

fn stack_items(buckets: &[Bucket], stack_types: &[ItemType], view_limit: usize) -> Vec<BucketItem> {
    let masters = get_measure_items(buckets)
        .into_iter()
        .filter(|m| !m.is_derived())
        .count();
    let attributes = get_all_attribute_items_with_preference(buckets, STACK_PREFERENCE);
    if masters <= 1 && attributes.len() > view_limit {
        return owned(
            attributes
                .into_iter()
                .skip(view_limit)
                .filter(|a| !a.is_date())
                .take(1),
        );
    }
    owned(get_stack_items(buckets, stack_types).into_iter().take(1))
}

/// Measures, categories and a stack.
///
/// A single master measure lets an attribute that overflows the categories become the
/// stack; a stack in turn limits the measures to one master.
pub(crate) fn stacked(
    reference_point: &ExtendedReferencePoint,
    view: &BucketName,
    stack: &BucketName,
    stack_types: &[ItemType],
) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let view_limit = items_limit(reference_point, view);
    let stack_items = stack_items(buckets, stack_types, view_limit);
    let view_items = owned(
        get_attribute_items(buckets)
            .into_iter()
            .filter(|a| !stack_items.iter().any(|s| s.local_identifier == a.local_identifier))
            .take(view_limit),
    );
    let measures = cap_measures(
        get_filtered_measures_for_stacked_charts(buckets),
        items_limit(reference_point, &BucketName::MEASURES),
    );
    let measures = if stack_items.is_empty() {
        measures
    } else {
        cap_measures(measures, 1)
    };

    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::MEASURES, measures),
            Bucket::new(view.clone(), view_items),
            Bucket::new(stack.clone(), stack_items),
        ],
    )
}

/// One measure per category, or several measures without categories.
pub(crate) fn round(
    reference_point: &ExtendedReferencePoint,
    chart_type: VisualizationType,
) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let measures = owned(get_measure_items(buckets));
    let categories = get_attribute_items(buckets);
    let mut configured = reference_point.clone();

    let (measures, view) = if categories.is_empty() {
        let ui_config = &mut configured.ui_config;
        set_items_limit(ui_config, &BucketName::MEASURES, PIE_ONLY_MAX_METRICS_COUNT);
        if masters_count(&measures) > 1 {
            set_items_limit(ui_config, &BucketName::VIEW, 0);
            if chart_type == VisualizationType::Waterfall
                && let Some(bucket) = ui_config.buckets.get_mut(&BucketName::MEASURES)
            {
                bucket.is_total_measure_enabled = true;
            }
        }
        (cap_measures(measures, PIE_ONLY_MAX_METRICS_COUNT), Vec::new())
    } else {
        (cap_measures(measures, 1), owned(categories.into_iter().take(1)))
    };

    configured.buckets = vec![
        Bucket::new(BucketName::MEASURES, measures),
        Bucket::new(BucketName::VIEW, view),
    ];
    configured
}

/// Fixed measure slots, borrowing overflow between them, plus categories.
///
/// Every slot item counts, derived measures included. The measures are therefore limited to
/// the total slot capacity, each with its dependencies, before they are placed.
pub(crate) fn measure_slots(
    reference_point: &ExtendedReferencePoint,
    slots: &[BucketName],
    categories: &BucketName,
) -> ExtendedReferencePoint {
    let limits: Vec<MeasureBucketLimit> = slots
        .iter()
        .map(|slot| MeasureBucketLimit::new(slot.clone(), items_limit(reference_point, slot)))
        .collect();
    let capacity = limits.iter().map(|limit| limit.items_limit).sum();
    let fitted =
        limit_number_of_measure_items_in_buckets(&reference_point.buckets, capacity, true);
    // Measures outside the slot sources are never placed, so their dependents go too.
    let mut buckets =
        remove_measures_with_missing_dependencies(&transform_measure_buckets(&limits, &fitted));
    let category_items = get_attribute_items(&reference_point.buckets)
        .into_iter()
        .take(items_limit(reference_point, categories));
    buckets.push(Bucket::new(categories.clone(), owned(category_items)));
    with_buckets(reference_point, buckets)
}

/// Primary and secondary axis measures.
///
/// Without a secondary bucket, measures flagged for the secondary axis move there. The flag
/// itself is dropped since the bucket now carries that meaning.
pub(crate) fn combo(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let (primary, secondary): (Vec<BucketItem>, Vec<BucketItem>) =
        if has_bucket(buckets, &BucketName::SECONDARY_MEASURES) {
            let measures = |name: &BucketName| {
                owned(get_bucket_items_by_type(buckets, name, ItemType::METRICS))
            };
            (
                measures(&BucketName::MEASURES),
                measures(&BucketName::SECONDARY_MEASURES),
            )
        } else {
            let on_secondary = get_all_measures_show_on_secondary_axis(buckets);
            get_measure_items(buckets)
                .into_iter()
                .cloned()
                .partition(|m| !on_secondary.contains(&m))
        };
    let view = get_attribute_items(buckets)
        .into_iter()
        .take(items_limit(reference_point, &BucketName::VIEW));

    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::MEASURES, remove_show_on_secondary_axis(&primary)),
            Bucket::new(
                BucketName::SECONDARY_MEASURES,
                remove_show_on_secondary_axis(&secondary),
            ),
            Bucket::new(BucketName::VIEW, owned(view)),
        ],
    )
}

fn first_master(buckets: &[Bucket]) -> Vec<BucketItem> {
    owned(
        get_measure_items(buckets)
            .into_iter()
            .filter(|m| is_plain_master(m))
            .take(1),
    )
}

/// The first master measure over the first date.
pub(crate) fn xirr(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let date = get_all_items_by_type(buckets, &[ItemType::Date])
        .into_iter()
        .take(1);
    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::MEASURES, first_master(buckets)),
            Bucket::new(BucketName::ATTRIBUTE, owned(date)),
        ],
    )
}

/// Geo location, size and color measures, and a segment.
pub(crate) fn pushpin(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let location = get_all_items_by_type(buckets, &[ItemType::GeoAttribute])
        .into_iter()
        .take(1);
    let (size, color) = if has_bucket(buckets, &BucketName::SIZE)
        || has_bucket(buckets, &BucketName::COLOR)
    {
        let first = |name: &BucketName| {
            owned(
                get_bucket_items_by_type(buckets, name, ItemType::METRICS)
                    .into_iter()
                    .take(1),
            )
        };
        (first(&BucketName::SIZE), first(&BucketName::COLOR))
    } else {
        let masters: Vec<&BucketItem> = get_measure_items(buckets)
            .into_iter()
            .filter(|m| is_plain_master(m))
            .collect();
        (
            owned(masters.first().copied()),
            owned(masters.get(1).copied()),
        )
    };
    let segment = get_all_attribute_items_with_preference(buckets, SEGMENT_PREFERENCE)
        .into_iter()
        .take(1);

    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::LOCATION, owned(location)),
            Bucket::new(BucketName::SIZE, size),
            Bucket::new(BucketName::COLOR, color),
            Bucket::new(BucketName::SEGMENT, owned(segment)),
        ],
    )
}

/// A geo area colored by one measure, and a segment.
///
/// Only plain master measures can color an area. The measure comes from the first of
/// `color`, `size` and `measures` holding one, or else from any bucket.
pub(crate) fn geo_area(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let area = AREA_PREFERENCE
        .iter()
        .flat_map(|name| get_bucket_items_by_type(buckets, name, &[ItemType::GeoAttribute]))
        .chain(get_all_items_by_type(buckets, &[ItemType::GeoAttribute]))
        .take(1);

    let plain = |items: Vec<&BucketItem>| owned(items.into_iter().filter(|m| is_plain_master(m)));
    let candidates = AREA_COLOR_PREFERENCE
        .iter()
        .map(|name| plain(get_bucket_items_by_type(buckets, name, ItemType::METRICS)))
        .find(|items| !items.is_empty())
        .unwrap_or_else(|| plain(get_all_items_by_type(buckets, ItemType::METRICS)));
    let color = cap_measures(candidates, AREA_MEASURES_LIMIT);

    let segment = get_all_attribute_items_with_preference(buckets, SEGMENT_PREFERENCE)
        .into_iter()
        .take(1);

    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::AREA, owned(area)),
            Bucket::new(BucketName::COLOR, color),
            Bucket::new(BucketName::SEGMENT, owned(segment)),
        ],
    )
}

/// One measure flowing from one attribute to another.
///
/// Charts without flow buckets contribute their first two attributes.
pub(crate) fn flow(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let mut from = get_attribute_from_items(buckets);
    let mut to = get_attribute_to_items(buckets);
    if from.is_empty() && to.is_empty() {
        let attributes = get_attribute_items(buckets);
        from = attributes.iter().take(1).copied().collect();
        to = attributes.iter().skip(1).take(1).copied().collect();
    }
    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::MEASURES, first_master(buckets)),
            Bucket::new(BucketName::ATTRIBUTE_FROM, owned(from.into_iter().take(1))),
            Bucket::new(BucketName::ATTRIBUTE_TO, owned(to.into_iter().take(1))),
        ],
    )
}

/// A row attribute with its columns.
///
/// Without a columns bucket, the measures become the columns.
pub(crate) fn repeater(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let buckets = &reference_point.buckets;
    let row = get_bucket_items_by_type(buckets, &BucketName::ATTRIBUTE, &[ItemType::Attribute])
        .into_iter()
        .next()
        .or_else(|| {
            get_attribute_items(buckets)
                .into_iter()
                .find(|a| !a.is_date())
        });
    let columns = if has_bucket(buckets, &BucketName::COLUMNS) {
        owned(get_bucket_items_by_type(
            buckets,
            &BucketName::COLUMNS,
            &[ItemType::Attribute, ItemType::Metric, ItemType::Fact],
        ))
    } else {
        owned(get_measure_items(buckets))
    };

    with_buckets(
        reference_point,
        vec![
            Bucket::new(BucketName::ATTRIBUTE, owned(row)),
            Bucket::new(BucketName::COLUMNS, columns),
        ],
    )
}
