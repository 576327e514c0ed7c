// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared bucket fixtures for unit tests.

extern crate alloc;

use alloc::vec::Vec;

use plugviz_model::{
    BucketItem, DATE_DATASET_ATTRIBUTE, DateFilter, FilterBucket, FiltersBucketItem, ObjRef,
    OverTimeComparisonType,
};

pub(crate) const SPPY: OverTimeComparisonType = OverTimeComparisonType::SamePeriodPreviousYear;
pub(crate) const PP: OverTimeComparisonType = OverTimeComparisonType::PreviousPeriod;

pub(crate) fn m1() -> BucketItem {
    BucketItem::metric("m1")
}

pub(crate) fn m2() -> BucketItem {
    BucketItem::metric("m2")
}

pub(crate) fn m3() -> BucketItem {
    BucketItem::metric("m3").with_show_on_secondary_axis(Some(true))
}

pub(crate) fn m4() -> BucketItem {
    BucketItem::metric("m4").with_show_on_secondary_axis(Some(true))
}

pub(crate) fn m1_pop() -> BucketItem {
    BucketItem::derived("m1_pop", "m1", SPPY)
}

pub(crate) fn m2_pop() -> BucketItem {
    BucketItem::derived("m2_pop", "m2", PP)
}

pub(crate) fn m3_pop() -> BucketItem {
    BucketItem::derived("m3_pop", "m3", SPPY)
}

pub(crate) fn m4_pop() -> BucketItem {
    BucketItem::derived("m4_pop", "m4", PP)
}

pub(crate) fn am(id: &str, operands: &[&str]) -> BucketItem {
    let operands: Vec<Option<&str>> = operands.iter().map(|o| Some(*o)).collect();
    BucketItem::arithmetic(id, &operands, "sum")
}

pub(crate) fn attribute(id: &str) -> BucketItem {
    BucketItem::attribute(id, &alloc::format!("attr.{id}"))
}

pub(crate) fn date(id: &str, dataset: &str) -> BucketItem {
    BucketItem::date(id, "attr.date", ObjRef::uri(dataset))
}

pub(crate) fn date_filter(
    comparison: Option<OverTimeComparisonType>,
    dataset: Option<&str>,
) -> FilterBucket {
    let mut item = FiltersBucketItem::new(
        "date_filter",
        DateFilter {
            attribute: DATE_DATASET_ATTRIBUTE.into(),
            over_time_comparison_type: comparison,
            interval: None,
        },
    );
    item.date_dataset_ref = dataset.map(ObjRef::uri);
    FilterBucket::new(alloc::vec![item])
}

pub(crate) fn ids(items: &[BucketItem]) -> Vec<&str> {
    items.iter().map(|i| i.local_identifier.as_str()).collect()
}
