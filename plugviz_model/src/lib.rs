// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model for pluggable visualizations.
//!
//! This crate provides:
//! - bucket items as a tagged union of measures (simple, derived, arithmetic) and attributes,
//! - named buckets and the filter bucket with its structurally classified filters,
//! - sort items, per-bucket UI capability descriptors, and
//! - the reference point / extended reference point pair that flows through the pipeline.
//!
//! Every type serializes to the camelCase JSON shape used by the editor UI.

#![no_std]

extern crate alloc;

mod bucket;
mod filter;
mod item;
mod names;
mod reference_point;
mod sort;
mod ui_config;

pub use bucket::{Bucket, Total};
pub use filter::{
    AttributeFilter, BucketFilter, DATE_DATASET_ATTRIBUTE, DateFilter, DateInterval, FilterBucket,
    FiltersBucketItem, MeasureValueFilter, ObjRef, RankingFilter,
};
pub use item::{
    AttributeItem, BucketItem, ItemKind, ItemType, MeasureItem, MeasureKind,
    OverTimeComparisonType,
};
pub use names::{BucketName, VisualizationType};
pub use reference_point::{ExtendedReferencePoint, ReferencePoint, VisualizationProperties};
pub use sort::{AttributeSortItem, Locator, MeasureSortItem, SortAggregation, SortDirection, SortItem};
pub use ui_config::{
    BucketUiConfig, ExportConfig, OpenAsReport, OptionalStacking, Recommendations, UiConfig,
};
