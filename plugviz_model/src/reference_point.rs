// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference points: the bucket arrangement that flows through the pipeline.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bucket::Bucket;
use crate::filter::FilterBucket;
use crate::names::BucketName;
use crate::sort::SortItem;
use crate::ui_config::UiConfig;

/// Persisted display properties of a visualization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationProperties {
    /// Sort items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_items: Option<Vec<SortItem>>,
    /// Chart controls keyed by property name, opaque to the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Map<String, Value>>,
}

/// The bucket arrangement supplied by the editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePoint {
    /// Buckets in editor order.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    /// Filter bucket; absent means no filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterBucket>,
    /// Display properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VisualizationProperties>,
}

impl ReferencePoint {
    /// A reference point with the given buckets and filters.
    pub fn new(buckets: Vec<Bucket>, filters: FilterBucket) -> Self {
        Self {
            buckets,
            filters: Some(filters),
            properties: None,
        }
    }

    /// Sets the properties.
    pub fn with_properties(mut self, properties: VisualizationProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// A reference point augmented with UI capability descriptors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedReferencePoint {
    /// Buckets in canonical order for the visualization.
    pub buckets: Vec<Bucket>,
    /// Filter bucket, always present.
    #[serde(default)]
    pub filters: FilterBucket,
    /// Display properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VisualizationProperties>,
    /// UI capability descriptors.
    #[serde(default)]
    pub ui_config: UiConfig,
}

impl ExtendedReferencePoint {
    /// Extends a reference point with `ui_config`, normalizing an absent filter bucket.
    pub fn from_reference_point(reference_point: &ReferencePoint, ui_config: UiConfig) -> Self {
        Self {
            buckets: reference_point.buckets.clone(),
            filters: reference_point.filters.clone().unwrap_or_default(),
            properties: reference_point.properties.clone(),
            ui_config,
        }
    }

    /// Returns the named bucket, if present.
    pub fn bucket(&self, name: &BucketName) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.local_identifier == *name)
    }
}
