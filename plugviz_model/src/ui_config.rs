// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-bucket capability descriptors consumed by configuration panels.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::item::{ItemType, OverTimeComparisonType};
use crate::names::{BucketName, VisualizationType};

/// What one bucket accepts and how it behaves in the editor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketUiConfig {
    /// Accepted item types.
    pub accepts: Vec<ItemType>,
    /// Maximum number of master items.
    pub items_limit: usize,
    /// Per-type limits on top of `items_limit`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub items_limit_by_type: BTreeMap<ItemType, usize>,
    /// The same item may be placed twice.
    pub allows_duplicate_items: bool,
    /// Items can be reordered within the bucket.
    pub allows_reordering: bool,
    /// Items can be swapped with another bucket.
    pub allows_swapping: bool,
    /// The bucket is shown at all.
    pub enabled: bool,
    /// New items can still be dropped in.
    pub can_add_items: bool,
    /// Percent-of-total toggle is active.
    pub is_show_in_percent_enabled: bool,
    /// Percent-of-total toggle is shown.
    pub is_show_in_percent_visible: bool,
    /// Secondary-axis toggle is shown.
    pub is_show_on_secondary_axis_visible: bool,
    /// Total-measure toggle is shown (waterfall).
    pub is_total_measure_visible: bool,
    /// Total-measure toggle is active (waterfall).
    pub is_total_measure_enabled: bool,
    /// The same date may appear more than once.
    pub allows_duplicate_dates: bool,
    /// Localization id of the bucket title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Localization id of the bucket subtitle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Icon id of the bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Feature recommendations shown to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendations {
    /// Recommend an over-time comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<bool>,
    /// Recommend trending by date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,
    /// Recommend showing in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<bool>,
    /// Recommend a previous-period comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<bool>,
}

/// Whether the insight can be opened as a report.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAsReport {
    /// Supported flag.
    pub supported: bool,
}

/// Whether the insight can be exported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Supported flag.
    pub supported: bool,
}

/// Optional stacking toggles of column, bar and area charts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalStacking {
    /// Stacking can be toggled.
    pub supported: bool,
    /// Default for stacking measures.
    pub stack_measures: bool,
    /// Stacking measures to 100% is possible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_measures_to_percent: Option<bool>,
    /// Stacking is currently disabled by the bucket shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// UI capability descriptors of one visualization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    /// Per-bucket descriptors.
    pub buckets: BTreeMap<BucketName, BucketUiConfig>,
    /// Recommendations, column charts only.
    pub recommendations: Recommendations,
    /// Comparison kinds this visualization can show.
    pub supported_over_time_comparison_types: Vec<OverTimeComparisonType>,
    /// Open-as-report support.
    pub open_as_report: OpenAsReport,
    /// Export support.
    pub export_config: ExportConfig,
    /// Optional stacking, when the chart supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_stacking: Option<OptionalStacking>,
    /// Series chart types a combo chart can mix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_chart_types: Option<Vec<VisualizationType>>,
    /// The visualization works without any measure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_metric_accepted: Option<bool>,
    /// Location icon support (geo charts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_location_icon: Option<bool>,
}

impl UiConfig {
    /// Descriptor of the named bucket.
    pub fn bucket(&self, name: &BucketName) -> Option<&BucketUiConfig> {
        self.buckets.get(name)
    }

    /// Items limit of the named bucket, if configured.
    pub fn items_limit(&self, name: &BucketName) -> Option<usize> {
        self.bucket(name).map(|b| b.items_limit)
    }
}
