// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature flags and limits shared by every visualization of a catalog.

use serde::{Deserialize, Serialize};

/// Settings that alter how reference points are normalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Whether week granularity may be combined with over-time comparison.
    pub enable_week_filters: bool,
    /// Measure cap of buckets that do not declare a tighter one.
    pub max_metrics_count: usize,
    /// Row attribute cap of tables.
    pub max_table_categories_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_week_filters: false,
            max_metrics_count: 40,
            max_table_categories_count: 20,
        }
    }
}
