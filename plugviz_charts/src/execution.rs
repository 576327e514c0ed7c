// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Execution shaping.
//!
//! Visualizations never run an execution themselves. They ask an [`ExecutionFactory`] for a
//! definition covering the insight's buckets and filters, then describe its shape with
//! dimensions and sorts. Whoever owns the backend runs the resulting definition.

extern crate alloc;

use alloc::vec::Vec;

use plugviz_model::{Bucket, FilterBucket, SortItem};
use serde::{Deserialize, Serialize};

use crate::dimensions::Dimension;

/// The shape of one backend execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDefinition {
    /// Buckets whose items are computed.
    pub buckets: Vec<Bucket>,
    /// Filters applied to the computation.
    #[serde(default)]
    pub filters: FilterBucket,
    /// How the result is sliced.
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    /// How the result is ordered.
    #[serde(default)]
    pub sort_by: Vec<SortItem>,
}

impl ExecutionDefinition {
    /// Replaces the dimensions.
    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    /// Replaces the sorts.
    pub fn with_sorting(mut self, sort_by: impl IntoIterator<Item = SortItem>) -> Self {
        self.sort_by = sort_by.into_iter().collect();
        self
    }
}

/// Creates execution definitions for an insight.
pub trait ExecutionFactory {
    /// A definition computing `buckets` under `filters`, without dimensions or sorts.
    fn for_buckets(&self, buckets: &[Bucket], filters: &FilterBucket) -> ExecutionDefinition;
}

/// Factory that records the insight as-is.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultExecutionFactory;

impl ExecutionFactory for DefaultExecutionFactory {
    fn for_buckets(&self, buckets: &[Bucket], filters: &FilterBucket) -> ExecutionDefinition {
        ExecutionDefinition {
            buckets: buckets.to_vec(),
            filters: filters.clone(),
            ..ExecutionDefinition::default()
        }
    }
}
