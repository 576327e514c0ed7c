// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable visualizations on top of `plugviz_buckets`.
//!
//! This crate is the per-chart layer of the pipeline:
//! - **Descriptors** state which bucket layout, property controls and optional stages a
//!   chart type uses.
//! - **Builders** turn any reference point into the extended reference point of a chart,
//!   with its buckets, UI config, recommendations, sorts and filters normalized.
//! - **Executions** describe how the chart queries its data, including result dimensions.
//!
//! A [`VisualizationCatalog`] hands out a [`PluggableVisualization`] per chart type name.
//! Rendering itself is out of scope.

#![no_std]

extern crate alloc;

mod builder;
mod catalog;
mod descriptor;
mod dimensions;
mod error;
mod execution;
mod headline;
mod layout;
mod settings;
mod table;
mod ui_defaults;
mod visualization;

#[cfg(test)]
mod builder_tests;

pub use builder::{
    build_execution, build_extended_reference_point, can_sort_stack_total, check_before_render,
};
pub use catalog::VisualizationCatalog;
pub use descriptor::{BucketLayout, ChartDescriptor};
pub use dimensions::{
    Dimension, MEASURE_GROUP, generate_dimensions, generate_dimensions_by_name,
    generate_stacked_dimensions, is_stacked_chart,
};
pub use error::VisualizationError;
pub use execution::{DefaultExecutionFactory, ExecutionDefinition, ExecutionFactory};
pub use settings::Settings;
pub use ui_defaults::{PIE_ONLY_MAX_METRICS_COUNT, default_ui_config};
pub use visualization::{ChartVisualization, PluggableVisualization};
