// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error reported to callers of a pluggable visualization.

extern crate alloc;

use alloc::string::String;

use plugviz_model::{BucketName, VisualizationType};

/// A precondition a visualization could not satisfy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VisualizationError {
    /// The insight has no measure but the chart type needs one.
    #[error("{visualization} requires at least one measure")]
    NoMeasures {
        /// The chart type that rejected the insight.
        visualization: VisualizationType,
    },
    /// The insight leaves a bucket empty that the chart type cannot render without.
    #[error("{visualization} requires an item in the `{bucket}` bucket")]
    EmptyBucket {
        /// The chart type that rejected the insight.
        visualization: VisualizationType,
        /// The bucket left empty.
        bucket: BucketName,
    },
    /// The catalog has no chart type of this name.
    #[error("unknown visualization type `{0}`")]
    UnknownVisualization(String),
    /// The visualization was used after [`unmount`](crate::PluggableVisualization::unmount).
    #[error("visualization is unmounted")]
    Unmounted,
}
