// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pluggable visualization interface.

use core::fmt::Debug;

use plugviz_model::{ExtendedReferencePoint, ReferencePoint, VisualizationType};
use tracing::debug;

use crate::builder::{build_execution, build_extended_reference_point};
use crate::descriptor::ChartDescriptor;
use crate::error::VisualizationError;
use crate::execution::{ExecutionDefinition, ExecutionFactory};
use crate::settings::Settings;

/// A chart type as seen by an editor: it normalizes reference points and describes
/// executions.
pub trait PluggableVisualization: Debug {
    /// The chart type.
    fn visualization_type(&self) -> VisualizationType;

    /// Normalizes `reference_point` for this chart type, leaving it untouched.
    fn get_extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> Result<ExtendedReferencePoint, VisualizationError>;

    /// Describes the execution that renders `insight`.
    fn build_execution(
        &self,
        insight: &ReferencePoint,
        factory: &dyn ExecutionFactory,
    ) -> Result<ExecutionDefinition, VisualizationError>;

    /// Releases the visualization; later calls fail with [`VisualizationError::Unmounted`].
    fn unmount(&mut self);
}

/// A visualization driven by a [`ChartDescriptor`].
#[derive(Clone, Debug)]
pub struct ChartVisualization {
    descriptor: ChartDescriptor,
    settings: Settings,
    mounted: bool,
}

impl ChartVisualization {
    /// A mounted visualization of the described chart type.
    pub fn new(descriptor: ChartDescriptor, settings: Settings) -> Self {
        Self {
            descriptor,
            settings,
            mounted: true,
        }
    }

    /// The descriptor driving this visualization.
    pub fn descriptor(&self) -> &ChartDescriptor {
        &self.descriptor
    }

    fn ensure_mounted(&self) -> Result<(), VisualizationError> {
        if self.mounted {
            Ok(())
        } else {
            Err(VisualizationError::Unmounted)
        }
    }
}

impl PluggableVisualization for ChartVisualization {
    fn visualization_type(&self) -> VisualizationType {
        self.descriptor.chart_type
    }

    fn get_extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> Result<ExtendedReferencePoint, VisualizationError> {
        self.ensure_mounted()?;
        Ok(build_extended_reference_point(
            &self.descriptor,
            &self.settings,
            reference_point,
        ))
    }

    fn build_execution(
        &self,
        insight: &ReferencePoint,
        factory: &dyn ExecutionFactory,
    ) -> Result<ExecutionDefinition, VisualizationError> {
        self.ensure_mounted()?;
        build_execution(&self.descriptor, insight, factory)
    }

    fn unmount(&mut self) {
        debug!(chart_type = %self.descriptor.chart_type, "unmounted");
        self.mounted = false;
    }
}
