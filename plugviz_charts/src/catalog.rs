// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registry of chart types.

extern crate alloc;

use alloc::boxed::Box;

use hashbrown::HashMap;
use plugviz_model::VisualizationType;

use crate::descriptor::ChartDescriptor;
use crate::error::VisualizationError;
use crate::settings::Settings;
use crate::visualization::{ChartVisualization, PluggableVisualization};

/// Every known chart type, looked up by wire name.
///
/// A catalog is built once and passed to whatever needs chart lookups. Visualizations it
/// hands out share its [`Settings`].
#[derive(Clone, Debug)]
pub struct VisualizationCatalog {
    settings: Settings,
    descriptors: HashMap<&'static str, ChartDescriptor>,
}

impl VisualizationCatalog {
    /// Registers every chart type.
    pub fn new(settings: Settings) -> Self {
        let descriptors = VisualizationType::ALL
            .into_iter()
            .map(|t| (t.as_str(), ChartDescriptor::for_type(t)))
            .collect();
        Self {
            settings,
            descriptors,
        }
    }

    /// Settings handed to every visualization.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether `name` is a registered chart type.
    pub fn has(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Registered chart type names, in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        VisualizationType::ALL
            .into_iter()
            .map(VisualizationType::as_str)
            .filter(|name| self.has(name))
    }

    /// A freshly mounted visualization of the chart type `name`.
    pub fn get(&self, name: &str) -> Result<Box<dyn PluggableVisualization>, VisualizationError> {
        let descriptor = self
            .descriptors
            .get(name)
            .ok_or_else(|| VisualizationError::UnknownVisualization(name.into()))?;
        Ok(Box::new(ChartVisualization::new(
            descriptor.clone(),
            self.settings,
        )))
    }
}

impl Default for VisualizationCatalog {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
