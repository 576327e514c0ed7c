// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filtering of persisted properties down to what a chart type supports.

extern crate alloc;

use alloc::string::String;

use plugviz_model::VisualizationProperties;
use serde_json::{Map, Value};

/// The entries of `controls` whose key is in `supported`.
pub fn get_supported_property_controls(
    controls: &Map<String, Value>,
    supported: &[&str],
) -> Map<String, Value> {
    controls
        .iter()
        .filter(|(key, _)| supported.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Copy of `properties` keeping the sort items and the supported controls.
///
/// Controls are dropped altogether when none of them is supported.
pub fn get_supported_properties(
    properties: Option<&VisualizationProperties>,
    supported: &[&str],
) -> VisualizationProperties {
    let Some(properties) = properties else {
        return VisualizationProperties::default();
    };
    let controls = properties
        .controls
        .as_ref()
        .map(|c| get_supported_property_controls(c, supported))
        .filter(|c| !c.is_empty());
    VisualizationProperties {
        sort_items: properties.sort_items.clone(),
        controls,
    }
}
