// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort items stored in visualization properties.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Aggregation used when sorting stacked areas by their total.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAggregation {
    /// Sum of all stacked values.
    Sum,
}

/// Sort by attribute elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSortItem {
    /// Local identifier of the sorted attribute.
    pub attribute_identifier: String,
    /// Direction.
    pub direction: SortDirection,
    /// Present when sorting by the aggregated area of each element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<SortAggregation>,
}

/// Points a measure sort at one measure, optionally within attribute elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Locator {
    /// Attribute element locator.
    AttributeLocatorItem {
        /// Local identifier of the attribute.
        #[serde(rename = "attributeIdentifier")]
        attribute_identifier: String,
        /// Element URI.
        element: String,
    },
    /// Measure locator.
    MeasureLocatorItem {
        /// Local identifier of the measure.
        #[serde(rename = "measureIdentifier")]
        measure_identifier: String,
    },
}

impl Locator {
    /// Identifier referenced by this locator.
    pub fn identifier(&self) -> &str {
        match self {
            Self::AttributeLocatorItem {
                attribute_identifier,
                ..
            } => attribute_identifier,
            Self::MeasureLocatorItem { measure_identifier } => measure_identifier,
        }
    }
}

/// Sort by measure values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureSortItem {
    /// Direction.
    pub direction: SortDirection,
    /// Locators pointing at the sorted values.
    pub locators: Vec<Locator>,
}

/// One sort item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortItem {
    /// Attribute sort.
    AttributeSortItem(AttributeSortItem),
    /// Measure sort.
    MeasureSortItem(MeasureSortItem),
}

impl SortItem {
    /// Sort by the elements of `attribute_identifier`.
    pub fn attribute(attribute_identifier: &str, direction: SortDirection) -> Self {
        Self::AttributeSortItem(AttributeSortItem {
            attribute_identifier: attribute_identifier.into(),
            direction,
            aggregation: None,
        })
    }

    /// Sort by the values of `measure_identifier`.
    pub fn measure(measure_identifier: &str, direction: SortDirection) -> Self {
        Self::MeasureSortItem(MeasureSortItem {
            direction,
            locators: alloc::vec![Locator::MeasureLocatorItem {
                measure_identifier: measure_identifier.into(),
            }],
        })
    }

    /// Identifiers of every bucket item this sort refers to.
    pub fn identifiers(&self) -> Vec<&str> {
        match self {
            Self::AttributeSortItem(a) => alloc::vec![a.attribute_identifier.as_str()],
            Self::MeasureSortItem(m) => m.locators.iter().map(Locator::identifier).collect(),
        }
    }
}
