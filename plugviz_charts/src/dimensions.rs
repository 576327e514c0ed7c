// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Execution dimensions: how a chart type slices its cross-tab result.
//!
//! Each chart type maps its buckets onto two axes. Attributes become item identifiers and
//! all measures collapse into the [`MEASURE_GROUP`] marker. Result parsers depend on the
//! exact shape, so every mapping here is fixed per chart type.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use plugviz_buckets::{get_bucket_items, get_totals_from_bucket};
use plugviz_model::{Bucket, BucketItem, BucketName, Total, VisualizationType};
use serde::{Deserialize, Serialize};

/// Item identifier standing for every measure of the execution.
pub const MEASURE_GROUP: &str = "measureGroup";

/// One axis of an execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Attribute local identifiers and possibly [`MEASURE_GROUP`], in axis order.
    pub item_identifiers: Vec<String>,
    /// Totals computed along this axis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<Total>,
}

impl Dimension {
    /// A dimension without totals.
    pub fn new(item_identifiers: Vec<String>) -> Self {
        Self {
            item_identifiers,
            totals: Vec::new(),
        }
    }

    /// Builder-style totals setter.
    pub fn with_totals(mut self, totals: Vec<Total>) -> Self {
        self.totals = totals;
        self
    }
}

fn identifiers(buckets: &[Bucket], name: &BucketName) -> Vec<String> {
    attributes_of(get_bucket_items(buckets, name))
}

fn attributes_of(items: &[BucketItem]) -> Vec<String> {
    items
        .iter()
        .filter(|i| i.attribute_item().is_some())
        .map(|i| i.local_identifier.clone())
        .collect()
}

fn measure_group() -> Vec<String> {
    vec![MEASURE_GROUP.into()]
}

fn with_measure_group(mut identifiers: Vec<String>) -> Vec<String> {
    identifiers.push(MEASURE_GROUP.into());
    identifiers
}

fn has_measures(buckets: &[Bucket]) -> bool {
    buckets
        .iter()
        .flat_map(|b| &b.items)
        .any(|i| i.measure_item().is_some())
}

fn all_attributes(buckets: &[Bucket]) -> Vec<String> {
    buckets.iter().flat_map(|b| attributes_of(&b.items)).collect()
}

/// Whether the named stacking bucket holds anything.
pub fn is_stacked_chart(buckets: &[Bucket], stack: &BucketName) -> bool {
    buckets
        .iter()
        .any(|b| b.local_identifier == *stack && !b.items.is_empty())
}

fn table_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let rows = identifiers(buckets, &BucketName::ATTRIBUTE);
    let mut columns = identifiers(buckets, &BucketName::COLUMNS);
    if !get_bucket_items(buckets, &BucketName::MEASURES).is_empty() {
        columns.push(MEASURE_GROUP.into());
    }
    let totals = get_totals_from_bucket(buckets, &BucketName::ATTRIBUTE).to_vec();
    vec![Dimension::new(rows).with_totals(totals), Dimension::new(columns)]
}

fn category_dimensions(buckets: &[Bucket], view: &BucketName) -> Vec<Dimension> {
    let view = identifiers(buckets, view);
    if view.is_empty() {
        return vec![Dimension::default(), Dimension::new(measure_group())];
    }
    vec![Dimension::new(measure_group()), Dimension::new(view)]
}

fn series_dimensions(buckets: &[Bucket], view: &BucketName, stack: &BucketName) -> Vec<Dimension> {
    let view = identifiers(buckets, view);
    if !is_stacked_chart(buckets, stack) {
        return vec![Dimension::new(measure_group()), Dimension::new(view)];
    }
    vec![
        Dimension::new(identifiers(buckets, stack)),
        Dimension::new(with_measure_group(view)),
    ]
}

fn heatmap_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let view = Dimension::new(identifiers(buckets, &BucketName::VIEW));
    let stack = identifiers(buckets, &BucketName::STACK);
    vec![view, Dimension::new(with_measure_group(stack))]
}

fn point_dimensions(attributes: Vec<String>) -> Vec<Dimension> {
    vec![Dimension::new(attributes), Dimension::new(measure_group())]
}

fn treemap_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes = all_attributes(buckets);
    if attributes.len() == 1 {
        return vec![Dimension::new(measure_group()), Dimension::new(attributes)];
    }
    point_dimensions(attributes)
}

fn repeater_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let mut rows = identifiers(buckets, &BucketName::ATTRIBUTE);
    rows.extend(identifiers(buckets, &BucketName::COLUMNS));
    let measures = if has_measures(buckets) {
        measure_group()
    } else {
        Vec::new()
    };
    vec![Dimension::new(rows), Dimension::new(measures)]
}

/// Dimensions of a stacked chart whose categories live in the `attribute` bucket.
///
/// Only the first stack item slices the series.
pub fn generate_stacked_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let stack = identifiers(buckets, &BucketName::STACK)
        .into_iter()
        .take(1)
        .collect();
    let view = identifiers(buckets, &BucketName::ATTRIBUTE);
    vec![Dimension::new(stack), Dimension::new(with_measure_group(view))]
}

/// Dimensions of `chart_type` over `buckets`.
pub fn generate_dimensions(buckets: &[Bucket], chart_type: VisualizationType) -> Vec<Dimension> {
    match chart_type {
        VisualizationType::Table => table_dimensions(buckets),
        VisualizationType::Pie
        | VisualizationType::Donut
        | VisualizationType::Funnel
        | VisualizationType::Pyramid
        | VisualizationType::Waterfall
        | VisualizationType::Bullet => category_dimensions(buckets, &BucketName::VIEW),
        VisualizationType::Column
        | VisualizationType::Bar
        | VisualizationType::Area
        | VisualizationType::Combo => {
            series_dimensions(buckets, &BucketName::VIEW, &BucketName::STACK)
        }
        VisualizationType::Line => {
            series_dimensions(buckets, &BucketName::TREND, &BucketName::SEGMENT)
        }
        VisualizationType::Headline => vec![Dimension::new(measure_group())],
        VisualizationType::Scatter => {
            point_dimensions(identifiers(buckets, &BucketName::ATTRIBUTE))
        }
        VisualizationType::Heatmap => heatmap_dimensions(buckets),
        VisualizationType::Bubble => {
            let mut attributes = identifiers(buckets, &BucketName::VIEW);
            attributes.extend(identifiers(buckets, &BucketName::STACK));
            point_dimensions(attributes)
        }
        VisualizationType::Treemap => treemap_dimensions(buckets),
        VisualizationType::Xirr => category_dimensions(buckets, &BucketName::ATTRIBUTE),
        VisualizationType::Sankey | VisualizationType::DependencyWheel => {
            let mut flow = identifiers(buckets, &BucketName::ATTRIBUTE_FROM);
            flow.extend(identifiers(buckets, &BucketName::ATTRIBUTE_TO));
            vec![Dimension::new(measure_group()), Dimension::new(flow)]
        }
        VisualizationType::Pushpin => {
            let mut points = identifiers(buckets, &BucketName::LOCATION);
            points.extend(identifiers(buckets, &BucketName::SEGMENT));
            point_dimensions(points)
        }
        VisualizationType::GeoArea => {
            let mut areas = identifiers(buckets, &BucketName::AREA);
            areas.extend(identifiers(buckets, &BucketName::SEGMENT));
            point_dimensions(areas)
        }
        VisualizationType::Repeater => repeater_dimensions(buckets),
    }
}

/// Dimensions of the chart type named `chart_type`; unknown names have none.
pub fn generate_dimensions_by_name(buckets: &[Bucket], chart_type: &str) -> Vec<Dimension> {
    VisualizationType::parse(chart_type)
        .map(|t| generate_dimensions(buckets, t))
        .unwrap_or_default()
}
