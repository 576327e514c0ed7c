// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart-type descriptor table.
//!
//! A [`ChartDescriptor`] is everything the generic builder needs to know about a chart type:
//! which bucket layout it fills, which property controls it understands and which optional
//! pipeline stages apply. Per-bucket item limits live in the chart's default UI config.

use plugviz_model::{BucketName, ItemType, VisualizationType};

const AXIS_PROPERTIES: &[&str] = &[
    "colorMapping",
    "dataLabels",
    "grid",
    "legend",
    "xaxis",
    "yaxis",
];

const STACKED_PROPERTIES: &[&str] = &[
    "colorMapping",
    "dataLabels",
    "grid",
    "legend",
    "secondary_xaxis",
    "secondary_yaxis",
    "stackMeasures",
    "stackMeasuresToPercent",
    "xaxis",
    "yaxis",
];

const ROUND_PROPERTIES: &[&str] = &["colorMapping", "dataLabels", "legend"];

const WATERFALL_PROPERTIES: &[&str] = &[
    "colorMapping",
    "dataLabels",
    "grid",
    "legend",
    "orientation",
    "total",
    "xaxis",
    "yaxis",
];

const COMBO_PROPERTIES: &[&str] = &[
    "colorMapping",
    "dataLabels",
    "dualAxis",
    "grid",
    "legend",
    "primaryChartType",
    "secondaryChartType",
    "secondary_yaxis",
    "stackMeasures",
    "stackMeasuresToPercent",
    "xaxis",
    "yaxis",
];

const TABLE_PROPERTIES: &[&str] = &["columnWidths", "measureGroupDimension", "columnHeadersPosition"];

const HEADLINE_PROPERTIES: &[&str] = &["comparison"];

const POINT_PROPERTIES: &[&str] = &["colorMapping", "dataLabels", "grid", "legend", "xaxis", "yaxis"];

const FLOW_PROPERTIES: &[&str] = &["colorMapping", "dataLabels", "legend"];

const PUSHPIN_PROPERTIES: &[&str] = &["legend", "mapStyle", "points", "tooltipText", "viewport"];

const GEO_AREA_PROPERTIES: &[&str] = &["colorMapping", "legend", "mapStyle", "tooltipText", "viewport"];

const REPEATER_PROPERTIES: &[&str] = &["cellImageSizing", "cellTextWrapping", "rowHeight"];

const NO_PROPERTIES: &[&str] = &[];

/// How a chart type distributes items over its buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BucketLayout {
    /// Measures, categories and an optional stacking attribute.
    ///
    /// With at most one master measure, an attribute that does not fit the categories is
    /// promoted to the stack.
    Stacked {
        /// Category bucket.
        view: BucketName,
        /// Stacking bucket.
        stack: BucketName,
        /// Item types a stack may hold.
        stack_types: &'static [ItemType],
    },
    /// One measure sliced by one category, or several measures compared to each other.
    Round,
    /// Fixed measure slots filled with borrowing, plus an optional category bucket.
    MeasureSlots {
        /// Measure buckets in fill order.
        slots: &'static [BucketName],
        /// Category bucket.
        categories: BucketName,
    },
    /// Primary and secondary axis measures with a category.
    Combo,
    /// Row attributes, column attributes and measures of a pivot table.
    Table,
    /// A primary measure and an optional secondary one.
    Headline,
    /// One measure over one date.
    Xirr,
    /// Geo location with size and color measures and a segment.
    Pushpin,
    /// Geo area with a color measure and a segment.
    GeoArea,
    /// One measure flowing between two attributes.
    Flow,
    /// One row attribute with arbitrary columns.
    Repeater,
}

/// Static description of one chart type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartDescriptor {
    /// The chart type described.
    pub chart_type: VisualizationType,
    /// How items are placed into buckets.
    pub layout: BucketLayout,
    /// Property controls the chart understands.
    pub supported_properties: &'static [&'static str],
    /// Whether rendering needs at least one measure.
    pub requires_measures: bool,
    /// Bucket that must hold an item before the chart renders.
    pub required_bucket: Option<BucketName>,
    /// Whether derived measures may survive; when unset they are dropped before bucketing.
    pub over_time_comparison: bool,
    /// Whether show-in-percent is switched off outright.
    pub percent_disabled: bool,
    /// Whether the UI config gets analytical recommendations.
    pub recommendations: bool,
    /// Whether the insight's own sort items are kept instead of generated.
    pub keeps_sort: bool,
}

const STACK_ATTRIBUTES: &[ItemType] = &[ItemType::Attribute];

const BUBBLE_SLOTS: &[BucketName] = &[
    BucketName::MEASURES,
    BucketName::SECONDARY_MEASURES,
    BucketName::TERTIARY_MEASURES,
];

const SCATTER_SLOTS: &[BucketName] = &[BucketName::MEASURES, BucketName::SECONDARY_MEASURES];

impl ChartDescriptor {
    const fn base(
        chart_type: VisualizationType,
        layout: BucketLayout,
        supported_properties: &'static [&'static str],
    ) -> Self {
        Self {
            chart_type,
            layout,
            supported_properties,
            requires_measures: true,
            required_bucket: None,
            over_time_comparison: true,
            percent_disabled: false,
            recommendations: false,
            keeps_sort: false,
        }
    }

    const fn stacked(chart_type: VisualizationType, view: BucketName, stack: BucketName) -> Self {
        Self::base(
            chart_type,
            BucketLayout::Stacked {
                view,
                stack,
                stack_types: STACK_ATTRIBUTES,
            },
            STACKED_PROPERTIES,
        )
    }

    /// The descriptor of `chart_type`.
    pub fn for_type(chart_type: VisualizationType) -> Self {
        match chart_type {
            VisualizationType::Column => Self {
                recommendations: true,
                ..Self::stacked(chart_type, BucketName::VIEW, BucketName::STACK)
            },
            VisualizationType::Bar | VisualizationType::Area => {
                Self::stacked(chart_type, BucketName::VIEW, BucketName::STACK)
            }
            VisualizationType::Line => Self {
                supported_properties: AXIS_PROPERTIES,
                ..Self::stacked(chart_type, BucketName::TREND, BucketName::SEGMENT)
            },
            VisualizationType::Heatmap => Self::base(
                chart_type,
                BucketLayout::Stacked {
                    view: BucketName::VIEW,
                    stack: BucketName::STACK,
                    stack_types: ItemType::ATTRIBUTES,
                },
                AXIS_PROPERTIES,
            ),
            VisualizationType::Treemap => Self {
                supported_properties: ROUND_PROPERTIES,
                ..Self::stacked(chart_type, BucketName::VIEW, BucketName::SEGMENT)
            },
            VisualizationType::Pie
            | VisualizationType::Donut
            | VisualizationType::Funnel
            | VisualizationType::Pyramid => {
                Self::base(chart_type, BucketLayout::Round, ROUND_PROPERTIES)
            }
            VisualizationType::Waterfall => {
                Self::base(chart_type, BucketLayout::Round, WATERFALL_PROPERTIES)
            }
            VisualizationType::Scatter => Self {
                over_time_comparison: false,
                ..Self::base(
                    chart_type,
                    BucketLayout::MeasureSlots {
                        slots: SCATTER_SLOTS,
                        categories: BucketName::ATTRIBUTE,
                    },
                    POINT_PROPERTIES,
                )
            },
            VisualizationType::Bubble => Self {
                over_time_comparison: false,
                ..Self::base(
                    chart_type,
                    BucketLayout::MeasureSlots {
                        slots: BUBBLE_SLOTS,
                        categories: BucketName::VIEW,
                    },
                    POINT_PROPERTIES,
                )
            },
            VisualizationType::Bullet => Self::base(
                chart_type,
                BucketLayout::MeasureSlots {
                    slots: BUBBLE_SLOTS,
                    categories: BucketName::VIEW,
                },
                AXIS_PROPERTIES,
            ),
            VisualizationType::Combo => {
                Self::base(chart_type, BucketLayout::Combo, COMBO_PROPERTIES)
            }
            VisualizationType::Table => Self {
                keeps_sort: true,
                ..Self::base(chart_type, BucketLayout::Table, TABLE_PROPERTIES)
            },
            VisualizationType::Headline => Self {
                percent_disabled: true,
                ..Self::base(chart_type, BucketLayout::Headline, HEADLINE_PROPERTIES)
            },
            VisualizationType::Xirr => Self {
                percent_disabled: true,
                ..Self::base(chart_type, BucketLayout::Xirr, NO_PROPERTIES)
            },
            VisualizationType::Sankey | VisualizationType::DependencyWheel => {
                Self::base(chart_type, BucketLayout::Flow, FLOW_PROPERTIES)
            }
            VisualizationType::Pushpin => Self {
                requires_measures: false,
                over_time_comparison: false,
                percent_disabled: true,
                ..Self::base(chart_type, BucketLayout::Pushpin, PUSHPIN_PROPERTIES)
            },
            VisualizationType::GeoArea => Self {
                requires_measures: false,
                required_bucket: Some(BucketName::AREA),
                over_time_comparison: false,
                percent_disabled: true,
                ..Self::base(chart_type, BucketLayout::GeoArea, GEO_AREA_PROPERTIES)
            },
            VisualizationType::Repeater => Self {
                requires_measures: false,
                over_time_comparison: false,
                percent_disabled: true,
                ..Self::base(chart_type, BucketLayout::Repeater, REPEATER_PROPERTIES)
            },
        }
    }
}
