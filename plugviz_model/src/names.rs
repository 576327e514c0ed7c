// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket and visualization name vocabularies.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// The semantic slot name of a bucket.
///
/// The fixed vocabulary is exposed as associated constants. Names outside the vocabulary are
/// kept verbatim so that buckets coming from another visualization type survive a round trip
/// through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketName(Cow<'static, str>);

impl BucketName {
    /// Primary measures.
    pub const MEASURES: Self = Self(Cow::Borrowed("measures"));
    /// Secondary measures (secondary axis, Y axis, target).
    pub const SECONDARY_MEASURES: Self = Self(Cow::Borrowed("secondary_measures"));
    /// Tertiary measures (bubble size, comparative value).
    pub const TERTIARY_MEASURES: Self = Self(Cow::Borrowed("tertiary_measures"));
    /// Row attributes of tables, X attribute of scatter plots.
    pub const ATTRIBUTE: Self = Self(Cow::Borrowed("attribute"));
    /// Source attribute of flow charts.
    pub const ATTRIBUTE_FROM: Self = Self(Cow::Borrowed("attribute_from"));
    /// Target attribute of flow charts.
    pub const ATTRIBUTE_TO: Self = Self(Cow::Borrowed("attribute_to"));
    /// Plural attribute bucket used by some legacy insights.
    pub const ATTRIBUTES: Self = Self(Cow::Borrowed("attributes"));
    /// View by.
    pub const VIEW: Self = Self(Cow::Borrowed("view"));
    /// Stack by.
    pub const STACK: Self = Self(Cow::Borrowed("stack"));
    /// Trend by (line charts).
    pub const TREND: Self = Self(Cow::Borrowed("trend"));
    /// Segment by.
    pub const SEGMENT: Self = Self(Cow::Borrowed("segment"));
    /// Column attributes of tables.
    pub const COLUMNS: Self = Self(Cow::Borrowed("columns"));
    /// Geo area.
    pub const AREA: Self = Self(Cow::Borrowed("area"));
    /// Geo location.
    pub const LOCATION: Self = Self(Cow::Borrowed("location"));
    /// Geo longitude.
    pub const LONGITUDE: Self = Self(Cow::Borrowed("longitude"));
    /// Geo latitude.
    pub const LATITUDE: Self = Self(Cow::Borrowed("latitude"));
    /// Geo point size.
    pub const SIZE: Self = Self(Cow::Borrowed("size"));
    /// Geo point color.
    pub const COLOR: Self = Self(Cow::Borrowed("color"));
    /// Geo tooltip text.
    pub const TOOLTIP_TEXT: Self = Self(Cow::Borrowed("tooltipText"));
    /// The filter bucket.
    pub const FILTERS: Self = Self(Cow::Borrowed("filters"));

    /// Creates a bucket name from an arbitrary string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BucketName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for BucketName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

/// Every chart type known to the catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    /// Vertical bars.
    Column,
    /// Horizontal bars.
    Bar,
    /// Line chart.
    Line,
    /// Area chart.
    Area,
    /// Pie chart.
    Pie,
    /// Donut chart.
    Donut,
    /// Funnel chart.
    Funnel,
    /// Pyramid chart.
    Pyramid,
    /// Treemap.
    Treemap,
    /// Pivot table.
    Table,
    /// Headline (one or two numbers).
    Headline,
    /// Scatter plot.
    Scatter,
    /// Bubble chart.
    Bubble,
    /// Heatmap.
    Heatmap,
    /// Combo chart (column/line/area on two axes).
    Combo,
    /// Bullet chart.
    Bullet,
    /// Waterfall chart.
    Waterfall,
    /// Extended internal rate of return.
    Xirr,
    /// Sankey diagram.
    Sankey,
    /// Dependency wheel.
    #[serde(rename = "dependencywheel")]
    DependencyWheel,
    /// Geo pushpin map.
    Pushpin,
    /// Geo area map, areas colored by a measure.
    #[serde(rename = "choropleth")]
    GeoArea,
    /// Repeater (one row per attribute element).
    Repeater,
}

impl VisualizationType {
    /// All chart types, in catalog order.
    pub const ALL: [Self; 23] = [
        Self::Column,
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Donut,
        Self::Funnel,
        Self::Pyramid,
        Self::Treemap,
        Self::Table,
        Self::Headline,
        Self::Scatter,
        Self::Bubble,
        Self::Heatmap,
        Self::Combo,
        Self::Bullet,
        Self::Waterfall,
        Self::Xirr,
        Self::Sankey,
        Self::DependencyWheel,
        Self::Pushpin,
        Self::GeoArea,
        Self::Repeater,
    ];

    /// Returns the wire name of this chart type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Funnel => "funnel",
            Self::Pyramid => "pyramid",
            Self::Treemap => "treemap",
            Self::Table => "table",
            Self::Headline => "headline",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Heatmap => "heatmap",
            Self::Combo => "combo",
            Self::Bullet => "bullet",
            Self::Waterfall => "waterfall",
            Self::Xirr => "xirr",
            Self::Sankey => "sankey",
            Self::DependencyWheel => "dependencywheel",
            Self::Pushpin => "pushpin",
            Self::GeoArea => "choropleth",
            Self::Repeater => "repeater",
        }
    }

    /// Parses a wire name, returning `None` for unknown chart types.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn foreign_bucket_names_are_preserved() {
        let name: BucketName = serde_json::from_str("\"some_measures\"").unwrap();
        assert_eq!(name.as_str(), "some_measures");
        assert_ne!(name, BucketName::MEASURES);
        assert_eq!(
            serde_json::to_string(&BucketName::TOOLTIP_TEXT).unwrap(),
            "\"tooltipText\""
        );
    }

    #[test]
    fn known_names_compare_equal_to_parsed_ones() {
        assert_eq!(BucketName::new("view"), BucketName::VIEW);
        assert!(BucketName::VIEW == *"view");
    }

    #[test]
    fn visualization_types_parse_their_wire_names() {
        for t in VisualizationType::ALL {
            assert_eq!(VisualizationType::parse(t.as_str()), Some(t));
        }
        assert_eq!(VisualizationType::parse("radar"), None);
        let json = serde_json::to_string(&VisualizationType::DependencyWheel).unwrap();
        assert_eq!(json, "\"dependencywheel\"");
        let json = serde_json::to_string(&VisualizationType::GeoArea).unwrap();
        assert_eq!(json, "\"choropleth\"");
    }
}
