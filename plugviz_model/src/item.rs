// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket items: measures and attributes placed in a bucket.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::filter::ObjRef;

/// The type of an item placed in a bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A measure.
    Metric,
    /// A raw fact (only accepted where aggregation is implicit).
    Fact,
    /// A plain attribute.
    Attribute,
    /// A date attribute.
    Date,
    /// A geo attribute (pushpin location).
    GeoAttribute,
}

impl ItemType {
    /// Attribute-like types: [`ItemType::Attribute`] and [`ItemType::Date`].
    pub const ATTRIBUTES: &'static [Self] = &[Self::Attribute, Self::Date];
    /// Measure-like types as counted by the pipeline: [`ItemType::Metric`].
    pub const METRICS: &'static [Self] = &[Self::Metric];
}

/// The comparison kind of a derived (time-shifted) measure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverTimeComparisonType {
    /// Same period, previous year.
    SamePeriodPreviousYear,
    /// Previous period of the same length.
    PreviousPeriod,
    /// No comparison.
    Nothing,
}

/// How a measure is computed.
#[derive(Clone, Debug, PartialEq)]
pub enum MeasureKind {
    /// A plain (master) measure.
    Simple,
    /// A time-comparison variant of another measure.
    Derived {
        /// Local identifier of the master measure.
        master: String,
        /// Comparison kind, when known.
        comparison: Option<OverTimeComparisonType>,
    },
    /// A measure computed from other measures.
    Arithmetic {
        /// Operand local identifiers; `None` is an unfilled slot.
        operands: Vec<Option<String>>,
        /// Operator name (`sum`, `difference`, `ratio`, ...).
        operator: String,
    },
}

/// Measure-specific fields.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureItem {
    /// How the measure is computed.
    pub kind: MeasureKind,
    /// `Some(true)` when values are shown as percent of total.
    pub show_in_percent: Option<bool>,
    /// `Some(true)` when the measure is drawn on the secondary axis.
    pub show_on_secondary_axis: Option<bool>,
}

/// Attribute-specific fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeItem {
    /// Backend reference of the displayed attribute.
    pub attribute: Option<String>,
    /// Date dataset, present on date items.
    pub date_dataset_ref: Option<ObjRef>,
    /// Date granularity (`GDC.time.year`, ...).
    pub granularity: Option<String>,
}

/// Measure or attribute payload of a [`BucketItem`].
#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// A measure.
    Measure(MeasureItem),
    /// An attribute, date or geo attribute.
    Attribute(AttributeItem),
}

/// One measure or attribute placed in a bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireItem", into = "WireItem")]
pub struct BucketItem {
    /// Identifier, unique within a reference point.
    pub local_identifier: String,
    /// Item type.
    pub item_type: ItemType,
    /// Measure or attribute payload.
    pub kind: ItemKind,
}

impl BucketItem {
    fn measure(local_identifier: &str, item_type: ItemType, kind: MeasureKind) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            item_type,
            kind: ItemKind::Measure(MeasureItem {
                kind,
                show_in_percent: None,
                show_on_secondary_axis: None,
            }),
        }
    }

    fn attribute_like(local_identifier: &str, item_type: ItemType, attribute: &str) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            item_type,
            kind: ItemKind::Attribute(AttributeItem {
                attribute: Some(attribute.into()),
                ..AttributeItem::default()
            }),
        }
    }

    /// A simple metric.
    pub fn metric(local_identifier: &str) -> Self {
        Self::measure(local_identifier, ItemType::Metric, MeasureKind::Simple)
    }

    /// A raw fact.
    pub fn fact(local_identifier: &str) -> Self {
        Self::measure(local_identifier, ItemType::Fact, MeasureKind::Simple)
    }

    /// A derived metric of `master` with the given comparison kind.
    pub fn derived(
        local_identifier: &str,
        master: &str,
        comparison: OverTimeComparisonType,
    ) -> Self {
        Self::measure(
            local_identifier,
            ItemType::Metric,
            MeasureKind::Derived {
                master: master.into(),
                comparison: Some(comparison),
            },
        )
    }

    /// An arithmetic metric over `operands` (`None` is an unfilled slot).
    pub fn arithmetic(local_identifier: &str, operands: &[Option<&str>], operator: &str) -> Self {
        Self::measure(
            local_identifier,
            ItemType::Metric,
            MeasureKind::Arithmetic {
                operands: operands.iter().map(|o| o.map(String::from)).collect(),
                operator: operator.into(),
            },
        )
    }

    /// A plain attribute displaying `attribute`.
    pub fn attribute(local_identifier: &str, attribute: &str) -> Self {
        Self::attribute_like(local_identifier, ItemType::Attribute, attribute)
    }

    /// A date attribute from the given dataset.
    pub fn date(local_identifier: &str, attribute: &str, dataset: ObjRef) -> Self {
        let mut item = Self::attribute_like(local_identifier, ItemType::Date, attribute);
        if let ItemKind::Attribute(a) = &mut item.kind {
            a.date_dataset_ref = Some(dataset);
        }
        item
    }

    /// A geo attribute.
    pub fn geo_attribute(local_identifier: &str, attribute: &str) -> Self {
        Self::attribute_like(local_identifier, ItemType::GeoAttribute, attribute)
    }

    /// Sets the date granularity of an attribute item.
    pub fn with_granularity(mut self, granularity: &str) -> Self {
        if let ItemKind::Attribute(a) = &mut self.kind {
            a.granularity = Some(granularity.into());
        }
        self
    }

    /// Sets the show-in-percent flag of a measure item.
    pub fn with_show_in_percent(mut self, value: Option<bool>) -> Self {
        if let Some(m) = self.measure_mut() {
            m.show_in_percent = value;
        }
        self
    }

    /// Sets the secondary-axis flag of a measure item.
    pub fn with_show_on_secondary_axis(mut self, value: Option<bool>) -> Self {
        if let Some(m) = self.measure_mut() {
            m.show_on_secondary_axis = value;
        }
        self
    }

    /// Measure payload, if this is a measure.
    pub fn measure_item(&self) -> Option<&MeasureItem> {
        match &self.kind {
            ItemKind::Measure(m) => Some(m),
            ItemKind::Attribute(_) => None,
        }
    }

    /// Mutable measure payload, if this is a measure.
    pub fn measure_mut(&mut self) -> Option<&mut MeasureItem> {
        match &mut self.kind {
            ItemKind::Measure(m) => Some(m),
            ItemKind::Attribute(_) => None,
        }
    }

    /// Attribute payload, if this is an attribute.
    pub fn attribute_item(&self) -> Option<&AttributeItem> {
        match &self.kind {
            ItemKind::Attribute(a) => Some(a),
            ItemKind::Measure(_) => None,
        }
    }

    /// Returns `true` for items of type [`ItemType::Metric`].
    pub fn is_metric(&self) -> bool {
        self.item_type == ItemType::Metric
    }

    /// Returns `true` for items of type [`ItemType::Date`].
    pub fn is_date(&self) -> bool {
        self.item_type == ItemType::Date
    }

    /// Returns `true` for derived measures.
    pub fn is_derived(&self) -> bool {
        self.master_local_identifier().is_some()
    }

    /// Returns `true` for arithmetic measures.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self.measure_item(),
            Some(MeasureItem {
                kind: MeasureKind::Arithmetic { .. },
                ..
            })
        )
    }

    /// Master identifier of a derived measure.
    pub fn master_local_identifier(&self) -> Option<&str> {
        match self.measure_item() {
            Some(MeasureItem {
                kind: MeasureKind::Derived { master, .. },
                ..
            }) => Some(master),
            _ => None,
        }
    }

    /// Operand slots of an arithmetic measure; empty for any other item.
    pub fn operands(&self) -> &[Option<String>] {
        match self.measure_item() {
            Some(MeasureItem {
                kind: MeasureKind::Arithmetic { operands, .. },
                ..
            }) => operands,
            _ => &[],
        }
    }

    /// Comparison kind of a derived measure.
    pub fn over_time_comparison_type(&self) -> Option<OverTimeComparisonType> {
        match self.measure_item() {
            Some(MeasureItem {
                kind: MeasureKind::Derived { comparison, .. },
                ..
            }) => *comparison,
            _ => None,
        }
    }

    /// Show-in-percent flag of a measure.
    pub fn show_in_percent(&self) -> Option<bool> {
        self.measure_item().and_then(|m| m.show_in_percent)
    }

    /// Secondary-axis flag of a measure.
    pub fn show_on_secondary_axis(&self) -> Option<bool> {
        self.measure_item().and_then(|m| m.show_on_secondary_axis)
    }

    /// Backend attribute reference of an attribute item.
    pub fn attribute_ref(&self) -> Option<&str> {
        self.attribute_item().and_then(|a| a.attribute.as_deref())
    }

    /// Date dataset of a date item.
    pub fn date_dataset_ref(&self) -> Option<&ObjRef> {
        self.attribute_item().and_then(|a| a.date_dataset_ref.as_ref())
    }

    /// Date granularity of an attribute item.
    pub fn granularity(&self) -> Option<&str> {
        self.attribute_item().and_then(|a| a.granularity.as_deref())
    }
}

/// Flat shape used by the editor UI.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    local_identifier: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    master_local_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    over_time_comparison_type: Option<OverTimeComparisonType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operand_local_identifiers: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_in_percent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_on_secondary_axis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_dataset_ref: Option<ObjRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    granularity: Option<String>,
}

impl From<WireItem> for BucketItem {
    fn from(wire: WireItem) -> Self {
        let is_measure = matches!(wire.item_type, ItemType::Metric | ItemType::Fact)
            || wire.master_local_identifier.is_some()
            || wire.operand_local_identifiers.is_some();
        let kind = if is_measure {
            let kind = match (wire.master_local_identifier, wire.operand_local_identifiers) {
                (Some(master), _) => MeasureKind::Derived {
                    master,
                    comparison: wire.over_time_comparison_type,
                },
                (None, Some(operands)) => MeasureKind::Arithmetic {
                    operands,
                    operator: wire.operator.unwrap_or_default(),
                },
                (None, None) => MeasureKind::Simple,
            };
            ItemKind::Measure(MeasureItem {
                kind,
                show_in_percent: wire.show_in_percent,
                show_on_secondary_axis: wire.show_on_secondary_axis,
            })
        } else {
            ItemKind::Attribute(AttributeItem {
                attribute: wire.attribute,
                date_dataset_ref: wire.date_dataset_ref,
                granularity: wire.granularity,
            })
        };
        Self {
            local_identifier: wire.local_identifier,
            item_type: wire.item_type,
            kind,
        }
    }
}

impl From<BucketItem> for WireItem {
    fn from(item: BucketItem) -> Self {
        let mut wire = Self {
            local_identifier: item.local_identifier,
            item_type: item.item_type,
            master_local_identifier: None,
            over_time_comparison_type: None,
            operand_local_identifiers: None,
            operator: None,
            show_in_percent: None,
            show_on_secondary_axis: None,
            attribute: None,
            date_dataset_ref: None,
            granularity: None,
        };
        match item.kind {
            ItemKind::Measure(m) => {
                wire.show_in_percent = m.show_in_percent;
                wire.show_on_secondary_axis = m.show_on_secondary_axis;
                match m.kind {
                    MeasureKind::Simple => {}
                    MeasureKind::Derived { master, comparison } => {
                        wire.master_local_identifier = Some(master);
                        wire.over_time_comparison_type = comparison;
                    }
                    MeasureKind::Arithmetic { operands, operator } => {
                        wire.operand_local_identifiers = Some(operands);
                        wire.operator = Some(operator);
                    }
                }
            }
            ItemKind::Attribute(a) => {
                wire.attribute = a.attribute;
                wire.date_dataset_ref = a.date_dataset_ref;
                wire.granularity = a.granularity;
            }
        }
        wire
    }
}
