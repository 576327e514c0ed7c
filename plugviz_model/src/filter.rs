// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The filter bucket and its filters.
//!
//! Filters carry no explicit tag on the wire. They are classified by shape:
//! - a date filter targets [`DATE_DATASET_ATTRIBUTE`],
//! - an attribute filter targets any other attribute,
//! - a measure value filter names a non-empty `measureLocalIdentifier`, and
//! - a ranking filter carries a `measure`, an `operator` and a numeric `value`.
//!
//! Anything else is kept as [`BucketFilter::Unrecognized`] so it can be reported and dropped.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::item::OverTimeComparisonType;
use crate::names::BucketName;

/// Attribute reference shared by every date filter.
pub const DATE_DATASET_ATTRIBUTE: &str = "attr.datedataset";

/// A backend object reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjRef {
    /// Reference by URI.
    Uri {
        /// Object URI.
        uri: String,
    },
    /// Reference by identifier.
    Identifier {
        /// Object identifier.
        identifier: String,
    },
}

impl ObjRef {
    /// A URI reference.
    pub fn uri(uri: &str) -> Self {
        Self::Uri { uri: uri.into() }
    }

    /// An identifier reference.
    pub fn identifier(identifier: &str) -> Self {
        Self::Identifier {
            identifier: identifier.into(),
        }
    }
}

/// Filter on attribute elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeFilter {
    /// Filtered attribute.
    pub attribute: String,
    /// `true` for "all except" selections.
    #[serde(default)]
    pub is_inverted: bool,
    /// Selected elements, opaque to the pipeline.
    #[serde(default)]
    pub selected_elements: Vec<Value>,
    /// Number of elements of the attribute, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements_count: Option<u64>,
}

/// Relative or absolute interval of a date filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInterval {
    /// Preset name (`all_time`, `last_year`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Granularity of the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    /// Interval bounds, opaque to the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Value>,
    /// `relative` or `absolute`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub interval_type: Option<String>,
}

/// The global date filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    /// Always [`DATE_DATASET_ATTRIBUTE`].
    pub attribute: String,
    /// Comparison applied through this filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_time_comparison_type: Option<OverTimeComparisonType>,
    /// Selected interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<DateInterval>,
}

impl DateFilter {
    /// Returns `true` when the filter selects all time.
    pub fn is_all_time(&self) -> bool {
        self.interval
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .is_some_and(|name| name == "all_time")
    }
}

/// Filter on the values of one measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureValueFilter {
    /// Local identifier of the filtered measure.
    pub measure_local_identifier: String,
    /// Comparison or range condition, opaque to the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

/// Top/bottom N filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingFilter {
    /// Local identifier of the ranked measure.
    pub measure: String,
    /// `TOP` or `BOTTOM`.
    pub operator: String,
    /// Number of ranked elements.
    pub value: f64,
    /// Local identifiers of the attributes ranked within, if restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

/// One filter, classified by shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketFilter {
    /// Attribute element filter.
    Attribute(AttributeFilter),
    /// Global date filter.
    Date(DateFilter),
    /// Measure value filter.
    MeasureValue(MeasureValueFilter),
    /// Ranking filter.
    Ranking(RankingFilter),
    /// A filter of unknown shape.
    Unrecognized(Value),
}

impl BucketFilter {
    /// Classifies a raw JSON filter.
    pub fn classify(value: Value) -> Self {
        let str_field = |name: &str| value.get(name).and_then(Value::as_str);
        let typed = if let Some(attribute) = str_field("attribute") {
            if attribute == DATE_DATASET_ATTRIBUTE {
                serde_json::from_value(value.clone()).ok().map(Self::Date)
            } else {
                serde_json::from_value(value.clone())
                    .ok()
                    .map(Self::Attribute)
            }
        } else if str_field("measureLocalIdentifier").is_some_and(|m| !m.is_empty()) {
            serde_json::from_value(value.clone())
                .ok()
                .map(Self::MeasureValue)
        } else if str_field("measure").is_some()
            && str_field("operator").is_some()
            && value.get("value").is_some_and(Value::is_number)
        {
            serde_json::from_value(value.clone()).ok().map(Self::Ranking)
        } else {
            None
        };
        typed.unwrap_or(Self::Unrecognized(value))
    }
}

impl<'de> Deserialize<'de> for BucketFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::classify)
    }
}

impl From<AttributeFilter> for BucketFilter {
    fn from(filter: AttributeFilter) -> Self {
        Self::Attribute(filter)
    }
}

impl From<DateFilter> for BucketFilter {
    fn from(filter: DateFilter) -> Self {
        Self::Date(filter)
    }
}

impl From<MeasureValueFilter> for BucketFilter {
    fn from(filter: MeasureValueFilter) -> Self {
        Self::MeasureValue(filter)
    }
}

impl From<RankingFilter> for BucketFilter {
    fn from(filter: RankingFilter) -> Self {
        Self::Ranking(filter)
    }
}

/// One entry of the filter bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersBucketItem {
    /// Identifier of the entry.
    pub local_identifier: String,
    /// Attribute the entry was created for, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// `Some(false)` for filters the user added explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_created: Option<bool>,
    /// Date dataset of a date filter entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_dataset_ref: Option<ObjRef>,
    /// Filters; only the first one is significant.
    #[serde(default)]
    pub filters: Vec<BucketFilter>,
}

impl FiltersBucketItem {
    /// An automatically created entry holding one filter.
    pub fn new(local_identifier: &str, filter: impl Into<BucketFilter>) -> Self {
        let filter = filter.into();
        let attribute = match &filter {
            BucketFilter::Attribute(f) => Some(f.attribute.clone()),
            BucketFilter::Date(f) => Some(f.attribute.clone()),
            _ => None,
        };
        Self {
            local_identifier: local_identifier.into(),
            attribute,
            auto_created: None,
            date_dataset_ref: None,
            filters: alloc::vec![filter],
        }
    }

    /// Sets the `auto_created` flag.
    pub fn with_auto_created(mut self, auto_created: bool) -> Self {
        self.auto_created = Some(auto_created);
        self
    }

    /// Sets the date dataset reference.
    pub fn with_date_dataset(mut self, dataset: ObjRef) -> Self {
        self.date_dataset_ref = Some(dataset);
        self
    }

    /// The significant filter of this entry.
    pub fn filter(&self) -> Option<&BucketFilter> {
        self.filters.first()
    }
}

/// The filter bucket of a reference point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBucket {
    /// Always [`BucketName::FILTERS`].
    pub local_identifier: BucketName,
    /// Filter entries.
    #[serde(default)]
    pub items: Vec<FiltersBucketItem>,
}

impl FilterBucket {
    /// A filter bucket holding `items`.
    pub fn new(items: Vec<FiltersBucketItem>) -> Self {
        Self {
            local_identifier: BucketName::FILTERS,
            items,
        }
    }

    /// Significant filters of all entries, in order.
    pub fn filters(&self) -> impl Iterator<Item = &BucketFilter> {
        self.items.iter().filter_map(FiltersBucketItem::filter)
    }

    /// The first date filter held by any entry, if any.
    pub fn date_filter(&self) -> Option<&DateFilter> {
        self.items
            .iter()
            .flat_map(|item| item.filters.iter())
            .find_map(|f| match f {
                BucketFilter::Date(d) => Some(d),
                _ => None,
            })
    }

    /// The entry created for the global date filter, if any.
    pub fn date_filter_item(&self) -> Option<&FiltersBucketItem> {
        self.items
            .iter()
            .find(|item| item.attribute.as_deref() == Some(DATE_DATASET_ATTRIBUTE))
    }
}

impl Default for FilterBucket {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
