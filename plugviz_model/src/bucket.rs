// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named buckets.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::item::BucketItem;
use crate::names::BucketName;

/// A grand total or subtotal requested for a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Total {
    /// Measure the total is computed for.
    pub measure_identifier: String,
    /// Aggregation (`sum`, `max`, ...).
    #[serde(rename = "type")]
    pub total_type: String,
    /// Attribute the total is grouped at.
    pub attribute_identifier: String,
}

/// A named, ordered collection of bucket items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Slot name.
    pub local_identifier: BucketName,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<BucketItem>,
    /// Totals, tables only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<Vec<Total>>,
}

impl Bucket {
    /// Creates a bucket without totals.
    pub fn new(local_identifier: BucketName, items: Vec<BucketItem>) -> Self {
        Self {
            local_identifier,
            items,
            totals: None,
        }
    }

    /// Sets the totals of this bucket.
    pub fn with_totals(mut self, totals: Vec<Total>) -> Self {
        self.totals = Some(totals);
        self
    }
}
