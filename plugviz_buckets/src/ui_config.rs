// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket titles, subtitles, icons and item limits of the UI config.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use plugviz_model::{Bucket, BucketName, ExtendedReferencePoint, UiConfig, VisualizationType};

use crate::query::get_bucket_items;
use crate::transform::apply_items_limit;

/// Whether `bucket` of `chart_type` carries a subtitle under its title.
pub fn bucket_supports_subtitle(chart_type: VisualizationType, bucket: &BucketName) -> bool {
    match chart_type {
        VisualizationType::Headline => true,
        VisualizationType::Scatter => *bucket != BucketName::ATTRIBUTE,
        VisualizationType::Bubble | VisualizationType::Combo | VisualizationType::Bullet => {
            *bucket != BucketName::VIEW
        }
        VisualizationType::Pushpin => {
            *bucket != BucketName::LOCATION && *bucket != BucketName::SEGMENT
        }
        VisualizationType::GeoArea => *bucket == BucketName::COLOR,
        VisualizationType::Sankey | VisualizationType::DependencyWheel => {
            *bucket != BucketName::MEASURES
        }
        _ => false,
    }
}

/// Localization id of the title of `bucket` in `chart_type`.
pub fn generate_bucket_title_id(bucket: &BucketName, chart_type: VisualizationType) -> String {
    format!("dashboard.bucket.{}_title.{}", bucket.as_str(), chart_type.as_str())
}

fn generate_bucket_subtitle_id(bucket: &BucketName, chart_type: VisualizationType) -> String {
    format!("dashboard.bucket.{}_subtitle.{}", bucket.as_str(), chart_type.as_str())
}

/// Copy of the UI config with title ids, and subtitle ids where supported, on every enabled
/// bucket present in the reference point.
pub fn set_bucket_titles(
    reference_point: &ExtendedReferencePoint,
    chart_type: VisualizationType,
) -> UiConfig {
    let mut ui_config = reference_point.ui_config.clone();
    for bucket in &reference_point.buckets {
        let name = &bucket.local_identifier;
        let Some(config) = ui_config.buckets.get_mut(name) else {
            continue;
        };
        if !config.enabled {
            continue;
        }
        if bucket_supports_subtitle(chart_type, name) {
            config.subtitle = Some(generate_bucket_subtitle_id(name, chart_type));
        }
        config.title = Some(generate_bucket_title_id(name, chart_type));
    }
    ui_config
}

/// Sets the `{bucket}_{chart}` icon id on every configured bucket.
pub fn set_bucket_icons(ui_config: &mut UiConfig, chart_type: VisualizationType) {
    for (name, config) in &mut ui_config.buckets {
        config.icon = Some(format!("{}_{}", name.as_str(), chart_type.as_str()));
    }
}

/// Number of items in the named bucket, zero when the bucket is absent.
pub fn get_items_count(buckets: &[Bucket], name: &BucketName) -> usize {
    get_bucket_items(buckets, name).len()
}

/// Truncates every bucket to its configured items limit.
///
/// Only master items count towards the limit. Afterwards each configured bucket can accept
/// more items exactly when its master count stays below the limit. Buckets without a UI
/// config are left alone.
pub fn apply_ui_config(reference_point: &ExtendedReferencePoint) -> ExtendedReferencePoint {
    let mut applied = reference_point.clone();
    for bucket in &mut applied.buckets {
        let Some(config) = applied.ui_config.buckets.get_mut(&bucket.local_identifier) else {
            continue;
        };
        *bucket = apply_items_limit(bucket, config.items_limit);
        let masters = bucket.items.iter().filter(|i| !i.is_derived()).count();
        config.can_add_items = masters < config.items_limit;
    }
    applied
}
