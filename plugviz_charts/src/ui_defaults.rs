// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default UI configuration per chart type.
//!
//! Templates are composed from a handful of bucket shapes (measures, categories, stacks and
//! the filter bucket) and then specialized per chart type.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec;

use plugviz_model::{
    BucketName, BucketUiConfig, ExportConfig, ItemType, OpenAsReport, OptionalStacking,
    OverTimeComparisonType, UiConfig, VisualizationType,
};

use crate::settings::Settings;

/// Measure cap of round charts comparing measures instead of categories.
pub const PIE_ONLY_MAX_METRICS_COUNT: usize = 20;

const MAX_FILTERS_COUNT: usize = 20;
const MAX_CATEGORIES_COUNT: usize = 1;
const MAX_STACKS_COUNT: usize = 1;
const MAX_VIEW_COUNT: usize = 2;

const COMPARISON_TYPES: [OverTimeComparisonType; 2] = [
    OverTimeComparisonType::SamePeriodPreviousYear,
    OverTimeComparisonType::PreviousPeriod,
];

fn measures_base(settings: &Settings) -> BucketUiConfig {
    BucketUiConfig {
        accepts: vec![ItemType::Metric, ItemType::Fact, ItemType::Attribute],
        items_limit: settings.max_metrics_count,
        allows_duplicate_items: true,
        allows_reordering: true,
        allows_swapping: true,
        enabled: true,
        is_show_in_percent_visible: true,
        ..BucketUiConfig::default()
    }
}

/// A measure bucket holding exactly one measure.
fn single_measure(settings: &Settings) -> BucketUiConfig {
    BucketUiConfig {
        items_limit: 1,
        allows_reordering: false,
        is_show_in_percent_visible: false,
        ..measures_base(settings)
    }
}

fn view_base() -> BucketUiConfig {
    BucketUiConfig {
        accepts: vec![ItemType::Attribute, ItemType::Date],
        items_limit: MAX_CATEGORIES_COUNT,
        items_limit_by_type: BTreeMap::from([(ItemType::Date, 1)]),
        allows_swapping: true,
        enabled: true,
        ..BucketUiConfig::default()
    }
}

fn stack_base() -> BucketUiConfig {
    BucketUiConfig {
        accepts: vec![ItemType::Attribute],
        items_limit: MAX_STACKS_COUNT,
        allows_swapping: true,
        enabled: true,
        ..BucketUiConfig::default()
    }
}

fn filters_bucket() -> BucketUiConfig {
    BucketUiConfig {
        accepts: vec![ItemType::Attribute, ItemType::Date],
        items_limit: MAX_FILTERS_COUNT,
        items_limit_by_type: BTreeMap::from([(ItemType::Date, 1)]),
        enabled: true,
        ..BucketUiConfig::default()
    }
}

/// Root properties shared by every template: export on, open-as-report off, no comparison.
fn root<const N: usize>(buckets: [(BucketName, BucketUiConfig); N]) -> UiConfig {
    let mut buckets = BTreeMap::from(buckets);
    buckets.insert(BucketName::FILTERS, filters_bucket());
    UiConfig {
        buckets,
        export_config: ExportConfig { supported: true },
        open_as_report: OpenAsReport { supported: false },
        ..UiConfig::default()
    }
}

fn with_comparison(mut ui_config: UiConfig) -> UiConfig {
    ui_config.supported_over_time_comparison_types = COMPARISON_TYPES.to_vec();
    ui_config
}

fn with_open_as_report(mut ui_config: UiConfig) -> UiConfig {
    ui_config.open_as_report.supported = true;
    ui_config
}

fn with_stacking(mut ui_config: UiConfig, stack_measures: bool) -> UiConfig {
    ui_config.optional_stacking = Some(OptionalStacking {
        supported: true,
        stack_measures,
        ..OptionalStacking::default()
    });
    ui_config
}

fn without_export(mut ui_config: UiConfig) -> UiConfig {
    ui_config.export_config.supported = false;
    ui_config
}

fn column_bar(settings: &Settings) -> UiConfig {
    let ui_config = root([
        (
            BucketName::MEASURES,
            BucketUiConfig {
                is_show_on_secondary_axis_visible: true,
                ..measures_base(settings)
            },
        ),
        (
            BucketName::VIEW,
            BucketUiConfig {
                allows_reordering: true,
                items_limit: MAX_VIEW_COUNT,
                ..view_base()
            },
        ),
        (BucketName::STACK, stack_base()),
    ]);
    with_stacking(with_comparison(with_open_as_report(ui_config)), false)
}

fn line(settings: &Settings) -> UiConfig {
    let ui_config = root([
        (
            BucketName::MEASURES,
            BucketUiConfig {
                is_show_on_secondary_axis_visible: true,
                ..measures_base(settings)
            },
        ),
        (BucketName::TREND, view_base()),
        (BucketName::SEGMENT, stack_base()),
    ]);
    with_comparison(with_open_as_report(ui_config))
}

fn area(settings: &Settings) -> UiConfig {
    let ui_config = root([
        (BucketName::MEASURES, measures_base(settings)),
        (
            BucketName::VIEW,
            BucketUiConfig {
                allows_reordering: true,
                items_limit: MAX_VIEW_COUNT,
                ..view_base()
            },
        ),
        (BucketName::STACK, stack_base()),
    ]);
    with_stacking(with_open_as_report(ui_config), true)
}

fn round(settings: &Settings) -> UiConfig {
    with_open_as_report(root([
        (
            BucketName::MEASURES,
            BucketUiConfig {
                items_limit: 1,
                allows_reordering: false,
                ..measures_base(settings)
            },
        ),
        (BucketName::VIEW, view_base()),
    ]))
}

fn waterfall(settings: &Settings) -> UiConfig {
    let mut ui_config = with_stacking(round(settings), false);
    if let Some(measures) = ui_config.buckets.get_mut(&BucketName::MEASURES) {
        measures.is_total_measure_visible = true;
    }
    ui_config
}

fn treemap(settings: &Settings) -> UiConfig {
    root([
        (BucketName::MEASURES, measures_base(settings)),
        (BucketName::VIEW, view_base()),
        (BucketName::SEGMENT, stack_base()),
    ])
}

fn table(settings: &Settings) -> UiConfig {
    let rows = BucketUiConfig {
        allows_swapping: false,
        allows_reordering: true,
        items_limit: settings.max_table_categories_count,
        ..view_base()
    };
    let columns = BucketUiConfig {
        items_limit_by_type: BTreeMap::new(),
        ..rows.clone()
    };
    with_comparison(with_open_as_report(root([
        (BucketName::MEASURES, measures_base(settings)),
        (BucketName::ATTRIBUTE, rows),
        (BucketName::COLUMNS, columns),
    ])))
}

fn headline(settings: &Settings) -> UiConfig {
    without_export(with_comparison(root([
        (BucketName::MEASURES, single_measure(settings)),
        (BucketName::SECONDARY_MEASURES, single_measure(settings)),
    ])))
}

fn heatmap(settings: &Settings) -> UiConfig {
    let category = BucketUiConfig {
        items_limit_by_type: BTreeMap::new(),
        ..view_base()
    };
    root([
        (
            BucketName::MEASURES,
            BucketUiConfig {
                is_show_in_percent_visible: false,
                allows_reordering: false,
                items_limit: 1,
                ..measures_base(settings)
            },
        ),
        (BucketName::VIEW, category.clone()),
        (BucketName::STACK, category),
    ])
}

fn point_measure(settings: &Settings) -> BucketUiConfig {
    BucketUiConfig {
        is_show_in_percent_visible: false,
        allows_reordering: false,
        items_limit: 1,
        ..measures_base(settings)
    }
}

fn point_category() -> BucketUiConfig {
    BucketUiConfig {
        allows_swapping: false,
        ..view_base()
    }
}

fn scatter(settings: &Settings) -> UiConfig {
    root([
        (BucketName::MEASURES, point_measure(settings)),
        (BucketName::SECONDARY_MEASURES, point_measure(settings)),
        (BucketName::ATTRIBUTE, point_category()),
    ])
}

fn bubble(settings: &Settings) -> UiConfig {
    root([
        (BucketName::MEASURES, point_measure(settings)),
        (BucketName::SECONDARY_MEASURES, point_measure(settings)),
        (BucketName::TERTIARY_MEASURES, point_measure(settings)),
        (BucketName::VIEW, point_category()),
    ])
}

fn combo(settings: &Settings) -> UiConfig {
    let mut ui_config = with_stacking(
        with_comparison(root([
            (BucketName::MEASURES, measures_base(settings)),
            (BucketName::SECONDARY_MEASURES, measures_base(settings)),
            (BucketName::VIEW, view_base()),
        ])),
        false,
    );
    if let Some(stacking) = ui_config.optional_stacking.as_mut() {
        stacking.disabled = Some(false);
    }
    ui_config.supported_chart_types = Some(vec![
        VisualizationType::Column,
        VisualizationType::Line,
        VisualizationType::Area,
    ]);
    ui_config
}

fn bullet(settings: &Settings) -> UiConfig {
    with_comparison(root([
        (BucketName::MEASURES, point_measure(settings)),
        (BucketName::SECONDARY_MEASURES, point_measure(settings)),
        (BucketName::TERTIARY_MEASURES, point_measure(settings)),
        (
            BucketName::VIEW,
            BucketUiConfig {
                allows_reordering: true,
                items_limit: MAX_VIEW_COUNT,
                ..view_base()
            },
        ),
    ]))
}

fn xirr(settings: &Settings) -> UiConfig {
    without_export(root([
        (
            BucketName::MEASURES,
            BucketUiConfig {
                accepts: vec![ItemType::Metric, ItemType::Fact],
                items_limit: 1,
                is_show_in_percent_visible: false,
                ..measures_base(settings)
            },
        ),
        (
            BucketName::ATTRIBUTE,
            BucketUiConfig {
                accepts: vec![ItemType::Date],
                ..view_base()
            },
        ),
    ]))
}

fn flow(settings: &Settings) -> UiConfig {
    root([
        (BucketName::MEASURES, point_measure(settings)),
        (BucketName::ATTRIBUTE_FROM, point_category()),
        (BucketName::ATTRIBUTE_TO, point_category()),
    ])
}

fn pushpin(settings: &Settings) -> UiConfig {
    let mut ui_config = root([
        (
            BucketName::LOCATION,
            BucketUiConfig {
                accepts: vec![ItemType::GeoAttribute],
                items_limit_by_type: BTreeMap::new(),
                ..point_category()
            },
        ),
        (BucketName::SIZE, point_measure(settings)),
        (BucketName::COLOR, point_measure(settings)),
        (BucketName::SEGMENT, stack_base()),
    ]);
    ui_config.no_metric_accepted = Some(true);
    ui_config.supported_location_icon = Some(true);
    ui_config
}

fn geo_area(settings: &Settings) -> UiConfig {
    let mut ui_config = root([
        (
            BucketName::AREA,
            BucketUiConfig {
                accepts: vec![ItemType::GeoAttribute],
                items_limit_by_type: BTreeMap::new(),
                ..point_category()
            },
        ),
        (BucketName::COLOR, point_measure(settings)),
        (BucketName::SEGMENT, stack_base()),
    ]);
    ui_config.no_metric_accepted = Some(true);
    ui_config
}

fn repeater(settings: &Settings) -> UiConfig {
    root([
        (
            BucketName::ATTRIBUTE,
            BucketUiConfig {
                accepts: vec![ItemType::Attribute],
                items_limit_by_type: BTreeMap::new(),
                ..point_category()
            },
        ),
        (
            BucketName::COLUMNS,
            BucketUiConfig {
                accepts: vec![ItemType::Attribute, ItemType::Metric, ItemType::Fact],
                is_show_in_percent_visible: false,
                ..measures_base(settings)
            },
        ),
    ])
}

/// The UI configuration a freshly built `chart_type` starts from.
pub fn default_ui_config(chart_type: VisualizationType, settings: &Settings) -> UiConfig {
    match chart_type {
        VisualizationType::Column | VisualizationType::Bar => column_bar(settings),
        VisualizationType::Line => line(settings),
        VisualizationType::Area => area(settings),
        VisualizationType::Pie
        | VisualizationType::Donut
        | VisualizationType::Funnel
        | VisualizationType::Pyramid => round(settings),
        VisualizationType::Waterfall => waterfall(settings),
        VisualizationType::Treemap => treemap(settings),
        VisualizationType::Table => table(settings),
        VisualizationType::Headline => headline(settings),
        VisualizationType::Scatter => scatter(settings),
        VisualizationType::Bubble => bubble(settings),
        VisualizationType::Heatmap => heatmap(settings),
        VisualizationType::Combo => combo(settings),
        VisualizationType::Bullet => bullet(settings),
        VisualizationType::Xirr => xirr(settings),
        VisualizationType::Sankey | VisualizationType::DependencyWheel => flow(settings),
        VisualizationType::Pushpin => pushpin(settings),
        VisualizationType::GeoArea => geo_area(settings),
        VisualizationType::Repeater => repeater(settings),
    }
}
