//! Plain-text rendering of the dashboard for the terminal

use std::fmt::Write;

use sensor_deck_core::{Metric, MetricBand, SensorEntity, Severity};

use crate::dashboard::Dashboard;

/// Width of the range bar in characters
const BAR_WIDTH: usize = 24;

/// Text bar for `value` on `band`'s scale.
///
/// The good band is drawn with `=`, the rest of the scale with `-`, and the
/// value marker with `|`.
pub fn range_bar(band: &MetricBand, value: f64) -> String {
    let last = (BAR_WIDTH - 1) as f64;
    let (good_start, good_end) = band.good_fractions();
    let good_start = (good_start * last).round() as usize;
    let good_end = (good_end * last).round() as usize;
    let marker = (band.fraction(value) * last).round() as usize;

    (0..BAR_WIDTH)
        .map(|i| {
            if i == marker {
                '|'
            } else if (good_start..=good_end).contains(&i) {
                '='
            } else {
                '-'
            }
        })
        .collect()
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Healthy => "",
        Severity::Minor => "  [MINOR]",
        Severity::Major => "  [MAJOR]",
    }
}

/// Render one card
pub fn render_card(entity: &SensorEntity) -> String {
    let mut out = String::new();
    let star = if entity.is_favorite() { '*' } else { ' ' };
    let _ = writeln!(
        out,
        "{} {} ({}){}",
        star,
        entity.name(),
        entity.id(),
        severity_tag(entity.severity())
    );

    let reading = entity.reading();
    let ranges = entity.range_config();
    let flagged = entity.out_of_band_metrics();
    for metric in Metric::ALL {
        let info = metric.info();
        match reading.metric(metric) {
            Some(value) => {
                let flag = if flagged.contains(&metric) { " !" } else { "" };
                let _ = writeln!(
                    out,
                    "    {:<18} {:>9}  [{}]{}",
                    info.label,
                    metric.format_value(value),
                    range_bar(ranges.band(metric), value),
                    flag
                );
            }
            None => {
                let _ = writeln!(out, "    {:<18} {:>9}", info.label, "--");
            }
        }
    }

    let mut extras = Vec::new();
    if let Some(volts) = reading.battery_voltage {
        extras.push(format!("battery {:.2} V", volts));
    }
    if let Some(rssi) = reading.signal_strength {
        extras.push(format!("signal {} dBm", rssi));
    }
    if !extras.is_empty() {
        let _ = writeln!(out, "    {}", extras.join("  "));
    }
    if let Some(timestamp) = &reading.display_timestamp {
        let _ = writeln!(out, "    {}", timestamp);
    }
    out
}

/// Render the visible cards in display order, each with its layout position
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let layout = dashboard.layout();
    let registry = dashboard.registry();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} sensors, {} shown, content height {}px",
        registry.len(),
        layout.cards.len(),
        layout.total_height
    );

    for card in &layout.cards {
        let Some(entity) = registry.get(&card.sensor_id) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "@ ({}, {}) {}x{}",
            card.rect.x, card.rect.y, card.rect.width, card.rect.height
        );
        out.push_str(&render_card(entity));
    }
    out
}
