//! Text and JSON rendering of replay frames.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use replay_core::clock::ClockDisplay;
use replay_core::ecs::TripView;
use replay_core::fleet::FleetSummary;
use replay_core::location::LastKnownPosition;

use crate::app::Frame;

pub fn format_sim_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "Loading...".to_string(),
    }
}

pub fn format_speed(multiplier: f64) -> String {
    format!("{multiplier}x")
}

pub fn format_percent(percent: Option<i64>) -> String {
    match percent {
        Some(percent) => format!("{percent}%"),
        None => "--".to_string(),
    }
}

pub fn format_position(position: Option<&LastKnownPosition>) -> String {
    let Some(position) = position else {
        return "Waiting for trip to start...".to_string();
    };
    let mut out = format!("{:.4}, {:.4}", position.lat, position.lng);
    if let Some(speed) = position.speed_kmh {
        let _ = write!(out, "  {speed:.1} km/h");
    }
    if let Some(heading) = position.heading_degrees {
        let _ = write!(out, "  {heading:.0}°");
    }
    out
}

pub fn clock_line(clock: &ClockDisplay) -> String {
    format!(
        "[{}] speed {} {}",
        format_sim_time(clock.current_time),
        format_speed(clock.speed_multiplier),
        if clock.playing { "playing" } else { "paused" }
    )
}

pub fn summary_line(summary: &FleetSummary) -> String {
    format!(
        "Fleet: total {} | completed {} | in progress {} | cancelled {} | not started {}",
        summary.total,
        summary.completed,
        summary.in_progress,
        summary.cancelled,
        summary.not_started
    )
}

pub fn trip_line(view: &TripView) -> String {
    format!(
        "  {:<28} {:<12} {:>5}  {}  events {}",
        view.display_name,
        view.progress.status.label(),
        format_percent(view.progress.percent),
        format_position(view.last_position.as_ref()),
        view.visible_events
    )
}

pub fn render_text(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", clock_line(&frame.clock));
    let _ = writeln!(out, "{}", summary_line(&frame.summary));
    for view in &frame.trips {
        let _ = writeln!(out, "{}", trip_line(view));
    }
    out
}

/// One JSON document per line.
pub fn render_json(frame: &Frame) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}
