use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::DepthMap;
use crate::lineage::Device;
use crate::util::{date_from_day_number, day_number, year_start};

pub const TIMELINE_WIDTH: f64 = 2400.0;
pub const ROW_HEIGHT: f64 = 140.0;
pub const MAX_MARKERS: usize = 12;

const DATE_PADDING: f64 = 0.05;
const SINGLE_DATE_PADDING_DAYS: f64 = 182.0;
const MARKER_STEPS: [i32; 8] = [1, 2, 5, 10, 20, 25, 50, 100];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisMarker {
    pub year: i32,
    pub x: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeAxis {
    /// Padded lower bound in days since the common era; 0 when nothing is dated.
    pub min: f64,
    /// Padded upper bound; 1 when nothing is dated.
    pub max: f64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub step_years: Option<i32>,
    pub markers: Vec<AxisMarker>,
}

impl TimeAxis {
    fn unit() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            start: None,
            end: None,
            step_years: None,
            markers: Vec::new(),
        }
    }

    fn spanning(lo: f64, hi: f64) -> Self {
        let span = hi - lo;
        let pad = if span > 0.0 {
            span * DATE_PADDING
        } else {
            SINGLE_DATE_PADDING_DAYS
        };

        let mut axis = Self {
            min: lo - pad,
            max: hi + pad,
            start: date_from_day_number(lo - pad),
            end: date_from_day_number(hi + pad),
            step_years: None,
            markers: Vec::new(),
        };

        if let (Some(start), Some(end)) = (axis.start, axis.end) {
            let step = marker_step(start.year(), end.year());
            axis.step_years = Some(step);
            axis.markers = axis.year_markers(start.year(), end.year(), step);
        }

        axis
    }

    /// Horizontal position of a day number on the timeline.
    pub fn x_of(&self, day: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (day - self.min) / span * TIMELINE_WIDTH
    }

    fn year_markers(&self, first: i32, last: i32, step: i32) -> Vec<AxisMarker> {
        let mut markers = Vec::new();
        let mut year = first_multiple(first, step);
        while year <= last {
            if let Some(date) = year_start(year) {
                let day = day_number(date);
                if day >= self.min && day <= self.max {
                    markers.push(AxisMarker {
                        year,
                        x: self.x_of(day),
                    });
                }
            }
            year += step;
        }
        markers
    }
}

fn first_multiple(year: i32, step: i32) -> i32 {
    (year + step - 1).div_euclid(step) * step
}

fn marker_count(first: i32, last: i32, step: i32) -> usize {
    let count = last.div_euclid(step) - first_multiple(first, step) / step + 1;
    usize::try_from(count).unwrap_or(0)
}

fn marker_step(first: i32, last: i32) -> i32 {
    MARKER_STEPS
        .iter()
        .copied()
        .find(|&step| marker_count(first, last, step) <= MAX_MARKERS)
        .unwrap_or_else(|| {
            let mut step = 200;
            while marker_count(first, last, step) > MAX_MARKERS {
                step += 100;
            }
            step
        })
}

/// Time × depth coordinates for a set of nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub positions: IndexMap<String, Position>,
    pub axis: TimeAxis,
}

/// Places each node at its decision date horizontally and its topological
/// depth vertically.
///
/// Undated nodes are spread across the width by `depth / max_depth`. Nodes
/// missing from `depths` are treated as depth 0.
pub fn project(nodes: &[Device], depths: &DepthMap) -> Projection {
    let days = nodes
        .iter()
        .map(|device| device.decision_date().map(day_number))
        .collect::<Vec<_>>();

    let bounds = days.iter().flatten().fold(None, |bounds, &day| match bounds {
        None => Some((day, day)),
        Some((lo, hi)) => Some((f64::min(lo, day), f64::max(hi, day))),
    });
    let axis = match bounds {
        Some((lo, hi)) => TimeAxis::spanning(lo, hi),
        None => TimeAxis::unit(),
    };

    let depth_of = |id: &str| depths.get(id).copied().unwrap_or(0);
    let max_depth = nodes
        .iter()
        .map(|device| depth_of(&device.id))
        .max()
        .unwrap_or(0)
        .max(1);

    let positions = nodes
        .iter()
        .zip(&days)
        .map(|(device, day)| {
            let depth = depth_of(&device.id);
            let x = match day {
                Some(day) => axis.x_of(*day),
                None => depth as f64 / max_depth as f64 * TIMELINE_WIDTH,
            };
            let position = Position {
                x,
                y: depth as f64 * ROW_HEIGHT,
            };
            (device.id.clone(), position)
        })
        .collect();

    Projection { positions, axis }
}
