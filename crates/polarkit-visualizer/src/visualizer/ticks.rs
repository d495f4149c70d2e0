//! Polar axis ticks and their labels.
//!
//! Tick radii partition `[0, R]` either into a fixed number of equal
//! intervals or, with automatic subdivision, into round steps. Labels for
//! one tick set always share a single precision so that they line up.

use polarkit_core::constants::{MAXIMUM_AUTO_POLAR_INTERVALS, MINIMUM_NUMBER_OF_POLAR_TICKS};
use polarkit_core::{digits, label_exponent, LabelFormat};
use tracing::trace;

/// Relative slack when comparing a multiple of the step with the radius.
const STEP_TOLERANCE: f64 = 1.0e-9;

/// A round tick closer than this fraction of a step to the radius gives way to it.
const END_MERGE_FRACTION: f64 = 0.01;

/// How tick labels are turned into text.
#[derive(Debug, Clone, Copy)]
pub struct LabelOptions<'a> {
    /// Pick exponent and precision from the radius.
    pub auto_label_scaling: bool,
    /// Power of ten used when `auto_label_scaling` is off.
    pub user_exponent: i32,
    /// Format used when `auto_label_scaling` is off.
    pub format: &'a LabelFormat,
}

/// One polar tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub radius: f64,
    pub label: String,
}

/// Ticks of the polar axis with the exponent their labels were divided by.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    pub ticks: Vec<Tick>,
    pub exponent: i32,
}

impl TickSet {
    pub fn build(max_radius: f64, count: usize, auto_subdivide: bool, options: LabelOptions) -> Self {
        let radii = build_polar_axis_ticks(max_radius, count, auto_subdivide);
        let (labels, exponent) = build_polar_axis_labels(&radii, options);
        let ticks = radii
            .into_iter()
            .zip(labels)
            .map(|(radius, label)| Tick { radius, label })
            .collect();
        Self { ticks, exponent }
    }

    pub fn radii(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().map(|t| t.radius)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ticks.iter().map(|t| t.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Suffix appended to the polar axis title, e.g. `" (x10^3)"`.
    pub fn exponent_suffix(&self) -> Option<String> {
        (self.exponent != 0).then(|| format!(" (x10^{})", self.exponent))
    }
}

/// Tick radii on `[0, max_radius]`, increasing, both ends included.
///
/// A radius that is not strictly positive yields no ticks.
pub fn build_polar_axis_ticks(max_radius: f64, count: usize, auto_subdivide: bool) -> Vec<f64> {
    if !max_radius.is_finite() || max_radius <= 0.0 {
        return Vec::new();
    }

    let radii = if auto_subdivide {
        subdivided_ticks(max_radius)
    } else {
        let intervals = count.max(MINIMUM_NUMBER_OF_POLAR_TICKS) - 1;
        let step = max_radius / intervals as f64;
        let mut radii: Vec<f64> = (0..intervals).map(|i| i as f64 * step).collect();
        radii.push(max_radius);
        radii
    };

    trace!("{} polar ticks up to {}", radii.len(), max_radius);
    radii
}

/// Round 1/2/5 x 10^k step with at most `MAXIMUM_AUTO_POLAR_INTERVALS` intervals.
fn nice_step(max_radius: f64) -> f64 {
    let raw = max_radius / MAXIMUM_AUTO_POLAR_INTERVALS as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;

    let nice = if normalized <= 1.0 + STEP_TOLERANCE {
        1.0
    } else if normalized <= 2.0 + STEP_TOLERANCE {
        2.0
    } else if normalized <= 5.0 + STEP_TOLERANCE {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn subdivided_ticks(max_radius: f64) -> Vec<f64> {
    let step = nice_step(max_radius);
    if !(step > 0.0 && step.is_finite()) {
        trace!("No round step below radius {}, using its endpoints", max_radius);
        return vec![0.0, max_radius];
    }
    let limit = max_radius - step * END_MERGE_FRACTION;

    let mut radii = vec![0.0];
    let mut i = 1usize;
    loop {
        let radius = i as f64 * step;
        if radius >= limit {
            break;
        }
        radii.push(radius);
        i += 1;
    }
    radii.push(max_radius);
    radii
}

/// Labels for `radii`, with the power of ten they were divided by.
///
/// Automatic scaling picks the exponent from the largest radius and a
/// fixed-point precision from the smallest interval; manual scaling divides
/// by `10^user_exponent` and applies the configured format.
pub fn build_polar_axis_labels(radii: &[f64], options: LabelOptions) -> (Vec<String>, i32) {
    let Some(&max_radius) = radii.last() else {
        return (Vec::new(), 0);
    };

    let (exponent, format) = if options.auto_label_scaling {
        let exponent = label_exponent(0.0, max_radius);
        let divisor = 10f64.powi(exponent);
        let step = radii
            .windows(2)
            .map(|w| w[1] - w[0])
            .reduce(f64::min)
            .unwrap_or(max_radius);
        let decimals = digits(0.0, step / divisor);
        (exponent, LabelFormat::fixed(decimals))
    } else {
        (options.user_exponent, options.format.clone())
    };

    let divisor = 10f64.powi(exponent);
    let labels = radii
        .iter()
        .map(|r| format.format(r / divisor).trim().to_string())
        .collect();

    (labels, exponent)
}
