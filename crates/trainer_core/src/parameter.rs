//! Physical quantities tracked on a device and their allowed ranges.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::Rng;

/// Lower bound of the relative drift applied to continuous values each tick.
const DRIFT_FRACTION_MIN: f64 = 0.05;
/// Upper bound of the relative drift applied to continuous values each tick.
const DRIFT_FRACTION_MAX: f64 = 0.10;
/// Step sizes for count-like values. Zero is excluded so a drift always moves.
const DISCRETE_STEPS: [i64; 4] = [-2, -1, 1, 2];

/// Closed interval `[min, max]`. Always ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(a: f64, b: f64) -> Self {
        debug_assert!(!a.is_nan() && !b.is_nan(), "range bounds must be numbers");
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn contains_range(self, other: Range) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    pub fn overlaps(self, other: Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Narrows `self` so it lies inside `bounds`. The result is always a subset of `bounds`.
    pub fn clip_to(self, bounds: Range) -> Range {
        Range::new(bounds.clamp(self.min), bounds.clamp(self.max))
    }

    /// Clamp for count-like values: the nearest integer inside the range.
    ///
    /// A range too narrow to hold any integer yields the integer nearest its midpoint.
    fn clamp_discrete(self, value: i64) -> i64 {
        let lo = self.min.ceil() as i64;
        let hi = self.max.floor() as i64;
        if lo > hi {
            return self.midpoint().round() as i64;
        }
        value.clamp(lo, hi)
    }
}

impl From<(f64, f64)> for Range {
    fn from((a, b): (f64, f64)) -> Self {
        Range::new(a, b)
    }
}

/// Current reading of a parameter: a measured quantity or a count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            ParamValue::Float(v) => v,
            ParamValue::Int(v) => v as f64,
        }
    }

    pub fn is_discrete(self) -> bool {
        matches!(self, ParamValue::Int(_))
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v:.1}"),
            ParamValue::Int(v) => write!(f, "{v}"),
        }
    }
}

/// A named quantity with its physical limits (`absolute`), its healthy band
/// (`normal`), and the band it is currently allowed to wander in (`current`).
///
/// Identity is the name: two parameters with the same name compare equal
/// regardless of their ranges or value.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    absolute: Range,
    normal: Range,
    current: Range,
    value: ParamValue,
}

impl Parameter {
    pub fn continuous(
        name: impl Into<String>,
        absolute: (f64, f64),
        normal: (f64, f64),
        initial: f64,
    ) -> Self {
        let absolute = Range::from(absolute);
        let normal = Range::from(normal).clip_to(absolute);
        Self {
            name: name.into(),
            absolute,
            normal,
            current: normal,
            value: ParamValue::Float(normal.clamp(initial)),
        }
    }

    pub fn discrete(
        name: impl Into<String>,
        absolute: (i64, i64),
        normal: (i64, i64),
        initial: i64,
    ) -> Self {
        let absolute = Range::new(absolute.0 as f64, absolute.1 as f64);
        let normal = Range::new(normal.0 as f64, normal.1 as f64).clip_to(absolute);
        Self {
            name: name.into(),
            absolute,
            normal,
            current: normal,
            value: ParamValue::Int(normal.clamp_discrete(initial)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn absolute(&self) -> Range {
        self.absolute
    }

    pub fn normal(&self) -> Range {
        self.normal
    }

    pub fn current(&self) -> Range {
        self.current
    }

    pub fn value(&self) -> ParamValue {
        self.value
    }

    /// True while a fault has moved the allowed band away from normal.
    pub fn is_constrained(&self) -> bool {
        self.current != self.normal
    }

    /// Applies one tick of random noise and clamps into the current range.
    ///
    /// Continuous values move by 5–10% of themselves in a random direction;
    /// discrete values step by one of ±1, ±2.
    pub fn drift(&mut self, rng: &mut impl Rng) {
        self.value = match self.value {
            ParamValue::Float(v) => {
                let fraction = rng.gen_range(DRIFT_FRACTION_MIN..=DRIFT_FRACTION_MAX);
                let signed = if rng.gen_bool(0.5) { fraction } else { -fraction };
                ParamValue::Float(self.current.clamp(v * (1.0 + signed)))
            }
            ParamValue::Int(v) => {
                let step = DISCRETE_STEPS.choose(rng).copied().unwrap_or(1);
                ParamValue::Int(self.current.clamp_discrete(v.saturating_add(step)))
            }
        };
    }

    /// Replaces the allowed band with `range` (clipped to the absolute limits)
    /// and pulls the value inside it.
    pub(crate) fn constrain(&mut self, range: Range) {
        self.current = range.clip_to(self.absolute);
        self.clamp_value();
    }

    /// Returns to the normal band with the value snapped to its midpoint.
    pub(crate) fn restore(&mut self) {
        self.current = self.normal;
        let target = self.normal.midpoint();
        self.value = match self.value {
            ParamValue::Float(_) => ParamValue::Float((target * 10.0).round() / 10.0),
            ParamValue::Int(_) => ParamValue::Int(target.round() as i64),
        };
    }

    fn clamp_value(&mut self) {
        self.value = match self.value {
            ParamValue::Float(v) => ParamValue::Float(self.current.clamp(v)),
            ParamValue::Int(v) => ParamValue::Int(self.current.clamp_discrete(v)),
        };
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Borrow<str> for Parameter {
    fn borrow(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::make_rng;
    use std::collections::HashSet;

    fn temperature() -> Parameter {
        Parameter::continuous("Temperature", (20.0, 120.0), (40.0, 70.0), 65.0)
    }

    fn counter() -> Parameter {
        Parameter::discrete("On/Off Counter", (0, 100), (0, 10), 5)
    }

    #[test]
    fn range_orders_its_bounds() {
        let range = Range::new(9.0, 6.0);
        assert!((range.min() - 6.0).abs() < 1e-9);
        assert!((range.max() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn clip_to_never_leaves_bounds() {
        let bounds = Range::new(0.0, 100.0);
        let clipped = Range::new(-20.0, 150.0).clip_to(bounds);
        assert!(bounds.contains_range(clipped));
        let disjoint = Range::new(200.0, 300.0).clip_to(bounds);
        assert!(bounds.contains_range(disjoint));
    }

    #[test]
    fn straddling_band_overlaps_without_being_contained() {
        let normal = Range::new(40.0, 80.0);
        let abnormal = Range::new(75.0, 120.0);
        assert!(!normal.contains_range(abnormal));
        assert!(normal.overlaps(abnormal));
        assert!(normal.contains(abnormal.min()));

        assert!(!normal.overlaps(Range::new(80.1, 120.0)));
        assert!(normal.overlaps(Range::new(80.0, 120.0)));
    }

    #[test]
    fn continuous_drift_stays_in_current_range() {
        let mut rng = make_rng();
        let mut param = temperature();
        for _ in 0..1_000 {
            param.drift(&mut rng);
            assert!(param.current().contains(param.value().as_f64()));
        }
    }

    #[test]
    fn continuous_drift_moves_between_five_and_ten_percent() {
        let mut rng = make_rng();
        let mut param = Parameter::continuous("Current", (0.0, 1_000.0), (0.0, 1_000.0), 100.0);
        for _ in 0..200 {
            let before = param.value().as_f64();
            param.drift(&mut rng);
            let delta = (param.value().as_f64() - before).abs() / before;
            assert!(
                (DRIFT_FRACTION_MIN - 1e-9..=DRIFT_FRACTION_MAX + 1e-9).contains(&delta),
                "relative change {delta} outside 5–10%"
            );
            param.restore();
        }
    }

    #[test]
    fn discrete_drift_steps_and_stays_in_range() {
        let mut rng = make_rng();
        let mut param = counter();
        for _ in 0..1_000 {
            let before = match param.value() {
                ParamValue::Int(v) => v,
                ParamValue::Float(_) => panic!("counter must stay discrete"),
            };
            param.drift(&mut rng);
            let ParamValue::Int(after) = param.value() else {
                panic!("counter must stay discrete");
            };
            assert!((0..=10).contains(&after));
            assert!((after - before).abs() <= 2);
        }
    }

    #[test]
    fn discrete_clamp_survives_integerless_range() {
        let mut param = Parameter::discrete("Rpm", (0, 10), (0, 10), 5);
        param.constrain(Range::new(3.2, 3.8));
        let mut rng = make_rng();
        param.drift(&mut rng);
        assert_eq!(param.value(), ParamValue::Int(4));
    }

    #[test]
    fn constrain_clips_to_absolute_and_pulls_value_in() {
        let mut param = temperature();
        param.constrain(Range::new(80.0, 500.0));
        assert!((param.current().max() - 120.0).abs() < 1e-9);
        assert!(param.current().contains(param.value().as_f64()));
        assert!(param.is_constrained());
    }

    #[test]
    fn restore_snaps_to_rounded_midpoint() {
        let mut param = Parameter::continuous("Vibro", (0.0, 10.0), (0.5, 3.0), 2.0);
        param.constrain(Range::new(3.1, 10.0));
        param.restore();
        assert_eq!(param.current(), param.normal());
        assert_eq!(param.value(), ParamValue::Float(1.8));

        let mut count = Parameter::discrete("Oil Level", (0, 100), (60, 91), 85);
        count.constrain(Range::new(0.0, 59.0));
        count.restore();
        assert_eq!(count.value(), ParamValue::Int(76));
    }

    #[test]
    fn identity_is_the_name() {
        let mut other = temperature();
        other.constrain(Range::new(90.0, 100.0));
        assert_eq!(temperature(), other);

        let set: HashSet<Parameter> = [temperature(), other, counter()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Temperature"));
    }

    #[test]
    fn values_format_with_natural_precision() {
        assert_eq!(ParamValue::Float(65.04).to_string(), "65.0");
        assert_eq!(ParamValue::Int(1350).to_string(), "1350");
    }
}
