//! Ring patterns: nested square borders and circles
//!
//! Both are single-height outlines at the center's Y level. Occluded samples
//! are skipped individually.

use std::f64::consts::TAU;

use glam::DVec3;

use super::is_open;
use crate::attack::{CircleParams, SquareRingParams};
use crate::consts::{CIRCLE_MIN_SAMPLES, CIRCLE_SAMPLES_PER_UNIT};
use crate::host::SolidityOracle;

/// Offsets `(dx, dz)` of the axis-aligned square border at radius `r`
///
/// Top and bottom edges cover the full `[-r, r]` span including the corners;
/// the left and right edges cover only `(-r, r)`. For `r >= 1` that is `8r`
/// samples; `r == 0` gives the center twice and negative radii give nothing.
pub fn square_border(r: i64) -> impl Iterator<Item = (i64, i64)> {
    let top = (-r..=r).map(move |x| (x, -r));
    let bottom = (-r..=r).map(move |x| (x, r));
    let left = (-r + 1..r).map(move |z| (-r, z));
    let right = (-r + 1..r).map(move |z| (r, z));
    top.chain(bottom).chain(left).chain(right)
}

/// Square borders for every radius from inner to outer (inclusive)
pub fn square_ring_points<'a, O>(
    p: &'a SquareRingParams,
    oracle: &'a O,
) -> impl Iterator<Item = DVec3> + 'a
where
    O: SolidityOracle + ?Sized,
{
    // Negative radii have empty borders, so start the sweep at zero
    let inner = i64::from(p.inner_radius.max(0));
    let outer = i64::from(p.outer_radius);
    let center = p.center;

    (inner..=outer)
        .flat_map(square_border)
        .map(move |(dx, dz)| center + DVec3::new(dx as f64, 0.0, dz as f64))
        .filter(move |&pos| is_open(oracle, pos))
}

/// Angular samples for a circle: 16 per unit of radius, at least 16
pub fn circle_sample_count(radius: f64) -> usize {
    let scaled = (radius * CIRCLE_SAMPLES_PER_UNIT).floor();
    if scaled > CIRCLE_MIN_SAMPLES as f64 {
        scaled as usize
    } else {
        CIRCLE_MIN_SAMPLES
    }
}

/// Horizontal circle around the center; non-finite radii draw nothing
pub fn circle_points<'a, O>(p: &'a CircleParams, oracle: &'a O) -> impl Iterator<Item = DVec3> + 'a
where
    O: SolidityOracle + ?Sized,
{
    let CircleParams { center, radius } = *p;
    let samples = if radius.is_finite() {
        circle_sample_count(radius)
    } else {
        0
    };

    (0..samples)
        .map(move |i| {
            let theta = TAU * i as f64 / samples as f64;
            center + DVec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .filter(move |&pos| is_open(oracle, pos))
}
