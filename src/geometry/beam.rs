//! Straight-line patterns: lasers and spin rays
//!
//! Both render as 2-cell curtains. They differ in how terrain affects them:
//! a laser skips occluded samples and continues past them, while a spin ray
//! is cut off at the first solid voxel.

use glam::DVec3;

use super::{curtain, is_open};
use crate::attack::{LaserParams, SpinParams};
use crate::consts::LASER_STEP;
use crate::host::SolidityOracle;
use crate::horizontal_dir;

/// Number of samples along a laser of the given length
///
/// Samples sit at `0, step, 2*step, ...` strictly below `length`. A
/// zero-length laser still gets one sample; a non-finite one gets none.
pub fn laser_sample_count(length: f64) -> usize {
    if !length.is_finite() {
        0
    } else if length <= 0.0 {
        1
    } else {
        (length / LASER_STEP).ceil() as usize
    }
}

/// Laser from `start` to `end`
pub fn laser_points<'a, O>(p: &'a LaserParams, oracle: &'a O) -> impl Iterator<Item = DVec3> + 'a
where
    O: SolidityOracle + ?Sized,
{
    let delta = p.end - p.start;
    let dir = delta.normalize_or_zero();
    let start = p.start;

    (0..laser_sample_count(delta.length()))
        .map(move |i| start + dir * (i as f64 * LASER_STEP))
        .filter(move |&pos| is_open(oracle, pos))
        .flat_map(curtain)
}

/// Rays fanned evenly around the center, starting at `angle_offset` degrees
///
/// Each ray steps one unit at a time from the center (distance 0) up to but
/// not including `max_distance`, and ends at the first solid voxel.
pub fn spin_points<'a, O>(p: &'a SpinParams, oracle: &'a O) -> impl Iterator<Item = DVec3> + 'a
where
    O: SolidityOracle + ?Sized,
{
    let angle_step = 360.0 / p.ray_count as f64;

    (0..p.ray_count).flat_map(move |i| {
        let dir = horizontal_dir((p.angle_offset + i as f64 * angle_step).to_radians());
        (0..p.max_distance)
            .map(move |d| p.center + dir * d as f64)
            .take_while(move |&pos| is_open(oracle, pos))
            .flat_map(curtain)
    })
}
