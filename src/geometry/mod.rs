//! Pattern geometry engine
//!
//! Expands attack parameters into particle positions. Everything here is a
//! pure function of the parameters and the solidity oracle:
//! - No randomness, identical inputs give identical point sequences
//! - Points are produced lazily, nothing is buffered
//! - A sample whose voxel is solid is skipped (spin rays stop instead)
//! - Attacks needing more than `MAX_PATTERN_SAMPLES` samples render nothing

pub mod beam;
pub mod ring;
pub mod wall;

pub use beam::{laser_points, laser_sample_count, spin_points};
pub use ring::{circle_points, circle_sample_count, square_border, square_ring_points};
pub use wall::wall_points;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::attack::{AttackParameters, AttackPhase};
use crate::consts::{
    CURTAIN_HEIGHT, FIELD_MAX_X, FIELD_MAX_Z, FIELD_MIN_X, FIELD_MIN_Z, MAX_PATTERN_SAMPLES,
    WALL_HEIGHT,
};
use crate::host::SolidityOracle;
use crate::voxel_at;

/// Base particle intensity for every phase
pub const BASE_INTENSITY: f32 = 1.0;

/// Dust particle appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dust {
    /// Packed 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
}

impl Dust {
    /// Neutral gray for warnings
    pub const ALERT: Dust = Dust {
        color: 0x808080,
        intensity: BASE_INTENSITY,
    };
    /// Red for live hazards
    pub const ATTACK: Dust = Dust {
        color: 0xFF0000,
        intensity: BASE_INTENSITY,
    };

    pub fn for_phase(phase: AttackPhase) -> Self {
        match phase {
            AttackPhase::Alert => Self::ALERT,
            AttackPhase::Attack => Self::ATTACK,
        }
    }

    /// Same color with intensity multiplied by `scale`
    pub fn scaled(self, scale: f32) -> Self {
        Self {
            intensity: self.intensity * scale,
            ..self
        }
    }
}

/// Upper bound on the samples (solidity queries) an attack expands to
///
/// Computed from the parameters alone, without walking the pattern.
pub fn pattern_samples(params: &AttackParameters) -> u64 {
    match params {
        AttackParameters::Laser(p) => laser_sample_count((p.end - p.start).length()) as u64,
        AttackParameters::SquareRing(p) => {
            let inner = u128::from(p.inner_radius.max(0).unsigned_abs());
            let Ok(outer) = u128::try_from(p.outer_radius) else {
                return 0;
            };
            if outer < inner {
                return 0;
            }
            // Border r has 8r cells, r == 0 has 2
            let up_to = |r: u128| 4 * r * (r + 1);
            let mut total = up_to(outer) - if inner > 0 { up_to(inner - 1) } else { 0 };
            if inner == 0 {
                total += 2;
            }
            u64::try_from(total).unwrap_or(u64::MAX)
        }
        AttackParameters::Spin(p) => {
            u64::from(p.ray_count.max(0).unsigned_abs())
                * u64::from(p.max_distance.max(0).unsigned_abs())
        }
        AttackParameters::Circle(p) if p.radius.is_finite() => {
            circle_sample_count(p.radius) as u64
        }
        AttackParameters::Circle(_) => 0,
        AttackParameters::Wall(_) => {
            let span = (FIELD_MAX_X - FIELD_MIN_X).max(FIELD_MAX_Z - FIELD_MIN_Z) + 1;
            (span * WALL_HEIGHT) as u64
        }
    }
}

/// Whether an attack is small enough to render
pub fn within_budget(params: &AttackParameters) -> bool {
    pattern_samples(params) <= MAX_PATTERN_SAMPLES
}

/// All particle positions for one attack, in emission order
///
/// Oversized attacks (see [`within_budget`]) yield nothing.
pub fn generate<'a, O>(
    params: &'a AttackParameters,
    oracle: &'a O,
) -> Box<dyn Iterator<Item = DVec3> + 'a>
where
    O: SolidityOracle + ?Sized,
{
    if !within_budget(params) {
        return Box::new(std::iter::empty());
    }

    match params {
        AttackParameters::Laser(p) => Box::new(laser_points(p, oracle)),
        AttackParameters::SquareRing(p) => Box::new(square_ring_points(p, oracle)),
        AttackParameters::Spin(p) => Box::new(spin_points(p, oracle)),
        AttackParameters::Circle(p) => Box::new(circle_points(p, oracle)),
        AttackParameters::Wall(p) => Box::new(wall_points(p, oracle)),
    }
}

/// Whether the voxel containing `pos` is open
#[inline]
fn is_open<O: SolidityOracle + ?Sized>(oracle: &O, pos: DVec3) -> bool {
    !oracle.is_solid(voxel_at(pos))
}

/// A base position and the cells stacked above it (2-high curtain)
#[inline]
fn curtain(base: DVec3) -> impl Iterator<Item = DVec3> {
    (0..CURTAIN_HEIGHT).map(move |dy| base + DVec3::Y * dy as f64)
}
