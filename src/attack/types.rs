//! Attack descriptor types
//!
//! Descriptors are immutable values: every network update replaces the whole
//! set, nothing is patched in place.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_BEAT;

/// Attack pattern kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Straight beam between two points
    Laser,
    /// Concentric square borders
    SquareRing,
    /// Rays radiating from a center, blocked by terrain
    Spin,
    /// Horizontal circle
    Circle,
    /// Full-height sheet across the arena
    Wall,
}

impl AttackKind {
    pub const ALL: [AttackKind; 5] = [
        AttackKind::Laser,
        AttackKind::SquareRing,
        AttackKind::Spin,
        AttackKind::Circle,
        AttackKind::Wall,
    ];

    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackKind::Laser => "LASER",
            AttackKind::SquareRing => "SQUARE_RING",
            AttackKind::Spin => "SPIN",
            AttackKind::Circle => "CIRCLE",
            AttackKind::Wall => "WALL",
        }
    }

    /// Parse a wire token (case-sensitive)
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "LASER" => Some(AttackKind::Laser),
            "SQUARE_RING" => Some(AttackKind::SquareRing),
            "SPIN" => Some(AttackKind::Spin),
            "CIRCLE" => Some(AttackKind::Circle),
            "WALL" => Some(AttackKind::Wall),
            _ => None,
        }
    }

    /// Number of comma-separated parameters this kind carries on the wire
    pub fn param_count(&self) -> usize {
        match self {
            AttackKind::Laser => 6,
            AttackKind::SquareRing => 5,
            AttackKind::Spin => 6,
            AttackKind::Circle => 4,
            AttackKind::Wall => 2,
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering phase of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Warning preview, harmless (gray)
    Alert,
    /// Live hazard (red)
    Attack,
}

impl AttackPhase {
    /// Color token the server uses for alerts
    pub const ALERT_TOKEN: &'static str = "GRAY";

    /// `GRAY` is an alert, every other color is a live attack
    pub fn from_color_token(token: &str) -> Self {
        if token == Self::ALERT_TOKEN {
            AttackPhase::Alert
        } else {
            AttackPhase::Attack
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserParams {
    pub start: DVec3,
    pub end: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquareRingParams {
    pub center: DVec3,
    pub inner_radius: i32,
    pub outer_radius: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinParams {
    pub center: DVec3,
    pub ray_count: i32,
    /// Rotation of the first ray (degrees)
    pub angle_offset: f64,
    pub max_distance: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleParams {
    pub center: DVec3,
    pub radius: f64,
}

/// Orientation of a wall sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallAxis {
    /// Sheet perpendicular to X, sweeping Z
    X,
    /// Sheet perpendicular to Z, sweeping X
    Z,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallParams {
    /// Raw axis token as sent by the server
    pub axis: String,
    /// Offset from the arena minimum along the axis
    pub position: f64,
}

impl WallParams {
    /// `x` is a sheet across X; `y` and `z` both mean a sheet across Z.
    /// Anything else has no orientation and renders nothing.
    pub fn axis(&self) -> Option<WallAxis> {
        match self.axis.as_str() {
            "x" => Some(WallAxis::X),
            "y" | "z" => Some(WallAxis::Z),
            _ => None,
        }
    }
}

/// Geometry of an attack, one shape per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttackParameters {
    Laser(LaserParams),
    SquareRing(SquareRingParams),
    Spin(SpinParams),
    Circle(CircleParams),
    Wall(WallParams),
}

impl AttackParameters {
    pub fn kind(&self) -> AttackKind {
        match self {
            AttackParameters::Laser(_) => AttackKind::Laser,
            AttackParameters::SquareRing(_) => AttackKind::SquareRing,
            AttackParameters::Spin(_) => AttackKind::Spin,
            AttackParameters::Circle(_) => AttackKind::Circle,
            AttackParameters::Wall(_) => AttackKind::Wall,
        }
    }
}

fn write_vec(f: &mut fmt::Formatter<'_>, v: DVec3) -> fmt::Result {
    write!(f, "{},{},{}", v.x, v.y, v.z)
}

/// Canonical comma-separated form, matching the wire layout
impl fmt::Display for AttackParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackParameters::Laser(p) => {
                write_vec(f, p.start)?;
                f.write_str(",")?;
                write_vec(f, p.end)
            }
            AttackParameters::SquareRing(p) => {
                write_vec(f, p.center)?;
                write!(f, ",{},{}", p.inner_radius, p.outer_radius)
            }
            AttackParameters::Spin(p) => {
                write_vec(f, p.center)?;
                write!(f, ",{},{},{}", p.ray_count, p.angle_offset, p.max_distance)
            }
            AttackParameters::Circle(p) => {
                write_vec(f, p.center)?;
                write!(f, ",{}", p.radius)
            }
            AttackParameters::Wall(p) => write!(f, "{},{}", p.axis, p.position),
        }
    }
}

/// One decoded attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackDescriptor {
    pub phase: AttackPhase,
    /// Server-side countdown; not enforced on the client
    pub ticks_remaining: u32,
    pub parameters: AttackParameters,
}

impl AttackDescriptor {
    pub fn new(phase: AttackPhase, ticks_remaining: u32, parameters: AttackParameters) -> Self {
        Self {
            phase,
            ticks_remaining,
            parameters,
        }
    }

    /// Kind is always derived from the parameters, so the two cannot disagree
    #[inline]
    pub fn kind(&self) -> AttackKind {
        self.parameters.kind()
    }

    /// Key distinguishing otherwise identical hazards (kind + geometry)
    pub fn identity_key(&self) -> String {
        format!("{}_{}", self.kind(), self.parameters)
    }

    /// Whole beats left before the server retires this attack
    pub fn beats_remaining(&self) -> u32 {
        self.ticks_remaining / TICKS_PER_BEAT
    }
}
