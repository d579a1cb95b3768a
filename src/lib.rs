//! MusicDodge - client overlay for the rhythm dodge minigame
//!
//! Core modules:
//! - `attack`: Wire format decoding (payload string -> attack descriptors)
//! - `geometry`: Pattern engine (descriptor -> particle positions)
//! - `overlay`: Per-tick orchestration of decoded attacks
//! - `host`: Traits for the game engine collaborators (world, particles, network)
//! - `settings`: Client debug and render options

pub mod attack;
pub mod geometry;
pub mod host;
pub mod overlay;
pub mod settings;

pub use attack::{AttackDescriptor, AttackKind, AttackParameters, AttackPhase, decode};
pub use overlay::{Overlay, TickReport};
pub use settings::ClientSettings;

use glam::{DVec3, IVec3};

/// Game configuration constants
pub mod consts {
    /// Payload channel identifier registered with the host
    pub const CHANNEL_ID: &str = "mce:musicdodge";
    /// Substring identifying the minigame world
    pub const ARENA_MARKER: &str = "musicdodge";

    /// Server ticks per musical beat
    pub const TICKS_PER_BEAT: u32 = 20;

    /// Arena field bounds (world coordinates, inclusive)
    pub const FIELD_MIN_X: i32 = -7;
    pub const FIELD_MAX_X: i32 = 35;
    pub const FIELD_MIN_Z: i32 = -46;
    pub const FIELD_MAX_Z: i32 = -4;
    /// Arena floor height
    pub const FIELD_Y: i32 = -60;
    /// Wall attacks are this many cells tall
    pub const WALL_HEIGHT: i32 = 6;

    /// Distance between laser samples (world units)
    pub const LASER_STEP: f64 = 0.5;
    /// Circle samples per unit of radius
    pub const CIRCLE_SAMPLES_PER_UNIT: f64 = 16.0;
    /// Minimum circle sample count
    pub const CIRCLE_MIN_SAMPLES: usize = 16;
    /// Height of laser and spin curtains (cells)
    pub const CURTAIN_HEIGHT: i32 = 2;
    /// Most samples a single attack may expand to; larger ones render nothing
    pub const MAX_PATTERN_SAMPLES: u64 = 1 << 16;
}

/// Voxel containing a world position
#[inline]
pub fn voxel_at(pos: DVec3) -> IVec3 {
    pos.floor().as_ivec3()
}

/// Unit vector in the horizontal plane for an angle in radians
#[inline]
pub fn horizontal_dir(theta: f64) -> DVec3 {
    DVec3::new(theta.cos(), 0.0, theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_at_floors_negative() {
        assert_eq!(voxel_at(DVec3::new(-0.5, 64.9, 3.0)), IVec3::new(-1, 64, 3));
        assert_eq!(voxel_at(DVec3::new(-7.0, -60.0, -46.0)), IVec3::new(-7, -60, -46));
    }

    #[test]
    fn test_horizontal_dir_is_unit() {
        let d = horizontal_dir(1.234);
        assert!((d.length() - 1.0).abs() < 1e-12);
        assert_eq!(d.y, 0.0);
    }
}
