//! Wall attacks: full-height sheets across the arena
//!
//! Walls are positioned relative to the fixed arena field, not to anything in
//! the payload other than the offset.

use glam::DVec3;

use super::is_open;
use crate::attack::{WallAxis, WallParams};
use crate::consts::{FIELD_MAX_X, FIELD_MAX_Z, FIELD_MIN_X, FIELD_MIN_Z, FIELD_Y, WALL_HEIGHT};
use crate::host::SolidityOracle;

/// Cells of a wall sheet, swept along the field then up the wall height
///
/// - `x`: sheet at `X = FIELD_MIN_X + position`, spanning the field's Z range
/// - `y`/`z`: sheet at `Z = FIELD_MIN_Z + position`, spanning the X range
/// - anything else: empty
pub fn wall_points<'a, O>(p: &'a WallParams, oracle: &'a O) -> impl Iterator<Item = DVec3> + 'a
where
    O: SolidityOracle + ?Sized,
{
    let sheet = p.axis().map(|axis| {
        let (sweep, plane) = match axis {
            WallAxis::X => (FIELD_MIN_Z..=FIELD_MAX_Z, FIELD_MIN_X as f64 + p.position),
            WallAxis::Z => (FIELD_MIN_X..=FIELD_MAX_X, FIELD_MIN_Z as f64 + p.position),
        };
        sweep.flat_map(move |s| {
            (0..WALL_HEIGHT).map(move |dy| {
                let y = (FIELD_Y + dy) as f64;
                match axis {
                    WallAxis::X => DVec3::new(plane, y, s as f64),
                    WallAxis::Z => DVec3::new(s as f64, y, plane),
                }
            })
        })
    });

    sheet
        .into_iter()
        .flatten()
        .filter(move |&pos| is_open(oracle, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    fn open(_: IVec3) -> bool {
        false
    }

    fn wall(axis: &str, position: f64) -> WallParams {
        WallParams {
            axis: axis.to_string(),
            position,
        }
    }

    #[test]
    fn test_wall_x_sheet() {
        let pts: Vec<DVec3> = wall_points(&wall("x", 10.0), &open).collect();
        let depth = (FIELD_MAX_Z - FIELD_MIN_Z + 1) as usize;
        assert_eq!(pts.len(), depth * WALL_HEIGHT as usize);
        assert!(pts.iter().all(|p| p.x == 3.0));
        assert_eq!(pts[0], DVec3::new(3.0, -60.0, -46.0));
        assert_eq!(pts[5], DVec3::new(3.0, -55.0, -46.0));
        assert_eq!(pts.last().copied(), Some(DVec3::new(3.0, -55.0, -4.0)));
    }

    #[test]
    fn test_wall_y_and_z_are_the_same_sheet() {
        let y: Vec<DVec3> = wall_points(&wall("y", 4.5), &open).collect();
        let z: Vec<DVec3> = wall_points(&wall("z", 4.5), &open).collect();
        assert_eq!(y, z);
        assert_eq!(y.len(), (FIELD_MAX_X - FIELD_MIN_X + 1) as usize * 6);
        assert!(y.iter().all(|p| p.z == -41.5));
        assert_eq!(y[0].x, -7.0);
    }

    #[test]
    fn test_wall_unknown_axis_is_empty() {
        assert_eq!(wall_points(&wall("X", 1.0), &open).count(), 0);
        assert_eq!(wall_points(&wall("", 1.0), &open).count(), 0);
    }

    #[test]
    fn test_wall_occlusion_per_cell() {
        // Floor layer solid: the bottom row of the wall disappears
        let floor = |v: IVec3| v.y <= FIELD_Y;
        let pts: Vec<DVec3> = wall_points(&wall("x", 0.0), &floor).collect();
        assert_eq!(pts.len(), 43 * 5);
        assert!(pts.iter().all(|p| p.y > FIELD_Y as f64));
    }
}
