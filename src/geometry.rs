//! Rotation of pattern offsets and the rounding back onto the integer grid.
//!
//! Any rigid rotation can orient a pattern: glam quaternions and matrices in
//! single or double precision, or one of the 24 exact [`CubeRotation`]s.
//! The rotated offset is rounded per component with ties going to the even
//! integer, so `0.5` lands on `0` and `1.5` on `2`.

use glam::{DMat3, DQuat, DVec3, IVec3, Mat3, Quat};

use crate::pattern::Pattern;

/// A rotation that can be applied to an integer pattern offset.
pub trait Rotate {
    /// Rotates `offset` about the pattern origin.
    fn rotate(&self, offset: IVec3) -> DVec3;
}

impl Rotate for Quat {
    fn rotate(&self, offset: IVec3) -> DVec3 {
        (*self * offset.as_vec3()).as_dvec3()
    }
}

impl Rotate for DQuat {
    fn rotate(&self, offset: IVec3) -> DVec3 {
        *self * offset.as_dvec3()
    }
}

impl Rotate for Mat3 {
    fn rotate(&self, offset: IVec3) -> DVec3 {
        (*self * offset.as_vec3()).as_dvec3()
    }
}

impl Rotate for DMat3 {
    fn rotate(&self, offset: IVec3) -> DVec3 {
        *self * offset.as_dvec3()
    }
}

impl Rotate for CubeRotation {
    fn rotate(&self, offset: IVec3) -> DVec3 {
        self.apply(offset).as_dvec3()
    }
}

/// Rounds a rotated offset to grid units, ties to even.
///
/// Out-of-range components saturate and NaN maps to `i32::MIN`, so a
/// non-finite rotation never rounds onto the anchor.
#[inline]
pub fn round_to_index(rotated: DVec3) -> IVec3 {
    IVec3::new(
        round_component(rotated.x),
        round_component(rotated.y),
        round_component(rotated.z),
    )
}

#[inline]
fn round_component(value: f64) -> i32 {
    if value.is_nan() {
        i32::MIN
    } else {
        value.round_ties_even() as i32
    }
}

/// Builds a rotation from Euler angles in degrees.
///
/// Applied to a vector the rotation turns it about Z first, then X, then Y.
pub fn euler_degrees(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_rotation_y(y.to_radians())
        * Quat::from_rotation_x(x.to_radians())
        * Quat::from_rotation_z(z.to_radians())
}

/// Euler rotation with a whole number of quarter turns on each axis.
pub fn quarter_turns(x: i32, y: i32, z: i32) -> Quat {
    euler_degrees(x as f32 * 90.0, y as f32 * 90.0, z as f32 * 90.0)
}

/// All 24 rotation functions for a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
const ROTATIONS: [fn(IVec3) -> IVec3; 24] = [
    // +Z face up, rotate around Z axis
    |v| IVec3::new(v.x, v.y, v.z),
    |v| IVec3::new(-v.y, v.x, v.z),
    |v| IVec3::new(-v.x, -v.y, v.z),
    |v| IVec3::new(v.y, -v.x, v.z),
    // +Y face up
    |v| IVec3::new(v.x, -v.z, v.y),
    |v| IVec3::new(v.z, v.x, v.y),
    |v| IVec3::new(-v.x, v.z, v.y),
    |v| IVec3::new(-v.z, -v.x, v.y),
    // -Z face up
    |v| IVec3::new(v.x, -v.y, -v.z),
    |v| IVec3::new(v.y, v.x, -v.z),
    |v| IVec3::new(-v.x, v.y, -v.z),
    |v| IVec3::new(-v.y, -v.x, -v.z),
    // -Y face up
    |v| IVec3::new(v.x, v.z, -v.y),
    |v| IVec3::new(-v.z, v.x, -v.y),
    |v| IVec3::new(-v.x, -v.z, -v.y),
    |v| IVec3::new(v.z, -v.x, -v.y),
    // +X face up
    |v| IVec3::new(v.z, v.y, -v.x),
    |v| IVec3::new(-v.y, v.z, -v.x),
    |v| IVec3::new(-v.z, -v.y, -v.x),
    |v| IVec3::new(v.y, -v.z, -v.x),
    // -X face up
    |v| IVec3::new(-v.z, v.y, v.x),
    |v| IVec3::new(-v.y, -v.z, v.x),
    |v| IVec3::new(v.z, -v.y, v.x),
    |v| IVec3::new(v.y, v.z, v.x),
];

/// One of the 24 axis-aligned orientations of a cube.
///
/// Applies exactly in integers, so no rounding is ever involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeRotation(u8);

impl CubeRotation {
    pub const IDENTITY: Self = Self(0);

    /// Every cube rotation, identity first.
    pub const ALL: [Self; 24] = {
        let mut all = [Self(0); 24];
        let mut i = 0;
        while i < 24 {
            all[i] = Self(i as u8);
            i += 1;
        }
        all
    };

    /// Returns the rotation at `index` in [`CubeRotation::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn apply(self, offset: IVec3) -> IVec3 {
        ROTATIONS[self.0 as usize](offset)
    }

    /// The same rotation as a quaternion.
    pub fn to_quat(self) -> Quat {
        let matrix = Mat3::from_cols(
            self.apply(IVec3::X).as_vec3(),
            self.apply(IVec3::Y).as_vec3(),
            self.apply(IVec3::Z).as_vec3(),
        );
        Quat::from_mat3(&matrix)
    }
}

/// Generates all unique orientations of a pattern.
///
/// Applies all 24 rotations, normalizes each result so that the minimum
/// coordinates are at the origin, then removes duplicates. Symmetric
/// patterns have fewer than 24 unique orientations.
pub fn all_orientations(pattern: &Pattern) -> Vec<Pattern> {
    let mut orientations: Vec<Vec<[i32; 3]>> = CubeRotation::ALL
        .iter()
        .map(|rotation| {
            let rotated: Vec<IVec3> = pattern.iter().map(|&offset| rotation.apply(offset)).collect();
            let mut keys: Vec<[i32; 3]> = normalize_to_origin(rotated)
                .into_iter()
                .map(|offset| offset.to_array())
                .collect();
            keys.sort_unstable();
            keys
        })
        .collect();

    // symmetric patterns produce duplicates
    orientations.sort();
    orientations.dedup();
    orientations
        .into_iter()
        .map(|keys| keys.into_iter().map(IVec3::from_array).collect())
        .collect()
}

/// Translates offsets so the minimum x, y, z values are all zero.
fn normalize_to_origin(mut offsets: Vec<IVec3>) -> Vec<IVec3> {
    let Some(min) = offsets.iter().copied().reduce(IVec3::min) else {
        return offsets;
    };
    for offset in &mut offsets {
        *offset -= min;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_round_ties_go_to_even() {
        assert_eq!(round_to_index(DVec3::new(0.5, 1.5, 2.5)), IVec3::new(0, 2, 2));
        assert_eq!(round_to_index(DVec3::new(-0.5, -1.5, -2.5)), IVec3::new(0, -2, -2));
        assert_eq!(round_to_index(DVec3::new(0.49, 0.51, -0.51)), IVec3::new(0, 1, -1));
    }

    #[test]
    fn test_round_non_finite_stays_off_grid() {
        let rounded = round_to_index(DVec3::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(rounded, IVec3::new(i32::MIN, i32::MAX, i32::MIN));
    }

    #[test]
    fn test_cube_rotations_are_distinct_and_proper() {
        let probe = IVec3::new(1, 2, 3);
        let mut images: Vec<[i32; 3]> = CubeRotation::ALL
            .iter()
            .map(|rotation| rotation.apply(probe).to_array())
            .collect();
        images.sort_unstable();
        images.dedup();
        assert_eq!(images.len(), 24, "Every cube rotation should move the probe differently");

        for rotation in CubeRotation::ALL {
            let x = rotation.apply(IVec3::X);
            let y = rotation.apply(IVec3::Y);
            let z = rotation.apply(IVec3::Z);
            assert_eq!(x.cross(y), z, "Rotation {} must preserve handedness", rotation.index());
        }
    }

    #[test]
    fn test_cube_rotation_quat_agrees_with_integer_map() {
        let offset = IVec3::new(2, -1, 3);
        for rotation in CubeRotation::ALL {
            assert_eq!(
                round_to_index(rotation.to_quat().rotate(offset)),
                rotation.apply(offset),
                "Quaternion of rotation {} disagrees",
                rotation.index()
            );
        }
    }

    #[test]
    fn test_quarter_turns_match_axis_rotations() {
        let offset = IVec3::new(1, 2, 3);
        let cases = [
            (quarter_turns(1, 0, 0), Quat::from_rotation_x(FRAC_PI_2)),
            (quarter_turns(0, 2, 0), Quat::from_rotation_y(PI)),
            (quarter_turns(0, 0, 3), Quat::from_rotation_z(3.0 * FRAC_PI_2)),
        ];
        for (euler, axis) in cases {
            assert_eq!(round_to_index(euler.rotate(offset)), round_to_index(axis.rotate(offset)));
        }
    }

    #[test]
    fn test_euler_applies_z_before_x() {
        // z quarter turn takes X to Y, then the x quarter turn takes Y to Z
        let rotation = quarter_turns(1, 0, 1);
        assert_eq!(round_to_index(rotation.rotate(IVec3::X)), IVec3::Z);
    }

    #[test]
    fn test_orientation_counts() {
        let expected = [("tri-v", 12), ("tetra-l", 24), ("tetra-t", 12), ("hexa-l", 24)];
        for (name, count) in expected {
            let pattern = Pattern::named(name).unwrap();
            assert_eq!(all_orientations(&pattern).len(), count, "Orientations of {name}");
        }
    }

    #[test]
    fn test_orientations_are_normalized() {
        let pattern = Pattern::named("tetra-s").unwrap();
        for orientation in all_orientations(&pattern) {
            let (min, _) = orientation.bounds().unwrap();
            assert_eq!(min, IVec3::ZERO);
            assert_eq!(orientation.len(), pattern.len());
        }
    }
}
