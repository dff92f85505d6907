//! Axis-aligned collision volumes

use crate::foundation::math::Vec3;
use std::fmt;

/// Opaque handle of a registered volume.
///
/// Handles are assigned from a monotonically increasing counter and are never
/// handed out twice, so a handle that was removed stays invalid forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeId(u64);

impl VolumeId {
    /// Wrap a raw handle value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Collision semantics of a volume
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VolumeFlags: u8 {
        /// The player character's own volume
        const PLAYER    = 1 << 0;
        /// Blocks only from above while descending
        const ONE_WAY   = 1 << 1;
        /// Disappears a fixed time after being stood on
        const TEMPORARY = 1 << 2;
        /// Overlap events only, never blocks motion
        const TRIGGER   = 1 << 3;
    }
}

/// An axis-aligned box with cached bounds.
///
/// `min`, `max` and `extents` are derived from `center` and `size` and are
/// recomputed together in [`Volume::set_bounds`]; they are never observable in
/// a stale state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    id: Option<VolumeId>,
    center: Vec3,
    size: Vec3,
    extents: Vec3,
    min: Vec3,
    max: Vec3,
    flags: VolumeFlags,
}

impl Volume {
    /// Create a registered volume
    pub(crate) fn new(id: VolumeId, center: Vec3, size: Vec3, flags: VolumeFlags) -> Self {
        let mut volume = Self::probe(center, size);
        volume.id = Some(id);
        volume.flags = flags;
        volume
    }

    /// Create a transient, unregistered volume for overlap tests
    pub fn probe(center: Vec3, size: Vec3) -> Self {
        let mut volume = Self {
            id: None,
            center,
            size,
            extents: Vec3::zeros(),
            min: Vec3::zeros(),
            max: Vec3::zeros(),
            flags: VolumeFlags::empty(),
        };
        volume.set_bounds(center, size);
        volume
    }

    /// Move/resize the volume, recomputing every derived bound
    pub fn set_bounds(&mut self, center: Vec3, size: Vec3) {
        let extents = size * 0.5;
        self.center = center;
        self.size = size;
        self.extents = extents;
        self.min = center - extents;
        self.max = center + extents;
    }

    /// Closed-interval overlap on all three axes.
    ///
    /// Two boxes are disjoint only when one's max is strictly below the
    /// other's min on some axis, so touching faces overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    /// Handle, or `None` for probes
    pub fn id(&self) -> Option<VolumeId> {
        self.id
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Full size
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Half size
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Top surface height
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Collision flags
    pub fn flags(&self) -> VolumeFlags {
        self.flags
    }

    /// Player volume?
    pub fn is_player(&self) -> bool {
        self.flags.contains(VolumeFlags::PLAYER)
    }

    /// One-way platform?
    pub fn is_one_way(&self) -> bool {
        self.flags.contains(VolumeFlags::ONE_WAY)
    }

    /// Temporary platform?
    pub fn is_temporary(&self) -> bool {
        self.flags.contains(VolumeFlags::TEMPORARY)
    }

    /// Trigger volume?
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(VolumeFlags::TRIGGER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_at(x: f32, y: f32) -> Volume {
        Volume::probe(Vec3::new(x, y, 0.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_bounds_follow_center_and_size() {
        let mut volume = Volume::probe(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 1.0, 1.0));
        assert_relative_eq!(volume.min(), Vec3::new(-5.0, -0.5, -0.5));
        assert_relative_eq!(volume.max(), Vec3::new(5.0, 0.5, 0.5));

        volume.set_bounds(Vec3::new(2.0, 4.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(volume.extents(), Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(volume.min(), Vec3::new(1.0, 3.0, -1.0));
        assert_relative_eq!(volume.max(), Vec3::new(3.0, 5.0, 1.0));
        assert_relative_eq!(volume.top(), 5.0);
    }

    #[test]
    fn test_touching_faces_overlap() {
        // a.max.x == 5 == b.min.x
        let a = Volume::probe(Vec3::new(4.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Volume::probe(Vec3::new(5.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(a.max().x, 5.0);
        assert_eq!(b.min().x, 5.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_separated_on_one_axis_is_disjoint() {
        assert!(!unit_at(0.0, 0.0).overlaps(&unit_at(1.01, 0.0)));
        assert!(!unit_at(0.0, 0.0).overlaps(&unit_at(0.0, -1.01)));

        let deep = Volume::probe(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!unit_at(0.0, 0.0).overlaps(&deep));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let samples = [
            unit_at(0.0, 0.0),
            unit_at(1.0, 0.0),
            unit_at(0.5, 0.5),
            unit_at(2.5, 0.0),
            Volume::probe(Vec3::new(0.0, -1.0, 0.0), Vec3::new(10.0, 1.0, 1.0)),
            Volume::probe(Vec3::new(3.0, 3.0, 0.0), Vec3::new(0.5, 6.0, 1.0)),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }

    #[test]
    fn test_flag_accessors() {
        let volume = Volume::new(
            VolumeId::from_raw(3),
            Vec3::zeros(),
            Vec3::new(1.0, 1.0, 1.0),
            VolumeFlags::ONE_WAY | VolumeFlags::TEMPORARY,
        );
        assert_eq!(volume.id(), Some(VolumeId::from_raw(3)));
        assert!(volume.is_one_way());
        assert!(volume.is_temporary());
        assert!(!volume.is_trigger());
        assert!(!volume.is_player());
        assert_eq!(volume.id().map(|id| id.to_string()), Some("#3".to_string()));
    }
}
