//! Bounds registry and broad-phase query
//!
//! The registry is the single authoritative store of collidable volumes. It
//! is a pure data store: it never moves anything on its own, and every
//! operation on an unknown or removed handle is a silent no-op, since other
//! systems may destroy entities in the middle of a tick.
//!
//! Query results come back in ascending handle order, which is also
//! registration order. Callers that take "the first blocking hit" rely on
//! this.

use crate::foundation::math::Vec3;
use crate::physics::volume::{Volume, VolumeFlags, VolumeId};
use std::collections::{BTreeMap, BTreeSet};

/// Owns every collidable volume plus an optional owner back-reference per
/// volume.
///
/// `O` is whatever the caller needs to map a trigger hit back to its
/// gameplay meaning. The registry only stores it; it never interprets it.
#[derive(Debug, Clone)]
pub struct BoundsRegistry<O = ()> {
    next_id: u64,
    volumes: BTreeMap<VolumeId, Volume>,
    owners: BTreeMap<VolumeId, O>,
    hidden: BTreeSet<VolumeId>,
}

impl<O> Default for BoundsRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> BoundsRegistry<O> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_id: 0,
            volumes: BTreeMap::new(),
            owners: BTreeMap::new(),
            hidden: BTreeSet::new(),
        }
    }

    /// Register a volume and return its new handle
    pub fn register(&mut self, center: Vec3, size: Vec3, flags: VolumeFlags) -> VolumeId {
        let id = VolumeId::from_raw(self.next_id);
        self.next_id += 1;
        self.volumes.insert(id, Volume::new(id, center, size, flags));
        log::trace!("registered volume {id} at {:?} ({:?})", center, flags);
        id
    }

    /// Register a volume that carries an owner back-reference
    pub fn register_owned(&mut self, center: Vec3, size: Vec3, flags: VolumeFlags, owner: O) -> VolumeId {
        let id = self.register(center, size, flags);
        self.owners.insert(id, owner);
        id
    }

    /// Move/resize a volume; unknown handles are ignored
    pub fn update(&mut self, id: VolumeId, center: Vec3, size: Vec3) {
        if let Some(volume) = self.volumes.get_mut(&id) {
            volume.set_bounds(center, size);
        }
    }

    /// Remove a volume and its owner; the handle is dead from now on
    pub fn remove(&mut self, id: VolumeId) {
        if self.volumes.remove(&id).is_some() {
            log::trace!("removed volume {id}");
        }
        self.owners.remove(&id);
        self.hidden.remove(&id);
    }

    /// Current bounds of a volume
    pub fn bounds(&self, id: VolumeId) -> Option<&Volume> {
        self.volumes.get(&id)
    }

    /// Owner back-reference of a volume
    pub fn owner(&self, id: VolumeId) -> Option<&O> {
        self.owners.get(&id)
    }

    /// Whether the handle refers to a live volume (hidden or not)
    pub fn contains(&self, id: VolumeId) -> bool {
        self.volumes.contains_key(&id)
    }

    /// Permanently exclude a volume from queries and rendering.
    ///
    /// The volume keeps its handle and bounds; nothing un-hides it short of
    /// [`BoundsRegistry::clear`].
    pub fn hide(&mut self, id: VolumeId) {
        if self.volumes.contains_key(&id) && self.hidden.insert(id) {
            log::debug!("volume {id} hidden");
        }
    }

    /// Is the volume in the hidden set?
    pub fn is_hidden(&self, id: VolumeId) -> bool {
        self.hidden.contains(&id)
    }

    /// Broad-phase query.
    ///
    /// Builds a probe at `center`/`size` and returns every non-hidden volume
    /// other than `exclude` that overlaps it, in ascending handle order.
    pub fn query(&self, exclude: VolumeId, center: Vec3, size: Vec3) -> Vec<VolumeId> {
        self.query_filtered(exclude, center, size, |_| true)
    }

    /// Broad-phase query keeping only volumes accepted by `filter`
    pub fn query_filtered<F>(&self, exclude: VolumeId, center: Vec3, size: Vec3, mut filter: F) -> Vec<VolumeId>
    where
        F: FnMut(&Volume) -> bool,
    {
        let probe = Volume::probe(center, size);
        self.visible()
            .filter(|(id, volume)| **id != exclude && probe.overlaps(volume) && filter(*volume))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Visible (non-hidden) volumes in handle order
    pub fn iter(&self) -> impl Iterator<Item = &Volume> {
        self.visible().map(|(_, volume)| volume)
    }

    /// Number of live volumes, hidden ones included
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// No live volumes?
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Drop every volume, owner and hidden mark.
    ///
    /// The handle counter keeps counting so handles from before the clear
    /// never alias new volumes.
    pub fn clear(&mut self) {
        self.volumes.clear();
        self.owners.clear();
        self.hidden.clear();
    }

    fn visible(&self) -> impl Iterator<Item = (&VolumeId, &Volume)> {
        self.volumes.iter().filter(|(id, _)| !self.hidden.contains(*id))
    }
}
