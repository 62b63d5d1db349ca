use std::collections::BTreeMap;

use crate::Vec3;

/// Read access to the positions of the entities being moved.
///
/// The navigation core does not own entities; hosts (ECS worlds, game
/// objects, plain maps) expose them through this trait.
pub trait NavWorldView {
    type Entity: Copy;

    /// `None` if the entity no longer exists.
    fn position(&self, entity: Self::Entity) -> Option<Vec3>;
}

pub trait NavWorldMut: NavWorldView {
    fn set_position(&mut self, entity: Self::Entity, position: Vec3);
}

impl<K> NavWorldView for BTreeMap<K, Vec3>
where
    K: Ord + Copy,
{
    type Entity = K;

    fn position(&self, entity: K) -> Option<Vec3> {
        self.get(&entity).copied()
    }
}

impl<K> NavWorldMut for BTreeMap<K, Vec3>
where
    K: Ord + Copy,
{
    fn set_position(&mut self, entity: K, position: Vec3) {
        if let Some(slot) = self.get_mut(&entity) {
            *slot = position;
        }
    }
}
