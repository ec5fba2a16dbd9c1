use bevy_math::{Rect, Vec2, Vec3};

use crate::geometry::bounds_at;
use crate::item::Item;

/// Draw order for objects resting in front of the vessel.
pub const DRAW_ORDER_FRONT: i32 = 1;
/// Draw order for objects deposited inside the vessel.
pub const DRAW_ORDER_BEHIND: i32 = -1;

/// Stable handle a host assigns to each world object it registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// A world object the pointer can hit. Objects carrying the ingredient tag are
/// draggable and hold the item they contribute to the pot.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: EntityId,
    pub tag: String,
    pub item: Option<Item>,
    pub position: Vec3,
    pub size: Vec2,
    pub movement_allowed: bool,
    pub draw_order: i32,
}

impl SceneObject {
    pub fn new(id: EntityId, tag: impl Into<String>, position: Vec3, size: Vec2) -> Self {
        Self {
            id,
            tag: tag.into(),
            item: None,
            position,
            size,
            movement_allowed: true,
            draw_order: DRAW_ORDER_FRONT,
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn bounds(&self) -> Rect {
        bounds_at(self.position.truncate(), self.size)
    }
}

/// Arena of every world object the workbench knows about.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Registers or replaces the object with the same id.
    pub fn insert(&mut self, object: SceneObject) {
        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => *existing = object,
            None => self.objects.push(object),
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Topmost object under `point`: highest draw order, then highest z, then
    /// the most recently registered.
    pub fn pick(&self, point: Vec2) -> Option<&SceneObject> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.bounds().contains(point))
            .max_by(|(ia, a), (ib, b)| {
                a.draw_order
                    .cmp(&b.draw_order)
                    .then(a.position.z.total_cmp(&b.position.z))
                    .then(ia.cmp(ib))
            })
            .map(|(_, o)| o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(id: u64, x: f32) -> SceneObject {
        SceneObject::new(EntityId(id), "Ingredient", Vec3::new(x, 0.0, 0.0), Vec2::splat(10.0))
    }

    #[test]
    fn pick_prefers_higher_draw_order() {
        let mut scene = Scene::default();
        let mut low = object(1, 0.0);
        low.draw_order = DRAW_ORDER_BEHIND;
        scene.insert(low);
        scene.insert(object(2, 2.0));
        assert_eq!(scene.pick(Vec2::new(1.0, 0.0)).map(|o| o.id), Some(EntityId(2)));
        assert_eq!(scene.pick(Vec2::new(-4.0, 0.0)).map(|o| o.id), Some(EntityId(1)));
        assert!(scene.pick(Vec2::new(50.0, 0.0)).is_none());
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut scene = Scene::default();
        scene.insert(object(1, 0.0));
        scene.insert(object(1, 5.0));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).map(|o| o.position.x), Some(5.0));
    }
}
