//! Result launch: a brewed item rises out of the vessel, decelerating linearly
//! until it stops, then disappears.

use bevy_math::Vec3;

use crate::event::WorkbenchEvent;
use crate::item::Item;

/// Multiplier from the configured move distance to the initial upward speed.
const LAUNCH_SPEED_FACTOR: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaunchId(pub u64);

#[derive(Clone, Debug)]
pub struct Launch {
    pub id: LaunchId,
    pub item: Item,
    pub position: Vec3,
    pub speed: f32,
    deceleration: f32,
}

/// Arena of in-flight launches, advanced once per tick. Launches are
/// independent of each other and of the pot.
#[derive(Debug)]
pub struct Launches {
    initial_speed: f32,
    deceleration: f32,
    next_id: u64,
    active: Vec<Launch>,
}

impl Launches {
    /// A non-positive `duration` stops launches on their first advance.
    pub fn new(move_distance: f32, duration: f32) -> Self {
        let initial_speed = move_distance * LAUNCH_SPEED_FACTOR;
        let deceleration = if duration > 0.0 {
            initial_speed / duration
        } else {
            f32::INFINITY
        };
        Self {
            initial_speed,
            deceleration,
            next_id: 0,
            active: Vec::new(),
        }
    }

    pub fn start(&mut self, item: Item, position: Vec3, events: &mut Vec<WorkbenchEvent>) -> LaunchId {
        let id = LaunchId(self.next_id);
        self.next_id += 1;
        events.push(WorkbenchEvent::ResultSpawned {
            launch: id,
            item: item.clone(),
            position,
        });
        self.active.push(Launch {
            id,
            item,
            position,
            speed: self.initial_speed,
            deceleration: self.deceleration,
        });
        id
    }

    pub fn advance(&mut self, dt: f32, events: &mut Vec<WorkbenchEvent>) {
        self.active.retain_mut(|launch| {
            launch.position.y += launch.speed * dt;
            launch.speed -= launch.deceleration * dt;
            events.push(WorkbenchEvent::ResultMoved {
                launch: launch.id,
                position: launch.position,
            });
            if launch.speed.is_nan() || launch.speed <= 0.0 {
                events.push(WorkbenchEvent::ResultFinished { launch: launch.id });
                false
            } else {
                true
            }
        });
    }

    /// Drops a launch whose visual was destroyed by the host.
    pub fn cancel(&mut self, id: LaunchId) -> bool {
        let before = self.active.len();
        self.active.retain(|launch| launch.id != id);
        self.active.len() != before
    }

    pub fn get(&self, id: LaunchId) -> Option<&Launch> {
        self.active.iter().find(|launch| launch.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Launch> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
