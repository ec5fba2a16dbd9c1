use bevy_math::Vec2;

/// Raw pointer state supplied by the host once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub down: bool,
    /// Screen position, host pixel coordinates.
    pub screen: Vec2,
    /// Screen position projected into the world plane, if the camera could.
    pub world: Option<Vec2>,
    pub over_ui: bool,
}

/// Button edges derived from two consecutive samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
}

impl PointerTracker {
    pub fn update(&mut self, down: bool) -> ButtonEdges {
        let edges = ButtonEdges {
            pressed: down && !self.was_down,
            held: down,
            released: !down && self.was_down,
        };
        self.was_down = down;
        edges
    }
}
