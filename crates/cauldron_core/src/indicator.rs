use bevy_math::Vec2;
use tracing::{debug, warn};

use crate::event::WorkbenchEvent;
use crate::input::PointerSample;
use crate::item::ImageRef;

/// How the canvas hosting the indicator reaches the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasMode {
    /// Composited straight onto the screen; local space is derived from
    /// screen pixels alone.
    ScreenOverlay,
    /// Placed relative to the camera; local space is derived from the pointer's
    /// world projection.
    CameraRelative,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub mode: CanvasMode,
    /// Screen rect origin for overlays, world position for camera-relative
    /// canvases.
    pub origin: Vec2,
    pub size: Vec2,
    /// Normalised pivot within `size`; local coordinates are relative to it.
    pub pivot: Vec2,
    pub scale: f32,
}

impl Canvas {
    /// Overlay whose local space equals screen pixels.
    pub fn screen_overlay(size: Vec2) -> Self {
        Self {
            mode: CanvasMode::ScreenOverlay,
            origin: Vec2::ZERO,
            size,
            pivot: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn camera_relative(origin: Vec2, size: Vec2, scale: f32) -> Self {
        Self {
            mode: CanvasMode::CameraRelative,
            origin,
            size,
            pivot: Vec2::splat(0.5),
            scale,
        }
    }

    /// Projects the pointer into canvas-local space. `None` when the canvas
    /// needs a world projection the host could not provide.
    pub fn pointer_to_local(&self, pointer: &PointerSample) -> Option<Vec2> {
        if self.scale <= 0.0 {
            return None;
        }
        match self.mode {
            CanvasMode::ScreenOverlay => {
                let pivot = self.origin + self.size * self.pivot;
                Some((pointer.screen - pivot) / self.scale)
            }
            CanvasMode::CameraRelative => {
                let world = pointer.world?;
                Some((world - self.origin) / self.scale)
            }
        }
    }
}

/// Sprite that follows the pointer during an inventory drag.
#[derive(Debug, Default)]
pub struct DragIndicator {
    canvas: Option<Canvas>,
    image: Option<ImageRef>,
    position: Option<Vec2>,
}

impl DragIndicator {
    pub fn new(canvas: Option<Canvas>) -> Self {
        Self {
            canvas,
            image: None,
            position: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Returns false, leaving the indicator hidden, when no canvas is wired.
    pub fn show(
        &mut self,
        image: ImageRef,
        pointer: &PointerSample,
        events: &mut Vec<WorkbenchEvent>,
    ) -> bool {
        let Some(canvas) = self.canvas else {
            warn!(target: "cauldron.indicator", "no canvas to show drag indicator on");
            return false;
        };
        self.position = canvas.pointer_to_local(pointer);
        debug!(target: "cauldron.indicator", image = image.as_str(), "indicator shown");
        events.push(WorkbenchEvent::IndicatorShown {
            image: image.clone(),
            position: self.position,
        });
        self.image = Some(image);
        true
    }

    pub fn follow(&mut self, pointer: &PointerSample, events: &mut Vec<WorkbenchEvent>) {
        if !self.is_visible() {
            return;
        }
        let Some(local) = self.canvas.and_then(|c| c.pointer_to_local(pointer)) else {
            return;
        };
        if self.position != Some(local) {
            self.position = Some(local);
            events.push(WorkbenchEvent::IndicatorMoved { position: local });
        }
    }

    pub fn hide(&mut self, events: &mut Vec<WorkbenchEvent>) {
        if self.image.take().is_some() {
            self.position = None;
            events.push(WorkbenchEvent::IndicatorHidden);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(screen: Vec2, world: Option<Vec2>) -> PointerSample {
        PointerSample {
            screen,
            world,
            ..Default::default()
        }
    }

    #[test]
    fn overlay_projection_uses_pivot_and_scale() {
        let mut canvas = Canvas::screen_overlay(Vec2::new(800.0, 600.0));
        canvas.pivot = Vec2::splat(0.5);
        canvas.scale = 2.0;
        let local = canvas.pointer_to_local(&pointer(Vec2::new(500.0, 300.0), None));
        assert_eq!(local, Some(Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn camera_projection_needs_world_point() {
        let canvas = Canvas::camera_relative(Vec2::new(10.0, 10.0), Vec2::splat(100.0), 1.0);
        assert_eq!(canvas.pointer_to_local(&pointer(Vec2::ZERO, None)), None);
        assert_eq!(
            canvas.pointer_to_local(&pointer(Vec2::ZERO, Some(Vec2::new(15.0, 5.0)))),
            Some(Vec2::new(5.0, -5.0))
        );
    }

    #[test]
    fn indicator_without_canvas_stays_hidden() {
        let mut events = Vec::new();
        let mut indicator = DragIndicator::new(None);
        let shown = indicator.show(ImageRef::new("a.png"), &PointerSample::default(), &mut events);
        assert!(!shown);
        assert!(!indicator.is_visible());
        assert!(events.is_empty());
    }

    #[test]
    fn indicator_follows_and_hides() {
        let mut events = Vec::new();
        let mut indicator = DragIndicator::new(Some(Canvas::screen_overlay(Vec2::splat(100.0))));
        indicator.show(ImageRef::new("a.png"), &pointer(Vec2::ONE, None), &mut events);
        indicator.follow(&pointer(Vec2::new(4.0, 2.0), None), &mut events);
        assert_eq!(indicator.position(), Some(Vec2::new(4.0, 2.0)));
        indicator.hide(&mut events);
        indicator.hide(&mut events);
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == WorkbenchEvent::IndicatorHidden)
                .count(),
            1
        );
    }
}
