//! Observation sources that produce trigger notifications.
//!
//! The orchestrator does not know how mounting or visibility is detected.
//! These producers turn page-level facts into [`Observation`]s which are then
//! delivered to it:
//!
//! - [`MountNotifier`] queues elements as they are composed and releases them
//!   on the next frame, so a mount notification is never delivered from
//!   inside `register`.
//! - [`ViewportWatcher`] polls element bounding boxes against the viewport
//!   and reports entry/exit edges.

use std::collections::HashMap;

use crate::clock::Clock;
use crate::descriptor::ElementId;
use crate::orchestrator::{Orchestrator, TriggerOutcome};

/// Axis-aligned bounding box in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether the rectangles meet, counting shared edges. Works for boxes
    /// with zero width or height.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    /// Overlapping region, if the rectangles overlap with positive area
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

/// A trigger-relevant fact about one element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    Mount(ElementId),
    Enter(ElementId),
    Exit(ElementId),
}

impl Observation {
    pub fn id(&self) -> &ElementId {
        match self {
            Observation::Mount(id) | Observation::Enter(id) | Observation::Exit(id) => id,
        }
    }

    /// Hand the observation to the orchestrator
    pub fn deliver<C: Clock>(&self, orchestrator: &mut Orchestrator<C>) -> TriggerOutcome {
        match self {
            Observation::Mount(id) | Observation::Enter(id) => orchestrator.report_trigger(id),
            Observation::Exit(id) => orchestrator.report_exit(id),
        }
    }
}

/// Queue of freshly composed elements awaiting their mount notification
#[derive(Debug, Default)]
pub struct MountNotifier {
    queued: Vec<ElementId>,
}

impl MountNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&mut self, id: impl Into<ElementId>) {
        self.queued.push(id.into());
    }

    /// Forget an element removed before its notification went out
    pub fn cancel(&mut self, id: &ElementId) {
        self.queued.retain(|queued| queued != id);
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Release queued notifications in composition order
    pub fn drain(&mut self) -> Vec<Observation> {
        self.queued.drain(..).map(Observation::Mount).collect()
    }
}

struct Watched {
    bounds: Rect,
    visible: bool,
}

/// Polling intersection observer.
///
/// An element counts as visible once at least `amount` of its area lies
/// inside the viewport. With the default `amount` of `0.0` any overlap is
/// enough.
#[derive(Default)]
pub struct ViewportWatcher {
    watched: HashMap<ElementId, Watched>,
    /// Registration order, so simultaneous entries are reported in it
    order: Vec<ElementId>,
    amount: f32,
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required visible fraction, clamped to `0.0..=1.0`
    pub fn amount(mut self, amount: f32) -> Self {
        self.amount = amount.clamp(0.0, 1.0);
        self
    }

    pub fn watch(&mut self, id: impl Into<ElementId>, bounds: Rect) {
        let id = id.into();
        if self
            .watched
            .insert(
                id.clone(),
                Watched {
                    bounds,
                    visible: false,
                },
            )
            .is_none()
        {
            self.order.push(id);
        }
    }

    pub fn unwatch(&mut self, id: &ElementId) {
        if self.watched.remove(id).is_some() {
            self.order.retain(|watched| watched != id);
        }
    }

    /// Update an element's bounding box after layout moved it
    pub fn set_bounds(&mut self, id: &ElementId, bounds: Rect) {
        if let Some(watched) = self.watched.get_mut(id) {
            watched.bounds = bounds;
        }
    }

    pub fn is_visible(&self, id: &ElementId) -> bool {
        self.watched.get(id).is_some_and(|w| w.visible)
    }

    fn meets_threshold(&self, bounds: &Rect, viewport: &Rect) -> bool {
        // Degenerate boxes (dividers, anchors) have no area to measure
        let area = bounds.area();
        if area <= 0.0 {
            return bounds.touches(viewport);
        }
        let Some(overlap) = bounds.intersection(viewport) else {
            return false;
        };
        overlap.area() / area >= self.amount
    }

    /// Compare every element against `viewport` and report visibility edges
    pub fn poll(&mut self, viewport: Rect) -> Vec<Observation> {
        let mut observations = Vec::new();
        for id in &self.order {
            let Some(watched) = self.watched.get(id) else {
                continue;
            };
            let visible = self.meets_threshold(&watched.bounds, &viewport);
            if visible == watched.visible {
                continue;
            }
            observations.push(if visible {
                Observation::Enter(id.clone())
            } else {
                Observation::Exit(id.clone())
            });
            if let Some(watched) = self.watched.get_mut(id) {
                watched.visible = visible;
            }
        }
        observations
    }
}
