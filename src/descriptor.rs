//! Declarative description of how one element reveals itself.
//!
//! A [`RevealDescriptor`] binds an element id to a start state, a target
//! state, the condition that starts the transition and its timing. Stagger
//! across siblings is not a property of the orchestrator: each sibling gets
//! its own `delay_ms`, usually computed with [`Stagger`].
//!
//! ```ignore
//! let stagger = Stagger::new(0.0, 100.0);
//! for (i, feature) in features.iter().enumerate() {
//!     orchestrator.register(
//!         RevealDescriptor::new(format!("feature-{i}"))
//!             .initial(StateSnapshot::from([("opacity", 0.0), ("y", 50.0)]))
//!             .target(StateSnapshot::from([("opacity", 1.0), ("y", 0.0)]))
//!             .trigger(Trigger::OnViewportEnter(ViewportPolicy::once()))
//!             .delay(stagger.delay_for(i)),
//!     )?;
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::animation::{StateSnapshot, TimingFunction, Transition};
use crate::error::{InvalidReason, Result, RevealError};

/// Opaque identifier of a registered element
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Arc<str>);

impl ElementId {
    pub fn new(id: impl AsRef<str>) -> Self {
        ElementId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({:?})", &*self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(Arc::from(id))
    }
}

impl From<&ElementId> for ElementId {
    fn from(id: &ElementId) -> Self {
        id.clone()
    }
}

/// Whether a viewport-triggered reveal replays on every entry.
///
/// There is intentionally no default: each descriptor states it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportPolicy {
    pub once: bool,
}

impl ViewportPolicy {
    /// Reveal on first entry only; the element stays revealed afterwards
    pub const fn once() -> Self {
        Self { once: true }
    }

    /// Reveal on every entry and conceal again on exit
    pub const fn always() -> Self {
        Self { once: false }
    }
}

/// Condition that starts the transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Element became part of the page
    OnMount,
    /// Element's bounding box crossed into the visible viewport
    OnViewportEnter(ViewportPolicy),
}

impl Trigger {
    /// Whether the reveal may only ever run once per registration.
    /// Mount happens once per registration, so mount triggers are once-only.
    pub fn is_once(&self) -> bool {
        match self {
            Trigger::OnMount => true,
            Trigger::OnViewportEnter(policy) => policy.once,
        }
    }
}

/// Animation configuration for one element
#[derive(Clone, Debug)]
pub struct RevealDescriptor {
    pub id: ElementId,
    /// Property values before the trigger fires
    pub initial: StateSnapshot,
    /// Property values once the transition completes
    pub target: StateSnapshot,
    pub trigger: Trigger,
    pub transition: Transition,
}

impl RevealDescriptor {
    /// A mount-triggered descriptor with empty states and the default transition
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            initial: StateSnapshot::new(),
            target: StateSnapshot::new(),
            trigger: Trigger::OnMount,
            transition: Transition::default(),
        }
    }

    pub fn initial(mut self, state: impl Into<StateSnapshot>) -> Self {
        self.initial = state.into();
        self
    }

    pub fn target(mut self, state: impl Into<StateSnapshot>) -> Self {
        self.target = state.into();
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.transition.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.transition.duration_ms = duration_ms;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.transition.timing = timing;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Validate timing parameters and state shapes
    pub fn validate(&self) -> Result<()> {
        self.transition
            .check()
            .map_err(|reason| RevealError::invalid(&self.id, reason))?;

        if !self.initial.same_properties(&self.target) {
            return Err(RevealError::invalid(
                &self.id,
                InvalidReason::MismatchedProperties,
            ));
        }

        for state in [&self.initial, &self.target] {
            if let Some(property) = state.first_non_finite() {
                return Err(RevealError::invalid(
                    &self.id,
                    InvalidReason::NonFinite(property.to_string()),
                ));
            }
        }

        Ok(())
    }
}

/// Delay schedule for siblings sharing a trigger: `delay_i = base + i * step`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub base_ms: f32,
    pub step_ms: f32,
}

impl Stagger {
    pub const fn new(base_ms: f32, step_ms: f32) -> Self {
        Self { base_ms, step_ms }
    }

    /// Delay for the sibling at `index`
    pub fn delay_for(&self, index: usize) -> f32 {
        self.base_ms + index as f32 * self.step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> RevealDescriptor {
        RevealDescriptor::new("hero")
            .initial([("opacity", 0.0)])
            .target([("opacity", 1.0)])
    }

    #[test]
    fn test_valid_descriptor() {
        assert!(fade().validate().is_ok());
        assert!(fade().delay(0.0).duration(1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let err = fade().duration(0.0).validate().unwrap_err();
        assert!(matches!(err, RevealError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_negative_delay_is_invalid() {
        let err = fade().delay(-10.0).validate().unwrap_err();
        assert!(matches!(
            err,
            RevealError::InvalidDescriptor { ref id, .. } if id.as_str() == "hero"
        ));
    }

    #[test]
    fn test_mismatched_properties_are_invalid() {
        let desc = fade().target([("opacity", 1.0), ("scale", 1.0)]);
        assert!(matches!(
            desc.validate(),
            Err(RevealError::InvalidDescriptor {
                reason: InvalidReason::MismatchedProperties,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_property_is_invalid() {
        let desc = fade().initial([("opacity", f32::NAN)]);
        let err = desc.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid descriptor for 'hero': property 'opacity' is not a finite number"
        );
    }

    #[test]
    fn test_trigger_once() {
        assert!(Trigger::OnMount.is_once());
        assert!(Trigger::OnViewportEnter(ViewportPolicy::once()).is_once());
        assert!(!Trigger::OnViewportEnter(ViewportPolicy::always()).is_once());
    }

    #[test]
    fn test_stagger() {
        let stagger = Stagger::new(0.0, 200.0);
        let delays: Vec<f32> = (0..4).map(|i| stagger.delay_for(i)).collect();
        assert_eq!(delays, vec![0.0, 200.0, 400.0, 600.0]);

        let offset = Stagger::new(500.0, 100.0);
        assert_eq!(offset.delay_for(2), 700.0);
    }

    #[test]
    fn test_element_id_display() {
        let id = ElementId::from("btc");
        assert_eq!(id.to_string(), "btc");
        assert_eq!(id, ElementId::from(String::from("btc")));
    }
}
