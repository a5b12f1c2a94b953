//! Reveal orchestration: descriptors in, per-frame property snapshots out.
//!
//! The orchestrator owns one entry per registered element. Observation
//! sources report triggers (`report_trigger`, `report_exit`), which schedule
//! start and completion jobs on an internal timer queue. The frame loop calls
//! [`Orchestrator::pump`] to run due jobs and then reads
//! [`Orchestrator::current_state`] for every element it paints.
//!
//! ## Phases
//!
//! ```text
//!            report_trigger              completion job
//! Pending ──────────────────► Triggered ──────────────► Settled
//!    ▲                            │                        │
//!    └──────── report_exit ───────┴────────────────────────┘
//!              (viewport elements with ViewportPolicy::always only)
//! ```
//!
//! `current_state` never depends on whether `pump` has run: it is computed
//! from the active transition and the clock, so a paint that races a timer
//! boundary still sees the exact target state once the window has elapsed.
//!
//! ## Stale timers
//!
//! Every registration gets a fresh epoch and every transition a fresh
//! sequence number. `unregister` purges queued jobs for the element, and any
//! job that still surfaces is discarded because its epoch or transition no
//! longer matches the live entry.

use std::collections::HashMap;
use std::time::Instant;

use bitflags::bitflags;

use crate::animation::{Animatable, StateSnapshot, TimingFunction};
use crate::clock::{Clock, SystemClock};
use crate::descriptor::{ElementId, RevealDescriptor, Trigger};
use crate::error::{Result, RevealError};
use crate::jobs::{Job, JobQueue, JobType};

bitflags! {
    /// What changed during a pump
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Some element is interpolating; the next frame must repaint
        const NEEDS_PAINT   = 0b01;
        /// At least one element changed phase
        const PHASE_CHANGED = 0b10;
    }
}

/// Lifecycle phase of a registered element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the trigger (or concealed again after a viewport exit)
    Pending,
    /// Trigger fired; transition is in its delay window or running
    Triggered,
    /// Transition finished, element rests at its target state
    Settled,
}

/// Result of feeding a trigger or exit notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A transition was scheduled
    Scheduled,
    /// Notification was valid but had nothing to do
    Ignored,
    /// No live element with that id
    Unknown,
}

/// Returned by `register`; identifies one registration of an element
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RevealHandle {
    pub id: ElementId,
    pub epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEventKind {
    /// Delay elapsed, element started moving toward its target
    Started,
    /// Element reached its target state
    Settled,
    /// Element returned to its initial state after leaving the viewport
    Concealed,
}

/// Timer boundary crossed during a pump
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    pub id: ElementId,
    pub kind: RevealEventKind,
    /// Scheduled time of the boundary (not the time it was observed)
    pub at: Instant,
}

/// Summary of one `pump`
#[derive(Clone, Debug, Default)]
pub struct PumpReport {
    pub events: Vec<RevealEvent>,
    pub changes: ChangeFlags,
}

impl PumpReport {
    pub fn settled(&self) -> impl Iterator<Item = &ElementId> + '_ {
        self.events
            .iter()
            .filter(|e| e.kind == RevealEventKind::Settled)
            .map(|e| &e.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Reveal,
    Conceal,
}

/// An in-flight interpolation between two snapshots
#[derive(Clone, Debug)]
struct ActiveTransition {
    seq: u64,
    direction: Direction,
    from: StateSnapshot,
    to: StateSnapshot,
    timing: TimingFunction,
    start: Instant,
    end: Instant,
}

impl ActiveTransition {
    fn sample(&self, now: Instant) -> StateSnapshot {
        if now <= self.start {
            return self.from.clone();
        }
        if now >= self.end {
            return self.to.clone();
        }
        let span = (self.end - self.start).as_secs_f32();
        let elapsed = (now - self.start).as_secs_f32();
        StateSnapshot::lerp(&self.from, &self.to, self.timing.evaluate(elapsed / span))
    }
}

struct Entry {
    descriptor: RevealDescriptor,
    epoch: u64,
    phase: Phase,
    /// Value shown when no transition is active
    resting: StateSnapshot,
    active: Option<ActiveTransition>,
}

impl Entry {
    fn sample(&self, now: Instant) -> StateSnapshot {
        match &self.active {
            Some(active) => active.sample(now),
            None => self.resting.clone(),
        }
    }
}

/// Drives reveal transitions for every registered element
pub struct Orchestrator<C: Clock = SystemClock> {
    clock: C,
    entries: HashMap<ElementId, Entry>,
    jobs: JobQueue,
    next_epoch: u64,
    next_transition: u64,
}

impl Orchestrator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Orchestrator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Orchestrator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            entries: HashMap::new(),
            jobs: JobQueue::new(),
            next_epoch: 1,
            next_transition: 1,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Register an element in the `Pending` phase.
    ///
    /// Does not fire the trigger, even for `OnMount` descriptors: the mount
    /// notification must arrive separately through `report_trigger`.
    pub fn register(&mut self, descriptor: RevealDescriptor) -> Result<RevealHandle> {
        descriptor.validate()?;
        if self.entries.contains_key(&descriptor.id) {
            return Err(RevealError::DoubleRegistration(descriptor.id.clone()));
        }

        let epoch = self.next_epoch;
        self.next_epoch += 1;
        let id = descriptor.id.clone();

        log::debug!(
            "register {} ({:?}, delay {}ms, duration {}ms)",
            id,
            descriptor.trigger,
            descriptor.transition.delay_ms,
            descriptor.transition.duration_ms
        );

        self.entries.insert(
            id.clone(),
            Entry {
                resting: descriptor.initial.clone(),
                descriptor,
                epoch,
                phase: Phase::Pending,
                active: None,
            },
        );
        Ok(RevealHandle { id, epoch })
    }

    /// Remove an element and cancel its scheduled jobs. Returns whether
    /// anything was removed; calling it again is harmless.
    pub fn unregister(&mut self, id: &ElementId) -> bool {
        match self.entries.remove(id) {
            Some(_) => {
                let cancelled = self.jobs.cancel_element(id);
                log::debug!("unregister {} ({} pending jobs cancelled)", id, cancelled);
                true
            }
            None => false,
        }
    }

    /// The trigger condition for `id` became true.
    pub fn report_trigger(&mut self, id: &ElementId) -> TriggerOutcome {
        let now = self.clock.now();
        let Some(entry) = self.entries.get(id) else {
            log::warn!("{}; trigger ignored", RevealError::UnknownElement(id.clone()));
            return TriggerOutcome::Unknown;
        };

        let once = entry.descriptor.trigger.is_once();
        let revealing = matches!(
            entry.active,
            Some(ActiveTransition {
                direction: Direction::Reveal,
                ..
            })
        );

        let skip = match entry.phase {
            Phase::Pending => false,
            Phase::Triggered | Phase::Settled if once => true,
            Phase::Triggered => revealing,
            Phase::Settled => false,
        };
        if skip {
            log::debug!("trigger for {} ignored in {:?}", id, entry.phase);
            return TriggerOutcome::Ignored;
        }

        self.schedule(id, Direction::Reveal, now);
        TriggerOutcome::Scheduled
    }

    /// The element left the viewport. Only replayable viewport reveals react:
    /// they transition back to their initial state and become `Pending` again.
    pub fn report_exit(&mut self, id: &ElementId) -> TriggerOutcome {
        let now = self.clock.now();
        let Some(entry) = self.entries.get(id) else {
            log::warn!("{}; exit ignored", RevealError::UnknownElement(id.clone()));
            return TriggerOutcome::Unknown;
        };

        let replayable = matches!(
            entry.descriptor.trigger,
            Trigger::OnViewportEnter(policy) if !policy.once
        );
        if !replayable || entry.phase == Phase::Pending {
            return TriggerOutcome::Ignored;
        }

        self.schedule(id, Direction::Conceal, now);
        TriggerOutcome::Scheduled
    }

    fn schedule(&mut self, id: &ElementId, direction: Direction, now: Instant) {
        let seq = self.next_transition;
        self.next_transition += 1;

        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };
        let transition = &entry.descriptor.transition;
        let (to, delay, phase) = match direction {
            Direction::Reveal => (
                entry.descriptor.target.clone(),
                transition.delay_duration(),
                Phase::Triggered,
            ),
            Direction::Conceal => (
                entry.descriptor.initial.clone(),
                std::time::Duration::ZERO,
                Phase::Pending,
            ),
        };
        let start = now + delay;
        let end = start + transition.run_duration();

        let active = ActiveTransition {
            seq,
            direction,
            from: entry.sample(now),
            to,
            timing: transition.timing.clone(),
            start,
            end,
        };

        log::debug!(
            "{} {:?} scheduled: start +{}ms, end +{}ms",
            id,
            direction,
            (start - now).as_millis(),
            (end - now).as_millis()
        );

        entry.active = Some(active);
        entry.phase = phase;
        let epoch = entry.epoch;

        self.jobs.push_job(id.clone(), epoch, seq, JobType::Start, start);
        self.jobs.push_job(id.clone(), epoch, seq, JobType::Complete, end);
    }

    /// Jump straight to the target state, cancelling anything scheduled.
    pub fn settle_now(&mut self, id: &ElementId) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            log::warn!("{}; settle ignored", RevealError::UnknownElement(id.clone()));
            return false;
        };
        entry.active = None;
        entry.resting = entry.descriptor.target.clone();
        entry.phase = Phase::Settled;
        self.jobs.cancel_element(id);
        true
    }

    /// Run every job whose deadline has passed.
    pub fn pump(&mut self) -> PumpReport {
        let now = self.clock.now();
        let mut report = PumpReport::default();

        for job in self.jobs.drain_due(now) {
            if let Some(event) = self.run_job(&job) {
                report.changes |= ChangeFlags::PHASE_CHANGED;
                report.events.push(event);
            }
        }

        if self.has_animations() {
            report.changes |= ChangeFlags::NEEDS_PAINT;
        }
        report
    }

    fn run_job(&mut self, job: &Job) -> Option<RevealEvent> {
        let entry = self.entries.get_mut(&job.element)?;
        let current = entry
            .active
            .as_ref()
            .filter(|a| entry.epoch == job.epoch && a.seq == job.transition);
        let Some(active) = current else {
            log::debug!("stale {:?} job for {} dropped", job.job_type, job.element);
            return None;
        };

        let kind = match (job.job_type, active.direction) {
            (JobType::Start, _) => RevealEventKind::Started,
            (JobType::Complete, Direction::Reveal) => {
                entry.resting = active.to.clone();
                entry.phase = Phase::Settled;
                entry.active = None;
                RevealEventKind::Settled
            }
            (JobType::Complete, Direction::Conceal) => {
                entry.resting = active.to.clone();
                entry.active = None;
                RevealEventKind::Concealed
            }
        };

        Some(RevealEvent {
            id: job.element.clone(),
            kind,
            at: job.deadline,
        })
    }

    /// Interpolated property values at the current time.
    ///
    /// During the delay window this is the state the transition started
    /// from (the initial state for a fresh element).
    pub fn current_state(&self, id: &ElementId) -> Option<StateSnapshot> {
        match self.entries.get(id) {
            Some(entry) => Some(entry.sample(self.clock.now())),
            None => {
                log::debug!("{}; no state", RevealError::UnknownElement(id.clone()));
                None
            }
        }
    }

    /// Fail-soft read: elements that are not registered render in their
    /// target state so an animation problem never hides content.
    pub fn state_or_target(&self, descriptor: &RevealDescriptor) -> StateSnapshot {
        self.entries
            .get(&descriptor.id)
            .map(|entry| entry.sample(self.clock.now()))
            .unwrap_or_else(|| descriptor.target.clone())
    }

    pub fn phase(&self, id: &ElementId) -> Option<Phase> {
        self.entries.get(id).map(|entry| entry.phase)
    }

    pub fn is_registered(&self, id: &ElementId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any element has a transition scheduled or running
    pub fn has_animations(&self) -> bool {
        self.entries.values().any(|entry| entry.active.is_some())
    }

    /// Earliest scheduled timer boundary
    pub fn next_deadline(&self) -> Option<Instant> {
        self.jobs.next_deadline()
    }
}
