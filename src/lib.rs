pub mod animation;
pub mod clock;
pub mod descriptor;
pub mod error;
pub mod jobs;
pub mod observe;
pub mod orchestrator;
pub mod page;

use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};

use clock::{Clock, SystemClock};
use error::Result;
use orchestrator::{ChangeFlags, Orchestrator, PumpReport};

pub mod prelude {
    pub use crate::animation::{Animatable, StateSnapshot, TimingFunction, Transition};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::descriptor::{ElementId, RevealDescriptor, Stagger, Trigger, ViewportPolicy};
    pub use crate::error::{InvalidReason, Result, RevealError};
    pub use crate::observe::{MountNotifier, Observation, Rect, ViewportWatcher};
    pub use crate::orchestrator::{
        ChangeFlags, Orchestrator, Phase, PumpReport, RevealEvent, RevealEventKind, RevealHandle,
        TriggerOutcome,
    };
    pub use crate::{Scene, Stage, StageConfig};
}

pub struct StageConfig {
    /// Milliseconds between frames
    pub frame_interval_ms: u64,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Stop once nothing is animating or scheduled
    pub exit_when_idle: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_frames: None,
            exit_when_idle: false,
        }
    }
}

/// Content driven by a [`Stage`].
///
/// `compose` runs once before the first frame. Every frame then calls
/// `update` (deliver observations, react to input), pumps the orchestrator
/// and finally calls `paint` with what the pump reported.
pub trait Scene<C: Clock = SystemClock> {
    fn compose(&mut self, orchestrator: &mut Orchestrator<C>);

    /// Returning `false` stops the stage after this frame
    fn update(&mut self, orchestrator: &mut Orchestrator<C>) -> bool;

    fn paint(&mut self, orchestrator: &Orchestrator<C>, report: &PumpReport);
}

/// Frame loop owning the orchestrator
pub struct Stage<C: Clock = SystemClock> {
    config: StageConfig,
    orchestrator: Orchestrator<C>,
    frames: u64,
}

impl Stage<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            config,
            orchestrator: Orchestrator::new(),
            frames: 0,
        }
    }
}

impl Default for Stage<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stage<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            config: StageConfig::default(),
            orchestrator: Orchestrator::with_clock(clock),
            frames: 0,
        }
    }

    pub fn frame_interval(mut self, ms: u64) -> Self {
        self.config.frame_interval_ms = ms.max(1);
        self
    }

    pub fn max_frames(mut self, frames: u64) -> Self {
        self.config.max_frames = Some(frames);
        self
    }

    pub fn exit_when_idle(mut self, exit: bool) -> Self {
        self.config.exit_when_idle = exit;
        self
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &Orchestrator<C> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator<C> {
        &mut self.orchestrator
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single frame. Returns `false` once the stage should stop.
    pub fn frame<S: Scene<C>>(&mut self, scene: &mut S) -> bool {
        self.frames += 1;
        let keep_going = scene.update(&mut self.orchestrator);

        let report = self.orchestrator.pump();
        if report.changes.contains(ChangeFlags::PHASE_CHANGED) {
            log::debug!("frame {}: {} events", self.frames, report.events.len());
        }
        scene.paint(&self.orchestrator, &report);

        if !keep_going {
            log::info!("scene finished after {} frames", self.frames);
            return false;
        }
        if self.config.max_frames.is_some_and(|max| self.frames >= max) {
            log::info!("frame limit reached");
            return false;
        }
        if self.config.exit_when_idle && !self.orchestrator.has_animations() {
            log::info!("nothing left to animate after {} frames", self.frames);
            return false;
        }
        true
    }

    /// Compose the scene and drive it from a calloop timer until it finishes
    pub fn run<S: Scene<C>>(self, mut scene: S) -> Result<()> {
        let _ = env_logger::try_init();

        let mut event_loop: EventLoop<StageState<C, S>> = EventLoop::try_new()?;
        let interval = Duration::from_millis(self.config.frame_interval_ms.max(1));

        let mut stage = self;
        scene.compose(&mut stage.orchestrator);
        log::info!(
            "stage composed with {} elements, frame interval {:?}",
            stage.orchestrator.len(),
            interval
        );

        event_loop
            .handle()
            .insert_source(Timer::from_duration(interval), move |_, _, state| {
                if state.stage.frame(&mut state.scene) {
                    TimeoutAction::ToDuration(interval)
                } else {
                    state.signal.stop();
                    TimeoutAction::Drop
                }
            })
            .map_err(|e| e.error)?;

        let mut state = StageState {
            stage,
            scene,
            signal: event_loop.get_signal(),
        };
        event_loop.run(None::<Duration>, &mut state, |_| {})?;

        log::info!("stage stopped after {} frames", state.stage.frames);
        Ok(())
    }
}

struct StageState<C: Clock, S> {
    stage: Stage<C>,
    scene: S,
    signal: LoopSignal,
}
