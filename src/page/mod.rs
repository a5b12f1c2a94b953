//! Reference landing page built on the orchestrator.
//!
//! [`LandingPage`] turns the static copy in [`content`] into reveal
//! descriptors, lays the elements out on a single scrolling column and wires
//! them to a [`MountNotifier`] and a [`ViewportWatcher`]. Painting is left to
//! the host: [`LandingPage::render`] returns the snapshot of every element
//! currently in view.

pub mod content;
mod signup;

pub use signup::{EmailCapture, LogSink, SignupSink};

use crate::animation::{StateSnapshot, TimingFunction};
use crate::clock::Clock;
use crate::descriptor::{ElementId, RevealDescriptor, Stagger, Trigger, ViewportPolicy};
use crate::observe::{MountNotifier, Observation, Rect, ViewportWatcher};
use crate::orchestrator::{Orchestrator, PumpReport, TriggerOutcome};
use crate::Scene;

pub const VIEWPORT_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 800.0;

/// Floating ticker cards in the hero enter one after another
pub const TICKER_STAGGER: Stagger = Stagger::new(0.0, 200.0);
/// Grid cards (features, plans, testimonials) cascade on viewport entry
pub const CARD_STAGGER: Stagger = Stagger::new(0.0, 100.0);

const NAV_HEIGHT: f32 = 80.0;
const CONTENT_X: f32 = 80.0;
const CONTENT_WIDTH: f32 = VIEWPORT_WIDTH - 2.0 * CONTENT_X;
const HEADING_HEIGHT: f32 = 160.0;
const SECTION_GAP: f32 = 128.0;
const CARD_GAP: f32 = 32.0;

/// One animated block of the page
pub struct PageElement {
    pub descriptor: RevealDescriptor,
    /// Page coordinates; for fixed elements, viewport coordinates
    pub bounds: Rect,
    /// Pinned to the viewport instead of scrolling with the page
    pub fixed: bool,
    /// Registration was rejected; the element renders in its target state
    pub fallback: bool,
    /// Copy shown in the block, for hosts that draw text
    pub label: String,
}

impl PageElement {
    fn new(descriptor: RevealDescriptor, bounds: Rect) -> Self {
        Self {
            descriptor,
            bounds,
            fixed: false,
            fallback: false,
            label: String::new(),
        }
    }

    fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.descriptor.id
    }
}

/// What the host should draw for one element this frame
#[derive(Clone, Debug, PartialEq)]
pub struct Painted {
    pub id: ElementId,
    pub label: String,
    pub bounds: Rect,
    pub state: StateSnapshot,
}

fn slide_up(id: impl Into<ElementId>, offset: f32) -> RevealDescriptor {
    RevealDescriptor::new(id)
        .initial([("opacity", 0.0), ("y", offset)])
        .target([("opacity", 1.0), ("y", 0.0)])
}

fn fade_in(id: impl Into<ElementId>) -> RevealDescriptor {
    RevealDescriptor::new(id)
        .initial([("opacity", 0.0)])
        .target([("opacity", 1.0)])
}

fn grow_in(id: impl Into<ElementId>) -> RevealDescriptor {
    RevealDescriptor::new(id)
        .initial([("opacity", 0.0), ("scale", 0.9)])
        .target([("opacity", 1.0), ("scale", 1.0)])
}

fn in_view(descriptor: RevealDescriptor, policy: ViewportPolicy) -> RevealDescriptor {
    descriptor.trigger(Trigger::OnViewportEnter(policy))
}

/// Lay `count` equal cards out in rows of `columns`, returning their boxes
/// and the y coordinate just below the grid.
fn grid(top: f32, count: usize, columns: usize, card_height: f32) -> (Vec<Rect>, f32) {
    let columns = columns.max(1);
    let width = (CONTENT_WIDTH - CARD_GAP * (columns - 1) as f32) / columns as f32;
    let rects = (0..count)
        .map(|i| {
            let col = (i % columns) as f32;
            let row = (i / columns) as f32;
            Rect::new(
                CONTENT_X + col * (width + CARD_GAP),
                top + row * (card_height + CARD_GAP),
                width,
                card_height,
            )
        })
        .collect();
    let rows = count.div_ceil(columns) as f32;
    (rects, top + rows * (card_height + CARD_GAP))
}

fn heading(id: &str, title: &str, top: f32) -> PageElement {
    PageElement::new(
        in_view(slide_up(id, 50.0), ViewportPolicy::once()),
        Rect::new(CONTENT_X, top, CONTENT_WIDTH, HEADING_HEIGHT),
    )
    .label(title)
}

/// Cards sharing one section trigger, staggered by position
fn cards<L>(prefix: &str, rects: Vec<Rect>, labels: L) -> Vec<PageElement>
where
    L: IntoIterator<Item = String>,
{
    rects
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (rect, label))| {
            let descriptor = in_view(
                slide_up(format!("{}-{}", prefix, i), 50.0),
                ViewportPolicy::once(),
            )
            .delay(CARD_STAGGER.delay_for(i));
            PageElement::new(descriptor, rect).label(label)
        })
        .collect()
}

/// Build every animated element of the page, top to bottom
fn layout() -> (Vec<PageElement>, f32) {
    let mut elements = Vec::new();

    // Navigation slides down on mount and stays pinned
    elements.push(
        PageElement::new(
            RevealDescriptor::new("nav")
                .initial([("y", -100.0)])
                .target([("y", 0.0)]),
            Rect::new(0.0, 0.0, VIEWPORT_WIDTH, NAV_HEIGHT),
        )
        .fixed()
        .label(content::nav_label()),
    );

    // Hero: floating tickers, then title, tagline, actions and stats
    let hero_top = NAV_HEIGHT;
    for (i, ticker) in content::TICKERS.iter().enumerate() {
        let descriptor = slide_up(format!("ticker-{}", ticker.symbol.to_lowercase()), 100.0)
            .duration(500.0)
            .delay(TICKER_STAGGER.delay_for(i));
        let x = CONTENT_X + i as f32 * (CONTENT_WIDTH / content::TICKERS.len() as f32);
        elements.push(
            PageElement::new(descriptor, Rect::new(x, hero_top + 40.0, 200.0, 96.0))
                .label(ticker.label()),
        );
    }
    elements.push(PageElement::new(
        slide_up("hero", 50.0).duration(800.0),
        Rect::new(CONTENT_X, hero_top + 200.0, CONTENT_WIDTH, 520.0),
    ));
    elements.push(PageElement::new(
        RevealDescriptor::new("hero-title")
            .initial([("scale", 0.5)])
            .target([("scale", 1.0)])
            .duration(500.0),
        Rect::new(CONTENT_X, hero_top + 200.0, CONTENT_WIDTH, 180.0),
    )
    .label("Trade Smarter with AI"));
    for (i, part) in ["hero-tagline", "hero-actions", "hero-stats"]
        .into_iter()
        .enumerate()
    {
        elements.push(PageElement::new(
            fade_in(part).delay(300.0 * (i + 1) as f32),
            Rect::new(CONTENT_X, hero_top + 400.0 + i as f32 * 110.0, CONTENT_WIDTH, 100.0),
        ));
    }
    let mut y = hero_top + VIEWPORT_HEIGHT;

    // Features
    y += SECTION_GAP;
    elements.push(heading("features-heading", "AI-Driven Insights", y));
    y += HEADING_HEIGHT;
    let (rects, below) = grid(y, content::FEATURES.len(), 2, 240.0);
    elements.extend(cards(
        "feature",
        rects,
        content::FEATURES.iter().map(content::Feature::label),
    ));
    y = below + SECTION_GAP / 2.0;

    // Market chart: the card reveals once, the drawn line replays on every entry
    let chart = Rect::new(CONTENT_X, y, CONTENT_WIDTH, 600.0);
    elements.push(PageElement::new(
        in_view(grow_in("chart"), ViewportPolicy::once()),
        chart,
    ));
    let plot = Rect::new(chart.x + 32.0, chart.y + 300.0, chart.width - 64.0, 256.0);
    elements.push(PageElement::new(
        in_view(
            RevealDescriptor::new("chart-line")
                .initial([("pathLength", 0.0)])
                .target([("pathLength", 1.0)])
                .duration(2000.0)
                .timing(TimingFunction::EaseInOut),
            ViewportPolicy::always(),
        ),
        plot,
    ));
    elements.push(PageElement::new(
        in_view(
            fade_in("chart-fill").duration(1000.0).delay(500.0),
            ViewportPolicy::always(),
        ),
        plot,
    ));
    y += chart.height;

    // Testimonials
    y += SECTION_GAP;
    elements.push(heading("testimonials-heading", "Trusted by Traders Worldwide", y));
    y += HEADING_HEIGHT;
    let (rects, below) = grid(y, content::TESTIMONIALS.len(), 3, 300.0);
    elements.extend(cards(
        "testimonial",
        rects,
        content::TESTIMONIALS.iter().map(content::Testimonial::label),
    ));
    y = below;

    // Pricing
    y += SECTION_GAP;
    elements.push(heading("pricing-heading", "Simple, Transparent Pricing", y));
    y += HEADING_HEIGHT;
    let (rects, below) = grid(y, content::PRICING.len(), 3, 560.0);
    elements.extend(cards(
        "plan",
        rects,
        content::PRICING.iter().map(content::PricingPlan::label),
    ));
    y = below;

    // Call to action with the signup form
    y += SECTION_GAP;
    elements.push(PageElement::new(
        in_view(grow_in("cta"), ViewportPolicy::once()),
        Rect::new(CONTENT_X + 160.0, y, CONTENT_WIDTH - 320.0, 400.0),
    )
    .label("Ready to Transform Your Trading?"));
    y += 400.0 + SECTION_GAP;

    // Footer is static
    let page_height = y + 320.0;
    (elements, page_height)
}

/// The landing page: elements, observation sources, scroll position and
/// the signup form.
pub struct LandingPage<S: SignupSink = LogSink> {
    elements: Vec<PageElement>,
    mounts: MountNotifier,
    watcher: ViewportWatcher,
    viewport: Rect,
    page_height: f32,
    signup: EmailCapture<S>,
}

impl LandingPage<LogSink> {
    pub fn new() -> Self {
        Self::with_sink(LogSink)
    }
}

impl Default for LandingPage<LogSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SignupSink> LandingPage<S> {
    pub fn with_sink(sink: S) -> Self {
        let (elements, page_height) = layout();
        Self {
            elements,
            mounts: MountNotifier::new(),
            watcher: ViewportWatcher::new(),
            viewport: Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            page_height,
            signup: EmailCapture::new(sink),
        }
    }

    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&PageElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Register every element and hook it up to its observation source.
    /// Rejected descriptors are logged and fall back to their target state.
    pub fn mount<C: Clock>(&mut self, orchestrator: &mut Orchestrator<C>) {
        for element in &mut self.elements {
            match orchestrator.register(element.descriptor.clone()) {
                Ok(_) => match element.descriptor.trigger {
                    Trigger::OnMount => self.mounts.mounted(element.id()),
                    Trigger::OnViewportEnter(_) => self.watcher.watch(element.id(), element.bounds),
                },
                Err(err) => {
                    log::warn!("{}; showing '{}' without animation", err, element.id());
                    element.fallback = true;
                }
            }
        }
        log::info!(
            "composed {} elements ({} without animation)",
            self.elements.len(),
            self.elements.iter().filter(|e| e.fallback).count()
        );
    }

    /// Remove one element from the page, cancelling anything it has pending
    pub fn remove<C: Clock>(&mut self, orchestrator: &mut Orchestrator<C>, id: &ElementId) {
        orchestrator.unregister(id);
        self.watcher.unwatch(id);
        self.mounts.cancel(id);
        self.elements.retain(|e| e.id() != id);
    }

    /// Remove every element
    pub fn teardown<C: Clock>(&mut self, orchestrator: &mut Orchestrator<C>) {
        for element in self.elements.drain(..) {
            orchestrator.unregister(element.id());
            self.watcher.unwatch(element.id());
            self.mounts.cancel(element.id());
        }
    }

    /// Deliver pending mount notifications and viewport edges.
    /// Returns the observations that scheduled a transition.
    pub fn observe<C: Clock>(&mut self, orchestrator: &mut Orchestrator<C>) -> Vec<Observation> {
        let mut observations = self.mounts.drain();
        observations.extend(self.watcher.poll(self.viewport));
        observations
            .into_iter()
            .filter(|o| o.deliver(orchestrator) == TriggerOutcome::Scheduled)
            .collect()
    }

    /// Snapshot of every element intersecting the viewport
    pub fn render<C: Clock>(&self, orchestrator: &Orchestrator<C>) -> Vec<Painted> {
        let on_screen = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        self.elements
            .iter()
            .filter_map(|element| {
                let bounds = if element.fixed {
                    element.bounds
                } else {
                    element.bounds.offset(-self.viewport.x, -self.viewport.y)
                };
                bounds.intersection(&on_screen)?;
                // A rejected element may share its id with a foreign entry
                let state = if element.fallback {
                    element.descriptor.target.clone()
                } else {
                    orchestrator.state_or_target(&element.descriptor)
                };
                Some(Painted {
                    id: element.id().clone(),
                    label: element.label.clone(),
                    bounds,
                    state,
                })
            })
            .collect()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    fn max_scroll(&self) -> f32 {
        (self.page_height - self.viewport.height).max(0.0)
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.viewport.y = y.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.viewport.y + dy);
    }

    /// Jump to an in-page anchor such as `#pricing`
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let heading = match anchor {
            "#features" => "features-heading",
            "#pricing" => "pricing-heading",
            "#testimonials" => "testimonials-heading",
            _ => return false,
        };
        let Some(top) = self.element(&heading.into()).map(|e| e.bounds.y) else {
            return false;
        };
        self.scroll_to(top - NAV_HEIGHT);
        true
    }

    pub fn at_bottom(&self) -> bool {
        self.viewport.y >= self.max_scroll()
    }

    pub fn signup(&self) -> &EmailCapture<S> {
        &self.signup
    }

    pub fn signup_mut(&mut self) -> &mut EmailCapture<S> {
        &mut self.signup
    }
}

impl<S: SignupSink, C: Clock> Scene<C> for LandingPage<S> {
    fn compose(&mut self, orchestrator: &mut Orchestrator<C>) {
        self.mount(orchestrator);
    }

    fn update(&mut self, orchestrator: &mut Orchestrator<C>) -> bool {
        for observation in self.observe(orchestrator) {
            log::debug!("observed {:?}", observation);
        }
        true
    }

    fn paint(&mut self, orchestrator: &Orchestrator<C>, report: &PumpReport) {
        for event in &report.events {
            log::debug!("{} {:?}", event.id, event.kind);
        }
        for painted in self.render(orchestrator) {
            log::trace!("paint {} [{}]", painted.id, painted.state);
        }
    }
}
