//! Scrolls through the landing page the way a visitor would and signs up at
//! the bottom. Run with `RUST_LOG=debug` to see every reveal.

use unveil::orchestrator::{Orchestrator, PumpReport, RevealEventKind};
use unveil::page::LandingPage;
use unveil::{Scene, Stage};

const SCROLL_STEP: f32 = 24.0;
/// Frames spent reading the hero before scrolling
const HERO_PAUSE: u32 = 90;

struct Visitor {
    page: LandingPage,
    frame: u32,
    signed_up: bool,
}

impl Scene for Visitor {
    fn compose(&mut self, orchestrator: &mut Orchestrator) {
        self.page.mount(orchestrator);
    }

    fn update(&mut self, orchestrator: &mut Orchestrator) -> bool {
        self.frame += 1;
        if self.frame == HERO_PAUSE {
            self.page.scroll_to_anchor("#features");
        } else if self.frame > HERO_PAUSE && !self.page.at_bottom() {
            self.page.scroll_by(SCROLL_STEP);
        }

        self.page.observe(orchestrator);

        if self.page.at_bottom() && !self.signed_up {
            self.page.signup_mut().set_value("visitor@example.com");
            self.signed_up = self.page.signup_mut().submit();
        }

        !(self.signed_up && !orchestrator.has_animations())
    }

    fn paint(&mut self, orchestrator: &Orchestrator, report: &PumpReport) {
        for event in &report.events {
            if event.kind == RevealEventKind::Settled {
                log::info!("{} revealed", event.id);
            }
        }
        let painted = self.page.render(orchestrator);
        log::trace!("frame {}: {} elements on screen", self.frame, painted.len());
    }
}

fn main() {
    let visitor = Visitor {
        page: LandingPage::new(),
        frame: 0,
        signed_up: false,
    };

    if let Err(err) = Stage::new().frame_interval(16).run(visitor) {
        eprintln!("landing demo failed: {}", err);
        std::process::exit(1);
    }
}
