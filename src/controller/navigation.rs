//! Section switching with an exit/entry transition pair

use super::session::Section;
use std::time::{Duration, Instant};

pub const EXIT_DURATION: Duration = Duration::from_millis(400);
pub const ENTRY_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Old section fading out
    Exiting { progress: u8 },
    /// New section fading in
    Entering { progress: u8 },
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: Section,
    pub to: Section,
    started: Instant,
}

impl Transition {
    fn end(&self) -> Instant {
        self.started + EXIT_DURATION + ENTRY_DURATION
    }

    /// `None` once both halves have played
    pub fn phase(&self, now: Instant) -> Option<Phase> {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < EXIT_DURATION {
            Some(Phase::Exiting {
                progress: percent(elapsed, EXIT_DURATION),
            })
        } else if elapsed < EXIT_DURATION + ENTRY_DURATION {
            Some(Phase::Entering {
                progress: percent(elapsed - EXIT_DURATION, ENTRY_DURATION),
            })
        } else {
            None
        }
    }
}

fn percent(part: Duration, whole: Duration) -> u8 {
    ((part.as_millis() * 100) / whole.as_millis().max(1)).min(100) as u8
}

/// Tracks the pending transition, if any
#[derive(Debug, Default)]
pub struct Navigator {
    transition: Option<Transition>,
}

impl Navigator {
    /// Begin moving from `from` to `to`. Returns false when ignored: a
    /// transition is still playing, or `to` is already visible.
    pub fn start(&mut self, from: Section, to: Section, now: Instant) -> bool {
        if self.is_pending(now) {
            let pending = self.transition.map(|t| t.to);
            tracing::debug!(?to, ?pending, "Navigation ignored: transition pending");
            return false;
        }
        if from == to {
            return false;
        }
        self.transition = Some(Transition {
            from,
            to,
            started: now,
        });
        true
    }

    /// Forget a transition that has finished
    pub fn settle(&mut self, now: Instant) {
        if self.transition.is_some_and(|t| now >= t.end()) {
            self.transition = None;
        }
    }

    pub fn is_pending(&self, now: Instant) -> bool {
        self.transition.is_some_and(|t| now < t.end())
    }

    pub fn current(&self, now: Instant) -> Option<(Transition, Phase)> {
        let t = self.transition?;
        t.phase(now).map(|p| (t, p))
    }

    /// Section to draw: the old one until its exit finishes
    pub fn visible(&self, target: Section, now: Instant) -> Section {
        match self.current(now) {
            Some((t, Phase::Exiting { .. })) => t.from,
            _ => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_timing() {
        let mut nav = Navigator::default();
        let t0 = Instant::now();
        assert!(nav.start(Section::Dashboard, Section::MentalHealth, t0));

        let (_, phase) = nav.current(t0 + Duration::from_millis(200)).unwrap();
        assert_eq!(phase, Phase::Exiting { progress: 50 });
        assert_eq!(
            nav.visible(Section::MentalHealth, t0 + Duration::from_millis(200)),
            Section::Dashboard
        );

        let (_, phase) = nav.current(t0 + Duration::from_millis(700)).unwrap();
        assert_eq!(phase, Phase::Entering { progress: 50 });
        assert_eq!(
            nav.visible(Section::MentalHealth, t0 + Duration::from_millis(700)),
            Section::MentalHealth
        );

        assert!(!nav.is_pending(t0 + Duration::from_millis(1000)));
        assert!(nav.current(t0 + Duration::from_millis(1000)).is_none());
    }

    #[test]
    fn requests_during_transition_are_ignored() {
        let mut nav = Navigator::default();
        let t0 = Instant::now();
        assert!(nav.start(Section::Dashboard, Section::PdfProcessor, t0));
        assert!(!nav.start(
            Section::PdfProcessor,
            Section::VideoProcessor,
            t0 + Duration::from_millis(999)
        ));
        assert!(nav.start(
            Section::PdfProcessor,
            Section::VideoProcessor,
            t0 + Duration::from_millis(1000)
        ));
    }

    #[test]
    fn same_section_is_noop() {
        let mut nav = Navigator::default();
        assert!(!nav.start(Section::Dashboard, Section::Dashboard, Instant::now()));
        assert!(!nav.is_pending(Instant::now()));
    }
}
