use super::{MotionProfile, TransitionEvent, TransitionKind, TransitionState};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::time::sleep;

#[derive(Debug, Default)]
struct Inner {
    state: TransitionState,
    /// Bumped by every accepted `begin`; timers carry the value they started with.
    generation: u64,
    /// From `begin` until the overlay clears.
    active: bool,
}

/// Shared handle to the single transition slot.
///
/// Clones refer to the same slot. Phase timers run as spawned tasks, so the
/// methods must be called from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    inner: Arc<Mutex<Inner>>,
    motion: MotionProfile,
    events: mpsc::Sender<TransitionEvent>,
}

impl TransitionContext {
    pub fn new(motion: MotionProfile, events: mpsc::Sender<TransitionEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            motion,
            events,
        }
    }

    pub fn motion(&self) -> MotionProfile {
        self.motion
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave `Inner` half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a transition. Ignored (returns false) while another one is active.
    pub fn begin(&self, kind: TransitionKind) -> bool {
        let generation = {
            let mut inner = self.lock();
            if inner.active {
                log::debug!("Ignoring {} transition: one is already running", kind);
                return false;
            }
            inner.active = true;
            inner.generation += 1;
            inner.generation
        };
        log::debug!("Starting {} transition", kind);

        let context = self.clone();
        tokio::spawn(async move { context.run_begin(kind, generation).await });
        true
    }

    async fn run_begin(self, kind: TransitionKind, generation: u64) {
        self.send(TransitionEvent::ExitStarted(kind)).await;

        sleep(self.motion.overlay_delay).await;
        let state = {
            let mut inner = self.lock();
            if !inner.active || inner.generation != generation {
                return;
            }
            inner.state = TransitionState::active(kind);
            inner.state.clone()
        };
        self.send(TransitionEvent::OverlayPublished(state)).await;

        sleep(
            self.motion
                .navigate_delay
                .saturating_sub(self.motion.overlay_delay),
        )
        .await;
        if self.lock().generation != generation {
            return;
        }
        self.send(TransitionEvent::Navigate(kind.route())).await;
    }

    /// Called by the destination once it has mounted. Clears the overlay
    /// after the grace delay unless a newer transition has started by then.
    pub fn complete(&self) {
        let generation = {
            let inner = self.lock();
            if !inner.active {
                return;
            }
            inner.generation
        };

        let context = self.clone();
        tokio::spawn(async move {
            context.send(TransitionEvent::CompleteRequested).await;
            sleep(context.motion.grace_delay).await;
            let cleared = {
                let mut inner = context.lock();
                if !inner.active || inner.generation != generation {
                    None
                } else {
                    inner.active = false;
                    std::mem::take(&mut inner.state).transition_type
                }
            };
            if let Some(kind) = cleared {
                log::debug!("{} transition finished", kind);
                context.send(TransitionEvent::OverlayCleared(kind)).await;
            }
        });
    }

    /// Wait the entry delay, then [`complete`](Self::complete).
    pub fn complete_after_entry(&self) {
        let context = self.clone();
        tokio::spawn(async move {
            sleep(context.motion.entry_delay).await;
            context.complete();
        });
    }

    pub fn state(&self) -> TransitionState {
        self.lock().state.clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.lock().active
    }

    async fn send(&self, event: TransitionEvent) {
        // The receiver is gone once the UI exits; nothing left to notify.
        let _ = self.events.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Run one transition to completion, acting as the destination view:
    /// on `Navigate` it calls `complete_after_entry`.
    async fn run_to_clear(
        context: &TransitionContext,
        events: &mut mpsc::Receiver<TransitionEvent>,
        kind: TransitionKind,
    ) -> Vec<(u128, TransitionEvent)> {
        let start = Instant::now();
        assert!(context.begin(kind));
        let mut seen = Vec::new();
        while let Some(event) = events.recv().await {
            if let TransitionEvent::Navigate(_) = &event {
                context.complete_after_entry();
            }
            let done = matches!(event, TransitionEvent::OverlayCleared(_));
            seen.push((start.elapsed().as_millis(), event));
            if done {
                break;
            }
        }
        seen
    }

    fn position(seen: &[(u128, TransitionEvent)], pred: impl Fn(&TransitionEvent) -> bool) -> usize {
        seen.iter()
            .position(|(_, e)| pred(e))
            .expect("event missing")
    }

    fn assert_ordered(seen: &[(u128, TransitionEvent)]) {
        let exit = position(seen, |e| matches!(e, TransitionEvent::ExitStarted(_)));
        let overlay = position(seen, |e| matches!(e, TransitionEvent::OverlayPublished(_)));
        let navigate = position(seen, |e| matches!(e, TransitionEvent::Navigate(_)));
        let clear = position(seen, |e| matches!(e, TransitionEvent::OverlayCleared(_)));
        assert!(exit < overlay && overlay < navigate && navigate < clear);
    }

    #[tokio::test(start_paused = true)]
    async fn email_transition_follows_standard_timeline() {
        let (tx, mut rx) = mpsc::channel(16);
        let context = TransitionContext::new(MotionProfile::standard(), tx);

        let seen = run_to_clear(&context, &mut rx, TransitionKind::Email).await;
        assert_ordered(&seen);

        let times: Vec<u128> = seen.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, [0, 100, 350, 650, 1450]);
        assert_eq!(seen[2].1, TransitionEvent::Navigate(Route::EmailCampaigns));
        match &seen[1].1 {
            TransitionEvent::OverlayPublished(state) => {
                assert_eq!(state.source_asset, Some("sunset_email.png"))
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(!context.is_transitioning());
        assert_eq!(context.state(), TransitionState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn linkedin_transition_is_ordered_with_reduced_motion() {
        let (tx, mut rx) = mpsc::channel(16);
        let context = TransitionContext::new(MotionProfile::reduced(), tx);

        let seen = run_to_clear(&context, &mut rx, TransitionKind::Linkedin).await;
        assert_ordered(&seen);
        assert!(seen.iter().all(|(t, _)| *t == 0));
        assert!(seen.contains(&(0, TransitionEvent::Navigate(Route::LinkedinDashboard))));
        assert_eq!(
            seen.last().map(|(_, e)| e.clone()),
            Some(TransitionEvent::OverlayCleared(TransitionKind::Linkedin))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn begin_is_ignored_while_a_transition_runs() {
        let (tx, mut rx) = mpsc::channel(16);
        let context = TransitionContext::new(MotionProfile::standard(), tx);

        assert!(context.begin(TransitionKind::Email));
        assert!(!context.begin(TransitionKind::Linkedin));
        sleep(Duration::from_millis(400)).await;
        assert_eq!(
            context.state().transition_type,
            Some(TransitionKind::Email)
        );
        assert!(!context.clone().begin(TransitionKind::Linkedin));

        context.complete();
        sleep(Duration::from_millis(801)).await;
        assert!(!context.is_transitioning());

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let TransitionEvent::ExitStarted(kind) = event {
                kinds.push(kind);
            }
        }
        assert_eq!(kinds, [TransitionKind::Email]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_clear_leaves_a_newer_transition_alone() {
        let (tx, _rx) = mpsc::channel(64);
        let context = TransitionContext::new(MotionProfile::standard(), tx);

        assert!(context.begin(TransitionKind::Email));
        sleep(Duration::from_millis(400)).await;
        context.complete(); // clears at 1200
        sleep(Duration::from_millis(300)).await;
        context.complete(); // would clear at 1500

        sleep(Duration::from_millis(550)).await; // t = 1250
        assert!(!context.is_transitioning());

        assert!(context.begin(TransitionKind::Linkedin));
        sleep(Duration::from_millis(400)).await; // t = 1650, past the stale clear
        assert!(context.is_transitioning());
        assert_eq!(
            context.state().transition_type,
            Some(TransitionKind::Linkedin)
        );
    }

    #[tokio::test]
    async fn complete_without_a_transition_is_a_no_op() {
        let (tx, mut rx) = mpsc::channel(4);
        let context = TransitionContext::new(MotionProfile::reduced(), tx);
        context.complete();
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
