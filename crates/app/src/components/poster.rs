//! Floating poster component.

use marquee::{
    device::DeviceClass,
    display::{
        Epoch,
        poster::{PosterCommand, PosterController},
    },
    promotions::{Slot, eligibility},
    view::{PosterView, Render},
};
use tokio::{
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        watch,
    },
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    components::{ComponentContext, window_timer},
    store::AppState,
    timers::TimerHandle,
};

/// User interactions with the poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterInput {
    /// Close the poster.
    Dismiss,

    /// Open the full-size overlay.
    Expand,

    /// Close the overlay, or click outside it.
    CloseOverlay,
}

#[derive(Debug, Clone, Copy)]
enum PosterTimer {
    AutoHide(Epoch),
    WindowChanged,
}

/// Handle to a running poster. Dropping it unmounts the poster.
#[derive(Debug)]
pub struct Poster {
    view: watch::Receiver<Render<PosterView>>,
    inputs: UnboundedSender<PosterInput>,
    task: JoinHandle<()>,
}

impl Poster {
    /// Mount a poster for `slot`.
    #[must_use]
    pub fn spawn(ctx: &ComponentContext, slot: Slot) -> Self {
        let (view_tx, view) = watch::channel(Render::Nothing);
        let (inputs, inputs_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        let driver = PosterDriver {
            poster: PosterController::new(ctx.timings.auto_hide),
            ctx: ctx.clone(),
            slot,
            device: None,
            auto_hide: None,
            window: None,
            timer_tx,
            view_tx,
        };

        let task = tokio::spawn(driver.run(ctx.store.subscribe(), inputs_rx, timer_rx));

        Self { view, inputs, task }
    }

    /// Current render.
    #[must_use]
    pub fn view(&self) -> Render<PosterView> {
        self.view.borrow().clone()
    }

    /// Receiver notified on every render change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Render<PosterView>> {
        self.view.clone()
    }

    /// Forward a user interaction. Returns `false` once the poster is gone.
    pub fn send(&self, input: PosterInput) -> bool {
        self.inputs.send(input).is_ok()
    }
}

impl Drop for Poster {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct PosterDriver {
    ctx: ComponentContext,
    slot: Slot,
    poster: PosterController,
    device: Option<DeviceClass>,
    auto_hide: Option<TimerHandle>,
    window: Option<TimerHandle>,
    timer_tx: UnboundedSender<PosterTimer>,
    view_tx: watch::Sender<Render<PosterView>>,
}

impl PosterDriver {
    async fn run(
        mut self,
        mut state: watch::Receiver<AppState>,
        mut inputs: UnboundedReceiver<PosterInput>,
        mut timers: UnboundedReceiver<PosterTimer>,
    ) {
        let snapshot = state.borrow_and_update().clone();
        self.sync(&snapshot);

        loop {
            tokio::select! {
                biased;

                Some(timer) = timers.recv() => match timer {
                    PosterTimer::AutoHide(epoch) => {
                        if self.poster.auto_hide_elapsed(epoch) {
                            debug!(slot = %self.slot, "poster auto-hidden");
                            self.auto_hide = None;
                            self.publish();
                        }
                    }
                    PosterTimer::WindowChanged => {
                        let snapshot = state.borrow().clone();
                        self.sync(&snapshot);
                    }
                },
                input = inputs.recv() => {
                    let Some(input) = input else {
                        break;
                    };

                    self.on_input(input);
                }
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }

                    let snapshot = state.borrow_and_update().clone();
                    self.sync(&snapshot);
                }
            }
        }

        self.auto_hide = None;
        self.window = None;
    }

    fn sync(&mut self, state: &AppState) {
        let device = state.viewport.device_class();
        let now = self.ctx.clock.now();

        self.device = Some(device);

        // A failed fetch hides the poster rather than showing an error over the page.
        let content = if state.promotions.error.is_some() {
            None
        } else {
            eligibility::first_eligible(&state.promotions.records, &self.slot, device, now)
        };

        let command = self.poster.set_content(content);
        self.apply(command);

        let command = self.poster.set_session(state.session.present);
        self.apply(command);

        self.window = window_timer(
            &self.ctx,
            &state.promotions.records,
            &self.slot,
            now,
            self.timer_tx.clone(),
            PosterTimer::WindowChanged,
        );

        self.publish();
    }

    fn on_input(&mut self, input: PosterInput) {
        debug!(slot = %self.slot, ?input, "poster input");

        let before = self.poster.state();

        match input {
            PosterInput::Dismiss => {
                let command = self.poster.dismiss();
                self.apply(command);
            }
            PosterInput::Expand => {
                self.poster.expand();
            }
            PosterInput::CloseOverlay => {
                self.poster.close_overlay();
            }
        }

        if self.poster.state() != before {
            self.publish();
        }
    }

    fn apply(&mut self, command: Option<PosterCommand>) {
        match command {
            Some(PosterCommand::StartAutoHide { epoch, delay }) => {
                debug!(slot = %self.slot, ?delay, "poster shown");

                self.auto_hide = Some(TimerHandle::after(
                    delay,
                    self.timer_tx.clone(),
                    PosterTimer::AutoHide(epoch),
                    &self.ctx.timers,
                ));
            }
            Some(PosterCommand::CancelAutoHide) => {
                self.auto_hide = None;
            }
            None => {}
        }
    }

    fn publish(&self) {
        let content = self.device.and_then(|device| self.poster.view(device));
        let render = Render::resolve(None, content);

        self.view_tx.send_if_modified(|current| {
            if *current == render {
                return false;
            }

            *current = render;

            true
        });
    }
}
