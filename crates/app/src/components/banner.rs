//! Rotating banner component.

use marquee::{
    device::DeviceClass,
    display::{
        Epoch,
        rotation::{Cycle, RotationCommand, RotationController},
    },
    promotions::{Slot, eligibility},
    view::{BannerView, Render},
};
use tokio::{
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        watch,
    },
    task::JoinHandle,
    time::Instant,
};
use tracing::debug;

use crate::{
    components::{ComponentContext, window_timer},
    store::AppState,
    timers::TimerHandle,
};

#[derive(Debug, Clone, Copy)]
enum BannerEvent {
    Tick(Cycle),
    Advance(Epoch),
    WindowChanged,
}

/// Handle to a running rotating banner. Dropping it unmounts the banner.
#[derive(Debug)]
pub struct RotatingBanner {
    view: watch::Receiver<Render<BannerView>>,
    task: JoinHandle<()>,
}

impl RotatingBanner {
    /// Mount a banner for `slot`.
    #[must_use]
    pub fn spawn(ctx: &ComponentContext, slot: Slot) -> Self {
        let (view_tx, view) = watch::channel(Render::Nothing);
        let (events_tx, events) = mpsc::unbounded_channel();

        let driver = BannerDriver {
            rotation: RotationController::new(&ctx.timings),
            ctx: ctx.clone(),
            slot,
            device: None,
            error: None,
            tick: None,
            advance: None,
            window: None,
            cycle_started: Instant::now(),
            events_tx,
            view_tx,
        };

        let task = tokio::spawn(driver.run(ctx.store.subscribe(), events));

        Self { view, task }
    }

    /// Current render.
    #[must_use]
    pub fn view(&self) -> Render<BannerView> {
        self.view.borrow().clone()
    }

    /// Receiver notified on every render change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Render<BannerView>> {
        self.view.clone()
    }
}

impl Drop for RotatingBanner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct BannerDriver {
    ctx: ComponentContext,
    slot: Slot,
    rotation: RotationController,
    device: Option<DeviceClass>,
    error: Option<String>,
    tick: Option<TimerHandle>,
    advance: Option<TimerHandle>,
    window: Option<TimerHandle>,
    cycle_started: Instant,
    events_tx: UnboundedSender<BannerEvent>,
    view_tx: watch::Sender<Render<BannerView>>,
}

impl BannerDriver {
    async fn run(
        mut self,
        mut state: watch::Receiver<AppState>,
        mut events: UnboundedReceiver<BannerEvent>,
    ) {
        let snapshot = state.borrow_and_update().clone();
        self.sync(&snapshot);

        loop {
            tokio::select! {
                biased;

                Some(event) = events.recv() => {
                    if self.on_event(event) {
                        // Records can leave their date window while mounted.
                        let snapshot = state.borrow().clone();
                        self.sync(&snapshot);
                    }
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

        let command = self.rotation.clear();
        self.apply(command);
        self.window = None;
    }

    /// Re-derive eligibility from `state`.
    fn sync(&mut self, state: &AppState) {
        let device = state.viewport.device_class();

        let now = self.ctx.clock.now();

        self.error.clone_from(&state.promotions.error);

        let eligible = eligibility::select(&state.promotions.records, &self.slot, device, now);

        let command = if self.device == Some(device) {
            self.rotation.replace(eligible)
        } else {
            self.device = Some(device);
            self.rotation.restart(eligible)
        };

        self.apply(command);

        self.window = window_timer(
            &self.ctx,
            &state.promotions.records,
            &self.slot,
            now,
            self.events_tx.clone(),
            BannerEvent::WindowChanged,
        );

        self.publish();
    }

    /// Returns whether eligibility must be re-derived.
    fn on_event(&mut self, event: BannerEvent) -> bool {
        match event {
            BannerEvent::Tick(cycle) => {
                if self.rotation.tick(cycle) {
                    self.publish();
                }

                false
            }
            BannerEvent::Advance(epoch) => {
                let advanced = self.rotation.advance(epoch);

                if advanced {
                    debug!(slot = %self.slot, index = ?self.rotation.index(), "banner advanced");

                    self.cycle_started += self.ctx.timings.advance;
                    self.arm_tick();
                    self.publish();
                }

                advanced
            }
            BannerEvent::WindowChanged => true,
        }
    }

    fn apply(&mut self, command: RotationCommand) {
        match command {
            RotationCommand::Start { epoch } => {
                debug!(slot = %self.slot, records = self.rotation.records().len(), "banner rotation started");

                self.cycle_started = Instant::now();
                self.advance = Some(TimerHandle::every_from(
                    self.cycle_started,
                    self.ctx.timings.advance,
                    self.events_tx.clone(),
                    BannerEvent::Advance(epoch),
                    &self.ctx.timers,
                ));
                self.arm_tick();
            }
            RotationCommand::Stop => {
                debug!(slot = %self.slot, "banner rotation stopped");

                self.tick = None;
                self.advance = None;
            }
            RotationCommand::Keep => {}
        }
    }

    /// Tick timer for the current cycle, on the advance timer's schedule.
    fn arm_tick(&mut self) {
        self.tick = Some(TimerHandle::every_from(
            self.cycle_started,
            self.ctx.timings.tick,
            self.events_tx.clone(),
            BannerEvent::Tick(self.rotation.cycle()),
            &self.ctx.timers,
        ));
    }

    fn publish(&self) {
        let content = self
            .device
            .and_then(|device| self.rotation.view(device));
        let render = Render::resolve(self.error.as_deref(), content);

        self.view_tx.send_if_modified(|current| {
            if *current == render {
                return false;
            }

            *current = render;

            true
        });
    }
}
