//! Advertisement strip component.

use marquee::{
    display::strip::AdStrip,
    promotions::{Slot, eligibility},
    view::{Render, StripView},
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
};

/// Handle to a running advertisement strip. Dropping it unmounts the strip.
#[derive(Debug)]
pub struct AdStripComponent {
    view: watch::Receiver<Render<StripView>>,
    dismiss: UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl AdStripComponent {
    /// Mount a strip for `slot`.
    #[must_use]
    pub fn spawn(ctx: &ComponentContext, slot: Slot) -> Self {
        let (view_tx, view) = watch::channel(Render::Nothing);
        let (dismiss, dismiss_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(
            ctx.clone(),
            slot,
            ctx.store.subscribe(),
            dismiss_rx,
            view_tx,
        ));

        Self {
            view,
            dismiss,
            task,
        }
    }

    /// Current render.
    #[must_use]
    pub fn view(&self) -> Render<StripView> {
        self.view.borrow().clone()
    }

    /// Receiver notified on every render change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Render<StripView>> {
        self.view.clone()
    }

    /// Close the strip. Returns `false` once the strip is gone.
    pub fn dismiss(&self) -> bool {
        self.dismiss.send(()).is_ok()
    }
}

impl Drop for AdStripComponent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    ctx: ComponentContext,
    slot: Slot,
    mut state: watch::Receiver<AppState>,
    mut dismiss: UnboundedReceiver<()>,
    view: watch::Sender<Render<StripView>>,
) {
    let mut strip = AdStrip::new();
    let mut snapshot = state.borrow_and_update().clone();
    let (window_tx, mut window_rx) = mpsc::unbounded_channel();

    loop {
        let device = snapshot.viewport.device_class();
        let now = ctx.clock.now();

        // A failed fetch renders nothing rather than an error strip.
        let content = if snapshot.promotions.error.is_some() {
            None
        } else {
            eligibility::first_eligible(&snapshot.promotions.records, &slot, device, now)
        };

        strip.set_content(content);

        // Held until the next pass; dropping it cancels the pending recheck.
        let _window = window_timer(
            &ctx,
            &snapshot.promotions.records,
            &slot,
            now,
            window_tx.clone(),
            (),
        );

        let render = Render::resolve(None, strip.view(device));

        view.send_if_modified(|current| {
            if *current == render {
                return false;
            }

            *current = render;

            true
        });

        tokio::select! {
            Some(()) = window_rx.recv() => {}
            received = dismiss.recv() => {
                if received.is_none() {
                    break;
                }

                if strip.dismiss() {
                    debug!(%slot, "advertisement strip dismissed");
                }
            }
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }

                snapshot = state.borrow_and_update().clone();
            }
        }
    }
}
