//! Owned Timers
//!
//! Every periodic or one-shot timer is a spawned task owned by a
//! [`TimerHandle`]. Dropping the handle aborts the task, so a timer can never
//! outlive the component state that started it.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{self, Instant},
};

/// Count of live timers, shared by every handle created with it.
#[derive(Debug, Clone, Default)]
pub struct TimerGauge(Arc<AtomicUsize>);

impl TimerGauge {
    /// Timers currently alive.
    #[must_use]
    pub fn active(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Self {
        self.0.fetch_add(1, Ordering::SeqCst);

        self.clone()
    }
}

/// Owned timer task; aborted on drop.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
    gauge: TimerGauge,
}

impl TimerHandle {
    /// Send `event` every `period`, first after one full period.
    #[must_use]
    pub fn every<E>(period: Duration, events: UnboundedSender<E>, event: E, gauge: &TimerGauge) -> Self
    where
        E: Clone + Send + 'static,
    {
        Self::every_from(Instant::now(), period, events, event, gauge)
    }

    /// Send `event` every `period` on a schedule anchored at `anchor`,
    /// first at `anchor + period`.
    #[must_use]
    pub fn every_from<E>(
        anchor: Instant,
        period: Duration,
        events: UnboundedSender<E>,
        event: E,
        gauge: &TimerGauge,
    ) -> Self
    where
        E: Clone + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(anchor + period, period);

            loop {
                interval.tick().await;

                if events.send(event.clone()).is_err() {
                    break;
                }
            }
        });

        Self {
            task,
            gauge: gauge.acquire(),
        }
    }

    /// Send `event` once after `delay`.
    #[must_use]
    pub fn after<E>(delay: Duration, events: UnboundedSender<E>, event: E, gauge: &TimerGauge) -> Self
    where
        E: Send + 'static,
    {
        let task = tokio::spawn(async move {
            time::sleep(delay).await;

            // Receiver gone means the owner is already shutting down.
            _ = events.send(event);
        });

        Self {
            task,
            gauge: gauge.acquire(),
        }
    }

    /// Cancel the timer.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
        self.gauge.0.fetch_sub(1, Ordering::SeqCst);
    }
}
