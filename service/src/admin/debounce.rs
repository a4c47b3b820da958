//! [`Debouncer`] definition.

use std::{future::Future, time::Duration};

use tokio::{task, time};

/// Coalescer of rapid repeated events into a single scheduled action.
///
/// Scheduling cancels the previously scheduled action outright, so at most
/// one action runs per quiet interval, carrying the latest payload.
#[derive(Debug, Default)]
pub struct Debouncer {
    /// Pending scheduled action, if any.
    pending: Option<task::JoinHandle<()>>,
}

impl Debouncer {
    /// Schedules the provided `action` to run once the `quiet` interval
    /// elapses without another [`Debouncer::schedule()`] call.
    ///
    /// # Panics
    ///
    /// If called outside a [`task::LocalSet`] context.
    pub fn schedule<F>(&mut self, quiet: Duration, action: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.pending = Some(task::spawn_local(async move {
            time::sleep(quiet).await;
            action.await;
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{
        cell::Cell,
        rc::Rc,
        time::Duration,
    };

    use tokio::{task, time};

    use super::Debouncer;

    #[tokio::test(start_paused = true)]
    async fn runs_action_after_quiet_interval() {
        task::LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let mut debouncer = Debouncer::default();

                let f = Rc::clone(&fired);
                debouncer.schedule(Duration::from_millis(300), async move {
                    f.set(true);
                });

                time::sleep(Duration::from_millis(299)).await;
                assert!(!fired.get());

                time::sleep(Duration::from_millis(2)).await;
                assert!(fired.get());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_cancels_pending_action() {
        task::LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(0));
                let mut debouncer = Debouncer::default();

                for _ in 0..5 {
                    let f = Rc::clone(&fired);
                    debouncer.schedule(
                        Duration::from_millis(300),
                        async move {
                            f.set(f.get() + 1);
                        },
                    );
                    time::sleep(Duration::from_millis(100)).await;
                }
                time::sleep(Duration::from_millis(300)).await;

                assert_eq!(fired.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_action() {
        task::LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let mut debouncer = Debouncer::default();

                let f = Rc::clone(&fired);
                debouncer.schedule(Duration::from_millis(300), async move {
                    f.set(true);
                });
                drop(debouncer);

                time::sleep(Duration::from_millis(301)).await;
                assert!(!fired.get());
            })
            .await;
    }
}
