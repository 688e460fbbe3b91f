use crate::config::HeadingConfig;
use crate::events::AppEvent;
use async_channel::Sender;
use gyre::heading::HeadingSample;
use tokio::time::{self, MissedTickBehavior};

/// Turns clockwise at a steady rate, reporting wrapped bearings.
pub async fn run_sweep(tx: Sender<AppEvent>, cfg: HeadingConfig) {
    let tick = cfg.tick();
    let step = cfg.sweep_degrees_per_sec * tick.as_secs_f64();
    let mut interval = time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut degrees = cfg.fixed_degrees;
    loop {
        interval.tick().await;
        let sample = HeadingSample::new(degrees.rem_euclid(360.0));
        if tx.send(AppEvent::Heading(sample)).await.is_err() {
            log::debug!("heading sweep stopped, receiver gone");
            return;
        }
        degrees += step;
    }
}

pub async fn send_fixed(tx: &Sender<AppEvent>, degrees: f64) {
    if tx
        .send(AppEvent::Heading(HeadingSample::new(degrees)))
        .await
        .is_err()
    {
        log::error!("Failed to deliver fixed heading");
    }
}
