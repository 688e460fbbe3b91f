use crate::config::{HeadingConfig, HeadingSourceKind};
use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket, config watcher and configured heading source on a
/// dedicated tokio runtime. Everything reaches the UI thread through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>, heading: HeadingConfig) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            log::info!("heading source: {}", heading.source);
            match heading.source {
                HeadingSourceKind::Socket => {}
                HeadingSourceKind::Simulated => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::simulator::run_sweep(tx, heading).await;
                    });
                }
                HeadingSourceKind::Fixed => {
                    crate::sys::simulator::send_fixed(&tx, heading.fixed_degrees).await;
                }
            }

            std::future::pending::<()>().await;
        });
    });
}
