// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Forwards SIGINT and SIGTERM into the session's signal channel.

use tokio::signal;
use tracing::debug;

use crate::application::cancellation::{signal_channel, SignalReceiver, TerminationSignal};

/// Install the signal handlers and return the receiving end.
///
/// Must be called from within a tokio runtime. The listener task runs until
/// the receiver is dropped.
pub fn spawn_signal_listener() -> std::io::Result<SignalReceiver> {
    let (tx, rx) = signal_channel();

    #[cfg(unix)]
    {
        use signal::unix::{signal as unix_signal, SignalKind};

        let mut interrupt = unix_signal(SignalKind::interrupt())?;
        let mut terminate = unix_signal(SignalKind::terminate())?;

        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    Some(()) = interrupt.recv() => TerminationSignal::Interrupt,
                    Some(()) = terminate.recv() => TerminationSignal::Terminate,
                    else => break,
                };
                debug!(signal = %received, "Forwarding termination signal");
                if tx.send(received).is_err() {
                    break;
                }
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while signal::ctrl_c().await.is_ok() {
                debug!("Forwarding Ctrl+C");
                if tx.send(TerminationSignal::Interrupt).is_err() {
                    break;
                }
            }
        });
    }

    Ok(rx)
}
