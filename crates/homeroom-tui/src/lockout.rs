//! Countdown timer for temporary account locks.
//!
//! Runs on a detached tokio task and reports back through the event
//! inbox, so the reducer sees ticks as ordinary events. At most one
//! timer exists at a time; starting a replacement drops (and thereby
//! cancels) the previous one.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::events::{FlowEvent, UiEvent};
use crate::runtime::inbox::UiEventSender;

/// Handle to a running lockout countdown.
#[derive(Debug)]
pub struct LockoutTimer {
    cancel: CancellationToken,
}

impl LockoutTimer {
    /// Starts a countdown of `seconds` whole seconds.
    ///
    /// Sends `LockoutTick { remaining }` after each elapsed second and a
    /// final `LockoutExpired` when the count reaches zero. A zero-second
    /// lock expires immediately without ticking.
    pub fn start(seconds: u32, tx: UiEventSender) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut remaining = seconds;
            if remaining == 0 {
                let _ = tx.send(UiEvent::Flow(FlowEvent::LockoutExpired));
                return;
            }
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    () = sleep(Duration::from_secs(1)) => {
                        remaining -= 1;
                        if remaining == 0 {
                            let _ = tx.send(UiEvent::Flow(FlowEvent::LockoutExpired));
                            break;
                        }
                        let _ = tx.send(UiEvent::Flow(FlowEvent::LockoutTick { remaining }));
                    }
                }
            }
        });
        Self { cancel }
    }

    /// Stops the countdown; no further events are sent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LockoutTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
