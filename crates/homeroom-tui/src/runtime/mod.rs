//! Console runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers.rs`: Effect handler implementations

mod handlers;
pub mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use homeroom_core::auth::{AuthService, ResetRequest};
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{Mutex, mpsc};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::flow::LoginFlow;
use crate::lockout::LockoutTimer;
use crate::state::{AppState, Screen};
use crate::{render, terminal, update};

/// Target frame rate while something is in flight (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when
/// nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Auth service shared between the runtime and spawned handlers.
pub type SharedAuth = Arc<Mutex<AuthService>>;

/// Full-screen console runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Auth service handed to spawned handlers.
    auth: SharedAuth,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Running lockout countdown, if any.
    lockout: Option<LockoutTimer>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new console runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        auth: SharedAuth,
        school_name: Option<String>,
        reset: Option<ResetRequest>,
    ) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = match reset {
            Some(request) => AppState::new_with_reset(school_name, request),
            None => AppState::new(school_name),
        };

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            auth,
            inbox_tx,
            inbox_rx,
            lockout: None,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if rendering or terminal polling fails.
    pub fn run(&mut self) -> Result<()> {
        // The boot screen means no reset link preempted the session check.
        if matches!(self.state.screen, Screen::Booting) {
            self.execute_effect(UiEffect::Bootstrap);
        }
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Only Tick triggers render - this caps frame rate at tick cadence
                // Terminal events update state but batch renders to next Tick
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, emitting Tick on cadence.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling keeps the spinner and countdown smooth while a
        // submission or the session check is in flight; slow polling
        // otherwise to save CPU.
        let busy = matches!(self.state.screen, Screen::Booting)
            || self.state.flow().is_some_and(LoginFlow::is_submitting)
            || self.lockout.is_some();
        let tick_interval = if busy {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Calculate time until next tick for poll duration.
        // This ensures we wake up exactly when Tick is due.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until next tick is due
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect and sends the result event to the inbox.
    ///
    /// Handlers stay pure async functions that return `UiEvent`; the
    /// runtime handles spawning.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Bootstrap => {
                let auth = self.auth.clone();
                self.spawn_effect(move || handlers::bootstrap(auth));
            }
            UiEffect::SubmitLogin { email, password } => {
                let auth = self.auth.clone();
                self.spawn_effect(move || handlers::submit_login(auth, email, password));
            }
            UiEffect::SubmitPasswordChange {
                email,
                current_password,
                new_password,
                confirm_password,
            } => {
                let auth = self.auth.clone();
                self.spawn_effect(move || {
                    handlers::change_password(
                        auth,
                        email,
                        current_password,
                        new_password,
                        confirm_password,
                    )
                });
            }
            UiEffect::SubmitTokenReset {
                token,
                email,
                new_password,
                confirm_password,
            } => {
                let auth = self.auth.clone();
                self.spawn_effect(move || {
                    handlers::reset_with_token(auth, token, email, new_password, confirm_password)
                });
            }
            UiEffect::SubmitResetRequest { email } => {
                let auth = self.auth.clone();
                self.spawn_effect(move || handlers::request_reset(auth, email));
            }
            UiEffect::Logout => {
                let auth = self.auth.clone();
                self.spawn_effect(move || handlers::logout(auth));
            }
            UiEffect::StartLockout { seconds } => {
                // Replacing the old timer drops it, which cancels it.
                self.lockout = Some(LockoutTimer::start(seconds, self.inbox_tx.clone()));
            }
            UiEffect::CancelLockout => {
                if let Some(timer) = self.lockout.take() {
                    timer.cancel();
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
