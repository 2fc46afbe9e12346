//! Countdown indicator for Bubble Tea applications.
//!
//! A countdown shows a spinner with the number of seconds left next to it. While
//! running it counts down once per second; when the count reaches zero it shows
//! `0` for a full second, emits a [`TimeoutMsg`], and then wraps around to the
//! full duration and keeps counting. The spinner animates on its own at one
//! revolution per countdown.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_waiting::countdown;
//! use std::time::Duration;
//!
//! let mut countdown = countdown::new(Duration::from_secs(3));
//! assert!(!countdown.running());
//! assert_eq!(countdown.count(), 3);
//!
//! // Ticks normally arrive from the runtime once per second; they can also be
//! // applied directly.
//! assert!(!countdown.tick()); // 2
//! assert!(!countdown.tick()); // 1
//! assert!(countdown.tick());  // 0, timed out
//! assert!(!countdown.tick()); // wrapped back to 3
//! assert_eq!(countdown.count(), 3);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! Forward messages to the countdown so it sees its own ticks. The
//! [`TimeoutMsg`] is only a notification: the countdown carries on from the
//! full duration whether or not the host forwards it, unless the host calls
//! [`Model::stop`] in response.
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bubbletea_waiting::countdown::{self, TimeoutMsg};
//! use std::time::Duration;
//!
//! struct InstallPage {
//!     countdown: countdown::Model,
//!     advanced: bool,
//! }
//!
//! impl BubbleTeaModel for InstallPage {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = countdown::new(Duration::from_secs(10));
//!         let cmd = countdown.start();
//!         (Self { countdown, advanced: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.countdown.id() {
//!                 self.countdown.stop();
//!                 self.advanced = true;
//!                 return None;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Continuing in {}", self.countdown.view())
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::spinner::{self, Spinner};
use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Time between two countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const DEFAULT_DURATION: Duration = Duration::from_secs(10);

/// Message sent once per second to advance a running countdown.
///
/// Ticks are only accepted by the countdown that scheduled them, and only if
/// no [`Model::start`] or [`Model::stop`] happened in between.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the countdown that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Message sent when a countdown reaches zero.
///
/// The tick that follows is scheduled alongside it, so the countdown does not
/// depend on this message being handed back.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// The unique identifier of the countdown that timed out.
    pub id: i64,
}

/// Model holds the state of a countdown indicator.
///
/// The count always stays within `0..=duration` seconds. A new countdown is
/// stopped and shows the full duration.
#[derive(Debug, Clone)]
pub struct Model {
    duration: Duration,
    count: u64,
    spinner: spinner::Model,
    id: i64,
    tag: i64,
    running: bool,
}

/// Creates a stopped countdown of `duration`, truncated to whole seconds.
///
/// A duration below one second is accepted; such a countdown shows `0` and
/// times out on every tick. Use [`try_new`] to reject it instead.
pub fn new(duration: Duration) -> Model {
    Model::new(duration)
}

/// Creates a stopped countdown, rejecting durations shorter than one second.
///
/// # Errors
///
/// Returns [`Error::ZeroDuration`] if `duration` is less than one second.
///
/// ```rust
/// use bubbletea_waiting::{countdown, Error};
/// use std::time::Duration;
///
/// assert!(countdown::try_new(Duration::from_secs(5)).is_ok());
/// assert_eq!(
///     countdown::try_new(Duration::from_millis(300)).unwrap_err(),
///     Error::ZeroDuration
/// );
/// ```
pub fn try_new(duration: Duration) -> Result<Model> {
    if duration.as_secs() == 0 {
        return Err(Error::ZeroDuration);
    }
    Ok(Model::new(duration))
}

impl Model {
    /// Creates a stopped countdown. See [`new`].
    pub fn new(duration: Duration) -> Self {
        let mut spinner = spinner::new(&[spinner::with_spinner(spinner::CIRCLE.clone())]);
        spinner.stop();

        let mut m = Self {
            duration,
            count: 0,
            spinner,
            id: next_id(),
            tag: 0,
            running: false,
        };
        m.set_interval(duration);
        m
    }

    /// Builder method to change the spinner frames. The rotation speed is
    /// recomputed for the new frame count.
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = self.spinner.with_spinner(spinner);
        self.sync_rotation();
        self
    }

    /// Builder method to set the style of the spinner frame.
    pub fn with_style(mut self, style: Style) -> Self {
        self.spinner = self.spinner.with_style(style);
        self
    }

    /// Builder method to set the style of the remaining-seconds number.
    pub fn with_count_style(mut self, style: Style) -> Self {
        self.spinner = self.spinner.with_text_style(style);
        self
    }

    /// Returns the countdown's unique ID.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns whether the countdown is ticking.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Returns the remaining seconds.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the full countdown length.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }

    /// Returns the embedded spinner.
    pub fn spinner(&self) -> &spinner::Model {
        &self.spinner
    }

    fn seconds(&self) -> u64 {
        self.duration.as_secs()
    }

    /// Sets a new countdown length and restarts the count from it.
    ///
    /// The display is updated right away. A running countdown keeps running and
    /// counts down from the new length on its next tick.
    pub fn set_interval(&mut self, duration: Duration) {
        self.duration = duration;
        self.count = self.seconds();
        self.sync_rotation();
        self.refresh();
        debug!(id = self.id, seconds = self.count, "countdown interval set");
    }

    /// Starts the countdown and returns the command driving its ticks and
    /// the spinner animation.
    ///
    /// Returns `None` if the countdown is already running. A countdown that
    /// was stopped mid-way resumes from its current count; one that was left
    /// at zero starts over from the full duration.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.running {
            return None;
        }
        if self.count == 0 {
            self.count = self.seconds();
            self.refresh();
        }

        self.running = true;
        self.tag += 1;
        self.spinner.start();
        debug!(id = self.id, count = self.count, "countdown started");
        Some(batch(vec![self.tick_cmd(), self.spinner.tick_cmd()]))
    }

    /// Stops the countdown. The count is kept and ticks already scheduled are
    /// ignored.
    pub fn stop(&mut self) {
        if self.running {
            debug!(id = self.id, count = self.count, "countdown stopped");
        }
        self.running = false;
        self.tag += 1;
        self.spinner.stop();
    }

    /// Stops a running countdown or starts a stopped one.
    pub fn toggle(&mut self) -> Option<Cmd> {
        if self.running {
            self.stop();
            return None;
        }
        self.start()
    }

    /// Advances the countdown by one second.
    ///
    /// The count goes down by one; counting down from zero wraps around to the
    /// full duration, so zero is shown for a whole tick. Returns `true` exactly
    /// when the count has just reached zero.
    pub fn tick(&mut self) -> bool {
        self.count = match self.count.checked_sub(1) {
            Some(count) => count,
            None => self.seconds(),
        };
        self.refresh();

        let timed_out = self.count == 0;
        if timed_out {
            debug!(id = self.id, "countdown timed out");
        } else {
            trace!(id = self.id, count = self.count, "countdown tick");
        }
        timed_out
    }

    /// Creates a TickMsg addressed to this countdown's current tick chain.
    ///
    /// For hosts that drive the countdown from their own clock instead of the
    /// commands returned by [`start`](Self::start) and [`update`](Self::update).
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn timeout_cmd(&self) -> Cmd {
        let id = self.id;

        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }

    /// Handles the countdown's ticks and the embedded spinner's frames.
    ///
    /// On a tick the count advances and the next tick is scheduled. When zero
    /// is reached a [`TimeoutMsg`] is emitted together with that next tick.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }
            if !self.running || tick_msg.tag != self.tag {
                trace!(id = self.id, tag = tick_msg.tag, "ignoring stale countdown tick");
                return None;
            }

            self.tag += 1;
            if self.tick() {
                return Some(batch(vec![self.timeout_cmd(), self.tick_cmd()]));
            }
            return Some(self.tick_cmd());
        }

        self.spinner.update(msg)
    }

    /// Renders the spinner with the remaining seconds next to it.
    pub fn view(&self) -> String {
        self.spinner.view()
    }

    fn refresh(&mut self) {
        self.spinner.set_text(self.count.to_string());
    }

    fn sync_rotation(&mut self) {
        let seconds = self.seconds();
        if let Err(err) = self
            .spinner
            .set_revolutions_per_second(1.0 / seconds as f64)
        {
            warn!(id = self.id, seconds, %err, "keeping previous spinner speed");
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        new(DEFAULT_DURATION)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::default();
        let cmd = model.start();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_new_is_stopped_at_full_count() {
        let countdown = new(secs(3));

        assert!(!countdown.running());
        assert!(!countdown.spinner().running());
        assert_eq!(countdown.count(), 3);
        assert_eq!(countdown.duration(), secs(3));
        assert!(countdown.id() > 0);
        assert!(countdown.view().ends_with('3'));
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(new(secs(1)).id(), new(secs(1)).id());
    }

    #[test]
    fn test_duration_truncates_to_seconds() {
        let countdown = new(Duration::from_millis(2900));
        assert_eq!(countdown.count(), 2);
        assert_eq!(countdown.duration(), secs(2));
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert_eq!(try_new(Duration::ZERO).unwrap_err(), Error::ZeroDuration);
        assert_eq!(try_new(secs(4)).unwrap().count(), 4);
    }

    #[test]
    fn test_three_second_scenario() {
        let mut countdown = new(secs(3));
        assert_eq!(countdown.spinner().text(), "3");
        assert!(countdown.start().is_some());

        let mut shown = Vec::new();
        let mut fired = Vec::new();
        for _ in 0..4 {
            fired.push(countdown.tick());
            shown.push(countdown.spinner().text().to_string());
        }

        assert_eq!(shown, vec!["2", "1", "0", "3"]);
        assert_eq!(fired, vec![false, false, true, false]);
    }

    #[test]
    fn test_count_follows_modular_sequence() {
        for d in 1..=6u64 {
            let mut countdown = new(secs(d));
            for n in 1..=3 * (d + 1) {
                countdown.tick();
                let expected = (d + (d + 1) * n - n) % (d + 1);
                assert_eq!(countdown.count(), expected, "d={} n={}", d, n);
                assert!(countdown.count() <= d);
            }
        }
    }

    #[test]
    fn test_timeout_fires_once_per_cycle() {
        let d = 4;
        let mut countdown = new(secs(d));
        let fired_at: Vec<u64> = (1..=3 * (d + 1))
            .filter(|_| countdown.tick())
            .collect();

        assert_eq!(fired_at, vec![d, 2 * d + 1, 3 * d + 2]);
    }

    #[test]
    fn test_start_resets_only_at_zero() {
        let mut countdown = new(secs(3));
        countdown.start();
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.count(), 2);

        countdown.start();
        assert_eq!(countdown.count(), 2);

        countdown.tick();
        assert!(countdown.tick());
        countdown.stop();
        countdown.start();
        assert_eq!(countdown.count(), 3);
        assert_eq!(countdown.spinner().text(), "3");
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut countdown = new(secs(3));
        assert!(countdown.start().is_some());
        let tick = countdown.tick_msg();
        assert!(countdown.start().is_none());

        // The first chain is still the live one.
        assert!(countdown.update(Box::new(tick)).is_some());
        assert_eq!(countdown.count(), 2);
    }

    #[test]
    fn test_set_interval_resets_count_and_keeps_state() {
        let mut countdown = new(secs(3));
        countdown.start();
        countdown.tick();

        countdown.set_interval(secs(5));
        assert!(countdown.running());
        assert_eq!(countdown.count(), 5);
        assert_eq!(countdown.spinner().text(), "5");

        countdown.tick();
        assert_eq!(countdown.count(), 4);

        countdown.stop();
        countdown.set_interval(secs(2));
        assert!(!countdown.running());
        assert_eq!(countdown.count(), 2);
    }

    #[test]
    fn test_stop_rejects_pending_ticks() {
        let mut countdown = new(secs(3));
        countdown.start();
        let pending = countdown.tick_msg();

        countdown.stop();
        assert!(!countdown.spinner().running());
        assert!(countdown.update(Box::new(pending)).is_none());
        assert_eq!(countdown.count(), 3);
    }

    #[test]
    fn test_restart_invalidates_old_chain() {
        let mut countdown = new(secs(3));
        countdown.start();
        let old = countdown.tick_msg();
        countdown.stop();
        countdown.start();
        let current = countdown.tick_msg();

        assert!(countdown.update(Box::new(old)).is_none());
        assert!(countdown.update(Box::new(current)).is_some());
        assert_eq!(countdown.count(), 2);
    }

    #[test]
    fn test_update_ignores_other_countdowns() {
        let mut a = new(secs(3));
        let mut b = new(secs(3));
        a.start();
        b.start();

        assert!(a.update(Box::new(b.tick_msg())).is_none());
        assert_eq!(a.count(), 3);
    }

    #[test]
    fn test_update_only_accepts_each_tick_once() {
        let mut countdown = new(secs(3));
        countdown.start();
        let tick = countdown.tick_msg();

        assert!(countdown.update(Box::new(tick.clone())).is_some());
        assert!(countdown.update(Box::new(tick)).is_none());
        assert_eq!(countdown.count(), 2);
    }

    #[test]
    fn test_keeps_ticking_when_timeout_is_not_forwarded() {
        let mut countdown = new(secs(2));
        countdown.start();
        for _ in 0..2 {
            let tick = countdown.tick_msg();
            assert!(countdown.update(Box::new(tick)).is_some());
        }
        assert_eq!(countdown.count(), 0);
        assert!(countdown.running());

        // The host swallows the TimeoutMsg; the scheduled tick still wraps.
        let tick = countdown.tick_msg();
        assert!(countdown.update(Box::new(tick)).is_some());
        assert_eq!(countdown.count(), 2);
        assert_eq!(countdown.spinner().text(), "2");
    }

    #[test]
    fn test_forwarded_timeout_is_ignored() {
        let mut countdown = new(secs(1));
        countdown.start();
        let tick = countdown.tick_msg();
        countdown.update(Box::new(tick));

        let timeout = TimeoutMsg { id: countdown.id() };
        assert!(countdown.update(Box::new(timeout)).is_none());
        assert_eq!(countdown.count(), 0);
    }

    #[test]
    fn test_zero_duration_degenerates() {
        let mut countdown = new(Duration::ZERO);
        assert_eq!(countdown.count(), 0);
        assert_eq!(countdown.spinner().spinner.fps, spinner::CIRCLE.fps);

        countdown.start();
        assert!(countdown.tick());
        assert!(countdown.tick());
        assert_eq!(countdown.count(), 0);
    }

    #[test]
    fn test_spinner_makes_one_revolution_per_countdown() {
        let countdown = new(secs(8));
        assert_eq!(countdown.spinner().spinner.fps, secs(2));
        assert!((countdown.spinner().revolutions_per_second() - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_spinner_animates_only_while_running() {
        let mut countdown = new(secs(8));
        let frame_tick = countdown.spinner().tick_msg();
        assert!(countdown.update(Box::new(frame_tick)).is_none());
        assert_eq!(countdown.spinner().frame(), 0);

        countdown.start();
        assert!(countdown.spinner().running());
        let frame_tick = countdown.spinner().tick_msg();
        assert!(countdown.update(Box::new(frame_tick)).is_some());
        assert_eq!(countdown.spinner().frame(), 1);
        // Spinner frames do not move the count.
        assert_eq!(countdown.count(), 8);

        countdown.stop();
        let frame_tick = countdown.spinner().tick_msg();
        assert!(countdown.update(Box::new(frame_tick)).is_none());
        assert_eq!(countdown.spinner().frame(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut countdown = new(secs(3));
        assert!(countdown.toggle().is_some());
        assert!(countdown.running());
        assert!(countdown.toggle().is_none());
        assert!(!countdown.running());
    }

    #[test]
    fn test_with_spinner_recomputes_speed() {
        let countdown = new(secs(10)).with_spinner(spinner::LINE.clone());
        assert_eq!(countdown.spinner().spinner.fps, Duration::from_millis(2500));
        assert_eq!(countdown.count(), 10);
    }

    #[test]
    fn test_default() {
        let countdown = Model::default();
        assert_eq!(countdown.duration(), DEFAULT_DURATION);
        assert!(!countdown.running());
    }
}
