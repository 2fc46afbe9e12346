#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-waiting/")]

//! # bubbletea-waiting
//!
//! Waiting indicators for installer-style terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! Two small components cover the moments where an installer has nothing to do
//! but wait:
//!
//! - **Waiting indicator** ([`waiting`]): a spinner with a line of text centered
//!   under it. It spins for as long as it is shown.
//! - **Countdown** ([`countdown`]): a spinner that shows the seconds left, emits
//!   a [`CountdownTimeoutMsg`] when it reaches zero, and can be started,
//!   stopped, and re-armed with a new length.
//!
//! Both follow the Elm Architecture with `init()`, `update()` and `view()`, and
//! are built on the [`spinner`] component.
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_waiting::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//! use std::time::Duration;
//!
//! struct FinishedPage {
//!     restart: Countdown,
//! }
//!
//! impl Model for FinishedPage {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut restart = countdown_new(Duration::from_secs(10));
//!         let cmd = restart.start();
//!         (Self { restart }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<CountdownTimeoutMsg>() {
//!             if timeout.id == self.restart.id() {
//!                 return Some(bubbletea_rs::quit());
//!             }
//!         }
//!         self.restart.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Restarting in {}", self.restart.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! State changes are reported through [`tracing`](https://docs.rs/tracing).
//! The crate never installs a subscriber; applications that want the output
//! set one up themselves.

pub mod countdown;
pub mod error;
pub mod spinner;
pub mod waiting;

pub use countdown::{
    new as countdown_new, try_new as countdown_try_new, Model as Countdown,
    TickMsg as CountdownTickMsg, TimeoutMsg as CountdownTimeoutMsg,
};
pub use error::{Error, Result};
pub use spinner::{
    new as spinner_new, with_spinner, with_style, with_text_style, Model as Spinner,
    SpinnerOption, TickMsg as SpinnerTickMsg, CIRCLE, DOT, ELLIPSIS, LINE, MINI_DOT, POINTS,
    PULSE,
};
pub use waiting::{new as waiting_new, Model as Waiting};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_waiting::prelude::*;
/// use std::time::Duration;
///
/// let waiting = waiting_new("Loading...");
/// let countdown = countdown_new(Duration::from_secs(5));
/// assert_eq!(countdown.count(), 5);
/// assert!(waiting.spinner().running());
/// ```
pub mod prelude {
    pub use crate::countdown::{
        new as countdown_new, try_new as countdown_try_new, Model as Countdown,
        TickMsg as CountdownTickMsg, TimeoutMsg as CountdownTimeoutMsg,
    };
    pub use crate::error::Error;
    pub use crate::spinner::{
        new as spinner_new, with_spinner, with_style, with_text_style, Model as Spinner,
        SpinnerOption, TickMsg as SpinnerTickMsg, CIRCLE, DOT, ELLIPSIS, LINE, MINI_DOT, POINTS,
        PULSE,
    };
    pub use crate::waiting::{new as waiting_new, Model as Waiting};
}
