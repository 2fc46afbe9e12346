//! Spinner component for Bubble Tea applications.
//!
//! This module provides the animated spinner that both waiting indicators are
//! built around. A spinner cycles through a set of frames at a fixed delay and
//! can carry a short piece of text that is rendered to the right of the frame
//! (the countdown indicator uses this to show the remaining seconds).
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_waiting::spinner::{new, with_spinner, with_style, DOT};
//! use lipgloss_extras::prelude::*;
//!
//! // Create a spinner with default settings
//! let spinner = new(&[]);
//!
//! // Create a spinner with custom settings using the option pattern
//! let spinner = new(&[
//!     with_spinner(DOT.clone()),
//!     with_style(Style::new().foreground(lipgloss::Color::from("63"))),
//! ]);
//! ```
//!
//! # Available Spinners
//!
//! - `LINE`: Basic line spinner (|, /, -, \)
//! - `DOT`: Braille dot pattern spinner
//! - `MINI_DOT`: Smaller braille dot pattern
//! - `CIRCLE`: Quarter-filled circle rotation
//! - `PULSE`: Block fade animation
//! - `POINTS`: Three dot bounce animation
//! - `ELLIPSIS`: Text ellipsis animation ("", ".", "..", "...")
//!
//! # Speed
//!
//! The delay between frames is [`Spinner::fps`]. Hosts that think in terms of
//! rotation speed can use [`Model::set_revolutions_per_second`], which derives
//! the delay from the number of frames so that one full pass over the frames
//! takes the requested time.
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bubbletea_waiting::spinner::{new, with_spinner, DOT};
//!
//! struct MyApp {
//!     spinner: bubbletea_waiting::spinner::Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let spinner = new(&[with_spinner(DOT.clone())]);
//!         let cmd = spinner.tick_cmd();
//!         (Self { spinner }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.spinner.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{} Loading...", self.spinner.view())
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for spinner instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Spinner configuration defining animation frames and timing.
///
/// # Examples
///
/// ```rust
/// use bubbletea_waiting::spinner::Spinner;
/// use std::time::Duration;
///
/// let custom = Spinner::new(
///     vec!["◐".to_string(), "◓".to_string(), "◑".to_string(), "◒".to_string()],
///     Duration::from_millis(200)
/// );
/// assert_eq!(custom.frames.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Animation frames to cycle through.
    pub frames: Vec<String>,
    /// Delay between frames; smaller is faster.
    pub fps: Duration,
}

impl Spinner {
    /// Creates a new Spinner with the given frames and frame delay.
    pub fn new(frames: Vec<String>, fps: Duration) -> Self {
        Self { frames, fps }
    }
}

fn frames(list: &[&str]) -> Vec<String> {
    list.iter().map(|f| f.to_string()).collect()
}

/// Line spinner.
pub static LINE: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["|", "/", "-", "\\"]),
    fps: Duration::from_millis(100),
});

/// Braille dot spinner.
pub static DOT: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["⣾ ", "⣽ ", "⣻ ", "⢿ ", "⡿ ", "⣟ ", "⣯ ", "⣷ "]),
    fps: Duration::from_millis(100),
});

/// Smaller braille dot spinner.
pub static MINI_DOT: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    fps: Duration::from_millis(83),
});

/// Quarter-filled circle spinner.
pub static CIRCLE: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["◐", "◓", "◑", "◒"]),
    fps: Duration::from_millis(125),
});

/// Block fade spinner.
pub static PULSE: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["█", "▓", "▒", "░"]),
    fps: Duration::from_millis(125),
});

/// Three dot bounce spinner.
pub static POINTS: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["∙∙∙", "●∙∙", "∙●∙", "∙∙●"]),
    fps: Duration::from_millis(143),
});

/// Text ellipsis spinner.
pub static ELLIPSIS: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: frames(&["", ".", "..", "..."]),
    fps: Duration::from_millis(333),
});

/// Message indicating that the spinner should advance one frame.
///
/// Ticks are routed by `id` and guarded by an internal `tag`, so a spinner only
/// reacts to the tick it scheduled last. Ticks scheduled before a
/// [`Model::stop`] are ignored.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Time is the time at which the tick occurred.
    pub time: std::time::SystemTime,
    /// ID is the identifier of the spinner that this message belongs to.
    pub id: i64,
    tag: i64,
}

/// Model represents the state and configuration of a spinner component.
///
/// A freshly created spinner is running. Call [`Model::tick_cmd`] (or use the
/// `BubbleTeaModel::init` implementation) to schedule the first frame.
#[derive(Debug, Clone)]
pub struct Model {
    /// Spinner settings to use.
    pub spinner: Spinner,
    /// Style for the animation frame.
    pub style: Style,
    /// Style for the text rendered next to the frame.
    pub text_style: Style,
    text: String,
    frame: usize,
    running: bool,
    id: i64,
    tag: i64,
}

/// Configuration option for creating a new spinner with custom settings.
///
/// ```rust
/// use bubbletea_waiting::spinner::{new, with_spinner, with_text_style, CIRCLE};
/// use lipgloss_extras::prelude::*;
///
/// let spinner = new(&[
///     with_spinner(CIRCLE.clone()),
///     with_text_style(Style::new().bold(true)),
/// ]);
/// assert_eq!(spinner.spinner.frames.len(), 4);
/// ```
pub enum SpinnerOption {
    /// Sets the animation frames and timing to use.
    WithSpinner(Spinner),
    /// Sets the lipgloss style for rendering the frame.
    WithStyle(Box<Style>),
    /// Sets the lipgloss style for rendering the text.
    WithTextStyle(Box<Style>),
}

impl SpinnerOption {
    fn apply(&self, m: &mut Model) {
        match self {
            SpinnerOption::WithSpinner(spinner) => m.spinner = spinner.clone(),
            SpinnerOption::WithStyle(style) => m.style = style.as_ref().clone(),
            SpinnerOption::WithTextStyle(style) => m.text_style = style.as_ref().clone(),
        }
    }
}

/// Creates a SpinnerOption to set the animation frames and timing.
pub fn with_spinner(spinner: Spinner) -> SpinnerOption {
    SpinnerOption::WithSpinner(spinner)
}

/// Creates a SpinnerOption to set the frame style.
pub fn with_style(style: Style) -> SpinnerOption {
    SpinnerOption::WithStyle(Box::new(style))
}

/// Creates a SpinnerOption to set the text style.
pub fn with_text_style(style: Style) -> SpinnerOption {
    SpinnerOption::WithTextStyle(Box::new(style))
}

impl Model {
    /// Creates a running spinner using the `LINE` frames and no text.
    pub fn new() -> Self {
        Self {
            spinner: LINE.clone(),
            style: Style::new(),
            text_style: Style::new(),
            text: String::new(),
            frame: 0,
            running: true,
            id: next_id(),
            tag: 0,
        }
    }

    /// Creates a spinner and applies each option in order.
    pub fn new_with_options(opts: &[SpinnerOption]) -> Self {
        let mut m = Self::new();
        for opt in opts {
            opt.apply(&mut m);
        }
        m
    }

    /// Builder method to set the animation frames and timing.
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self.frame = 0;
        self
    }

    /// Builder method to set the frame style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Builder method to set the text style.
    pub fn with_text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// Returns the spinner's unique ID.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns whether the spinner is animating.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Resumes the animation. Has no effect on a running spinner.
    ///
    /// Ticks scheduled before the last [`stop`](Self::stop) stay invalid, so the
    /// caller schedules a fresh one with [`tick_cmd`](Self::tick_cmd) if the
    /// spinner animates on its own clock.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.tag += 1;
    }

    /// Freezes the animation on the current frame.
    pub fn stop(&mut self) {
        self.running = false;
        self.tag += 1;
    }

    /// Sets the text rendered next to the frame.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns the text rendered next to the frame.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the index of the frame currently shown.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Sets the frame delay so one pass over all frames takes `1 / rps` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRevolutions`] if `rps` is not finite, not
    /// positive, or so large or small that no frame delay can represent it.
    /// The current speed is left unchanged in that case.
    ///
    /// ```rust
    /// use bubbletea_waiting::spinner::{new, with_spinner, LINE};
    /// use std::time::Duration;
    ///
    /// let mut spinner = new(&[with_spinner(LINE.clone())]);
    /// spinner.set_revolutions_per_second(0.5).unwrap();
    /// assert_eq!(spinner.spinner.fps, Duration::from_millis(500));
    ///
    /// assert!(spinner.set_revolutions_per_second(0.0).is_err());
    /// assert_eq!(spinner.spinner.fps, Duration::from_millis(500));
    /// ```
    pub fn set_revolutions_per_second(&mut self, rps: f64) -> Result<()> {
        if !rps.is_finite() || rps <= 0.0 {
            return Err(Error::InvalidRevolutions(rps));
        }
        let frame_count = self.spinner.frames.len().max(1) as f64;
        let fps = Duration::try_from_secs_f64(1.0 / (rps * frame_count))
            .map_err(|_| Error::InvalidRevolutions(rps))?;
        if fps.is_zero() {
            return Err(Error::InvalidRevolutions(rps));
        }
        self.spinner.fps = fps;
        Ok(())
    }

    /// Returns the current speed in full passes over the frames per second.
    pub fn revolutions_per_second(&self) -> f64 {
        let pass = self.spinner.fps.as_secs_f64() * self.spinner.frames.len().max(1) as f64;
        if pass == 0.0 {
            return 0.0;
        }
        1.0 / pass
    }

    /// Creates a TickMsg addressed to this spinner's current tick chain.
    ///
    /// For hosts that drive the animation from their own clock instead of
    /// the command returned by [`tick_cmd`](Self::tick_cmd).
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            time: std::time::SystemTime::now(),
            id: self.id,
            tag: self.tag,
        }
    }

    /// Schedules the next frame after the spinner's frame delay.
    pub fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let fps = self.spinner.fps;

        bubbletea_tick(fps, move |_| {
            Box::new(TickMsg {
                time: std::time::SystemTime::now(),
                id,
                tag,
            }) as Msg
        })
    }

    /// Advances one frame on a matching tick and schedules the next one.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;

        // If an ID is set, and the ID doesn't belong to this spinner, reject the message.
        if tick_msg.id > 0 && tick_msg.id != self.id {
            return None;
        }

        // Stale ticks from an earlier chain would make the spinner run too fast.
        if tick_msg.tag != self.tag {
            return None;
        }

        if !self.running {
            return None;
        }

        self.frame += 1;
        if self.frame >= self.spinner.frames.len() {
            self.frame = 0;
        }

        self.tag += 1;
        Some(self.tick_cmd())
    }

    /// Renders the current frame followed by the text, if any.
    pub fn view(&self) -> String {
        let Some(frame) = self.spinner.frames.get(self.frame) else {
            return "(error)".to_string();
        };

        let frame = self.style.render(frame);
        if self.text.is_empty() {
            return frame;
        }
        format!("{} {}", frame, self.text_style.render(&self.text))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::new();
        let cmd = model.tick_cmd();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

/// Creates a new spinner with the given options.
pub fn new(opts: &[SpinnerOption]) -> Model {
    Model::new_with_options(opts)
}
