//! Waiting indicator for Bubble Tea applications.
//!
//! A waiting indicator is a spinner with a line of text centered underneath it,
//! for screens that have nothing to show while work happens elsewhere. The
//! spinner starts spinning as soon as the indicator exists and never stops on
//! its own; the text can be replaced at any time.
//!
//! ```text
//!
//!            ⣾
//!
//!   Gathering system information...
//!
//! ```
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_waiting::waiting;
//!
//! let mut waiting = waiting::new("Gathering system information...");
//! assert!(waiting.view().contains("Gathering system information..."));
//!
//! waiting.set_text("Partitioning disks...");
//! assert_eq!(waiting.text(), "Partitioning disks...");
//! ```
//!
//! # Layout
//!
//! Without a size the indicator is exactly as wide as its longest line. Give it
//! the area it should fill with [`Model::set_size`] (typically from a
//! `WindowSizeMsg`) and the block is centered in it both ways.

use crate::spinner::{self, Spinner};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

const DEFAULT_SPACING: usize = 1;

/// Model holds the state of a waiting indicator.
#[derive(Debug, Clone)]
pub struct Model {
    /// Style for the text line.
    pub label_style: Style,
    spinner: spinner::Model,
    text: String,
    spacing: usize,
    width: usize,
    height: usize,
}

/// Creates a waiting indicator showing `text`.
pub fn new(text: impl Into<String>) -> Model {
    Model::new(text)
}

impl Model {
    /// Creates a waiting indicator showing `text`, with its spinner running.
    pub fn new(text: impl Into<String>) -> Self {
        let mut spinner = spinner::new(&[spinner::with_spinner(spinner::DOT.clone())]);
        spinner.start();

        Self {
            label_style: Style::new(),
            spinner,
            text: text.into(),
            spacing: DEFAULT_SPACING,
            width: 0,
            height: 0,
        }
    }

    /// Builder method to change the spinner frames.
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = self.spinner.with_spinner(spinner);
        self
    }

    /// Builder method to set the spinner style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.spinner = self.spinner.with_style(style);
        self
    }

    /// Builder method to set the text style.
    pub fn with_label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Builder method to set the number of blank lines between spinner and text.
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// Builder method to set the area the indicator is centered in.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.set_size(width, height);
        self
    }

    /// Replaces the text shown under the spinner.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns the text shown under the spinner.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sets the area the indicator is centered in. Zero means "fit the content".
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Returns the embedded spinner.
    pub fn spinner(&self) -> &spinner::Model {
        &self.spinner
    }

    /// Returns the command that drives the spinner animation.
    pub fn init(&self) -> Cmd {
        self.spinner.tick_cmd()
    }

    /// Forwards spinner ticks and follows window resizes.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return None;
        }
        self.spinner.update(msg)
    }

    /// Renders the spinner and text, centered in the configured area.
    pub fn view(&self) -> String {
        let spinner = self.spinner.view();
        let label = self.label_style.render(&self.text);

        let mut lines = vec![spinner.as_str()];
        lines.extend(std::iter::repeat("").take(self.spacing));
        lines.push(label.as_str());
        let block = lipgloss::join_vertical(lipgloss::CENTER, &lines);

        lipgloss::place(
            self.width as i32,
            self.height as i32,
            lipgloss::CENTER,
            lipgloss::CENTER,
            &block,
            &[],
        )
    }
}

impl Default for Model {
    fn default() -> Self {
        new("Please wait...")
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::default();
        let cmd = Model::init(&model);
        (model, Some(cmd))
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

    fn plain(text: &str) -> Model {
        new(text).with_spinner(spinner::LINE.clone())
    }

    #[test]
    fn test_new_starts_spinner() {
        let waiting = new("Loading");
        assert!(waiting.spinner().running());
        assert_eq!(waiting.text(), "Loading");
    }

    #[test]
    fn test_set_text_only_changes_text() {
        let mut waiting = plain("Loading").with_size(20, 5);
        let before = waiting.view();
        waiting.set_text("Almost");

        assert_eq!(waiting.text(), "Almost");
        assert!(waiting.spinner().running());
        assert_eq!(waiting.spinner().frame(), 0);
        assert_ne!(waiting.view(), before);
        assert_eq!(waiting.view().lines().count(), before.lines().count());
    }

    #[test]
    fn test_view_fits_content() {
        let waiting = plain("Loading");
        assert_eq!(waiting.view(), "   |   \n       \nLoading");
    }

    #[test]
    fn test_view_spacing() {
        let waiting = plain("abc").with_spacing(0);
        assert_eq!(waiting.view(), " | \nabc");
    }

    #[test]
    fn test_view_centers_in_area() {
        let waiting = plain("abc").with_spacing(0).with_size(7, 5);
        let view = waiting.view();
        let rows: Vec<&str> = view.split('\n').collect();

        assert_eq!(
            rows,
            vec!["       ", "   |   ", "  abc  ", "       ", "       "]
        );
    }

    #[test]
    fn test_view_never_truncates() {
        let waiting = plain("a long label").with_size(4, 1);
        let view = waiting.view();
        assert!(view.contains("a long label"));
        assert_eq!(view.lines().count(), 3);
    }

    #[test]
    fn test_update_advances_spinner() {
        let mut waiting = plain("Loading");
        let tick = waiting.spinner().tick_msg();

        assert!(waiting.update(Box::new(tick)).is_some());
        assert_eq!(waiting.spinner().frame(), 1);
        assert!(waiting.view().starts_with("   /"));
    }

    #[test]
    fn test_update_window_size() {
        let mut waiting = plain("ab").with_spacing(0);
        let msg = WindowSizeMsg {
            width: 6,
            height: 3,
        };

        assert!(waiting.update(Box::new(msg)).is_none());
        assert_eq!(waiting.view(), "  |   \n  ab  \n      ");
    }
}
