//! Transient status-line notifications.
//!
//! Toasts travel over a channel so non-UI code (the API client in
//! particular) can emit them without holding a reference into UI state.
//! The main loop drains the channel each frame and the latest toast is
//! shown on the bottom line until it expires.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

pub type ToastSender = UnboundedSender<Toast>;
pub type ToastReceiver = UnboundedReceiver<Toast>;

pub fn channel() -> (ToastSender, ToastReceiver) {
    mpsc::unbounded_channel()
}

/// Holds the toast currently on screen. A newer toast replaces the
/// current one immediately.
#[derive(Debug)]
pub struct ToastState {
    current: Option<Toast>,
    deadline: Option<Instant>,
    ttl: Duration,
}

impl ToastState {
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: None,
            deadline: None,
            ttl,
        }
    }

    pub fn show(&mut self, toast: Toast) {
        self.current = Some(toast);
        // Armed on the next tick: a screen handler may block (a delayed
        // re-fetch in particular) between show and the next frame, and
        // the display time must not run down off screen.
        self.deadline = None;
    }

    /// Advance the display clock. Called once per frame, before drawing:
    /// the first tick after `show` starts the display time, a later tick
    /// past the deadline drops the toast.
    pub fn tick(&mut self) {
        if self.current.is_none() {
            return;
        }

        match self.deadline {
            None => self.deadline = Some(Instant::now() + self.ttl),
            Some(deadline) => {
                if Instant::now() >= deadline {
                    self.current = None;
                    self.deadline = None;
                }
            }
        }
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_toast<B: Backend>(frame: &mut Frame<B>, state: &ToastState, area: Rect) {
    if let Some(toast) = state.visible() {
        let style = match toast.kind {
            ToastKind::Success => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            ToastKind::Error => Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        };
        let line = Paragraph::new(format!(" {} ", toast.message)).style(style);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_toast_replaces_the_current_one() {
        let mut state = ToastState::new();
        state.show(Toast::success("saved"));
        state.show(Toast::error("network down"));

        let visible = state.visible().unwrap();
        assert_eq!(visible.kind, ToastKind::Error);
        assert_eq!(visible.message, "network down");
    }

    #[test]
    fn tick_keeps_a_fresh_toast() {
        let mut state = ToastState::new();
        state.show(Toast::success("saved"));
        state.tick();
        assert!(state.visible().is_some());
    }

    #[test]
    fn display_time_starts_at_the_first_tick_after_show() {
        // Zero TTL stands in for any delay longer than the display time:
        // however much wall time passes between show and the first tick,
        // the toast must still reach the screen once.
        let mut state = ToastState::with_ttl(Duration::ZERO);
        state.show(Toast::success("saved"));

        state.tick();
        assert!(state.visible().is_some(), "first frame must render it");
    }

    #[test]
    fn expired_toast_is_dropped() {
        let mut state = ToastState::with_ttl(Duration::ZERO);
        state.show(Toast::success("saved"));

        state.tick(); // arms the deadline
        state.tick(); // past the deadline
        assert!(state.visible().is_none());
    }
}
