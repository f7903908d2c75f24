#![forbid(unsafe_code)]

//! Terminal session lifecycle.
//!
//! [`TerminalSession`] enters raw mode and the requested terminal modes on
//! creation and leaves them, in reverse order, when dropped. A panic hook
//! performs the same cleanup so a crash never leaves the terminal in raw
//! mode.

use std::io::{self, Write};
use std::sync::OnceLock;

use trellis_core::logging::{debug, info};

/// Input queue length used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Terminal modes to enable for a session.
///
/// ```
/// use trellis_tty::SessionOptions;
///
/// let opts = SessionOptions::default().with_alternate_screen(false);
/// assert!(opts.mouse_capture);
/// assert_eq!(opts.queue_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Switch to the alternate screen, preserving scrollback.
    pub alternate_screen: bool,
    /// Report mouse buttons, motion, and wheel.
    pub mouse_capture: bool,
    /// Deliver pasted text as a single paste event.
    pub bracketed_paste: bool,
    /// Bound of the queue between the input thread and the event loop.
    pub queue_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl SessionOptions {
    /// Raw mode only.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            alternate_screen: false,
            mouse_capture: false,
            bracketed_paste: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    #[must_use]
    pub fn with_mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    #[must_use]
    pub fn with_bracketed_paste(mut self, enabled: bool) -> Self {
        self.bracketed_paste = enabled;
        self
    }

    /// Input queue bound; zero is raised to one.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }
}

/// Raw-mode terminal session, restored on drop.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
    bracketed_paste_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and the modes named in `options`.
    ///
    /// # Errors
    ///
    /// Fails if raw mode or any requested mode cannot be enabled. Whatever
    /// was already enabled is undone before returning.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        info!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            mouse_enabled: false,
            bracketed_paste_enabled: false,
        };

        let mut stdout = io::stdout();
        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            info!("alternate screen enabled");
        }
        if options.mouse_capture {
            session.set_mouse_capture(true)?;
        }
        if options.bracketed_paste {
            crossterm::execute!(stdout, crossterm::event::EnableBracketedPaste)?;
            session.bracketed_paste_enabled = true;
            info!("bracketed paste enabled");
        }
        crossterm::execute!(stdout, crossterm::cursor::Hide)?;

        Ok(session)
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_enabled
    }

    /// Turn mouse reporting on or off. Repeating the current state writes
    /// nothing.
    pub fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.mouse_enabled {
            return Ok(());
        }
        let mut stdout = io::stdout();
        if enabled {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
        } else {
            crossterm::execute!(stdout, crossterm::event::DisableMouseCapture)?;
        }
        self.mouse_enabled = enabled;
        debug!(enabled, "mouse capture toggled");
        Ok(())
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.bracketed_paste_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableBracketedPaste);
            self.bracketed_paste_enabled = false;
            info!("bracketed paste disabled");
        }
        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
            info!("mouse capture disabled");
        }
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            info!("alternate screen disabled");
        }
        let _ = stdout.flush();

        let _ = crossterm::terminal::disable_raw_mode();
        info!("terminal raw mode disabled");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::event::DisableBracketedPaste);
    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}
