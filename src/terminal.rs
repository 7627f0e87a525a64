//! Raw mode and alternate screen handling.
//!
//! [`TerminalGuard`] puts the terminal into full-screen mode and puts it back
//! on drop. A panic hook does the same so a crash never leaves the shell in
//! raw mode.

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{self, Write};
use std::panic;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALT_SCREEN_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// Full-screen terminal session; restored when dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Enables raw mode and switches to the alternate screen.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        let guard = Self;

        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);

        execute!(io::stdout(), EnterAlternateScreen)?;
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Undoes whatever [`TerminalGuard::enter`] managed to set up. Idempotent.
pub fn restore() {
    if RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if ALT_SCREEN_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore();
            let location = info
                .location()
                .map_or_else(
                    || "unknown".to_string(),
                    |loc| format!("{}:{}", loc.file(), loc.line()),
                );
            tracing::error!(%location, "panic: {info}");
            previous(info);
        }));
    });
}
