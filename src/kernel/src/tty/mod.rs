//! Virtual terminal subsystem.
//!
//! Turns raw keyboard scancodes into line-buffered input for three virtual
//! consoles that share one physical screen.
//!
//! # Architecture
//!
//! - `keymap`: scancode to character tables
//! - `modifiers`: shift/ctrl/alt tracking
//! - `line`: per-terminal line discipline buffer
//! - `terminal`: one virtual console and its handle type
//! - `manager`: the terminal table, output routing and Alt+Fn switching
//! - `queue`: completed lines waiting for a reader
//!
//! [`TtySystem`] owns all of it. Every scancode goes through
//! [`TtySystem::handle_scancode`], which edits the line of whichever
//! terminal is on screen; finished lines are queued on that terminal, so a
//! reader only ever sees lines typed into its own console.

pub mod keymap;
pub mod line;
pub mod manager;
pub mod modifiers;
pub mod queue;
pub mod terminal;

pub use keymap::{Key, Keymap, Scancode, SpecialKey, KEYMAP};
pub use line::{LineBuffer, Push};
pub use manager::TerminalManager;
pub use modifiers::ModifierTracker;
pub use queue::LineQueue;
pub use terminal::{TtyId, VirtualTerminal, TTY_COUNT};

use crate::config::TtyConfig;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use lumen_common::TtyError;
use lumen_hal::{Keyboard, Screen};
use spin::Mutex;

/// State touched on every keystroke, kept under one lock.
struct Console<S> {
    manager: TerminalManager,
    modifiers: ModifierTracker,
    screen: S,
}

/// The terminal subsystem: terminals, screen, keyboard and input routing.
pub struct TtySystem<S, K> {
    console: Mutex<Console<S>>,
    keyboard: Mutex<Option<K>>,
    ready: [LineQueue; TTY_COUNT],
}

impl<S: Screen, K: Keyboard> TtySystem<S, K> {
    /// Brings up the terminals on `screen`.
    ///
    /// The first terminal adopts whatever is already displayed. Without a
    /// keyboard every read fails immediately.
    pub fn new(mut screen: S, keyboard: Option<K>, config: &TtyConfig) -> Self {
        let mut manager = TerminalManager::new(config.colors);
        manager.adopt_screen(&mut screen);

        if keyboard.is_none() {
            log::warn!("tty: no keyboard, reads will fail");
        }
        log::info!("tty: {} terminals ready, {} active", TTY_COUNT, manager.active());

        TtySystem {
            console: Mutex::new(Console {
                manager,
                modifiers: ModifierTracker::new(),
                screen,
            }),
            keyboard: Mutex::new(keyboard),
            ready: TtyId::ALL.map(|_| LineQueue::new(config.ready_lines)),
        }
    }

    /// True if a keyboard was supplied at init.
    pub fn has_keyboard(&self) -> bool {
        self.keyboard.lock().is_some()
    }

    /// The terminal currently on screen.
    pub fn active(&self) -> TtyId {
        self.console.lock().manager.active()
    }

    /// Puts `target` on screen.
    pub fn switch_to(&self, target: TtyId) {
        let mut console = self.console.lock();
        let Console {
            manager, screen, ..
        } = &mut *console;
        manager.switch_to(target, screen);
        log::info!("tty: switched to {}", target);
    }

    /// Writes output to terminal `id`. Returns `bytes.len()`.
    pub fn write(&self, id: TtyId, bytes: &[u8]) -> usize {
        let mut console = self.console.lock();
        let Console {
            manager, screen, ..
        } = &mut *console;
        manager.write(id, bytes, screen)
    }

    /// Runs `f` against terminal `id`.
    pub fn with_terminal<R>(&self, id: TtyId, f: impl FnOnce(&VirtualTerminal) -> R) -> R {
        f(self.console.lock().manager.terminal(id))
    }

    /// Runs `f` against the physical screen.
    pub fn with_screen<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.console.lock().screen)
    }

    /// Decodes one raw scancode.
    ///
    /// Modifiers are updated first, unconditionally. Alt+F1..F3 presses
    /// switch terminals and go no further. Releases, table holes and
    /// navigation keys are dropped. Anything else edits the active
    /// terminal's line and is echoed; a newline queues the line for that
    /// terminal's readers.
    pub fn handle_scancode(&self, raw: u8) {
        let scancode = Scancode(raw);
        let mut console = self.console.lock();
        let Console {
            manager,
            modifiers,
            screen,
        } = &mut *console;

        let held = modifiers.on_scancode(raw);
        if scancode.is_release() {
            return;
        }

        if held.alt() {
            if let Some(target) = TtyId::for_function_key(scancode.key()) {
                manager.switch_to(target, screen);
                log::info!("tty: switched to {}", target);
                return;
            }
        }

        let byte = match KEYMAP.translate(held, scancode) {
            Some(Key::Char(byte)) => byte,
            Some(Key::Special(_)) | None => return,
        };

        let id = manager.active();
        let line = manager.terminal_mut(id).line_mut();
        match byte {
            0x08 => {
                if line.backspace() {
                    manager.write(id, &[byte], screen);
                }
            }
            b'\n' => {
                let finished = line.complete(usize::MAX).to_vec();
                manager.write(id, &[byte], screen);
                if let Some(dropped) = self.ready[id.index()].push(finished) {
                    log::warn!("tty: {} ready queue full, dropped {} bytes", id, dropped.len());
                }
            }
            byte => match line.push(byte) {
                Push::Stored => {
                    manager.write(id, &[byte], screen);
                }
                Push::Overflowed => {
                    log::debug!("tty: {} line overflow, line discarded", id);
                }
            },
        }
    }

    /// Takes one pending scancode from the keyboard without decoding it.
    pub fn poll_scancode(&self) -> Option<u8> {
        self.keyboard.lock().as_mut()?.read_scancode()
    }

    /// Polls the keyboard once and handles the scancode, if there was one.
    ///
    /// Returns false when the keyboard had nothing (or there is none).
    pub fn pump(&self) -> bool {
        match self.poll_scancode() {
            Some(raw) => {
                self.handle_scancode(raw);
                true
            }
            None => false,
        }
    }

    /// Reads one line typed into terminal `id`, spinning on the keyboard.
    ///
    /// Blocks until a line is available. Copies at most `buf.len()` bytes;
    /// the rest of the line is dropped. The newline itself is not returned.
    pub fn read(&self, id: TtyId, buf: &mut [u8]) -> Result<usize, TtyError> {
        self.check_read(id, buf)?;
        loop {
            if let Some(line) = self.ready[id.index()].pop() {
                return Ok(copy_line(&line, buf));
            }
            if !self.pump() {
                core::hint::spin_loop();
            }
        }
    }

    /// Reads one line typed into terminal `id` without polling.
    ///
    /// The returned future resolves once the keyboard dispatcher queues a
    /// line for this terminal. See [`crate::task::keyboard::dispatch_scancodes`].
    pub fn read_line<'a>(&'a self, id: TtyId, buf: &'a mut [u8]) -> ReadLine<'a, S, K> {
        ReadLine { tty: self, id, buf }
    }

    fn check_read(&self, id: TtyId, buf: &[u8]) -> Result<(), TtyError> {
        if !self.has_keyboard() {
            log::debug!("tty: read on {} rejected, no keyboard", id);
            return Err(TtyError::KeyboardUnavailable);
        }
        if buf.is_empty() {
            log::debug!("tty: zero-length read on {}", id);
            return Err(TtyError::EmptyRead);
        }
        Ok(())
    }
}

fn copy_line(line: &[u8], buf: &mut [u8]) -> usize {
    let count = line.len().min(buf.len());
    buf[..count].copy_from_slice(&line[..count]);
    count
}

/// Future returned by [`TtySystem::read_line`].
pub struct ReadLine<'a, S, K> {
    tty: &'a TtySystem<S, K>,
    id: TtyId,
    buf: &'a mut [u8],
}

impl<S: Screen, K: Keyboard> Future for ReadLine<'_, S, K> {
    type Output = Result<usize, TtyError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let Err(err) = this.tty.check_read(this.id, this.buf) {
            return Poll::Ready(Err(err));
        }
        this.tty.ready[this.id.index()]
            .poll_pop(cx)
            .map(|line| Ok(copy_line(&line, this.buf)))
    }
}
