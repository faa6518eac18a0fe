//! Keyboard input stream and the dispatcher task.

use super::{Priority, Task};
use crate::tty::TtySystem;
use alloc::sync::Arc;
use core::{
    pin::Pin,
    task::{Context, Poll},
};
use futures_util::stream::{Stream, StreamExt};
use lumen_hal::{Keyboard, Screen};

/// Scancodes polled from the keyboard owned by a [`TtySystem`].
///
/// The keyboard raises no interrupts here, so an empty poll reschedules the
/// task right away and the executor hands the CPU to other ready tasks in
/// between. Ends at once if there is no keyboard.
pub struct KeyboardStream<S, K> {
    tty: Arc<TtySystem<S, K>>,
}

impl<S, K> KeyboardStream<S, K> {
    /// Streams from `tty`'s keyboard.
    pub fn new(tty: Arc<TtySystem<S, K>>) -> Self {
        KeyboardStream { tty }
    }
}

impl<S: Screen, K: Keyboard> Stream for KeyboardStream<S, K> {
    type Item = u8;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<u8>> {
        if !self.tty.has_keyboard() {
            return Poll::Ready(None);
        }
        match self.tty.poll_scancode() {
            Some(scancode) => Poll::Ready(Some(scancode)),
            None => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}

/// The input task for `tty`: [`dispatch_scancodes`] over its own keyboard.
///
/// Spawn it once after boot; terminal readers then wait in
/// [`TtySystem::read_line`] instead of polling.
pub fn keyboard_task<S, K>(tty: Arc<TtySystem<S, K>>) -> Task
where
    S: Screen + 'static,
    K: Keyboard + 'static,
{
    let scancodes = KeyboardStream::new(tty.clone());
    Task::with_priority(dispatch_scancodes(tty, scancodes), Priority::High)
}

/// Feeds every scancode from `scancodes` to `tty`.
///
/// This is the only consumer of the keyboard once spawned; readers wait on
/// their own terminal's line queue instead of polling. Returns when the
/// stream ends.
pub async fn dispatch_scancodes<S, K, St>(tty: Arc<TtySystem<S, K>>, mut scancodes: St)
where
    S: Screen,
    K: Keyboard,
    St: Stream<Item = u8> + Unpin,
{
    while let Some(scancode) = scancodes.next().await {
        tty.handle_scancode(scancode);
    }
    log::debug!("keyboard: scancode stream ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TtyConfig;
    use crate::task::executor::Executor;
    use crate::testutil::{MemoryScreen, ScriptedKeyboard};
    use crate::tty::keymap::{keys, RELEASE_BIT};
    use crate::tty::TtyId;
    use alloc::vec;
    use alloc::vec::Vec;
    use futures_util::stream;
    use lumen_common::TtyError;
    use spin::Mutex;

    type TestTty = TtySystem<MemoryScreen, ScriptedKeyboard>;

    fn system(keyboard: Option<ScriptedKeyboard>) -> (Arc<TestTty>, MemoryScreen) {
        let screen = MemoryScreen::new();
        let tty = Arc::new(TtySystem::new(screen.clone(), keyboard, &TtyConfig::default()));
        (tty, screen)
    }

    fn spawn_reader(
        executor: &mut Executor,
        tty: &Arc<TestTty>,
        id: TtyId,
        size: usize,
    ) -> Arc<Mutex<Option<Result<Vec<u8>, TtyError>>>> {
        let result = Arc::new(Mutex::new(None));
        let slot = result.clone();
        let tty = tty.clone();
        executor.spawn(Task::new(async move {
            let mut buf = vec![0u8; size];
            let outcome = tty.read_line(id, &mut buf).await;
            *slot.lock() = Some(outcome.map(|n| buf[..n].to_vec()));
        }));
        result
    }

    fn spawn_dispatcher(executor: &mut Executor, tty: &Arc<TestTty>, scancodes: Vec<u8>) {
        executor.spawn(Task::with_priority(
            dispatch_scancodes(tty.clone(), stream::iter(scancodes)),
            Priority::High,
        ));
    }

    #[test]
    fn test_reader_wakes_on_its_line() {
        let (tty, screen) = system(Some(ScriptedKeyboard::default()));
        let mut executor = Executor::new();

        let line = spawn_reader(&mut executor, &tty, TtyId::TTY1, 16);
        executor.run_until_idle();
        assert!(line.lock().is_none());

        spawn_dispatcher(&mut executor, &tty, vec![0x23, 0x23 | RELEASE_BIT, 0x17, keys::ENTER]);
        executor.run_until_idle();

        assert_eq!(*line.lock(), Some(Ok(b"hi".to_vec())));
        assert_eq!(screen.text(0), "hi");
        assert_eq!(executor.pending_tasks(), 0);
    }

    #[test]
    fn test_background_reader_is_not_starved() {
        let (tty, _) = system(Some(ScriptedKeyboard::default()));
        let mut executor = Executor::new();
        let first = spawn_reader(&mut executor, &tty, TtyId::TTY1, 16);
        let second = spawn_reader(&mut executor, &tty, TtyId::TTY2, 16);

        spawn_dispatcher(
            &mut executor,
            &tty,
            vec![
                keys::ALT,
                keys::F2,
                keys::ALT | RELEASE_BIT,
                0x17,
                keys::ENTER,
                keys::ALT,
                keys::F1,
                keys::ALT | RELEASE_BIT,
                0x23,
                keys::ENTER,
            ],
        );
        executor.run_until_idle();

        assert_eq!(*second.lock(), Some(Ok(b"i".to_vec())));
        assert_eq!(*first.lock(), Some(Ok(b"h".to_vec())));
        assert_eq!(tty.active(), TtyId::TTY1);
    }

    #[test]
    fn test_async_read_rejects_bad_requests() {
        let (tty, _) = system(None);
        let mut executor = Executor::new();
        let result = spawn_reader(&mut executor, &tty, TtyId::TTY1, 4);
        executor.run_until_idle();
        assert_eq!(*result.lock(), Some(Err(TtyError::KeyboardUnavailable)));

        let (tty, _) = system(Some(ScriptedKeyboard::default()));
        let result = spawn_reader(&mut executor, &tty, TtyId::TTY1, 0);
        executor.run_until_idle();
        assert_eq!(*result.lock(), Some(Err(TtyError::EmptyRead)));
    }

    #[test]
    fn test_keyboard_stream_yields_then_waits() {
        let keyboard = ScriptedKeyboard::new(&[0x1E, 0x9E]);
        let (tty, _) = system(Some(keyboard.clone()));
        let mut scancodes = KeyboardStream::new(tty);

        let waker = futures_util::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert_eq!(Pin::new(&mut scancodes).poll_next(&mut cx), Poll::Ready(Some(0x1E)));
        assert_eq!(Pin::new(&mut scancodes).poll_next(&mut cx), Poll::Ready(Some(0x9E)));
        assert_eq!(Pin::new(&mut scancodes).poll_next(&mut cx), Poll::Pending);

        keyboard.feed(&[0x23]);
        assert_eq!(Pin::new(&mut scancodes).poll_next(&mut cx), Poll::Ready(Some(0x23)));
    }

    #[test]
    fn test_keyboard_stream_ends_without_keyboard() {
        let (tty, _) = system(None);
        let mut scancodes = KeyboardStream::new(tty);
        let waker = futures_util::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert_eq!(Pin::new(&mut scancodes).poll_next(&mut cx), Poll::Ready(None));
    }

    #[test]
    fn test_keyboard_task_feeds_waiting_readers() {
        let keyboard = ScriptedKeyboard::default();
        let (tty, screen) = system(Some(keyboard.clone()));
        let mut executor = Executor::new();
        let first = spawn_reader(&mut executor, &tty, TtyId::TTY1, 16);
        let second = spawn_reader(&mut executor, &tty, TtyId::TTY2, 16);
        executor.spawn(keyboard_task(tty.clone()));

        executor.run_once();
        assert!(first.lock().is_none());
        assert!(second.lock().is_none());

        keyboard.feed(&[0x23, keys::ALT, keys::F2, keys::ALT | RELEASE_BIT, 0x17, keys::ENTER]);
        executor.run_once();
        assert_eq!(*second.lock(), Some(Ok(b"i".to_vec())));
        assert!(first.lock().is_none());

        keyboard.feed(&[keys::ALT, keys::F1, keys::ALT | RELEASE_BIT, keys::ENTER]);
        executor.run_once();
        assert_eq!(*first.lock(), Some(Ok(b"h".to_vec())));
        assert_eq!(screen.text(0), "h");
        // the input task keeps polling
        assert_eq!(executor.pending_tasks(), 1);
    }
}
