//! Dedicated VT processing thread.
//!
//! Escape-sequence parsing runs on its own OS thread so heavy client output
//! never stalls the UI event loop. The UI learns about new output through an
//! `AtomicBool` render-needed flag that it polls on a timer.

use alacritty_terminal::event::EventListener;
use alacritty_terminal::term::Term;
use alacritty_terminal::vte::ansi::Processor;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Minimum interval between render signals.
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(4);

/// Blocking receive timeout while idle; bounds shutdown latency.
const IDLE_RECV_TIMEOUT: Duration = Duration::from_millis(100);

const BATCH_BUFFER_CAPACITY: usize = 65536;

/// Owns the VT thread's control flags.
///
/// Dropping signals the thread to stop. It is not joined: the thread holds
/// the term lock briefly and the dropping caller may hold it too.
pub struct TerminalProcessor {
    shutdown: Arc<AtomicBool>,
    render_needed: Arc<AtomicBool>,
    exited_flag: Arc<AtomicBool>,
}

impl TerminalProcessor {
    /// Start parsing `output_rx` into `term`.
    ///
    /// `exited` is the PTY's exit flag; the thread stops once it is set.
    pub fn start<L>(
        output_rx: Receiver<Vec<u8>>,
        term: Arc<Mutex<Term<L>>>,
        exited: Arc<AtomicBool>,
    ) -> Result<Self>
    where
        L: EventListener + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let render_needed = Arc::new(AtomicBool::new(false));

        let shutdown_clone = shutdown.clone();
        let render_needed_clone = render_needed.clone();
        let exited_clone = exited.clone();

        thread::Builder::new()
            .name("mailshell-vt-processor".into())
            .spawn(move || {
                vt_thread_loop(
                    output_rx,
                    term,
                    exited_clone,
                    render_needed_clone,
                    shutdown_clone,
                );
            })
            .context("Failed to spawn VT processing thread")?;

        Ok(Self {
            shutdown,
            render_needed,
            exited_flag: exited,
        })
    }

    /// Check and clear the render-needed flag.
    pub fn take_render_needed(&self) -> bool {
        self.render_needed.swap(false, Ordering::AcqRel)
    }

    pub fn has_exited(&self) -> bool {
        self.exited_flag.load(Ordering::Acquire)
    }
}

impl Drop for TerminalProcessor {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
    }
}

/// Batch all pending output, parse it under a brief term lock, then raise
/// the render flag (throttled).
fn vt_thread_loop<L: EventListener>(
    output_rx: Receiver<Vec<u8>>,
    term: Arc<Mutex<Term<L>>>,
    exited: Arc<AtomicBool>,
    render_needed: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
) {
    let mut processor: Processor = Processor::new();
    // In the past, so the first batch always signals
    let mut last_signal = Instant::now() - MIN_FRAME_INTERVAL;
    let mut batch_buffer = Vec::with_capacity(BATCH_BUFFER_CAPACITY);

    loop {
        if shutdown.load(Ordering::Acquire) {
            break;
        }

        match output_rx.recv_timeout(IDLE_RECV_TIMEOUT) {
            Ok(data) => {
                batch_buffer.clear();
                batch_buffer.extend_from_slice(&data);
                while let Ok(more) = output_rx.try_recv() {
                    batch_buffer.extend_from_slice(&more);
                }

                {
                    let mut term_guard = term.lock();
                    processor.advance(&mut *term_guard, &batch_buffer);
                }

                let now = Instant::now();
                if now.duration_since(last_signal) >= MIN_FRAME_INTERVAL {
                    render_needed.store(true, Ordering::Release);
                    last_signal = now;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Reader thread is gone, so is the child
                render_needed.store(true, Ordering::Release);
                break;
            }
        }

        if exited.load(Ordering::Acquire) {
            render_needed.store(true, Ordering::Release);
            break;
        }
    }
    tracing::debug!("VT processing thread stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermSize;
    use alacritty_terminal::event::Event;
    use alacritty_terminal::index::{Column, Line};
    use alacritty_terminal::term::Config;

    #[derive(Clone)]
    struct TestListener;
    impl EventListener for TestListener {
        fn send_event(&self, _event: Event) {}
    }

    fn new_term() -> Arc<Mutex<Term<TestListener>>> {
        let size = TermSize::default();
        Arc::new(Mutex::new(Term::new(Config::default(), &size, TestListener)))
    }

    fn wait_for(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for VT thread");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn parses_output_into_grid_and_signals() {
        let (output_tx, output_rx) = std::sync::mpsc::channel();
        let term = new_term();
        let exited = Arc::new(AtomicBool::new(false));

        let vt = TerminalProcessor::start(output_rx, term.clone(), exited).unwrap();
        output_tx.send(b"neomutt".to_vec()).unwrap();

        wait_for(|| vt.take_render_needed());

        let term_guard = term.lock();
        let grid = term_guard.grid();
        assert_eq!(grid[Line(0)][Column(0)].c, 'n');
        assert_eq!(grid[Line(0)][Column(6)].c, 't');
    }

    #[test]
    fn signals_once_the_child_exits() {
        let (output_tx, output_rx) = std::sync::mpsc::channel::<Vec<u8>>();
        let exited = Arc::new(AtomicBool::new(false));

        let vt = TerminalProcessor::start(output_rx, new_term(), exited.clone()).unwrap();
        exited.store(true, Ordering::Release);
        drop(output_tx);

        wait_for(|| vt.take_render_needed());
        assert!(vt.has_exited());
    }

    #[test]
    fn stops_on_drop_while_idle() {
        let (_output_tx, output_rx) = std::sync::mpsc::channel::<Vec<u8>>();
        let exited = Arc::new(AtomicBool::new(false));

        let vt = TerminalProcessor::start(output_rx, new_term(), exited).unwrap();
        assert!(!vt.has_exited());
        drop(vt);
    }
}
