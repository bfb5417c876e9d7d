//! PTY process management.

use anyhow::{Context, Result};
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

const READ_BUFFER_SIZE: usize = 4096;

/// What to run in the PTY.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    /// Program name or path, run without arguments.
    pub program: String,
    /// Value exported as `TERM`.
    pub term: String,
}

/// One PTY with one child process attached.
///
/// The child is killed and reaped on drop.
pub struct PtyHandler {
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    output_rx: Option<Receiver<Vec<u8>>>,
    exited: Arc<AtomicBool>,
    child: Box<dyn Child + Send + Sync>,
    _reader_thread: thread::JoinHandle<()>,
}

impl PtyHandler {
    /// Open a PTY of `rows` x `cols` and spawn `spec.program` on it.
    pub fn spawn(rows: u16, cols: u16, spec: &SpawnSpec) -> Result<Self> {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to open PTY")?;

        let mut cmd = CommandBuilder::new(&spec.program);
        cmd.env("TERM", &spec.term);

        let child = pair
            .slave
            .spawn_command(cmd)
            .with_context(|| format!("Failed to spawn {}", spec.program))?;

        // The master only reads EOF once no slave fd is left open in this process
        drop(pair.slave);
        let master = pair.master;

        let writer = master
            .take_writer()
            .context("Failed to get PTY writer")?;

        let mut reader = master
            .try_clone_reader()
            .context("Failed to get PTY reader")?;

        let (output_tx, output_rx): (Sender<Vec<u8>>, Receiver<Vec<u8>>) = mpsc::channel();

        let exited = Arc::new(AtomicBool::new(false));
        let exited_clone = exited.clone();

        let reader_thread = thread::Builder::new()
            .name("mailshell-pty-reader".into())
            .spawn(move || {
                let mut buf = [0u8; READ_BUFFER_SIZE];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => {
                            // EOF: the child closed its side
                            exited_clone.store(true, Ordering::SeqCst);
                            break;
                        }
                        Ok(n) => {
                            if output_tx.send(buf[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::debug!("PTY read ended: {}", e);
                            exited_clone.store(true, Ordering::SeqCst);
                            break;
                        }
                    }
                }
            })
            .context("Failed to spawn PTY reader thread")?;

        tracing::info!(
            program = %spec.program,
            pid = ?child.process_id(),
            rows,
            cols,
            "Spawned mail client"
        );

        Ok(Self {
            master,
            writer,
            output_rx: Some(output_rx),
            exited,
            child,
            _reader_thread: reader_thread,
        })
    }

    /// Hand the output channel to the VT processor. Yields `Some` once.
    pub fn take_output_receiver(&mut self) -> Option<Receiver<Vec<u8>>> {
        self.output_rx.take()
    }

    /// Shared flag set when the child's side of the PTY closes.
    pub fn exited_flag(&self) -> Arc<AtomicBool> {
        self.exited.clone()
    }

    /// Write input bytes to the PTY.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }

    /// Resize the PTY
    pub fn resize(&self, rows: u16, cols: u16) -> Result<()> {
        self.master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to resize PTY")?;
        Ok(())
    }
}

impl Drop for PtyHandler {
    fn drop(&mut self) {
        self.exited.store(true, Ordering::SeqCst);

        // ESRCH is expected if the child already exited
        if let Err(e) = self.child.kill() {
            tracing::debug!("Kill child process: {}", e);
        }

        if let Err(e) = self.child.wait() {
            tracing::debug!("Wait for child process: {}", e);
        }

        tracing::debug!("PTY handler dropped, child process cleaned up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn spec(program: &str) -> SpawnSpec {
        SpawnSpec {
            program: program.into(),
            term: "xterm-256color".into(),
        }
    }

    fn wait_for_exit(pty: &PtyHandler, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !pty.has_exited() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
        true
    }

    #[test]
    fn notices_when_the_child_exits() {
        let pty = PtyHandler::spawn(24, 80, &spec("true")).unwrap();
        assert!(
            wait_for_exit(&pty, Duration::from_secs(5)),
            "exit of a finished child was never observed"
        );
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        assert!(PtyHandler::spawn(24, 80, &spec("/nonexistent/mailshell-client")).is_err());
    }
}
