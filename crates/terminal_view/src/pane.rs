//! Terminal pane hosting the mail client session.

use crate::colors::Palette;
use crate::render::{build_render_data, DisplayState, RenderData};
use alacritty_terminal::event::{Event, EventListener, WindowSize};
use alacritty_terminal::term::{Config as TermConfig, Term, TermMode};
use alacritty_terminal::vte::ansi::{CursorShape, Processor, Rgb};
use gpui::*;
use parking_lot::{Mutex, RwLock};
use settings::constants::terminal::{CURSOR_THICKNESS, INITIAL_COLS, INITIAL_ROWS, PADDING};
use settings::constants::timing::{ACTIVE_POLL_INTERVAL, IDLE_POLL_INTERVAL, IDLE_THRESHOLD};
use settings::Config;
use std::sync::Arc;
use terminal::{PtyHandler, SpawnSpec, TermSize, TerminalProcessor};

/// Measure one cell with the same shaping used to paint.
fn calculate_cell_dimensions(
    window: &mut Window,
    font_size: f32,
    font_family: &SharedString,
) -> (f32, f32) {
    let font = font(font_family.clone());
    let font_size_px = px(font_size);
    let text_system = window.text_system();
    let font_id = text_system.resolve_font(&font);

    let cell_width: f32 = match text_system.advance(font_id, font_size_px, '0') {
        Ok(size) => size.width.into(),
        Err(_) => {
            let run = TextRun {
                len: 1,
                font: font.clone(),
                color: black(),
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            let shaped = text_system.shape_line("0".into(), font_size_px, &[run], None);
            shaped.width.into()
        }
    };

    let ascent: f32 = text_system.ascent(font_id, font_size_px).into();
    let descent: f32 = text_system.descent(font_id, font_size_px).into();
    let cell_height = ascent + descent.abs();

    tracing::debug!(
        font = %font_family,
        size = font_size,
        cell_width,
        cell_height,
        "Cell dimensions calculated"
    );

    (cell_width, cell_height)
}

/// Answers the client's terminal queries (cursor position, colors, size)
/// by writing back into the PTY.
#[derive(Clone)]
struct Listener {
    pty: Arc<Mutex<Option<PtyHandler>>>,
    display: Arc<RwLock<DisplayState>>,
}

impl Listener {
    fn pty_write(&self, data: &[u8]) {
        let mut pty_guard = self.pty.lock();
        if let Some(ref mut pty) = *pty_guard {
            if let Err(e) = pty.write(data) {
                tracing::warn!(error = %e, "PTY write-back failed");
            }
        }
    }
}

impl EventListener for Listener {
    fn send_event(&self, event: Event) {
        match event {
            Event::PtyWrite(text) => self.pty_write(text.as_bytes()),
            Event::ColorRequest(_index, formatter) => {
                let response = formatter(Rgb {
                    r: 0x1d,
                    g: 0x1f,
                    b: 0x21,
                });
                self.pty_write(response.as_bytes());
            }
            Event::TextAreaSizeRequest(formatter) => {
                let (size, (cell_width, cell_height)) = {
                    let display = self.display.read();
                    (display.size, display.cell_dims)
                };
                let response = formatter(WindowSize {
                    num_lines: size.rows,
                    num_cols: size.cols,
                    cell_width: cell_width as u16,
                    cell_height: cell_height as u16,
                });
                self.pty_write(response.as_bytes());
            }
            _ => {}
        }
    }
}

/// Emitted once when the mail client exits.
#[derive(Clone, Debug)]
pub struct TerminalExitEvent;

/// The one terminal session: PTY, emulator state and its rendering.
pub struct TerminalPane {
    pty: Arc<Mutex<Option<PtyHandler>>>,
    term: Arc<Mutex<Term<Listener>>>,
    display: Arc<RwLock<DisplayState>>,
    focus_handle: FocusHandle,
    font_family: SharedString,
    palette: Palette,
    exit_emitted: bool,
    /// Dropping it stops the VT thread.
    vt_processor: Option<TerminalProcessor>,
}

impl EventEmitter<TerminalExitEvent> for TerminalPane {}

impl TerminalPane {
    /// Spawn the configured mail client and start polling its output.
    ///
    /// A spawn failure is not fatal: the error is written into the grid and
    /// the pane stays up without a session.
    pub fn new(config: &Config, cx: &mut Context<Self>) -> Self {
        let display_state = DisplayState {
            size: TermSize {
                cols: INITIAL_COLS,
                rows: INITIAL_ROWS,
            },
            font_size: config.font_size,
            ..DisplayState::default()
        };
        let size = display_state.size;
        let display = Arc::new(RwLock::new(display_state));

        let spec = SpawnSpec {
            program: config.mail_command.clone(),
            term: config.term.clone(),
        };
        let (pty, spawn_error) = match PtyHandler::spawn(size.rows, size.cols, &spec) {
            Ok(pty) => (Some(pty), None),
            Err(e) => {
                tracing::error!("Failed to start mail client: {:#}", e);
                (None, Some(format!("{:#}", e)))
            }
        };
        let pty = Arc::new(Mutex::new(pty));

        let listener = Listener {
            pty: pty.clone(),
            display: display.clone(),
        };
        let term = Arc::new(Mutex::new(Term::new(
            TermConfig::default(),
            &size,
            listener,
        )));

        // Tab must reach the client instead of moving focus
        let focus_handle = cx.focus_handle().tab_stop(false);

        if let Some(error) = spawn_error {
            let message = format!(
                "\x1b[31m\x1b[1mError: could not start '{}'\x1b[0m\r\n\r\n{}\r\n\r\n\
                 \x1b[33mCheck mail-command in {}\x1b[0m\r\n",
                spec.program,
                error,
                settings::config_path().display()
            );
            let mut processor: Processor = Processor::new();
            processor.advance(&mut *term.lock(), message.as_bytes());
        }

        let vt_processor = Self::start_vt_processor(&pty, term.clone(), cx);

        Self {
            pty,
            term,
            display,
            focus_handle,
            font_family: config.font_family.clone().into(),
            palette: Palette::default(),
            exit_emitted: false,
            vt_processor,
        }
    }

    /// Start the VT thread and a timer task that repaints on new output and
    /// emits [`TerminalExitEvent`] when the child goes away.
    fn start_vt_processor(
        pty: &Arc<Mutex<Option<PtyHandler>>>,
        term: Arc<Mutex<Term<Listener>>>,
        cx: &mut Context<Self>,
    ) -> Option<TerminalProcessor> {
        let (output_rx, exited) = {
            let mut pty_guard = pty.lock();
            let pty = pty_guard.as_mut()?;
            (pty.take_output_receiver()?, pty.exited_flag())
        };

        let vt_processor = match TerminalProcessor::start(output_rx, term, exited) {
            Ok(vt) => vt,
            Err(e) => {
                tracing::error!("{:#}", e);
                return None;
            }
        };

        cx.spawn(async move |this, cx| {
            let mut idle_count = 0u32;

            loop {
                let interval = if idle_count >= IDLE_THRESHOLD {
                    IDLE_POLL_INTERVAL
                } else {
                    ACTIVE_POLL_INTERVAL
                };
                cx.background_executor().timer(interval).await;

                let (should_exit, had_data) = this
                    .update(cx, |pane, cx| {
                        let Some(vt) = pane.vt_processor.as_ref() else {
                            return (true, false);
                        };
                        let needs_render = vt.take_render_needed();
                        let is_exited = vt.has_exited();

                        if needs_render {
                            cx.notify();
                        }
                        if is_exited && !pane.exit_emitted {
                            pane.exit_emitted = true;
                            tracing::info!("Mail client exited");
                            cx.emit(TerminalExitEvent);
                            return (true, needs_render);
                        }
                        (false, needs_render)
                    })
                    .unwrap_or((true, false));

                if had_data {
                    idle_count = 0;
                } else {
                    idle_count = idle_count.saturating_add(1);
                }

                if should_exit {
                    break;
                }
            }
        })
        .detach();

        Some(vt_processor)
    }

    /// Send bytes to the mail client.
    ///
    /// A failed write means the child is gone; the PTY is dropped so the
    /// session is treated as exited from then on.
    pub fn write(&mut self, bytes: &[u8]) {
        let mut pty_guard = self.pty.lock();
        let Some(ref mut pty) = *pty_guard else {
            tracing::trace!(len = bytes.len(), "No session, dropping write");
            return;
        };
        tracing::trace!(bytes = ?String::from_utf8_lossy(bytes), "Session write");
        if let Err(e) = pty.write(bytes) {
            tracing::warn!(
                error = %e,
                len = bytes.len(),
                "PTY write failed, mail client likely exited"
            );
            *pty_guard = None;
        }
    }

    /// Whether the client has switched cursor keys to application mode.
    pub fn application_cursor_keys(&self) -> bool {
        self.term.lock().mode().contains(TermMode::APP_CURSOR)
    }

    pub fn has_exited(&self) -> bool {
        match &*self.pty.lock() {
            None => true,
            Some(pty) => pty.has_exited(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

/// Grid size for `bounds`, and the PTY/term resize when it changed.
fn sync_size(
    bounds: Bounds<Pixels>,
    display: &RwLock<DisplayState>,
    pty: &Mutex<Option<PtyHandler>>,
    term: &Mutex<Term<Listener>>,
) -> (f32, f32) {
    let (cell_width, cell_height, current) = {
        let display = display.read();
        (display.cell_dims.0, display.cell_dims.1, display.size)
    };

    let width: f32 = bounds.size.width.into();
    let height: f32 = bounds.size.height.into();
    let new_size = TermSize::from_pixels(
        (width - PADDING * 2.0).max(0.0),
        (height - PADDING * 2.0).max(0.0),
        cell_width,
        cell_height,
    );

    if new_size != current {
        display.write().size = new_size;
        if let Some(ref pty) = *pty.lock() {
            if let Err(e) = pty.resize(new_size.rows, new_size.cols) {
                tracing::warn!(
                    cols = new_size.cols,
                    rows = new_size.rows,
                    error = %e,
                    "PTY resize failed"
                );
            }
        }
        term.lock().resize(new_size);
        tracing::debug!(cols = new_size.cols, rows = new_size.rows, "Terminal resized");
    }

    (cell_width, cell_height)
}

fn paint_grid(
    origin: Point<Pixels>,
    data: &RenderData,
    (cell_width, cell_height): (f32, f32),
    font_family: &SharedString,
    font_size: f32,
    window: &mut Window,
    cx: &mut App,
) {
    let cell_origin = |row: usize, col: usize| {
        Point::new(
            origin.x + px(PADDING + col as f32 * cell_width),
            origin.y + px(PADDING + row as f32 * cell_height),
        )
    };

    for region in &data.bg_regions {
        window.paint_quad(fill(
            Bounds::new(
                cell_origin(region.row, region.col_start),
                size(
                    px((region.col_end - region.col_start) as f32 * cell_width),
                    px(cell_height),
                ),
            ),
            region.color,
        ));
    }

    let base = font(font_family.clone());
    let font_size_px = px(font_size);
    let line_height = px(cell_height);
    for cell in &data.cells {
        let flags = cell.flags;
        let font = Font {
            weight: if flags.contains(alacritty_terminal::term::cell::Flags::BOLD) {
                FontWeight::BOLD
            } else {
                FontWeight::NORMAL
            },
            style: if flags.contains(alacritty_terminal::term::cell::Flags::ITALIC) {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            },
            ..base.clone()
        };
        let text: SharedString = cell.c.to_string().into();
        let run = TextRun {
            len: text.len(),
            font,
            color: cell.fg,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped = window
            .text_system()
            .shape_line(text, font_size_px, &[run], None);
        if let Err(e) = shaped.paint(cell_origin(cell.row, cell.col), line_height, window, cx) {
            tracing::trace!("Cell paint failed: {}", e);
        }
    }

    if let Some(cursor) = data.cursor {
        let at = cell_origin(cursor.row, cursor.col);
        let thickness = px(CURSOR_THICKNESS);
        let width = px(cell_width);
        let height = px(cell_height);
        let bars: Vec<Bounds<Pixels>> = match cursor.shape {
            CursorShape::Beam => vec![Bounds::new(at, size(thickness, height))],
            CursorShape::Underline => vec![Bounds::new(
                Point::new(at.x, at.y + height - thickness),
                size(width, thickness),
            )],
            CursorShape::Hidden => Vec::new(),
            CursorShape::Block | CursorShape::HollowBlock => vec![
                Bounds::new(at, size(width, thickness)),
                Bounds::new(
                    Point::new(at.x, at.y + height - thickness),
                    size(width, thickness),
                ),
                Bounds::new(at, size(thickness, height)),
                Bounds::new(
                    Point::new(at.x + width - thickness, at.y),
                    size(thickness, height),
                ),
            ],
        };
        for bar in bars {
            window.paint_quad(fill(bar, cursor.color));
        }
    }
}

impl Render for TerminalPane {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (font_size, needs_recalc) = {
            let display = self.display.read();
            let key = (display.font_size.to_bits(), self.font_family.clone());
            (
                display.font_size,
                display.cached_font_key.as_ref() != Some(&key),
            )
        };
        if needs_recalc {
            let dims = calculate_cell_dimensions(window, font_size, &self.font_family);
            let mut display = self.display.write();
            display.cell_dims = dims;
            display.cached_font_key = Some((font_size.to_bits(), self.font_family.clone()));
        }

        let term = self.term.clone();
        let pty = self.pty.clone();
        let display = self.display.clone();
        let palette = self.palette;
        let font_family = self.font_family.clone();

        div()
            .id("terminal-pane")
            .track_focus(&self.focus_handle)
            .size_full()
            .bg(palette.background)
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _: &MouseDownEvent, window, _cx| {
                    window.focus(&this.focus_handle);
                }),
            )
            .child(
                canvas(
                    move |bounds, _window, _cx| {
                        let cell_dims = sync_size(bounds, &display, &pty, &term);
                        let term = term.lock();
                        (build_render_data(&*term, &palette), cell_dims)
                    },
                    move |bounds, (data, cell_dims), window, cx| {
                        paint_grid(
                            bounds.origin,
                            &data,
                            cell_dims,
                            &font_family,
                            font_size,
                            window,
                            cx,
                        );
                    },
                )
                .size_full(),
            )
    }
}

impl Focusable for TerminalPane {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
