use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
        KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::{
    config,
    core::{CanvasLayout, StarSnapshot, StarfieldState},
    demo::DemoTimeline,
    error::AppError,
    frame::FrameDriver,
    render::{self, FrameBuffer, TargetOverlay, Viewport, CELL_ASPECT},
    types::{StarColor, Vec2},
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

const MIN_HINT_ALPHA: f32 = 0.05;

pub fn run() -> Result<(), AppError> {
    let _session = TerminalSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    tracing::info!("terminal session started");

    let result = event_loop(&mut terminal);
    tracing::info!("terminal session ended");
    result
}

/// Raw mode, alternate screen and mouse capture. Undone on drop, so early
/// returns and panics leave a usable terminal.
struct TerminalSession {
    cleanup: fn(),
}

impl TerminalSession {
    fn enter() -> Result<Self, AppError> {
        enable_raw_mode()?;
        let session = Self {
            cleanup: best_effort_cleanup,
        };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        (self.cleanup)();
    }
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture);
    let _ = execute!(stdout, cursor::Show);
    let _ = execute!(stdout, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn event_loop(terminal: &mut Term) -> Result<(), AppError> {
    let start = Instant::now();
    let mut rng = StdRng::from_entropy();
    let mut state = StarfieldState::new();
    let mut demo = DemoTimeline::new(start);
    let mut driver = FrameDriver::new(start);
    let mut ui_state = UiState::new();

    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut last_render = start;
    let mut last_fps_sample = start;
    let mut frames_at_sample = 0_u64;
    let mut fps = 0.0_f32;

    loop {
        while event::poll(Duration::from_millis(0))? {
            let now = Instant::now();
            if ui_state.handle_event(event::read()?, now, &mut demo) {
                return Ok(());
            }
        }

        if last_render.elapsed() >= render_interval {
            let now = Instant::now();
            let (canvas_block, canvas_area, footer_area) = split(terminal.size()?);
            let viewport = Viewport {
                width: canvas_area.width,
                height: canvas_area.height,
            };

            let layout = CanvasLayout {
                window_offset: Vec2::new(
                    canvas_area.x as f32,
                    canvas_area.y as f32 * CELL_ASPECT,
                ),
                ..viewport.canvas_layout()
            };
            state = state.update_bounds(&layout, &mut rng);
            demo.set_max_input(max_demo_input(viewport));
            state = driver.advance(
                now,
                &state,
                |dt| {
                    demo.tick(now, dt);
                    demo.steering()
                },
                &mut rng,
            );

            state.snapshot(&mut ui_state.snapshot);
            let scalars = demo.scalars();
            let overlay = TargetOverlay {
                center: demo.target_center(viewport.canvas_center()),
                radius: config::TARGET_RADIUS,
                alpha: scalars.target_alpha,
                stroke: scalars.target_stroke,
            };
            render::draw(
                &ui_state.snapshot,
                Some(&overlay),
                viewport,
                &mut ui_state.framebuf,
            );

            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f32();
                fps = (driver.frame_count() - frames_at_sample) as f32 / secs;
                frames_at_sample = driver.frame_count();
                last_fps_sample = Instant::now();
            }

            let lines = framebuffer_lines(&ui_state.framebuf);
            let title = format!(
                "starfield | stars: {} | demo: {:?} | fps: {:.0}",
                state.live_stars().count(),
                demo.phase(),
                fps
            );
            terminal.draw(|frame| {
                let viewport_block = Block::default().borders(Borders::ALL).title(title);
                frame.render_widget(Paragraph::new(lines).block(viewport_block), canvas_block);

                if scalars.ui_alpha >= MIN_HINT_ALPHA {
                    let hint_area = hint_rect(canvas_area);
                    let gray = StarColor::WHITE.dimmed(scalars.ui_alpha);
                    let hint = Paragraph::new(config::HINT_TEXT)
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::Rgb(gray.r, gray.g, gray.b)))
                        .block(Block::default().borders(Borders::ALL));
                    frame.render_widget(Clear, hint_area);
                    frame.render_widget(hint, hint_area);
                }

                let footer = Paragraph::new(
                    "drag: steer | arrows: nudge | space: release | q: quit",
                )
                .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, footer_area);
            })?;

            last_render = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn split(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    let canvas = Block::default().borders(Borders::ALL).inner(chunks[0]);
    (chunks[0], canvas, chunks[1])
}

fn hint_rect(canvas: Rect) -> Rect {
    let width = (config::HINT_TEXT.len() as u16 + 4).min(canvas.width);
    let height = config::HINT_HEIGHT.min(canvas.height);
    Rect {
        x: canvas.x + (canvas.width - width) / 2,
        y: (canvas.y + canvas.height).saturating_sub(height + 1).max(canvas.y),
        width,
        height,
    }
}

fn max_demo_input(viewport: Viewport) -> Vec2 {
    let layout = viewport.canvas_layout();
    let hint_margin = (config::HINT_HEIGHT + 1) as f32 * CELL_ASPECT;
    Vec2::new(
        layout.width as f32 * config::DEMO_MAX_INPUT_X_RATIO,
        (layout.height as f32 * config::DEMO_MAX_INPUT_Y_RATIO - hint_margin).max(0.0),
    )
}

fn framebuffer_lines(framebuf: &FrameBuffer) -> Vec<Line<'static>> {
    (0..framebuf.height())
        .map(|y| {
            let spans: Vec<Span> = (0..framebuf.width())
                .map(|x| {
                    let cell = framebuf.get(x, y);
                    let color = Color::Rgb(cell.color.r, cell.color.g, cell.color.b);
                    Span::styled(cell.ch.to_string(), Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

struct UiState {
    framebuf: FrameBuffer,
    snapshot: Vec<StarSnapshot>,
    drag_anchor: Option<(u16, u16)>,
}

impl UiState {
    fn new() -> Self {
        Self {
            framebuf: FrameBuffer::new(0, 0),
            snapshot: Vec::with_capacity(config::DEFAULT_PARTICLE_COUNT),
            drag_anchor: None,
        }
    }

    fn handle_event(
        &mut self,
        event: CrosstermEvent,
        now: Instant,
        demo: &mut DemoTimeline,
    ) -> bool {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Char(' ') => demo.on_drag_end(now),
                KeyCode::Left => demo.on_drag(now, Vec2::new(-config::KEY_NUDGE, 0.0)),
                KeyCode::Right => demo.on_drag(now, Vec2::new(config::KEY_NUDGE, 0.0)),
                KeyCode::Up => demo.on_drag(now, Vec2::new(0.0, -config::KEY_NUDGE)),
                KeyCode::Down => demo.on_drag(now, Vec2::new(0.0, config::KEY_NUDGE)),
                _ => {}
            },
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse, now, demo),
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant, demo: &mut DemoTimeline) {
        let pos = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_anchor = Some(pos),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(anchor) = self.drag_anchor {
                    demo.on_drag(now, drag_delta(anchor, pos));
                }
                self.drag_anchor = Some(pos);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_anchor = None;
                demo.on_drag_end(now);
            }
            _ => {}
        }
    }
}

fn drag_delta(from: (u16, u16), to: (u16, u16)) -> Vec2 {
    Vec2::new(
        to.0 as f32 - from.0 as f32,
        (to.1 as f32 - from.1 as f32) * CELL_ASPECT,
    )
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::demo::DemoPhase;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    mod session {
        use std::{
            panic,
            sync::atomic::{AtomicUsize, Ordering},
        };

        use super::*;

        static EARLY_RETURN_CLEANUPS: AtomicUsize = AtomicUsize::new(0);
        static PANIC_CLEANUPS: AtomicUsize = AtomicUsize::new(0);

        fn count_early_return() {
            EARLY_RETURN_CLEANUPS.fetch_add(1, Ordering::SeqCst);
        }

        fn count_panic() {
            PANIC_CLEANUPS.fetch_add(1, Ordering::SeqCst);
        }

        fn fails_mid_setup() -> Result<(), AppError> {
            let _session = TerminalSession {
                cleanup: count_early_return,
            };
            Err(io::Error::other("alternate screen unavailable"))?;
            Ok(())
        }

        #[test]
        fn cleanup_runs_on_error_return() {
            assert!(fails_mid_setup().is_err());
            assert_eq!(EARLY_RETURN_CLEANUPS.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn cleanup_runs_during_panic_unwind() {
            let result = panic::catch_unwind(|| {
                let _session = TerminalSession {
                    cleanup: count_panic,
                };
                panic!("frame loop panicked");
            });
            assert!(result.is_err());
            assert_eq!(PANIC_CLEANUPS.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn drag_delta_scales_rows_to_canvas_units() {
        assert_eq!(drag_delta((10, 5), (13, 4)), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn mouse_drag_steers_and_release_clears() {
        let now = Instant::now();
        let mut ui = UiState::new();
        let mut demo = DemoTimeline::new(now);

        let event = mouse(MouseEventKind::Down(MouseButton::Left), 10, 10);
        ui.handle_event(event, now, &mut demo);
        let event = mouse(MouseEventKind::Drag(MouseButton::Left), 12, 10);
        ui.handle_event(event, now, &mut demo);
        let event = mouse(MouseEventKind::Drag(MouseButton::Left), 12, 11);
        ui.handle_event(event, now, &mut demo);
        assert_eq!(demo.drag(), Vec2::new(2.0, 2.0));

        let event = mouse(MouseEventKind::Up(MouseButton::Left), 12, 11);
        ui.handle_event(event, now, &mut demo);
        assert_eq!(demo.drag(), Vec2::ZERO);
        assert_eq!(demo.phase(), DemoPhase::Pending);
    }

    #[test]
    fn arrow_keys_nudge_steering() {
        let now = Instant::now();
        let mut ui = UiState::new();
        let mut demo = DemoTimeline::new(now);
        assert!(!ui.handle_event(key(KeyCode::Right), now, &mut demo));
        assert!(!ui.handle_event(key(KeyCode::Up), now, &mut demo));
        assert_eq!(demo.drag(), Vec2::new(config::KEY_NUDGE, -config::KEY_NUDGE));
        ui.handle_event(key(KeyCode::Char(' ')), now, &mut demo);
        assert_eq!(demo.drag(), Vec2::ZERO);
    }

    #[test]
    fn quit_keys() {
        let now = Instant::now();
        let mut ui = UiState::new();
        let mut demo = DemoTimeline::new(now);
        assert!(ui.handle_event(key(KeyCode::Char('q')), now, &mut demo));
        assert!(ui.handle_event(key(KeyCode::Esc), now, &mut demo));
    }

    #[test]
    fn split_reserves_footer_and_border() {
        let (block, canvas, footer) = split(Rect::new(0, 0, 80, 24));
        assert_eq!(block, Rect::new(0, 0, 80, 21));
        assert_eq!(canvas, Rect::new(1, 1, 78, 19));
        assert_eq!(footer, Rect::new(0, 21, 80, 3));
    }

    #[test]
    fn hint_sits_at_bottom_center_of_canvas() {
        let canvas = Rect::new(1, 1, 78, 19);
        let hint = hint_rect(canvas);
        assert_eq!(hint.width, config::HINT_TEXT.len() as u16 + 4);
        assert_eq!(hint.height, config::HINT_HEIGHT);
        assert_eq!(hint.y + hint.height, canvas.y + canvas.height - 1);
        assert_eq!(hint.x, canvas.x + (canvas.width - hint.width) / 2);
    }

    #[test]
    fn demo_input_stays_above_hint() {
        let max = max_demo_input(Viewport {
            width: 100,
            height: 40,
        });
        assert!((max.x - 30.0).abs() < 1e-4);
        assert!((max.y - 32.0).abs() < 1e-4);
        let tiny = max_demo_input(Viewport {
            width: 10,
            height: 2,
        });
        assert_eq!(tiny.y, 0.0);
    }
}
