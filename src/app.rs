//! The host: owns the section widgets, mounts and unmounts them, routes input
//! to the widgets that listen for it, and drives their frame requests.

use crate::contact::FormSender;
use crate::form::ContactWidget;
use crate::hero::HeroWidget;
use crate::lifecycle::{FrameScheduler, ListenerKind, Listeners, WidgetId};
use crate::projects::ProjectsWidget;
use crate::skills::SkillsWidget;
use crate::state::{AppState, Section};
use crate::surface::Surface;
use crate::theme::{Theme, ThemeStore, PRIMARY};
use crate::widget::{Event, EventCtx, Layout, LifeCycle, PaintCtx, Widget};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

/// Input the host understands, already translated from the terminal
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Key(KeyEvent),
    /// Pointer over a terminal cell
    Pointer { col: u16, row: u16 },
    /// Pointer left the window (focus lost)
    PointerLeave,
    Resize { cols: u16, rows: u16 },
}

pub struct App {
    pub state: AppState,
    layout: Layout,
    themes: ThemeStore,
    current_theme: Rc<Cell<Theme>>,
    listeners: Listeners,
    frames: FrameScheduler,
    sections: Vec<(Section, Box<dyn Widget>)>,
    mounted: Option<Section>,
    needs_paint: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
}

fn widget_id(section: Section) -> WidgetId {
    WidgetId(section.index() as u32)
}

impl App {
    pub fn new(
        state: AppState,
        layout: Layout,
        mut themes: ThemeStore,
        sender: Arc<dyn FormSender>,
    ) -> anyhow::Result<Self> {
        let current_theme = Rc::new(Cell::new(themes.theme()));
        let sink = Rc::clone(&current_theme);
        themes.subscribe(move |theme| sink.set(theme));

        let sections: Vec<(Section, Box<dyn Widget>)> = vec![
            (Section::Hero, Box::new(HeroWidget::new()) as Box<dyn Widget>),
            (Section::Skills, Box::new(SkillsWidget::from_content()?)),
            (Section::Projects, Box::new(ProjectsWidget)),
            (Section::Contact, Box::new(ContactWidget::new(sender))),
        ];

        let mut app = App {
            state,
            layout,
            themes,
            current_theme,
            listeners: Listeners::new(),
            frames: FrameScheduler::new(),
            sections,
            mounted: None,
            needs_paint: true,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
        };
        app.state.theme = app.current_theme.get();
        let first = app.state.section;
        app.show(first);
        Ok(app)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn mounted(&self) -> Option<Section> {
        self.mounted
    }

    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    fn with_widget<F>(&mut self, section: Section, f: F) -> (bool, bool)
    where
        F: FnOnce(&mut dyn Widget, &mut EventCtx, &mut AppState),
    {
        let Some((_, widget)) = self.sections.iter_mut().find(|(s, _)| *s == section) else {
            return (false, false);
        };
        let mut ctx = EventCtx::new(widget_id(section), &mut self.listeners, &mut self.frames);
        f(widget.as_mut(), &mut ctx, &mut self.state);
        (ctx.is_handled(), ctx.paint_requested())
    }

    fn lifecycle(&mut self, section: Section, event: LifeCycle) {
        let (_, paint) = self.with_widget(section, |widget, ctx, state| {
            widget.lifecycle(ctx, &event, state)
        });
        self.needs_paint |= paint;
    }

    fn dispatch(&mut self, section: Section, event: Event) -> bool {
        let (handled, paint) =
            self.with_widget(section, |widget, ctx, state| widget.event(ctx, &event, state));
        self.needs_paint |= paint;
        handled
    }

    /// Unmounts the current section and mounts `section`
    pub fn show(&mut self, section: Section) {
        if self.mounted == Some(section) {
            return;
        }
        if let Some(old) = self.mounted.take() {
            self.lifecycle(old, LifeCycle::Unmount);
        }
        log::info!("Showing {} section", section.title());
        self.state.section = section;
        let layout = self.layout;
        self.lifecycle(section, LifeCycle::Mount(layout));
        self.mounted = Some(section);
        self.needs_paint = true;
    }

    /// Tears everything down; no frame is delivered afterwards
    pub fn shutdown(&mut self) {
        if let Some(old) = self.mounted.take() {
            self.lifecycle(old, LifeCycle::Unmount);
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        let Some(section) = self.mounted else {
            return;
        };
        let id = widget_id(section);
        match input {
            Input::Resize { cols, rows } => {
                self.layout =
                    Layout::new(cols, rows, self.layout.cell_width, self.layout.cell_height);
                if self.listeners.is_listening(id, ListenerKind::Resize) {
                    self.lifecycle(section, LifeCycle::Resize(self.layout));
                }
                self.needs_paint = true;
            }
            Input::Pointer { col, row } => {
                if self.listeners.is_listening(id, ListenerKind::PointerMove) {
                    let pos = self.layout.cell_to_pixels(col, row);
                    self.dispatch(section, Event::PointerMove(pos));
                }
            }
            Input::PointerLeave => {
                if self.listeners.is_listening(id, ListenerKind::PointerLeave) {
                    self.dispatch(section, Event::PointerLeave);
                }
            }
            Input::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                if !self.dispatch(section, Event::Key(key)) {
                    self.global_key(key);
                }
            }
        }
    }

    fn global_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.state.quit = true,
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char('q') | KeyCode::Esc => self.state.quit = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('p') => self.state.paused = !self.state.paused,
            KeyCode::Char('d') => {
                self.state.debug = !self.state.debug;
                self.needs_paint = true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.show(Section::ALL[index]);
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Tab => {
                self.show(self.state.section.next())
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::BackTab => {
                self.show(self.state.section.prev())
            }
            KeyCode::F(n @ 1..=4) => self.show(Section::ALL[n as usize - 1]),
            _ => {}
        }
    }

    fn toggle_theme(&mut self) {
        self.themes.toggle();
        self.needs_paint = true;
    }

    /// Delivers the frames widgets asked for. Called once per display tick.
    pub fn tick(&mut self) {
        self.state.theme = self.current_theme.get();
        for id in self.frames.take_due() {
            let Some(section) = Section::ALL.get(id.0 as usize).copied() else {
                continue;
            };
            // a request from a section that has since been unmounted is dropped
            if self.mounted != Some(section) {
                continue;
            }
            self.dispatch(section, Event::AnimFrame);
        }
    }

    /// Paints the navigation bar, the mounted section and the status line
    pub fn paint(&mut self, surface: &mut Surface) {
        self.needs_paint = false;
        self.update_fps();

        let theme = self.state.theme;
        let layout = self.layout;
        self.paint_nav(surface);

        if let Some(section) = self.mounted {
            if let Some((_, widget)) = self.sections.iter_mut().find(|(s, _)| *s == section) {
                let mut ctx = PaintCtx {
                    surface: &mut *surface,
                    layout,
                };
                widget.paint(&mut ctx, &self.state);
            }
        }

        let status_row = layout.rows.saturating_sub(1);
        surface.fill_row(status_row, theme.muted(), theme.background());
        let status = if self.state.paused {
            "Paused  [p] resume  [t] theme  [q] quit"
        } else {
            "[1-4] sections  [t] theme  [p] pause  [d] debug  [q] quit"
        };
        surface.put_str(1, status_row as i32, status, theme.muted(), false);
        if self.state.debug {
            let debug = format!(
                "{} {}  FPS: {:.1}  {}x{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                self.state.fps,
                layout.cols,
                layout.rows,
            );
            let col = layout.cols as i32 - debug.chars().count() as i32 - 1;
            surface.put_str(col, status_row as i32, &debug, PRIMARY, false);
        }
    }

    fn paint_nav(&self, surface: &mut Surface) {
        let theme = self.state.theme;
        surface.fill_row(0, theme.foreground(), theme.background());
        surface.put_str(1, 0, "<", theme.muted(), false);
        surface.put_str(2, 0, "Abel", theme.foreground(), true);
        surface.put_str(6, 0, " />", theme.muted(), false);

        let mut col = 12;
        for (i, section) in Section::ALL.iter().enumerate() {
            let label = format!("{} {}", i + 1, section.title());
            let active = *section == self.state.section;
            let color = if active { PRIMARY } else { theme.muted() };
            surface.put_str(col, 0, &label, color, active);
            col += label.chars().count() as i32 + 3;
        }
        let mode = if theme.is_dark() { "dark" } else { "light" };
        surface.put_str(self.layout.cols as i32 - 7, 0, mode, theme.muted(), false);
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.state.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }
}
