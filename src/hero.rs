use crate::content::BIO;
use crate::graphics::Canvas;
use crate::lifecycle::{AnimationHandle, ListenerKind};
use crate::pointfield::PointField;
use crate::state::AppState;
use crate::theme::PRIMARY;
use crate::widget::{Event, EventCtx, Layout, LifeCycle, PaintCtx, Widget};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hero section: bio text over the animated point field
pub struct HeroWidget {
    field: Option<PointField>,
    canvas: Option<Canvas>,
    animation: AnimationHandle,
    rng: StdRng,
}

impl HeroWidget {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        HeroWidget {
            field: None,
            canvas: None,
            animation: AnimationHandle::new(),
            rng,
        }
    }

    pub fn field(&self) -> Option<&PointField> {
        self.field.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Allocates the canvas and a fresh point field; false when the body has no rows
    fn allocate(&mut self, layout: &Layout, data: &AppState) -> bool {
        let Some(canvas) = Canvas::new(
            layout.cols as usize,
            layout.body_rows() as usize * 2,
            data.theme.background(),
        ) else {
            return false;
        };
        self.field = Some(PointField::new(layout.viewport(), &mut self.rng));
        self.canvas = Some(canvas);
        true
    }

    fn start(&mut self, ctx: &mut EventCtx) {
        self.animation.start();
        ctx.request_anim_frame();
    }

    fn mount(&mut self, ctx: &mut EventCtx, layout: &Layout, data: &AppState) {
        // listeners go in even without a canvas so that growing the terminal starts it
        ctx.listen(ListenerKind::Resize);
        ctx.listen(ListenerKind::PointerMove);
        ctx.listen(ListenerKind::PointerLeave);

        if self.allocate(layout, data) {
            self.start(ctx);
        } else {
            log::warn!(
                "No room for the hero canvas at {}x{}, waiting for a resize",
                layout.cols,
                layout.rows
            );
        }
    }

    fn unmount(&mut self, ctx: &mut EventCtx) {
        let removed = ctx.remove_listeners();
        ctx.cancel_anim_frame();
        if self.animation.stop() {
            log::debug!("Hero animation stopped, {} listeners removed", removed);
        }
        self.field = None;
        self.canvas = None;
    }

    fn resize(&mut self, ctx: &mut EventCtx, layout: &Layout, data: &AppState) {
        if let (Some(field), Some(canvas)) = (self.field.as_mut(), self.canvas.as_mut()) {
            if canvas.resize(
                layout.cols as usize,
                layout.body_rows() as usize * 2,
                data.theme.background(),
            ) {
                field.resize(layout.viewport(), &mut self.rng);
            }
            return;
        }
        if self.allocate(layout, data) {
            log::debug!("Hero canvas allocated at {}x{}", layout.cols, layout.rows);
            self.start(ctx);
        }
    }
}

impl Default for HeroWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HeroWidget {
    fn lifecycle(&mut self, ctx: &mut EventCtx, event: &LifeCycle, data: &AppState) {
        match event {
            LifeCycle::Mount(layout) => self.mount(ctx, layout, data),
            LifeCycle::Unmount => self.unmount(ctx),
            LifeCycle::Resize(layout) => {
                self.resize(ctx, layout, data);
                ctx.request_paint();
            }
        }
    }

    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        match event {
            Event::PointerMove(pos) => field.set_pointer(*pos),
            Event::PointerLeave => field.clear_pointer(),
            Event::AnimFrame => {
                if !self.animation.is_running() {
                    return;
                }
                if let Some(canvas) = self.canvas.as_mut() {
                    if data.paused {
                        field.paint(data.theme, canvas);
                    } else {
                        field.frame(data.theme, canvas);
                    }
                }
                ctx.request_paint();
                ctx.request_anim_frame();
            }
            Event::Key(_) => {}
        }
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState) {
        let theme = data.theme;
        let top = ctx.layout.body_top();
        if let Some(canvas) = self.canvas.as_ref() {
            ctx.surface.blit(canvas, top);
        }

        let body_rows = ctx.layout.body_rows() as i32;
        let left = (ctx.layout.cols as i32 / 10).max(2);
        let mut row = top as i32 + (body_rows / 2 - 4).max(0);
        let lines: [(&str, _, bool); 4] = [
            ("Hi, I'm", PRIMARY, false),
            (BIO.name, theme.foreground(), true),
            (BIO.role, PRIMARY, true),
            ("", theme.foreground(), false),
        ];
        for (text, color, bold) in lines {
            ctx.surface.put_str(left, row, text, color, bold);
            row += 1;
        }
        let width = (ctx.layout.cols as usize)
            .saturating_sub(left as usize * 2)
            .max(20);
        for line in wrap(BIO.summary, width) {
            ctx.surface.put_str(left, row, &line, theme.muted(), false);
            row += 1;
        }
        row += 1;
        ctx.surface.put_str(left, row, "[2] Check out my work  ->", PRIMARY, true);
        row += 2;
        ctx.surface.put_str(left, row, BIO.github, theme.muted(), false);
        ctx.surface.put_str(left, row + 1, BIO.linkedin, theme.muted(), false);

        if data.debug {
            if let Some(field) = self.field.as_ref() {
                let info = format!(
                    "points: {}  pointer: {:?}",
                    field.points().len(),
                    field.pointer()
                );
                let last = top as i32 + body_rows - 1;
                ctx.surface.put_str(1, last, &info, theme.muted(), false);
            }
        }
    }
}

/// Greedy word wrap
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
