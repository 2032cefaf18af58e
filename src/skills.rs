use crate::content::{skill_names, skills_in, Category};
use crate::lifecycle::{AnimationHandle, ListenerKind};
use crate::math::Rect;
use crate::sphere::{LabelSphere, LabelStyle};
use crate::state::AppState;
use crate::theme::PRIMARY;
use crate::widget::{Event, EventCtx, Layout, LifeCycle, PaintCtx, Widget};

/// Below this many columns the grid is dropped and the sphere takes the whole body
const NARROW_COLS: u16 = 60;

/// Labels at or above this scale are drawn bold
const BOLD_SCALE: f64 = 0.85;

/// Skills section: a category grid on the left, the rotating sphere on the right
pub struct SkillsWidget {
    sphere: LabelSphere,
    /// Projection from the latest frame
    labels: Vec<LabelStyle>,
    container: Rect,
    show_grid: bool,
    animation: AnimationHandle,
}

impl SkillsWidget {
    pub fn new(sphere: LabelSphere) -> Self {
        SkillsWidget {
            labels: sphere.project(),
            sphere,
            container: Rect::new(0.0, 0.0, 0.0, 0.0),
            show_grid: true,
            animation: AnimationHandle::new(),
        }
    }

    /// Sphere over the portfolio's skill list
    pub fn from_content() -> anyhow::Result<Self> {
        Ok(Self::new(LabelSphere::new(&skill_names())?))
    }

    pub fn sphere(&self) -> &LabelSphere {
        &self.sphere
    }

    pub fn labels(&self) -> &[LabelStyle] {
        &self.labels
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    fn place(&mut self, layout: &Layout) {
        self.show_grid = layout.cols >= NARROW_COLS;
        self.container = if self.show_grid {
            let half = layout.cols / 2;
            layout.columns(half, layout.cols - half)
        } else {
            layout.columns(0, layout.cols)
        };
    }
}

impl Widget for SkillsWidget {
    fn lifecycle(&mut self, ctx: &mut EventCtx, event: &LifeCycle, _data: &AppState) {
        match event {
            LifeCycle::Mount(layout) => {
                self.place(layout);
                // no pointer-leave: moves outside the container are filtered here instead
                ctx.listen(ListenerKind::PointerMove);
                ctx.listen(ListenerKind::Resize);
                self.animation.start();
                ctx.request_anim_frame();
            }
            LifeCycle::Unmount => {
                ctx.remove_listeners();
                ctx.cancel_anim_frame();
                self.animation.stop();
            }
            LifeCycle::Resize(layout) => {
                self.place(layout);
                ctx.request_paint();
            }
        }
    }

    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState) {
        match event {
            Event::PointerMove(pos) => {
                self.sphere.on_pointer_move(*pos, &self.container);
            }
            Event::AnimFrame => {
                if !self.animation.is_running() {
                    return;
                }
                self.labels = if data.paused {
                    self.sphere.project()
                } else {
                    self.sphere.frame()
                };
                ctx.request_paint();
                ctx.request_anim_frame();
            }
            Event::PointerLeave | Event::Key(_) => {}
        }
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState) {
        let theme = data.theme;
        let layout = ctx.layout;
        let top = layout.body_top() as i32;

        ctx.surface.put_str(2, top + 1, "01.", PRIMARY, true);
        ctx.surface.put_str(6, top + 1, "Skills & Technologies", theme.foreground(), true);

        if self.show_grid {
            let mut row = top + 3;
            for category in [
                Category::Frontend,
                Category::Backend,
                Category::Tools,
                Category::Design,
            ] {
                let names: Vec<&str> = skills_in(category).map(|s| s.name).collect();
                if names.is_empty() {
                    continue;
                }
                ctx.surface.put_str(2, row, category.name(), PRIMARY, true);
                row += 1;
                for chunk in names.chunks(3) {
                    ctx.surface.put_str(4, row, &chunk.join("  "), theme.muted(), false);
                    row += 1;
                }
                row += 1;
            }
        }

        let [cx, cy] = self.container.center();
        let bg = theme.background();
        for style in &self.labels {
            let (col, row) = layout.pixels_to_cell([cx + style.offset_x, cy + style.offset_y]);
            let color = PRIMARY.over(bg, style.opacity * style.color_alpha);
            ctx.surface.put_centered(col, row, &style.label, color, style.scale >= BOLD_SCALE);
        }

        if data.debug {
            let rotation = self.sphere.rotation();
            let info = format!("pitch: {:+.4}  yaw: {:+.4}", rotation.pitch, rotation.yaw);
            let last = top + layout.body_rows() as i32 - 1;
            ctx.surface.put_str(1, last, &info, theme.muted(), false);
        }
    }
}
