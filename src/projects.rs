use crate::content::PROJECTS;
use crate::hero::wrap;
use crate::state::AppState;
use crate::theme::PRIMARY;
use crate::widget::{Event, EventCtx, LifeCycle, PaintCtx, Widget};

/// Static project gallery
#[derive(Default)]
pub struct ProjectsWidget;

impl Widget for ProjectsWidget {
    fn lifecycle(&mut self, ctx: &mut EventCtx, event: &LifeCycle, _data: &AppState) {
        if let LifeCycle::Resize(_) = event {
            ctx.request_paint();
        }
    }

    fn event(&mut self, _ctx: &mut EventCtx, _event: &Event, _data: &mut AppState) {}

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState) {
        let theme = data.theme;
        let top = ctx.layout.body_top() as i32;
        let width = (ctx.layout.cols as usize).saturating_sub(8).max(20);

        ctx.surface.put_str(2, top + 1, "02.", PRIMARY, true);
        ctx.surface.put_str(6, top + 1, "Featured Projects", theme.foreground(), true);

        let mut row = top + 3;
        for project in PROJECTS {
            ctx.surface.put_str(2, row, project.title, theme.foreground(), true);
            row += 1;
            for line in wrap(project.description, width) {
                ctx.surface.put_str(4, row, &line, theme.muted(), false);
                row += 1;
            }
            for line in wrap(&project.technologies.join(" · "), width) {
                ctx.surface.put_str(4, row, &line, PRIMARY, false);
                row += 1;
            }
            ctx.surface
                .put_str(4, row, &format!("Code  {}", project.github), theme.muted(), false);
            ctx.surface
                .put_str(4, row + 1, &format!("Live  {}", project.link), theme.muted(), false);
            row += 3;
        }
    }
}
