use crate::contact::{ContactError, ContactForm, Field, FormSender, FormStatus};
use crate::graphics::Rgb;
use crate::hero::wrap;
use crate::state::AppState;
use crate::theme::PRIMARY;
use crate::widget::{Event, EventCtx, LifeCycle, PaintCtx, Widget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

const SUCCESS: Rgb = Rgb::new(22, 163, 74);
const FAILURE: Rgb = Rgb::new(220, 38, 38);

/// Contact section. Delivery runs on a worker thread; the outcome is picked
/// up on the next animation frame.
pub struct ContactWidget {
    form: ContactForm,
    sender: Arc<dyn FormSender>,
    inflight: Option<Receiver<Result<(), ContactError>>>,
    notice: Option<String>,
}

impl ContactWidget {
    pub fn new(sender: Arc<dyn FormSender>) -> Self {
        ContactWidget {
            form: ContactForm::new(),
            sender,
            inflight: None,
            notice: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    fn submit(&mut self, ctx: &mut EventCtx) {
        match self.form.begin_submit() {
            Ok(payload) => {
                self.notice = None;
                let (tx, rx) = mpsc::channel();
                let sender = Arc::clone(&self.sender);
                thread::spawn(move || {
                    // the widget may be gone by now; nothing to do then
                    let _ = tx.send(sender.send(&payload));
                });
                self.inflight = Some(rx);
                ctx.request_anim_frame();
            }
            Err(err) => {
                log::debug!("Contact form not submitted: {}", err);
                self.notice = Some(err.to_string());
            }
        }
    }

    fn poll(&mut self, ctx: &mut EventCtx) {
        let Some(rx) = self.inflight.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.form.finish_submit(outcome);
                self.inflight = None;
                ctx.request_paint();
            }
            Err(TryRecvError::Empty) => ctx.request_anim_frame(),
            Err(TryRecvError::Disconnected) => {
                self.form.finish_submit(Err(ContactError::WorkerGone));
                self.inflight = None;
                ctx.request_paint();
            }
        }
    }

    fn key(&mut self, ctx: &mut EventCtx, key: &KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(ctx),
            KeyCode::Char(_) if ctrl => return,
            KeyCode::Char(c) => {
                self.notice = None;
                self.form.insert_char(c);
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Enter if self.form.focus == Field::Message => self.form.insert_char('\n'),
            KeyCode::Enter => self.form.focus_next(),
            _ => return,
        }
        ctx.set_handled();
        ctx.request_paint();
    }
}

impl Widget for ContactWidget {
    fn lifecycle(&mut self, ctx: &mut EventCtx, event: &LifeCycle, _data: &AppState) {
        match event {
            LifeCycle::Mount(_) => {
                if self.inflight.is_some() {
                    ctx.request_anim_frame();
                }
            }
            LifeCycle::Unmount => ctx.cancel_anim_frame(),
            LifeCycle::Resize(_) => ctx.request_paint(),
        }
    }

    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut AppState) {
        match event {
            Event::Key(key) => self.key(ctx, key),
            Event::AnimFrame => self.poll(ctx),
            Event::PointerMove(_) | Event::PointerLeave => {}
        }
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState) {
        let theme = data.theme;
        let top = ctx.layout.body_top() as i32;
        let width = (ctx.layout.cols as usize).saturating_sub(8).max(20);

        ctx.surface.put_str(2, top + 1, "03. What's Next?", PRIMARY, true);
        ctx.surface.put_str(2, top + 2, "Get In Touch", theme.foreground(), true);
        let mut row = top + 4;
        for line in wrap(
            "I'm currently looking for new opportunities and my inbox is always open. \
             Fill out the form below and I'll get back to you soon.",
            width,
        ) {
            ctx.surface.put_str(2, row, &line, theme.muted(), false);
            row += 1;
        }
        row += 1;

        for field in [Field::Email, Field::Subject, Field::Message] {
            let focused = self.form.focus == field;
            let marker = if focused { ">" } else { " " };
            ctx.surface.put_str(2, row, marker, PRIMARY, true);
            ctx.surface.put_str(4, row, field.label(), theme.foreground(), focused);
            row += 1;
            let lines: Vec<&str> = self.form.value(field).split('\n').collect();
            if focused && !self.form.is_submitting() {
                let last = lines.last().map_or(0, |l| l.chars().count());
                let cursor_row = row + lines.len() as i32 - 1;
                ctx.surface.put_str(6 + last as i32, cursor_row, "_", PRIMARY, false);
            }
            for line in &lines {
                ctx.surface.put_str(6, row, line, theme.foreground(), false);
                row += 1;
            }
            row += 1;
        }

        let button = if self.form.is_submitting() {
            "[ Sending... ]"
        } else {
            "[ Send Message  (Ctrl+S) ]"
        };
        ctx.surface.put_str(4, row, button, PRIMARY, true);
        row += 2;

        if let Some(notice) = &self.notice {
            ctx.surface.put_str(4, row, notice, FAILURE, false);
            return;
        }
        match self.form.status {
            FormStatus::Success => ctx.surface.put_str(
                4,
                row,
                "Message sent successfully. I'll reply soon!",
                SUCCESS,
                false,
            ),
            FormStatus::Error => ctx.surface.put_str(
                4,
                row,
                "Something went wrong. Please try again later.",
                FAILURE,
                false,
            ),
            FormStatus::Idle | FormStatus::Submitting => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactPayload;
    use crate::lifecycle::{FrameScheduler, Listeners, WidgetId};
    use crate::state::Section;
    use crate::theme::Theme;
    use std::sync::Mutex;
    use std::time::Duration;

    const ID: WidgetId = WidgetId(4);

    struct FakeSender {
        status: u16,
        seen: Mutex<Vec<ContactPayload>>,
    }

    impl FormSender for FakeSender {
        fn send(&self, payload: &ContactPayload) -> Result<(), ContactError> {
            self.seen.lock().unwrap().push(payload.clone());
            if (200..300).contains(&self.status) {
                Ok(())
            } else {
                Err(ContactError::Rejected {
                    status: self.status,
                    message: "nope".into(),
                })
            }
        }
    }

    fn type_str(widget: &mut ContactWidget, ctx: &mut EventCtx, data: &mut AppState, text: &str) {
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            widget.event(ctx, &Event::Key(key), data);
        }
    }

    fn press(
        widget: &mut ContactWidget,
        ctx: &mut EventCtx,
        data: &mut AppState,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) {
        widget.event(ctx, &Event::Key(KeyEvent::new(code, modifiers)), data);
    }

    /// Fills the form, submits, and pumps frames until the worker answers
    fn run_submission(status: u16) -> (ContactWidget, Arc<FakeSender>) {
        let sender = Arc::new(FakeSender {
            status,
            seen: Mutex::new(Vec::new()),
        });
        let mut widget = ContactWidget::new(sender.clone());
        let mut listeners = Listeners::new();
        let mut frames = FrameScheduler::new();
        let mut data = AppState::new(Theme::Dark, Section::Contact, false);
        let mut ctx = EventCtx::new(ID, &mut listeners, &mut frames);

        type_str(&mut widget, &mut ctx, &mut data, "ada@example.com");
        press(&mut widget, &mut ctx, &mut data, KeyCode::Tab, KeyModifiers::NONE);
        type_str(&mut widget, &mut ctx, &mut data, "Hello");
        press(&mut widget, &mut ctx, &mut data, KeyCode::Enter, KeyModifiers::NONE);
        type_str(&mut widget, &mut ctx, &mut data, "Let's talk");
        press(&mut widget, &mut ctx, &mut data, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(widget.form().status, FormStatus::Submitting);

        for _ in 0..500 {
            widget.event(&mut ctx, &Event::AnimFrame, &mut data);
            if !widget.form().is_submitting() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        drop(ctx);
        (widget, sender)
    }

    #[test]
    fn accepted_submission_clears_the_form() {
        let (widget, sender) = run_submission(200);
        assert_eq!(widget.form().status, FormStatus::Success);
        assert!(widget.form().email.is_empty());
        assert!(widget.form().subject.is_empty());
        assert!(widget.form().message.is_empty());
        let seen = sender.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].reply_to, "ada@example.com");
        assert_eq!(seen[0].message, "Let's talk");
    }

    #[test]
    fn rejected_submission_keeps_the_fields() {
        let (widget, _) = run_submission(500);
        assert_eq!(widget.form().status, FormStatus::Error);
        assert_eq!(widget.form().email, "ada@example.com");
        assert_eq!(widget.form().subject, "Hello");
        assert_eq!(widget.form().message, "Let's talk");
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let sender = Arc::new(FakeSender {
            status: 200,
            seen: Mutex::new(Vec::new()),
        });
        let mut widget = ContactWidget::new(sender.clone());
        let mut listeners = Listeners::new();
        let mut frames = FrameScheduler::new();
        let mut data = AppState::new(Theme::Dark, Section::Contact, false);
        let mut ctx = EventCtx::new(ID, &mut listeners, &mut frames);
        press(&mut widget, &mut ctx, &mut data, KeyCode::Char('s'), KeyModifiers::CONTROL);
        drop(ctx);

        assert_eq!(widget.form().status, FormStatus::Idle);
        assert!(widget.notice.is_some());
        assert!(!frames.is_pending(ID));
        assert!(sender.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unhandled_keys_fall_through() {
        let sender = Arc::new(FakeSender {
            status: 200,
            seen: Mutex::new(Vec::new()),
        });
        let mut widget = ContactWidget::new(sender);
        let mut listeners = Listeners::new();
        let mut frames = FrameScheduler::new();
        let mut data = AppState::new(Theme::Dark, Section::Contact, false);
        let mut ctx = EventCtx::new(ID, &mut listeners, &mut frames);
        press(&mut widget, &mut ctx, &mut data, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!ctx.is_handled());
    }
}
