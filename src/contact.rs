//! Contact form state and delivery to a hosted form backend.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Hosted form endpoint the portfolio posts to unless overridden
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/xpqpabgd";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("a submission is already in flight")]
    Busy,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("form backend rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("delivery worker stopped before answering")]
    WorkerGone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn next(self) -> Field {
        match self {
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Email,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Email => Field::Message,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Your Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

/// JSON body sent to the form backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    #[serde(rename = "_replyto")]
    pub reply_to: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Delivers a payload somewhere. Anything short of a 2xx answer is an error.
pub trait FormSender: Send + Sync {
    fn send(&self, payload: &ContactPayload) -> Result<(), ContactError>;
}

pub struct HttpFormSender {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpFormSender {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ContactError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpFormSender {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl FormSender for HttpFormSender {
    fn send(&self, payload: &ContactPayload) -> Result<(), ContactError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()?;

        let status = response.status();
        if status.is_success() {
            log::info!("Contact message delivered ({})", status);
            return Ok(());
        }
        let message = response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .unwrap_or_else(|| "Form submission failed".to_string());
        Err(ContactError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: FormStatus,
    pub focus: Field,
    /// Why the last submission attempt did not go through
    pub last_error: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Typing into the focused field. Ignored while a submission is in flight.
    pub fn insert_char(&mut self, c: char) {
        if self.is_submitting() {
            return;
        }
        if c == '\n' && self.focus != Field::Message {
            return;
        }
        let focus = self.focus;
        self.value_mut(focus).push(c);
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Validates the fields and moves to `Submitting`
    pub fn begin_submit(&mut self) -> Result<ContactPayload, ContactError> {
        if self.is_submitting() {
            return Err(ContactError::Busy);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(ContactError::MissingField("subject"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }

        self.status = FormStatus::Submitting;
        self.last_error = None;
        Ok(ContactPayload {
            reply_to: email.to_string(),
            email: email.to_string(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        })
    }

    /// Applies the delivery outcome. Success clears every field; failure keeps them.
    pub fn finish_submit(&mut self, outcome: Result<(), ContactError>) {
        match outcome {
            Ok(()) => {
                self.email.clear();
                self.subject.clear();
                self.message.clear();
                self.focus = Field::Email;
                self.status = FormStatus::Success;
            }
            Err(err) => {
                log::warn!("Contact submission failed: {}", err);
                self.last_error = Some(err.to_string());
                self.status = FormStatus::Error;
            }
        }
    }
}

/// Same bar a browser's `type="email"` input sets: something@something
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single request with a canned response; the handle yields the request body
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/f/test", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line.is_empty() || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request = vec![0; length];
            reader.read_exact(&mut request).unwrap();
            let response = format!(
                "{status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            String::from_utf8(request).unwrap()
        });
        (url, handle)
    }

    fn local_sender(endpoint: String) -> HttpFormSender {
        HttpFormSender {
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            endpoint,
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            email: "ada@example.com".into(),
            subject: "Project Inquiry".into(),
            message: "Hello, I'd like to discuss...".into(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn payload_carries_reply_to() {
        let payload = filled().begin_submit().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["_replyto"], "ada@example.com");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["subject"], "Project Inquiry");
    }

    #[test]
    fn success_resets_all_fields() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert_eq!(form.status, FormStatus::Submitting);
        form.finish_submit(Ok(()));
        assert_eq!(form.status, FormStatus::Success);
        assert!(form.email.is_empty() && form.subject.is_empty() && form.message.is_empty());
    }

    #[test]
    fn rejection_keeps_entered_values() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.finish_submit(Err(ContactError::Rejected {
            status: 422,
            message: "bad".into(),
        }));
        assert_eq!(form.status, FormStatus::Error);
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.subject, "Project Inquiry");
        assert!(form.last_error.as_deref().unwrap().contains("422"));
    }

    #[test]
    fn required_fields_are_checked() {
        let mut form = filled();
        form.subject = "   ".into();
        assert!(matches!(
            form.begin_submit(),
            Err(ContactError::MissingField("subject"))
        ));
        assert_eq!(form.status, FormStatus::Idle);

        form.subject = "Hi".into();
        form.email = "not-an-address".into();
        assert!(matches!(form.begin_submit(), Err(ContactError::InvalidEmail(_))));
    }

    #[test]
    fn no_double_submit() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(ContactError::Busy)));
        form.insert_char('x');
        assert_eq!(form.message, "Hello, I'd like to discuss...");
    }

    #[test]
    fn editing_follows_focus() {
        let mut form = ContactForm::new();
        form.insert_char('a');
        form.focus_next();
        form.insert_char('\n');
        form.insert_char('s');
        form.focus_next();
        form.insert_char('\n');
        form.backspace();
        form.insert_char('m');
        assert_eq!(form.email, "a");
        assert_eq!(form.subject, "s");
        assert_eq!(form.message, "m");
        form.focus_prev();
        assert_eq!(form.focus, Field::Subject);
    }

    #[test]
    fn http_success_is_ok() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"ok":true}"#);
        let payload = filled().begin_submit().unwrap();
        local_sender(url).send(&payload).unwrap();

        let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(request["_replyto"], "ada@example.com");
        assert_eq!(request["message"], "Hello, I'd like to discuss...");
    }

    #[test]
    fn http_error_status_carries_backend_message() {
        let (url, server) = serve_once(
            "HTTP/1.1 422 Unprocessable Entity",
            r#"{"error":"Validation errors"}"#,
        );
        let payload = filled().begin_submit().unwrap();
        let err = local_sender(url).send(&payload).unwrap_err();
        server.join().unwrap();
        match err {
            ContactError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Validation errors");
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn http_error_without_json_uses_generic_message() {
        let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error", "oops");
        let payload = filled().begin_submit().unwrap();
        let err = local_sender(url).send(&payload).unwrap_err();
        server.join().unwrap();
        assert!(matches!(
            err,
            ContactError::Rejected { status: 500, ref message }
                if message == "Form submission failed"
        ));
    }

    #[test]
    fn closed_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/f/test", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });
        let payload = filled().begin_submit().unwrap();
        let err = local_sender(url).send(&payload).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, ContactError::Transport(_)));
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b"));
        assert!(!looks_like_email("@b"));
        assert!(!looks_like_email("a@"));
        assert!(!looks_like_email("a b@c"));
        assert!(!looks_like_email("a@b@c"));
    }
}
