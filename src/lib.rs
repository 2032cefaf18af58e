//! A developer portfolio for the terminal: a bio over an animated point
//! field, a rotating sphere of skills, a project list and a contact form.

pub mod app;
pub mod config;
pub mod contact;
pub mod content;
pub mod form;
pub mod graphics;
pub mod hero;
pub mod lifecycle;
pub mod math;
pub mod pointfield;
pub mod projects;
pub mod skills;
pub mod sphere;
pub mod state;
pub mod surface;
pub mod terminal;
pub mod theme;
pub mod widget;
