//! Minimal terminal runtime: a blocking event loop that interleaves key input,
//! timer ticks and throttled redraws.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
