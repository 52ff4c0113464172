use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::error::Result;
use crate::runtime::router::{Message, tags};
use crate::runtime::{EventFlow, InputContext, InputHandler};

/// Process-wide Escape hook.
///
/// Installed first in the handler chain so it sees every key event no matter
/// which screen has focus. An Escape press clears the active selection and
/// posts a refresh request; everything else passes through untouched.
pub struct EscapeInterceptor;

impl InputHandler for EscapeInterceptor {
    fn name(&self) -> &str {
        "cockpit::escape_interceptor"
    }

    fn on_key(&mut self, ctx: &mut InputContext<'_>, key: &KeyEvent) -> Result<EventFlow> {
        if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
            ctx.model().set_selection(&[]);
            ctx.post(Message::new(tags::REFRESH_REQUEST));
            return Ok(EventFlow::Consumed);
        }
        Ok(EventFlow::Continue)
    }
}
