//! Listing notification for clwatch: renders a plaintext and an HTML digest
//! of new listings and delivers both as one transactional-mail message.

mod error;
mod mailer;
mod render;

pub use error::NotifyError;
pub use mailer::Mailer;
pub use render::{render_html, render_text};
