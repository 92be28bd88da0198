//! Telegram Bot API channel: long polling in, messages and inline keyboards out.

mod client;
mod constants;
mod error;
mod keyboard;
mod listen;
mod parsing;
mod send_api;
mod state;
mod trait_impl;

pub use keyboard::inline_keyboard_markup;
pub use state::TelegramChannel;
