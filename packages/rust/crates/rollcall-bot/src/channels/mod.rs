//! Chat channels: bridge the messaging platform to the attendance engine.

mod telegram;

pub use telegram::{TelegramChannel, inline_keyboard_markup};
