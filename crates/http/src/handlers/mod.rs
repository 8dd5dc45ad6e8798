#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod admin;
pub mod events;
pub mod meeting_chat;
pub mod meetings;
pub mod prospects;
