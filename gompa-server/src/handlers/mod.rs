//! Request handlers, one module per public route family.

pub mod admin;
pub mod audio_guides;
pub mod health;
pub mod map;
pub mod sites;
pub mod tours;
