mod common;
mod ping;
mod pulls;

pub use common::*;
pub use ping::*;
pub use pulls::*;
