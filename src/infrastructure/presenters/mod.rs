#[cfg(test)]
pub mod recording;
mod terminal;

pub use terminal::*;
