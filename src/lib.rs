/// Catalog Browser - terminal product catalog browser
///
/// Core library providing category filtering, pagination and a
/// like/dislike ledger over a product catalog, plus the TUI on top.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
