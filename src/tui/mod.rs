//! Terminal UI: Elm-style event loop over a single products view.

pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;
