pub mod api;
pub mod session;
pub mod theme;
pub mod types;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
