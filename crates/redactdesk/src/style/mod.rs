//! Styling for the console.

pub mod widgets;
