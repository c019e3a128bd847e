//! Widget style functions over the active palette.

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use buttons::{
    chip_button_style, danger_button_style, ghost_button_style, nav_button_active_style,
    nav_button_style, primary_button_style, row_button_selected_style, row_button_style,
    secondary_button_style,
};
pub use containers::{
    backdrop_style, badge_style, banner_style, body_block_style, card_style, dialog_style,
    drawer_style, header_style, page_style, sidebar_style, table_header_style,
};
pub use inputs::{input_style, invalid_input_style, scrollable_style};
