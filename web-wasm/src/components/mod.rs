pub mod header;
pub mod grid_table;
pub mod tag_chips;
pub mod image_picker;
pub mod status_banner;
