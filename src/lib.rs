pub mod bitmap_font;
pub mod canvas;
pub mod color;
pub mod font;
pub mod icon_gen;
pub mod inspect;
pub mod logging;
pub mod manifest;
