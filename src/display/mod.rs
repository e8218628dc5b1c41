//! Status display: font, framebuffer, SSD1306 protocol and screen layouts.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`font`] | 5x7 glyph table |
//! | [`framebuffer`] | Paged 128x64 pixel memory and text drawing |
//! | [`panel`] | SSD1306 init and flush over a [`DisplayBus`](crate::traits::DisplayBus) |
//! | [`status`] | Fixed screen layouts |

pub mod font;
pub mod framebuffer;
pub mod panel;
pub mod status;

pub use framebuffer::{Framebuffer, HEIGHT, PAGES, WIDTH};
pub use panel::{DisplayError, Ssd1306};
pub use status::StatusScreen;
