// Text layout: character-budget word wrap and fixed-pitch page placement.
// Pure and synchronous; callers on the async side run it inside spawn_blocking.

pub mod page;
pub mod wrap;

pub use page::{default_page_config, layout_text, Page, PageConfig};
