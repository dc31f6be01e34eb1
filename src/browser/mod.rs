//! Browser capability surface.
//!
//! The pipeline never talks to an automation engine directly; it consumes
//! these traits, and the `cdp` module supplies the Chrome DevTools Protocol
//! implementation. Tests implement them over canned in-memory pages.

mod cdp;

pub use cdp::{launch_browser, CdpPage};

use anyhow::Result;

use crate::selector::Locator;

/// One resolved DOM element.
#[async_trait::async_trait]
pub trait Element: Send + Sync {
    /// The element's rendered inner text.
    async fn text(&self) -> Result<String>;

    /// Focus the element and type `text` into it.
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn click(&self) -> Result<()>;

    /// Find descendant elements by CSS selector (used for row cells).
    async fn query_all(&self, css: &str) -> Result<Vec<Box<dyn Element>>>;
}

/// One browser page/tab.
#[async_trait::async_trait]
pub trait Page: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Find the first element matching `locator`, or `None` if absent.
    async fn query(&self, locator: &Locator) -> Result<Option<Box<dyn Element>>>;

    /// Find all elements matching `locator`, in document order.
    async fn query_all(&self, locator: &Locator) -> Result<Vec<Box<dyn Element>>>;
}
