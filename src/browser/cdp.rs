//! Chrome DevTools Protocol implementation of the browser capability.

use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::selector::{Locator, Strategy};

use super::{Element, Page};

/// Launch a Chromium instance and spawn its CDP event handler task.
///
/// The handler task must outlive the browser; the caller aborts it after
/// dropping the `Browser`.
pub async fn launch_browser(
    headless: bool,
    request_timeout: Duration,
) -> Result<(Browser, JoinHandle<()>)> {
    let chrome_path = find_chrome()
        .context("Chrome/Chromium not found. Please install Chrome or Chromium.")?;

    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .request_timeout(request_timeout)
        .viewport(None)
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--no-first-run")
        .arg("--no-default-browser-check");

    if !headless {
        builder = builder.with_head();
    }

    let config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to configure browser: {e}"))?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = tokio::spawn(async move { while (handler.next().await).is_some() {} });

    Ok((browser, handler_task))
}

/// [`Page`] backed by a chromiumoxide page.
pub struct CdpPage {
    page: chromiumoxide::Page,
}

impl CdpPage {
    pub fn new(page: chromiumoxide::Page) -> Self {
        Self { page }
    }
}

#[async_trait::async_trait]
impl Page for CdpPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Navigation to {url} failed"))?;
        Ok(())
    }

    async fn query(&self, locator: &Locator) -> Result<Option<Box<dyn Element>>> {
        // chromiumoxide reports "not found" as an error; fold it into None
        // so the resolver can keep scanning its candidate list.
        let found = match locator.strategy {
            Strategy::Css => self.page.find_element(&locator.value).await.ok(),
            Strategy::XPath => self.page.find_xpath(&locator.value).await.ok(),
        };
        Ok(found.map(|el| Box::new(CdpElement { el }) as Box<dyn Element>))
    }

    async fn query_all(&self, locator: &Locator) -> Result<Vec<Box<dyn Element>>> {
        let elements = match locator.strategy {
            Strategy::Css => self.page.find_elements(&locator.value).await,
            Strategy::XPath => self.page.find_xpaths(&locator.value).await,
        }
        .unwrap_or_default();

        Ok(elements
            .into_iter()
            .map(|el| Box::new(CdpElement { el }) as Box<dyn Element>)
            .collect())
    }
}

struct CdpElement {
    el: chromiumoxide::Element,
}

#[async_trait::async_trait]
impl Element for CdpElement {
    async fn text(&self) -> Result<String> {
        let text = self
            .el
            .inner_text()
            .await
            .context("Failed to read element text")?;
        Ok(text.unwrap_or_default())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.el.focus().await.context("Failed to focus element")?;
        self.el
            .type_str(text)
            .await
            .context("Failed to type into element")?;
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        self.el.click().await.context("Failed to click element")?;
        Ok(())
    }

    async fn query_all(&self, css: &str) -> Result<Vec<Box<dyn Element>>> {
        let elements = self.el.find_elements(css).await.unwrap_or_default();
        Ok(elements
            .into_iter()
            .map(|el| Box::new(CdpElement { el }) as Box<dyn Element>)
            .collect())
    }
}

/// Find Chrome/Chromium executable.
fn find_chrome() -> Option<String> {
    for binary in ["google-chrome", "chromium"] {
        if let Ok(output) = std::process::Command::new("which").arg(binary).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Some(path);
                }
            }
        }
    }

    let candidates = [
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        // NixOS
        "/run/current-system/sw/bin/google-chrome",
        "/run/current-system/sw/bin/chromium",
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ];

    for candidate in candidates {
        if std::path::Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }
    None
}
