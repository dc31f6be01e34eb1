//! First-match resolution over ordered locator candidates.
//!
//! The report console's markup is not contractually stable, so every DOM
//! lookup that matters goes through an ordered fallback list of locators.
//! Minor markup drift (an id rename, an attribute change) then costs a
//! config-free fallback hop instead of a code change.

use std::fmt;
use std::time::Duration;

use anyhow::Result;

use crate::browser::{Element, Page};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
}

/// One (strategy, value) locator candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: String,
}

impl Locator {
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            value: value.into(),
        }
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: value.into(),
        }
    }

    pub fn id(id: &str) -> Self {
        Self::css(format!("#{id}"))
    }

    pub fn name(name: &str) -> Self {
        Self::css(format!("[name='{name}']"))
    }

    pub fn placeholder_contains(text: &str) -> Self {
        Self::css(format!("input[placeholder*='{text}' i]"))
    }

    /// Matches a button (or submit input) whose visible text contains `text`.
    pub fn button_text_contains(text: &str) -> Self {
        Self::xpath(format!(
            "//button[contains(normalize-space(.), '{text}')] | \
             //input[@type='submit'][contains(@value, '{text}')]"
        ))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            Strategy::Css => write!(f, "css:{}", self.value),
            Strategy::XPath => write!(f, "xpath:{}", self.value),
        }
    }
}

/// Try each candidate in order, polling it for up to `wait` before moving
/// on, and return the first element found.
///
/// Exhausting every candidate is an `Ok(None)`, not an error: whether a
/// missing element is fatal is the caller's decision.
pub async fn resolve_first(
    page: &dyn Page,
    candidates: &[Locator],
    wait: Duration,
) -> Result<Option<Box<dyn Element>>> {
    for locator in candidates {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            if let Some(element) = page.query(locator).await? {
                tracing::debug!(%locator, "Locator resolved");
                return Ok(Some(element));
            }
            if tokio::time::Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        tracing::debug!(%locator, "Locator candidate exhausted, trying next");
    }

    Ok(None)
}
