//! Canned in-memory implementations of the browser capability traits.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use callsync::browser::{Element, Page};
use callsync::extract::{LOADING_INDICATOR_CSS, TABLE_ROWS_CSS};
use callsync::selector::Locator;

/// One canned DOM element.
pub struct FakeElement {
    text: String,
    cells: Vec<String>,
    fail_cell_text: bool,
    typed: Mutex<Vec<String>>,
    clicks: Mutex<usize>,
}

impl FakeElement {
    pub fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            cells: Vec::new(),
            fail_cell_text: false,
            typed: Mutex::new(Vec::new()),
            clicks: Mutex::new(0),
        })
    }

    /// An input/button element with no text of its own.
    pub fn input() -> Arc<Self> {
        Self::with_text("")
    }

    /// A table row serving `cells` as its `td` children.
    pub fn row(cells: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            text: String::new(),
            cells: cells.iter().map(|c| c.to_string()).collect(),
            fail_cell_text: false,
            typed: Mutex::new(Vec::new()),
            clicks: Mutex::new(0),
        })
    }

    /// A table row whose cells error when their text is read.
    pub fn broken_row(cell_count: usize) -> Arc<Self> {
        Arc::new(Self {
            text: String::new(),
            cells: vec![String::new(); cell_count],
            fail_cell_text: true,
            typed: Mutex::new(Vec::new()),
            clicks: Mutex::new(0),
        })
    }

    pub fn typed_text(&self) -> Vec<String> {
        self.typed.lock().unwrap().clone()
    }

    pub fn click_count(&self) -> usize {
        *self.clicks.lock().unwrap()
    }
}

/// Cloneable handle so tests can keep inspecting an element after handing
/// it to the page.
#[derive(Clone)]
pub struct FakeHandle(pub Arc<FakeElement>);

#[async_trait]
impl Element for FakeHandle {
    async fn text(&self) -> Result<String> {
        Ok(self.0.text.clone())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.0.typed.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        *self.0.clicks.lock().unwrap() += 1;
        Ok(())
    }

    async fn query_all(&self, css: &str) -> Result<Vec<Box<dyn Element>>> {
        if css != "td" {
            return Ok(Vec::new());
        }
        Ok(self
            .0
            .cells
            .iter()
            .map(|text| {
                if self.0.fail_cell_text {
                    Box::new(BrokenCell) as Box<dyn Element>
                } else {
                    Box::new(FakeHandle(FakeElement::with_text(text))) as Box<dyn Element>
                }
            })
            .collect())
    }
}

/// A cell whose text read always fails, for exercising per-row recovery.
struct BrokenCell;

#[async_trait]
impl Element for BrokenCell {
    async fn text(&self) -> Result<String> {
        anyhow::bail!("element detached from document")
    }

    async fn type_text(&self, _text: &str) -> Result<()> {
        anyhow::bail!("element detached from document")
    }

    async fn click(&self) -> Result<()> {
        anyhow::bail!("element detached from document")
    }

    async fn query_all(&self, _css: &str) -> Result<Vec<Box<dyn Element>>> {
        Ok(Vec::new())
    }
}

/// Canned page: locators resolve against a fixed map, `table tbody tr`
/// serves the configured rows, and the loading indicator is a flag.
#[derive(Default)]
pub struct FakePage {
    elements: Mutex<HashMap<String, Arc<FakeElement>>>,
    rows: Mutex<Vec<Arc<FakeElement>>>,
    loading: Mutex<bool>,
    fail_goto: Mutex<bool>,
    visited: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, locator: &Locator, element: Arc<FakeElement>) {
        self.elements
            .lock()
            .unwrap()
            .insert(locator.to_string(), element);
    }

    pub fn set_rows(&self, rows: Vec<Arc<FakeElement>>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.lock().unwrap() = loading;
    }

    pub fn fail_navigation(&self) {
        *self.fail_goto.lock().unwrap() = true;
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        if *self.fail_goto.lock().unwrap() {
            anyhow::bail!("net::ERR_CONNECTION_REFUSED");
        }
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn query(&self, locator: &Locator) -> Result<Option<Box<dyn Element>>> {
        if locator.value == LOADING_INDICATOR_CSS {
            return Ok(if *self.loading.lock().unwrap() {
                Some(Box::new(FakeHandle(FakeElement::with_text("loading"))))
            } else {
                None
            });
        }

        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(&locator.to_string())
            .map(|el| Box::new(FakeHandle(el.clone())) as Box<dyn Element>))
    }

    async fn query_all(&self, locator: &Locator) -> Result<Vec<Box<dyn Element>>> {
        if locator.value == TABLE_ROWS_CSS {
            return Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|row| Box::new(FakeHandle(row.clone())) as Box<dyn Element>)
                .collect());
        }

        Ok(self.query(locator).await?.into_iter().collect())
    }
}
