use crate::error::ExtractError;
use crate::scrapers::normalize::{frame_url, rendered_lines};
use crate::scrapers::traits::Renderer;
use crate::scrapers::types::{Markup, ScrapeConfig};
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Renderer backed by a headless Chrome tab.
///
/// Owns the browser process. Dropping the renderer closes the tab and shuts
/// Chrome down, so the process never outlives the scrape.
pub struct ChromeRenderer {
    tab: Arc<Tab>,
    browser: Browser,
    settle: Duration,
}

/// Single-element lookup result; `None` on the JS side means no element matched
#[derive(Deserialize)]
struct Found<T> {
    value: T,
}

impl ChromeRenderer {
    /// Launch Chrome and open a blank tab
    pub fn launch(config: &ScrapeConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        Ok(Self {
            tab,
            browser,
            settle: config.settle,
        })
    }

    /// Run a script whose result is a `JSON.stringify` string and decode it
    fn evaluate<T: DeserializeOwned>(&self, script: &str) -> Result<T> {
        let result = self.tab.evaluate(script, false)?;
        let json = result
            .value
            .as_ref()
            .and_then(|value| value.as_str())
            .context("Page script returned no value")?;

        serde_json::from_str(json).context("Failed to decode page script result")
    }

    fn query_one<T: DeserializeOwned>(&self, selector: &str, read: &str) -> Result<T> {
        let found: Option<Found<T>> = self.evaluate(&single_script(selector, read))?;
        match found {
            Some(found) => Ok(found.value),
            None => Err(ExtractError::ElementNotFound {
                selector: selector.to_string(),
            }
            .into()),
        }
    }

    fn query_all(&self, scope: Option<&str>, selector: &str, read: &str) -> Result<Vec<String>> {
        let found: Option<Vec<String>> = self.evaluate(&all_script(scope, selector, read))?;
        found.ok_or_else(|| {
            ExtractError::ElementNotFound {
                selector: scope.unwrap_or(selector).to_string(),
            }
            .into()
        })
    }
}

impl Renderer for ChromeRenderer {
    fn open(&mut self, url: &str) -> Result<()> {
        info!("Opening {}", url);

        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.tab
            .wait_until_navigated()
            .with_context(|| format!("Timed out loading {url}"))?;

        debug!("Waiting {:?} for page scripts to settle", self.settle);
        thread::sleep(self.settle);

        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    fn enter_frame(&mut self, selector: &str) -> Result<()> {
        let src = self
            .attribute(selector, "src")?
            .ok_or(ExtractError::FieldNotFound { field: "iframe src" })?;

        // Cross-origin frames can't be reached from the parent's scripts, so
        // load the embedded document directly in the tab.
        let url = frame_url(&self.current_url()?, &src)?;

        info!("Switching into embedded frame {}", url);
        self.open(&url)
    }

    fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.query_one(selector, &format!("el.getAttribute({})", js_string(name)))
    }

    fn text(&self, selector: &str) -> Result<String> {
        let text: String = self.query_one(selector, "el.innerText")?;
        Ok(rendered_lines(&text))
    }

    fn texts(&self, scope: Option<&str>, selector: &str) -> Result<Vec<String>> {
        let texts = self.query_all(scope, selector, "el.innerText")?;
        Ok(texts.iter().map(|text| rendered_lines(text)).collect())
    }

    fn markup(&self, selector: &str, markup: Markup) -> Result<String> {
        self.query_one(selector, &format!("el.{}", markup.property()))
    }

    fn markups(&self, scope: Option<&str>, selector: &str, markup: Markup) -> Result<Vec<String>> {
        self.query_all(scope, selector, &format!("el.{}", markup.property()))
    }
}

impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        debug!(pid = ?self.browser.get_process_id(), "Shutting down Chrome");
        if let Err(e) = self.tab.close(true) {
            warn!("Failed to close browser tab: {e:#}");
        }
    }
}

/// Quote a value as a JS string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn single_script(selector: &str, read: &str) -> String {
    format!(
        r#"(() => {{
    const el = document.querySelector({selector});
    return JSON.stringify(el ? {{ value: {read} }} : null);
}})()"#,
        selector = js_string(selector),
    )
}

fn all_script(scope: Option<&str>, selector: &str, read: &str) -> String {
    let root = match scope {
        Some(scope) => format!("document.querySelector({})", js_string(scope)),
        None => "document".to_string(),
    };

    format!(
        r#"(() => {{
    const root = {root};
    if (!root) return JSON.stringify(null);
    return JSON.stringify(Array.from(root.querySelectorAll({selector}), el => {read}));
}})()"#,
        selector = js_string(selector),
    )
}
