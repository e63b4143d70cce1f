//! Chrome DevTools Protocol harvester (uses the `headless_chrome` crate).
//!
//! This backend drives a real browser, so the inventory carries genuine
//! computed styles and bounding boxes, and full-page screenshots are
//! available. The element walk runs in-page and returns records shaped
//! exactly like the serialized [`ElementSnapshot`] contract.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};

use crate::inventory::{ElementSnapshot, PageMeta};
use crate::{AuditConfig, Error, Harvester, Result, Viewport};

// In-page DOM walk mirroring the inventory contract field for field
const INVENTORY_SCRIPT: &str = r#"
(function () {
  const records = Array.from(document.querySelectorAll('*')).map((element) => {
    const rect = element.getBoundingClientRect();
    const styles = window.getComputedStyle(element);
    const tag = element.tagName.toLowerCase();
    return {
      type: tag,
      text: (element.textContent || '').trim(),
      position: { x: rect.x, y: rect.y },
      size: { width: rect.width, height: rect.height },
      style: {
        backgroundColor: styles.backgroundColor,
        color: styles.color,
        fontSize: styles.fontSize,
        fontFamily: styles.fontFamily,
        textDecoration: styles.textDecoration,
        cursor: styles.cursor,
        fontWeight: styles.fontWeight,
        border: styles.border,
        borderRadius: styles.borderRadius,
        boxShadow: styles.boxShadow,
        borderBottom: styles.borderBottom,
      },
      isClickable: tag === 'a' || tag === 'button' || styles.cursor === 'pointer',
    };
  });
  return JSON.stringify(records);
})()
"#;

const META_SCRIPT: &str = r#"
(function () {
  const description = document.querySelector('meta[name="description"]');
  const icon = document.querySelector('link[rel~="icon"]');
  return JSON.stringify({
    title: document.title || '',
    description: description ? (description.getAttribute('content') || '') : '',
    favicon: icon ? (icon.getAttribute('href') || '') : '',
  });
})()
"#;

pub struct CdpHarvester {
    browser: Browser,
    tab: Arc<Tab>,
}

impl CdpHarvester {
    // Evaluate a script that returns a JSON string and parse it
    fn evaluate_json(&self, script: &str) -> Result<serde_json::Value> {
        let eval = self
            .tab
            .evaluate(script, false)
            .map_err(|e| Error::HarvestError(format!("Evaluation failed: {}", e)))?;

        let value = eval
            .value
            .ok_or_else(|| Error::HarvestError("No value returned from evaluation".into()))?;
        let json = value
            .as_str()
            .ok_or_else(|| Error::HarvestError("Evaluation returned a non-string".into()))?;
        serde_json::from_str(json)
            .map_err(|e| Error::HarvestError(format!("Malformed in-page JSON: {}", e)))
    }
}

impl Harvester for CdpHarvester {
    fn new(config: AuditConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((
                config.desktop_viewport.width,
                config.desktop_viewport.height,
            )))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build launch options: {}", e))
            })?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(|e| Error::InitializationError(format!("Failed to set user agent: {}", e)))?;

        if !config.headers.is_empty() {
            let headers: std::collections::HashMap<&str, &str> = config
                .headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            tab.set_extra_http_headers(headers)
                .map_err(|e| Error::InitializationError(format!("Failed to set headers: {}", e)))?;
        }

        Ok(Self { browser, tab })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        // Let late layout and font loads settle before capturing
        std::thread::sleep(Duration::from_millis(2000));
        Ok(())
    }

    fn page_meta(&self) -> Result<PageMeta> {
        let value = self.evaluate_json(META_SCRIPT)?;
        serde_json::from_value(value)
            .map_err(|e| Error::HarvestError(format!("Malformed meta record: {}", e)))
    }

    fn harvest(&mut self, viewport: Viewport) -> Result<Vec<ElementSnapshot>> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(f64::from(viewport.width)),
                height: Some(f64::from(viewport.height)),
            })
            .map_err(|e| Error::HarvestError(format!("Failed to set viewport: {}", e)))?;

        // Give the page a moment to reflow at the new size
        std::thread::sleep(Duration::from_millis(1000));

        let value = self.evaluate_json(INVENTORY_SCRIPT)?;
        let inventory: Vec<ElementSnapshot> = serde_json::from_value(value)
            .map_err(|e| Error::HarvestError(format!("Malformed inventory record: {}", e)))?;

        log::debug!(
            "harvested {} elements at {}x{} via CDP",
            inventory.len(),
            viewport.width,
            viewport.height
        );
        Ok(inventory)
    }

    fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::RenderError(format!("Screenshot failed: {}", e)))
    }

    fn close(self) -> Result<()> {
        // Dropping the Browser handle tears down the Chrome process; holding
        // it in Self guarantees release on every exit path.
        drop(self.browser);
        Ok(())
    }
}
