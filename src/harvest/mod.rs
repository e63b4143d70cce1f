//! A browser-less harvester that fetches HTML and approximates the
//! element inventory.
//!
//! This backend performs an HTTP GET, parses the document, collects inline
//! and linked stylesheets, and resolves a minimal computed-style set with a
//! naive cascade (document-order rules, last declaration wins, inline
//! `style` last). Geometry comes from block-stacked approximate layout. No
//! JavaScript runs, so pages that build their DOM client-side will produce
//! thin inventories; the `cdp` backend exists for those.

pub mod css;
pub mod layout;

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Node, Selector};

use crate::inventory::{ComputedStyle, ElementSnapshot, PageMeta};
use crate::{AuditConfig, Error, Harvester, Result, Viewport};

use layout::GeometrySolver;

pub struct FetchHarvester {
    client: Client,
    config: AuditConfig,
    last_html: Option<String>,
    last_url: Option<String>,
    styles: Vec<String>,
}

impl FetchHarvester {
    // Collect inline <style> blocks and linked stylesheets, in document
    // order so the naive cascade sees them the way a browser would.
    fn extract_styles(&mut self, base_url: &str) {
        let html = match &self.last_html {
            Some(h) => h,
            None => return,
        };
        let document = Html::parse_document(html);

        let style_sel = Selector::parse("style").unwrap();
        for node in document.select(&style_sel) {
            let txt = node.text().collect::<String>();
            if !txt.trim().is_empty() {
                self.styles.push(txt);
            }
        }

        let link_sel = Selector::parse("link[rel=\"stylesheet\"]").unwrap();
        let mut fetched = Vec::new();
        for node in document.select(&link_sel) {
            if let Some(href) = node.value().attr("href") {
                let css_url = if let Ok(base) = url::Url::parse(base_url) {
                    base.join(href)
                        .map(|u| u.to_string())
                        .unwrap_or_else(|_| href.to_string())
                } else {
                    href.to_string()
                };

                match self.client.get(&css_url).send().and_then(|r| r.text()) {
                    Ok(text) if !text.trim().is_empty() => fetched.push(text),
                    Ok(_) => {}
                    Err(e) => log::debug!("stylesheet fetch failed for {}: {}", css_url, e),
                }
            }
        }
        self.styles.extend(fetched);
    }

    fn loaded_html(&self) -> Result<&str> {
        self.last_html
            .as_deref()
            .ok_or_else(|| Error::HarvestError("No document loaded".into()))
    }
}

// Fold resolved declarations into the computed-style record, falling back
// to browser-like defaults for anything the page never set.
fn style_from_declarations(decls: &HashMap<String, String>) -> ComputedStyle {
    let mut style = ComputedStyle::default();
    let get = |key: &str| decls.get(key).cloned();

    if let Some(v) = get("background-color").or_else(|| get("background")) {
        style.background_color = v;
    }
    if let Some(v) = get("color") {
        style.color = v;
    }
    if let Some(v) = get("font-size") {
        style.font_size = v;
    }
    if let Some(v) = get("font-family") {
        style.font_family = v;
    }
    if let Some(v) = get("text-decoration").or_else(|| get("text-decoration-line")) {
        style.text_decoration = v;
    }
    if let Some(v) = get("cursor") {
        style.cursor = v;
    }
    if let Some(v) = get("font-weight") {
        style.font_weight = v;
    }
    if let Some(v) = get("border") {
        style.border = v;
    }
    if let Some(v) = get("border-radius") {
        style.border_radius = v;
    }
    if let Some(v) = get("box-shadow") {
        style.box_shadow = v;
    }
    // The border shorthand reaches the bottom edge too
    if let Some(v) = get("border-bottom").or_else(|| get("border")) {
        style.border_bottom = v;
    }

    style
}

impl Harvester for FetchHarvester {
    fn new(config: AuditConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            last_html: None,
            last_url: None,
            styles: Vec::new(),
        })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", self.config.user_agent.clone());
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .map_err(|e| Error::LoadError(format!("Failed to fetch {}: {}", url, e)))?;

        let body = response
            .text()
            .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))?;

        log::debug!("loaded {} ({} bytes)", url, body.len());
        self.last_html = Some(body);
        self.last_url = Some(url.to_string());

        self.styles.clear();
        self.extract_styles(url);

        Ok(())
    }

    fn page_meta(&self) -> Result<PageMeta> {
        let document = Html::parse_document(self.loaded_html()?);

        let title_sel = Selector::parse("title").unwrap();
        let description_sel = Selector::parse("meta[name=\"description\"]").unwrap();
        let favicon_sel = Selector::parse("link[rel~=\"icon\"]").unwrap();

        let title = document
            .select(&title_sel)
            .next()
            .map(|n| n.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let description = document
            .select(&description_sel)
            .next()
            .and_then(|n| n.value().attr("content"))
            .unwrap_or_default()
            .to_string();
        let favicon = document
            .select(&favicon_sel)
            .next()
            .and_then(|n| n.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        Ok(PageMeta {
            title,
            description,
            favicon,
        })
    }

    fn harvest(&mut self, viewport: Viewport) -> Result<Vec<ElementSnapshot>> {
        let document = Html::parse_document(self.loaded_html()?);

        // Naive cascade: walk every rule of every sheet in order and record
        // its declarations against each node it matches; later rules simply
        // overwrite. No specificity, which is wrong for adversarial CSS and
        // close enough for audit heuristics.
        let mut resolved: HashMap<_, HashMap<String, String>> = HashMap::new();
        for sheet in &self.styles {
            for rule in css::parse_rules(sheet) {
                for part in rule.selector.split(',') {
                    let part = part.trim();
                    let selector = match Selector::parse(part) {
                        Ok(s) => s,
                        Err(_) => {
                            log::debug!("unsupported selector {:?}", part);
                            continue;
                        }
                    };
                    for matched in document.select(&selector) {
                        let entry = resolved.entry(matched.id()).or_insert_with(HashMap::new);
                        for decl in &rule.declarations {
                            entry.insert(decl.property.clone(), decl.value.clone());
                        }
                    }
                }
            }
        }

        let mut solver = GeometrySolver::new(viewport);
        let mut inventory = Vec::new();

        for node in document.root_element().descendants() {
            let element = match ElementRef::wrap(node) {
                Some(e) => e,
                None => continue,
            };

            let mut decls = resolved.get(&element.id()).cloned().unwrap_or_default();
            if let Some(inline) = element.value().attr("style") {
                for decl in css::parse_declarations(inline) {
                    decls.insert(decl.property, decl.value);
                }
            }
            let style = style_from_declarations(&decls);

            let own_text: String = element
                .children()
                .filter_map(|child| match child.value() {
                    Node::Text(t) => Some(&**t),
                    _ => None,
                })
                .collect();
            let font_px =
                crate::scoring::font_size::leading_number(&style.font_size).unwrap_or(16.0);
            let (position, size) = solver.place(own_text.trim(), font_px);

            let text = element.text().collect::<String>();
            inventory.push(ElementSnapshot::new(
                element.value().name(),
                &text,
                position,
                size,
                style,
            ));
        }

        log::debug!(
            "harvested {} elements at {}x{}",
            inventory.len(),
            viewport.width,
            viewport.height
        );
        Ok(inventory)
    }

    fn screenshot(&mut self) -> Result<Vec<u8>> {
        Err(Error::RenderError(
            "Screenshots are not supported by FetchHarvester".into(),
        ))
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}
