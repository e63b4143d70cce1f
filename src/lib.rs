//! UXLens: a headless UX audit engine.
//!
//! UXLens loads a web page, captures a flat inventory of every DOM element's
//! geometry and computed style, and derives a composite 0-100 UX score with
//! itemized issues and advisory notes.
//!
//! # Architecture
//!
//! - **Harvester backends** produce the element inventory. The default
//!   `harvest` feature gives a browser-less backend (HTTP fetch + HTML/CSS
//!   parse with approximate layout); the `cdp` feature drives headless
//!   Chrome for real computed styles and screenshots.
//! - **The scoring engine** ([`scoring`]) is pure and deterministic: five
//!   independent analyzers over the same immutable inventory, reduced into
//!   one [`ScoreReport`].
//! - **The analyze API** ([`api`]) exposes one-shot audits as
//!   `POST /analyze`.
//!
//! # Example
//!
//! ```no_run
//! use uxlens::{AuditConfig, Harvester};
//!
//! # fn main() -> uxlens::Result<()> {
//! let config = AuditConfig::default();
//! let desktop = config.desktop_viewport;
//!
//! let mut harvester = uxlens::new_harvester(config)?;
//! harvester.load_url("https://example.com")?;
//! let inventory = harvester.harvest(desktop)?;
//!
//! let report = uxlens::score(&inventory);
//! println!("UX score: {}/100", report.total_score);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod inventory;
pub mod scoring;

// Browser-less harvester (HTTP fetch + HTML/CSS parse, no JS)
#[cfg(feature = "harvest")]
pub mod harvest;

// CDP harvester (feature-gated)
#[cfg(feature = "cdp")]
pub mod cdp;

// Analyze API surface; needs some harvester backend
#[cfg(any(feature = "harvest", feature = "cdp"))]
pub mod api;

pub use inventory::{ComputedStyle, ElementSnapshot, PageMeta, Position, Size};
pub use scoring::{score, AnalyzerOutcome, ScoreReport};

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Desktop capture viewport used for the scored inventory
    pub const DESKTOP: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    /// Mobile capture viewport (iPhone X dimensions)
    pub const MOBILE: Viewport = Viewport {
        width: 375,
        height: 812,
    };
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// Configuration for an audit run.
///
/// Defaults mirror a typical interactive audit: a large desktop viewport for
/// the scored capture, an iPhone-sized viewport for the mobile screenshot,
/// and a generous navigation timeout since slow marketing pages are exactly
/// the pages people audit.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// User agent string to send with requests
    pub user_agent: String,
    /// Viewport for the capture that feeds the scoring engine
    pub desktop_viewport: Viewport,
    /// Viewport for the mobile screenshot pass
    pub mobile_viewport: Viewport,
    /// Timeout for page loads in milliseconds
    pub timeout_ms: u64,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            user_agent:
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) UXLens/0.1"
                    .to_string(),
            desktop_viewport: Viewport::DESKTOP,
            mobile_viewport: Viewport::MOBILE,
            timeout_ms: 60_000,
            headers: HashMap::new(),
        }
    }
}

/// Core trait for inventory harvester backends.
///
/// A harvester owns all I/O in the system: it loads the page, resolves
/// styles, and hands the scoring engine an ordered, immutable inventory.
/// Implementations must release any held rendering resource (HTTP client,
/// browser process) on every exit path, including navigation failure.
pub trait Harvester {
    /// Create a new harvester with the given configuration
    fn new(config: AuditConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load a URL and wait for the page to be ready
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Page metadata (title, description, favicon) of the loaded page
    fn page_meta(&self) -> Result<PageMeta>;

    /// Capture the element inventory at the given viewport, in DOM
    /// traversal order
    fn harvest(&mut self, viewport: Viewport) -> Result<Vec<ElementSnapshot>>;

    /// Full-page PNG of the current viewport. Backends without a renderer
    /// return `Error::RenderError`.
    fn screenshot(&mut self) -> Result<Vec<u8>>;

    /// Release the backend and any held rendering resource
    fn close(self) -> Result<()>;
}

// Prefer the CDP backend when enabled: it captures real computed styles.
#[cfg(feature = "cdp")]
pub fn new_harvester(config: AuditConfig) -> Result<impl Harvester> {
    cdp::CdpHarvester::new(config)
}

// Fall back to the browser-less fetch backend.
#[cfg(all(not(feature = "cdp"), feature = "harvest"))]
pub fn new_harvester(config: AuditConfig) -> Result<impl Harvester> {
    harvest::FetchHarvester::new(config)
}
