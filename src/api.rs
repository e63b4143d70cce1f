//! The analyze API surface: one-shot page audits over HTTP.
//!
//! `POST /analyze` with body `{"url": "..."}` runs a full audit and returns
//! `{ success: true, elements, meta, elementCount, scores, screenshots }`.
//! URL and navigation failures map to 400 with a user-facing message; every
//! other failure maps to 500. Request handling is a pure function of the
//! body ([`handle_analyze`]) so the routing layer stays a thin loop.

use std::io::Read;

use base64::Engine as Base64Engine;
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Response, Server};

use crate::inventory::{ElementSnapshot, PageMeta};
use crate::scoring::{score, ScoreReport};
use crate::{AuditConfig, Error, Harvester, Result};

const NAVIGATION_FAILED_MESSAGE: &str =
    "Could not reach the site or the URL is invalid. Please check the address.";

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    url: String,
}

/// Base64-encoded full-page PNG captures; empty strings when the active
/// backend cannot render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshots {
    pub desktop: String,
    pub mobile: String,
}

/// The success envelope: the score report plus the raw inventory and
/// pass-through page metadata, exactly as downstream consumers read them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSuccess {
    pub success: bool,
    pub elements: Vec<ElementSnapshot>,
    pub meta: PageMeta,
    pub element_count: usize,
    pub scores: ScoreReport,
    pub screenshots: Screenshots,
}

#[derive(Debug, Serialize)]
struct AnalyzeFailure {
    success: bool,
    error: String,
}

/// Run one full audit against `url`.
///
/// The desktop harvest feeds the scoring engine; the mobile pass only
/// re-applies the viewport for the second screenshot. The harvester is
/// released on every exit path, including navigation failure.
pub fn analyze_url(config: &AuditConfig, url: &str) -> Result<AnalyzeSuccess> {
    let parsed =
        url::Url::parse(url).map_err(|e| Error::ConfigError(format!("Invalid URL: {}", e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigError(format!(
            "Unsupported URL scheme: {}",
            parsed.scheme()
        )));
    }

    let mut harvester = crate::new_harvester(config.clone())?;
    let outcome = run_audit(&mut harvester, config, url);
    if let Err(e) = harvester.close() {
        log::warn!("failed to release harvester: {}", e);
    }
    outcome
}

fn run_audit(
    harvester: &mut impl Harvester,
    config: &AuditConfig,
    url: &str,
) -> Result<AnalyzeSuccess> {
    harvester.load_url(url)?;
    let meta = harvester.page_meta()?;

    let elements = harvester.harvest(config.desktop_viewport)?;
    let desktop_shot = encode_screenshot(harvester.screenshot());

    let mobile_shot = match harvester.harvest(config.mobile_viewport) {
        Ok(_) => encode_screenshot(harvester.screenshot()),
        Err(e) => {
            log::debug!("mobile pass unavailable: {}", e);
            String::new()
        }
    };

    let scores = score(&elements);

    Ok(AnalyzeSuccess {
        success: true,
        element_count: elements.len(),
        elements,
        meta,
        scores,
        screenshots: Screenshots {
            desktop: desktop_shot,
            mobile: mobile_shot,
        },
    })
}

fn encode_screenshot(capture: Result<Vec<u8>>) -> String {
    match capture {
        Ok(png) => base64::engine::general_purpose::STANDARD.encode(png),
        Err(e) => {
            log::debug!("screenshot unavailable: {}", e);
            String::new()
        }
    }
}

fn failure(status: u16, error: String) -> (u16, String) {
    let body = serde_json::to_string(&AnalyzeFailure {
        success: false,
        error,
    })
    .unwrap_or_else(|_| "{\"success\":false,\"error\":\"internal error\"}".to_string());
    (status, body)
}

/// Handle one analyze request body, returning status code and JSON body.
pub fn handle_analyze(config: &AuditConfig, body: &str) -> (u16, String) {
    let request: AnalyzeRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return failure(400, format!("Invalid request body: {}", e)),
    };

    match analyze_url(config, &request.url) {
        Ok(success) => match serde_json::to_string(&success) {
            Ok(json) => (200, json),
            Err(e) => failure(500, format!("Failed to serialize response: {}", e)),
        },
        Err(e @ (Error::ConfigError(_) | Error::LoadError(_))) => {
            log::warn!("analyze rejected for {}: {}", request.url, e);
            failure(400, NAVIGATION_FAILED_MESSAGE.to_string())
        }
        Err(e) => {
            log::error!("analyze failed for {}: {}", request.url, e);
            failure(500, e.to_string())
        }
    }
}

fn route(config: &AuditConfig, request: &mut tiny_http::Request) -> (u16, String) {
    if request.method() != &Method::Post || request.url() != "/analyze" {
        return failure(404, "Not found".to_string());
    }
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return failure(400, format!("Failed to read request body: {}", e));
    }
    handle_analyze(config, &body)
}

/// Serve the analyze API until the process exits.
pub fn serve(config: AuditConfig, port: u16) -> Result<()> {
    let server = Server::http(("0.0.0.0", port))
        .map_err(|e| Error::InitializationError(format!("Failed to bind port {}: {}", port, e)))?;
    log::info!("analyze API listening on 0.0.0.0:{}", port);

    for mut request in server.incoming_requests() {
        let (status, body) = route(&config, &mut request);
        let header = "Content-Type: application/json"
            .parse::<Header>()
            .unwrap();
        let response = Response::from_string(body)
            .with_status_code(status)
            .with_header(header);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {}", e);
        }
    }
    Ok(())
}
