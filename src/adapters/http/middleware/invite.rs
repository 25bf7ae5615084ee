//! Invite gate - shared-secret access control for the decision API.
//!
//! A single opaque code gates the whole app. Verifying the code sets a
//! long-lived signed cookie; every gated request thereafter only needs the
//! cookie. This is a gate, not an auth system: no identity, no sessions,
//! no expiry beyond the cookie's max-age.
//!
//! The cookie carries an HMAC-SHA256 tag of the code under a server key
//! rather than the code itself, so the secret never travels back and forth
//! after the initial verification.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::InviteConfig;

type HmacSha256 = Hmac<Sha256>;

/// Cookie holding the invite tag.
pub const INVITE_COOKIE_NAME: &str = "decidr_invite";

/// One year, in seconds.
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Invite gate state shared by the middleware and the verify endpoint.
pub struct InviteGate {
    code: Option<Secret<String>>,
    signing_key: Option<Secret<String>>,
    secure_cookies: bool,
}

impl InviteGate {
    /// Builds the gate from config. `secure_cookies` should be true in
    /// production so the cookie is HTTPS-only.
    pub fn from_config(config: &InviteConfig, secure_cookies: bool) -> Self {
        Self {
            code: config.code.clone(),
            signing_key: config.signing_key().cloned(),
            secure_cookies,
        }
    }

    /// Returns true when a code is configured and the gate is enforced.
    pub fn is_enabled(&self) -> bool {
        self.code
            .as_ref()
            .is_some_and(|c| !c.expose_secret().is_empty())
    }

    /// Checks a submitted code: case-sensitive, exact, constant-time.
    ///
    /// With no code configured the gate is open and anything passes.
    pub fn verify_code(&self, submitted: &str) -> bool {
        match &self.code {
            Some(code) => {
                let expected = code.expose_secret().as_bytes();
                expected.ct_eq(submitted.as_bytes()).unwrap_u8() == 1
            }
            None => true,
        }
    }

    /// The HMAC tag a valid cookie must carry, hex-encoded.
    fn expected_tag(&self) -> Option<String> {
        let code = self.code.as_ref()?;
        let key = self.signing_key.as_ref()?;

        let mut mac = HmacSha256::new_from_slice(key.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(code.expose_secret().as_bytes());
        Some(hex_encode(&mac.finalize().into_bytes()))
    }

    /// Builds the `Set-Cookie` value issued after a successful verify.
    pub fn issue_cookie(&self) -> Option<String> {
        let tag = self.expected_tag()?;
        let mut cookie = format!(
            "{INVITE_COOKIE_NAME}={tag}; HttpOnly; SameSite=Lax; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/"
        );
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        Some(cookie)
    }

    /// Returns true when the request carries a valid invite cookie.
    pub fn request_is_invited(&self, headers: &HeaderMap) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let Some(expected) = self.expected_tag() else {
            return false;
        };
        cookie_value(headers, INVITE_COOKIE_NAME)
            .map(|tag| expected.as_bytes().ct_eq(tag.as_bytes()).unwrap_u8() == 1)
            .unwrap_or(false)
    }
}

/// Middleware enforcing the invite gate on decision routes.
///
/// Browsers navigating without a valid cookie are sent to the invite form;
/// API clients get a 401 with an `INVITE_REQUIRED` code.
pub async fn invite_gate_middleware(
    State(gate): State<Arc<InviteGate>>,
    request: Request,
    next: Next,
) -> Response {
    if gate.request_is_invited(request.headers()) {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "request blocked by invite gate");

    if accepts_html(request.headers()) {
        Redirect::to("/invite").into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "A valid invite is required",
                "code": "INVITE_REQUIRED"
            })),
        )
            .into_response()
    }
}

/// Extracts a cookie value from the `Cookie` header(s).
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k.trim() == name).then(|| v.trim())
        })
        .next()
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate(code: Option<&str>) -> InviteGate {
        let config = InviteConfig {
            code: code.map(|c| Secret::new(c.to_string())),
            cookie_signing_key: None,
        };
        InviteGate::from_config(&config, false)
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn code_match_is_case_sensitive_and_exact() {
        let gate = gate(Some("ABC123"));
        assert!(gate.verify_code("ABC123"));
        assert!(!gate.verify_code("abc123"));
        assert!(!gate.verify_code("ABC1234"));
        assert!(!gate.verify_code(""));
    }

    #[test]
    fn unconfigured_gate_accepts_everything() {
        let gate = gate(None);
        assert!(!gate.is_enabled());
        assert!(gate.verify_code("anything"));
        assert!(gate.request_is_invited(&HeaderMap::new()));
        assert!(gate.issue_cookie().is_none());
    }

    #[test]
    fn issued_cookie_passes_the_gate() {
        let gate = gate(Some("ABC123"));
        let cookie = gate.issue_cookie().unwrap();
        assert!(cookie.starts_with("decidr_invite="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=31536000"));
        assert!(!cookie.contains("Secure"));

        let pair = cookie.split(';').next().unwrap();
        assert!(gate.request_is_invited(&headers_with_cookie(pair)));
    }

    #[test]
    fn production_cookie_is_secure() {
        let config = InviteConfig {
            code: Some(Secret::new("ABC123".into())),
            cookie_signing_key: None,
        };
        let gate = InviteGate::from_config(&config, true);
        assert!(gate.issue_cookie().unwrap().contains("; Secure"));
    }

    #[test]
    fn forged_or_missing_cookie_is_rejected() {
        let gate = gate(Some("ABC123"));
        assert!(!gate.request_is_invited(&HeaderMap::new()));
        assert!(!gate.request_is_invited(&headers_with_cookie("decidr_invite=deadbeef")));
        // Raw code in the cookie is not a valid tag either.
        assert!(!gate.request_is_invited(&headers_with_cookie("decidr_invite=ABC123")));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let gate = gate(Some("ABC123"));
        let tag = gate.issue_cookie().unwrap();
        let pair = tag.split(';').next().unwrap();
        let headers = headers_with_cookie(&format!("theme=dark; {pair}; lang=en"));
        assert!(gate.request_is_invited(&headers));
    }

    #[test]
    fn distinct_codes_produce_distinct_tags() {
        let a = gate(Some("ABC123")).issue_cookie().unwrap();
        let b = gate(Some("XYZ789")).issue_cookie().unwrap();
        assert_ne!(a, b);
    }
}
