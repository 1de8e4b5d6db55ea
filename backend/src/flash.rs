//! One-shot flash messages carried in a signed cookie
//!
//! A failed form submission redirects back to the form with a message.
//! The message travels in the `farmiq_flash` cookie as
//! `base64url(message).base64url(hmac_sha256(secret, message))` and is
//! cleared as soon as the form page renders it.

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "farmiq_flash";

/// Signs and verifies flash cookies
#[derive(Clone)]
pub struct FlashSigner {
    key: Arc<[u8]>,
}

impl std::fmt::Debug for FlashSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashSigner").finish_non_exhaustive()
    }
}

impl FlashSigner {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: Arc::from(key.as_ref()),
        }
    }

    /// Use the configured secret, or a fresh random one for this process
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret.filter(|s| !s.is_empty()) {
            Some(secret) => Self::new(secret.as_bytes()),
            None => {
                tracing::warn!("No session secret configured, flash cookies use a random key");
                Self::new(rand::random::<[u8; 32]>())
            }
        }
    }

    fn mac(&self) -> HmacSha256 {
        match HmacSha256::new_from_slice(&self.key) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC-SHA256 accepts any key length"),
        }
    }

    /// Encode a message as a signed cookie value
    pub fn sign(&self, message: &str) -> String {
        let mut mac = self.mac();
        mac.update(message.as_bytes());
        let signature = mac.finalize().into_bytes();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(message.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Decode a cookie value, returning `None` if it was tampered with
    pub fn verify(&self, value: &str) -> Option<String> {
        let (payload, signature) = value.split_once('.')?;
        let message = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(&message);
        mac.verify_slice(&signature).ok()?;

        String::from_utf8(message).ok()
    }

    /// Add a flash message to the jar
    pub fn set(&self, jar: CookieJar, message: &str) -> CookieJar {
        let cookie = Cookie::build((FLASH_COOKIE, self.sign(message)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }

    /// Remove the flash cookie, returning its message if the signature holds
    pub fn take(&self, jar: CookieJar) -> (CookieJar, Option<String>) {
        let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
            return (jar, None);
        };

        let message = self.verify(&value);
        if message.is_none() {
            tracing::debug!("Discarding flash cookie with invalid signature");
        }
        let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
        (jar, message)
    }

    /// `303 See Other` to `to`, carrying `message` for the next page
    pub fn redirect(&self, to: &str, message: &str) -> Response {
        let jar = self.set(CookieJar::default(), message);
        (jar, Redirect::to(to)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    #[test]
    fn test_sign_then_verify() {
        let signer = FlashSigner::new("secret");
        let value = signer.sign("Please enter a city name.");
        assert_eq!(
            signer.verify(&value).as_deref(),
            Some("Please enter a city name.")
        );
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let value = FlashSigner::new("one").sign("hello");
        assert_eq!(FlashSigner::new("two").verify(&value), None);
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let signer = FlashSigner::new("secret");
        let value = signer.sign("hello");
        let (_, signature) = value.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode("goodbye"), signature);
        assert_eq!(signer.verify(&forged), None);
        assert_eq!(signer.verify("no-dot-here"), None);
        assert_eq!(signer.verify("%%%.%%%"), None);
    }

    #[test]
    fn test_take_clears_cookie() {
        let signer = FlashSigner::new("secret");
        let jar = signer.set(CookieJar::default(), "hi");
        let (jar, message) = signer.take(jar);
        assert_eq!(message.as_deref(), Some("hi"));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_redirect_sets_cookie() {
        let response = FlashSigner::new("secret").redirect("/fertilizer", "oops");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/fertilizer");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("farmiq_flash="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_random_secret_when_unset() {
        let a = FlashSigner::from_secret(None);
        let b = FlashSigner::from_secret(Some(""));
        assert!(b.verify(&a.sign("x")).is_none());
    }
}
