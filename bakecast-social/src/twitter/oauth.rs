//! OAuth 1.0a (HMAC-SHA1) request signing for Twitter user-context endpoints.
//!
//! Only query-string and `application/x-www-form-urlencoded` parameters take
//! part in the signature. JSON and multipart bodies are never signed, so
//! callers pass them through untouched and only supply the URL here.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;
use std::fmt;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

/// The four static secrets of an app acting on behalf of one account.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct OAuthSigner {
    creds: TwitterCredentials,
}

impl OAuthSigner {
    pub fn new(creds: TwitterCredentials) -> Self {
        Self { creds }
    }

    /// Build the `Authorization` header value for a request, with a fresh
    /// nonce and the current time.
    pub fn authorization(
        &self,
        method: &str,
        url: &Url,
        form_params: &[(&str, &str)],
    ) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = time::OffsetDateTime::now_utc().unix_timestamp();
        self.authorization_with(method, url, form_params, &nonce, timestamp)
    }

    /// Deterministic variant of [`authorization`](Self::authorization).
    pub fn authorization_with(
        &self,
        method: &str,
        url: &Url,
        form_params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let timestamp = timestamp.to_string();
        let mut oauth: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", self.creds.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.creds.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string(method, url, &oauth, form_params);
        let signature = self.sign(&base);
        oauth.push(("oauth_signature", signature.as_str()));
        oauth.sort();

        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {fields}")
    }

    fn sign(&self, base: &str) -> String {
        let key = format!(
            "{}&{}",
            encode(&self.creds.consumer_secret),
            encode(&self.creds.access_token_secret)
        );
        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, OAUTH_ENCODE).to_string()
}

/// `METHOD&enc(base_url)&enc(sorted params)` per RFC 5849 §3.4.1.
pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    oauth: &[(&str, &str)],
    form_params: &[(&str, &str)],
) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .collect();
    params.extend(
        oauth
            .iter()
            .chain(form_params.iter())
            .map(|(k, v)| (encode(k), encode(v))),
    );
    params.sort();

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url.as_str()),
        encode(&param_string)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from Twitter's "Creating a signature" guide.
    fn docs_signer() -> OAuthSigner {
        OAuthSigner::new(TwitterCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        })
    }

    const DOCS_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const DOCS_TIMESTAMP: i64 = 1318622958;
    const DOCS_STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";

    fn docs_url() -> Url {
        Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true").unwrap()
    }

    #[test]
    fn base_string_matches_reference() {
        let oauth = [
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", DOCS_NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            (
                "oauth_token",
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            ),
            ("oauth_version", "1.0"),
        ];
        let base = signature_base_string("post", &docs_url(), &oauth, &[("status", DOCS_STATUS)]);
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520\
             a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn signature_matches_reference() {
        let header = docs_signer()
            .authorization_with(
                "POST",
                &docs_url(),
                &[("status", DOCS_STATUS)],
                DOCS_NONCE,
                DOCS_TIMESTAMP,
            );
        assert!(header.starts_with("OAuth "));
        assert!(
            header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""),
            "{header}"
        );
        assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(!header.contains("status="));
    }

    #[test]
    fn fresh_nonces_differ() {
        let url = Url::parse("https://api.twitter.com/2/tweets").unwrap();
        let s = docs_signer();
        let a = s.authorization("POST", &url, &[]);
        let b = s.authorization("POST", &url, &[]);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_secrets_still_sign() {
        let signer = OAuthSigner::new(TwitterCredentials {
            consumer_key: "ck".into(),
            consumer_secret: String::new(),
            access_token: "at".into(),
            access_token_secret: String::new(),
        });
        let url = Url::parse("https://api.twitter.com/2/users/me").unwrap();
        let header = signer.authorization_with("GET", &url, &[], "n", 1);
        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn encode_keeps_unreserved_only() {
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("a b+c/ü"), "a%20b%2Bc%2F%C3%BC");
    }

    #[test]
    fn debug_hides_secrets() {
        let shown = format!("{:?}", docs_signer());
        assert!(!shown.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
        assert!(!shown.contains("xvz1evFS4wEEPTGEFPHBog"));
    }
}
