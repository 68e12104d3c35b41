//! OAuth 1.0a request signing for the Twitter API.
//!
//! Every request carries an `Authorization: OAuth ...` header whose signature
//! is an HMAC-SHA1 over the request method, the base URL, and all request
//! parameters (query or form parameters plus the `oauth_*` parameters).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::ApiCredentials;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Percent-encodes a string per RFC 3986, as OAuth 1.0a requires.
///
/// Only `A-Z`, `a-z`, `0-9`, `-`, `.`, `_` and `~` are left unescaped.
///
/// # Example
///
/// ```rust
/// use zazu::oauth::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// ```
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Encodes parameters as `k=v` pairs joined with `&`, in the given order.
pub fn encode_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the OAuth 1.0a signature base string.
///
/// `base_url` must not contain a query string or fragment.
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&parameter_string)
    )
}

/// Signs a base string with the consumer secret and token secret.
pub fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, InvalidLength> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the `Authorization` header for a request.
///
/// # Parameters
///
/// - `credentials`: The consumer and access token credentials
/// - `method`: HTTP method (`GET`, `POST`)
/// - `base_url`: Request URL without query string
/// - `request_params`: Query or form parameters sent with the request
/// - `nonce`: A unique random string for this request
/// - `timestamp`: Unix time in seconds
///
/// # Errors
///
/// Returns [`InvalidLength`] if the HMAC key cannot be set up.
pub fn build_oauth1_header(
    credentials: &ApiCredentials,
    method: &str,
    base_url: &str,
    request_params: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> Result<String, InvalidLength> {
    let mut oauth_params = vec![
        (
            "oauth_consumer_key".to_string(),
            credentials.consumer_key.clone(),
        ),
        ("oauth_nonce".to_string(), nonce.to_string()),
        (
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        ),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.access_token_key.clone()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend_from_slice(request_params);

    let base_string = signature_base_string(method, base_url, &all_params);
    let signature = sign(
        &base_string,
        &credentials.consumer_secret,
        &credentials.access_token_secret,
    )?;
    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}

/// Generates a fresh nonce: 16 random bytes, hex encoded.
pub fn generate_nonce() -> Result<String, getrandom::Error> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes)?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from Twitter's "Creating a signature" documentation
    fn example_credentials() -> ApiCredentials {
        ApiCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token_key: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    const EXAMPLE_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const EXAMPLE_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const EXAMPLE_TIMESTAMP: i64 = 1318622958;

    fn example_request_params() -> Vec<(String, String)> {
        vec![
            ("include_entities".to_string(), "true".to_string()),
            (
                "status".to_string(),
                "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
            ),
        ]
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("abcXYZ019-._~"), "abcXYZ019-._~");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("!*'()"), "%21%2A%27%28%29");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_encode_params_keeps_order() {
        let params = vec![
            ("status".to_string(), "hi there".to_string()),
            ("trim_user".to_string(), "true".to_string()),
        ];
        assert_eq!(encode_params(&params), "status=hi%20there&trim_user=true");
    }

    #[test]
    fn test_signature_base_string() {
        let credentials = example_credentials();
        let mut params = vec![
            ("oauth_consumer_key".to_string(), credentials.consumer_key),
            ("oauth_nonce".to_string(), EXAMPLE_NONCE.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), EXAMPLE_TIMESTAMP.to_string()),
            ("oauth_token".to_string(), credentials.access_token_key),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        params.extend(example_request_params());

        let base = signature_base_string("post", EXAMPLE_URL, &params);
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
    fn test_build_oauth1_header_matches_documented_signature() {
        let header = build_oauth1_header(
            &example_credentials(),
            "POST",
            EXAMPLE_URL,
            &example_request_params(),
            EXAMPLE_NONCE,
            EXAMPLE_TIMESTAMP,
        )
        .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        // hCtSmYh+iHYCEqBWrE7C7hYmtUk= percent-encoded
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        // Request parameters are signed but not sent in the header
        assert!(!header.contains("status="));
    }

    #[test]
    fn test_sign_with_empty_secrets() {
        // Key is just "&"; any key length is accepted
        let signature = sign("GET&x&y", "", "").unwrap();
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn test_generate_nonce() {
        let first = generate_nonce().unwrap();
        let second = generate_nonce().unwrap();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
