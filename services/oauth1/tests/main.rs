use std::collections::HashSet;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use oauthsign_core::time::from_unix_timestamp;
use oauthsign_core::{Context, Result, Signer, StaticClock, StaticNonce};
use oauthsign_oauth1::{base_string, normalize_url, RequestSigner, StaticCredentialProvider};
use percent_encoding::percent_decode_str;
use pretty_assertions::assert_eq;
use sha1::Sha1;

fn init_context(timestamp: i64, nonce: &str) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new()
        .with_clock(StaticClock::new(
            from_unix_timestamp(timestamp).expect("timestamp must be valid"),
        ))
        .with_nonce(StaticNonce::new(nonce))
}

/// Split `OAuth k="v", ...` into decoded pairs, keeping header order.
fn parse_authorization(header: &str) -> Vec<(String, String)> {
    header
        .strip_prefix("OAuth ")
        .expect("header must start with OAuth")
        .split(", ")
        .map(|kv| {
            let (k, v) = kv.split_once('=').expect("pair must contain =");
            let v = v.trim_matches('"');
            (
                k.to_string(),
                percent_decode_str(v).decode_utf8_lossy().to_string(),
            )
        })
        .collect()
}

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn hmac_sha1_base64(key: &str, data: &str) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("any key length works");
    mac.update(data.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

#[tokio::test]
async fn test_request_temporary_credential() -> Result<()> {
    let ctx = init_context(1_000_000_000, "abc123");
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("ck", "cs"),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::get("https://api.example.com/resource?b=2&a=1")
        .body(())
        .expect("request must be valid")
        .into_parts();
    signer.sign(&mut parts, b"").await?;

    let header = parts.headers[AUTHORIZATION].to_str().expect("must be ascii");
    let params = parse_authorization(header);

    let expected_base = "GET&https%3A%2F%2Fapi.example.com%2Fresource&a%3D1%26b%3D2%26oauth_consumer_key%3Dck%26oauth_nonce%3Dabc123%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1000000000%26oauth_version%3D1.0";
    assert_eq!(
        expected_base,
        base_string(
            &Method::GET,
            &normalize_url("https://api.example.com/resource?b=2&a=1", None)?,
            [
                ("b", "2"),
                ("a", "1"),
                ("oauth_consumer_key", "ck"),
                ("oauth_version", "1.0"),
                ("oauth_signature_method", "HMAC-SHA1"),
                ("oauth_timestamp", "1000000000"),
                ("oauth_nonce", "abc123"),
            ]
            .map(|(k, v)| (k.to_string(), v.to_string()))
        )
    );

    assert_eq!(
        vec![
            "oauth_consumer_key",
            "oauth_version",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_nonce",
            "oauth_signature",
        ],
        params.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(
        Some(hmac_sha1_base64("cs&", expected_base).as_str()),
        param(&params, "oauth_signature")
    );

    Ok(())
}

#[tokio::test]
async fn test_token_credential_with_verifier() -> Result<()> {
    let ctx = init_context(1_000_000_000, "abc123");
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("ck", "cs")
            .with_token("tk", "ts")
            .with_verifier("v1"),
        RequestSigner::new().with_redirect_uri("https://client.example.com/callback"),
    );

    let (mut parts, _) = http::Request::get("https://api.example.com/resource?b=2&a=1")
        .body(())
        .expect("request must be valid")
        .into_parts();
    signer.sign(&mut parts, b"").await?;

    let params = parse_authorization(parts.headers[AUTHORIZATION].to_str().unwrap());
    assert_eq!(Some("tk"), param(&params, "oauth_token"));
    assert_eq!(Some("v1"), param(&params, "oauth_verifier"));
    assert_eq!(None, param(&params, "oauth_callback"));

    let expected_base = "GET&https%3A%2F%2Fapi.example.com%2Fresource&a%3D1%26b%3D2%26oauth_consumer_key%3Dck%26oauth_nonce%3Dabc123%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1000000000%26oauth_token%3Dtk%26oauth_verifier%3Dv1%26oauth_version%3D1.0";
    assert_eq!(
        Some(hmac_sha1_base64("cs&ts", expected_base).as_str()),
        param(&params, "oauth_signature")
    );

    Ok(())
}

/// Example from the OAuth 1.0 protocol document, appendix A.5.
#[tokio::test]
async fn test_photos_example() -> Result<()> {
    let ctx = init_context(1_191_242_096, "kllo9940pd9333jh");
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44")
            .with_token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00"),
        RequestSigner::new(),
    );

    let (mut parts, _) =
        http::Request::get("http://photos.example.net/photos?file=vacation.jpg&size=original")
            .body(())
            .expect("request must be valid")
            .into_parts();
    signer.sign(&mut parts, b"").await?;

    let params = parse_authorization(parts.headers[AUTHORIZATION].to_str().unwrap());
    assert_eq!(
        Some("tR3+Ty81lMeYAr/Fid0kMTYa/WM="),
        param(&params, "oauth_signature")
    );

    Ok(())
}

/// Form-encoded POST as published in the Twitter API signing guide.
#[tokio::test]
async fn test_form_body_example() -> Result<()> {
    let ctx = init_context(1_318_622_958, "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg");
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .with_token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        ),
        RequestSigner::new(),
    );

    let body = "status=Hello%20Ladies%20%2b%20Gentlemen%2c%20a%20signed%20OAuth%20request%21";
    let (mut parts, _) =
        http::Request::post("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(())
            .expect("request must be valid")
            .into_parts();
    signer.sign(&mut parts, body.as_bytes()).await?;

    let params = parse_authorization(parts.headers[AUTHORIZATION].to_str().unwrap());
    assert_eq!(
        Some("hCtSmYh+iHYCEqBWrE7C7hYmtUk="),
        param(&params, "oauth_signature")
    );

    Ok(())
}

#[tokio::test]
async fn test_form_body_ignored_for_other_content_type() -> Result<()> {
    let ctx = init_context(1_000_000_000, "abc123");
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("ck", "cs"),
        RequestSigner::new(),
    );

    let sign_with = |content_type: &'static str| {
        let signer = signer.clone();
        async move {
            let (mut parts, _) = http::Request::post("https://api.example.com/resource")
                .header(CONTENT_TYPE, content_type)
                .body(())
                .expect("request must be valid")
                .into_parts();
            signer.sign(&mut parts, b"c=3").await?;
            let params = parse_authorization(parts.headers[AUTHORIZATION].to_str().unwrap());
            Ok::<_, oauthsign_core::Error>(
                param(&params, "oauth_signature").map(|v| v.to_string()),
            )
        }
    };

    let base = |extra: &str| {
        format!("POST&https%3A%2F%2Fapi.example.com%2Fresource&{extra}oauth_consumer_key%3Dck%26oauth_nonce%3Dabc123%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1000000000%26oauth_version%3D1.0")
    };

    assert_eq!(
        Some(hmac_sha1_base64("cs&", &base("c%3D3%26"))),
        sign_with("application/x-www-form-urlencoded").await?
    );
    assert_eq!(
        Some(hmac_sha1_base64("cs&", &base(""))),
        sign_with("text/plain").await?
    );

    Ok(())
}

#[tokio::test]
async fn test_nonce_is_fresh_per_call() -> Result<()> {
    let ctx = Context::new();
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("ck", "cs"),
        RequestSigner::new(),
    );

    let mut nonces = HashSet::new();
    for _ in 0..1000 {
        let (mut parts, _) = http::Request::get("https://api.example.com/resource")
            .body(())
            .expect("request must be valid")
            .into_parts();
        signer.sign(&mut parts, b"").await?;

        let params = parse_authorization(parts.headers[AUTHORIZATION].to_str().unwrap());
        nonces.insert(
            param(&params, "oauth_nonce")
                .expect("nonce must be present")
                .to_string(),
        );
    }

    assert_eq!(1000, nonces.len());
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_fails() {
    let ctx = Context::new();
    let signer = Signer::new(
        ctx,
        oauthsign_oauth1::DefaultCredentialProvider::new(),
        RequestSigner::new(),
    );

    let (mut parts, _) = http::Request::get("https://api.example.com/resource")
        .body(())
        .expect("request must be valid")
        .into_parts();
    let err = signer
        .sign(&mut parts, b"")
        .await
        .expect_err("signing without credential must fail");

    assert!(err.is_credential_error());
    assert!(parts.headers.get(AUTHORIZATION).is_none());
}
