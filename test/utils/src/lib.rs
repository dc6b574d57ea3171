use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

fn encode_segment(value: &serde_json::Value) -> String {
    return URL_SAFE_NO_PAD.encode(value.to_string());
}

pub fn now_secs() -> i64 {
    return SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
}

/// Builds an unsigned JWT whose payload carries the provided claims.
pub fn jwt_with_claims(claims: serde_json::Value) -> String {
    let header = serde_json::json!({ "alg": "HS256", "typ": "JWT" });
    return format!(
        "{}.{}.signature",
        encode_segment(&header),
        encode_segment(&claims)
    );
}

pub fn jwt_with_exp(exp: i64) -> String {
    return jwt_with_claims(serde_json::json!({ "sub": "alice", "exp": exp }));
}

pub fn valid_jwt() -> String {
    return jwt_with_exp(now_secs() + 3600);
}

pub fn expired_jwt() -> String {
    return jwt_with_exp(now_secs() - 3600);
}
