//! Endpoint URL construction.
//!
//! Device paths are sent as query values. `/` stays readable; characters that
//! would end or corrupt the query value are percent-encoded.

/// Build `{base}{endpoint}?k1=v1&k2=v2`.
pub fn endpoint_url(base: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), endpoint);
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&encode_query_value(value));
    }
    url
}

/// Percent-encode the characters that break a query value.
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' | '&' | '#' | '+' | '?' | '=' | ' ' => {
                encoded.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    encoded.push_str(&format!("%{:02X}", byte));
                }
            }
            c => encoded.push(c),
        }
    }
    encoded
}
