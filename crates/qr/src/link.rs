/// Builds the chat deep link encoded in the footer QR code:
/// `https://wa.me/<digits>?text=<prefill>`.
///
/// Only the digits of `number` are kept, so `+225 07 00 00 00` and
/// `2250700000000` produce the same link.
pub fn contact_link(number: &str, prefill: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if prefill.trim().is_empty() {
        return format!("https://wa.me/{}", digits);
    }
    format!("https://wa.me/{}?text={}", digits, percent_encode(prefill))
}

/// Percent-encodes everything except RFC 3986 unreserved characters.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
