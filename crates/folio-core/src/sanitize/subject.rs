//! Subject-line sanitization.
//!
//! The subject of a relayed message is emitted into an email header
//! context, where CR/LF sequences would let an attacker inject
//! additional headers (`Bcc:`, `X-*:`, ...).

/// CR/LF sequences that terminate a header line.
const HEADER_BREAKS: &[&str] = &["\r\n", "\n\r", "\r", "\n"];

/// Strips header-breaking characters from an email subject line.
///
/// CR/LF sequences become single spaces, null bytes are removed, and
/// the result is collapsed to single-space-separated words.
pub fn sanitize_subject(subject: &str) -> String {
    let mut sanitized = subject.to_string();
    for pattern in HEADER_BREAKS {
        if sanitized.contains(pattern) {
            sanitized = sanitized.replace(pattern, " ");
        }
    }
    if sanitized.contains('\0') {
        sanitized = sanitized.replace('\0', "");
    }
    sanitized.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_subject_unchanged() {
        assert_eq!(sanitize_subject("Contact From Portfolio"), "Contact From Portfolio");
    }

    #[test]
    fn test_crlf_injection_stripped() {
        let sanitized = sanitize_subject("Hello\r\nBcc: attacker@evil.example");
        assert!(!sanitized.contains('\r'));
        assert!(!sanitized.contains('\n'));
        assert_eq!(sanitized, "Hello Bcc: attacker@evil.example");
    }

    #[test]
    fn test_lone_cr_and_lf_stripped() {
        assert_eq!(sanitize_subject("a\rb\nc"), "a b c");
    }

    #[test]
    fn test_null_bytes_removed() {
        assert_eq!(sanitize_subject("sub\0ject"), "subject");
    }

    #[test]
    fn test_multiple_injections() {
        let sanitized = sanitize_subject("S\r\nTo: x@y.example\r\nX-Priority: 1");
        assert!(!sanitized.contains('\r'));
        assert!(!sanitized.contains('\n'));
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(sanitize_subject("  spaced   out  "), "spaced out");
    }

    #[test]
    fn test_empty_subject() {
        assert_eq!(sanitize_subject(""), "");
    }
}
