use subtle::ConstantTimeEq;

/// API-key gate for the HTTP gateway.
///
/// Fail-closed: with no key configured, requests pass only when the explicit
/// dev-mode flag is set. Inferring "development" from a generic environment
/// string is exactly the accidental-bypass path this refuses to have.
#[derive(Debug, Clone)]
pub struct ApiKeyGuard {
    expected: Option<String>,
    dev_mode: bool,
}

impl ApiKeyGuard {
    pub fn new(expected: Option<String>, dev_mode: bool) -> Self {
        let expected = expected.filter(|key| !key.trim().is_empty());
        Self { expected, dev_mode }
    }

    /// True when requests are admitted without a key (explicit dev mode and
    /// no key configured).
    pub fn is_open(&self) -> bool {
        self.expected.is_none() && self.dev_mode
    }

    /// Check a supplied key. The length comparison short-circuits, which is
    /// fine: length is not secret. The body compare is constant-time so the
    /// position of the first mismatching byte is not observable.
    pub fn check(&self, supplied: Option<&str>) -> bool {
        let Some(expected) = self.expected.as_deref() else {
            return self.dev_mode;
        };
        let Some(supplied) = supplied else {
            return false;
        };
        constant_time_eq(supplied, expected)
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
