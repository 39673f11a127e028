//! Request context
//!
//! The parts of an incoming request needed to build absolute URLs for a page.

/// Host, scheme and raw path of the request a page is resolved for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Host header, possibly with a port, e.g. `localhost:8090`
    pub host: String,
    pub is_secure: bool,
    /// Raw request path, e.g. `/umber/demo/home`
    pub path: String,
}

impl RequestContext {
    pub fn new(host: &str, is_secure: bool, path: &str) -> Self {
        Self {
            host: host.to_string(),
            is_secure,
            path: path.to_string(),
        }
    }

    /// `(url, secure_url)` for this request.
    ///
    /// The port of the incoming scheme in the host is swapped for the port of
    /// the other scheme.
    pub fn urls(&self, http_port: u16, https_port: u16) -> (String, String) {
        let (http_port, https_port) = (http_port.to_string(), https_port.to_string());
        let (host, secure_host) = if self.is_secure {
            (self.host.replace(&https_port, &http_port), self.host.clone())
        } else {
            (self.host.clone(), self.host.replace(&http_port, &https_port))
        };
        (
            format!("http://{}{}", host, self.path),
            format!("https://{}{}", secure_host, self.path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_request() {
        let context = RequestContext::new("localhost:8090", false, "/umber/demo/home");
        let (url, secure_url) = context.urls(8090, 8443);
        assert_eq!(url, "http://localhost:8090/umber/demo/home");
        assert_eq!(secure_url, "https://localhost:8443/umber/demo/home");
    }

    #[test]
    fn test_secure_request() {
        let context = RequestContext::new("localhost:8443", true, "/umber/demo/");
        let (url, secure_url) = context.urls(8090, 8443);
        assert_eq!(url, "http://localhost:8090/umber/demo/");
        assert_eq!(secure_url, "https://localhost:8443/umber/demo/");
    }

    #[test]
    fn test_host_without_port() {
        let context = RequestContext::new("example.edu", false, "/demo/home");
        let (url, secure_url) = context.urls(80, 443);
        assert_eq!(url, "http://example.edu/demo/home");
        assert_eq!(secure_url, "https://example.edu/demo/home");
    }
}
