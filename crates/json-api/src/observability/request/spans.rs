//! Route labels for request spans and metrics.

/// Collapse a request path to one of the served routes so arbitrary paths
/// cannot grow metric label sets.
pub(super) fn route_label(path: &str) -> &'static str {
    match path.trim_end_matches('/') {
        "" => "/",
        "/webhook" => "/webhook",
        "/message" => "/message",
        "/healthcheck" => "/healthcheck",
        "/metrics" => "/metrics",
        _ => "unmatched",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn served_routes_keep_their_path() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/message"), "/message");
        assert_eq!(route_label("/webhook/"), "/webhook");
    }

    #[test]
    fn unknown_paths_share_one_label() {
        assert_eq!(route_label("/wp-admin"), "unmatched");
        assert_eq!(route_label("/message/123"), "unmatched");
    }
}
