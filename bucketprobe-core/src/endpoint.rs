//! Endpoint synthesis for a (bucket, region) pair.
//!
//! Each endpoint carries the candidate name and region it was derived from,
//! so a finding never has to re-parse its own URL.

use std::fmt;

/// Probe protocol. HTTP is tried as well as HTTPS because website endpoints
/// and misconfigured buckets frequently answer on plain HTTP only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// A single reachable address derived from a (bucket, region) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub host: String,
    /// Bucket path segment for path-style addressing; `None` for
    /// virtual-hosted shapes.
    pub path: Option<String>,
    /// Candidate name this endpoint was synthesized for.
    pub bucket: String,
    pub region: Option<&'static str>,
}

impl Endpoint {
    pub fn url(&self) -> String {
        match &self.path {
            Some(p) => format!("{}://{}/{}", self.scheme.as_str(), self.host, p),
            None => format!("{}://{}", self.scheme.as_str(), self.host),
        }
    }

    /// URL of an object key under this endpoint.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.url(), key)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Host shapes for one (bucket, region) pair, in catalogue order.
///
/// Always starts with the bucket as a bare hostname. Without a region the
/// global virtual-hosted and path-style endpoints follow; with a region the
/// regional, hyphenated-region, static-website and dual-stack shapes follow,
/// virtual-hosted before path-style within each group.
fn host_shapes(bucket: &str, region: Option<&str>, include_website: bool) -> Vec<(String, Option<String>)> {
    let b = bucket;
    let mut shapes: Vec<(String, Option<String>)> = vec![(b.to_string(), None)];
    match region {
        None => {
            shapes.push((format!("{b}.s3.amazonaws.com"), None));
            shapes.push(("s3.amazonaws.com".to_string(), Some(b.to_string())));
        }
        Some(r) => {
            shapes.push((format!("{b}.s3.{r}.amazonaws.com"), None));
            shapes.push((format!("s3.{r}.amazonaws.com"), Some(b.to_string())));
            shapes.push((format!("{b}.s3-{r}.amazonaws.com"), None));
            shapes.push((format!("s3-{r}.amazonaws.com"), Some(b.to_string())));
            if include_website {
                shapes.push((format!("{b}.s3-website.{r}.amazonaws.com"), None));
                shapes.push((format!("{b}.s3-website-{r}.amazonaws.com"), None));
                shapes.push((format!("s3-website.{r}.amazonaws.com"), Some(b.to_string())));
                shapes.push((format!("s3-website-{r}.amazonaws.com"), Some(b.to_string())));
            }
            shapes.push((format!("{b}.s3.dualstack.{r}.amazonaws.com"), None));
            shapes.push((format!("s3.dualstack.{r}.amazonaws.com"), Some(b.to_string())));
        }
    }
    shapes
}

/// Synthesize every endpoint to probe for a (bucket, region) pair.
///
/// Deterministic: protocol outer loop (http, then https), then the fixed
/// host-shape catalogue. The result is a plain `Vec`, so iteration is
/// trivially restartable. Website shapes are omitted when the caller has
/// opted out; that policy lives with the caller, not here.
pub fn endpoints_for(
    bucket: &str,
    region: Option<&'static str>,
    include_website: bool,
) -> Vec<Endpoint> {
    let shapes = host_shapes(bucket, region, include_website);
    let mut endpoints = Vec::with_capacity(shapes.len() * 2);
    for scheme in [Scheme::Http, Scheme::Https] {
        for (host, path) in &shapes {
            endpoints.push(Endpoint {
                scheme,
                host: host.clone(),
                path: path.clone(),
                bucket: bucket.to_string(),
                region,
            });
        }
    }
    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_catalogue_size() {
        // bare + virtual-hosted + path-style, per protocol
        let eps = endpoints_for("acme", None, true);
        assert_eq!(eps.len(), 6);
    }

    #[test]
    fn regional_catalogue_size() {
        // bare + 2 regional + 2 hyphenated + 4 website + 2 dualstack, per protocol
        let eps = endpoints_for("acme", Some("us-east-1"), true);
        assert_eq!(eps.len(), 22);

        let no_website = endpoints_for("acme", Some("us-east-1"), false);
        assert_eq!(no_website.len(), 14);
        assert!(no_website.iter().all(|e| !e.host.contains("s3-website")));
    }

    #[test]
    fn ordering_is_protocol_major_and_restartable() {
        let first = endpoints_for("acme", Some("eu-west-2"), true);
        let second = endpoints_for("acme", Some("eu-west-2"), true);
        assert_eq!(first, second);

        assert!(first[..11].iter().all(|e| e.scheme == Scheme::Http));
        assert!(first[11..].iter().all(|e| e.scheme == Scheme::Https));
        assert_eq!(first[0].url(), "http://acme");
        assert_eq!(first[1].url(), "http://acme.s3.eu-west-2.amazonaws.com");
        assert_eq!(first[2].url(), "http://s3.eu-west-2.amazonaws.com/acme");
    }

    #[test]
    fn endpoint_carries_its_origin() {
        let eps = endpoints_for("acme-logs", Some("us-west-2"), true);
        assert!(eps.iter().all(|e| e.bucket == "acme-logs"));
        assert!(eps.iter().all(|e| e.region == Some("us-west-2")));
    }

    #[test]
    fn object_url_appends_key() {
        let ep = &endpoints_for("acme", None, true)[1];
        assert_eq!(
            ep.object_url("probe.txt"),
            "http://acme.s3.amazonaws.com/probe.txt"
        );
    }
}
