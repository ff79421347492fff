//! Hostname-to-certificate matching.
//!
//! Pure functions over a certificate's domain list. Wildcards cover exactly
//! one leftmost label: `*.example.com` matches `www.example.com` but neither
//! `example.com` nor `a.b.example.com`.

use std::net::IpAddr;
use url::{Host, Url};

/// Prefix OpenSSL puts in front of IP entries of a rendered SAN list.
const IP_ADDRESS_PREFIX: &str = "ip address:";

/// Parse a URL, treating scheme-less input as `https://<input>`.
pub(crate) fn parse_url(target: &str) -> Option<Url> {
    if target.contains("://") {
        Url::parse(target).ok()
    } else {
        Url::parse(&format!("https://{}", target)).ok()
    }
}

/// Extract the host to compare against certificate names.
///
/// IP literals are returned in canonical form; anything else is read as a
/// URL (or bare hostname) and its lowercased host component returned.
///
/// Shorthand or hex IPv4 hosts such as `127.1` are kept as written rather
/// than widened to the address a URL parser would resolve them to.
pub fn host_of(target: &str) -> Option<String> {
    let target = target.trim();
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    let url = parse_url(target)?;
    match url.host()? {
        Host::Ipv4(_) | Host::Ipv6(_) => {
            let raw = raw_host(target);
            match raw.parse::<IpAddr>() {
                Ok(ip) => Some(ip.to_string()),
                Err(_) if raw.is_empty() => None,
                Err(_) => Some(raw.to_lowercase()),
            }
        }
        Host::Domain(_) => url_host(&url),
    }
}

/// Host text of `target` exactly as written: no scheme, userinfo, port,
/// path or IPv6 brackets.
fn raw_host(target: &str) -> &str {
    let rest = target.split_once("://").map_or(target, |(_, rest)| rest);
    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or(rest);
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if let Some(bracketed) = authority.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or(bracketed);
    }
    authority.rsplit_once(':').map_or(authority, |(host, _)| host)
}

/// Host component of a URL, with IPv6 addresses unbracketed.
pub(crate) fn url_host(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(d) if !d.is_empty() => Some(d.to_string()),
        Host::Domain(_) => None,
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Whether any of `domains` covers the host of `target`.
///
/// Candidates are lowercased and stripped of an `IP Address:` prefix, then
/// compared exactly and, failing that, as a single-label wildcard.
pub fn applies_to_host<S: AsRef<str>>(domains: &[S], target: &str) -> bool {
    let Some(host) = host_of(target) else {
        return false;
    };

    domains.iter().any(|candidate| {
        let candidate = normalize_candidate(candidate.as_ref());
        candidate == host || wildcard_covers_host(&candidate, &host)
    })
}

/// Whether the wildcard pattern `wildcard` covers `host`.
///
/// Both arguments are expected lowercase. A pattern without a leading `*.`
/// only matches itself.
pub fn wildcard_covers_host(wildcard: &str, host: &str) -> bool {
    if wildcard == host {
        return true;
    }

    let Some(suffix) = wildcard.strip_prefix('*') else {
        return false;
    };
    if !suffix.starts_with('.') {
        return false;
    }

    // A wildcard never reaches more labels deep than it spells out.
    if wildcard.matches('.').count() < host.matches('.').count() {
        return false;
    }

    let dotted_host = format!(".{}", host);

    // `*` must stand for a non-empty label.
    if dotted_host == suffix {
        return false;
    }

    dotted_host.ends_with(suffix)
}

/// Loose membership: `domain` equals a certificate domain or is a subdomain of one.
///
/// Ignores wildcard semantics entirely. Useful for reporting and search,
/// never for trust decisions.
pub fn contains_domain<S: AsRef<str>>(domains: &[S], domain: &str) -> bool {
    domains.iter().any(|d| {
        let d = d.as_ref();
        d == domain || domain.ends_with(&format!(".{}", d))
    })
}

fn normalize_candidate(candidate: &str) -> String {
    let lower = candidate.to_lowercase();
    match lower.strip_prefix(IP_ADDRESS_PREFIX) {
        Some(ip) => ip.to_string(),
        None => lower,
    }
}
