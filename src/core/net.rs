// src/core/net.rs
// HTTP/1.0 GET over TCP (std-only), plain http:// only.
// HTTP/1.0 + `Connection: close` means the body runs to EOF, no chunked transfer.

use std::{error::Error, io::{Read, Write}, net::TcpStream, time::Duration};
use crate::config::consts::{MAX_REDIRECTS, NET_TIMEOUT_SECS, USER_AGENT};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    pub host: String,
    pub port: u16,
    /// Path + query, always starting with '/'.
    pub path: String,
}

impl Url {
    pub fn parse(url: &str) -> Result<Url, Box<dyn Error>> {
        let rest = url.trim();
        if rest.get(..8).is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://")) {
            return Err(format!("https is not supported (no TLS): {}; save the page and use --input", rest).into());
        }
        let rest = match rest.get(..7) {
            Some(scheme) if scheme.eq_ignore_ascii_case("http://") => &rest[7..],
            _ => return Err(format!("Not an http:// URL: {}", rest).into()),
        };

        let (authority, path) = match rest.find(['/', '?', '#']) {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        let path = path.split('#').next().unwrap_or("/");
        let path = if path.starts_with('/') { s!(path) } else { join!("/", path) };

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => (h, p.parse::<u16>().map_err(|_| format!("Bad port in URL: {}", url))?),
            None => (authority, 80),
        };
        if host.is_empty() {
            return Err(format!("Missing host in URL: {}", url).into());
        }
        Ok(Url { host: s!(host), port, path })
    }

    /// Resolve a `Location` header against this URL.
    pub fn join(&self, location: &str) -> Result<Url, Box<dyn Error>> {
        let loc = location.trim();
        if loc.contains("://") {
            return Url::parse(loc);
        }
        let path = if loc.starts_with('/') {
            s!(loc)
        } else {
            let base = self.path.rsplit_once('/').map_or("", |(dir, _)| dir);
            join!(base, "/", loc)
        };
        Ok(Url { host: self.host.clone(), port: self.port, path })
    }
}

impl std::fmt::Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.port == 80 {
            write!(f, "http://{}{}", self.host, self.path)
        } else {
            write!(f, "http://{}:{}{}", self.host, self.port, self.path)
        }
    }
}

enum Response {
    Body(String),
    Redirect(String),
}

fn get_once(url: &Url) -> Result<Response, Box<dyn Error>> {
    let mut s = TcpStream::connect((url.host.as_str(), url.port))?;
    s.set_read_timeout(Some(Duration::from_secs(NET_TIMEOUT_SECS)))?;
    s.set_write_timeout(Some(Duration::from_secs(NET_TIMEOUT_SECS)))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nAccept: text/html\r\nConnection: close\r\n\r\n",
        url.path, url.host, USER_AGENT
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")?;
    let head = &resp[..body_idx];
    let mut lines = head.split("\r\n");
    let status = lines.next().unwrap_or("");
    let code = status.split_whitespace().nth(1).unwrap_or("");

    match code {
        "200" => Ok(Response::Body(resp[body_idx + 4..].to_string())),
        "301" | "302" | "303" | "307" | "308" => {
            let location = lines
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("location"))
                .map(|(_, v)| s!(v.trim()))
                .ok_or_else(|| format!("HTTP {} without Location: {}", code, url))?;
            Ok(Response::Redirect(location))
        }
        _ => Err(format!("HTTP error: {} {}", status, url).into()),
    }
}

/// Fetch `url` and return the body. Follows plain-http redirects.
pub fn http_get(url: &str) -> Result<String, Box<dyn Error>> {
    let mut current = Url::parse(url)?;
    for _ in 0..=MAX_REDIRECTS {
        logd!("Net: GET {}", current);
        match get_once(&current)? {
            Response::Body(body) => {
                logf!("Net: {} bytes from {}", body.len(), current);
                return Ok(body);
            }
            Response::Redirect(location) => {
                logd!("Net: redirect -> {}", location);
                current = current.join(&location)?;
            }
        }
    }
    Err(format!("Too many redirects fetching {}", url).into())
}
