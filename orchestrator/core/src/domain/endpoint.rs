// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Coordinator endpoint
//!
//! Host and port of the coordinator service. Fixed for the lifetime of a
//! session.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

/// Port the coordinator listens on when none is given.
pub const DEFAULT_COORDINATOR_PORT: u16 = 7071;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordinatorEndpoint {
    host: String,
    port: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("empty coordinator address")]
    Empty,
    #[error("invalid port '{0}' in coordinator address")]
    InvalidPort(String),
}

impl CoordinatorEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// URI accepted by the tonic channel builder.
    pub fn uri(&self) -> String {
        if self.host.contains(':') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Whether a coordinator spawned on this machine could listen here.
    pub fn is_loopback(&self) -> bool {
        if self.host.eq_ignore_ascii_case("localhost") {
            return true;
        }
        self.host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
    }

    /// Parse `address[:port]`, falling back to `default_port`.
    ///
    /// IPv6 literals must be bracketed when a port is given
    /// (`[::1]:7071`); a bare `::1` is taken as a host without port.
    pub fn parse_with_default(
        address: &str,
        default_port: u16,
    ) -> Result<Self, EndpointParseError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(EndpointParseError::Empty);
        }

        if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or(EndpointParseError::Empty)?;
            let port = match tail.strip_prefix(':') {
                Some(port) => parse_port(port)?,
                None => default_port,
            };
            return Ok(Self::new(host, port));
        }

        match address.split_once(':') {
            Some((host, port)) if !port.contains(':') => {
                if host.is_empty() {
                    return Err(EndpointParseError::Empty);
                }
                Ok(Self::new(host, parse_port(port)?))
            }
            _ => Ok(Self::new(address, default_port)),
        }
    }
}

fn parse_port(port: &str) -> Result<u16, EndpointParseError> {
    port.parse::<u16>()
        .map_err(|_| EndpointParseError::InvalidPort(port.to_string()))
}

impl FromStr for CoordinatorEndpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, DEFAULT_COORDINATOR_PORT)
    }
}

impl fmt::Display for CoordinatorEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_and_port() {
        let endpoint: CoordinatorEndpoint = "judge.local:9000".parse().unwrap();
        assert_eq!(endpoint.host(), "judge.local");
        assert_eq!(endpoint.port(), 9000);
        assert_eq!(endpoint.uri(), "http://judge.local:9000");
    }

    #[test]
    fn test_parse_uses_default_port() {
        let endpoint = CoordinatorEndpoint::parse_with_default("10.0.0.2", 1234).unwrap();
        assert_eq!(endpoint, CoordinatorEndpoint::new("10.0.0.2", 1234));
    }

    #[test]
    fn test_parse_ipv6() {
        let endpoint: CoordinatorEndpoint = "[::1]:8000".parse().unwrap();
        assert_eq!(endpoint.host(), "::1");
        assert_eq!(endpoint.port(), 8000);
        assert_eq!(endpoint.uri(), "http://[::1]:8000");
        assert!(endpoint.is_loopback());

        let bare: CoordinatorEndpoint = "::1".parse().unwrap();
        assert_eq!(bare.port(), DEFAULT_COORDINATOR_PORT);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<CoordinatorEndpoint>(), Err(EndpointParseError::Empty));
        assert_eq!(
            "host:http".parse::<CoordinatorEndpoint>(),
            Err(EndpointParseError::InvalidPort("http".to_string()))
        );
        assert_eq!(":80".parse::<CoordinatorEndpoint>(), Err(EndpointParseError::Empty));
    }

    #[test]
    fn test_loopback_detection() {
        assert!(CoordinatorEndpoint::new("localhost", 1).is_loopback());
        assert!(CoordinatorEndpoint::new("127.0.0.1", 1).is_loopback());
        assert!(!CoordinatorEndpoint::new("192.168.1.20", 1).is_loopback());
        assert!(!CoordinatorEndpoint::new("judge.example.org", 1).is_loopback());
    }
}
