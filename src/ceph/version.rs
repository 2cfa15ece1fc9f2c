// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ceph software version as reported by `ceph --version`.

use crate::error::{Result, RookError};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CephVersion {
    pub major: u32,
    pub minor: u32,
    pub extra: u32,
    pub build: u32,
    pub commit_id: String,
}

impl CephVersion {
    pub const fn new(major: u32, minor: u32, extra: u32) -> Self {
        Self {
            major,
            minor,
            extra,
            build: 0,
            commit_id: String::new(),
        }
    }

    pub fn release_name(&self) -> &'static str {
        match self.major {
            14 => "nautilus",
            15 => "octopus",
            16 => "pacific",
            17 => "quincy",
            18 => "reef",
            19 => "squid",
            _ => "unknown",
        }
    }

    /// Compares major, minor, extra and build; the commit is ignored.
    pub fn is_at_least(&self, other: &CephVersion) -> bool {
        (self.major, self.minor, self.extra, self.build)
            >= (other.major, other.minor, other.extra, other.build)
    }
}

impl fmt::Display for CephVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{} {}",
            self.major,
            self.minor,
            self.extra,
            self.build,
            self.release_name()
        )
    }
}

fn parse_number(part: Option<&str>, input: &str) -> Result<u32> {
    part.and_then(|p| p.parse().ok())
        .ok_or_else(|| RookError::InvalidVersion(input.to_string()))
}

/// Accepts `ceph version 15.2.4-1 (<sha>) octopus (stable)` or a bare `15.2.4`.
impl FromStr for CephVersion {
    type Err = RookError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let rest = trimmed.strip_prefix("ceph version ").unwrap_or(trimmed);
        let mut tokens = rest.split_whitespace();

        let version = tokens
            .next()
            .ok_or_else(|| RookError::InvalidVersion(s.to_string()))?;
        let (numbers, build) = match version.split_once('-') {
            Some((numbers, suffix)) => (numbers, suffix.split('-').next()),
            None => (version, None),
        };

        let mut parts = numbers.split('.');
        let major = parse_number(parts.next(), s)?;
        let minor = parse_number(parts.next(), s)?;
        let extra = parse_number(parts.next(), s)?;
        if parts.next().is_some() {
            return Err(RookError::InvalidVersion(s.to_string()));
        }
        let build = build.and_then(|b| b.parse().ok()).unwrap_or(0);

        let commit_id = tokens
            .next()
            .and_then(|t| t.strip_prefix('(')?.strip_suffix(')'))
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            major,
            minor,
            extra,
            build,
            commit_id,
        })
    }
}
