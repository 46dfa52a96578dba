// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Option groups selectable from the command line
//!
//! Each group is a closed set of variants with an explicit, case-insensitive
//! name mapping. Unknown names are rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::proto;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {group} '{name}' (expected one of: {choices})")]
pub struct UnknownOption {
    pub group: &'static str,
    pub name: String,
    pub choices: String,
}

impl UnknownOption {
    fn new<T: fmt::Display>(group: &'static str, name: &str, variants: &[T]) -> Self {
        Self {
            group,
            name: name.to_string(),
            choices: variants
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// UI backend used to render the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiKind {
    Interactive,
    #[default]
    Plain,
    Silent,
}

impl UiKind {
    pub fn all_variants() -> &'static [UiKind] {
        &[UiKind::Interactive, UiKind::Plain, UiKind::Silent]
    }

    pub fn name(self) -> &'static str {
        match self {
            UiKind::Interactive => "interactive",
            UiKind::Plain => "plain",
            UiKind::Silent => "silent",
        }
    }
}

impl FromStr for UiKind {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiKind::all_variants()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOption::new("ui", s, UiKind::all_variants()))
    }
}

impl fmt::Display for UiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache policy requested from the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    All,
    Reevaluate,
    Nothing,
}

impl CacheMode {
    pub fn all_variants() -> &'static [CacheMode] {
        &[CacheMode::All, CacheMode::Reevaluate, CacheMode::Nothing]
    }

    pub fn name(self) -> &'static str {
        match self {
            CacheMode::All => "all",
            CacheMode::Reevaluate => "reevaluate",
            CacheMode::Nothing => "nothing",
        }
    }
}

impl FromStr for CacheMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheMode::all_variants()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOption::new("cache mode", s, CacheMode::all_variants()))
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CacheMode> for proto::CacheMode {
    fn from(mode: CacheMode) -> Self {
        match mode {
            CacheMode::All => proto::CacheMode::All,
            CacheMode::Reevaluate => proto::CacheMode::Reevaluate,
            CacheMode::Nothing => proto::CacheMode::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_kind_case_insensitive() {
        assert_eq!("plain".parse::<UiKind>(), Ok(UiKind::Plain));
        assert_eq!("PLAIN".parse::<UiKind>(), Ok(UiKind::Plain));
        assert_eq!("Interactive".parse::<UiKind>(), Ok(UiKind::Interactive));
        assert_eq!("sIlEnT".parse::<UiKind>(), Ok(UiKind::Silent));
    }

    #[test]
    fn test_ui_kind_rejects_unknown() {
        let err = "curses".parse::<UiKind>().unwrap_err();
        assert_eq!(err.name, "curses");
        assert_eq!(
            err.to_string(),
            "unknown ui 'curses' (expected one of: interactive, plain, silent)"
        );
        assert!("".parse::<UiKind>().is_err());
        assert!("plain ".parse::<UiKind>().is_err());
    }

    #[test]
    fn test_cache_mode_parse() {
        assert_eq!("ALL".parse::<CacheMode>(), Ok(CacheMode::All));
        assert_eq!("ReEvaluate".parse::<CacheMode>(), Ok(CacheMode::Reevaluate));
        assert_eq!("nothing".parse::<CacheMode>(), Ok(CacheMode::Nothing));
        let err = "none".parse::<CacheMode>().unwrap_err();
        assert_eq!(err.choices, "all, reevaluate, nothing");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in UiKind::all_variants() {
            assert_eq!(kind.to_string().parse::<UiKind>(), Ok(*kind));
        }
        for mode in CacheMode::all_variants() {
            assert_eq!(mode.to_string().parse::<CacheMode>(), Ok(*mode));
        }
    }

    #[test]
    fn test_cache_mode_to_wire() {
        assert_eq!(proto::CacheMode::from(CacheMode::Reevaluate), proto::CacheMode::Reevaluate);
        assert_eq!(proto::CacheMode::from(CacheMode::Nothing) as i32, 2);
    }
}
