// ABOUTME: Keyword classifier deciding which workout steps receive a heart rate zone target
// ABOUTME: Pure function over step type, description and existing target with no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Classifier
//!
//! Decides whether an executable step is an easy-effort segment that should
//! get an HR zone target. Rules are applied in order and the first match wins:
//!
//! 1. a step that already has a target is left alone
//! 2. rest steps and repeat markers are skipped
//! 3. a hard keyword in the description skips the step, whatever its type
//! 4. warmup, cooldown and recovery steps are easy by default
//! 5. any other step needs an easy keyword in its description

use std::fmt;

use zone_sync_core::constants::keywords;
use zone_sync_core::models::{ExecutableStep, StepKind};

/// Outcome of classifying a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Step already carries a target
    HasTarget,
    /// Rest steps never get a target
    Rest,
    /// Repeat marker step; targets belong on the steps it repeats
    RepeatGroup,
    /// Description contains a hard-effort keyword
    HardKeyword(&'static str),
    /// Warmup, cooldown or recovery step
    EasyStepType(StepKind),
    /// Description contains an easy-effort keyword
    EasyKeyword(&'static str),
    /// Nothing marks the step as easy
    NoEasyIndicator,
}

impl Decision {
    /// Whether the step should receive a zone target
    #[must_use]
    pub const fn should_add(self) -> bool {
        matches!(self, Self::EasyStepType(_) | Self::EasyKeyword(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasTarget => write!(f, "already targeted"),
            Self::Rest => write!(f, "rest step"),
            Self::RepeatGroup => write!(f, "repeat group"),
            Self::HardKeyword(keyword) => write!(f, "hard effort ('{keyword}')"),
            Self::EasyStepType(kind) => write!(f, "{} step", kind.label()),
            Self::EasyKeyword(keyword) => write!(f, "easy effort ('{keyword}')"),
            Self::NoEasyIndicator => write!(f, "no easy indicator"),
        }
    }
}

/// Classify an executable step
#[must_use]
pub fn classify(step: &ExecutableStep) -> Decision {
    classify_parts(step.kind(), step.description(), step.has_target())
}

/// Classify from the individual step attributes
#[must_use]
pub fn classify_parts(kind: StepKind, description: Option<&str>, has_target: bool) -> Decision {
    if has_target {
        return Decision::HasTarget;
    }
    match kind {
        StepKind::Rest => return Decision::Rest,
        StepKind::Repeat => return Decision::RepeatGroup,
        _ => {}
    }

    let description = description.unwrap_or_default().to_lowercase();

    if let Some(keyword) = find_keyword(&description, keywords::HARD) {
        return Decision::HardKeyword(keyword);
    }

    if matches!(
        kind,
        StepKind::Warmup | StepKind::Cooldown | StepKind::Recovery
    ) {
        return Decision::EasyStepType(kind);
    }

    find_keyword(&description, keywords::EASY)
        .map_or(Decision::NoEasyIndicator, Decision::EasyKeyword)
}

/// First keyword of `set` contained in the already-lowercased `text`
fn find_keyword(text: &str, set: &[&'static str]) -> Option<&'static str> {
    set.iter().copied().find(|keyword| text.contains(keyword))
}
