// ABOUTME: Keyword sets matched against workout step descriptions
// ABOUTME: Easy keywords opt a step in, hard keywords always opt it out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Description fragments that mark conversational effort (lowercase)
pub const EASY: &[&str] = &["conversational", "easy", "slow"];

/// Description fragments that mark hard effort (lowercase); these win over [`EASY`]
pub const HARD: &[&str] = &[
    "pushing",
    "fast",
    "hard",
    "tempo",
    "threshold",
    "race",
    "sprint",
];
