// ABOUTME: Shared benchmark utilities
// ABOUTME: Re-exports the deterministic recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

pub mod fixtures;
