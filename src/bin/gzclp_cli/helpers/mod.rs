// ABOUTME: Helper modules for gzclp-cli
// ABOUTME: Output formatting and argument parsing shared by commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod args;
pub mod display;
