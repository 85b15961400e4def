// ABOUTME: Error module for the GZCLP core crate
// ABOUTME: Re-exports provider error types used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Structured errors raised by the remote routine service client
pub mod provider;

pub use provider::{ProviderError, ProviderResult};
