//! Tests for the placeholder engine
//!
//! Organized into focused submodules by concern.

use super::*;

// Test helper functions
mod helpers;
