// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for packed trees.

use thiserror::Error;

/// Errors reported by packed tree construction and mutation.
///
/// Not-found outcomes (removing an absent item, searching an empty tree) are
/// not errors; those return `false` or `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Items can only be inserted while the tree is still staging.
    #[error("cannot insert items into a packed tree after it has been built")]
    AlreadyBuilt,

    /// A node must be able to hold at least two children.
    #[error("node capacity must be at least 2, got {0}")]
    InvalidNodeCapacity(usize),
}
