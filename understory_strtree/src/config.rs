// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed tree configuration.

use crate::error::TreeError;

/// Default maximum number of children per node.
pub const DEFAULT_NODE_CAPACITY: usize = 10;

/// Configuration for a packed tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Maximum number of children per node. Must be at least 2; 4 or more
    /// keeps trees shallow.
    pub node_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

impl TreeConfig {
    /// Configuration with the given node capacity.
    pub const fn with_node_capacity(node_capacity: usize) -> Self {
        Self { node_capacity }
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidNodeCapacity`] if the node capacity is below 2.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.node_capacity < 2 {
            return Err(TreeError::InvalidNodeCapacity(self.node_capacity));
        }
        Ok(())
    }
}
