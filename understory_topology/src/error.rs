// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for topology checks.

use thiserror::Error;
use understory_strtree::TreeError;

/// Errors reported by topology checks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// Every vertex of the ring at `ring_index` is a node of the ring it is tested
    /// against, so no vertex can be classified unambiguously.
    #[error("ring {ring_index} has no vertex that is not a node of ring {other_index}")]
    NoNonNodePoint {
        /// Ring being tested.
        ring_index: usize,
        /// Ring it was tested against.
        other_index: usize,
    },

    /// The spatial index over ring envelopes rejected an operation.
    #[error("ring index: {0}")]
    Index(#[from] TreeError),
}
