// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers that need either `std` or `libm`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_strtree requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

/// Euclidean length of `(dx, dy)`.
#[inline]
pub(crate) fn hypot(dx: f64, dy: f64) -> f64 {
    sqrt(dx * dx + dy * dy)
}

/// Partial order on floats that treats incomparable values as equal.
#[inline]
pub(crate) fn cmp_f64(a: f64, b: f64) -> core::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(core::cmp::Ordering::Equal)
}
