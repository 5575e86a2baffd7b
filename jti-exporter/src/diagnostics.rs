// JTI Exporter - Diagnostics bridge
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Routes normalizer diagnostics into `tracing`.

use jti::Diagnostics;

/// [`Diagnostics`] implementation emitting `tracing` events under the `jti` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "jti", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "jti", "{}", message);
    }
}
