// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request authentication context.
//!
//! An [`AuthContext`] lives in the request extensions for the duration of a
//! single request. It is written at most once, by the gateway, and read by
//! handlers through the [`Auth`](super::Auth) extractor. Nothing is shared
//! between requests.

use std::sync::{Arc, OnceLock};

use super::claims::Principal;

/// Returned when a principal is already installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("authentication context already populated")]
pub struct AlreadyInstalled;

/// Write-once slot holding the request's principal.
///
/// Clones share the same slot, so the copy kept by the gateway and the copy
/// stored in the request extensions always agree. Installation is a single
/// atomic set: the slot is either empty or fully populated.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    slot: Arc<OnceLock<Principal>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the principal; fails if one is already present.
    pub fn install(&self, principal: Principal) -> Result<(), AlreadyInstalled> {
        self.slot.set(principal).map_err(|_| AlreadyInstalled)
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.slot.get()
    }

    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }
}
