//! Owner identities

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Authenticated user marker.
#[derive(Debug)]
pub struct User;

/// Authenticated user UUID, supplied by the external auth collaborator.
pub type UserUuid = TypedUuid<User>;

/// Anonymous session token owning a guest cart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for GuestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for GuestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The identities presented by a caller. Either, both or neither may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartIdentity {
    pub user: Option<UserUuid>,
    pub guest: Option<GuestId>,
}

impl CartIdentity {
    #[must_use]
    pub fn user(user: UserUuid) -> Self {
        Self {
            user: Some(user),
            guest: None,
        }
    }

    #[must_use]
    pub fn guest(guest: GuestId) -> Self {
        Self {
            user: None,
            guest: Some(guest),
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.user.is_none() && self.guest.is_none()
    }
}

/// Source of fresh guest ids for callers that present no identity at all.
pub trait GuestIdGenerator: Send + Sync {
    fn generate(&self) -> GuestId;
}

/// Generates `guest_<uuid v7>` tokens: time-ordered and globally unique.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedGuestIds;

impl GuestIdGenerator for TimeOrderedGuestIds {
    fn generate(&self) -> GuestId {
        GuestId(format!("guest_{}", Uuid::now_v7().simple()))
    }
}
