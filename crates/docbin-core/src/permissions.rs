//! Capability-based permission model for share tokens.
//!
//! A share token carries a [`Permission`] set in its claims. Each flag gates
//! a group of mutating operations on the document the token was issued for;
//! reading is implicit and needs no flag.
//!
//! # Example
//!
//! ```
//! use docbin_core::Permission;
//!
//! let perms = Permission::WRITE | Permission::WEBHOOK;
//! assert!(perms.has(Permission::WRITE));
//! assert!(perms.misses(Permission::DELETE));
//!
//! // Combination is the union of the operands
//! let combined = perms | Permission::SHARE;
//! assert!(combined.has(Permission::SHARE));
//! assert!(combined.has(Permission::WRITE));
//! ```

use bitflags::bitflags;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability grants attached to a share token's claims.
    ///
    /// Immutable once issued. Only the document owner may mint a set
    /// containing [`SHARE`](Self::SHARE) or [`WEBHOOK`](Self::WEBHOOK);
    /// that invariant is enforced at token-mint time, outside this crate.
    ///
    /// | Flag | Grants |
    /// |------|--------|
    /// | [`WRITE`](Self::WRITE) | update document content |
    /// | [`DELETE`](Self::DELETE) | delete the document |
    /// | [`SHARE`](Self::SHARE) | mint further share tokens |
    /// | [`WEBHOOK`](Self::WEBHOOK) | manage webhook subscriptions |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permission: u8 {
        /// Update document content.
        const WRITE   = 0b0001;
        /// Delete the document.
        const DELETE  = 0b0010;
        /// Mint further share tokens.
        const SHARE   = 0b0100;
        /// Manage webhook subscriptions.
        const WEBHOOK = 0b1000;
    }
}

impl Permission {
    /// All permissions an owner token carries.
    pub const ALL: Self = Self::WRITE
        .union(Self::DELETE)
        .union(Self::SHARE)
        .union(Self::WEBHOOK);

    /// Whether the set contains `perm`.
    #[must_use]
    pub fn has(self, perm: Self) -> bool {
        self.contains(perm)
    }

    /// Whether the set lacks `perm`. Exact negation of [`has`](Self::has),
    /// used as a guard clause before mutating operations.
    #[must_use]
    pub fn misses(self, perm: Self) -> bool {
        !self.contains(perm)
    }

    /// The lowercase wire name of a single flag, or `None` for compound sets.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        if self == Self::WRITE {
            Some("write")
        } else if self == Self::DELETE {
            Some("delete")
        } else if self == Self::SHARE {
            Some("share")
        } else if self == Self::WEBHOOK {
            Some("webhook")
        } else {
            None
        }
    }

    /// Parse a single lowercase wire name.
    ///
    /// Named `parse` rather than `from_name` because `bitflags` 2.x
    /// generates an inherent `from_name` (matching the uppercase flag
    /// identifiers) that would collide.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "write" => Some(Self::WRITE),
            "delete" => Some(Self::DELETE),
            "share" => Some(Self::SHARE),
            "webhook" => Some(Self::WEBHOOK),
            _ => None,
        }
    }
}

// Serialized as a list of lowercase names (`["write","webhook"]`) so the
// set rides inside token claims unchanged across implementations.
impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<&str> = self.iter().filter_map(Permission::name).collect();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PermissionVisitor;

        impl<'de> Visitor<'de> for PermissionVisitor {
            type Value = Permission;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a list of permission names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Permission, A::Error> {
                let mut set = Permission::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    let perm = Permission::parse(&name)
                        .ok_or_else(|| de::Error::custom(format!("unknown permission: {name}")))?;
                    set |= perm;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(PermissionVisitor)
    }
}
