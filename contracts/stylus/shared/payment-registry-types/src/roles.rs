//! Role-based write access.
//!
//! Each registry owns one admin and one membership set (executors or committers). The lookup is
//! abstracted so the same check runs against contract storage and against off-chain mirrors.

use alloc::collections::BTreeSet;

use alloy_primitives::Address;

use crate::errors::RegistryError;

/// Capability required by a registry operation. Discriminants are emitted in `Unauthorized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Role {
    Admin = 0,
    Executor = 1,
    Committer = 2,
}

/// Role membership source, implemented differently on-chain vs off-chain.
pub trait RoleLookup {
    fn admin(&self) -> Address;

    /// Membership in a non-admin role. Registries answer `false` for roles they do not own.
    fn is_member(&self, role: Role, who: Address) -> bool;
}

/// Require `caller` to hold `role`.
///
/// The admin role is not implied by membership, and membership is not implied by being admin.
pub fn authorize<R: RoleLookup + ?Sized>(
    roles: &R,
    caller: Address,
    role: Role,
) -> Result<(), RegistryError> {
    let allowed = match role {
        Role::Admin => caller != Address::ZERO && roles.admin() == caller,
        Role::Executor | Role::Committer => roles.is_member(role, caller),
    };
    if allowed {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized { caller, role })
    }
}

/// In-memory role sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRoles {
    pub admin: Address,
    pub executors: BTreeSet<Address>,
    pub committers: BTreeSet<Address>,
}

impl MemoryRoles {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            ..Self::default()
        }
    }

    /// Grant or revoke a membership role. Granting twice is a no-op.
    pub fn set(&mut self, role: Role, who: Address, authorized: bool) {
        let set = match role {
            Role::Executor => &mut self.executors,
            Role::Committer => &mut self.committers,
            Role::Admin => return,
        };
        if authorized {
            set.insert(who);
        } else {
            set.remove(&who);
        }
    }
}

impl RoleLookup for MemoryRoles {
    fn admin(&self) -> Address {
        self.admin
    }

    fn is_member(&self, role: Role, who: Address) -> bool {
        match role {
            Role::Executor => self.executors.contains(&who),
            Role::Committer => self.committers.contains(&who),
            Role::Admin => false,
        }
    }
}
