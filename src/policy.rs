//! Mutation policy for the role-gated resource API.
//!
//! Authorization decisions live here rather than inline in handlers so the
//! rules stay testable independent of HTTP.

use entity::user::UserRole;

/// Resource kinds managed through `/api/protected/*`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    Building,
    Apartment,
    Expense,
}

/// Whether `role` may create, update, or delete the given resource kind.
///
/// List and read operations are open to any authenticated user and are not
/// routed through this check.
pub fn can_mutate(role: &UserRole, resource: Resource) -> bool {
    match resource {
        Resource::Building | Resource::Apartment | Resource::Expense => {
            matches!(role, UserRole::Manager)
        }
    }
}

#[cfg(test)]
mod tests {
    use entity::user::UserRole;

    use super::{can_mutate, Resource};

    static RESOURCES: [Resource; 3] = [Resource::Building, Resource::Apartment, Resource::Expense];

    #[test]
    fn manager_may_mutate_every_resource() {
        for resource in RESOURCES {
            assert!(can_mutate(&UserRole::Manager, resource));
        }
    }

    #[test]
    fn residents_may_not_mutate() {
        for role in [UserRole::Owner, UserRole::Tenant] {
            for resource in RESOURCES {
                assert!(!can_mutate(&role, resource));
            }
        }
    }

    /// Super-admins act through their own console, never the resident realm.
    #[test]
    fn super_admin_may_not_mutate_resident_resources() {
        for resource in RESOURCES {
            assert!(!can_mutate(&UserRole::SuperAdmin, resource));
        }
    }
}
