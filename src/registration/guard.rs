use crate::types::{Caller, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decide whether `caller` may mutate registrations of the student owning
/// `target_student_email`. Admins may act for anyone, students only for themselves.
pub fn authorize(caller: &Caller, target_student_email: &str) -> Decision {
    match caller.role {
        Role::Admin => Decision::Allow,
        Role::Student if caller.email == target_student_email => Decision::Allow,
        Role::Student => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_allowed_for_any_student() {
        let caller = Caller::admin("admin@x.com");
        assert_eq!(authorize(&caller, "b@x.com"), Decision::Allow);
    }

    #[test]
    fn student_is_allowed_for_self() {
        let caller = Caller::student("a@x.com");
        assert_eq!(authorize(&caller, "a@x.com"), Decision::Allow);
    }

    #[test]
    fn student_is_denied_for_someone_else() {
        let caller = Caller::student("a@x.com");
        assert_eq!(authorize(&caller, "b@x.com"), Decision::Deny);
        assert!(!authorize(&caller, "").is_allowed());
    }

    #[test]
    fn email_match_is_exact() {
        let caller = Caller::student("A@x.com");
        assert_eq!(authorize(&caller, "a@x.com"), Decision::Deny);
    }
}
