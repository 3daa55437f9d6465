use stockroom_auth::Role;

/// Authenticated identity for a request (subject email + role claim).
///
/// This is immutable and present for all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: String,
    role_claim: String,
}

impl PrincipalContext {
    pub fn new(subject: impl Into<String>, role_claim: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role_claim: role_claim.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role_claim(&self) -> &str {
        &self.role_claim
    }

    pub fn is_admin(&self) -> bool {
        self.role_claim == Role::Admin.as_str()
    }
}
