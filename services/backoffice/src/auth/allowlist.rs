//! Email allow-list gating access to the service

/// Immutable set of permitted emails, injected at startup.
///
/// Absence of a match is a hard authorization failure, not a soft default.
#[derive(Debug, Clone)]
pub struct AllowList {
    emails: Vec<String>,
}

impl AllowList {
    /// Build an allow-list; entries are normalized to lowercase once here so
    /// lookups stay case-insensitive
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|email| email.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive membership check
    pub fn contains(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.emails.iter().any(|allowed| *allowed == email)
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_case() {
        let list = AllowList::new(["Owner@Example.com"]);
        assert!(list.contains("owner@example.com"));
        assert!(list.contains("OWNER@EXAMPLE.COM"));
    }

    #[test]
    fn rejects_unknown_email() {
        let list = AllowList::new(["owner@example.com"]);
        assert!(!list.contains("intruder@example.com"));
    }

    #[test]
    fn empty_list_rejects_everyone() {
        let list = AllowList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(!list.contains("anyone@example.com"));
    }
}
