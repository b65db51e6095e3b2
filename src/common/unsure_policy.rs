/// How ground-truth boxes carrying the "unsure" annotation tag are scored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnsurePolicy {
    /// Unsure boxes are ordinary ground truth.
    #[default] Include,
    /// Unsure boxes are dropped before matching. Predictions on them become false positives.
    Exclude,
    /// Unsure boxes never count as misses, and a prediction that only overlaps an unsure box
    /// is neither a true nor a false positive.
    Ignore,
}

// Hardcoded policy names. Storing the "proper" spelling and the lowercase version.
const INCLUDE: [&str; 2] = ["Include", "include"];
const EXCLUDE: [&str; 2] = ["Exclude", "exclude"];
const IGNORE: [&str; 2] = ["Ignore", "ignore"];

impl UnsurePolicy {
    pub fn from_str(policy: &str) -> Option<Self> {
        match policy.trim().to_lowercase().as_str() {
            "include" => Some(UnsurePolicy::Include),
            "exclude" => Some(UnsurePolicy::Exclude),
            "ignore" => Some(UnsurePolicy::Ignore),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            UnsurePolicy::Include => INCLUDE[0],
            UnsurePolicy::Exclude => EXCLUDE[0],
            UnsurePolicy::Ignore => IGNORE[0],
        }
    }

    pub fn str_lowercase(&self) -> &'static str {
        match self {
            UnsurePolicy::Include => INCLUDE[1],
            UnsurePolicy::Exclude => EXCLUDE[1],
            UnsurePolicy::Ignore => IGNORE[1],
        }
    }

    pub fn all_unsure_policies() -> Vec<String> {
        vec![
            UnsurePolicy::Include.str_lowercase().to_string(),
            UnsurePolicy::Exclude.str_lowercase().to_string(),
            UnsurePolicy::Ignore.str_lowercase().to_string(),
        ]
    }

    pub fn is_valid_unsure_policy(policy: &str) -> bool {
        UnsurePolicy::from_str(policy).is_some()
    }
}

impl std::fmt::Display for UnsurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.str())
    }
}
