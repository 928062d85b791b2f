/// Domain representation of a user profile and its budget ledger.
///
/// The running totals are denormalized: they are updated in step with
/// transaction creation and deletion rather than recomputed from the
/// transaction history on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub job: String,
    pub address: String,
    pub photo_url: Option<String>,
    pub budget_total: f64,
    pub budget_left: f64,
    pub income_total: f64,
    pub expense_total: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// A blank profile with a zeroed budget ledger, used when a user is seen
    /// for the first time.
    pub fn empty(user_id: &str, now_rfc3339: &str) -> Self {
        Self {
            id: user_id.to_string(),
            name: String::new(),
            email: String::new(),
            age: None,
            job: String::new(),
            address: String::new(),
            photo_url: None,
            budget_total: 0.0,
            budget_left: 0.0,
            income_total: 0.0,
            expense_total: 0.0,
            created_at: now_rfc3339.to_string(),
            updated_at: now_rfc3339.to_string(),
        }
    }
}
