//! List search: case-insensitive substring match on name, ZIP code, or timezone.

use crate::api::User;

/// Users matching `query`. A blank query matches everyone.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return users.iter().collect();
    }
    users.iter().filter(|user| matches(user, &query)).collect()
}

fn matches(user: &User, query: &str) -> bool {
    [&user.name, &user.zip_code, &user.timezone]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}
