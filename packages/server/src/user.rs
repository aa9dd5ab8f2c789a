use api::User;

/// Database backed camper row.
#[derive(sqlx::FromRow, Clone, Debug)]
pub struct SqlUser {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
    pub emoji: String,
}

impl SqlUser {
    /// Build the wire user from a sql user
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            username: self.username,
            emoji: self.emoji,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_user() {
        let row = SqlUser {
            id: 4,
            name: "Pterry".to_string(),
            username: Some("sky_high".to_string()),
            emoji: "🦅".to_string(),
        };
        assert_eq!(
            row.into_user(),
            User {
                id: 4,
                name: "Pterry".to_string(),
                username: Some("sky_high".to_string()),
                emoji: "🦅".to_string(),
            }
        );
    }
}
