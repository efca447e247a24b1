//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain records before returning.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::UserLookupError;
use crate::domain::{AuthProviders, UserId, UserRecord};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub active: bool,
    pub email: String,
    pub emails: Vec<String>,
    pub handle: String,
    pub profile_url: Option<String>,
    pub avatar_url: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub timezone: Option<String>,
    pub roles: Vec<String>,
    pub invite_code: Option<String>,
    pub auth_providers: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = UserLookupError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let auth_providers = serde_json::from_value::<AuthProviders>(row.auth_providers)
            .map_err(|error| {
                warn!(user_id = %row.id, %error, "unreadable auth_providers value");
                UserLookupError::query("unreadable user row")
            })?;

        Ok(Self {
            id: UserId::from_uuid(row.id),
            active: row.active,
            email: row.email,
            emails: row.emails,
            handle: row.handle,
            profile_url: row.profile_url,
            avatar_url: row.avatar_url,
            name: row.name,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            timezone: row.timezone,
            roles: row.roles,
            invite_code: row.invite_code,
            auth_providers,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            active: true,
            email: "ada@example.com".to_owned(),
            emails: vec!["ada@work.example".to_owned()],
            handle: "  Ada ".to_owned(),
            profile_url: None,
            avatar_url: None,
            name: "Ada Lovelace".to_owned(),
            phone: Some("+44 20 7946 0000".to_owned()),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10),
            timezone: Some("Europe/London".to_owned()),
            roles: vec!["admin".to_owned()],
            invite_code: Some("FOUNDERS".to_owned()),
            auth_providers: json!({
                "github": { "subject": "1815", "email": "ada@example.com" }
            }),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn rows_convert_without_touching_the_handle(row: UserRow) {
        let id = row.id;
        let record = UserRecord::try_from(row).expect("row converts");

        assert_eq!(record.id.as_uuid(), &id);
        assert_eq!(record.handle, "  Ada ");
        assert_eq!(record.canonical_handle().as_str(), "ada");
        assert!(record.has_role("admin"));
        assert_eq!(
            record
                .auth_providers
                .link("github")
                .map(|link| link.subject.as_str()),
            Some("1815")
        );
    }

    #[rstest]
    #[case(json!(["not", "a", "map"]))]
    #[case(json!({ "github": "1815" }))]
    #[case(json!(null))]
    fn malformed_provider_json_fails_the_row(
        mut row: UserRow,
        #[case] providers: serde_json::Value,
    ) {
        row.auth_providers = providers;

        let error = UserRecord::try_from(row).expect_err("corrupt providers");

        assert_eq!(error, UserLookupError::query("unreadable user row"));
    }

    #[rstest]
    fn empty_provider_map_converts(mut row: UserRow) {
        row.auth_providers = json!({});
        let record = UserRecord::try_from(row).expect("row converts");
        assert!(record.auth_providers.is_empty());
    }
}
