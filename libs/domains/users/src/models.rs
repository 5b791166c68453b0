use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// User gender
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// User entity as held by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned by the server on insert
    pub user_uid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i32,
    pub email: String,
}

impl User {
    pub fn new(
        user_uid: Uuid,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        age: i32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_uid,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            age,
            email: email.into(),
        }
    }
}

/// Request body for inserting or updating a user.
///
/// `userUid` is ignored on insert and required on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub user_uid: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i32,
    pub email: String,
}

impl UserPayload {
    /// Build the stored entity under `user_uid`, discarding any identifier the payload carried.
    pub fn into_user(self, user_uid: Uuid) -> User {
        User {
            user_uid,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            age: self.age,
            email: self.email,
        }
    }
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            user_uid: Some(user.user_uid),
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            age: user.age,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_with_camel_case_keys() {
        let uid = Uuid::new_v4();
        let user = User::new(uid, "Anna", "Aser", Gender::Female, 20, "asdfgh@gmail.com");

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "userUid": uid,
                "firstName": "Anna",
                "lastName": "Aser",
                "gender": "FEMALE",
                "age": 20,
                "email": "asdfgh@gmail.com"
            })
        );
    }

    #[test]
    fn test_payload_without_uid_deserializes() {
        let payload: UserPayload = serde_json::from_value(json!({
            "firstName": "Anna",
            "lastName": "Aser",
            "gender": "FEMALE",
            "age": 20,
            "email": "asdfgh@gmail.com"
        }))
        .unwrap();

        assert_eq!(payload.user_uid, None);
        assert_eq!(payload.gender, Gender::Female);
    }

    #[test]
    fn test_payload_rejects_unknown_gender() {
        let result = serde_json::from_value::<UserPayload>(json!({
            "firstName": "Anna",
            "lastName": "Aser",
            "gender": "OTHER",
            "age": 20,
            "email": "asdfgh@gmail.com"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_into_user_overrides_payload_uid() {
        let client_uid = Uuid::new_v4();
        let server_uid = Uuid::new_v4();
        let payload = UserPayload {
            user_uid: Some(client_uid),
            first_name: "Anna".to_string(),
            last_name: "Aser".to_string(),
            gender: Gender::Female,
            age: 20,
            email: "asdfgh@gmail.com".to_string(),
        };

        let user = payload.into_user(server_uid);
        assert_eq!(user.user_uid, server_uid);
        assert_eq!(user.first_name, "Anna");
    }

    #[test]
    fn test_gender_display_and_parse() {
        assert_eq!(Gender::Male.to_string(), "MALE");
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
    }
}
