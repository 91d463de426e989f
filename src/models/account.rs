use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decode::{Fields, FromJson};
use crate::error::DecodeResult;

/// Профиль пользователя.
///
/// Необязательные поля зависят от того, кто смотрит профиль, и от настроек
/// приватности; сервер присылает их не всегда.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub background_color: String,
    pub foreground_color: String,
    pub follower_count: i64,
    pub following_count: i64,
    pub loop_count: i64,
    pub loops_consumed_count: i64,
    pub registration_date: i64,
    pub is_channel: bool,
    #[serde(rename = "avatarURL", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deactivated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_followed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_suspended: Option<bool>,
}

impl Account {
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.registration_date)
    }

    /// Имя для показа: `displayName`, если есть, иначе `username`
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl FromJson for Account {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Account {
            id: fields.required("id")?,
            username: fields.required("username")?,
            background_color: fields.required("backgroundColor")?,
            foreground_color: fields.required("foregroundColor")?,
            follower_count: fields.required("followerCount")?,
            following_count: fields.required("followingCount")?,
            loop_count: fields.required("loopCount")?,
            loops_consumed_count: fields.required("loopsConsumedCount")?,
            registration_date: fields.required("registrationDate")?,
            is_channel: fields.required("isChannel")?,
            avatar_url: fields.optional("avatarURL")?,
            display_name: fields.optional("displayName")?,
            bio: fields.optional("bio")?,
            is_deactivated: fields.optional("isDeactivated")?,
            is_registered: fields.optional("isRegistered")?,
            is_blocked: fields.optional("isBlocked")?,
            is_following: fields.optional("isFollowing")?,
            is_followed: fields.optional("isFollowed")?,
            is_suspended: fields.optional("isSuspended")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use serde_json::{json, Value};

    const REQUIRED: [&str; 10] = [
        "backgroundColor",
        "followerCount",
        "followingCount",
        "foregroundColor",
        "id",
        "isChannel",
        "loopCount",
        "loopsConsumedCount",
        "registrationDate",
        "username",
    ];

    fn minimal() -> Value {
        json!({
            "backgroundColor": "#000000",
            "followerCount": 0,
            "followingCount": 0,
            "foregroundColor": "#CCD6E9",
            "id": "test_id",
            "isChannel": false,
            "loopCount": 0,
            "loopsConsumedCount": 0,
            "registrationDate": 1580228662,
            "username": "bixnel"
        })
    }

    #[test]
    fn full_account() {
        let mut data = minimal();
        let extra = json!({
            "avatarURL": "avatar/url",
            "isDeactivated": false,
            "isRegistered": true,
            "isBlocked": false,
            "bio": "test bio",
            "isFollowing": false,
            "isFollowed": false,
            "isSuspended": false,
            "displayName": "byte-api"
        });
        for (key, value) in extra.as_object().unwrap() {
            data[key] = value.clone();
        }

        let account = Account::from_json(&data).unwrap();
        assert_eq!(account.background_color, "#000000");
        assert_eq!(account.foreground_color, "#CCD6E9");
        assert_eq!(account.registration_date, 1580228662);
        assert_eq!(account.avatar_url.as_deref(), Some("avatar/url"));
        assert_eq!(account.is_registered, Some(true));
        assert_eq!(account.is_deactivated, Some(false));
        assert_eq!(account.bio.as_deref(), Some("test bio"));
        assert_eq!(account.name(), "byte-api");

        assert_eq!(serde_json::to_value(&account).unwrap(), data);
    }

    #[test]
    fn only_required_fields() {
        let account = Account::from_json(&minimal()).unwrap();
        assert_eq!(account.username, "bixnel");
        assert!(!account.is_channel);
        assert_eq!(account.avatar_url, None);
        assert_eq!(account.display_name, None);
        assert_eq!(account.bio, None);
        assert_eq!(account.is_deactivated, None);
        assert_eq!(account.is_registered, None);
        assert_eq!(account.is_blocked, None);
        assert_eq!(account.is_following, None);
        assert_eq!(account.is_followed, None);
        assert_eq!(account.is_suspended, None);
        assert_eq!(account.name(), "bixnel");
        assert_eq!(
            account.registered_at().map(|at| at.timestamp()),
            Some(1580228662)
        );

        // отсутствующие поля не появляются при обратной сериализации
        assert_eq!(serde_json::to_value(&account).unwrap(), minimal());
    }

    #[test]
    fn each_missing_required_field_is_named() {
        for key in REQUIRED {
            let mut data = minimal();
            data.as_object_mut().unwrap().remove(key);
            assert_eq!(
                Account::from_json(&data),
                Err(DecodeError::MissingField(key)),
                "removing {key}"
            );
        }
    }

    #[test]
    fn present_but_falsy_optional_is_kept() {
        let mut data = minimal();
        data["bio"] = json!("");
        data["isBlocked"] = json!(false);
        let account = Account::from_json(&data).unwrap();
        assert_eq!(account.bio, Some(String::new()));
        assert_eq!(account.is_blocked, Some(false));
    }

    #[test]
    fn mistyped_optional_is_an_error() {
        let mut data = minimal();
        data["isFollowing"] = json!("yes");
        assert_eq!(
            Account::from_json(&data),
            Err(DecodeError::TypeMismatch {
                key: "isFollowing".to_string(),
                expected: "boolean",
                actual: "string",
            })
        );
    }

    #[test]
    fn decoding_twice_gives_equal_values() {
        let data = minimal();
        let first = Account::from_json(&data).unwrap();
        let mut second = Account::from_json(&data).unwrap();
        assert_eq!(first, second);

        second.username.push('!');
        assert_eq!(first.username, "bixnel");
    }
}
