use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 單一欄位的驗證規則：名稱 + 整串比對的正規表達式
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub pattern: Regex,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// 缺少文字 (None) 一律視為無效
    pub fn matches(&self, text: Option<&str>) -> bool {
        match text {
            Some(text) => self.pattern.is_match(text),
            None => false,
        }
    }
}

/// 欄位在畫面上的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Empty,
    Invalid,
    Valid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub text: Option<String>,
    pub is_valid: bool,
}

impl FieldState {
    pub fn status(&self) -> FieldStatus {
        match self.text.as_deref() {
            None | Some("") => FieldStatus::Empty,
            Some(_) if self.is_valid => FieldStatus::Valid,
            Some(_) => FieldStatus::Invalid,
        }
    }
}

/// 一次去抖動後的欄位輸出：有效性 + 內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub name: String,
    pub status: FieldStatus,
    pub is_valid: bool,
    pub text: Option<String>,
}

impl FieldSnapshot {
    /// 空字串不產生內容，否則為單一鍵值 {name: text}
    pub fn content(&self) -> Option<(String, String)> {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => Some((self.name.clone(), text.to_string())),
            _ => None,
        }
    }
}

/// 整張表單的彙總狀態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub is_valid: bool,
    pub fields: HashMap<String, String>,
}

/// 註冊表單驗證通過後的資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl Registration {
    pub const EMAIL: &'static str = "Email";
    pub const PHONE: &'static str = "Phone";
    pub const PASSWORD: &'static str = "Password";

    /// 只有在表單有效且三個欄位都有值時才回傳
    pub fn from_state(state: &FormState) -> Option<Self> {
        if !state.is_valid {
            return None;
        }

        Some(Self {
            email: state.fields.get(Self::EMAIL)?.clone(),
            phone: state.fields.get(Self::PHONE)?.clone(),
            password: state.fields.get(Self::PASSWORD)?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: Option<&str>, is_valid: bool) -> FieldSnapshot {
        let state = FieldState {
            text: text.map(str::to_string),
            is_valid,
        };
        FieldSnapshot {
            name: "Email".to_string(),
            status: state.status(),
            is_valid,
            text: state.text,
        }
    }

    #[test]
    fn test_field_rule_missing_text_is_invalid() {
        let rule = FieldRule::new("Any", Regex::new("^.*$").unwrap());
        assert!(rule.matches(Some("")));
        assert!(!rule.matches(None));
    }

    #[test]
    fn test_field_state_status() {
        assert_eq!(FieldState::default().status(), FieldStatus::Empty);
        assert_eq!(snapshot(Some(""), true).status, FieldStatus::Empty);
        assert_eq!(snapshot(Some("a@b"), false).status, FieldStatus::Invalid);
        assert_eq!(snapshot(Some("a@b.co"), true).status, FieldStatus::Valid);
    }

    #[test]
    fn test_snapshot_content_omits_empty_text() {
        assert_eq!(snapshot(None, false).content(), None);
        assert_eq!(snapshot(Some(""), false).content(), None);
        assert_eq!(
            snapshot(Some("a@b"), false).content(),
            Some(("Email".to_string(), "a@b".to_string()))
        );
    }

    #[test]
    fn test_registration_from_state() {
        let mut state = FormState {
            is_valid: true,
            fields: HashMap::from([
                ("Email".to_string(), "x@y.com".to_string()),
                ("Phone".to_string(), "1234567890".to_string()),
                ("Password".to_string(), "pass".to_string()),
            ]),
        };

        let registration = Registration::from_state(&state).unwrap();
        assert_eq!(registration.email, "x@y.com");
        assert_eq!(registration.phone, "1234567890");
        assert_eq!(registration.password, "pass");

        state.is_valid = false;
        assert!(Registration::from_state(&state).is_none());

        state.is_valid = true;
        state.fields.remove("Phone");
        assert!(Registration::from_state(&state).is_none());
    }
}
