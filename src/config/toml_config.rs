use crate::core::debounce::DEFAULT_DEBOUNCE;
use crate::domain::model::{FieldRule, Registration};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const EMAIL_PATTERN: &str = r"[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
pub const PHONE_PATTERN: &str = r"^[0-9]+$";
pub const PASSWORD_PATTERN: &str = r"^.{4,8}$";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub form: FormSection,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSection {
    #[serde(default = "default_form_name")]
    pub name: String,
    pub debounce_ms: Option<u64>,
    pub emit_initial: Option<bool>, // 建立時先送出一次空字串
}

impl Default for FormSection {
    fn default() -> Self {
        Self {
            name: default_form_name(),
            debounce_ms: None,
            emit_initial: None,
        }
    }
}

fn default_form_name() -> String {
    "registration".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub pattern: String,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

impl FormConfig {
    /// 內建的註冊表單：Email / Phone / Password
    pub fn registration() -> Self {
        Self {
            form: FormSection::default(),
            fields: vec![
                FieldConfig::new(Registration::EMAIL, EMAIL_PATTERN),
                FieldConfig::new(Registration::PHONE, PHONE_PATTERN),
                FieldConfig::new(Registration::PASSWORD, PASSWORD_PATTERN),
            ],
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FormError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PASSWORD_RULE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            FormError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn debounce_interval(&self) -> Duration {
        self.form
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn emit_initial(&self) -> bool {
        self.form.emit_initial.unwrap_or(false)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// 依宣告順序編譯每個欄位的規則
    pub fn compile_rules(&self) -> Result<Vec<FieldRule>> {
        self.fields
            .iter()
            .map(|field| {
                let pattern = validation::compile_full_match(&field.name, &field.pattern)?;
                Ok(FieldRule::new(field.name.clone(), pattern))
            })
            .collect()
    }
}

impl Validate for FormConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("form.name", &self.form.name)?;

        if let Some(debounce_ms) = self.form.debounce_ms {
            validation::validate_positive_number("form.debounce_ms", debounce_ms, 1)?;
        }

        if self.fields.is_empty() {
            return Err(FormError::EmptyFormError);
        }

        for field in &self.fields {
            validation::validate_field_name("fields.name", &field.name)?;
        }
        validation::validate_unique_names(self.fields.iter().map(|f| f.name.as_str()))?;

        // 規則無法編譯就在建立時失敗
        self.compile_rules()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_preset_is_valid() {
        let config = FormConfig::registration();
        assert!(config.validate().is_ok());
        assert_eq!(config.field_names(), vec!["Email", "Phone", "Password"]);
        assert_eq!(config.debounce_interval(), Duration::from_millis(300));
        assert!(!config.emit_initial());
    }

    #[test]
    fn test_parse_toml() {
        let config = FormConfig::from_toml_str(
            r#"
[form]
name = "signup"
debounce_ms = 150
emit_initial = true

[[fields]]
name = "Username"
pattern = '[a-z]{3,12}'

[[fields]]
name = "Pin"
pattern = '[0-9]{4}'
"#,
        )
        .unwrap();

        assert_eq!(config.form.name, "signup");
        assert_eq!(config.debounce_interval(), Duration::from_millis(150));
        assert!(config.emit_initial());
        assert_eq!(config.field_names(), vec!["Username", "Pin"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_form_section_is_optional() {
        let config = FormConfig::from_toml_str(
            r#"
[[fields]]
name = "Pin"
pattern = '[0-9]{4}'
"#,
        )
        .unwrap();

        assert_eq!(config.form.name, "registration");
        assert_eq!(config.debounce_interval(), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FORM_GATE_TEST_PIN_RULE", "[0-9]{6}");
        let config = FormConfig::from_toml_str(
            r#"
[[fields]]
name = "Pin"
pattern = '${FORM_GATE_TEST_PIN_RULE}'

[[fields]]
name = "Other"
pattern = '${FORM_GATE_TEST_UNSET_RULE}'
"#,
        )
        .unwrap();

        assert_eq!(config.fields[0].pattern, "[0-9]{6}");
        assert_eq!(config.fields[1].pattern, "${FORM_GATE_TEST_UNSET_RULE}");
    }

    #[test]
    fn test_quantifier_braces_are_not_substituted() {
        let config = FormConfig::from_toml_str(
            r#"
[[fields]]
name = "Password"
pattern = '^.{4,8}$'
"#,
        )
        .unwrap();
        assert_eq!(config.fields[0].pattern, PASSWORD_PATTERN);
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let mut config = FormConfig::registration();
        config.fields.clear();
        assert!(matches!(config.validate(), Err(FormError::EmptyFormError)));

        let mut config = FormConfig::registration();
        config.fields.push(FieldConfig::new("Email", ".*"));
        assert!(matches!(
            config.validate(),
            Err(FormError::DuplicateFieldError { .. })
        ));

        let mut config = FormConfig::registration();
        config.fields[0].name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfigValueError { .. })
        ));

        let mut config = FormConfig::registration();
        config.fields[1].name = " Phone".to_string();
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfigValueError { ref value, .. }) if value == " Phone"
        ));

        let mut config = FormConfig::registration();
        config.form.debounce_ms = Some(0);
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfigValueError { .. })
        ));

        let mut config = FormConfig::registration();
        config.fields[2].pattern = "(".to_string();
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidPatternError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = FormConfig::from_toml_str("[[fields]]\nname = ").unwrap_err();
        assert!(matches!(err, FormError::ConfigValidationError { .. }));
    }
}
