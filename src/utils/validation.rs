use crate::utils::error::{FormError, Result};
use regex::Regex;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 欄位名稱不可為空，也不可有前後空白 (輸入端會修剪名稱)
pub fn validate_field_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    if name.trim() != name {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Field name cannot have leading or trailing whitespace".to_string(),
        });
    }
    Ok(())
}

/// 欄位名稱在表單內必須唯一
pub fn validate_unique_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(FormError::DuplicateFieldError {
                field: name.to_string(),
            });
        }
    }
    Ok(())
}

/// 編譯成整串比對的正規表達式 (等同 `SELF MATCHES`)，不是子字串搜尋
pub fn compile_full_match(field_name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| FormError::InvalidPatternError {
        field: field_name.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}
