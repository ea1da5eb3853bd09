use crate::domain::model::{LoginForm, RegistrationForm, ServiceForm};
use crate::utils::error::{PortalError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// 密碼特殊字元集合
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// 密碼強度檢查結果，每一項各自獨立計算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub length: bool,
    pub uppercase: bool,
    pub number: bool,
    pub special: bool,
}

impl PasswordChecks {
    pub fn passes(&self) -> bool {
        self.length && self.uppercase && self.number && self.special
    }
}

pub fn validate_password(candidate: &str) -> PasswordChecks {
    PasswordChecks {
        // 長度以 UTF-16 code unit 計算，與瀏覽器表單的 length 一致
        length: candidate.encode_utf16().count() >= MIN_PASSWORD_LENGTH,
        uppercase: candidate.chars().any(|c| c.is_ascii_uppercase()),
        number: candidate.chars().any(|c| c.is_ascii_digit()),
        special: candidate.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
    }
}

pub fn require_field(field_name: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::validation(field_name, message));
    }
    Ok(())
}

pub fn require_email(field_name: &str, value: &str) -> Result<()> {
    if !value.contains('@') {
        return Err(PortalError::validation(
            field_name,
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

impl Validate for RegistrationForm {
    fn validate(&self) -> Result<()> {
        // 依表單欄位順序檢查，遇到第一個錯誤即返回
        require_field("firstName", &self.first_name, "First name is required")?;
        require_field("lastName", &self.last_name, "Last name is required")?;
        require_field(
            "businessEmail",
            &self.business_email,
            "Business email is required",
        )?;
        require_email("businessEmail", &self.business_email)?;
        require_field("phoneNumber", &self.phone_number, "Phone number is required")?;
        require_field("companyName", &self.company_name, "Company name is required")?;
        require_field(
            "businessWebsiteUrl",
            &self.business_website_url,
            "Business website URL is required",
        )?;
        require_field("address", &self.address, "Address is required")?;
        require_field("city", &self.city, "City is required")?;
        require_field("state", &self.state, "State is required")?;
        require_field("password", &self.password, "Password is required")?;

        if self.password != self.confirm_password {
            return Err(PortalError::validation(
                "confirmPassword",
                "Passwords do not match",
            ));
        }

        if !validate_password(&self.password).passes() {
            return Err(PortalError::validation(
                "password",
                "Password does not meet all requirements",
            ));
        }

        Ok(())
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<()> {
        require_field("email", &self.email, "Email is required")?;
        require_email("email", &self.email)?;
        require_field("password", &self.password, "Password is required")
    }
}

impl Validate for ServiceForm {
    fn validate(&self) -> Result<()> {
        require_field("title", &self.title, "Title is required")
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PortalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PortalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PortalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Tier;

    fn complete_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            business_email: "jane@acme.com".to_string(),
            phone_number: "+1 555 0100".to_string(),
            company_name: "Acme AV".to_string(),
            business_website_url: "https://acme.example".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "Illinois".to_string(),
            tier: Tier::Silver,
            password: "Abcdefg1!".to_string(),
            confirm_password: "Abcdefg1!".to_string(),
        }
    }

    fn failing_field(result: Result<()>) -> String {
        match result {
            Err(PortalError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_password_examples() {
        assert_eq!(
            validate_password("Abcdefg1!"),
            PasswordChecks {
                length: true,
                uppercase: true,
                number: true,
                special: true
            }
        );
        assert!(validate_password("Abcdefg1!").passes());

        let checks = validate_password("abcdefg1");
        assert!(!checks.uppercase);
        assert!(checks.length && checks.number);
        assert!(!checks.special);
        assert!(!checks.passes());
    }

    #[test]
    fn test_validate_password_flags_are_independent() {
        let checks = validate_password("A1!");
        assert!(!checks.length);
        assert!(checks.uppercase && checks.number && checks.special);

        assert!(validate_password("Abcdefgh\\1").special);
        assert!(!validate_password("Abcdefgh 1").special);
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        // 7 個字元，但 emoji 佔 2 個 UTF-16 單位
        assert!(validate_password("😀Abc1!x").length);
        assert!(validate_password("😀Abc1!x").passes());
        assert!(validate_password("😀😀😀😀A1!").passes());

        assert!(!validate_password("😀Ab1!x").length);
        assert!(!validate_password("éAbc1!x").length);
    }

    #[test]
    fn test_registration_form_passes_when_complete() {
        assert!(complete_form().validate().is_ok());
    }

    #[test]
    fn test_registration_reports_first_failure_only() {
        let form = RegistrationForm {
            last_name: "   ".to_string(),
            city: String::new(),
            ..complete_form()
        };
        assert_eq!(failing_field(form.validate()), "lastName");

        let form = RegistrationForm {
            business_email: "jane.acme.com".to_string(),
            phone_number: String::new(),
            ..complete_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn test_registration_password_rules() {
        let mismatch = RegistrationForm {
            confirm_password: "Abcdefg1?".to_string(),
            ..complete_form()
        };
        assert_eq!(
            mismatch.validate().unwrap_err().to_string(),
            "Passwords do not match"
        );

        let weak = RegistrationForm {
            password: "abcdefgh".to_string(),
            confirm_password: "abcdefgh".to_string(),
            ..complete_form()
        };
        assert_eq!(
            weak.validate().unwrap_err().to_string(),
            "Password does not meet all requirements"
        );
    }

    #[test]
    fn test_login_form_order() {
        let empty = LoginForm::default();
        assert_eq!(empty.validate().unwrap_err().to_string(), "Email is required");

        let no_at = LoginForm {
            email: "user".to_string(),
            password: String::new(),
        };
        assert_eq!(failing_field(no_at.validate()), "email");

        let no_password = LoginForm {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(
            no_password.validate().unwrap_err().to_string(),
            "Password is required"
        );
    }

    #[test]
    fn test_service_form_requires_title() {
        let form = ServiceForm {
            title: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Title is required");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("latency.login_ms", 600u64, 0, 10_000).is_ok());
        assert!(validate_range("latency.login_ms", 20_000u64, 0, 10_000).is_err());
    }
}
