use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// 必填字段，去掉首尾空白后不能为空
pub fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

/// 日期必须是 YYYY-MM-DD
pub fn validate_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{date}', expected YYYY-MM-DD"))
}

const MIN_PASSWORD_LEN: usize = 8;

// 不区分大小写比较
const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "qwerty123",
    "abcd1234",
    "letmein123",
    "welcome1",
    "teacher123",
    "student123",
];

type PasswordRule = (fn(&str) -> bool, &'static str);

const PASSWORD_RULES: &[PasswordRule] = &[
    (
        |p: &str| p.chars().count() >= MIN_PASSWORD_LEN,
        "Password must be at least 8 characters long",
    ),
    (
        |p: &str| p.chars().any(|c| c.is_ascii_uppercase()),
        "Password must contain an uppercase letter",
    ),
    (
        |p: &str| p.chars().any(|c| c.is_ascii_lowercase()),
        "Password must contain a lowercase letter",
    ),
    (
        |p: &str| p.chars().any(|c| c.is_ascii_digit()),
        "Password must contain a digit",
    ),
    (
        |p: &str| !COMMON_PASSWORDS.iter().any(|w| p.eq_ignore_ascii_case(w)),
        "Password is too common",
    ),
];

/// 返回未满足的密码规则
pub fn password_problems(password: &str) -> Vec<&'static str> {
    PASSWORD_RULES
        .iter()
        .filter(|(check, _)| !check(password))
        .map(|(_, msg)| *msg)
        .collect()
}

/// 密码策略：8 位以上，大小写字母和数字都要有，且不在常见弱密码表里
pub fn validate_password(password: &str) -> Result<(), String> {
    let problems = password_problems(password);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@school.edu").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_non_blank_and_date() {
        assert!(require_non_blank("title", "  ").is_err());
        assert_eq!(
            require_non_blank("title", "").unwrap_err(),
            "title is required"
        );
        assert!(require_non_blank("title", "Quiz 1").is_ok());
        assert!(validate_date("2025-03-01").is_ok());
        assert!(validate_date("2025-13-01").is_err());
        assert!(validate_date("03/01/2025").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Teach3rPass").is_ok());
        assert!(validate_password("MyP@ssw0rd").is_ok());

        assert_eq!(
            password_problems("Ab1"),
            vec!["Password must be at least 8 characters long"]
        );
        assert_eq!(
            password_problems("abcd12345"),
            vec!["Password must contain an uppercase letter"]
        );
        assert_eq!(
            password_problems("AbcdEfgh"),
            vec!["Password must contain a digit"]
        );
    }

    #[test]
    fn test_common_password_rejected_any_case() {
        let err = validate_password("Teacher123").unwrap_err();
        assert_eq!(err, "Password is too common");
    }

    #[test]
    fn test_all_problems_joined() {
        let err = validate_password("abc").unwrap_err();
        assert_eq!(
            err,
            "Password must be at least 8 characters long; Password must contain an uppercase letter; Password must contain a digit"
        );
    }
}
