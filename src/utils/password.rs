use bcrypt::{hash, verify, DEFAULT_COST};
use crate::error::{AppError, AppResult};

/// 验证密码强度：8-128 位，且不能全是数字
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(AppError::ValidationError(
            "Password must be between 8 and 128 characters".to_string()
        ));
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::ValidationError(
            "Password cannot be entirely numeric".to_string()
        ));
    }

    Ok(())
}

/// 注册时的完整校验：两次输入一致、强度、不能与用户名过于相似
pub fn validate_new_password(username: &str, password1: &str, password2: &str) -> AppResult<()> {
    if password1 != password2 {
        return Err(AppError::ValidationError(
            "The two password fields didn't match.".to_string(),
        ));
    }
    validate_password(password1)?;

    let name = username.trim().to_lowercase();
    if name.chars().count() >= 3 && password1.to_lowercase().contains(&name) {
        return Err(AppError::ValidationError(
            "The password is too similar to the username.".to_string(),
        ));
    }
    Ok(())
}

/// 对密码进行哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("calm-breath").is_ok());
        assert!(validate_password("short").is_err()); // 太短
        assert!(validate_password("12345678").is_err()); // 全是数字
        assert!(validate_password(&"a".repeat(129)).is_err()); // 太长
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("luna", "calm-breath", "calm-breath").is_ok());
        assert!(validate_new_password("luna", "calm-breath", "calm-breathe").is_err());
        assert!(validate_new_password("luna", "LunaLovegood", "LunaLovegood").is_err());
        // 过短的用户名不参与相似度判断
        assert!(validate_new_password("al", "always-calm", "always-calm").is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {

        let password = "calm-breath-42";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("calm-breath-43", &hashed).unwrap());
    }
}
