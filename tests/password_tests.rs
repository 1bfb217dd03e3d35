//! 密码哈希功能测试
//!
//! 测试 Argon2id 密码哈希、校验与密码策略

use event_hub::auth::password::{
    HashCost, HashError, PasswordHasher, PasswordPolicy, VERIFY_LATENCY_BUDGET,
};
use std::time::Instant;
use validator::ValidationErrors;

fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(HashCost::testing()).expect("Failed to create hasher")
}

#[test]
fn test_verify_accepts_only_the_original_secret() {
    let hasher = fast_hasher();
    let secrets = ["secret123", "Secret123", "secret1234", "", "密码密码密码密码", " secret123"];

    for original in secrets {
        let record = hasher.hash(original).unwrap();
        for candidate in secrets {
            assert_eq!(
                hasher.verify(candidate, &record).unwrap(),
                candidate == original,
                "{candidate:?} against hash of {original:?}"
            );
        }
    }
}

#[test]
fn test_record_is_self_describing() {
    let record = fast_hasher().hash("secret123").unwrap();

    assert!(record.starts_with("$argon2id$"));
    assert!(!record.contains("secret123"));
    // 算法、版本、参数、盐、摘要
    assert_eq!(record.split('$').count(), 6);
}

#[test]
fn test_truncated_record_is_invalid() {
    let hasher = fast_hasher();
    let record = hasher.hash("secret123").unwrap();
    let truncated = &record[..record.rfind('$').unwrap()];

    assert!(matches!(
        hasher.verify("secret123", truncated),
        Err(HashError::InvalidRecord)
    ));
}

#[test]
fn test_default_hasher_verifies_records_of_any_cost() {
    let record = fast_hasher().hash("secret123").unwrap();
    let default = PasswordHasher::new(HashCost::default()).unwrap();

    assert!(default.verify("secret123", &record).unwrap());
}

#[test]
fn test_password_policy_counts_characters() {
    let policy = PasswordPolicy { min_length: 8 };

    let mut errors = ValidationErrors::new();
    policy.check("password", "密码密码密码密码", &mut errors);
    assert!(errors.errors().is_empty());

    policy.check("password", "1234567", &mut errors);
    assert!(errors.field_errors().contains_key("password"));
}

/// 默认开销下单次校验的耗时上限（仅在优化构建中有意义）
#[test]
#[cfg_attr(debug_assertions, ignore)]
fn test_default_cost_verify_within_budget() {
    let hasher = PasswordHasher::new(HashCost::default()).unwrap();
    let record = hasher.hash("secret123").unwrap();

    let start = Instant::now();
    assert!(hasher.verify("secret123", &record).unwrap());
    let elapsed = start.elapsed();

    assert!(
        elapsed < VERIFY_LATENCY_BUDGET,
        "verify took {elapsed:?}, budget {VERIFY_LATENCY_BUDGET:?}"
    );
}
