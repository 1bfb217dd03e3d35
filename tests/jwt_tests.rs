//! JWT 签发与校验测试

use chrono::{Duration, TimeZone, Utc};
use event_hub::auth::jwt::{Identity, JwtService, TokenError};

fn service() -> JwtService {
    JwtService::new(b"jwt-tests-signing-key-0123456789abcdef", Duration::days(7))
}

fn jane() -> Identity {
    Identity {
        user_id: 1,
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
    }
}

#[test]
fn test_round_trip_at_every_point_in_window() {
    let service = service();
    let issued_at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let ttl = Duration::hours(2);
    let token = service.issue_at(&jane(), ttl, issued_at).unwrap();

    for offset_secs in [0, 1, 60, 3600, 7199] {
        let now = issued_at + Duration::seconds(offset_secs);
        let claims = service.verify_at(&token, now).unwrap();
        assert_eq!(claims.identity().unwrap(), jane());
    }

    for offset_secs in [7200, 7201, 86400] {
        let now = issued_at + Duration::seconds(offset_secs);
        assert_eq!(service.verify_at(&token, now), Err(TokenError::Expired));
    }
}

#[test]
fn test_tampering_any_byte_is_rejected() {
    let service = service();
    let token = service.issue(&jane()).unwrap();

    for (i, original) in token.char_indices() {
        if original == '.' {
            continue;
        }
        // 另一个 base64url 字符，以及若干不属于 base64url 的字符
        let swap = if original == 'A' { 'B' } else { 'A' };
        for replacement in [swap, '=', '+', '/', ' ', '~', 'é'] {
            let mut tampered = String::with_capacity(token.len() + 1);
            tampered.push_str(&token[..i]);
            tampered.push(replacement);
            tampered.push_str(&token[i + 1..]);

            assert_eq!(
                service.verify(&tampered),
                Err(TokenError::InvalidSignature),
                "byte {i} replaced with {replacement:?} but not rejected as a bad signature"
            );
        }
    }
}

#[test]
fn test_dot_positions_cannot_be_moved() {
    let service = service();
    let token = service.issue(&jane()).unwrap();

    let dotless = token.replacen('.', "A", 1);
    assert_eq!(service.verify(&dotless), Err(TokenError::Malformed));

    let extra = format!("{token}.extra");
    assert_eq!(service.verify(&extra), Err(TokenError::Malformed));
}

#[test]
fn test_services_with_different_keys_do_not_trust_each_other() {
    let a = service();
    let b = JwtService::new(b"another-signing-key-abcdefghijklmnopqr", Duration::days(7));

    let token = a.issue(&jane()).unwrap();
    assert_eq!(b.verify(&token), Err(TokenError::InvalidSignature));
    assert_eq!(a.verify(&token).unwrap(), jane());
}

#[test]
fn test_ttl_is_configurable() {
    let service = JwtService::new(b"jwt-tests-signing-key-0123456789abcdef", Duration::minutes(5));
    let now = Utc::now();
    let token = service.issue_at(&jane(), service.ttl(), now).unwrap();

    let claims = service.verify_at(&token, now).unwrap();
    assert_eq!(claims.exp - claims.iat, 300);
}
