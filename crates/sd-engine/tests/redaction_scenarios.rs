use sd_core::{CustomEntities, EntityType, TokenMap};
use sd_engine::Engine;
use sd_tokens::TokenRegistry;

const SAMPLE: &str = "
        Hello John Doe, your email is john.doe@example.com and phone is 555-123-4567.
        Please contact Jane Smith at jane.smith@company.org or call 555-987-6543.
        The server IP is 192.168.1.100 and SSN is 123-45-6789.
        ";

fn ty(name: &str) -> EntityType {
    EntityType::new(name).unwrap()
}

fn custom(entity_type: &str, values: &[&str]) -> CustomEntities {
    let mut custom = CustomEntities::new();
    custom.insert(
        ty(entity_type),
        values.iter().map(|v| v.to_string()).collect(),
    );
    custom
}

#[test]
fn test_internal_role_scenario() {
    let mut engine = Engine::with_defaults();
    let text = "Hello John Doe, email john.doe@example.com, phone 555-123-4567.";

    let (redacted, tokens) = engine.redact(text, "internal", None);

    assert!(redacted.contains("John Doe"));
    assert!(!redacted.contains("john.doe@example.com"));
    assert!(!redacted.contains("555-123-4567"));
    assert!(redacted.contains("TOKEN_EMAIL_"));
    assert!(redacted.contains("TOKEN_PHONE_"));
    assert_eq!(tokens.len(), 2);
}

#[test]
fn test_public_role_sees_nothing() {
    let mut engine = Engine::with_defaults();
    let (redacted, _) = engine.redact(SAMPLE, "public", None);

    for secret in [
        "john.doe@example.com",
        "555-123-4567",
        "John Doe",
        "192.168.1.100",
        "123-45-6789",
    ] {
        assert!(!redacted.contains(secret), "{secret} leaked");
    }
    assert!(redacted.contains("TOKEN_"));
}

#[test]
fn test_manager_partial_visibility() {
    let mut engine = Engine::with_defaults();
    let text = "Contact Jane Smith at jane.smith@company.org or 555-987-6543.";

    let (redacted, tokens) = engine.redact(text, "manager", None);

    assert!(redacted.contains("Jane Smith"));
    assert!(redacted.contains("jane.smith@company.org"));
    assert!(!redacted.contains("555-987-6543"));
    assert_eq!(tokens.len(), 1);

    let (token, value) = tokens.iter().next().unwrap();
    assert_eq!(value, "555-987-6543");
    assert_ne!(token, value);
    assert!(redacted.contains(token.as_str()));
}

#[test]
fn test_security_round_trip() {
    let mut engine = Engine::with_defaults();

    let (redacted, tokens) = engine.redact(SAMPLE, "security", None);
    assert_eq!(redacted, SAMPLE);
    assert!(tokens.is_empty());
    assert_eq!(engine.restore(&redacted, &tokens, "security"), SAMPLE);

    let (redacted, tokens) = engine.redact(SAMPLE, "public", None);
    assert_ne!(redacted, SAMPLE);
    assert_eq!(engine.restore(&redacted, &tokens, "security"), SAMPLE);
}

#[test]
fn test_unknown_role_fails_closed() {
    let mut engine = Engine::with_defaults();

    let (by_unknown, unknown_tokens) = engine.redact(SAMPLE, "nonexistent-role", None);
    let (by_public, public_tokens) = engine.redact(SAMPLE, "public", None);
    assert_eq!(by_unknown, by_public);
    assert_eq!(unknown_tokens, public_tokens);

    assert_eq!(
        engine.restore(&by_unknown, &unknown_tokens, "nonexistent-role"),
        by_unknown
    );
}

#[test]
fn test_non_restoring_role_gets_text_unchanged() {
    let mut engine = Engine::with_defaults();
    let (redacted, tokens) = engine.redact(SAMPLE, "public", None);

    assert_eq!(engine.restore(&redacted, &tokens, "internal"), redacted);
}

#[test]
fn test_restore_only_allowed_types() {
    let mut engine = Engine::with_defaults();
    let (redacted, tokens) = engine.redact(SAMPLE, "public", None);

    let restored = engine.restore(&redacted, &tokens, "manager");

    assert!(restored.contains("john.doe@example.com"));
    assert!(restored.contains("Jane Smith"));
    assert!(!restored.contains("555-123-4567"));
    assert!(!restored.contains("123-45-6789"));
    assert!(restored.contains("TOKEN_PHONE_"));
    assert!(restored.contains("TOKEN_SSN_"));
}

#[test]
fn test_stateless_restore_in_fresh_engine() {
    let mut producer = Engine::with_defaults();
    let (redacted, tokens) = producer.redact(SAMPLE, "public", None);

    // Simulate a new process: the map goes through JSON, the registry is gone
    let json = serde_json::to_string(&tokens).unwrap();
    drop(producer);
    let loaded: TokenMap = serde_json::from_str(&json).unwrap();

    let consumer = Engine::with_defaults();
    assert!(consumer.registry().is_empty());
    assert_eq!(consumer.restore(&redacted, &loaded, "security"), SAMPLE);

    let admin_view = consumer.restore(&redacted, &loaded, "admin");
    assert!(admin_view.contains("192.168.1.100"));
    assert!(!admin_view.contains("123-45-6789"));
}

#[test]
fn test_tokens_stable_within_session() {
    let mut engine = Engine::with_defaults();
    let (first, _) = engine.redact(SAMPLE, "public", None);
    let (second, _) = engine.redact(SAMPLE, "public", None);

    assert_eq!(first, second);
}

#[test]
fn test_tokens_differ_across_sessions() {
    let (first, _) = Engine::with_defaults().redact(SAMPLE, "public", None);
    let (second, _) = Engine::with_defaults().redact(SAMPLE, "public", None);

    assert_ne!(first, second);
}

#[test]
fn test_custom_entities_are_redacted() {
    let mut engine = Engine::with_defaults();
    let text = format!("{SAMPLE} Secret codes: ALPHA-123 and BETA-456");
    let codes = custom("secret_code", &["ALPHA-123", "BETA-456", "GAMMA-789"]);

    let (redacted, tokens) = engine.redact(&text, "security", Some(&codes));

    assert!(!redacted.contains("ALPHA-123"));
    assert!(!redacted.contains("BETA-456"));
    assert!(redacted.contains("john.doe@example.com"));
    assert_eq!(tokens.len(), 2);
    assert!(tokens.keys().all(|t| t.starts_with("TOKEN_SECRET_CODE_")));
}

#[test]
fn test_overlapping_values_do_not_corrupt_each_other() {
    let mut engine = Engine::with_defaults();
    let text = "Jane Smith signed for Jane Smith Holdings, and Jane Smith left.";
    let clients = custom("client", &["Jane Smith Holdings"]);

    let (redacted, tokens) = engine.redact(text, "public", Some(&clients));

    assert!(!redacted.contains("Jane Smith"));
    assert!(!redacted.contains("Holdings"));
    assert_eq!(redacted.matches("TOKEN_CLIENT_").count(), 1);
    assert_eq!(redacted.matches("TOKEN_NAME_").count(), 2);

    let restored = engine.restore(&redacted, &tokens, "security");
    assert!(restored.contains("Jane Smith signed"));
    assert!(restored.contains("TOKEN_CLIENT_"));
}

#[test]
fn test_value_inside_token_text_is_not_rewritten() {
    let mut engine = Engine::with_defaults();
    // "EMAIL" is also a custom value; it must not be replaced inside the
    // email token that is inserted for the address
    let words = custom("keyword", &["EMAIL"]);

    let (redacted, tokens) = engine.redact("EMAIL: a@example.com", "public", Some(&words));
    assert_eq!(tokens.len(), 2);

    let email_token = tokens
        .iter()
        .find(|(_, value)| value.as_str() == "a@example.com")
        .map(|(token, _)| token.clone())
        .unwrap();
    assert!(redacted.ends_with(&email_token));
}

#[test]
fn test_registry_can_be_supplied() {
    let registry = TokenRegistry::with_prefix("REDACTED_").unwrap();
    let mut engine = Engine::with_registry(
        sd_detect::PatternRegistry::with_defaults(),
        sd_core::RoleTable::with_defaults(),
        registry,
    );

    let (redacted, tokens) = engine.redact("mail a@example.com", "public", None);
    assert!(redacted.starts_with("mail REDACTED_EMAIL_"));
    assert_eq!(engine.restore(&redacted, &tokens, "manager"), "mail a@example.com");
}

#[test]
fn test_foreign_tokens_pass_through() {
    let engine = Engine::with_defaults();
    let mut tokens = TokenMap::new();
    tokens.insert("garbage".to_string(), "secret".to_string());

    let text = "keep garbage and TOKEN_EMAIL_0123456789ab as is";
    assert_eq!(engine.restore(text, &tokens, "security"), text);
}
