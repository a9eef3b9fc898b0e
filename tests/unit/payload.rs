use crate::common::{load_fixture, ADDR_A, ADDR_B};
use cast_launcher::errors::SocialError;
use cast_launcher::social::parse_cast_response;
use cast_launcher::ticker::extract_ticker;
use cast_launcher::types::CastIdentifier;

fn parse_fixture(name: &str) -> Result<cast_launcher::types::Cast, SocialError> {
    let identifier = CastIdentifier::from("0x6864e592");
    parse_cast_response(&identifier, &load_fixture(&format!("neynar/{}", name)))
}

#[test]
fn test_full_response_fixture() {
    let cast = parse_fixture("cast_with_directive.json").unwrap();

    assert_eq!(cast.identifier.as_str(), "0x6864e592");
    assert_eq!(cast.author_username, "owl");
    assert_eq!(cast.author_verified_addresses, vec![ADDR_A, ADDR_B]);
    assert_eq!(extract_ticker(&cast.author_text).as_deref(), Some("OWL"));
    // The quoted-cast embed has no url and is skipped
    assert_eq!(
        cast.first_media_url(),
        Some("https://i.imgur.com/owl-token.png")
    );
    assert_eq!(cast.embedded_media_urls.len(), 2);
}

#[test]
fn test_cast_without_directive_still_parses() {
    let cast = parse_fixture("cast_without_directive.json").unwrap();
    assert!(extract_ticker(&cast.author_text).is_none());
    assert!(cast.first_media_url().is_none());
}

#[test]
fn test_empty_address_list_is_not_malformed() {
    let cast = parse_fixture("cast_no_verified_addresses.json").unwrap();
    assert!(cast.author_verified_addresses.is_empty());
}

#[test]
fn test_malformed_fixtures() {
    for name in [
        "cast_missing_author.json",
        "cast_bad_address.json",
        "not_found.json",
    ] {
        let result = parse_fixture(name);
        assert!(
            matches!(result, Err(SocialError::MalformedCastPayload(_))),
            "{} should be malformed",
            name
        );
    }
}
