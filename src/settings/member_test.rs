use super::*;

#[test]
fn parse_members_should_preserve_order() {
    let members = parse_members("pd1=http://host:1001,pd2=http://host:1002").unwrap();

    assert_eq!(
        members,
        vec![
            Member::new("pd1", "http://host:1001"),
            Member::new("pd2", "http://host:1002"),
        ]
    );
}

#[test]
fn parse_members_should_return_nothing_for_empty_string() {
    assert!(parse_members("").unwrap().is_empty());
}

#[test]
fn parse_members_should_allow_several_urls_per_name() {
    let members = parse_members("pd1=http://host:1001,pd1=https://host:1101").unwrap();

    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.name == "pd1"));
}

#[test]
fn parse_members_should_reject_malformed_entries() {
    assert!(parse_members("pd1").is_err());
    assert!(parse_members("=http://host:1001").is_err());
    assert!(parse_members("pd1=host:1001").is_err());
}

#[test]
fn membership_string_should_round_trip_through_display() {
    let members = vec![
        Member::new("pd1", "http://host:1001"),
        Member::new("pd2", "http://host:1002"),
    ];

    let joined = membership_string(&members);

    assert_eq!(joined, "pd1=http://host:1001,pd2=http://host:1002");
    assert_eq!(parse_members(&joined).unwrap(), members);
}

#[test]
fn validate_url_should_check_scheme_host_and_port() {
    assert!(validate_url("f", "http://127.0.0.1:2379").is_ok());
    assert!(validate_url("f", "https://node-1:2379").is_ok());

    assert!(validate_url("f", "tcp://127.0.0.1:2379").is_err());
    assert!(validate_url("f", "http://127.0.0.1").is_err());
    assert!(validate_url("f", "http://:2379").is_err());
    assert!(validate_url("f", "http://127.0.0.1:99999").is_err());
    assert!(validate_url("f", "http://host/path:2379").is_err());
}

#[test]
fn validate_url_list_should_reject_empty_list() {
    assert!(validate_url_list("client-urls", "").is_err());
    assert!(validate_url_list("client-urls", " , ").is_err());
    assert!(validate_url_list("client-urls", "http://a:1,http://b:2").is_ok());
}
