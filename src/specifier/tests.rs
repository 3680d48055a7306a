use super::*;

fn spec(name: &str, version: &str, sub_path: &str) -> PackageSpec {
    PackageSpec {
        name: name.to_string(),
        version: version.to_string(),
        sub_path: sub_path.to_string(),
    }
}

fn kind_of(identifier: &str) -> ParseErrorKind {
    parse(identifier).unwrap_err().kind
}

#[test]
fn test_parse_name_only() {
    assert_eq!(parse("lodash").unwrap(), spec("lodash", "latest", ""));
}

#[test]
fn test_parse_pinned_version() {
    let parsed = parse("lodash@4.17.21").unwrap();
    assert_eq!(parsed, spec("lodash", "4.17.21", ""));
    assert_eq!(parsed.alias(), "lodash-v4.17.21");
    assert!(!parsed.is_latest());
}

#[test]
fn test_parse_scoped_pinned() {
    let parsed = parse("@konard/use@1.0.0").unwrap();
    assert_eq!(parsed, spec("@konard/use", "1.0.0", ""));
    assert_eq!(parsed.alias(), "konard-use-v1.0.0");
}

#[test]
fn test_parse_scoped_without_version() {
    let parsed = parse("@konard/use").unwrap();
    assert_eq!(parsed, spec("@konard/use", "latest", ""));
    assert!(parsed.is_latest());
}

#[test]
fn test_parse_scoped_with_sub_path() {
    assert_eq!(
        parse("@scope/pkg@1.0.0/lib/index").unwrap(),
        spec("@scope/pkg", "1.0.0", "/lib/index")
    );
}

#[test]
fn test_parse_sub_path_without_version() {
    assert_eq!(
        parse("lodash/fp/map").unwrap(),
        spec("lodash", "latest", "/fp/map")
    );
}

#[test]
fn test_parse_at_in_sub_path_is_not_a_divider() {
    assert_eq!(
        parse("@scope/pkg@1.0.0/@types/x").unwrap(),
        spec("@scope/pkg", "1.0.0", "/@types/x")
    );
    assert_eq!(
        parse("lodash/vendor@2/x").unwrap(),
        spec("lodash", "latest", "/vendor@2/x")
    );
}

#[test]
fn test_parse_keeps_version_ranges_and_tags() {
    assert_eq!(parse("react@next").unwrap(), spec("react", "next", ""));
    assert_eq!(
        parse("typescript@5.4.0-beta").unwrap(),
        spec("typescript", "5.4.0-beta", "")
    );
}

#[test]
fn test_parse_is_deterministic() {
    let id = "@scope/pkg@1.0.0/lib/index";
    assert_eq!(parse(id).unwrap(), parse(id).unwrap());
}

#[test]
fn test_from_str_and_display() {
    let parsed: PackageSpec = "@scope/pkg@1.0.0/lib/index".parse().unwrap();
    assert_eq!(parsed.to_string(), "@scope/pkg@1.0.0/lib/index");
    assert_eq!(parsed.package(), "@scope/pkg@1.0.0");

    let bare: PackageSpec = "lodash".parse().unwrap();
    assert_eq!(bare.to_string(), "lodash@latest");
}

// --- Error path tests ---

#[test]
fn test_error_empty() {
    let err = parse("").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Empty);
    insta::assert_snapshot!(err.to_string(), @"name for a package to be installed and imported is not provided; specify a package name and a version (e.g., 'lodash@4.17.21' or '@konard/use@1.0.0')");
}

#[test]
fn test_error_scope_without_name() {
    assert_eq!(kind_of("@konard"), ParseErrorKind::MissingScopedName);
    assert_eq!(kind_of("@/pkg"), ParseErrorKind::MissingScopedName);
    assert_eq!(kind_of("@1.0.0"), ParseErrorKind::MissingScopedName);
    assert_eq!(kind_of("@konard/"), ParseErrorKind::MissingName);
    assert_eq!(kind_of("@konard/@1.0.0"), ParseErrorKind::MissingName);
}

#[test]
fn test_error_missing_name() {
    assert_eq!(kind_of("@4.17.21"), ParseErrorKind::MissingScopedName);
    assert_eq!(kind_of("/lib/index"), ParseErrorKind::MissingName);
}

#[test]
fn test_error_missing_version() {
    let err = parse("lodash@").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingVersion);
    assert_eq!(err.span, 6..7);
    assert_eq!(kind_of("lodash@/fp"), ParseErrorKind::MissingVersion);
}

#[test]
fn test_error_extra_divider_in_name() {
    let err = parse("lodash@4@5").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidName);
    assert_eq!(err.span, 6..7);
    assert_eq!(kind_of("@sc@pe/pkg"), ParseErrorKind::InvalidName);
}

#[test]
fn test_error_message_names_identifier() {
    let err = parse("lodash@").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid package identifier 'lodash@': version is missing after '@'; specify a package name and a version (e.g., 'lodash@4.17.21' or '@konard/use@1.0.0')");
}
