use super::*;

fn map(entries: &[(&str, &str)]) -> MetadataMap {
    entries.iter().copied().collect()
}

fn fields(findings: &[PrivacyFinding]) -> Vec<&str> {
    findings.iter().map(|finding| finding.field.as_str()).collect()
}

#[test]
fn coordinates_yield_individual_and_combined_findings() {
    let metadata = map(&[
        ("GPSLatitude", "40.44611111111111"),
        ("GPSLongitude", "-79.98222222222222"),
    ]);
    let findings = analyze(&metadata);

    assert_eq!(
        fields(&findings),
        vec!["GPSLatitude", "GPSLongitude", GPS_COORDINATES_FIELD]
    );
    assert_eq!(findings[0].description, "Contains your geographical latitude");
    assert_eq!(findings[0].value, "40.44611111111111");
    assert_eq!(findings[2].value, "Geographical coordinates present");
    assert_eq!(
        findings
            .iter()
            .filter(|finding| finding.field == GPS_COORDINATES_FIELD)
            .count(),
        1
    );
}

#[test]
fn combined_finding_guard_only_checks_literal_gps_latitude() {
    let metadata = map(&[("GPS Latitude", "40.4"), ("GPS Longitude", "-3.7")]);
    let findings = analyze(&metadata);

    // "GPS Latitude" no coincide con el patrón `GPSLatitude`, así que no hay
    // hallazgo individual y el combinado sí aparece.
    assert_eq!(fields(&findings), vec![GPS_COORDINATES_FIELD]);

    let manual = vec![PrivacyFinding::new("gps latitude", "manual", "40.4")];
    assert!(already_reported(&manual, GPS_SUPPRESSING_FIELD));
}

#[test]
fn a_single_coordinate_is_not_a_pair() {
    let findings = analyze(&map(&[("GPSLatitude", "40.4")]));
    assert_eq!(fields(&findings), vec!["GPSLatitude"]);
}

#[test]
fn email_in_unmatched_field_is_flagged_once() {
    let findings = analyze(&map(&[("Comment", "jane@example.com")]));

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].field, "Comment");
    assert_eq!(findings[0].description, "This field may contain an email address");
    assert_eq!(findings[0].value, "jane@example.com");
}

#[test]
fn email_in_catalogued_field_is_not_duplicated() {
    let findings = analyze(&map(&[("Author", "jane@example.com")]));

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].description, "Contains the document author name");
}

#[test]
fn at_sign_without_dotted_domain_is_not_an_email() {
    assert!(!looks_like_email("@handle"));
    assert!(!looks_like_email("user@localhost"));
    assert!(!looks_like_email("v1.2 build"));
    assert!(looks_like_email("a@b.c@d"));
}

#[test]
fn first_matching_pattern_wins_per_field() {
    let findings = analyze(&map(&[("DateTimeOriginal", "2023:01:15 12:00:00")]));
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].description,
        "Contains the date and time the image was taken"
    );
}

#[test]
fn findings_follow_metadata_order() {
    let metadata = map(&[
        ("Software", "GIMP"),
        ("ExposureTime", "1/60"),
        ("Make", "Canon"),
        ("Notes", "write to bob@mail.org"),
        ("Artist", "Jane"),
    ]);
    let findings = analyze(&metadata);
    assert_eq!(fields(&findings), vec!["Software", "Make", "Artist", "Notes"]);
}

#[test]
fn analysis_is_idempotent() {
    let metadata = map(&[
        ("Make", "Canon"),
        ("GPSLatitude", "1.5"),
        ("GPSLongitude", "2.5"),
        ("Comment", "jane@example.com"),
    ]);
    assert_eq!(analyze(&metadata), analyze(&metadata));
}

#[test]
fn empty_metadata_has_no_findings() {
    assert!(analyze(&MetadataMap::new()).is_empty());
}

#[test]
fn error_finding_describes_failure() {
    let finding = PrivacyFinding::error("boom");
    assert!(finding.is_error());
    assert_eq!(finding.description, "Failed to analyze privacy concerns: boom");
}

#[test]
fn location_findings_are_detected() {
    let findings = analyze(&map(&[("GPSLatitude", "1"), ("GPSLongitude", "2")]));
    assert!(has_location_findings(&findings));
    assert!(!has_location_findings(&analyze(&map(&[("Make", "Canon")]))));
}
