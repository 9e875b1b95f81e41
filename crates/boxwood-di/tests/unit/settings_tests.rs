//! Unit tests for DiSettings

use boxwood_di::{DefaultContainerId, DiSettings, GLOBAL_CONTAINER_ID};
use rstest::*;

#[rstest]
fn defaults() {
	let settings = DiSettings::default();

	assert!(settings.logging_enabled);
	assert_eq!(
		settings.default_container,
		DefaultContainerId::Fixed(GLOBAL_CONTAINER_ID.to_string())
	);
	assert_eq!(settings, DiSettings::new());
}

#[rstest]
fn missing_fields_deserialize_to_defaults() {
	// Act
	let settings: DiSettings = serde_json::from_str("{}").unwrap();

	// Assert
	assert_eq!(settings, DiSettings::default());
}

#[rstest]
#[case(r#"{"default_container":"generated"}"#, DefaultContainerId::Generated)]
#[case(r#"{"default_container":{"fixed":"main"}}"#, DefaultContainerId::Fixed("main".to_string()))]
fn default_container_deserializes(#[case] json: &str, #[case] expected: DefaultContainerId) {
	let settings: DiSettings = serde_json::from_str(json).unwrap();

	assert_eq!(settings.default_container, expected);
	assert!(settings.logging_enabled);
}

#[rstest]
fn serializes_round_trip() {
	// Arrange
	let settings = DiSettings::new()
		.with_logging(false)
		.with_default_container(DefaultContainerId::Generated);

	// Act
	let json = serde_json::to_string(&settings).unwrap();
	let back: DiSettings = serde_json::from_str(&json).unwrap();

	// Assert
	assert_eq!(back, settings);
}

#[rstest]
#[case(None, None, true, DefaultContainerId::Fixed(GLOBAL_CONTAINER_ID.to_string()))]
#[case(Some("false"), None, false, DefaultContainerId::Fixed(GLOBAL_CONTAINER_ID.to_string()))]
#[case(Some("1"), Some("Generated"), true, DefaultContainerId::Generated)]
#[case(None, Some(" worker "), true, DefaultContainerId::Fixed("worker".to_string()))]
fn from_lookup_reads_variables(
	#[case] logging: Option<&'static str>,
	#[case] default_container: Option<&'static str>,
	#[case] expected_logging: bool,
	#[case] expected_default: DefaultContainerId,
) {
	// Act
	let settings = DiSettings::from_lookup(|name| match name {
		"BOXWOOD_LOGGING" => logging.map(str::to_string),
		"BOXWOOD_DEFAULT_CONTAINER" => default_container.map(str::to_string),
		_ => None,
	});

	// Assert
	assert_eq!(settings.logging_enabled, expected_logging);
	assert_eq!(settings.default_container, expected_default);
}

#[rstest]
fn display_names_the_choice() {
	assert_eq!(DefaultContainerId::Generated.to_string(), "generated");
	assert_eq!(DefaultContainerId::default().to_string(), GLOBAL_CONTAINER_ID);
}
