//! Unit tests for DependencyKey

use boxwood_di::DependencyKey;
use boxwood_di::key::{normalize, type_label};
use rstest::*;
use std::collections::HashMap;
use std::marker::PhantomData;

trait Repository: Send + Sync {}

struct Database;

// =============================================================================
// Derivation
// =============================================================================

#[rstest]
fn key_of_type_is_its_path() {
	// Act
	let key = DependencyKey::of::<Database>();

	// Assert
	assert!(key.as_str().ends_with("key_tests::Database"));
	assert_eq!(key.to_string(), key.as_str());
}

#[rstest]
fn optional_layers_share_the_key() {
	let key = DependencyKey::of::<Database>();

	assert_eq!(key, DependencyKey::of::<Option<Database>>());
	assert_eq!(key, DependencyKey::of::<Option<Option<Option<Database>>>>());
}

#[rstest]
fn type_marker_shares_the_key() {
	assert_eq!(
		DependencyKey::of::<Database>(),
		DependencyKey::of::<PhantomData<Database>>()
	);
}

#[rstest]
fn trait_object_key_drops_dyn_and_auto_traits() {
	// Act
	let bare = DependencyKey::of::<dyn Repository>();
	let bounded = DependencyKey::of::<dyn Repository + Send + Sync>();

	// Assert
	assert_eq!(bare, bounded);
	assert!(bare.as_str().ends_with("key_tests::Repository"));
}

#[rstest]
fn of_val_uses_static_type() {
	let value: Option<u64> = Some(3);

	assert_eq!(DependencyKey::of_val(&value), DependencyKey::of::<u64>());
}

#[rstest]
fn distinct_types_have_distinct_keys() {
	assert_ne!(DependencyKey::of::<u32>(), DependencyKey::of::<u64>());
	assert_ne!(DependencyKey::of::<Vec<u8>>(), DependencyKey::of::<u8>());
}

// =============================================================================
// Explicit keys
// =============================================================================

#[rstest]
#[case("greeter.required")]
#[case("")]
#[case("core::option::Option<app::Plain>")]
fn named_keys_are_not_normalized(#[case] name: &str) {
	// Act
	let from_named = DependencyKey::named(name);
	let from_str: DependencyKey = name.into();
	let from_string: DependencyKey = name.to_string().into();

	// Assert
	assert_eq!(from_named.as_str(), name);
	assert_eq!(from_named, from_str);
	assert_eq!(from_named, from_string);
}

#[rstest]
fn keys_borrow_as_str_for_map_lookup() {
	let mut map = HashMap::new();
	map.insert(DependencyKey::named("a"), 1);

	assert_eq!(map.get("a"), Some(&1));
}

#[rstest]
fn keys_sort_by_text() {
	let mut keys = vec![DependencyKey::named("b"), DependencyKey::named("a")];

	keys.sort();

	assert_eq!(keys, vec![DependencyKey::named("a"), DependencyKey::named("b")]);
}

// =============================================================================
// Labels
// =============================================================================

#[rstest]
fn labels_are_not_normalized() {
	assert_eq!(type_label::<Option<u8>>(), "core::option::Option<u8>");
	assert_eq!(normalize(&type_label::<Option<u8>>()), "u8");
}

#[rstest]
fn debug_output_names_the_key() {
	assert_eq!(format!("{:?}", DependencyKey::named("x")), "DependencyKey(\"x\")");
}
