//! Unit tests for Resolution

use boxwood_di::{Container, DependencyKey, DiError, Scope};
use rstest::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

trait Animal: Send + Sync {
	fn sound(&self) -> &'static str;
}

trait Pet: Send + Sync {
	fn name(&self) -> String;
}

struct Dog;

impl Animal for Dog {
	fn sound(&self) -> &'static str {
		"woof"
	}
}

impl Pet for Dog {
	fn name(&self) -> String {
		"rex".to_string()
	}
}

#[derive(Debug)]
struct Person {
	name: String,
	age: Option<u32>,
}

#[fixture]
fn container() -> Container {
	Container::detached("resolution-tests")
}

#[rstest]
fn unregistered_type_is_absent(container: Container) {
	assert!(container.get::<Person>().is_none());
}

#[rstest]
fn unregistered_type_reports_not_registered(container: Container) {
	// Act
	let err = container.try_get::<Person>().unwrap_err();

	// Assert
	assert!(err.is_not_registered());
	assert!(err.to_string().starts_with("resolution-tests - resolution failed - expected "));
	assert!(err.to_string().ends_with("Person but found nil"));
}

#[rstest]
fn arguments_reach_the_factory(container: Container) {
	// Arrange
	container.register(Scope::Factory, |_, (name, age): (String, Option<u32>)| Ok(Person { name, age }));

	// Act
	let person = container.get_with::<Person, _>(("ada".to_string(), 36u32)).unwrap();

	// Assert
	assert_eq!(person.name, "ada");
	assert_eq!(person.age, Some(36));
}

#[rstest]
fn omitted_optional_argument_is_none(container: Container) {
	container.register(Scope::Factory, |_, (name, age): (String, Option<u32>)| Ok(Person { name, age }));

	let person = container.resolve::<Person>().arg("grace").get().unwrap();

	assert_eq!(person.age, None);
}

#[rstest]
fn explicit_missing_argument_is_none(container: Container) {
	container.register(Scope::Factory, |_, (age, name): (Option<u32>, String)| Ok(Person { name, age }));

	let person = container.resolve::<Person>().missing().arg("alan").get().unwrap();

	assert_eq!(person.name, "alan");
	assert_eq!(person.age, None);
}

#[rstest]
fn omitted_required_argument_is_binding_mismatch(container: Container) {
	// Arrange
	container.register(Scope::Factory, |_, (name,): (String,)| Ok(Person { name, age: None }));

	// Act
	let err = container.try_get::<Person>().unwrap_err();

	// Assert
	assert!(matches!(
		err,
		DiError::BindingMismatch { position: 0, supplied: None, .. }
	));
	assert!(container.get::<Person>().is_none());
}

#[rstest]
fn binding_failure_is_not_cached(container: Container) {
	container.register(Scope::Single, |_, (name,): (String,)| Ok(Person { name, age: None }));

	assert!(container.get::<Person>().is_none());

	assert!(!container.is_cached(&DependencyKey::of::<Person>()));
	assert!(container.get_with::<Person, _>(("ok",)).is_some());
}

#[rstest]
fn cached_single_ignores_later_arguments(container: Container) {
	// Arrange
	container.register(Scope::Single, |_, (name,): (String,)| Ok(Person { name, age: None }));
	let first = container.get_with::<Person, _>(("first",)).unwrap();

	// Act
	let second = container.get_with::<Person, _>(("second",)).unwrap();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(second.name, "first");
}

#[rstest]
fn single_scope_override_caches_factory_registration(container: Container) {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	container.register(Scope::Factory, move |_, ()| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(Dog)
	});

	// Act
	let a = container.resolve::<Dog>().scope(Scope::Single).get().unwrap();
	let b = container.resolve::<Dog>().scope(Scope::Single).get().unwrap();
	let c = container.get::<Dog>().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&a, &b));
	assert!(!Arc::ptr_eq(&a, &c));
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[rstest]
fn one_concrete_type_serves_several_trait_keys(container: Container) {
	// Arrange
	container
		.register_as::<dyn Animal, _, _>(Scope::Single, |_, ()| Ok(Arc::new(Dog)))
		.register_as::<dyn Pet, _, _>(Scope::Single, |_, ()| Ok(Arc::new(Dog)));

	// Act
	let animal = container.get::<dyn Animal>().unwrap();
	let pet = container.get::<dyn Pet>().unwrap();

	// Assert
	assert_eq!(animal.sound(), "woof");
	assert_eq!(pet.name(), "rex");
}

#[rstest]
fn concrete_type_is_not_inferred_from_trait_registration(container: Container) {
	container.register_as::<dyn Animal, _, _>(Scope::Single, |_, ()| Ok(Arc::new(Dog)));

	assert!(container.get::<Dog>().is_none());
}

#[rstest]
fn probing_a_key_with_candidate_types(container: Container) {
	// Arrange
	container.register_at("pet", Scope::Single, |_, ()| Ok(Dog));
	container.resolve::<Dog>().key("pet").get().unwrap();

	// Act
	let as_animal = container.resolve::<dyn Animal>().key("pet").get();
	let as_pet = container.resolve::<dyn Pet>().key("pet").get();
	let as_dog = container.resolve::<Dog>().key("pet").get();

	// Assert
	assert!(as_animal.is_none());
	assert!(as_pet.is_none());
	assert!(as_dog.is_some());
}

#[rstest]
fn expect_resolves_another_key(container: Container) {
	container.register_at(DependencyKey::of::<Dog>(), Scope::Factory, |_, ()| Ok(String::from("dog")));

	let value = container.resolve::<String>().expect::<Dog>().get().unwrap();

	assert_eq!(*value, "dog");
}

#[rstest]
fn factories_pull_their_own_dependencies(container: Container) {
	// Arrange
	container
		.register(Scope::Single, |_, ()| Ok(String::from("shared")))
		.register(Scope::Factory, |c, ()| {
			let name = c.try_get::<String>()?;
			Ok(Person {
				name: name.to_string(),
				age: None,
			})
		});

	// Act
	let person = container.get::<Person>().unwrap();

	// Assert
	assert_eq!(person.name, "shared");
}

#[rstest]
fn dependency_failure_propagates_to_dependent(container: Container) {
	container.register(Scope::Factory, |c, ()| {
		let name = c.try_get::<String>()?;
		Ok(Person {
			name: name.to_string(),
			age: None,
		})
	});

	let err = container.try_get::<Person>().unwrap_err();

	assert!(err.is_not_registered());
	assert!(err.to_string().contains("alloc::string::String"));
}

#[rstest]
fn stale_cached_instance_of_other_type_is_absent(container: Container) {
	// Arrange
	container.register_at("k", Scope::Single, |_, ()| Ok(1u8));
	assert_eq!(*container.resolve::<u8>().key("k").get().unwrap(), 1);
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	container.register_at("k", Scope::Single, move |_, ()| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(2u16)
	});

	// Act
	let err = container.resolve::<u16>().key("k").try_get().unwrap_err();
	let value = container.resolve::<u16>().key("k").get();

	// Assert
	assert!(matches!(
		err,
		DiError::TypeMismatch { ref key, ref actual, .. }
			if key == "k" && actual == "a cached instance of another type"
	));
	assert!(value.is_none());
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}
