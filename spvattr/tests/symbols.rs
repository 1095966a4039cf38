use std::collections::HashSet;

use spvattr::spirv::{Capability, CodeSymbol, Extension, NameSymbol, StorageClass, Version};
use strum::IntoEnumIterator;

fn assert_code_round_trip<T>()
where
    T: CodeSymbol + NameSymbol + IntoEnumIterator + PartialEq + std::fmt::Debug,
{
    let mut codes = HashSet::new();
    for member in T::iter() {
        assert_eq!(T::from_code(member.code()), Some(member));
        assert_eq!(T::symbolize(member.stringify()), Some(member));
        assert!(codes.insert(member.code()), "duplicate code for {:?}", member);
    }
}

#[test]
fn versions_round_trip() {
    assert_code_round_trip::<Version>();
    assert_eq!(Version::iter().count(), 6);
}

#[test]
fn storage_classes_round_trip() {
    assert_code_round_trip::<StorageClass>();
}

#[test]
fn capabilities_round_trip() {
    assert_code_round_trip::<Capability>();
}

#[test]
fn extensions_round_trip() {
    let mut names = HashSet::new();
    for extension in Extension::iter() {
        let name = extension.stringify();
        assert!(name.starts_with("SPV_"), "unexpected extension name {}", name);
        assert_eq!(Extension::symbolize(name), Some(extension));
        assert_eq!(extension.to_string(), name);
        assert!(names.insert(name));
    }
}

#[test]
fn unknown_symbols_do_not_resolve() {
    assert_eq!(Version::symbolize("v2.0"), None);
    assert_eq!(StorageClass::symbolize("uniform"), None);
    assert_eq!(Capability::from_code(u32::MAX), None);
    assert_eq!(Extension::symbolize(""), None);
}
