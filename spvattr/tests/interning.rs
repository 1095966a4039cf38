use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use spvattr::{
    AttrKind, Attribute, Context, Location,
    attributes::{ArrayAttr, DictionaryAttr, IntegerAttr, IntegerType, Signedness, StringAttr},
    spirv::{Capability, Extension, InterfaceVarAbiAttr, StorageClass, VerCapExtAttr, Version},
};
use strum::IntoEnumIterator;

#[test]
fn equal_keys_yield_the_same_record() {
    let ctx = Context::new();

    let a = IntegerAttr::get_i32(&ctx, 42);
    let b = IntegerAttr::get(&ctx, IntegerType::I32, 42).unwrap();
    assert_eq!(a, b);

    let s1 = StringAttr::get(&ctx, "SPV_KHR_16bit_storage");
    let s2 = StringAttr::get(&ctx, String::from("SPV_KHR_16bit_storage"));
    assert_eq!(s1, s2);

    let arr1 = ArrayAttr::get(&ctx, [Attribute::from(a), Attribute::from(s1)]);
    let arr2 = ArrayAttr::get(&ctx, vec![Attribute::from(b), Attribute::from(s2)]);
    assert_eq!(arr1, arr2);

    // order matters for arrays
    let swapped = ArrayAttr::get(&ctx, [Attribute::from(s1), Attribute::from(a)]);
    assert_ne!(arr1, swapped);
}

#[test]
fn integer_types_are_part_of_the_key() {
    let ctx = Context::new();
    let signless = IntegerAttr::get(&ctx, IntegerType::I32, 1).unwrap();
    let wide = IntegerAttr::get(&ctx, IntegerType::I64, 1).unwrap();
    let si32 = IntegerType::new(32, Signedness::Signed).unwrap();
    let signed = IntegerAttr::get(&ctx, si32, 1).unwrap();

    assert_ne!(signless, wide);
    assert_ne!(signless, signed);
    assert_ne!(wide, signed);
    assert_eq!(ctx.num_records(AttrKind::Integer), 3);
}

#[test]
fn integers_are_keyed_by_their_bit_pattern() {
    let ctx = Context::new();
    let minus_one = IntegerAttr::get(&ctx, IntegerType::I8, -1).unwrap();
    let all_ones = IntegerAttr::get(&ctx, IntegerType::I8, 0xff).unwrap();
    assert_eq!(minus_one, all_ones);
    assert_eq!(ctx.num_records(AttrKind::Integer), 1);

    let err = IntegerAttr::get(&ctx, IntegerType::I8, 256).unwrap_err();
    assert!(err.reason.is_malformed_key());
    assert_eq!(
        err.reason.to_string(),
        "expected a value representable as i8 (got 256) for integer attribute"
    );

    let ui8 = IntegerType::new(8, Signedness::Unsigned).unwrap();
    assert!(IntegerAttr::get(&ctx, ui8, -1).is_err());
    assert_eq!(ctx.num_records(AttrKind::Integer), 1);
}

#[test]
fn repeated_requests_do_not_allocate() {
    let ctx = Context::new();
    let first = VerCapExtAttr::get(&ctx, Version::V1_0, &[Capability::Shader], &[]).unwrap();
    let after_one = ctx.total_records();

    for _ in 0..100 {
        let again = VerCapExtAttr::get(&ctx, Version::V1_0, &[Capability::Shader], &[]).unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(ctx.total_records(), after_one);
    assert_eq!(ctx.num_records(AttrKind::VerCapExt), 1);
}

#[test]
fn rejected_keys_leave_the_tables_untouched() {
    let ctx = Context::new();
    let accepted = InterfaceVarAbiAttr::get(&ctx, 0, 1, Some(StorageClass::StorageBuffer)).unwrap();

    let set = IntegerAttr::get_i32(&ctx, 0);
    let binding = IntegerAttr::get_i32(&ctx, 1);
    let bogus = IntegerAttr::get_i32(&ctx, 9999);
    let before = ctx.total_records();

    let location = Location::unknown();
    for _ in 0..3 {
        let err = InterfaceVarAbiAttr::get_from_attrs(&ctx, &location, set, binding, Some(bogus))
            .unwrap_err();
        assert!(err.reason.is_unknown_enum_value());
    }
    assert_eq!(ctx.total_records(), before);

    // previously accepted keys are unaffected
    let again = InterfaceVarAbiAttr::get(&ctx, 0, 1, Some(StorageClass::StorageBuffer)).unwrap();
    assert_eq!(again, accepted);
    assert_eq!(again.storage_class(), Some(StorageClass::StorageBuffer));

    // and so are new, valid keys
    let other = InterfaceVarAbiAttr::get(&ctx, 0, 2, None).unwrap();
    assert_ne!(other, accepted);
    assert_eq!(ctx.num_records(AttrKind::InterfaceVarAbi), 2);
}

#[test]
fn dictionaries_are_sorted_and_unique() {
    let ctx = Context::new();
    let one: Attribute = IntegerAttr::get_i32(&ctx, 1).into();
    let two: Attribute = IntegerAttr::get_i32(&ctx, 2).into();

    let dict = DictionaryAttr::get(&ctx, [("zeta", one), ("alpha", two)]).unwrap();
    let names: Vec<_> = dict.entries().iter().map(|entry| entry.name.value()).collect();
    assert_eq!(names, ["alpha", "zeta"]);
    assert_eq!(dict.lookup("zeta"), Some(one));
    assert_eq!(dict.lookup("beta"), None);

    let err =
        DictionaryAttr::get(&ctx, [("alpha", one), ("zeta", one), ("alpha", two)]).unwrap_err();
    assert_eq!(
        err.reason.to_string(),
        "expected unique entry names (`alpha` is repeated) for dictionary"
    );
    assert_eq!(ctx.num_records(AttrKind::Dictionary), 1);
}

#[test]
fn identity_law_over_random_keys() {
    let ctx = Context::new();
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    let storage_classes: Vec<_> = StorageClass::iter().collect();
    let mut seen: HashMap<(u32, u32, Option<StorageClass>), InterfaceVarAbiAttr> = HashMap::new();

    for _ in 0..2000 {
        let set = rng.random_range(0..4u32);
        let binding = rng.random_range(0..8u32);
        let storage_class = rng
            .random_bool(0.75)
            .then(|| storage_classes[rng.random_range(0..storage_classes.len())]);

        let attr = InterfaceVarAbiAttr::get(&ctx, set, binding, storage_class).unwrap();
        assert_eq!(attr.descriptor_set(), set);
        assert_eq!(attr.binding(), binding);
        assert_eq!(attr.storage_class(), storage_class);

        let previous = *seen.entry((set, binding, storage_class)).or_insert(attr);
        assert_eq!(previous, attr);
    }

    // distinct keys never share a record
    let records: HashSet<_> = seen.values().copied().collect();
    assert_eq!(records.len(), seen.len());
    assert_eq!(ctx.num_records(AttrKind::InterfaceVarAbi), seen.len());
}

#[test]
fn extension_lists_keep_their_order() {
    let ctx = Context::new();
    let a = VerCapExtAttr::get(
        &ctx,
        Version::V1_5,
        &[],
        &[Extension::SPV_KHR_multiview, Extension::SPV_KHR_8bit_storage],
    )
    .unwrap();
    let b = VerCapExtAttr::get(
        &ctx,
        Version::V1_5,
        &[],
        &[Extension::SPV_KHR_8bit_storage, Extension::SPV_KHR_multiview],
    )
    .unwrap();
    assert_ne!(a, b);
    assert!(a.extensions().eq([Extension::SPV_KHR_multiview, Extension::SPV_KHR_8bit_storage]));
}
