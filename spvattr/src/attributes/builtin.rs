//! Built-in attribute kinds
//!
//! Scalar and aggregate attributes the SPIR-V composite attributes are built
//! from:
//! - [`IntegerAttr`]: a fixed-width integer typed by an [`IntegerType`].
//! - [`StringAttr`]: a string.
//! - [`ArrayAttr`]: an ordered list of attributes.
//! - [`DictionaryAttr`]: named attributes, kept sorted by name.
use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
};

use strum::EnumIs;

use crate::{
    attributes::{AttrKind, Attribute, attr_view},
    context::Context,
    error::{AttrResult, VerifyError},
    location::Location,
    storage::{AttributeStorage, StorageTable},
};

/// Signedness semantics of an [`IntegerType`].
///
/// Signless integers carry no sign; operations interpret the bits as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
pub enum Signedness {
    Signless,
    Signed,
    Unsigned,
}

/// Represents an integer type with a specific bit width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntegerType {
    num_bits: u32,
    signedness: Signedness,
}

impl IntegerType {
    /// Common signless integer types.
    pub const I1: Self = Self::signless_unchecked(1);
    pub const I8: Self = Self::signless_unchecked(8);
    pub const I16: Self = Self::signless_unchecked(16);
    pub const I32: Self = Self::signless_unchecked(32);
    pub const I64: Self = Self::signless_unchecked(64);
    pub const MIN_BITS: u32 = 1;
    pub const MAX_BITS: u32 = 64;

    #[inline]
    const fn check_validity(num_bits: u32) -> bool {
        num_bits >= Self::MIN_BITS && num_bits <= Self::MAX_BITS
    }

    const fn signless_unchecked(num_bits: u32) -> Self {
        Self {
            num_bits,
            signedness: Signedness::Signless,
        }
    }

    /// Creates a new `IntegerType`, or `None` if `num_bits` is outside of
    /// `MIN_BITS..=MAX_BITS`.
    #[inline]
    pub const fn new(num_bits: u32, signedness: Signedness) -> Option<Self> {
        if Self::check_validity(num_bits) {
            Some(Self { num_bits, signedness })
        } else {
            None
        }
    }

    #[inline]
    pub const fn signless(num_bits: u32) -> Option<Self> {
        Self::new(num_bits, Signedness::Signless)
    }

    #[inline]
    pub const fn num_bits(&self) -> u32 {
        self.num_bits
    }

    #[inline]
    pub const fn signedness(&self) -> Signedness {
        self.signedness
    }

    /// Returns `true` if this is a signless integer of exactly `width` bits.
    #[inline]
    pub const fn is_signless_integer(&self, width: u32) -> bool {
        matches!(self.signedness, Signedness::Signless) && self.num_bits == width
    }

    /// Mask selecting the `num_bits` low bits of a `u64`.
    #[inline]
    pub const fn mask(&self) -> u64 {
        if self.num_bits == 64 {
            u64::MAX
        } else {
            (1u64 << self.num_bits) - 1
        }
    }

    /// Smallest value accepted by [`IntegerAttr::get`] for this type.
    ///
    /// Signless integers accept the union of the signed and unsigned ranges.
    pub const fn min_value(&self) -> i128 {
        match self.signedness {
            Signedness::Unsigned => 0,
            Signedness::Signless | Signedness::Signed => -(1i128 << (self.num_bits - 1)),
        }
    }

    /// Largest value accepted by [`IntegerAttr::get`] for this type.
    pub const fn max_value(&self) -> i128 {
        match self.signedness {
            Signedness::Signed => (1i128 << (self.num_bits - 1)) - 1,
            Signedness::Signless | Signedness::Unsigned => (1i128 << self.num_bits) - 1,
        }
    }

    #[inline]
    pub const fn can_represent(&self, value: i128) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signedness {
            Signedness::Signless => write!(f, "i{}", self.num_bits),
            Signedness::Signed => write!(f, "si{}", self.num_bits),
            Signedness::Unsigned => write!(f, "ui{}", self.num_bits),
        }
    }
}

// === IntegerAttr ===

#[derive(Debug)]
pub struct IntegerStorage {
    ty: IntegerType,
    bits: u64,
}

/// Lookup key of an [`IntegerAttr`].
///
/// Values are identified by their bit pattern truncated to the width of the
/// type, so `-1` and `255` name the same `i8` attribute.
#[derive(Debug, Clone, Copy)]
pub struct IntegerKey {
    pub ty: IntegerType,
    pub value: i128,
}

impl IntegerKey {
    fn bits(&self) -> u64 {
        (self.value as u64) & self.ty.mask()
    }
}

impl Hash for IntegerKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.bits().hash(state);
    }
}

impl<'ctx> AttributeStorage<'ctx> for IntegerStorage {
    type Key = IntegerKey;
    type Error = VerifyError;
    const KIND: AttrKind = AttrKind::Integer;

    fn verify(key: &IntegerKey) -> Result<(), VerifyError> {
        if key.ty.can_represent(key.value) {
            Ok(())
        } else {
            Err(VerifyError::MalformedKey {
                field: "integer attribute",
                expected: format!("a value representable as {} (got {})", key.ty, key.value),
            })
        }
    }

    fn matches(&self, key: &IntegerKey) -> bool {
        // Out of range keys must reach `verify`, whatever they truncate to
        self.ty == key.ty && key.ty.can_represent(key.value) && self.bits == key.bits()
    }

    fn construct(key: IntegerKey) -> Self {
        Self {
            ty: key.ty,
            bits: key.bits(),
        }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.integers
    }
}

impl IntegerStorage {
    fn sext_value(&self) -> i64 {
        let shift = 64 - self.ty.num_bits();
        ((self.bits << shift) as i64) >> shift
    }
}

impl fmt::Display for IntegerStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.signedness().is_unsigned() {
            write!(f, "{} : {}", self.bits, self.ty)
        } else {
            write!(f, "{} : {}", self.sext_value(), self.ty)
        }
    }
}

attr_view! {
    /// A fixed-width integer attribute.
    IntegerAttr<'ctx> => IntegerStorage, Integer
}

impl<'ctx> IntegerAttr<'ctx> {
    /// Get or create the integer attribute `value : ty`.
    ///
    /// Fails with [`VerifyError::MalformedKey`] if `value` is not representable
    /// in `ty`.
    pub fn get(ctx: &'ctx Context<'ctx>, ty: IntegerType, value: i128) -> AttrResult<Self> {
        Self::get_checked(ctx, &Location::unknown(), ty, value)
    }

    pub fn get_checked(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        ty: IntegerType,
        value: i128,
    ) -> AttrResult<Self> {
        ctx.get_or_create::<IntegerStorage>(location, IntegerKey { ty, value })
            .map(Self)
    }

    /// Get or create a signless 32-bit integer attribute.
    pub fn get_i32(ctx: &'ctx Context<'ctx>, value: i32) -> Self {
        Self::get(ctx, IntegerType::I32, value.into())
            .expect("every i32 is representable as a signless i32")
    }

    pub fn ty(self) -> IntegerType {
        self.0.ty
    }

    /// The value, zero-extended from the width of the type.
    pub fn zext_value(self) -> u64 {
        self.0.bits
    }

    /// The value, sign-extended from the width of the type.
    pub fn sext_value(self) -> i64 {
        self.0.sext_value()
    }

    /// The zero-extended value if it fits in a `u32`, the domain of the
    /// numeric codes of closed enumerations.
    pub fn code(self) -> Option<u32> {
        u32::try_from(self.zext_value()).ok()
    }
}

// === StringAttr ===

#[derive(Debug)]
pub struct StringStorage {
    value: Box<str>,
}

impl<'ctx> AttributeStorage<'ctx> for StringStorage {
    type Key = String;
    type Error = Infallible;
    const KIND: AttrKind = AttrKind::String;

    fn verify(_: &String) -> Result<(), Infallible> {
        Ok(())
    }

    fn matches(&self, key: &String) -> bool {
        *self.value == **key
    }

    fn construct(key: String) -> Self {
        Self {
            value: key.into_boxed_str(),
        }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.strings
    }
}

impl fmt::Display for StringStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.value)
    }
}

attr_view! {
    /// An interned string attribute.
    StringAttr<'ctx> => StringStorage, String
}

impl<'ctx> StringAttr<'ctx> {
    pub fn get(ctx: &'ctx Context<'ctx>, value: impl Into<String>) -> Self {
        Self(ctx.intern::<StringStorage>(value.into()))
    }

    pub fn value(self) -> &'ctx str {
        &self.0.value
    }
}

// === ArrayAttr ===

#[derive(Debug)]
pub struct ArrayStorage<'ctx> {
    elements: Box<[Attribute<'ctx>]>,
}

impl<'ctx> AttributeStorage<'ctx> for ArrayStorage<'ctx> {
    type Key = Vec<Attribute<'ctx>>;
    type Error = Infallible;
    const KIND: AttrKind = AttrKind::Array;

    fn verify(_: &Self::Key) -> Result<(), Infallible> {
        Ok(())
    }

    fn matches(&self, key: &Self::Key) -> bool {
        *self.elements == **key
    }

    fn construct(key: Self::Key) -> Self {
        Self {
            elements: key.into_boxed_slice(),
        }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.arrays
    }
}

impl fmt::Display for ArrayStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

attr_view! {
    /// An ordered list of attributes.
    ArrayAttr<'ctx> => ArrayStorage<'ctx>, Array
}

impl<'ctx> ArrayAttr<'ctx> {
    pub fn get(
        ctx: &'ctx Context<'ctx>,
        elements: impl IntoIterator<Item = Attribute<'ctx>>,
    ) -> Self {
        Self(ctx.intern::<ArrayStorage<'ctx>>(elements.into_iter().collect()))
    }

    pub fn elements(self) -> &'ctx [Attribute<'ctx>] {
        &self.0.elements
    }

    pub fn iter(
        self,
    ) -> impl DoubleEndedIterator<Item = Attribute<'ctx>> + ExactSizeIterator + Clone + 'ctx {
        self.0.elements.iter().copied()
    }

    pub fn len(self) -> usize {
        self.0.elements.len()
    }

    pub fn is_empty(self) -> bool {
        self.0.elements.is_empty()
    }
}

// === DictionaryAttr ===

/// An attribute paired with its name inside a [`DictionaryAttr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedAttribute<'ctx> {
    pub name: StringAttr<'ctx>,
    pub value: Attribute<'ctx>,
}

#[derive(Debug)]
pub struct DictionaryStorage<'ctx> {
    entries: Box<[NamedAttribute<'ctx>]>,
}

impl<'ctx> AttributeStorage<'ctx> for DictionaryStorage<'ctx> {
    /// Entries sorted by name.
    type Key = Vec<NamedAttribute<'ctx>>;
    type Error = VerifyError;
    const KIND: AttrKind = AttrKind::Dictionary;

    fn verify(key: &Self::Key) -> Result<(), VerifyError> {
        match key.windows(2).find(|pair| pair[0].name == pair[1].name) {
            Some(pair) => Err(VerifyError::MalformedKey {
                field: "dictionary",
                expected: format!("unique entry names (`{}` is repeated)", pair[0].name.value()),
            }),
            None => Ok(()),
        }
    }

    fn matches(&self, key: &Self::Key) -> bool {
        *self.entries == **key
    }

    fn construct(key: Self::Key) -> Self {
        Self {
            entries: key.into_boxed_slice(),
        }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.dictionaries
    }
}

impl fmt::Display for DictionaryStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", entry.name.value(), entry.value)?;
        }
        write!(f, "}}")
    }
}

attr_view! {
    /// Named attributes sorted by name, with unique names.
    DictionaryAttr<'ctx> => DictionaryStorage<'ctx>, Dictionary
}

impl<'ctx> DictionaryAttr<'ctx> {
    /// Get or create the dictionary holding `entries`, in any order.
    ///
    /// Example:
    /// ```rust
    /// # use spvattr::{Attribute, Context, attributes::{DictionaryAttr, IntegerAttr}};
    /// let ctx = Context::new();
    /// let one: Attribute = IntegerAttr::get_i32(&ctx, 1).into();
    /// let two: Attribute = IntegerAttr::get_i32(&ctx, 2).into();
    /// let a = DictionaryAttr::get(&ctx, [("b", two), ("a", one)]).unwrap();
    /// let b = DictionaryAttr::get(&ctx, [("a", one), ("b", two)]).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.lookup("b"), Some(two));
    /// ```
    pub fn get<'a>(
        ctx: &'ctx Context<'ctx>,
        entries: impl IntoIterator<Item = (&'a str, Attribute<'ctx>)>,
    ) -> AttrResult<Self> {
        Self::get_checked(ctx, &Location::unknown(), entries)
    }

    pub fn get_checked<'a>(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        entries: impl IntoIterator<Item = (&'a str, Attribute<'ctx>)>,
    ) -> AttrResult<Self> {
        let entries = entries
            .into_iter()
            .map(|(name, value)| NamedAttribute {
                name: StringAttr::get(ctx, name),
                value,
            })
            .collect();
        Self::get_from_named(ctx, location, entries)
    }

    /// Get or create the dictionary from already interned names.
    pub fn get_from_named(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        mut entries: Vec<NamedAttribute<'ctx>>,
    ) -> AttrResult<Self> {
        entries.sort_by(|a, b| a.name.value().cmp(b.name.value()));
        ctx.get_or_create::<DictionaryStorage<'ctx>>(location, entries)
            .map(Self)
    }

    pub fn entries(self) -> &'ctx [NamedAttribute<'ctx>] {
        &self.0.entries
    }

    /// Returns the value named `name`, if any.
    pub fn lookup(self, name: &str) -> Option<Attribute<'ctx>> {
        self.0
            .entries
            .binary_search_by(|entry| entry.name.value().cmp(name))
            .ok()
            .map(|index| self.0.entries[index].value)
    }

    pub fn len(self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(self) -> bool {
        self.0.entries.is_empty()
    }
}
