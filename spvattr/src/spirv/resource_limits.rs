use std::fmt;

use smallvec::SmallVec;

use crate::{
    attributes::{ArrayAttr, Attribute, DictionaryAttr, IntegerAttr},
    context::Context,
    error::{AttrResult, VerifyError},
    location::Location,
    magic::{
        DEFAULT_MAX_COMPUTE_WORKGROUP_INVOCATIONS, DEFAULT_MAX_COMPUTE_WORKGROUP_SIZE,
        MAX_COMPUTE_WORKGROUP_INVOCATIONS, MAX_COMPUTE_WORKGROUP_SIZE,
    },
};

/// Resource limits of a target environment.
///
/// A resource-limits attribute is a [`DictionaryAttr`] with exactly the
/// entries
/// - `max_compute_workgroup_invocations`: a signless 32-bit integer,
/// - `max_compute_workgroup_size`: an array of signless 32-bit integers.
///
/// Any other dictionary, including one with extra entries, is not a
/// resource-limits attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceLimitsAttr<'ctx>(DictionaryAttr<'ctx>);

fn is_i32(attr: Attribute<'_>) -> bool {
    attr.try_as_integer()
        .is_some_and(|int| int.ty().is_signless_integer(32))
}

impl<'ctx> ResourceLimitsAttr<'ctx> {
    pub fn get(
        ctx: &'ctx Context<'ctx>,
        max_compute_workgroup_invocations: IntegerAttr<'ctx>,
        max_compute_workgroup_size: ArrayAttr<'ctx>,
    ) -> AttrResult<Self> {
        Self::get_checked(
            ctx,
            &Location::unknown(),
            max_compute_workgroup_invocations,
            max_compute_workgroup_size,
        )
    }

    /// Get or create the limits, failing with a diagnostic at `location` if
    /// the fields do not have the expected shape.
    pub fn get_checked(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        max_compute_workgroup_invocations: IntegerAttr<'ctx>,
        max_compute_workgroup_size: ArrayAttr<'ctx>,
    ) -> AttrResult<Self> {
        // Shapes are checked up front so that a rejection interns nothing
        if !is_i32(max_compute_workgroup_invocations.into())
            || !max_compute_workgroup_size.iter().all(is_i32)
        {
            return Err(ctx.reject(location, VerifyError::KindMismatch {
                field: "resource limits",
                expected: "32-bit integers",
                found: format!(
                    "{MAX_COMPUTE_WORKGROUP_INVOCATIONS} = {max_compute_workgroup_invocations}, \
                     {MAX_COMPUTE_WORKGROUP_SIZE} = {max_compute_workgroup_size}"
                ),
            }));
        }

        let dict = DictionaryAttr::get_checked(
            ctx,
            location,
            [
                (
                    MAX_COMPUTE_WORKGROUP_INVOCATIONS,
                    Attribute::from(max_compute_workgroup_invocations),
                ),
                (MAX_COMPUTE_WORKGROUP_SIZE, Attribute::from(max_compute_workgroup_size)),
            ],
        )?;

        Self::dyn_cast(dict.into()).ok_or_else(|| {
            ctx.reject(location, VerifyError::KindMismatch {
                field: "resource limits",
                expected: "32-bit integers",
                found: dict.to_string(),
            })
        })
    }

    /// Get or create the limits from plain values.
    pub fn from_values(
        ctx: &'ctx Context<'ctx>,
        max_compute_workgroup_invocations: i32,
        max_compute_workgroup_size: &[i32],
    ) -> Self {
        let size: SmallVec<[Attribute<'ctx>; 3]> = max_compute_workgroup_size
            .iter()
            .map(|&dim| IntegerAttr::get_i32(ctx, dim).into())
            .collect();
        Self::get(
            ctx,
            IntegerAttr::get_i32(ctx, max_compute_workgroup_invocations),
            ArrayAttr::get(ctx, size),
        )
        .expect("signless 32-bit fields always form resource limits")
    }

    /// Limits assumed when a target does not specify any.
    pub fn default_limits(ctx: &'ctx Context<'ctx>) -> Self {
        Self::from_values(
            ctx,
            DEFAULT_MAX_COMPUTE_WORKGROUP_INVOCATIONS,
            &DEFAULT_MAX_COMPUTE_WORKGROUP_SIZE,
        )
    }

    /// Returns `true` if `dict` has exactly the resource-limits schema.
    pub fn classof(dict: DictionaryAttr<'ctx>) -> bool {
        let [invocations, size] = dict.entries() else {
            return false;
        };

        invocations.name.value() == MAX_COMPUTE_WORKGROUP_INVOCATIONS
            && is_i32(invocations.value)
            && size.name.value() == MAX_COMPUTE_WORKGROUP_SIZE
            && size
                .value
                .try_as_array()
                .is_some_and(|size| size.iter().all(is_i32))
    }

    /// Checked downcast from an erased attribute.
    pub fn dyn_cast(attr: Attribute<'ctx>) -> Option<Self> {
        attr.try_as_dictionary()
            .filter(|&dict| Self::classof(dict))
            .map(Self)
    }

    pub fn max_compute_workgroup_invocations(self) -> IntegerAttr<'ctx> {
        self.0.entries()[0]
            .value
            .try_as_integer()
            .expect("resource limits schema is checked on creation")
    }

    pub fn max_compute_workgroup_size(self) -> ArrayAttr<'ctx> {
        self.0.entries()[1]
            .value
            .try_as_array()
            .expect("resource limits schema is checked on creation")
    }

    /// The maximum workgroup size, one entry per dimension.
    pub fn workgroup_size(self) -> impl Iterator<Item = i32> + ExactSizeIterator + Clone + 'ctx {
        self.max_compute_workgroup_size()
            .iter()
            .map(|dim| {
                dim.try_as_integer()
                    .expect("resource limits schema is checked on creation")
                    .sext_value() as i32
            })
    }

    pub fn as_dictionary(self) -> DictionaryAttr<'ctx> {
        self.0
    }
}

impl<'ctx> From<ResourceLimitsAttr<'ctx>> for Attribute<'ctx> {
    fn from(value: ResourceLimitsAttr<'ctx>) -> Self {
        Attribute::Dictionary(value.0)
    }
}

impl fmt::Display for ResourceLimitsAttr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
