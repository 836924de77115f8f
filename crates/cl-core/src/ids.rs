//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and as
//! deterministic sort tie-breakers.  The inner integer is `pub`; prefer the
//! `.index()` helper when indexing SoA `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in SoA storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a container in the world's container table.
    pub struct ContainerId(u32);
}

typed_id! {
    /// Opaque item kind.  What a kind *is* belongs to the external catalog.
    pub struct ItemKind(u32);
}

typed_id! {
    /// Profession / role an agent can hold (used by recipient discovery).
    pub struct RoleId(u16);
}

typed_id! {
    /// Identifier of a transformation rule in a catalog.
    pub struct RuleId(u32);
}

typed_id! {
    /// Output category a transformation rule belongs to (e.g. "baking").
    pub struct CategoryId(u16);
}

typed_id! {
    /// Named group of item kinds (ores, fuels, seeds …) resolved by the catalog.
    pub struct TagId(u16);
}
