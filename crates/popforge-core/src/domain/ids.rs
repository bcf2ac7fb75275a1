//! Stable identifiers for projection elements.

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the raw index.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a parameter instance within its projection.
    ParameterInstanceId,
    "instance"
);

id_type!(
    /// Identifies a set type within its projection.
    SetTypeId,
    "set-type"
);

id_type!(
    /// Identifies a set within its projection.
    SetId,
    "set"
);

impl SetTypeId {
    /// Id of the implicit set type holding every ungrouped instance.
    pub const DEFAULT: SetTypeId = SetTypeId(usize::MAX);

    /// Returns true for the implicit default set type.
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl SetId {
    /// Id of the single set of the default set type.
    pub const DEFAULT: SetId = SetId(usize::MAX);
}
