//! Fixed tables the grammar derivation is seeded with.
//!
//! These are domain constants, not configuration: they name the scalar
//! primitives of the description language, the boxed types that stand in for
//! them, and the handful of rules the linker edits by exact path.

// ============================================================================
// SEED TABLES
// ============================================================================

/// Scalar primitives: `(path, grammar label)`.
pub const PRIMITIVES: &[(&str, &str)] = &[("int", "int"), ("float", "float"), ("boolean", "boolean")];

/// Boxed equivalents: `(path, simple name, grammar label)`.
///
/// The label is the one the boxed type shares with its primitive, so that
/// `java.lang.Integer` prints as `<int>`.
pub const PREDEFINED: &[(&str, &str, &str)] = &[
    ("java.lang.Integer", "Integer", "int"),
    ("java.lang.Float", "Float", "float"),
    ("java.lang.Boolean", "Boolean", "boolean"),
    ("java.lang.String", "String", "string"),
];

/// Named integer sentinels usable wherever an `int` is expected.
pub const APPLICATION_CONSTANTS: &[(&str, i64)] = &[
    ("Off", -1),
    ("End", -2),
    ("Undefined", -1),
    ("Infinity", 1_000_000_000),
];

/// Namespace the application constants are registered under.
pub const CONSTANTS_NAMESPACE: &str = "main.Constants";

/// Path of the primitive every integer-valued slot accepts.
pub const INT_PRIMITIVE: &str = "int";

/// Boxed path to unboxed primitive path.
pub fn unboxed_primitive(boxed_path: &str) -> Option<&'static str> {
    match boxed_path {
        "java.lang.Integer" => Some("int"),
        "java.lang.Float" => Some("float"),
        "java.lang.Boolean" => Some("boolean"),
        _ => None,
    }
}

// ============================================================================
// ROOTS
// ============================================================================

/// Namespace holding the game model.
pub const GAME_NAMESPACE: &str = "game";
/// Namespace holding the metadata model.
pub const METADATA_NAMESPACE: &str = "metadata";
/// Class every game description starts from.
pub const GAME_ROOT: &str = "game.Game";
/// Class every metadata block starts from.
pub const METADATA_ROOT: &str = "metadata.Metadata";

/// Name of static factory methods that count as constructors.
pub const FACTORY_METHOD: &str = "construct";

// ============================================================================
// CANONICALIZATION TABLES
// ============================================================================

/// Abstract function wrappers and the label they stand for once removed.
///
/// `IntFunction` arguments are shown as `<int>`, and so on.
pub const FUNCTION_WRAPPERS: &[(&str, &str)] = &[
    ("BooleanFunction", "Boolean"),
    ("IntFunction", "Int"),
    ("IntArrayFunction", "Ints"),
    ("FloatFunction", "Float"),
    ("RegionFunction", "Region"),
];

/// Package groups always listed after everything else.
pub const TRAILING_PACKAGE_GROUPS: &[&str] = &["game.functions", "game.util", "game.types"];

// ============================================================================
// LINKER TARGETS
// ============================================================================

/// Rule collecting every way of giving a direction.
pub const DIRECTION_RULE: &str = "game.util.directions.Direction";
/// Alternatives folded into [`DIRECTION_RULE`].
pub const DIRECTION_MEMBERS: &[&str] = &[
    "game.util.directions.AbsoluteDirection",
    "game.util.directions.RelativeDirection",
    "game.functions.directions.Directions",
];

/// Rule receiving the clauses of [`REGION_RULE`].
pub const SITES_RULE: &str = "game.functions.region.sites.Sites";
/// Rule folded into [`SITES_RULE`] and then retired.
pub const REGION_RULE: &str = "game.functions.region.sites.region.SitesRegion";

/// Base type of dimension functions, which also accept plain integers.
pub const DIM_FUNCTION: &str = "game.functions.dim.DimFunction";

/// Function bases kept visible even when nothing reaches them directly.
pub const FORCED_VISIBLE: &[&str] = &[
    "game.functions.range.RangeFunction",
    "game.functions.graph.GraphFunction",
];
