// Constants for the Kconfig parser

/// Root file parsed when no file name is given on the command line
pub const DEFAULT_ROOT_FILE: &str = "Kconfig.test";

/// Prefix required on the left-hand side of an assignment
pub const CONFIG_PREFIX: &str = "CONFIG_";

/// Default limit on `!`/parenthesis nesting inside one expression
pub const MAX_EXPRESSION_DEPTH: usize = 128;

/// Default limit on `source`/`include` nesting
pub const MAX_INCLUDE_DEPTH: usize = 64;
