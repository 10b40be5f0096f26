//! Constants used throughout typegen

/// Placeholder identifier recognised when a template does not configure one
pub const DEFAULT_PLACEHOLDER: &str = "T__";

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["typegen.json", "typegen.yaml", "typegen.yml"];

/// Extension of template source files
pub const TEMPLATE_EXTENSION: &str = "go";

/// Separator between replacement pairs and between selection entries
pub const LIST_SEPARATOR: char = ',';

/// Separator between the two sides of a replacement pair
pub const PAIR_SEPARATOR: char = '=';

/// Separator between receiver type and method in a qualified name
pub const QUALIFIER_SEPARATOR: char = '.';

/// Joins the lower-cased concrete type name and the template file name
pub const OUTPUT_NAME_SEPARATOR: &str = "_";

/// Formatter looked up on `PATH` when a template configures none
pub const DEFAULT_FORMATTER: &str = "gofmt";

/// Go path environment lookup
pub mod env {
    pub const GOPATH: &str = "GOPATH";
    pub const GOROOT: &str = "GOROOT";
    pub const DEFAULT_GOPATH_DIR: &str = "go";
    pub const SOURCE_DIR: &str = "src";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
