pub mod forward;
pub mod normalize;
pub mod strings;
pub mod template;

pub use forward::{environment_from_tree, scenario_from_tree, state_from_document};
pub use normalize::*;
pub use strings::{scenario_strings, strings_template, StringEntry};
pub use template::{environment_template, scenario_template, xml_escape};
