//! Operator-facing startup banner.
//! Summarizes the detected mode and the resolved mapping before any file
//! is mutated. The banner itself is rendered through the crate's own
//! substitution engine.

use std::fmt::Write;

use crate::config::Mode;
use crate::resolver::ReplacementMap;
use crate::substitute::apply;

const ANNOUNCEMENT: &str = r#"

## Target environment variables
_{TARGET_VAR_NAMES_PLACEHOLDER}_

## Sets of values
_{SETS_OF_VALUES}_

## Mode
_{MODE}_

"#;

/// Renders the startup banner for the given mode and resolved mapping.
pub fn render(map: &ReplacementMap, mode: Mode) -> String {
    let mut lines = String::new();
    for (key, value) in map {
        // writeln! into a String is infallible
        let _ = writeln!(lines, "{} = \"{}\"", key, value);
    }

    let mut context = ReplacementMap::new();
    context.insert("TARGET_VAR_NAMES_PLACEHOLDER".to_string(), lines);
    context.insert("SETS_OF_VALUES".to_string(), "N/A".to_string());
    context.insert("MODE".to_string(), mode.describe().to_string());

    apply(ANNOUNCEMENT, &context)
}
