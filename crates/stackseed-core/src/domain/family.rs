use std::collections::BTreeMap;

use crate::domain::config::FullConfig;
use crate::domain::generators::Section;
use crate::domain::merge::Merge;
use crate::domain::value_objects::TemplateKind;

/// A template family: one full config type plus everything the assembler
/// needs to turn it into files.
pub trait TemplateFamily: Merge + Into<FullConfig> + Sized + 'static {
    const KIND: TemplateKind;

    /// Fully-populated fallback config.
    fn defaults() -> Self;

    /// Registered sections, in output order.
    fn sections() -> &'static [Section<Self>];

    /// `package.json` scripts, keyed by script name.
    fn package_scripts(&self) -> BTreeMap<String, String>;

    /// Ordered human-readable setup steps.
    fn instructions(&self) -> Vec<String>;
}
