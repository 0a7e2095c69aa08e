//! Section generators.
//!
//! A section is a pure function from a full family config to the files of
//! one output area. Each family registers its sections in a static table;
//! the assembler runs every entry and concatenates the results in table
//! order.
//!
//! Sections own disjoint path namespaces, read nothing but the config, and
//! build every file independently. Adding a section means adding one module
//! and one table row.

pub mod forms;
pub mod rbac;
pub mod support;
pub mod webapp;

use std::fmt;

use crate::domain::entities::FileRecord;

/// One registered output area of a template family.
pub struct Section<C: 'static> {
    pub name: &'static str,
    pub generate: fn(&C) -> Vec<FileRecord>,
}

impl<C> Section<C> {
    pub const fn new(name: &'static str, generate: fn(&C) -> Vec<FileRecord>) -> Self {
        Self { name, generate }
    }

    pub fn run(&self, config: &C) -> Vec<FileRecord> {
        (self.generate)(config)
    }
}

impl<C> fmt::Debug for Section<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section").field("name", &self.name).finish()
    }
}
