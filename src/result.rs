//! Aggregate result of a parse invocation.
//!
//! A [`ParseResult`] is populated incrementally by the producing parser
//! through the `add_*` methods, then queried read-only. Nothing enforces
//! that boundary beyond `&mut self` vs `&self`; callers own the
//! freeze-after-build discipline.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SqlMetaError;
use crate::model::{SqlObject, SqlStatement, SqlTrigger};

/// The outcome of parsing SQL text: statements, per-kind object
/// collections, a dependency graph between object names, and the
/// success/error status reported by the producer.
///
/// This type never originates failures itself. `success == false` together
/// with a non-empty `errors` list is the sole failure carrier, and every
/// query degrades to an empty collection or `None` rather than erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    #[serde(default)]
    pub statements: Vec<SqlStatement>,
    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(default)]
    pub tables: Vec<SqlObject>,
    #[serde(default)]
    pub views: Vec<SqlObject>,
    #[serde(default)]
    pub indexes: Vec<SqlObject>,
    #[serde(default)]
    pub sequences: Vec<SqlObject>,
    #[serde(default)]
    pub procedures: Vec<SqlObject>,
    #[serde(default)]
    pub triggers: Vec<SqlTrigger>,
    /// Functions share the procedure shape.
    #[serde(default)]
    pub functions: Vec<SqlObject>,
    #[serde(default)]
    pub synonyms: Vec<SqlObject>,
    #[serde(default)]
    pub user_defined_types: Vec<SqlObject>,
    #[serde(default)]
    pub packages: Vec<SqlObject>,
    #[serde(default)]
    pub events: Vec<SqlObject>,
    #[serde(default)]
    pub extensions: Vec<SqlObject>,
    #[serde(default)]
    pub foreign_data_wrappers: Vec<SqlObject>,
    #[serde(default)]
    pub foreign_servers: Vec<SqlObject>,
    #[serde(default)]
    pub partitions: Vec<SqlObject>,
    #[serde(default)]
    pub database_links: Vec<SqlObject>,

    /// Object name -> names it depends on, in first-insertion order.
    #[serde(default)]
    pub dependencies: IndexMap<String, Vec<String>>,
}

impl ParseResult {
    /// Creates an empty result with the given success flag.
    pub fn new(success: bool) -> Self {
        ParseResult {
            success,
            ..Default::default()
        }
    }

    /// Creates a failed result carrying the producer's error messages.
    pub fn failure(errors: Vec<String>) -> Self {
        ParseResult {
            success: false,
            errors,
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    // Build-phase operations

    pub fn add_statement(&mut self, statement: SqlStatement) {
        self.statements.push(statement);
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_table(&mut self, table: SqlObject) {
        self.tables.push(table);
    }

    pub fn add_view(&mut self, view: SqlObject) {
        self.views.push(view);
    }

    pub fn add_index(&mut self, index: SqlObject) {
        self.indexes.push(index);
    }

    pub fn add_sequence(&mut self, sequence: SqlObject) {
        self.sequences.push(sequence);
    }

    pub fn add_procedure(&mut self, procedure: SqlObject) {
        self.procedures.push(procedure);
    }

    /// Adds a trigger unless one with the same (name, table) pair is
    /// already recorded.
    pub fn add_trigger(&mut self, trigger: SqlTrigger) {
        let duplicate = self.triggers.iter().any(|existing| {
            existing.object.name == trigger.object.name
                && existing.table_name == trigger.table_name
        });
        if !duplicate {
            self.triggers.push(trigger);
        }
    }

    /// Adds a function unless one with the same (name, schema) pair is
    /// already recorded.
    pub fn add_function(&mut self, function: SqlObject) {
        let duplicate = self.functions.iter().any(|existing| {
            existing.name == function.name && existing.schema == function.schema
        });
        if !duplicate {
            self.functions.push(function);
        }
    }

    pub fn add_synonym(&mut self, synonym: SqlObject) {
        self.synonyms.push(synonym);
    }

    pub fn add_user_defined_type(&mut self, user_type: SqlObject) {
        self.user_defined_types.push(user_type);
    }

    pub fn add_package(&mut self, package: SqlObject) {
        self.packages.push(package);
    }

    pub fn add_event(&mut self, event: SqlObject) {
        self.events.push(event);
    }

    pub fn add_extension(&mut self, extension: SqlObject) {
        self.extensions.push(extension);
    }

    pub fn add_foreign_data_wrapper(&mut self, fdw: SqlObject) {
        self.foreign_data_wrappers.push(fdw);
    }

    pub fn add_foreign_server(&mut self, foreign_server: SqlObject) {
        self.foreign_servers.push(foreign_server);
    }

    pub fn add_partition(&mut self, partition: SqlObject) {
        self.partitions.push(partition);
    }

    pub fn add_database_link(&mut self, database_link: SqlObject) {
        self.database_links.push(database_link);
    }

    /// Records that `obj_name` depends on `depends_on`. Re-adding an edge
    /// is a no-op; edge order is first-insertion order.
    pub fn add_dependency(&mut self, obj_name: impl Into<String>, depends_on: impl Into<String>) {
        let deps = self.dependencies.entry(obj_name.into()).or_default();
        let depends_on = depends_on.into();
        if !deps.contains(&depends_on) {
            deps.push(depends_on);
        }
    }

    // Query-phase operations

    /// Finds a table by name, case-insensitively. First match in
    /// collection order wins.
    pub fn get_table(&self, name: &str) -> Option<&SqlObject> {
        let name_lower = name.to_lowercase();
        self.tables
            .iter()
            .find(|table| table.name.to_lowercase() == name_lower)
    }

    /// Finds a view by name, case-insensitively. First match in collection
    /// order wins.
    pub fn get_view(&self, name: &str) -> Option<&SqlObject> {
        let name_lower = name.to_lowercase();
        self.views
            .iter()
            .find(|view| view.name.to_lowercase() == name_lower)
    }

    /// All collected objects, concatenated in kind order: tables, views,
    /// indexes, sequences, procedures, triggers, functions, synonyms,
    /// user-defined types, packages, events, extensions.
    ///
    /// Known gap carried over from the original model: foreign data
    /// wrappers, foreign servers, partitions, and database links can be
    /// added but are not part of this concatenation.
    pub fn get_all_objects(&self) -> Vec<&SqlObject> {
        self.tables
            .iter()
            .chain(self.views.iter())
            .chain(self.indexes.iter())
            .chain(self.sequences.iter())
            .chain(self.procedures.iter())
            .chain(self.triggers.iter().map(|t| &t.object))
            .chain(self.functions.iter())
            .chain(self.synonyms.iter())
            .chain(self.user_defined_types.iter())
            .chain(self.packages.iter())
            .chain(self.events.iter())
            .chain(self.extensions.iter())
            .collect()
    }

    /// Names the given object depends on, or empty if none were recorded.
    pub fn get_dependencies_for(&self, obj_name: &str) -> &[String] {
        self.dependencies
            .get(obj_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the dependency graph contains at least one cycle.
    pub fn has_circular_dependencies(&self) -> bool {
        self.find_circular_dependency().is_some()
    }

    /// The first dependency cycle found, as the path of names with the
    /// repeated name closing the loop (`["a", "b", "a"]`), or `None` when
    /// the graph is acyclic.
    ///
    /// Depth-first search with an explicit stack, so dependency chains as
    /// deep as the object count cannot exhaust the call stack. Every graph
    /// key is a potential root; names that only appear as edge targets are
    /// visited through the keys that reach them.
    pub fn find_circular_dependency(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        static NO_DEPS: [String; 0] = [];

        let mut marks: HashMap<&str, Mark> = HashMap::new();

        for root in self.dependencies.keys() {
            if marks.contains_key(root.as_str()) {
                continue;
            }

            // Stack frames: (node, index of the next edge to follow).
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            let mut path: Vec<&str> = vec![root.as_str()];
            marks.insert(root.as_str(), Mark::InProgress);

            while let Some((node, next_edge)) = stack.last().copied() {
                let edges = self
                    .dependencies
                    .get(node)
                    .map(Vec::as_slice)
                    .unwrap_or(&NO_DEPS);

                if let Some(neighbor) = edges.get(next_edge) {
                    if let Some(frame) = stack.last_mut() {
                        frame.1 += 1;
                    }
                    match marks.get(neighbor.as_str()) {
                        Some(Mark::InProgress) => {
                            // Back-edge into the current path: cycle found.
                            let start = path
                                .iter()
                                .position(|n| *n == neighbor.as_str())
                                .unwrap_or(0);
                            let mut cycle: Vec<String> =
                                path[start..].iter().map(|n| n.to_string()).collect();
                            cycle.push(neighbor.clone());
                            return Some(cycle);
                        }
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(neighbor.as_str(), Mark::InProgress);
                            path.push(neighbor.as_str());
                            stack.push((neighbor.as_str(), 0));
                        }
                    }
                } else {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                    path.pop();
                }
            }
        }

        None
    }

    /// A human-readable, comma-joined list of non-zero counts, or
    /// `"Empty result"` when there is nothing to report.
    pub fn get_summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let mut push_count = |count: usize, label: &str| {
            if count > 0 {
                parts.push(format!("{} {}", count, label));
            }
        };

        push_count(self.statements.len(), "statements");
        push_count(self.tables.len(), "tables");
        push_count(self.views.len(), "views");
        push_count(self.indexes.len(), "indexes");
        push_count(self.sequences.len(), "sequences");
        push_count(self.procedures.len(), "procedures");
        push_count(self.triggers.len(), "triggers");
        push_count(self.functions.len(), "functions");
        push_count(self.synonyms.len(), "synonyms");
        push_count(self.user_defined_types.len(), "user-defined types");
        push_count(self.packages.len(), "packages");
        push_count(self.events.len(), "events");
        push_count(self.extensions.len(), "extensions");
        push_count(self.dependencies.len(), "dependencies");
        push_count(self.errors.len(), "errors");

        if parts.is_empty() {
            "Empty result".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Converts the result to a JSON value snapshot.
    pub fn to_value(&self) -> Result<Value, SqlMetaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstructs a result from a snapshot produced by [`Self::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SqlMetaError> {
        Ok(serde_json::from_value(value)?)
    }
}
