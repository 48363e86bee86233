//! Statements: a variable together with the properties constraining it

use crate::property::{TypeProperty, VarProperty};
use crate::token::TypeToken;
use crate::variable::Variable;
use serde::{Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

struct Node {
    property: VarProperty,
    hash: u64,
    prev: Option<Arc<Node>>,
}

fn property_hash(property: &VarProperty) -> u64 {
    let mut hasher = DefaultHasher::new();
    property.hash(&mut hasher);
    hasher.finish()
}

/// Persistent, insertion-ordered list of properties
///
/// Appending allocates a single node and shares every earlier node with the
/// list it was appended to. Each node caches its property's hash. Appending
/// scans the list for an equal property, so building a statement of `n`
/// properties costs O(n²) comparisons of cached hashes; this list is sized
/// for schema statements, not bulk data. Equality indexes one side by hash
/// and is linear.
#[derive(Clone, Default)]
pub struct Properties {
    head: Option<Arc<Node>>,
    len: usize,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, property: &VarProperty) -> bool {
        self.contains_hashed(property, property_hash(property))
    }

    fn contains_hashed(&self, property: &VarProperty, hash: u64) -> bool {
        self.chain()
            .any(|node| node.hash == hash && &node.property == property)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::vec::IntoIter<&VarProperty> {
        let mut items: Vec<&VarProperty> = self.nodes().collect();
        items.reverse();
        items.into_iter()
    }

    /// Return a list with `property` appended, or a clone of this one if an
    /// equal property is already present
    fn with(&self, property: VarProperty) -> Self {
        let hash = property_hash(&property);
        if self.contains_hashed(&property, hash) {
            tracing::trace!("Skipping duplicate property `{}`", property);
            return self.clone();
        }
        Self {
            head: Some(Arc::new(Node {
                property,
                hash,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    // Newest first.
    fn chain(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.prev.as_deref())
    }

    fn nodes(&self) -> impl Iterator<Item = &VarProperty> {
        self.chain().map(|node| &node.property)
    }
}

impl Drop for Properties {
    // Unlink iteratively; the default drop recurses once per node.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a VarProperty;
    type IntoIter = std::vec::IntoIter<&'a VarProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// A variable and the properties attached to it
///
/// Two statements are equal when they carry the same set of properties and,
/// if either variable was named by the user, the same variable. Anonymous
/// variable names never take part in identity.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    var: Variable,
    properties: Properties,
}

impl Statement {
    /// Create a statement with no properties
    pub fn new(var: Variable) -> Self {
        Self {
            var,
            properties: Properties::new(),
        }
    }

    pub fn var(&self) -> &Variable {
        &self.var
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Label from the `type` property, if any
    pub fn label(&self) -> Option<&str> {
        self.properties.iter().find_map(|p| match p {
            VarProperty::Type(t) => Some(t.label()),
            _ => None,
        })
    }

    /// Return a new statement with `property` appended
    pub fn with_property(&self, property: VarProperty) -> Self {
        tracing::trace!("Appending `{}` to {}", property, self.var);
        Self {
            var: self.var.clone(),
            properties: self.properties.with(property),
        }
    }

    /// This statement followed by every statement nested in its properties,
    /// depth first
    pub fn inner_statements(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(statement) = stack.pop() {
            out.push(statement);
            let mut nested: Vec<&Statement> = statement
                .properties
                .iter()
                .flat_map(|p| p.statements())
                .collect();
            nested.reverse();
            stack.extend(nested);
        }
        out
    }

    /// Short form used when this statement is referenced by another one
    pub fn printable_name(&self) -> String {
        if self.var.is_user_defined() {
            return self.var.to_string();
        }
        match (self.properties.len(), self.label()) {
            (1, Some(label)) => label.to_string(),
            _ => self.body(),
        }
    }

    fn body(&self) -> String {
        let props = self
            .properties
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match (self.var.is_user_defined(), props.is_empty()) {
            (_, true) => self.var.to_string(),
            (true, false) => format!("{} {}", self.var, props),
            (false, false) => props,
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        if (self.var.is_user_defined() || other.var.is_user_defined()) && self.var != other.var {
            return false;
        }
        if self.properties.len() != other.properties.len() {
            return false;
        }
        let mut index: HashMap<u64, Vec<&VarProperty>> =
            HashMap::with_capacity(other.properties.len());
        for node in other.properties.chain() {
            index.entry(node.hash).or_default().push(&node.property);
        }
        self.properties.chain().all(|node| {
            index
                .get(&node.hash)
                .map_or(false, |bucket| bucket.contains(&&node.property))
        })
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.var.is_user_defined() {
            self.var.hash(state);
        }
        // Order-independent, matching set equality of properties
        let combined = self
            .properties
            .chain()
            .fold(0u64, |acc, node| acc.wrapping_add(node.hash));
        state.write_usize(self.properties.len());
        state.write_u64(combined);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.body())
    }
}

/// A statement describing a schema type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StatementType(Statement);

impl StatementType {
    /// Create a type statement with no properties
    pub fn new(var: Variable) -> Self {
        Self(Statement::new(var))
    }

    /// Anonymous type statement matching the given label
    pub fn labelled(label: impl Into<TypeProperty>) -> Self {
        Self(Statement::new(Variable::anonymous()).with_property(VarProperty::Type(label.into())))
    }

    pub fn as_statement(&self) -> &Statement {
        &self.0
    }

    pub fn into_statement(self) -> Statement {
        self.0
    }

    pub(crate) fn with_property(&self, property: VarProperty) -> Self {
        Self(self.0.with_property(property))
    }
}

impl Deref for StatementType {
    type Target = Statement;

    fn deref(&self) -> &Statement {
        &self.0
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<StatementType> for Statement {
    fn from(statement: StatementType) -> Self {
        statement.0
    }
}

impl From<Variable> for StatementType {
    fn from(var: Variable) -> Self {
        Self::new(var)
    }
}

impl From<&str> for StatementType {
    fn from(label: &str) -> Self {
        Self::labelled(label)
    }
}

impl From<String> for StatementType {
    fn from(label: String) -> Self {
        Self::labelled(label)
    }
}

impl From<TypeToken> for StatementType {
    fn from(token: TypeToken) -> Self {
        Self::labelled(token)
    }
}
