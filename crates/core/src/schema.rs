//! Structural compatibility between JSON-Schema-like documents.
//!
//! Schemas are first compiled (checked by `jsonschema`, then lowered into a
//! [`SchemaNode`] tree) and compared by a pure recursive function. Two
//! comparison directions exist:
//!
//! - [`Direction::ContractSatisfaction`]: `a` is what a consumer expects,
//!   `b` is what a provider offers. The provider may carry extra properties.
//! - [`Direction::Evolution`]: `a` is the old schema, `b` the new one. The new
//!   schema may not change types, drop properties, or make a property newly
//!   required.
//!
//! Missing constraints are permissive: a schema without `type` or
//! `properties` cannot be violated.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Result type for schema compilation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while compiling a schema document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema (or a nested schema) is not an object or boolean.
    #[error("Schema at {path} must be an object or boolean")]
    NotAnObject { path: String },

    /// `type` names something other than a JSON type.
    #[error("Unknown type '{type_name}' at {path}")]
    UnknownType { path: String, type_name: String },

    /// `required` is not an array of strings.
    #[error("Invalid 'required' at {path}: expected an array of property names")]
    InvalidRequired { path: String },

    /// `properties` is not an object.
    #[error("Invalid 'properties' at {path}: expected an object")]
    InvalidProperties { path: String },

    /// The document failed JSON Schema compilation.
    #[error("Schema failed to compile: {0}")]
    Compile(String),
}

/// A JSON scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarType {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl ScalarType {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Whether a value of type `offered` is acceptable where `self` is expected.
    fn accepts(self, offered: ScalarType) -> bool {
        self == offered || (self == Self::Number && offered == Self::Integer)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: BTreeMap<String, SchemaNode>,
    pub required: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    pub items: Option<Box<SchemaNode>>,
}

/// Lowered form of a schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object(ObjectSchema),
    Array(ArraySchema),
    Scalar(ScalarType),
    /// `type: [a, b, ...]`, one single-type member per listed type.
    Union(Vec<SchemaNode>),
    /// No type constraint.
    Unknown,
}

impl SchemaNode {
    /// Lower a schema document without running `jsonschema` compilation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` for structurally malformed documents.
    pub fn from_value(schema: &Value) -> SchemaResult<Self> {
        lower(schema, "$")
    }

    pub fn type_name(&self) -> String {
        match self {
            Self::Object(_) => "object".to_string(),
            Self::Array(_) => "array".to_string(),
            Self::Scalar(scalar) => scalar.as_str().to_string(),
            Self::Union(members) => {
                let names: Vec<String> = members.iter().map(SchemaNode::type_name).collect();
                names.join(" | ")
            }
            Self::Unknown => "any".to_string(),
        }
    }
}

fn lower(schema: &Value, path: &str) -> SchemaResult<SchemaNode> {
    let map = match schema {
        Value::Null | Value::Bool(_) => return Ok(SchemaNode::Unknown),
        Value::Object(map) => map,
        _ => {
            return Err(SchemaError::NotAnObject {
                path: path.to_string(),
            })
        }
    };

    match map.get("type") {
        None => {
            if map.contains_key("properties") || map.contains_key("required") {
                lower_typed(map, "object", path)
            } else if map.contains_key("items") {
                lower_typed(map, "array", path)
            } else {
                Ok(SchemaNode::Unknown)
            }
        }
        Some(Value::String(type_name)) => lower_typed(map, type_name, path),
        Some(Value::Array(type_names)) => {
            let mut members = Vec::with_capacity(type_names.len());
            for type_name in type_names {
                let Value::String(type_name) = type_name else {
                    return Err(SchemaError::UnknownType {
                        path: path.to_string(),
                        type_name: type_name.to_string(),
                    });
                };
                members.push(lower_typed(map, type_name, path)?);
            }
            match members.len() {
                0 => Ok(SchemaNode::Unknown),
                1 => Ok(members.remove(0)),
                _ => Ok(SchemaNode::Union(members)),
            }
        }
        Some(other) => Err(SchemaError::UnknownType {
            path: path.to_string(),
            type_name: other.to_string(),
        }),
    }
}

fn lower_typed(map: &Map<String, Value>, type_name: &str, path: &str) -> SchemaResult<SchemaNode> {
    let node = match type_name {
        "object" => SchemaNode::Object(lower_object(map, path)?),
        "array" => {
            let items = match map.get("items") {
                Some(items @ Value::Object(_)) => {
                    Some(Box::new(lower(items, &format!("{path}[]"))?))
                }
                _ => None,
            };
            SchemaNode::Array(ArraySchema { items })
        }
        "string" => SchemaNode::Scalar(ScalarType::String),
        "number" => SchemaNode::Scalar(ScalarType::Number),
        "integer" => SchemaNode::Scalar(ScalarType::Integer),
        "boolean" => SchemaNode::Scalar(ScalarType::Boolean),
        "null" => SchemaNode::Scalar(ScalarType::Null),
        other => {
            return Err(SchemaError::UnknownType {
                path: path.to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(node)
}

fn lower_object(map: &Map<String, Value>, path: &str) -> SchemaResult<ObjectSchema> {
    let mut object = ObjectSchema::default();

    match map.get("properties") {
        None => {}
        Some(Value::Object(properties)) => {
            for (name, property) in properties {
                let node = lower(property, &format!("{path}.{name}"))?;
                object.properties.insert(name.clone(), node);
            }
        }
        Some(_) => {
            return Err(SchemaError::InvalidProperties {
                path: path.to_string(),
            })
        }
    }

    match map.get("required") {
        None => {}
        Some(Value::Array(names)) => {
            for name in names {
                let Value::String(name) = name else {
                    return Err(SchemaError::InvalidRequired {
                        path: path.to_string(),
                    });
                };
                object.required.insert(name.clone());
            }
        }
        Some(_) => {
            return Err(SchemaError::InvalidRequired {
                path: path.to_string(),
            })
        }
    }

    Ok(object)
}

/// A schema that passed `jsonschema` compilation, with its lowered tree.
pub struct CompiledSchema {
    node: SchemaNode,
    validator: Option<jsonschema::Validator>,
}

impl CompiledSchema {
    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` when `jsonschema` rejects the document,
    /// or a structural `SchemaError` when it cannot be lowered.
    pub fn compile(schema: &Value) -> SchemaResult<Self> {
        let validator = match schema {
            Value::Null => None,
            _ => Some(
                jsonschema::options()
                    .build(schema)
                    .map_err(|e| SchemaError::Compile(e.to_string()))?,
            ),
        };
        let node = SchemaNode::from_value(schema)?;
        Ok(Self { node, validator })
    }

    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// Validation messages for `instance`; empty when it conforms.
    pub fn instance_errors(&self, instance: &Value) -> Vec<String> {
        match &self.validator {
            Some(validator) => validator
                .iter_errors(instance)
                .map(|error| error.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// Per-call memoization of compiled schemas, keyed by schema content.
#[derive(Default)]
pub struct SchemaCache {
    compiled: HashMap<String, SchemaResult<Rc<CompiledSchema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `schema`, reusing an earlier compilation of identical content.
    ///
    /// # Errors
    ///
    /// Returns the (cached) compilation error for malformed schemas.
    pub fn compile(&mut self, schema: &Value) -> SchemaResult<Rc<CompiledSchema>> {
        self.compiled
            .entry(schema.to_string())
            .or_insert_with(|| CompiledSchema::compile(schema).map(Rc::new))
            .clone()
    }

    /// Compile both schemas and compare them in `direction`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if either schema is malformed.
    pub fn check(&mut self, a: &Value, b: &Value, direction: Direction) -> SchemaResult<Compatibility> {
        let a = self.compile(a)?;
        let b = self.compile(b)?;
        Ok(is_compatible(a.node(), b.node(), direction))
    }
}

/// Which relation between two schemas is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `a` is a consumer expectation, `b` a provider offering.
    ContractSatisfaction,
    /// `a` is the old schema, `b` the new schema.
    Evolution,
}

/// Outcome of a compatibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    pub reason: Option<String>,
}

impl Compatibility {
    pub fn compatible() -> Self {
        Self {
            compatible: true,
            reason: None,
        }
    }

    pub fn incompatible(reason: impl Into<String>) -> Self {
        Self {
            compatible: false,
            reason: Some(reason.into()),
        }
    }

    fn and_then(self, next: impl FnOnce() -> Compatibility) -> Compatibility {
        if self.compatible {
            next()
        } else {
            self
        }
    }
}

/// Compare two lowered schemas.
pub fn is_compatible(a: &SchemaNode, b: &SchemaNode, direction: Direction) -> Compatibility {
    match direction {
        Direction::ContractSatisfaction => satisfies(a, b, "$"),
        Direction::Evolution => evolves(a, b, "$"),
    }
}

/// Compile two schema documents and compare them.
///
/// # Errors
///
/// Returns `SchemaError` if either schema is malformed.
pub fn check_compatibility(a: &Value, b: &Value, direction: Direction) -> SchemaResult<Compatibility> {
    SchemaCache::new().check(a, b, direction)
}

fn satisfies(expected: &SchemaNode, offered: &SchemaNode, path: &str) -> Compatibility {
    match (expected, offered) {
        (SchemaNode::Unknown, _) | (_, SchemaNode::Unknown) => Compatibility::compatible(),
        (_, SchemaNode::Union(offers)) => offers.iter().fold(Compatibility::compatible(), |acc, offer| {
            acc.and_then(|| satisfies(expected, offer, path))
        }),
        (SchemaNode::Union(expects), _) => {
            let accepted = expects
                .iter()
                .any(|expect| satisfies(expect, offered, path).compatible);
            if accepted {
                Compatibility::compatible()
            } else {
                Compatibility::incompatible(format!(
                    "type mismatch at {path}: expected {}, found {}",
                    expected.type_name(),
                    offered.type_name()
                ))
            }
        }
        (SchemaNode::Object(expect), SchemaNode::Object(offer)) => {
            let referenced: BTreeSet<&String> = expect
                .properties
                .keys()
                .chain(expect.required.iter())
                .collect();
            for name in referenced {
                let Some(offered_property) = offer.properties.get(name) else {
                    return Compatibility::incompatible(format!(
                        "missing property '{name}' at {path}"
                    ));
                };
                if let Some(expected_property) = expect.properties.get(name) {
                    let nested = satisfies(expected_property, offered_property, &format!("{path}.{name}"));
                    if !nested.compatible {
                        return nested;
                    }
                }
            }
            Compatibility::compatible()
        }
        (SchemaNode::Array(expect), SchemaNode::Array(offer)) => match (&expect.items, &offer.items) {
            (Some(expected_items), Some(offered_items)) => {
                satisfies(expected_items, offered_items, &format!("{path}[]"))
            }
            _ => Compatibility::compatible(),
        },
        (SchemaNode::Scalar(expect), SchemaNode::Scalar(offer)) if expect.accepts(*offer) => {
            Compatibility::compatible()
        }
        _ => Compatibility::incompatible(format!(
            "type mismatch at {path}: expected {}, found {}",
            expected.type_name(),
            offered.type_name()
        )),
    }
}

fn evolves(old: &SchemaNode, new: &SchemaNode, path: &str) -> Compatibility {
    match (old, new) {
        (SchemaNode::Unknown, _) | (_, SchemaNode::Unknown) => Compatibility::compatible(),
        (SchemaNode::Union(old_members), SchemaNode::Union(new_members)) => {
            let old_names: BTreeSet<String> = old_members.iter().map(SchemaNode::type_name).collect();
            let new_names: BTreeSet<String> = new_members.iter().map(SchemaNode::type_name).collect();
            if old_names != new_names {
                return type_changed(old, new, path);
            }
            old_members.iter().fold(Compatibility::compatible(), |acc, old_member| {
                acc.and_then(|| {
                    new_members
                        .iter()
                        .find(|new_member| new_member.type_name() == old_member.type_name())
                        .map_or_else(
                            || type_changed(old, new, path),
                            |new_member| evolves(old_member, new_member, path),
                        )
                })
            })
        }
        (SchemaNode::Object(old_object), SchemaNode::Object(new_object)) => {
            for (name, old_property) in &old_object.properties {
                let Some(new_property) = new_object.properties.get(name) else {
                    return Compatibility::incompatible(format!(
                        "property '{name}' removed at {path}"
                    ));
                };
                let nested = evolves(old_property, new_property, &format!("{path}.{name}"));
                if !nested.compatible {
                    return nested;
                }
            }
            if let Some(name) = new_object.required.difference(&old_object.required).next() {
                return Compatibility::incompatible(format!(
                    "property '{name}' became required at {path}"
                ));
            }
            Compatibility::compatible()
        }
        (SchemaNode::Array(old_array), SchemaNode::Array(new_array)) => {
            match (&old_array.items, &new_array.items) {
                (Some(old_items), Some(new_items)) => {
                    evolves(old_items, new_items, &format!("{path}[]"))
                }
                _ => Compatibility::compatible(),
            }
        }
        (SchemaNode::Scalar(old_scalar), SchemaNode::Scalar(new_scalar)) if old_scalar == new_scalar => {
            Compatibility::compatible()
        }
        _ => type_changed(old, new, path),
    }
}

fn type_changed(old: &SchemaNode, new: &SchemaNode, path: &str) -> Compatibility {
    Compatibility::incompatible(format!(
        "type changed at {path} from {} to {}",
        old.type_name(),
        new.type_name()
    ))
}
