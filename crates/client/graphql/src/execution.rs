//! Selection-set execution.
//!
//! The walker drives the resolver registry over a parsed query document:
//! argument coercion through the scalar codecs, resolver invocation, then
//! completion of the returned value against the field's sub-selection.
//! Field-level failures become entries in the result's `errors` array and
//! never abort sibling fields. A deadline is checked at every field
//! boundary; once it expires the rest of the walk is abandoned with a
//! single error entry.

use crate::errors::ResolverError;
use crate::resolvers::{ArgSpec, Args, Parent, Resolved, ResolverRegistry};
use crate::scalars::{LiteralNode, ScalarInput, ScalarKind, ScalarValue};
use graphql_parser::query::{
    parse_query, Definition, Field, OperationDefinition, Selection, SelectionSet, Value as AstValue,
};
use serde_json::{json, Map, Value as JsonValue};
use std::time::{Duration, Instant};

/// Absolute point after which execution gives up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

/// The data/errors pair produced for one request item.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub data: JsonValue,
    pub errors: Vec<JsonValue>,
}

impl QueryResult {
    fn failed(message: impl Into<String>) -> Self {
        Self { data: JsonValue::Null, errors: vec![json!({ "message": message.into() })] }
    }
}

type QSelectionSet<'a> = SelectionSet<'a, &'a str>;
type QField<'a> = Field<'a, &'a str>;
type QValue<'a> = AstValue<'a, &'a str>;

pub(crate) fn execute(
    registry: &ResolverRegistry,
    query: &str,
    variables: Option<&Map<String, JsonValue>>,
    operation_name: Option<&str>,
    deadline: Deadline,
) -> QueryResult {
    let document = match parse_query::<&str>(query) {
        Ok(document) => document,
        Err(e) => return QueryResult::failed(format!("query parse error: {e}")),
    };

    let selection_set = match select_operation(&document.definitions, operation_name) {
        Ok(set) => set,
        Err(message) => return QueryResult::failed(message),
    };

    let mut walker = Walker { registry, variables, deadline, errors: Vec::new(), deadline_hit: false };
    let data = walker.execute_set(selection_set, "Query", None, &[]);
    QueryResult { data: JsonValue::Object(data), errors: walker.errors }
}

fn select_operation<'a>(
    definitions: &'a [Definition<'a, &'a str>],
    operation_name: Option<&str>,
) -> Result<&'a QSelectionSet<'a>, String> {
    let mut queries: Vec<(Option<&'a str>, &'a QSelectionSet<'a>)> = Vec::new();
    let mut unsupported: Vec<(Option<&'a str>, &'static str)> = Vec::new();

    for definition in definitions {
        match definition {
            Definition::Operation(OperationDefinition::Query(q)) => {
                queries.push((q.name, &q.selection_set))
            }
            Definition::Operation(OperationDefinition::SelectionSet(set)) => queries.push((None, set)),
            Definition::Operation(OperationDefinition::Mutation(m)) => {
                unsupported.push((m.name, "mutations"))
            }
            Definition::Operation(OperationDefinition::Subscription(s)) => {
                unsupported.push((s.name, "subscriptions"))
            }
            Definition::Fragment(_) => {}
        }
    }

    match operation_name {
        Some(wanted) => {
            if let Some((_, set)) = queries.iter().find(|(name, _)| *name == Some(wanted)) {
                return Ok(set);
            }
            if let Some((_, what)) = unsupported.iter().find(|(name, _)| *name == Some(wanted)) {
                return Err(format!("{what} are not supported"));
            }
            Err(format!("unknown operation '{wanted}'"))
        }
        None => match (queries.len(), unsupported.len()) {
            (1, 0) => Ok(queries[0].1),
            (0, 0) => Err("document contains no executable operations".to_string()),
            (0, 1) => Err(format!("{} are not supported", unsupported[0].1)),
            _ => Err("operationName is required when the document contains multiple operations".to_string()),
        },
    }
}

struct Walker<'r, 'v> {
    registry: &'r ResolverRegistry,
    variables: Option<&'v Map<String, JsonValue>>,
    deadline: Deadline,
    errors: Vec<JsonValue>,
    deadline_hit: bool,
}

impl Walker<'_, '_> {
    fn execute_set(
        &mut self,
        set: &QSelectionSet<'_>,
        type_name: &str,
        parent: Option<&Parent>,
        path: &[JsonValue],
    ) -> Map<String, JsonValue> {
        let mut out = Map::new();
        for selection in &set.items {
            if self.deadline_hit {
                break;
            }
            match selection {
                Selection::Field(field) => {
                    let key = field.alias.unwrap_or(field.name).to_string();
                    let mut field_path = path.to_vec();
                    field_path.push(JsonValue::String(key.clone()));

                    if self.deadline.expired() {
                        self.deadline_hit = true;
                        self.push_error("execution deadline exceeded", &field_path);
                        break;
                    }

                    let value = self.execute_field(field, type_name, parent, &field_path);
                    out.insert(key, value);
                }
                Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                    self.push_error("fragments are not supported", path);
                }
            }
        }
        out
    }

    fn execute_field(
        &mut self,
        field: &QField<'_>,
        type_name: &str,
        parent: Option<&Parent>,
        path: &[JsonValue],
    ) -> JsonValue {
        let Some(resolver) = self.registry.get(type_name, field.name) else {
            self.push_error(
                format!("cannot query field '{}' on type '{type_name}'", field.name),
                path,
            );
            return JsonValue::Null;
        };

        let args = match self.coerce_arguments(resolver.arg_specs(), field) {
            Ok(args) => args,
            Err(e) => {
                self.push_error(e.to_string(), path);
                return JsonValue::Null;
            }
        };

        match resolver.call(&args, parent) {
            Ok(resolved) => self.complete_value(resolved, field, path),
            Err(e) => {
                tracing::debug!(target: "gateway", field = field.name, "resolver error: {e}");
                self.push_error(e.to_string(), path);
                JsonValue::Null
            }
        }
    }

    fn complete_value(&mut self, resolved: Resolved, field: &QField<'_>, path: &[JsonValue]) -> JsonValue {
        match resolved {
            Resolved::Null => JsonValue::Null,
            Resolved::Scalar(value) => self.serialize_scalar(value, path),
            Resolved::Object(parent) => {
                if field.selection_set.items.is_empty() {
                    self.push_error(
                        format!(
                            "field '{}' of type '{}' must have a selection of subfields",
                            field.name,
                            parent.type_name()
                        ),
                        path,
                    );
                    return JsonValue::Null;
                }
                JsonValue::Object(self.execute_set(
                    &field.selection_set,
                    parent.type_name(),
                    Some(&parent),
                    path,
                ))
            }
            Resolved::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(JsonValue::from(index));
                    out.push(self.complete_value(item, field, &item_path));
                }
                JsonValue::Array(out)
            }
        }
    }

    fn serialize_scalar(&mut self, value: ScalarValue, path: &[JsonValue]) -> JsonValue {
        match value.kind().serialize(ScalarInput::Native(value)) {
            Ok(text) => JsonValue::String(text),
            Err(e) => {
                self.push_error(e.to_string(), path);
                JsonValue::Null
            }
        }
    }

    fn coerce_arguments(&self, specs: &[ArgSpec], field: &QField<'_>) -> Result<Args, ResolverError> {
        for (name, _) in &field.arguments {
            if !specs.iter().any(|spec| spec.name == *name) {
                return Err(ResolverError::InvalidArgument(format!(
                    "unknown argument '{name}' on field '{}'",
                    field.name
                )));
            }
        }

        let mut args = Args::default();
        for spec in specs {
            let supplied = field.arguments.iter().find(|(name, _)| *name == spec.name).map(|(_, v)| v);
            let coerced = match supplied {
                None | Some(AstValue::Null) => None,
                Some(AstValue::Variable(var)) => self.coerce_variable(spec.kind, var)?,
                Some(literal) => Some(spec.kind.parse_literal(&literal_node(literal))?),
            };
            match coerced {
                Some(value) => args.insert(spec.name, value),
                None if spec.required => {
                    return Err(ResolverError::InvalidArgument(format!(
                        "missing required argument '{}'",
                        spec.name
                    )))
                }
                None => {}
            }
        }
        Ok(args)
    }

    fn coerce_variable(&self, kind: ScalarKind, name: &str) -> Result<Option<ScalarValue>, ResolverError> {
        let value = self.variables.and_then(|vars| vars.get(name));
        match value {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(text)) => {
                Ok(Some(kind.parse_value(ScalarInput::Text(text.clone()))?))
            }
            // JSON integers are the out-of-band equivalent of the integer
            // literal the Long codec already accepts.
            Some(JsonValue::Number(n)) if kind == ScalarKind::Long => match n.as_u64() {
                Some(v) => Ok(Some(ScalarValue::Long(v))),
                None => Err(ResolverError::InvalidArgument(format!(
                    "variable '${name}' is not an unsigned 64-bit integer"
                ))),
            },
            Some(other) => Err(ResolverError::InvalidArgument(format!(
                "variable '${name}' has unsupported type for {kind}: {other}"
            ))),
        }
    }

    fn push_error(&mut self, message: impl Into<String>, path: &[JsonValue]) {
        let message = message.into();
        if path.is_empty() {
            self.errors.push(json!({ "message": message }));
        } else {
            self.errors.push(json!({ "message": message, "path": path }));
        }
    }
}

fn literal_node(value: &QValue<'_>) -> LiteralNode {
    match value {
        AstValue::String(s) => LiteralNode::Str(s.clone()),
        AstValue::Int(n) => n.as_i64().map(LiteralNode::Int).unwrap_or(LiteralNode::Other("IntValue")),
        AstValue::Float(_) => LiteralNode::Other("FloatValue"),
        AstValue::Boolean(_) => LiteralNode::Other("BooleanValue"),
        AstValue::Enum(_) => LiteralNode::Other("EnumValue"),
        AstValue::List(_) => LiteralNode::Other("ListValue"),
        AstValue::Object(_) => LiteralNode::Other("ObjectValue"),
        AstValue::Variable(_) | AstValue::Null => LiteralNode::Other("NullValue"),
    }
}
