/// JSON Schema documents describing the two response shapes.
///
/// The upstream chat-completion client sends one of these schemas as a strict
/// response-format constraint so that the model's reply decodes into a
/// [`crate::Map`]. [`JsonSchema`] models only the draft-07 subset the shapes
/// need; the builders below return fresh values on every call.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::map::Shape;
use crate::polarity::Polarity;

/// Draft-07 meta-schema URL emitted as `$schema` on the root object.
pub const DRAFT_07_URL: &str = "http://json-schema.org/draft-07/schema#";

/// JSON Schema `type` keyword values used by the response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    /// `"string"`
    String,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
}

/// A JSON Schema node.
///
/// `properties` is a `BTreeMap` so serialised schemas are byte-stable.
/// `additional_properties` is always written for objects because strict
/// structured-output modes require an explicit `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// The `type` keyword.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Guidance shown to the model for this node.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Object members.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, JsonSchema>,
    /// Array element schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,
    /// Allowed string values.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Required object members, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Whether undeclared object members are allowed.
    #[serde(
        default,
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
    /// Meta-schema URL; set on the root only.
    #[serde(default, rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub meta_schema: Option<String>,
}

impl JsonSchema {
    fn leaf(schema_type: SchemaType, description: &str) -> Self {
        Self {
            schema_type,
            description: description.to_owned(),
            properties: BTreeMap::new(),
            items: None,
            enum_values: Vec::new(),
            required: Vec::new(),
            additional_properties: None,
            meta_schema: None,
        }
    }

    /// A `string` node.
    pub fn string(description: &str) -> Self {
        Self::leaf(SchemaType::String, description)
    }

    /// A closed `object` node; every listed property is required, in order.
    pub fn object(description: &str, properties: Vec<(&str, JsonSchema)>) -> Self {
        let required = properties.iter().map(|(k, _)| (*k).to_owned()).collect();
        Self {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
            required,
            additional_properties: Some(false),
            ..Self::leaf(SchemaType::Object, description)
        }
    }

    /// An `array` node.
    pub fn array(description: &str, items: JsonSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array, description)
        }
    }

    /// Restricts a string node to the given values.
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| (*v).to_owned()).collect();
        self
    }

    /// Marks this node as a root document.
    pub fn as_root(mut self) -> Self {
        self.meta_schema = Some(DRAFT_07_URL.to_owned());
        self
    }
}

/// Strict response-format envelope sent alongside a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Identifier of the schema.
    pub name: String,
    /// Whether the provider must enforce the schema exactly.
    #[serde(default)]
    pub strict: bool,
    /// The schema itself.
    pub schema: JsonSchema,
}

impl ResponseFormat {
    /// Returns the strict response format for `shape`.
    pub fn for_shape(shape: Shape) -> Self {
        let name = match shape {
            Shape::Relationships => "relationships_response",
            Shape::CausalChains => "causal_chains_response",
        };
        Self {
            name: name.to_owned(),
            strict: true,
            schema: response_schema(shape),
        }
    }
}

const TITLE: &str = "A highly descriptive title of at most 7 words summarising the explanation.";
const EXPLANATION: &str = "Concisely explain the reasoning behind the diagram in plain English. \
    Do not reference JSON and do not restate the request.";
const POLARITY: &str = "Either + or -. With + a change in the cause moves the effect in the \
    same direction; with - a change in the cause moves the effect in the opposite direction.";
const POLARITY_REASONING: &str = "Why this polarity was chosen.";

/// Returns the schema for `shape`.
pub fn response_schema(shape: Shape) -> JsonSchema {
    match shape {
        Shape::Relationships => relationships_response_schema(),
        Shape::CausalChains => causal_chains_response_schema(),
    }
}

/// Schema for the flat shape: `{title, explanation, relationships: [...]}`.
pub fn relationships_response_schema() -> JsonSchema {
    let relationship = JsonSchema::object(
        "A causal relationship between two variables: from is the cause, to is the effect.",
        vec![
            ("from", JsonSchema::string("The cause: the variable that changes the to variable.")),
            ("to", JsonSchema::string("The effect: the variable changed by the from variable.")),
            ("polarity", JsonSchema::string(POLARITY).with_enum(&Polarity::SYMBOLS)),
            ("reasoning", JsonSchema::string("Why this relationship exists.")),
            ("polarityReasoning", JsonSchema::string(POLARITY_REASONING)),
        ],
    );

    JsonSchema::object(
        "",
        vec![
            ("explanation", JsonSchema::string(EXPLANATION)),
            ("title", JsonSchema::string(TITLE)),
            (
                "relationships",
                JsonSchema::array(
                    "Every causal relationship needed to answer the request.",
                    relationship,
                ),
            ),
        ],
    )
    .as_root()
}

/// Schema for the chains shape:
/// `{title, explanation, causal_chains: [{initial_variable, relationships, reasoning}]}`.
pub fn causal_chains_response_schema() -> JsonSchema {
    let entry = JsonSchema::object(
        "One hop of the chain: the variable affected by the previous variable.",
        vec![
            ("variable", JsonSchema::string("The variable affected by the previous link.")),
            ("polarity", JsonSchema::string(POLARITY).with_enum(&Polarity::SYMBOLS)),
            ("polarity_reasoning", JsonSchema::string(POLARITY_REASONING)),
        ],
    );

    let chain = JsonSchema::object(
        "A sequence of causal influences starting from one variable.",
        vec![
            ("initial_variable", JsonSchema::string("The variable the chain starts from.")),
            (
                "relationships",
                JsonSchema::array("The ordered hops of the chain.", entry),
            ),
            ("reasoning", JsonSchema::string("Why this chain of influences exists.")),
        ],
    );

    JsonSchema::object(
        "",
        vec![
            ("explanation", JsonSchema::string(EXPLANATION)),
            ("title", JsonSchema::string(TITLE)),
            (
                "causal_chains",
                JsonSchema::array(
                    "Every causal chain needed to answer the request.",
                    chain,
                ),
            ),
        ],
    )
    .as_root()
}
