//! Operation descriptors, parameter schemas and the static research catalog.

use std::collections::HashSet;

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::args::{
    ApplicationStage,
    FocusStyle,
    InterviewType,
    OperationKind,
    ResearchDepth,
    RevenueFocus,
};

/// Default role assumed by `research_company`.
pub const DEFAULT_RESEARCH_ROLE: &str = "VP Engineering";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("operation {0} is declared more than once")]
    DuplicateOperation(String),
    #[error("operation {operation} declares parameter {parameter} more than once")]
    DuplicateParameter { operation: String, parameter: String },
    #[error("parameter {operation}.{parameter} is required but declares a default")]
    RequiredWithDefault { operation: String, parameter: String },
    #[error("default for {operation}.{parameter} is not a valid {expected}")]
    DefaultTypeMismatch {
        operation: String,
        parameter: String,
        expected: String,
    },
    #[error("default for {operation}.{parameter} is not one of its allowed values")]
    DefaultNotAllowed { operation: String, parameter: String },
    #[error("parameter {operation}.{parameter} is an enum with no allowed values")]
    EmptyEnum { operation: String, parameter: String },
}

/// Runtime shape of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
    StringArray,
    Enum(Vec<String>),
}

impl ParameterKind {
    /// Human-readable description of the accepted shape, used in errors.
    #[must_use]
    pub fn expected(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::StringArray => "array of strings".to_string(),
            Self::Enum(allowed) => format!("one of: {}", allowed.join(", ")),
        }
    }

    /// Returns true when `value` has this shape.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_))
            | (Self::Number, Value::Number(_))
            | (Self::Boolean, Value::Bool(_)) => true,
            (Self::StringArray, Value::Array(items)) => items.iter().all(Value::is_string),
            (Self::Enum(allowed), Value::String(text)) => allowed.iter().any(|item| item == text),
            _ => false,
        }
    }

    fn json_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        match self {
            Self::String => {
                schema.insert("type".into(), json!("string"));
            }
            Self::Number => {
                schema.insert("type".into(), json!("number"));
            }
            Self::Boolean => {
                schema.insert("type".into(), json!("boolean"));
            }
            Self::StringArray => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), json!({ "type": "string" }));
            }
            Self::Enum(allowed) => {
                schema.insert("type".into(), json!("string"));
                schema.insert("enum".into(), json!(allowed));
            }
        }
        schema
    }
}

/// One declared input field of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    description: String,
    kind: ParameterKind,
    required: bool,
    default: Option<Value>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::String)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::Number)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::Boolean)
    }

    pub fn string_array(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::StringArray)
    }

    pub fn one_of<I, S>(name: impl Into<String>, description: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        Self::new(name, description, ParameterKind::Enum(allowed))
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The enum's closed value set, or `None` for non-enum parameters.
    #[must_use]
    pub fn allowed_values(&self) -> Option<&[String]> {
        match &self.kind {
            ParameterKind::Enum(allowed) => Some(allowed),
            _ => None,
        }
    }

    fn check(&self, operation: &str) -> Result<(), CatalogError> {
        let parameter = || self.name.clone();
        if let ParameterKind::Enum(allowed) = &self.kind {
            if allowed.is_empty() {
                return Err(CatalogError::EmptyEnum {
                    operation: operation.to_string(),
                    parameter: parameter(),
                });
            }
        }
        let Some(default) = &self.default else {
            return Ok(());
        };
        if self.required {
            return Err(CatalogError::RequiredWithDefault {
                operation: operation.to_string(),
                parameter: parameter(),
            });
        }
        if self.kind.accepts(default) {
            return Ok(());
        }
        if matches!(self.kind, ParameterKind::Enum(_)) && default.is_string() {
            return Err(CatalogError::DefaultNotAllowed {
                operation: operation.to_string(),
                parameter: parameter(),
            });
        }
        Err(CatalogError::DefaultTypeMismatch {
            operation: operation.to_string(),
            parameter: parameter(),
            expected: self.kind.expected(),
        })
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.kind.json_schema();
        schema.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        Value::Object(schema)
    }
}

/// Static metadata for one callable operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    kind: OperationKind,
    description: String,
    parameters: Vec<ParameterSpec>,
}

impl OperationDescriptor {
    pub fn new(kind: OperationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    /// Checks the descriptor's parameter definitions.
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] found.
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name.as_str()) {
                return Err(CatalogError::DuplicateParameter {
                    operation: self.name().to_string(),
                    parameter: parameter.name.clone(),
                });
            }
            parameter.check(self.name())?;
        }
        Ok(())
    }

    /// JSON Schema object describing the operation's arguments.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|parameter| (parameter.name.clone(), parameter.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|parameter| parameter.required)
            .map(|parameter| parameter.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }
}

fn company_parameter() -> ParameterSpec {
    ParameterSpec::string("company", "Company name to research").required()
}

/// The six research operations, in the order they are advertised.
#[must_use]
pub fn research_catalog() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new(
            OperationKind::ResearchCompany,
            "Research a company's engineering organization, leadership and culture ahead of an executive search.",
        )
        .with_parameter(company_parameter())
        .with_parameter(
            ParameterSpec::string("role", "Target role being considered")
                .with_default(DEFAULT_RESEARCH_ROLE),
        )
        .with_parameter(
            ParameterSpec::string_array("focus_areas", "Areas to emphasize in the research")
                .with_default(vec!["leadership", "technology", "culture", "growth"]),
        ),
        OperationDescriptor::new(
            OperationKind::AnalyzeRevenueEngine,
            "Analyze how a company makes money and where engineering moves the revenue needle.",
        )
        .with_parameter(company_parameter())
        .with_parameter(ParameterSpec::string(
            "business_model",
            "Known business model, e.g. SaaS, marketplace, usage-based",
        ))
        .with_parameter(
            ParameterSpec::one_of("focus", "Analysis lens", RevenueFocus::wire_names())
                .with_default(RevenueFocus::Comprehensive.as_str()),
        ),
        OperationDescriptor::new(
            OperationKind::LinkedinIntelligence,
            "Summarize publicly visible leadership and hiring signals for a company.",
        )
        .with_parameter(company_parameter())
        .with_parameter(ParameterSpec::string("role", "Role to focus the org mapping on"))
        .with_parameter(ParameterSpec::boolean(
            "export_data",
            "Append a CSV-style export of the mapped profiles",
        ))
        .with_parameter(
            ParameterSpec::one_of(
                "research_depth",
                "How much detail to include",
                ResearchDepth::wire_names(),
            )
            .with_default(ResearchDepth::Detailed.as_str()),
        ),
        OperationDescriptor::new(
            OperationKind::InterviewPreparation,
            "Prepare for an executive interview loop: likely questions, panel and talking points.",
        )
        .with_parameter(company_parameter())
        .with_parameter(ParameterSpec::string("role", "Role being interviewed for").required())
        .with_parameter(
            ParameterSpec::one_of("interview_type", "Interview format", InterviewType::wire_names())
                .with_default(InterviewType::Comprehensive.as_str()),
        )
        .with_parameter(
            ParameterSpec::string_array("focus_areas", "Topics to prepare for")
                .with_default(vec!["technical_leadership", "team_building", "strategic_vision"]),
        ),
        OperationDescriptor::new(
            OperationKind::ExecutiveBrief,
            "Produce an executive brief tailored to the current stage of an application.",
        )
        .with_parameter(company_parameter())
        .with_parameter(ParameterSpec::string("role", "Role being pursued").required())
        .with_parameter(
            ParameterSpec::one_of(
                "application_stage",
                "Current stage of the application",
                ApplicationStage::wire_names(),
            )
            .with_default(ApplicationStage::Research.as_str()),
        )
        .with_parameter(
            ParameterSpec::string_array("include_sections", "Sections to include in the brief")
                .with_default(vec![
                    "company_overview",
                    "leadership_team",
                    "strategic_priorities",
                    "talking_points",
                ]),
        ),
        OperationDescriptor::new(
            OperationKind::TransitionPlan,
            "Draft a 30-60-90 day plan for a new engineering leader.",
        )
        .with_parameter(company_parameter())
        .with_parameter(ParameterSpec::string("role", "Role the plan is for").required())
        .with_parameter(ParameterSpec::number("team_size", "Size of the inherited team"))
        .with_parameter(ParameterSpec::string_array(
            "key_challenges",
            "Known challenges to address",
        ))
        .with_parameter(
            ParameterSpec::one_of("focus_style", "Leadership posture", FocusStyle::wire_names())
                .with_default(FocusStyle::Growth.as_str()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_catalog_is_well_formed() {
        let catalog = research_catalog();
        let names: Vec<&str> = catalog.iter().map(OperationDescriptor::name).collect();
        assert_eq!(
            names,
            OperationKind::ALL.iter().map(|kind| kind.as_str()).collect::<Vec<_>>()
        );
        for descriptor in &catalog {
            descriptor.check().unwrap_or_else(|err| panic!("{err}"));
        }
    }

    #[test]
    fn rejects_required_parameter_with_default() {
        let descriptor = OperationDescriptor::new(OperationKind::ResearchCompany, "test")
            .with_parameter(ParameterSpec::string("company", "name").required().with_default("Acme"));

        assert_eq!(
            descriptor.check(),
            Err(CatalogError::RequiredWithDefault {
                operation: "research_company".to_string(),
                parameter: "company".to_string(),
            })
        );
    }

    #[test]
    fn rejects_enum_default_outside_allowed_values() {
        let descriptor = OperationDescriptor::new(OperationKind::AnalyzeRevenueEngine, "test")
            .with_parameter(ParameterSpec::one_of("focus", "lens", ["a", "b"]).with_default("c"));

        assert!(matches!(
            descriptor.check(),
            Err(CatalogError::DefaultNotAllowed { ref parameter, .. }) if parameter == "focus"
        ));
    }

    #[test]
    fn rejects_default_of_the_wrong_shape() {
        let descriptor = OperationDescriptor::new(OperationKind::ResearchCompany, "test")
            .with_parameter(ParameterSpec::string_array("focus_areas", "areas").with_default(vec![1, 2]));

        assert!(matches!(
            descriptor.check(),
            Err(CatalogError::DefaultTypeMismatch { ref expected, .. }) if expected == "array of strings"
        ));
    }

    #[test]
    fn rejects_duplicate_parameters_and_empty_enums() {
        let duplicate = OperationDescriptor::new(OperationKind::ExecutiveBrief, "test")
            .with_parameter(ParameterSpec::string("role", "a"))
            .with_parameter(ParameterSpec::string("role", "b"));
        assert!(matches!(duplicate.check(), Err(CatalogError::DuplicateParameter { .. })));

        let empty = OperationDescriptor::new(OperationKind::ExecutiveBrief, "test")
            .with_parameter(ParameterSpec::one_of("stage", "s", Vec::<String>::new()));
        assert!(matches!(empty.check(), Err(CatalogError::EmptyEnum { .. })));
    }

    #[test]
    fn looks_up_parameters_and_their_allowed_values() {
        let revenue = OperationDescriptor::new(OperationKind::AnalyzeRevenueEngine, "test")
            .with_parameter(ParameterSpec::string("company", "name").required())
            .with_parameter(ParameterSpec::one_of("focus", "lens", RevenueFocus::wire_names()));

        let focus = revenue.parameter("focus").expect("focus should be declared");
        assert_eq!(
            focus.allowed_values().expect("focus is an enum"),
            ["cost_optimization", "growth_levers", "risk_assessment", "comprehensive"]
        );
        let company = revenue.parameter("company").expect("company should be declared");
        assert!(company.allowed_values().is_none());
        assert!(revenue.parameter("business_model").is_none());
    }

    #[test]
    fn input_schema_preserves_declaration_order_and_defaults() {
        let catalog = research_catalog();
        let revenue = catalog
            .iter()
            .find(|descriptor| descriptor.kind() == OperationKind::AnalyzeRevenueEngine)
            .expect("revenue operation should be declared");
        let schema = Value::Object(revenue.input_schema());

        let properties: Vec<&String> = schema["properties"]
            .as_object()
            .expect("properties should be an object")
            .keys()
            .collect();
        assert_eq!(properties, ["company", "business_model", "focus"]);
        assert_eq!(schema["required"], json!(["company"]));
        assert_eq!(schema["properties"]["focus"]["default"], json!("comprehensive"));
        assert_eq!(
            schema["properties"]["focus"]["enum"],
            json!(["cost_optimization", "growth_levers", "risk_assessment", "comprehensive"])
        );
    }
}
