//! Strongly-typed argument records, one per operation.
//!
//! The validator produces a loosely-typed [`ValidatedArguments`] bag; this
//! module turns that bag into an [`OperationArgs`] variant so handlers never
//! inspect raw JSON.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::validate::{ArgumentError, ValidatedArguments};

/// Returned when a string does not name any variant of a catalog enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of the variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Wire names of every variant, in declaration order.
            #[must_use]
            pub fn wire_names() -> Vec<&'static str> {
                Self::ALL.iter().map(|value| value.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == value)
                    .ok_or_else(|| UnknownVariant(value.to_string()))
            }
        }
    };
}

string_enum! {
    /// The operations exposed by the server.
    pub enum OperationKind {
        ResearchCompany => "research_company",
        AnalyzeRevenueEngine => "analyze_revenue_engine",
        LinkedinIntelligence => "linkedin_intelligence",
        InterviewPreparation => "interview_preparation",
        ExecutiveBrief => "executive_brief",
        TransitionPlan => "create_30_60_90_plan",
    }
}

string_enum! {
    /// Lens applied by `analyze_revenue_engine`.
    pub enum RevenueFocus {
        CostOptimization => "cost_optimization",
        GrowthLevers => "growth_levers",
        RiskAssessment => "risk_assessment",
        Comprehensive => "comprehensive",
    }
}

string_enum! {
    pub enum ResearchDepth {
        Basic => "basic",
        Detailed => "detailed",
        Comprehensive => "comprehensive",
    }
}

string_enum! {
    pub enum InterviewType {
        Technical => "technical",
        Behavioral => "behavioral",
        CaseStudy => "case_study",
        Comprehensive => "comprehensive",
    }
}

string_enum! {
    /// Where the candidate is in the hiring process.
    pub enum ApplicationStage {
        Research => "research",
        Application => "application",
        Interview => "interview",
        Negotiation => "negotiation",
    }
}

string_enum! {
    /// Leadership posture for a 30-60-90 day plan.
    pub enum FocusStyle {
        Transformation => "transformation",
        Growth => "growth",
        Optimization => "optimization",
        Startup => "startup",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchCompanyArgs {
    pub company: String,
    pub role: String,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueEngineArgs {
    pub company: String,
    pub business_model: Option<String>,
    pub focus: RevenueFocus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedinIntelligenceArgs {
    pub company: String,
    pub role: Option<String>,
    pub export_data: Option<bool>,
    pub research_depth: ResearchDepth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewPreparationArgs {
    pub company: String,
    pub role: String,
    pub interview_type: InterviewType,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutiveBriefArgs {
    pub company: String,
    pub role: String,
    pub application_stage: ApplicationStage,
    pub include_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlanArgs {
    pub company: String,
    pub role: String,
    pub team_size: Option<f64>,
    pub key_challenges: Option<Vec<String>>,
    pub focus_style: FocusStyle,
}

/// Validated arguments for exactly one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationArgs {
    ResearchCompany(ResearchCompanyArgs),
    AnalyzeRevenueEngine(RevenueEngineArgs),
    LinkedinIntelligence(LinkedinIntelligenceArgs),
    InterviewPreparation(InterviewPreparationArgs),
    ExecutiveBrief(ExecutiveBriefArgs),
    TransitionPlan(TransitionPlanArgs),
}

impl OperationArgs {
    /// Builds the typed record for `kind` from an already validated bag.
    ///
    /// # Errors
    /// Returns [`ArgumentError`] when the bag does not carry the shape the
    /// operation expects, which only happens if the catalog and the record
    /// definitions disagree.
    pub fn from_validated(
        kind: OperationKind,
        args: &ValidatedArguments,
    ) -> Result<Self, ArgumentError> {
        let company = args.required_string("company")?;
        let record = match kind {
            OperationKind::ResearchCompany => Self::ResearchCompany(ResearchCompanyArgs {
                company,
                role: args.required_string("role")?,
                focus_areas: args.required_string_list("focus_areas")?,
            }),
            OperationKind::AnalyzeRevenueEngine => Self::AnalyzeRevenueEngine(RevenueEngineArgs {
                company,
                business_model: args.string("business_model")?.map(str::to_string),
                focus: args.required_enumeration("focus")?,
            }),
            OperationKind::LinkedinIntelligence => {
                Self::LinkedinIntelligence(LinkedinIntelligenceArgs {
                    company,
                    role: args.string("role")?.map(str::to_string),
                    export_data: args.boolean("export_data")?,
                    research_depth: args.required_enumeration("research_depth")?,
                })
            }
            OperationKind::InterviewPreparation => {
                Self::InterviewPreparation(InterviewPreparationArgs {
                    company,
                    role: args.required_string("role")?,
                    interview_type: args.required_enumeration("interview_type")?,
                    focus_areas: args.required_string_list("focus_areas")?,
                })
            }
            OperationKind::ExecutiveBrief => Self::ExecutiveBrief(ExecutiveBriefArgs {
                company,
                role: args.required_string("role")?,
                application_stage: args.required_enumeration("application_stage")?,
                include_sections: args.required_string_list("include_sections")?,
            }),
            OperationKind::TransitionPlan => Self::TransitionPlan(TransitionPlanArgs {
                company,
                role: args.required_string("role")?,
                team_size: args.number("team_size")?,
                key_challenges: args.string_list("key_challenges")?,
                focus_style: args.required_enumeration("focus_style")?,
            }),
        };
        Ok(record)
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::ResearchCompany(_) => OperationKind::ResearchCompany,
            Self::AnalyzeRevenueEngine(_) => OperationKind::AnalyzeRevenueEngine,
            Self::LinkedinIntelligence(_) => OperationKind::LinkedinIntelligence,
            Self::InterviewPreparation(_) => OperationKind::InterviewPreparation,
            Self::ExecutiveBrief(_) => OperationKind::ExecutiveBrief,
            Self::TransitionPlan(_) => OperationKind::TransitionPlan,
        }
    }

    /// The company the call is about; used to label handler failures.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::ResearchCompany(args) => &args.company,
            Self::AnalyzeRevenueEngine(args) => &args.company,
            Self::LinkedinIntelligence(args) => &args.company,
            Self::InterviewPreparation(args) => &args.company,
            Self::ExecutiveBrief(args) => &args.company,
            Self::TransitionPlan(args) => &args.company,
        }
    }
}
