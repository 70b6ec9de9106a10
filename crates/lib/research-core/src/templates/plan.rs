use std::fmt::Write;

use crate::args::{FocusStyle, TransitionPlanArgs};
use crate::handler::HandlerError;

use super::title_case;

const DEFAULT_CHALLENGES: [&str; 3] = [
    "Unclear ownership between platform and product teams",
    "Rising incident volume on core services",
    "Hiring pipeline below plan",
];

pub(super) fn render(args: &TransitionPlanArgs) -> Result<String, HandlerError> {
    let TransitionPlanArgs {
        company,
        role,
        team_size,
        key_challenges,
        focus_style,
    } = args;
    let mut out = String::new();

    writeln!(out, "# 30-60-90 Day Plan: {role} at {company}")?;
    writeln!(out)?;
    writeln!(out, "**Focus style:** {}", focus_style.as_str())?;
    if let Some(size) = team_size {
        writeln!(out, "**Team size:** {size}")?;
    }
    writeln!(out)?;

    writeln!(out, "## Key Challenges")?;
    match key_challenges {
        Some(challenges) if !challenges.is_empty() => {
            for challenge in challenges {
                writeln!(out, "- {challenge}")?;
            }
        }
        _ => {
            for challenge in DEFAULT_CHALLENGES {
                writeln!(out, "- {challenge} (assumed)")?;
            }
        }
    }
    writeln!(out)?;

    let (listen, act, scale) = themes(*focus_style);
    writeln!(out, "## Days 1-30: {}", title_case(listen))?;
    writeln!(out, "- Hold 1:1s with every direct report and key partners at {company}")?;
    writeln!(out, "- Review architecture, incident history and delivery metrics")?;
    if let Some(size) = team_size {
        writeln!(out, "- Meet skip-levels across the {size}-person organization")?;
    }
    writeln!(out)?;

    writeln!(out, "## Days 31-60: {}", title_case(act))?;
    writeln!(out, "- Publish a written assessment and operating plan as {role}")?;
    writeln!(out, "- Land two visible wins against the top challenges")?;
    writeln!(out)?;

    writeln!(out, "## Days 61-90: {}", title_case(scale))?;
    writeln!(out, "- Commit to quarterly engineering goals with the executive team")?;
    writeln!(out, "- Put org, hiring and process changes into motion")?;

    Ok(out)
}

fn themes(style: FocusStyle) -> (&'static str, &'static str, &'static str) {
    match style {
        FocusStyle::Transformation => ("diagnose", "restructure", "institutionalize_change"),
        FocusStyle::Growth => ("learn", "accelerate", "scale"),
        FocusStyle::Optimization => ("measure", "streamline", "sustain"),
        FocusStyle::Startup => ("immerse", "ship", "build_the_team"),
    }
}
