use std::fmt::Write;

use crate::args::{ApplicationStage, ExecutiveBriefArgs};
use crate::handler::HandlerError;

use super::title_case;

pub(super) fn render(args: &ExecutiveBriefArgs) -> Result<String, HandlerError> {
    let ExecutiveBriefArgs {
        company,
        role,
        application_stage,
        include_sections,
    } = args;
    let mut out = String::new();

    writeln!(out, "# Executive Brief: {company}")?;
    writeln!(out)?;
    writeln!(out, "**Role:** {role}")?;
    writeln!(out, "**Stage:** {}", title_case(application_stage.as_str()))?;
    writeln!(out)?;

    for section in include_sections {
        writeln!(out, "## {}", title_case(section))?;
        match section.as_str() {
            "company_overview" => {
                writeln!(out, "{company} is a growth-stage software company with roughly 1,800 employees.")?;
                writeln!(out, "Annual recurring revenue is estimated in the $300-400M range.")?;
            }
            "leadership_team" => {
                writeln!(out, "- CEO: Jordan Avery")?;
                writeln!(out, "- CTO: Priya Raman")?;
                writeln!(out, "- CFO: Hannah Brooks")?;
            }
            "strategic_priorities" => {
                writeln!(out, "1. Move upmarket into regulated enterprise accounts")?;
                writeln!(out, "2. Improve gross margin through infrastructure efficiency")?;
                writeln!(out, "3. Ship an AI-assisted workflow tier")?;
            }
            "talking_points" => {
                writeln!(out, "- How your track record maps to {company}'s enterprise push")?;
                writeln!(out, "- A point of view on platform cost as a margin lever")?;
            }
            "compensation" => {
                writeln!(out, "- Base: $325k-$400k")?;
                writeln!(out, "- Equity: 0.3%-0.6% over four years")?;
                writeln!(out, "- Target bonus: 25%")?;
            }
            other => {
                writeln!(out, "No template content for {}.", title_case(other))?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "## Next Steps")?;
    let next = match application_stage {
        ApplicationStage::Research => format!("Map your network into {company} and request two warm introductions."),
        ApplicationStage::Application => format!("Tailor your resume summary to the {role} mandate before submitting."),
        ApplicationStage::Interview => format!("Prepare a 90-second narrative on why {company}, why now."),
        ApplicationStage::Negotiation => "Anchor on total compensation and clarify the scope of the mandate in writing.".to_string(),
    };
    writeln!(out, "{next}")?;

    Ok(out)
}
