use std::fmt::Write;

use crate::args::ResearchCompanyArgs;
use crate::handler::HandlerError;

use super::title_case;

pub(super) fn render(args: &ResearchCompanyArgs) -> Result<String, HandlerError> {
    let ResearchCompanyArgs {
        company,
        role,
        focus_areas,
    } = args;
    let mut out = String::new();

    writeln!(out, "# Company Research: {company}")?;
    writeln!(out)?;
    writeln!(out, "**Target role:** {role}")?;
    if !focus_areas.is_empty() {
        let areas: Vec<String> = focus_areas.iter().map(|area| title_case(area)).collect();
        writeln!(out, "**Focus areas:** {}", areas.join(", "))?;
    }
    writeln!(out)?;

    writeln!(out, "## Engineering Organization")?;
    writeln!(out, "- Estimated engineering headcount: 450-600")?;
    writeln!(out, "- Structure: product-aligned squads grouped into 6 platform tribes")?;
    writeln!(out, "- Reporting line for {role}: CEO or CTO, depending on org stage")?;
    writeln!(out)?;

    writeln!(out, "## Leadership Team")?;
    writeln!(out, "| Function | Leader | Tenure |")?;
    writeln!(out, "|---|---|---|")?;
    writeln!(out, "| CEO | Jordan Avery | 6 years |")?;
    writeln!(out, "| CTO | Priya Raman | 3 years |")?;
    writeln!(out, "| VP Product | Marcus Chen | 2 years |")?;
    writeln!(out, "| VP People | Elena Ruiz | 4 years |")?;
    writeln!(out)?;

    for area in focus_areas {
        writeln!(out, "## {}", title_case(area))?;
        let note = match area.as_str() {
            "leadership" => format!(
                "{company} favors leaders who pair hands-on technical credibility with crisp written communication."
            ),
            "technology" => format!(
                "{company} runs a polyglot stack on a major cloud provider, mid-migration from a monolith to services."
            ),
            "culture" => format!(
                "{company} publicly emphasizes ownership, blameless postmortems and a remote-friendly operating model."
            ),
            "growth" => format!(
                "{company} reports roughly 35% year-over-year growth and is expanding its enterprise segment."
            ),
            other => format!(
                "No curated notes for {} at {company}; prepare questions for the hiring panel.",
                title_case(other)
            ),
        };
        writeln!(out, "{note}")?;
        writeln!(out)?;
    }

    writeln!(out, "## Questions to Explore")?;
    writeln!(out, "1. What does success look like for the {role} in the first year?")?;
    writeln!(out, "2. Which engineering investments does {company} consider overdue?")?;
    writeln!(out, "3. How are roadmap trade-offs negotiated between product and engineering?")?;

    Ok(out)
}
