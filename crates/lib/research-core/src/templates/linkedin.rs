use std::fmt::Write;

use crate::args::{LinkedinIntelligenceArgs, ResearchDepth};
use crate::handler::HandlerError;

use super::title_case;

struct Profile {
    name: &'static str,
    title: &'static str,
    tenure_years: u8,
    previous: &'static str,
}

const PROFILES: [Profile; 4] = [
    Profile {
        name: "Priya Raman",
        title: "Chief Technology Officer",
        tenure_years: 3,
        previous: "Director of Engineering, large cloud provider",
    },
    Profile {
        name: "Daniel Okafor",
        title: "VP Platform Engineering",
        tenure_years: 2,
        previous: "Head of Infrastructure, fintech scale-up",
    },
    Profile {
        name: "Sofia Lindqvist",
        title: "Director of Data Engineering",
        tenure_years: 4,
        previous: "Staff Engineer, analytics vendor",
    },
    Profile {
        name: "Marcus Chen",
        title: "VP Product",
        tenure_years: 2,
        previous: "Group PM, collaboration software company",
    },
];

pub(super) fn render(args: &LinkedinIntelligenceArgs) -> Result<String, HandlerError> {
    let company = &args.company;
    let mut out = String::new();

    writeln!(out, "# LinkedIn Intelligence: {company}")?;
    writeln!(out)?;
    if let Some(role) = &args.role {
        writeln!(out, "**Role focus:** {role}")?;
    }
    writeln!(out, "**Research depth:** {}", title_case(args.research_depth.as_str()))?;
    writeln!(out)?;
    writeln!(out, "> Profiles below are illustrative placeholders, not scraped data.")?;
    writeln!(out)?;

    let shown = match args.research_depth {
        ResearchDepth::Basic => 2,
        ResearchDepth::Detailed | ResearchDepth::Comprehensive => PROFILES.len(),
    };

    writeln!(out, "## Key Engineering Leaders")?;
    for profile in &PROFILES[..shown] {
        writeln!(out, "- **{}**, {} ({} years)", profile.name, profile.title, profile.tenure_years)?;
        if args.research_depth != ResearchDepth::Basic {
            writeln!(out, "  - Previously: {}", profile.previous)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Hiring Signals")?;
    writeln!(out, "- 42 open engineering roles, 9 at staff level or above")?;
    writeln!(out, "- Median engineering tenure: 2.4 years")?;
    if args.research_depth == ResearchDepth::Comprehensive {
        writeln!(out)?;
        writeln!(out, "## Talent Flow")?;
        writeln!(out, "- Top inbound source: two large cloud providers")?;
        writeln!(out, "- Top outbound destination: early-stage infrastructure startups")?;
        writeln!(out, "- Leadership attrition in the last 12 months: 2 directors")?;
    }

    if args.export_data.unwrap_or(false) {
        writeln!(out)?;
        writeln!(out, "## Export")?;
        writeln!(out, "```csv")?;
        writeln!(out, "company,name,title,tenure_years")?;
        for profile in &PROFILES[..shown] {
            writeln!(out, "{company},{},{},{}", profile.name, profile.title, profile.tenure_years)?;
        }
        writeln!(out, "```")?;
    }

    Ok(out)
}
