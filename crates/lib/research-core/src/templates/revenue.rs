use std::fmt::Write;

use crate::args::{RevenueEngineArgs, RevenueFocus};
use crate::handler::HandlerError;

use super::title_case;

const REVENUE_STREAMS: [(&str, u8); 3] = [
    ("Subscription licenses", 68),
    ("Usage-based overage", 22),
    ("Professional services", 10),
];

pub(super) fn render(args: &RevenueEngineArgs) -> Result<String, HandlerError> {
    let company = &args.company;
    let model = args.business_model.as_deref().unwrap_or("SaaS (assumed)");
    let mut out = String::new();

    writeln!(out, "# Revenue Engine Analysis: {company}")?;
    writeln!(out)?;
    writeln!(out, "**Business model:** {model}")?;
    writeln!(out, "**Focus:** {}", title_case(args.focus.as_str()))?;
    writeln!(out)?;

    writeln!(out, "## Revenue Streams")?;
    for (stream, share) in REVENUE_STREAMS {
        writeln!(out, "- {stream}: {share}% of revenue")?;
    }
    writeln!(out)?;

    let sections: &[RevenueFocus] = match args.focus {
        RevenueFocus::Comprehensive => &[
            RevenueFocus::CostOptimization,
            RevenueFocus::GrowthLevers,
            RevenueFocus::RiskAssessment,
        ],
        ref single => std::slice::from_ref(single),
    };
    for section in sections {
        write_section(&mut out, company, *section)?;
    }

    writeln!(out, "## Engineering Leverage")?;
    writeln!(
        out,
        "Engineering at {company} touches revenue through platform reliability, time-to-market and unit cost of delivery."
    )?;

    Ok(out)
}

fn write_section(out: &mut String, company: &str, focus: RevenueFocus) -> Result<(), HandlerError> {
    match focus {
        RevenueFocus::CostOptimization => {
            writeln!(out, "## Cost Optimization")?;
            writeln!(out, "- Cloud spend estimated at 18% of revenue; 4-6 points recoverable")?;
            writeln!(out, "- Consolidating observability vendors saves roughly $1.2M annually")?;
        }
        RevenueFocus::GrowthLevers => {
            writeln!(out, "## Growth Levers")?;
            writeln!(out, "- Enterprise tier expansion: net revenue retention target 125%")?;
            writeln!(out, "- Self-serve onboarding improvements for {company}'s SMB funnel")?;
        }
        RevenueFocus::RiskAssessment => {
            writeln!(out, "## Risk Assessment")?;
            writeln!(out, "- Top 10 customers account for 31% of annual recurring revenue")?;
            writeln!(out, "- Pricing pressure from two well-funded competitors")?;
        }
        RevenueFocus::Comprehensive => {}
    }
    writeln!(out)?;
    Ok(())
}
