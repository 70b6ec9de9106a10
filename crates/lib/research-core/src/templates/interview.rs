use std::fmt::Write;

use crate::args::{InterviewPreparationArgs, InterviewType};
use crate::handler::HandlerError;

use super::title_case;

pub(super) fn render(args: &InterviewPreparationArgs) -> Result<String, HandlerError> {
    let InterviewPreparationArgs {
        company,
        role,
        interview_type,
        focus_areas,
    } = args;
    let mut out = String::new();

    writeln!(out, "# Interview Preparation: {role} at {company}")?;
    writeln!(out)?;
    writeln!(out, "**Interview type:** {}", title_case(interview_type.as_str()))?;
    writeln!(out)?;

    writeln!(out, "## Likely Panel")?;
    writeln!(out, "- Priya Raman, CTO (hiring manager)")?;
    writeln!(out, "- Marcus Chen, VP Product (cross-functional partner)")?;
    writeln!(out, "- Elena Ruiz, VP People (culture and leadership)")?;
    writeln!(out, "- Two senior engineering directors (peer loop)")?;
    writeln!(out)?;

    let formats: &[InterviewType] = match interview_type {
        InterviewType::Comprehensive => &[
            InterviewType::Technical,
            InterviewType::Behavioral,
            InterviewType::CaseStudy,
        ],
        single => std::slice::from_ref(single),
    };
    for format in formats {
        write_questions(&mut out, company, role, *format)?;
    }

    if !focus_areas.is_empty() {
        writeln!(out, "## Focus Areas")?;
        for area in focus_areas {
            writeln!(
                out,
                "- {}: bring one concrete story with measurable outcomes relevant to {company}.",
                title_case(area)
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Questions to Ask")?;
    writeln!(out, "1. What would make the {role} hire a clear success after 12 months?")?;
    writeln!(out, "2. Where does {company} feel the most engineering friction today?")?;

    Ok(out)
}

fn write_questions(
    out: &mut String,
    company: &str,
    role: &str,
    format: InterviewType,
) -> Result<(), HandlerError> {
    match format {
        InterviewType::Technical => {
            writeln!(out, "## Technical")?;
            writeln!(out, "- Walk through an architecture you evolved under growth pressure.")?;
            writeln!(out, "- How would you approach reliability targets for {company}'s core platform?")?;
        }
        InterviewType::Behavioral => {
            writeln!(out, "## Behavioral")?;
            writeln!(out, "- Tell us about a time you turned around an underperforming team.")?;
            writeln!(out, "- How do you handle disagreement with a peer executive?")?;
        }
        InterviewType::CaseStudy => {
            writeln!(out, "## Case Study")?;
            writeln!(
                out,
                "- As {role}, you inherit a missed launch and a frustrated sales team. What are your first two weeks?"
            )?;
        }
        InterviewType::Comprehensive => {}
    }
    writeln!(out)?;
    Ok(())
}
