//! Tab panels built from a complete analysis.
//!
//! Every field may be present-but-defaulted or shaped differently than the
//! prompt asked for; the builders read through the tolerant accessors and
//! fall back to placeholders instead of failing.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::analysis::result::AnalysisResult;
use crate::presentation::charts::{
    improvement_radar, match_gauge, skills_pie, GaugeChart, ImprovementRadar, SkillsPie,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
    Unknown,
}

impl Importance {
    /// A missing importance reads as medium; an unrecognised one as unknown.
    pub fn from_field(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            None => Importance::Medium,
            Some(s) => match s.as_str() {
                "high" => Importance::High,
                "medium" => Importance::Medium,
                "low" => Importance::Low,
                _ => Importance::Unknown,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndustryContextView {
    pub domain: String,
    pub role_type: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingKeywordView {
    pub keyword: String,
    pub category: Option<String>,
    pub importance: Importance,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentKeywordView {
    pub keyword: String,
    pub category: Option<String>,
    pub match_context: Option<String>,
    pub alignment: Option<String>,
}

/// "Resume Analysis" tab.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewTab {
    pub industry_context: IndustryContextView,
    pub match_gauge: GaugeChart,
    pub profile_summary: String,
    pub missing_keywords: Vec<MissingKeywordView>,
    pub present_keywords: Vec<PresentKeywordView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCheck {
    pub skill: String,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsBreakdown {
    pub required: Vec<SkillCheck>,
    pub present: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnhancementTips {
    pub industry_alignment: Vec<String>,
    pub strategic_tips: Vec<String>,
    pub keyword_placement: Vec<String>,
    pub format_suggestions: Vec<String>,
}

/// "Insights" tab.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsTab {
    pub reasoning: String,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub improvement_radar: Option<ImprovementRadar>,
    pub skills_pie: Option<SkillsPie>,
    /// Only shown alongside the pie.
    pub skills_breakdown: Option<SkillsBreakdown>,
    pub enhancement: EnhancementTips,
}

/// "Interview Prep" tab.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewTab {
    pub industry_knowledge: Vec<String>,
    pub technical_topics: Vec<String>,
    pub common_questions: Vec<String>,
    pub practice_tips: Vec<String>,
    pub study_resources: Vec<String>,
}

/// "Industry Focus" tab.
#[derive(Debug, Clone, Serialize)]
pub struct IndustryTab {
    pub key_performance_indicators: Vec<String>,
    pub certifications: Vec<String>,
    pub tools_and_software: Vec<String>,
    pub career_growth: Vec<String>,
    pub industry_insights: Vec<String>,
}

fn text_or(
    analysis: &AnalysisResult,
    section: &str,
    field: Option<&str>,
    placeholder: &str,
) -> String {
    analysis
        .text_at(section, field)
        .unwrap_or(placeholder)
        .to_string()
}

fn record_text(record: &Map<String, Value>, field: &str) -> Option<String> {
    record.get(field).and_then(Value::as_str).map(String::from)
}

pub fn overview_tab(analysis: &AnalysisResult) -> OverviewTab {
    let missing_keywords = analysis
        .records_at("Keywords_Analysis", "Missing_Keywords")
        .into_iter()
        .filter_map(|kw| {
            Some(MissingKeywordView {
                keyword: record_text(kw, "keyword")?,
                category: record_text(kw, "category"),
                importance: Importance::from_field(kw.get("importance").and_then(Value::as_str)),
                suggestion: record_text(kw, "suggestion"),
            })
        })
        .collect();

    let present_keywords = analysis
        .records_at("Keywords_Analysis", "Present_Keywords")
        .into_iter()
        .filter_map(|kw| {
            Some(PresentKeywordView {
                keyword: record_text(kw, "keyword")?,
                category: record_text(kw, "category"),
                match_context: record_text(kw, "match_context"),
                alignment: record_text(kw, "alignment"),
            })
        })
        .collect();

    OverviewTab {
        industry_context: IndustryContextView {
            domain: text_or(analysis, "Industry_Context", Some("Domain"), "N/A"),
            role_type: text_or(analysis, "Industry_Context", Some("Role_Type"), "N/A"),
            requirements: analysis.list_at("Industry_Context", "Industry_Specific_Requirements"),
        },
        match_gauge: match_gauge(analysis.text_at("JD_Match", None).unwrap_or("0%")),
        profile_summary: text_or(
            analysis,
            "Profile_Summary",
            None,
            "No profile summary available",
        ),
        missing_keywords,
        present_keywords,
    }
}

pub fn insights_tab(analysis: &AnalysisResult) -> InsightsTab {
    let improvement_areas = analysis.list_at("Match_Analysis", "Improvement_Areas");
    let required = analysis.list_at("Role_Analysis", "Required_Skills");
    let present = analysis.list_at("Role_Analysis", "Present_Skills");

    let pie = skills_pie(&required, &present);
    let skills_breakdown = pie.as_ref().map(|_| SkillsBreakdown {
        required: required
            .iter()
            .map(|skill| SkillCheck {
                skill: skill.clone(),
                present: present.contains(skill),
            })
            .collect(),
        present: present.clone(),
    });

    InsightsTab {
        reasoning: text_or(
            analysis,
            "Match_Analysis",
            Some("Reasoning"),
            "No analysis available",
        ),
        strength_areas: analysis.list_at("Match_Analysis", "Strength_Areas"),
        improvement_radar: improvement_radar(&improvement_areas),
        improvement_areas,
        skills_pie: pie,
        skills_breakdown,
        enhancement: EnhancementTips {
            industry_alignment: analysis.list_at("Resume_Enhancement", "Industry_Alignment"),
            strategic_tips: analysis.list_at("Resume_Enhancement", "Strategic_Tips"),
            keyword_placement: analysis.list_at("Resume_Enhancement", "Keyword_Placement"),
            format_suggestions: analysis.list_at("Resume_Enhancement", "Format_Suggestions"),
        },
    }
}

pub fn interview_tab(analysis: &AnalysisResult) -> InterviewTab {
    InterviewTab {
        industry_knowledge: analysis.list_at("Interview_Prep", "Industry_Knowledge"),
        technical_topics: analysis.list_at("Interview_Prep", "Technical_Topics"),
        common_questions: analysis.list_at("Interview_Prep", "Common_Questions"),
        practice_tips: analysis.list_at("Interview_Prep", "Practice_Tips"),
        study_resources: analysis.list_at("Interview_Prep", "Study_Resources"),
    }
}

pub fn industry_tab(analysis: &AnalysisResult) -> IndustryTab {
    IndustryTab {
        key_performance_indicators: analysis
            .list_at("Industry_Specific_Metrics", "Key_Performance_Indicators"),
        certifications: analysis.list_at("Industry_Specific_Metrics", "Certifications"),
        tools_and_software: analysis.list_at("Industry_Specific_Metrics", "Tools_And_Software"),
        career_growth: analysis.list_at("Role_Analysis", "Career_Growth"),
        industry_insights: analysis.list_at("Role_Analysis", "Industry_Insights"),
    }
}
