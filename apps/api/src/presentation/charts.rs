//! Chart models for the front end: match gauge, skills pie, improvement radar.
//!
//! These are derived from an analysis for display only. The radar's priority
//! scores in particular come from list position, not from the model.

use serde::Serialize;

const GAUGE_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeChart {
    pub title: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub bands: Vec<GaugeBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub count: usize,
    /// One decimal place, e.g. `"66.7%"`.
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsPie {
    pub title: &'static str,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub area: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementRadar {
    pub title: &'static str,
    pub axes: Vec<RadarAxis>,
}

/// Numeric value of a percentage string such as `"73%"`.
/// Anything unparseable (or not finite) reads as 0.
pub fn parse_match_percentage(raw: &str) -> f64 {
    raw.trim_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn match_gauge(match_percentage: &str) -> GaugeChart {
    GaugeChart {
        title: "JD Match",
        value: parse_match_percentage(match_percentage),
        min: 0.0,
        max: GAUGE_MAX,
        bands: vec![
            GaugeBand {
                from: 0.0,
                to: 30.0,
                color: "#FFE5E5",
            },
            GaugeBand {
                from: 30.0,
                to: 70.0,
                color: "#E6E6FA",
            },
            GaugeBand {
                from: 70.0,
                to: 100.0,
                color: "#E6F3EF",
            },
        ],
    }
}

/// Required skills found verbatim in the present list vs the rest.
/// `None` when either list is empty.
pub fn skills_pie(required: &[String], present: &[String]) -> Option<SkillsPie> {
    if required.is_empty() || present.is_empty() {
        return None;
    }

    let present_count = required.iter().filter(|s| present.contains(s)).count();
    let missing_count = required.len() - present_count;
    let total = required.len() as f64;
    let percent = |count: usize| format!("{:.1}%", count as f64 / total * 100.0);

    Some(SkillsPie {
        title: "Skills Match Analysis",
        slices: vec![
            PieSlice {
                label: "Present Skills",
                count: present_count,
                percent: percent(present_count),
            },
            PieSlice {
                label: "Missing Skills",
                count: missing_count,
                percent: percent(missing_count),
            },
        ],
    })
}

/// Synthetic descending priority for position `i` of `n`: `100 - i * (100 / n)`.
pub fn priority_scores(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = GAUGE_MAX / n as f64;
    (0..n).map(|i| GAUGE_MAX - i as f64 * step).collect()
}

/// `None` when there are no improvement areas.
pub fn improvement_radar(areas: &[String]) -> Option<ImprovementRadar> {
    if areas.is_empty() {
        return None;
    }
    let axes = areas
        .iter()
        .zip(priority_scores(areas.len()))
        .map(|(area, score)| RadarAxis {
            area: area.clone(),
            score,
        })
        .collect();

    Some(ImprovementRadar {
        title: "Areas for Improvement",
        axes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_percentage_parsing() {
        assert_eq!(parse_match_percentage("73%"), 73.0);
        assert_eq!(parse_match_percentage("82.5%"), 82.5);
        assert_eq!(parse_match_percentage("40"), 40.0);
        assert_eq!(parse_match_percentage("N/A"), 0.0);
        assert_eq!(parse_match_percentage(""), 0.0);
        assert_eq!(parse_match_percentage("NaN%"), 0.0);
    }

    #[test]
    fn test_gauge_uses_parsed_value() {
        let gauge = match_gauge("91%");
        assert_eq!(gauge.value, 91.0);
        assert_eq!(gauge.bands.len(), 3);
        assert_eq!(gauge.bands[2].to, 100.0);
    }

    #[test]
    fn test_skills_pie_counts_verbatim_matches() {
        let required = strings(&["Rust", "Kafka", "SQL"]);
        let present = strings(&["Rust", "sql", "Go"]);
        let pie = skills_pie(&required, &present).unwrap();

        assert_eq!(pie.slices[0].count, 1);
        assert_eq!(pie.slices[1].count, 2);
        assert_eq!(pie.slices[0].percent, "33.3%");
        assert_eq!(pie.slices[1].percent, "66.7%");
    }

    #[test]
    fn test_skills_pie_needs_both_lists() {
        assert!(skills_pie(&[], &strings(&["Rust"])).is_none());
        assert!(skills_pie(&strings(&["Rust"]), &[]).is_none());
    }

    #[test]
    fn test_priority_scores_descend_linearly() {
        assert_eq!(priority_scores(4), vec![100.0, 75.0, 50.0, 25.0]);
        assert_eq!(priority_scores(1), vec![100.0]);
        assert!(priority_scores(0).is_empty());
    }

    #[test]
    fn test_radar_keeps_area_order() {
        let radar = improvement_radar(&strings(&["Cloud", "Testing"])).unwrap();
        assert_eq!(radar.axes[0].area, "Cloud");
        assert_eq!(radar.axes[0].score, 100.0);
        assert_eq!(radar.axes[1].score, 50.0);
        assert!(improvement_radar(&[]).is_none());
    }
}
