//! Heuristic extraction of CV fields from free text.
//!
//! Everything here is approximate: keywords are matched first-hit and missing
//! values become placeholder strings. Callers must treat the output as a
//! preview, never as validated candidate data.

use std::sync::LazyLock;

use regex::Regex;

use crate::dto::candidate_dto::CvPreviewResponse;
use crate::models::candidate::Candidate;
use crate::models::profile::{EducationEntry, ExperienceEntry};

pub const DEGREE_PLACEHOLDER: &str = "Degree";
pub const INSTITUTION_PLACEHOLDER: &str = "Educational Institution";
pub const POSITION_PLACEHOLDER: &str = "Position";
pub const COMPANY_PLACEHOLDER: &str = "Company";

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(ph\.?d|doctorate|master(?:'s)?|msc|m\.sc|mba|bachelor(?:'s)?|bsc|b\.sc|associate degree|diploma|certificate|hbo|mbo)\b",
    )
    .expect("degree pattern")
});

static INSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(university|universiteit|college|institute|school|academy|hogeschool|polytechnic)\b")
        .expect("institution pattern")
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(manager|engineer|developer|consultant|analyst|director|specialist|coordinator|assistant|designer|architect|recruiter|officer|advisor|administrator|lead|intern)\b",
    )
    .expect("title pattern")
});

static MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+((?:19|20)\d{2})\b",
    )
    .expect("month-year pattern")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern"));

static ONGOING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(present|current|now|heden|ongoing)\b").expect("ongoing pattern")
});

/// Splits free text into trimmed, non-empty segments on line and list separators.
fn segments(text: &str) -> Vec<&str> {
    text.split(['\n', ',', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_date_only(segment: &str) -> bool {
    let stripped = MONTH_YEAR_RE.replace_all(segment, "");
    let stripped = YEAR_RE.replace_all(&stripped, "");
    let stripped = ONGOING_RE.replace_all(&stripped, "");
    stripped.chars().all(|c| !c.is_alphanumeric())
}

/// Date mentions in order of appearance. Month-year pairs win over the bare
/// year they contain.
pub fn find_dates(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = MONTH_YEAR_RE
        .find_iter(text)
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect();
    let spans: Vec<(usize, usize)> = MONTH_YEAR_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    for year in YEAR_RE.find_iter(text) {
        let covered = spans
            .iter()
            .any(|(start, end)| year.start() >= *start && year.end() <= *end);
        if !covered {
            found.push((year.start(), year.as_str().to_string()));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, date)| date).collect()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn extract_education(text: &str) -> EducationEntry {
    let parts = segments(text);

    let degree = parts
        .iter()
        .find(|s| DEGREE_RE.is_match(s))
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEGREE_PLACEHOLDER.to_string());

    let institution = parts
        .iter()
        .find(|s| INSTITUTION_RE.is_match(s) && **s != degree)
        .or_else(|| parts.iter().find(|s| INSTITUTION_RE.is_match(s)))
        .map(|s| s.to_string())
        .unwrap_or_else(|| INSTITUTION_PLACEHOLDER.to_string());

    let mut dates = find_dates(text).into_iter();
    let start_date = dates.next();
    let end_date = dates.next();

    EducationEntry {
        degree,
        institution,
        location: None,
        start_date,
        end_date,
        description: non_empty(text),
    }
}

pub fn extract_experience(text: &str) -> ExperienceEntry {
    let parts = segments(text);
    let title_segment = parts.iter().find(|s| TITLE_RE.is_match(s)).copied();

    let (title, mut company) = match title_segment {
        Some(segment) => match split_at_company(segment) {
            Some((title, company)) => (title.to_string(), Some(company.to_string())),
            None => (segment.to_string(), None),
        },
        None => (POSITION_PLACEHOLDER.to_string(), None),
    };

    if company.is_none() {
        company = parts
            .iter()
            .find(|s| Some(**s) != title_segment && !TITLE_RE.is_match(s) && !is_date_only(s))
            .map(|s| s.to_string());
    }

    let mut dates = find_dates(text).into_iter();
    let start_date = dates.next();
    let end_date = dates.next();
    let current = ONGOING_RE.is_match(text);

    ExperienceEntry {
        title,
        company: company.unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string()),
        location: None,
        start_date,
        end_date: if current { None } else { end_date },
        current,
        description: non_empty(text),
    }
}

/// "Engineer at Acme" / "Engineer @ Acme" -> ("Engineer", "Acme").
fn split_at_company(segment: &str) -> Option<(&str, &str)> {
    let lower = segment.to_lowercase();
    let (idx, sep_len) = lower
        .find(" at ")
        .map(|i| (i, 4))
        .or_else(|| lower.find(" @ ").map(|i| (i, 3)))?;
    // Lowercasing can change byte lengths for non-ASCII text.
    if lower.len() != segment.len() {
        return None;
    }
    let title = segment[..idx].trim();
    let company = segment[idx + sep_len..].trim();
    (!title.is_empty() && !company.is_empty()).then_some((title, company))
}

fn fill_education(entry: &EducationEntry) -> EducationEntry {
    let blank = entry.degree.trim().is_empty() || entry.institution.trim().is_empty();
    match (&entry.description, blank) {
        (Some(text), true) => {
            let mined = extract_education(text);
            EducationEntry {
                degree: non_empty(&entry.degree).unwrap_or(mined.degree),
                institution: non_empty(&entry.institution).unwrap_or(mined.institution),
                location: entry.location.clone(),
                start_date: entry.start_date.clone().or(mined.start_date),
                end_date: entry.end_date.clone().or(mined.end_date),
                description: entry.description.clone(),
            }
        }
        _ => entry.clone(),
    }
}

fn fill_experience(entry: &ExperienceEntry) -> ExperienceEntry {
    let blank = entry.title.trim().is_empty() || entry.company.trim().is_empty();
    match (&entry.description, blank) {
        (Some(text), true) => {
            let mined = extract_experience(text);
            ExperienceEntry {
                title: non_empty(&entry.title).unwrap_or(mined.title),
                company: non_empty(&entry.company).unwrap_or(mined.company),
                location: entry.location.clone(),
                start_date: entry.start_date.clone().or(mined.start_date),
                end_date: entry.end_date.clone().or(mined.end_date),
                current: entry.current || mined.current,
                description: entry.description.clone(),
            }
        }
        _ => entry.clone(),
    }
}

/// Builds the CV template preview for a candidate. Structured entries are used
/// as-is; blank ones are mined from their description, and empty sections fall
/// back to the candidate's free-text profile and summary.
pub fn build_cv_preview(candidate: &Candidate) -> CvPreviewResponse {
    let free_text = [candidate.profile.as_deref(), candidate.summary.as_deref()]
        .into_iter()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let experience = if candidate.experience.is_empty() {
        if free_text.is_empty() {
            Vec::new()
        } else {
            vec![extract_experience(&free_text)]
        }
    } else {
        candidate.experience.iter().map(fill_experience).collect()
    };

    let education = if candidate.education.is_empty() {
        if free_text.is_empty() {
            Vec::new()
        } else {
            vec![extract_education(&free_text)]
        }
    } else {
        candidate.education.iter().map(fill_education).collect()
    };

    let headline = candidate
        .current_position
        .as_deref()
        .and_then(non_empty)
        .or_else(|| experience.first().map(|e| e.title.clone()))
        .unwrap_or_else(|| POSITION_PLACEHOLDER.to_string());

    CvPreviewResponse {
        candidate_id: candidate.id,
        full_name: candidate.full_name(),
        email: candidate.email.clone(),
        phone: candidate.phone.clone(),
        location: candidate.location.clone(),
        headline,
        summary: candidate.summary.clone().or_else(|| candidate.profile.clone()),
        experience,
        education,
        skills: candidate.skills.clone(),
        languages: candidate.languages.clone(),
        certifications: candidate.certifications.clone(),
        approximate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_picks_degree_institution_and_years() {
        let entry =
            extract_education("Bachelor of Science in Computer Science, University of Amsterdam, 2015 - 2019");
        assert_eq!(entry.degree, "Bachelor of Science in Computer Science");
        assert_eq!(entry.institution, "University of Amsterdam");
        assert_eq!(entry.start_date.as_deref(), Some("2015"));
        assert_eq!(entry.end_date.as_deref(), Some("2019"));
    }

    #[test]
    fn education_falls_back_to_placeholders() {
        let entry = extract_education("self-taught, lots of reading");
        assert_eq!(entry.degree, DEGREE_PLACEHOLDER);
        assert_eq!(entry.institution, INSTITUTION_PLACEHOLDER);
        assert!(entry.start_date.is_none());
    }

    #[test]
    fn empty_text_still_yields_a_record() {
        let edu = extract_education("");
        let exp = extract_experience("");
        assert_eq!(edu.degree, DEGREE_PLACEHOLDER);
        assert!(edu.description.is_none());
        assert_eq!(exp.title, POSITION_PLACEHOLDER);
        assert_eq!(exp.company, COMPANY_PLACEHOLDER);
        assert!(!exp.current);
    }

    #[test]
    fn experience_splits_title_and_company() {
        let entry = extract_experience("Senior Software Engineer at Acme Corp\nJan 2020 - Present");
        assert_eq!(entry.title, "Senior Software Engineer");
        assert_eq!(entry.company, "Acme Corp");
        assert_eq!(entry.start_date.as_deref(), Some("Jan 2020"));
        assert!(entry.current);
        assert!(entry.end_date.is_none());
    }

    #[test]
    fn experience_uses_neighbouring_segment_as_company() {
        let entry = extract_experience("Globex Logistics\nProject Manager\nMarch 2016 - June 2019");
        assert_eq!(entry.title, "Project Manager");
        assert_eq!(entry.company, "Globex Logistics");
        assert_eq!(entry.start_date.as_deref(), Some("March 2016"));
        assert_eq!(entry.end_date.as_deref(), Some("June 2019"));
    }

    #[test]
    fn month_year_does_not_double_count_its_year() {
        assert_eq!(find_dates("Sep 2018 until 2021"), vec!["Sep 2018", "2021"]);
    }
}
