// Field matchers for certificate text. Each matcher is independent: it reads
// the raw text, returns an ExtractedField, and never consults another
// matcher's result. Matchers that find nothing return missing() — an
// unmatched field is reported absent, never guessed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::certificate::ExtractedField;
use crate::models::enums::WorkCapacity;

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

static START_DATE_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:from|commencing|start(?:ing)?\s+date|valid\s+from)\s*:?\s*(\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2})",
    )
    .unwrap()
});

static END_DATE_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:to|until|expir(?:es|y)|end\s+date|review\s+on)\s*:?\s*(\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2})",
    )
    .unwrap()
});

static ANY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2}").unwrap()
});

/// Parse DD/MM/YYYY or ISO YYYY-MM-DD. Impossible dates return None.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

fn labeled_date(text: &str, pattern: &Regex) -> Option<ExtractedField<NaiveDate>> {
    let caps = pattern.captures(text)?;
    let raw = caps.get(1)?.as_str();
    let date = parse_date(raw)?;
    Some(ExtractedField::found(date, 0.9, Some(raw.to_string())))
}

/// Nth parseable unlabeled date in the document, used as a positional
/// fallback when no labeled date matched. Low confidence: position is a
/// weak signal.
fn positional_date(text: &str, index: usize) -> Option<ExtractedField<NaiveDate>> {
    let raw = ANY_DATE.find_iter(text).nth(index)?.as_str();
    let date = parse_date(raw)?;
    Some(ExtractedField::found(date, 0.45, Some(raw.to_string())))
}

pub fn match_start_date(text: &str) -> ExtractedField<NaiveDate> {
    labeled_date(text, &START_DATE_LABELED)
        .or_else(|| positional_date(text, 0))
        .unwrap_or_else(ExtractedField::missing)
}

pub fn match_end_date(text: &str) -> ExtractedField<NaiveDate> {
    labeled_date(text, &END_DATE_LABELED)
        .or_else(|| positional_date(text, 1))
        .unwrap_or_else(ExtractedField::missing)
}

// ---------------------------------------------------------------------------
// Work capacity
// ---------------------------------------------------------------------------

/// Capacity cues in priority order: unfit > partial > fit. The first cue that
/// matches wins, so text carrying multiple cues ("unfit ... until fit for
/// duties") resolves to the highest-priority classification, not the last.
static CAPACITY_CUES: LazyLock<Vec<(WorkCapacity, Regex, f32)>> = LazyLock::new(|| {
    vec![
        (
            WorkCapacity::Unfit,
            Regex::new(r"(?i)totally\s+unfit|unfit\s+for\s+(?:all\s+)?(?:work|duties)|no\s+capacity\s+for\s+work").unwrap(),
            0.9,
        ),
        (
            WorkCapacity::Unfit,
            Regex::new(r"(?i)\bunfit\b").unwrap(),
            0.7,
        ),
        (
            WorkCapacity::Partial,
            Regex::new(r"(?i)partial\s+capacity|capacity\s+for\s+(?:some|suitable)\s+(?:work|duties)").unwrap(),
            0.9,
        ),
        (
            WorkCapacity::Partial,
            Regex::new(r"(?i)suitable\s+duties|modified\s+duties|restricted\s+duties|light\s+duties").unwrap(),
            0.7,
        ),
        (
            WorkCapacity::Fit,
            Regex::new(r"(?i)full\s+capacity|fit\s+for\s+(?:pre-?injury\s+)?(?:normal\s+)?duties|fit\s+for\s+work").unwrap(),
            0.85,
        ),
        (
            WorkCapacity::Fit,
            Regex::new(r"(?i)full\s+duties|cleared\s+(?:for|to)\s+work").unwrap(),
            0.65,
        ),
    ]
});

pub fn match_work_capacity(text: &str) -> ExtractedField<WorkCapacity> {
    for (capacity, pattern, confidence) in CAPACITY_CUES.iter() {
        if let Some(m) = pattern.find(text) {
            return ExtractedField::found(*capacity, *confidence, Some(m.as_str().to_string()));
        }
    }
    ExtractedField::missing()
}

// ---------------------------------------------------------------------------
// Restrictions
// ---------------------------------------------------------------------------

static RESTRICTIONS_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:restrictions?|limitations?)\s*:\s*(.*)$").unwrap()
});

static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-•*]\s*(.+)$").unwrap()
});

/// Extract the restriction list following a `Restrictions:` anchor. Inline
/// text on the anchor line counts as the first item; bullet lines after the
/// anchor are collected until a blank line or a new `Heading:` line.
pub fn match_restrictions(text: &str) -> ExtractedField<Vec<String>> {
    let Some(caps) = RESTRICTIONS_ANCHOR.captures(text) else {
        return ExtractedField::missing();
    };

    let mut items = Vec::new();
    let inline = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if !inline.is_empty() {
        items.push(inline.to_string());
    }

    let anchor_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    // The anchor match ends just before its newline; step over it so the
    // first iterated line is the one below the anchor.
    let rest = &text[anchor_end..];
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    for line in rest.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if let Some(bullet) = BULLET_LINE.captures(line) {
            items.push(bullet[1].trim().to_string());
        } else if trimmed.ends_with(':') {
            // New heading ends the block.
            break;
        } else if items.is_empty() {
            // Plain continuation line directly under a bare anchor.
            items.push(trimmed.to_string());
        } else {
            break;
        }
    }

    if items.is_empty() {
        return ExtractedField::missing();
    }
    ExtractedField::found(items, 0.8, None)
}

// ---------------------------------------------------------------------------
// Hours per week
// ---------------------------------------------------------------------------

static HOURS_PER_WEEK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}(?:\.\d+)?)\s*(?:hours?|hrs?)\s*(?:per\s+week|/\s*week|weekly)").unwrap()
});

/// Matched anywhere in the document, independent of the restrictions block.
pub fn match_hours_per_week(text: &str) -> ExtractedField<f32> {
    let Some(caps) = HOURS_PER_WEEK.captures(text) else {
        return ExtractedField::missing();
    };
    match caps[1].parse::<f32>() {
        Ok(hours) => {
            ExtractedField::found(hours, 0.85, Some(caps[0].to_string()))
        }
        Err(_) => ExtractedField::missing(),
    }
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

static DIAGNOSIS_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*diagnosis\s*:\s*(.+)$").unwrap()
});

static INJURY_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:injury|condition)\s*:\s*(.+)$").unwrap()
});

pub fn match_diagnosis(text: &str) -> ExtractedField<String> {
    if let Some(caps) = DIAGNOSIS_LABELED.captures(text) {
        let value = caps[1].trim().to_string();
        return ExtractedField::found(value.clone(), 0.85, Some(value));
    }
    if let Some(caps) = INJURY_LABELED.captures(text) {
        let value = caps[1].trim().to_string();
        return ExtractedField::found(value.clone(), 0.6, Some(value));
    }
    ExtractedField::missing()
}

// ---------------------------------------------------------------------------
// Doctor name
// ---------------------------------------------------------------------------

static DOCTOR_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:treating\s+doctor|doctor|practitioner|certifying\s+doctor)\s*:\s*(.+)$")
        .unwrap()
});

static DOCTOR_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bDr\.?\s+([A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+)?)").unwrap()
});

pub fn match_doctor_name(text: &str) -> ExtractedField<String> {
    if let Some(caps) = DOCTOR_LABELED.captures(text) {
        let value = caps[1].trim().to_string();
        return ExtractedField::found(value.clone(), 0.85, Some(value));
    }
    if let Some(caps) = DOCTOR_TITLE.captures(text) {
        let value = format!("Dr {}", caps[1].trim());
        return ExtractedField::found(value, 0.7, Some(caps[0].to_string()));
    }
    ExtractedField::missing()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Dates ───────────────────────────────────────────────────────

    #[test]
    fn labeled_start_date_transposed_to_iso() {
        let field = match_start_date("Certificate valid from: 17/03/2024 to 14/04/2024");
        assert_eq!(
            field.value,
            Some(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap())
        );
        assert!(field.confidence >= 0.9);
        assert_eq!(field.raw_span.as_deref(), Some("17/03/2024"));
    }

    #[test]
    fn labeled_end_date_found() {
        let field = match_end_date("Unfit for work from 01/02/2024 until 29/02/2024");
        assert_eq!(
            field.value,
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn iso_dates_accepted() {
        let field = match_start_date("Start date: 2024-05-02");
        assert_eq!(
            field.value,
            Some(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
        );
    }

    #[test]
    fn unlabeled_dates_fall_back_to_position_with_low_confidence() {
        let text = "Seen on 05/01/2024. Next review 19/01/2024.";
        let start = match_start_date(text);
        let end = match_end_date(text);
        assert_eq!(start.value, Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert_eq!(end.value, Some(NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()));
        assert!(start.confidence <= 0.5);
        assert!(end.confidence <= 0.5);
    }

    #[test]
    fn impossible_date_left_missing_not_guessed() {
        let field = match_start_date("from 32/13/2024");
        assert!(field.value.is_none());
        assert_eq!(field.confidence, 0.0);
    }

    #[test]
    fn no_date_is_missing() {
        let field = match_start_date("no dates in this text at all");
        assert!(field.value.is_none());
        assert_eq!(field.confidence, 0.0);
    }

    // ── Work capacity ───────────────────────────────────────────────

    #[test]
    fn totally_unfit_high_confidence() {
        let field = match_work_capacity("The worker is totally unfit for all duties.");
        assert_eq!(field.value, Some(WorkCapacity::Unfit));
        assert!(field.confidence >= 0.85);
    }

    #[test]
    fn partial_capacity_detected() {
        let field = match_work_capacity("Has partial capacity for suitable duties.");
        assert_eq!(field.value, Some(WorkCapacity::Partial));
    }

    #[test]
    fn fit_for_duties_detected() {
        let field = match_work_capacity("Fit for pre-injury duties from next week.");
        assert_eq!(field.value, Some(WorkCapacity::Fit));
    }

    #[test]
    fn unfit_wins_over_fit_when_both_present() {
        // Priority order is total: unfit > partial > fit.
        let field =
            match_work_capacity("Currently unfit for work; expected to be fit for duties by June.");
        assert_eq!(field.value, Some(WorkCapacity::Unfit));
    }

    #[test]
    fn partial_wins_over_fit() {
        let field = match_work_capacity("Partial capacity now, full capacity expected later.");
        assert_eq!(field.value, Some(WorkCapacity::Partial));
    }

    #[test]
    fn no_cue_is_missing() {
        let field = match_work_capacity("Patient attended for review.");
        assert!(field.value.is_none());
        assert_eq!(field.confidence, 0.0);
    }

    // ── Restrictions ────────────────────────────────────────────────

    #[test]
    fn bullet_restrictions_collected_in_order() {
        let text = "Restrictions:\n- No lifting over 5kg\n- No prolonged standing\n- Avoid ladder work\n\nOther notes follow.";
        let field = match_restrictions(text);
        assert_eq!(
            field.value,
            Some(vec![
                "No lifting over 5kg".to_string(),
                "No prolonged standing".to_string(),
                "Avoid ladder work".to_string(),
            ])
        );
        assert!((field.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn inline_restriction_captured() {
        let field = match_restrictions("Restrictions: no overhead reaching\n");
        assert_eq!(field.value, Some(vec!["no overhead reaching".to_string()]));
    }

    #[test]
    fn restrictions_stop_at_next_heading() {
        let text = "Limitations:\n- Seated work only\nDiagnosis:\n- not a restriction";
        let field = match_restrictions(text);
        assert_eq!(field.value, Some(vec!["Seated work only".to_string()]));
    }

    #[test]
    fn no_anchor_is_missing() {
        let field = match_restrictions("- No lifting over 5kg\n- Rest as needed");
        assert!(field.value.is_none());
    }

    // ── Hours per week ──────────────────────────────────────────────

    #[test]
    fn hours_per_week_matched_anywhere() {
        let field = match_hours_per_week("May work a maximum of 15 hours per week initially.");
        assert_eq!(field.value, Some(15.0));
        assert!(field.confidence >= 0.8);
    }

    #[test]
    fn fractional_hours_matched() {
        let field = match_hours_per_week("Cleared for 22.5 hrs/week");
        assert_eq!(field.value, Some(22.5));
    }

    #[test]
    fn no_hours_is_missing() {
        let field = match_hours_per_week("Hours to be determined at next review.");
        assert!(field.value.is_none());
    }

    // ── Diagnosis & doctor ──────────────────────────────────────────

    #[test]
    fn labeled_diagnosis_high_confidence() {
        let field = match_diagnosis("Diagnosis: L4/L5 disc protrusion\n");
        assert_eq!(field.value.as_deref(), Some("L4/L5 disc protrusion"));
        assert!(field.confidence >= 0.85);
    }

    #[test]
    fn injury_label_lower_confidence() {
        let field = match_diagnosis("Injury: right shoulder strain\n");
        assert_eq!(field.value.as_deref(), Some("right shoulder strain"));
        assert!(field.confidence < 0.85);
    }

    #[test]
    fn labeled_doctor_preferred_over_title_match() {
        let text = "Treating doctor: Dr Sarah Nguyen\nReferred by Dr Jones";
        let field = match_doctor_name(text);
        assert_eq!(field.value.as_deref(), Some("Dr Sarah Nguyen"));
        assert!(field.confidence >= 0.85);
    }

    #[test]
    fn title_match_fallback() {
        let field = match_doctor_name("Reviewed by Dr. Alan Wu on site.");
        assert_eq!(field.value.as_deref(), Some("Dr Alan Wu"));
        assert!(field.confidence < 0.85);
    }
}
