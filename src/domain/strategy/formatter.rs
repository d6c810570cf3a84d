//! Formatting of raw strategy-assistant replies into display sections.
//!
//! The assistant is prompted to answer with labelled sections (STRATEGY
//! OVERVIEW, MEDIATION PROCESS, ...) but nothing guarantees it will. This
//! module turns one reply into a [`FormattedContent`] record, degrading to
//! the untouched raw text whenever the structure is not there. Formatting
//! is total: no input can make it fail.

use serde::{Deserialize, Serialize};

/// Structured view of one assistant reply.
///
/// Every optional field is populated only when its section header was found
/// and had non-empty content; `raw_content` always carries the original
/// reply verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedContent {
    /// Free text under STRATEGY OVERVIEW.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Free text under CYNEFIN DOMAIN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Numbered steps under MEDIATION PROCESS, in reply order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<Vec<String>>,
    /// Items under ANTICIPATED EFFECTS, in reply order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<String>>,
    /// Items under CONSIDERATIONS, in reply order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub considerations: Option<Vec<String>>,
    /// The reply exactly as the gateway returned it.
    pub raw_content: String,
}

impl FormattedContent {
    /// Wraps a reply that had no usable structure.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            raw_content: content.into(),
            ..Self::default()
        }
    }

    /// Returns true if any structured field is populated.
    pub fn is_structured(&self) -> bool {
        self.overview.is_some()
            || self.domain.is_some()
            || self.process.is_some()
            || self.effects.is_some()
            || self.considerations.is_some()
    }
}

/// The recognized section labels, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Overview,
    Domain,
    Process,
    Effects,
    Considerations,
}

const SECTION_LABELS: [(&str, Section); 5] = [
    ("STRATEGY OVERVIEW", Section::Overview),
    ("CYNEFIN DOMAIN", Section::Domain),
    ("MEDIATION PROCESS", Section::Process),
    ("ANTICIPATED EFFECTS", Section::Effects),
    ("CONSIDERATIONS", Section::Considerations),
];

/// Formats a raw assistant reply into structured display content.
///
/// The reply is tokenized in a single pass: every occurrence of a
/// recognized header (case-insensitive, optional trailing colon) starts a
/// section whose body runs to the next recognized header or end of text.
/// Bodies are assigned by header identity, so sections may appear in any
/// order. The first occurrence of a header wins.
///
/// If neither an overview nor a process was captured, all partial
/// extraction is discarded and only the raw reply is kept: a degraded raw
/// answer beats a misleading half-structured one.
pub fn format_response(content: &str) -> FormattedContent {
    let mut formatted = FormattedContent::raw(content);

    let occurrences = find_sections(content);
    for (idx, occurrence) in occurrences.iter().enumerate() {
        let body_end = occurrences
            .get(idx + 1)
            .map(|next| next.header_start)
            .unwrap_or(content.len());
        let body = content[occurrence.body_start..body_end].trim();

        match occurrence.section {
            Section::Overview if formatted.overview.is_none() => {
                formatted.overview = non_empty(body);
            }
            Section::Domain if formatted.domain.is_none() => {
                formatted.domain = non_empty(body);
            }
            Section::Process if formatted.process.is_none() => {
                formatted.process = non_empty_items(split_items(body, numbered_marker));
            }
            Section::Effects if formatted.effects.is_none() => {
                formatted.effects =
                    non_empty_items(split_items(body, |t, from| {
                        earliest(numbered_marker(t, from), dash_marker(t, from))
                    }));
            }
            Section::Considerations if formatted.considerations.is_none() => {
                formatted.considerations =
                    non_empty_items(split_items(body, |t, from| {
                        earliest(dash_marker(t, from), bullet_marker(t, from))
                    }));
            }
            _ => {}
        }
    }

    // Without the two anchor sections the partial structure is more likely
    // noise than signal; fall back to the raw reply.
    if formatted.overview.is_none() && formatted.process.is_none() {
        return FormattedContent::raw(content);
    }

    formatted
}

/// One recognized header occurrence within the reply.
struct SectionOccurrence {
    section: Section,
    header_start: usize,
    body_start: usize,
}

/// Scans the reply for recognized headers, in text order.
///
/// Matching is ASCII case-insensitive on byte positions; header labels are
/// pure ASCII so every match lies on a char boundary.
fn find_sections(content: &str) -> Vec<SectionOccurrence> {
    let bytes = content.as_bytes();
    let mut occurrences = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let mut matched_len = None;
        for (label, section) in SECTION_LABELS {
            let label_bytes = label.as_bytes();
            if bytes.len() - i >= label_bytes.len()
                && bytes[i..i + label_bytes.len()].eq_ignore_ascii_case(label_bytes)
            {
                let mut body_start = i + label_bytes.len();
                if bytes.get(body_start) == Some(&b':') {
                    body_start += 1;
                }
                occurrences.push(SectionOccurrence {
                    section,
                    header_start: i,
                    body_start,
                });
                matched_len = Some(label_bytes.len());
                break;
            }
        }
        i += matched_len.unwrap_or(1);
    }

    occurrences
}

/// Splits a section body at the markers yielded by `next_marker`, trimming
/// fragments and dropping empties, preserving order.
fn split_items<F>(body: &str, next_marker: F) -> Vec<String>
where
    F: Fn(&str, usize) -> Option<(usize, usize)>,
{
    let mut items = Vec::new();
    let mut pos = 0;

    while let Some((start, end)) = next_marker(body, pos) {
        push_non_empty(&mut items, &body[pos..start]);
        pos = end;
    }
    push_non_empty(&mut items, &body[pos..]);

    items
}

fn push_non_empty(items: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        items.push(trimmed.to_string());
    }
}

/// Finds the next `<digits>.` marker at or after `from`.
fn numbered_marker(text: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'.' {
                return Some((start, j + 1));
            }
            i = j;
        } else {
            i += 1;
        }
    }
    None
}

/// Finds the next newline-hyphen marker at or after `from`.
fn dash_marker(text: &str, from: usize) -> Option<(usize, usize)> {
    text[from..].find("\n-").map(|p| (from + p, from + p + 2))
}

/// Finds the next newline-bullet marker at or after `from`.
fn bullet_marker(text: &str, from: usize) -> Option<(usize, usize)> {
    text[from..]
        .find("\n\u{2022}")
        .map(|p| (from + p, from + p + 1 + '\u{2022}'.len_utf8()))
}

/// Picks whichever marker comes first in the text.
fn earliest(
    a: Option<(usize, usize)>,
    b: Option<(usize, usize)>,
) -> Option<(usize, usize)> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn non_empty(body: &str) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

fn non_empty_items(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod full_structure {
        use super::*;

        const REPLY: &str = "STRATEGY OVERVIEW: Rebuild trust gradually.\n\
            CYNEFIN DOMAIN: Complex - relational dynamics dominate.\n\
            MEDIATION PROCESS:\n\
            1. Meet each student individually\n\
            2. Agree on ground rules\n\
            3. Joint session\n\
            ANTICIPATED EFFECTS:\n\
            - Better trust\n\
            - Shared ownership\n\
            CONSIDERATIONS:\n\
            - Parents may need separate updates\n\
            \u{2022} Avoid assigning blame";

        #[test]
        fn captures_all_five_sections() {
            let formatted = format_response(REPLY);

            assert_eq!(
                formatted.overview.as_deref(),
                Some("Rebuild trust gradually.")
            );
            assert_eq!(
                formatted.domain.as_deref(),
                Some("Complex - relational dynamics dominate.")
            );
            assert_eq!(
                formatted.process,
                Some(vec![
                    "Meet each student individually".to_string(),
                    "Agree on ground rules".to_string(),
                    "Joint session".to_string(),
                ])
            );
            assert_eq!(
                formatted.effects,
                Some(vec![
                    "Better trust".to_string(),
                    "Shared ownership".to_string(),
                ])
            );
            assert_eq!(
                formatted.considerations,
                Some(vec![
                    "Parents may need separate updates".to_string(),
                    "Avoid assigning blame".to_string(),
                ])
            );
        }

        #[test]
        fn raw_content_is_verbatim() {
            let formatted = format_response(REPLY);
            assert_eq!(formatted.raw_content, REPLY);
        }

        #[test]
        fn headers_match_case_insensitively() {
            let reply = "strategy overview: Keep it calm.\nmediation process:\n1. Listen";
            let formatted = format_response(reply);
            assert_eq!(formatted.overview.as_deref(), Some("Keep it calm."));
            assert_eq!(formatted.process, Some(vec!["Listen".to_string()]));
        }

        #[test]
        fn colon_after_header_is_optional() {
            let reply = "STRATEGY OVERVIEW Keep it short.\nMEDIATION PROCESS\n1. Talk";
            let formatted = format_response(reply);
            assert_eq!(formatted.overview.as_deref(), Some("Keep it short."));
            assert_eq!(formatted.process, Some(vec!["Talk".to_string()]));
        }
    }

    mod section_order {
        use super::*;

        #[test]
        fn reordered_headers_still_extract_per_field() {
            let reply = "MEDIATION PROCESS:\n1. Talk\n2. Listen\n\
                STRATEGY OVERVIEW: Use empathy.\n\
                CYNEFIN DOMAIN: Complex";
            let formatted = format_response(reply);

            assert_eq!(formatted.overview.as_deref(), Some("Use empathy."));
            assert_eq!(formatted.domain.as_deref(), Some("Complex"));
            assert_eq!(
                formatted.process,
                Some(vec!["Talk".to_string(), "Listen".to_string()])
            );
        }

        #[test]
        fn first_occurrence_of_duplicate_header_wins() {
            let reply = "STRATEGY OVERVIEW: First take.\n\
                STRATEGY OVERVIEW: Second take.\n\
                MEDIATION PROCESS:\n1. Talk";
            let formatted = format_response(reply);
            assert_eq!(formatted.overview.as_deref(), Some("First take."));
        }
    }

    mod fallback {
        use super::*;

        #[test]
        fn unstructured_reply_keeps_only_raw_content() {
            let reply = "Just a plain reply with no structure.";
            let formatted = format_response(reply);

            assert_eq!(formatted, FormattedContent::raw(reply));
            assert!(!formatted.is_structured());
        }

        #[test]
        fn effects_without_anchor_sections_fall_back_to_raw() {
            // Partial structure without overview or process is discarded.
            let reply = "ANTICIPATED EFFECTS:\n- Better trust\n- Shared ownership";
            let formatted = format_response(reply);

            assert_eq!(formatted, FormattedContent::raw(reply));
        }

        #[test]
        fn domain_alone_falls_back_to_raw() {
            let reply = "CYNEFIN DOMAIN: Complex";
            assert_eq!(format_response(reply), FormattedContent::raw(reply));
        }

        #[test]
        fn overview_alone_is_enough_to_keep_structure() {
            let reply = "STRATEGY OVERVIEW: Stay neutral.";
            let formatted = format_response(reply);
            assert_eq!(formatted.overview.as_deref(), Some("Stay neutral."));
            assert!(formatted.is_structured());
        }

        #[test]
        fn empty_input_yields_raw_only() {
            let formatted = format_response("");
            assert_eq!(formatted, FormattedContent::raw(""));
        }
    }

    mod empty_sections {
        use super::*;

        #[test]
        fn header_with_empty_body_leaves_field_absent() {
            // Empty sections render as nothing, so the field stays absent
            // rather than becoming an empty list.
            let reply = "STRATEGY OVERVIEW: Use empathy.\n\
                MEDIATION PROCESS:\n\
                ANTICIPATED EFFECTS:\n- Better trust";
            let formatted = format_response(reply);

            assert_eq!(formatted.overview.as_deref(), Some("Use empathy."));
            assert!(formatted.process.is_none());
            assert_eq!(formatted.effects, Some(vec!["Better trust".to_string()]));
        }

        #[test]
        fn whitespace_only_body_is_also_absent() {
            let reply = "STRATEGY OVERVIEW:   \n\nMEDIATION PROCESS:\n1. Talk";
            let formatted = format_response(reply);
            assert!(formatted.overview.is_none());
            assert_eq!(formatted.process, Some(vec!["Talk".to_string()]));
        }
    }

    mod splitting {
        use super::*;

        #[test]
        fn scenario_overview_and_process() {
            let reply = "STRATEGY OVERVIEW: Use empathy.\nMEDIATION PROCESS:\n1. Talk\n2. Listen";
            let formatted = format_response(reply);

            assert_eq!(formatted.overview.as_deref(), Some("Use empathy."));
            assert_eq!(
                formatted.process,
                Some(vec!["Talk".to_string(), "Listen".to_string()])
            );
            assert!(formatted.domain.is_none());
            assert!(formatted.effects.is_none());
            assert!(formatted.considerations.is_none());
        }

        #[test]
        fn process_handles_double_digit_steps() {
            let body: String = (1..=11)
                .map(|n| format!("{}. Step {}\n", n, n))
                .collect();
            let reply = format!("STRATEGY OVERVIEW: Long plan.\nMEDIATION PROCESS:\n{}", body);
            let formatted = format_response(&reply);

            let process = formatted.process.unwrap();
            assert_eq!(process.len(), 11);
            assert_eq!(process[10], "Step 11");
        }

        #[test]
        fn effects_split_on_numbers_and_dashes() {
            let reply = "STRATEGY OVERVIEW: x\nANTICIPATED EFFECTS:\n1. Calmer classroom\n- Fewer incidents";
            let formatted = format_response(reply);
            assert_eq!(
                formatted.effects,
                Some(vec![
                    "Calmer classroom".to_string(),
                    "Fewer incidents".to_string(),
                ])
            );
        }

        #[test]
        fn considerations_split_on_dashes_and_bullets() {
            let reply = "STRATEGY OVERVIEW: x\nCONSIDERATIONS:\n- Timing matters\n\u{2022} Keep notes";
            let formatted = format_response(reply);
            assert_eq!(
                formatted.considerations,
                Some(vec!["Timing matters".to_string(), "Keep notes".to_string()])
            );
        }

        #[test]
        fn inline_hyphens_do_not_split_considerations() {
            let reply = "STRATEGY OVERVIEW: x\nCONSIDERATIONS:\n- Use age-appropriate language";
            let formatted = format_response(reply);
            assert_eq!(
                formatted.considerations,
                Some(vec!["Use age-appropriate language".to_string()])
            );
        }
    }

    mod purity {
        use super::*;

        #[test]
        fn formatting_twice_yields_equal_output() {
            let reply = "STRATEGY OVERVIEW: Use empathy.\nMEDIATION PROCESS:\n1. Talk\n2. Listen";
            assert_eq!(format_response(reply), format_response(reply));
        }

        #[test]
        fn handles_unicode_without_panicking() {
            let reply = "STRATEGY OVERVIEW: R\u{e9}solution \u{e9}quitable \u{1f91d}\n\
                MEDIATION PROCESS:\n1. \u{c9}couter\n2. Parler";
            let formatted = format_response(reply);
            assert_eq!(
                formatted.process,
                Some(vec!["\u{c9}couter".to_string(), "Parler".to_string()])
            );
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn raw_content_always_equals_input(input in ".{0,400}") {
                let formatted = format_response(&input);
                prop_assert_eq!(formatted.raw_content, input);
            }

            #[test]
            fn formatting_is_idempotent(input in ".{0,400}") {
                prop_assert_eq!(format_response(&input), format_response(&input));
            }

            #[test]
            fn never_panics_on_arbitrary_input(input in "\\PC{0,400}") {
                let _ = format_response(&input);
            }

            #[test]
            // Letters a-m cannot spell any recognized header.
            fn headerless_input_is_raw_only(input in "[a-m ,\\n]{0,200}") {
                let formatted = format_response(&input);
                prop_assert!(!formatted.is_structured());
            }
        }
    }
}
