//! Email renderer: normalized studies to copy-pasteable HTML.
//!
//! Pure string building, no DOM access, so everything here is testable on
//! the host.
//!
//! ```text
//! studies ──▶ group_by_brand ──▶ order_brands ──▶ generate_email_html ──▶ HTML
//!                                      ▲
//! config  ──▶ ReportSettings ──────────┘ (focal brand, month, greeting...)
//! ```
//!
//! Field values are inserted verbatim. The output is meant to be pasted
//! into an email client, not served as a page.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{ReportDefaults, REPORT_DEFAULTS};
use crate::types::{ReportConfig, Study};

/// Group name for studies without a brand.
pub const OTHER_BRAND: &str = "Other";

const SPACER: &str = "<p>&nbsp;</p>";

// =============================================================================
// Settings
// =============================================================================

/// Report settings resolved against their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub month: String,
    pub year: String,
    pub greeting: String,
    pub closing: String,
    pub client_product: String,
}

impl ReportSettings {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::with_defaults(config, &REPORT_DEFAULTS)
    }

    /// A key that is absent or falsy (empty, zero, false, null) takes the
    /// default.
    pub fn with_defaults(config: &ReportConfig, defaults: &ReportDefaults) -> Self {
        let setting = |key: &str, default: &str| {
            config
                .get(key)
                .and_then(config_text)
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            month: setting("Report_Month", defaults.month),
            year: setting("Report_Year", defaults.year),
            greeting: setting("Greeting", defaults.greeting),
            closing: setting("Closing", defaults.closing),
            client_product: setting("Client_Product", defaults.client_product),
        }
    }
}

/// Display text of a truthy config value.
pub fn config_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Group studies by brand. Studies keep their order inside a group.
pub fn group_by_brand(studies: &[Study]) -> BTreeMap<&str, Vec<&Study>> {
    let mut groups: BTreeMap<&str, Vec<&Study>> = BTreeMap::new();
    for study in studies {
        let brand = if study.brand.is_empty() {
            OTHER_BRAND
        } else {
            study.brand.as_str()
        };
        groups.entry(brand).or_default().push(study);
    }
    groups
}

/// Brand names in email order: the focal brand first, then string order.
pub fn order_brands<'a>(groups: &BTreeMap<&'a str, Vec<&'a Study>>, focal: &str) -> Vec<&'a str> {
    let mut order = Vec::with_capacity(groups.len());
    if let Some((&brand, _)) = groups.get_key_value(focal) {
        order.push(brand);
    }
    order.extend(groups.keys().copied().filter(|&b| b != focal));
    order
}

/// Whether `Updated_Fields` mentions the field, ignoring case.
///
/// Substring match: "Primary Completion Date" also counts as a
/// "Completion Date" update.
pub fn is_field_updated(study: &Study, field_name: &str) -> bool {
    if study.updated_fields.is_empty() {
        return false;
    }
    study
        .updated_fields
        .to_lowercase()
        .contains(&field_name.to_lowercase())
}

// =============================================================================
// HTML
// =============================================================================

/// Build the full email body.
pub fn generate_email_html(config: &ReportConfig, studies: &[Study]) -> String {
    let settings = ReportSettings::from_config(config);
    let groups = group_by_brand(studies);

    let mut html = intro_html(&settings);

    for brand in order_brands(&groups, &settings.client_product) {
        html.push_str(&format!("<p><strong>{}</strong></p>\n", brand));
        for study in &groups[brand] {
            html.push_str(&study_html(study, &settings.month));
        }
    }

    html.push_str(&format!("<p>{}</p>", settings.closing));
    html
}

fn intro_html(settings: &ReportSettings) -> String {
    format!(
        "<p>{greeting}</p>\n{SPACER}\n\
         <p>Please see below the studies listed on ClinicalTrials.gov that were updated in {month} \
         with strategic implications for {client}. If you wish to obtain full details for these \
         studies, please click on the NCT number, which will take you to the ClinicalTrials.gov \
         page for that trial. The full search output is also attached for your review. Because of \
         the large number of updates, the studies are organized by agent below.</p>\n\
         {SPACER}\n<p><strong>Updated studies:</strong></p>\n{SPACER}",
        greeting = settings.greeting,
        month = settings.month,
        client = settings.client_product,
    )
}

/// One study paragraph followed by a spacer.
fn study_html(study: &Study, month: &str) -> String {
    let updated_tag = |field: &str| {
        if is_field_updated(study, field) {
            format!(" [updated in {}]", month)
        } else {
            String::new()
        }
    };

    let mut html = String::new();
    let new_tag = if study.is_new_study { " [new study]" } else { "" };
    html.push_str(&format!("<p>{}{}<br>", study.study_title, new_tag));
    html.push_str(&format!(
        "<a href=\"{}\">{}</a><br>",
        study.study_url, study.nct_number
    ));

    if !study.phase.is_empty() {
        html.push_str(&format!("Phase: {}<br>", study.phase));
    }
    html.push_str(&format!("Study sponsor: {}<br>", study.sponsor));
    html.push_str(&format!("Study status: {}<br>", study.status));
    html.push_str(&format!("Start date: {}<br>", study.start_date));

    if !study.primary_completion_date.is_empty() {
        html.push_str(&format!(
            "Primary completion date: {}{}<br>",
            study.primary_completion_date,
            updated_tag("Primary Completion Date")
        ));
    }
    if !study.completion_date.is_empty() {
        html.push_str(&format!(
            "Completion date: {}{}<br>",
            study.completion_date,
            updated_tag("Completion Date")
        ));
    }
    if !study.results_first_posted.is_empty() {
        html.push_str(&format!(
            "Results posted: {}{}<br>",
            study.results_first_posted,
            updated_tag("Results First Posted")
        ));
    }
    if !study.strategic_implications.is_empty() {
        html.push_str(&format!(
            "Strategic implications: {}",
            study.strategic_implications
        ));
    }

    html.push_str("</p>\n");
    html.push_str(SPACER);
    html.push('\n');
    html
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const INTRO_DECEMBER: &str = concat!(
        "<p>Good afternoon Sun Pharma team,</p>\n<p>&nbsp;</p>\n",
        "<p>Please see below the studies listed on ClinicalTrials.gov that were updated in December ",
        "with strategic implications for ILUMYA®. If you wish to obtain full details for these ",
        "studies, please click on the NCT number, which will take you to the ClinicalTrials.gov ",
        "page for that trial. The full search output is also attached for your review. Because of ",
        "the large number of updates, the studies are organized by agent below.</p>\n",
        "<p>&nbsp;</p>\n<p><strong>Updated studies:</strong></p>\n<p>&nbsp;</p>",
    );

    fn study(brand: &str, nct: &str) -> Study {
        Study {
            brand: brand.into(),
            nct_number: nct.into(),
            study_title: format!("Title {}", nct),
            study_url: format!("https://clinicaltrials.gov/study/{}", nct),
            ..Default::default()
        }
    }

    fn config(pairs: &[(&str, Value)]) -> ReportConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = ReportSettings::from_config(&ReportConfig::new());
        assert_eq!(settings.month, "December");
        assert_eq!(settings.year, "2025");
        assert_eq!(settings.greeting, "Good afternoon Sun Pharma team,");
        assert_eq!(settings.closing, "Kind regards,");
        assert_eq!(settings.client_product, "ILUMYA®");
    }

    #[test]
    fn test_falsy_config_values_use_defaults() {
        let settings = ReportSettings::from_config(&config(&[
            ("Report_Month", json!("")),
            ("Report_Year", json!(0)),
            ("Greeting", json!(false)),
            ("Closing", Value::Null),
        ]));
        assert_eq!(settings.month, "December");
        assert_eq!(settings.year, "2025");
        assert_eq!(settings.greeting, "Good afternoon Sun Pharma team,");
        assert_eq!(settings.closing, "Kind regards,");
    }

    #[test]
    fn test_config_values_are_stringified() {
        let settings = ReportSettings::from_config(&config(&[
            ("Report_Month", json!("January")),
            ("Report_Year", json!(2026)),
            ("Client_Product", json!("Taltz®")),
        ]));
        assert_eq!(settings.month, "January");
        assert_eq!(settings.year, "2026");
        assert_eq!(settings.client_product, "Taltz®");
    }

    #[test]
    fn test_group_by_brand_keeps_study_order() {
        let studies = vec![
            study("Taltz®", "NCT1"),
            study("", "NCT2"),
            study("Taltz®", "NCT3"),
        ];
        let groups = group_by_brand(&studies);
        assert_eq!(groups.len(), 2);
        let taltz: Vec<&str> = groups["Taltz®"].iter().map(|s| s.nct_number.as_str()).collect();
        assert_eq!(taltz, vec!["NCT1", "NCT3"]);
        assert_eq!(groups[OTHER_BRAND][0].nct_number, "NCT2");
    }

    #[test]
    fn test_focal_brand_first_then_string_order() {
        let studies = vec![
            study("Taltz®", "NCT1"),
            study("Bimzelx®", "NCT2"),
            study("ILUMYA®", "NCT3"),
            study("Skyrizi®", "NCT4"),
        ];
        let groups = group_by_brand(&studies);
        assert_eq!(
            order_brands(&groups, "ILUMYA®"),
            vec!["ILUMYA®", "Bimzelx®", "Skyrizi®", "Taltz®"]
        );
        // Absent focal brand: plain order
        assert_eq!(
            order_brands(&groups, "Otezla®"),
            vec!["Bimzelx®", "ILUMYA®", "Skyrizi®", "Taltz®"]
        );
    }

    #[test]
    fn test_string_order_is_case_aware() {
        let studies = vec![study("bimekizumab", "NCT1"), study("Zasocitinib", "NCT2")];
        let groups = group_by_brand(&studies);
        assert_eq!(order_brands(&groups, "ILUMYA®"), vec!["Zasocitinib", "bimekizumab"]);
    }

    #[test]
    fn test_is_field_updated() {
        let mut s = study("Taltz®", "NCT1");
        assert!(!is_field_updated(&s, "Completion Date"));

        s.updated_fields = "primary completion date, Status".into();
        assert!(is_field_updated(&s, "Primary Completion Date"));
        assert!(is_field_updated(&s, "Completion Date"));
        assert!(!is_field_updated(&s, "Results First Posted"));
    }

    #[test]
    fn test_single_study_exact_output() {
        let studies = vec![Study {
            brand: "Taltz®".into(),
            is_new_study: true,
            nct_number: "NCT001".into(),
            study_title: "T1".into(),
            study_url: "u1".into(),
            phase: "3".into(),
            sponsor: "Lilly".into(),
            status: "Recruiting".into(),
            start_date: "12/3/2025".into(),
            ..Default::default()
        }];

        let expected = format!(
            "{}{}{}",
            INTRO_DECEMBER,
            concat!(
                "<p><strong>Taltz®</strong></p>\n",
                "<p>T1 [new study]<br><a href=\"u1\">NCT001</a><br>Phase: 3<br>",
                "Study sponsor: Lilly<br>Study status: Recruiting<br>Start date: 12/3/2025<br>",
                "</p>\n<p>&nbsp;</p>\n",
            ),
            "<p>Kind regards,</p>"
        );
        assert_eq!(generate_email_html(&ReportConfig::new(), &studies), expected);
    }

    #[test]
    fn test_optional_lines() {
        let mut s = study("ILUMYA®", "NCT002");
        s.updated_fields = "Primary Completion Date".into();
        s.primary_completion_date = "6/30/2026".into();
        s.completion_date = "TBD".into();
        s.results_first_posted = "1/2/2026".into();
        s.strategic_implications = "Watch closely".into();

        let html = generate_email_html(&config(&[("Report_Month", json!("January"))]), &[s]);

        assert!(!html.contains("Phase:"));
        assert!(html.contains("Primary completion date: 6/30/2026 [updated in January]<br>"));
        // Substring rule: the primary update also tags the completion date
        assert!(html.contains("Completion date: TBD [updated in January]<br>"));
        assert!(html.contains("Results posted: 1/2/2026<br>"));
        assert!(html.contains("Strategic implications: Watch closely</p>\n<p>&nbsp;</p>\n"));
    }

    #[test]
    fn test_empty_optional_lines_are_omitted() {
        let html = generate_email_html(&ReportConfig::new(), &[study("Taltz®", "NCT1")]);
        assert!(!html.contains("Primary completion date"));
        assert!(!html.contains("Completion date"));
        assert!(!html.contains("Results posted"));
        assert!(!html.contains("Strategic implications"));
        assert!(html.contains("Start date: <br></p>"));
    }

    #[test]
    fn test_focal_brand_rendered_first() {
        let mut taltz = study("Taltz®", "NCT001");
        taltz.is_new_study = true;
        let ilumya = study("ILUMYA®", "NCT002");

        let html = generate_email_html(
            &config(&[("Client_Product", json!("ILUMYA®"))]),
            &[taltz, ilumya],
        );

        let ilumya_at = html.find("<p><strong>ILUMYA®</strong></p>").unwrap();
        let taltz_at = html.find("<p><strong>Taltz®</strong></p>").unwrap();
        assert!(ilumya_at < taltz_at);
        assert!(html.contains("<p>Title NCT001 [new study]<br>"));
        assert!(html.contains("<p>Title NCT002<br>"));
    }

    #[test]
    fn test_no_studies() {
        let html = generate_email_html(&ReportConfig::new(), &[]);
        assert_eq!(html, format!("{}<p>Kind regards,</p>", INTRO_DECEMBER));
    }

    #[test]
    fn test_values_are_not_escaped() {
        let mut s = study("A&B", "NCT1");
        s.sponsor = "<b>Acme</b>".into();
        let html = generate_email_html(&ReportConfig::new(), &[s]);
        assert!(html.contains("<p><strong>A&B</strong></p>"));
        assert!(html.contains("Study sponsor: <b>Acme</b><br>"));
    }
}
