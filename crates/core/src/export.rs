//! Printable report rendering.
//!
//! Builds a self-contained HTML document from one [`Report`], suitable for a
//! browser print dialog or archiving. Formatting only: no network access, no
//! external assets. Every interpolated value is HTML-escaped.

use crate::report::Report;

/// Escapes a value for interpolation into HTML text or attribute context.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; padding: 40px; color: #1e293b; }
    .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #3b82f6; padding-bottom: 20px; }
    .header h1 { margin: 0; color: #3b82f6; font-size: 28px; }
    .header p { margin: 5px 0; color: #64748b; }
    .patient-info { background: #f8fafc; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
    .info-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 15px; margin-top: 15px; }
    .info-label { font-weight: bold; color: #64748b; font-size: 12px; text-transform: uppercase; }
    .info-value { color: #1e293b; font-size: 16px; }
    .scan-image { text-align: center; margin: 20px 0; padding: 20px; background: #f8fafc; border-radius: 8px; }
    .scan-image img { max-width: 100%; max-height: 400px; border-radius: 8px; }
    .diagnosis-section { background: #eff6ff; padding: 20px; border-radius: 8px; margin-bottom: 20px; border-left: 4px solid #3b82f6; }
    .risk-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; font-size: 14px; margin-right: 10px; }
    .risk-low { background: #d1fae5; color: #065f46; }
    .risk-moderate { background: #fed7aa; color: #92400e; }
    .risk-high { background: #fee2e2; color: #991b1b; }
    .confidence-badge { background: #dbeafe; color: #1e40af; }
    .clinical-notes { background: #fef3c7; padding: 20px; border-radius: 8px; margin-top: 20px; border-left: 4px solid #f59e0b; }
    .recommendations { background: #f0fdf4; padding: 20px; border-radius: 8px; margin-top: 20px; border-left: 4px solid #10b981; }
    .recommendations li { margin: 8px 0; color: #475569; line-height: 1.6; }
    .footer { margin-top: 40px; padding-top: 20px; border-top: 2px solid #e2e8f0; text-align: center; color: #94a3b8; font-size: 12px; }
    @media print { body { padding: 20px; } }
"#;

/// Renders the printable HTML document for one report.
pub fn render_printable_report(report: &Report) -> String {
    let patient_name = escape_html(&report.patient_name);
    let scan_date = escape_html(&report.scan_date());
    let risk_class = report.risk_level.label().to_ascii_lowercase();

    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Medical Report - {patient_name}</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <div class="header">
      <h1>CardioScan Medical Report</h1>
      <p>AI-Assisted Cardiac Scan Analysis</p>
      <p>Generated on: {scan_date}</p>
    </div>

    <div class="patient-info">
      <h2>Patient Information</h2>
      <div class="info-grid">
        <div class="info-item"><div class="info-label">Patient Name</div><div class="info-value">{patient_name}</div></div>
        <div class="info-item"><div class="info-label">Age</div><div class="info-value">{age} years</div></div>
        <div class="info-item"><div class="info-label">Gender</div><div class="info-value">{gender}</div></div>
        <div class="info-item"><div class="info-label">Scan Type</div><div class="info-value">{scan_type}</div></div>
        <div class="info-item"><div class="info-label">Scan Date</div><div class="info-value">{scan_date}</div></div>
        <div class="info-item"><div class="info-label">Report ID</div><div class="info-value">{report_id}</div></div>
      </div>
    </div>
"#,
        age = report.age,
        gender = report.gender.display(),
        scan_type = escape_html(report.scan_type.label()),
        report_id = report.id,
    );

    if let Some(image_url) = &report.image_url {
        html.push_str(&format!(
            r#"
    <div class="scan-image">
      <h3>Scan Image</h3>
      <img src="{}" alt="Scan Image" />
    </div>
"#,
            escape_html(image_url)
        ));
    }

    html.push_str(&format!(
        r#"
    <div class="diagnosis-section">
      <h3>Diagnosis Results</h3>
      <div>
        <span class="risk-badge risk-{risk_class}">{risk} RISK</span>
        <span class="risk-badge confidence-badge">{confidence}% Confidence</span>
      </div>
      <h4>Findings:</h4>
      <p><strong>{diagnosis}</strong></p>
      <p>{details}</p>
    </div>
"#,
        risk = escape_html(&report.risk_level.label().to_ascii_uppercase()),
        confidence = report.confidence,
        diagnosis = escape_html(&report.diagnosis),
        details = escape_html(
            report
                .details
                .as_deref()
                .unwrap_or("No additional details provided.")
        ),
    ));

    if let Some(notes) = &report.clinical_notes {
        html.push_str(&format!(
            r#"
    <div class="clinical-notes">
      <h3>Clinical Notes</h3>
      <p>{}</p>
    </div>
"#,
            escape_html(notes)
        ));
    }

    if !report.recommendations.is_empty() {
        let items: String = report
            .recommendations
            .iter()
            .map(|rec| format!("        <li>{}</li>\n", escape_html(rec)))
            .collect();
        html.push_str(&format!(
            r#"
    <div class="recommendations">
      <h3>Recommendations</h3>
      <ul>
{items}      </ul>
    </div>
"#
        ));
    }

    html.push_str(&format!(
        r#"
    <div class="footer">
      <p>This report was generated with AI assistance and must be reviewed by a qualified clinician.</p>
      <p>Not a substitute for professional medical advice, diagnosis, or treatment.</p>
      <p>&copy; {year} CardioScan</p>
    </div>
  </body>
</html>
"#,
        year = report.created_at.format("%Y"),
    ));

    html
}
