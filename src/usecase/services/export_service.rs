use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::entities::campaign::{CampaignRecord, CAMPAIGN_COLUMNS};
use crate::domain::entities::snapshot::ReportMetrics;

pub const REPORT_TITLE: &str = "ADmyBRAND Analytics Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "analytics-data.csv",
            ExportFormat::Report => "analytics-report.html",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "html",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Report => "text/html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Report => "HTML report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub contents: String,
    pub rows: usize,
}

pub fn export_csv(records: &[&CampaignRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        // Values go out verbatim; a comma inside a name shifts the columns.
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CAMPAIGN_COLUMNS)
        .context("failed to write csv header")?;
    for record in records {
        writer
            .write_record(record.to_fields())
            .with_context(|| format!("failed to write csv row for campaign #{}", record.id))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv writer: {}", err.error()))?;
    String::from_utf8(bytes).context("csv output is not valid utf-8")
}

const REPORT_STYLES: &str = r#"
    body { font-family: Arial, sans-serif; margin: 20px; }
    .header { text-align: center; margin-bottom: 30px; }
    .metrics { display: flex; justify-content: space-around; margin-bottom: 30px; }
    .metric { text-align: center; padding: 20px; border: 1px solid #ddd; border-radius: 8px; }
    .metric h3 { margin: 0; color: #0d6efd; }
    .metric p { margin: 5px 0 0 0; color: #666; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
    th { background-color: #f8f9fa; }
    .status-active { color: #198754; font-weight: bold; }
    .status-paused { color: #ffc107; font-weight: bold; }
"#;

pub fn export_report(
    records: &[&CampaignRecord],
    metrics: &ReportMetrics,
    generated_on: NaiveDate,
) -> String {
    let metric_cards = [
        (metrics.revenue_label(), "Total Revenue"),
        (metrics.users_label(), "Total Users"),
        (metrics.conversions_label(), "Conversions"),
        (metrics.growth_label(), "Growth Rate"),
    ]
    .iter()
    .map(|(value, label)| {
        format!(
            "      <div class=\"metric\">\n        <h3>{value}</h3>\n        <p>{label}</p>\n      </div>\n"
        )
    })
    .collect::<String>();

    let rows = records
        .iter()
        .map(|record| report_row(record))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{styles}</style>
  </head>
  <body>
    <div class="header">
      <h1>{title}</h1>
      <p>Generated on {date}</p>
    </div>
    <div class="metrics">
{metric_cards}    </div>
    <h2>Campaign Performance</h2>
    <table>
      <thead>
        <tr>
          <th>Campaign</th>
          <th>Clicks</th>
          <th>Impressions</th>
          <th>CTR (%)</th>
          <th>Cost ($)</th>
          <th>Conversions</th>
          <th>Status</th>
        </tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
  </body>
</html>
"#,
        title = REPORT_TITLE,
        styles = REPORT_STYLES,
        date = generated_on.format("%Y-%m-%d"),
    )
}

fn report_row(record: &CampaignRecord) -> String {
    format!(
        "        <tr>\n          <td>{}</td>\n          <td>{}</td>\n          <td>{}</td>\n          <td>{}%</td>\n          <td>{}</td>\n          <td>{}</td>\n          <td class=\"status-{}\">{}</td>\n        </tr>\n",
        html_escape(&record.campaign),
        group_thousands(record.clicks),
        group_thousands(record.impressions),
        record.ctr,
        group_thousands(record.cost),
        record.conversions,
        record.status.key(),
        record.status,
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::campaign::{CampaignId, CampaignStatus, Ctr};

    fn record(id: u32, name: &str, status: CampaignStatus) -> CampaignRecord {
        CampaignRecord {
            id: CampaignId(id),
            campaign: name.to_string(),
            clicks: 4_321,
            impressions: 98_765,
            ctr: Ctr::from_hundredths(437),
            cost: 1_250,
            conversions: 42,
            status,
        }
    }

    fn metrics() -> ReportMetrics {
        ReportMetrics {
            total_revenue: 612_345,
            total_users: 51_200,
            total_conversions: 11_980,
            growth_rate: 12.5,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn csv_has_header_then_rows_in_order() {
        let a = record(7, "Campaign 7", CampaignStatus::Active);
        let b = record(3, "Campaign 3", CampaignStatus::Paused);

        let csv = export_csv(&[&a, &b]).expect("csv export should succeed");

        assert_eq!(
            csv,
            "id,campaign,clicks,impressions,ctr,cost,conversions,status\n\
             7,Campaign 7,4321,98765,4.37,1250,42,Active\n\
             3,Campaign 3,4321,98765,4.37,1250,42,Paused\n"
        );
    }

    #[test]
    fn csv_for_empty_result_is_header_only() {
        let csv = export_csv(&[]).expect("csv export should succeed");
        assert_eq!(csv, "id,campaign,clicks,impressions,ctr,cost,conversions,status\n");
    }

    #[test]
    fn csv_does_not_quote_embedded_delimiters() {
        let tricky = record(1, "Brand, Search", CampaignStatus::Active);

        let csv = export_csv(&[&tricky]).expect("csv export should succeed");

        let row = csv.lines().nth(1).expect("data row");
        assert_eq!(row.split(',').count(), CAMPAIGN_COLUMNS.len() + 1);
        assert!(!csv.contains('"'));
    }

    #[test]
    fn report_embeds_metrics_and_status_classes() {
        let a = record(1, "Campaign 1", CampaignStatus::Active);
        let b = record(2, "Campaign 2", CampaignStatus::Paused);

        let html = export_report(&[&a, &b], &metrics(), date());

        assert!(html.contains("<title>ADmyBRAND Analytics Report</title>"));
        assert!(html.contains("Generated on 2024-03-09"));
        assert!(html.contains("<h3>0.6M</h3>"));
        assert!(html.contains("<h3>51.2K</h3>"));
        assert!(html.contains("<h3>12.0K</h3>"));
        assert!(html.contains("<h3>12.5%</h3>"));
        assert!(html.contains("<td class=\"status-active\">Active</td>"));
        assert!(html.contains("<td class=\"status-paused\">Paused</td>"));
        assert!(html.contains("<td>4,321</td>"));
        assert!(html.contains("<td>4.37%</td>"));
        assert_eq!(html.matches("<tr>").count(), 3, "header row plus one per record");
    }

    #[test]
    fn report_escapes_campaign_names() {
        let sneaky = record(1, "<b>Launch</b> & more", CampaignStatus::Active);

        let html = export_report(&[&sneaky], &metrics(), date());

        assert!(html.contains("&lt;b&gt;Launch&lt;/b&gt; &amp; more"));
        assert!(!html.contains("<b>Launch"));
    }

    #[test]
    fn empty_report_keeps_table_header() {
        let html = export_report(&[], &metrics(), date());
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains("<th>Campaign</th>"));
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn formats_carry_download_conventions() {
        assert_eq!(ExportFormat::Csv.file_name(), "analytics-data.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Report.file_name(), "analytics-report.html");
        assert_eq!(ExportFormat::Report.extension(), "html");
    }
}
