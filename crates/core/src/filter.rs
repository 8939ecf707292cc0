//! Report filtering, pagination and dashboard aggregation.
//!
//! This module derives the report-history view from the full in-memory report
//! set: a page-worth display slice under three independently settable filters,
//! plus the aggregate counts behind the dashboard summary tiles. It performs
//! no I/O: callers fetch the report set once and filter in memory.
//!
//! ## Time-window policy
//!
//! All period filters share one definition: a window starts at **local
//! midnight of the query day** in the caller's timezone, minus 7 days for
//! `week`, one calendar month for `month` and twelve calendar months for
//! `year`. A report is inside the window when its creation time, viewed in
//! the same timezone, is on or after the window start.
//!
//! ## Dashboard counts
//!
//! [`DashboardCounts`] is always computed over the *entire* report set. The
//! summary tiles must not move when the user narrows the list below them.

use crate::constants::REPORTS_PER_PAGE;
use crate::report::{Report, ScanStatus, ScanType};
use chrono::{DateTime, Days, Months, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;
use utoipa::ToSchema;

/// Status filter selection.
///
/// Unrecognised filter strings fall back to [`StatusFilter::All`]; a malformed
/// selection is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ScanStatus),
}

impl StatusFilter {
    /// Parses a filter selection, defaulting to `All` for anything unknown.
    pub fn parse(input: &str) -> Self {
        match input.parse::<ScanStatus>() {
            Ok(status) => StatusFilter::Only(status),
            Err(()) => StatusFilter::All,
        }
    }

    fn matches(&self, report: &Report) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => report.status == *status,
        }
    }
}

/// Scan-type filter selection.
///
/// Filter codes and display labels come from the same [`ScanType`] table, so
/// a record submitted under the legacy `ecg` code is matched by the `echo`
/// filter like any other echocardiogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanTypeFilter {
    #[default]
    All,
    Only(ScanType),
}

impl ScanTypeFilter {
    /// Parses a filter selection, defaulting to `All` for anything unknown.
    pub fn parse(input: &str) -> Self {
        match ScanType::parse(input) {
            Some(scan_type) => ScanTypeFilter::Only(scan_type),
            None => ScanTypeFilter::All,
        }
    }

    fn matches(&self, report: &Report) -> bool {
        match self {
            ScanTypeFilter::All => true,
            ScanTypeFilter::Only(scan_type) => report.scan_type == *scan_type,
        }
    }
}

/// Time-period filter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimePeriodFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl TimePeriodFilter {
    /// Parses a filter selection, defaulting to `All` for anything unknown.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "today" => TimePeriodFilter::Today,
            "week" => TimePeriodFilter::Week,
            "month" => TimePeriodFilter::Month,
            "year" => TimePeriodFilter::Year,
            _ => TimePeriodFilter::All,
        }
    }

    /// Start of the window for this period, anchored at local midnight of
    /// `now`'s day. `None` means unbounded.
    pub fn window_start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<NaiveDateTime> {
        let midnight = now.date_naive().and_time(NaiveTime::MIN);
        match self {
            TimePeriodFilter::All => None,
            TimePeriodFilter::Today => Some(midnight),
            TimePeriodFilter::Week => midnight.checked_sub_days(Days::new(7)),
            TimePeriodFilter::Month => midnight.checked_sub_months(Months::new(1)),
            TimePeriodFilter::Year => midnight.checked_sub_months(Months::new(12)),
        }
    }

    fn matches<Tz: TimeZone>(&self, report: &Report, now: &DateTime<Tz>) -> bool {
        match self.window_start(now) {
            None => true,
            Some(start) => {
                report
                    .created_at
                    .with_timezone(&now.timezone())
                    .naive_local()
                    >= start
            }
        }
    }
}

/// The three independent filter selections of the history view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub status: StatusFilter,
    pub scan_type: ScanTypeFilter,
    pub period: TimePeriodFilter,
}

impl ReportFilters {
    /// True when no filter narrows the set.
    pub fn is_all(&self) -> bool {
        *self == ReportFilters::default()
    }

    /// True when `report` passes all three filters, evaluated against `now`.
    pub fn matches<Tz: TimeZone>(&self, report: &Report, now: &DateTime<Tz>) -> bool {
        self.status.matches(report)
            && self.scan_type.matches(report)
            && self.period.matches(report, now)
    }

    /// Applies the filters to `reports`, preserving input order.
    pub fn apply<'a, Tz: TimeZone>(
        &self,
        reports: &'a [Report],
        now: &DateTime<Tz>,
    ) -> Vec<&'a Report> {
        reports
            .iter()
            .filter(|report| self.matches(report, now))
            .collect()
    }
}

/// One page of the filtered history view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    /// The display slice, at most [`REPORTS_PER_PAGE`] records, in input order.
    pub reports: Vec<Report>,
    /// 1-based page this slice belongs to.
    pub page: usize,
    /// Number of records that passed the filters, across all pages.
    pub total_filtered: usize,
    /// `ceil(total_filtered / page size)`; zero when nothing matched.
    pub total_pages: usize,
}

impl ReportPage {
    /// Builds the display slice for `page` (1-based) of the filtered set.
    ///
    /// A `page` of zero is treated as page one. A page beyond the last yields
    /// an empty slice, not an error.
    pub fn build<Tz: TimeZone>(
        reports: &[Report],
        filters: &ReportFilters,
        page: usize,
        now: &DateTime<Tz>,
    ) -> Self {
        let filtered = filters.apply(reports, now);
        let total_filtered = filtered.len();
        let total_pages = total_filtered.div_ceil(REPORTS_PER_PAGE);
        let page = page.max(1);

        let slice = filtered
            .into_iter()
            .skip((page - 1) * REPORTS_PER_PAGE)
            .take(REPORTS_PER_PAGE)
            .cloned()
            .collect();

        Self {
            reports: slice,
            page,
            total_filtered,
            total_pages,
        }
    }
}

/// Aggregate counts behind the dashboard summary tiles.
///
/// Always computed over the full report set; active filters never change
/// these numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub total: usize,
    pub normal: usize,
    pub abnormal: usize,
    pub critical: usize,
}

impl DashboardCounts {
    /// Tallies the full report set.
    pub fn tally(reports: &[Report]) -> Self {
        let mut counts = DashboardCounts {
            total: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report.status {
                ScanStatus::Normal => counts.normal += 1,
                ScanStatus::Abnormal => counts.abnormal += 1,
                ScanStatus::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

/// View state of the report-history screen: the filter selections plus the
/// current 1-based page.
///
/// Changing any filter resets the page to 1; changing the page alone never
/// touches the filters.
#[derive(Debug, Clone, Default)]
pub struct ReportBrowser {
    filters: ReportFilters,
    page: usize,
}

impl ReportBrowser {
    /// Fresh view state: no filters, page 1.
    pub fn new() -> Self {
        Self {
            filters: ReportFilters::default(),
            page: 1,
        }
    }

    pub fn filters(&self) -> &ReportFilters {
        &self.filters
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filters.status = filter;
        self.page = 1;
    }

    pub fn set_scan_type_filter(&mut self, filter: ScanTypeFilter) {
        self.filters.scan_type = filter;
        self.page = 1;
    }

    pub fn set_time_period_filter(&mut self, filter: TimePeriodFilter) {
        self.filters.period = filter;
        self.page = 1;
    }

    /// Clears all three filters at once (the "Clear All" control).
    pub fn clear_filters(&mut self) {
        self.filters = ReportFilters::default();
        self.page = 1;
    }

    /// Moves to `page` without touching the filters. Page zero is page one.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Derives the current display slice from the full report set.
    pub fn view<Tz: TimeZone>(&self, reports: &[Report], now: &DateTime<Tz>) -> ReportPage {
        ReportPage::build(reports, &self.filters, self.page(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Gender, RiskLevel};
    use crate::uuid::ShardableUuid;
    use cardioscan_types::Confidence;
    use chrono::Utc;

    fn report(status: ScanStatus, scan_type: ScanType, created_at: DateTime<Utc>) -> Report {
        Report {
            id: ShardableUuid::new(),
            patient_name: "Test Patient".into(),
            age: 60,
            gender: Gender::Other,
            scan_type,
            status,
            risk_level: RiskLevel::Low,
            confidence: Confidence::new(95.0).unwrap(),
            diagnosis: "Normal Findings".into(),
            details: None,
            clinical_notes: None,
            recommendations: vec![],
            image_url: None,
            created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-03-15T10:30:00Z".parse().unwrap()
    }

    /// 25 reports: 3 critical, the rest alternating normal/abnormal.
    fn sample_set() -> Vec<Report> {
        let base = now();
        (0..25)
            .map(|i| {
                let status = if i < 3 {
                    ScanStatus::Critical
                } else if i % 2 == 0 {
                    ScanStatus::Normal
                } else {
                    ScanStatus::Abnormal
                };
                let scan_type = ScanType::ALL[i % 4];
                report(status, scan_type, base - chrono::Duration::hours(i as i64))
            })
            .collect()
    }

    #[test]
    fn unfiltered_first_page_holds_ten_of_twenty_five() {
        let reports = sample_set();
        let page = ReportPage::build(&reports, &ReportFilters::default(), 1, &now());
        assert_eq!(page.reports.len(), 10);
        assert_eq!(page.total_filtered, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let reports = sample_set();
        let page = ReportPage::build(&reports, &ReportFilters::default(), 3, &now());
        assert_eq!(page.reports.len(), 5);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn page_beyond_the_last_is_empty_not_an_error() {
        let reports = sample_set();
        let page = ReportPage::build(&reports, &ReportFilters::default(), 7, &now());
        assert!(page.reports.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        let reports = sample_set();
        let page = ReportPage::build(&reports, &ReportFilters::default(), 0, &now());
        assert_eq!(page.page, 1);
        assert_eq!(page.reports.len(), 10);
    }

    #[test]
    fn empty_set_yields_zero_pages_and_empty_slice() {
        let page = ReportPage::build(&[], &ReportFilters::default(), 1, &now());
        assert!(page.reports.is_empty());
        assert_eq!(page.total_filtered, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn critical_filter_narrows_list_but_not_dashboard_counts() {
        let reports = sample_set();
        let filters = ReportFilters {
            status: StatusFilter::Only(ScanStatus::Critical),
            ..Default::default()
        };
        let page = ReportPage::build(&reports, &filters, 1, &now());
        assert_eq!(page.total_filtered, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.reports.len(), 3);

        let counts = DashboardCounts::tally(&reports);
        assert_eq!(counts.total, 25);
        assert_eq!(counts.critical, 3);
        assert_eq!(counts.normal + counts.abnormal + counts.critical, 25);
    }

    #[test]
    fn display_slice_is_bounded_and_subset_of_filtered_set_for_all_combinations() {
        let reports = sample_set();
        let statuses = [
            StatusFilter::All,
            StatusFilter::Only(ScanStatus::Normal),
            StatusFilter::Only(ScanStatus::Critical),
        ];
        let scan_types = [
            ScanTypeFilter::All,
            ScanTypeFilter::Only(ScanType::Mri),
            ScanTypeFilter::Only(ScanType::Echo),
        ];
        let periods = [
            TimePeriodFilter::All,
            TimePeriodFilter::Today,
            TimePeriodFilter::Week,
        ];

        for status in statuses {
            for scan_type in scan_types {
                for period in periods {
                    let filters = ReportFilters {
                        status,
                        scan_type,
                        period,
                    };
                    let filtered = filters.apply(&reports, &now());
                    for page_no in 1..=4 {
                        let page = ReportPage::build(&reports, &filters, page_no, &now());
                        assert!(page.reports.len() <= REPORTS_PER_PAGE);
                        assert_eq!(page.total_pages, filtered.len().div_ceil(REPORTS_PER_PAGE));
                        for shown in &page.reports {
                            assert!(
                                filtered.iter().any(|r| r.id == shown.id),
                                "display slice leaked a record the filters exclude"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn echo_filter_matches_records_submitted_under_legacy_ecg_code() {
        let echo = report(ScanStatus::Normal, ScanType::parse("ecg").unwrap(), now());
        let xray = report(ScanStatus::Normal, ScanType::Xray, now());
        let reports = vec![echo, xray];

        let filters = ReportFilters {
            scan_type: ScanTypeFilter::parse("echo"),
            ..Default::default()
        };
        let filtered = filters.apply(&reports, &now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].scan_type, ScanType::Echo);
    }

    #[test]
    fn malformed_filter_strings_fall_back_to_all() {
        assert_eq!(StatusFilter::parse("bogus"), StatusFilter::All);
        assert_eq!(ScanTypeFilter::parse("ultrasound"), ScanTypeFilter::All);
        assert_eq!(TimePeriodFilter::parse("decade"), TimePeriodFilter::All);
        assert_eq!(TimePeriodFilter::parse("week"), TimePeriodFilter::Week);
    }

    #[test]
    fn today_window_starts_at_local_midnight() {
        let at = |s: &str| report(ScanStatus::Normal, ScanType::Ct, s.parse().unwrap());
        let reports = vec![
            at("2026-03-15T00:00:00Z"),
            at("2026-03-14T23:59:59Z"),
            at("2026-03-15T09:00:00Z"),
        ];
        let filters = ReportFilters {
            period: TimePeriodFilter::Today,
            ..Default::default()
        };
        let filtered = filters.apply(&reports, &now());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn week_and_month_windows_use_calendar_boundaries() {
        let at = |s: &str| report(ScanStatus::Normal, ScanType::Ct, s.parse().unwrap());
        let reports = vec![
            at("2026-03-08T00:00:00Z"), // exactly 7 days before midnight: in week
            at("2026-03-07T23:59:59Z"), // just outside the week window
            at("2026-02-15T00:00:00Z"), // exactly one calendar month back: in month
            at("2026-02-14T23:59:59Z"), // just outside the month window
        ];

        let week = ReportFilters {
            period: TimePeriodFilter::Week,
            ..Default::default()
        };
        assert_eq!(week.apply(&reports, &now()).len(), 1);

        let month = ReportFilters {
            period: TimePeriodFilter::Month,
            ..Default::default()
        };
        assert_eq!(month.apply(&reports, &now()).len(), 3);
    }

    #[test]
    fn year_window_reaches_twelve_calendar_months_back() {
        let at = |s: &str| report(ScanStatus::Normal, ScanType::Ct, s.parse().unwrap());
        let reports = vec![
            at("2025-03-15T00:00:00Z"),
            at("2025-03-14T23:59:59Z"),
        ];
        let filters = ReportFilters {
            period: TimePeriodFilter::Year,
            ..Default::default()
        };
        assert_eq!(filters.apply(&reports, &now()).len(), 1);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let reports = sample_set();
        let filters = ReportFilters {
            status: StatusFilter::Only(ScanStatus::Normal),
            ..Default::default()
        };
        let filtered = filters.apply(&reports, &now());
        for pair in filtered.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn changing_any_filter_resets_the_page() {
        let mut browser = ReportBrowser::new();
        browser.set_page(3);
        assert_eq!(browser.page(), 3);

        browser.set_status_filter(StatusFilter::Only(ScanStatus::Critical));
        assert_eq!(browser.page(), 1);

        browser.set_page(2);
        browser.set_scan_type_filter(ScanTypeFilter::Only(ScanType::Mri));
        assert_eq!(browser.page(), 1);

        browser.set_page(2);
        browser.set_time_period_filter(TimePeriodFilter::Week);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn changing_the_page_keeps_the_filters() {
        let mut browser = ReportBrowser::new();
        browser.set_status_filter(StatusFilter::Only(ScanStatus::Abnormal));
        browser.set_page(2);

        assert_eq!(
            browser.filters().status,
            StatusFilter::Only(ScanStatus::Abnormal)
        );
        assert_eq!(browser.page(), 2);
    }

    #[test]
    fn dashboard_counts_are_invariant_under_filter_changes() {
        let reports = sample_set();
        let before = DashboardCounts::tally(&reports);

        let mut browser = ReportBrowser::new();
        browser.set_status_filter(StatusFilter::Only(ScanStatus::Critical));
        browser.set_time_period_filter(TimePeriodFilter::Today);
        let _ = browser.view(&reports, &now());

        assert_eq!(DashboardCounts::tally(&reports), before);
    }
}
