//! REST handlers.

use crate::dto::{
    CreateReportReq, LoginReq, LoginRes, ProfileRes, RegisterReq, ReportsQuery, ReportsRes,
    StatsRes, UpdateProfileReq,
};
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;
use api_shared::{hash_password, verify_password, HealthRes, HealthService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use cardioscan_core::export::render_printable_report;
use cardioscan_core::{
    validate_submission, DashboardCounts, EmailAddress, NewUser, NonEmptyText, PatientContext,
    PlatformStats, Report, ReportFilters, ReportPage, ScanInput, ScanTypeFilter, ShardableUuid,
    StatusFilter, TimePeriodFilter,
};
use chrono::Local;

/// Minimum accepted password length at registration.
const MIN_PASSWORD_LEN: usize = 8;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used for monitoring and load balancer probes.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = LoginRes),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    )
)]
/// Authenticates an account and issues an access token.
///
/// Failure bodies stay generic: the caller learns whether credentials were
/// missing or wrong, never which half was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginRes>, ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    // An unparsable email cannot match an account; same response as a miss.
    let email = EmailAddress::parse(&req.email).map_err(|_| ApiError::Unauthorized)?;
    let user = state
        .users
        .find_by_email(&email)
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!("failed login attempt for {email}");
        return Err(ApiError::Unauthorized);
    }

    let token = state.tokens.issue(&user.id.to_string(), &user.roles)?;
    Ok(Json(LoginRes {
        access_token: token,
        roles: user.roles,
    }))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = ProfileRes),
        (status = 400, description = "Invalid registration input"),
        (status = 409, description = "Email already registered")
    )
)]
/// Registers a new account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<ProfileRes>), ApiError> {
    let email = EmailAddress::parse(&req.email)
        .map_err(|_| ApiError::BadRequest("A valid email address is required".into()))?;
    let name = NonEmptyText::new(&req.name)
        .map_err(|_| ApiError::BadRequest("A display name is required".into()))?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user = state.users.create(NewUser {
        email,
        password_hash,
        name,
    })?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/users/profile",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileRes),
        (status = 401, description = "Unauthorized")
    )
)]
/// Returns the authenticated caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileRes>, ApiError> {
    let user = state.users.get(&auth.user_id)?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/users/profile",
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "Updated profile", body = ProfileRes),
        (status = 400, description = "Invalid profile input"),
        (status = 401, description = "Unauthorized")
    )
)]
/// Applies a partial update to the caller's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileReq>,
) -> Result<Json<ProfileRes>, ApiError> {
    let user = state.users.update_profile(&auth.user_id, req.into())?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/reports",
    params(
        ("status" = Option<String>, Query, description = "Status filter: all/normal/abnormal/critical"),
        ("scanType" = Option<String>, Query, description = "Scan type filter: all/xray/ct/mri/echo"),
        ("period" = Option<String>, Query, description = "Time period filter: all/today/week/month/year"),
        ("page" = Option<usize>, Query, description = "1-based page of the filtered view")
    ),
    responses(
        (status = 200, description = "Reports, newest first", body = ReportsRes),
        (status = 401, description = "Unauthorized")
    )
)]
/// Lists reports, newest first.
///
/// Without query parameters the full set is returned. Any filter or page
/// parameter switches to the paged history view: at most ten reports per
/// page plus pagination metadata. The dashboard `counts` always cover the
/// entire set, whatever the filters say.
pub async fn list_reports(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<ReportsRes>, ApiError> {
    let all = state.reports.list();
    let counts = DashboardCounts::tally(&all);

    if query.is_empty() {
        return Ok(Json(ReportsRes {
            reports: all,
            counts,
            page: None,
            total_pages: None,
            total_filtered: None,
        }));
    }

    let filters = ReportFilters {
        status: query
            .status
            .as_deref()
            .map(StatusFilter::parse)
            .unwrap_or_default(),
        scan_type: query
            .scan_type
            .as_deref()
            .map(ScanTypeFilter::parse)
            .unwrap_or_default(),
        period: query
            .period
            .as_deref()
            .map(TimePeriodFilter::parse)
            .unwrap_or_default(),
    };
    let page = ReportPage::build(&all, &filters, query.page.unwrap_or(1), &Local::now());

    Ok(Json(ReportsRes {
        reports: page.reports,
        counts,
        page: Some(page.page),
        total_pages: Some(page.total_pages),
        total_filtered: Some(page.total_filtered),
    }))
}

#[utoipa::path(
    post,
    path = "/reports",
    request_body = CreateReportReq,
    responses(
        (status = 201, description = "Report created", body = Report),
        (status = 400, description = "Submission rejected by validation"),
        (status = 401, description = "Unauthorized")
    )
)]
/// Submits a scan for diagnosis.
///
/// The submission is validated, classified and persisted in one step; the
/// created report comes back with the diagnosis applied verbatim from the
/// classification result.
pub async fn create_report(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateReportReq>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let validated = validate_submission(&req.into())?;

    let diagnosis = {
        let scan = ScanInput {
            file_name: &validated.scan_file_name,
            image_url: validated.image_url.as_deref(),
        };
        let patient = PatientContext {
            patient_name: validated.patient_name.as_str(),
            age: validated.age,
            scan_type: validated.scan_type,
            clinical_notes: validated.clinical_notes.as_deref(),
        };
        state.classifier.classify(&scan, &patient)
    };

    let report = state.reports.create(validated, diagnosis)?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/reports/stats",
    responses(
        (status = 200, description = "Platform statistics", body = StatsRes),
        (status = 401, description = "Unauthorized")
    )
)]
/// Platform-wide statistics for the landing dashboard.
pub async fn report_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<StatsRes>, ApiError> {
    let reports = state.reports.list();
    Ok(Json(StatsRes {
        stats: PlatformStats::compute(&reports),
    }))
}

#[utoipa::path(
    get,
    path = "/reports/{id}/export",
    params(
        ("id" = String, Path, description = "Canonical report id (32 lowercase hex characters)")
    ),
    responses(
        (status = 200, description = "Printable HTML report"),
        (status = 400, description = "Malformed report id"),
        (status = 404, description = "No such report"),
        (status = 401, description = "Unauthorized")
    )
)]
/// Renders the printable HTML document for one report.
pub async fn export_report(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = ShardableUuid::parse(&id)?;
    let report = state.reports.get(&id)?;
    Ok(Html(render_printable_report(&report)))
}
