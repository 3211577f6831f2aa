// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use strata_vote_api::{
    AddCandidateRequest, ApiError, BallotSummaryInfo, BallotViewResponse, CandidateInfo,
    CreateElectionRequest, ElectionInfo, ElectionStatsResponse, FixedRoster, IssueBallotsRequest,
    IssueBallotsResponse, SubmitVoteRequest, TransitionElectionRequest, UpdateElectionRequest,
    VoteReceiptResponse, VoterRoster, WriteInInfo, add_candidate, create_election,
    delete_candidate, export_results_csv, get_ballot_view, get_election, get_election_stats,
    issue_ballots, list_ballots, list_candidates, list_elections, list_write_ins, submit_vote,
    transition_election, update_election,
};
use strata_vote_domain::{Clock, SystemClock};
use strata_vote_persistence::Persistence;

/// Strata Vote Server - HTTP server for the Strata Vote engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to the eligible-voter roster file, one owner ID per line.
    /// Without a roster, issuance requests must name their owners explicitly.
    #[arg(short, long)]
    roster: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex so handlers can mutate it
/// safely under concurrent requests; the roster and clock are read-only.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for elections, ballots, and votes.
    persistence: Arc<Mutex<Persistence>>,
    /// The eligible-voter roster, when one was loaded at startup.
    roster: Arc<Option<FixedRoster>>,
    /// The time source; tests pin this to a fixed instant.
    clock: Arc<dyn Clock>,
}

/// API request for submitting a vote on the public gateway.
///
/// The ballot token rides in the body so it never lands in access logs.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PublicVoteApiRequest {
    /// The one-time ballot token.
    token: String,
    /// The chosen candidate, if voting for a listed candidate.
    candidate_id: Option<i64>,
    /// The write-in text, if voting for an unlisted candidate.
    write_in: Option<String>,
}

/// Query parameters for the public ballot view.
#[derive(Debug, Deserialize)]
struct BallotViewQuery {
    /// The one-time ballot token.
    token: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal error"),
                }
            }
        }
    }
}

/// Handler for POST `/elections` endpoint.
///
/// Creates a new election in `Draft` status.
async fn handle_create_election(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateElectionRequest>,
) -> Result<Json<ElectionInfo>, HttpError> {
    info!(title = %req.title, "Handling create_election request");

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let election: ElectionInfo = create_election(&mut persistence, req, now)?;
    drop(persistence);

    Ok(Json(election))
}

/// Handler for GET `/elections` endpoint.
///
/// Lists all elections with their effective status.
async fn handle_list_elections(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ElectionInfo>>, HttpError> {
    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let elections: Vec<ElectionInfo> = list_elections(&mut persistence, now)?;
    drop(persistence);

    Ok(Json(elections))
}

/// Handler for GET `/elections/{election_id}` endpoint.
async fn handle_get_election(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Json<ElectionInfo>, HttpError> {
    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let election: ElectionInfo = get_election(&mut persistence, election_id, now)?;
    drop(persistence);

    Ok(Json(election))
}

/// Handler for PUT `/elections/{election_id}` endpoint.
///
/// Replaces the metadata of an election still in an editable status.
async fn handle_update_election(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Json(req): Json<UpdateElectionRequest>,
) -> Result<Json<ElectionInfo>, HttpError> {
    info!(election_id, "Handling update_election request");

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let election: ElectionInfo = update_election(&mut persistence, election_id, req, now)?;
    drop(persistence);

    Ok(Json(election))
}

/// Handler for POST `/elections/{election_id}/transition` endpoint.
///
/// Moves an election to a new lifecycle status.
async fn handle_transition_election(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Json(req): Json<TransitionElectionRequest>,
) -> Result<Json<ElectionInfo>, HttpError> {
    info!(
        election_id,
        status = %req.status,
        "Handling transition_election request"
    );

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let election: ElectionInfo = transition_election(&mut persistence, election_id, req, now)?;
    drop(persistence);

    Ok(Json(election))
}

/// Handler for POST `/elections/{election_id}/candidates` endpoint.
async fn handle_add_candidate(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Json(req): Json<AddCandidateRequest>,
) -> Result<Json<CandidateInfo>, HttpError> {
    info!(
        election_id,
        display_name = %req.display_name,
        "Handling add_candidate request"
    );

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let candidate: CandidateInfo = add_candidate(&mut persistence, election_id, req, now)?;
    drop(persistence);

    Ok(Json(candidate))
}

/// Handler for GET `/elections/{election_id}/candidates` endpoint.
async fn handle_list_candidates(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Json<Vec<CandidateInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let candidates: Vec<CandidateInfo> = list_candidates(&mut persistence, election_id)?;
    drop(persistence);

    Ok(Json(candidates))
}

/// Handler for DELETE `/elections/{election_id}/candidates/{candidate_id}` endpoint.
async fn handle_delete_candidate(
    AxumState(app_state): AxumState<AppState>,
    Path((election_id, candidate_id)): Path<(i64, i64)>,
) -> Result<StatusCode, HttpError> {
    info!(election_id, candidate_id, "Handling delete_candidate request");

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    delete_candidate(&mut persistence, election_id, candidate_id, now)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/elections/{election_id}/ballots` endpoint.
///
/// Issues ballots for the named owners, or for the whole roster when the
/// request names none. Owners who already hold a ballot are skipped.
async fn handle_issue_ballots(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Json(req): Json<IssueBallotsRequest>,
) -> Result<Json<IssueBallotsResponse>, HttpError> {
    info!(election_id, "Handling issue_ballots request");

    let owner_ids: Vec<String> = match req.owner_ids {
        Some(owner_ids) => owner_ids,
        None => match app_state.roster.as_ref() {
            Some(roster) => roster.owner_ids(),
            None => {
                return Err(HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: String::from(
                        "No roster is loaded; the request must name owner_ids explicitly",
                    ),
                });
            }
        },
    };

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: IssueBallotsResponse =
        issue_ballots(&mut persistence, election_id, &owner_ids, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/elections/{election_id}/ballots` endpoint.
///
/// The listing is administrative and includes each ballot's token.
async fn handle_list_ballots(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Json<Vec<BallotSummaryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let ballots: Vec<BallotSummaryInfo> = list_ballots(&mut persistence, election_id)?;
    drop(persistence);

    Ok(Json(ballots))
}

/// Handler for GET `/elections/{election_id}/stats` endpoint.
async fn handle_get_election_stats(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Json<ElectionStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stats: ElectionStatsResponse = get_election_stats(&mut persistence, election_id)?;
    drop(persistence);

    Ok(Json(stats))
}

/// Handler for GET `/elections/{election_id}/write_ins` endpoint.
async fn handle_list_write_ins(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Json<Vec<WriteInInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let write_ins: Vec<WriteInInfo> = list_write_ins(&mut persistence, election_id)?;
    drop(persistence);

    Ok(Json(write_ins))
}

/// Handler for GET `/elections/{election_id}/results.csv` endpoint.
async fn handle_export_results_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let rendered: String = export_results_csv(&mut persistence, election_id)?;
    drop(persistence);

    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        rendered,
    )
        .into_response())
}

/// Handler for GET `/public/elections/{election_id}/ballot` endpoint.
///
/// The token-scoped ballot view. An unknown token and an unknown election
/// are indistinguishable to the caller.
async fn handle_get_ballot_view(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Query(query): Query<BallotViewQuery>,
) -> Result<Json<BallotViewResponse>, HttpError> {
    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let view: BallotViewResponse =
        get_ballot_view(&mut persistence, election_id, &query.token, now)?;
    drop(persistence);

    Ok(Json(view))
}

/// Handler for POST `/public/elections/{election_id}/vote` endpoint.
///
/// Records a vote against the ballot identified by the token in the body.
async fn handle_submit_vote(
    AxumState(app_state): AxumState<AppState>,
    Path(election_id): Path<i64>,
    Json(req): Json<PublicVoteApiRequest>,
) -> Result<Json<VoteReceiptResponse>, HttpError> {
    info!(election_id, "Handling submit_vote request");

    let vote_request: SubmitVoteRequest = SubmitVoteRequest {
        candidate_id: req.candidate_id,
        write_in: req.write_in,
    };

    let now: OffsetDateTime = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let receipt: VoteReceiptResponse =
        submit_vote(&mut persistence, election_id, &req.token, vote_request, now)?;
    drop(persistence);

    Ok(Json(receipt))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/elections", post(handle_create_election))
        .route("/elections", get(handle_list_elections))
        .route("/elections/{election_id}", get(handle_get_election))
        .route("/elections/{election_id}", put(handle_update_election))
        .route(
            "/elections/{election_id}/transition",
            post(handle_transition_election),
        )
        .route(
            "/elections/{election_id}/candidates",
            post(handle_add_candidate),
        )
        .route(
            "/elections/{election_id}/candidates",
            get(handle_list_candidates),
        )
        .route(
            "/elections/{election_id}/candidates/{candidate_id}",
            delete(handle_delete_candidate),
        )
        .route(
            "/elections/{election_id}/ballots",
            post(handle_issue_ballots),
        )
        .route("/elections/{election_id}/ballots", get(handle_list_ballots))
        .route(
            "/elections/{election_id}/stats",
            get(handle_get_election_stats),
        )
        .route(
            "/elections/{election_id}/write_ins",
            get(handle_list_write_ins),
        )
        .route(
            "/elections/{election_id}/results.csv",
            get(handle_export_results_csv),
        )
        .route(
            "/public/elections/{election_id}/ballot",
            get(handle_get_ballot_view),
        )
        .route(
            "/public/elections/{election_id}/vote",
            post(handle_submit_vote),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Strata Vote Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Load the voter roster, if one was given
    let roster: Option<FixedRoster> = match &args.roster {
        Some(path) => {
            let roster: FixedRoster = FixedRoster::from_file(path)?;
            info!(
                owners = roster.owner_ids().len(),
                "Loaded voter roster from: {}", path
            );
            Some(roster)
        }
        None => {
            info!("No roster file given; issuance requests must name owners");
            None
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        roster: Arc::new(roster),
        clock: Arc::new(SystemClock),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use strata_vote_domain::{ElectionStatus, FixedClock};
    use time::macros::datetime;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence, a fixed
    /// two-owner roster, and a pinned clock.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let roster: FixedRoster = FixedRoster::new(vec![
            String::from("unit-101"),
            String::from("unit-102"),
        ])
        .expect("Failed to build roster");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            roster: Arc::new(Some(roster)),
            clock: Arc::new(FixedClock::at(datetime!(2026-06-01 12:00 UTC))),
        }
    }

    /// Helper to POST a JSON body and return the response.
    async fn post_json<T: Serialize>(app: &Router, uri: &str, body: &T) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Helper to GET a URI and return the response.
    async fn get_uri(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Helper to deserialize a response body.
    async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    /// Helper that creates an election, adds one candidate, opens the
    /// election, and issues ballots to the whole roster.
    async fn setup_open_election(app: &Router) -> (ElectionInfo, CandidateInfo, IssueBallotsResponse) {
        let create_req: CreateElectionRequest = CreateElectionRequest {
            title: String::from("Board Election 2026"),
            description: None,
            opens_at: None,
            closes_at: Some(datetime!(2026-06-30 00:00 UTC)),
        };
        let response = post_json(app, "/elections", &create_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let election: ElectionInfo = read_json(response).await;

        let candidate_req: AddCandidateRequest = AddCandidateRequest {
            display_name: String::from("Alice Anderson"),
            statement: None,
            owner_id: None,
        };
        let response = post_json(
            app,
            &format!("/elections/{}/candidates", election.election_id),
            &candidate_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let candidate: CandidateInfo = read_json(response).await;

        let transition_req: TransitionElectionRequest = TransitionElectionRequest {
            status: ElectionStatus::Open,
        };
        let response = post_json(
            app,
            &format!("/elections/{}/transition", election.election_id),
            &transition_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let issue_req: IssueBallotsRequest = IssueBallotsRequest { owner_ids: None };
        let response = post_json(
            app,
            &format!("/elections/{}/ballots", election.election_id),
            &issue_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let issued: IssueBallotsResponse = read_json(response).await;

        (election, candidate, issued)
    }

    #[tokio::test]
    async fn test_full_voting_flow_over_http() {
        let app: Router = build_router(create_test_app_state());
        let (election, candidate, issued) = setup_open_election(&app).await;
        assert_eq!(issued.ballots.len(), 2);

        let vote_req: PublicVoteApiRequest = PublicVoteApiRequest {
            token: issued.ballots[0].token.clone(),
            candidate_id: Some(candidate.candidate_id),
            write_in: None,
        };
        let response = post_json(
            &app,
            &format!("/public/elections/{}/vote", election.election_id),
            &vote_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let receipt: VoteReceiptResponse = read_json(response).await;
        assert_eq!(receipt.election_id, election.election_id);

        let response = get_uri(
            &app,
            &format!("/elections/{}/stats", election.election_id),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let stats: ElectionStatsResponse = read_json(response).await;
        assert_eq!(stats.ballot_count, 2);
        assert_eq!(stats.votes_cast, 1);
    }

    #[tokio::test]
    async fn test_double_vote_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let (election, candidate, issued) = setup_open_election(&app).await;

        let vote_req: PublicVoteApiRequest = PublicVoteApiRequest {
            token: issued.ballots[0].token.clone(),
            candidate_id: Some(candidate.candidate_id),
            write_in: None,
        };
        let uri: String = format!("/public/elections/{}/vote", election.election_id);

        let response = post_json(&app, &uri, &vote_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(&app, &uri, &vote_req).await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.error);
        assert!(error_response.message.contains("one_vote_per_ballot"));
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let app: Router = build_router(create_test_app_state());
        let (election, _, _) = setup_open_election(&app).await;

        let response = get_uri(
            &app,
            &format!(
                "/public/elections/{}/ballot?token=AAAAAAAAAAAAAAAAAAAAAAAAAA",
                election.election_id
            ),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ballot_view_reports_vote_state() {
        let app: Router = build_router(create_test_app_state());
        let (election, candidate, issued) = setup_open_election(&app).await;
        let token: &str = &issued.ballots[0].token;

        let view_uri: String = format!(
            "/public/elections/{}/ballot?token={token}",
            election.election_id
        );
        let response = get_uri(&app, &view_uri).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: BallotViewResponse = read_json(response).await;
        assert!(!view.has_voted);
        assert_eq!(view.candidates.len(), 1);

        let vote_req: PublicVoteApiRequest = PublicVoteApiRequest {
            token: token.to_string(),
            candidate_id: Some(candidate.candidate_id),
            write_in: None,
        };
        post_json(
            &app,
            &format!("/public/elections/{}/vote", election.election_id),
            &vote_req,
        )
        .await;

        let response = get_uri(&app, &view_uri).await;
        let view: BallotViewResponse = read_json(response).await;
        assert!(view.has_voted);
    }

    #[tokio::test]
    async fn test_empty_title_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let create_req: CreateElectionRequest = CreateElectionRequest {
            title: String::from("   "),
            description: None,
            opens_at: None,
            closes_at: None,
        };
        let response = post_json(&app, "/elections", &create_req).await;
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_election_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(&app, "/elections/999").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_illegal_transition_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let (election, _, _) = setup_open_election(&app).await;

        let transition_req: TransitionElectionRequest = TransitionElectionRequest {
            status: ElectionStatus::Draft,
        };
        let response = post_json(
            &app,
            &format!("/elections/{}/transition", election.election_id),
            &transition_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_ballot_listing_includes_tokens() {
        let app: Router = build_router(create_test_app_state());
        let (election, _, issued) = setup_open_election(&app).await;

        let response = get_uri(
            &app,
            &format!("/elections/{}/ballots", election.election_id),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let listing: Vec<BallotSummaryInfo> = read_json(response).await;
        assert_eq!(listing.len(), 2);
        for ballot in &issued.ballots {
            assert!(listing.iter().any(|held| held.token == ballot.token));
        }
    }

    #[tokio::test]
    async fn test_results_csv_has_csv_content_type() {
        let app: Router = build_router(create_test_app_state());
        let (election, candidate, issued) = setup_open_election(&app).await;

        let vote_req: PublicVoteApiRequest = PublicVoteApiRequest {
            token: issued.ballots[0].token.clone(),
            candidate_id: Some(candidate.candidate_id),
            write_in: None,
        };
        post_json(
            &app,
            &format!("/public/elections/{}/vote", election.election_id),
            &vote_req,
        )
        .await;

        let response = get_uri(
            &app,
            &format!("/elections/{}/results.csv", election.election_id),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rendered: String = String::from_utf8(body_bytes.to_vec()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "name,votes");
        assert_eq!(lines[1], "Alice Anderson,1");
    }

    #[tokio::test]
    async fn test_issue_without_roster_or_owner_ids_is_bad_request() {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let app_state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            roster: Arc::new(None),
            clock: Arc::new(FixedClock::at(datetime!(2026-06-01 12:00 UTC))),
        };
        let app: Router = build_router(app_state);

        let create_req: CreateElectionRequest = CreateElectionRequest {
            title: String::from("Board Election 2026"),
            description: None,
            opens_at: None,
            closes_at: None,
        };
        let response = post_json(&app, "/elections", &create_req).await;
        let election: ElectionInfo = read_json(response).await;

        let issue_req: IssueBallotsRequest = IssueBallotsRequest { owner_ids: None };
        let response = post_json(
            &app,
            &format!("/elections/{}/ballots", election.election_id),
            &issue_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_issuance_is_idempotent_over_http() {
        let app: Router = build_router(create_test_app_state());
        let (election, _, issued) = setup_open_election(&app).await;
        assert_eq!(issued.ballots.len(), 2);

        // A second issuance against the same roster mints nothing new; the
        // response still reports the full set with the original tokens.
        let issue_req: IssueBallotsRequest = IssueBallotsRequest { owner_ids: None };
        let response = post_json(
            &app,
            &format!("/elections/{}/ballots", election.election_id),
            &issue_req,
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let reissued: IssueBallotsResponse = read_json(response).await;
        assert_eq!(reissued.ballots.len(), 2);
        for ballot in &issued.ballots {
            assert!(reissued.ballots.iter().any(|held| held.token == ballot.token));
        }
    }
}
