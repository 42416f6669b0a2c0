//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the astrological logic.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::dto::{
    BirthDetails, ChatRequest, ChatResponse, HealthResponse, HoroscopePrediction,
    KundaliResponse, PredictRequest, RecommendationsResponse, TransitsResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::chat::ChatRole;
use crate::services::chart::render_chart_svg;
use crate::services::insights::{
    house_insights_prompt, parse_recommendations, recommendations_prompt, ADVISOR_SYSTEM_PROMPT,
};
use crate::services::natal::{natal_chart_for_details, CoordinateSource};
use crate::services::{build_predictions, current_transits};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

/// POST /v1/horoscope/predict
///
/// Build a prediction from the current transits, personalized against the
/// natal chart when birth details are supplied.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> HandlerResult<HoroscopePrediction> {
    let natal_chart = match &request.birth_details {
        Some(details) => Some(
            natal_chart_for_details(
                state.ephemeris.as_ref(),
                state.geocoder.as_ref(),
                details,
                CoordinateSource::Strict,
            )
            .await?,
        ),
        None => None,
    };

    let transits = current_transits(state.ephemeris.as_ref());
    let prediction = build_predictions(
        request.time_frame,
        &transits,
        natal_chart.as_ref(),
        &mut rand::thread_rng(),
    );
    Ok(Json(prediction))
}

/// GET /v1/horoscope/transits/current
pub async fn transits_current(State(state): State<AppState>) -> HandlerResult<TransitsResponse> {
    let transits = current_transits(state.ephemeris.as_ref());
    Ok(Json(TransitsResponse {
        transits,
        timestamp: chrono::Utc::now(),
    }))
}

/// POST /v1/kundali/generate
///
/// Natal chart plus generated per-house insight text.
pub async fn generate_kundali(
    State(state): State<AppState>,
    Json(details): Json<BirthDetails>,
) -> HandlerResult<KundaliResponse> {
    let natal_chart = natal_chart_for_details(
        state.ephemeris.as_ref(),
        state.geocoder.as_ref(),
        &details,
        CoordinateSource::Strict,
    )
    .await?;

    let prompt = house_insights_prompt(natal_chart.ascendant, &natal_chart.house_cusps);
    let insights = state.insights.complete(&prompt, &[]).await?;

    Ok(Json(KundaliResponse {
        natal_chart,
        insights,
    }))
}

/// GET /v1/kundali/chart.svg
///
/// Birth chart wheel rendered as SVG; birth details arrive as query
/// parameters.
pub async fn kundali_chart_svg(
    State(state): State<AppState>,
    Query(details): Query<BirthDetails>,
) -> Result<impl IntoResponse, AppError> {
    let natal_chart = natal_chart_for_details(
        state.ephemeris.as_ref(),
        state.geocoder.as_ref(),
        &details,
        CoordinateSource::Strict,
    )
    .await?;

    let svg = render_chart_svg(&natal_chart);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// POST /v1/recommendations
///
/// Personalized recommendations from birth details and the current transits.
pub async fn recommendations(
    State(state): State<AppState>,
    Json(details): Json<BirthDetails>,
) -> HandlerResult<RecommendationsResponse> {
    details.validate()?;

    let transits = current_transits(state.ephemeris.as_ref());
    let prompt = recommendations_prompt(&details, &transits);
    let reply = state.insights.complete(&prompt, &[]).await?;
    let recommendations = parse_recommendations(&reply)?;

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// POST /v1/chat
///
/// Conversational endpoint over the bounded per-session transcript.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> HandlerResult<ChatResponse> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| state.chat_history.create_session());

    state
        .chat_history
        .push(&session_id, ChatRole::User, &request.message);

    let history = state.chat_history.turns(&session_id);
    let reply = state.insights.complete(ADVISOR_SYSTEM_PROMPT, &history).await?;

    state
        .chat_history
        .push(&session_id, ChatRole::Assistant, &reply);

    Ok(Json(ChatResponse { session_id, reply }))
}
