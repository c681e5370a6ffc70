use crate::animation::{Tween, ANIMATION_DURATION, FRAME_INTERVAL};
use crate::controller::ResetOutcome;
use crate::display::DisplaySnapshot;
use crate::entrance;
use crate::errors::AppError;
use crate::models::{
    CountResponse, RemoteCountResponse, ResetRequest, ResetResponse, SystemInfo,
};
use crate::state::AppState;
use crate::ui::{render_index, PageView, PANEL_COUNT};
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (count, scope) = {
        let mut controller = state.controller.lock().await;
        let count = controller.acquire().await;
        (count, controller.scope())
    };

    state.display.show_count(count).await;
    state.display.flash_badge(ANIMATION_DURATION).await;

    let view = PageView {
        display: state.display.snapshot().await,
        frames: Tween::count_up(count).frames(FRAME_INTERVAL),
        frame_ms: FRAME_INTERVAL.as_millis(),
        badge_ms: ANIMATION_DURATION.as_millis(),
        scope,
        entrance: entrance::plan(PANEL_COUNT),
    };
    Html(render_index(&view))
}

pub async fn get_count(State(state): State<AppState>) -> Json<CountResponse> {
    let controller = state.controller.lock().await;
    Json(CountResponse {
        count: controller.visitor_count(),
        service_available: controller.service_available(),
        scope: controller.scope(),
    })
}

pub async fn get_remote_count(State(state): State<AppState>) -> Json<RemoteCountResponse> {
    let controller = state.controller.lock().await;
    Json(RemoteCountResponse {
        count: controller.fetch_remote_count().await,
    })
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    let mut controller = state.controller.lock().await;
    let outcome = controller.reset(payload.confirmed).await?;
    if outcome == ResetOutcome::Reset {
        state.display.show_count(0).await;
    }

    Ok(Json(ResetResponse {
        reset: outcome == ResetOutcome::Reset,
        count: controller.count(),
    }))
}

pub async fn get_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let mission_time = state.display.snapshot().await.time;
    let controller = state.controller.lock().await;
    Json(controller.info(mission_time))
}

pub async fn get_display(State(state): State<AppState>) -> Json<DisplaySnapshot> {
    Json(state.display.snapshot().await)
}
