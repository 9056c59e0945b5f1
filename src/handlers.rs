use crate::dates::{format_display, format_key, format_time, parse_key, today};
use crate::entries::{load_all, upsert_at};
use crate::errors::AppError;
use crate::form::{load_into_form, load_today_or_legacy};
use crate::history::{derive_status, render_list};
use crate::models::{
    ActionRequest, ActionResponse, EntryPatch, FormFields, History, IndexQuery, TodayResponse,
    TopicsForm,
};
use crate::state::AppState;
use crate::storage::{
    persist_slots, Storage, LEGACY_CHECK_IN_SLOT, LEGACY_CHECK_OUT_SLOT, LEGACY_TOPICS_SLOT,
};
use crate::ui::{render_index, IndexPage};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    CheckIn,
    CheckOut,
    Topics(String),
}

impl TryFrom<ActionRequest> for Action {
    type Error = AppError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        match request.action.trim() {
            "check_in" => Ok(Action::CheckIn),
            "check_out" => Ok(Action::CheckOut),
            "topics" => Ok(Action::Topics(request.topics.unwrap_or_default())),
            _ => Err(AppError::bad_request(
                "action must be 'check_in', 'check_out' or 'topics'",
            )),
        }
    }
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let today = today();
    let today_key = format_key(today);
    let slots = state.slots.lock().await;
    let entries = load_all(&*slots);

    let selected = query.key.filter(|key| parse_key(key).is_some());
    let form = match &selected {
        Some(key) => load_into_form(&entries, key),
        None => load_today_or_legacy(&*slots, &today_key),
    };

    Html(render_index(&IndexPage {
        today: format_display(today),
        selected: selected.as_deref(),
        form: &form,
        history: &render_list(&entries),
    }))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let today = today();
    let key = format_key(today);
    let slots = state.slots.lock().await;
    let form = load_today_or_legacy(&*slots, &key);

    Json(TodayResponse {
        date: format_display(today),
        key,
        form,
    })
}

pub async fn get_history(State(state): State<AppState>) -> Json<History> {
    let slots = state.slots.lock().await;
    Json(render_list(&load_all(&*slots)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FormFields>, AppError> {
    if parse_key(&key).is_none() {
        return Err(AppError::bad_request("key must be a YYYY-MM-DD date"));
    }
    let slots = state.slots.lock().await;
    Ok(Json(load_into_form(&load_all(&*slots), &key)))
}

pub async fn action(
    State(state): State<AppState>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let action = Action::try_from(payload)?;
    let response = apply_action(&state, action).await?;
    Ok(Json(response))
}

pub async fn check_in(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_action(&state, Action::CheckIn).await?;
    Ok(Redirect::to("/"))
}

pub async fn check_out(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_action(&state, Action::CheckOut).await?;
    Ok(Redirect::to("/"))
}

pub async fn save_topics(
    State(state): State<AppState>,
    Form(form): Form<TopicsForm>,
) -> Result<Redirect, AppError> {
    apply_action(&state, Action::Topics(form.topics)).await?;
    Ok(Redirect::to("/"))
}

/// Records `action` against today's entry. The matching legacy slot is kept in
/// step so older readers still see the latest value. Changes are staged on a
/// copy and only become visible once they are on disk.
async fn apply_action(state: &AppState, action: Action) -> Result<ActionResponse, AppError> {
    let now = Local::now();
    let key = format_key(now.date_naive());
    let mut slots = state.slots.lock().await;
    let mut staged = slots.clone();

    let patch = match action {
        Action::CheckIn => {
            let time = format_time(now);
            staged.set(LEGACY_CHECK_IN_SLOT, time.clone());
            EntryPatch::check_in(time)
        }
        Action::CheckOut => {
            let time = format_time(now);
            staged.set(LEGACY_CHECK_OUT_SLOT, time.clone());
            EntryPatch::check_out(time)
        }
        Action::Topics(topics) => {
            let topics = topics.trim().to_string();
            staged.set(LEGACY_TOPICS_SLOT, topics.clone());
            EntryPatch::topics(topics)
        }
    };

    let entry = upsert_at(&mut staged, &key, patch, now.timestamp_millis())?;
    persist_slots(&state.data_path, &staged).await?;
    *slots = staged;

    let status = derive_status(&entry);
    info!(%key, status = status.label(), "entry updated");

    Ok(ActionResponse {
        history: render_list(&load_all(&*slots)),
        key,
        entry,
        status,
    })
}
