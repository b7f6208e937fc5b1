use crate::api::{CreatorResponse, PostResponse};
use crate::state::session::{SessionContext, SessionState};
use chrono::{Duration, TimeZone, Utc};
use leptos::*;

pub fn provide_session(authenticated: bool) -> SessionContext {
    let now = Utc::now();
    let state = if authenticated {
        SessionState {
            credential: Some("tok-test".into()),
            subject_id: Some("u-test".into()),
            expires_at: Some(now + Duration::seconds(3600)),
            loading: false,
        }
    } else {
        SessionState::default()
    };
    let (session, set_session) = create_signal(state);
    provide_context::<SessionContext>((session, set_session));
    (session, set_session)
}

pub fn sample_post(id: &str, title: &str) -> PostResponse {
    PostResponse {
        id: id.into(),
        title: title.into(),
        content: "Sample body".into(),
        image_url: format!("images/{}.png", id),
        creator: CreatorResponse {
            name: "Alice".into(),
        },
        created_at: Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap(),
    }
}
