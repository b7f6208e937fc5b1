use crate::{
    api::{ApiClient, ApiError, LoginRequest, SignupRequest, SignupResponse},
    utils::schedule::{CancelHandle, ExpirySchedule},
    utils::storage::{self, LocalStore, SessionStore},
};
use chrono::{DateTime, Duration, Utc};
use gloo_timers::callback::Timeout;
use leptos::*;

pub type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);
pub type TimerSlot = StoredValue<ExpirySchedule<Timeout>>;

/// Client-chosen validity window, independent of anything the server
/// returns with the credential.
pub const SESSION_VALIDITY_SECS: i64 = 60 * 60;

const TOKEN_KEY: &str = "token";
const USER_ID_KEY: &str = "user_id";
const EXPIRY_KEY: &str = "expiry_date";

/// The credential triple is set and cleared together; `expires_at` without
/// `credential` (or vice versa) never occurs.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub credential: Option<String>,
    pub subject_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.credential.is_some() && self.expires_at.map(|at| at > now).unwrap_or(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing persisted; the session starts anonymous.
    Anonymous,
    /// A triple was persisted but its deadline had already passed; the
    /// storage was cleared silently.
    ExpiredCleared,
    /// A live triple was recovered. The caller re-arms the expiry task for
    /// the remaining duration so the wall-clock deadline survives a restart.
    Active {
        token: String,
        subject_id: String,
        expires_at: DateTime<Utc>,
    },
}

pub fn persist_triple(
    store: &impl SessionStore,
    token: &str,
    subject_id: &str,
    expires_at: DateTime<Utc>,
) {
    store.set(TOKEN_KEY, token);
    store.set(USER_ID_KEY, subject_id);
    store.set(EXPIRY_KEY, &expires_at.to_rfc3339());
}

pub fn clear_triple(store: &impl SessionStore) {
    store.remove(TOKEN_KEY);
    store.remove(USER_ID_KEY);
    store.remove(EXPIRY_KEY);
}

pub fn restore_from(store: &impl SessionStore, now: DateTime<Utc>) -> RestoreOutcome {
    let (Some(token), Some(raw_expiry)) = (store.get(TOKEN_KEY), store.get(EXPIRY_KEY)) else {
        return RestoreOutcome::Anonymous;
    };
    let expires_at = match DateTime::parse_from_rfc3339(&raw_expiry) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            // Unreadable deadline; treat like an expired triple.
            clear_triple(store);
            return RestoreOutcome::ExpiredCleared;
        }
    };
    if expires_at <= now {
        clear_triple(store);
        return RestoreOutcome::ExpiredCleared;
    }
    let subject_id = store.get(USER_ID_KEY).unwrap_or_default();
    RestoreOutcome::Active {
        token,
        subject_id,
        expires_at,
    }
}

/// Exchanges credentials for a session. On success the triple is persisted
/// and the state updated; the caller arms the auto-expiry task for the
/// returned deadline. On failure any existing session is left untouched.
pub async fn login_request(
    api: &ApiClient,
    store: &impl SessionStore,
    set_session: WriteSignal<SessionState>,
    request: LoginRequest,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ApiError> {
    set_session.update(|state| state.loading = true);

    match api.login(&request).await {
        Ok(response) => {
            let expires_at = now + Duration::seconds(SESSION_VALIDITY_SECS);
            persist_triple(store, &response.token, &response.user_id, expires_at);
            set_session.update(|state| {
                state.credential = Some(response.token);
                state.subject_id = Some(response.user_id);
                state.expires_at = Some(expires_at);
                state.loading = false;
            });
            Ok(expires_at)
        }
        Err(error) => {
            set_session.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Creates an account without authenticating. The two failure shapes the
/// server distinguishes collapse into one user-facing message each.
pub async fn signup_request(
    api: &ApiClient,
    request: SignupRequest,
) -> Result<SignupResponse, ApiError> {
    api.signup(&request).await.map_err(|error| {
        if error.is_validation() {
            ApiError::validation("Validation failed. Make sure the email address isn't used yet!")
        } else {
            ApiError::unknown("User creation failed!")
        }
    })
}

/// Ends the session: cancels the pending expiry task, erases the durable
/// triple, and resets the state. Calling it while already anonymous is a
/// no-op beyond redundant storage clears.
pub fn logout<H: CancelHandle>(
    store: &impl SessionStore,
    set_session: WriteSignal<SessionState>,
    timers: &mut ExpirySchedule<H>,
) {
    timers.disarm();
    clear_triple(store);
    set_session.update(|state| *state = SessionState::default());
}

/// The autonomous transition: the armed task elapsed, the credential is no
/// longer valid. Not an error.
pub fn expire_session(store: &impl SessionStore, set_session: WriteSignal<SessionState>) {
    log::info!("session validity window elapsed; clearing credentials");
    clear_triple(store);
    set_session.update(|state| *state = SessionState::default());
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (session, set_session) = create_signal(SessionState::default());
    let timers: TimerSlot = store_value(ExpirySchedule::new());
    provide_context::<SessionContext>((session, set_session));
    provide_context(timers);

    // localStorage only exists in the browser; everywhere else the session
    // starts anonymous.
    #[cfg(target_arch = "wasm32")]
    restore_session(set_session, timers);

    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub fn use_timer_slot() -> TimerSlot {
    use_context::<TimerSlot>().unwrap_or_else(|| store_value(ExpirySchedule::new()))
}

#[cfg(target_arch = "wasm32")]
fn restore_session(set_session: WriteSignal<SessionState>, timers: TimerSlot) {
    let Ok(raw) = storage::local_storage() else {
        return;
    };
    let store = LocalStore::new(raw);
    match restore_from(&store, Utc::now()) {
        RestoreOutcome::Anonymous => {}
        RestoreOutcome::ExpiredCleared => {
            log::info!("persisted session already expired; storage cleared");
        }
        RestoreOutcome::Active {
            token,
            subject_id,
            expires_at,
        } => {
            set_session.update(|state| {
                state.credential = Some(token);
                state.subject_id = Some(subject_id);
                state.expires_at = Some(expires_at);
            });
            arm_auto_expiry(set_session, timers, expires_at);
        }
    }
}

/// Arms the auto-expiry timer for the remaining duration. The slot cancels
/// any previously armed timer, so at most one is ever pending.
pub fn arm_auto_expiry(
    set_session: WriteSignal<SessionState>,
    timers: TimerSlot,
    expires_at: DateTime<Utc>,
) {
    let remaining_ms = (expires_at - Utc::now()).num_milliseconds().max(0);
    let remaining_ms = u32::try_from(remaining_ms).unwrap_or(u32::MAX);
    let handle = Timeout::new(remaining_ms, move || match storage::local_storage() {
        Ok(raw) => expire_session(&LocalStore::new(raw), set_session),
        Err(_) => set_session.update(|state| *state = SessionState::default()),
    });
    timers.update_value(|slot| slot.arm(handle));
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let timers = use_timer_slot();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move {
            let raw = storage::local_storage().map_err(ApiError::unknown)?;
            let store = LocalStore::new(raw);
            let expires_at =
                login_request(&api, &store, set_session, payload, Utc::now()).await?;
            arm_auto_expiry(set_session, timers, expires_at);
            Ok(())
        }
    })
}

pub fn use_logout() -> impl Fn() + Copy {
    let (_session, set_session) = use_session();
    let timers = use_timer_slot();
    move || match storage::local_storage() {
        Ok(raw) => {
            let store = LocalStore::new(raw);
            timers.update_value(|slot| logout(&store, set_session, slot));
        }
        Err(_) => {
            timers.update_value(|slot| slot.disarm());
            set_session.update(|state| *state = SessionState::default());
        }
    }
}
