use crate::api::ApiError;
use leptos::*;

/// Single-slot error surface shared by the session and feed operations.
/// At most one error is active; a newer one replaces an unacknowledged one,
/// and dismissing clears the slot.
#[derive(Clone, Copy)]
pub struct ErrorChannel {
    slot: RwSignal<Option<ApiError>>,
}

impl ErrorChannel {
    fn new() -> Self {
        Self {
            slot: create_rw_signal(None),
        }
    }

    pub fn show(&self, error: ApiError) {
        log::warn!("surfacing error: {}", error);
        self.slot.set(Some(error));
    }

    pub fn dismiss(&self) {
        self.slot.set(None);
    }

    pub fn current(&self) -> Signal<Option<ApiError>> {
        self.slot.into()
    }
}

pub fn provide_error_channel() -> ErrorChannel {
    let channel = ErrorChannel::new();
    provide_context(channel);
    channel
}

pub fn use_error_channel() -> ErrorChannel {
    use_context::<ErrorChannel>().unwrap_or_else(ErrorChannel::new)
}
