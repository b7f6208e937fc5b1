use crate::api::ApiClient;
use crate::state::error::{use_error_channel, ErrorChannel};
use crate::state::feed::{
    delete_post, finish_edit, load_page, load_status, update_status, use_feed, EditTarget,
    FeedState, PageTurn, PostDraft,
};
use leptos::*;

/// Wires the window orchestration onto leptos actions. Every failure goes
/// through the shared error channel; the operations themselves already
/// guarantee the loading flags are reset.
#[derive(Clone, Copy)]
pub struct FeedViewModel {
    pub feed: ReadSignal<FeedState>,
    pub set_feed: WriteSignal<FeedState>,
    pub status_draft: RwSignal<String>,
    pub channel: ErrorChannel,
    pub load_action: Action<u32, ()>,
    pub edit_action: Action<(EditTarget, PostDraft), ()>,
    pub delete_action: Action<String, ()>,
    pub status_action: Action<String, ()>,
}

pub fn use_feed_view_model() -> FeedViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (feed, set_feed) = use_feed();
    let status_draft = create_rw_signal(String::new());
    let channel = use_error_channel();

    let api_for_load = api.clone();
    let load_action = create_action(move |page: &u32| {
        let api = api_for_load.clone();
        let page = *page;
        async move {
            if let Err(err) = load_page(&api, set_feed, page).await {
                channel.show(err);
            }
        }
    });

    let api_for_edit = api.clone();
    let edit_action = create_action(move |input: &(EditTarget, PostDraft)| {
        let api = api_for_edit.clone();
        let (target, draft) = input.clone();
        async move {
            if let Err(err) = finish_edit(&api, set_feed, target, draft).await {
                channel.show(err);
            }
        }
    });

    let api_for_delete = api.clone();
    let delete_action = create_action(move |post_id: &String| {
        let api = api_for_delete.clone();
        let post_id = post_id.clone();
        async move {
            let page = feed.get_untracked().window.current_page;
            if let Err(err) = delete_post(&api, set_feed, &post_id, page).await {
                channel.show(err);
            }
        }
    });

    let api_for_status = api.clone();
    let status_action = create_action(move |status: &String| {
        let api = api_for_status.clone();
        let status = status.clone();
        async move {
            if let Err(err) = update_status(&api, status).await {
                channel.show(err);
            }
        }
    });

    // First page and status, once on mount. Effects never run during
    // server-side rendering, so host tests stay offline.
    let api_for_boot = api.clone();
    create_effect(move |_| {
        load_action.dispatch(1);
        let api = api_for_boot.clone();
        spawn_local(async move {
            match load_status(&api, set_feed).await {
                Ok(()) => status_draft.set(feed.get_untracked().status.clone()),
                Err(err) => channel.show(err),
            }
        });
    });

    FeedViewModel {
        feed,
        set_feed,
        status_draft,
        channel,
        load_action,
        edit_action,
        delete_action,
        status_action,
    }
}

impl FeedViewModel {
    pub fn turn_page(&self, turn: PageTurn) {
        let page = self.feed.get_untracked().window.page_for(turn);
        self.load_action.dispatch(page);
    }

    pub fn open_editor(&self, target: EditTarget) {
        self.set_feed.update(|state| state.pending_edit = Some(target));
    }

    pub fn cancel_edit(&self) {
        self.set_feed.update(|state| state.pending_edit = None);
    }

    pub fn submit_edit(&self, draft: PostDraft) {
        let Some(target) = self.feed.get_untracked().pending_edit.clone() else {
            return;
        };
        self.edit_action.dispatch((target, draft));
    }

    pub fn delete(&self, post_id: String) {
        self.delete_action.dispatch(post_id);
    }

    pub fn submit_status(&self) {
        self.status_action
            .dispatch(self.status_draft.get_untracked());
    }
}
