use crate::api::{ApiClient, ApiError, PostPayload, PostResponse};
use leptos::*;

/// Fixed window capacity; the server pages with the same size.
pub const PAGE_SIZE: usize = 2;

/// What the user is currently editing: a brand-new post, or a copy of an
/// existing one selected from the window.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    New,
    Existing(PostResponse),
}

/// Bounded local view over the server-paginated post collection.
/// `total_count` is the server-reported count of all posts, independent of
/// how many are materialized here.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedWindow {
    pub items: Vec<PostResponse>,
    pub total_count: u64,
    pub current_page: u32,
}

impl Default for FeedWindow {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            current_page: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
    Reload,
    Next,
    Previous,
}

/// Window reconciliation events. Applying one is a pure function of the
/// current window and the event, independent of the network layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    PageLoaded {
        page: u32,
        posts: Vec<PostResponse>,
        total_count: u64,
    },
    PostCreated(PostResponse),
    PostUpdated(PostResponse),
    PostDeleted,
}

impl FeedWindow {
    pub fn page_for(&self, turn: PageTurn) -> u32 {
        match turn {
            PageTurn::Reload => self.current_page,
            PageTurn::Next => self.current_page + 1,
            PageTurn::Previous => self.current_page.saturating_sub(1).max(1),
        }
    }

    pub fn last_page(&self) -> u32 {
        self.total_count.div_ceil(PAGE_SIZE as u64) as u32
    }

    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::PageLoaded {
                page,
                mut posts,
                total_count,
            } => {
                // The fetch is authoritative: no merging with prior contents.
                posts.truncate(PAGE_SIZE);
                self.items = posts;
                self.total_count = total_count;
                self.current_page = page;
            }
            FeedEvent::PostCreated(post) => {
                // Most-recent-first ordering means page 1 stays correct
                // without a re-fetch: evict the oldest displayed item if the
                // window is at capacity, then insert at the front.
                self.total_count += 1;
                if self.items.len() >= PAGE_SIZE {
                    self.items.pop();
                }
                self.items.insert(0, post);
            }
            FeedEvent::PostUpdated(post) => {
                if let Some(index) = self.items.iter().position(|p| p.id == post.id) {
                    self.items[index] = post;
                }
            }
            FeedEvent::PostDeleted => {
                // Removal shifts positions across the page boundary in a way
                // the client cannot compute; the synchronizer follows up with
                // an authoritative page reload instead of splicing locally.
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub window: FeedWindow,
    pub status: String,
    pub pending_edit: Option<EditTarget>,
    pub posts_loading: bool,
    pub edit_loading: bool,
}

pub fn use_feed() -> (ReadSignal<FeedState>, WriteSignal<FeedState>) {
    create_signal(FeedState {
        posts_loading: true,
        ..FeedState::default()
    })
}

/// User input for a create or update, with the raw image bytes still to be
/// uploaded.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: Vec<u8>,
    pub image_name: String,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ApiError::validation("Title and content must not be empty."));
        }
        if self.image.is_empty() {
            return Err(ApiError::validation("Please pick an image."));
        }
        Ok(())
    }
}

/// Fetches exactly one page fresh and replaces the window wholesale. On
/// failure the prior items stay in place, but loading always ends.
pub async fn load_page(
    api: &ApiClient,
    set_feed: WriteSignal<FeedState>,
    page: u32,
) -> Result<(), ApiError> {
    set_feed.update(|state| state.posts_loading = true);

    match api.list_posts(page).await {
        Ok(list) => {
            set_feed.update(|state| {
                state.window.apply(FeedEvent::PageLoaded {
                    page,
                    posts: list.posts,
                    total_count: list.total_posts,
                });
                state.posts_loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_feed.update(|state| state.posts_loading = false);
            Err(error)
        }
    }
}

/// Completes a pending edit: uploads the image, then creates or updates the
/// post and patches the window locally. The upload comes first; its failure
/// aborts before any mutation call is issued. The pending-edit state is
/// cleared on every exit path.
pub async fn finish_edit(
    api: &ApiClient,
    set_feed: WriteSignal<FeedState>,
    target: EditTarget,
    draft: PostDraft,
) -> Result<(), ApiError> {
    set_feed.update(|state| state.edit_loading = true);

    let clear_edit = move |state: &mut FeedState| {
        state.pending_edit = None;
        state.edit_loading = false;
    };

    if let Err(error) = draft.validate() {
        set_feed.update(clear_edit);
        return Err(error);
    }

    let prior_locator = match &target {
        EditTarget::Existing(post) => Some(post.image_url.as_str()),
        EditTarget::New => None,
    };
    let image_url = match api
        .upload_image(draft.image.clone(), &draft.image_name, prior_locator)
        .await
    {
        Ok(locator) => locator,
        Err(error) => {
            set_feed.update(clear_edit);
            return Err(error);
        }
    };

    let payload = PostPayload {
        title: draft.title,
        content: draft.content,
        image_url,
    };
    let result = match &target {
        EditTarget::New => api.create_post(&payload).await.map(FeedEvent::PostCreated),
        EditTarget::Existing(post) => api
            .update_post(&post.id, &payload)
            .await
            .map(FeedEvent::PostUpdated),
    };

    match result {
        Ok(event) => {
            set_feed.update(|state| {
                state.window.apply(event);
                state.pending_edit = None;
                state.edit_loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_feed.update(clear_edit);
            Err(error)
        }
    }
}

/// Deletes server-side, then re-derives the window from a fresh page fetch.
/// No local splice: the correct window after a removal depends on posts
/// beyond the page boundary that only the server knows.
pub async fn delete_post(
    api: &ApiClient,
    set_feed: WriteSignal<FeedState>,
    post_id: &str,
    current_page: u32,
) -> Result<(), ApiError> {
    set_feed.update(|state| state.posts_loading = true);

    match api.delete_post(post_id).await {
        Ok(()) => {
            set_feed.update(|state| state.window.apply(FeedEvent::PostDeleted));
            load_page(api, set_feed, current_page).await
        }
        Err(error) => {
            set_feed.update(|state| state.posts_loading = false);
            Err(error)
        }
    }
}

pub async fn load_status(
    api: &ApiClient,
    set_feed: WriteSignal<FeedState>,
) -> Result<(), ApiError> {
    let status = api.get_status().await?;
    set_feed.update(|state| state.status = status.status);
    Ok(())
}

/// Fire-and-forget with error surfacing; never touches the window.
pub async fn update_status(api: &ApiClient, status: String) -> Result<(), ApiError> {
    api.update_status(&status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CreatorResponse;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, title: &str) -> PostResponse {
        PostResponse {
            id: id.into(),
            title: title.into(),
            content: "body".into(),
            image_url: format!("images/{}.png", id),
            creator: CreatorResponse {
                name: "Alice".into(),
            },
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap(),
        }
    }

    fn window_with(posts: Vec<PostResponse>, total_count: u64) -> FeedWindow {
        let mut window = FeedWindow::default();
        window.apply(FeedEvent::PageLoaded {
            page: 1,
            posts,
            total_count,
        });
        window
    }

    #[test]
    fn page_load_replaces_wholesale_and_takes_total_verbatim() {
        let mut window = window_with(vec![post("old", "Old")], 1);
        window.apply(FeedEvent::PageLoaded {
            page: 2,
            posts: vec![post("a", "A"), post("b", "B")],
            total_count: 5,
        });

        assert_eq!(window.items.len(), 2);
        assert_eq!(window.items[0].id, "a");
        assert_eq!(window.total_count, 5);
        assert_eq!(window.current_page, 2);
    }

    #[test]
    fn page_load_never_exceeds_the_window_capacity() {
        let oversized = vec![post("a", "A"), post("b", "B"), post("c", "C")];
        let window = window_with(oversized, 3);
        assert!(window.items.len() <= PAGE_SIZE);
    }

    #[test]
    fn create_at_capacity_evicts_oldest_and_inserts_front() {
        let mut window = window_with(vec![post("a", "A"), post("b", "B")], 2);

        window.apply(FeedEvent::PostCreated(post("c", "C")));

        assert_eq!(window.total_count, 3);
        assert_eq!(window.items.len(), 2);
        assert_eq!(window.items[0].id, "c");
        assert_eq!(window.items[1].id, "a");
    }

    #[test]
    fn create_below_capacity_keeps_existing_items() {
        let mut window = window_with(vec![post("a", "A")], 1);

        window.apply(FeedEvent::PostCreated(post("c", "C")));

        assert_eq!(window.total_count, 2);
        assert_eq!(window.items.len(), 2);
        assert_eq!(window.items[0].id, "c");
        assert_eq!(window.items[1].id, "a");
    }

    #[test]
    fn update_replaces_in_place_without_count_change() {
        let mut window = window_with(vec![post("a", "A"), post("b", "B")], 2);

        window.apply(FeedEvent::PostUpdated(post("b", "B primed")));

        assert_eq!(window.total_count, 2);
        assert_eq!(window.items[0].id, "a");
        assert_eq!(window.items[1].title, "B primed");
    }

    #[test]
    fn update_of_post_outside_the_window_is_a_no_op() {
        let before = window_with(vec![post("a", "A"), post("b", "B")], 5);
        let mut after = before.clone();

        after.apply(FeedEvent::PostUpdated(post("z", "Elsewhere")));

        assert_eq!(after, before);
    }

    #[test]
    fn last_page_is_ceiling_of_total_over_page_size() {
        assert_eq!(window_with(vec![], 0).last_page(), 0);
        assert_eq!(window_with(vec![], 1).last_page(), 1);
        assert_eq!(window_with(vec![], 4).last_page(), 2);
        assert_eq!(window_with(vec![], 5).last_page(), 3);
    }

    #[test]
    fn page_cursor_never_goes_below_one() {
        let window = FeedWindow::default();
        assert_eq!(window.current_page, 1);
        assert_eq!(window.page_for(PageTurn::Previous), 1);
        assert_eq!(window.page_for(PageTurn::Next), 2);
        assert_eq!(window.page_for(PageTurn::Reload), 1);
    }

    #[test]
    fn draft_validation_requires_fields_and_image() {
        let empty = PostDraft::default();
        assert!(empty.validate().unwrap_err().is_validation());

        let no_image = PostDraft {
            title: "T".into(),
            content: "C".into(),
            ..PostDraft::default()
        };
        assert!(no_image.validate().unwrap_err().is_validation());

        let complete = PostDraft {
            title: "T".into(),
            content: "C".into(),
            image: vec![1, 2, 3],
            image_name: "pic.png".into(),
        };
        assert!(complete.validate().is_ok());
    }
}
