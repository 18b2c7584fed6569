//! Integration tests driving the engine over a scripted transport double.
//!
//! Every test runs on a paused tokio clock inside a `LocalSet`, so debounce
//! windows, feedback countdowns and response races are exercised
//! deterministically without wall-clock waits. Scripted responses may carry a
//! delay; with the clock paused, awaiting them auto-advances time to the
//! next due timer, which is how out-of-order completions are arranged.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::LocalSet;

use courseboard::domain::{Category, CategoryDraft, Course, EnrollmentRequest, User};
use courseboard::engine::{Engine, EngineConfig};
use courseboard::request::RequestStatus;
use courseboard::transport::dto::{
    BlockUserBody, CategoryBody, CategoryListBody, CourseListBody, EnrollBody, LoginBody,
    SuggestionBody, UserPageBody,
};
use courseboard::transport::{
    AdminApi, MemoryTokenStore, TokenStore, TransportError, TransportResult,
};
use courseboard::ErrorKind;

/// One pre-arranged response: an optional completion delay plus the outcome.
struct Scripted<T> {
    delay: Duration,
    result: TransportResult<T>,
}

fn ok<T>(value: T) -> Scripted<T> {
    Scripted {
        delay: Duration::ZERO,
        result: Ok(value),
    }
}

fn ok_after<T>(millis: u64, value: T) -> Scripted<T> {
    Scripted {
        delay: Duration::from_millis(millis),
        result: Ok(value),
    }
}

fn fail<T>(error: TransportError) -> Scripted<T> {
    Scripted {
        delay: Duration::ZERO,
        result: Err(error),
    }
}

#[derive(Default)]
struct ScriptedApi {
    logins: RefCell<VecDeque<Scripted<LoginBody>>>,
    user_pages: RefCell<VecDeque<Scripted<UserPageBody>>>,
    block_toggles: RefCell<VecDeque<Scripted<BlockUserBody>>>,
    category_lists: RefCell<VecDeque<Scripted<CategoryListBody>>>,
    category_creates: RefCell<VecDeque<Scripted<CategoryBody>>>,
    category_details: RefCell<VecDeque<Scripted<Category>>>,
    category_updates: RefCell<VecDeque<Scripted<CategoryBody>>>,
    category_deletes: RefCell<VecDeque<Scripted<CategoryBody>>>,
    suggestions: RefCell<VecDeque<Scripted<SuggestionBody>>>,
    course_lists: RefCell<VecDeque<Scripted<CourseListBody>>>,
    enrollments: RefCell<VecDeque<Scripted<EnrollBody>>>,

    /// Queries the suggestion endpoint actually received.
    suggestion_queries: RefCell<Vec<String>>,
    /// (page, limit) pairs the listing endpoint actually received.
    page_requests: RefCell<Vec<(u32, u32)>>,
}

impl ScriptedApi {
    async fn take<T>(
        queue: &RefCell<VecDeque<Scripted<T>>>,
        endpoint: &str,
    ) -> TransportResult<T> {
        let scripted = queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {endpoint}"));
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

#[async_trait(?Send)]
impl AdminApi for ScriptedApi {
    async fn login(&self, _email: &str, _password: &str) -> TransportResult<LoginBody> {
        Self::take(&self.logins, "login").await
    }

    async fn list_users(&self, page: u32, limit: u32) -> TransportResult<UserPageBody> {
        self.page_requests.borrow_mut().push((page, limit));
        Self::take(&self.user_pages, "list_users").await
    }

    async fn toggle_user_block(&self, _id: &str) -> TransportResult<BlockUserBody> {
        Self::take(&self.block_toggles, "toggle_user_block").await
    }

    async fn list_categories(&self) -> TransportResult<CategoryListBody> {
        Self::take(&self.category_lists, "list_categories").await
    }

    async fn create_category(&self, _draft: &CategoryDraft) -> TransportResult<CategoryBody> {
        Self::take(&self.category_creates, "create_category").await
    }

    async fn get_category(&self, _id: &str) -> TransportResult<Category> {
        Self::take(&self.category_details, "get_category").await
    }

    async fn update_category(
        &self,
        _id: &str,
        _draft: &CategoryDraft,
    ) -> TransportResult<CategoryBody> {
        Self::take(&self.category_updates, "update_category").await
    }

    async fn set_category_deleted(
        &self,
        _id: &str,
        _deleted: bool,
    ) -> TransportResult<CategoryBody> {
        Self::take(&self.category_deletes, "set_category_deleted").await
    }

    async fn user_suggestions(&self, query: &str) -> TransportResult<SuggestionBody> {
        self.suggestion_queries.borrow_mut().push(query.to_string());
        Self::take(&self.suggestions, "user_suggestions").await
    }

    async fn list_courses(&self) -> TransportResult<CourseListBody> {
        Self::take(&self.course_lists, "list_courses").await
    }

    async fn enroll(&self, _request: &EnrollmentRequest) -> TransportResult<EnrollBody> {
        Self::take(&self.enrollments, "enroll").await
    }
}

fn user(id: &str, blocked: bool) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{id}@courseboard.test"),
        is_blocked: blocked,
    }
}

fn category(id: &str, name: &str, deleted: bool) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} courses"),
        is_deleted: deleted,
    }
}

fn user_page(ids: &[&str], page: u32, limit: u32, total: u64) -> UserPageBody {
    UserPageBody {
        users: ids.iter().map(|id| user(id, false)).collect(),
        total,
        page,
        limit,
    }
}

fn status_error(status: u16, message: &str) -> TransportError {
    TransportError::Status {
        status,
        body: format!(r#"{{"message":"{message}"}}"#),
    }
}

struct Harness {
    api: Rc<ScriptedApi>,
    tokens: Rc<MemoryTokenStore>,
    engine: Rc<Engine>,
}

fn harness() -> Harness {
    let api = Rc::new(ScriptedApi::default());
    let tokens = Rc::new(MemoryTokenStore::new());
    let engine = Engine::new(
        Rc::clone(&api) as Rc<dyn AdminApi>,
        Rc::clone(&tokens) as Rc<dyn TokenStore>,
        EngineConfig::default(),
    );
    Harness {
        api,
        tokens,
        engine,
    }
}

async fn advance(millis: u64) {
    // let freshly spawned tasks register their sleeps before the clock moves
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    tokio::time::advance(Duration::from_millis(millis)).await;
    // let any timer that just came due run to completion
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn fetch_page_replaces_wholesale_and_failure_keeps_stale_page() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1", "u2"], 1, 5, 12)));
            h.engine.fetch_users_page(1, 5).await;

            {
                let users = h.engine.users.borrow();
                let page = users.list.data().expect("page loaded");
                assert_eq!(page.items.len(), 2);
                assert_eq!(page.total, 12);
                assert_eq!(users.list.status(), RequestStatus::Succeeded);
            }

            h.api
                .user_pages
                .borrow_mut()
                .push_back(fail(status_error(500, "")));
            h.engine.fetch_users_page(2, 5).await;

            let users = h.engine.users.borrow();
            assert_eq!(users.list.status(), RequestStatus::Failed);
            // stale page stays visible, annotated with the error
            let page = users.list.data().expect("stale page kept");
            assert_eq!(page.items[0].id, "u1");
            assert_eq!(
                users.list.error().map(|e| e.message.as_str()),
                Some("Failed to fetch users")
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn block_toggle_merges_only_the_confirmed_field() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            // page 2 of a 5-per-page listing
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1", "u2", "u3", "u4", "u5"], 2, 5, 12)));
            h.engine.fetch_users_page(2, 5).await;

            h.api.block_toggles.borrow_mut().push_back(ok(BlockUserBody {
                message: "User blocked".to_string(),
                id: "u1".to_string(),
                is_blocked: true,
            }));
            h.engine.toggle_user_block("u1").await;

            let users = h.engine.users.borrow();
            let page = users.list.data().expect("page loaded");
            assert!(page.items[0].is_blocked);
            assert_eq!(page.items[0].name, "User u1");
            assert!(page.items.iter().skip(1).all(|u| !u.is_blocked));
            assert_eq!(users.block.status(), RequestStatus::Succeeded);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn block_toggle_of_offpage_user_changes_nothing_and_raises_no_error() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1", "u2"], 1, 5, 12)));
            h.engine.fetch_users_page(1, 5).await;
            let before = h.engine.users.borrow().list.data().cloned();

            h.api.block_toggles.borrow_mut().push_back(ok(BlockUserBody {
                message: "User blocked".to_string(),
                id: "u9".to_string(),
                is_blocked: true,
            }));
            h.engine.toggle_user_block("u9").await;

            let users = h.engine.users.borrow();
            assert_eq!(users.list.data().cloned(), before);
            assert_eq!(users.block.status(), RequestStatus::Succeeded);
            assert!(users.block.error().is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn slow_stale_page_response_cannot_overwrite_the_fresh_one() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            // First dispatch completes after 500 ms, the second after 100 ms:
            // the fresh response arrives first, the stale one must be dropped.
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok_after(500, user_page(&["old1", "old2"], 1, 5, 12)));
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok_after(100, user_page(&["new1"], 2, 5, 6)));

            tokio::join!(
                h.engine.fetch_users_page(1, 5),
                h.engine.fetch_users_page(2, 5),
            );

            let users = h.engine.users.borrow();
            let page = users.list.data().expect("page loaded");
            assert_eq!(page.page, 2);
            assert_eq!(page.items.len(), 1);
            assert_eq!(page.items[0].id, "new1");
            assert_eq!(users.list.status(), RequestStatus::Succeeded);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_issue_one_dispatch_for_the_trailing_query() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.suggestions.borrow_mut().push_back(ok(SuggestionBody {
                suggestions: vec![user("app1", false)],
            }));

            Rc::clone(&h.engine).search_input("a");
            advance(100).await;
            Rc::clone(&h.engine).search_input("ap");
            advance(100).await;
            Rc::clone(&h.engine).search_input("app");
            advance(300).await;

            assert_eq!(*h.api.suggestion_queries.borrow(), vec!["app".to_string()]);
            let options = h.engine.visible_options();
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].id, "app1");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_falls_back_to_the_full_listing() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            // the suggestion reply is slow and still pending when the query
            // is cleared
            h.api.suggestions.borrow_mut().push_back(ok_after(
                1000,
                SuggestionBody {
                    suggestions: vec![user("jo1", false)],
                },
            ));
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1", "u2"], 1, 10, 2)));

            Rc::clone(&h.engine).search_input("jo");
            advance(300).await; // debounce fires, suggestion request in flight

            Rc::clone(&h.engine).search_input("");
            advance(300).await; // debounce fires, full listing fetched

            let options = h.engine.visible_options();
            assert_eq!(options.len(), 2);
            assert_eq!(options[0].id, "u1");
            assert_eq!(*h.api.page_requests.borrow(), vec![(1, 10)]);

            // the pending suggestion reply lands now; it must not override
            // the full-listing display
            advance(1000).await;
            let options = h.engine.visible_options();
            assert_eq!(options.len(), 2);
            assert_eq!(options[0].id, "u1");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn selecting_a_suggestion_collapses_to_listing_mode_and_defuses_the_dispatch() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1"], 1, 10, 1)));
            h.engine.fetch_users_page(1, 10).await;

            let picked = user("u7", false);
            Rc::clone(&h.engine).search_input("u7");
            h.engine.select_suggestion(picked.clone());

            // the scheduled dispatch for "u7" must not fire after selection
            advance(300).await;
            assert!(h.api.suggestion_queries.borrow().is_empty());

            assert_eq!(h.engine.search.borrow().query, "");
            assert_eq!(h.engine.selected_user(), Some(picked));
            // display collapsed back to the full listing
            assert_eq!(h.engine.visible_options()[0].id, "u1");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn created_feedback_expires_exactly_on_the_ttl() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.category_creates.borrow_mut().push_back(ok(CategoryBody {
                message: "Category created".to_string(),
                category: category("c1", "Rust", false),
            }));

            Rc::clone(&h.engine)
                .create_category(CategoryDraft {
                    name: "Rust".to_string(),
                    description: "Systems".to_string(),
                })
                .await;

            assert!(h.engine.categories.borrow().created.is_raised());
            // creation does not append to the cached listing
            assert!(h.engine.categories.borrow().list.data().is_none());

            advance(2999).await;
            assert!(h.engine.categories.borrow().created.is_raised());

            advance(1).await;
            assert!(!h.engine.categories.borrow().created.is_raised());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn second_create_restarts_the_feedback_countdown() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            for name in ["Rust", "Go"] {
                h.api.category_creates.borrow_mut().push_back(ok(CategoryBody {
                    message: "Category created".to_string(),
                    category: category(name, name, false),
                }));
            }

            let draft = |name: &str| CategoryDraft {
                name: name.to_string(),
                description: String::new(),
            };

            Rc::clone(&h.engine).create_category(draft("Rust")).await;
            advance(1000).await;
            Rc::clone(&h.engine).create_category(draft("Go")).await;

            // 3000 ms after the *first* create: still raised
            advance(2000).await;
            assert!(h.engine.categories.borrow().created.is_raised());

            // 3000 ms after the second create: exactly one reset
            advance(1000).await;
            assert!(!h.engine.categories.borrow().created.is_raised());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn delete_toggle_merges_confirmed_category_into_the_listing() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.category_lists.borrow_mut().push_back(ok(CategoryListBody {
                categories: vec![category("c1", "Rust", false), category("c2", "Go", false)],
            }));
            h.engine.fetch_categories().await;

            h.api.category_deletes.borrow_mut().push_back(ok(CategoryBody {
                message: "Category deleted".to_string(),
                category: category("c1", "Rust", true),
            }));
            h.engine.set_category_deleted("c1", true).await;

            let categories = h.engine.categories.borrow();
            let items = categories.list.data().expect("listing loaded");
            assert!(items[0].is_deleted);
            assert!(!items[1].is_deleted);
            assert_eq!(items.len(), 2);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn update_success_signals_without_touching_the_listing() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.category_lists.borrow_mut().push_back(ok(CategoryListBody {
                categories: vec![category("c1", "Rust", false)],
            }));
            h.engine.fetch_categories().await;

            h.api.category_updates.borrow_mut().push_back(ok(CategoryBody {
                message: "Category updated".to_string(),
                category: category("c1", "Rust 2024", false),
            }));
            h.engine
                .update_category(
                    "c1",
                    CategoryDraft {
                        name: "Rust 2024".to_string(),
                        description: String::new(),
                    },
                )
                .await;

            let categories = h.engine.categories.borrow();
            assert_eq!(categories.update.status(), RequestStatus::Succeeded);
            assert_eq!(
                categories.update.data().map(|c| c.name.as_str()),
                Some("Rust 2024")
            );
            // the cached listing is reconciled by an explicit refetch, not here
            let items = categories.list.data().expect("listing loaded");
            assert_eq!(items[0].name, "Rust");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn overlapping_detail_fetches_resolve_to_the_latest_one() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .category_details
                .borrow_mut()
                .push_back(ok_after(500, category("c1", "Rust", false)));
            h.api
                .category_details
                .borrow_mut()
                .push_back(ok_after(100, category("c2", "Go", false)));

            tokio::join!(
                h.engine.fetch_category("c1"),
                h.engine.fetch_category("c2"),
            );

            let categories = h.engine.categories.borrow();
            assert_eq!(categories.detail.data().map(|c| c.id.as_str()), Some("c2"));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn enrollment_success_raises_feedback_and_records_the_user() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.enrollments.borrow_mut().push_back(ok(EnrollBody {
                message: "User enrolled".to_string(),
                user: user("u1", false),
            }));

            Rc::clone(&h.engine).enroll("u1", "course-9", "manual").await;

            {
                let enrollment = h.engine.enrollment.borrow();
                assert_eq!(enrollment.enroll.status(), RequestStatus::Succeeded);
                assert_eq!(enrollment.enroll.data().map(|u| u.id.as_str()), Some("u1"));
                assert!(enrollment.enrolled.is_raised());
            }

            advance(3000).await;
            assert!(!h.engine.enrollment.borrow().enrolled.is_raised());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn blocked_account_rejection_forces_logout_everywhere() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.tokens.set("jwt-live");
            h.api
                .user_pages
                .borrow_mut()
                .push_back(fail(status_error(403, "Your account has been blocked")));

            h.engine.fetch_users_page(1, 5).await;

            assert_eq!(h.tokens.get(), None);
            assert!(h.engine.session.borrow().forced_logout);

            let users = h.engine.users.borrow();
            let error = users.list.error().expect("channel failed");
            assert_eq!(error.kind, ErrorKind::Blocked);
            assert_eq!(error.message, "Your account has been blocked");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn stale_blocked_rejection_still_forces_logout_but_not_a_channel_error() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.tokens.set("jwt-live");

            // The first dispatch comes back last, carrying the blocked
            // rejection; by then a newer dispatch has already resolved.
            h.api
                .user_pages
                .borrow_mut()
                .push_back(Scripted {
                    delay: Duration::from_millis(500),
                    result: Err(status_error(403, "Your account has been blocked")),
                });
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok_after(100, user_page(&["u1"], 1, 5, 1)));

            tokio::join!(
                h.engine.fetch_users_page(1, 5),
                h.engine.fetch_users_page(1, 5),
            );

            // the stale reject never reaches the channel
            let users = h.engine.users.borrow();
            assert_eq!(users.list.status(), RequestStatus::Succeeded);
            assert!(users.list.error().is_none());

            // but the account-blocked fact is not subject to staleness
            assert_eq!(h.tokens.get(), None);
            assert!(h.engine.session.borrow().forced_logout);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn login_stores_the_token_and_logout_clears_it() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api.logins.borrow_mut().push_back(ok(LoginBody {
                message: "Welcome".to_string(),
                admin_id: "a1".to_string(),
                token: "jwt-1".to_string(),
            }));

            h.engine.login("admin@courseboard.test", "hunter2").await;

            assert!(h.engine.is_authenticated());
            assert_eq!(h.tokens.get().as_deref(), Some("jwt-1"));
            assert_eq!(
                h.engine
                    .session
                    .borrow()
                    .login
                    .data()
                    .map(|s| s.admin_id.as_str()),
                Some("a1")
            );

            h.engine.logout();
            assert!(!h.engine.is_authenticated());
            assert_eq!(
                h.engine.session.borrow().login.status(),
                RequestStatus::Idle
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_recovers_by_retrying_the_same_operation() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .user_pages
                .borrow_mut()
                .push_back(fail(TransportError::Network("connection refused".into())));
            h.engine.fetch_users_page(1, 5).await;
            assert_eq!(
                h.engine.users.borrow().list.status(),
                RequestStatus::Failed
            );

            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1"], 1, 5, 1)));
            h.engine.fetch_users_page(1, 5).await;

            let users = h.engine.users.borrow();
            assert_eq!(users.list.status(), RequestStatus::Succeeded);
            assert!(users.list.error().is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn bootstrap_loads_all_three_listings() {
    let h = harness();
    let local = LocalSet::new();
    local
        .run_until(async {
            h.api
                .user_pages
                .borrow_mut()
                .push_back(ok(user_page(&["u1"], 1, 10, 1)));
            h.api.category_lists.borrow_mut().push_back(ok(CategoryListBody {
                categories: vec![category("c1", "Rust", false)],
            }));
            h.api.course_lists.borrow_mut().push_back(ok(CourseListBody {
                courses: vec![Course {
                    id: "course-9".to_string(),
                    title: "Ownership in Practice".to_string(),
                }],
            }));

            h.engine.bootstrap().await;

            assert!(h.engine.users.borrow().list.data().is_some());
            assert!(h.engine.categories.borrow().list.data().is_some());
            assert_eq!(
                h.engine
                    .courses
                    .borrow()
                    .list
                    .data()
                    .map(|c| c[0].title.clone()),
                Some("Ownership in Practice".to_string())
            );
        })
        .await;
}
